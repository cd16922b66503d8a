//! Client Module
//!
//! The interactive half of the system: per-command executors and the
//! session loop that dispatches user input to them.

pub mod commands;
mod session;

pub use session::{CommandTable, Session, UserCommand};
