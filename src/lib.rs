//! # filebay
//!
//! A small remote file-access system: an interactive client and a
//! directory-serving daemon speaking a fixed-header binary protocol
//! over TCP.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────┐          ┌──────────────────────────┐
//! │     Interactive CLI      │          │        TCP Server        │
//! │  (session + executors)   │          │  (one thread per conn)   │
//! └────────────┬─────────────┘          └────────────┬─────────────┘
//!              │                                     │
//! ┌────────────▼─────────────┐          ┌────────────▼─────────────┐
//! │        Connection        │◄────────►│         Handler          │
//! │   (blocking exchanges)   │   TCP    │   (root directory I/O)   │
//! └────────────┬─────────────┘          └────────────┬─────────────┘
//!              │                                     │
//!              └──────────────┬──────────────────────┘
//!                             ▼
//!                  ┌──────────────────────┐
//!                  │       Protocol       │
//!                  │  (header + payload)  │
//!                  └──────────────────────┘
//! ```
//!
//! Every exchange is one request header (plus payload for uploads)
//! answered by one response header (plus payload for listings and
//! downloads). The protocol is synchronous: one request is outstanding
//! at a time.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;

pub mod client;
pub mod network;
pub mod protocol;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use config::Config;
pub use error::{describe_error_code, FilebayError, Result};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of filebay
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
