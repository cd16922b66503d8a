//! Network Module
//!
//! TCP transport for both ends of the protocol.
//!
//! ## Architecture
//! - [`Connection`]: the client side, one blocking exchange at a time
//! - [`Server`]: single acceptor thread, one handler thread per
//!   connection, serving a root directory

mod connection;
mod server;

pub use connection::Connection;
pub use server::Server;
