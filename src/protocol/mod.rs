//! Protocol Module
//!
//! Defines the wire protocol for client-server communication.
//!
//! ## Protocol Shape
//!
//! Every exchange is one request message followed by one response
//! message, each a fixed 65-byte header optionally followed by a raw
//! payload:
//!
//! ```text
//! ┌─────────┬──────────────────────┬────────────┬──~~──────────┐
//! │ Tag (1) │    Filename (60)     │ Nbytes (4) │   Payload    │
//! └─────────┴──────────────────────┴────────────┴──~~──────────┘
//! ```
//!
//! ### Request tags
//! - 0x01 LS    - list remote files; no filename, no payload
//! - 0x03 GET   - fetch a file; filename set, no payload
//! - 0x05 PUT   - store a file; filename set, nbytes counts the
//!   payload that follows
//! - 0x07 RM    - remove a file; filename set, no payload
//! - 0x08 EXIT  - close the session
//! - 0x09 HELP  - reserved; handled locally by the client
//!
//! ### Response tags
//! - 0x02 LSOUT - listing follows (nbytes = length)
//! - 0x04 FILE  - file content follows (nbytes = length)
//! - 0x06 ACK   - done; nbytes is an informational count
//! - 0x0A ERROR - failed; nbytes is the error code
//!
//! The protocol is synchronous and half-duplex: one request is
//! outstanding at a time, and a payload is announced only by the
//! header that precedes it.

mod codec;
mod header;
mod tag;

pub use codec::{
    decode_header, encode_header, read_header, read_payload, write_header, write_payload,
    HEADER_SIZE, MAX_PAYLOAD_SIZE,
};
pub use header::{FileName, Header, Outcome, FILENAME_CAP, FILENAME_FIELD};
pub use tag::Tag;
