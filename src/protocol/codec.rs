//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! Every message starts with one fixed-size header:
//!
//! ```text
//! ┌─────────┬──────────────────────┬────────────┐
//! │ Tag (1) │    Filename (60)     │ Nbytes (4) │
//! └─────────┴──────────────────────┴────────────┘
//! ```
//!
//! - Tag: one byte naming the request or response kind
//! - Filename: NUL-terminated name, zero-padded; all zero when the
//!   operation needs no name
//! - Nbytes: big-endian u32; payload length when the tag carries a
//!   payload, error code on `Error`, informational count on `Ack`
//!
//! A payload of exactly `nbytes` raw bytes follows the header when the
//! tag is `LsOut`, `File` (responses) or `Put` (requests) and `nbytes`
//! is nonzero. There is no other framing.

use std::io::{Read, Write};

use bytes::Bytes;

use super::{FileName, Header, Tag, FILENAME_FIELD};
use crate::error::{FilebayError, Result};

/// Header size: 1 byte tag + 60 bytes filename + 4 bytes nbytes
pub const HEADER_SIZE: usize = 1 + FILENAME_FIELD + 4;

/// Maximum payload size (64 MB)
///
/// Applies only where `nbytes` is a length; an `Error` code is never
/// checked against it.
pub const MAX_PAYLOAD_SIZE: u32 = 64 * 1024 * 1024;

/// Encode a header into its fixed wire layout
pub fn encode_header(header: &Header) -> [u8; HEADER_SIZE] {
    let mut buf = [0u8; HEADER_SIZE];
    buf[0] = header.tag as u8;
    buf[1..1 + FILENAME_FIELD].copy_from_slice(&FileName::to_wire(header.filename.as_ref()));
    buf[1 + FILENAME_FIELD..].copy_from_slice(&header.nbytes.to_be_bytes());
    buf
}

/// Decode a header from its fixed wire layout
pub fn decode_header(bytes: &[u8]) -> Result<Header> {
    if bytes.len() < HEADER_SIZE {
        return Err(FilebayError::Protocol(format!(
            "Incomplete header: expected {} bytes, got {}",
            HEADER_SIZE,
            bytes.len()
        )));
    }

    let tag = Tag::from_wire(bytes[0])?;

    let mut field = [0u8; FILENAME_FIELD];
    field.copy_from_slice(&bytes[1..1 + FILENAME_FIELD]);
    let filename = FileName::from_wire(&field)?;

    let nbytes = u32::from_be_bytes([
        bytes[1 + FILENAME_FIELD],
        bytes[2 + FILENAME_FIELD],
        bytes[3 + FILENAME_FIELD],
        bytes[4 + FILENAME_FIELD],
    ]);

    // Only lengths are bounded; Error codes and Ack counts are opaque.
    if tag.carries_payload() && nbytes > MAX_PAYLOAD_SIZE {
        return Err(FilebayError::Protocol(format!(
            "Payload too large: {} bytes (max {})",
            nbytes, MAX_PAYLOAD_SIZE
        )));
    }

    Ok(Header {
        tag,
        filename,
        nbytes,
    })
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read one complete header from a stream
///
/// Blocks until all header bytes arrive or the stream fails.
pub fn read_header<R: Read>(reader: &mut R) -> Result<Header> {
    let mut buf = [0u8; HEADER_SIZE];
    reader.read_exact(&mut buf)?;
    decode_header(&buf)
}

/// Write one header to a stream without flushing
///
/// The caller flushes once the whole message (header plus any payload)
/// has been written.
pub fn write_header<W: Write>(writer: &mut W, header: &Header) -> Result<()> {
    writer.write_all(&encode_header(header))?;
    Ok(())
}

/// Read exactly `len` payload bytes from a stream
pub fn read_payload<R: Read>(reader: &mut R, len: u32) -> Result<Bytes> {
    if len > MAX_PAYLOAD_SIZE {
        return Err(FilebayError::Protocol(format!(
            "Payload too large: {} bytes (max {})",
            len, MAX_PAYLOAD_SIZE
        )));
    }
    let mut buf = vec![0u8; len as usize];
    if len > 0 {
        reader.read_exact(&mut buf)?;
    }
    Ok(Bytes::from(buf))
}

/// Write raw payload bytes to a stream without flushing
pub fn write_payload<W: Write>(writer: &mut W, payload: &[u8]) -> Result<()> {
    writer.write_all(payload)?;
    Ok(())
}
