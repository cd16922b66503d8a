//! Header and filename definitions
//!
//! Every exchange starts with one fixed-layout header in each
//! direction. The header names the operation, the file it concerns,
//! and either the length of the payload that follows or (on `Error`
//! responses) the failure code.

use super::Tag;
use crate::error::{FilebayError, Result};

/// Usable filename bytes; one more byte on the wire holds the NUL
/// terminator.
pub const FILENAME_CAP: usize = 59;

/// Size of the filename field on the wire (name + terminator)
pub const FILENAME_FIELD: usize = FILENAME_CAP + 1;

/// A validated remote file name that fits the wire field.
///
/// Names are flat: no path separators, no `.`/`..`, no interior NUL,
/// at most [`FILENAME_CAP`] bytes. Over-long or ill-formed names are
/// rejected here, before any header is built, so the fixed buffer can
/// never be overrun.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileName(String);

impl FileName {
    /// Validate a user-supplied name
    pub fn new(name: &str) -> Result<FileName> {
        if name.is_empty() {
            return Err(FilebayError::FileName("empty name".to_string()));
        }
        if name.len() > FILENAME_CAP {
            return Err(FilebayError::FileName(format!(
                "'{}' is {} bytes (max {})",
                name,
                name.len(),
                FILENAME_CAP
            )));
        }
        if name.bytes().any(|b| b == 0) {
            return Err(FilebayError::FileName(format!(
                "'{}' contains a NUL byte",
                name.escape_default()
            )));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(FilebayError::FileName(format!(
                "'{}' contains a path separator",
                name
            )));
        }
        if name == "." || name == ".." {
            return Err(FilebayError::FileName(format!("'{}' is not a file name", name)));
        }
        Ok(FileName(name.to_string()))
    }

    /// Decode the zero-padded wire field; empty field yields `None`
    pub fn from_wire(field: &[u8; FILENAME_FIELD]) -> Result<Option<FileName>> {
        let len = field.iter().position(|&b| b == 0).ok_or_else(|| {
            FilebayError::Protocol("filename field missing NUL terminator".to_string())
        })?;
        if len == 0 {
            return Ok(None);
        }
        let name = std::str::from_utf8(&field[..len])
            .map_err(|_| FilebayError::Protocol("filename field is not UTF-8".to_string()))?;
        Ok(Some(FileName::new(name)?))
    }

    /// Encode into the zero-padded wire field
    pub fn to_wire(name: Option<&FileName>) -> [u8; FILENAME_FIELD] {
        let mut field = [0u8; FILENAME_FIELD];
        if let Some(name) = name {
            field[..name.0.len()].copy_from_slice(name.0.as_bytes());
        }
        field
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FileName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for FileName {
    type Err = FilebayError;

    fn from_str(s: &str) -> Result<FileName> {
        FileName::new(s)
    }
}

/// The fixed-layout message header
///
/// Constructed fresh for every request and every response; never
/// reused across exchanges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Operation or response kind
    pub tag: Tag,

    /// File the operation concerns; `None` for `Ls`, `Exit`, `Help`
    /// and for responses that echo no name
    pub filename: Option<FileName>,

    /// Payload length on success, error code on `Error` responses,
    /// informational count on `Ack`
    pub nbytes: u32,
}

impl Header {
    /// A request header with no payload
    pub fn request(tag: Tag, filename: Option<FileName>) -> Header {
        Header {
            tag,
            filename,
            nbytes: 0,
        }
    }

    /// A success response announcing `nbytes` of payload (or an `Ack`
    /// count)
    pub fn response(tag: Tag, filename: Option<FileName>, nbytes: u32) -> Header {
        Header {
            tag,
            filename,
            nbytes,
        }
    }

    /// A failure response carrying an error code
    pub fn error(filename: Option<FileName>, code: u32) -> Header {
        Header {
            tag: Tag::Error,
            filename,
            nbytes: code,
        }
    }

    /// Classify a response header against the success tag the request
    /// expects.
    ///
    /// Discriminates the dual-purpose `nbytes` field explicitly: it is
    /// a payload length (or count) only when the tag matches, and a
    /// failure code on any mismatch.
    pub fn outcome(&self, expected: Tag) -> Outcome {
        if self.tag == expected {
            Outcome::Success { len: self.nbytes }
        } else {
            Outcome::Failure { code: self.nbytes }
        }
    }

    /// Filename as text for log lines and error reports
    pub fn filename_str(&self) -> &str {
        self.filename.as_ref().map(|f| f.as_str()).unwrap_or("")
    }
}

impl std::fmt::Display for Header {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:?} '{}' nbytes={}",
            self.tag,
            self.filename_str(),
            self.nbytes
        )
    }
}

/// Result of one exchange, discriminated before `nbytes` is trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The expected tag came back; `len` is the payload length (zero
    /// if none follows) or the `Ack` count
    Success { len: u32 },

    /// Any other tag; `code` is the server's error code
    Failure { code: u32 },
}
