//! Wire tag definitions
//!
//! One byte at the start of every header names either the request
//! being made or the kind of response that follows.

use crate::error::{FilebayError, Result};

/// Command/status tag carried in byte 0 of every header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Tag {
    /// Request the remote file listing
    Ls = 0x01,
    /// Response carrying the listing payload
    LsOut = 0x02,
    /// Request a remote file's content
    Get = 0x03,
    /// Response carrying file content
    File = 0x04,
    /// Request to store the payload as a remote file
    Put = 0x05,
    /// Response confirming a put or rm
    Ack = 0x06,
    /// Request to remove a remote file
    Rm = 0x07,
    /// Session close request
    Exit = 0x08,
    /// Help request (handled locally by the client, never sent)
    Help = 0x09,
    /// Failure response; `nbytes` holds the error code
    Error = 0x0A,
}

impl Tag {
    /// Decode a tag byte read off the wire
    pub fn from_wire(byte: u8) -> Result<Tag> {
        match byte {
            0x01 => Ok(Tag::Ls),
            0x02 => Ok(Tag::LsOut),
            0x03 => Ok(Tag::Get),
            0x04 => Ok(Tag::File),
            0x05 => Ok(Tag::Put),
            0x06 => Ok(Tag::Ack),
            0x07 => Ok(Tag::Rm),
            0x08 => Ok(Tag::Exit),
            0x09 => Ok(Tag::Help),
            0x0A => Ok(Tag::Error),
            _ => Err(FilebayError::Protocol(format!(
                "Unknown wire tag: 0x{:02x}",
                byte
            ))),
        }
    }

    /// Whether this tag may appear in a request header
    pub fn is_request(self) -> bool {
        matches!(
            self,
            Tag::Ls | Tag::Get | Tag::Put | Tag::Rm | Tag::Exit | Tag::Help
        )
    }

    /// Whether this tag may appear in a response header
    pub fn is_response(self) -> bool {
        matches!(self, Tag::LsOut | Tag::File | Tag::Ack | Tag::Error)
    }

    /// Whether a header with this tag announces a payload via `nbytes`
    ///
    /// For every other tag a nonzero `nbytes` is not a length: on
    /// `Error` it is the failure code, on `Ack` an informational count.
    pub fn carries_payload(self) -> bool {
        matches!(self, Tag::LsOut | Tag::File | Tag::Put)
    }

    /// The response tag a well-behaved server returns on success
    ///
    /// Only the four data-moving requests have one; `Exit` and `Help`
    /// are never answered.
    pub fn expected_response(self) -> Option<Tag> {
        match self {
            Tag::Ls => Some(Tag::LsOut),
            Tag::Get => Some(Tag::File),
            Tag::Put => Some(Tag::Ack),
            Tag::Rm => Some(Tag::Ack),
            _ => None,
        }
    }
}
