//! Command Executors
//!
//! One procedure per data-moving command. Each performs exactly one
//! request/response exchange on the live connection and reconciles
//! local file I/O with the remote result.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::{FilebayError, Result};
use crate::network::Connection;
use crate::protocol::{FileName, Header, Outcome, Tag, MAX_PAYLOAD_SIZE};

/// Static usage summary printed by `help`
pub const HELP_TEXT: &str = "\
exit         - Exit the program.  Equivalent to EOF.
get filename - Copy remote file to local host.
help         - Print help summary.
ls           - List names of files on remote server.
put filename - Copy local file to remote host.
rm filename  - Remove file from remote server.
";

/// List remote files and print the listing verbatim
pub fn ls(conn: &mut Connection, out: &mut dyn Write) -> Result<()> {
    let request = Header::request(Tag::Ls, None);
    conn.send_request(&request, None)?;

    let response = conn.recv_header()?;
    match response.outcome(Tag::LsOut) {
        Outcome::Success { len } => {
            let listing = conn.recv_payload(len)?;
            out.write_all(&listing)?;
            Ok(())
        }
        Outcome::Failure { code } => Err(FilebayError::remote("ls", "", code)),
    }
}

/// Fetch a remote file: echo its content, then write it under
/// `local_dir`, overwriting any existing file
///
/// On failure the local filesystem is untouched. The local path is
/// derived from the validated request name, never from the name the
/// server echoes back.
pub fn get(
    conn: &mut Connection,
    out: &mut dyn Write,
    local_dir: &Path,
    filename: &str,
) -> Result<()> {
    let name = FileName::new(filename)?;
    let request = Header::request(Tag::Get, Some(name.clone()));
    conn.send_request(&request, None)?;

    let response = conn.recv_header()?;
    match response.outcome(Tag::File) {
        Outcome::Success { len } => {
            let content = conn.recv_payload(len)?;
            out.write_all(&content)?;
            let path = local_dir.join(name.as_str());
            fs::write(&path, &content).map_err(|source| FilebayError::File {
                path: path.clone(),
                source,
            })?;
            Ok(())
        }
        Outcome::Failure { code } => Err(FilebayError::remote("get", filename, code)),
    }
}

/// Upload a local file under its own name
///
/// The file is read in full before any bytes go out, so a missing or
/// unreadable local file never reaches the server.
pub fn put(conn: &mut Connection, local_dir: &Path, filename: &str) -> Result<()> {
    let name = FileName::new(filename)?;
    let path = local_dir.join(name.as_str());
    let content = fs::read(&path).map_err(|source| FilebayError::File {
        path: path.clone(),
        source,
    })?;
    if content.len() as u64 > MAX_PAYLOAD_SIZE as u64 {
        return Err(FilebayError::File {
            path,
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!(
                    "{} bytes exceeds the payload limit of {}",
                    content.len(),
                    MAX_PAYLOAD_SIZE
                ),
            ),
        });
    }

    let mut request = Header::request(Tag::Put, Some(name));
    request.nbytes = content.len() as u32;
    conn.send_request(&request, Some(&content))?;

    let response = conn.recv_header()?;
    match response.outcome(Tag::Ack) {
        Outcome::Success { len } => {
            tracing::debug!("server acknowledged {} bytes", len);
            Ok(())
        }
        Outcome::Failure { code } => Err(FilebayError::remote("put", filename, code)),
    }
}

/// Remove a remote file; no local side effects either way
pub fn rm(conn: &mut Connection, filename: &str) -> Result<()> {
    let name = FileName::new(filename)?;
    let request = Header::request(Tag::Rm, Some(name));
    conn.send_request(&request, None)?;

    let response = conn.recv_header()?;
    match response.outcome(Tag::Ack) {
        Outcome::Success { len } => {
            tracing::debug!("server acknowledged {} bytes", len);
            Ok(())
        }
        Outcome::Failure { code } => Err(FilebayError::remote("rm", filename, code)),
    }
}
