//! TCP Server
//!
//! Accepts connections and serves the file-exchange protocol out of a
//! single root directory, one handler thread per connection.

use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::config::Config;
use crate::error::{FilebayError, Result};
use crate::protocol::{
    read_header, read_payload, write_header, write_payload, FileName, Header, Tag,
    MAX_PAYLOAD_SIZE,
};

// POSIX errno values used in failure responses
const EIO: u32 = 5;
const EINVAL: u32 = 22;
const EFBIG: u32 = 27;

/// TCP server for filebay
pub struct Server {
    config: Config,
    listener: TcpListener,
    active: Arc<AtomicUsize>,
}

impl Server {
    /// Bind a listener and prepare the root directory
    ///
    /// Binding to port 0 picks an ephemeral port; see
    /// [`Server::local_addr`].
    pub fn bind(config: Config) -> Result<Self> {
        fs::create_dir_all(&config.root_dir)?;
        let listener = TcpListener::bind(&config.listen_addr)
            .map_err(|e| FilebayError::Config(format!("cannot bind {}: {}", config.listen_addr, e)))?;

        Ok(Self {
            config,
            listener,
            active: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// The address the listener actually bound
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections forever (blocking)
    pub fn run(&self) -> Result<()> {
        tracing::info!(
            "serving {} on {}",
            self.config.root_dir.display(),
            self.local_addr()?
        );

        for stream in self.listener.incoming() {
            let stream = match stream {
                Ok(s) => s,
                Err(e) => {
                    tracing::warn!("accept failed: {}", e);
                    continue;
                }
            };

            if self.active.load(Ordering::SeqCst) >= self.config.max_connections {
                tracing::warn!(
                    "connection limit ({}) reached, dropping {}",
                    self.config.max_connections,
                    stream
                        .peer_addr()
                        .map(|a| a.to_string())
                        .unwrap_or_else(|_| "unknown".to_string())
                );
                continue;
            }

            let active = Arc::clone(&self.active);
            active.fetch_add(1, Ordering::SeqCst);

            let root = self.config.root_dir.clone();
            let read_ms = self.config.read_timeout_ms;
            let write_ms = self.config.write_timeout_ms;

            thread::spawn(move || {
                match Handler::new(stream, root, read_ms, write_ms) {
                    Ok(mut handler) => {
                        if let Err(e) = handler.handle() {
                            tracing::warn!("handler error: {}", e);
                        }
                    }
                    Err(e) => tracing::warn!("connection setup failed: {}", e),
                }
                active.fetch_sub(1, Ordering::SeqCst);
            });
        }

        Ok(())
    }
}

/// Serves one client connection
struct Handler {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
    root: PathBuf,
    peer_addr: String,
}

impl Handler {
    fn new(stream: TcpStream, root: PathBuf, read_ms: u64, write_ms: u64) -> Result<Self> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;

        if read_ms > 0 {
            stream.set_read_timeout(Some(Duration::from_millis(read_ms)))?;
        }
        if write_ms > 0 {
            stream.set_write_timeout(Some(Duration::from_millis(write_ms)))?;
        }

        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            root,
            peer_addr,
        })
    }

    /// Handle the connection (blocking until closed)
    ///
    /// Reads requests in a loop and sends responses. Returns when the
    /// client disconnects or an error occurs.
    fn handle(&mut self) -> Result<()> {
        tracing::debug!("connection established from {}", self.peer_addr);

        loop {
            let header = match read_header(&mut self.reader) {
                Ok(header) => header,
                Err(FilebayError::Io(ref e))
                    if matches!(
                        e.kind(),
                        std::io::ErrorKind::UnexpectedEof
                            | std::io::ErrorKind::ConnectionReset
                            | std::io::ErrorKind::ConnectionAborted
                            | std::io::ErrorKind::WouldBlock
                            | std::io::ErrorKind::TimedOut
                    ) =>
                {
                    tracing::debug!("client {} disconnected", self.peer_addr);
                    return Ok(());
                }
                Err(e @ FilebayError::Io(_)) => {
                    tracing::warn!("error reading from {}: {}", self.peer_addr, e);
                    return Err(e);
                }
                Err(e) => {
                    // The header bytes arrived but did not decode; the
                    // stream may be mid-payload, so answer once and
                    // drop the connection.
                    tracing::warn!("bad request from {}: {}", self.peer_addr, e);
                    let _ = self.respond(&Header::error(None, EINVAL), None);
                    return Ok(());
                }
            };

            tracing::debug!("received header {}", header);

            match header.tag {
                Tag::Exit => {
                    tracing::debug!("client {} requested exit", self.peer_addr);
                    return Ok(());
                }
                Tag::Ls => self.serve_ls()?,
                Tag::Get => self.serve_get(header.filename)?,
                Tag::Put => self.serve_put(header.filename, header.nbytes)?,
                Tag::Rm => self.serve_rm(header.filename)?,
                _ => {
                    // Help and response-only tags are not served.
                    self.respond(&Header::error(header.filename, EINVAL), None)?;
                }
            }
        }
    }

    fn serve_ls(&mut self) -> Result<()> {
        match self.listing() {
            Ok(listing) => {
                let header = Header::response(Tag::LsOut, None, listing.len() as u32);
                self.respond(&header, Some(&listing))
            }
            Err(e) => self.respond(&Header::error(None, errno_of(&e)), None),
        }
    }

    fn serve_get(&mut self, filename: Option<FileName>) -> Result<()> {
        let Some(name) = filename else {
            return self.respond(&Header::error(None, EINVAL), None);
        };
        match fs::read(self.root.join(name.as_str())) {
            Ok(content) if content.len() as u64 > MAX_PAYLOAD_SIZE as u64 => {
                self.respond(&Header::error(Some(name), EFBIG), None)
            }
            Ok(content) => {
                let header = Header::response(Tag::File, Some(name), content.len() as u32);
                self.respond(&header, Some(&content))
            }
            Err(e) => self.respond(&Header::error(Some(name), errno_of(&e)), None),
        }
    }

    fn serve_put(&mut self, filename: Option<FileName>, nbytes: u32) -> Result<()> {
        // The payload is already on the wire; consume it before
        // answering, even for a request we are going to reject.
        let payload = read_payload(&mut self.reader, nbytes)?;

        let Some(name) = filename else {
            return self.respond(&Header::error(None, EINVAL), None);
        };
        match fs::write(self.root.join(name.as_str()), &payload) {
            Ok(()) => {
                let header = Header::response(Tag::Ack, Some(name), payload.len() as u32);
                self.respond(&header, None)
            }
            Err(e) => self.respond(&Header::error(Some(name), errno_of(&e)), None),
        }
    }

    fn serve_rm(&mut self, filename: Option<FileName>) -> Result<()> {
        let Some(name) = filename else {
            return self.respond(&Header::error(None, EINVAL), None);
        };
        match fs::remove_file(self.root.join(name.as_str())) {
            Ok(()) => self.respond(&Header::response(Tag::Ack, Some(name), 0), None),
            Err(e) => self.respond(&Header::error(Some(name), errno_of(&e)), None),
        }
    }

    /// Sorted, newline-terminated flat listing of regular files
    fn listing(&self) -> std::io::Result<Vec<u8>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }
        names.sort();

        let mut listing = Vec::new();
        for name in &names {
            listing.extend_from_slice(name.as_bytes());
            listing.push(b'\n');
        }
        Ok(listing)
    }

    fn respond(&mut self, header: &Header, payload: Option<&[u8]>) -> Result<()> {
        tracing::debug!("sending header {}", header);
        write_header(&mut self.writer, header)?;
        if let Some(payload) = payload {
            write_payload(&mut self.writer, payload)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Error code to report for a failed filesystem operation
fn errno_of(e: &std::io::Error) -> u32 {
    e.raw_os_error().map(|c| c as u32).unwrap_or(EIO)
}
