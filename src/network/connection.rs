//! Client Connection
//!
//! The client side of one session: a TCP stream with buffered reader
//! and writer halves, carrying one synchronous exchange at a time.

use std::io::{BufReader, BufWriter, Write};
use std::net::TcpStream;
use std::time::Duration;

use bytes::Bytes;

use crate::error::Result;
use crate::protocol::{read_header, read_payload, write_header, write_payload, Header};

/// A live connection to a filebay server
pub struct Connection {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Connect to a server
    pub fn connect(host: &str, port: u16) -> Result<Self> {
        let stream = TcpStream::connect((host, port))?;
        tracing::debug!("connected to {}:{}", host, port);
        Connection::from_stream(stream)
    }

    /// Wrap an already-established stream
    pub fn from_stream(stream: TcpStream) -> Result<Self> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            peer_addr,
        })
    }

    /// Configure connection timeouts
    ///
    /// Zero leaves the corresponding direction blocking indefinitely,
    /// which is the default.
    pub fn set_timeouts(&mut self, read_ms: u64, write_ms: u64) -> Result<()> {
        let read_stream = self.reader.get_ref();
        let write_stream = self.writer.get_ref();

        if read_ms > 0 {
            read_stream.set_read_timeout(Some(Duration::from_millis(read_ms)))?;
        }
        if write_ms > 0 {
            write_stream.set_write_timeout(Some(Duration::from_millis(write_ms)))?;
        }

        Ok(())
    }

    /// Send one request: header plus optional payload, flushed as one
    /// unit
    pub fn send_request(&mut self, header: &Header, payload: Option<&[u8]>) -> Result<()> {
        tracing::debug!("sending header {}", header);
        write_header(&mut self.writer, header)?;
        if let Some(payload) = payload {
            write_payload(&mut self.writer, payload)?;
            tracing::debug!("sent {} payload bytes", payload.len());
        }
        self.writer.flush()?;
        Ok(())
    }

    /// Receive one response header, blocking until it arrives
    pub fn recv_header(&mut self) -> Result<Header> {
        let header = read_header(&mut self.reader)?;
        tracing::debug!("received header {}", header);
        Ok(header)
    }

    /// Receive exactly `len` payload bytes
    pub fn recv_payload(&mut self, len: u32) -> Result<Bytes> {
        let payload = read_payload(&mut self.reader, len)?;
        tracing::debug!("received {} payload bytes", payload.len());
        Ok(payload)
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}
