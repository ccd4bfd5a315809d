//! Packet framing over a byte stream.
//!
//! `PacketTransport` owns the client stream for one session and provides:
//! 1. **De-framing:** Skip to `$`, collect the body up to `#`, discard two checksum digits.
//! 2. **Framing:** `$<body>#<checksum>` for every response.
//! 3. **Acknowledgement:** The single `+` byte sent for each inbound packet in ack mode.
//!
//! The body buffer has a fixed capacity. Bytes past it are dropped and the
//! packet is still delivered, marked as truncated.

use std::io::{self, ErrorKind, Read, Write};

use tracing::debug;

use crate::common::StubResult;
use crate::common::constants::{ACK, CHECKSUM_DIGITS, PACKET_END, PACKET_START};
use crate::protocol::checksum::checksum_digits;

/// One inbound packet body with its delimiters and checksum removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    body: Vec<u8>,
    truncated: bool,
}

impl Packet {
    /// Creates a packet from a complete body.
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: body.into(),
            truncated: false,
        }
    }

    /// Body bytes between `$` and `#`, capped at the receive capacity.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// True if body bytes were dropped because the buffer was full.
    pub const fn truncated(&self) -> bool {
        self.truncated
    }
}

/// Frames and de-frames packets on a client stream.
#[derive(Debug)]
pub struct PacketTransport<S> {
    stream: S,
    capacity: usize,
}

impl<S: Read + Write> PacketTransport<S> {
    /// Wraps `stream`, keeping at most `capacity` body bytes per packet.
    pub const fn new(stream: S, capacity: usize) -> Self {
        Self { stream, capacity }
    }

    /// Borrows the underlying stream.
    pub const fn get_ref(&self) -> &S {
        &self.stream
    }

    /// Consumes the transport and returns the stream.
    pub fn into_inner(self) -> S {
        self.stream
    }

    /// Reads one byte, retrying interrupted reads. `None` means end of stream.
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.stream.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
    }

    /// Reads the next packet.
    ///
    /// Bytes before `$` are skipped, which also consumes the interrupt byte a
    /// client sends to stop a continue. The two checksum digits after `#` are
    /// read and discarded whatever their value.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the client closed the stream before a body was complete.
    ///
    /// # Errors
    ///
    /// Returns `StubError::Io` if the socket read fails.
    pub fn read_packet(&mut self) -> StubResult<Option<Packet>> {
        loop {
            match self.read_byte()? {
                None => return Ok(None),
                Some(PACKET_START) => break,
                Some(_) => {}
            }
        }

        let mut body = Vec::with_capacity(self.capacity);
        let mut truncated = false;
        loop {
            match self.read_byte()? {
                None => return Ok(None),
                Some(PACKET_END) => break,
                Some(byte) if body.len() < self.capacity => body.push(byte),
                Some(_) => truncated = true,
            }
        }

        for _ in 0..CHECKSUM_DIGITS {
            let _ = self.read_byte()?;
        }

        if truncated {
            debug!(kept = body.len(), "inbound packet truncated to buffer capacity");
        }
        Ok(Some(Packet { body, truncated }))
    }

    /// Sends `body` framed as `$<body>#<checksum>`.
    ///
    /// # Errors
    ///
    /// Returns `StubError::Io` if the socket write fails.
    pub fn send_packet(&mut self, body: &[u8]) -> StubResult<()> {
        let mut frame = Vec::with_capacity(body.len() + 2 + CHECKSUM_DIGITS);
        frame.push(PACKET_START);
        frame.extend_from_slice(body);
        frame.push(PACKET_END);
        frame.extend_from_slice(&checksum_digits(body));
        self.stream.write_all(&frame)?;
        self.stream.flush()?;
        Ok(())
    }

    /// Sends the `+` acknowledgement byte.
    ///
    /// # Errors
    ///
    /// Returns `StubError::Io` if the socket write fails.
    pub fn send_ack(&mut self) -> StubResult<()> {
        self.stream.write_all(&[ACK])?;
        self.stream.flush()?;
        Ok(())
    }
}
