//! The I/O Adapter: single-byte read/write over a character stream.
//!
//! The execution loop is generic over [`Io`] so tests can drive it against
//! in-memory buffers instead of the real standard streams.

use std::io::{self, Read, Write};

use crate::error::Fault;

/// Sentinel returned by `read_byte` on end-of-stream, per the UM spec.
pub const END_OF_STREAM: u32 = 0xFFFF_FFFF;

/// A character source/sink for the Input and Output operations.
pub trait Io {
    /// Reads the next byte, or [`END_OF_STREAM`] if the source is exhausted.
    fn read_byte(&mut self) -> Result<u32, Fault>;

    /// Writes one byte to the sink.
    fn write_byte(&mut self, byte: u8) -> Result<(), Fault>;
}

/// Standard-stream backed [`Io`], holding a persistent buffered reader
/// across calls so bytes read into the buffer are never dropped between
/// operations (the original Go source rebuilt its buffered reader on every
/// call, which discards any bytes it had already buffered).
pub struct StdIo {
    input: io::BufReader<io::Stdin>,
    output: io::Stdout,
}

impl StdIo {
    /// Creates an adapter over the process's standard streams.
    pub fn new() -> Self {
        Self {
            input: io::BufReader::new(io::stdin()),
            output: io::stdout(),
        }
    }
}

impl Default for StdIo {
    fn default() -> Self {
        Self::new()
    }
}

impl Io for StdIo {
    fn read_byte(&mut self) -> Result<u32, Fault> {
        let mut buf = [0u8; 1];
        match self.input.read(&mut buf) {
            Ok(0) => Ok(END_OF_STREAM),
            Ok(_) => Ok(u32::from(buf[0])),
            Err(e) => Err(Fault::InputError(e)),
        }
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), Fault> {
        self.output
            .write_all(&[byte])
            .and_then(|()| self.output.flush())
            .map_err(Fault::InputError)
    }
}

/// An in-memory [`Io`] used by tests: reads from a fixed buffer, writes
/// into a growable one.
#[derive(Debug, Default)]
pub struct MemoryIo {
    input: std::collections::VecDeque<u8>,
    /// Bytes written by the Output operation, in order.
    pub output: Vec<u8>,
}

impl MemoryIo {
    /// Creates a memory adapter that yields `input`'s bytes in order.
    pub fn new(input: impl Into<Vec<u8>>) -> Self {
        Self {
            input: input.into().into(),
            output: Vec::new(),
        }
    }
}

impl Io for MemoryIo {
    fn read_byte(&mut self) -> Result<u32, Fault> {
        Ok(self.input.pop_front().map_or(END_OF_STREAM, u32::from))
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), Fault> {
        self.output.push(byte);
        Ok(())
    }
}
