use super::sink::Sink;
use crate::error::{Error, ErrorKind};

/// A sink with an in-memory buffer that has a fixed size.
///
/// You may pass a vector, an array, an in-memory slice, or a memory mapped file.
/// The size of the buffer will never be changed, even if the type you passed is
/// resizable. A write that doesn't fit fails with [`ErrorKind::UnexpectedEof`]
/// and leaves the buffer untouched, so the encoder never emits half a value.
///
/// This sink needs no allocation, which makes it the sink of choice for
/// `no_std` targets.
#[derive(Debug)]
pub struct FixedMemorySink<Buffer> {
    buffer: Buffer,
    stream_pos: usize,
    closed: bool,
}

impl<Buffer> FixedMemorySink<Buffer> {
    /// Create a sink that writes from the beginning of `buffer`.
    pub fn new(buffer: Buffer) -> Self {
        Self { buffer, stream_pos: 0, closed: false }
    }

    /// The number of bytes written so far.
    pub fn position(&self) -> usize {
        self.stream_pos
    }

    /// Whether [`Sink::close`] was called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Take the buffer of the sink.
    pub fn into_inner(self) -> Buffer {
        self.buffer
    }
}

impl<Buffer: AsRef<[u8]>> FixedMemorySink<Buffer> {
    /// The bytes written so far.
    pub fn written(&self) -> &[u8] {
        &self.buffer.as_ref()[..self.stream_pos]
    }

    /// The number of bytes that can still be written.
    pub fn available(&self) -> usize {
        self.buffer.as_ref().len() - self.stream_pos
    }
}

impl<Buffer: AsMut<[u8]>> Sink for FixedMemorySink<Buffer> {
    fn write(&mut self, bytes: &[u8]) -> Result<(), Error> {
        if self.closed {
            return Err(ErrorKind::Closed.into());
        }
        if self.stream_pos + bytes.len() <= self.buffer.as_mut().len() {
            let range = self.stream_pos..(self.stream_pos + bytes.len());
            self.buffer.as_mut()[range].copy_from_slice(bytes);
            self.stream_pos += bytes.len();
            Ok(())
        } else {
            Err(ErrorKind::UnexpectedEof.into())
        }
    }

    fn close(&mut self) -> Result<(), Error> {
        self.closed = true;
        Ok(())
    }
}
