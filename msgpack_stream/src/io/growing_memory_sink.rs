use super::sink::Sink;
use crate::error::{Error, ErrorKind};
use alloc::vec::Vec;

/// A sink with an in-memory buffer that grows on demand.
///
/// There is no limit on the maximum size of the buffer.
/// It's essentially a [`Vec`] on which you keep calling [`Vec::extend_from_slice`].
///
/// Once closed, further writes fail with [`ErrorKind::Closed`], but the bytes
/// written so far can still be taken.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GrowingMemorySink {
    buffer: Vec<u8>,
    closed: bool,
}

impl GrowingMemorySink {
    /// Create a sink with a zero-sized buffer.
    pub fn new() -> Self {
        Self { buffer: Vec::new(), closed: false }
    }

    /// Create a sink that can take `capacity` bytes without reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { buffer: Vec::with_capacity(capacity), closed: false }
    }

    /// Take the buffer of the sink.
    pub fn take(self) -> Vec<u8> {
        self.buffer
    }

    /// The bytes written so far.
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// The number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether nothing was written yet.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Whether [`Sink::close`] was called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

/// New bytes are appended after the contents of the vector.
impl From<Vec<u8>> for GrowingMemorySink {
    fn from(value: Vec<u8>) -> Self {
        Self { buffer: value, closed: false }
    }
}

impl Sink for GrowingMemorySink {
    fn write(&mut self, bytes: &[u8]) -> Result<(), Error> {
        if self.closed {
            return Err(ErrorKind::Closed.into());
        }
        self.buffer.extend_from_slice(bytes);
        Ok(())
    }

    fn close(&mut self) -> Result<(), Error> {
        self.closed = true;
        Ok(())
    }
}

/// A plain vector never closes; it appends for as long as it's written.
impl Sink for Vec<u8> {
    fn write(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn newly_created() {
        let sink = GrowingMemorySink::new();
        assert!(sink.is_empty());
        assert!(!sink.is_closed());
    }

    #[test]
    fn write_appends() -> Result<(), Error> {
        let mut sink = GrowingMemorySink::with_capacity(4);
        sink.write(&[1, 2, 3])?;
        sink.write_tagged_u16(4, 0x0506)?;
        assert_eq!(sink.len(), 6);
        assert_eq!(sink.as_slice(), [1, 2, 3, 4, 5, 6]);
        Ok(())
    }

    #[test]
    fn write_after_existing_contents() -> Result<(), Error> {
        let mut sink = GrowingMemorySink::from(vec![1, 2, 3]);
        sink.write(&[4])?;
        assert_eq!(sink.take(), [1, 2, 3, 4]);
        Ok(())
    }

    #[test]
    fn write_after_close() -> Result<(), Error> {
        let mut sink = GrowingMemorySink::new();
        sink.write(&[1])?;
        sink.close()?;
        assert!(sink.is_closed());
        assert_eq!(sink.write(&[2]), Err(ErrorKind::Closed.into()));
        assert_eq!(sink.take(), [1]);
        Ok(())
    }

    #[test]
    fn vector_ignores_close() -> Result<(), Error> {
        let mut sink: Vec<u8> = Vec::new();
        sink.close()?;
        Sink::write(&mut sink, &[7])?;
        assert_eq!(sink, [7]);
        Ok(())
    }
}
