use super::sink::Sink;
use crate::error::{Error, ErrorKind};

/// Adapts any [`std::io::Write`] into a [`Sink`].
///
/// Every write is forwarded to [`std::io::Write::write_all`], so no buffering
/// happens here; wrap the writer in a [`std::io::BufWriter`] if it is slow to
/// write small pieces. Closing the sink flushes the writer, and further writes
/// fail with [`ErrorKind::Closed`]. The writer itself is released by dropping
/// the sink or through [`IoSink::into_inner`].
#[derive(Debug)]
pub struct IoSink<W: std::io::Write> {
    inner: W,
    closed: bool,
}

impl<W: std::io::Write> IoSink<W> {
    /// Create a sink that writes into `inner`.
    pub fn new(inner: W) -> Self {
        Self { inner, closed: false }
    }

    /// The wrapped writer.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// The wrapped writer, mutably.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Whether [`Sink::close`] was called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Take the writer of the sink.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: std::io::Write> Sink for IoSink<W> {
    fn write(&mut self, bytes: &[u8]) -> Result<(), Error> {
        if self.closed {
            return Err(ErrorKind::Closed.into());
        }
        Ok(self.inner.write_all(bytes)?)
    }

    fn close(&mut self) -> Result<(), Error> {
        self.inner.flush()?;
        self.closed = true;
        Ok(())
    }
}
