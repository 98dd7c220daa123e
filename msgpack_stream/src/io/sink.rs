use crate::error::Error;

macro_rules! write_tagged {
    ($sink:expr, $tag:expr, $value:expr, $len:literal) => {{
        let mut bytes = [$tag; 1 + $len];
        bytes[1..].copy_from_slice(&$value.to_be_bytes());
        $sink.write(&bytes)
    }};
}

/// This trait allows for writing bytes into a sink.
///
/// The [`crate::encoder::Encoder`] writes every value as a tag byte followed
/// by a big-endian payload of 1, 2, 4, or 8 bytes, or followed by raw bytes.
/// Only [`Sink::write`] is required; the tagged writes are built on it, but
/// sinks may override them, for example to avoid a bounds check per call.
///
/// Failures are fatal to the stream: the encoder passes them to its caller
/// unchanged and does not retry.
pub trait Sink {
    /// Write exactly as many bytes as there are in `bytes`.
    fn write(&mut self, bytes: &[u8]) -> Result<(), Error>;

    /// Write a single byte.
    fn write_u8(&mut self, value: u8) -> Result<(), Error> {
        self.write(&[value])
    }

    /// Write `tag` followed by a 1-byte payload.
    fn write_tagged_u8(&mut self, tag: u8, value: u8) -> Result<(), Error> {
        self.write(&[tag, value])
    }

    /// Write `tag` followed by a 2-byte big-endian payload.
    fn write_tagged_u16(&mut self, tag: u8, value: u16) -> Result<(), Error> {
        write_tagged!(self, tag, value, 2)
    }

    /// Write `tag` followed by a 4-byte big-endian payload.
    fn write_tagged_u32(&mut self, tag: u8, value: u32) -> Result<(), Error> {
        write_tagged!(self, tag, value, 4)
    }

    /// Write `tag` followed by an 8-byte big-endian payload.
    fn write_tagged_u64(&mut self, tag: u8, value: u64) -> Result<(), Error> {
        write_tagged!(self, tag, value, 8)
    }

    /// Write `tag` followed by a big-endian IEEE 754 single.
    fn write_tagged_f32(&mut self, tag: u8, value: f32) -> Result<(), Error> {
        write_tagged!(self, tag, value, 4)
    }

    /// Write `tag` followed by a big-endian IEEE 754 double.
    fn write_tagged_f64(&mut self, tag: u8, value: f64) -> Result<(), Error> {
        write_tagged!(self, tag, value, 8)
    }

    /// Release the resources of the sink.
    ///
    /// The default does nothing.
    fn close(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

impl<T: Sink + ?Sized> Sink for &mut T {
    fn write(&mut self, bytes: &[u8]) -> Result<(), Error> {
        (**self).write(bytes)
    }

    fn write_u8(&mut self, value: u8) -> Result<(), Error> {
        (**self).write_u8(value)
    }

    fn write_tagged_u8(&mut self, tag: u8, value: u8) -> Result<(), Error> {
        (**self).write_tagged_u8(tag, value)
    }

    fn write_tagged_u16(&mut self, tag: u8, value: u16) -> Result<(), Error> {
        (**self).write_tagged_u16(tag, value)
    }

    fn write_tagged_u32(&mut self, tag: u8, value: u32) -> Result<(), Error> {
        (**self).write_tagged_u32(tag, value)
    }

    fn write_tagged_u64(&mut self, tag: u8, value: u64) -> Result<(), Error> {
        (**self).write_tagged_u64(tag, value)
    }

    fn write_tagged_f32(&mut self, tag: u8, value: f32) -> Result<(), Error> {
        (**self).write_tagged_f32(tag, value)
    }

    fn write_tagged_f64(&mut self, tag: u8, value: f64) -> Result<(), Error> {
        (**self).write_tagged_f64(tag, value)
    }

    fn close(&mut self) -> Result<(), Error> {
        (**self).close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn tagged_payloads_are_big_endian() -> Result<(), Error> {
        let mut sink: Vec<u8> = Vec::new();
        sink.write_tagged_u8(0xcc, 0x12)?;
        sink.write_tagged_u16(0xcd, 0x1234)?;
        sink.write_tagged_u32(0xce, 0x12345678)?;
        sink.write_tagged_u64(0xcf, 0x0102030405060708)?;
        assert_eq!(
            sink,
            [
                0xcc, 0x12, //
                0xcd, 0x12, 0x34, //
                0xce, 0x12, 0x34, 0x56, 0x78, //
                0xcf, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08,
            ]
        );
        Ok(())
    }

    #[test]
    fn tagged_floats() -> Result<(), Error> {
        let mut sink: Vec<u8> = Vec::new();
        sink.write_tagged_f32(0xca, 1.0)?;
        sink.write_tagged_f64(0xcb, -2.0)?;
        assert_eq!(sink, [0xca, 0x3f, 0x80, 0, 0, 0xcb, 0xc0, 0, 0, 0, 0, 0, 0, 0]);
        Ok(())
    }

    #[test]
    fn through_mutable_reference() -> Result<(), Error> {
        fn write_nil<S: Sink>(mut sink: S) -> Result<(), Error> {
            sink.write_u8(0xc0)?;
            sink.close()
        }

        let mut sink: Vec<u8> = Vec::new();
        write_nil(&mut sink)?;
        write_nil(&mut sink)?;
        assert_eq!(sink, [0xc0, 0xc0]);
        Ok(())
    }
}
