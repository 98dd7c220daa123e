//! The streaming MessagePack encoder.

use alloc::string::String;
use num::{BigInt, BigUint, ToPrimitive};
use tracing::{debug, trace};

use crate::error::{Error, ErrorKind};
use crate::format::{Head, array_head, map_head, raw_head, signed_head, tag, unsigned_head};
use crate::io::Sink;
use crate::pack::Pack;
use crate::tracker::{ContainerKind, NestingTracker};

/// Settings of an [`Encoder`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EncoderOptions {
    /// Reject values written into a container that is already full.
    ///
    /// By default, surplus values are written as they come, which leaves
    /// them outside the container in the decoded stream.
    pub strict_sizes: bool,
}

/// Writes values into a [`Sink`] as MessagePack, one call per value.
///
/// Every value goes into the sink right away, using the shortest
/// representation the format allows. Arrays and maps are written as a head
/// that declares the number of elements, followed by the elements themselves.
/// The encoder keeps track of the open containers so that the end calls can
/// check the declared sizes and pad containers that were ended early.
///
/// ```
/// # use msgpack_stream::encoder::Encoder;
/// # use msgpack_stream::error::Error;
/// # use msgpack_stream::io::GrowingMemorySink;
/// # fn main() -> Result<(), Error> {
/// let mut encoder = Encoder::new(GrowingMemorySink::new());
/// encoder.write_array_begin(3)?;
/// encoder.write_i32(-1)?;
/// encoder.write_array_end(false)?;
/// assert_eq!(encoder.into_sink().take(), [0x93, 0xff, 0xc0, 0xc0]);
/// # Ok(())
/// # }
/// ```
///
/// An encoder is meant for a single writer. After any error, the position
/// in the stream is unreliable; discard the encoder or [`Encoder::reset`] it
/// and reframe the output yourself.
#[derive(Debug)]
pub struct Encoder<S: Sink> {
    sink: S,
    tracker: NestingTracker,
    options: EncoderOptions,
}

impl<S: Sink> Encoder<S> {
    /// Create an encoder that writes into `sink`.
    ///
    /// The encoder is permissive by default. Use [`Self::strict`] to reject
    /// surplus elements:
    /// ```
    /// # use msgpack_stream::encoder::Encoder;
    /// # use msgpack_stream::io::GrowingMemorySink;
    /// let encoder = Encoder::new(GrowingMemorySink::new()).strict();
    /// ```
    pub fn new(sink: S) -> Self {
        Self { sink, tracker: NestingTracker::new(), options: EncoderOptions::default() }
    }

    /// Create an encoder that rejects values written into full containers.
    pub fn strict(self) -> Self {
        Self { options: EncoderOptions { strict_sizes: true, ..self.options }, ..self }
    }

    /// Create an encoder that writes surplus values without complaint.
    pub fn permissive(self) -> Self {
        Self { options: EncoderOptions { strict_sizes: false, ..self.options }, ..self }
    }

    /// Create an encoder with the specified settings.
    pub fn with_options(self, options: EncoderOptions) -> Self {
        Self { options, ..self }
    }

    /// The options the encoder was configured with.
    pub fn options(&self) -> EncoderOptions {
        self.options
    }

    /// The containers that are currently open.
    pub fn tracker(&self) -> &NestingTracker {
        &self.tracker
    }

    /// The underlying sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The underlying sink, mutably.
    ///
    /// Bytes written directly into the sink are not accounted for in the
    /// container counts.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Take the sink from the encoder.
    ///
    /// Open containers are left as they are.
    pub fn into_sink(self) -> S {
        self.sink
    }

    //--------------------------------------------------------------------------
    // Scalars
    //--------------------------------------------------------------------------

    /// Write a nil.
    pub fn write_nil(&mut self) -> Result<(), Error> {
        self.write_head(Head::Fix(tag::NIL))
    }

    /// Write a boolean.
    pub fn write_bool(&mut self, value: bool) -> Result<(), Error> {
        self.write_head(Head::Fix(if value { tag::TRUE } else { tag::FALSE }))
    }

    /// Write a signed integer, see [`Self::write_i64`].
    pub fn write_i8(&mut self, value: i8) -> Result<(), Error> {
        self.write_head(signed_head(value as i64))
    }

    /// Write a signed integer, see [`Self::write_i64`].
    pub fn write_i16(&mut self, value: i16) -> Result<(), Error> {
        self.write_head(signed_head(value as i64))
    }

    /// Write a signed integer, see [`Self::write_i64`].
    pub fn write_i32(&mut self, value: i32) -> Result<(), Error> {
        self.write_head(signed_head(value as i64))
    }

    /// Write a signed integer in the shortest form that holds it.
    ///
    /// Values in `[-32, 127]` take a single byte. Other negative values use
    /// the narrowest of the 8, 16, 32, and 64-bit signed forms, other positive
    /// values the narrowest of the unsigned forms.
    pub fn write_i64(&mut self, value: i64) -> Result<(), Error> {
        self.write_head(signed_head(value))
    }

    /// Write an unsigned integer, see [`Self::write_u64`].
    pub fn write_u8(&mut self, value: u8) -> Result<(), Error> {
        self.write_head(unsigned_head(value as u64))
    }

    /// Write an unsigned integer, see [`Self::write_u64`].
    pub fn write_u16(&mut self, value: u16) -> Result<(), Error> {
        self.write_head(unsigned_head(value as u64))
    }

    /// Write an unsigned integer, see [`Self::write_u64`].
    pub fn write_u32(&mut self, value: u32) -> Result<(), Error> {
        self.write_head(unsigned_head(value as u64))
    }

    /// Write an unsigned integer in the shortest form that holds it.
    ///
    /// Values up to 127 take a single byte, larger ones the narrowest of the
    /// 8, 16, 32, and 64-bit unsigned forms.
    pub fn write_u64(&mut self, value: u64) -> Result<(), Error> {
        self.write_head(unsigned_head(value))
    }

    /// Write a 128-bit integer.
    ///
    /// ## Errors
    ///
    /// Fails with [`ErrorKind::OutOfRange`] outside `[-2^63, 2^64)`. Nothing
    /// is written in that case.
    pub fn write_i128(&mut self, value: i128) -> Result<(), Error> {
        if let Ok(value) = i64::try_from(value) {
            self.write_i64(value)
        } else if let Ok(value) = u64::try_from(value) {
            self.write_u64(value)
        } else {
            Err(self.error(ErrorKind::OutOfRange))
        }
    }

    /// Write a 128-bit unsigned integer.
    ///
    /// ## Errors
    ///
    /// Fails with [`ErrorKind::OutOfRange`] from `2^64` on.
    pub fn write_u128(&mut self, value: u128) -> Result<(), Error> {
        match u64::try_from(value) {
            Ok(value) => self.write_u64(value),
            Err(_) => Err(self.error(ErrorKind::OutOfRange)),
        }
    }

    /// Write an arbitrary-precision integer.
    ///
    /// Integers that fit an [`i64`] are written like [`Self::write_i64`] does.
    /// Beyond that, only the positive integers below `2^64` are representable;
    /// they take the unsigned 64-bit form.
    ///
    /// ## Errors
    ///
    /// Fails with [`ErrorKind::OutOfRange`] for any other value. The value is
    /// never truncated, and nothing is written.
    pub fn write_big_int(&mut self, value: &BigInt) -> Result<(), Error> {
        if let Some(value) = value.to_i64() {
            self.write_i64(value)
        } else if let Some(value) = value.to_u64() {
            self.write_head(Head::U64(tag::UINT64, value))
        } else {
            Err(self.error(ErrorKind::OutOfRange))
        }
    }

    /// Write an arbitrary-precision unsigned integer.
    ///
    /// ## Errors
    ///
    /// Fails with [`ErrorKind::OutOfRange`] from `2^64` on.
    pub fn write_big_uint(&mut self, value: &BigUint) -> Result<(), Error> {
        match value.to_u64() {
            Some(value) => self.write_u64(value),
            None => Err(self.error(ErrorKind::OutOfRange)),
        }
    }

    /// Write a single precision float. Floats are never narrowed or widened.
    pub fn write_f32(&mut self, value: f32) -> Result<(), Error> {
        self.claim_slot()?;
        self.sink.write_tagged_f32(tag::FLOAT32, value)?;
        self.tracker.reduce_count();
        Ok(())
    }

    /// Write a double precision float.
    pub fn write_f64(&mut self, value: f64) -> Result<(), Error> {
        self.claim_slot()?;
        self.sink.write_tagged_f64(tag::FLOAT64, value)?;
        self.tracker.reduce_count();
        Ok(())
    }

    //--------------------------------------------------------------------------
    // Byte strings
    //--------------------------------------------------------------------------

    /// Write a byte string: its length, then the bytes verbatim.
    ///
    /// ## Errors
    ///
    /// Fails with [`ErrorKind::OutOfRange`] for byte strings longer than
    /// [`u32::MAX`], without writing anything.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Error> {
        let head = raw_head(bytes.len()).map_err(|err| err.at_depth(self.tracker.depth()))?;
        self.claim_slot()?;
        head.write_to(&mut self.sink)?;
        self.sink.write(bytes)?;
        self.tracker.reduce_count();
        Ok(())
    }

    /// Write text as a byte string of its UTF-8 encoding.
    pub fn write_str(&mut self, text: &str) -> Result<(), Error> {
        self.write_bytes(text.as_bytes())
    }

    /// Write text that is supposed to be UTF-8 already.
    ///
    /// ## Errors
    ///
    /// Fails with [`ErrorKind::InvalidUtf8`] if `bytes` are not valid UTF-8.
    /// Malformed sequences are not replaced, and nothing is written.
    pub fn write_utf8(&mut self, bytes: &[u8]) -> Result<(), Error> {
        match core::str::from_utf8(bytes) {
            Ok(text) => self.write_str(text),
            Err(_) => Err(self.error(ErrorKind::InvalidUtf8)),
        }
    }

    /// Write UTF-16 text as a byte string of its UTF-8 encoding.
    ///
    /// ## Errors
    ///
    /// Fails with [`ErrorKind::UnpairedSurrogate`] if the text is malformed,
    /// without writing anything.
    pub fn write_utf16(&mut self, units: &[u16]) -> Result<(), Error> {
        let text = char::decode_utf16(units.iter().copied()).collect::<Result<String, _>>();
        match text {
            Ok(text) => self.write_str(&text),
            Err(_) => Err(self.error(ErrorKind::UnpairedSurrogate)),
        }
    }

    //--------------------------------------------------------------------------
    // Containers
    //--------------------------------------------------------------------------

    /// Begin an array of `len` elements.
    ///
    /// The array itself counts as one element of the enclosing container.
    pub fn write_array_begin(&mut self, len: u32) -> Result<(), Error> {
        self.write_head(array_head(len))?;
        self.tracker.push_array(len);
        Ok(())
    }

    /// End the innermost container, which must be an array.
    ///
    /// If fewer elements were written than declared, either an error is
    /// returned (`verify_complete`), or the array is padded with nils.
    ///
    /// ## Errors
    ///
    /// - [`ErrorKind::EndWithoutBegin`] if the innermost container is not an
    ///   array or there is no open container, regardless of `verify_complete`.
    /// - [`ErrorKind::Incomplete`] if `verify_complete` is set and elements
    ///   are missing.
    pub fn write_array_end(&mut self, verify_complete: bool) -> Result<(), Error> {
        self.write_end(ContainerKind::Array, verify_complete)
    }

    /// End the innermost array, padding it with nils if necessary.
    pub fn end_array(&mut self) -> Result<(), Error> {
        self.write_array_end(false)
    }

    /// Begin a map of `entries` key-value pairs.
    ///
    /// Write each entry as the key followed by the value. The map itself counts
    /// as one element of the enclosing container.
    pub fn write_map_begin(&mut self, entries: u32) -> Result<(), Error> {
        self.write_head(map_head(entries))?;
        self.tracker.push_map(entries);
        Ok(())
    }

    /// End the innermost container, which must be a map.
    ///
    /// Behaves like [`Self::write_array_end`]. Missing keys and values are
    /// counted separately, so a map with a dangling key reports one remaining
    /// slot and gets a single nil as the value.
    pub fn write_map_end(&mut self, verify_complete: bool) -> Result<(), Error> {
        self.write_end(ContainerKind::Map, verify_complete)
    }

    /// End the innermost map, padding it with nils if necessary.
    pub fn end_map(&mut self) -> Result<(), Error> {
        self.write_map_end(false)
    }

    //--------------------------------------------------------------------------
    // Generic values
    //--------------------------------------------------------------------------

    /// Write any value that knows how to [`Pack`] itself.
    pub fn write<T: Pack + ?Sized>(&mut self, value: &T) -> Result<(), Error> {
        value.pack(self)
    }

    //--------------------------------------------------------------------------
    // Lifecycle
    //--------------------------------------------------------------------------

    /// Forget all open containers.
    ///
    /// The bytes already written stay in the sink; the sink is not touched.
    pub fn reset(&mut self) {
        if !self.tracker.is_empty() {
            trace!(depth = self.tracker.depth(), "abandoning open containers");
        }
        self.tracker.clear();
    }

    /// Close the sink.
    ///
    /// Unlike the end calls, closing does **not** pad the containers that are
    /// still open: their declared elements stay missing from the output.
    /// End all containers before closing to get a well-formed stream.
    pub fn close(&mut self) -> Result<(), Error> {
        if !self.tracker.is_empty() {
            debug!(depth = self.tracker.depth(), "closing with open containers");
        }
        self.sink.close()
    }

    //--------------------------------------------------------------------------
    // Internals
    //--------------------------------------------------------------------------

    fn write_head(&mut self, head: Head) -> Result<(), Error> {
        self.claim_slot()?;
        head.write_to(&mut self.sink)?;
        self.tracker.reduce_count();
        Ok(())
    }

    fn write_end(&mut self, kind: ContainerKind, verify_complete: bool) -> Result<(), Error> {
        let remaining = match self.tracker.top() {
            Some(top) if top.kind() == kind => top.remaining(),
            _ => {
                debug!(%kind, depth = self.tracker.depth(), "end without matching begin");
                return Err(self.error(ErrorKind::EndWithoutBegin(kind)));
            }
        };
        if remaining > 0 {
            if verify_complete {
                debug!(%kind, remaining, "verified end of incomplete container");
                return Err(self.error(ErrorKind::Incomplete { kind, remaining }));
            }
            trace!(%kind, remaining, "padding container with nil");
            for _ in 0..remaining {
                self.write_nil()?;
            }
        }
        self.tracker.pop();
        Ok(())
    }

    // Only strict encoders check for room in the innermost container.
    fn claim_slot(&self) -> Result<(), Error> {
        match self.tracker.top() {
            Some(top) if self.options.strict_sizes && top.remaining() <= 0 => {
                Err(self.error(ErrorKind::TooManyElements(top.kind())))
            }
            _ => Ok(()),
        }
    }

    fn error(&self, kind: ErrorKind) -> Error {
        Error::from(kind).at_depth(self.tracker.depth())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::GrowingMemorySink;
    use alloc::vec::Vec;
    use rstest::rstest;

    fn encode(write: impl FnOnce(&mut Encoder<GrowingMemorySink>) -> Result<(), Error>) -> Result<Vec<u8>, Error> {
        let mut encoder = Encoder::new(GrowingMemorySink::new());
        write(&mut encoder)?;
        Ok(encoder.into_sink().take())
    }

    #[test]
    fn scalars() -> Result<(), Error> {
        let bytes = encode(|e| {
            e.write_nil()?;
            e.write_bool(true)?;
            e.write_bool(false)?;
            e.write_i8(-33)?;
            e.write_u8(200)
        })?;
        assert_eq!(bytes, [0xc0, 0xc3, 0xc2, 0xd0, 0xdf, 0xcc, 0xc8]);
        Ok(())
    }

    #[test]
    fn floats_keep_their_width() -> Result<(), Error> {
        let bytes = encode(|e| {
            e.write_f32(0.5)?;
            e.write_f64(0.5)
        })?;
        assert_eq!(bytes, [0xca, 0x3f, 0x00, 0x00, 0x00, 0xcb, 0x3f, 0xe0, 0, 0, 0, 0, 0, 0]);
        Ok(())
    }

    #[test]
    fn values_reduce_the_innermost_count() -> Result<(), Error> {
        let mut encoder = Encoder::new(GrowingMemorySink::new());
        encoder.write_array_begin(3)?;
        encoder.write_f32(1.0)?;
        encoder.write_bytes(b"a")?;
        assert_eq!(encoder.tracker().top_remaining(), Some(1));
        encoder.write_map_begin(1)?;
        assert_eq!(encoder.tracker().top_remaining(), Some(2));
        encoder.end_map()?;
        assert_eq!(encoder.tracker().top_remaining(), Some(0));
        encoder.end_array()?;
        assert!(encoder.tracker().is_empty());
        Ok(())
    }

    #[test]
    fn strict_rejects_surplus_elements() -> Result<(), Error> {
        let mut encoder = Encoder::new(GrowingMemorySink::new()).strict();
        encoder.write_array_begin(1)?;
        encoder.write_nil()?;
        let error = encoder.write_nil().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::TooManyElements(ContainerKind::Array));
        assert_eq!(error.depth(), 1);
        encoder.end_array()?;
        assert_eq!(encoder.into_sink().take(), [0x91, 0xc0]);
        Ok(())
    }

    type Write = fn(&mut Encoder<GrowingMemorySink>) -> Result<(), Error>;

    #[rstest]
    #[case::array_begin(|e: &mut Encoder<GrowingMemorySink>| e.write_array_begin(0))]
    #[case::map_begin(|e: &mut Encoder<GrowingMemorySink>| e.write_map_begin(1))]
    #[case::bytes(|e: &mut Encoder<GrowingMemorySink>| e.write_bytes(b"ab"))]
    #[case::str(|e: &mut Encoder<GrowingMemorySink>| e.write_str("ab"))]
    #[case::f32(|e: &mut Encoder<GrowingMemorySink>| e.write_f32(1.0))]
    #[case::f64(|e: &mut Encoder<GrowingMemorySink>| e.write_f64(1.0))]
    #[case::integer(|e: &mut Encoder<GrowingMemorySink>| e.write_i64(1000))]
    fn strict_rejects_surplus_of_every_kind(#[case] write: Write) -> Result<(), Error> {
        let mut encoder = Encoder::new(GrowingMemorySink::new()).strict();
        encoder.write_map_begin(1)?;
        encoder.write_nil()?;
        encoder.write_nil()?;
        let error = write(&mut encoder).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::TooManyElements(ContainerKind::Map));
        assert_eq!(encoder.tracker().depth(), 1);
        assert_eq!(encoder.tracker().top_remaining(), Some(0));
        assert_eq!(encoder.sink().as_slice(), [0x81, 0xc0, 0xc0]);
        Ok(())
    }

    #[test]
    fn permissive_writes_surplus_elements() -> Result<(), Error> {
        let mut encoder = Encoder::new(GrowingMemorySink::new()).strict().permissive();
        encoder.write_array_begin(1)?;
        encoder.write_nil()?;
        encoder.write_nil()?;
        assert_eq!(encoder.tracker().top_remaining(), Some(-1));
        encoder.end_array()?;
        assert_eq!(encoder.into_sink().take(), [0x91, 0xc0, 0xc0]);
        Ok(())
    }

    #[test]
    fn strict_allows_top_level_values() -> Result<(), Error> {
        let mut encoder = Encoder::new(GrowingMemorySink::new()).with_options(EncoderOptions { strict_sizes: true });
        encoder.write_nil()?;
        encoder.write_nil()?;
        assert!(encoder.options().strict_sizes);
        Ok(())
    }

    #[test]
    fn range_errors_leave_tracker_untouched() -> Result<(), Error> {
        let mut encoder = Encoder::new(GrowingMemorySink::new());
        encoder.write_array_begin(1)?;
        assert_eq!(encoder.write_u128(u128::MAX).map_err(|err| err.kind()), Err(ErrorKind::OutOfRange));
        assert_eq!(encoder.write_i128(i128::MIN).map_err(|err| err.kind()), Err(ErrorKind::OutOfRange));
        assert_eq!(encoder.tracker().top_remaining(), Some(1));
        assert_eq!(encoder.into_sink().take(), [0x91]);
        Ok(())
    }

    #[test]
    fn close_does_not_pad() -> Result<(), Error> {
        let mut encoder = Encoder::new(GrowingMemorySink::new());
        encoder.write_array_begin(2)?;
        encoder.close()?;
        assert_eq!(encoder.tracker().depth(), 1);
        assert_eq!(encoder.write_nil().map_err(|err| err.kind()), Err(ErrorKind::Closed));
        let sink = encoder.into_sink();
        assert!(sink.is_closed());
        assert_eq!(sink.take(), [0x92]);
        Ok(())
    }
}
