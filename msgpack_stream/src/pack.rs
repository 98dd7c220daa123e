//! The trait of types that know how to write themselves.

use crate::encoder::Encoder;
use crate::error::Error;
use crate::io::Sink;

/// The type can be written by an [`Encoder`].
///
/// `Pack` is implemented by this crate for the primitive types, text, byte
/// strings, and arbitrary-precision integers. It picks the matching `write_*`
/// method of the encoder, so that generic code can write any of them through
/// [`Encoder::write`].
///
/// A type implementing `Pack` should write exactly one value, which may be a
/// container. Writing several values breaks the element counts of the
/// enclosing container.
pub trait Pack {
    /// Write this object into the `encoder`.
    ///
    /// In case of a failure, bytes written so far stay in the encoder's sink.
    fn pack<S: Sink>(&self, encoder: &mut Encoder<S>) -> Result<(), Error>;
}
