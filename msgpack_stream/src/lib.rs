#![warn(missing_docs)]

//! # msgpack_stream
//!
//! A streaming encoder for [MessagePack](https://msgpack.org), a compact,
//! self-describing binary serialization format.
//!
//! ## Writing values
//!
//! The [`encoder::Encoder`] has a `write_*` method for every kind of value:
//! integers of any width, floats, booleans, nil, and byte strings. Each value
//! is written to the underlying [`io::Sink`] immediately, in the most compact
//! form the format allows: small integers fit in the tag byte itself, larger
//! ones take the narrowest of the 8, 16, 32, and 64-bit forms.
//!
//! Example:
//! ```
//! use msgpack_stream::encoder::Encoder;
//! use msgpack_stream::io::GrowingMemorySink;
//! # use msgpack_stream::error::Error;
//! # fn main() -> Result<(), Error> {
//!
//! let mut encoder = Encoder::new(GrowingMemorySink::new());
//! encoder.write_i64(127)?;
//! encoder.write_i64(128)?;
//! encoder.write_i64(-33)?;
//! encoder.write_str("hi")?;
//! assert_eq!(encoder.into_sink().take(), [0x7f, 0xcc, 0x80, 0xd0, 0xdf, 0xa2, b'h', b'i']);
//! # Ok(())
//! # }
//! ```
//!
//! Anything that implements [`pack::Pack`] can also be written through the
//! generic [`encoder::Encoder::write`], which is handy in generic code.
//!
//! ## Arrays and maps
//!
//! Containers declare their number of elements up front, in the tag that
//! begins them. Begin a container with its size, write its elements, and
//! end it:
//!
//! ```
//! # use msgpack_stream::encoder::Encoder;
//! # use msgpack_stream::io::GrowingMemorySink;
//! # use msgpack_stream::error::Error;
//! # fn main() -> Result<(), Error> {
//! let mut encoder = Encoder::new(GrowingMemorySink::new());
//! encoder.write_map_begin(1)?;
//! encoder.write_str("id")?;
//! encoder.write_array_begin(2)?;
//! encoder.write_u8(1)?;
//! encoder.write_u8(2)?;
//! encoder.write_array_end(true)?;
//! encoder.write_map_end(true)?;
//! assert_eq!(encoder.into_sink().take(), [0x81, 0xa2, b'i', b'd', 0x92, 0x01, 0x02]);
//! # Ok(())
//! # }
//! ```
//!
//! A map of `n` entries expects `2n` values: each key followed by its value.
//!
//! The encoder keeps a stack of the open containers, so an end call that
//! doesn't match the innermost container is reported as an error. When a
//! container is ended before all of its declared elements were written, the
//! encoder either reports an error (`verify_complete = true`), or pads the
//! container with nils so that the output remains well-formed.
//!
//! Writing *more* elements than declared is not checked by default; the
//! surplus values end up after the container in the decoded stream. A
//! [strict](encoder::Encoder::strict) encoder rejects them instead.
//!
//! ## Sinks
//!
//! The encoder writes into any [`io::Sink`]. The crate provides the
//! [`io::GrowingMemorySink`], the allocation-free [`io::FixedMemorySink`], and,
//! with the `std` feature, the [`io::IoSink`] that adapts any
//! [`std::io::Write`]. A `&mut` to a sink is also a sink, so you can keep
//! ownership of yours.
//!
//! ## `no_std`
//!
//! Without the `std` feature the crate is `no_std`, but it still needs
//! [`alloc`] for the container stack and arbitrary-precision integers.

// Disable the [`std`] standard crate when the "std" feature is not enabled.
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod encoder;
pub mod error;
pub mod format;
pub mod io;
pub mod pack;
pub mod tracker;

mod types;

pub use encoder::{Encoder, EncoderOptions};
pub use error::{Error, ErrorCategory, ErrorKind};
pub use pack::Pack;
