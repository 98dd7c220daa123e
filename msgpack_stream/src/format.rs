//! Tag bytes and the rules for choosing between them.
//!
//! Every encoded value starts with a [`Head`]: a tag byte, optionally followed
//! by a big-endian payload of 1, 2, 4, or 8 bytes. The functions of this module
//! pick the shortest head that can represent a value, length, or size. They
//! are pure and don't touch any sink, so they can also be used to predict the
//! size of the output.

use crate::error::{Error, ErrorKind};
use crate::io::Sink;

/// The tag bytes of the format.
pub mod tag {
    /// Positive fixint: `0x00..=0x7f`, the value is the byte itself.
    pub const POSITIVE_FIXINT_MAX: u8 = 0x7f;
    /// Fixmap: `0x80..=0x8f`, the low 4 bits hold the entry count.
    pub const FIXMAP: u8 = 0x80;
    /// Fixarray: `0x90..=0x9f`, the low 4 bits hold the element count.
    pub const FIXARRAY: u8 = 0x90;
    /// Fixraw: `0xa0..=0xbf`, the low 5 bits hold the length in bytes.
    pub const FIXRAW: u8 = 0xa0;
    /// Nil.
    pub const NIL: u8 = 0xc0;
    /// Boolean false.
    pub const FALSE: u8 = 0xc2;
    /// Boolean true.
    pub const TRUE: u8 = 0xc3;
    /// IEEE-754 single precision float.
    pub const FLOAT32: u8 = 0xca;
    /// IEEE-754 double precision float.
    pub const FLOAT64: u8 = 0xcb;
    /// 8-bit unsigned integer.
    pub const UINT8: u8 = 0xcc;
    /// 16-bit unsigned integer.
    pub const UINT16: u8 = 0xcd;
    /// 32-bit unsigned integer.
    pub const UINT32: u8 = 0xce;
    /// 64-bit unsigned integer.
    pub const UINT64: u8 = 0xcf;
    /// 8-bit signed integer.
    pub const INT8: u8 = 0xd0;
    /// 16-bit signed integer.
    pub const INT16: u8 = 0xd1;
    /// 32-bit signed integer.
    pub const INT32: u8 = 0xd2;
    /// 64-bit signed integer.
    pub const INT64: u8 = 0xd3;
    /// Byte string with a 16-bit length.
    pub const RAW16: u8 = 0xda;
    /// Byte string with a 32-bit length.
    pub const RAW32: u8 = 0xdb;
    /// Array with a 16-bit element count.
    pub const ARRAY16: u8 = 0xdc;
    /// Array with a 32-bit element count.
    pub const ARRAY32: u8 = 0xdd;
    /// Map with a 16-bit entry count.
    pub const MAP16: u8 = 0xde;
    /// Map with a 32-bit entry count.
    pub const MAP32: u8 = 0xdf;
    /// Negative fixint: `0xe0..=0xff`, the value is the byte as `i8`.
    pub const NEGATIVE_FIXINT_MIN: u8 = 0xe0;
}

/// A tag byte and its fixed-width payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Head {
    /// The tag alone, possibly with the value embedded in it.
    Fix(u8),
    /// The tag followed by a 1-byte payload.
    U8(u8, u8),
    /// The tag followed by a 2-byte payload.
    U16(u8, u16),
    /// The tag followed by a 4-byte payload.
    U32(u8, u32),
    /// The tag followed by a 8-byte payload.
    U64(u8, u64),
}

impl Head {
    /// The tag byte.
    pub fn tag(&self) -> u8 {
        match *self {
            Head::Fix(tag) | Head::U8(tag, _) | Head::U16(tag, _) | Head::U32(tag, _) | Head::U64(tag, _) => tag,
        }
    }

    /// The number of bytes the head takes in the stream, tag included.
    pub fn len(&self) -> usize {
        match self {
            Head::Fix(_) => 1,
            Head::U8(..) => 2,
            Head::U16(..) => 3,
            Head::U32(..) => 5,
            Head::U64(..) => 9,
        }
    }

    /// Write the tag and the big-endian payload.
    pub fn write_to<S: Sink + ?Sized>(self, sink: &mut S) -> Result<(), Error> {
        match self {
            Head::Fix(tag) => sink.write_u8(tag),
            Head::U8(tag, payload) => sink.write_tagged_u8(tag, payload),
            Head::U16(tag, payload) => sink.write_tagged_u16(tag, payload),
            Head::U32(tag, payload) => sink.write_tagged_u32(tag, payload),
            Head::U64(tag, payload) => sink.write_tagged_u64(tag, payload),
        }
    }
}

/// The head of a signed integer.
///
/// Values in `[-32, 127]` are embedded in the tag. Other negative values take
/// the narrowest signed form, other positive values the narrowest unsigned form.
pub fn signed_head(value: i64) -> Head {
    if value < -(1 << 5) {
        if value < -(1 << 15) {
            if value < -(1 << 31) {
                Head::U64(tag::INT64, value as u64)
            } else {
                Head::U32(tag::INT32, value as i32 as u32)
            }
        } else if value < -(1 << 7) {
            Head::U16(tag::INT16, value as i16 as u16)
        } else {
            Head::U8(tag::INT8, value as i8 as u8)
        }
    } else if value < (1 << 7) {
        Head::Fix(value as i8 as u8)
    } else {
        unsigned_head(value as u64)
    }
}

/// The head of an unsigned integer.
pub fn unsigned_head(value: u64) -> Head {
    if value < (1 << 7) {
        Head::Fix(value as u8)
    } else if value < (1 << 16) {
        if value < (1 << 8) {
            Head::U8(tag::UINT8, value as u8)
        } else {
            Head::U16(tag::UINT16, value as u16)
        }
    } else if value < (1 << 32) {
        Head::U32(tag::UINT32, value as u32)
    } else {
        Head::U64(tag::UINT64, value)
    }
}

/// The head of a byte string of `len` bytes.
///
/// ## Errors
///
/// Byte strings longer than [`u32::MAX`] cannot be represented.
pub fn raw_head(len: usize) -> Result<Head, Error> {
    if len < 32 {
        Ok(Head::Fix(tag::FIXRAW | len as u8))
    } else if len < 65536 {
        Ok(Head::U16(tag::RAW16, len as u16))
    } else {
        u32::try_from(len).map(|len| Head::U32(tag::RAW32, len)).map_err(|_| ErrorKind::OutOfRange.into())
    }
}

/// The head of an array of `len` elements.
pub fn array_head(len: u32) -> Head {
    container_head(len, tag::FIXARRAY, tag::ARRAY16, tag::ARRAY32)
}

/// The head of a map of `entries` key-value pairs.
pub fn map_head(entries: u32) -> Head {
    container_head(entries, tag::FIXMAP, tag::MAP16, tag::MAP32)
}

fn container_head(size: u32, fix: u8, tag16: u8, tag32: u8) -> Head {
    if size < 16 {
        Head::Fix(fix | size as u8)
    } else if size < 65536 {
        Head::U16(tag16, size as u16)
    } else {
        Head::U32(tag32, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, Head::Fix(0x00))]
    #[case(127, Head::Fix(0x7f))]
    #[case(-1, Head::Fix(0xff))]
    #[case(-32, Head::Fix(0xe0))]
    #[case(-33, Head::U8(tag::INT8, 0xdf))]
    #[case(-128, Head::U8(tag::INT8, 0x80))]
    #[case(-129, Head::U16(tag::INT16, 0xff7f))]
    #[case(-32768, Head::U16(tag::INT16, 0x8000))]
    #[case(-32769, Head::U32(tag::INT32, 0xffff7fff))]
    #[case(i32::MIN as i64, Head::U32(tag::INT32, 0x80000000))]
    #[case(i32::MIN as i64 - 1, Head::U64(tag::INT64, 0xffffffff7fffffff))]
    #[case(i64::MIN, Head::U64(tag::INT64, 0x8000000000000000))]
    #[case(128, Head::U8(tag::UINT8, 0x80))]
    #[case(255, Head::U8(tag::UINT8, 0xff))]
    #[case(256, Head::U16(tag::UINT16, 0x0100))]
    #[case(65535, Head::U16(tag::UINT16, 0xffff))]
    #[case(65536, Head::U32(tag::UINT32, 0x00010000))]
    #[case(1 << 31, Head::U32(tag::UINT32, 0x80000000))]
    #[case(u32::MAX as i64, Head::U32(tag::UINT32, 0xffffffff))]
    #[case(1 << 32, Head::U64(tag::UINT64, 1 << 32))]
    #[case(i64::MAX, Head::U64(tag::UINT64, i64::MAX as u64))]
    fn signed_ladder(#[case] value: i64, #[case] expected: Head) {
        assert_eq!(signed_head(value), expected);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(127, 1)]
    #[case(128, 2)]
    #[case(256, 3)]
    #[case(1 << 16, 5)]
    #[case(u64::MAX, 9)]
    fn unsigned_ladder_len(#[case] value: u64, #[case] len: usize) {
        assert_eq!(unsigned_head(value).len(), len);
    }

    #[test]
    fn unsigned_matches_signed_for_positive() {
        for value in [0i64, 1, 127, 128, 255, 256, 65535, 65536, u32::MAX as i64, 1 << 32, i64::MAX] {
            assert_eq!(unsigned_head(value as u64), signed_head(value));
        }
    }

    #[rstest]
    #[case(0, Head::Fix(0xa0))]
    #[case(31, Head::Fix(0xbf))]
    #[case(32, Head::U16(tag::RAW16, 32))]
    #[case(65535, Head::U16(tag::RAW16, 65535))]
    #[case(65536, Head::U32(tag::RAW32, 65536))]
    fn raw_tiers(#[case] len: usize, #[case] expected: Head) {
        assert_eq!(raw_head(len), Ok(expected));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn raw_too_long() {
        assert_eq!(raw_head(u32::MAX as usize + 1), Err(ErrorKind::OutOfRange.into()));
    }

    #[rstest]
    #[case(0, Head::Fix(0x90), Head::Fix(0x80))]
    #[case(15, Head::Fix(0x9f), Head::Fix(0x8f))]
    #[case(16, Head::U16(tag::ARRAY16, 16), Head::U16(tag::MAP16, 16))]
    #[case(65535, Head::U16(tag::ARRAY16, 65535), Head::U16(tag::MAP16, 65535))]
    #[case(65536, Head::U32(tag::ARRAY32, 65536), Head::U32(tag::MAP32, 65536))]
    fn container_tiers(#[case] size: u32, #[case] array: Head, #[case] map: Head) {
        assert_eq!(array_head(size), array);
        assert_eq!(map_head(size), map);
    }

    #[test]
    fn write_head() -> Result<(), Error> {
        let mut bytes: alloc::vec::Vec<u8> = alloc::vec::Vec::new();
        Head::Fix(0x05).write_to(&mut bytes)?;
        Head::U16(tag::UINT16, 0x1234).write_to(&mut bytes)?;
        Head::U64(tag::INT64, 1).write_to(&mut bytes)?;
        assert_eq!(bytes, [0x05, 0xcd, 0x12, 0x34, 0xd3, 0, 0, 0, 0, 0, 0, 0, 1]);
        Ok(())
    }
}
