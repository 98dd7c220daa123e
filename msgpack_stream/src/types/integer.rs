use crate::encoder::Encoder;
use crate::error::Error;
use crate::io::Sink;
use crate::pack::Pack;

macro_rules! impl_pack {
    ($type:ty, $func:ident) => {
        impl Pack for $type {
            fn pack<S: Sink>(&self, encoder: &mut Encoder<S>) -> Result<(), Error> {
                encoder.$func(*self)
            }
        }
    };
}

impl_pack!(u8, write_u8);
impl_pack!(u16, write_u16);
impl_pack!(u32, write_u32);
impl_pack!(u64, write_u64);
impl_pack!(u128, write_u128);
impl_pack!(i8, write_i8);
impl_pack!(i16, write_i16);
impl_pack!(i32, write_i32);
impl_pack!(i64, write_i64);
impl_pack!(i128, write_i128);

impl Pack for usize {
    fn pack<S: Sink>(&self, encoder: &mut Encoder<S>) -> Result<(), Error> {
        encoder.write_u64(*self as u64)
    }
}

impl Pack for isize {
    fn pack<S: Sink>(&self, encoder: &mut Encoder<S>) -> Result<(), Error> {
        encoder.write_i64(*self as i64)
    }
}
