use alloc::string::String;
use alloc::vec::Vec;

use crate::encoder::Encoder;
use crate::error::Error;
use crate::io::Sink;
use crate::pack::Pack;

impl Pack for str {
    fn pack<S: Sink>(&self, encoder: &mut Encoder<S>) -> Result<(), Error> {
        encoder.write_str(self)
    }
}

impl Pack for String {
    fn pack<S: Sink>(&self, encoder: &mut Encoder<S>) -> Result<(), Error> {
        encoder.write_str(self)
    }
}

impl Pack for [u8] {
    fn pack<S: Sink>(&self, encoder: &mut Encoder<S>) -> Result<(), Error> {
        encoder.write_bytes(self)
    }
}

impl<const N: usize> Pack for [u8; N] {
    fn pack<S: Sink>(&self, encoder: &mut Encoder<S>) -> Result<(), Error> {
        encoder.write_bytes(self)
    }
}

impl Pack for Vec<u8> {
    fn pack<S: Sink>(&self, encoder: &mut Encoder<S>) -> Result<(), Error> {
        encoder.write_bytes(self)
    }
}
