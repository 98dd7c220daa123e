use num::{BigInt, BigUint};

use crate::encoder::Encoder;
use crate::error::Error;
use crate::io::Sink;
use crate::pack::Pack;

impl Pack for BigInt {
    fn pack<S: Sink>(&self, encoder: &mut Encoder<S>) -> Result<(), Error> {
        encoder.write_big_int(self)
    }
}

impl Pack for BigUint {
    fn pack<S: Sink>(&self, encoder: &mut Encoder<S>) -> Result<(), Error> {
        encoder.write_big_uint(self)
    }
}
