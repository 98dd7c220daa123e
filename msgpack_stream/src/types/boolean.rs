use crate::encoder::Encoder;
use crate::error::Error;
use crate::io::Sink;
use crate::pack::Pack;

impl Pack for bool {
    fn pack<S: Sink>(&self, encoder: &mut Encoder<S>) -> Result<(), Error> {
        encoder.write_bool(*self)
    }
}

/// The unit is written as nil.
impl Pack for () {
    fn pack<S: Sink>(&self, encoder: &mut Encoder<S>) -> Result<(), Error> {
        encoder.write_nil()
    }
}
