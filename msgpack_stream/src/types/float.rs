use crate::encoder::Encoder;
use crate::error::Error;
use crate::io::Sink;
use crate::pack::Pack;

impl Pack for f32 {
    fn pack<S: Sink>(&self, encoder: &mut Encoder<S>) -> Result<(), Error> {
        encoder.write_f32(*self)
    }
}

impl Pack for f64 {
    fn pack<S: Sink>(&self, encoder: &mut Encoder<S>) -> Result<(), Error> {
        encoder.write_f64(*self)
    }
}
