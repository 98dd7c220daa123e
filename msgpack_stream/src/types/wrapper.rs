use alloc::boxed::Box;

use crate::encoder::Encoder;
use crate::error::Error;
use crate::io::Sink;
use crate::pack::Pack;

/// `None` is written as nil, `Some` as its content.
impl<T: Pack> Pack for Option<T> {
    fn pack<S: Sink>(&self, encoder: &mut Encoder<S>) -> Result<(), Error> {
        match self {
            Some(value) => value.pack(encoder),
            None => encoder.write_nil(),
        }
    }
}

impl<T: Pack + ?Sized> Pack for &T {
    fn pack<S: Sink>(&self, encoder: &mut Encoder<S>) -> Result<(), Error> {
        (**self).pack(encoder)
    }
}

impl<T: Pack + ?Sized> Pack for Box<T> {
    fn pack<S: Sink>(&self, encoder: &mut Encoder<S>) -> Result<(), Error> {
        (**self).pack(encoder)
    }
}
