mod big_int;
mod boolean;
mod bytes;
mod float;
mod integer;
mod wrapper;
