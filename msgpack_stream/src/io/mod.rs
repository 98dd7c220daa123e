//! The byte sink trait and sinks.

mod fixed_memory_sink;
mod growing_memory_sink;
#[cfg(feature = "std")]
mod io_sink;
mod sink;

pub use fixed_memory_sink::FixedMemorySink;
pub use growing_memory_sink::GrowingMemorySink;
#[cfg(feature = "std")]
pub use io_sink::IoSink;
pub use sink::Sink;
