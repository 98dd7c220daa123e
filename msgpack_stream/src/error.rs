//! The error type of the encoder and its sinks.

use crate::tracker::ContainerKind;

/// What went wrong during encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorKind {
    /// An end call had no open container of the same kind on top of the stack.
    EndWithoutBegin(ContainerKind),
    /// A verified end call found declared slots that were never written.
    ///
    /// For maps, `remaining` counts slots, i.e. keys and values separately.
    #[allow(missing_docs)]
    Incomplete { kind: ContainerKind, remaining: i64 },
    /// A value was written into a container that already holds its declared
    /// number of elements. Only reported by strict encoders.
    TooManyElements(ContainerKind),
    /// The value cannot be represented by the format, e.g. an integer outside
    /// `[-2^63, 2^64)` or a byte string longer than `u32::MAX`.
    OutOfRange,
    /// The text is not valid UTF-8.
    InvalidUtf8,
    /// The UTF-16 text contains an unpaired surrogate.
    UnpairedSurrogate,
    /// The sink ran out of space.
    UnexpectedEof,
    /// The sink was already closed.
    Closed,
    /// The bytes are not a valid encoding.
    Decode,
    /// The underlying writer failed.
    #[cfg(feature = "std")]
    IO(std::io::ErrorKind),
}

/// The broad class of an [`ErrorKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorCategory {
    /// Begin and end calls don't pair up, or element counts don't match.
    Structural,
    /// A numeric value or length does not fit the format.
    Range,
    /// Text could not be transcoded to UTF-8.
    Encoding,
    /// The sink did not accept the bytes.
    Io,
    /// The bytes could not be read back.
    Decode,
}

/// An encoding error.
///
/// Besides the [`ErrorKind`], the error records how many containers were open
/// when the error was detected. Errors coming from the sink are passed through
/// unchanged and have a depth of zero.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Error {
    kind: ErrorKind,
    depth: usize,
}

//------------------------------------------------------------------------------
// Error implementations
//------------------------------------------------------------------------------

impl Error {
    /// Return what went wrong.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Return the number of open containers at the time of the error.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Return the broad class of the error.
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Attach the nesting depth at which the error occurred.
    pub fn at_depth(self, depth: usize) -> Self {
        Self { depth, ..self }
    }
}

impl core::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.depth != 0 {
            write!(f, "at depth {}: {}", self.depth, self.kind)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(value: ErrorKind) -> Self {
        Self { kind: value, depth: 0 }
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        ErrorKind::from(value).into()
    }
}

//------------------------------------------------------------------------------
// ErrorKind implementations
//------------------------------------------------------------------------------

impl ErrorKind {
    /// Return the broad class of the error.
    pub fn category(&self) -> ErrorCategory {
        use ErrorKind::*;
        match self {
            EndWithoutBegin(_) | Incomplete { .. } | TooManyElements(_) => ErrorCategory::Structural,
            OutOfRange => ErrorCategory::Range,
            InvalidUtf8 | UnpairedSurrogate => ErrorCategory::Encoding,
            UnexpectedEof | Closed => ErrorCategory::Io,
            Decode => ErrorCategory::Decode,
            #[cfg(feature = "std")]
            IO(_) => ErrorCategory::Io,
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use ErrorKind::*;
        match self {
            EndWithoutBegin(kind) => write!(f, "end of {kind} is written but no {kind} was begun"),
            Incomplete { kind, remaining } => {
                write!(f, "end of {kind} is written with verification but the {kind} is not complete: {remaining}")
            }
            TooManyElements(kind) => write!(f, "the {kind} already holds as many elements as declared"),
            OutOfRange => write!(f, "the value is out of the range representable by MessagePack"),
            InvalidUtf8 => write!(f, "the text is not valid UTF-8"),
            UnpairedSurrogate => write!(f, "the text contains an unpaired UTF-16 surrogate"),
            UnexpectedEof => write!(f, "end of file reached, cannot write more data"),
            Closed => write!(f, "the sink is closed"),
            Decode => write!(f, "the bytes are not valid MessagePack"),
            #[cfg(feature = "std")]
            IO(kind) => write!(f, "{kind}"),
        }
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for ErrorKind {
    fn from(value: std::io::Error) -> Self {
        match value.kind() {
            std::io::ErrorKind::UnexpectedEof | std::io::ErrorKind::WriteZero => ErrorKind::UnexpectedEof,
            kind => ErrorKind::IO(kind),
        }
    }
}
