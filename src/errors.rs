use snafu::{Backtrace, Snafu};

pub type Result<T, E = Error> = ::std::result::Result<T, E>;

/// Boxed error raised by a collaborator implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error types
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// The caller supplied a structurally wrong input.
    #[snafu(display("Invalid arguments: {message}"))]
    InvalidArguments { message: String },
    /// A recognized shape that this version does not support.
    #[snafu(display("Unsupported: {message}"))]
    Unsupported { message: String },
    /// Malformed serialized key material.
    #[snafu(display("Parse error: {message}"))]
    Parse { message: String },
    #[snafu(display("Not yet implemented: {message}"))]
    Unimplemented { message: String },
    #[snafu(display("invalid armor wrappers"))]
    InvalidArmorWrappers,
    #[snafu(display("invalid crc24 checksum"))]
    InvalidChecksum,
    #[snafu(transparent)]
    Base64Decode { source: base64::DecodeError },
    #[snafu(transparent)]
    IO {
        source: std::io::Error,
        backtrace: Backtrace,
    },
    #[snafu(transparent)]
    Utf8Error { source: std::str::Utf8Error },
    #[snafu(display("{message}"))]
    Message { message: String },
    /// Failure raised by a key manager, parser or builder, forwarded as is.
    #[snafu(display("{source}"))]
    Collaborator { source: BoxError },
}

impl Error {
    /// Wraps a collaborator error without reinterpreting it.
    pub fn collaborator(err: impl Into<BoxError>) -> Self {
        Error::Collaborator { source: err.into() }
    }

    pub fn is_invalid_arguments(&self) -> bool {
        matches!(self, Error::InvalidArguments { .. })
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, Error::Unsupported { .. })
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse { .. })
    }
}

impl From<String> for Error {
    fn from(err: String) -> Error {
        Error::Message { message: err }
    }
}

impl From<derive_builder::UninitializedFieldError> for Error {
    fn from(err: derive_builder::UninitializedFieldError) -> Error {
        Error::Message {
            message: err.to_string(),
        }
    }
}

#[macro_export]
macro_rules! unimplemented_err {
    ($e:expr) => {
        return Err($crate::errors::Error::Unimplemented { message: $e.to_string() })
    };
    ($fmt:expr, $($arg:tt)+) => {
        return Err($crate::errors::Error::Unimplemented { message: format!($fmt, $($arg)+)})
    };
}

#[macro_export]
macro_rules! unsupported_err {
    ($e:expr) => {
        return Err($crate::errors::Error::Unsupported { message: $e.to_string()})
    };
    ($fmt:expr, $($arg:tt)+) => {
        return Err($crate::errors::Error::Unsupported { message: format!($fmt, $($arg)+) })
    };
}

#[macro_export]
macro_rules! invalid_args_err {
    ($e:expr) => {
        return Err($crate::errors::Error::InvalidArguments { message: $e.to_string()})
    };
    ($fmt:expr, $($arg:tt)+) => {
        return Err($crate::errors::Error::InvalidArguments { message: format!($fmt, $($arg)+) })
    };
}

#[macro_export]
macro_rules! parse_err {
    ($e:expr) => {
        return Err($crate::errors::Error::Parse { message: $e.to_string()})
    };
    ($fmt:expr, $($arg:tt)+) => {
        return Err($crate::errors::Error::Parse { message: format!($fmt, $($arg)+) })
    };
}

#[macro_export]
macro_rules! bail {
    ($e:expr) => {
        return Err($crate::errors::Error::Message { message: $e.to_string() })
    };
    ($fmt:expr, $($arg:tt)+) => {
        return Err($crate::errors::Error::Message { message: format!($fmt, $($arg)+) })
    };
}

#[macro_export(local_inner_macros)]
macro_rules! ensure {
    ($cond:expr, $e:expr) => {
        if !($cond) {
            bail!($e);
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)+) => {
        if !($cond) {
            bail!($fmt, $($arg)+);
        }
    };
}
