use derive_more::Display;

/// Error for malformed input, e.g. an inconsistent planar diagram code.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
#[display("{msg}")]
pub struct Error { 
    pub msg: String
}

impl Error { 
    pub fn new<S>(msg: S) -> Self
    where S: Into<String> {
        Self { msg: msg.into() }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::util::err::Error::new(format!($($arg)*))
    };
}

#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($arg:tt)*) => {
        if !$cond { 
            return Err($crate::err!($($arg)*).into())
        }
    };
}

pub use {err, ensure};
