pub mod err;
pub mod format;
pub mod log;
pub mod macros;
