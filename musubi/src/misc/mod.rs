mod sign;
pub mod bitseq;

pub use sign::*;
