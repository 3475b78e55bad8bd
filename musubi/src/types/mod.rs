mod int;
mod ff;
pub mod lc;

pub use ff::*;
