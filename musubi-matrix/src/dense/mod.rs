mod mat;
pub mod snf;

pub use mat::*;
