mod trans;
mod homology_calc;

pub use trans::*;
pub use homology_calc::*;
