mod summand;
mod complex;
mod chain_map;
mod homology;
mod generic;

pub use summand::*;
pub use complex::*;
pub use chain_map::*;
pub use homology::*;
pub use generic::*;

pub mod config;
pub mod utils;
