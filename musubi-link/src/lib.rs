mod link;
pub use link::*;
