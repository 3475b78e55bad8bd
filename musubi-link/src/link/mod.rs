mod link;
mod crossing;
mod comp;
mod record;

pub use link::{Link, Edge, EdgeId, Port, State, XCode};
pub use crossing::{Crossing, CrossingType};
pub use comp::LinkComp;
