mod elem;
mod add;
mod mon;
mod ring;
mod r_mod;

pub use elem::{Elem, ElemBase};
pub use add::{AddMon, AddMonOps, AddGrp, AddGrpOps};
pub use mon::{Mon, MonOps};
pub use ring::{Ring, RingOps, EucRing, EucRingOps, Field, FieldOps};
pub use r_mod::{RMod, RModOps};
