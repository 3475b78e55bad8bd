use std::ops::{Mul, Neg};
use derive_more::{Display, Debug};
use is_even::IsEven;

/// A sign `±1`, used for crossing signs and cube edge signs. 
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Display, Debug)]
#[repr(i8)]
pub enum Sign { 
    #[default]
    #[display("+")]
    #[debug("+")]
    Pos = 1,

    #[display("-")]
    #[debug("-")]
    Neg = -1
}

impl Sign { 
    pub fn is_positive(&self) -> bool { 
        self == &Sign::Pos
    }

    pub fn is_negative(&self) -> bool { 
        !self.is_positive()
    }

    pub fn from_bool(b: bool) -> Self { 
        if b { Sign::Pos } else { Sign::Neg }
    }

    pub fn from_parity<I: IsEven>(val: I) -> Self { 
        if val.is_even() { 
            Sign::Pos
        } else { 
            Sign::Neg
        }
    }

    pub fn to_i32(&self) -> i32 { 
        i32::from(*self)
    }
}

macro_rules! impl_int_conversion {
    ($t:tt) => {
        impl From<Sign> for $t {
            fn from(value: Sign) -> Self {
                match value { 
                    Sign::Pos =>  1,
                    Sign::Neg => -1
                }
            }
        }                
    };
}

impl_int_conversion!(i32);
impl_int_conversion!(i64);
impl_int_conversion!(isize);

impl Neg for Sign {
    type Output = Self;
    fn neg(self) -> Self {
        use Sign::*;
        match self { 
            Neg => Pos,
            Pos => Neg
        }
    }
}

impl Mul for Sign {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        if self == rhs { Sign::Pos } else { Sign::Neg }
    }
}
