#![allow(non_upper_case_globals)]

use std::iter::{Sum, Product};
use std::ops::{Add, Neg, Sub, Mul, Div, Rem, AddAssign, SubAssign, MulAssign, DivAssign, RemAssign};
use derive_more::{Display, Debug};
use num_traits::{Zero, One};
use auto_impl_ops::auto_ops;

use crate::{Elem, AddMonOps, AddGrpOps, MonOps, RingOps, FieldOps, EucRingOps, AddMon, AddGrp, Mon, Ring, EucRing, Field};

type I = i32;

/// The prime field `Z/p`. `p` is assumed to be a prime.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Display, Debug)]
#[display("{_0}")]
#[debug("{_0}")]
pub struct FF<const p: I>(I);

impl<const p: I> FF<p> { 
    pub fn new(a: I) -> Self { 
        assert!(p > 1);
        Self(a.rem_euclid(p))
    }

    pub fn rep(&self) -> &I { 
        &self.0
    }
}

impl<const p: I> From<I> for FF<p> {
    fn from(a: I) -> Self {
        Self::new(a)
    }
}

impl<const p: I> Zero for FF<p> {
    fn zero() -> Self {
        Self(0)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl<const p: I> One for FF<p> {
    fn one() -> Self {
        Self(1)
    }

    fn is_one(&self) -> bool {
        self.0.is_one()
    }
}

impl<const p: I> Neg for FF<p> {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self::new(-self.0)
    }
}

impl<'a, const p: I> Neg for &'a FF<p> {
    type Output = FF<p>;
    fn neg(self) -> Self::Output {
        FF::new(-self.0)
    }
}

macro_rules! impl_binop {
    ($trait:ident, $method:ident) => {
        #[auto_ops]
        impl<'a, 'b, const p: I> $trait<&'b FF<p>> for &'a FF<p> {
            type Output = FF<p>;
            fn $method(self, rhs: &'b FF<p>) -> Self::Output {
                // widen to avoid overflow for large p.
                let a = (self.0 as i64).$method(rhs.0 as i64).rem_euclid(p as i64);
                FF(a as I)
            }
        }
    }
}

impl_binop!(Add, add);
impl_binop!(Sub, sub);
impl_binop!(Mul, mul);

#[auto_ops]
impl<'a, 'b, const p: I> Div<&'b FF<p>> for &'a FF<p> {
    type Output = FF<p>;
    fn div(self, rhs: &'b FF<p>) -> Self::Output {
        let Some(inv) = rhs.inv() else { 
            panic!("division by zero in {}", FF::<p>::math_symbol())
        };
        self * inv
    }
}

#[auto_ops]
impl<'a, 'b, const p: I> Rem<&'b FF<p>> for &'a FF<p> {
    type Output = FF<p>;
    fn rem(self, rhs: &'b FF<p>) -> Self::Output {
        assert!(!rhs.is_zero());
        FF::zero()
    }
}

impl<const p: I> Sum for FF<p> {
    fn sum<It: Iterator<Item = Self>>(iter: It) -> Self {
        iter.fold(Self::zero(), |res, a| res + a)
    }
}

impl<'a, const p: I> Sum<&'a FF<p>> for FF<p> {
    fn sum<It: Iterator<Item = &'a Self>>(iter: It) -> Self {
        iter.fold(Self::zero(), |res, a| res + a)
    }
}

impl<const p: I> Product for FF<p> {
    fn product<It: Iterator<Item = Self>>(iter: It) -> Self {
        iter.fold(Self::one(), |res, a| res * a)
    }
}

impl<'a, const p: I> Product<&'a FF<p>> for FF<p> {
    fn product<It: Iterator<Item = &'a Self>>(iter: It) -> Self {
        iter.fold(Self::one(), |res, a| res * a)
    }
}

macro_rules! impl_alg_ops {
    ($trait:ident) => {
        impl<const p: I> $trait for FF<p> {}
        impl<'a, const p: I> $trait<FF<p>> for &'a FF<p> {}
    };
}

impl_alg_ops!(AddMonOps);
impl_alg_ops!(AddGrpOps);
impl_alg_ops!(MonOps);
impl_alg_ops!(RingOps);
impl_alg_ops!(EucRingOps);
impl_alg_ops!(FieldOps);

impl<const p: I> Elem for FF<p> {
    fn math_symbol() -> String {
        use crate::util::format::subscript;
        format!("F{}", subscript(p as isize))
    }
}

impl<const p: I> AddMon for FF<p> {}
impl<const p: I> AddGrp for FF<p> {}
impl<const p: I> Mon for FF<p> {}

impl<const p: I> Ring for FF<p> {
    fn inv(&self) -> Option<Self> {
        if self.is_zero() { 
            return None
        } 

        // ax + py = 1  =>  ax = 1 mod p. 
        let (d, x, _) = I::gcdx(&self.0, &p);
        if d.is_one() { 
            Some(Self::new(x))
        } else { 
            None
        }
    }

    fn is_unit(&self) -> bool {
        !self.is_zero()
    }

    fn normalizing_unit(&self) -> Self {
        self.inv().unwrap_or(Self::one())
    }

    fn is_field() -> bool {
        true
    }
}

impl<const p: I> EucRing for FF<p> {}
impl<const p: I> Field for FF<p> {}

#[cfg(test)]
mod tests { 
    use super::*;

    type F2 = FF<2>;
    type F3 = FF<3>;
    type F5 = FF<5>;

    #[test]
    fn init() { 
        let a = F3::new(-7);
        assert_eq!(a.0, 2);

        let a = F5::new(-7);
        assert_eq!(a.0, 3);
    }

    #[test]
    fn display() { 
        let a = F3::new(-7);
        assert_eq!(format!("{}", a), "2");
        assert_eq!(format!("{:?}", a), "2");
        assert_eq!(F5::math_symbol(), "F₅");
    }

    #[test]
    fn add_sub() { 
        let a = F5::new(3);
        let b = F5::new(4);

        assert_eq!(a + b, F5::new(2));
        assert_eq!(a - b, F5::new(4));
        assert_eq!(-a, F5::new(2));
    }

    #[test]
    fn assign_ops() { 
        let mut a = F5::new(3);
        a += F5::new(4);
        assert_eq!(a, F5::new(2));

        a *= F5::new(4);
        assert_eq!(a, F5::new(3));

        a -= &F5::new(4);
        assert_eq!(a, F5::new(4));
    }

    #[test]
    fn mul_div() { 
        let a = F5::new(4);
        let b = F5::new(3);
        assert_eq!(a * b, F5::new(2));
        assert_eq!(a / b, F5::new(3));
        assert_eq!(a % b, F5::zero());
    }

    #[test]
    fn inv() { 
        assert_eq!(F5::new(2).inv(), Some(F5::new(3)));
        assert_eq!(F5::new(0).inv(), None);
        assert_eq!(F2::new(1).inv(), Some(F2::new(1)));
        assert!(F5::new(4).normalizing_unit() * F5::new(4) == F5::one());
    }

    #[test]
    fn sum_product() { 
        let v = vec![F3::new(1), F3::new(2), F3::new(2)];
        assert_eq!(v.iter().sum::<F3>(), F3::new(2));
        assert_eq!(v.into_iter().product::<F3>(), F3::new(1));
    }

    #[test]
    fn is_field() { 
        assert!(F3::is_field());
    }
}
