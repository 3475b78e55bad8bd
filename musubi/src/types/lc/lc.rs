use std::collections::HashMap;
use std::fmt::{Display, Debug};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign, Mul, MulAssign};
use ahash::AHashMap;
use itertools::Itertools;
use num_traits::Zero;
use auto_impl_ops::auto_ops;
use crate::{Elem, AddMon, AddMonOps, AddGrp, AddGrpOps, Ring, RingOps, RMod, RModOps};

use super::gen::*;

/// An element of the free `R`-module spanned by generators `X`, 
/// i.e. a finite linear combination `Σ rᵢ xᵢ`.
/// 
/// Terms with zero coefficient are never stored.
#[derive(PartialEq, Eq, Clone)]
pub struct Lc<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{ 
    data: AHashMap<X, R>,
    r_zero: R
}

impl<X, R> Lc<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{ 
    pub fn new() -> Self {
        let hasher = ahash::RandomState::with_seeds(0, 0, 0, 0);
        let data = AHashMap::with_hasher(hasher);
        let r_zero = R::zero();
        Self { data, r_zero }
    }

    fn clean(&mut self) { 
        self.data.retain(|_, r| !r.is_zero());
    }

    pub fn nterms(&self) -> usize {
        self.data.len()
    }

    pub fn gens(&self) -> impl Iterator<Item = &X> {
        self.data.keys()
    }

    pub fn is_gen(&self) -> bool { 
        self.nterms() == 1 && self.data.values().all(|r| r.is_one())
    }

    pub fn as_gen(&self) -> Option<X> { 
        if !self.is_gen() { 
            None?
        }
        self.gens().next().cloned()
    }

    pub fn coeff(&self, x: &X) -> &R { 
        self.data.get(x).unwrap_or(&self.r_zero)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&X, &R)> {
        self.data.iter()
    }

    /// Terms sorted by generator.
    pub fn sorted_terms(&self) -> Vec<(&X, &R)> { 
        self.iter().sorted_by(|(x, _), (y, _)| x.cmp(y)).collect()
    }

    pub fn map<Y, S, F>(&self, f: F) -> Lc<Y, S>
    where 
        Y: Gen, 
        S: Ring, for<'x> &'x S: RingOps<S>,
        F: Fn(&X, &R) -> (Y, S) 
    { 
        self.iter().map(|(x, r)| f(x, r)).collect()
    }

    pub fn map_coeffs<S, F>(&self, f: F) -> Lc<X, S>
    where 
        S: Ring, for<'x> &'x S: RingOps<S>, 
        F: Fn(&R) -> S 
    { 
        self.map(|x, r| (x.clone(), f(r)))
    }

    pub fn map_gens<Y, F>(&self, f: F) -> Lc<Y, R>
    where 
        Y: Gen, 
        F: Fn(&X) -> Y 
    { 
        self.map(|x, r| (f(x), r.clone()))
    }

    pub fn filter_gens<F>(&self, f: F) -> Self
    where F: Fn(&X) -> bool { 
        self.iter()
            .filter(|(x, _)| f(x))
            .map(|(x, r)| (x.clone(), r.clone()))
            .collect()
    }

    /// Extends `f: X -> Lc<Y, R>` linearly.
    pub fn apply<Y, F>(&self, f: F) -> Lc<Y, R> 
    where 
        Y: Gen,
        F: Fn(&X) -> Lc<Y, R> 
    {
        self.iter().flat_map(|(x, r)| { 
            f(x).into_iter().map(move |(y, s)| (y, r * &s))
        }).collect()
    }

    // must clean after call
    fn add_pair(&mut self, rhs: (X, R)) { 
        let (x, r) = rhs;
        if r.is_zero() { return }

        if let Some(v) = self.data.get_mut(&x) { 
            v.add_assign(r);
        } else { 
            self.data.insert(x, r);
        }
    } 

    // must clean after call
    fn add_pair_ref(&mut self, rhs: (&X, &R)) { 
        let (x, r) = rhs;
        if r.is_zero() { return }

        if let Some(v) = self.data.get_mut(x) { 
            v.add_assign(r);
        } else { 
            self.data.insert(x.clone(), r.clone());
        }
    }
}

impl<X, R> Default for Lc<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<X, R> From<X> for Lc<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    fn from(x: X) -> Self {
        Self::from((x, R::one()))
    }    
}

impl<X, R> From<(X, R)> for Lc<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    fn from(value: (X, R)) -> Self {
        Self::from_iter([value])
    }
}

impl<X, R> From<HashMap<X, R>> for Lc<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    fn from(value: HashMap<X, R>) -> Self {
        Self::from_iter(value)
    }
}

impl<X, R> FromIterator<(X, R)> for Lc<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    fn from_iter<T: IntoIterator<Item = (X, R)>>(iter: T) -> Self {
        let mut res = Self::new();
        for e in iter.into_iter() { 
            res.add_pair(e);
        }
        res.clean();
        res
    }
}

impl<X, R> IntoIterator for Lc<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    type Item = (X, R);
    type IntoIter = std::collections::hash_map::IntoIter<X, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<X, R> Display for Lc<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = crate::util::format::lc(self.sorted_terms());
        f.write_str(&s)
    }
}

impl<X, R> Debug for Lc<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl<X, R> Zero for Lc<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    fn zero() -> Self {
        Self::new()
    }

    fn is_zero(&self) -> bool {
        self.data.is_empty()
    }
}

impl<X, R> Neg for Lc<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.into_iter().map(|(x, r)| (x, -r)).collect()
    }
}

impl<X, R> Neg for &Lc<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    type Output = Lc<X, R>;

    fn neg(self) -> Self::Output {
        self.map_coeffs(|r| -r)
    }
}

#[auto_ops]
impl<X, R> AddAssign<&Lc<X, R>> for Lc<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    fn add_assign(&mut self, rhs: &Self) {
        for e in rhs.data.iter() { 
            self.add_pair_ref(e);
        }
        self.clean()
    }
}

#[auto_ops]
impl<X, R> SubAssign<&Lc<X, R>> for Lc<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    fn sub_assign(&mut self, rhs: &Self) {
        for (x, r) in rhs.data.iter() { 
            self.add_pair_ref((x, &-r));
        }
        self.clean()
    }
}

#[auto_ops]
impl<X, R> MulAssign<&R> for Lc<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    fn mul_assign(&mut self, rhs: &R) {
        if rhs.is_zero() { 
            self.data.clear();
            return
        }
        for r in self.data.values_mut() { 
            *r *= rhs;
        }
        self.clean()
    }
}

impl<X, R> Sum for Lc<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |mut res, z| { 
            res += z;
            res
        })
    }
}

impl<'a, X, R> Sum<&'a Lc<X, R>> for Lc<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |mut res, z| { 
            res += z;
            res
        })
    }
}

macro_rules! impl_alg_ops {
    ($trait:ident) => {
        impl<X, R> $trait<Self> for Lc<X, R>
        where X: Gen, R: Ring, for<'x> &'x R: RingOps<R> {}

        impl<X, R> $trait<Lc<X, R>> for &Lc<X, R>
        where X: Gen, R: Ring, for<'x> &'x R: RingOps<R> {}
    };
}

impl_alg_ops!(AddMonOps);
impl_alg_ops!(AddGrpOps);

impl<X, R> Elem for Lc<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    fn math_symbol() -> String {
        format!("{}<{}>", R::math_symbol(), X::math_symbol())
    }
}

impl<X, R> AddMon for Lc<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{}

impl<X, R> AddGrp for Lc<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{}

impl<X, R> RModOps<R, Self> for Lc<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{}

impl<X, R> RModOps<R, Lc<X, R>> for &Lc<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{}

impl<X, R> RMod for Lc<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    type R = R;
}

#[cfg(test)]
mod tests {
    use num_traits::Zero;
    use crate::Elem;
    use crate::util::macros::hashmap;
    use crate::lc::{FreeGen, Lc};
 
    type X = FreeGen<i32>;
    type L = Lc<X, i32>;

    fn e(i: i32) -> X { 
        FreeGen(i)
    }

    #[test]
    fn math_symbol() { 
        assert_eq!(L::math_symbol(), "Z<Free<i32>>");
    }

    #[test]
    fn fmt() { 
        let z = L::from(hashmap!{ e(1) => 1 });
        assert_eq!(z.to_string(), "<1>");

        let z = L::from(hashmap!{ e(1) => -1, e(2) => -1 });
        assert_eq!(z.to_string(), "-<1> - <2>");

        let z = L::from(hashmap!{ e(1) => 2, e(2) => 3 });
        assert_eq!(z.to_string(), "2<1> + 3<2>");

        assert_eq!(L::zero().to_string(), "0");
    }

    #[test]
    fn from_iter() { 
        let z = L::from_iter([(e(0), 1), (e(1), 0), (e(2), 2), (e(0), 3)]);

        assert!(!z.is_zero());
        assert_eq!(z.nterms(), 2);
        assert_eq!(z.coeff(&e(0)), &4);
        assert_eq!(z.coeff(&e(1)), &0);
        assert_eq!(z.coeff(&e(2)), &2);
    }

    #[test]
    fn as_gen() { 
        let z = L::from(e(0));
        assert!(z.is_gen());
        assert_eq!(z.as_gen(), Some(e(0)));

        let z = L::from((e(0), 2));
        assert!(!z.is_gen());
        assert_eq!(z.as_gen(), None);
    }

    #[test]
    fn add() { 
        let z = L::from(hashmap!{ e(1) => 1, e(2) => 2 });
        let w = L::from(hashmap!{ e(2) => -2, e(3) => 3 });
        let s = z + w;
        assert_eq!(s, L::from(hashmap!{ e(1) => 1, e(3) => 3 }));
        assert_eq!(s.nterms(), 2);
    }

    #[test]
    fn sub_to_zero() { 
        let z = L::from(hashmap!{ e(1) => 1, e(2) => 2 });
        let w = z.clone();
        let s = &z - &w;
        assert!(s.is_zero());
        assert_eq!(s.nterms(), 0);
    }

    #[test]
    fn neg() { 
        let z = L::from(hashmap!{ e(1) => 1, e(2) => -2 });
        assert_eq!(-&z, L::from(hashmap!{ e(1) => -1, e(2) => 2 }));
    }

    #[test]
    fn scalar_mul() { 
        let z = L::from(hashmap!{ e(1) => 1, e(2) => 2 });
        assert_eq!(&z * 3, L::from(hashmap!{ e(1) => 3, e(2) => 6 }));
        assert!((&z * 0).is_zero());
        assert_eq!((&z * 0).nterms(), 0);
    }

    #[test]
    fn scalar_mul_zero_divisor() { 
        use crate::FF;
        type F = Lc<X, FF<2>>;
        let z = F::from_iter([(e(1), FF::new(1))]);
        let w = &z + &z;
        assert!(w.is_zero());
    }

    #[test]
    fn sum() { 
        let zs = vec![
            L::from(e(1)), 
            L::from(e(2)), 
            L::from((e(1), -1))
        ];
        let s: L = zs.iter().sum();
        assert_eq!(s, L::from(e(2)));
    }

    #[test]
    fn apply() { 
        let z = L::from(hashmap!{ e(1) => 2, e(2) => 3 });
        let w = z.apply(|x| L::from(hashmap!{ e(x.0 * 10) => 1, e(0) => -1 }));
        assert_eq!(w, L::from(hashmap!{ e(10) => 2, e(20) => 3, e(0) => -5 }));
    }

    #[test]
    fn map_gens() { 
        let z = L::from(hashmap!{ e(1) => 2, e(-1) => 3 });
        let w = z.map_gens(|x| e(x.0.abs()));
        assert_eq!(w, L::from(hashmap!{ e(1) => 5 }));
    }

    #[test]
    fn filter_gens() { 
        let z = L::from(hashmap!{ e(1) => 2, e(2) => 3 });
        assert_eq!(z.filter_gens(|x| x.0 > 1), L::from(hashmap!{ e(2) => 3 }));
    }
}
