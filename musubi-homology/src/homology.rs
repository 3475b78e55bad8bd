use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, Index, Mul, Neg, Sub};

use itertools::Itertools;
use log::info;
use num_traits::Zero;
use musubi::{EucRing, EucRingOps};
use musubi::lc::{Gen, Lc};
use musubi::util::err::Result;
use musubi_matrix::dense::Mat;

use crate::utils::HomologyCalc;
use crate::{rmod_str_symbol, ChainComplex, ChainMap, HomologySummand};

#[cfg(feature = "multithread")]
use rayon::prelude::{IntoParallelIterator, ParallelIterator};

/// The homology of a chain complex, computed in every degree of its support
/// together with representatives of the generators.
pub struct Homology<X, R>
where
    X: Gen,
    R: EucRing, for<'x> &'x R: EucRingOps<R>
{
    complex: ChainComplex<X, R>,
    summands: BTreeMap<isize, HomologySummand<R>>,
    zero: HomologySummand<R>
}

impl<X, R> Homology<X, R>
where
    X: Gen,
    R: EucRing, for<'x> &'x R: EucRingOps<R>
{
    pub fn new(complex: ChainComplex<X, R>) -> Self {
        let degs = complex.support().collect_vec();
        let summands = Self::compute_all(&complex, degs);
        let zero = HomologySummand::zero();
        Self { complex, summands, zero }
    }

    fn compute_all(complex: &ChainComplex<X, R>, degs: Vec<isize>) -> BTreeMap<isize, HomologySummand<R>> {
        cfg_if::cfg_if! {
            if #[cfg(feature = "multithread")] {
                if crate::config::is_multithread_enabled() {
                    return degs.into_par_iter().map(|i|
                        (i, Self::compute_at(complex, i))
                    ).collect()
                }
            }
        }

        degs.into_iter().map(|i|
            (i, Self::compute_at(complex, i))
        ).collect()
    }

    fn compute_at(complex: &ChainComplex<X, R>, i: isize) -> HomologySummand<R> {
        let d_deg = complex.d_deg();
        let c = |i| rmod_str_symbol::<R>(complex.rank(i), &[], "0");

        info!("compute H[{i}]: {} -> {} -> {} ..", c(i - d_deg), c(i), c(i + d_deg));

        let d0 = complex.d_matrix(i - d_deg);
        let d1 = complex.d_matrix(i);
        let h = HomologyCalc::calculate(&d0, &d1, true);

        info!("  H[{i}] = {h}.");

        h
    }

    pub fn complex(&self) -> &ChainComplex<X, R> {
        &self.complex
    }

    pub fn support(&self) -> impl Iterator<Item = isize> + '_ {
        self.summands.keys().cloned()
    }

    pub fn get(&self, i: isize) -> &HomologySummand<R> {
        self.summands.get(&i).unwrap_or(&self.zero)
    }

    pub fn rank(&self, i: isize) -> usize {
        self.get(i).rank()
    }

    pub fn tors(&self, i: isize) -> &[R] {
        self.get(i).tors()
    }

    /// Coordinates of the class of a cycle `z` in the generators of `H[i]`.
    pub fn vectorize(&self, i: isize, z: &Lc<X, R>) -> Vec<R> {
        let h = self.get(i);
        let v = self.complex.vectorize(i, z);
        h.vectorize(&v).unwrap_or_else(|| vec![R::zero(); h.dim()])
    }

    /// The class of a cycle `z` in degree `i`.
    pub fn class(&self, i: isize, z: Lc<X, R>) -> HomologyClass<'_, X, R> {
        debug_assert!(self.complex.d(i, &z).is_zero(), "{z} is not a cycle.");
        HomologyClass { homology: self, deg: i, rep: z }
    }

    /// The `k`-th generator of `H[i]`, free ones first.
    pub fn gen(&self, i: isize, k: usize) -> HomologyClass<'_, X, R> {
        let h = self.get(i);
        let rep = match h.gen_vec(k) {
            Some(v) => self.complex.as_chain(i, &v),
            None => Lc::zero()
        };
        self.class(i, rep)
    }

    pub fn gens(&self, i: isize) -> Vec<HomologyClass<'_, X, R>> {
        (0..self.get(i).dim()).map(|k| self.gen(i, k)).collect()
    }

    pub fn display_seq(&self) -> String {
        self.support().map(|i| format!("H[{i}]: {}", self.get(i))).join("\n")
    }
}

impl<X, R> Index<isize> for Homology<X, R>
where
    X: Gen,
    R: EucRing, for<'x> &'x R: EucRingOps<R>
{
    type Output = HomologySummand<R>;

    fn index(&self, i: isize) -> &Self::Output {
        self.get(i)
    }
}

impl<X, R> ChainComplex<X, R>
where
    X: Gen,
    R: EucRing, for<'x> &'x R: EucRingOps<R>
{
    pub fn homology(self) -> Homology<X, R> {
        Homology::new(self)
    }
}

/// An element of `H[deg]`, represented by a cycle.
///
/// Two classes are equal iff their representatives differ by a boundary.
pub struct HomologyClass<'a, X, R>
where
    X: Gen,
    R: EucRing, for<'x> &'x R: EucRingOps<R>
{
    homology: &'a Homology<X, R>,
    deg: isize,
    rep: Lc<X, R>
}

impl<'a, X, R> HomologyClass<'a, X, R>
where
    X: Gen,
    R: EucRing, for<'x> &'x R: EucRingOps<R>
{
    pub fn deg(&self) -> isize {
        self.deg
    }

    pub fn rep(&self) -> &Lc<X, R> {
        &self.rep
    }

    pub fn vectorize(&self) -> Vec<R> {
        self.homology.vectorize(self.deg, &self.rep)
    }

    pub fn is_zero(&self) -> bool {
        self.vectorize().iter().all(|a| a.is_zero())
    }

    fn is_compatible(&self, other: &Self) -> bool {
        std::ptr::eq(self.homology, other.homology) && self.deg == other.deg
    }

    fn with_rep(&self, rep: Lc<X, R>) -> Self {
        HomologyClass { homology: self.homology, deg: self.deg, rep }
    }
}

impl<'a, X, R> Clone for HomologyClass<'a, X, R>
where
    X: Gen,
    R: EucRing, for<'x> &'x R: EucRingOps<R>
{
    fn clone(&self) -> Self {
        self.with_rep(self.rep.clone())
    }
}

impl<'a, X, R> PartialEq for HomologyClass<'a, X, R>
where
    X: Gen,
    R: EucRing, for<'x> &'x R: EucRingOps<R>
{
    fn eq(&self, other: &Self) -> bool {
        self.is_compatible(other) && (self - other).is_zero()
    }
}

impl<'a, X, R> Add for &HomologyClass<'a, X, R>
where
    X: Gen,
    R: EucRing, for<'x> &'x R: EucRingOps<R>
{
    type Output = HomologyClass<'a, X, R>;

    fn add(self, rhs: Self) -> Self::Output {
        assert!(self.is_compatible(rhs));
        self.with_rep(&self.rep + &rhs.rep)
    }
}

impl<'a, X, R> Sub for &HomologyClass<'a, X, R>
where
    X: Gen,
    R: EucRing, for<'x> &'x R: EucRingOps<R>
{
    type Output = HomologyClass<'a, X, R>;

    fn sub(self, rhs: Self) -> Self::Output {
        assert!(self.is_compatible(rhs));
        self.with_rep(&self.rep - &rhs.rep)
    }
}

impl<'a, X, R> Neg for &HomologyClass<'a, X, R>
where
    X: Gen,
    R: EucRing, for<'x> &'x R: EucRingOps<R>
{
    type Output = HomologyClass<'a, X, R>;

    fn neg(self) -> Self::Output {
        self.with_rep(-&self.rep)
    }
}

impl<'a, X, R> Mul<&R> for &HomologyClass<'a, X, R>
where
    X: Gen,
    R: EucRing, for<'x> &'x R: EucRingOps<R>
{
    type Output = HomologyClass<'a, X, R>;

    fn mul(self, r: &R) -> Self::Output {
        self.with_rep(&self.rep * r)
    }
}

impl<'a, X, R> fmt::Display for HomologyClass<'a, X, R>
where
    X: Gen,
    R: EucRing, for<'x> &'x R: EucRingOps<R>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.rep)
    }
}

impl<'a, X, R> fmt::Debug for HomologyClass<'a, X, R>
where
    X: Gen,
    R: EucRing, for<'x> &'x R: EucRingOps<R>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] in H[{}]", self.rep, self.deg)
    }
}

/// The map on homology induced by a chain map.
///
/// Well-defined only if the chain map commutes with the differentials,
/// see [`ChainMap::validate`].
pub struct HomologyMap<'a, X, Y, R>
where
    X: Gen, Y: Gen,
    R: EucRing, for<'x> &'x R: EucRingOps<R>
{
    map: &'a ChainMap<X, Y, R>,
    source: &'a Homology<X, R>,
    target: &'a Homology<Y, R>
}

impl<'a, X, Y, R> HomologyMap<'a, X, Y, R>
where
    X: Gen, Y: Gen,
    R: EucRing, for<'x> &'x R: EucRingOps<R>
{
    pub fn new(map: &'a ChainMap<X, Y, R>, source: &'a Homology<X, R>, target: &'a Homology<Y, R>) -> Self {
        Self { map, source, target }
    }

    pub fn deg(&self) -> isize {
        self.map.deg()
    }

    pub fn validate(&self) -> Result<()> {
        self.map.validate(self.source.complex(), self.target.complex())
    }

    pub fn apply(&self, c: &HomologyClass<'_, X, R>) -> HomologyClass<'a, Y, R> {
        assert!(std::ptr::eq(c.homology, self.source));

        let i = c.deg();
        let z = self.map.apply(i, c.rep());
        self.target.class(i + self.deg(), z)
    }

    /// The matrix of `H[i] → H'[i + deg]` in the chosen generators.
    pub fn matrix(&self, i: isize) -> Mat<R> {
        let j = i + self.deg();
        let (m, n) = (self.target.get(j).dim(), self.source.get(i).dim());
        let mut a = Mat::zero((m, n));

        for (k, x) in self.source.gens(i).into_iter().enumerate() {
            let y = self.apply(&x);
            for (l, r) in y.vectorize().into_iter().enumerate() {
                a[(l, k)] = r;
            }
        }

        a
    }
}

#[cfg(test)]
mod tests {
    use musubi::FF;
    use crate::{EnumGen, GenericChainComplex};
    use super::*;

    #[test]
    fn zero() {
        let h = GenericChainComplex::<i32>::zero().homology();
        assert!(h[0].is_zero());
        assert_eq!(h.support().count(), 0);
    }

    #[test]
    fn single() {
        let h = GenericChainComplex::<i32>::one().homology();
        assert_eq!(h.rank(0), 1);
        assert!(h[0].is_free());
    }

    #[test]
    fn one_to_one() {
        let h = GenericChainComplex::<i32>::one_one(1).homology();
        assert!(h[0].is_zero());
        assert!(h[1].is_zero());
    }

    #[test]
    fn two_to_one() {
        let h = GenericChainComplex::<i32>::two_one(1, -1).homology();
        assert!(h[0].is_zero());
        assert_eq!(h.rank(1), 1);
        assert!(h[1].is_free());
    }

    #[test]
    fn torsion() {
        let h = GenericChainComplex::<i32>::one_one(2).homology();
        assert_eq!(h.rank(0), 0);
        assert_eq!(h.tors(0), &[2]);
        assert_eq!(h[0].to_string(), "(Z/2)");
    }

    #[test]
    fn d3() {
        let h = GenericChainComplex::<i32>::d3().homology();
        assert_eq!(h.rank(0), 1);
        assert!(h[1].is_zero());
        assert!(h[2].is_zero());
        assert!(h[3].is_zero());
    }

    #[test]
    fn s2() {
        let h = GenericChainComplex::<i32>::s2().homology();
        assert_eq!(h.rank(0), 1);
        assert!(h[1].is_zero());
        assert_eq!(h.rank(2), 1);
        assert!(h[2].is_free());
        assert!(h[3].is_zero());
    }

    #[test]
    fn rp2() {
        let h = GenericChainComplex::<i32>::rp2().homology();
        assert_eq!(h.rank(0), 1);
        assert_eq!(h.rank(1), 0);
        assert_eq!(h.tors(1), &[2]);
        assert!(h[2].is_zero());
        assert_eq!(h.display_seq(), "H[0]: Z\nH[1]: (Z/2)\nH[2]: 0");
    }

    #[test]
    fn rp2_f2() {
        type F2 = FF<2>;
        let h = GenericChainComplex::<F2>::rp2().homology();
        assert_eq!(h.rank(0), 1);
        assert_eq!(h.rank(1), 1);
        assert_eq!(h.rank(2), 1);
    }

    #[test]
    fn rp2_f3() {
        type F3 = FF<3>;
        let h = GenericChainComplex::<F3>::rp2().homology();
        assert_eq!(h.rank(0), 1);
        assert_eq!(h.rank(1), 0);
        assert_eq!(h.rank(2), 0);
    }

    #[test]
    fn sequential() {
        crate::config::set_multithread_enabled(false);
        let h = GenericChainComplex::<i32>::rp2().homology();
        crate::config::set_multithread_enabled(true);
        assert_eq!(h.tors(1), &[2]);
    }

    #[test]
    fn s2_gens() {
        let h = GenericChainComplex::<i32>::s2().homology();
        let z = h.gen(2, 0);

        assert!(!z.rep().is_zero());
        assert!(h.complex().d(2, z.rep()).is_zero());
        assert!(!z.is_zero());
        assert_eq!(z.vectorize(), vec![1]);
        assert_eq!(h.gens(2).len(), 1);
        assert!(h.gens(1).is_empty());
    }

    #[test]
    fn rp2_class() {
        let h = GenericChainComplex::<i32>::rp2().homology();
        let z = h.gen(1, 0);

        assert!(!z.is_zero());
        assert!((&z * &2).is_zero()); // order 2
        assert_eq!(&z + &z, &z * &0);
        assert_eq!(-&z, z);
    }

    #[test]
    fn class_modulo_boundary() {
        let h = GenericChainComplex::<i32>::s2().homology();
        let c = h.complex();

        let z = h.gen(0, 0);
        let b = c.d(1, &Lc::from(EnumGen(1, 0)));
        assert!(!b.is_zero());

        let w = h.class(0, z.rep() + &b);
        assert_ne!(z.rep(), w.rep());
        assert_eq!(z, w);
        assert!(h.class(0, b).is_zero());
    }

    #[test]
    fn induced_id() {
        let h = GenericChainComplex::<i32>::rp2().homology();
        let f = ChainMap::id();
        let hf = HomologyMap::new(&f, &h, &h);

        assert!(hf.validate().is_ok());

        for i in 0..=2 {
            let a = hf.matrix(i);
            assert!(a.is_id(), "{a}");
        }

        let z = h.gen(1, 0);
        assert_eq!(hf.apply(&z), z);
    }

    #[test]
    fn induced_scalar() {
        let h = GenericChainComplex::<i32>::s2().homology();
        let f = ChainMap::new(0, |_, x: &EnumGen| Lc::from((*x, 3)));
        let hf = HomologyMap::new(&f, &h, &h);

        f.assert_chain_map(h.complex(), h.complex());
        assert_eq!(hf.matrix(2), Mat::from_data((1, 1), [3]));
    }

    #[test]
    fn induced_composite() {
        let h = GenericChainComplex::<i32>::s2().homology();
        let f = ChainMap::new(0, |_, x: &EnumGen| Lc::from((*x, 3)));
        let g = ChainMap::new(0, |_, x: &EnumGen| Lc::from((*x, 2)));
        let gf = f.compose(&g);

        let (hf, hg, hgf) = (
            HomologyMap::new(&f, &h, &h),
            HomologyMap::new(&g, &h, &h),
            HomologyMap::new(&gf, &h, &h),
        );

        assert!(hgf.validate().is_ok());
        assert_eq!(hgf.matrix(2), &hg.matrix(2) * &hf.matrix(2));

        let z = h.gen(0, 0);
        assert_eq!(hgf.apply(&z), hg.apply(&hf.apply(&z)));
    }

    #[test]
    fn induced_well_defined() {
        let h = GenericChainComplex::<i32>::s2().homology();
        let f = ChainMap::new(0, |_, x: &EnumGen| Lc::from((*x, -1)));
        let hf = HomologyMap::new(&f, &h, &h);

        let x = h.gen(0, 0);
        let b = h.complex().d(1, &Lc::from(EnumGen(1, 2)));
        let y = h.class(0, x.rep() + &b);

        assert_eq!(x, y);
        assert_eq!(hf.apply(&x), hf.apply(&y));
        assert_eq!(hf.apply(&x), -&x);
    }

    #[test]
    fn induced_to_d3() {
        let s2 = GenericChainComplex::<i32>::s2().homology();
        let d3 = GenericChainComplex::<i32>::d3().homology();
        let f = ChainMap::id();
        let hf = HomologyMap::new(&f, &s2, &d3);

        assert!(hf.validate().is_ok());
        assert!(hf.apply(&s2.gen(2, 0)).is_zero());
        assert!(!hf.apply(&s2.gen(0, 0)).is_zero());
        assert_eq!(hf.matrix(2).shape(), (0, 1));
    }
}
