use std::collections::BTreeMap;
use std::ops::{Index, RangeInclusive};
use std::sync::Arc;

use itertools::Itertools;
use log::info;
use musubi::{EucRing, EucRingOps};
use musubi::util::format::table;
use musubi_homology::{Homology, HomologyClass, HomologySummand};
use musubi_link::Link;

use crate::kh::{KhChain, KhChainGen, KhComplex, KhCube};
use crate::misc::range_of;

/// The Khovanov homology `Kh(L)`, graded by the homological degree.
pub struct KhHomology<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    inner: Homology<KhChainGen, R>,
    deg_shift: (isize, isize)
}

impl<R> KhHomology<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    pub fn new(l: &Link) -> Self {
        KhComplex::new(l).homology()
    }

    pub fn from_complex(c: KhComplex<R>) -> Self {
        let deg_shift = c.deg_shift();
        let inner = c.into_inner().homology();
        Self { inner, deg_shift }
    }

    /// Khovanov homology split by the quantum degree.
    pub fn bigraded(l: &Link) -> KhHomologyBigraded<R> {
        KhHomologyBigraded::new(l)
    }

    pub fn deg_shift(&self) -> (isize, isize) {
        self.deg_shift
    }

    /// The smallest range containing all non-zero summands.
    pub fn h_range(&self) -> RangeInclusive<isize> {
        range_of(self.inner.support().filter(|&i| !self[i].is_zero()))
    }

    pub fn inner(&self) -> &Homology<KhChainGen, R> {
        &self.inner
    }

    pub fn get(&self, i: isize) -> &HomologySummand<R> {
        self.inner.get(i)
    }

    pub fn rank(&self, i: isize) -> usize {
        self.inner.rank(i)
    }

    pub fn tors(&self, i: isize) -> &[R] {
        self.inner.tors(i)
    }

    pub fn class(&self, i: isize, z: KhChain<R>) -> HomologyClass<'_, KhChainGen, R> {
        self.inner.class(i, z)
    }

    pub fn gen(&self, i: isize, k: usize) -> HomologyClass<'_, KhChainGen, R> {
        self.inner.gen(i, k)
    }

    pub fn display_seq(&self) -> String {
        self.inner.display_seq()
    }
}

impl<R> Index<isize> for KhHomology<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    type Output = HomologySummand<R>;

    fn index(&self, i: isize) -> &Self::Output {
        self.get(i)
    }
}

/// `Kh(L) = ⊕ Kh^{i, j}(L)`, computed slice by slice
/// on the subcomplexes of fixed quantum degree `j`.
pub struct KhHomologyBigraded<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    summands: BTreeMap<(isize, isize), HomologySummand<R>>,
    zero: HomologySummand<R>
}

impl<R> KhHomologyBigraded<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    pub fn new(l: &Link) -> Self {
        let deg_shift = KhComplex::<R>::deg_shift_for(l);
        let cube = Arc::new(KhCube::new(l, deg_shift));
        let q_range = cube.q_range();

        let mut summands = BTreeMap::new();

        for j in q_range.step_by(2) {
            info!("compute Kh[*, {j}] of {}.", l.name());

            let c = KhComplex::<R>::q_slice_of(&cube, j);
            let h = c.into_inner().homology();

            for i in h.support() {
                let s = h.get(i);
                if !s.is_zero() {
                    summands.insert((i, j), s.clone());
                }
            }
        }

        let zero = HomologySummand::zero();
        Self { summands, zero }
    }

    /// Bidegrees of the non-zero summands.
    pub fn support(&self) -> impl Iterator<Item = (isize, isize)> + '_ {
        self.summands.keys().cloned()
    }

    pub fn h_range(&self) -> RangeInclusive<isize> {
        range_of(self.support().map(|(i, _)| i))
    }

    pub fn q_range(&self) -> RangeInclusive<isize> {
        range_of(self.support().map(|(_, j)| j))
    }

    pub fn get(&self, i: isize, j: isize) -> &HomologySummand<R> {
        self.summands.get(&(i, j)).unwrap_or(&self.zero)
    }

    pub fn rank(&self, i: isize, j: isize) -> usize {
        self.get(i, j).rank()
    }

    pub fn tors(&self, i: isize, j: isize) -> &[R] {
        self.get(i, j).tors()
    }

    /// The sum of the slices `Kh^{i, *}`, as `(rank, tors)`.
    pub fn collapse(&self, i: isize) -> (usize, Vec<R>) {
        self.summands.iter()
            .filter(|((i1, _), _)| *i1 == i)
            .fold((0, vec![]), |(r, mut t), (_, s)| {
                t.extend(s.tors().iter().cloned());
                (r + s.rank(), t)
            })
    }

    /// The table of `Kh^{i, j}`, with `i` in columns and `j` in rows,
    /// `j` descending.
    pub fn display_table(&self) -> String {
        let cols = self.support().map(|(i, _)| i).unique().sorted();
        let rows = self.support().map(|(_, j)| j).unique().sorted().rev();

        table("j\\i", rows, cols, |&j, &i| {
            let s = self.get(i, j);
            if s.is_zero() { String::from(".") } else { s.to_string() }
        })
    }

    pub fn print_table(&self) {
        info!("\n{}", self.display_table());
    }
}

impl<R> Index<(isize, isize)> for KhHomologyBigraded<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    type Output = HomologySummand<R>;

    fn index(&self, (i, j): (isize, isize)) -> &Self::Output {
        self.get(i, j)
    }
}

#[cfg(test)]
mod tests {
    use musubi::util::log::init_test_logger;
    use num_traits::Zero;
    use musubi::FF;
    use musubi_link::State;
    use crate::kh::{KhGen, KhTensor};
    use super::*;

    #[test]
    fn empty() {
        let h = KhHomology::<i32>::new(&Link::empty());
        assert_eq!(h.h_range(), 0..=0);
        assert_eq!(h.rank(0), 1);
        assert!(h[0].is_free());
    }

    #[test]
    fn unknot() {
        let h = KhHomology::<i32>::new(&Link::unknot());
        assert_eq!(h.h_range(), 0..=0);
        assert_eq!(h.rank(0), 2);
        assert!(h[0].is_free());
        assert!(h[1].is_zero());
        assert!(h[-1].is_zero());

        let h = KhHomology::<i32>::bigraded(&Link::unknot());
        assert_eq!(h.support().collect_vec(), vec![(0, -1), (0, 1)]);
        assert_eq!(h.rank(0, -1), 1);
        assert_eq!(h.rank(0, 1), 1);
    }

    #[test]
    fn unknot_classes() {
        let h = KhHomology::<i32>::new(&Link::unknot());
        let s = State::empty();
        let x = |t| KhChain::from(KhChainGen::new(s, KhTensor::from([t]), (0, 0)));

        let a = h.class(0, x(KhGen::I));
        let b = h.class(0, x(KhGen::X));

        assert!(!a.is_zero());
        assert!(!b.is_zero());
        assert_ne!(a, b);
        assert_eq!(&a + &b, &b + &a);
    }

    #[test]
    fn twist_unknot() {
        let h = KhHomology::<i32>::new(&Link::from_pd_code([[0, 0, 1, 1]]));
        assert_eq!(h.h_range(), 0..=0);
        assert_eq!(h.rank(0), 2);
        assert!(h[0].is_free());
    }

    #[test]
    fn unlink_2() {
        let h = KhHomology::<i32>::new(&Link::unlink(2));
        assert_eq!(h.rank(0), 4);

        let l = Link::from_pd_code([[1, 2, 3, 4], [3, 2, 1, 4]]);
        let h = KhHomology::<i32>::new(&l);
        assert_eq!(h.h_range(), 0..=0);
        assert_eq!(h.rank(0), 4);
    }

    #[test]
    fn trefoil() {
        init_test_logger();
        let h = KhHomology::<i32>::new(&Link::trefoil());

        assert_eq!(h.h_range(), -3..=0);

        assert_eq!(h[-3].rank(), 1);
        assert!(h[-3].is_free());

        assert_eq!(h[-2].rank(), 1);
        assert_eq!(h[-2].tors(), &[2]);

        assert!(h[-1].is_zero());

        assert_eq!(h[0].rank(), 2);
        assert!(h[0].is_free());
    }

    #[test]
    fn trefoil_mirror() {
        let h = KhHomology::<i32>::new(&Link::trefoil().mirror());

        assert_eq!(h.h_range(), 0..=3);

        assert_eq!(h[0].rank(), 2);
        assert!(h[0].is_free());

        assert!(h[1].is_zero());

        assert_eq!(h[2].rank(), 1);
        assert!(h[2].is_free());

        assert_eq!(h[3].rank(), 1);
        assert_eq!(h[3].tors(), &[2]);
    }

    #[test]
    fn trefoil_f2() {
        type F2 = FF<2>;
        let h = KhHomology::<F2>::new(&Link::trefoil());
        let ranks = (-3..=0).map(|i| h.rank(i)).collect_vec();
        assert_eq!(ranks, vec![2, 2, 0, 2]);
    }

    #[test]
    fn trefoil_f3() {
        type F3 = FF<3>;
        let h = KhHomology::<F3>::new(&Link::trefoil());
        let ranks = (-3..=0).map(|i| h.rank(i)).collect_vec();
        assert_eq!(ranks, vec![1, 1, 0, 2]);
    }

    #[test]
    fn figure8() {
        init_test_logger();
        let h = KhHomology::<i32>::new(&Link::figure8());

        assert_eq!(h.h_range(), -2..=2);

        assert_eq!(h[-2].rank(), 1);
        assert!(h[-2].is_free());

        assert_eq!(h[-1].rank(), 1);
        assert_eq!(h[-1].tors(), &[2]);

        assert_eq!(h[0].rank(), 2);
        assert!(h[0].is_free());

        assert_eq!(h[1].rank(), 1);
        assert!(h[1].is_free());

        assert_eq!(h[2].rank(), 1);
        assert_eq!(h[2].tors(), &[2]);
    }

    #[test]
    fn hopf_link() {
        let h = KhHomology::<i32>::new(&Link::hopf_link());

        assert_eq!(h.h_range(), -2..=0);
        assert_eq!(h[-2].rank(), 2);
        assert!(h[-2].is_free());
        assert!(h[-1].is_zero());
        assert_eq!(h[0].rank(), 2);
        assert!(h[0].is_free());
    }

    #[test]
    fn sequential() {
        musubi_homology::config::set_multithread_enabled(false);
        let h = KhHomology::<i32>::new(&Link::trefoil());
        musubi_homology::config::set_multithread_enabled(true);

        assert_eq!(h[-2].tors(), &[2]);
        assert_eq!(h[0].rank(), 2);
    }

    #[test]
    fn trefoil_gens() {
        let h = KhHomology::<i32>::new(&Link::trefoil());
        let c = h.inner().complex();

        for k in 0..2 {
            let z = h.gen(0, k);
            assert!(c.d(0, z.rep()).is_zero());
            assert!(!z.is_zero());
        }
        assert_ne!(h.gen(0, 0), h.gen(0, 1));

        let t = h.gen(-2, 1);
        assert!(!t.is_zero());
        assert!((&t * &2).is_zero());
    }

    #[test]
    fn bigraded_trefoil() {
        init_test_logger();
        let h = KhHomology::<i32>::bigraded(&Link::trefoil());

        assert_eq!(h.h_range(), -3..=0);
        assert_eq!(h.q_range(), -9..=-1);

        assert_eq!(h[(-3, -9)].rank(), 1);
        assert_eq!(h[(-2, -5)].rank(), 1);
        assert!(h[(-2, -5)].is_free());
        assert_eq!(h[(-2, -7)].rank(), 0);
        assert_eq!(h.tors(-2, -7), &[2]);
        assert_eq!(h.rank(0, -1), 1);
        assert_eq!(h.rank(0, -3), 1);
        assert_eq!(h.support().count(), 5);

        assert_eq!(h.collapse(-2), (1, vec![2]));
        assert_eq!(h.collapse(-1), (0, vec![]));
    }

    #[test]
    fn bigraded_agrees() {
        let l = Link::figure8();
        let h = KhHomology::<i32>::new(&l);
        let h2 = KhHomology::<i32>::bigraded(&l);

        for i in h.h_range() {
            let (r, t) = h2.collapse(i);
            assert_eq!(r, h.rank(i));
            assert_eq!(t, h.tors(i));
        }
    }

    #[test]
    fn bigraded_unlink() {
        let h = KhHomology::<i32>::bigraded(&Link::unlink(2));
        assert_eq!(h.rank(0, -2), 1);
        assert_eq!(h.rank(0, 0), 2);
        assert_eq!(h.rank(0, 2), 1);
    }

    #[test]
    fn table() {
        let h = KhHomology::<i32>::bigraded(&Link::trefoil());
        let t = h.display_table();
        let lines = t.lines().map(|l| l.split_whitespace().collect_vec()).collect_vec();

        assert_eq!(lines[0], vec!["j\\i", "-3", "-2", "0"]);
        assert_eq!(lines[1], vec!["-1", ".", ".", "Z"]);
        assert_eq!(lines.last().map(|l| l[0]), Some("-9"));
    }
}
