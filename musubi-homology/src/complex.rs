use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::sync::Arc;

use ahash::AHashMap;
use itertools::Itertools;
use log::{debug, info};
use num_traits::Zero;
use musubi::{Ring, RingOps};
use musubi::lc::{Gen, Lc};
use musubi::util::err::{Result, ensure};
use musubi_matrix::dense::Mat;

use crate::rmod_str_symbol;

#[cfg(feature = "multithread")]
use rayon::prelude::{IntoParallelIterator, ParallelIterator};

/// An ordered basis of a free module, with the index of each generator.
#[derive(Clone, Debug)]
pub struct ChainSummand<X>
where X: Gen {
    gens: Vec<X>,
    index: AHashMap<X, usize>
}

impl<X> ChainSummand<X>
where X: Gen {
    pub fn new(gens: Vec<X>) -> Self {
        let index = gens.iter().enumerate().map(|(i, x)| (x.clone(), i)).collect();
        Self { gens, index }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn rank(&self) -> usize {
        self.gens.len()
    }

    pub fn gens(&self) -> &[X] {
        &self.gens
    }

    pub fn gen(&self, i: usize) -> &X {
        &self.gens[i]
    }

    pub fn index_of(&self, x: &X) -> Option<usize> {
        self.index.get(x).copied()
    }

    /// Coordinates of `z` in this basis.
    pub fn vectorize<R>(&self, z: &Lc<X, R>) -> Vec<R>
    where R: Ring, for<'x> &'x R: RingOps<R> {
        let mut v = vec![R::zero(); self.rank()];
        for (x, r) in z.iter() {
            match self.index_of(x) {
                Some(i) => v[i] += r,
                None => debug_assert!(false, "{x} is not a generator of this summand.")
            }
        }
        v
    }

    pub fn as_chain<R>(&self, v: &[R]) -> Lc<X, R>
    where R: Ring, for<'x> &'x R: RingOps<R> {
        assert_eq!(v.len(), self.rank());
        self.gens.iter().zip(v.iter())
            .filter(|(_, r)| !r.is_zero())
            .map(|(x, r)| (x.clone(), r.clone()))
            .collect()
    }
}

/// A chain complex of free `R`-modules with ordered bases,
/// the differential given on generators.
///
/// `d_deg = -1` for the homological convention and `+1` for the cohomological one.
/// All degrees outside the support are zero.
#[derive(Clone)]
pub struct ChainComplex<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    summands: BTreeMap<isize, ChainSummand<X>>,
    empty: ChainSummand<X>,
    d_deg: isize,
    d_map: Arc<dyn Fn(isize, &X) -> Lc<X, R> + Send + Sync>,
}

impl<X, R> ChainComplex<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>,
{
    pub fn new<I, F>(bases: I, d_deg: isize, d_map: F) -> Self
    where
        I: IntoIterator<Item = (isize, Vec<X>)>,
        F: Fn(isize, &X) -> Lc<X, R> + Send + Sync + 'static
    {
        assert!(d_deg == 1 || d_deg == -1);

        let summands = bases.into_iter()
            .map(|(i, gens)| (i, ChainSummand::new(gens)))
            .collect();
        let empty = ChainSummand::empty();
        let d_map = Arc::new(d_map);

        Self { summands, empty, d_deg, d_map }
    }

    pub fn zero() -> Self {
        Self::new([], -1, |_, _| Lc::zero())
    }

    pub fn d_deg(&self) -> isize {
        self.d_deg
    }

    /// Degrees with a (possibly empty) basis, in ascending order.
    pub fn support(&self) -> impl Iterator<Item = isize> + '_ {
        self.summands.keys().cloned()
    }

    pub fn range(&self) -> Option<RangeInclusive<isize>> {
        let min = *self.summands.keys().next()?;
        let max = *self.summands.keys().next_back()?;
        Some(min ..= max)
    }

    pub fn is_supported(&self, i: isize) -> bool {
        self.summands.contains_key(&i)
    }

    pub fn summand(&self, i: isize) -> &ChainSummand<X> {
        self.summands.get(&i).unwrap_or(&self.empty)
    }

    pub fn chain_basis(&self, i: isize) -> &[X] {
        self.summand(i).gens()
    }

    pub fn rank(&self, i: isize) -> usize {
        self.summand(i).rank()
    }

    pub fn d_gen(&self, i: isize, x: &X) -> Lc<X, R> {
        if self.is_supported(i) && self.is_supported(i + self.d_deg) {
            (self.d_map)(i, x)
        } else {
            Lc::zero()
        }
    }

    pub fn d(&self, i: isize, z: &Lc<X, R>) -> Lc<X, R> {
        z.apply(|x| self.d_gen(i, x))
    }

    pub fn vectorize(&self, i: isize, z: &Lc<X, R>) -> Vec<R> {
        self.summand(i).vectorize(z)
    }

    pub fn as_chain(&self, i: isize, v: &[R]) -> Lc<X, R> {
        self.summand(i).as_chain(v)
    }

    /// The matrix of `d: C[i] → C[i + d_deg]`. Out of the support it is a zero matrix.
    pub fn d_matrix(&self, i: isize) -> Mat<R> {
        let m = self.rank(i + self.d_deg);
        let n = self.rank(i);

        debug!("d[{i}]: {n} -> {m}");

        let mut a = Mat::zero((m, n));

        if m == 0 || n == 0 {
            return a
        }

        for (j, col) in self.d_matrix_cols(i).into_iter().enumerate() {
            for (k, r) in col.into_iter().enumerate() {
                if !r.is_zero() {
                    a[(k, j)] = r;
                }
            }
        }

        a
    }

    fn d_matrix_cols(&self, i: isize) -> Vec<Vec<R>> {
        let n = self.rank(i);

        cfg_if::cfg_if! {
            if #[cfg(feature = "multithread")] {
                if crate::config::is_multithread_enabled() {
                    return (0..n).into_par_iter().map(|j|
                        self.d_matrix_col(i, j)
                    ).collect()
                }
            }
        }

        (0..n).map(|j| self.d_matrix_col(i, j)).collect()
    }

    #[inline(never)] // for profilability
    fn d_matrix_col(&self, i: isize, j: usize) -> Vec<R> {
        let x = self.summand(i).gen(j);
        let dx = self.d_gen(i, x);
        self.vectorize(i + self.d_deg, &dx)
    }

    /// Checks `d ∘ d = 0` on every generator of `C[i]`.
    pub fn validate_d_at(&self, i: isize) -> Result<()> {
        let i1 = i + self.d_deg;
        if !(self.is_supported(i) && self.is_supported(i1)) {
            return Ok(())
        }

        for x in self.chain_basis(i) {
            let dx = self.d_gen(i, x);
            let ddx = self.d(i1, &dx);
            ensure!(ddx.is_zero(), "d² is non-zero at {i}: d²({x}) = {ddx}.");
        }

        Ok(())
    }

    pub fn validate_d_all(&self) -> Result<()> {
        self.support().try_for_each(|i| self.validate_d_at(i))
    }

    pub fn check_d_all(&self) {
        if let Err(e) = self.validate_d_all() {
            panic!("{e}")
        }
    }

    pub fn display_d_at(&self, i: isize) -> String {
        let c = |i| rmod_str_symbol::<R>(self.rank(i), &[], "0");
        let d = self.d_matrix(i);
        format!("d[{i}]: {} -> {}\n{d}", c(i), c(i + self.d_deg))
    }

    pub fn display_seq(&self) -> String {
        self.support().map(|i|
            format!("C[{i}]: {}", rmod_str_symbol::<R>(self.rank(i), &[], "0"))
        ).join("\n")
    }

    pub fn print_seq(&self) {
        info!("\n{}", self.display_seq());
    }
}
