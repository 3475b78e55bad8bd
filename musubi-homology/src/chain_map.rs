use std::collections::BTreeSet;
use std::sync::Arc;

use num_traits::Zero;
use musubi::{Ring, RingOps};
use musubi::lc::{Gen, Lc};
use musubi::util::err::{Result, ensure};

use crate::ChainComplex;

/// A map between chain complexes given on generators,
/// raising the degree by `deg`.
#[derive(Clone)]
pub struct ChainMap<X, Y, R>
where
    X: Gen, Y: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    deg: isize,
    map: Arc<dyn Fn(isize, &X) -> Lc<Y, R> + Send + Sync>,
}

impl<X, Y, R> ChainMap<X, Y, R>
where
    X: Gen, Y: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    pub fn new<F>(deg: isize, map: F) -> Self
    where F: Fn(isize, &X) -> Lc<Y, R> + Send + Sync + 'static {
        let map = Arc::new(map);
        Self { deg, map }
    }

    pub fn zero(deg: isize) -> Self {
        Self::new(deg, |_, _| Lc::zero())
    }

    pub fn deg(&self) -> isize {
        self.deg
    }

    pub fn apply_gen(&self, i: isize, x: &X) -> Lc<Y, R> {
        (self.map)(i, x)
    }

    pub fn apply(&self, i: isize, z: &Lc<X, R>) -> Lc<Y, R> {
        z.apply(|x| self.apply_gen(i, x))
    }

    /// Checks `d' ∘ f = f ∘ d` on every generator of `source[i]`.
    pub fn validate_at(&self, source: &ChainComplex<X, R>, target: &ChainComplex<Y, R>, i: isize) -> Result<()> {
        let d_deg = source.d_deg();
        for x in source.chain_basis(i) {
            let dx = source.d_gen(i, x);
            let fdx = self.apply(i + d_deg, &dx);
            let fx = self.apply_gen(i, x);
            let dfx = target.d(i + self.deg, &fx);
            ensure!(dfx == fdx, "df != fd at {i} for x = {x}: df(x) = {dfx}, fd(x) = {fdx}.");
        }
        Ok(())
    }

    /// Checks the naturality square over the union of the supports of both complexes.
    pub fn validate(&self, source: &ChainComplex<X, R>, target: &ChainComplex<Y, R>) -> Result<()> {
        ensure!(
            source.d_deg() == target.d_deg(),
            "d_deg mismatch: {} != {}.", source.d_deg(), target.d_deg()
        );

        let degs: BTreeSet<isize> = source.support().chain(
            target.support().map(|i| i - self.deg)
        ).collect();

        degs.into_iter().try_for_each(|i|
            self.validate_at(source, target, i)
        )
    }

    pub fn assert_chain_map(&self, source: &ChainComplex<X, R>, target: &ChainComplex<Y, R>) {
        if let Err(e) = self.validate(source, target) {
            panic!("{e}")
        }
    }

    /// `g ∘ self`.
    pub fn compose<Z>(&self, g: &ChainMap<Y, Z, R>) -> ChainMap<X, Z, R>
    where Z: Gen {
        let (f, g) = (self.clone(), g.clone());
        let deg = f.deg + g.deg;

        ChainMap::new(deg, move |i, x| {
            let y = f.apply_gen(i, x);
            g.apply(i + f.deg, &y)
        })
    }
}

impl<X, R> ChainMap<X, X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    pub fn id() -> Self {
        Self::new(0, |_, x| Lc::from(x.clone()))
    }
}
