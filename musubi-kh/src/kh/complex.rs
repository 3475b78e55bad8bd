use std::ops::RangeInclusive;
use std::sync::Arc;

use delegate::delegate;
use itertools::Itertools;
use musubi::{Ring, RingOps, EucRing, EucRingOps};
use musubi::util::err::Result;
use musubi_homology::ChainComplex;
use musubi_link::Link;
use musubi_matrix::dense::Mat;

use crate::kh::{KhChain, KhChainGen, KhCube, KhHomology};
use crate::misc::range_of;

/// The Khovanov complex `CKh(L)`, with `d` raising
/// the homological degree by one.
#[derive(Clone)]
pub struct KhComplex<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    inner: ChainComplex<KhChainGen, R>,
    deg_shift: (isize, isize)
}

impl<R> KhComplex<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    pub fn new(l: &Link) -> Self {
        let deg_shift = Self::deg_shift_for(l);
        let cube = KhCube::new(l, deg_shift);
        let inner = cube.into_complex();
        Self { inner, deg_shift }
    }

    /// The subcomplex of `CKh(L)` spanned by generators of quantum degree `q`.
    pub fn q_slice(l: &Link, q: isize) -> Self {
        let deg_shift = Self::deg_shift_for(l);
        let cube = Arc::new(KhCube::new(l, deg_shift));
        Self::q_slice_of(&cube, q)
    }

    pub(crate) fn q_slice_of(cube: &Arc<KhCube>, q: isize) -> Self {
        let deg_shift = cube.deg_shift();
        let inner = KhCube::complex_where(cube, |x| x.q_deg() == q);
        Self { inner, deg_shift }
    }

    /// `(h₀, q₀) = (-n⁻, n⁺ - 2n⁻)`.
    pub fn deg_shift_for(l: &Link) -> (isize, isize) {
        let (n_pos, n_neg) = l.signed_crossing_nums();
        let (n_pos, n_neg) = (n_pos as isize, n_neg as isize);
        (-n_neg, n_pos - 2 * n_neg)
    }

    pub fn deg_shift(&self) -> (isize, isize) {
        self.deg_shift
    }

    pub fn h_range(&self) -> RangeInclusive<isize> {
        range_of(self.inner.support())
    }

    pub fn q_range(&self) -> RangeInclusive<isize> {
        range_of(self.inner.support().flat_map(|i|
            self.inner.chain_basis(i).iter().map(|x| x.q_deg()).collect_vec()
        ))
    }

    pub fn inner(&self) -> &ChainComplex<KhChainGen, R> {
        &self.inner
    }

    pub fn into_inner(self) -> ChainComplex<KhChainGen, R> {
        self.inner
    }

    delegate! {
        to self.inner {
            pub fn rank(&self, i: isize) -> usize;
            pub fn chain_basis(&self, i: isize) -> &[KhChainGen];
            pub fn d(&self, i: isize, z: &KhChain<R>) -> KhChain<R>;
            pub fn d_matrix(&self, i: isize) -> Mat<R>;
            pub fn validate_d_all(&self) -> Result<()>;
            pub fn check_d_all(&self);
            pub fn display_seq(&self) -> String;
            pub fn print_seq(&self);
        }
    }
}

impl<R> KhComplex<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    pub fn homology(self) -> KhHomology<R> {
        KhHomology::from_complex(self)
    }
}
