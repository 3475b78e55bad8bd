use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Index;

use derive_more::{Display, Debug};
use itertools::Itertools;
use musubi::{Elem, Ring, RingOps};
use musubi::bitseq::{Bit, BitSeq};
use musubi::lc::{Gen, Lc};
use musubi::util::format::subscript;
use musubi_link::State;

/// A basis element of the Frobenius algebra `A = R[X]/(X²)`
/// assigned to each circle: the unit `1` or the marked element `X`.
/// Ordered `X < 1`, as in the bit packing of [`KhTensor`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Display, Debug)]
pub enum KhGen {
    #[display("X")]
    #[debug("X")]
    X,

    #[default]
    #[display("1")]
    #[debug("1")]
    I
}

impl KhGen {
    #[allow(non_snake_case)]
    pub fn is_X(&self) -> bool {
        self == &KhGen::X
    }

    pub fn is_1(&self) -> bool {
        self == &KhGen::I
    }

    /// `deg(1) = 1`, `deg(X) = -1`.
    pub fn deg(&self) -> isize {
        match self {
            KhGen::I =>  1,
            KhGen::X => -1
        }
    }

    fn as_bit(&self) -> Bit {
        if self.is_X() { Bit::Bit0 } else { Bit::Bit1 }
    }

    fn from_bit(b: Bit) -> Self {
        if b.is_zero() { KhGen::X } else { KhGen::I }
    }
}

impl Elem for KhGen {
    fn math_symbol() -> String {
        String::from("A")
    }
}

impl Gen for KhGen {}

/// An ordered tensor product `x₁ ⊗ … ⊗ x_r` of algebra generators,
/// one factor per circle. Packed into bits with `X = 0`, `1 = 1`;
/// tensors of equal length compare factorwise from the left.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KhTensor(BitSeq);

impl KhTensor {
    pub fn empty() -> Self {
        Self(BitSeq::empty())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = KhGen> + '_ {
        self.0.iter().map(KhGen::from_bit)
    }

    /// Sum of the factor degrees.
    pub fn deg(&self) -> isize {
        self.iter().map(|x| x.deg()).sum()
    }

    pub fn push(&mut self, x: KhGen) {
        self.0.push(x.as_bit())
    }

    pub fn remove(&mut self, i: usize) {
        self.0.remove(i)
    }

    pub fn insert(&mut self, i: usize, x: KhGen) {
        self.0.insert(i, x.as_bit())
    }

    /// All tensors of length `len`, fewer `1`s first.
    pub fn generate(len: usize) -> impl Iterator<Item = Self> {
        BitSeq::generate(len).into_iter().map(KhTensor)
    }
}

impl<const N: usize> From<[KhGen; N]> for KhTensor {
    fn from(xs: [KhGen; N]) -> Self {
        Self::from_iter(xs)
    }
}

impl FromIterator<KhGen> for KhTensor {
    fn from_iter<I: IntoIterator<Item = KhGen>>(iter: I) -> Self {
        Self(iter.into_iter().map(|x| x.as_bit()).collect())
    }
}

impl Index<usize> for KhTensor {
    type Output = KhGen;

    fn index(&self, i: usize) -> &Self::Output {
        if self.0[i].is_zero() {
            &KhGen::X
        } else {
            &KhGen::I
        }
    }
}

impl fmt::Display for KhTensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("1")
        } else {
            f.write_str(&self.iter().join("⊗"))
        }
    }
}

impl fmt::Debug for KhTensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Elem for KhTensor {
    fn math_symbol() -> String {
        String::from("KhT")
    }
}

impl Gen for KhTensor {}

/// A generator of the Khovanov complex: a state of the cube
/// with a tensor labelling each of its circles.
///
/// Equality ignores `deg_shift`, which is common to all
/// generators of one complex. Generators are ordered by state,
/// then by degree, then by tensor.
#[derive(Clone, Copy, Default)]
pub struct KhChainGen {
    pub state: State,
    pub tensor: KhTensor,
    pub deg_shift: (isize, isize)
}

impl KhChainGen {
    pub fn new(state: State, tensor: KhTensor, deg_shift: (isize, isize)) -> KhChainGen {
        KhChainGen { state, tensor, deg_shift }
    }

    pub fn h_deg(&self) -> isize {
        let h0 = self.deg_shift.0;
        let s = self.state.weight() as isize;
        h0 + s
    }

    pub fn q_deg(&self) -> isize {
        let q0 = self.deg_shift.1;
        let d = self.tensor.deg();
        let s = self.state.weight() as isize;
        q0 + d + s
    }
}

impl PartialEq for KhChainGen {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state && self.tensor == other.tensor
    }
}

impl Eq for KhChainGen {}

impl Hash for KhChainGen {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.state.hash(state);
        self.tensor.hash(state);
    }
}

impl PartialOrd for KhChainGen {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for KhChainGen {
    fn cmp(&self, other: &Self) -> Ordering {
        self.state.cmp(&other.state)
            .then_with(|| self.tensor.deg().cmp(&other.tensor.deg()))
            .then_with(|| self.tensor.cmp(&other.tensor))
    }
}

impl Elem for KhChainGen {
    fn math_symbol() -> String {
        String::from("Kh")
    }
}

impl fmt::Display for KhChainGen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.state.iter().map(|b| subscript(b.as_u64() as isize)).join("");
        write!(f, "({}){s}", self.tensor)
    }
}

impl fmt::Debug for KhChainGen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Gen for KhChainGen {}

pub type KhChain<R> = Lc<KhChainGen, R>;

pub trait KhChainExt {
    fn h_deg(&self) -> isize;
    fn q_deg(&self) -> isize;
}

impl<R> KhChainExt for KhChain<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn h_deg(&self) -> isize {
        self.gens().map(|x| x.h_deg()).min().unwrap_or(0)
    }

    fn q_deg(&self) -> isize {
        self.gens().map(|x| x.q_deg()).min().unwrap_or(0)
    }
}
