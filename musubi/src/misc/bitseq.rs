use std::cmp::Ordering;
use std::fmt;
use std::ops::Index;

use derive_more::{Display, Debug};
use itertools::Itertools;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Display, Default)]
pub enum Bit { 
    #[default]
    #[display("0")]
    #[debug("0")]
    Bit0, 

    #[display("1")]
    #[debug("1")]
    Bit1
}

impl Bit { 
    pub fn is_zero(&self) -> bool { 
        self == &Bit::Bit0
    }

    pub fn is_one(&self) -> bool { 
        self == &Bit::Bit1
    }

    pub fn as_u64(&self) -> u64 { 
        if self.is_zero() { 0 } else { 1 }
    }
}

impl From<bool> for Bit {
    fn from(b: bool) -> Self {
        if b { Bit::Bit1 } else { Bit::Bit0 }
    }
}

macro_rules! impl_bit_from_int {
    ($t:ty) => {
        impl From<$t> for Bit {
            fn from(val: $t) -> Self {
                match val { 
                    0 => Bit::Bit0,
                    1 => Bit::Bit1,
                    _ => panic!("invalid bit: {val}")
                }
            }
        }
    };
}

impl_bit_from_int!(u8);
impl_bit_from_int!(u32);
impl_bit_from_int!(u64);
impl_bit_from_int!(usize);
impl_bit_from_int!(i32);

/// A bit sequence of length at most 64. `self[0]` is the first (leftmost) bit.
/// 
/// Sequences are ordered by length, then lexicographically.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BitSeq { 
    val: u64,
    len: usize
}

impl BitSeq { 
    pub const MAX_LEN: usize = 64;

    fn new(val: u64, len: usize) -> Self { 
        assert!(len <= Self::MAX_LEN);
        debug_assert!(len == Self::MAX_LEN || val >> len == 0);
        Self { val, len }
    }

    pub fn empty() -> Self { 
        Self::new(0, 0)
    }

    pub fn zeros(len: usize) -> Self { 
        Self::new(0, len)
    }

    pub fn ones(len: usize) -> Self { 
        let val = if len == Self::MAX_LEN { u64::MAX } else { (1 << len) - 1 };
        Self::new(val, len)
    }

    pub fn len(&self) -> usize { 
        self.len
    }

    pub fn is_empty(&self) -> bool { 
        self.len == 0
    } 

    pub fn weight(&self) -> usize { 
        self.val.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = Bit> + '_ {
        (0..self.len).map(|i| self[i])
    }

    pub fn set(&mut self, i: usize, b: Bit) {
        assert!(i < self.len);
        if b.is_zero() { 
            self.val &= !(1 << i);
        } else { 
            self.val |= 1 << i;
        }
    }

    pub fn push(&mut self, b: Bit) {
        assert!(self.len < Self::MAX_LEN);
        if b.is_one() { 
            self.val |= 1 << self.len;
        }
        self.len += 1;
    }

    /// Removes the `i`-th bit, shifting the later ones down.
    pub fn remove(&mut self, i: usize) { 
        assert!(i < self.len);
        let lo = self.val & ((1 << i) - 1);
        let hi = (self.val >> 1) & !((1 << i) - 1);
        self.val = hi | lo;
        self.len -= 1;
    }

    pub fn insert(&mut self, i: usize, b: Bit) { 
        assert!(i <= self.len);
        assert!(self.len < Self::MAX_LEN);
        let mask = (1 << i) - 1;
        let lo = self.val & mask;
        let hi = (self.val & !mask) << 1;
        self.val = hi | (b.as_u64() << i) | lo;
        self.len += 1;
    }

    pub fn edit<F>(&self, f: F) -> Self
    where F: FnOnce(&mut BitSeq) {
        let mut copy = *self;
        f(&mut copy);
        copy
    }

    /// Number of `1`s strictly before position `i`.
    pub fn count_ones_before(&self, i: usize) -> usize { 
        assert!(i <= self.len);
        let mask = if i == Self::MAX_LEN { u64::MAX } else { (1 << i) - 1 };
        (self.val & mask).count_ones() as usize
    }

    /// Positions where `self` and `other` differ.
    pub fn diff_indices(&self, other: &Self) -> Vec<usize> { 
        assert_eq!(self.len, other.len);
        let d = self.val ^ other.val;
        (0..self.len).filter(|&i| (d >> i) & 1 == 1).collect()
    }

    pub fn is_adjacent(&self, other: &Self) -> bool { 
        self.len == other.len && (self.val ^ other.val).count_ones() == 1
    }

    /// All sequences of length `len`, sorted by weight and then lexicographically.
    pub fn generate(len: usize) -> Vec<BitSeq> {
        assert!(len < Self::MAX_LEN);
        (0..(1_u64 << len))
            .map(|v| Self::new(v, len))
            .sorted_by(|a, b| a.weight().cmp(&b.weight()).then(a.cmp(b)))
            .collect()
    }

    /// All sequences of length `len` with exactly `k` ones, sorted lexicographically.
    pub fn generate_weight(len: usize, k: usize) -> Vec<BitSeq> {
        assert!(len < Self::MAX_LEN);
        if k > len { 
            return vec![]
        }
        (0..len).combinations(k).map(|ones| { 
            let val = ones.into_iter().fold(0, |v, i| v | (1 << i));
            Self::new(val, len)
        }).sorted().collect()
    }
}

impl<T> FromIterator<T> for BitSeq
where Bit: From<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut b = Self::empty();
        for x in iter.into_iter() {
            b.push(Bit::from(x));
        }
        b
    }
}

impl<T, const N: usize> From<[T; N]> for BitSeq 
where Bit: From<T> {
    fn from(value: [T; N]) -> Self {
        Self::from_iter(value)
    }
}

impl Index<usize> for BitSeq {
    type Output = Bit;

    fn index(&self, i: usize) -> &Self::Output {
        assert!(i < self.len);
        if (self.val >> i) & 1 == 0 { 
            &Bit::Bit0
        } else {
            &Bit::Bit1
        }
    }
}

impl fmt::Display for BitSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.iter() { 
            fmt::Display::fmt(&b, f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for BitSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl PartialOrd for BitSeq {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BitSeq {
    fn cmp(&self, other: &Self) -> Ordering {
        self.len.cmp(&other.len).then_with(|| { 
            let d = self.val ^ other.val;
            if d == 0 { 
                Ordering::Equal
            } else { 
                // first differing position decides.
                let i = d.trailing_zeros();
                if (self.val >> i) & 1 == 0 { Ordering::Less } else { Ordering::Greater }
            }
        })
    }
}
