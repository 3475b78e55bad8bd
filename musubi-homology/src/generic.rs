use derive_more::Display;
use itertools::Either;
use musubi::{Elem, Ring, RingOps};
use musubi::lc::{Gen, Lc};
use musubi_matrix::dense::Mat;

use crate::ChainComplex;

/// The `j`-th generator in degree `i`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Debug, Default)]
#[display("e({_0},{_1})")]
pub struct EnumGen(pub isize, pub usize);

impl Elem for EnumGen {
    fn math_symbol() -> String {
        "E".into()
    }
}

impl Gen for EnumGen {}

pub type GenericChainComplex<R> = ChainComplex<EnumGen, R>;

impl<R> GenericChainComplex<R> 
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn mat<const N: usize>(shape: (usize, usize), entries: [i32; N]) -> Mat<R> { 
        Mat::from_data(shape, entries.into_iter().map(R::from))
    }

    /// The complex whose `k`-th differential is `mats[k]`, starting from degree `offset`.
    /// 
    /// `mats[k]` has one column for each generator in degree `offset + k`.
    pub fn from_mats(d_deg: isize, offset: isize, mats: Vec<Mat<R>>) -> Self { 
        let n = mats.len() as isize;
        let range = offset .. offset + n;
        let range = if d_deg > 0 { 
            Either::Left(range) 
        } else { 
            Either::Right(range.rev())
        };

        let bases = range.map(|i| { 
            let r = mats[(i - offset) as usize].ncols();
            (i, (0..r).map(|j| EnumGen(i, j)).collect())
        }).collect::<Vec<_>>();
        
        Self::new(bases, d_deg, move |i, x| {
            let d = &mats[(i - offset) as usize];
            let j = x.1;
            (0..d.nrows()).filter_map(|k| { 
                let a = &d[(k, j)];
                (!a.is_zero()).then(|| (EnumGen(i + d_deg, k), a.clone()))
            }).collect::<Lc<_, _>>()
        })
    }
    
    pub fn one() -> Self {
        Self::from_mats(-1, 0, vec![
            Self::mat((0, 1), [])
        ])
    }

    pub fn one_one(r: i32) -> Self {
        Self::from_mats(-1, 0, vec![
            Self::mat((0, 1), []),
            Self::mat((1, 1), [r])
        ])
    }

    pub fn two_one(r1: i32, r2: i32) -> Self {
        Self::from_mats(-1, 0, vec![
            Self::mat((0, 1), []),
            Self::mat((1, 2), [r1, r2])
        ])
    }

    /// Cellular chain complex of the 3-disk.
    pub fn d3() -> Self {
        Self::from_mats(-1, 0, vec![
            Self::mat((0, 4), []),
            Self::mat((4, 6), [
                -1, -1,  0, -1,  0,  0,
                 1,  0, -1,  0, -1,  0,
                 0,  1,  1,  0,  0, -1,
                 0,  0,  0,  1,  1,  1,
            ]),
            Self::mat((6, 4), [
                 1,  1,  0,  0,
                -1,  0,  1,  0,
                 1,  0,  0,  1,
                 0, -1, -1,  0,
                 0,  1,  0, -1,
                 0,  0,  1,  1,
            ]),
            Self::mat((4, 1), [
                -1,
                 1,
                -1,
                 1,
            ])
        ])
    }

    /// Cellular chain complex of the 2-sphere.
    pub fn s2() -> Self {
        Self::from_mats(-1, 0, vec![
            Self::mat((0, 4), []),
            Self::mat((4, 6), [
                -1, -1,  0, -1,  0,  0,
                 1,  0, -1,  0, -1,  0,
                 0,  1,  1,  0,  0, -1,
                 0,  0,  0,  1,  1,  1,
            ]),
            Self::mat((6, 4), [
                 1,  1,  0,  0,
                -1,  0,  1,  0,
                 1,  0,  0,  1,
                 0, -1, -1,  0,
                 0,  1,  0, -1,
                 0,  0,  1,  1,
            ])
        ])
    }

    /// Cellular chain complex of the real projective plane.
    pub fn rp2() -> Self {
        Self::from_mats(-1, 0, vec![
            Self::mat((0, 6), []),
            Self::mat((6, 15), [
                -1, -1,  0,  0,  0,  0,  0, -1, -1,  0, -1,  0,  0,  0,  0,
                 1,  0, -1, -1,  0, -1,  0,  0,  0,  0,  0, -1,  0,  0,  0,
                 0,  1,  1,  0, -1,  0,  0,  0,  0,  0,  0,  0,  0,  1, -1,
                 0,  0,  0,  1,  1,  0,  1,  1,  0, -1,  0,  0,  0,  0,  0,
                 0,  0,  0,  0,  0,  1, -1,  0,  1,  0,  0,  0, -1, -1,  0,
                 0,  0,  0,  0,  0,  0,  0,  0,  0,  1,  1,  1,  1,  0,  1,
            ]),
            Self::mat((15, 10), [
                 1,  0,  0,  0,  0,  1,  0,  0,  0,  0,
                -1,  0,  0,  0,  0,  0,  0,  0, -1,  0,
                 1,  1,  0,  0,  0,  0,  0,  0,  0,  0,
                 0, -1, -1,  0,  0,  0,  0,  0,  0,  0,
                 0,  1,  0,  0,  0,  0,  0,  0,  0,  1,
                 0,  0,  1,  0,  0,  0,  1,  0,  0,  0,
                 0,  0,  1,  1,  0,  0,  0,  0,  0,  0,
                 0,  0,  0, -1,  1,  0,  0,  0,  0,  0,
                 0,  0,  0,  1,  0,  0,  0,  0,  1,  0,
                 0,  0,  0,  0,  1,  0,  0,  0,  0,  1,
                 0,  0,  0,  0, -1, -1,  0,  0,  0,  0,
                 0,  0,  0,  0,  0,  1, -1,  0,  0,  0,
                 0,  0,  0,  0,  0,  0,  1, -1,  0,  0,
                 0,  0,  0,  0,  0,  0,  0,  1,  1,  0,
                 0,  0,  0,  0,  0,  0,  0,  1,  0, -1,
            ])
        ])
    }
}

#[cfg(test)]
mod tests { 
    use super::*;

    #[test]
    fn single() { 
        let c = GenericChainComplex::<i32>::one();
        assert_eq!(c.rank(0), 1);
        assert_eq!(c.chain_basis(0), &[EnumGen(0, 0)]);
        c.check_d_all();
    }

    #[test]
    fn one_to_one() { 
        let c = GenericChainComplex::<i32>::one_one(3);
        let d = c.d_gen(1, &EnumGen(1, 0));
        assert_eq!(d, Lc::from((EnumGen(0, 0), 3)));
        c.check_d_all();
    }

    #[test]
    fn cochain() { 
        let c = GenericChainComplex::<i32>::from_mats(1, 0, vec![
            GenericChainComplex::mat((1, 2), [1, -1]),
            GenericChainComplex::mat((0, 1), []),
        ]);
        assert_eq!(c.d_deg(), 1);
        assert_eq!(c.rank(0), 2);
        assert_eq!(c.rank(1), 1);
        assert_eq!(c.d_gen(0, &EnumGen(0, 1)), Lc::from((EnumGen(1, 0), -1)));
        c.check_d_all();
    }

    #[test]
    fn d3() {
        let c = GenericChainComplex::<i32>::d3();
        assert_eq!(c.rank(0), 4);
        assert_eq!(c.rank(1), 6);
        assert_eq!(c.rank(2), 4);
        assert_eq!(c.rank(3), 1);
        c.check_d_all();
    }

    #[test]
    fn s2() {
        let c = GenericChainComplex::<i32>::s2();
        assert_eq!(c.rank(0), 4);
        assert_eq!(c.rank(1), 6);
        assert_eq!(c.rank(2), 4);
        assert_eq!(c.rank(3), 0);
        c.check_d_all();
    }

    #[test]
    fn rp2() {
        let c = GenericChainComplex::<i32>::rp2();
        assert_eq!(c.rank(0), 6);
        assert_eq!(c.rank(1), 15);
        assert_eq!(c.rank(2), 10);
        c.check_d_all();
    }
}
