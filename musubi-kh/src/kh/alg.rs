use num_traits::Zero;
use musubi::{Ring, RingOps};
use musubi::lc::Lc;

use crate::kh::{KhGen, KhTensor};

/// The Frobenius algebra `A = R[X]/(X²)` with
///
/// ```text
///   m(1 ⊗ 1) = 1,   m(1 ⊗ X) = m(X ⊗ 1) = X,   m(X ⊗ X) = 0,
///   Δ(1) = 1 ⊗ X + X ⊗ 1,   Δ(X) = X ⊗ X.
/// ```
pub struct KhAlg;

impl KhAlg {
    pub fn prod<R>(x: KhGen, y: KhGen) -> Lc<KhGen, R>
    where R: Ring, for<'x> &'x R: RingOps<R> {
        use KhGen::{I, X};

        match (x, y) {
            (I, I) => Lc::from(I),
            (X, I) | (I, X) => Lc::from(X),
            (X, X) => Lc::zero()
        }
    }

    pub fn coprod<R>(x: KhGen) -> Lc<KhTensor, R>
    where R: Ring, for<'x> &'x R: RingOps<R> {
        use KhGen::{I, X};
        let tsr = |x, y| KhTensor::from([x, y]);

        match x {
            I => Lc::from_iter([
                (tsr(I, X), R::one()),
                (tsr(X, I), R::one())
            ]),
            X => Lc::from(tsr(X, X))
        }
    }

    /// Multiplies the factors at `in_index`, putting the result at `out_index`.
    pub fn prod_tensor<R>(x: &KhTensor, in_index: (usize, usize), out_index: usize) -> Lc<KhTensor, R>
    where R: Ring, for<'x> &'x R: RingOps<R> {
        assert_ne!(in_index.0, in_index.1);

        let (i, j) = if in_index.0 < in_index.1 {
            in_index
        } else {
            (in_index.1, in_index.0)
        };
        let k = out_index;

        Self::prod::<R>(x[i], x[j]).map_gens(|&a| {
            let mut y = *x;
            y.remove(j);
            y.remove(i);
            y.insert(k, a);
            y
        })
    }

    /// Splits the factor at `in_index` into the two positions `out_index`.
    pub fn coprod_tensor<R>(x: &KhTensor, in_index: usize, out_index: (usize, usize)) -> Lc<KhTensor, R>
    where R: Ring, for<'x> &'x R: RingOps<R> {
        assert_ne!(out_index.0, out_index.1);

        let i = in_index;
        let (j, k) = if out_index.0 < out_index.1 {
            out_index
        } else {
            (out_index.1, out_index.0)
        };

        Self::coprod::<R>(x[i]).map_gens(|a| {
            let mut y = *x;
            y.remove(i);
            y.insert(j, a[0]);
            y.insert(k, a[1]);
            y
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use KhGen::{I, X};

    #[test]
    fn prod() {
        assert_eq!(KhAlg::prod(I, I), Lc::from((I, 1)));
        assert_eq!(KhAlg::prod(X, I), Lc::from((X, 1)));
        assert_eq!(KhAlg::prod(I, X), Lc::from((X, 1)));

        let z = KhAlg::prod::<i32>(X, X);
        assert!(z.is_zero());
        assert_eq!(z.nterms(), 0);
    }

    #[test]
    fn coprod() {
        assert_eq!(KhAlg::coprod(I), Lc::from_iter([
            (KhTensor::from([X, I]), 1),
            (KhTensor::from([I, X]), 1),
        ]));
        assert_eq!(KhAlg::coprod(X), Lc::from(
            (KhTensor::from([X, X]), 1)
        ));
    }

    #[test]
    fn prod_tensor() {
        let x = KhTensor::from([X, I, I, X]);

        assert_eq!(
            KhAlg::prod_tensor(&x, (1, 2), 0),
            Lc::from((KhTensor::from([I, X, X]), 1))
        );
        assert_eq!(
            KhAlg::prod_tensor(&x, (3, 1), 2),
            Lc::from((KhTensor::from([X, I, X]), 1))
        );
        assert!(KhAlg::prod_tensor::<i32>(&x, (0, 3), 1).is_zero());
    }

    #[test]
    fn coprod_tensor() {
        let x = KhTensor::from([X, I]);

        assert_eq!(
            KhAlg::coprod_tensor(&x, 1, (0, 2)),
            Lc::from_iter([
                (KhTensor::from([I, X, X]), 1),
                (KhTensor::from([X, X, I]), 1),
            ])
        );
        assert_eq!(
            KhAlg::coprod_tensor(&x, 0, (2, 1)),
            Lc::from((KhTensor::from([I, X, X]), 1))
        );
    }

    #[test]
    fn prod_coprod() {
        // m ∘ Δ = 2X on 1 and 0 on X.
        let f = |x: &KhTensor| KhAlg::prod_tensor::<i32>(x, (0, 1), 0);

        let z = KhAlg::coprod_tensor::<i32>(&KhTensor::from([I]), 0, (0, 1));
        assert_eq!(z.apply(f), Lc::from((KhTensor::from([X]), 2)));

        let z = KhAlg::coprod_tensor::<i32>(&KhTensor::from([X]), 0, (0, 1));
        assert!(z.apply(f).is_zero());
    }
}
