use musubi::{Ring, RingOps};
use musubi_matrix::dense::Mat;

/// A pair of maps `f: Rⁿ → Rᵐ`, `g: Rᵐ → Rⁿ` with `f ∘ g = id` on the free part.
/// 
/// `f` sends a cycle to its coordinates in the chosen generators of the homology,
/// and `g` sends the `i`-th unit vector to a representative of the `i`-th generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trans<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    forward: Mat<R>,
    backward: Mat<R>
}

impl<R> Trans<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    pub fn new(forward: Mat<R>, backward: Mat<R>) -> Self { 
        assert_eq!(forward.nrows(), backward.ncols());
        assert_eq!(forward.ncols(), backward.nrows());
        Self { forward, backward }
    }

    pub fn id(n: usize) -> Self { 
        Self::new(Mat::id(n), Mat::id(n))
    }

    pub fn zero(n: usize) -> Self { 
        Self::new(Mat::zero((0, n)), Mat::zero((n, 0)))
    }

    pub fn src_dim(&self) -> usize { 
        self.forward.ncols()
    }

    pub fn tgt_dim(&self) -> usize { 
        self.forward.nrows()
    }

    pub fn forward_mat(&self) -> &Mat<R> { 
        &self.forward
    }

    pub fn backward_mat(&self) -> &Mat<R> { 
        &self.backward
    }

    pub fn forward(&self, v: &[R]) -> Vec<R> { 
        self.forward.mul_vec(v)
    }

    pub fn backward(&self, v: &[R]) -> Vec<R> { 
        self.backward.mul_vec(v)
    }
}
