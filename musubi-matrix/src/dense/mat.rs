use std::ops::{Index, IndexMut, Mul, MulAssign, Range};
use auto_impl_ops::auto_ops;
use derive_more::Display;
use ndarray::{s, Array2};
use musubi::{Ring, RingOps};

/// Dense matrix over a ring `R`, backed by `ndarray`.
#[derive(Clone, Debug, Display, PartialEq, Eq)]
#[display("{inner}")]
pub struct Mat<R> {
    inner: Array2<R>
}

impl<R> Mat<R> {
    pub fn shape(&self) -> (usize, usize) {
        self.inner.dim()
    }

    pub fn nrows(&self) -> usize { 
        self.inner.nrows()
    }

    pub fn ncols(&self) -> usize { 
        self.inner.ncols()
    }

    pub fn is_square(&self) -> bool { 
        let (m, n) = self.shape();
        m == n
    }

    pub fn inner(&self) -> &Array2<R> {
        &self.inner
    }

    pub fn into_inner(self) -> Array2<R> {
        self.inner
    }

    /// Iterates over `(i, j, a_ij)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &R)> { 
        self.inner.indexed_iter().map(|((i, j), a)| (i, j, a))
    }
}

impl<R> Mat<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    /// Row-major data. 
    pub fn from_data<I>(shape: (usize, usize), data: I) -> Self
    where I: IntoIterator, I::Item: Into<R> { 
        let (m, n) = shape;
        let data: Vec<R> = data.into_iter().map(|a| a.into()).collect();
        assert_eq!(data.len(), m * n, "data length does not match shape {m}x{n}");

        let inner = Array2::from_shape_fn(shape, |(i, j)| data[i * n + j].clone());
        Self::from(inner)
    }

    pub fn zero(shape: (usize, usize)) -> Self { 
        Self::from(Array2::zeros(shape))
    }

    pub fn is_zero(&self) -> bool { 
        self.inner.iter().all(|a| a.is_zero())
    }

    pub fn id(size: usize) -> Self { 
        Self::diag((size, size), (0..size).map(|_| R::one()))
    }

    pub fn is_id(&self) -> bool { 
        self.is_square() && self.iter().all(|(i, j, a)| 
            i == j && a.is_one() || 
            i != j && a.is_zero()
        )
    }

    pub fn diag<I>(shape: (usize, usize), entries: I) -> Self
    where I: IntoIterator<Item = R> {
        let mut mat = Self::zero(shape);
        for (i, a) in entries.into_iter().enumerate() {
            mat[(i, i)] = a;
        }
        mat
    }

    pub fn is_diag(&self) -> bool { 
        self.iter().all(|(i, j, a)| i == j || a.is_zero())
    }

    pub fn submat(&self, rows: Range<usize>, cols: Range<usize>) -> Self { 
        assert!(rows.start <= rows.end && rows.end <= self.nrows());
        assert!(cols.start <= cols.end && cols.end <= self.ncols());

        let view = self.inner.slice(s![rows, cols]);
        Self::from(view.to_owned())
    }

    pub fn submat_rows(&self, rows: Range<usize>) -> Self { 
        let n = self.ncols();
        self.submat(rows, 0 .. n)
    }

    pub fn submat_cols(&self, cols: Range<usize>) -> Self { 
        let m = self.nrows();
        self.submat(0 .. m, cols)
    }

    /// Vertical concatenation `[self; other]`.
    pub fn stack(&self, other: &Self) -> Self { 
        assert_eq!(self.ncols(), other.ncols());

        let (m, n) = (self.nrows(), self.ncols());
        let inner = Array2::from_shape_fn((m + other.nrows(), n), |(i, j)| 
            if i < m { self[(i, j)].clone() } else { other[(i - m, j)].clone() }
        );
        Self::from(inner)
    }

    /// Horizontal concatenation `[self | other]`.
    pub fn concat(&self, other: &Self) -> Self { 
        assert_eq!(self.nrows(), other.nrows());

        let (m, n) = (self.nrows(), self.ncols());
        let inner = Array2::from_shape_fn((m, n + other.ncols()), |(i, j)| 
            if j < n { self[(i, j)].clone() } else { other[(i, j - n)].clone() }
        );
        Self::from(inner)
    }

    pub fn col(&self, j: usize) -> Vec<R> { 
        self.inner.column(j).to_vec()
    }

    pub fn mul_vec(&self, v: &[R]) -> Vec<R> { 
        assert_eq!(self.ncols(), v.len());

        (0..self.nrows()).map(|i| { 
            v.iter().enumerate()
                .filter(|(_, b)| !b.is_zero())
                .map(|(j, b)| &self[(i, j)] * b)
                .sum()
        }).collect()
    }

    pub fn swap_rows(&mut self, i: usize, j: usize) {
        if i == j { return }
        for k in 0..self.ncols() { 
            self.inner.swap((i, k), (j, k));
        }
    }

    pub fn swap_cols(&mut self, i: usize, j: usize) {
        if i == j { return }
        for k in 0..self.nrows() { 
            self.inner.swap((k, i), (k, j));
        }
    }

    pub fn mul_row(&mut self, i: usize, r: &R) {
        for a in self.inner.row_mut(i).iter_mut() { 
            *a *= r;
        }
    }

    pub fn mul_col(&mut self, j: usize, r: &R) {
        for a in self.inner.column_mut(j).iter_mut() { 
            *a *= r;
        }
    }

    // Multiply [a, b; c, d] from left. 
    pub fn left_elementary(&mut self, comps: [&R; 4], i: usize, j: usize) { 
        let [a, b, c, d] = comps;

        for k in 0..self.ncols() { 
            let (x, y) = (self[(i, k)].clone(), self[(j, k)].clone());
            if x.is_zero() && y.is_zero() { continue }

            self[(i, k)] = a * &x + b * &y;
            self[(j, k)] = c * &x + d * &y;
        }
    }

    // Multiply [a, c; b, d] from right. 
    pub fn right_elementary(&mut self, comps: [&R; 4], i: usize, j: usize) { 
        let [a, b, c, d] = comps;

        for k in 0..self.nrows() { 
            let (x, y) = (self[(k, i)].clone(), self[(k, j)].clone());
            if x.is_zero() && y.is_zero() { continue }

            self[(k, i)] = a * &x + b * &y;
            self[(k, j)] = c * &x + d * &y;
        }
    }
}

impl<R> From<Array2<R>> for Mat<R> {
    fn from(inner: Array2<R>) -> Self {
        Self { inner }
    }
}

impl<R> Index<(usize, usize)> for Mat<R> {
    type Output = R;
    fn index(&self, index: (usize, usize)) -> &R {
        &self.inner[index]
    }
}

impl<R> IndexMut<(usize, usize)> for Mat<R> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut R {
        &mut self.inner[index]
    }
}

impl<R> Default for Mat<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn default() -> Self {
        Self::zero((0, 0))
    }
}

#[auto_ops]
impl<'a, 'b, R> Mul<&'b Mat<R>> for &'a Mat<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = Mat<R>;
    fn mul(self, rhs: &'b Mat<R>) -> Self::Output {
        assert_eq!(self.ncols(), rhs.nrows());

        let (l, m, n) = (self.nrows(), self.ncols(), rhs.ncols());
        let mut res = Mat::zero((l, n));

        for i in 0..l { 
            for k in 0..m { 
                let a = &self[(i, k)];
                if a.is_zero() { continue }

                for j in 0..n { 
                    let b = &rhs[(k, j)];
                    if b.is_zero() { continue }
                    res[(i, j)] += a * b;
                }
            }
        }

        res
    }
}
