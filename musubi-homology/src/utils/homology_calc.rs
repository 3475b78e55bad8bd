use std::marker::PhantomData;
use log::*;

use musubi::{EucRing, EucRingOps};
use musubi_matrix::dense::{*, snf::*};

use crate::HomologySummand;
use super::Trans;

pub struct HomologyCalc<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    _r: PhantomData<R>
}

impl<R> HomologyCalc<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    //            d1             d2
    //    C1 ----------> C2 -----------> C3
    //     |              |               |
    //     |           p1 |               |
    //     V      d1'     V               |
    //    C11 ---------> C21              |
    //     ⊕              ⊕      d2'      |
    //    C11'           C21'----------> C3
    //                    |               |
    //                q2⁻¹|               |
    //                    V      d2''     V
    //                   C22 ----------> C31
    //                    ⊕               ⊕
    //                   C22'            C31'
    // 
    //  H2 = Ker(d2) / Im(d1)
    //     ≅ C22' (free) ⊕ (C21 / Im(d1')) (tor)

    pub fn calculate(d1: &Mat<R>, d2: &Mat<R>, with_trans: bool) -> HomologySummand<R> {
        assert_eq!(d1.nrows(), d2.ncols());

        let n = d1.nrows();

        if n == 0 { 
            return HomologySummand::zero();
        } else if d1.is_zero() && d2.is_zero() { 
            return HomologySummand::free(n);
        }

        trace!("calculate homology: {} -> {} -> {}", d1.ncols(), n, d2.nrows());
        
        let (s1, s2) = Self::process_snf(d1, d2, with_trans);
        let (rank, tors) = Self::result(&s1, &s2);

        let trans = if with_trans { 
            Self::trans(&s1, &s2)
        } else {
            None
        };

        HomologySummand::new(rank, tors, trans)
    }

    fn process_snf(d1: &Mat<R>, d2: &Mat<R>, with_trans: bool) -> (SnfResult<R>, SnfResult<R>) {
        let n = d1.nrows();

        let s1 = snf(d1, [with_trans, true, false, false]);
        let r1 = s1.rank();

        let d2 = match s1.pinv() { 
            Some(p1_inv) if r1 > 0 => {
                let t2 = p1_inv.submat_cols(r1..n);
                d2 * &t2 // d2': C21' -> C3
            },
            _ => d2.clone()
        };

        let s2 = snf_in_place(d2, [false, false, with_trans, with_trans]);

        (s1, s2)
    }

    fn result(s1: &SnfResult<R>, s2: &SnfResult<R>) -> (usize, Vec<R>) {
        let n = s1.result().nrows();
        let (r1, r2) = (s1.rank(), s2.rank());

        assert!(n >= r1 + r2);

        let rank = n - r1 - r2;

        let tors = s1.factors().into_iter()
            .filter(|a| !a.is_unit())
            .cloned()
            .collect();

        (rank, tors)
    }

    fn trans(s1: &SnfResult<R>, s2: &SnfResult<R>) -> Option<Trans<R>> {
        let n = s1.result().nrows();
        let (r1, r2) = (s1.rank(), s2.rank());
        let r = n - r1 - r2;
        let t = s1.factors().iter().filter(|a| !a.is_unit()).count();

        let p1 = s1.p()?;                         // size = (n, n)
        let p11 = p1.submat_rows(r1..n);          // size = (n - r1, n)
                
        let p2 = s2.qinv()?;                      // size = (n - r1, n - r1)
        let p22 = p2.submat_rows(r2..n-r1);       // size = (n - (r1 + r2), n - r1)

        let p_free = &p22 * &p11;                 // size = (n - (r1 + r2), n)
        let p_tor = p1.submat_rows(r1-t..r1);     // size = (t, n)

        let p = p_free.stack(&p_tor);             // size = (r + t, n)

        assert_eq!(p.shape(), (r + t, n));

        let q1 = s1.pinv()?;                      // size = (n, n)
        let q12 = q1.submat_cols(r1..n);          // size = (n, n - r1)

        let q2 = s2.q()?;                         // size = (n - r1, n - r1)
        let q22 = q2.submat_cols(r2..n-r1);       // size = (n - r1, n - (r1 + r2))

        let q_free = &q12 * &q22;                 // size = (n, n - (r1 + r2))
        let q_tor = q1.submat_cols(r1-t..r1);     // size = (n, t)

        let q = q_free.concat(&q_tor);            // size = (n, r + t)

        assert_eq!(q.shape(), (n, r + t));

        Some(Trans::new(p, q))
    }
}
