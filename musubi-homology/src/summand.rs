use std::collections::BTreeMap;
use std::fmt::Display;

use musubi::{EucRing, EucRingOps, Ring, RingOps};
use musubi::util::format::superscript;

use crate::utils::Trans;

/// Formats `R^r ⊕ (R/t₁) ⊕ ...`, or `dflt` if the module is zero.
pub fn rmod_str_symbol<R>(rank: usize, tors: &[R], dflt: &str) -> String
where R: Ring, for<'x> &'x R: RingOps<R> {
    if rank == 0 && tors.is_empty() { 
        return dflt.to_string()
    }

    let symbol = R::math_symbol();
    let mut res = vec![];

    if rank > 1 {
        res.push(format!("{symbol}{}", superscript(rank as isize)));
    } else if rank == 1 { 
        res.push(symbol.clone());
    }

    let mut tors_acc = BTreeMap::<String, usize>::new();
    for t in tors { 
        *tors_acc.entry(t.to_string()).or_default() += 1;
    }
    
    for (t, r) in tors_acc.iter() { 
        if *r > 1 { 
            res.push(format!("({symbol}/{t}){}", superscript(*r as isize)));
        } else { 
            res.push(format!("({symbol}/{t})"));
        }
    }

    res.join(" ⊕ ")
}

/// A finitely generated module `R^r ⊕ R/t₁ ⊕ ... ⊕ R/tₖ`, 
/// optionally with its presentation as a subquotient of `Rⁿ`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HomologySummand<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    rank: usize, 
    tors: Vec<R>,
    trans: Option<Trans<R>>
}

impl<R> HomologySummand<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    pub fn new(rank: usize, tors: Vec<R>, trans: Option<Trans<R>>) -> Self { 
        if let Some(t) = &trans { 
            assert_eq!(rank + tors.len(), t.tgt_dim());
        }
        Self { rank, tors, trans }
    }

    pub fn zero() -> Self { 
        Self::new(0, vec![], Some(Trans::zero(0)))
    }

    pub fn free(rank: usize) -> Self { 
        Self::new(rank, vec![], Some(Trans::id(rank)))
    }

    pub fn rank(&self) -> usize { 
        self.rank
    }

    pub fn tors(&self) -> &[R] { 
        &self.tors
    }

    /// Number of generators, free and torsion.
    pub fn dim(&self) -> usize { 
        self.rank + self.tors.len()
    }

    pub fn is_zero(&self) -> bool { 
        self.rank == 0 && self.is_free()
    }

    pub fn is_free(&self) -> bool { 
        self.tors.is_empty()
    }

    pub fn trans(&self) -> Option<&Trans<R>> { 
        self.trans.as_ref()
    }

    pub fn math_symbol(&self) -> String { 
        rmod_str_symbol(self.rank, &self.tors, "0")
    }

    /// The vector representing the `i`-th generator.
    pub fn gen_vec(&self, i: usize) -> Option<Vec<R>> {
        assert!(i < self.dim());
        let t = self.trans.as_ref()?;
        Some(t.backward_mat().col(i))
    }
}

impl<R> HomologySummand<R>
where R: EucRing, for<'x> &'x R: EucRingOps<R> {
    /// Coordinates of a cycle `v` in the generators, 
    /// torsion coordinates reduced modulo their orders.
    pub fn vectorize(&self, v: &[R]) -> Option<Vec<R>> { 
        let t = self.trans.as_ref()?;
        let mut w = t.forward(v);

        for (k, a) in self.tors.iter().enumerate() { 
            let i = self.rank + k;
            w[i] = &w[i] % a;
        }

        Some(w)
    }
}

impl<R> Display for HomologySummand<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.math_symbol())
    }
}
