use std::ops::RangeInclusive;
use std::sync::Arc;

use ahash::AHashMap;
use itertools::Itertools;
use log::info;
use musubi::{Ring, RingOps, Sign};
use musubi::bitseq::Bit;
use musubi_homology::ChainComplex;
use musubi_link::{Link, LinkComp, State};
use rayon::prelude::{IntoParallelIterator, ParallelIterator};

use crate::kh::{KhAlg, KhChain, KhChainGen, KhTensor};
use crate::misc::range_of;

/// A vertex of the cube: the circles of the resolved diagram,
/// ordered by their minimal edges, and the generators over them.
#[derive(Debug)]
pub struct KhCubeVertex {
    state: State,
    circles: Vec<LinkComp>,
    gens: Vec<KhChainGen>
}

impl KhCubeVertex {
    pub fn new(l: &Link, state: State, deg_shift: (isize, isize)) -> Self {
        let mut circles = l.resolved_by(&state).components();
        circles.sort_by_key(|c| c.min_edge());

        let r = circles.len();
        let gens = KhTensor::generate(r)
            .map(|x| KhChainGen::new(state, x, deg_shift))
            .sorted()
            .collect();

        KhCubeVertex { state, circles, gens }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn circles(&self) -> &[LinkComp] {
        &self.circles
    }

    pub fn generators(&self) -> &[KhChainGen] {
        &self.gens
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KhCubeEdgeTrans {
    Merge((usize, usize), usize),
    Split(usize, (usize, usize))
}

#[derive(Debug, Clone)]
pub struct KhCubeEdge {
    trans: KhCubeEdgeTrans,
    sign: Sign
}

impl KhCubeEdge {
    pub fn sign(&self) -> Sign {
        self.sign
    }

    pub fn trans(&self) -> &KhCubeEdgeTrans {
        &self.trans
    }

    fn edge_between(from: &KhCubeVertex, to: &KhCubeVertex) -> Self {
        debug_assert!(from.state.is_adjacent(&to.state));
        debug_assert_eq!(from.state.weight() + 1, to.state.weight());

        fn diff(c1: &[LinkComp], c2: &[LinkComp]) -> Vec<usize> {
            c1.iter().enumerate().filter_map(|(i, c)|
                (!c2.contains(c)).then_some(i)
            ).collect()
        }

        let c_from = diff(&from.circles, &to.circles);
        let c_to   = diff(&to.circles, &from.circles);

        let trans = match (c_from.len(), c_to.len()) {
            (2, 1) => KhCubeEdgeTrans::Merge((c_from[0], c_from[1]), c_to[0]),
            (1, 2) => KhCubeEdgeTrans::Split(c_from[0], (c_to[0], c_to[1])),
            _ => panic!("non-planar transition: {} -> {}.", from.state, to.state)
        };

        let sign = KhCube::edge_sign(&from.state, &to.state);
        KhCubeEdge { trans, sign }
    }
}

/// The cube of resolutions of a link diagram with `n` crossings:
/// `2ⁿ` states, with an edge `s → t` whenever `t` is obtained from `s`
/// by changing a single `0` to `1`.
pub struct KhCube {
    dim: usize,
    deg_shift: (isize, isize),
    vertices: AHashMap<State, KhCubeVertex>,
    edges: AHashMap<State, Vec<(State, KhCubeEdge)>>
}

impl KhCube {
    pub fn new(l: &Link, deg_shift: (isize, isize)) -> Self {
        let n = l.crossing_num();

        info!("construct cube of {} (n = {n}).", l.name());

        let states = State::generate(n);
        let vertices: AHashMap<_, _> = if musubi_homology::config::is_multithread_enabled() {
            states.into_par_iter().map(|s|
                (s, KhCubeVertex::new(l, s, deg_shift))
            ).collect::<Vec<_>>().into_iter().collect()
        } else {
            states.into_iter().map(|s|
                (s, KhCubeVertex::new(l, s, deg_shift))
            ).collect()
        };

        let edges = vertices.keys().map(|s| {
            let v = &vertices[s];
            let edges = Self::targets(s).map(|t| {
                let w = &vertices[&t];
                (t, KhCubeEdge::edge_between(v, w))
            }).collect_vec();
            (*s, edges)
        }).collect();

        KhCube { dim: n, deg_shift, vertices, edges }
    }

    /// States one weight above `from`, obtained by changing each `0` to `1`.
    pub fn targets(from: &State) -> impl Iterator<Item = State> + '_ {
        let n = from.len();
        (0..n).filter(|&i| from[i].is_zero()).map(move |i|
            from.edit(|b| b.set(i, Bit::Bit1))
        )
    }

    /// `(-1)^k`, where `k` is the number of `1`s in `from`
    /// before the position where `to` differs.
    pub fn edge_sign(from: &State, to: &State) -> Sign {
        debug_assert!(from.is_adjacent(to));

        let i = from.diff_indices(to).first().copied().unwrap_or(0);
        let k = from.count_ones_before(i);

        Sign::from_parity(k as i64)
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn deg_shift(&self) -> (isize, isize) {
        self.deg_shift
    }

    pub fn h_range(&self) -> RangeInclusive<isize> {
        let i0 = self.deg_shift.0;
        let i1 = i0 + (self.dim as isize);
        i0 ..= i1
    }

    pub fn q_range(&self) -> RangeInclusive<isize> {
        range_of(self.vertices.values().flat_map(|v|
            v.gens.iter().map(|x| x.q_deg())
        ))
    }

    /// States of weight `k`, in lexicographic order.
    pub fn states_of_weight(&self, k: usize) -> Vec<State> {
        State::generate_weight(self.dim, k)
    }

    pub fn vertex(&self, s: &State) -> &KhCubeVertex {
        &self.vertices[s]
    }

    pub fn edge(&self, from: &State, to: &State) -> Option<&KhCubeEdge> {
        self.edges.get(from)?.iter().find(|(t, _)| t == to).map(|(_, e)| e)
    }

    /// Generators of homological degree `i`, ordered by state and then
    /// within each state.
    pub fn generators(&self, i: isize) -> Vec<&KhChainGen> {
        if !self.h_range().contains(&i) {
            return vec![]
        }

        let k = (i - self.deg_shift.0) as usize;
        self.states_of_weight(k).iter().flat_map(|s|
            self.vertex(s).generators()
        ).collect()
    }

    fn edges_from(&self, s: &State) -> &[(State, KhCubeEdge)] {
        self.edges.get(s).map(|e| e.as_slice()).unwrap_or(&[])
    }

    fn apply_edge_map<R>(&self, x: &KhChainGen, target: &State, e: &KhCubeEdge) -> KhChain<R>
    where R: Ring, for<'x> &'x R: RingOps<R> {
        use KhCubeEdgeTrans::*;

        let y = match e.trans {
            Merge(ij, k) => KhAlg::prod_tensor::<R>(&x.tensor, ij, k),
            Split(i, jk) => KhAlg::coprod_tensor::<R>(&x.tensor, i, jk)
        };

        y.map_gens(|t| KhChainGen::new(*target, *t, x.deg_shift))
    }

    pub fn d<R>(&self, x: &KhChainGen) -> KhChain<R>
    where R: Ring, for<'x> &'x R: RingOps<R> {
        self.edges_from(&x.state).iter().flat_map(|(target, e)| {
            let sign = R::from_sign(e.sign());
            &self.apply_edge_map::<R>(x, target, e) * &sign
        }).collect()
    }

    pub fn into_complex<R>(self) -> ChainComplex<KhChainGen, R>
    where R: Ring, for<'x> &'x R: RingOps<R> {
        Self::complex_where(&Arc::new(self), |_| true)
    }

    /// The subcomplex spanned by the generators satisfying `pred`.
    /// `pred` must be preserved by the differential, e.g. a fixed `q`-degree.
    pub fn complex_where<R, F>(cube: &Arc<Self>, pred: F) -> ChainComplex<KhChainGen, R>
    where
        R: Ring, for<'x> &'x R: RingOps<R>,
        F: Fn(&KhChainGen) -> bool
    {
        let bases = cube.h_range().map(|i| {
            let gens = cube.generators(i).into_iter().filter(|&x| pred(x)).cloned().collect_vec();
            (i, gens)
        }).collect_vec();

        let cube = Arc::clone(cube);
        ChainComplex::new(bases, 1, move |_, x| cube.d(x))
    }
}
