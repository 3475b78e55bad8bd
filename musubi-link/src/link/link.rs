use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt::Display;
use std::ops::Add;
use itertools::Itertools;
use log::trace;
use musubi::Sign;
use musubi::bitseq::{Bit, BitSeq};
use musubi::util::err::{Result, err, ensure};

use super::{Crossing, CrossingType, LinkComp};

pub type EdgeId = usize;
pub type State = BitSeq;
pub type XCode = [EdgeId; 4];

/// A position `(crossing index, slot)` in a diagram.
pub type Port = (usize, usize);

/// A directed arc of a diagram, running between two ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    id: EdgeId,
    from: Port,
    to: Port
}

impl Edge {
    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// Index of the crossing the edge leaves.
    pub fn from(&self) -> usize {
        self.from.0
    }

    /// Index of the crossing the edge enters.
    pub fn to(&self) -> usize {
        self.to.0
    }

    pub fn from_port(&self) -> Port {
        self.from
    }

    pub fn to_port(&self) -> Port {
        self.to
    }

    pub fn opposite(&self, p: Port) -> Port {
        if self.from == p { self.to } else { self.from }
    }

    pub fn reverse(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
    }
}

/* Planar Diagram code, represented by crossings:
 *
 *     3   2
 *      \ /
 *       \      = (0, 1, 2, 3)
 *      / \
 *     0   1
 *
 * The lower edge has direction 0 -> 2.
 * The crossing is +1 if the upper goes 3 -> 1.
 *
 * see: http://katlas.math.toronto.edu/wiki/Planar_Diagrams
 */

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    name: String,
    data: Vec<Crossing>,
    edges: Vec<Edge> // sorted by id
}

impl Link {
    pub const DEFAULT_NAME: &'static str = "L";

    /// Builds a diagram from a PD code, recovering the orientation of all edges.
    ///
    /// # Panics
    ///
    /// Panics if the code is malformed. See [`Link::try_from_pd_code`].
    pub fn from_pd_code<I>(pd_code: I) -> Self
    where I: IntoIterator<Item = XCode> {
        match Self::try_from_pd_code(pd_code) {
            Ok(l) => l,
            Err(e) => panic!("invalid PD code: {e}")
        }
    }

    pub fn try_from_pd_code<I>(pd_code: I) -> Result<Self>
    where I: IntoIterator<Item = XCode> {
        let data = pd_code.into_iter().map(Crossing::from_pd_code).collect_vec();
        let edges = orient(&data)?;
        let name = Self::DEFAULT_NAME.to_string();
        Ok(Link { name, data, edges })
    }

    pub fn empty() -> Self {
        Link {
            name: "∅".to_string(),
            data: vec![],
            edges: vec![]
        }
    }

    pub fn unknot() -> Self {
        let x = Crossing::new(CrossingType::V, [0, 0, 1, 1]);
        let edges = vec![
            Edge { id: 0, from: (0, 1), to: (0, 0) },
            Edge { id: 1, from: (0, 2), to: (0, 3) },
        ];
        Link {
            name: "○".to_string(),
            data: vec![x],
            edges
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn with_name<S>(mut self, name: S) -> Self
    where S: Into<String> {
        self.name = name.into();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_knot(&self) -> bool {
        self.components().len() == 1
    }

    pub fn crossings(&self) -> &[Crossing] {
        &self.data
    }

    pub fn crossing_at(&self, i: usize) -> &Crossing {
        &self.data[i]
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        let i = self.edges.binary_search_by_key(&id, |e| e.id).ok()?;
        Some(&self.edges[i])
    }

    /// Number of crossings that are not smoothed.
    pub fn crossing_num(&self) -> usize {
        self.data.iter().filter(|x| x.is_crossing()).count()
    }

    /// Sign of the `i`-th crossing, or `None` if it is smoothed.
    pub fn crossing_sign(&self, i: usize) -> Option<Sign> {
        let x = &self.data[i];
        if !x.is_crossing() {
            return None
        }

        let goes_in = |j: usize|
            self.edge(x.edge(j)).map(|e| e.to == (i, j)).unwrap_or(false);

        Some(
            Sign::from_bool(goes_in(0)) *
            Sign::from_bool(goes_in(1)) *
            Sign::from_bool(x.ctype() == CrossingType::Xp)
        )
    }

    pub fn crossing_signs(&self) -> Vec<Sign> {
        (0..self.data.len()).filter_map(|i| self.crossing_sign(i)).collect()
    }

    /// `(n⁺, n⁻)`
    pub fn signed_crossing_nums(&self) -> (usize, usize) {
        let signs = self.crossing_signs();
        let pos = signs.iter().filter(|s| s.is_positive()).count();
        (pos, signs.len() - pos)
    }

    pub fn writhe(&self) -> i32 {
        self.crossing_signs().into_iter().map(i32::from).sum()
    }

    /// Connected components, ordered by their minimal edges.
    pub fn components(&self) -> Vec<LinkComp> {
        let mut remain: BTreeSet<EdgeId> = self.edges.iter().map(|e| e.id).collect();
        let mut comps = vec![];

        while let Some(e0) = remain.pop_first() {
            let Some(start) = self.edge(e0) else { break };
            let mut edges = vec![e0];
            let mut p = start.to;

            loop {
                let (i, j) = p;
                let k = self.data[i].pass(j);
                let next = self.data[i].edge(k);

                if next == e0 || !remain.remove(&next) {
                    break
                }

                let Some(e) = self.edge(next) else { break };
                edges.push(next);
                p = e.opposite((i, k));
            }

            comps.push(LinkComp::new(edges));
        }

        comps
    }

    pub fn mirror(&self) -> Self {
        self.clone_and(|l|
            for x in l.data.iter_mut() {
                *x = x.mirror()
            }
        )
    }

    pub fn reversed(&self) -> Self {
        self.clone_and(|l|
            for e in l.edges.iter_mut() {
                e.reverse()
            }
        )
    }

    /// Smooths the `i`-th crossing as specified by `r`, on a copy of `self`.
    pub fn resolved_at(&self, i: usize, r: Bit) -> Self {
        debug_assert!(i < self.data.len());

        self.clone_and(|l|
            l.data[i].resolve(r)
        )
    }

    /// The pair of the `0`- and `1`-smoothings at the `i`-th crossing.
    pub fn splice_pair(&self, i: usize) -> (Self, Self) {
        (self.resolved_at(i, Bit::Bit0), self.resolved_at(i, Bit::Bit1))
    }

    /// Smooths all remaining crossings, the `k`-th one by `s[k]`.
    pub fn resolved_by(&self, s: &State) -> Self {
        let targets = self.data.iter()
            .enumerate()
            .filter(|(_, x)| x.is_crossing())
            .map(|(i, _)| i)
            .collect_vec();

        debug_assert_eq!(s.len(), targets.len());

        self.clone_and(|l|
            for (i, r) in targets.into_iter().zip(s.iter()) {
                l.data[i].resolve(r)
            }
        )
    }

    fn clone_and<F>(&self, f: F) -> Self
    where F: FnOnce(&mut Self) {
        let mut l = self.clone();
        f(&mut l);
        l
    }

    fn min_edge_id(&self) -> Option<EdgeId> {
        self.edges.first().map(|e| e.id)
    }

    fn max_edge_id(&self) -> Option<EdgeId> {
        self.edges.last().map(|e| e.id)
    }
}

/// Assigns `from` and `to` to every edge.
///
/// Under-strands are oriented `0 -> 2` by the code. Starting from the
/// outgoing under-edges, each strand is followed across over-passes until
/// it meets an under-strand again. Components with no under-strand are
/// oriented from their minimal edge.
fn orient(data: &[Crossing]) -> Result<Vec<Edge>> {
    let mut ports: BTreeMap<EdgeId, Vec<Port>> = BTreeMap::new();
    for (i, x) in data.iter().enumerate() {
        for j in 0..4 {
            ports.entry(x.edge(j)).or_default().push((i, j));
        }
    }

    for (e, ps) in ports.iter() {
        ensure!(ps.len() == 2, "edge {e} must appear exactly twice, found {}.", ps.len());
    }

    let mut from: BTreeMap<EdgeId, Port> = BTreeMap::new();
    let mut to:   BTreeMap<EdgeId, Port> = BTreeMap::new();

    for (i, x) in data.iter().enumerate() {
        let (e0, e2) = (x.edge(0), x.edge(2));
        ensure!(to.insert(e0, (i, 0)).is_none(), "edge {e0} enters two under-strands.");
        ensure!(from.insert(e2, (i, 2)).is_none(), "edge {e2} leaves two under-strands.");
    }

    let mut queue: VecDeque<EdgeId> = data.iter()
        .map(|x| x.edge(2))
        .filter(|e| !to.contains_key(e))
        .collect();

    loop {
        while let Some(e) = queue.pop_front() {
            if to.contains_key(&e) {
                continue
            }

            let (Some(&p), Some(ps)) = (from.get(&e), ports.get(&e)) else {
                return Err(err!("edge {e} cannot be oriented."))
            };
            let q = if ps[0] == p { ps[1] } else { ps[0] };

            let k = match q.1 {
                1 => 3,
                3 => 1,
                _ => return Err(err!("edge {e} leaves two crossings."))
            };

            let next = data[q.0].edge(k);
            let next_p = (q.0, k);

            trace!("edge {e}: {p:?} -> {q:?}, next: {next}");

            to.insert(e, q);

            if let Some(p0) = from.insert(next, next_p) {
                ensure!(p0 == next_p, "edge {next} leaves two crossings.");
            }

            if !to.contains_key(&next) {
                queue.push_front(next);
            }
        }

        let seed = ports.iter().find(|(e, _)|
            !from.contains_key(*e) && !to.contains_key(*e)
        );

        let Some((&e, ps)) = seed else { break };
        from.insert(e, ps[0]);
        queue.push_back(e);
    }

    ports.keys().map(|&id| {
        match (from.get(&id), to.get(&id)) {
            (Some(&from), Some(&to)) if from != to => Ok(Edge { id, from, to }),
            _ => Err(err!("edge {id} cannot be oriented."))
        }
    }).collect()
}

impl Link {
    pub fn trefoil() -> Self {
        Self::from_pd_code([[1,4,2,5],[3,6,4,1],[5,2,6,3]]).with_name("3_1")
    }

    pub fn figure8() -> Self {
        Self::from_pd_code([[4,2,5,1],[8,6,1,5],[6,3,7,4],[2,7,3,8]]).with_name("4_1")
    }

    pub fn hopf_link() -> Self {
        Self::from_pd_code([[4,1,3,2],[2,3,1,4]]).with_name("L2a1")
    }

    /// Disjoint union of `n` unknots.
    pub fn unlink(n: usize) -> Self {
        (0..n).map(|_| Self::unknot())
            .reduce(|a, b| a + b)
            .unwrap_or_else(Self::empty)
    }
}

impl Add for &Link {
    type Output = Link;

    /// Disjoint union. Edges of `rhs` are shifted above those of `self`.
    fn add(self, rhs: Self) -> Link {
        let max1 = self.max_edge_id().unwrap_or(0) as isize;
        let min2 = rhs.min_edge_id().unwrap_or(0) as isize;
        let d = max1 - min2 + 1;
        let shift = |e: EdgeId| (e as isize + d) as EdgeId;
        let n = self.data.len();

        let data = self.data.iter().cloned().chain(
            rhs.data.iter().map(|x| x.map_edges(shift))
        ).collect();

        let edges = self.edges.iter().cloned().chain(
            rhs.edges.iter().map(|e| Edge {
                id: shift(e.id),
                from: (e.from.0 + n, e.from.1),
                to: (e.to.0 + n, e.to.1)
            })
        ).collect();

        let name = format!("{} + {}", self.name, rhs.name);

        Link { name, data, edges }
    }
}

impl Add for Link {
    type Output = Link;

    fn add(self, rhs: Self) -> Link {
        &self + &rhs
    }
}

impl Display for Link {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.name, self.data.iter().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::CrossingType::{Xn, Xp, V, H};

    #[test]
    fn link_init() {
        let l = Link::empty();
        assert_eq!(l.data.len(), 0);
        assert_eq!(l.name(), "∅");
    }

    #[test]
    fn link_from_pd_code() {
        let l = Link::from_pd_code([[0,0,1,1]]);
        assert_eq!(l.data.len(), 1);
        assert_eq!(l.data[0].ctype(), Xn);
        assert_eq!(l.name(), "L");
    }

    #[test]
    fn link_is_empty() {
        assert!(Link::empty().is_empty());
        assert!(!Link::from_pd_code([[0,0,1,1]]).is_empty());
    }

    #[test]
    fn link_crossing_num() {
        assert_eq!(Link::empty().crossing_num(), 0);
        assert_eq!(Link::unknot().crossing_num(), 0);
        assert_eq!(Link::from_pd_code([[0,0,1,1]]).crossing_num(), 1);
        assert_eq!(Link::trefoil().crossing_num(), 3);
        assert_eq!(Link::figure8().crossing_num(), 4);
    }

    #[test]
    fn link_orientation() {
        let l = Link::from_pd_code([[0,0,1,1]]);
        assert_eq!(l.edges(), &[
            Edge { id: 0, from: (0, 1), to: (0, 0) },
            Edge { id: 1, from: (0, 2), to: (0, 3) },
        ]);

        let l = Link::trefoil();
        let e = |i| l.edge(i).map(|e| (e.from(), e.to()));
        assert_eq!(e(1), Some((1, 0)));
        assert_eq!(e(2), Some((0, 2)));
        assert_eq!(e(3), Some((2, 1)));
        assert_eq!(e(4), Some((1, 0)));
        assert_eq!(e(5), Some((0, 2)));
        assert_eq!(e(6), Some((2, 1)));
    }

    #[test]
    fn link_orientation_complete() {
        let links = [
            Link::trefoil(),
            Link::figure8(),
            Link::hopf_link(),
            Link::from_pd_code([[1,2,3,4],[3,2,1,4]])
        ];
        for l in links {
            for e in l.edges() {
                let (p, q) = (e.from_port(), e.to_port());
                assert_ne!(p, q);
                assert_eq!(l.crossing_at(p.0).edge(p.1), e.id());
                assert_eq!(l.crossing_at(q.0).edge(q.1), e.id());
            }
        }
    }

    #[test]
    fn link_malformed_code() {
        assert!(Link::try_from_pd_code([[0,1,2,3]]).is_err());
        assert!(Link::try_from_pd_code([[0,0,0,1]]).is_err());
        assert!(Link::try_from_pd_code([[1,2,3,4],[1,4,3,2]]).is_err());
        assert!(Link::try_from_pd_code([[1,2,3,4],[4,1,3,2]]).is_err());
        assert!(Link::try_from_pd_code([[1,4,2,5],[3,6,4,1],[5,2,6,3]]).is_ok());
    }

    #[test]
    #[should_panic]
    fn link_malformed_code_panics() {
        Link::from_pd_code([[0,1,2,3]]);
    }

    #[test]
    fn link_crossing_signs() {
        let l = Link::from_pd_code([[0,0,1,1]]);
        assert_eq!(l.crossing_signs(), vec![Sign::Pos]);

        let l = Link::from_pd_code([[0,1,1,0]]);
        assert_eq!(l.crossing_signs(), vec![Sign::Neg]);

        let l = Link::from_pd_code([[0,0,1,1]]).resolved_at(0, Bit::Bit0);
        assert_eq!(l.crossing_signs(), vec![]);
        assert_eq!(l.crossing_sign(0), None);
    }

    #[test]
    fn link_writhe() {
        assert_eq!(Link::from_pd_code([[0,0,1,1]]).writhe(), 1);
        assert_eq!(Link::from_pd_code([[0,1,1,0]]).writhe(), -1);
        assert_eq!(Link::unknot().writhe(), 0);
        assert_eq!(Link::trefoil().writhe(), -3);
        assert_eq!(Link::figure8().writhe(), 0);
        assert_eq!(Link::hopf_link().writhe(), -2);
        assert_eq!(Link::from_pd_code([[1,2,3,4],[3,2,1,4]]).writhe(), 0);
    }

    #[test]
    fn link_signed_crossing_nums() {
        assert_eq!(Link::trefoil().signed_crossing_nums(), (0, 3));
        assert_eq!(Link::trefoil().mirror().signed_crossing_nums(), (3, 0));
        assert_eq!(Link::figure8().signed_crossing_nums(), (2, 2));
    }

    #[test]
    fn link_components() {
        let l = Link::from_pd_code([[0,0,1,1]]);
        assert_eq!(l.components(), vec![LinkComp::new([0, 1])]);

        let l = Link::unknot();
        assert_eq!(l.components(), vec![LinkComp::new([0, 1])]);
        assert!(l.is_knot());

        assert_eq!(Link::trefoil().components().len(), 1);
        assert_eq!(Link::figure8().components().len(), 1);

        let l = Link::hopf_link();
        assert_eq!(l.components(), vec![LinkComp::new([1, 2]), LinkComp::new([3, 4])]);
        assert!(!l.is_knot());

        let l = Link::from_pd_code([[1,2,3,4],[3,2,1,4]]);
        assert_eq!(l.components(), vec![LinkComp::new([1, 3]), LinkComp::new([2, 4])]);

        assert_eq!(Link::empty().components(), vec![]);
    }

    #[test]
    fn link_mirror() {
        let l = Link::from_pd_code([[0,0,1,1]]);
        let m = l.mirror();
        assert_eq!(l.data[0].ctype(), Xn);
        assert_eq!(m.data[0].ctype(), Xp);
        assert_eq!(m.writhe(), -1);
        assert_eq!(Link::trefoil().mirror().writhe(), 3);
    }

    #[test]
    fn link_reversed() {
        let l = Link::hopf_link();
        let r = l.reversed();
        for (e, f) in l.edges().iter().zip(r.edges()) {
            assert_eq!(e.from_port(), f.to_port());
            assert_eq!(e.to_port(), f.from_port());
        }
        assert_eq!(r.writhe(), l.writhe());
        assert_eq!(r.reversed(), l);
    }

    #[test]
    fn link_copy_is_independent() {
        let l = Link::trefoil();
        let l1 = l.resolved_at(0, Bit::Bit0);
        assert_eq!(l.data[0].ctype(), Xn);
        assert_eq!(l1.data[0].ctype(), H);
        assert_eq!(l1.edges(), l.edges());
        assert_eq!(l.crossing_num(), 3);
        assert_eq!(l1.crossing_num(), 2);
    }

    #[test]
    fn link_splice_pair() {
        let l = Link::trefoil();
        let (a, b) = l.splice_pair(1);
        assert_eq!(a.data[1].ctype(), H);
        assert_eq!(b.data[1].ctype(), V);
        assert_eq!(a, l.resolved_at(1, Bit::Bit0));
        assert_eq!(b, l.resolved_at(1, Bit::Bit1));

        let (a, b) = l.mirror().splice_pair(1);
        assert_eq!(a.data[1].ctype(), V);
        assert_eq!(b.data[1].ctype(), H);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn link_resolve_twice() {
        Link::unknot().resolved_at(0, Bit::Bit0);
    }

    #[test]
    fn link_resolve() {
        let l = Link::trefoil().resolved_by(&State::from([0, 0, 0]));
        assert_eq!(l.crossing_num(), 0);
        assert_eq!(l.components().len(), 3);

        let l = Link::trefoil().resolved_by(&State::from([1, 1, 1]));
        assert_eq!(l.components().len(), 2);

        let l = Link::trefoil().resolved_by(&State::from([1, 0, 0]));
        assert_eq!(l.components().len(), 2);
    }

    #[test]
    fn link_resolve_partial() {
        let l = Link::trefoil().resolved_at(1, Bit::Bit1);
        let l = l.resolved_by(&State::from([0, 0]));
        assert_eq!(l.data.iter().map(|x| x.ctype()).collect_vec(), vec![H, V, H]);
    }

    #[test]
    fn link_disjoint_union() {
        let l1 = Link::trefoil();
        let l2 = Link::hopf_link();
        let l = &l1 + &l2;

        assert_eq!(l.name(), "3_1 + L2a1");
        assert_eq!(l.crossings().len(), 5);
        assert_eq!(l.edges().iter().map(|e| e.id()).collect_vec(), (1..=10).collect_vec());
        assert_eq!(l.writhe(), -5);
        assert_eq!(l.components().len(), 3);
        assert_eq!(l.crossing_at(3).edges(), &[10, 7, 9, 8]);
    }

    #[test]
    fn link_disjoint_union_overlapping() {
        let l = Link::unknot() + Link::unknot();
        assert_eq!(l.name(), "○ + ○");
        assert_eq!(l.edges().iter().map(|e| e.id()).collect_vec(), vec![0, 1, 2, 3]);
        assert_eq!(l.components().len(), 2);
    }

    #[test]
    fn link_unlink() {
        assert!(Link::unlink(0).is_empty());
        assert_eq!(Link::unlink(1), Link::unknot());
        assert_eq!(Link::unlink(3).components().len(), 3);
    }

    #[test]
    fn link_display() {
        let l = Link::from_pd_code([[0,0,1,1]]);
        assert_eq!(l.to_string(), "L[X⁻[0,0,1,1]]");
    }
}
