use itertools::Itertools;
use super::EdgeId;

/// A connected component of a link diagram, given by its edges in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkComp { 
    edges: Vec<EdgeId>
}

impl LinkComp { 
    pub fn new<I>(edges: I) -> Self
    where I: IntoIterator<Item = EdgeId> { 
        let edges = edges.into_iter().sorted().dedup().collect_vec();
        assert!(!edges.is_empty());
        Self { edges }
    }

    pub fn edges(&self) -> &[EdgeId] { 
        &self.edges
    }

    pub fn len(&self) -> usize { 
        self.edges.len()
    }

    pub fn contains(&self, e: EdgeId) -> bool { 
        self.edges.binary_search(&e).is_ok()
    }

    pub fn min_edge(&self) -> EdgeId { 
        self.edges[0]
    }

    pub fn is_adj(&self, other: &Self) -> bool { 
        self.edges.iter().any(|&e| other.contains(e))
    }
}

impl std::fmt::Display for LinkComp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})", self.edges.iter().join("-"))
    }
}
