use derive_more::Display;
use musubi::bitseq::Bit;

use super::EdgeId;

use CrossingType::{Xn, Xp, V, H};

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrossingType { 
    #[display("X⁻")]
    Xn, // 0 - 2 is below 1 - 3
    #[display("X⁺")]
    Xp, // 0 - 2 is above 1 - 3
    V,  // 0 - 3 || 1 - 2
    H   // 0 - 1 || 2 - 3
}

impl CrossingType { 
    pub fn is_crossing(&self) -> bool { 
        matches!(self, Xn | Xp)
    }

    pub fn mirror(self) -> CrossingType {
        match self { 
            Xn => Xp,
            Xp => Xn,
            other => other
        }
    }
}

/// A crossing of a link diagram, or a smoothing of it. 
/// 
/// `edges` are listed counterclockwise starting from the incoming under-edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Crossing { 
    ctype: CrossingType,
    edges: [EdgeId; 4]
}

impl Crossing {
    pub fn new(ctype: CrossingType, edges: [EdgeId; 4]) -> Self { 
        Crossing { ctype, edges }
    }

    pub fn from_pd_code(edges: [EdgeId; 4]) -> Self { 
        Crossing::new(Xn, edges)
    }

    pub fn ctype(&self) -> CrossingType { 
        self.ctype
    }

    pub fn edge(&self, i: usize) -> EdgeId { 
        assert!(i < 4);
        self.edges[i]
    }

    pub fn edges(&self) -> &[EdgeId; 4] { 
        &self.edges
    }

    pub fn is_crossing(&self) -> bool { 
        self.ctype.is_crossing()
    }

    pub fn is_resolved(&self) -> bool { 
        !self.is_crossing()
    }

    /// Replaces the crossing by its `0`- (A-) or `1`- (B-) smoothing.
    /// 
    /// ```text
    ///     \ /          \ /    (Xp, 0)     \_/    (Xp, 1)
    ///      /      ==>  | |           or           
    ///     / \          / \                /‾\
    /// ```
    /// 
    /// Smoothing an already smoothed crossing is a logic error.
    pub fn resolve(&mut self, r: Bit) {
        use Bit::{Bit0, Bit1};

        debug_assert!(self.is_crossing(), "cannot resolve a smoothed crossing: {self}");

        match (self.ctype, r) {
            (Xp, Bit0) | (Xn, Bit1) => self.ctype = V,
            (Xp, Bit1) | (Xn, Bit0) => self.ctype = H,
            _ => ()
        }
    }

    pub fn resolved(&self, r: Bit) -> Self { 
        let mut x = self.clone();
        x.resolve(r);
        x
    }

    pub fn mirror(&self) -> Self { 
        Self { 
            ctype: self.ctype.mirror(),
            edges: self.edges
        }
    }

    /// The slot connected to slot `index` through this crossing. 
    pub fn pass(&self, index: usize) -> usize { 
        debug_assert!((0..4).contains(&index));

        match self.ctype {
            Xn | Xp => (index + 2) % 4,
            V => 3 - index,
            H => (5 - index) % 4
        }
    }

    pub(crate) fn map_edges<F>(&self, f: F) -> Self
    where F: Fn(EdgeId) -> EdgeId { 
        Self { 
            ctype: self.ctype, 
            edges: self.edges.map(f) 
        }
    }
}

impl std::fmt::Display for Crossing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [e0, e1, e2, e3] = self.edges;
        write!(f, "{}[{e0},{e1},{e2},{e3}]", self.ctype)
    }
}
