//! Shared types
//!
//! Index types, the canonical undirected edge value, and the small error-basis tag
//! shared by the graph builders, the decoder, and the syndrome helpers.
//!

use serde::{Deserialize, Serialize};

cfg_if::cfg_if! {
    if #[cfg(feature = "u32_index")] {
        /// use u32 to store index, for less memory usage
        pub type VertexIndex = u32;
        pub type EdgeIndex = u32;
        pub type VertexNum = VertexIndex;
        pub type EdgeNum = EdgeIndex;
    } else {
        pub type VertexIndex = usize;
        pub type EdgeIndex = usize;
        pub type VertexNum = VertexIndex;
        pub type EdgeNum = EdgeIndex;
    }
}

/// an unordered pair of vertex ids, always stored with `left <= right`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    left: VertexIndex,
    right: VertexIndex,
}

impl Edge {
    /// canonicalizes `(a, b)` so equality and hashing do not depend on argument order
    pub fn new(a: VertexIndex, b: VertexIndex) -> Self {
        assert_ne!(a, b, "an edge cannot connect a vertex to itself");
        if a < b {
            Self { left: a, right: b }
        } else {
            Self { left: b, right: a }
        }
    }

    pub fn left(&self) -> VertexIndex {
        self.left
    }

    pub fn right(&self) -> VertexIndex {
        self.right
    }

    /// the two endpoints, smaller first
    pub fn endpoints(&self) -> (VertexIndex, VertexIndex) {
        (self.left, self.right)
    }

    /// the endpoint other than `from`; panics if `from` is not incident to this edge
    pub fn other(&self, from: VertexIndex) -> VertexIndex {
        if from == self.left {
            self.right
        } else if from == self.right {
            self.left
        } else {
            panic!("vertex {from} is not an endpoint of this edge");
        }
    }
}

/// use Xoshiro256StarStar for deterministic random number generation
pub type DeterministicRng = rand_xoshiro::Xoshiro256StarStar;

pub trait F64Rng {
    fn next_f64(&mut self) -> f64;
}

impl F64Rng for DeterministicRng {
    fn next_f64(&mut self) -> f64 {
        use crate::rand_xoshiro::rand_core::RngCore;
        f64::from_bits(0x3FF << 52 | self.next_u64() >> 12) - 1.
    }
}

/// tags which error basis an edge belongs to; the decoder core is agnostic to this and
/// consumes one single-basis graph at a time, but CSS-style callers splitting a check
/// matrix into X-type and Z-type halves need a shared vocabulary for it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    X,
    Z,
    /// single-basis codes (e.g. the repetition code) do not distinguish a basis
    Either,
}
