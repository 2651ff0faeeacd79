//! RootManager
//!
//! Bookkeeping of per-root cluster size, parity, and the odd-parity root set. This is
//! deliberately separate from the decoder's union-find parent array (`root_of_vertex`
//! in [`crate::decoder::UnionFindDecoder`]): `root_of_vertex` is a flat index-keyed
//! array for `find_root`, while `RootManager` keys its state by *root* and only a
//! subset of vertices (those that have been recognised as cluster roots) ever appear
//! in it.
//!

use super::util::*;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RootManager {
    roots: HashSet<VertexIndex>,
    odd_roots: HashSet<VertexIndex>,
    size: HashMap<VertexIndex, usize>,
    parity: HashMap<VertexIndex, u8>,
}

impl RootManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// resets all state, then seeds every `r` in `roots` as a size-1, odd-parity root
    pub fn initialize_roots(&mut self, roots: impl IntoIterator<Item = VertexIndex>) {
        self.clear();
        for r in roots {
            let inserted = self.roots.insert(r);
            assert!(inserted, "duplicate defect vertex {r} passed to initialize_roots");
            self.odd_roots.insert(r);
            self.size.insert(r, 1);
            self.parity.insert(r, 1);
        }
    }

    pub fn is_root(&self, v: VertexIndex) -> bool {
        self.roots.contains(&v)
    }

    pub fn is_odd_root(&self, v: VertexIndex) -> bool {
        self.odd_roots.contains(&v)
    }

    /// 0 for a non-root, by convention
    pub fn size(&self, root: VertexIndex) -> usize {
        *self.size.get(&root).unwrap_or(&0)
    }

    pub fn bump_size(&mut self, root: VertexIndex, delta: usize) {
        *self.size.get_mut(&root).expect("bump_size called on a non-root") += delta;
    }

    /// 0 for a non-root, by convention
    pub fn parity(&self, root: VertexIndex) -> u8 {
        *self.parity.get(&root).unwrap_or(&0)
    }

    /// snapshot of the current odd-root set; callers must copy this before mutating
    /// via `merge`, since the live set may shrink during iteration (see decoder grow-fuse loop)
    pub fn odd_roots(&self) -> impl Iterator<Item = VertexIndex> + '_ {
        self.odd_roots.iter().copied()
    }

    pub fn isempty_odd_root(&self) -> bool {
        self.odd_roots.is_empty()
    }

    /// merges `absorb` into `keep`. Precondition: both are distinct current roots and
    /// `size(keep) >= size(absorb)` (weighted union by size, ties kept on `keep`)
    pub fn merge(&mut self, keep: VertexIndex, absorb: VertexIndex) {
        assert_ne!(keep, absorb, "cannot merge a root into itself");
        assert!(self.is_root(keep), "merge target {keep} is not a root");
        assert!(self.is_root(absorb), "merge source {absorb} is not a root");
        assert!(
            self.size(keep) >= self.size(absorb),
            "merge requires the first argument to be the larger cluster"
        );
        let absorbed_size = self.size.remove(&absorb).unwrap();
        let absorbed_parity = self.parity.remove(&absorb).unwrap();
        *self.size.get_mut(&keep).unwrap() += absorbed_size;
        let new_parity = self.parity.get_mut(&keep).unwrap();
        *new_parity = (*new_parity + absorbed_parity) % 2;
        self.roots.remove(&absorb);
        self.odd_roots.remove(&absorb);
        if *new_parity == 1 {
            self.odd_roots.insert(keep);
        } else {
            self.odd_roots.remove(&keep);
        }
    }

    pub fn clear(&mut self) {
        self.roots.clear();
        self.odd_roots.clear();
        self.size.clear();
        self.parity.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_distinct_odd_roots() {
        let mut mgr = RootManager::new();
        mgr.initialize_roots([2, 5, 9]);
        assert!(mgr.is_root(2) && mgr.is_root(5) && mgr.is_root(9));
        assert!(mgr.is_odd_root(2));
        assert_eq!(mgr.size(2), 1);
        assert_eq!(mgr.parity(2), 1);
        assert_eq!(mgr.size(7), 0); // non-root reads as 0
    }

    #[test]
    fn merge_updates_size_and_parity() {
        let mut mgr = RootManager::new();
        mgr.initialize_roots([1, 2]);
        mgr.merge(1, 2);
        assert!(!mgr.is_root(2));
        assert_eq!(mgr.size(1), 2);
        assert_eq!(mgr.parity(1), 0); // 1 + 1 mod 2
        assert!(!mgr.is_odd_root(1));
        assert!(mgr.isempty_odd_root());
    }

    #[test]
    #[should_panic]
    fn merge_requires_larger_first() {
        let mut mgr = RootManager::new();
        mgr.initialize_roots([1, 2]);
        mgr.bump_size(2, 5);
        mgr.merge(1, 2);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut mgr = RootManager::new();
        mgr.initialize_roots([1, 2]);
        mgr.clear();
        mgr.clear();
        assert!(mgr.isempty_odd_root());
        assert_eq!(mgr.size(1), 0);
    }
}
