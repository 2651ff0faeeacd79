//! UnionFindDecoder
//!
//! The grow / fuse / peel core. A stateful decoder struct owning `Arc`-shared graph
//! access, with `clear()` plus per-shot init and `VecDeque` work lists. Each round
//! grows every odd-parity cluster by one half-edge, fuses clusters whose shared edge
//! saturates, and once no cluster carries odd parity, peels the resulting spanning
//! forest into a set of corrective edges.
//!

use super::graph::DecodingGraph;
use super::union_find::RootManager;
use super::util::*;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

pub struct UnionFindDecoder<G: DecodingGraph> {
    graph: Arc<G>,
    /// union-find parent array; reused across shots, only re-initialised (not reallocated)
    root_of_vertex: Vec<VertexIndex>,
    support: Vec<u8>,
    connection_counts: Vec<usize>,
    border_vertices: HashMap<VertexIndex, HashSet<VertexIndex>>,
    fuse_list: VecDeque<Edge>,
    peeling_edges: VecDeque<Edge>,
    root_manager: RootManager,
}

impl<G: DecodingGraph> UnionFindDecoder<G> {
    pub fn new(graph: Arc<G>) -> Self {
        let num_vertices = graph.num_vertices() as usize;
        Self {
            graph,
            root_of_vertex: (0..num_vertices as VertexIndex).collect(),
            support: Vec::new(),
            connection_counts: Vec::new(),
            border_vertices: HashMap::new(),
            fuse_list: VecDeque::new(),
            peeling_edges: VecDeque::new(),
            root_manager: RootManager::new(),
        }
    }

    pub fn num_vertices(&self) -> VertexNum {
        self.graph.num_vertices()
    }

    pub fn num_edges(&self) -> EdgeNum {
        self.graph.num_edges()
    }

    pub fn edge_idx(&self, edge: Edge) -> EdgeIndex {
        self.graph.edge_idx(edge)
    }

    /// restores the decoder to pristine state; `support`/`connection_counts`/
    /// `root_of_vertex` are refilled by `init_cluster` at the start of the next `decode`
    pub fn clear(&mut self) {
        self.fuse_list.clear();
        self.peeling_edges.clear();
        self.border_vertices.clear();
        self.root_manager.clear();
    }

    /// consumes and mutates `syndrome` in place, returning the proposed correction
    pub fn decode(&mut self, syndrome: &mut [u8]) -> Vec<Edge> {
        assert_eq!(
            syndrome.len(),
            self.num_vertices() as usize,
            "syndrome length must equal the number of vertices"
        );
        let defects: Vec<VertexIndex> = (0..self.num_vertices() as VertexIndex)
            .filter(|&v| syndrome[v as usize] % 2 == 1)
            .collect();
        self.init_cluster(&defects);
        while !self.root_manager.isempty_odd_root() {
            let snapshot: Vec<VertexIndex> = self.root_manager.odd_roots().collect();
            let mut grew = false;
            for root in snapshot {
                grew |= self.grow(root);
            }
            let fused = self.fusion();
            if !grew && !fused {
                // growth is exhausted and nothing fused: every border vertex of every
                // remaining odd-parity cluster is fully saturated, so no future round
                // can do anything either. Only reachable with a syndrome of odd global
                // parity (impossible for a real qubit-flip error, but not rejected here).
                break;
            }
        }
        self.peeling(syndrome)
    }

    fn init_cluster(&mut self, defects: &[VertexIndex]) {
        let num_vertices = self.num_vertices() as usize;
        let num_edges = self.num_edges() as usize;
        self.support = vec![0u8; num_edges];
        self.connection_counts = vec![0usize; num_vertices];
        for (v, parent) in self.root_of_vertex.iter_mut().enumerate() {
            *parent = v as VertexIndex;
        }
        self.border_vertices.clear();
        self.root_manager.initialize_roots(defects.iter().copied());
        for &d in defects {
            self.border_vertices.insert(d, HashSet::from([d]));
        }
    }

    /// grows every border vertex of `root` by one half-edge unit; returns whether any
    /// edge's support actually advanced (false once the cluster has fully saturated)
    fn grow(&mut self, root: VertexIndex) -> bool {
        let border: Vec<VertexIndex> = self.border_vertices.get(&root).cloned().unwrap_or_default().into_iter().collect();
        let mut grew = false;
        for b in border {
            for v in self.graph.vertex_connections(b) {
                let edge = Edge::new(b, v);
                let idx = self.graph.edge_idx(edge) as usize;
                if self.support[idx] < 2 {
                    self.support[idx] += 1;
                    grew = true;
                    if self.support[idx] == 2 {
                        self.connection_counts[edge.left() as usize] += 1;
                        self.connection_counts[edge.right() as usize] += 1;
                        self.fuse_list.push_back(edge);
                    }
                }
            }
        }
        grew
    }

    fn find_root(&mut self, vertex: VertexIndex) -> VertexIndex {
        let mut path = Vec::new();
        let mut k = vertex;
        while self.root_of_vertex[k as usize] != k {
            path.push(k);
            k = self.root_of_vertex[k as usize];
        }
        for visited in path {
            self.root_of_vertex[visited as usize] = k;
        }
        k
    }

    /// returns whether any fuse_list entry actually caused a union (as opposed to being
    /// discarded as a cycle edge within an already-merged cluster)
    fn fusion(&mut self) -> bool {
        let mut fused = false;
        while let Some(edge) = self.fuse_list.pop_front() {
            let (u, v) = edge.endpoints();
            let mut ru = self.find_root(u);
            let mut rv = self.find_root(v);
            if ru == rv {
                continue; // not a spanning-forest edge
            }
            fused = true;
            self.peeling_edges.push_back(edge);
            if self.root_manager.size(ru) < self.root_manager.size(rv) {
                std::mem::swap(&mut ru, &mut rv);
            }
            self.root_of_vertex[rv as usize] = ru;
            if !self.root_manager.is_root(rv) {
                // rv was a plain vertex absorbed for the first time
                self.root_manager.bump_size(ru, 1);
                self.border_vertices.entry(ru).or_default().insert(rv);
            } else {
                self.root_manager.merge(ru, rv);
                self.merge_boundary(ru, rv);
            }
        }
        fused
    }

    fn merge_boundary(&mut self, keep: VertexIndex, absorb: VertexIndex) {
        let absorbed = self.border_vertices.remove(&absorb).unwrap_or_default();
        let keep_set = self.border_vertices.entry(keep).or_default();
        for w in absorbed {
            keep_set.insert(w);
            let saturated = self.connection_counts[w as usize] == self.graph.vertex_connection_count(w);
            if saturated {
                keep_set.remove(&w);
            }
        }
    }

    /// reverse-order leaf stripping over the spanning forest recorded in `peeling_edges`
    fn peeling(&mut self, syndrome: &mut [u8]) -> Vec<Edge> {
        let mut degree = vec![0usize; self.num_vertices() as usize];
        for edge in &self.peeling_edges {
            let (u, v) = edge.endpoints();
            degree[u as usize] += 1;
            degree[v as usize] += 1;
        }
        let mut corrections = Vec::new();
        while let Some(edge) = self.peeling_edges.pop_back() {
            let (a, b) = edge.endpoints();
            let (leaf, interior) = if degree[a as usize] == 1 {
                (a, b)
            } else if degree[b as usize] == 1 {
                (b, a)
            } else {
                self.peeling_edges.push_front(edge);
                continue;
            };
            degree[leaf as usize] -= 1;
            degree[interior as usize] -= 1;
            if syndrome[leaf as usize] % 2 == 1 {
                corrections.push(edge);
                syndrome[leaf as usize] = 0;
                syndrome[interior as usize] ^= 1;
            }
        }
        corrections
    }
}
