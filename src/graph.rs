//! Decoding Graph
//!
//! The capability trait the union-find decoder is generic over. Vertices are parity
//! checks, edges are qubits. Any concrete graph (the closed-form lattices in
//! `lattice.rs`, the CSR-derived graph in `parity_graph.rs`, or a caller's own type)
//! satisfies this trait and can be plugged into [`crate::decoder::UnionFindDecoder`].
//!

use super::util::*;

pub trait DecodingGraph {
    /// number of vertices (parity checks)
    fn num_vertices(&self) -> VertexNum;

    /// number of edges (qubits)
    fn num_edges(&self) -> EdgeNum;

    /// neighbors of `vertex`
    fn vertex_connections(&self, vertex: VertexIndex) -> Vec<VertexIndex>;

    /// degree of `vertex`; must equal `self.vertex_connections(vertex).len()`
    fn vertex_connection_count(&self, vertex: VertexIndex) -> usize {
        self.vertex_connections(vertex).len()
    }

    /// injective map from an edge into `[0, num_edges)`
    fn edge_idx(&self, edge: Edge) -> EdgeIndex;
}
