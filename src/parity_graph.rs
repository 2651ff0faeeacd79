//! LatticeFromParity
//!
//! A decoding graph derived from an arbitrary CSR binary parity-check matrix. Vertices
//! are parities (matrix rows), edges are qubits (matrix columns); a qubit must appear
//! in exactly two parities. Malformed input is validated eagerly and reported as a
//! `Result<_, String>` rather than panicking.
//!

use super::graph::DecodingGraph;
use super::util::*;
use std::collections::HashMap;

/// a decoding graph built by scanning a CSR parity-check matrix, optionally
/// replicated across `repetitions` time layers
#[derive(Debug, Clone)]
pub struct LatticeFromParity {
    num_vertices: VertexNum,
    num_edges: EdgeNum,
    /// adjacency, indexed by vertex
    adjacency: Vec<Vec<VertexIndex>>,
    /// `edge_idx` lookup, keyed by canonical edge
    edge_lookup: HashMap<Edge, EdgeIndex>,
}

impl LatticeFromParity {
    /// builds a single-layer graph from a CSR parity-check matrix: `col_indices[indptr[i]..indptr[i+1]]`
    /// lists the qubits (columns) touched by parity (row) `i`.
    pub fn new(num_parities: usize, num_qubits: usize, col_indices: &[usize], indptr: &[usize]) -> Result<Self, String> {
        Self::build(num_parities, num_qubits, col_indices, indptr, 1)
    }

    /// as [`Self::new`], but the single layer is replicated `repetitions` times in the
    /// time direction, with spacelike edges inside each layer and timelike edges
    /// connecting corresponding vertices of adjacent layers. `repetitions` must be at least 2.
    pub fn new_repeated(
        num_parities: usize,
        num_qubits: usize,
        col_indices: &[usize],
        indptr: &[usize],
        repetitions: usize,
    ) -> Result<Self, String> {
        if repetitions < 2 {
            return Err(format!("repetitions must be at least 2, got {repetitions}"));
        }
        Self::build(num_parities, num_qubits, col_indices, indptr, repetitions)
    }

    fn build(
        num_parities: usize,
        num_qubits: usize,
        col_indices: &[usize],
        indptr: &[usize],
        repetitions: usize,
    ) -> Result<Self, String> {
        if num_parities == 0 {
            return Err("num_parities must be nonzero".to_string());
        }
        if num_qubits == 0 {
            return Err("num_qubits must be nonzero".to_string());
        }
        if indptr.len() != num_parities + 1 {
            return Err(format!(
                "indptr must have num_parities + 1 = {} entries, got {}",
                num_parities + 1,
                indptr.len()
            ));
        }

        // find the two parities touching each qubit
        let mut touching: Vec<Vec<VertexIndex>> = vec![Vec::new(); num_qubits];
        for parity in 0..num_parities {
            let start = indptr[parity];
            let end = indptr[parity + 1];
            if end < start || end > col_indices.len() {
                return Err(format!("indptr entries out of range at row {parity}"));
            }
            for &qubit in &col_indices[start..end] {
                if qubit >= num_qubits {
                    return Err(format!("qubit index {qubit} out of range [0, {num_qubits})"));
                }
                touching[qubit].push(parity as VertexIndex);
            }
        }
        let mut layer_edges: Vec<(VertexIndex, VertexIndex)> = Vec::with_capacity(num_qubits);
        for (qubit, parities) in touching.iter().enumerate() {
            if parities.len() != 2 {
                return Err(format!(
                    "qubit {qubit} touches {} parities, expected exactly 2",
                    parities.len()
                ));
            }
            layer_edges.push((parities[0], parities[1]));
        }

        let v = num_parities as VertexIndex;
        let e_layer = num_qubits as EdgeIndex;
        let slab = e_layer + v as EdgeIndex;
        let num_vertices = v * repetitions as VertexIndex;
        let num_edges = if repetitions == 1 {
            e_layer
        } else {
            slab * (repetitions as EdgeIndex - 1) + e_layer
        };

        let mut adjacency = vec![Vec::new(); num_vertices as usize];
        let mut edge_lookup = HashMap::with_capacity(num_edges as usize);
        let mut add_edge = |a: VertexIndex, b: VertexIndex, idx: EdgeIndex| {
            adjacency[a as usize].push(b);
            adjacency[b as usize].push(a);
            edge_lookup.insert(Edge::new(a, b), idx);
        };

        for h in 0..repetitions as VertexIndex {
            let base = h * v;
            let slab_base = h as EdgeIndex * slab;
            for (qubit, &(a, b)) in layer_edges.iter().enumerate() {
                add_edge(base + a, base + b, slab_base + qubit as EdgeIndex);
            }
            if h + 1 < repetitions as VertexIndex {
                for w in 0..v {
                    add_edge(base + w, base + v + w, slab_base + e_layer + w as EdgeIndex);
                }
            }
        }

        Ok(Self {
            num_vertices,
            num_edges,
            adjacency,
            edge_lookup,
        })
    }
}

impl DecodingGraph for LatticeFromParity {
    fn num_vertices(&self) -> VertexNum {
        self.num_vertices
    }

    fn num_edges(&self) -> EdgeNum {
        self.num_edges
    }

    fn vertex_connections(&self, vertex: VertexIndex) -> Vec<VertexIndex> {
        self.adjacency[vertex as usize].clone()
    }

    fn vertex_connection_count(&self, vertex: VertexIndex) -> usize {
        self.adjacency[vertex as usize].len()
    }

    fn edge_idx(&self, edge: Edge) -> EdgeIndex {
        *self
            .edge_lookup
            .get(&edge)
            .unwrap_or_else(|| panic!("edge {edge:?} is not present in this graph"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::test_util::assert_graph_contract;
    use crate::lattice::Lattice2D;

    /// builds the CSR parity matrix of the X-stabilizers of an `L x L` toric code:
    /// row `r*L+c` (a stabilizer) touches the 4 qubits (edges) incident to vertex `(r, c)`
    /// of `Lattice2D(L)`, reproducing the same graph through a completely different
    /// construction path.
    fn toric_csr(l: VertexIndex) -> (usize, usize, Vec<usize>, Vec<usize>) {
        let lattice = Lattice2D::new(l);
        let num_parities = lattice.num_vertices() as usize;
        let num_qubits = lattice.num_edges() as usize;
        let mut col_indices = Vec::new();
        let mut indptr = vec![0usize];
        for v in 0..lattice.num_vertices() {
            for u in lattice.vertex_connections(v) {
                let idx = lattice.edge_idx(Edge::new(u, v));
                col_indices.push(idx as usize);
            }
            indptr.push(col_indices.len());
        }
        (num_parities, num_qubits, col_indices, indptr)
    }

    #[test]
    fn csr_builder_matches_lattice_2d() {
        let l = 7;
        let lattice = Lattice2D::new(l);
        let (num_parities, num_qubits, col_indices, indptr) = toric_csr(l);
        let from_parity = LatticeFromParity::new(num_parities, num_qubits, &col_indices, &indptr).unwrap();
        assert_eq!(from_parity.num_vertices(), lattice.num_vertices());
        assert_eq!(from_parity.num_edges(), lattice.num_edges());
        for v in [0, 5, 20, (l * l - 1) as VertexIndex] {
            let mut expected: Vec<_> = lattice.vertex_connections(v);
            let mut actual: Vec<_> = from_parity.vertex_connections(v);
            expected.sort();
            actual.sort();
            assert_eq!(expected, actual, "neighbor sets differ at vertex {v}");
            for u in actual {
                let idx = from_parity.edge_idx(Edge::new(u, v));
                assert!((idx as EdgeNum) < from_parity.num_edges());
            }
        }
        assert_graph_contract(&from_parity);
    }

    #[test]
    fn csr_repeated_matches_lattice_cubic_shape() {
        let l = 3;
        let (num_parities, num_qubits, col_indices, indptr) = toric_csr(l);
        let repeated = LatticeFromParity::new_repeated(num_parities, num_qubits, &col_indices, &indptr, 3).unwrap();
        assert_eq!(repeated.num_vertices(), 27);
        assert_eq!(repeated.num_edges(), 3 * 27 - 9);
        for v in 0..27 {
            let degree = repeated.vertex_connection_count(v);
            assert!(degree == 5 || degree == 6, "unexpected degree {degree} at vertex {v}");
        }
        assert_graph_contract(&repeated);
    }

    #[test]
    fn rejects_qubit_with_wrong_parity_count() {
        // a single qubit touching 3 parities
        let result = LatticeFromParity::new(3, 1, &[0, 1, 2], &[0, 1, 2, 3]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert!(LatticeFromParity::new(0, 4, &[], &[0]).is_err());
        assert!(LatticeFromParity::new(4, 0, &[], &[0, 0, 0, 0, 0]).is_err());
    }

    #[test]
    fn rejects_repetitions_below_two() {
        assert!(LatticeFromParity::new_repeated(2, 1, &[0, 1], &[0, 2], 1).is_err());
        assert!(LatticeFromParity::new_repeated(2, 1, &[0, 1], &[0, 2], 0).is_err());
    }
}
