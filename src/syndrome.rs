//! Syndrome helpers (ambient, benchmark-facing)
//!
//! Error-to-syndrome projection, a deterministic noise sampler, and a logical-error
//! diagnostic. None of this is consulted by [`crate::decoder::UnionFindDecoder`] itself;
//! it is the glue the benchmark harness uses to generate shots and grade them.
//!

use super::graph::DecodingGraph;
use super::util::*;
use std::collections::HashSet;

/// XORs both endpoints of every flipped edge into a fresh syndrome vector.
pub fn project_errors_to_syndrome(graph: &impl DecodingGraph, flipped_edges: &[Edge]) -> Vec<u8> {
    let mut syndrome = vec![0u8; graph.num_vertices() as usize];
    for &edge in flipped_edges {
        let (u, v) = edge.endpoints();
        syndrome[u as usize] ^= 1;
        syndrome[v as usize] ^= 1;
    }
    syndrome
}

/// collects every distinct edge of `graph`, visiting each undirected pair once
fn all_edges(graph: &impl DecodingGraph) -> Vec<Edge> {
    let mut edges = Vec::new();
    for v in 0..graph.num_vertices() as VertexIndex {
        for u in graph.vertex_connections(v) {
            if u > v {
                edges.push(Edge::new(u, v));
            }
        }
    }
    edges
}

/// independent per-edge Bernoulli(p) sampling with a seeded, reproducible generator.
pub fn sample_independent_errors(graph: &impl DecodingGraph, p: f64, seed: u64) -> Vec<Edge> {
    use crate::rand_xoshiro::rand_core::SeedableRng;
    let mut rng = DeterministicRng::seed_from_u64(seed);
    all_edges(graph).into_iter().filter(|_| rng.next_f64() < p).collect()
}

/// for a space-time graph laid out as `repetitions` consecutive blocks of
/// `per_layer_vertices` entries, replaces each layer `h >= 1` with its XOR against
/// layer `h - 1`: a measurement error that is wrong in two consecutive rounds does not
/// itself register as a defect. Layer 0 (the first round) is left untouched.
pub fn layer_syndrome_diff(per_layer_vertices: usize, repetitions: usize, syndrome: &mut [u8]) {
    assert_eq!(
        syndrome.len(),
        per_layer_vertices * repetitions,
        "syndrome length must equal per_layer_vertices * repetitions"
    );
    for h in (1..repetitions).rev() {
        let (earlier, later) = syndrome.split_at_mut(h * per_layer_vertices);
        let prev = &earlier[(h - 1) * per_layer_vertices..h * per_layer_vertices];
        let cur = &mut later[..per_layer_vertices];
        for i in 0..per_layer_vertices {
            cur[i] ^= prev[i];
        }
    }
}

/// a benchmark-time diagnostic: not part of the decoder's contract. `true_error` is the
/// error actually sampled, `correction` is the decoder's proposal; their symmetric
/// difference is the net leftover error. A logical error occurred iff that leftover
/// intersects either reference logical operator's edge set an odd number of times.
pub fn detect_logical_error(correction: &[Edge], true_error: &[Edge], logical_operators: &[Vec<Edge>]) -> bool {
    let mut net: HashSet<Edge> = true_error.iter().copied().collect();
    for edge in correction {
        if !net.remove(edge) {
            net.insert(*edge);
        }
    }
    logical_operators
        .iter()
        .any(|operator| operator.iter().filter(|e| net.contains(e)).count() % 2 == 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::Lattice2D;

    #[test]
    fn projection_matches_flipped_endpoints() {
        let lattice = Lattice2D::new(3);
        let syndrome = project_errors_to_syndrome(&lattice, &[Edge::new(0, 1)]);
        assert_eq!(syndrome[0], 1);
        assert_eq!(syndrome[1], 1);
        assert!(syndrome[2..].iter().all(|&s| s == 0));
    }

    #[test]
    fn projection_of_a_cycle_is_empty() {
        let lattice = Lattice2D::new(3);
        // the full horizontal ring through row 0 touches each of its vertices twice
        let ring = vec![Edge::new(0, 1), Edge::new(1, 2), Edge::new(2, 0)];
        let syndrome = project_errors_to_syndrome(&lattice, &ring);
        assert!(syndrome.iter().all(|&s| s == 0));
    }

    #[test]
    fn sampling_is_reproducible_for_a_fixed_seed() {
        let lattice = Lattice2D::new(5);
        let first = sample_independent_errors(&lattice, 0.3, 42);
        let second = sample_independent_errors(&lattice, 0.3, 42);
        assert_eq!(first, second);
    }

    #[test]
    fn sampling_bounds_are_respected() {
        let lattice = Lattice2D::new(4);
        assert!(sample_independent_errors(&lattice, 0.0, 7).is_empty());
        assert_eq!(sample_independent_errors(&lattice, 1.0, 7).len(), lattice.num_edges() as usize);
    }

    #[test]
    fn layer_diff_cancels_a_persistent_measurement_error() {
        // a defect appearing identically in rounds 1 and 2 is one new event at round 1,
        // and no event at all at round 2 (it didn't change)
        let mut syndrome = vec![0u8, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0];
        layer_syndrome_diff(4, 3, &mut syndrome);
        assert_eq!(&syndrome[0..4], &[0, 0, 0, 0]); // round 0 is left untouched
        assert_eq!(&syndrome[4..8], &[1, 0, 0, 0]); // new relative to round 0
        assert_eq!(&syndrome[8..12], &[0, 0, 0, 0]); // unchanged from round 1, cancels
    }

    #[test]
    fn detects_a_logical_error_from_an_uncorrected_loop() {
        let loop_operator = vec![Edge::new(0, 1), Edge::new(1, 2), Edge::new(2, 0)];
        let true_error = loop_operator.clone();
        assert!(detect_logical_error(&[], &true_error, &[loop_operator.clone()]));
        assert!(!detect_logical_error(&loop_operator, &true_error, &[loop_operator]));
    }

    #[test]
    fn no_logical_error_when_net_is_disjoint_from_operator() {
        let loop_operator = vec![Edge::new(0, 1), Edge::new(1, 2), Edge::new(2, 0)];
        let true_error = vec![Edge::new(3, 4)];
        assert!(!detect_logical_error(&[], &true_error, &[loop_operator]));
    }
}
