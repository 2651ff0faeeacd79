//! Benchmark / CLI harness
//!
//! A thin external consumer of the library surface, not part of the decoder's tested
//! contract. Runs repeated shots over a fixed `(L, p)` lattice/error-rate pair,
//! timing each decode and grading it for logical errors.
//!

use super::decoder::UnionFindDecoder;
use super::graph::DecodingGraph;
use super::lattice::Lattice2D;
use super::lazy_decoder::LazyPreDecoder;
use super::syndrome::{detect_logical_error, project_errors_to_syndrome, sample_independent_errors};
use super::util::*;
use clap::Parser;
use pbr::ProgressBar;
use rand::{thread_rng, Rng};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

#[derive(Parser, Clone)]
#[clap(author = clap::crate_authors!(", "))]
#[clap(version = env!("CARGO_PKG_VERSION"))]
#[clap(about = "Union-Find decoder benchmark harness")]
pub struct Cli {
    /// lattice linear size
    #[clap(value_parser)]
    pub l: VertexIndex,
    /// physical error probability per edge
    #[clap(value_parser)]
    pub p: f64,
    /// number of shots to run
    #[clap(short = 'r', long, default_value_t = 1000)]
    pub total_rounds: usize,
    /// use a deterministic seed sequence (round index) instead of a fresh random seed per shot
    #[clap(long, action)]
    pub use_deterministic_seed: bool,
    /// message shown on the progress bar
    #[clap(long, default_value_t = format!(""))]
    pub pb_message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkResult {
    #[serde(rename = "L")]
    pub l: VertexIndex,
    pub p: f64,
    pub average_microseconds: f64,
    pub accuracy: f64,
}

/// the two independent logical operators of an `L x L` toric lattice: the horizontal
/// ring through row 0, and the vertical ring through column 0
fn canonical_logical_operators(lattice: &Lattice2D) -> [Vec<Edge>; 2] {
    let l = lattice.linear_size();
    let vertex_of = |r: VertexIndex, c: VertexIndex| (r % l) * l + (c % l);
    let horizontal_ring = (0..l).map(|c| Edge::new(vertex_of(0, c), vertex_of(0, (c + 1) % l))).collect();
    let vertical_ring = (0..l).map(|r| Edge::new(vertex_of(r, 0), vertex_of((r + 1) % l, 0))).collect();
    [horizontal_ring, vertical_ring]
}

impl Cli {
    pub fn run(&self) -> BenchmarkResult {
        let lattice = Arc::new(Lattice2D::new(self.l));
        let logical_operators = canonical_logical_operators(&lattice);
        let lazy = LazyPreDecoder::new(lattice.as_ref());
        let mut decoder = UnionFindDecoder::new(Arc::clone(&lattice));

        let mut pb = ProgressBar::on(std::io::stderr(), self.total_rounds as u64);
        pb.message(format!("{} ", self.pb_message).as_str());
        let mut rng = thread_rng();
        let mut total_nanos: u128 = 0;
        let mut correct_rounds = 0usize;

        for round in 0..self.total_rounds as u64 {
            pb.set(round);
            let seed = if self.use_deterministic_seed { round } else { rng.gen() };
            let true_error = sample_independent_errors(lattice.as_ref(), self.p, seed);
            let mut syndrome = project_errors_to_syndrome(lattice.as_ref(), &true_error);

            let started = Instant::now();
            let (success, mut correction) = lazy.decode(&mut syndrome);
            if !success {
                decoder.clear();
                correction.extend(decoder.decode(&mut syndrome));
            }
            total_nanos += started.elapsed().as_nanos();

            if !detect_logical_error(&correction, &true_error, &logical_operators) {
                correct_rounds += 1;
            }
        }
        pb.finish();
        println!();

        BenchmarkResult {
            l: self.l,
            p: self.p,
            average_microseconds: total_nanos as f64 / self.total_rounds as f64 / 1000.0,
            accuracy: correct_rounds as f64 / self.total_rounds as f64,
        }
    }
}

/// `p` rendered as an integer by scaling by 1e6 and truncating, so the filename never
/// contains a literal decimal point
pub fn output_filename(l: VertexIndex, p: f64) -> String {
    let p_scaled = (p * 1_000_000.0) as u64;
    format!("out_L{l}_P{p_scaled}.json")
}
