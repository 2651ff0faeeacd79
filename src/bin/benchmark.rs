// cargo run --bin benchmark -- <L> <p>

use clap::Parser;
use serde_json::to_string_pretty;
use std::fs::File;
use std::io::Write;
use union_find_decoder::cli::{output_filename, Cli};

fn main() {
    let cli = Cli::parse();
    let result = cli.run();
    let json = to_string_pretty(&result).expect("benchmark result must serialize");
    println!("{json}");
    let filename = output_filename(cli.l, cli.p);
    let mut file = File::create(&filename).unwrap_or_else(|e| panic!("failed to create {filename}: {e}"));
    file.write_all(json.as_bytes()).expect("failed to write benchmark result");
}
