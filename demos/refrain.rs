use refrain_rs::{build_index, codec};
use std::io::{self, Read, Write};
use tracing_subscriber::EnvFilter;

/// Reads an offset-encoded text from stdin and prints its refrain.
///
/// Usage: cargo run --example refrain < input.txt
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut input = String::new();
    if let Err(err) = io::stdin().read_to_string(&mut input) {
        eprintln!("Error reading input: {}", err);
        std::process::exit(1);
    }

    let text = codec::decode(&input).unwrap_or_else(|err| {
        eprintln!("Invalid input: {}", err);
        std::process::exit(1);
    });

    let refrain = build_index(text).dominant_repeat();

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout.write_all(codec::encode(&refrain).as_bytes()) {
        eprintln!("Error writing output: {}", err);
        std::process::exit(1);
    }
}
