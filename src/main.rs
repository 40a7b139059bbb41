mod accounts;
mod clients;
mod engine;
mod errors;
mod history;
mod orchestrator;
mod transactions;

use std::env;
use std::process;

use log::info;
use orchestrator::run;

fn main() {
    // Collect command-line arguments - expecting exactly one argument for the CSV file path
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <operations.csv>", args[0]);
        process::exit(1);
    }
    let filename = &args[1];
    // Initialize logger (respect RUST_LOG env var if set)
    env_logger::init();

    info!("starting bank ledger with file: {}", filename);

    if let Err(e) = run(filename) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
