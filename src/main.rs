//! tourist-safety CLI entry point
//!
//! Safety scoring and tourist tracking service - CLI + HTTP API

use tourist_safety::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
