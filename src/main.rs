//! roam-point CLI entry point
//!
//! Random real-world location generator - CLI + web app

use roam_point::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
