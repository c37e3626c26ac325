//! Masonry CLI.
//!
//! Computes layouts and simulates the animation engine for item files.
//! Logging goes to stderr and is controlled with `RUST_LOG` (default `warn`).

use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    if let Err(err) = masonry_lib::cli::run() {
        eprintln!("masonry: {err}");
        std::process::exit(1);
    }
}
