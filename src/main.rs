//! Coilwatch release builder.
//!
//! This binary compiles the native sensor library, assembles the
//! per-architecture distribution, signs it and packages the installer,
//! with proper error handling and failure reporting.

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match coilwatch_release::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
