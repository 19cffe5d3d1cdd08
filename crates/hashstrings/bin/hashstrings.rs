//! Hashstrings binary entry point.
//!
//! Thin wrapper around the hashstrings library that:
//! 1. Initializes logging
//! 2. Parses command-line arguments
//! 3. Generates one header per input file
//!
//! The process exits with the operating system error code when a file cannot
//! be opened or created, 1 for any other failure and 2 for usage errors.

use anyhow::Result;
use hashstrings::{GenerateError, Generator, GeneratorConfig};

fn main() {
    // Quiet unless RUST_LOG asks for more
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        let code = err
            .downcast_ref::<GenerateError>()
            .map_or(1, GenerateError::exit_code);
        tracing::error!(code, "generation failed");
        eprintln!("hashstrings: {err}");
        std::process::exit(code);
    }
}

fn run() -> Result<()> {
    let config = GeneratorConfig::from_args();
    tracing::debug!(
        "Configuration loaded: extension={}, reproducible={}, files={:?}",
        config.extension(),
        config.reproducible,
        config.files
    );

    let generator = Generator::new(config)?;
    let written = generator.run()?;
    tracing::info!("Generated {} header(s)", written.len());

    Ok(())
}
