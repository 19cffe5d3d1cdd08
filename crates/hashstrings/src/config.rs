//! Generator configuration.
//!
//! Settings come from CLI arguments, with environment variable fallbacks:
//! - `--extension` / `HASHSTRINGS_EXTENSION`: output file extension
//! - `--reproducible` / `HASHSTRINGS_REPRODUCIBLE`: derive include-guard
//!   stamps from the input instead of the clock
//!
//! # Example
//!
//! ```no_run
//! use hashstrings::GeneratorConfig;
//!
//! let config = GeneratorConfig::from_args();
//! config.validate().expect("Invalid configuration");
//!
//! println!("writing .{} files", config.extension());
//! ```

use crate::error::ConfigError;
use clap::Parser;
use clap::builder::FalseyValueParser;
use std::path::PathBuf;

/// Command line configuration.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "hashstrings",
    about = "Process hash files into C headers holding static keyword lookup tables",
    version
)]
pub struct GeneratorConfig {
    /// Extension of the generated header files
    #[arg(
        short = 'x',
        long,
        env = "HASHSTRINGS_EXTENSION",
        default_value = "h",
        value_name = "EXT"
    )]
    pub extension: String,

    /// Derive include-guard stamps from the input path and content
    #[arg(
        long,
        env = "HASHSTRINGS_REPRODUCIBLE",
        value_parser = FalseyValueParser::new()
    )]
    pub reproducible: bool,

    /// Hash files to process
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

impl GeneratorConfig {
    /// Parse configuration from command-line arguments.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Configuration for `files` with default settings.
    #[must_use]
    pub fn for_files<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            extension: "h".to_string(),
            reproducible: false,
            files: files.into_iter().map(Into::into).collect(),
        }
    }

    /// Output extension without any leading dot.
    #[must_use]
    pub fn extension(&self) -> &str {
        self.extension.strip_prefix('.').unwrap_or(&self.extension)
    }

    /// Validate configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidExtension` if the extension is empty or
    /// contains a path separator.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ext = self.extension();
        if ext.is_empty() || ext.contains(['/', '\\']) {
            return Err(ConfigError::InvalidExtension(self.extension.clone()));
        }
        Ok(())
    }
}
