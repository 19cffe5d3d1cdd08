//! Batch driver: one header per input file.

use crate::config::GeneratorConfig;
use crate::document::Document;
use crate::emit::HeaderEmitter;
use crate::error::GenerateError;
use hashstrings_core::{Fnv1aMixer, HashMixer, KeywordTable};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

/// Processes the configured files in order.
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    /// Create a generator.
    ///
    /// # Errors
    ///
    /// Returns `GenerateError::Config` if the configuration is invalid.
    pub fn new(config: GeneratorConfig) -> Result<Self, GenerateError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate a header for every input, stopping at the first failure.
    ///
    /// Returns the paths written.
    ///
    /// # Errors
    ///
    /// Returns the error of the first input that fails; later inputs are
    /// not processed.
    pub fn run(&self) -> Result<Vec<PathBuf>, GenerateError> {
        self.config
            .files
            .iter()
            .map(|input| self.generate_file(input))
            .collect()
    }

    /// Generate the header for one input file.
    ///
    /// Nothing is written unless the whole header renders.
    ///
    /// # Errors
    ///
    /// Returns `GenerateError` if the input cannot be read or parsed, the
    /// table cannot be built, or the output cannot be written.
    pub fn generate_file(&self, input: &Path) -> Result<PathBuf, GenerateError> {
        let output = output_path(input, self.config.extension());
        if output == input {
            return Err(GenerateError::OutputIsInput(input.to_path_buf()));
        }

        let text = std::fs::read_to_string(input).map_err(|source| GenerateError::Read {
            path: input.to_path_buf(),
            source,
        })?;

        let header = self.render(input, &text)?;

        std::fs::write(&output, header).map_err(|source| GenerateError::Write {
            path: output.clone(),
            source,
        })?;

        info!("Wrote {} from {}", output.display(), input.display());
        Ok(output)
    }

    /// Render the header for `text`, read from `input`.
    ///
    /// # Errors
    ///
    /// Returns `GenerateError::Document` or `GenerateError::Build`.
    pub fn render(&self, input: &Path, text: &str) -> Result<String, GenerateError> {
        let doc = Document::parse_for_path(input, text).map_err(|source| {
            GenerateError::Document {
                path: input.to_path_buf(),
                source,
            }
        })?;

        let table = KeywordTable::build(&doc.mapping, &doc.keywords).map_err(|source| {
            GenerateError::Build {
                path: input.to_path_buf(),
                line: doc.line_of(&source),
                source,
            }
        })?;
        debug!(
            classes = table.charmap.classes().len(),
            keywords = table.keywords.entries().len(),
            records = table.skip_table.len(),
            depth = table.skip_table.depth(),
            "built table for {}",
            input.display()
        );

        let stamp = if self.config.reproducible {
            content_stamp(input, text)
        } else {
            clock_stamp()
        };
        let source_name = input.display().to_string();

        Ok(HeaderEmitter::new(&doc.prefix, &source_name, stamp, &table).render())
    }
}

/// Output path for `input`: its extension replaced by `extension`.
///
/// A leading dot on `extension` is ignored.
#[must_use]
pub fn output_path(input: &Path, extension: &str) -> PathBuf {
    input.with_extension(extension.strip_prefix('.').unwrap_or(extension))
}

/// Include-guard stamp from the wall clock.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn clock_stamp() -> u32 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    (now.as_secs() ^ u64::from(now.subsec_nanos())) as u32
}

/// Include-guard stamp derived from the input path and content.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn content_stamp(input: &Path, text: &str) -> u32 {
    let path = input.to_string_lossy();
    let bytes = path.bytes().chain(text.bytes()).map(u16::from);
    Fnv1aMixer.hash_codes(bytes) as u32
}
