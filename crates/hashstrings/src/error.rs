//! Error types for the generator.
//!
//! [`DocumentError`] covers reading a hash file, [`ConfigError`] the command
//! line and [`GenerateError`] one input-to-header run.

use hashstrings_core::BuildError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading an input document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The text does not follow the configuration syntax
    #[error("{message} at line {line}, column {column}: \"{excerpt}\"")]
    Syntax {
        /// Description of the problem
        message: String,
        /// 1-based line number
        line: usize,
        /// 1-based column number
        column: usize,
        /// The offending source line
        excerpt: String,
    },

    /// The document parsed but a setting has the wrong shape
    #[error("{message} at line {line}")]
    Schema {
        /// Description of the problem
        message: String,
        /// 1-based line of the offending setting
        line: usize,
    },

    /// A required top-level setting is absent
    #[error("Missing required setting '{0}'")]
    MissingSetting(&'static str),

    /// Invalid JSON input
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON document parsed but a member has the wrong shape
    #[error("{0}")]
    JsonSchema(String),
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Output extension is empty or contains a path separator
    #[error("Invalid output extension '{0}'")]
    InvalidExtension(String),
}

/// Errors raised while generating one output file.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Input file could not be read
    #[error("Unable to read '{path}': {source}")]
    Read {
        /// Input path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Output file could not be written
    #[error("Unable to write '{path}': {source}")]
    Write {
        /// Output path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Output path would overwrite the input
    #[error("Output for '{0}' would overwrite the input file")]
    OutputIsInput(PathBuf),

    /// Input document is malformed
    #[error("Unable to parse '{path}': {source}")]
    Document {
        /// Input path
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: DocumentError,
    },

    /// Keyword table could not be built
    #[error("Unable to build table for '{path}'{}: {source}", at_line(.line))]
    Build {
        /// Input path
        path: PathBuf,
        /// 1-based line of the keyword or class at fault, when known
        line: Option<usize>,
        /// Underlying build error
        #[source]
        source: BuildError,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

// thiserror hands format helpers a reference to the field
#[allow(clippy::ref_option)]
fn at_line(line: &Option<usize>) -> String {
    line.map_or_else(String::new, |line| format!(" at line {line}"))
}

impl GenerateError {
    /// Process exit status for this error.
    ///
    /// File access failures report the operating system error code; every
    /// other failure reports 1.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => {
                source.raw_os_error().filter(|&code| code != 0).unwrap_or(1)
            }
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashstrings_core::TreeError;

    #[test]
    fn test_syntax_error_message() {
        let err = DocumentError::Syntax {
            message: "Expected '=' or ':'".to_string(),
            line: 3,
            column: 9,
            excerpt: "prefix \"x\";".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Expected '=' or ':' at line 3, column 9: \"prefix \"x\";\""
        );
    }

    #[test]
    fn test_exit_codes() {
        let err = GenerateError::Read {
            path: PathBuf::from("missing.hash"),
            source: std::io::Error::from_raw_os_error(2),
        };
        assert_eq!(err.exit_code(), 2);

        let err = GenerateError::Write {
            path: PathBuf::from("out.h"),
            source: std::io::Error::other("synthetic"),
        };
        assert_eq!(err.exit_code(), 1);

        let err = GenerateError::Build {
            path: PathBuf::from("a.hash"),
            line: None,
            source: BuildError::Tree(TreeError::TooManyRecords(0)),
        };
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_build_error_message_names_line() {
        let source = || BuildError::Tree(TreeError::TooManyRecords(0));
        let err = GenerateError::Build {
            path: PathBuf::from("a.hash"),
            line: Some(4),
            source: source(),
        };
        assert_eq!(
            err.to_string(),
            format!("Unable to build table for 'a.hash' at line 4: {}", source())
        );

        let err = GenerateError::Build {
            path: PathBuf::from("a.hash"),
            line: None,
            source: source(),
        };
        assert_eq!(
            err.to_string(),
            format!("Unable to build table for 'a.hash': {}", source())
        );
    }
}
