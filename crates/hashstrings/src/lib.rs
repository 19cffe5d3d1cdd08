//! Keyword header generator.
//!
//! Reads hash files describing a character mapping and a keyword list, and
//! writes C headers holding a pre-computed binary search tree over the
//! keyword hashes. The table construction itself lives in
//! [`hashstrings_core`]; this crate adds:
//! - `document`: the libconfig (or JSON) input format
//! - `emit`: header rendering
//! - `generator`: the per-file batch driver
//! - `config`: CLI and environment configuration
//!
//! # Example
//!
//! ```
//! use hashstrings::{Generator, GeneratorConfig};
//! use std::path::Path;
//!
//! let generator = Generator::new(GeneratorConfig::for_files(["tokens.hash"]))
//!     .expect("valid configuration");
//! let header = generator
//!     .render(Path::new("tokens.hash"), r#"keywords = [ "if", "else", "while" ];"#)
//!     .expect("header should render");
//!
//! assert!(header.contains("kWhile            = 3,"));
//! assert!(header.contains("kMaxIndex = 4"));
//! ```

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod config;
pub mod document;
pub mod emit;
pub mod error;
pub mod generator;

pub use config::GeneratorConfig;
pub use document::Document;
pub use emit::HeaderEmitter;
pub use error::{ConfigError, DocumentError, GenerateError};
pub use generator::{Generator, output_path};
