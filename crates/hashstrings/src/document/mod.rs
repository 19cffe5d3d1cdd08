//! Input documents.
//!
//! A hash file describes one keyword table:
//!
//! ```text
//! prefix = "Token";
//!
//! mappings = {
//!     ignoreCase = true;
//!     digit = "0-9";
//!     space = " \t";
//! };
//!
//! keywords = [ "if", "else", "elif,elif,elsif", "while" ];
//! ```
//!
//! The syntax is the libconfig format. Inputs named `*.json` are read as
//! JSON objects with the same three members instead.
//!
//! Keyword and class strings are kept as bytes, so `\x80`-`\xff` escapes
//! survive. JSON strings contribute their UTF-8 encoding.
//!
//! # Example
//!
//! ```
//! use hashstrings::Document;
//!
//! let doc = Document::parse("prefix = \"Op\"; keywords = [\"add\", \"sub\"];")
//!     .expect("document should parse");
//! assert_eq!(doc.prefix, "Op");
//! assert_eq!(doc.keywords, [b"add".to_vec(), b"sub".to_vec()]);
//! assert!(!doc.mapping.ignore_case);
//! ```

mod parser;
mod value;

pub use parser::{Parser, parse};
pub use value::{Item, Setting, Value};

use crate::error::DocumentError;
use hashstrings_core::{BuildError, CharMapError, ClassSpec, MappingSpec};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Name of the case-folding flag inside `mappings`.
pub const IGNORE_CASE: &str = "ignoreCase";

/// Typed view of an input document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Prefix prepended to every generated identifier
    pub prefix: String,
    /// Character mapping specification
    pub mapping: MappingSpec,
    /// Raw `primary[,alias]*` keyword specifications
    pub keywords: Vec<Vec<u8>>,
    /// Source line of each keyword; empty for JSON input
    pub keyword_lines: Vec<usize>,
    /// Source line of each mapping class; empty for JSON input
    pub class_lines: Vec<usize>,
}

impl Document {
    /// Parse libconfig-style text.
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        let settings = parser::parse(text)?;
        Self::from_settings(&settings)
    }

    /// Parse a JSON document.
    pub fn from_json(text: &str) -> Result<Self, DocumentError> {
        let raw: JsonDocument = serde_json::from_str(text)?;

        let mut mapping = MappingSpec::default();
        for (name, value) in raw.mappings {
            match value {
                serde_json::Value::Bool(flag) if name.eq_ignore_ascii_case(IGNORE_CASE) => {
                    mapping.ignore_case = flag;
                }
                serde_json::Value::String(members) => {
                    mapping.classes.push(ClassSpec::new(name, members.into_bytes()));
                }
                other => {
                    return Err(DocumentError::JsonSchema(format!(
                        "Unsupported mapping '{name}': {other}"
                    )));
                }
            }
        }

        let doc = Self {
            prefix: raw.prefix,
            mapping,
            keywords: raw.keywords.into_iter().map(String::into_bytes).collect(),
            ..Self::default()
        };
        doc.validate_prefix(None)?;
        Ok(doc)
    }

    /// Parse according to the file extension of `path`.
    pub fn parse_for_path(path: &Path, text: &str) -> Result<Self, DocumentError> {
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(text)
        } else {
            Self::parse(text)
        }
    }

    /// Extract the typed view from parsed settings.
    ///
    /// Unknown top-level settings are ignored; `keywords` is required.
    pub fn from_settings(settings: &[Setting]) -> Result<Self, DocumentError> {
        let mut doc = Self::default();
        let mut has_keywords = false;

        for setting in settings {
            match setting.name.as_str() {
                "prefix" => {
                    let Value::String(prefix) = &setting.value else {
                        return Err(schema(setting.line, "'prefix' must be a string"));
                    };
                    doc.prefix = String::from_utf8_lossy(prefix).into_owned();
                    doc.validate_prefix(Some(setting.line))?;
                }
                "mappings" => (doc.mapping, doc.class_lines) = mapping_from(setting)?,
                "keywords" => {
                    (doc.keywords, doc.keyword_lines) = keywords_from(setting)?;
                    has_keywords = true;
                }
                other => debug!(setting = other, line = setting.line, "ignoring setting"),
            }
        }

        if !has_keywords {
            return Err(DocumentError::MissingSetting("keywords"));
        }
        Ok(doc)
    }

    /// Source line a table-building error refers to, when known.
    ///
    /// Keyword errors map through their position; class errors map through
    /// the class name, using the second declaration for duplicates.
    #[must_use]
    pub fn line_of(&self, err: &BuildError) -> Option<usize> {
        match err {
            BuildError::Keyword(err) => {
                let index = err.position().checked_sub(1)?;
                self.keyword_lines.get(index).copied()
            }
            BuildError::CharMap(err) => {
                let skip = usize::from(matches!(err, CharMapError::DuplicateClass(_)));
                let index = self
                    .mapping
                    .classes
                    .iter()
                    .enumerate()
                    .filter(|(_, class)| class.name == err.class_name())
                    .nth(skip)?
                    .0;
                self.class_lines.get(index).copied()
            }
            BuildError::Tree(_) => None,
        }
    }

    fn validate_prefix(&self, line: Option<usize>) -> Result<(), DocumentError> {
        if self.prefix.is_empty() || hashstrings_core::is_identifier(&self.prefix) {
            return Ok(());
        }
        let message = format!("Prefix '{}' is not a valid identifier", self.prefix);
        Err(match line {
            Some(line) => schema(line, message),
            None => DocumentError::JsonSchema(message),
        })
    }
}

#[derive(Debug, Deserialize)]
struct JsonDocument {
    #[serde(default)]
    prefix: String,
    #[serde(default)]
    mappings: serde_json::Map<String, serde_json::Value>,
    keywords: Vec<String>,
}

fn schema(line: usize, message: impl Into<String>) -> DocumentError {
    DocumentError::Schema {
        message: message.into(),
        line,
    }
}

fn mapping_from(setting: &Setting) -> Result<(MappingSpec, Vec<usize>), DocumentError> {
    let Value::Group(members) = &setting.value else {
        return Err(schema(
            setting.line,
            format!("'mappings' must be a group, not {}", setting.value.kind()),
        ));
    };

    let mut mapping = MappingSpec::default();
    let mut lines = Vec::new();
    for member in members {
        match &member.value {
            Value::Bool(flag) if member.name.eq_ignore_ascii_case(IGNORE_CASE) => {
                mapping.ignore_case = *flag;
            }
            Value::String(chars) => {
                mapping
                    .classes
                    .push(ClassSpec::new(member.name.as_str(), chars.as_slice()));
                lines.push(member.line);
            }
            other => {
                return Err(schema(
                    member.line,
                    format!("Unsupported {} mapping '{}'", other.kind(), member.name),
                ));
            }
        }
    }
    Ok((mapping, lines))
}

fn keywords_from(setting: &Setting) -> Result<(Vec<Vec<u8>>, Vec<usize>), DocumentError> {
    let Value::Array(items) = &setting.value else {
        return Err(schema(
            setting.line,
            format!("'keywords' must be an array, not {}", setting.value.kind()),
        ));
    };

    items
        .iter()
        .map(|item| match &item.value {
            Value::String(keyword) => Ok((keyword.clone(), item.line)),
            other => Err(schema(
                item.line,
                format!("Keyword must be a string, not {}", other.kind()),
            )),
        })
        .collect()
}
