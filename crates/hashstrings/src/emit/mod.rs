//! C header generation.
//!
//! [`HeaderEmitter`] renders a built [`KeywordTable`] as a C header. The
//! layout is fixed:
//!
//! 1. banner comment and include guard
//! 2. symbol-class enum and packed character map (only when classes exist)
//! 3. keyword index enum
//! 4. index to name array
//! 5. the pre-order search tree (only when there are records)
//! 6. guard terminator
//!
//! Consumers search the tree from index 0, following `lower` when the query
//! hash is smaller and `higher` when it is larger; a child of 0 ends the
//! search.

mod escape;

pub use escape::{c_string, map_field};

use hashstrings_core::KeywordTable;
use hashstrings_core::charmap::{FIELDS_PER_WORD, PACKED_WORDS, unpack_field};
use std::fmt;

/// Tool name written into the banner.
pub const TOOL_NAME: &str = "hashstrings";

/// Column the child indices of a search-tree row are aligned to.
const RECORD_COLUMN: usize = 78;

/// Width the quoted text of a search-tree row is padded to.
const TEXT_COLUMN: usize = 16;

/// Renders one generated header.
#[derive(Debug, Clone, Copy)]
pub struct HeaderEmitter<'a> {
    prefix: &'a str,
    source_name: &'a str,
    stamp: u32,
    table: &'a KeywordTable,
}

impl<'a> HeaderEmitter<'a> {
    /// Create an emitter for `table`, built from the file `source_name`.
    #[must_use]
    pub const fn new(
        prefix: &'a str,
        source_name: &'a str,
        stamp: u32,
        table: &'a KeywordTable,
    ) -> Self {
        Self {
            prefix,
            source_name,
            stamp,
            table,
        }
    }

    /// Render the header to a string.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }

    fn write_banner(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "/*")?;
        writeln!(
            f,
            "    This file was automatically generated by the {TOOL_NAME} tool."
        )?;
        writeln!(f, "    Please see https://github.com/paul-chambers/HashStrings")?;
        writeln!(f, "    **** any changes you make here will be overwritten ****")?;
        writeln!(
            f,
            "    Please edit the original file '{}' instead.",
            self.source_name
        )?;
        writeln!(f, "*/")?;
        writeln!(f)?;
        writeln!(f, "#ifndef Once_{:08x}", self.stamp)?;
        writeln!(f, "#define Once_{:08x}", self.stamp)?;
        writeln!(f)?;
        writeln!(f, "#include <libhashstrings.h>")?;
        writeln!(f)
    }

    fn write_mapping(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.prefix;
        let map = &self.table.charmap;

        writeln!(f)?;
        writeln!(f, "typedef enum {{")?;
        for class in map.classes() {
            writeln!(f, "    k{p}{:<16} = {},", class.name(), class.code())?;
        }
        writeln!(f, "    k{p}Max")?;
        writeln!(f, "}} t{p}Mapping;")?;
        writeln!(f)?;

        writeln!(f, "uint64_t g{p}CharMap[] = {{")?;
        let words = map.packed();
        for (i, word) in words.iter().enumerate() {
            let sep = if i + 1 < PACKED_WORDS { ',' } else { ' ' };
            write!(f, "    0x{word:016x}{sep}    /*")?;
            for field in 0..FIELDS_PER_WORD {
                f.write_str(&map_field(map, unpack_field(*word, field)))?;
            }
            writeln!(f, " */")?;
        }
        writeln!(f, "}};")?;
        writeln!(f)
    }

    fn write_index(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.prefix;
        let keywords = &self.table.keywords;

        writeln!(f)?;
        writeln!(f, "typedef enum {{")?;
        writeln!(f, "    k{p}Unknown = 0,")?;
        for entry in keywords.entries() {
            writeln!(
                f,
                "    k{p}{:<16} = {},",
                entry.identifier(),
                entry.target_index()
            )?;
        }
        writeln!(f, "    k{p}MaxIndex = {}", keywords.max_index())?;
        writeln!(f, "}} t{p}Index;")?;
        writeln!(f)?;

        writeln!(f, "const char * lookup{p}AsString[] =")?;
        writeln!(f, "{{")?;
        writeln!(f, "    [ k{p}Unknown ] = \"(unknown)\",")?;
        for entry in keywords.entries() {
            writeln!(
                f,
                "    [ k{p}{:<16} ] = \"{}\",",
                entry.identifier(),
                c_string(entry.name())
            )?;
        }
        writeln!(f, "    [ k{p}MaxIndex ] = NULL")?;
        writeln!(f, "}};")?;
        writeln!(f)
    }

    fn write_search(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.prefix;

        writeln!(f, "/* pre-computed binary search tree */")?;
        writeln!(f)?;
        writeln!(f, "tRecord map{p}Search[] = {{")?;
        for node in &self.table.skip_table {
            let identifier = self
                .table
                .keywords
                .entry(node.target_index)
                .map(hashstrings_core::KeywordEntry::identifier)
                .unwrap_or_default();
            let text = c_string(&node.source_text);
            let text_pad = TEXT_COLUMN.saturating_sub(text.len()).max(1);
            let head = format!(
                "    {{ 0x{:016x}, \"{text}\",{:text_pad$} k{p}{identifier},",
                node.hash, ""
            );
            let record_pad = RECORD_COLUMN.saturating_sub(head.len()).max(1);
            writeln!(
                f,
                "{head}{:record_pad$} {:2}, {:2} }},",
                "",
                node.lower_index(),
                node.higher_index()
            )?;
        }
        writeln!(f, "}};")?;
        writeln!(f)
    }
}

impl fmt::Display for HeaderEmitter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_banner(f)?;
        if self.table.charmap.has_classes() {
            self.write_mapping(f)?;
        }
        self.write_index(f)?;
        if !self.table.skip_table.is_empty() {
            self.write_search(f)?;
        }
        writeln!(f, "#endif")?;
        writeln!(f)?;
        writeln!(f, "/* end of automatically-generated file */")
    }
}
