//! Integration tests for header generation.
//!
//! These tests write real hash files to a temporary directory and run the
//! generator over them.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use hashstrings::generator::content_stamp;
use hashstrings::{GenerateError, Generator, GeneratorConfig};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const IF_ELSE_WHILE: &str = r#"
# control flow keywords
keywords = [ "if", "else", "while" ];
"#;

/// Write `text` to `name` inside `dir`.
fn write_input(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).expect("Failed to write test input");
    path
}

fn reproducible<I: IntoIterator<Item = PathBuf>>(files: I) -> Generator {
    let mut config = GeneratorConfig::for_files(files);
    config.reproducible = true;
    Generator::new(config).expect("valid configuration")
}

#[test]
fn test_if_else_while_header() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "flow.hash", IF_ELSE_WHILE);

    let written = reproducible([input.clone()]).run().unwrap();
    assert_eq!(written, [dir.path().join("flow.h")]);

    let stamp = content_stamp(&input, IF_ELSE_WHILE);
    let expected = format!(
        r#"/*
    This file was automatically generated by the hashstrings tool.
    Please see https://github.com/paul-chambers/HashStrings
    **** any changes you make here will be overwritten ****
    Please edit the original file '{source}' instead.
*/

#ifndef Once_{stamp:08x}
#define Once_{stamp:08x}

#include <libhashstrings.h>


typedef enum {{
    kUnknown = 0,
    kIf               = 1,
    kElse             = 2,
    kWhile            = 3,
    kMaxIndex = 4
}} tIndex;

const char * lookupAsString[] =
{{
    [ kUnknown ] = "(unknown)",
    [ kIf               ] = "if",
    [ kElse             ] = "else",
    [ kWhile            ] = "while",
    [ kMaxIndex ] = NULL
}};

/* pre-computed binary search tree */

tRecord mapSearch[] = {{
    {{ 0x7f2b6c605332dd30, "else",             kElse,                            1,  2 }},
    {{ 0x08b73007b55c3e26, "if",               kIf,                              0,  0 }},
    {{ 0xce87a3885811296e, "while",            kWhile,                           0,  0 }},
}};

#endif

/* end of automatically-generated file */
"#,
        source = input.display()
    );

    assert_eq!(fs::read_to_string(&written[0]).unwrap(), expected);
}

#[test]
fn test_prefix_and_mapping_table() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        &dir,
        "http.hash",
        r#"
        prefix = "Proto";
        mappings = {
            ignoreCase = true;
            digit = "0-9";
        };
        keywords = [ "http", "https", "h2" ];
        "#,
    );

    let written = reproducible([input]).run().unwrap();
    let header = fs::read_to_string(&written[0]).unwrap();

    assert!(header.contains("    kProtodigit            = 256,\n    kProtoMax\n} tProtoMapping;\n"));
    assert!(header.contains("uint64_t gProtoCharMap[] = {\n"));
    assert!(header.contains("    kProtoH2               = 3,\n"));
    assert!(header.contains("    kProtoMaxIndex = 4\n} tProtoIndex;\n"));
    assert!(header.contains("tRecord mapProtoSearch[] = {\n"));
    // 'A' folds to 'a', so the word holding bytes 63..=69 shows lower case
    assert!(header.contains("/* '?'  '@'  'a'  'b'  'c'  'd'  'e'  */"));
}

#[test]
fn test_hash_collision_leaves_no_output() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        &dir,
        "versions.hash",
        r#"
        mappings = { digit = "0-9"; };
        keywords = [ "v1", "v2" ];
        "#,
    );

    let err = reproducible([input.clone()]).run().unwrap_err();
    assert!(matches!(err, GenerateError::Build { .. }));
    assert_eq!(err.exit_code(), 1);
    assert!(err.to_string().contains("Hash collision"));
    assert!(!dir.path().join("versions.h").exists());
}

#[test]
fn test_build_errors_name_the_line() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "alias.hash", "keywords = [\n \"if\",\n \",alias\"\n];\n");

    let err = reproducible([input]).run().unwrap_err();
    assert!(matches!(err, GenerateError::Build { line: Some(3), .. }));
    assert!(err.to_string().contains("at line 3"), "{err}");
    assert!(!dir.path().join("alias.h").exists());
}

#[test]
fn test_empty_class_names_the_line() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        &dir,
        "classes.hash",
        "mappings = {\n  digit = \"0-9\";\n  blank = \"\";\n};\nkeywords = [ \"if\" ];\n",
    );

    let err = reproducible([input]).run().unwrap_err();
    assert!(err.to_string().contains("at line 3"), "{err}");
    assert!(err.to_string().contains("'blank'"), "{err}");
}

#[test]
fn test_empty_keyword_list() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "none.hash", "keywords = [];\n");

    let written = reproducible([input]).run().unwrap();
    let header = fs::read_to_string(&written[0]).unwrap();

    assert!(header.contains("    kMaxIndex = 1\n} tIndex;\n"));
    assert!(!header.contains("mapSearch"));
    assert!(header.ends_with("NULL\n};\n\n#endif\n\n/* end of automatically-generated file */\n"));
}

#[test]
fn test_high_byte_class_and_alias() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        &dir,
        "latin1.hash",
        r#"
        mappings = { high = "\x80-\xff"; };
        keywords = [ "cafe,caf\xe9" ];
        "#,
    );

    let written = reproducible([input]).run().unwrap();
    let header = fs::read_to_string(&written[0]).unwrap();

    assert!(header.contains("    khigh             = 256,\n"));
    // the word holding bytes 245..=251
    assert!(header.contains("/* (high) (high) (high) (high) (high) (high) (high) */"));
    assert!(header.contains("\"caf\\351\","), "{header}");
    assert!(header.contains("    [ kCafe             ] = \"cafe\",\n"));
}

#[test]
fn test_extension_is_configurable() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "flow.hash", IF_ELSE_WHILE);

    let mut config = GeneratorConfig::for_files([input]);
    config.extension = ".hpp".to_string();
    let written = Generator::new(config).unwrap().run().unwrap();

    assert_eq!(written, [dir.path().join("flow.hpp")]);
    assert!(written[0].exists());
}

#[test]
fn test_json_input() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        &dir,
        "flow.json",
        r#"{ "prefix": "Js", "keywords": ["if", "else", "while"] }"#,
    );

    let written = reproducible([input]).run().unwrap();
    assert_eq!(written, [dir.path().join("flow.h")]);

    let header = fs::read_to_string(&written[0]).unwrap();
    assert!(header.contains("    kJsWhile            = 3,\n"));
}

#[test]
fn test_first_failure_halts_run() {
    let dir = TempDir::new().unwrap();
    let good = write_input(&dir, "good.hash", IF_ELSE_WHILE);
    let bad = write_input(&dir, "bad.hash", "keywords = [ \"if\" \n");
    let later = write_input(&dir, "later.hash", IF_ELSE_WHILE);

    let err = reproducible([good, bad.clone(), later]).run().unwrap_err();
    match &err {
        GenerateError::Document { path, source } => {
            assert_eq!(path, &bad);
            assert!(source.to_string().contains("line 2"), "{source}");
        }
        other => panic!("unexpected error: {other}"),
    }

    assert!(dir.path().join("good.h").exists());
    assert!(!dir.path().join("bad.h").exists());
    assert!(!dir.path().join("later.h").exists());
}

#[test]
fn test_missing_input_reports_os_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.hash");
    let expected = fs::File::open(&missing)
        .unwrap_err()
        .raw_os_error()
        .expect("OS error code");

    let err = reproducible([missing]).run().unwrap_err();
    assert!(matches!(err, GenerateError::Read { .. }));
    assert_eq!(err.exit_code(), expected);
}

#[test]
fn test_unwritable_output_reports_write_error() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "flow.hash", IF_ELSE_WHILE);
    // A directory where the header should go
    fs::create_dir(dir.path().join("flow.h")).unwrap();

    let err = reproducible([input]).run().unwrap_err();
    match &err {
        GenerateError::Write { path, .. } => assert_eq!(path, &dir.path().join("flow.h")),
        other => panic!("unexpected error: {other}"),
    }
    assert_ne!(err.exit_code(), 0);
}

#[test]
fn test_stamps_differ_per_input() {
    let a = content_stamp(Path::new("a.hash"), IF_ELSE_WHILE);
    let b = content_stamp(Path::new("b.hash"), IF_ELSE_WHILE);
    assert_ne!(a, b);
}
