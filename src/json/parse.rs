//! Purpose: Read JSON documents from disk and classify parse failures.
//! Exports: `read_document`, `from_slice`, `ParseFailureCategory`, `categorize_error`, `hint_for_error`.
//! Role: Parser boundary used by single-file conversion.
//! Invariants: Input must be UTF-8 JSON; any read or syntax failure becomes `ErrorKind::Parse`.
//! Notes: Read failures keep the underlying io error as the source.

use std::fs;
use std::path::Path;

use serde_json::Value;
use serde_json::error::Category;

use crate::core::error::{Error, ErrorKind};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ParseFailureCategory {
    Syntax,
    Eof,
    Data,
    Io,
}

impl ParseFailureCategory {
    pub fn label(self) -> &'static str {
        match self {
            ParseFailureCategory::Syntax => "syntax",
            ParseFailureCategory::Eof => "eof",
            ParseFailureCategory::Data => "data",
            ParseFailureCategory::Io => "io",
        }
    }
}

pub fn categorize_error(err: &serde_json::Error) -> ParseFailureCategory {
    match err.classify() {
        Category::Syntax => ParseFailureCategory::Syntax,
        Category::Eof => ParseFailureCategory::Eof,
        Category::Data => ParseFailureCategory::Data,
        Category::Io => ParseFailureCategory::Io,
    }
}

pub fn hint_for_error(err: &serde_json::Error, context: &str) -> String {
    format!(
        "parse category: {}; line {} column {}; context: {context}",
        categorize_error(err).label(),
        err.line(),
        err.column()
    )
}

pub fn from_slice(bytes: &[u8]) -> Result<Value, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Read and parse one document; both failure modes surface as `ErrorKind::Parse`.
pub fn read_document(path: &Path) -> Result<Value, Error> {
    let bytes = fs::read(path).map_err(|err| {
        Error::new(ErrorKind::Parse)
            .with_message("failed to read file")
            .with_path(path)
            .with_source(err)
    })?;
    from_slice(&bytes).map_err(|err| {
        let hint = hint_for_error(&err, &path.display().to_string());
        Error::new(ErrorKind::Parse)
            .with_message("invalid json")
            .with_hint(hint)
            .with_path(path)
            .with_source(err)
    })
}
