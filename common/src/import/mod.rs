//! Import pipeline: JSON documents/sections, Markdown files and PDFs are
//! turned into `WriteUpSection` values (or a whole `WriteUp`) ready to be
//! fed to the store. External data is never trusted to match the internal
//! shape: everything passes through a sanitization boundary here.

use std::fmt;

pub mod json;
pub mod markdown;
pub mod pdf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// The payload is not syntactically valid for its format.
    Parse(String),
    /// A JSON payload that is not an object.
    NotAnObject,
    /// A JSON sections import without an actionable `sections` array.
    MissingSections,
    /// PDF parsing or extraction failure.
    Pdf(String),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::Parse(msg) => write!(f, "could not parse the file: {msg}"),
            ImportError::NotAnObject => write!(f, "the JSON content must be an object"),
            ImportError::MissingSections => {
                write!(f, "the JSON object has no 'sections' array to import")
            }
            ImportError::Pdf(msg) => write!(f, "could not read the PDF: {msg}"),
        }
    }
}

impl std::error::Error for ImportError {}
