//! Error types for yamlify parsing and binding.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::node::NodeKind;

/// Result type for yamlify operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Parse context carrying filename for error reporting.
#[derive(Clone, Debug, Default)]
pub struct ParseContext {
    pub filename: Option<String>,
}

impl ParseContext {
    /// Create a new parse context.
    pub fn new(filename: Option<&str>) -> Self {
        Self {
            filename: filename.map(String::from),
        }
    }

    /// Format a location suffix for error messages.
    pub fn loc_suffix(&self, line: usize, col: usize) -> String {
        match &self.filename {
            Some(name) => format!(" at {}:{} of <{}>", line + 1, col + 1, name),
            None => format!(" at {}:{}", line + 1, col + 1),
        }
    }

    /// Build a `MalformedDocument` error pointing at a zero-based position.
    pub fn malformed(&self, reason: impl Into<String>, line: usize, col: usize) -> Error {
        Error::MalformedDocument {
            reason: reason.into(),
            location: self.loc_suffix(line, col),
        }
    }
}

/// Error type for yamlify.
#[derive(Error, Debug)]
pub enum Error {
    /// Text does not form a consistent indentation tree.
    #[error("Malformed document: {reason}{location}")]
    MalformedDocument { reason: String, location: String },

    /// A sequence was required.
    #[error("Expected a sequence for {expected}, found a {found}")]
    NotASequence { expected: String, found: NodeKind },

    /// A mapping was required.
    #[error("Expected a mapping for {expected}, found a {found}")]
    NotAMapping { expected: String, found: NodeKind },

    /// A scalar was required.
    #[error("Expected a scalar for {expected}, found a {found}")]
    NotAScalar { expected: String, found: NodeKind },

    /// A required field has no entry in the mapping.
    #[error("Missing required field `{field}` of {type_name}")]
    MissingRequiredField { field: String, type_name: String },

    /// A scalar could not be turned into its target type.
    #[error("Cannot convert {text:?} to {target}: {reason}")]
    UnconvertibleValue {
        text: String,
        target: String,
        reason: String,
    },

    /// A constructor asked for a value its descriptor never resolved.
    #[error("Field `{field}` of {type_name} was not resolved as {expected}")]
    FieldMismatch {
        field: String,
        type_name: String,
        expected: String,
    },

    /// Reading a document stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Listing, reading or consuming a document file failed.
    #[error("Cannot access {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn unconvertible(
        text: &str,
        target: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Error::UnconvertibleValue {
            text: text.to_string(),
            target: target.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn file(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::File {
            path: path.into(),
            source,
        }
    }
}
