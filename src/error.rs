//! Error types for rd

use std::fmt;
use thiserror::Error;

/// Position in source text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pos {
    pub offset: usize,
    pub line: u32,
    pub col: u32,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

impl Pos {
    pub const fn new(offset: usize, line: u32, col: u32) -> Self {
        Self { offset, line, col }
    }
}

/// Span representing a range in source text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    pub start: Pos,
    pub end: Pos,
}

impl Span {
    pub const fn new(start: Pos, end: Pos) -> Self {
        Self { start, end }
    }

    pub const fn at(pos: Pos) -> Self {
        Self { start: pos, end: pos }
    }

    pub const fn empty() -> Self {
        Self {
            start: Pos::new(0, 0, 0),
            end: Pos::new(0, 0, 0),
        }
    }
}

/// Error kind for detailed categorization
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A typed container was handed a literal it cannot coerce
    InvalidItem {
        container: &'static str,
        found: &'static str,
    },
    /// Indexed write past the end of a container
    IndexOutOfBounds { index: usize, len: usize },
    /// `expires` given something that is not an aware timestamp
    InvalidTimestamp { value: String },
    /// Structurally invalid JSON
    MalformedJson,
    /// Structurally invalid XML
    MalformedXml,
    /// Well-formed input with the wrong shape for a field
    UnexpectedValue {
        field: String,
        expected: &'static str,
    },
    /// XML document root is not an XRD element
    UnexpectedRoot { found: String },
    /// Element or attribute name that XML cannot represent
    InvalidName { name: String },
    /// Two root attributes would share one name
    DuplicateAttribute { name: String },
    MaxDepthExceeded { max: usize },
    MaxSizeExceeded { max: usize },
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidItem { container, found } => {
                write!(f, "{container} cannot hold a {found}")
            }
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds (len {len})")
            }
            Self::InvalidTimestamp { value } => write!(f, "invalid timestamp: {value:?}"),
            Self::MalformedJson => write!(f, "malformed json"),
            Self::MalformedXml => write!(f, "malformed xml"),
            Self::UnexpectedValue { field, expected } => {
                write!(f, "expected {expected} for {field}")
            }
            Self::UnexpectedRoot { found } => {
                write!(f, "expected XRD root element, found {found}")
            }
            Self::InvalidName { name } => write!(f, "invalid xml name: {name:?}"),
            Self::DuplicateAttribute { name } => write!(f, "duplicate attribute: {name}"),
            Self::MaxDepthExceeded { max } => write!(f, "max depth exceeded: {max}"),
            Self::MaxSizeExceeded { max } => write!(f, "max size exceeded: {max}"),
        }
    }
}

/// Main error type for rd
#[derive(Error, Clone, Debug, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    span: Span,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            span: Span::empty(),
            message,
        }
    }

    pub fn with_message(kind: ErrorKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn invalid_item(container: &'static str, found: &'static str) -> Self {
        Self::new(ErrorKind::InvalidItem { container, found })
    }

    pub(crate) fn unexpected(field: impl Into<String>, expected: &'static str) -> Self {
        Self::new(ErrorKind::UnexpectedValue {
            field: field.into(),
            expected,
        })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.span == Span::empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "error at {}: {}", self.span.start, self.message)
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        let line = u32::try_from(err.line()).unwrap_or(u32::MAX);
        let col = u32::try_from(err.column()).unwrap_or(u32::MAX);
        Self::with_message(
            ErrorKind::MalformedJson,
            Span::at(Pos::new(0, line, col)),
            err.to_string(),
        )
    }
}

/// Result type alias for rd
pub type Result<T> = std::result::Result<T, Error>;
