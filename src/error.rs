//! Error types for document values

use thiserror::Error;

/// Domain string identifying errors raised by this crate.
pub const ERROR_DOMAIN: &str = "docvalue.Value";

/// The stable error taxonomy.
///
/// Navigation failures are carried as data inside sentinel values; the same
/// kinds are reported through [`Error`] where an operation fails outright.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Classification found no matching variant
    #[error("It is an unsupported type.")]
    UnsupportedType,

    /// Array index past the end
    #[error("Array Index is out of bounds.")]
    IndexOutOfBounds,

    /// Custom serializer ran out of depth budget
    #[error("Element too deep. Increase max_depth and make sure there is no reference loop.")]
    ElementTooDeep,

    /// Tag mismatch during navigation or at the top level of a merge
    #[error("Couldn't merge, because the values differ in type on top level.")]
    WrongType,

    /// Missing object key
    #[error("Dictionary key does not exist.")]
    NotExist,

    /// The tree cannot be handed to the native encoder
    #[error("Document is invalid.")]
    InvalidDocument,
}

impl ErrorKind {
    /// All kinds, in declaration order.
    pub const ALL: [ErrorKind; 6] = [
        ErrorKind::UnsupportedType,
        ErrorKind::IndexOutOfBounds,
        ErrorKind::ElementTooDeep,
        ErrorKind::WrongType,
        ErrorKind::NotExist,
        ErrorKind::InvalidDocument,
    ];

    /// Stable numeric code.
    pub const fn code(self) -> i32 {
        match self {
            ErrorKind::UnsupportedType => 999,
            ErrorKind::IndexOutOfBounds => 900,
            ErrorKind::WrongType => 901,
            ErrorKind::ElementTooDeep => 902,
            ErrorKind::NotExist => 500,
            ErrorKind::InvalidDocument => 490,
        }
    }

    /// Look a kind up by its numeric code.
    pub fn from_code(code: i32) -> Option<ErrorKind> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    /// Stable human-readable message.
    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::UnsupportedType => "It is an unsupported type.",
            ErrorKind::IndexOutOfBounds => "Array Index is out of bounds.",
            ErrorKind::ElementTooDeep => {
                "Element too deep. Increase max_depth and make sure there is no reference loop."
            }
            ErrorKind::WrongType => "Couldn't merge, because the values differ in type on top level.",
            ErrorKind::NotExist => "Dictionary key does not exist.",
            ErrorKind::InvalidDocument => "Document is invalid.",
        }
    }
}

/// Hard failures: merge entry mismatch, serializer preconditions, parsing.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Kind(#[from] ErrorKind),

    #[error("JSON conversion error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// The taxonomy entry this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Kind(kind) => *kind,
            Error::Json(_) => ErrorKind::InvalidDocument,
        }
    }

    /// Shorthand for `self.kind().code()`.
    pub fn code(&self) -> i32 {
        self.kind().code()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
