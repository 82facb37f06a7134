//! Errors raised while translating shorthand or building the type model.

use serde_json::Value;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a shorthand document was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShorthandErrorKind {
    #[error("shorthand contains an empty or non string property")]
    EmptyProperty,

    #[error(
        "shorthand contains a top level ref property \"$ref\", but it is not the only property"
    )]
    RefWithOtherProperties,

    #[error(
        "shorthand contains a top level array property \"$items\", but it is not the only property"
    )]
    ItemsWithOtherProperties,

    #[error("top level shorthand reference \"$ref\" must be a string")]
    RefNotString,

    #[error("top level shorthand array \"$items\" must be a string")]
    ItemsNotString,

    #[error("cannot parse property \"{0}\": it is neither a string nor an object")]
    CannotParseProperty(String),

    #[error("shorthand must be a string or an object")]
    InvalidInput,
}

/// Errors produced by this crate.
///
/// All of them abort the current conversion. An unresolved `$ref` is not an
/// error; it leaves the reference node without a resolved type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid shorthand: {kind}")]
    InvalidShorthand {
        kind: ShorthandErrorKind,
        shorthand: Value,
    },

    #[error("cannot parse shorthand validation \"{token}\": expected format \"validationKey:value\"")]
    Parse { token: String },

    #[error("the \"type\" is missing in schema definition for \"{name}\"")]
    MissingType { name: String, fragment: Value },

    #[error("the \"$ref\" is missing in schema definition for \"{name}\"")]
    MissingReference { name: String },

    #[error("the type \"{found}\" does not match type \"{expected}\" for \"{name}\"")]
    TypeMismatch {
        expected: &'static str,
        found: String,
        name: String,
    },

    #[error("keyword \"{keyword}\" of \"{name}\" must be {expected}")]
    InvalidKeyword {
        keyword: String,
        expected: &'static str,
        name: String,
    },

    #[error("unsupported schema construct: {0}")]
    Unsupported(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn shorthand(kind: ShorthandErrorKind, shorthand: &Value) -> Self {
        Error::InvalidShorthand {
            kind,
            shorthand: shorthand.clone(),
        }
    }

    pub(crate) fn invalid_keyword(keyword: &str, expected: &'static str, name: &str) -> Self {
        Error::InvalidKeyword {
            keyword: keyword.to_string(),
            expected,
            name: name.to_string(),
        }
    }

    /// The shorthand document that was rejected, if this is a shorthand error.
    pub fn offending_shorthand(&self) -> Option<&Value> {
        match self {
            Error::InvalidShorthand { shorthand, .. } => Some(shorthand),
            _ => None,
        }
    }

    /// The schema fragment whose type could not be determined.
    pub fn offending_fragment(&self) -> Option<&Value> {
        match self {
            Error::MissingType { fragment, .. } => Some(fragment),
            _ => None,
        }
    }
}
