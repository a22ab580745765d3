//! Error types for parser configuration and parse diagnostics.
//!
//! Two tiers with deliberately different shapes:
//!
//! - [`ConfigError`] — programmer mistakes (bad names, registering after a
//!   run, running twice, querying too early). Returned synchronously from the
//!   call that caused them and fatal to that call.
//! - [`ParseError`] — user-input noise (unknown names, malformed tokens,
//!   unconvertible values). Accumulated during the run, never aborting it;
//!   inspect the list afterwards via [`Parser::errors`](crate::Parser::errors).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported synchronously by parser configuration and query calls.
///
/// Each variant describes a specific misuse. The `Display` impl provides a
/// human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Short name is not an ASCII alphabetic character.
    #[error("short name '{0}' must be an ASCII alphabetic character")]
    InvalidShortName(char),
    /// Short name collides with the help/version trigger letters.
    #[error("short name '{0}' is reserved for help/version triggers")]
    ReservedShortName(char),
    /// Long name is shorter than two characters.
    #[error("long name '{0}' must be at least 2 characters long")]
    LongNameTooShort(String),
    /// Long name does not match `[A-Za-z][A-Za-z_]+`.
    #[error("long name '{0}' must start with an alphabetic character and contain only alphabetic or underscore characters")]
    InvalidLongName(String),
    /// Long name collides with the help/version trigger words.
    #[error("long name '{0}' is reserved for help/version triggers")]
    ReservedLongName(String),
    /// Neither a short nor a long name was supplied.
    #[error("an argument must define a short or long name")]
    MissingName,
    /// The name is already registered to another flag, value, or list.
    #[error("name '{0}' is already in use")]
    NameInUse(String),
    /// Registration was attempted after the parser consumed its tokens.
    #[error("cannot register arguments after the parser has run")]
    RegistrationClosed,
    /// The parser was run a second time without a reset.
    #[error("cannot run the parser multiple times")]
    AlreadyRun,
    /// A result accessor was called before the parser ran.
    #[error("cannot query results before running the parser")]
    NotYetParsed,
    /// A value was requested that was neither parsed nor given a default.
    #[error("{0} was not set")]
    NotSet(String),
    /// A handle does not refer to an argument of this parser.
    #[error("handle does not belong to this parser")]
    ForeignHandle,
}

/// Convenience alias for results with [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Classification of a parse diagnostic.
///
/// Serialized in snake_case; `Display` produces the same names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorKind {
    /// A short name token was malformed (lone `-`, non-alphabetic character,
    /// more than one character before `=`).
    InvalidShortName,
    /// A long name token was malformed (too short, bad leading character,
    /// characters outside the alphabetic/underscore set).
    InvalidLongName,
    /// A well-formed short name that no flag, value, or list claims.
    UnknownShortName,
    /// A well-formed long name that no flag, value, or list claims.
    UnknownLongName,
    /// A trailing `=` with nothing after it.
    MissingValue,
    /// Value conversion failed or the converted value is not an allowed
    /// option.
    ParsingError,
}

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidShortName => write!(f, "invalid_short_name"),
            Self::InvalidLongName => write!(f, "invalid_long_name"),
            Self::UnknownShortName => write!(f, "unknown_short_name"),
            Self::UnknownLongName => write!(f, "unknown_long_name"),
            Self::MissingValue => write!(f, "missing_value"),
            Self::ParsingError => write!(f, "parsing_error"),
        }
    }
}

/// One accumulated parse diagnostic.
///
/// `token` is always the original argv token that triggered the diagnostic,
/// even when only a substring of it (an inline `=` payload, a delimited list
/// element) was at fault; the offending text then appears in `message`.
///
/// # Examples
///
/// ```
/// use argot_core::{ParseError, ParseErrorKind};
///
/// let error = ParseError::new(ParseErrorKind::UnknownShortName, "-z", "unknown short name 'z'");
/// assert_eq!(error.kind, ParseErrorKind::UnknownShortName);
/// assert_eq!(error.token, "-z");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{kind}: {message} (while parsing \"{token}\")")]
pub struct ParseError {
    /// Diagnostic classification.
    pub kind: ParseErrorKind,
    /// The argv token being processed when the diagnostic was produced.
    pub token: String,
    /// Human-readable detail.
    pub message: String,
}

impl ParseError {
    /// Creates a diagnostic for `token` with the given kind and message.
    pub fn new(kind: ParseErrorKind, token: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            token: token.into(),
            message: message.into(),
        }
    }
}
