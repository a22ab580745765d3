//! Generic token-to-value conversion.
//!
//! Conversion is the capability boundary between the resolution engine and
//! the element types stored in values and lists: the engine hands over token
//! text, the element type either produces a value or a [`ConversionError`]
//! with a description. Conversion is pure and knows nothing about argument
//! names.

use thiserror::Error;

/// A failed token conversion, carrying the underlying parse description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ConversionError(String);

/// Types that can be produced from a single token string.
///
/// Blanket-implemented for every type whose [`FromStr`](std::str::FromStr)
/// error is displayable, which covers the usual element types (`String`,
/// integers, floats, `bool`, `PathBuf`, `IpAddr`, ...). String-like types
/// convert by identity; everything else uses its canonical textual
/// representation, and malformed text fails instead of producing a filler
/// value. Implement `FromStr` to make a custom type usable as a value or
/// list element.
///
/// # Examples
///
/// ```
/// use argot_core::Parsable;
///
/// assert_eq!(i32::parse_token("42").unwrap(), 42);
/// assert_eq!(String::parse_token("anything at all").unwrap(), "anything at all");
/// assert!(i32::parse_token("forty-two").is_err());
/// ```
pub trait Parsable: Sized + 'static {
    /// Converts a token to `Self`, or fails with a description.
    fn parse_token(token: &str) -> std::result::Result<Self, ConversionError>;
}

impl<T> Parsable for T
where
    T: std::str::FromStr + 'static,
    T::Err: std::fmt::Display,
{
    fn parse_token(token: &str) -> std::result::Result<Self, ConversionError> {
        token
            .parse()
            .map_err(|err: T::Err| ConversionError(err.to_string()))
    }
}
