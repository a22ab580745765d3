//! Argument entities and the handles that refer to them.
//!
//! The parser owns every registered argument in a single arena; callers hold
//! typed, `Copy` handles wrapping an [`ArgId`] index. Flag state is stored
//! inline; value and list state live behind type-erased slots so the engine
//! can dispatch assignment without knowing element types, recovering the
//! concrete type only at the typed accessors via downcast.

use std::any::Any;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::convert::Parsable;
use crate::error::{ParseError, ParseErrorKind};

/// Delimiter used by lists until [`set_delimiter`](crate::Parser::set_delimiter)
/// changes it.
pub const DEFAULT_DELIMITER: char = ',';

/// Identifies a registered argument within its owning [`Parser`](crate::Parser).
///
/// Obtained through the typed handles; only meaningful for the parser that
/// issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArgId(pub(crate) usize);

/// Whether a related argument is required or merely suggested.
///
/// Display-only metadata for targeted help; never enforced during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Requirement {
    Required,
    Optional,
}

/// Common surface of the typed handles, used by kind-independent parser
/// operations such as [`set_help`](crate::Parser::set_help) and
/// [`is_set`](crate::Parser::is_set).
pub trait ArgumentHandle {
    /// Identifier of the argument within its owning parser.
    fn id(&self) -> ArgId;
}

/// Handle to a registered boolean flag.
///
/// # Examples
///
/// ```
/// use argot_core::Parser;
///
/// let mut parser = Parser::new(["-q"]);
/// let quiet = parser.add_flag(Some('q'), Some("quiet")).unwrap();
/// parser.run().unwrap();
/// assert!(parser.is_set(quiet).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagHandle {
    pub(crate) id: ArgId,
}

/// Handle to a registered typed scalar value.
#[derive(Debug)]
pub struct ValueHandle<T> {
    pub(crate) id: ArgId,
    pub(crate) marker: PhantomData<fn() -> T>,
}

/// Handle to a registered typed list.
#[derive(Debug)]
pub struct ListHandle<T> {
    pub(crate) id: ArgId,
    pub(crate) marker: PhantomData<fn() -> T>,
}

// Manual impls: deriving would put a spurious `T: Clone`/`T: Copy` bound on
// the handle even though it only carries an index.
impl<T> Clone for ValueHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ValueHandle<T> {}

impl<T> Clone for ListHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ListHandle<T> {}

impl ArgumentHandle for FlagHandle {
    fn id(&self) -> ArgId {
        self.id
    }
}

impl<T> ArgumentHandle for ValueHandle<T> {
    fn id(&self) -> ArgId {
        self.id
    }
}

impl<T> ArgumentHandle for ListHandle<T> {
    fn id(&self) -> ArgId {
        self.id
    }
}

/// A registered argument: names, help metadata, and kind-specific state.
pub(crate) struct Argument {
    pub(crate) short: Option<char>,
    pub(crate) long: Option<String>,
    pub(crate) short_help: String,
    pub(crate) long_help: String,
    pub(crate) related: Vec<(ArgId, Requirement)>,
    pub(crate) kind: ArgKind,
}

impl Argument {
    pub(crate) fn new(short: Option<char>, long: Option<String>, kind: ArgKind) -> Self {
        Self {
            short,
            long,
            short_help: String::new(),
            long_help: String::new(),
            related: Vec::new(),
            kind,
        }
    }

    /// `[<short>, <long>]` with `_` standing in for an absent name.
    pub(crate) fn pretty_name(&self) -> String {
        let short = self.short.map_or_else(|| "_".to_string(), |c| c.to_string());
        let long = self.long.as_deref().unwrap_or("_");
        format!("[{short}, {long}]")
    }

    /// Clears parse state while keeping registration and configuration
    /// (help texts, defaults, options, delimiters).
    pub(crate) fn reset_state(&mut self) {
        match &mut self.kind {
            ArgKind::Flag { set } => *set = false,
            ArgKind::Value(slot) => slot.clear(),
            ArgKind::List(slot) => slot.clear(),
        }
    }
}

/// Kind-specific argument state.
pub(crate) enum ArgKind {
    Flag { set: bool },
    Value(Box<dyn ValueSlot>),
    List(Box<dyn ListSlot>),
}

/// Type-erased storage behind a `Value<T>`.
pub(crate) trait ValueSlot {
    /// Converts `payload` and stores it; failures are recorded against
    /// `raw_token` and leave the stored value untouched.
    fn assign(&mut self, raw_token: &str, payload: &str, pretty: &str, errors: &mut Vec<ParseError>);
    fn clear(&mut self);
    /// True when an explicit value was parsed or a default exists.
    fn is_set(&self) -> bool;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Type-erased storage behind a `List<T>`.
pub(crate) trait ListSlot {
    /// Splits `payload` by the configured delimiter, converting and
    /// appending each element; failures are recorded against `raw_token`
    /// and skip only the failed element.
    fn append(&mut self, raw_token: &str, payload: &str, errors: &mut Vec<ParseError>);
    fn clear(&mut self);
    /// True when at least one element was appended.
    fn is_set(&self) -> bool;
    fn set_delimiter(&mut self, delimiter: char);
    fn as_any(&self) -> &dyn Any;
}

pub(crate) struct ValueState<T> {
    pub(crate) value: Option<T>,
    pub(crate) default: Option<T>,
    pub(crate) options: Vec<T>,
}

impl<T> ValueState<T> {
    pub(crate) fn new() -> Self {
        Self {
            value: None,
            default: None,
            options: Vec::new(),
        }
    }
}

impl<T: Parsable + PartialEq> ValueSlot for ValueState<T> {
    fn assign(&mut self, raw_token: &str, payload: &str, pretty: &str, errors: &mut Vec<ParseError>) {
        match T::parse_token(payload) {
            Ok(parsed) => {
                if !self.options.is_empty() && !self.options.contains(&parsed) {
                    errors.push(ParseError::new(
                        ParseErrorKind::ParsingError,
                        raw_token,
                        format!("'{payload}' is not a valid option for {pretty}"),
                    ));
                    return;
                }
                self.value = Some(parsed);
            }
            Err(err) => errors.push(ParseError::new(
                ParseErrorKind::ParsingError,
                raw_token,
                format!("cannot parse '{payload}': {err}"),
            )),
        }
    }

    fn clear(&mut self) {
        self.value = None;
    }

    fn is_set(&self) -> bool {
        self.value.is_some() || self.default.is_some()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

pub(crate) struct ListState<T> {
    pub(crate) items: Vec<T>,
    pub(crate) delimiter: char,
}

impl<T> ListState<T> {
    pub(crate) fn new() -> Self {
        Self {
            items: Vec::new(),
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl<T: Parsable> ListSlot for ListState<T> {
    fn append(&mut self, raw_token: &str, payload: &str, errors: &mut Vec<ParseError>) {
        for piece in split_pieces(payload, self.delimiter) {
            match T::parse_token(piece) {
                Ok(parsed) => self.items.push(parsed),
                Err(err) => errors.push(ParseError::new(
                    ParseErrorKind::ParsingError,
                    raw_token,
                    format!("cannot parse '{piece}': {err}"),
                )),
            }
        }
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn is_set(&self) -> bool {
        !self.items.is_empty()
    }

    fn set_delimiter(&mut self, delimiter: char) {
        self.delimiter = delimiter;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Splits a token into delimiter-separated pieces with stream semantics: an
/// empty token has no pieces, and a trailing delimiter does not produce a
/// trailing empty piece (`"a,b,"` → `["a", "b"]`, `","` → `[""]`).
fn split_pieces(token: &str, delimiter: char) -> Vec<&str> {
    if token.is_empty() {
        return Vec::new();
    }
    let mut pieces: Vec<&str> = token.split(delimiter).collect();
    if token.ends_with(delimiter) {
        pieces.pop();
    }
    pieces
}
