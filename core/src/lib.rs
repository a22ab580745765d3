//! Runtime command-line argument parsing: flags, typed values, and delimited
//! lists resolved from a token sequence in a single pass.
//!
//! This crate defines the parsing engine and its public surface:
//!
//! - [`Parser`] — owns the registered arguments, consumes the token sequence
//!   exactly once, and answers all post-run queries.
//! - [`FlagHandle`], [`ValueHandle`], [`ListHandle`] — `Copy` handles to
//!   registered arguments, returned at registration time.
//! - [`Parsable`] — the conversion capability required of value and list
//!   element types, blanket-implemented over [`FromStr`](std::str::FromStr).
//! - [`ParseError`] / [`ParseErrorKind`] — accumulated diagnostics for
//!   malformed user input; a run never aborts on them.
//! - [`ConfigError`] — synchronous errors for parser misuse (bad names,
//!   running twice, querying before a run).
//!
//! Name validation ([`validate_short_name`], [`validate_long_name`]) rejects
//! malformed, reserved, and colliding names at registration, before they
//! enter the lookup maps.
//!
//! Rendering ([`Parser::help_text`], [`Parser::error_report`]) produces plain
//! strings; the engine never writes to a stream itself.
//!
//! # Example
//!
//! ```
//! use argot_core::*;
//!
//! // Parse a command line for a fictional tool.
//! let mut parser = Parser::new(["input.txt", "-q", "--level=3", "-t", "a.csv,b.csv"]);
//! let quiet = parser.add_flag(Some('q'), Some("quiet")).unwrap();
//! let level = parser.add_value::<u32>(Some('l'), Some("level")).unwrap();
//! let targets = parser.add_list::<String>(Some('t'), Some("targets")).unwrap();
//!
//! parser.run().unwrap();
//!
//! assert!(parser.is_set(quiet).unwrap());
//! assert_eq!(parser.value(level).unwrap(), &3);
//! assert_eq!(parser.values(targets).unwrap(), ["a.csv", "b.csv"]);
//! assert_eq!(parser.operands().unwrap(), ["input.txt"]);
//! assert!(parser.errors().unwrap().is_empty());
//! ```

mod argument;
mod convert;
mod error;
mod help;
mod names;
mod parser;

pub use argument::{
    ArgId, ArgumentHandle, DEFAULT_DELIMITER, FlagHandle, ListHandle, Requirement, ValueHandle,
};
pub use convert::{ConversionError, Parsable};
pub use error::{ConfigError, ParseError, ParseErrorKind, Result};
pub use help::{DEFAULT_HELP_WIDTH, DEFAULT_NAME_WIDTH};
pub use names::{
    RESERVED_LONG_NAMES, RESERVED_SHORT_NAMES, validate_long_name, validate_short_name,
};
pub use parser::Parser;
