//! Argument name grammar.
//!
//! Validates short and long names at registration time, before they enter
//! the parser's lookup maps. The grammar is deliberately small: a short name
//! is one ASCII letter, a long name matches `[A-Za-z][A-Za-z_]+`, and the
//! tokens the engine recognizes as help/version triggers are reserved in
//! both namespaces.
//!
//! # Examples
//!
//! ```
//! use argot_core::{validate_long_name, validate_short_name};
//!
//! assert!(validate_short_name('f').is_ok());
//! assert!(validate_short_name('h').is_err()); // reserved for help
//!
//! assert!(validate_long_name("dry_run").is_ok());
//! assert!(validate_long_name("version").is_err()); // reserved
//! ```

use crate::error::{ConfigError, Result};

/// Short names claimed by the help and version triggers.
pub const RESERVED_SHORT_NAMES: [char; 2] = ['h', 'v'];

/// Long names claimed by the help and version triggers.
pub const RESERVED_LONG_NAMES: [&str; 2] = ["help", "version"];

/// Validates a short name: one ASCII alphabetic character, not reserved.
pub fn validate_short_name(short: char) -> Result<()> {
    if !short.is_ascii_alphabetic() {
        return Err(ConfigError::InvalidShortName(short));
    }
    if RESERVED_SHORT_NAMES.contains(&short) {
        return Err(ConfigError::ReservedShortName(short));
    }
    Ok(())
}

/// Validates a long name: at least two characters, leading alphabetic,
/// remainder alphabetic or underscore, not reserved.
pub fn validate_long_name(long: &str) -> Result<()> {
    let mut chars = long.chars();
    let Some(first) = chars.next() else {
        return Err(ConfigError::LongNameTooShort(long.to_string()));
    };
    if chars.clone().next().is_none() {
        return Err(ConfigError::LongNameTooShort(long.to_string()));
    }
    if !first.is_ascii_alphabetic() {
        return Err(ConfigError::InvalidLongName(long.to_string()));
    }
    if !chars.all(|ch| ch.is_ascii_alphabetic() || ch == '_') {
        return Err(ConfigError::InvalidLongName(long.to_string()));
    }
    if RESERVED_LONG_NAMES.contains(&long) {
        return Err(ConfigError::ReservedLongName(long.to_string()));
    }
    Ok(())
}
