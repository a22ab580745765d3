//! The parser: registration, the single-pass resolution engine, and
//! post-run accessors.

use std::collections::HashMap;
use std::marker::PhantomData;

use tracing::debug;

use crate::argument::{
    ArgId, ArgKind, Argument, ArgumentHandle, FlagHandle, ListHandle, ListState, Requirement,
    ValueHandle, ValueState,
};
use crate::convert::Parsable;
use crate::error::{ConfigError, ParseError, ParseErrorKind, Result};
use crate::names::{validate_long_name, validate_short_name};

/// The value or list waiting to consume bare tokens. At most one outstanding
/// at any point in the pass; any dash token discards it.
#[derive(Clone, Copy)]
enum Pending {
    None,
    Value(ArgId),
    List(ArgId),
}

/// A runtime command-line parser.
///
/// Lifecycle is two-phase: register flags, values, and lists against a token
/// sequence, then [`run`](Parser::run) exactly once and query results through
/// the handles handed out at registration. The parser owns every argument;
/// handles are plain `Copy` indices that stay valid for the parser's
/// lifetime.
///
/// Parse problems (unknown names, malformed tokens, unconvertible values)
/// never abort the run; they accumulate as [`ParseError`] diagnostics.
/// Misusing the parser itself (bad registrations, running twice, querying
/// too early) fails fast with a [`ConfigError`].
///
/// # Examples
///
/// ```
/// use argot_core::Parser;
///
/// let mut parser = Parser::new(["-ab", "-x", "5", "input.txt"]);
/// let a = parser.add_flag(Some('a'), None).unwrap();
/// let b = parser.add_flag(Some('b'), Some("beta")).unwrap();
/// let x = parser.add_value::<i32>(Some('x'), Some("valueX")).unwrap();
///
/// parser.run().unwrap();
///
/// assert!(parser.is_set(a).unwrap());
/// assert!(parser.is_set(b).unwrap());
/// assert_eq!(parser.value(x).unwrap(), &5);
/// assert_eq!(parser.operands().unwrap(), ["input.txt"]);
/// assert!(parser.errors().unwrap().is_empty());
/// ```
pub struct Parser {
    pub(crate) app_name: String,
    pub(crate) app_version: String,
    pub(crate) app_description: String,
    tokens: Vec<String>,
    pub(crate) entities: Vec<Argument>,
    pub(crate) short_names: HashMap<char, ArgId>,
    pub(crate) long_names: HashMap<String, ArgId>,
    operands: Vec<String>,
    errors: Vec<ParseError>,
    parsed: bool,
    requested_help: bool,
    requested_version: bool,
}

impl Parser {
    /// Creates a parser over an explicit token sequence (process argv minus
    /// the program name, or any externally split command line).
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            app_name: String::new(),
            app_version: String::new(),
            app_description: String::new(),
            tokens: tokens.into_iter().map(Into::into).collect(),
            entities: Vec::new(),
            short_names: HashMap::new(),
            long_names: HashMap::new(),
            operands: Vec::new(),
            errors: Vec::new(),
            parsed: false,
            requested_help: false,
            requested_version: false,
        }
    }

    /// Creates a parser over the current process arguments, program name
    /// excluded.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use argot_core::Parser;
    ///
    /// let parser = Parser::from_env();
    /// ```
    pub fn from_env() -> Self {
        Self::new(std::env::args().skip(1))
    }

    /// Sets the application name, version, and description shown by version
    /// rendering. Empty strings are omitted from the output.
    pub fn with_app_info(mut self, name: &str, version: &str, description: &str) -> Self {
        self.app_name = name.to_string();
        self.app_version = version.to_string();
        self.app_description = description.to_string();
        self
    }

    /// Registers a boolean flag under a short and/or long name.
    ///
    /// # Examples
    ///
    /// ```
    /// use argot_core::Parser;
    ///
    /// let mut parser = Parser::new(["--force"]);
    /// let force = parser.add_flag(Some('f'), Some("force")).unwrap();
    /// parser.run().unwrap();
    /// assert!(parser.is_set(force).unwrap());
    /// ```
    pub fn add_flag(&mut self, short: Option<char>, long: Option<&str>) -> Result<FlagHandle> {
        let id = self.register(short, long, ArgKind::Flag { set: false })?;
        Ok(FlagHandle { id })
    }

    /// Registers a typed scalar value under a short and/or long name.
    ///
    /// The value consumes the next bare token after its name, or an inline
    /// `=` payload. `T` must be parseable from a token and comparable so a
    /// restricted option set can be checked.
    ///
    /// # Examples
    ///
    /// ```
    /// use argot_core::Parser;
    ///
    /// let mut parser = Parser::new(["--threshold=0.5"]);
    /// let threshold = parser.add_value::<f64>(Some('t'), Some("threshold")).unwrap();
    /// parser.run().unwrap();
    /// assert_eq!(parser.value(threshold).unwrap(), &0.5);
    /// ```
    pub fn add_value<T: Parsable + PartialEq>(
        &mut self,
        short: Option<char>,
        long: Option<&str>,
    ) -> Result<ValueHandle<T>> {
        let id = self.register(short, long, ArgKind::Value(Box::new(ValueState::<T>::new())))?;
        Ok(ValueHandle {
            id,
            marker: PhantomData,
        })
    }

    /// Registers a typed list under a short and/or long name.
    ///
    /// A list consumes every following bare token until a dash token or end
    /// of input, splitting each by its delimiter
    /// ([`DEFAULT_DELIMITER`](crate::DEFAULT_DELIMITER) unless changed).
    ///
    /// # Examples
    ///
    /// ```
    /// use argot_core::Parser;
    ///
    /// let mut parser = Parser::new(["-n", "1,2", "3"]);
    /// let nums = parser.add_list::<i32>(Some('n'), Some("numbers")).unwrap();
    /// parser.run().unwrap();
    /// assert_eq!(parser.values(nums).unwrap(), [1, 2, 3]);
    /// ```
    pub fn add_list<T: Parsable>(
        &mut self,
        short: Option<char>,
        long: Option<&str>,
    ) -> Result<ListHandle<T>> {
        let id = self.register(short, long, ArgKind::List(Box::new(ListState::<T>::new())))?;
        Ok(ListHandle {
            id,
            marker: PhantomData,
        })
    }

    fn register(&mut self, short: Option<char>, long: Option<&str>, kind: ArgKind) -> Result<ArgId> {
        if self.parsed {
            return Err(ConfigError::RegistrationClosed);
        }
        if short.is_none() && long.is_none() {
            return Err(ConfigError::MissingName);
        }
        if let Some(short) = short {
            validate_short_name(short)?;
            if self.short_names.contains_key(&short) {
                return Err(ConfigError::NameInUse(short.to_string()));
            }
        }
        if let Some(long) = long {
            validate_long_name(long)?;
            if self.long_names.contains_key(long) {
                return Err(ConfigError::NameInUse(long.to_string()));
            }
        }

        let id = ArgId(self.entities.len());
        self.entities.push(Argument::new(short, long.map(String::from), kind));
        if let Some(short) = short {
            self.short_names.insert(short, id);
        }
        if let Some(long) = long {
            self.long_names.insert(long.to_string(), id);
        }
        Ok(id)
    }

    /// Sets the short help (general listing) and long help (targeted help)
    /// for an argument. An empty long help falls back to the short help in
    /// targeted output.
    pub fn set_help(
        &mut self,
        handle: impl ArgumentHandle,
        short_help: &str,
        long_help: &str,
    ) -> Result<()> {
        let entity = self.entity_mut(handle.id())?;
        entity.short_help = short_help.to_string();
        entity.long_help = long_help.to_string();
        Ok(())
    }

    /// Records that `related` is relevant when using `handle`, for targeted
    /// help output. Display-only; nothing is enforced during parsing.
    pub fn add_related(
        &mut self,
        handle: impl ArgumentHandle,
        related: impl ArgumentHandle,
        requirement: Requirement,
    ) -> Result<()> {
        let related_id = related.id();
        self.entity(related_id)?;
        let entity = self.entity_mut(handle.id())?;
        entity.related.push((related_id, requirement));
        Ok(())
    }

    /// Sets the value returned when the user passes nothing.
    pub fn set_default<T: Parsable + PartialEq>(
        &mut self,
        handle: ValueHandle<T>,
        value: T,
    ) -> Result<()> {
        self.value_state_mut(handle)?.default = Some(value);
        Ok(())
    }

    /// Restricts the value to an explicit option set. Parsed values outside
    /// the set are rejected with a `parsing_error` diagnostic.
    pub fn add_option<T: Parsable + PartialEq>(
        &mut self,
        handle: ValueHandle<T>,
        option: T,
    ) -> Result<()> {
        self.value_state_mut(handle)?.options.push(option);
        Ok(())
    }

    /// Adds several options at once. See [`add_option`](Parser::add_option).
    pub fn add_options<T: Parsable + PartialEq>(
        &mut self,
        handle: ValueHandle<T>,
        options: impl IntoIterator<Item = T>,
    ) -> Result<()> {
        self.value_state_mut(handle)?.options.extend(options);
        Ok(())
    }

    /// Sets the character used to split a single token into list elements.
    pub fn set_delimiter<T>(&mut self, handle: ListHandle<T>, delimiter: char) -> Result<()> {
        let entity = self.entity_mut(handle.id)?;
        let ArgKind::List(slot) = &mut entity.kind else {
            return Err(ConfigError::ForeignHandle);
        };
        slot.set_delimiter(delimiter);
        Ok(())
    }

    /// Consumes the token sequence in a single pass.
    ///
    /// Errs with [`ConfigError::AlreadyRun`] on a second call; otherwise the
    /// pass always completes, accumulating any number of diagnostics. If the
    /// first token is a help or version trigger the pass stops immediately
    /// with the corresponding request flag set and nothing else assigned.
    pub fn run(&mut self) -> Result<()> {
        if self.parsed {
            return Err(ConfigError::AlreadyRun);
        }
        self.parsed = true;

        debug!(tokens = self.tokens.len(), "Starting parse run");

        if self.tokens.is_empty() {
            return Ok(());
        }

        match self.tokens[0].as_str() {
            "-v" | "--version" | "version" => {
                debug!("Version requested by first token");
                self.requested_version = true;
                return Ok(());
            }
            "-h" | "--help" | "help" => {
                debug!("Help requested by first token");
                self.requested_help = true;
                return Ok(());
            }
            _ => {}
        }

        let tokens = std::mem::take(&mut self.tokens);
        let mut pending = Pending::None;

        for token in &tokens {
            if token.starts_with('-') {
                // A dash token always interrupts a pending value/list; the
                // unfilled argument just stays unset.
                pending = Pending::None;

                if token.len() == 1 {
                    self.errors.push(ParseError::new(
                        ParseErrorKind::InvalidShortName,
                        token,
                        "single '-' without a short name",
                    ));
                } else if token.starts_with("--") {
                    if token.len() < 4 {
                        self.errors.push(ParseError::new(
                            ParseErrorKind::InvalidLongName,
                            token,
                            "long name must be at least 2 characters long",
                        ));
                    } else {
                        pending = self.resolve_long(token);
                    }
                } else {
                    pending = self.resolve_short(token);
                }
            } else {
                match pending {
                    Pending::Value(id) => {
                        self.assign_value(id, token, token);
                        pending = Pending::None;
                    }
                    Pending::List(id) => self.append_list(id, token, token),
                    Pending::None => self.operands.push(token.clone()),
                }
            }
        }

        self.tokens = tokens;
        debug!(
            operands = self.operands.len(),
            errors = self.errors.len(),
            "Parse run finished"
        );
        Ok(())
    }

    /// Resolves `--NAME` / `--NAME=TAIL`. Caller guarantees the `--` prefix
    /// and a byte length of at least 4.
    fn resolve_long(&mut self, token: &str) -> Pending {
        if !token.as_bytes()[2].is_ascii_alphabetic() {
            self.errors.push(ParseError::new(
                ParseErrorKind::InvalidLongName,
                token,
                "long name must start with an alphabetic character",
            ));
            return Pending::None;
        }

        if let Some(equals) = token.find('=') {
            // The leading character was just checked, so `equals >= 3`.
            if !token[3..equals]
                .bytes()
                .all(|b| b.is_ascii_alphabetic() || b == b'_')
            {
                self.errors.push(ParseError::new(
                    ParseErrorKind::InvalidLongName,
                    token,
                    "long name must contain only alphabetic or underscore characters",
                ));
                return Pending::None;
            }
            if equals == token.len() - 1 {
                self.errors.push(ParseError::new(
                    ParseErrorKind::MissingValue,
                    token,
                    "missing value after '='",
                ));
                return Pending::None;
            }

            let name = &token[2..equals];
            let payload = &token[equals + 1..];
            match self.long_names.get(name).copied() {
                Some(id) if matches!(self.entities[id.0].kind, ArgKind::Value(_)) => {
                    self.assign_value(id, token, payload);
                }
                Some(id) if matches!(self.entities[id.0].kind, ArgKind::List(_)) => {
                    self.append_list(id, token, payload);
                }
                // Flags take no inline payload, so a flag name lands here too.
                _ => self.errors.push(ParseError::new(
                    ParseErrorKind::UnknownLongName,
                    token,
                    format!("unknown long name '{name}'"),
                )),
            }
            return Pending::None;
        }

        if !token[3..]
            .bytes()
            .all(|b| b.is_ascii_alphabetic() || b == b'_')
        {
            self.errors.push(ParseError::new(
                ParseErrorKind::InvalidLongName,
                token,
                "long name must contain only alphabetic or underscore characters",
            ));
            return Pending::None;
        }

        let name = &token[2..];
        match self.long_names.get(name).copied() {
            Some(id) => match &mut self.entities[id.0].kind {
                ArgKind::Flag { set } => {
                    *set = true;
                    Pending::None
                }
                ArgKind::Value(_) => Pending::Value(id),
                ArgKind::List(_) => Pending::List(id),
            },
            None => {
                self.errors.push(ParseError::new(
                    ParseErrorKind::UnknownLongName,
                    token,
                    format!("unknown long name '{name}'"),
                ));
                Pending::None
            }
        }
    }

    /// Resolves `-X`, `-X=TAIL`, and combined groups `-XYZ`. Caller
    /// guarantees a single leading dash and a byte length of at least 2.
    fn resolve_short(&mut self, token: &str) -> Pending {
        if token.len() == 2 {
            let short = token.as_bytes()[1] as char;
            if !short.is_ascii_alphabetic() {
                self.errors.push(ParseError::new(
                    ParseErrorKind::InvalidShortName,
                    token,
                    "short name must be an ASCII alphabetic character",
                ));
                return Pending::None;
            }
            return match self.short_names.get(&short).copied() {
                Some(id) => match &mut self.entities[id.0].kind {
                    ArgKind::Flag { set } => {
                        *set = true;
                        Pending::None
                    }
                    ArgKind::Value(_) => Pending::Value(id),
                    ArgKind::List(_) => Pending::List(id),
                },
                None => {
                    self.errors.push(ParseError::new(
                        ParseErrorKind::UnknownShortName,
                        token,
                        format!("unknown short name '{short}'"),
                    ));
                    Pending::None
                }
            };
        }

        if let Some(equals) = token.find('=') {
            // Trailing `=` is checked first: `-xy=` is a missing value, not
            // an invalid name.
            if equals == token.len() - 1 {
                self.errors.push(ParseError::new(
                    ParseErrorKind::MissingValue,
                    token,
                    "missing value after '='",
                ));
                return Pending::None;
            }
            if equals != 2 {
                self.errors.push(ParseError::new(
                    ParseErrorKind::InvalidShortName,
                    token,
                    "short name must be a single character",
                ));
                return Pending::None;
            }

            let short = token.as_bytes()[1] as char;
            let payload = &token[3..];
            match self.short_names.get(&short).copied() {
                Some(id) if matches!(self.entities[id.0].kind, ArgKind::Value(_)) => {
                    self.assign_value(id, token, payload);
                }
                Some(id) if matches!(self.entities[id.0].kind, ArgKind::List(_)) => {
                    self.append_list(id, token, payload);
                }
                _ => self.errors.push(ParseError::new(
                    ParseErrorKind::UnknownShortName,
                    token,
                    format!("unknown short name '{short}'"),
                )),
            }
            return Pending::None;
        }

        // Combined flag group: each character resolves independently, and
        // only flags participate. Errors never abort the rest of the group.
        for short in token.chars().skip(1) {
            if !short.is_ascii_alphabetic() {
                self.errors.push(ParseError::new(
                    ParseErrorKind::InvalidShortName,
                    token,
                    "short name must be an ASCII alphabetic character",
                ));
                continue;
            }
            match self.short_names.get(&short).copied() {
                Some(id) => {
                    if let ArgKind::Flag { set } = &mut self.entities[id.0].kind {
                        *set = true;
                    } else {
                        self.errors.push(ParseError::new(
                            ParseErrorKind::UnknownShortName,
                            token,
                            format!("unknown short name '{short}'"),
                        ));
                    }
                }
                None => self.errors.push(ParseError::new(
                    ParseErrorKind::UnknownShortName,
                    token,
                    format!("unknown short name '{short}'"),
                )),
            }
        }
        Pending::None
    }

    fn assign_value(&mut self, id: ArgId, raw_token: &str, payload: &str) {
        let pretty = self.entities[id.0].pretty_name();
        if let ArgKind::Value(slot) = &mut self.entities[id.0].kind {
            slot.assign(raw_token, payload, &pretty, &mut self.errors);
        }
    }

    fn append_list(&mut self, id: ArgId, raw_token: &str, payload: &str) {
        if let ArgKind::List(slot) = &mut self.entities[id.0].kind {
            slot.append(raw_token, payload, &mut self.errors);
        }
    }

    /// Replaces the token sequence and clears all parse state, so the parser
    /// can run again. Registration and configuration (help texts, defaults,
    /// options, delimiters) survive.
    ///
    /// # Examples
    ///
    /// ```
    /// use argot_core::Parser;
    ///
    /// let mut parser = Parser::new(["-f"]);
    /// let f = parser.add_flag(Some('f'), None).unwrap();
    /// parser.run().unwrap();
    /// assert!(parser.is_set(f).unwrap());
    ///
    /// parser.reset(["plain"]);
    /// parser.run().unwrap();
    /// assert!(!parser.is_set(f).unwrap());
    /// assert_eq!(parser.operands().unwrap(), ["plain"]);
    /// ```
    pub fn reset<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tokens = tokens.into_iter().map(Into::into).collect();
        self.operands.clear();
        self.errors.clear();
        self.parsed = false;
        self.requested_help = false;
        self.requested_version = false;
        for entity in &mut self.entities {
            entity.reset_state();
        }
    }

    /// True when the argument holds a result: a set flag, a parsed or
    /// defaulted value, or a non-empty list.
    pub fn is_set(&self, handle: impl ArgumentHandle) -> Result<bool> {
        self.ensure_parsed()?;
        let entity = self.entity(handle.id())?;
        Ok(match &entity.kind {
            ArgKind::Flag { set } => *set,
            ArgKind::Value(slot) => slot.is_set(),
            ArgKind::List(slot) => slot.is_set(),
        })
    }

    /// The parsed value, falling back to the default; errs with
    /// [`ConfigError::NotSet`] when neither exists.
    pub fn value<T: Parsable + PartialEq>(&self, handle: ValueHandle<T>) -> Result<&T> {
        self.ensure_parsed()?;
        let entity = self.entity(handle.id)?;
        let ArgKind::Value(slot) = &entity.kind else {
            return Err(ConfigError::ForeignHandle);
        };
        let state = slot
            .as_any()
            .downcast_ref::<ValueState<T>>()
            .ok_or(ConfigError::ForeignHandle)?;
        state
            .value
            .as_ref()
            .or(state.default.as_ref())
            .ok_or_else(|| ConfigError::NotSet(entity.pretty_name()))
    }

    /// All elements gathered during the run, possibly empty.
    pub fn values<T: Parsable>(&self, handle: ListHandle<T>) -> Result<&[T]> {
        self.ensure_parsed()?;
        let entity = self.entity(handle.id)?;
        let ArgKind::List(slot) = &entity.kind else {
            return Err(ConfigError::ForeignHandle);
        };
        let state = slot
            .as_any()
            .downcast_ref::<ListState<T>>()
            .ok_or(ConfigError::ForeignHandle)?;
        Ok(&state.items)
    }

    /// Bare tokens that no pending value or list consumed, in input order.
    pub fn operands(&self) -> Result<&[String]> {
        self.ensure_parsed()?;
        Ok(&self.operands)
    }

    /// Diagnostics accumulated by the run, in discovery order.
    pub fn errors(&self) -> Result<&[ParseError]> {
        self.ensure_parsed()?;
        Ok(&self.errors)
    }

    /// True when the first token was a help trigger.
    pub fn requested_help(&self) -> bool {
        self.requested_help
    }

    /// True when the first token was a version trigger.
    pub fn requested_version(&self) -> bool {
        self.requested_version
    }

    /// The token sequence this parser was given.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The token sequence joined back into a single space-separated line.
    pub fn command_line(&self) -> String {
        self.tokens.join(" ")
    }

    pub(crate) fn entity(&self, id: ArgId) -> Result<&Argument> {
        self.entities.get(id.0).ok_or(ConfigError::ForeignHandle)
    }

    fn entity_mut(&mut self, id: ArgId) -> Result<&mut Argument> {
        self.entities.get_mut(id.0).ok_or(ConfigError::ForeignHandle)
    }

    fn value_state_mut<T: Parsable + PartialEq>(
        &mut self,
        handle: ValueHandle<T>,
    ) -> Result<&mut ValueState<T>> {
        let entity = self.entity_mut(handle.id)?;
        let ArgKind::Value(slot) = &mut entity.kind else {
            return Err(ConfigError::ForeignHandle);
        };
        slot.as_any_mut()
            .downcast_mut::<ValueState<T>>()
            .ok_or(ConfigError::ForeignHandle)
    }

    fn ensure_parsed(&self) -> Result<()> {
        if self.parsed {
            Ok(())
        } else {
            Err(ConfigError::NotYetParsed)
        }
    }
}
