//! Help, version, and diagnostic rendering for [`Parser`].
//!
//! Rendering is pull-based: nothing is printed automatically. After
//! [`Parser::run`] the caller asks for [`Parser::help_text`] and prints it
//! wherever it wants, which keeps the engine free of any I/O.

use crate::argument::{ArgId, Requirement};
use crate::error::Result;
use crate::parser::Parser;

/// Column where help strings start in the general argument listing.
pub const DEFAULT_NAME_WIDTH: usize = 20;

/// Width of the help column before line wrapping kicks in.
pub const DEFAULT_HELP_WIDTH: usize = 60;

impl Parser {
    /// Renders help or version output with the default column widths.
    ///
    /// Returns `None` when the run requested neither help nor version, so a
    /// caller can print-and-exit on `Some` and otherwise carry on.
    ///
    /// # Examples
    ///
    /// ```
    /// use argot_core::Parser;
    ///
    /// let mut parser = Parser::new(["--version"])
    ///     .with_app_info("demo", "1.0", "");
    /// parser.run().unwrap();
    /// assert_eq!(parser.help_text(), Some("demo\n1.0\n".to_string()));
    /// ```
    pub fn help_text(&self) -> Option<String> {
        self.help_text_with_widths(DEFAULT_NAME_WIDTH, DEFAULT_HELP_WIDTH)
    }

    /// Renders help or version output with explicit column widths.
    ///
    /// `name_width` is where help strings start; `name_width + help_width`
    /// is the column after which a space in the help string wraps the line.
    pub fn help_text_with_widths(&self, name_width: usize, help_width: usize) -> Option<String> {
        if self.requested_version() {
            return Some(self.render_version());
        }
        if self.requested_help() {
            if self.tokens().len() > 1 {
                return Some(self.render_targeted_help());
            }
            return Some(self.render_argument_listing(name_width, help_width));
        }
        None
    }

    /// Renders every accumulated diagnostic as a block of three lines, in
    /// discovery order. Empty when the run was clean.
    ///
    /// # Examples
    ///
    /// ```
    /// use argot_core::Parser;
    ///
    /// let mut parser = Parser::new(["--nope"]);
    /// parser.run().unwrap();
    /// let report = parser.error_report().unwrap();
    /// assert!(report.contains("unknown_long_name"));
    /// assert!(report.contains("while parsing \"--nope\""));
    /// ```
    pub fn error_report(&self) -> Result<String> {
        let mut out = String::new();
        for error in self.errors()? {
            out.push_str(&format!(
                "A parse error occurred:\n  {}: {}\n  while parsing \"{}\"\n",
                error.kind, error.message, error.token
            ));
        }
        Ok(out)
    }

    fn render_version(&self) -> String {
        let mut out = String::new();
        for line in [&self.app_name, &self.app_version, &self.app_description] {
            if !line.is_empty() {
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }

    /// Help for the single argument named by the token after the trigger,
    /// followed by its related arguments grouped by requirement.
    fn render_targeted_help(&self) -> String {
        let mut out = String::new();

        let Some(id) = self.lookup_target(&self.tokens()[1]) else {
            out.push_str("Unknown argument name\n");
            return out;
        };

        let entity = &self.entities[id.0];
        if entity.long_help.is_empty() {
            out.push_str(&entity.short_help);
        } else {
            out.push_str(&entity.long_help);
        }
        out.push('\n');

        out.push_str("Required arguments:\n");
        for &(related, requirement) in &entity.related {
            if requirement == Requirement::Required {
                out.push_str(&self.entities[related.0].pretty_name());
                out.push(' ');
            }
        }
        out.push_str("\nOptional arguments:\n");
        for &(related, requirement) in &entity.related {
            if requirement == Requirement::Optional {
                out.push_str(&self.entities[related.0].pretty_name());
                out.push(' ');
            }
        }
        out
    }

    /// The target may be written bare (`f`, `force`) or dashed (`-f`,
    /// `--force`); all four spellings resolve to the same argument.
    fn lookup_target(&self, target: &str) -> Option<ArgId> {
        if let Some(rest) = target.strip_prefix("--") {
            return self.long_names.get(rest).copied();
        }
        let mut chars = target.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(short), None, _) => self.short_names.get(&short).copied(),
            (Some('-'), Some(short), None) => self.short_names.get(&short).copied(),
            (Some('-'), _, _) => None,
            _ => self.long_names.get(target).copied(),
        }
    }

    /// Every registered argument with its short help, names left-aligned in
    /// a `name_width` column and help wrapped at `name_width + help_width`.
    fn render_argument_listing(&self, name_width: usize, help_width: usize) -> String {
        let total_width = name_width + help_width;
        let mut out = String::from("Available arguments:\n");

        for entity in &self.entities {
            let mut col = 0;

            if let Some(short) = entity.short {
                out.push('-');
                out.push(short);
                out.push(' ');
                col += 3;
            }
            if let Some(long) = &entity.long {
                out.push_str("--");
                out.push_str(long);
                out.push(' ');
                col += long.len() + 3;
            }
            // Names too wide for the column push the help to its own line.
            if col >= name_width {
                out.push('\n');
                col = 0;
            }

            for c in entity.short_help.chars() {
                while col < name_width {
                    out.push(' ');
                    col += 1;
                }
                // Wrap at the first space past the right edge. The wrapped
                // space itself becomes the last indent column, so the next
                // word starts exactly at name_width.
                if col >= total_width && c == ' ' {
                    out.push('\n');
                    let indent = name_width.saturating_sub(1);
                    out.push_str(&" ".repeat(indent));
                    col = indent;
                }
                out.push(c);
                col += 1;
            }
            out.push('\n');
        }
        out
    }
}
