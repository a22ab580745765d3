use argot_core::{ConfigError, ParseErrorKind, Parser};

#[test]
fn test_combined_short_flags_set_both() {
    let mut parser = Parser::new(["-ab"]);
    let a = parser.add_flag(Some('a'), None).unwrap();
    let b = parser.add_flag(Some('b'), None).unwrap();

    parser.run().unwrap();

    assert!(parser.is_set(a).unwrap());
    assert!(parser.is_set(b).unwrap());
    assert!(parser.errors().unwrap().is_empty());
}

#[test]
fn test_pending_value_consumes_next_token() {
    let mut parser = Parser::new(["-x", "5"]);
    let x = parser.add_value::<i32>(Some('x'), None).unwrap();

    parser.run().unwrap();

    assert!(parser.is_set(x).unwrap());
    assert_eq!(parser.value(x).unwrap(), &5);
    assert!(parser.errors().unwrap().is_empty());
}

#[test]
fn test_pending_value_takes_exactly_one_token() {
    let mut parser = Parser::new(["-x", "5", "6"]);
    let x = parser.add_value::<i32>(Some('x'), None).unwrap();

    parser.run().unwrap();

    assert_eq!(parser.value(x).unwrap(), &5);
    assert_eq!(parser.operands().unwrap(), ["6"]);
}

#[test]
fn test_unconvertible_inline_value_reports_one_parsing_error() {
    let mut parser = Parser::new(["--valueX=notanumber"]);
    let x = parser.add_value::<i32>(Some('x'), Some("valueX")).unwrap();

    parser.run().unwrap();

    assert!(!parser.is_set(x).unwrap());
    let errors = parser.errors().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ParseErrorKind::ParsingError);
    assert_eq!(errors[0].token, "--valueX=notanumber");
}

#[test]
fn test_bare_tokens_become_operands() {
    let mut parser = Parser::new(["foo", "bar"]);
    parser.run().unwrap();

    assert_eq!(parser.operands().unwrap(), ["foo", "bar"]);
    assert!(parser.errors().unwrap().is_empty());
}

#[test]
fn test_list_delimiter_splits_within_token() {
    let mut parser = Parser::new(["-s", "a,b;c", "-c", "a,b"]);
    let semi = parser.add_list::<String>(Some('s'), None).unwrap();
    let comma = parser.add_list::<String>(Some('c'), None).unwrap();
    parser.set_delimiter(semi, ';').unwrap();

    parser.run().unwrap();

    assert_eq!(parser.values(semi).unwrap(), ["a,b", "c"]);
    assert_eq!(parser.values(comma).unwrap(), ["a", "b"]);
}

#[test]
fn test_list_keeps_consuming_until_dash_token() {
    let mut parser = Parser::new(["-l", "1", "2,3", "-f", "4"]);
    let l = parser.add_list::<i32>(Some('l'), None).unwrap();
    let f = parser.add_flag(Some('f'), None).unwrap();

    parser.run().unwrap();

    assert_eq!(parser.values(l).unwrap(), [1, 2, 3]);
    assert!(parser.is_set(f).unwrap());
    // The flag token ended the list; the next bare token is an operand again.
    assert_eq!(parser.operands().unwrap(), ["4"]);
}

#[test]
fn test_unfilled_pending_value_is_dropped_without_error() {
    // Interrupted by a dash token.
    let mut parser = Parser::new(["-x", "-f"]);
    let x = parser.add_value::<i32>(Some('x'), None).unwrap();
    let f = parser.add_flag(Some('f'), None).unwrap();
    parser.run().unwrap();
    assert!(!parser.is_set(x).unwrap());
    assert!(parser.is_set(f).unwrap());
    assert!(parser.errors().unwrap().is_empty());

    // Interrupted by end of input.
    let mut parser = Parser::new(["-x"]);
    let x = parser.add_value::<i32>(Some('x'), None).unwrap();
    parser.run().unwrap();
    assert!(!parser.is_set(x).unwrap());
    assert!(parser.errors().unwrap().is_empty());
}

#[test]
fn test_trailing_equals_reports_missing_value() {
    let mut parser = Parser::new(["--files=", "-x=", "-xy="]);
    parser.run().unwrap();

    // `-xy=` included: the trailing `=` wins over the one-character check.
    assert_eq!(error_kinds(&parser), vec![ParseErrorKind::MissingValue; 3]);
    let tokens: Vec<&str> = parser
        .errors()
        .unwrap()
        .iter()
        .map(|e| e.token.as_str())
        .collect();
    assert_eq!(tokens, ["--files=", "-x=", "-xy="]);
}

#[test]
fn test_inline_short_assignment() {
    let mut parser = Parser::new(["-x=5", "-y=2.5"]);
    let x = parser.add_value::<i32>(Some('x'), None).unwrap();
    let y = parser.add_value::<f32>(Some('y'), None).unwrap();

    parser.run().unwrap();

    assert_eq!(parser.value(x).unwrap(), &5);
    assert_eq!(parser.value(y).unwrap(), &2.5);
}

#[test]
fn test_negative_numbers_require_inline_assignment() {
    // `-5` reads as a dash token, so it interrupts the pending value.
    let mut parser = Parser::new(["-x", "-5"]);
    let x = parser.add_value::<i32>(Some('x'), None).unwrap();
    parser.run().unwrap();
    assert!(!parser.is_set(x).unwrap());
    assert_eq!(error_kinds(&parser), vec![ParseErrorKind::InvalidShortName]);

    // Inline assignment keeps the sign inside the same token.
    parser.reset(["-x=-5"]);
    parser.run().unwrap();
    assert_eq!(parser.value(x).unwrap(), &-5);
    assert!(parser.errors().unwrap().is_empty());
}

#[test]
fn test_combined_group_reports_each_bad_character() {
    let mut parser = Parser::new(["-a1z"]);
    let a = parser.add_flag(Some('a'), None).unwrap();

    parser.run().unwrap();

    assert!(parser.is_set(a).unwrap(), "errors must not abort the group");
    assert_eq!(
        error_kinds(&parser),
        vec![
            ParseErrorKind::InvalidShortName,
            ParseErrorKind::UnknownShortName,
        ]
    );
}

#[test]
fn test_values_do_not_join_combined_groups() {
    let mut parser = Parser::new(["-fx", "9"]);
    let f = parser.add_flag(Some('f'), None).unwrap();
    let x = parser.add_value::<i32>(Some('x'), None).unwrap();

    parser.run().unwrap();

    assert!(parser.is_set(f).unwrap());
    assert!(!parser.is_set(x).unwrap());
    assert_eq!(error_kinds(&parser), vec![ParseErrorKind::UnknownShortName]);
    // No pending value was created, so the bare token is an operand.
    assert_eq!(parser.operands().unwrap(), ["9"]);
}

#[test]
fn test_flags_reject_inline_payloads() {
    let mut parser = Parser::new(["-f=1", "--force=yes"]);
    let f = parser.add_flag(Some('f'), Some("force")).unwrap();

    parser.run().unwrap();

    assert!(!parser.is_set(f).unwrap());
    assert_eq!(
        error_kinds(&parser),
        vec![
            ParseErrorKind::UnknownShortName,
            ParseErrorKind::UnknownLongName,
        ]
    );
}

#[test]
fn test_malformed_dash_tokens_each_produce_a_diagnostic() {
    let mut parser = Parser::new(["-", "--", "--x", "--1ab", "--a-b"]);
    parser.run().unwrap();

    assert_eq!(
        error_kinds(&parser),
        vec![
            ParseErrorKind::InvalidShortName,
            ParseErrorKind::InvalidLongName,
            ParseErrorKind::InvalidLongName,
            ParseErrorKind::InvalidLongName,
            ParseErrorKind::InvalidLongName,
        ]
    );
    assert!(parser.operands().unwrap().is_empty());
}

#[test]
fn test_unknown_names_are_reported_not_fatal() {
    let mut parser = Parser::new(["-z", "--nope", "ok"]);
    parser.run().unwrap();

    assert_eq!(
        error_kinds(&parser),
        vec![
            ParseErrorKind::UnknownShortName,
            ParseErrorKind::UnknownLongName,
        ]
    );
    assert_eq!(parser.operands().unwrap(), ["ok"]);
}

#[test]
fn test_last_assignment_wins_for_values() {
    let mut parser = Parser::new(["-x", "1", "--valueX=2"]);
    let x = parser.add_value::<i32>(Some('x'), Some("valueX")).unwrap();

    parser.run().unwrap();

    assert_eq!(parser.value(x).unwrap(), &2);
    assert!(parser.errors().unwrap().is_empty());
}

#[test]
fn test_option_set_restricts_values() {
    let mut parser = Parser::new(["--format=xml"]);
    let format = parser.add_value::<String>(None, Some("format")).unwrap();
    parser
        .add_options(format, ["json".to_string(), "text".to_string()])
        .unwrap();

    parser.run().unwrap();
    assert!(!parser.is_set(format).unwrap());
    assert_eq!(error_kinds(&parser), vec![ParseErrorKind::ParsingError]);

    parser.reset(["--format=json"]);
    parser.run().unwrap();
    assert_eq!(parser.value(format).unwrap(), "json");
    assert!(parser.errors().unwrap().is_empty());
}

#[test]
fn test_default_value_fallback() {
    let mut parser = Parser::new(["-x", "3"]);
    let x = parser.add_value::<i32>(Some('x'), None).unwrap();
    parser.set_default(x, 10).unwrap();
    parser.run().unwrap();
    assert_eq!(parser.value(x).unwrap(), &3, "parsed value beats default");

    let mut parser = Parser::new(Vec::<String>::new());
    let x = parser.add_value::<i32>(Some('x'), None).unwrap();
    parser.set_default(x, 10).unwrap();
    parser.run().unwrap();
    assert!(parser.is_set(x).unwrap());
    assert_eq!(parser.value(x).unwrap(), &10);
}

#[test]
fn test_string_and_bool_conversions() {
    let mut parser = Parser::new(["-s", "hello there", "-b", "true"]);
    let s = parser.add_value::<String>(Some('s'), None).unwrap();
    let b = parser.add_value::<bool>(Some('b'), None).unwrap();

    parser.run().unwrap();

    assert_eq!(parser.value(s).unwrap(), "hello there");
    assert_eq!(parser.value(b).unwrap(), &true);
}

#[test]
fn test_help_first_token_suppresses_assignment() {
    for first in ["-h", "--help", "help"] {
        let mut parser = Parser::new([first, "-f", "5"]);
        let f = parser.add_flag(Some('f'), None).unwrap();
        parser.run().unwrap();

        assert!(parser.requested_help(), "trigger {first:?}");
        assert!(!parser.requested_version());
        assert!(!parser.is_set(f).unwrap(), "trigger {first:?}");
        assert!(parser.errors().unwrap().is_empty());
        assert!(parser.operands().unwrap().is_empty());
    }
}

#[test]
fn test_version_first_token_suppresses_assignment() {
    for first in ["-v", "--version", "version"] {
        let mut parser = Parser::new([first, "-f"]);
        let f = parser.add_flag(Some('f'), None).unwrap();
        parser.run().unwrap();

        assert!(parser.requested_version(), "trigger {first:?}");
        assert!(!parser.requested_help());
        assert!(!parser.is_set(f).unwrap(), "trigger {first:?}");
    }
}

#[test]
fn test_triggers_only_apply_to_the_first_token() {
    let mut parser = Parser::new(["foo", "--help", "help", "-v"]);
    parser.run().unwrap();

    assert!(!parser.requested_help());
    assert!(!parser.requested_version());
    // `--help` resolves like any other long name and `-v` like any other
    // short name; the bare `help` is a plain operand.
    assert_eq!(
        error_kinds(&parser),
        vec![
            ParseErrorKind::UnknownLongName,
            ParseErrorKind::UnknownShortName,
        ]
    );
    assert_eq!(parser.operands().unwrap(), ["foo", "help"]);
}

#[test]
fn test_second_run_and_late_registration_fail() {
    let mut parser = Parser::new(["foo"]);
    parser.add_flag(Some('f'), None).unwrap();
    parser.run().unwrap();

    assert_eq!(parser.run().unwrap_err(), ConfigError::AlreadyRun);
    assert_eq!(
        parser.add_flag(Some('g'), None).unwrap_err(),
        ConfigError::RegistrationClosed
    );
}

#[test]
fn test_registration_rejects_collisions_and_reserved_names() {
    let mut parser = Parser::new(Vec::<String>::new());
    parser.add_flag(Some('a'), Some("alpha")).unwrap();

    assert_eq!(
        parser.add_value::<i32>(Some('a'), Some("other")).unwrap_err(),
        ConfigError::NameInUse("a".to_string())
    );
    assert_eq!(
        parser.add_list::<String>(Some('b'), Some("alpha")).unwrap_err(),
        ConfigError::NameInUse("alpha".to_string())
    );
    assert_eq!(
        parser.add_flag(Some('h'), None).unwrap_err(),
        ConfigError::ReservedShortName('h')
    );
    assert_eq!(
        parser.add_flag(None, Some("help")).unwrap_err(),
        ConfigError::ReservedLongName("help".to_string())
    );
    assert_eq!(
        parser.add_flag(None, Some("version")).unwrap_err(),
        ConfigError::ReservedLongName("version".to_string())
    );
}

#[test]
fn test_reset_clears_state_but_keeps_registration() {
    let mut parser = Parser::new(["-f", "-x", "7", "-l", "a;b"]);
    let f = parser.add_flag(Some('f'), None).unwrap();
    let x = parser.add_value::<i32>(Some('x'), None).unwrap();
    let l = parser.add_list::<String>(Some('l'), None).unwrap();
    parser.set_delimiter(l, ';').unwrap();

    parser.run().unwrap();
    assert!(parser.is_set(f).unwrap());
    assert_eq!(parser.value(x).unwrap(), &7);
    assert_eq!(parser.values(l).unwrap(), ["a", "b"]);

    parser.reset(["-l", "c;d"]);
    // Queries are invalid again until the next run.
    assert_eq!(parser.is_set(f).unwrap_err(), ConfigError::NotYetParsed);
    assert_eq!(parser.errors().unwrap_err(), ConfigError::NotYetParsed);

    parser.run().unwrap();
    assert!(!parser.is_set(f).unwrap());
    assert!(!parser.is_set(x).unwrap());
    assert_eq!(parser.values(l).unwrap(), ["c", "d"], "delimiter survives reset");
}

#[test]
fn test_targeted_help_via_second_token() {
    let mut parser = Parser::new(["-h", "weights"]);
    let w = parser.add_list::<f32>(Some('w'), Some("weights")).unwrap();
    parser.set_help(w, "Per-item weights", "").unwrap();
    parser.run().unwrap();
    let text = parser.help_text().unwrap();
    assert!(text.starts_with("Per-item weights\n"), "got: {text}");
    assert!(text.contains("Required arguments:"));

    let mut parser = Parser::new(["-h", "zzz"]);
    parser.add_flag(Some('f'), None).unwrap();
    parser.run().unwrap();
    assert_eq!(parser.help_text().unwrap(), "Unknown argument name\n");
}

#[test]
fn test_full_scenario_single_pass() {
    let mut parser = Parser::new([
        "report.pdf",
        "-af",
        "--threads",
        "8",
        "-l",
        "x;y",
        "extra",
        "--mode=fast",
        "-z",
    ]);
    let a = parser.add_flag(Some('a'), None).unwrap();
    let f = parser.add_flag(Some('f'), None).unwrap();
    let threads = parser.add_value::<u32>(Some('t'), Some("threads")).unwrap();
    let l = parser.add_list::<String>(Some('l'), None).unwrap();
    parser.set_delimiter(l, ';').unwrap();
    let mode = parser.add_value::<String>(None, Some("mode")).unwrap();
    parser
        .add_options(mode, ["fast".to_string(), "slow".to_string()])
        .unwrap();

    parser.run().unwrap();

    assert!(parser.is_set(a).unwrap());
    assert!(parser.is_set(f).unwrap());
    assert_eq!(parser.value(threads).unwrap(), &8);
    // The list swallows every bare token until the next dash token.
    assert_eq!(parser.values(l).unwrap(), ["x", "y", "extra"]);
    assert_eq!(parser.value(mode).unwrap(), "fast");
    assert_eq!(parser.operands().unwrap(), ["report.pdf"]);
    assert_eq!(error_kinds(&parser), vec![ParseErrorKind::UnknownShortName]);
}

fn error_kinds(parser: &Parser) -> Vec<ParseErrorKind> {
    parser.errors().unwrap().iter().map(|e| e.kind).collect()
}
