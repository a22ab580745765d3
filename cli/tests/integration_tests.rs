use std::process::Output;

/// Runs the inspector binary with the given argv tail.
fn run_inspect(args: &[&str]) -> Output {
    std::process::Command::new(env!("CARGO_BIN_EXE_argot-inspect"))
        .args(args)
        .output()
        .expect("failed to run argot-inspect")
}

// ---------------------------------------------------------------------------
// Help and version modes
// ---------------------------------------------------------------------------

#[test]
fn help_lists_registered_arguments() {
    let out = run_inspect(&["--help"]);
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Available arguments:"), "stdout: {stdout}");
    assert!(stdout.contains("-a --archive"));
    assert!(stdout.contains("Include archived entries"));
    assert!(stdout.contains("-x --threshold"));
    assert!(stdout.contains("-w --weights"));
}

#[test]
fn targeted_help_renders_related_groups() {
    let out = run_inspect(&["help", "threshold"]);
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.contains("Entries scoring below the threshold are skipped."),
        "targeted help should prefer the long help. stdout: {stdout}"
    );
    assert!(stdout.contains("Required arguments:\n[w, weights]"));
    assert!(stdout.contains("Optional arguments:\n[y, _]"));
}

#[test]
fn version_prints_app_metadata() {
    let out = run_inspect(&["--version"]);
    assert!(out.status.success());

    let expected = format!(
        "argot-inspect\n{}\nShows how argot classifies a command line against a demo schema\n",
        env!("CARGO_PKG_VERSION")
    );
    assert_eq!(String::from_utf8_lossy(&out.stdout), expected);
}

// ---------------------------------------------------------------------------
// Classification reports
// ---------------------------------------------------------------------------

#[test]
fn classifies_flags_values_lists_and_operands() {
    let out = run_inspect(&["extra", "-at", "-x", "5", "-l", "one;two"]);
    assert!(out.status.success());

    let expected = "Flag --archive was set\n\
                    Flag -t was set\n\
                    Value --threshold = 5\n\
                    List --labels = one, two\n\
                    Operand: extra\n";
    assert_eq!(String::from_utf8_lossy(&out.stdout), expected);
}

#[test]
fn json_report_is_machine_readable() {
    let out = run_inspect(&["oper", "-j", "-x=7", "-w", "0.5"]);
    assert!(out.status.success());

    let report: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("stdout should be valid JSON");
    assert_eq!(report["threshold"], 7);
    assert_eq!(report["weights"], serde_json::json!([0.5]));
    assert_eq!(report["operands"], serde_json::json!(["oper"]));
    assert_eq!(report["archive"], false);
    assert!(report["errors"].as_array().unwrap().is_empty());
}

#[test]
fn parse_errors_are_reported_not_fatal() {
    let out = run_inspect(&["--nope"]);
    assert!(
        out.status.success(),
        "diagnostics must not fail the process"
    );

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("A parse error occurred:"), "stdout: {stdout}");
    assert!(stdout.contains("unknown_long_name"));
    assert!(stdout.contains("while parsing \"--nope\""));
}
