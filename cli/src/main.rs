use argot_core::{
    ConfigError, FlagHandle, ListHandle, Parsable, ParseError, Parser, Requirement, ValueHandle,
};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, fmt};

const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The fixed demonstration schema every command line is parsed against.
///
/// It exercises each entity kind: flags with both and short-only names, an
/// `i32` value with both names, a short-only `f32` value, a
/// semicolon-delimited string list, and an `f32` list.
#[derive(Debug)]
struct DemoSchema {
    archive: FlagHandle,
    dry_run: FlagHandle,
    json: FlagHandle,
    threshold: ValueHandle<i32>,
    scale: ValueHandle<f32>,
    labels: ListHandle<String>,
    weights: ListHandle<f32>,
}

impl DemoSchema {
    fn register(parser: &mut Parser) -> Result<Self, ConfigError> {
        let archive = parser.add_flag(Some('a'), Some("archive"))?;
        let dry_run = parser.add_flag(Some('t'), None)?;
        let json = parser.add_flag(Some('j'), Some("json"))?;
        let threshold = parser.add_value::<i32>(Some('x'), Some("threshold"))?;
        let scale = parser.add_value::<f32>(Some('y'), None)?;
        let labels = parser.add_list::<String>(Some('l'), Some("labels"))?;
        let weights = parser.add_list::<f32>(Some('w'), Some("weights"))?;

        parser.set_delimiter(labels, ';')?;

        parser.set_help(
            archive,
            "Include archived entries",
            "Includes entries that were archived. Archived entries are skipped by default.",
        )?;
        parser.set_help(dry_run, "Dry run, change nothing", "")?;
        parser.set_help(json, "Print the classification report as JSON", "")?;
        parser.set_help(
            threshold,
            "Minimum score for an entry to count",
            "Entries scoring below the threshold are skipped. The threshold applies to the weighted score.",
        )?;
        parser.set_help(scale, "Scale factor applied to every weight", "")?;
        parser.set_help(labels, "Labels to match, separated by ';'", "")?;
        parser.set_help(weights, "Per-label weights", "")?;

        parser.add_related(threshold, weights, Requirement::Required)?;
        parser.add_related(threshold, scale, Requirement::Optional)?;

        Ok(Self {
            archive,
            dry_run,
            json,
            threshold,
            scale,
            labels,
            weights,
        })
    }
}

/// Everything one run produced, in a serializable record.
#[derive(Debug, Serialize)]
struct Report {
    command_line: String,
    archive: bool,
    dry_run: bool,
    threshold: Option<i32>,
    scale: Option<f32>,
    labels: Vec<String>,
    weights: Vec<f32>,
    operands: Vec<String>,
    errors: Vec<ParseError>,
}

impl Report {
    fn collect(parser: &Parser, schema: &DemoSchema) -> Result<Self, ConfigError> {
        Ok(Self {
            command_line: parser.command_line(),
            archive: parser.is_set(schema.archive)?,
            dry_run: parser.is_set(schema.dry_run)?,
            threshold: value_of(parser, schema.threshold)?,
            scale: value_of(parser, schema.scale)?,
            labels: parser.values(schema.labels)?.to_vec(),
            weights: parser.values(schema.weights)?.to_vec(),
            operands: parser.operands()?.to_vec(),
            errors: parser.errors()?.to_vec(),
        })
    }
}

fn main() {
    init_tracing();

    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut parser = Parser::from_env().with_app_info(
        "argot-inspect",
        PACKAGE_VERSION,
        "Shows how argot classifies a command line against a demo schema",
    );
    let schema = DemoSchema::register(&mut parser).map_err(|e| e.to_string())?;

    parser.run().map_err(|e| e.to_string())?;

    if let Some(text) = parser.help_text() {
        print!("{text}");
        if !text.ends_with('\n') {
            println!();
        }
        return Ok(());
    }

    let report = Report::collect(&parser, &schema).map_err(|e| e.to_string())?;

    if parser.is_set(schema.json).map_err(|e| e.to_string())? {
        let raw = serde_json::to_string_pretty(&report)
            .map_err(|err| format!("Failed to serialize report: {err}"))?;
        println!("{raw}");
        return Ok(());
    }

    if !report.errors.is_empty() {
        print!("{}", parser.error_report().map_err(|e| e.to_string())?);
    }
    print_report(&report);

    Ok(())
}

fn print_report(report: &Report) {
    if report.archive {
        println!("Flag --archive was set");
    }
    if report.dry_run {
        println!("Flag -t was set");
    }
    if let Some(threshold) = report.threshold {
        println!("Value --threshold = {threshold}");
    }
    if let Some(scale) = report.scale {
        println!("Value -y = {scale}");
    }
    if !report.labels.is_empty() {
        println!("List --labels = {}", report.labels.join(", "));
    }
    if !report.weights.is_empty() {
        let rendered: Vec<String> = report.weights.iter().map(f32::to_string).collect();
        println!("List --weights = {}", rendered.join(", "));
    }
    for operand in &report.operands {
        println!("Operand: {operand}");
    }
}

fn value_of<T: Parsable + PartialEq + Clone>(
    parser: &Parser,
    handle: ValueHandle<T>,
) -> Result<Option<T>, ConfigError> {
    if parser.is_set(handle)? {
        Ok(Some(parser.value(handle)?.clone()))
    } else {
        Ok(None)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_collects_entity_states() {
        let mut parser = Parser::new(["-a", "-x", "5", "doc.txt"]);
        let schema = DemoSchema::register(&mut parser).unwrap();
        parser.run().unwrap();

        let report = Report::collect(&parser, &schema).unwrap();
        assert!(report.archive);
        assert!(!report.dry_run);
        assert_eq!(report.threshold, Some(5));
        assert_eq!(report.scale, None);
        assert_eq!(report.operands, ["doc.txt"]);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_report_serializes_to_json() {
        let mut parser = Parser::new(["--labels", "a;b", "-w", "0.5,2"]);
        let schema = DemoSchema::register(&mut parser).unwrap();
        parser.run().unwrap();

        let report = Report::collect(&parser, &schema).unwrap();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"labels\":[\"a\",\"b\"]"));
        assert!(json.contains("\"weights\":[0.5,2.0]"));
    }
}
