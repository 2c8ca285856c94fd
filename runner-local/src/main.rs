use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::io::Read;
use students_core::telemetry::init_tracing;
use students_core::{DynamoStudentStore, StudentHandlers, load_config};
use tracing::info;

/// Runs one handler invocation from a workstation, e.g. against DynamoDB Local
/// with `DYNAMODB_ENDPOINT_URL=http://localhost:8000`.
///
/// The API Gateway response is printed to stdout. Store failures exit non-zero,
/// the same way they fail a Lambda invocation.
#[derive(Debug, Parser)]
#[command(name = "students-local", version, about)]
struct Cli {
    /// YAML config file. Falls back to STUDENTS_CONFIG, then defaults.
    #[arg(long, env = "STUDENTS_CONFIG_PATH")]
    config: Option<String>,

    /// Invocation event as JSON: a file path, or `-` for stdin. Defaults to `{}`.
    #[arg(long, global = true)]
    event: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Scan the whole table.
    Fetch,
    /// Upsert the student described by the event.
    Insert,
}

fn read_event(source: Option<&str>) -> Result<Value> {
    let text = match source {
        None => return Ok(Value::Object(Default::default())),
        Some("-") => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read event from stdin")?;
            buf
        }
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read event file {}", path))?,
    };
    serde_json::from_str(&text).context("Event is not valid JSON")
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    let event = read_event(cli.event.as_deref())?;

    let store = DynamoStudentStore::from_config(&config).await;
    let handlers = StudentHandlers::from_config(store, &config);
    info!("Running {:?} against table '{}'", cli.command, config.table_name);

    let response = match cli.command {
        Command::Fetch => handlers.fetch_all_students(event).await,
        Command::Insert => handlers.insert_student(event).await,
    }
    .context("Invocation failed")?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_insert_with_event() {
        let cli = Cli::try_parse_from(["students-local", "insert", "--event", "student.json"])
            .unwrap();
        assert!(matches!(cli.command, Command::Insert));
        assert_eq!(cli.event.as_deref(), Some("student.json"));
    }

    #[test]
    fn test_missing_event_defaults_to_empty_object() {
        assert_eq!(read_event(None).unwrap(), serde_json::json!({}));
    }
}
