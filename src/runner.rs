use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Context};
use serde_json::Value;
use tracing::Span;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use sast_utils::config::Config;
use sast_utils::table::{read_delimited_table, write_delimited_table, Record};
use sast_utils::{ensure_directory, read_structured_file, remove_file, FsError};

pub fn run_from_cli(cli: Cli) -> anyhow::Result<ExitCode> {
    let flag_level = if cli.debug { Some("debug") } else if cli.verbose { Some("info") } else { None };

    let config = match &cli.config {
        Some(path) => match load_config(path, flag_level.unwrap_or("warn"), std::io::stderr) {
            Ok(config) => config,
            Err(_) => return Ok(ExitCode::FAILURE),
        },
        None => Config::default(),
    };

    let crate_level = flag_level.unwrap_or(config.log_level.as_str());
    build_subscriber(crate_level, config.ansi, config.with_target, std::io::stderr).init();

    let span = tracing::info_span!("sast_utils");
    exit_code(run_command(cli.command, &span))
}

/// Our crate gets the requested level; everything else stays at warn.
fn build_subscriber<W>(crate_level: &str, ansi: bool, with_target: bool, writer: W) -> impl tracing::Subscriber + Send + Sync + 'static
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let filter_str = format!("warn,sast_utils={crate_level}");
    let env_filter = EnvFilter::try_new(&filter_str).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(ansi)
        .with_target(with_target)
        .with_writer(writer)
        .finish()
}

/// The global logger depends on the config, so reading it logs through a
/// temporary one.
fn load_config<W>(path: &Path, crate_level: &str, writer: W) -> Result<Config, FsError>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let startup = build_subscriber(crate_level, false, false, writer);
    tracing::subscriber::with_default(startup, || Config::from_file(path, &Span::none()))
}

fn run_command(command: Commands, span: &Span) -> anyhow::Result<()> {
    match command {
        Commands::ReadCsv { path } => {
            let table = read_delimited_table(&path, span)?;
            for record in table.into_records() {
                println!("{}", serde_json::to_string(&record)?);
            }
        }
        Commands::AppendCsv { path, headers, rows, write_headers } => {
            let doc = read_structured_file(&rows, span)?;
            let records = records_from_json(&doc).with_context(|| format!("invalid rows in {}", rows.display()))?;
            write_delimited_table(&path, &records, &headers, write_headers, span)?;
        }
        Commands::ReadJson { path } => {
            let doc = read_structured_file(&path, span)?;
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        Commands::Mkdir { path } => ensure_directory(&path, span)?,
        Commands::Rm { path } => remove_file(&path, span)?,
    }
    Ok(())
}

/// Library failures were already logged by the operation; only the rest goes
/// back to `main` for printing.
fn exit_code(outcome: anyhow::Result<()>) -> anyhow::Result<ExitCode> {
    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) if e.is::<FsError>() => Ok(ExitCode::FAILURE),
        Err(e) => Err(e),
    }
}

/// Turn a JSON array of flat objects into csv records.
fn records_from_json(doc: &Value) -> anyhow::Result<Vec<Record>> {
    let Some(items) = doc.as_array() else {
        bail!("expected a JSON array of objects");
    };
    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let Some(obj) = item.as_object() else {
            bail!("row {i} is not an object");
        };
        let mut record = Record::new();
        for (k, v) in obj {
            let cell = match v {
                Value::String(s) => s.clone(),
                Value::Null => String::new(),
                Value::Bool(_) | Value::Number(_) => v.to_string(),
                Value::Array(_) | Value::Object(_) => bail!("row {i}: field {k:?} is not a scalar"),
            };
            record.insert(k.clone(), cell);
        }
        out.push(record);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn scalars_become_cells() {
        let rows = records_from_json(&json!([{"user": "a", "line": 12, "valid": true, "note": null}])).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["user"], "a");
        assert_eq!(rows[0]["line"], "12");
        assert_eq!(rows[0]["valid"], "true");
        assert_eq!(rows[0]["note"], "");
    }

    #[test]
    fn nested_values_are_rejected() {
        assert!(records_from_json(&json!([{"user": {"name": "a"}}])).is_err());
        assert!(records_from_json(&json!({"user": "a"})).is_err());
        assert!(records_from_json(&json!(["a"])).is_err());
    }

    #[test]
    fn operation_failures_exit_quietly() {
        let err = FsError::NotAFile { path: PathBuf::from("results") };
        let code = exit_code(Err(err.into())).unwrap();
        assert_eq!(format!("{code:?}"), format!("{:?}", ExitCode::FAILURE));

        let code = exit_code(Ok(())).unwrap();
        assert_eq!(format!("{code:?}"), format!("{:?}", ExitCode::SUCCESS));
    }

    #[test]
    fn other_failures_go_back_to_main() {
        let outcome = records_from_json(&json!({"user": "a"})).map(|_| ());
        assert!(exit_code(outcome).is_err());
    }

    #[test]
    fn config_read_is_logged_before_global_init() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = tmp.path().join("config.json");
        fs::write(&cfg, r#"{"ansi": "yes"}"#).unwrap();
        let log_path = tmp.path().join("startup.log");
        let log_file = fs::File::create(&log_path).unwrap();

        let result = load_config(&cfg, "debug", move || log_file.try_clone().unwrap());

        assert!(result.is_err());
        let logs = fs::read_to_string(&log_path).unwrap();
        assert!(logs.contains("Trying to get json file"));
        assert!(logs.contains("ERROR"));
    }
}
