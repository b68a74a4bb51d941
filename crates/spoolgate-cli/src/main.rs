// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Spoolgate: command-line front end.
//
// Entry point. Initialises logging, resolves the configuration and backend,
// runs one facade operation and prints its result as JSON on stdout.  Logs go
// to stderr so stdout stays machine-readable.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde_json::{Value, json};

use spoolgate_core::error::{Result, SpoolgateError};
use spoolgate_core::human_errors::humanize_error;
use spoolgate_core::{BackendConfig, FileJobRequest, JobId, RawJobRequest, SpoolgateConfig};
use spoolgate_print::PrinterFacade;

#[derive(Parser)]
#[command(name = "spoolgate")]
#[command(about = "Query printers and submit print jobs", version)]
struct Cli {
    /// Path to a JSON configuration file
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Spooler backend: stub, memory, or memory:<fixture.json>
    #[arg(long, short = 'b', global = true)]
    backend: Option<BackendConfig>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every printer with its normalized status
    List,

    /// Print the default printer name
    Default,

    /// Show one printer (the default printer when omitted)
    Info { printer: Option<String> },

    /// Show the paper size selected in the printer driver
    PaperSize { printer: Option<String> },

    /// Dump the printer driver options
    DriverOptions { printer: Option<String> },

    /// Send already-formatted data to a printer
    PrintRaw {
        /// Data to print
        #[arg(long, conflicts_with = "input", required_unless_present = "input")]
        text: Option<String>,

        /// Read the data to print from a file
        #[arg(long, short = 'i')]
        input: Option<PathBuf>,

        /// Spooler data type (RAW, TEXT, ...)
        #[arg(long = "type", short = 't')]
        data_type: Option<String>,

        #[command(flatten)]
        target: JobTarget,
    },

    /// Have the spooler print a file
    PrintFile {
        file: PathBuf,

        #[command(flatten)]
        target: JobTarget,
    },

    /// Show a job
    Job { printer: String, id: u32 },

    /// Apply a job command (CANCEL, PAUSE, RESUME, ...)
    SetJob {
        printer: String,
        id: u32,
        command: String,
    },

    /// List the data types raw printing accepts
    Formats,

    /// List the job commands set-job accepts
    #[command(name = "commands")]
    JobCommands,
}

#[derive(Args)]
struct JobTarget {
    /// Target printer (the default printer when omitted)
    #[arg(long, short = 'p')]
    printer: Option<String>,

    /// Name shown in the spooler's job list
    #[arg(long, short = 'n')]
    docname: Option<String>,

    /// Spooler option as key=value (repeatable)
    #[arg(long = "option", short = 'o', value_parser = parse_option)]
    options: Vec<(String, String)>,
}

fn parse_option(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).and_then(|output| print_json(&output)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            let human = humanize_error(&e);
            eprintln!("error: {}", human.message);
            eprintln!("  {}", human.suggestion);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<Value> {
    let mut config = match &cli.config {
        Some(path) => SpoolgateConfig::load(path)?,
        None => SpoolgateConfig::default(),
    };
    if let Some(backend) = cli.backend {
        config = config.with_backend(backend);
    }
    let facade = PrinterFacade::from_config(config)?;
    execute(&facade, cli.command)
}

fn execute(facade: &PrinterFacade, command: Command) -> Result<Value> {
    let output = match command {
        Command::List => serde_json::to_value(facade.list_printers()?)?,
        Command::Default => json!(facade.default_printer_name()?),
        Command::Info { printer } => serde_json::to_value(facade.printer(printer.as_deref())?)?,
        Command::PaperSize { printer } => json!(facade.selected_paper_size(printer.as_deref())?),
        Command::DriverOptions { printer } => {
            serde_json::to_value(facade.printer_driver_options(printer.as_deref())?)?
        }
        Command::PrintRaw {
            text,
            input,
            data_type,
            target,
        } => {
            let data = match (text, input) {
                (Some(text), _) => text.into_bytes(),
                (None, Some(path)) => std::fs::read(&path)?,
                (None, None) => {
                    return Err(SpoolgateError::InvalidRequest(
                        "print-raw needs --text or --input".into(),
                    ));
                }
            };
            let request = RawJobRequest {
                data,
                printer: target.printer,
                docname: target.docname,
                data_type,
                options: target.options.into_iter().collect(),
            };
            json!({ "jobId": facade.print_direct(request)? })
        }
        Command::PrintFile { file, target } => {
            let request = FileJobRequest {
                filename: file,
                printer: target.printer,
                docname: target.docname,
                options: target.options.into_iter().collect(),
            };
            json!({ "jobId": facade.print_file(request)? })
        }
        Command::Job { printer, id } => serde_json::to_value(facade.job(&printer, JobId(id))?)?,
        Command::SetJob {
            printer,
            id,
            command,
        } => json!({ "accepted": facade.set_job(&printer, JobId(id), &command)? }),
        Command::Formats => json!(facade.supported_print_formats()?),
        Command::JobCommands => json!(facade.supported_job_commands()?),
    };
    Ok(output)
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;

    use clap::CommandFactory;
    use spoolgate_backend::{MemoryBackend, MemoryFixture};
    use spoolgate_core::Printer;

    fn facade() -> PrinterFacade {
        let backend = MemoryBackend::new(MemoryFixture {
            printers: vec![
                Printer::new("Office").with_option("printer-state", "3"),
                Printer::new("Receipt").as_default(),
            ],
            ..MemoryFixture::default()
        })
        .with_next_job_id(42);
        PrinterFacade::new(Arc::new(backend), SpoolgateConfig::default())
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("spoolgate").chain(args.iter().copied()))
            .expect("arguments parse")
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_backend_flag_parses_identifiers() {
        let cli = parse(&["list", "--backend", "memory:printers.json"]);
        assert_eq!(
            cli.backend,
            Some(BackendConfig::Memory {
                fixture: Some("printers.json".into())
            })
        );
        assert!(Cli::try_parse_from(["spoolgate", "--backend", "winspool", "list"]).is_err());
    }

    #[test]
    fn print_raw_requires_exactly_one_source() {
        assert!(Cli::try_parse_from(["spoolgate", "print-raw"]).is_err());
        assert!(
            Cli::try_parse_from(["spoolgate", "print-raw", "--text", "x", "--input", "a.txt"])
                .is_err()
        );
    }

    #[test]
    fn options_must_be_key_value() {
        assert_eq!(
            parse_option("media=A4"),
            Ok(("media".to_string(), "A4".to_string()))
        );
        assert!(parse_option("media").is_err());
        assert!(parse_option("=A4").is_err());
    }

    #[test]
    fn print_raw_reports_job_id() {
        let cli = parse(&["print-raw", "--text", "hello", "-t", "text", "-o", "cpi=12"]);
        let output = execute(&facade(), cli.command).expect("print");
        assert_eq!(output, json!({ "jobId": 42 }));
    }

    #[test]
    fn print_file_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"report").expect("write");
        let path = file.path().display().to_string();

        let cli = parse(&["print-file", &path, "--printer", "Office"]);
        let output = execute(&facade(), cli.command).expect("print");
        assert_eq!(output, json!({ "jobId": 42 }));
    }

    #[test]
    fn queries_render_as_json() {
        let facade = facade();
        let output = execute(&facade, parse(&["default"]).command).expect("default");
        assert_eq!(output, json!("Receipt"));

        let output = execute(&facade, parse(&["list"]).command).expect("list");
        assert_eq!(output[0]["name"], "Office");
        assert_eq!(output[0]["status"], "IDLE");

        let output = execute(&facade, parse(&["paper-size"]).command).expect("paper size");
        assert_eq!(output, json!(""));

        let output = execute(&facade, parse(&["commands"]).command).expect("commands");
        assert!(output.as_array().is_some_and(|c| c.contains(&json!("CANCEL"))));
    }

    #[test]
    fn job_commands_round_trip() {
        let facade = facade();
        execute(&facade, parse(&["print-raw", "--text", "x"]).command).expect("print");

        let output =
            execute(&facade, parse(&["set-job", "Receipt", "42", "pause"]).command).expect("pause");
        assert_eq!(output, json!({ "accepted": true }));

        let output = execute(&facade, parse(&["job", "Receipt", "42"]).command).expect("job");
        assert_eq!(output["status"], json!(["PAUSED"]));

        let output = execute(&facade, parse(&["job", "Receipt", "7"]).command).expect("job");
        assert_eq!(output, Value::Null);
    }

    #[test]
    fn stub_backend_fails_with_unavailable() {
        let cli = parse(&["--backend", "stub", "list"]);
        assert!(matches!(run(cli), Err(SpoolgateError::PlatformUnavailable)));
    }
}
