// Entrypoint for the CLI application.
// - Parse arguments (clap exits with code 2 on a malformed invocation).
// - Load credentials, run one command, print its output.
// - This is the only place that turns an error into an exit code.

use clap::Parser;
use crossterm::style::Stylize;
use moltbook_cli::api::ApiClient;
use moltbook_cli::cli::Cli;
use moltbook_cli::commands::{execute, Output};
use moltbook_cli::config::{load_token, Config};
use moltbook_cli::error::CliError;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(text) => match emit(&mut std::io::stdout().lock(), &text) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: could not write output: {}", e);
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            report(&e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<String, CliError> {
    let token = load_token(cli.credentials.as_deref())?;

    let mut config = Config::new(token);
    if let Some(url) = cli.api_url {
        config = config.with_base_url(url);
    }
    if let Some(url) = cli.web_url {
        config = config.with_web_url(url);
    }
    let output = Output {
        json: cli.json,
        web_url: config.web_url.clone(),
    };

    let api = ApiClient::new(config)?;
    execute(&api, &cli.command, &output)
}

/// Write the command output. A reader that hung up early (`| head`) is
/// not an error.
fn emit(out: &mut impl Write, text: &str) -> io::Result<()> {
    match out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn report(e: &CliError) {
    let color = std::io::stderr().is_terminal();
    let mut stderr = std::io::stderr().lock();
    for (label, text) in e.report_lines() {
        let label = format!("{}:", label);
        let _ = if !color {
            writeln!(stderr, "{} {}", label, text)
        } else if label == "Error:" {
            writeln!(stderr, "{} {}", label.red().bold(), text)
        } else {
            writeln!(stderr, "{} {}", label.yellow(), text)
        };
    }
}
