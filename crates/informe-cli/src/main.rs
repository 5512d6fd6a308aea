//! Informador CLI: lifecycle event stream in, test report out
//!
//! ## Usage
//!
//! ```bash
//! informador events.jsonl                  # transcript + XML on stdout
//! informador events.jsonl -o junit.xml     # XML to a file
//! informador events.jsonl --pretty         # indented XML
//! informador - < events.jsonl              # read stdin
//! informador results.jsonl --wait          # poll until the file appears
//! ```

use clap::Parser;
use informador::{collect_events, print_transcript, write_report, Cli, CliResult};
use informe::{pretty_print, serialize, wait_until, RunResults};
use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(results) => {
            if results.all_passed() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: &Cli) -> CliResult<RunResults> {
    let collector = if cli.reads_stdin() {
        let stdin = std::io::stdin();
        collect_events(stdin.lock())?
    } else {
        if cli.wait {
            let path = cli.events.clone();
            tracing::info!(
                path = %path.display(),
                timeout_ms = cli.timeout_ms,
                "waiting for event stream"
            );
            wait_until(|| path.exists(), cli.timeout_ms)?;
        }
        let file = File::open(&cli.events)?;
        collect_events(BufReader::new(file))?
    };

    let results = collector.into_results();

    if !cli.no_transcript && !cli.quiet {
        print_transcript(&results, cli.color.enabled());
    }

    let mut xml = serialize(&results);
    if cli.pretty {
        xml = pretty_print(&xml);
    }
    write_report(&xml, cli.output.as_deref())?;

    Ok(results)
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_filter = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
