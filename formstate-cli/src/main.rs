mod config;
mod error;
mod paths;
mod session;

use std::fs::{self, File};
use std::io;
use std::process::ExitCode;

use clap::Parser;
use formstate::{FormStore, JsonSink};
use simplelog::{Config, LevelFilter, WriteLogger};

use config::Cli;
use error::CliError;
use session::Session;

fn init_logging(cli: &Cli) -> Result<(), CliError> {
    let level = LevelFilter::from(cli.log_level);
    if level == LevelFilter::Off {
        return Ok(());
    }

    let path = match &cli.log_file {
        Some(path) => path.clone(),
        None => {
            paths::rotate_logs();
            match paths::log_file() {
                Some(path) => path,
                None => return Ok(()),
            }
        }
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let log_file = File::create(&path)?;
    WriteLogger::init(level, Config::default(), log_file)?;
    log::info!("Logging to {}", path.display());
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    init_logging(&cli)?;

    let schema = cli.load_schema()?;
    let mut store = FormStore::new(schema);
    if cli.json {
        store = store.with_sink(JsonSink::new(io::stdout()));
    }

    let stdin = io::stdin();
    Session::new(store, stdin.lock(), io::stdout()).run()?;
    log::info!("Session ended");
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
