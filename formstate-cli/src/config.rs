//! Command line configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use formstate::{FormSchema, SchemaError, demo_schema};
use simplelog::LevelFilter;

use crate::paths;

#[derive(Debug, Parser)]
#[command(name = "formstate")]
#[command(version)]
#[command(about = "Fill in a validated form from the terminal", long_about = None)]
pub struct Cli {
    /// JSON form schema (defaults to form.json in the config dir, then the demo form)
    #[arg(long, env = "FORMSTATE_SCHEMA")]
    pub schema: Option<PathBuf>,

    /// Log verbosity
    #[arg(long, env = "FORMSTATE_LOG", value_enum, default_value_t = LogLevel::Debug)]
    pub log_level: LogLevel,

    /// Write logs here instead of the rotated cache-dir log
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Print submissions to stdout as JSON instead of logging them
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl Cli {
    /// Resolve the schema to use.
    ///
    /// An explicit `--schema` must load; the config-dir file is used only if
    /// it exists; otherwise the demo form is returned.
    pub fn load_schema(&self) -> Result<FormSchema, SchemaError> {
        if let Some(path) = &self.schema {
            return FormSchema::from_path(path);
        }
        match paths::default_schema() {
            Some(path) if path.is_file() => {
                log::info!("Loading schema from {}", path.display());
                FormSchema::from_path(path)
            }
            _ => {
                log::info!("No schema configured, using the demo form");
                Ok(demo_schema())
            }
        }
    }
}
