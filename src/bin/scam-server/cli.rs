//! # Cli
//!
//! Argument parsing for the REPL server.

use clap::{Parser, ValueEnum};

/// Struct containing the CLI configuration for scam-server.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Where to listen.
    #[arg(long, default_value_t = 8000)]
    pub port: u16,

    /// Specify the log level of the server.
    #[arg(value_enum, short, long, default_value_t = LogLevel::default())]
    pub verbosity: LogLevel,
}

impl Cli {
    pub fn init() -> Self {
        Cli::parse()
    }
}

/// Enum for specifying the log level.
#[derive(ValueEnum, Clone, Default, Debug)]
pub enum LogLevel {
    /// Only critical errors will be logged.
    Error,

    /// Also log warnings.
    Warn,

    /// The default for the server: connection lifecycle included.
    #[default]
    Info,

    /// Log everything which happens internally.
    Debug,

    /// Log extra information.
    Trace,
}

impl From<&LogLevel> for log::Level {
    fn from(value: &LogLevel) -> Self {
        match value {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}
