use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum LogLevel {
    Debug,
    Info,
    #[default]
    Warn,
    Error,
    Silent,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> Option<tracing::Level> {
        match self {
            LogLevel::Debug => Some(tracing::Level::DEBUG),
            LogLevel::Info => Some(tracing::Level::INFO),
            LogLevel::Warn => Some(tracing::Level::WARN),
            LogLevel::Error => Some(tracing::Level::ERROR),
            LogLevel::Silent => None,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Final frame as a standalone SVG document.
    #[default]
    Svg,
    /// Final node positions as JSON.
    Json,
}

/// Plays a commit history through the force layout and writes the final frame.
#[derive(Parser, Debug, Clone)]
#[command(name = "gitstories", version)]
pub struct Cli {
    /// Commit history (JSON, or YAML with a .yaml/.yml extension).
    pub history: PathBuf,

    /// Scene configuration file (JSON or YAML); every field is optional.
    #[clap(long, short)]
    pub config: Option<PathBuf>,

    /// Ticks between two commits. Overrides the config value.
    #[clap(long)]
    pub frames_per_commit: Option<usize>,

    /// Extra ticks after the last commit.
    #[clap(long, default_value_t = 300)]
    pub settle_frames: usize,

    #[clap(long, short, default_value = "svg", value_enum)]
    pub format: OutputFormat,

    /// Output file; stdout when omitted.
    #[clap(long, short)]
    pub out: Option<PathBuf>,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,
}
