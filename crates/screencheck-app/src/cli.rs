use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// screencheck: drive a screen-capture session against a simulated
/// platform and print what the session manager reports.
#[derive(Parser, Debug)]
#[command(name = "screencheck", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log filter override (e.g. `debug` or `screencheck=trace`).
    #[arg(long)]
    pub log_level: Option<String>,

    /// How the simulated platform answers the capture request.
    #[arg(long, value_enum, default_value_t = Outcome::Grant)]
    pub outcome: Outcome,

    /// Display surface the granted track reports.
    #[arg(long, default_value = "monitor")]
    pub surface: String,

    #[arg(long, default_value_t = 1920)]
    pub width: u32,

    #[arg(long, default_value_t = 1080)]
    pub height: u32,

    #[arg(long, default_value_t = 30.0)]
    pub fps: f64,

    /// How long to keep an active session before ending it.
    #[arg(long, default_value_t = 0)]
    pub hold_ms: u64,

    /// End the session from the platform side instead of calling stop.
    #[arg(long)]
    pub platform_end: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Outcome {
    Grant,
    Cancel,
    Deny,
    Fail,
    Unsupported,
    Insecure,
}

pub fn parse() -> Args {
    Args::parse()
}
