use std::path::PathBuf;

use clap::Parser;

/// Aegis: run a web page as a desktop application with native capabilities.
#[derive(Parser, Debug)]
#[command(name = "aegis", version, about)]
pub struct Args {
    /// Project directory (defaults to the current directory).
    pub directory: Option<PathBuf>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Write a commented aegis.toml into the project directory and exit.
    #[arg(long)]
    pub init: bool,
}

impl Args {
    /// The project directory, made absolute when possible.
    pub fn project_dir(&self) -> PathBuf {
        let dir = self.directory.clone().unwrap_or_else(|| PathBuf::from("."));
        std::fs::canonicalize(&dir).unwrap_or(dir)
    }
}

pub fn parse() -> Args {
    Args::parse()
}
