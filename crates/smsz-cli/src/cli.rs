use clap::Parser;
use std::path::PathBuf;

/// Compress short messages through a remote compression gateway.
#[derive(Debug, Parser)]
#[command(name = "smsz", version)]
pub struct Cli {
    /// JSON config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Gateway base URL, overrides the config file
    #[arg(short, long)]
    pub gateway: Option<String>,

    /// Use the in-process gateway instead of HTTP
    #[arg(long)]
    pub offline: bool,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Compress,
    Decompress,
    Status,
    Help,
    Quit,
    /// Anything that is not a command replaces the input text.
    Input(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            ":c" | ":compress" => Command::Compress,
            ":d" | ":decompress" => Command::Decompress,
            ":s" | ":status" => Command::Status,
            ":h" | ":help" => Command::Help,
            ":q" | ":quit" => Command::Quit,
            _ => Command::Input(line.to_string()),
        }
    }
}
