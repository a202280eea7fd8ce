mod cli;
mod view;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context as _;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Command};
use smsz_core::ClientConfig;
use smsz_gateway::{Gateway, HttpGateway, MemoryGateway};
use smsz_session::{CompressStatus, DecompressStatus, SessionController};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("smsz=debug,smsz_session=debug,smsz_gateway=debug,smsz_core=debug")
        } else {
            EnvFilter::new("smsz=info,smsz_session=warn,smsz_gateway=warn,smsz_core=warn")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ClientConfig::default(),
    };
    if let Some(url) = &cli.gateway {
        config.gateway.base_url = url.clone();
    }
    config.validate()?;
    Ok(config)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    let gateway: Arc<dyn Gateway> = if cli.offline {
        info!("Using in-process gateway");
        Arc::new(MemoryGateway::new())
    } else {
        info!(url = %config.gateway.base_url, "Using HTTP gateway");
        Arc::new(HttpGateway::new(config.gateway.clone())?)
    };
    let session = SessionController::from_config(gateway, &config);

    println!("SMS Compression using Zstandard");
    println!("{}", view::HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Command::Input(text) => session.set_input(text),
            Command::Compress => {
                println!("Compressing data...");
                match session.compress_input().await {
                    CompressStatus::Applied(outcome) => {
                        for line in view::outcome_lines(&session.snapshot()) {
                            println!("{}", line);
                        }
                        if outcome.is_success() {
                            view::follow_ratio(session.animator()).await;
                        }
                    }
                    CompressStatus::Busy => println!("Still compressing, try again shortly."),
                }
            }
            Command::Decompress => {
                let status = session.decompress().await;
                if status != DecompressStatus::Stale {
                    println!("Decompressed Text: {}", session.snapshot().decompressed_text);
                }
            }
            Command::Status => {
                for line in view::status_lines(&session.snapshot()) {
                    println!("{}", line);
                }
            }
            Command::Help => println!("{}", view::HELP),
            Command::Quit => break,
        }
    }

    session.shutdown();
    Ok(())
}
