use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use todo_core::{view, ClientConfig, ReqwestTransport, TodoListController};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod command;

use command::Command;

/// Terminal client for a remote to-do list.
#[derive(Debug, Parser)]
#[command(name = "todo", version)]
struct Args {
    /// Backend base URL (overrides TODO_API_URL).
    #[arg(long)]
    base_url: Option<String>,

    /// Minimum time the loading screen stays up, in milliseconds
    /// (overrides TODO_MIN_LOADING_MS).
    #[arg(long)]
    min_loading_ms: Option<u64>,
}

const DEFAULT_LOG_FILTER: &str = "info";

/// `RUST_LOG` when set and valid, `info` otherwise.
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(log_filter())
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    let args = Args::parse();
    let mut config = ClientConfig::from_env();
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(ms) = args.min_loading_ms {
        config.min_loading = Duration::from_millis(ms);
    }
    tracing::info!(base_url = %config.base_url, "starting");

    let mut controller = TodoListController::from_config(&config, ReqwestTransport::new());
    print!("{}", view::render(&controller));
    controller.load().await;
    print!("{}", view::render(&controller));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match command::parse(&line, controller.items()) {
            Ok(Command::Intent(intent)) => {
                let outcome = controller.dispatch(intent).await;
                tracing::debug!(?outcome, "dispatched");
            }
            Ok(Command::List) => {}
            Ok(Command::Help) => {
                println!("{}", command::HELP);
                continue;
            }
            Ok(Command::Quit) => break,
            Err(e) => {
                eprintln!("{e:#}");
                continue;
            }
        }
        print!("{}", view::render(&controller));
    }
    Ok(())
}
