use std::{
    io::{self, BufRead},
    path::PathBuf,
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{HttpDogApi, ViewerController};
use crossbeam_channel::bounded;
use tracing_subscriber::EnvFilter;

mod bridge;
mod commands;
mod config;
mod render;

use commands::{dispatch_command, parse_line, Input, USAGE};
use config::load_settings;
use render::TerminalRenderer;

const COMMAND_QUEUE_CAPACITY: usize = 64;
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Parser, Debug)]
#[command(name = "dog-viewer", about = "Browse dog pictures by breed from the terminal")]
struct Args {
    /// TOML config file; defaults to ./dog-viewer.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    api_base_url: Option<String>,
    #[arg(long)]
    batch_size: Option<usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let settings = load_settings(args.config.as_deref())?
        .with_overrides(args.api_base_url, args.batch_size);
    tracing::info!(?settings, "starting dog viewer");

    let api = HttpDogApi::new(&settings.api_base_url)
        .with_context(|| format!("cannot use api base url '{}'", settings.api_base_url))?;
    let controller = ViewerController::with_options(
        Arc::new(api),
        Arc::new(TerminalRenderer::stdout()),
        settings.viewer_options(),
    );

    let (cmd_tx, cmd_rx) = bounded(COMMAND_QUEUE_CAPACITY);
    let worker = bridge::launch(controller, cmd_rx);

    println!("{USAGE}");
    let mut status = String::new();
    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read command from stdin")?;
        match parse_line(&line) {
            Input::Command(cmd) => dispatch_command(&cmd_tx, cmd, &mut status),
            Input::Help => println!("{USAGE}"),
            // Pending loads are abandoned on an explicit quit.
            Input::Quit => return Ok(()),
            Input::Empty => {}
            Input::Unknown(text) => println!("unknown command '{text}'; type 'help'"),
        }
        if !status.is_empty() {
            println!("{status}");
            status.clear();
        }
    }

    drop(cmd_tx);
    if worker.join().is_err() {
        anyhow::bail!("viewer worker panicked");
    }
    Ok(())
}
