use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use imed::{app::App, config::Config, file_io, logging};

/// Edit a single text file in the terminal.
#[derive(Debug, Parser)]
#[command(name = "imed", version)]
struct Args {
	/// File to edit.
	path:   PathBuf,
	/// Key binding file; defaults to the per-user config.toml if present.
	#[arg(long)]
	config: Option<PathBuf>,
}

fn main() {
	if let Err(err) = run() {
		eprintln!("{:#}", err);
		std::process::exit(1);
	}
}

fn run() -> Result<()> {
	let args = Args::parse();
	logging::init_logging().context("initialize logging failed")?;
	let config = Config::load(args.config.as_deref()).context("load config failed")?;
	let buffer = file_io::load_file(&args.path).context("open file failed")?;
	App::new(buffer, config.keymap).run().context("run editor failed")
}
