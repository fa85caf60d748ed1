#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "nbtree", about = "Named Binary Tag inspection and conversion tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	Info(cmd::info::Args),
	Dump(cmd::dump::Args),
	Json(cmd::json::Args),
	Find(cmd::find::Args),
	Check(cmd::check::Args),
	Convert(cmd::convert::Args),
}

fn main() {
	init_tracing();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn init_tracing() {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}

fn run() -> nbtree::nbt::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Info(args) => cmd::info::run(args),
		Commands::Dump(args) => cmd::dump::run(args),
		Commands::Json(args) => cmd::json::run(args),
		Commands::Find(args) => cmd::find::run(args),
		Commands::Check(args) => cmd::check::run(args),
		Commands::Convert(args) => cmd::convert::run(args),
	}
}
