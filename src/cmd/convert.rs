use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use nbtree::nbt::{Compression, Result, write_to_stream};

use crate::cmd::util::{Input, load, parse_compression};

#[derive(clap::Args)]
pub struct Args {
	#[command(flatten)]
	pub input: Input,
	#[arg(long)]
	pub out: PathBuf,
	/// Output compression; defaults to the input's.
	#[arg(long, value_parser = parse_compression)]
	pub compression: Option<Compression>,
}

/// Decode the input and write it back with the requested compression.
pub fn run(args: Args) -> Result<()> {
	let Args { input, out, compression } = args;

	let file = load(&input)?;
	let compression = compression.unwrap_or(file.compression);

	let mut writer = BufWriter::new(File::create(&out)?);
	write_to_stream(&file.root, &mut writer, compression)?;

	println!("{} -> {} ({} -> {})", input.path.display(), out.display(), file.compression.as_str(), compression.as_str());
	Ok(())
}
