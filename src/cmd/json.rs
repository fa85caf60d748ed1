use nbtree::nbt::Result;

use crate::cmd::util::{Input, emit_json, load, tag_to_json};

#[derive(clap::Args)]
pub struct Args {
	#[command(flatten)]
	pub input: Input,
}

/// Print the whole tree as JSON.
pub fn run(args: Args) -> Result<()> {
	let file = load(&args.input)?;
	emit_json(&tag_to_json(&file.root))
}
