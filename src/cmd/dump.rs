use nbtree::nbt::{Result, write_ascii};

use crate::cmd::util::{Input, load};

#[derive(clap::Args)]
pub struct Args {
	#[command(flatten)]
	pub input: Input,
}

/// Print the whole tree as indented text.
pub fn run(args: Args) -> Result<()> {
	let file = load(&args.input)?;
	write_ascii(&file.root, &mut std::io::stdout().lock())
}
