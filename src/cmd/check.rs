use nbtree::nbt::{Result, dump_ascii, dump_binary, filter, parse_with, size, try_clone};

use crate::cmd::util::{Input, fail, load};

#[derive(clap::Args)]
pub struct Args {
	#[command(flatten)]
	pub input: Input,
	/// Also print the decoded tree before checking.
	#[arg(long)]
	pub dump: bool,
}

/// Verify that cloning, filtering, and a binary round trip preserve the tree.
pub fn run(args: Args) -> Result<()> {
	let Args { input, dump } = args;

	let file = load(&input)?;
	let tree = &file.root;
	println!("parsed: {} nodes ({})", size(tree), file.compression.as_str());
	if dump {
		print!("{}", dump_ascii(tree));
	}

	let clone = try_clone(tree)?;
	if !tree.approx_eq(&clone) {
		fail("clone differs from source");
	}
	println!("clone: ok");

	match filter(tree, |_| true)? {
		Some(copy) if tree.approx_eq(&copy) => println!("filter: ok"),
		_ => fail("accept-all filter differs from source"),
	}

	let bytes = dump_binary(tree)?;
	println!("encoded: {} bytes", bytes.len());

	let reparsed = parse_with(&bytes, &input.options())?;
	if !tree.approx_eq(&reparsed) {
		print!("reparsed tree:\n{}", dump_ascii(&reparsed));
		fail("reparsed tree differs from source");
	}
	println!("reparse: ok");

	Ok(())
}
