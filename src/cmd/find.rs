use nbtree::nbt::{Result, find_by_name, write_ascii};

use crate::cmd::util::{Input, emit_json, fail, load, tag_to_json};

#[derive(clap::Args)]
pub struct Args {
	#[command(flatten)]
	pub input: Input,
	#[arg(long)]
	pub name: String,
	#[arg(long)]
	pub json: bool,
}

/// Print the first tag in pre-order carrying `--name`.
pub fn run(args: Args) -> Result<()> {
	let Args { input, name, json } = args;

	let file = load(&input)?;
	let Some(tag) = find_by_name(&file.root, &name) else {
		fail(&format!("no tag named '{name}' in {}", input.path.display()));
	};

	if json {
		return emit_json(&tag_to_json(tag));
	}
	write_ascii(tag, &mut std::io::stdout().lock())
}
