use nbtree::nbt::{Result, size};

use crate::cmd::util::{Input, emit_json, kind_counts, load};

#[derive(clap::Args)]
pub struct Args {
	#[command(flatten)]
	pub input: Input,
	#[arg(long)]
	pub json: bool,
}

/// Print compression, root, and node statistics.
pub fn run(args: Args) -> Result<()> {
	let Args { input, json } = args;

	let file = load(&input)?;
	let root = &file.root;
	let nodes = size(root);
	let kinds = kind_counts(root);

	if json {
		let payload = InfoJson {
			path: input.path.display().to_string(),
			compression: file.compression.as_str(),
			root_type: root.kind().as_str(),
			root_name: root.name_str().into_owned(),
			nodes,
			kinds: kinds.iter().map(|(kind, count)| KindCountJson { kind: kind.as_str(), count: *count }).collect(),
		};
		return emit_json(&payload);
	}

	println!("path: {}", input.path.display());
	println!("compression: {}", file.compression.as_str());
	println!("root_type: {}", root.kind());
	println!("root_name: {}", root.name_str());
	println!("nodes: {nodes}");
	println!("kinds:");
	for (kind, count) in kinds {
		println!("  {kind}: {count}");
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct InfoJson {
	path: String,
	compression: &'static str,
	root_type: &'static str,
	root_name: String,
	nodes: usize,
	kinds: Vec<KindCountJson>,
}

#[derive(serde::Serialize)]
struct KindCountJson {
	kind: &'static str,
	count: usize,
}
