use std::path::PathBuf;

use nbtree::nbt::{Compression, DecodeOptions, NbtFile, Result, Tag, TagKind, Value};

/// Input file plus decoder limits shared by every subcommand.
#[derive(clap::Args)]
pub struct Input {
	pub path: PathBuf,
	/// Maximum List/Compound nesting accepted by the decoder.
	#[arg(long, default_value_t = DecodeOptions::default().max_depth)]
	pub max_depth: u32,
	/// Fail instead of warning when bytes follow the root tag.
	#[arg(long)]
	pub strict: bool,
}

impl Input {
	pub(crate) fn options(&self) -> DecodeOptions {
		DecodeOptions {
			max_depth: self.max_depth,
			allow_trailing: !self.strict,
		}
	}
}

/// Read, decompress, and decode the input file.
pub(crate) fn load(input: &Input) -> Result<NbtFile> {
	NbtFile::open_with(&input.path, &input.options())
}

/// Print `payload` as pretty JSON on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) -> Result<()> {
	let text = serde_json::to_string_pretty(payload).map_err(std::io::Error::from)?;
	println!("{text}");
	Ok(())
}

/// Report a failed check the same way `main` reports errors.
pub(crate) fn fail(message: &str) -> ! {
	eprintln!("error: {message}");
	std::process::exit(1);
}

/// clap value parser for `--compression`.
pub(crate) fn parse_compression(label: &str) -> std::result::Result<Compression, String> {
	Compression::from_label(label).ok_or_else(|| format!("unknown compression '{label}' (expected none, gzip, zlib or zstd)"))
}

/// Per-kind node counts in wire order, omitting kinds that never occur.
pub(crate) fn kind_counts(tree: &Tag) -> Vec<(TagKind, usize)> {
	let mut counts = [0_usize; TagKind::ALL.len()];
	nbtree::nbt::visit(tree, |node| {
		counts[usize::from(node.kind().as_u8())] += 1;
		true
	});

	TagKind::ALL.iter().zip(counts).filter(|(_, count)| *count > 0).map(|(kind, count)| (*kind, count)).collect()
}

/// Convert a tag into `{ "type", "name", "value" }` JSON, keeping child order.
pub(crate) fn tag_to_json(tag: &Tag) -> serde_json::Value {
	let mut out = serde_json::Map::new();
	out.insert("type".to_owned(), serde_json::json!(tag.kind().as_str()));
	out.insert("name".to_owned(), tag.name.as_ref().map_or(serde_json::Value::Null, |name| serde_json::json!(name.to_str_lossy())));
	out.insert("value".to_owned(), value_to_json_value(&tag.value));
	if let Value::List(list) = &tag.value {
		out.insert("elem_type".to_owned(), serde_json::json!(list.elem_kind.as_str()));
	}
	serde_json::Value::Object(out)
}

fn value_to_json_value(value: &Value) -> serde_json::Value {
	use serde_json::Value as JsonValue;

	match value {
		Value::Byte(v) => serde_json::json!(v),
		Value::Short(v) => serde_json::json!(v),
		Value::Int(v) => serde_json::json!(v),
		Value::Long(v) => serde_json::json!(v),
		Value::Float(v) => serde_json::json!(v),
		Value::Double(v) => serde_json::json!(v),
		Value::ByteArray(bytes) => JsonValue::Array(bytes.iter().map(|item| serde_json::json!(item)).collect()),
		Value::String(text) => serde_json::json!(text.to_str_lossy()),
		Value::List(list) => JsonValue::Array(list.items.iter().map(tag_to_json).collect()),
		Value::Compound(items) => JsonValue::Array(items.iter().map(tag_to_json).collect()),
	}
}
