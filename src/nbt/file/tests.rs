use std::io::Write;

use flate2::Compression as Level;
use flate2::write::{GzEncoder, ZlibEncoder};

use crate::nbt::{Compression, DecodeOptions, ErrorClass, NbtError, NbtFile, Tag, TagList, Value, dump_binary, parse_chunk, parse_compressed, parse_from_stream, write_to_stream};

fn level() -> Tag {
	Tag::named(
		"Level",
		Value::Compound(vec![
			Tag::named("LastPlayed", Value::Long(1_264_099_775_885)),
			Tag::named("Motion", Value::List(TagList::new(vec![Tag::unnamed(Value::Double(0.5)), Tag::unnamed(Value::Double(-0.25))]))),
		]),
	)
}

fn gzip(bytes: &[u8]) -> Vec<u8> {
	let mut encoder = GzEncoder::new(Vec::new(), Level::default());
	encoder.write_all(bytes).expect("gzip write");
	encoder.finish().expect("gzip finish")
}

#[test]
fn stream_parse_reads_gzip() {
	let raw = dump_binary(&level()).expect("encodes");
	let packed = gzip(&raw);
	let tree = parse_from_stream(packed.as_slice()).expect("stream decodes");
	assert_eq!(tree, level());
}

#[test]
fn stream_parse_rejects_plain_bytes() {
	let raw = dump_binary(&level()).expect("encodes");
	let err = parse_from_stream(raw.as_slice()).expect_err("not gzip");
	assert_eq!(err.class(), ErrorClass::Compression);
}

#[test]
fn chunk_parse_reads_zlib() {
	let raw = dump_binary(&level()).expect("encodes");
	let mut encoder = ZlibEncoder::new(Vec::new(), Level::best());
	encoder.write_all(&raw).expect("zlib write");
	let packed = encoder.finish().expect("zlib finish");

	assert_eq!(parse_chunk(&packed).expect("chunk decodes"), level());
}

#[test]
fn compressed_parse_detects_each_mode() {
	for mode in [Compression::None, Compression::Gzip, Compression::Zlib, Compression::Zstd] {
		let mut out = Vec::new();
		write_to_stream(&level(), &mut out, mode).expect("stream encodes");
		assert_eq!(parse_compressed(&out).expect("detects and decodes"), level(), "{}", mode.as_str());
	}
}

#[test]
fn truncated_payload_inside_valid_gzip_is_truncated() {
	let raw = dump_binary(&level()).expect("encodes");
	let packed = gzip(&raw[..raw.len() - 3]);
	let err = parse_compressed(&packed).expect_err("payload is cut");
	assert_eq!(err.class(), ErrorClass::Truncated);
}

#[test]
fn file_round_trip_keeps_compression() {
	let dir = tempfile::tempdir().expect("tempdir");
	let path = dir.path().join("level.dat");
	std::fs::write(&path, gzip(&dump_binary(&level()).expect("encodes"))).expect("fixture written");

	let file = NbtFile::open(&path).expect("opens");
	assert_eq!(file.compression, Compression::Gzip);
	assert_eq!(file.root, level());

	let copy = dir.path().join("copy.dat");
	file.save(&copy).expect("saves");
	let raw = std::fs::read(&copy).expect("copy readable");
	assert_eq!(Compression::detect(&raw), Some(Compression::Gzip));
	assert_eq!(NbtFile::open(&copy).expect("reopens"), file);
}

#[test]
fn missing_file_is_io() {
	let dir = tempfile::tempdir().expect("tempdir");
	let err = NbtFile::open(dir.path().join("absent.dat")).expect_err("no such file");
	assert_eq!(err.class(), ErrorClass::Io);
}

#[test]
fn open_with_applies_decoder_limits() {
	let dir = tempfile::tempdir().expect("tempdir");
	let path = dir.path().join("trailing.dat");
	let mut raw = dump_binary(&level()).expect("encodes");
	raw.extend_from_slice(&[0xAA, 0xBB]);
	std::fs::write(&path, gzip(&raw)).expect("fixture written");

	assert_eq!(NbtFile::open(&path).expect("trailing bytes tolerated").root, level());

	let strict = DecodeOptions {
		allow_trailing: false,
		..DecodeOptions::default()
	};
	let err = NbtFile::open_with(&path, &strict).expect_err("strict rejects trailing bytes");
	assert!(matches!(err, NbtError::TrailingData { leftover: 2 }), "{err:?}");

	let shallow = DecodeOptions {
		max_depth: 1,
		..DecodeOptions::default()
	};
	let err = NbtFile::from_bytes_with(&raw, &shallow).expect_err("motion list is nested");
	assert!(matches!(err, NbtError::DepthExceeded { max_depth: 1 }), "{err:?}");
}
