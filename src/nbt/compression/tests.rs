use crate::nbt::{Compression, ErrorClass, NbtError, Tag, Value, compress, decompress, dump_binary};

fn payload() -> Vec<u8> {
	let tree = Tag::named(
		"hello world",
		Value::Compound(vec![Tag::named("name", Value::String("Bananrama".into())), Tag::named("big", Value::ByteArray(vec![7; 10_000]))]),
	);
	dump_binary(&tree).expect("tree encodes")
}

#[test]
fn detect_by_leading_bytes() {
	assert_eq!(Compression::detect(&[0x1F, 0x8B, 0x08]), Some(Compression::Gzip));
	assert_eq!(Compression::detect(&[0x78, 0x9C, 0x00]), Some(Compression::Zlib));
	assert_eq!(Compression::detect(&[0x78, 0xDA]), Some(Compression::Zlib));
	assert_eq!(Compression::detect(&[0x28, 0xB5, 0x2F, 0xFD, 0x00]), Some(Compression::Zstd));
	assert_eq!(Compression::detect(&[0x0A, 0x00, 0x00]), Some(Compression::None));
	assert_eq!(Compression::detect(&[0x00]), None);
	assert_eq!(Compression::detect(&[0x42, 0x4C]), None);
	assert_eq!(Compression::detect(&[]), None);
}

#[test]
fn every_mode_survives_compress_then_decompress() {
	let raw = payload();
	for mode in [Compression::None, Compression::Gzip, Compression::Zlib, Compression::Zstd] {
		let packed = compress(&raw, mode).expect("compresses");
		assert_eq!(Compression::detect(&packed), Some(mode), "{} output is self-identifying", mode.as_str());

		let (detected, unpacked) = decompress(&packed).expect("decompresses");
		assert_eq!(detected, mode);
		assert_eq!(unpacked, raw);
	}
}

#[test]
fn compressed_output_is_smaller_for_repetitive_payload() {
	let raw = payload();
	let packed = compress(&raw, Compression::Gzip).expect("compresses");
	assert!(packed.len() < raw.len() / 4);
}

#[test]
fn unknown_magic_reports_first_bytes() {
	let err = decompress(b"BLENDER-v300").expect_err("not nbt");
	assert!(matches!(err, NbtError::UnknownMagic { magic } if &magic == b"BLEN"));
	assert_eq!(err.class(), ErrorClass::Compression);
}

#[test]
fn truncated_gzip_is_a_compression_error() {
	let packed = compress(&payload(), Compression::Gzip).expect("compresses");
	let err = decompress(&packed[..packed.len() / 2]).expect_err("stream is cut");
	assert!(matches!(err, NbtError::CorruptStream { codec: "gzip", .. }), "{err:?}");
	assert_eq!(err.class(), ErrorClass::Compression);
}

#[test]
fn labels_parse_back() {
	for mode in [Compression::None, Compression::Gzip, Compression::Zlib, Compression::Zstd] {
		assert_eq!(Compression::from_label(mode.as_str()), Some(mode));
	}
	assert_eq!(Compression::from_label("lz4"), None);
}
