/// Wire discriminator selecting a tag's payload layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TagKind {
	/// Compound terminator, and the element kind of lists written empty.
	End = 0,
	/// Signed 8-bit integer.
	Byte = 1,
	/// Signed 16-bit integer.
	Short = 2,
	/// Signed 32-bit integer.
	Int = 3,
	/// Signed 64-bit integer.
	Long = 4,
	/// IEEE-754 single.
	Float = 5,
	/// IEEE-754 double.
	Double = 6,
	/// Raw bytes with an i32 length.
	ByteArray = 7,
	/// Byte string with an i16 length.
	String = 8,
	/// Homogeneous sequence of unnamed payloads.
	List = 9,
	/// End-terminated sequence of named tags.
	Compound = 10,
}

impl TagKind {
	/// Every kind in wire order.
	pub const ALL: [TagKind; 11] = [
		Self::End,
		Self::Byte,
		Self::Short,
		Self::Int,
		Self::Long,
		Self::Float,
		Self::Double,
		Self::ByteArray,
		Self::String,
		Self::List,
		Self::Compound,
	];

	/// Decode a wire kind byte.
	pub fn from_u8(raw: u8) -> Option<Self> {
		Self::ALL.get(usize::from(raw)).copied()
	}

	/// Wire kind byte.
	pub fn as_u8(self) -> u8 {
		self as u8
	}

	/// Display name used by the ASCII dump.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::End => "TAG_End",
			Self::Byte => "TAG_Byte",
			Self::Short => "TAG_Short",
			Self::Int => "TAG_Int",
			Self::Long => "TAG_Long",
			Self::Float => "TAG_Float",
			Self::Double => "TAG_Double",
			Self::ByteArray => "TAG_Byte_Array",
			Self::String => "TAG_String",
			Self::List => "TAG_List",
			Self::Compound => "TAG_Compound",
		}
	}
}

impl std::fmt::Display for TagKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}
