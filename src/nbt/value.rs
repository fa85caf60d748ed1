use std::borrow::Cow;
use std::fmt;

use crate::nbt::TagKind;

/// Tolerance applied to Float/Double payloads by [`Tag::approx_eq`].
pub const FLOAT_EPSILON: f64 = 0.000_001;

/// Length-prefixed byte string used for names and String payloads.
///
/// Contents are expected to be UTF-8 but are kept verbatim, so embedded NULs and
/// invalid sequences survive a decode/encode round trip.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagStr(Box<[u8]>);

impl TagStr {
	/// Raw bytes.
	pub fn as_bytes(&self) -> &[u8] {
		&self.0
	}

	/// Byte length.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Whether the string is empty.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Borrow as `str` when the bytes are valid UTF-8.
	pub fn as_str(&self) -> Option<&str> {
		std::str::from_utf8(&self.0).ok()
	}

	/// Render as text, replacing invalid sequences.
	pub fn to_str_lossy(&self) -> Cow<'_, str> {
		String::from_utf8_lossy(&self.0)
	}
}

impl fmt::Debug for TagStr {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(&self.to_str_lossy(), f)
	}
}

impl fmt::Display for TagStr {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_str_lossy())
	}
}

impl From<&str> for TagStr {
	fn from(value: &str) -> Self {
		Self(value.as_bytes().into())
	}
}

impl From<String> for TagStr {
	fn from(value: String) -> Self {
		Self(value.into_bytes().into_boxed_slice())
	}
}

impl From<&[u8]> for TagStr {
	fn from(value: &[u8]) -> Self {
		Self(value.into())
	}
}

impl From<Vec<u8>> for TagStr {
	fn from(value: Vec<u8>) -> Self {
		Self(value.into_boxed_slice())
	}
}

impl PartialEq<str> for TagStr {
	fn eq(&self, other: &str) -> bool {
		self.as_bytes() == other.as_bytes()
	}
}

impl PartialEq<&str> for TagStr {
	fn eq(&self, other: &&str) -> bool {
		self.as_bytes() == other.as_bytes()
	}
}

/// One node of an NBT tree.
///
/// Every tag owns its name and payload outright. Containers own their children,
/// so a tree never aliases itself and dropping the root releases everything.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
	/// Absent for list elements, present everywhere else.
	pub name: Option<TagStr>,
	/// Payload.
	pub value: Value,
}

/// Tag payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Signed 8-bit integer.
	Byte(i8),
	/// Signed 16-bit integer.
	Short(i16),
	/// Signed 32-bit integer.
	Int(i32),
	/// Signed 64-bit integer.
	Long(i64),
	/// IEEE-754 single.
	Float(f32),
	/// IEEE-754 double.
	Double(f64),
	/// Raw bytes.
	ByteArray(Vec<u8>),
	/// Byte string.
	String(TagStr),
	/// Sequence of unnamed tags expected to share one kind.
	List(TagList),
	/// Named tags in encounter order; duplicate names are allowed.
	Compound(Vec<Tag>),
}

/// List payload.
#[derive(Debug, Clone, PartialEq)]
pub struct TagList {
	/// Element kind as declared on the wire. Only consulted when `items` is empty.
	pub elem_kind: TagKind,
	/// Elements. Homogeneity is checked when the list is encoded.
	pub items: Vec<Tag>,
}

impl TagList {
	/// Build a list, taking the element kind from the first item.
	pub fn new(items: Vec<Tag>) -> Self {
		let elem_kind = items.first().map_or(TagKind::End, Tag::kind);
		Self { elem_kind, items }
	}

	/// Empty list declaring `elem_kind`.
	pub fn empty(elem_kind: TagKind) -> Self {
		Self {
			elem_kind,
			items: Vec::new(),
		}
	}

	/// Kind shared by the elements, or the first offending index.
	pub fn homogeneous_kind(&self) -> Result<TagKind, usize> {
		let Some(first) = self.items.first() else {
			return Ok(self.elem_kind);
		};
		let kind = first.kind();
		match self.items.iter().position(|item| item.kind() != kind) {
			Some(index) => Err(index),
			None => Ok(kind),
		}
	}
}

impl Value {
	/// Wire kind of this payload.
	pub fn kind(&self) -> TagKind {
		match self {
			Self::Byte(_) => TagKind::Byte,
			Self::Short(_) => TagKind::Short,
			Self::Int(_) => TagKind::Int,
			Self::Long(_) => TagKind::Long,
			Self::Float(_) => TagKind::Float,
			Self::Double(_) => TagKind::Double,
			Self::ByteArray(_) => TagKind::ByteArray,
			Self::String(_) => TagKind::String,
			Self::List(_) => TagKind::List,
			Self::Compound(_) => TagKind::Compound,
		}
	}
}

impl Tag {
	/// Named tag, as found at the root and inside compounds.
	pub fn named(name: impl Into<TagStr>, value: Value) -> Self {
		Self {
			name: Some(name.into()),
			value,
		}
	}

	/// Unnamed tag, as found inside lists.
	pub fn unnamed(value: Value) -> Self {
		Self { name: None, value }
	}

	/// Wire kind of the payload.
	pub fn kind(&self) -> TagKind {
		self.value.kind()
	}

	/// Name as text, empty when absent.
	pub fn name_str(&self) -> Cow<'_, str> {
		match &self.name {
			Some(name) => name.to_str_lossy(),
			None => Cow::Borrowed(""),
		}
	}

	/// Child tags of a list or compound; empty for scalars.
	pub fn children(&self) -> &[Tag] {
		match &self.value {
			Value::List(list) => &list.items,
			Value::Compound(items) => items,
			_ => &[],
		}
	}

	/// Mutable child storage of a list or compound.
	pub fn children_mut(&mut self) -> Option<&mut Vec<Tag>> {
		match &mut self.value {
			Value::List(list) => Some(&mut list.items),
			Value::Compound(items) => Some(items),
			_ => None,
		}
	}

	/// First compound member called `name`.
	pub fn get(&self, name: &str) -> Option<&Tag> {
		let Value::Compound(items) = &self.value else {
			return None;
		};
		items.iter().find(|item| item.name.as_ref().is_some_and(|item_name| *item_name == name))
	}

	/// Mutable access to the first compound member called `name`.
	pub fn get_mut(&mut self, name: &str) -> Option<&mut Tag> {
		let Value::Compound(items) = &mut self.value else {
			return None;
		};
		items.iter_mut().find(|item| item.name.as_ref().is_some_and(|item_name| *item_name == name))
	}

	/// Structural equality with Float/Double compared within [`FLOAT_EPSILON`].
	pub fn approx_eq(&self, other: &Tag) -> bool {
		if self.name != other.name {
			return false;
		}

		match (&self.value, &other.value) {
			(Value::Float(a), Value::Float(b)) => floats_are_close(f64::from(*a), f64::from(*b)),
			(Value::Double(a), Value::Double(b)) => floats_are_close(*a, *b),
			(Value::List(a), Value::List(b)) if a.items.is_empty() && b.items.is_empty() => a.elem_kind == b.elem_kind,
			(Value::List(a), Value::List(b)) => children_approx_eq(&a.items, &b.items),
			(Value::Compound(a), Value::Compound(b)) => children_approx_eq(a, b),
			(a, b) => a == b,
		}
	}
}

fn children_approx_eq(a: &[Tag], b: &[Tag]) -> bool {
	a.len() == b.len() && a.iter().zip(b).all(|(left, right)| left.approx_eq(right))
}

fn floats_are_close(a: f64, b: f64) -> bool {
	a == b || (a - b).abs() <= FLOAT_EPSILON
}
