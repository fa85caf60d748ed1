//! Structural recursions over a tree: copy, traverse, prune, search, count.
//!
//! Recursion depth follows tree depth; trees produced by the decoder are bounded
//! by [`DecodeOptions::max_depth`](crate::nbt::DecodeOptions::max_depth).

use crate::nbt::Result;
use crate::nbt::buffer::try_copy;
use crate::nbt::value::{Tag, TagList, TagStr, Value};

/// Visitor decision for [`map`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
	/// Descend into this node's children, then continue with its siblings.
	Continue,
	/// Abort the whole traversal.
	Stop,
	/// Detach this node from its parent and skip its subtree.
	Remove,
}

/// Deep-copy a tree, reporting allocation failure instead of aborting.
///
/// On failure every partial copy is dropped before returning.
pub fn try_clone(tree: &Tag) -> Result<Tag> {
	Ok(Tag {
		name: copy_name(tree.name.as_ref())?,
		value: copy_value(&tree.value, &mut |child| try_clone(child).map(Some))?,
	})
}

/// Pre-order read-only traversal. Returns `false` if `visitor` stopped it.
pub fn visit<F>(tree: &Tag, mut visitor: F) -> bool
where
	F: FnMut(&Tag) -> bool,
{
	visit_impl(tree, &mut visitor)
}

fn visit_impl<F>(tree: &Tag, visitor: &mut F) -> bool
where
	F: FnMut(&Tag) -> bool,
{
	if !visitor(tree) {
		return false;
	}
	tree.children().iter().all(|child| visit_impl(child, visitor))
}

/// Pre-order mutable traversal. Returns `false` if `visitor` stopped it.
///
/// The visitor never frees nodes itself; returning [`Visit::Remove`] asks the
/// traversal to detach the node from its parent. The root has no parent, so
/// `Remove` there only skips its descendants.
pub fn map<F>(tree: &mut Tag, mut visitor: F) -> bool
where
	F: FnMut(&mut Tag) -> Visit,
{
	match visitor(tree) {
		Visit::Stop => false,
		Visit::Remove => true,
		Visit::Continue => map_children(tree, &mut visitor),
	}
}

fn map_children<F>(tree: &mut Tag, visitor: &mut F) -> bool
where
	F: FnMut(&mut Tag) -> Visit,
{
	let Some(children) = tree.children_mut() else {
		return true;
	};

	let mut index = 0;
	while index < children.len() {
		match visitor(&mut children[index]) {
			Visit::Stop => return false,
			Visit::Remove => {
				children.remove(index);
				continue;
			}
			Visit::Continue => {
				if !map_children(&mut children[index], visitor) {
					return false;
				}
			}
		}
		index += 1;
	}
	true
}

/// Copy the nodes `predicate` accepts.
///
/// A rejected node drops its whole subtree without consulting the predicate on
/// descendants. Children of accepted containers are each filtered in turn.
/// Returns `Ok(None)` when the root itself is rejected; allocation failure is
/// reported as an error instead.
pub fn filter<P>(tree: &Tag, mut predicate: P) -> Result<Option<Tag>>
where
	P: FnMut(&Tag) -> bool,
{
	filter_impl(tree, &mut predicate)
}

fn filter_impl<P>(tree: &Tag, predicate: &mut P) -> Result<Option<Tag>>
where
	P: FnMut(&Tag) -> bool,
{
	if !predicate(tree) {
		return Ok(None);
	}

	Ok(Some(Tag {
		name: copy_name(tree.name.as_ref())?,
		value: copy_value(&tree.value, &mut |child| filter_impl(child, predicate))?,
	}))
}

/// In-place variant of [`filter`]: rejected subtrees are dropped, and a
/// rejected root drops the whole tree.
pub fn filter_inplace<P>(mut tree: Tag, mut predicate: P) -> Option<Tag>
where
	P: FnMut(&Tag) -> bool,
{
	if !predicate(&tree) {
		return None;
	}
	prune(&mut tree, &mut predicate);
	Some(tree)
}

fn prune<P>(tree: &mut Tag, predicate: &mut P)
where
	P: FnMut(&Tag) -> bool,
{
	if let Some(children) = tree.children_mut() {
		children.retain_mut(|child| {
			if !predicate(&*child) {
				return false;
			}
			prune(child, predicate);
			true
		});
	}
}

/// First node in pre-order that satisfies `predicate`.
pub fn find<P>(tree: &Tag, mut predicate: P) -> Option<&Tag>
where
	P: FnMut(&Tag) -> bool,
{
	find_impl(tree, &mut predicate)
}

fn find_impl<'t, P>(tree: &'t Tag, predicate: &mut P) -> Option<&'t Tag>
where
	P: FnMut(&Tag) -> bool,
{
	if predicate(tree) {
		return Some(tree);
	}
	tree.children().iter().find_map(|child| find_impl(child, predicate))
}

/// Mutable counterpart of [`find`].
pub fn find_mut<P>(tree: &mut Tag, mut predicate: P) -> Option<&mut Tag>
where
	P: FnMut(&Tag) -> bool,
{
	find_mut_impl(tree, &mut predicate)
}

fn find_mut_impl<'t, P>(tree: &'t mut Tag, predicate: &mut P) -> Option<&'t mut Tag>
where
	P: FnMut(&Tag) -> bool,
{
	if predicate(&*tree) {
		return Some(tree);
	}
	tree.children_mut()?.iter_mut().find_map(|child| find_mut_impl(child, predicate))
}

/// First node in pre-order whose name is exactly `name`.
pub fn find_by_name<'t>(tree: &'t Tag, name: &str) -> Option<&'t Tag> {
	find(tree, |node| node.name.as_ref().is_some_and(|node_name| *node_name == name))
}

/// Number of nodes, counting every container as one node plus its descendants.
pub fn size(tree: &Tag) -> usize {
	1 + tree.children().iter().map(size).sum::<usize>()
}

fn copy_name(name: Option<&TagStr>) -> Result<Option<TagStr>> {
	name.map(|name| try_copy(name.as_bytes()).map(TagStr::from)).transpose()
}

/// Copy a payload, routing each child through `child` and keeping the `Some`s.
fn copy_value<F>(value: &Value, child: &mut F) -> Result<Value>
where
	F: FnMut(&Tag) -> Result<Option<Tag>>,
{
	Ok(match value {
		Value::ByteArray(bytes) => Value::ByteArray(try_copy(bytes)?),
		Value::String(text) => Value::String(TagStr::from(try_copy(text.as_bytes())?)),
		Value::List(list) => Value::List(TagList {
			elem_kind: list.elem_kind,
			items: copy_children(&list.items, child)?,
		}),
		Value::Compound(items) => Value::Compound(copy_children(items, child)?),
		Value::Byte(v) => Value::Byte(*v),
		Value::Short(v) => Value::Short(*v),
		Value::Int(v) => Value::Int(*v),
		Value::Long(v) => Value::Long(*v),
		Value::Float(v) => Value::Float(*v),
		Value::Double(v) => Value::Double(*v),
	})
}

fn copy_children<F>(items: &[Tag], child: &mut F) -> Result<Vec<Tag>>
where
	F: FnMut(&Tag) -> Result<Option<Tag>>,
{
	let mut out = Vec::new();
	out.try_reserve_exact(items.len())?;
	for item in items {
		if let Some(copy) = child(item)? {
			out.push(copy);
		}
	}
	Ok(out)
}

#[cfg(test)]
mod tests;
