//! Public library API for reading, writing, and reshaping Named Binary Tag trees.

/// NBT wire codec, tree model, traversal algorithms, and compression helpers.
pub mod nbt;
