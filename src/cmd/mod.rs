/// Clone, re-encode, and reparse self-check.
pub mod check;
/// Re-encode with a different compression layer.
pub mod convert;
/// Indented text dump.
pub mod dump;
/// Name lookup command.
pub mod find;
/// File-level summary command.
pub mod info;
/// JSON export command.
pub mod json;
pub(crate) mod util;
