//! URL slugs for categories
//!
//! - [`normalize`] turns a display name into a slug (Turkish casing rules)
//! - [`is_valid`] checks the stored slug format
//! - [`resolve_unique`] suffixes `-2`, `-3`, ... until the slug is free

mod normalize;
mod unique;

pub use normalize::{is_valid, normalize};
pub use unique::resolve_unique;
