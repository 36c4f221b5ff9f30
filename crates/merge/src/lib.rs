//! Merge-field resolution.
//!
//! Placeholders follow a fixed grammar: `{{`, one or more characters other
//! than `{`, `}` and newline, then `}}`. The whole token, delimiters
//! included, is the lookup key. Resolution is a single left-to-right pass, so
//! substituted values are never scanned again.

mod error;
mod resolve;
mod scanner;

pub use error::MergeError;
pub use resolve::{MergeValues, find_placeholders, is_placeholder, resolve_merge_fields, try_resolve_merge_fields};
pub use scanner::{Scanner, Token};

pub use folio_types::{MergeField, MergeFieldValues};
