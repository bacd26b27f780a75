//! # Record Model
//!
//! The flat, ordered record sequence a host document keeps for its blocks.
//! Each record is either a list item (type + indent + optional style) or some
//! other block. Nesting is never stored: it is implied by indents and derived
//! by the projection.
//!
//! ## Modules
//!
//! - **`record`**: `Record`, `RecordKind`, `ListAttributes`, `ListType`, `ListStyle`
//! - **`edit`**: the closed set of primitive `Edit`s, their validation and inverses

pub mod edit;
pub mod record;

pub use edit::{AttributeChanges, Edit};
pub use record::{ListAttributes, ListStyle, ListType, Record, RecordKind};
