pub mod editing;
pub mod error;
pub mod fixer;
pub mod markup;
pub mod model;
pub mod notation;
pub mod position;
pub mod projection;

// Re-export key types for easier usage
pub use editing::{EngineOptions, ListDocument, Patch, PatchStrategy, TreeChange};
pub use error::{EditError, PositionError};
pub use fixer::Correction;
pub use markup::{MarkupNode, from_markup, parse_html, to_html, to_markup};
pub use model::{AttributeChanges, Edit, ListAttributes, ListStyle, ListType, Record, RecordKind};
pub use notation::OutlineFormat;
pub use position::{FlatPosition, NestedPosition};
pub use projection::{ListTree, format_outline};
