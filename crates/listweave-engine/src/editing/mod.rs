//! # Change Reactor
//!
//! Keeps a record sequence and its nested projection in step across edits.
//!
//! ## Edit Loop
//!
//! 1. **Batch application**: primitive [`Edit`](crate::model::Edit)s are applied
//!    to the records in order; each one yields its inverse and an index footprint
//! 2. **Dirty tracking**: footprints are folded into one hull in current indices
//! 3. **Post-fix**: the hull grows to whole lists, which the fixer repairs
//! 4. **Re-projection**: only root nodes of the dirty region are rebuilt; nodes
//!    after it are shifted by the batch's length delta
//! 5. **Notification**: subscribers receive the root-level [`TreeChange`]
//!
//! Removing an item that anchored a deeper run needs no special handling: the
//! fixer pulls the orphaned run up and the region rebuild hangs it on the
//! nearest remaining shallower item.
//!
//! ## Modules
//!
//! - **`document`**: `ListDocument`, the batch pipeline and position queries
//! - **`dirty`**: dirty hull tracking and region growth
//! - **`options`**: `EngineOptions` and `PatchStrategy`
//! - **`patch`**: `Patch` and `TreeChange`

mod dirty;
pub mod document;
pub mod options;
pub mod patch;


pub use document::ListDocument;
pub use options::{EngineOptions, PatchStrategy};
pub use patch::{Patch, TreeChange};
