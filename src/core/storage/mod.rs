//! core/storage/mod.rs
//!
//! Scoped-storage write-through. Leaves first:
//! - [`tree`]: the document-provider seam (+ a local-directory provider)
//! - [`resolver`]: absolute path -> document handle, by walking the tree
//! - [`gate`]: standing grant or not; ask for one
//! - [`staging`]: temp file, codec, copy into the document channel
//! - [`engine`]: decides which of the above a write needs

pub mod engine;
pub mod gate;
pub mod host;
pub mod pending;
pub mod resolver;
pub mod staging;
pub mod tree;

pub use engine::WriteThroughEngine;
pub use gate::{GrantResponse, GrantState, PermissionGate};
pub use host::Host;
pub use pending::PendingWrite;
pub use resolver::{PathSegments, resolve};
pub use staging::TempStagingWriter;
pub use tree::{DocumentTree, LocalDocumentTree};
