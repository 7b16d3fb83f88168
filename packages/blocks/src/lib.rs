//! Block graph data model: kinds, instances, and the workspace graph.
//!
//! A document is edited as a graph of block instances. Each instance is
//! stamped out from a [`KindSpec`] registered in a [`Registry`] and lives
//! in a [`Workspace`], which owns creation order and the validated
//! structural operations (connect, disconnect, stack, remove). Code
//! generation consumes this graph read-only.

pub mod block;
pub mod catalog;
pub mod error;
pub mod id;
pub mod registry;
pub mod workspace;

pub use block::{compatible, Block, DynamicShape, FieldValue, KindShape, Socket, SocketMode};
pub use error::GraphError;
pub use id::{document_seed, IdGenerator};
pub use registry::{DynamicSpec, FieldSpec, KindSpec, Registry, SocketSpec};
pub use workspace::Workspace;
