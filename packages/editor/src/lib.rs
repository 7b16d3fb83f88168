//! # Blocked Editor
//!
//! Mutation surface for block-graph documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ blocks: kinds + workspace graph             │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Editor + mutations                  │
//! │  - Apply serialized mutations with          │
//! │    validation (nothing changes on error)    │
//! │  - Dynamic container arity reconciliation   │
//! │  - Monotonic document version               │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ codegen: workspace graph → text             │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The graph is source of truth**: generated text is a derived view
//! 2. **Validated mutations**: a rejected mutation leaves the graph untouched
//! 3. **Structural operations**: block-level edits, never text-level
//! 4. **Detach, don't destroy**: shrinking a container frees its children
//!
//! ## Usage
//!
//! ```rust,ignore
//! use blocked_editor::{Editor, FieldValue, Mutation};
//!
//! let mut editor = Editor::standard();
//!
//! let outcome = editor.apply(Mutation::CreateBlock {
//!     kind: "compose_service".to_string(),
//! })?;
//! let service = outcome.created.unwrap();
//!
//! editor.apply(Mutation::SetField {
//!     block_id: service.clone(),
//!     field: "NAME".to_string(),
//!     value: FieldValue::Text("web".to_string()),
//! })?;
//! ```

mod arity;
mod mutations;

pub use arity::{set_item_count, MAX_ITEMS};
pub use mutations::{Editor, Mutation, MutationError, MutationOutcome};

// Re-export the model types mutations carry for convenience
pub use blocked_blocks::{FieldValue, GraphError, Registry, Workspace};
