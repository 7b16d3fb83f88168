//! # Graph Mutations
//!
//! High-level semantic operations on a block workspace.
//!
//! ## Design Principles
//!
//! 1. **Intent-preserving**: Each mutation represents one user gesture
//! 2. **Validated**: Structural constraints are checked before anything
//!    changes; a rejected mutation leaves the workspace untouched
//! 3. **Serializable**: The UI layer sends mutations as JSON
//! 4. **Minimal**: No redundant or overly generic operations
//!
//! ## Mutation Semantics
//!
//! ### Connect / Stack
//! - Fails on an occupied socket or next-link (no implicit bumping;
//!   the UI disconnects first)
//! - Fails if modes or tags are incompatible
//! - Fails if the edge would close a loop
//!
//! ### RemoveBlock
//! - Removes the block and its socket subtrees
//! - The chain stacked below is healed into the vacated position when
//!   it fits, otherwise it becomes a new top-level block
//!
//! ### SetItemCount
//! - Reconciles a container's numbered slots; out-of-range children
//!   are detached, never destroyed

use blocked_blocks::catalog::standard_registry;
use blocked_blocks::{FieldValue, GraphError, Registry, Workspace};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::arity;

/// Semantic mutations (intent-preserving operations)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Instantiate a registered kind; the outcome reports the new id
    CreateBlock {
        kind: String,
    },

    /// Remove a block, its socket subtrees, and heal the chain below
    RemoveBlock {
        block_id: String,
    },

    /// Plug a block into a socket
    Connect {
        parent_id: String,
        socket: String,
        child_id: String,
    },

    /// Empty a socket; the child becomes top-level
    Disconnect {
        parent_id: String,
        socket: String,
    },

    /// Stack a statement below another
    Stack {
        prev_id: String,
        next_id: String,
    },

    /// Break the next-link below a statement
    Unstack {
        prev_id: String,
    },

    /// Overwrite a field value (atomic replacement)
    SetField {
        block_id: String,
        field: String,
        value: FieldValue,
    },

    /// Adjust a dynamic container's slot count
    SetItemCount {
        block_id: String,
        items: i64,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Invalid item count: {0}")]
    InvalidArity(i64),

    #[error("Block {0} has a fixed shape")]
    FixedShape(String),

    #[error("{value} is not an option of field {field}")]
    InvalidChoice { field: String, value: String },

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),
}

/// Result of applying a mutation
#[derive(Debug, Clone, PartialEq)]
pub struct MutationOutcome {
    /// New document version
    pub version: u64,

    /// Id of the block a `CreateBlock` minted
    pub created: Option<String>,
}

/// Owns one document's registry, workspace, and edit version.
#[derive(Debug, Clone)]
pub struct Editor {
    registry: Registry,
    workspace: Workspace,
    version: u64,
}

impl Editor {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            workspace: Workspace::new(),
            version: 0,
        }
    }

    /// An editor over the built-in catalog.
    pub fn standard() -> Self {
        Self::new(standard_registry())
    }

    /// An editor whose block ids are seeded from the document path.
    pub fn for_document(registry: Registry, path: &str) -> Self {
        Self {
            registry,
            workspace: Workspace::for_document(path),
            version: 0,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn into_workspace(self) -> Workspace {
        self.workspace
    }

    /// Apply one mutation. The version advances only on success.
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationOutcome, MutationError> {
        tracing::debug!("Applying {:?} at version {}", mutation, self.version);
        let created = match mutation {
            Mutation::CreateBlock { kind } => {
                Some(self.workspace.create_block(&self.registry, &kind)?)
            }

            Mutation::RemoveBlock { block_id } => {
                self.workspace.remove_block(&block_id)?;
                None
            }

            Mutation::Connect {
                parent_id,
                socket,
                child_id,
            } => {
                self.workspace.connect(&parent_id, &socket, &child_id)?;
                None
            }

            Mutation::Disconnect { parent_id, socket } => {
                self.workspace.disconnect(&parent_id, &socket)?;
                None
            }

            Mutation::Stack { prev_id, next_id } => {
                self.workspace.stack(&prev_id, &next_id)?;
                None
            }

            Mutation::Unstack { prev_id } => {
                self.workspace.unstack(&prev_id)?;
                None
            }

            Mutation::SetField {
                block_id,
                field,
                value,
            } => {
                self.check_choice(&block_id, &field, &value)?;
                self.workspace.set_field(&block_id, &field, value)?;
                None
            }

            Mutation::SetItemCount { block_id, items } => {
                arity::set_item_count(&mut self.workspace, &block_id, items)?;
                None
            }
        };

        self.version += 1;
        Ok(MutationOutcome {
            version: self.version,
            created,
        })
    }

    /// Choice fields only accept their declared options. The workspace
    /// cannot check this on its own because the options live on the
    /// kind spec, not the instance.
    fn check_choice(
        &self,
        block_id: &str,
        field: &str,
        value: &FieldValue,
    ) -> Result<(), MutationError> {
        let choice = match value {
            FieldValue::Choice(c) => c,
            _ => return Ok(()),
        };
        let kind = &self.workspace.block(block_id)?.kind;
        let spec = self.registry.get(kind)?;
        if let Some(field_spec) = spec.field_spec(field) {
            if !field_spec.choices.is_empty() && !field_spec.choices.iter().any(|c| c == choice) {
                return Err(MutationError::InvalidChoice {
                    field: field.to_string(),
                    value: choice.clone(),
                });
            }
        }
        Ok(())
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::SetField {
            block_id: "ws-3".to_string(),
            field: "NAME".to_string(),
            value: FieldValue::Text("web".to_string()),
        };

        let json = serde_json::to_string(&mutation).unwrap();
        let deserialized: Mutation = serde_json::from_str(&json).unwrap();

        assert_eq!(mutation, deserialized);
    }

    #[test]
    fn test_item_count_mutation_round_trips_as_json() {
        let json = r#"{"SetItemCount":{"block_id":"ws-1","items":3}}"#;
        let mutation: Mutation = serde_json::from_str(json).unwrap();
        assert_eq!(
            mutation,
            Mutation::SetItemCount {
                block_id: "ws-1".to_string(),
                items: 3,
            }
        );
    }

    #[test]
    fn test_version_advances_only_on_success() {
        let mut editor = Editor::standard();

        let outcome = editor
            .apply(Mutation::CreateBlock {
                kind: "text".to_string(),
            })
            .unwrap();
        assert_eq!(outcome.version, 1);
        assert!(outcome.created.is_some());

        let err = editor.apply(Mutation::CreateBlock {
            kind: "mystery".to_string(),
        });
        assert!(err.is_err());
        assert_eq!(editor.version(), 1);
    }

    #[test]
    fn test_choice_field_rejects_unknown_option() {
        let mut editor = Editor::standard();
        let restart = editor
            .apply(Mutation::CreateBlock {
                kind: "compose_restart".to_string(),
            })
            .unwrap()
            .created
            .unwrap();

        let err = editor
            .apply(Mutation::SetField {
                block_id: restart.clone(),
                field: "POLICY".to_string(),
                value: FieldValue::Choice("sometimes".to_string()),
            })
            .unwrap_err();
        assert!(matches!(err, MutationError::InvalidChoice { .. }));

        editor
            .apply(Mutation::SetField {
                block_id: restart,
                field: "POLICY".to_string(),
                value: FieldValue::Choice("unless-stopped".to_string()),
            })
            .unwrap();
    }
}
