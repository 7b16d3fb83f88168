//! Failure modes of registry lookups and graph operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Unknown block kind: {0}")]
    UnknownKind(String),

    #[error("Block not found: {0}")]
    BlockNotFound(String),

    #[error("Block {block} has no socket named {socket}")]
    SocketNotFound { block: String, socket: String },

    #[error("Block {block} has no field named {field}")]
    FieldNotFound { block: String, field: String },

    #[error("Field {field} of block {block} holds a different value type")]
    FieldTypeMismatch { block: String, field: String },

    #[error("Socket {socket} of block {block} is already occupied")]
    SocketOccupied { block: String, socket: String },

    #[error("Block {0} already has a block stacked below it")]
    NextOccupied(String),

    #[error("Block {0} is already connected")]
    AlreadyConnected(String),

    #[error("Block {child} does not fit socket {socket} of block {block}")]
    IncompatibleConnection {
        block: String,
        socket: String,
        child: String,
    },

    #[error("Blocks {prev} and {next} cannot stack")]
    CannotStack { prev: String, next: String },

    #[error("Would create cycle")]
    CycleDetected,
}
