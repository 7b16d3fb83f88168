//! Block-graph-to-text code generation.
//!
//! Walks a [`blocked_blocks::Workspace`] and deterministically emits
//! indentation-correct text: YAML mappings and sequences, Docker
//! Compose documents, tag markup, or Dockerfile instruction lines.
//! Each output format is a [`Dialect`] rule table passed explicitly
//! into [`generate`]; the traversal, chain joining, and recursion
//! guards are shared by all of them.

pub mod dialect;
pub mod dockerfile;
pub mod generator;
pub mod xml;
pub mod yaml;

pub use dialect::{Dialect, EmitRule};
pub use generator::{
    generate, generate_with_options, indent_lines, EmitContext, Fragment, GenResult,
    GenerateError, GeneratorOptions, Precedence,
};
