//! Built-in block kinds.
//!
//! Grouped by document family: generic structured data (dictionaries,
//! lists, scalars), tag markup, Docker Compose, and Dockerfile
//! instructions. Each module installs its kinds into a [`Registry`];
//! [`standard_registry`] installs the whole set.

use crate::registry::Registry;

pub mod compose;
pub mod dockerfile;
pub mod markup;
pub mod structure;

/// A registry with every built-in kind installed.
pub fn standard_registry() -> Registry {
    let mut registry = Registry::new();
    structure::install(&mut registry);
    markup::install(&mut registry);
    compose::install(&mut registry);
    dockerfile::install(&mut registry);
    registry
}
