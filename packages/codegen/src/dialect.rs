//! Dialect rule tables.
//!
//! A dialect is an explicit per-kind map of emission rules plus the
//! formatting constants that differ per output format. Tables are
//! built once at startup and passed into [`crate::generate`]; nothing
//! is registered on a shared namespace.

use crate::generator::{EmitContext, Fragment, GenResult};
use std::collections::HashMap;

/// One kind's emission rule.
pub type EmitRule = fn(&mut EmitContext) -> GenResult<Fragment>;

/// A named set of emission rules producing one output format.
#[derive(Clone)]
pub struct Dialect {
    name: &'static str,
    indent: &'static str,
    empty_placeholder: &'static str,
    rules: HashMap<String, EmitRule>,
}

impl Dialect {
    pub fn new(name: &'static str, indent: &'static str, empty_placeholder: &'static str) -> Self {
        Self {
            name,
            indent,
            empty_placeholder,
            rules: HashMap::new(),
        }
    }

    /// Register the rule for a kind. Last registration wins.
    pub fn rule(mut self, kind: &str, rule: EmitRule) -> Self {
        self.rules.insert(kind.to_string(), rule);
        self
    }

    pub fn name(&self) -> &str {
        self.name
    }

    /// The per-level indent unit.
    pub fn indent(&self) -> &str {
        self.indent
    }

    /// The exact text an empty workspace generates.
    pub fn empty_placeholder(&self) -> &str {
        self.empty_placeholder
    }

    pub fn rule_for(&self, kind: &str) -> Option<EmitRule> {
        self.rules.get(kind).copied()
    }

    pub fn has_rule(&self, kind: &str) -> bool {
        self.rules.contains_key(kind)
    }

    /// Structured-data output: YAML documents plus the Compose kinds.
    pub fn yaml() -> Self {
        crate::yaml::dialect()
    }

    /// Tag markup output.
    pub fn xml() -> Self {
        crate::xml::dialect()
    }

    /// Dockerfile instruction lines.
    pub fn dockerfile() -> Self {
        crate::dockerfile::dialect()
    }

    /// Pick the dialect for a document's file name: compose files and
    /// generic YAML render as yaml, Dockerfile names as dockerfile
    /// lines, markup extensions as xml. Case-insensitive.
    pub fn for_path(path: &str) -> Self {
        let lower = path.to_lowercase();
        if lower.contains("docker-compose")
            || lower.ends_with("compose.yml")
            || lower.ends_with("compose.yaml")
        {
            return Self::yaml();
        }
        if lower.contains("dockerfile") {
            return Self::dockerfile();
        }
        if lower.ends_with(".xml") || lower.ends_with(".html") || lower.ends_with(".svg") {
            return Self::xml();
        }
        Self::yaml()
    }
}
