//! Block-kind declarations and the kind registry.

use crate::block::{FieldValue, KindShape, SocketMode};
use crate::error::GraphError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A socket declared by a kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocketSpec {
    pub name: String,
    pub mode: SocketMode,
    pub accepts: Option<String>,
}

/// A field declared by a kind, with its default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub default: FieldValue,
    /// Allowed options for choice fields; empty for free-form fields.
    pub choices: Vec<String>,
}

/// Dynamic-arity declaration: containers mint numbered value sockets
/// (`PAIR0`, `PAIR1`, ...) at runtime instead of declaring them here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicSpec {
    pub prefix: String,
    pub accepts: Option<String>,
}

/// Declaration of one block kind. Built with the chained constructors
/// below; see the catalog modules for usage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KindSpec {
    pub name: String,
    pub shape: KindShape,
    pub sockets: Vec<SocketSpec>,
    pub fields: Vec<FieldSpec>,
    pub dynamic: Option<DynamicSpec>,
}

impl KindSpec {
    /// A value-producing kind with the given output tag.
    pub fn value(name: &str, tag: &str) -> Self {
        Self {
            name: name.to_string(),
            shape: KindShape::Value {
                tag: Some(tag.to_string()),
            },
            sockets: Vec::new(),
            fields: Vec::new(),
            dynamic: None,
        }
    }

    /// A statement kind; `tag` types its stack connectors.
    pub fn statement(name: &str, tag: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            shape: KindShape::Statement {
                tag: tag.map(str::to_string),
            },
            sockets: Vec::new(),
            fields: Vec::new(),
            dynamic: None,
        }
    }

    pub fn value_socket(mut self, name: &str, accepts: Option<&str>) -> Self {
        self.sockets.push(SocketSpec {
            name: name.to_string(),
            mode: SocketMode::Value,
            accepts: accepts.map(str::to_string),
        });
        self
    }

    pub fn statement_socket(mut self, name: &str, accepts: Option<&str>) -> Self {
        self.sockets.push(SocketSpec {
            name: name.to_string(),
            mode: SocketMode::Statement,
            accepts: accepts.map(str::to_string),
        });
        self
    }

    pub fn text_field(mut self, name: &str, default: &str) -> Self {
        self.fields.push(FieldSpec {
            name: name.to_string(),
            default: FieldValue::Text(default.to_string()),
            choices: Vec::new(),
        });
        self
    }

    pub fn int_field(mut self, name: &str, default: i64) -> Self {
        self.fields.push(FieldSpec {
            name: name.to_string(),
            default: FieldValue::Int(default),
            choices: Vec::new(),
        });
        self
    }

    /// A dropdown field; the first option is the default.
    pub fn choice_field(mut self, name: &str, options: &[&str]) -> Self {
        let default = options.first().map(|o| o.to_string()).unwrap_or_default();
        self.fields.push(FieldSpec {
            name: name.to_string(),
            default: FieldValue::Choice(default),
            choices: options.iter().map(|o| o.to_string()).collect(),
        });
        self
    }

    pub fn dynamic_sockets(mut self, prefix: &str, accepts: Option<&str>) -> Self {
        self.dynamic = Some(DynamicSpec {
            prefix: prefix.to_string(),
            accepts: accepts.map(str::to_string),
        });
        self
    }

    pub fn field_spec(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// The catalogue of known block kinds.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    kinds: HashMap<String, KindSpec>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a kind. Redefining an existing name silently replaces
    /// the previous definition; the last definition wins.
    pub fn define(&mut self, spec: KindSpec) {
        self.kinds.insert(spec.name.clone(), spec);
    }

    pub fn get(&self, kind: &str) -> Result<&KindSpec, GraphError> {
        self.kinds
            .get(kind)
            .ok_or_else(|| GraphError::UnknownKind(kind.to_string()))
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.kinds.contains_key(kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &KindSpec> {
        self.kinds.values()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_kind_lookup_fails() {
        let registry = Registry::new();
        let err = registry.get("no_such_kind").unwrap_err();
        assert_eq!(err, GraphError::UnknownKind("no_such_kind".to_string()));
    }

    #[test]
    fn test_redefinition_replaces() {
        let mut registry = Registry::new();
        registry.define(KindSpec::value("text", "String").text_field("TEXT", ""));
        registry.define(KindSpec::value("text", "String").text_field("TEXT", "hello"));

        let spec = registry.get("text").unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(
            spec.field_spec("TEXT").unwrap().default,
            FieldValue::Text("hello".to_string())
        );
    }

    #[test]
    fn test_choice_field_defaults_to_first_option() {
        let spec = KindSpec::statement("compose_restart", None)
            .choice_field("POLICY", &["always", "unless-stopped", "on-failure", "no"]);
        assert_eq!(
            spec.field_spec("POLICY").unwrap().default,
            FieldValue::Choice("always".to_string())
        );
    }

    #[test]
    fn test_kind_spec_serialization() {
        let spec = KindSpec::value("key_value_pair", "KeyValuePair")
            .value_socket("KEY", Some("String"))
            .value_socket("VALUE", None);

        let json = serde_json::to_string(&spec).unwrap();
        let back: KindSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(spec, back);
    }
}
