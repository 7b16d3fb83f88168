//! Block instances and their connection points.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Scalar payload of a block field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Text(String),
    Int(i64),
    /// One option out of the fixed set declared by the kind.
    Choice(String),
}

impl FieldValue {
    /// The literal token this field contributes to generated text.
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Int(n) => n.to_string(),
            FieldValue::Choice(c) => c.clone(),
        }
    }
}

/// Whether a socket accepts a value plug or a statement stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SocketMode {
    Value,
    Statement,
}

/// Connection shape of a block kind.
///
/// Value blocks plug into value sockets and never chain; statement
/// blocks stack vertically via next-links and plug into statement
/// sockets. `tag: None` means untyped on that end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KindShape {
    Value { tag: Option<String> },
    Statement { tag: Option<String> },
}

impl KindShape {
    pub fn is_value(&self) -> bool {
        matches!(self, KindShape::Value { .. })
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            KindShape::Value { tag } | KindShape::Statement { tag } => tag.as_deref(),
        }
    }
}

/// Two connection ends are compatible when either side is untyped or
/// the tags agree.
pub fn compatible(accepts: Option<&str>, tag: Option<&str>) -> bool {
    match (accepts, tag) {
        (Some(a), Some(t)) => a == t,
        _ => true,
    }
}

/// A named connection point holding at most one child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Socket {
    pub name: String,
    pub mode: SocketMode,
    pub accepts: Option<String>,
    pub child: Option<String>,
}

/// Mutable arity state for dictionary/list style containers.
///
/// Sockets minted from this state are named `<prefix>0 ..
/// <prefix>(item_count - 1)`, contiguous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicShape {
    pub prefix: String,
    pub accepts: Option<String>,
    pub item_count: usize,
}

/// One node in the block graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    pub kind: String,
    pub shape: KindShape,
    pub fields: HashMap<String, FieldValue>,
    /// Ordered; socket order is declaration order plus dynamic slots.
    pub sockets: Vec<Socket>,
    /// Statement stacked directly below this one.
    pub next: Option<String>,
    /// Socket owner or stack predecessor. `None` marks a top-level block.
    pub parent: Option<String>,
    pub dynamic: Option<DynamicShape>,
}

impl Block {
    pub fn socket(&self, name: &str) -> Option<&Socket> {
        self.sockets.iter().find(|s| s.name == name)
    }

    pub fn socket_mut(&mut self, name: &str) -> Option<&mut Socket> {
        self.sockets.iter_mut().find(|s| s.name == name)
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }

    /// Current slot count of a dynamic container; zero for fixed shapes.
    pub fn item_count(&self) -> usize {
        self.dynamic.as_ref().map(|d| d.item_count).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compatibility_wildcards() {
        assert!(compatible(None, None));
        assert!(compatible(None, Some("Service")));
        assert!(compatible(Some("Service"), None));
        assert!(compatible(Some("Service"), Some("Service")));
        assert!(!compatible(Some("Service"), Some("Network")));
    }

    #[test]
    fn test_field_value_to_text() {
        assert_eq!(FieldValue::Text("nginx:latest".into()).to_text(), "nginx:latest");
        assert_eq!(FieldValue::Int(-3).to_text(), "-3");
        assert_eq!(FieldValue::Choice("always".into()).to_text(), "always");
    }
}
