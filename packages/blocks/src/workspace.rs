//! Workspace graph storage and validated structural operations.
//!
//! The workspace owns every block instance of one open document and is
//! the only place graph edges change. Each operation validates before
//! mutating, so a failed call leaves the graph untouched. Higher layers
//! (the mutation surface, code generation) treat blocks as open data
//! but route all structural changes through here to keep the
//! one-parent / at-most-one-child-per-socket invariants intact.

use crate::block::{compatible, Block, DynamicShape, FieldValue, Socket, SocketMode};
use crate::error::GraphError;
use crate::id::IdGenerator;
use crate::registry::Registry;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
pub struct Workspace {
    blocks: HashMap<String, Block>,
    /// Creation order; drives top-level emission order.
    order: Vec<String>,
    ids: IdGenerator,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            blocks: HashMap::new(),
            order: Vec::new(),
            ids: IdGenerator::from_seed("ws".to_string()),
        }
    }

    /// A workspace whose block ids are seeded from the document path,
    /// so reopening the same file mints the same ids.
    pub fn for_document(path: &str) -> Self {
        Self {
            blocks: HashMap::new(),
            order: Vec::new(),
            ids: IdGenerator::new(path),
        }
    }

    /// Instantiate a registered kind: sockets and default field values
    /// from its kind declaration, plus the first slot for dynamic
    /// containers.
    pub fn create_block(&mut self, registry: &Registry, kind: &str) -> Result<String, GraphError> {
        let spec = registry.get(kind)?;
        let id = self.ids.new_id();

        let mut sockets: Vec<Socket> = spec
            .sockets
            .iter()
            .map(|s| Socket {
                name: s.name.clone(),
                mode: s.mode,
                accepts: s.accepts.clone(),
                child: None,
            })
            .collect();

        let dynamic = spec.dynamic.as_ref().map(|d| DynamicShape {
            prefix: d.prefix.clone(),
            accepts: d.accepts.clone(),
            item_count: 1,
        });
        if let Some(shape) = &dynamic {
            sockets.push(Socket {
                name: format!("{}0", shape.prefix),
                mode: SocketMode::Value,
                accepts: shape.accepts.clone(),
                child: None,
            });
        }

        let block = Block {
            id: id.clone(),
            kind: spec.name.clone(),
            shape: spec.shape.clone(),
            fields: spec
                .fields
                .iter()
                .map(|f| (f.name.clone(), f.default.clone()))
                .collect(),
            sockets,
            next: None,
            parent: None,
            dynamic,
        };

        self.blocks.insert(id.clone(), block);
        self.order.push(id.clone());
        Ok(id)
    }

    pub fn get(&self, id: &str) -> Option<&Block> {
        self.blocks.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Block> {
        self.blocks.get_mut(id)
    }

    pub fn block(&self, id: &str) -> Result<&Block, GraphError> {
        self.blocks
            .get(id)
            .ok_or_else(|| GraphError::BlockNotFound(id.to_string()))
    }

    pub fn block_mut(&mut self, id: &str) -> Result<&mut Block, GraphError> {
        self.blocks
            .get_mut(id)
            .ok_or_else(|| GraphError::BlockNotFound(id.to_string()))
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Blocks with nothing plugged or stacked above them, in creation
    /// order.
    pub fn top_blocks(&self) -> Vec<&Block> {
        self.order
            .iter()
            .filter_map(|id| self.blocks.get(id))
            .filter(|b| b.is_top_level())
            .collect()
    }

    /// All blocks in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.order.iter().filter_map(|id| self.blocks.get(id))
    }

    /// Plug `child` into a socket of `parent`. The socket must be free,
    /// the child unattached, modes and tags compatible, and the
    /// connection must not close a loop.
    pub fn connect(&mut self, parent_id: &str, socket: &str, child_id: &str) -> Result<(), GraphError> {
        let child = self.block(child_id)?;
        if child.parent.is_some() {
            return Err(GraphError::AlreadyConnected(child_id.to_string()));
        }
        let child_is_value = child.shape.is_value();
        let child_tag = child.shape.tag().map(str::to_string);

        let parent = self.block(parent_id)?;
        let sock = parent
            .socket(socket)
            .ok_or_else(|| GraphError::SocketNotFound {
                block: parent_id.to_string(),
                socket: socket.to_string(),
            })?;
        if sock.child.is_some() {
            return Err(GraphError::SocketOccupied {
                block: parent_id.to_string(),
                socket: socket.to_string(),
            });
        }

        let mode_ok = match sock.mode {
            SocketMode::Value => child_is_value,
            SocketMode::Statement => !child_is_value,
        };
        if !mode_ok || !compatible(sock.accepts.as_deref(), child_tag.as_deref()) {
            return Err(GraphError::IncompatibleConnection {
                block: parent_id.to_string(),
                socket: socket.to_string(),
                child: child_id.to_string(),
            });
        }

        if self.is_above(child_id, parent_id) {
            return Err(GraphError::CycleDetected);
        }

        if let Some(s) = self.blocks.get_mut(parent_id).and_then(|b| b.socket_mut(socket)) {
            s.child = Some(child_id.to_string());
        }
        if let Some(c) = self.blocks.get_mut(child_id) {
            c.parent = Some(parent_id.to_string());
        }
        Ok(())
    }

    /// Empty a socket; the detached child becomes top-level.
    pub fn disconnect(&mut self, parent_id: &str, socket: &str) -> Result<Option<String>, GraphError> {
        let parent = self.block(parent_id)?;
        let child_id = parent
            .socket(socket)
            .ok_or_else(|| GraphError::SocketNotFound {
                block: parent_id.to_string(),
                socket: socket.to_string(),
            })?
            .child
            .clone();

        if let Some(cid) = &child_id {
            if let Some(s) = self.blocks.get_mut(parent_id).and_then(|b| b.socket_mut(socket)) {
                s.child = None;
            }
            if let Some(c) = self.blocks.get_mut(cid) {
                c.parent = None;
            }
        }
        Ok(child_id)
    }

    /// Stack `next` directly below `prev`. Both must be statement
    /// kinds with compatible stack tags.
    pub fn stack(&mut self, prev_id: &str, next_id: &str) -> Result<(), GraphError> {
        let next = self.block(next_id)?;
        if next.parent.is_some() {
            return Err(GraphError::AlreadyConnected(next_id.to_string()));
        }
        let next_is_value = next.shape.is_value();
        let next_tag = next.shape.tag().map(str::to_string);

        let prev = self.block(prev_id)?;
        if prev.next.is_some() {
            return Err(GraphError::NextOccupied(prev_id.to_string()));
        }
        if prev.shape.is_value()
            || next_is_value
            || !compatible(prev.shape.tag(), next_tag.as_deref())
        {
            return Err(GraphError::CannotStack {
                prev: prev_id.to_string(),
                next: next_id.to_string(),
            });
        }

        if self.is_above(next_id, prev_id) {
            return Err(GraphError::CycleDetected);
        }

        if let Some(p) = self.blocks.get_mut(prev_id) {
            p.next = Some(next_id.to_string());
        }
        if let Some(n) = self.blocks.get_mut(next_id) {
            n.parent = Some(prev_id.to_string());
        }
        Ok(())
    }

    /// Break the next-link below `prev`; the detached chain becomes
    /// top-level.
    pub fn unstack(&mut self, prev_id: &str) -> Result<Option<String>, GraphError> {
        let next_id = self.block(prev_id)?.next.clone();
        if let Some(nid) = &next_id {
            if let Some(p) = self.blocks.get_mut(prev_id) {
                p.next = None;
            }
            if let Some(n) = self.blocks.get_mut(nid) {
                n.parent = None;
            }
        }
        Ok(next_id)
    }

    /// Overwrite a field. The new value must match the declared field
    /// type; choice membership is checked by the mutation layer, which
    /// holds the registry.
    pub fn set_field(&mut self, id: &str, field: &str, value: FieldValue) -> Result<(), GraphError> {
        let block = self
            .blocks
            .get_mut(id)
            .ok_or_else(|| GraphError::BlockNotFound(id.to_string()))?;
        let slot = block
            .fields
            .get_mut(field)
            .ok_or_else(|| GraphError::FieldNotFound {
                block: id.to_string(),
                field: field.to_string(),
            })?;
        if std::mem::discriminant(slot) != std::mem::discriminant(&value) {
            return Err(GraphError::FieldTypeMismatch {
                block: id.to_string(),
                field: field.to_string(),
            });
        }
        *slot = value;
        Ok(())
    }

    /// Delete a block and every block inside its sockets. The chain
    /// stacked below it is pulled up into the vacated position when the
    /// connection fits, otherwise it is left detached as a new
    /// top-level block.
    pub fn remove_block(&mut self, id: &str) -> Result<(), GraphError> {
        let (parent_id, next_id) = match self.blocks.get(id) {
            Some(b) => (b.parent.clone(), b.next.clone()),
            None => return Err(GraphError::BlockNotFound(id.to_string())),
        };

        // Detach the chain below before the subtree walk.
        if let Some(nid) = &next_id {
            if let Some(n) = self.blocks.get_mut(nid) {
                n.parent = None;
            }
            if let Some(b) = self.blocks.get_mut(id) {
                b.next = None;
            }
        }

        // Detach from the parent, remembering the vacated position.
        let mut vacated_socket: Option<String> = None;
        let mut was_chained = false;
        if let Some(pid) = &parent_id {
            if let Some(parent) = self.blocks.get_mut(pid) {
                if parent.next.as_deref() == Some(id) {
                    parent.next = None;
                    was_chained = true;
                } else if let Some(sock) = parent
                    .sockets
                    .iter_mut()
                    .find(|s| s.child.as_deref() == Some(id))
                {
                    sock.child = None;
                    vacated_socket = Some(sock.name.clone());
                }
            }
            if let Some(b) = self.blocks.get_mut(id) {
                b.parent = None;
            }
        }

        // Heal: best effort, an incompatible survivor stays detached.
        if let (Some(pid), Some(nid)) = (&parent_id, &next_id) {
            if was_chained {
                let _ = self.stack(pid, nid);
            } else if let Some(sock) = &vacated_socket {
                let _ = self.connect(pid, sock, nid);
            }
        }

        // Collect the block plus its socket subtrees, then drop them.
        let mut doomed: HashSet<String> = HashSet::new();
        let mut pending = vec![id.to_string()];
        while let Some(cur) = pending.pop() {
            if let Some(block) = self.blocks.get(&cur) {
                for sock in &block.sockets {
                    if let Some(c) = &sock.child {
                        pending.push(c.clone());
                    }
                }
                if let Some(n) = &block.next {
                    pending.push(n.clone());
                }
                doomed.insert(cur);
            }
        }
        for d in &doomed {
            self.blocks.remove(d);
        }
        self.order.retain(|oid| !doomed.contains(oid));
        Ok(())
    }

    /// True when `id` is `below` itself or sits anywhere above it
    /// (socket owner or stack predecessor, transitively).
    fn is_above(&self, id: &str, below: &str) -> bool {
        let mut cursor = Some(below.to_string());
        while let Some(cur) = cursor {
            if cur == id {
                return true;
            }
            cursor = self.blocks.get(&cur).and_then(|b| b.parent.clone());
        }
        false
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}
