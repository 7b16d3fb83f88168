//! # Code Generator Core
//!
//! Turns a workspace graph into text by walking every top-level chain
//! and dispatching the per-kind emission rules of the active
//! [`Dialect`].
//!
//! ## Determinism
//!
//! Generation is a pure function of the graph and the dialect table:
//! top-level chains render in creation order, children resolve through
//! named sockets, and no clock, randomness, or I/O is consulted. The
//! same workspace always yields byte-identical text.
//!
//! ## Recursion protection
//!
//! The editing layer keeps graphs acyclic, so the walker trusts the
//! shape it is given but still guards itself: recursing past
//! [`GeneratorOptions::max_depth`], or rendering more blocks than the
//! workspace holds, aborts with [`GenerateError::GraphTooDeep`].
//!
//! ## Failure semantics
//!
//! Any rule failure aborts the whole call. A failed `generate` returns
//! no partial text; callers keep showing the last known-good output.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use blocked_codegen::{generate, Dialect};
//!
//! let text = generate(&workspace, &Dialect::yaml())?;
//! ```

use crate::dialect::Dialect;
use blocked_blocks::{Block, FieldValue, Workspace};
use thiserror::Error;
use tracing::{debug, error, instrument, warn};

pub type GenResult<T> = Result<T, GenerateError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerateError {
    /// The active dialect has no rule for a kind present in the graph.
    /// A configuration bug, not a user-input error.
    #[error("Dialect {dialect} has no emission rule for block kind: {kind}")]
    MissingGenerator { dialect: String, kind: String },

    /// The recursion guard tripped: the graph is cyclic or nested past
    /// the configured bound.
    #[error("Generation aborted: block graph is cyclic or deeper than {limit}")]
    GraphTooDeep { limit: usize },
}

/// Knobs for one `generate` call.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorOptions {
    /// Socket/chain recursion depth at which generation aborts.
    pub max_depth: usize,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self { max_depth: 64 }
    }
}

/// How a value fragment embeds in its parent context. Declared by the
/// emitting rule, never inferred from the text shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precedence {
    /// Single-line scalar; embeds inline after a key or marker.
    Atomic,
    /// Container output; moves below its anchor line, indented.
    Nested,
}

/// Output of one emission rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    /// A statement kind's lines.
    Statement(String),
    /// A value kind's text plus the embedding its rule decided on.
    Value { text: String, precedence: Precedence },
}

impl Fragment {
    pub fn statement(text: impl Into<String>) -> Self {
        Fragment::Statement(text.into())
    }

    pub fn atomic(text: impl Into<String>) -> Self {
        Fragment::Value {
            text: text.into(),
            precedence: Precedence::Atomic,
        }
    }

    pub fn nested(text: impl Into<String>) -> Self {
        Fragment::Value {
            text: text.into(),
            precedence: Precedence::Nested,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Fragment::Statement(text) => text,
            Fragment::Value { text, .. } => text,
        }
    }

    fn into_value(self) -> (String, Precedence) {
        match self {
            Fragment::Value { text, precedence } => (text, precedence),
            // Statement text in a value position embeds as-is; the
            // socket mode checks upstream keep this path unreachable.
            Fragment::Statement(text) => (text, Precedence::Atomic),
        }
    }
}

/// Generate text for a whole workspace with default options.
pub fn generate(workspace: &Workspace, dialect: &Dialect) -> GenResult<String> {
    generate_with_options(workspace, dialect, GeneratorOptions::default())
}

/// Generate text for a whole workspace.
///
/// Top-level chains render in creation order and join with single
/// newlines; a graph that renders blank yields the dialect's exact
/// empty placeholder instead.
#[instrument(skip(workspace, dialect), fields(dialect = dialect.name(), blocks = workspace.block_count()))]
pub fn generate_with_options(
    workspace: &Workspace,
    dialect: &Dialect,
    options: GeneratorOptions,
) -> GenResult<String> {
    let mut generator = Generator {
        workspace,
        dialect,
        options,
        rendered: 0,
    };

    let mut chunks = Vec::new();
    for block in workspace.top_blocks() {
        debug!(id = %block.id, kind = %block.kind, "Rendering top-level chain");
        let text = generator.render_chain(block, 0)?;
        if !text.is_empty() {
            chunks.push(text);
        }
    }

    let code = chunks.join("\n");
    if code.trim().is_empty() {
        debug!("Workspace rendered blank, substituting placeholder");
        return Ok(dialect.empty_placeholder().to_string());
    }
    Ok(code)
}

/// Prefix every line of `text` with `indent`. Blank lines stay blank,
/// so indented output carries no trailing whitespace.
pub fn indent_lines(text: &str, indent: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", indent, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

struct Generator<'a> {
    workspace: &'a Workspace,
    dialect: &'a Dialect,
    options: GeneratorOptions,
    /// Blocks rendered so far this call; bounded by the workspace size
    /// in any acyclic graph.
    rendered: usize,
}

impl<'a> Generator<'a> {
    /// Render `head` and the statement chain stacked below it, pieces
    /// joined with single newlines. Rules may emit nothing (an empty
    /// dependency list); empty pieces take no line.
    fn render_chain(&mut self, head: &'a Block, depth: usize) -> GenResult<String> {
        let workspace = self.workspace;
        let mut pieces = Vec::new();
        let mut cursor = Some(head);
        while let Some(block) = cursor {
            let text = self.render_block(block, depth)?.into_text();
            if !text.is_empty() {
                pieces.push(text);
            }
            cursor = block.next.as_deref().and_then(|id| workspace.get(id));
        }
        Ok(pieces.join("\n"))
    }

    fn render_block(&mut self, block: &'a Block, depth: usize) -> GenResult<Fragment> {
        if depth > self.options.max_depth {
            error!(id = %block.id, depth, "Recursion depth guard tripped");
            return Err(GenerateError::GraphTooDeep {
                limit: self.options.max_depth,
            });
        }
        self.rendered += 1;
        if self.rendered > self.workspace.block_count() {
            error!(rendered = self.rendered, "Rendered more blocks than the workspace holds");
            return Err(GenerateError::GraphTooDeep {
                limit: self.options.max_depth,
            });
        }

        let rule = self.dialect.rule_for(&block.kind).ok_or_else(|| {
            error!(kind = %block.kind, dialect = self.dialect.name(), "No emission rule");
            GenerateError::MissingGenerator {
                dialect: self.dialect.name().to_string(),
                kind: block.kind.clone(),
            }
        })?;

        let mut ctx = EmitContext {
            generator: self,
            block,
            depth,
        };
        rule(&mut ctx)
    }
}

/// Rule-side view of one block during generation.
///
/// A rule reads the block's fields directly and resolves connected
/// blocks through the accessors, which recurse into the shared
/// generator and its guards.
pub struct EmitContext<'g, 'a> {
    generator: &'g mut Generator<'a>,
    block: &'a Block,
    depth: usize,
}

impl<'g, 'a> EmitContext<'g, 'a> {
    /// The block being emitted.
    pub fn block(&self) -> &Block {
        self.block
    }

    /// A declared field's value.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.block.field(name)
    }

    /// A field rendered to its literal token; empty when undeclared.
    pub fn field_text(&self, name: &str) -> String {
        self.block
            .field(name)
            .map(FieldValue::to_text)
            .unwrap_or_default()
    }

    /// The dialect's indent unit.
    pub fn indent(&self) -> &str {
        self.generator.dialect.indent()
    }

    /// Slot count of a dynamic container; zero for fixed shapes.
    pub fn item_count(&self) -> usize {
        self.block.item_count()
    }

    /// Render the block plugged into the numbered dynamic slot.
    pub fn item_code(&mut self, index: usize) -> GenResult<Option<(String, Precedence)>> {
        let socket = match &self.block.dynamic {
            Some(d) => format!("{}{}", d.prefix, index),
            None => return Ok(None),
        };
        self.child_code(&socket)
    }

    /// Render the block plugged into a value socket; `None` when the
    /// socket is empty. Head only, value blocks never chain.
    pub fn child_code(&mut self, socket: &str) -> GenResult<Option<(String, Precedence)>> {
        let block = self.block;
        let workspace = self.generator.workspace;
        let child_id = match block.socket(socket).and_then(|s| s.child.as_deref()) {
            Some(id) => id,
            None => return Ok(None),
        };
        let child = match workspace.get(child_id) {
            Some(b) => b,
            None => {
                warn!(socket, child = child_id, "Socket references a missing block");
                return Ok(None);
            }
        };
        let fragment = self.generator.render_block(child, self.depth + 1)?;
        Ok(Some(fragment.into_value()))
    }

    /// Render the whole statement chain behind a socket, every line
    /// prefixed with one dialect indent. An empty socket renders empty.
    pub fn statement_code(&mut self, socket: &str) -> GenResult<String> {
        let block = self.block;
        let workspace = self.generator.workspace;
        let head = match block.socket(socket).and_then(|s| s.child.as_deref()) {
            Some(id) => match workspace.get(id) {
                Some(b) => b,
                None => {
                    warn!(socket, child = id, "Socket references a missing block");
                    return Ok(String::new());
                }
            },
            None => return Ok(String::new()),
        };
        let chain = self.generator.render_chain(head, self.depth + 1)?;
        Ok(indent_lines(&chain, self.generator.dialect.indent()))
    }
}
