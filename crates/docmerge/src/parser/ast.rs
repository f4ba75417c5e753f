//! Parsed template tree.
//!
//! These types are public so tooling (the `docmerge vars` listing, editors)
//! can walk a template without rendering it.

use crate::warning::RenderWarning;

/// Location of a directive in the template body.
///
/// `offset` is a byte offset; `line` and `column` are 1-based, with the column
/// counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

/// A template body parsed into a tree of nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedTemplate {
    pub nodes: Vec<Node>,
    /// Malformed-directive warnings found while tokenizing. They are carried
    /// into every render of this template.
    pub warnings: Vec<RenderWarning>,
}

/// A node in a parsed template.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Literal text, copied to output unchanged.
    Text(String),
    /// A `{{path}}` reference.
    Variable { path: String, position: Position },
    /// A `{{#each collection}} ... {{/each}}` block.
    Loop {
        collection: String,
        position: Position,
        body: Vec<Node>,
    },
}

impl ParsedTemplate {
    /// Visits every node depth-first, in document order, with its loop depth.
    pub fn walk(&self, mut visit: impl FnMut(&Node, usize)) {
        walk_nodes(&self.nodes, 0, &mut visit);
    }
}

fn walk_nodes(nodes: &[Node], depth: usize, visit: &mut impl FnMut(&Node, usize)) {
    for node in nodes {
        visit(node, depth);
        if let Node::Loop { body, .. } = node {
            walk_nodes(body, depth + 1, visit);
        }
    }
}
