//! Static listing of the directives in a parsed template.

use serde::Serialize;

use crate::formatter::{FormatHint, hint_for};
use crate::interpreter::item_alias;
use crate::options::RenderOptions;
use crate::parser::{Node, ParsedTemplate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectiveKind {
    Variable,
    Loop,
}

/// One directive as the renderer will treat it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectiveInfo {
    pub kind: DirectiveKind,
    /// Variable path or loop collection.
    pub path: String,
    /// Item alias, for loops.
    pub alias: Option<String>,
    /// Format hint, for variables.
    pub hint: Option<FormatHint>,
    /// Number of enclosing loops.
    pub depth: usize,
    pub line: usize,
    pub column: usize,
}

/// Lists every directive in document order without rendering.
///
/// ```
/// use docmerge::RenderOptions;
/// use docmerge::formatter::FormatHint;
/// use docmerge::outline::outline;
/// use docmerge::parser::parse_template;
///
/// let parsed = parse_template("{{#each jobs}}{{job.price}}{{/each}}").unwrap();
/// let directives = outline(&parsed, &RenderOptions::default());
/// assert_eq!(directives[0].alias.as_deref(), Some("job"));
/// assert_eq!(directives[1].hint, Some(FormatHint::Currency));
/// assert_eq!(directives[1].depth, 1);
/// ```
pub fn outline(parsed: &ParsedTemplate, options: &RenderOptions) -> Vec<DirectiveInfo> {
    let mut directives = Vec::new();
    parsed.walk(|node, depth| match node {
        Node::Text(_) => {}
        Node::Variable { path, position } => directives.push(DirectiveInfo {
            kind: DirectiveKind::Variable,
            path: path.clone(),
            alias: None,
            hint: Some(hint_for(path, options)),
            depth,
            line: position.line,
            column: position.column,
        }),
        Node::Loop {
            collection,
            position,
            ..
        } => directives.push(DirectiveInfo {
            kind: DirectiveKind::Loop,
            path: collection.clone(),
            alias: Some(item_alias(collection, options)),
            hint: None,
            depth,
            line: position.line,
            column: position.column,
        }),
    });
    directives
}
