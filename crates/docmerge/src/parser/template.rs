//! Builds the node tree from a token stream.
//!
//! Single left-to-right pass with an explicit stack of open loops. A loop
//! start pushes a frame and later nodes go into its body; a loop end pops the
//! frame and attaches the finished loop to the new top of the stack, or to the
//! root when the stack is empty.

use super::ast::{Node, ParsedTemplate, Position};
use super::error::ParseError;
use super::lexer::{TokenKind, TokenStream, tokenize};

/// Maximum number of loops that may be open at once.
pub const MAX_LOOP_DEPTH: usize = 64;

/// Tokenizes and parses a template body.
///
/// # Example
///
/// ```
/// use docmerge::parser::{Node, parse_template};
///
/// let parsed = parse_template("Hi {{customer.name}}").unwrap();
/// assert_eq!(parsed.nodes.len(), 2);
/// assert!(matches!(&parsed.nodes[1], Node::Variable { path, .. } if path == "customer.name"));
///
/// assert!(parse_template("{{#each jobs}}never closed").is_err());
/// ```
pub fn parse_template(body: &str) -> Result<ParsedTemplate, ParseError> {
    parse(tokenize(body))
}

/// Parses a token stream into a [`ParsedTemplate`].
///
/// # Errors
///
/// - [`ParseError::UnmatchedLoopEnd`] for a `{{/each}}` with no open loop
/// - [`ParseError::UnterminatedLoop`] when loops are still open at the end,
///   pointing at the innermost one
/// - [`ParseError::NestingTooDeep`] for a loop start that would open more
///   than [`MAX_LOOP_DEPTH`] loops
pub fn parse(stream: TokenStream) -> Result<ParsedTemplate, ParseError> {
    let TokenStream { tokens, warnings } = stream;
    let mut root: Vec<Node> = Vec::new();
    let mut stack: Vec<OpenLoop> = Vec::new();

    for token in tokens {
        let position = token.position;
        match token.kind {
            TokenKind::Text(text) => push_node(current(&mut root, &mut stack), Node::Text(text)),
            TokenKind::Variable(path) => push_node(
                current(&mut root, &mut stack),
                Node::Variable { path, position },
            ),
            TokenKind::LoopStart(collection) => {
                if stack.len() >= MAX_LOOP_DEPTH {
                    return Err(ParseError::NestingTooDeep {
                        collection,
                        offset: position.offset,
                        line: position.line,
                        column: position.column,
                        limit: MAX_LOOP_DEPTH,
                    });
                }
                stack.push(OpenLoop {
                    collection,
                    position,
                    body: Vec::new(),
                });
            }
            TokenKind::LoopEnd => {
                let Some(open) = stack.pop() else {
                    return Err(ParseError::UnmatchedLoopEnd {
                        offset: position.offset,
                        line: position.line,
                        column: position.column,
                    });
                };
                push_node(current(&mut root, &mut stack), open.into_node());
            }
        }
    }

    if let Some(open) = stack.pop() {
        return Err(ParseError::UnterminatedLoop {
            collection: open.collection,
            offset: open.position.offset,
            line: open.position.line,
            column: open.position.column,
            open: stack.len() + 1,
        });
    }

    Ok(ParsedTemplate {
        nodes: root,
        warnings,
    })
}

/// A loop whose end directive has not been seen yet.
struct OpenLoop {
    collection: String,
    position: Position,
    body: Vec<Node>,
}

impl OpenLoop {
    fn into_node(self) -> Node {
        Node::Loop {
            collection: self.collection,
            position: self.position,
            body: self.body,
        }
    }
}

/// The node list new nodes are appended to: the innermost open loop's body,
/// or the root.
fn current<'a>(root: &'a mut Vec<Node>, stack: &'a mut [OpenLoop]) -> &'a mut Vec<Node> {
    match stack.last_mut() {
        Some(open) => &mut open.body,
        None => root,
    }
}

/// Appends a node, merging adjacent text.
fn push_node(nodes: &mut Vec<Node>, node: Node) {
    if let Node::Text(text) = &node
        && let Some(Node::Text(prev)) = nodes.last_mut()
    {
        prev.push_str(text);
        return;
    }
    nodes.push(node);
}
