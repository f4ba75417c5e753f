//! Template evaluation engine.
//!
//! Text nodes are copied to output. Variables resolve through the scope chain,
//! then go through the formatter and HTML escaping. Loops resolve their
//! collection the same way and render their body once per item with an extra
//! scope frame. Missing data never aborts a render; it produces empty output
//! and a [`RenderWarning`].

use log::{debug, trace};
use serde::Serialize;

use crate::formatter::{escape_html, format_value, hint_for};
use crate::interpreter::EvalContext;
use crate::interpreter::alias::item_alias;
use crate::options::RenderOptions;
use crate::parser::{Node, ParsedTemplate, Position};
use crate::types::Value;
use crate::warning::RenderWarning;

/// Output of one render call.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RenderResult {
    /// The rendered HTML.
    pub output: String,
    /// Non-fatal problems, in the order they were first found.
    pub warnings: Vec<RenderWarning>,
}

impl RenderResult {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Renders a parsed template against a context.
///
/// Pure: the same template, context and options always produce the same
/// result.
///
/// # Example
///
/// ```
/// use docmerge::interpreter::render;
/// use docmerge::parser::parse_template;
/// use docmerge::{RenderOptions, Value};
///
/// let parsed = parse_template("{{#each jobs}}<li>{{job.title}}</li>{{/each}}").unwrap();
/// let context = Value::map().with(
///     "jobs",
///     vec![Value::map().with("title", "Tiling"), Value::map().with("title", "Grout")],
/// );
/// let result = render(&parsed, &context, &RenderOptions::default());
/// assert_eq!(result.output, "<li>Tiling</li><li>Grout</li>");
/// assert!(!result.has_warnings());
/// ```
pub fn render(parsed: &ParsedTemplate, context: &Value, options: &RenderOptions) -> RenderResult {
    let mut ctx = EvalContext::new(context, options);
    for warning in &parsed.warnings {
        ctx.add_warning(warning.clone());
    }
    let mut output = String::new();
    eval_nodes(&parsed.nodes, &mut ctx, &mut output);
    let warnings = ctx.take_warnings();
    debug!(
        "rendered {} bytes with {} warning(s)",
        output.len(),
        warnings.len()
    );
    RenderResult { output, warnings }
}

fn eval_nodes(nodes: &[Node], ctx: &mut EvalContext<'_, '_>, output: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => output.push_str(text),
            Node::Variable { path, position } => eval_variable(path, *position, ctx, output),
            Node::Loop {
                collection,
                position,
                body,
            } => eval_loop(collection, *position, body, ctx, output),
        }
    }
}

fn eval_variable(
    path: &str,
    position: Position,
    ctx: &mut EvalContext<'_, '_>,
    output: &mut String,
) {
    let Some(value) = ctx.scope().resolve(path) else {
        let warning = RenderWarning::UnresolvedVariable {
            path: path.to_string(),
            line: position.line,
            column: position.column,
            scope: ctx.scope().collections(),
            suggestions: ctx.scope().suggest(path),
        };
        ctx.add_warning(warning);
        return;
    };

    if let Value::Map(_) = value {
        ctx.add_warning(RenderWarning::NonScalarValue {
            path: path.to_string(),
            line: position.line,
            column: position.column,
        });
        return;
    }

    let options: &RenderOptions = ctx.options();
    let formatted = format_value(value, Some(hint_for(path, options)), options);
    output.push_str(&escape_html(&formatted));
}

fn eval_loop(
    collection: &str,
    position: Position,
    body: &[Node],
    ctx: &mut EvalContext<'_, '_>,
    output: &mut String,
) {
    let items = match ctx.scope().resolve(collection) {
        Some(Value::List(items)) => items,
        Some(other) => {
            ctx.add_warning(RenderWarning::NotACollection {
                collection: collection.to_string(),
                found: other.type_name().to_string(),
                line: position.line,
                column: position.column,
            });
            return;
        }
        None => {
            let warning = RenderWarning::MissingCollection {
                collection: collection.to_string(),
                line: position.line,
                column: position.column,
                scope: ctx.scope().collections(),
            };
            ctx.add_warning(warning);
            return;
        }
    };

    let alias = item_alias(collection, ctx.options());
    debug!(
        "loop over '{collection}' as '{alias}': {} item(s) at depth {}",
        items.len(),
        ctx.scope().depth()
    );
    for (index, item) in items.iter().enumerate() {
        trace!("{collection}[{index}]");
        ctx.scope_mut().push_item(collection, &alias, item);
        eval_nodes(body, ctx, output);
        ctx.scope_mut().pop_item();
    }
}
