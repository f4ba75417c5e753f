//! Integration tests for template tokenizing and parsing.

use docmerge::interpreter::render;
use docmerge::parser::{MAX_LOOP_DEPTH, Node, ParseError, TokenKind, parse_template, tokenize};
use docmerge::{RenderOptions, RenderWarning, Value};

fn loop_body(node: &Node) -> &[Node] {
    match node {
        Node::Loop { body, .. } => body,
        other => panic!("expected loop, got {other:?}"),
    }
}

// =========================================================================
// Structure
// =========================================================================

#[test]
fn text_only_template_is_one_node() {
    let parsed = parse_template("<h1>Invoice</h1>").unwrap();
    assert_eq!(parsed.nodes, vec![Node::Text("<h1>Invoice</h1>".into())]);
    assert!(parsed.warnings.is_empty());
}

#[test]
fn empty_template_has_no_nodes() {
    let parsed = parse_template("").unwrap();
    assert!(parsed.nodes.is_empty());
}

#[test]
fn nested_loops_build_a_tree() {
    let parsed = parse_template(
        "{{#each projects}}<h2>{{project.name}}</h2>{{#each jobs}}{{job.title}}{{/each}}{{/each}}",
    )
    .unwrap();
    assert_eq!(parsed.nodes.len(), 1);

    let projects = loop_body(&parsed.nodes[0]);
    assert_eq!(projects.len(), 4);
    assert!(matches!(&projects[1], Node::Variable { path, .. } if path == "project.name"));

    let jobs = loop_body(&projects[3]);
    assert!(matches!(&jobs[0], Node::Variable { path, .. } if path == "job.title"));
}

#[test]
fn loop_positions_point_at_opening_braces() {
    let parsed = parse_template("<ul>\n  {{#each jobs}}<li/>{{/each}}</ul>").unwrap();
    match &parsed.nodes[1] {
        Node::Loop {
            collection,
            position,
            ..
        } => {
            assert_eq!(collection, "jobs");
            assert_eq!((position.line, position.column), (2, 3));
            assert_eq!(position.offset, 7);
        }
        other => panic!("expected loop, got {other:?}"),
    }
}

#[test]
fn parsing_is_deterministic() {
    let body = "{{a}}{{#each b}}{{c}} {{ bad }} {{/each}}";
    assert_eq!(parse_template(body).unwrap(), parse_template(body).unwrap());
}

#[test]
fn walk_reports_loop_depth() {
    let parsed = parse_template("{{a}}{{#each b}}{{#each c}}{{d}}{{/each}}{{/each}}").unwrap();
    let mut seen = Vec::new();
    parsed.walk(|node, depth| {
        if let Node::Variable { path, .. } = node {
            seen.push((path.clone(), depth));
        }
    });
    assert_eq!(seen, vec![("a".to_string(), 0), ("d".to_string(), 2)]);
}

// =========================================================================
// Syntax errors
// =========================================================================

#[test]
fn unmatched_loop_end_is_an_error() {
    let err = parse_template("Total\n  {{/each}}").unwrap_err();
    assert_eq!(
        err,
        ParseError::UnmatchedLoopEnd {
            offset: 8,
            line: 2,
            column: 3,
        }
    );
}

#[test]
fn unterminated_loop_reports_innermost_open_loop() {
    let err = parse_template("{{#each projects}}{{#each jobs}}x").unwrap_err();
    assert_eq!(
        err,
        ParseError::UnterminatedLoop {
            collection: "jobs".into(),
            offset: 18,
            line: 1,
            column: 19,
            open: 2,
        }
    );
}

#[test]
fn extra_loop_end_after_balanced_loop() {
    let err = parse_template("{{#each a}}{{/each}}{{/each}}").unwrap_err();
    assert_eq!(err.position(), (1, 21));
}

#[test]
fn parse_error_messages_name_the_location() {
    let err = parse_template("{{#each jobs}}").unwrap_err();
    assert_eq!(
        err.to_string(),
        "syntax error at 1:1: loop over 'jobs' is never closed (1 open at end of template)"
    );
    let err = parse_template("{{/each}}").unwrap_err();
    assert_eq!(
        err.to_string(),
        "syntax error at 1:1: '{{/each}}' without a matching '{{#each}}'"
    );
}

#[test]
fn deeply_nested_loops_are_rejected() {
    let body = format!(
        "{}x{}",
        "{{#each a}}".repeat(10_000),
        "{{/each}}".repeat(10_000)
    );
    let err = parse_template(&body).unwrap_err();
    assert_eq!(
        err,
        ParseError::NestingTooDeep {
            collection: "a".into(),
            offset: MAX_LOOP_DEPTH * 11,
            line: 1,
            column: MAX_LOOP_DEPTH * 11 + 1,
            limit: MAX_LOOP_DEPTH,
        }
    );
}

#[test]
fn nesting_up_to_the_limit_parses_and_renders() {
    let body = format!(
        "{}x{}",
        "{{#each items}}".repeat(MAX_LOOP_DEPTH),
        "{{/each}}".repeat(MAX_LOOP_DEPTH)
    );
    let parsed = parse_template(&body).unwrap();
    let mut deepest = 0;
    parsed.walk(|_, depth| deepest = deepest.max(depth));
    assert_eq!(deepest, MAX_LOOP_DEPTH);

    let context = Value::map().with("items", vec![Value::map()]);
    let result = render(&parsed, &context, &RenderOptions::default());
    assert_eq!(result.output, "x");
}

// =========================================================================
// Malformed directives
// =========================================================================

#[test]
fn malformed_directive_stays_literal() {
    let parsed = parse_template("Hi {{ not valid! }} there").unwrap();
    assert_eq!(
        parsed.nodes,
        vec![Node::Text("Hi {{ not valid! }} there".into())]
    );
    assert_eq!(
        parsed.warnings,
        vec![RenderWarning::MalformedDirective {
            text: "{{ not valid! }}".into(),
            line: 1,
            column: 4,
        }]
    );
}

#[test]
fn unterminated_directive_stays_literal() {
    let parsed = parse_template("Dear {{customer.name").unwrap();
    assert_eq!(parsed.nodes, vec![Node::Text("Dear {{customer.name".into())]);
    assert_eq!(
        parsed.warnings,
        vec![RenderWarning::UnterminatedDirective { line: 1, column: 6 }]
    );
}

#[test]
fn each_without_space_is_a_variable_error() {
    let stream = tokenize("{{#eachjobs}}");
    assert_eq!(stream.tokens[0].kind, TokenKind::Text("{{#eachjobs}}".into()));
    assert_eq!(stream.warnings.len(), 1);
}

// =========================================================================
// Standalone loop lines
// =========================================================================

#[test]
fn standalone_loop_lines_are_removed() {
    let parsed =
        parse_template("<ul>\n  {{#each jobs}}\n  <li>{{job.title}}</li>\n  {{/each}}\n</ul>")
            .unwrap();
    assert_eq!(parsed.nodes[0], Node::Text("<ul>\n".into()));
    let body = loop_body(&parsed.nodes[1]);
    assert_eq!(body[0], Node::Text("  <li>".into()));
    assert_eq!(body[2], Node::Text("</li>\n".into()));
    assert_eq!(parsed.nodes[2], Node::Text("</ul>".into()));
}

#[test]
fn crlf_line_breaks_are_removed_with_the_loop_line() {
    let parsed = parse_template("a\r\n{{#each x}}\r\nb\r\n{{/each}}\r\nc").unwrap();
    assert_eq!(parsed.nodes[0], Node::Text("a\r\n".into()));
    assert_eq!(loop_body(&parsed.nodes[1]), &[Node::Text("b\r\n".into())]);
    assert_eq!(parsed.nodes[2], Node::Text("c".into()));
}

#[test]
fn inline_loops_keep_surrounding_text() {
    let parsed = parse_template("<p>{{#each tags}}{{tag}} {{/each}}</p>").unwrap();
    assert_eq!(parsed.nodes[0], Node::Text("<p>".into()));
    assert_eq!(parsed.nodes[2], Node::Text("</p>".into()));
}

#[test]
fn variables_never_strip_lines() {
    let parsed = parse_template("a\n  {{name}}\nb").unwrap();
    assert_eq!(parsed.nodes[0], Node::Text("a\n  ".into()));
    assert_eq!(parsed.nodes[2], Node::Text("\nb".into()));
}
