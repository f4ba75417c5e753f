//! Template tokenizer.
//!
//! Scans a template body into literal text and directive tokens. Directive
//! grammar (inside the `{{ }}` delimiters, surrounding whitespace trimmed):
//! - `path.to.value` - variable reference, `[A-Za-z0-9_]` segments joined by `.`
//! - `#each name` - loop start over the collection at `name`
//! - `/each` - loop end
//!
//! Anything else between delimiters stays literal text and produces a
//! [`RenderWarning::MalformedDirective`].
//!
//! A loop directive alone on its line (only spaces or tabs around it) removes
//! that whole line, including its line break, so loops do not leave blank
//! lines behind. Variable directives never consume surrounding text.

use std::iter::once;

use winnow::ascii::space1;
use winnow::combinator::{alt, preceded};
use winnow::prelude::*;
use winnow::token::take_while;

use super::ast::Position;
use crate::warning::RenderWarning;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// A token with the position of its first character.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Text(String),
    Variable(String),
    LoopStart(String),
    LoopEnd,
}

/// Tokens of one template body plus the warnings found while scanning it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TokenStream {
    pub tokens: Vec<Token>,
    pub warnings: Vec<RenderWarning>,
}

/// Scans a template body into tokens. Never fails.
pub fn tokenize(body: &str) -> TokenStream {
    let lines = LineIndex::new(body);
    let mut tokens = Vec::new();
    let mut warnings = Vec::new();
    let mut text_start = 0;
    let mut cursor = 0;

    while let Some(found) = body[cursor..].find(OPEN) {
        let open = cursor + found;
        let Some(close_found) = body[open + OPEN.len()..].find(CLOSE) else {
            let (line, column) = lines.locate(open);
            warnings.push(RenderWarning::UnterminatedDirective { line, column });
            break;
        };
        let close = open + OPEN.len() + close_found;

        // The directive opens at the last `{{` before its `}}`, so extra
        // leading braces stay literal.
        let start = open + body[open..close].rfind(OPEN).unwrap_or(0);
        if start - open >= OPEN.len() {
            let (line, column) = lines.locate(open);
            warnings.push(RenderWarning::MalformedDirective {
                text: body[open..start].to_string(),
                line,
                column,
            });
        }

        let end = close + CLOSE.len();
        let position = lines.position(start);
        match classify(&body[start + OPEN.len()..close]) {
            Some(kind) => {
                push_text(&mut tokens, body, text_start, start, &lines);
                tokens.push(Token { kind, position });
                text_start = end;
            }
            None => warnings.push(RenderWarning::MalformedDirective {
                text: body[start..end].to_string(),
                line: position.line,
                column: position.column,
            }),
        }
        cursor = end;
    }
    push_text(&mut tokens, body, text_start, body.len(), &lines);

    strip_standalone_lines(&mut tokens);
    TokenStream { tokens, warnings }
}

fn push_text(tokens: &mut Vec<Token>, body: &str, start: usize, end: usize, lines: &LineIndex) {
    if start < end {
        tokens.push(Token {
            kind: TokenKind::Text(body[start..end].to_string()),
            position: lines.position(start),
        });
    }
}

/// Classifies the text between `{{` and `}}`, or `None` if it is not a
/// directive.
fn classify(inner: &str) -> Option<TokenKind> {
    let mut input = inner.trim();
    let kind = directive(&mut input).ok()?;
    input.is_empty().then_some(kind)
}

fn directive(input: &mut &str) -> ModalResult<TokenKind> {
    alt((loop_start, loop_end, variable)).parse_next(input)
}

/// `#each name`
fn loop_start(input: &mut &str) -> ModalResult<TokenKind> {
    preceded(("#each", space1), path)
        .map(|name: &str| TokenKind::LoopStart(name.to_string()))
        .parse_next(input)
}

/// `/each`
fn loop_end(input: &mut &str) -> ModalResult<TokenKind> {
    "/each".value(TokenKind::LoopEnd).parse_next(input)
}

fn variable(input: &mut &str) -> ModalResult<TokenKind> {
    path.map(|p: &str| TokenKind::Variable(p.to_string()))
        .parse_next(input)
}

/// Dotted identifier path with no empty segments.
fn path<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| is_segment_char(c) || c == '.')
        .verify(|p: &str| p.split('.').all(|segment| !segment.is_empty()))
        .parse_next(input)
}

fn is_segment_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Removes the lines of loop directives that stand alone on their line.
///
/// Standalone-ness is decided on the original tokens before any text is
/// trimmed, so consecutive loop lines are all removed.
fn strip_standalone_lines(tokens: &mut Vec<Token>) {
    let mut keep: Vec<(usize, usize)> = tokens
        .iter()
        .map(|token| match &token.kind {
            TokenKind::Text(text) => (0, text.len()),
            _ => (0, 0),
        })
        .collect();

    for i in 0..tokens.len() {
        if !matches!(tokens[i].kind, TokenKind::LoopStart(_) | TokenKind::LoopEnd) {
            continue;
        }
        let before = match i.checked_sub(1).map(|j| &tokens[j].kind) {
            None => Some(0),
            Some(TokenKind::Text(text)) => line_start_before(text, i == 1),
            Some(_) => None,
        };
        let after = match tokens.get(i + 1).map(|token| &token.kind) {
            None => Some(0),
            Some(TokenKind::Text(text)) => line_end_after(text, i + 2 == tokens.len()),
            Some(_) => None,
        };
        if let (Some(cut_before), Some(cut_after)) = (before, after) {
            if i > 0 {
                keep[i - 1].1 = keep[i - 1].1.min(cut_before);
            }
            if i + 1 < tokens.len() {
                keep[i + 1].0 = keep[i + 1].0.max(cut_after);
            }
        }
    }

    for (token, (start, end)) in tokens.iter_mut().zip(keep) {
        if let TokenKind::Text(text) = &mut token.kind {
            let end = end.max(start);
            *text = text[start..end].to_string();
        }
    }
    tokens.retain(|token| !matches!(&token.kind, TokenKind::Text(text) if text.is_empty()));
}

/// If `text` ends with a line break followed only by spaces or tabs, returns
/// the byte index where that trailing indentation starts. Text at the very
/// start of the template counts as following a line break.
fn line_start_before(text: &str, at_template_start: bool) -> Option<usize> {
    let indent_start = text.trim_end_matches([' ', '\t']).len();
    let preceded_by_break = text[..indent_start].ends_with('\n');
    (preceded_by_break || (at_template_start && indent_start == 0)).then_some(indent_start)
}

/// If `text` starts with spaces or tabs followed by a line break, returns the
/// byte index just past that line break. Text running to the end of the
/// template counts as ending a line.
fn line_end_after(text: &str, at_template_end: bool) -> Option<usize> {
    let rest = text.trim_start_matches([' ', '\t']);
    let indent = text.len() - rest.len();
    if rest.starts_with("\r\n") {
        Some(indent + 2)
    } else if rest.starts_with('\n') {
        Some(indent + 1)
    } else if at_template_end && rest.is_empty() {
        Some(indent)
    } else {
        None
    }
}

/// Maps byte offsets to 1-based line and column numbers.
struct LineIndex<'a> {
    source: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    fn new(source: &'a str) -> Self {
        let line_starts = once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            source,
            line_starts,
        }
    }

    fn locate(&self, offset: usize) -> (usize, usize) {
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let line_start = self.line_starts[line - 1];
        let column = self.source[line_start..offset].chars().count() + 1;
        (line, column)
    }

    fn position(&self, offset: usize) -> Position {
        let (line, column) = self.locate(offset);
        Position {
            offset,
            line,
            column,
        }
    }
}
