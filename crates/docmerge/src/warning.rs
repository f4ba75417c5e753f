//! Non-fatal problems reported alongside rendered output.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;
use strsim::levenshtein;

/// A non-fatal problem found while tokenizing or rendering a template.
///
/// Rendering never fails because of missing data; it degrades to empty output
/// for the offending directive and records one of these instead. Line and
/// column are 1-based and point at the directive's opening `{{`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderWarning {
    /// A variable path did not resolve in any scope frame.
    UnresolvedVariable {
        path: String,
        line: usize,
        column: usize,
        /// Enclosing loop collections, outermost first.
        scope: Vec<String>,
        /// Similar paths that do resolve.
        suggestions: Vec<String>,
    },

    /// A loop collection did not resolve; the loop ran zero times.
    MissingCollection {
        collection: String,
        line: usize,
        column: usize,
        scope: Vec<String>,
    },

    /// A loop collection resolved to something other than a list.
    NotACollection {
        collection: String,
        found: String,
        line: usize,
        column: usize,
    },

    /// A variable resolved to a map, which has no text form.
    NonScalarValue {
        path: String,
        line: usize,
        column: usize,
    },

    /// A `{{...}}` span that is not a valid directive, kept as literal text.
    MalformedDirective {
        text: String,
        line: usize,
        column: usize,
    },

    /// A `{{` with no closing `}}`, kept as literal text.
    UnterminatedDirective { line: usize, column: usize },
}

impl RenderWarning {
    /// Returns the 1-based line and column the warning points at.
    pub fn position(&self) -> (usize, usize) {
        match self {
            RenderWarning::UnresolvedVariable { line, column, .. }
            | RenderWarning::MissingCollection { line, column, .. }
            | RenderWarning::NotACollection { line, column, .. }
            | RenderWarning::NonScalarValue { line, column, .. }
            | RenderWarning::MalformedDirective { line, column, .. }
            | RenderWarning::UnterminatedDirective { line, column } => (*line, *column),
        }
    }
}

impl Display for RenderWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let (line, column) = self.position();
        write!(f, "{line}:{column}: ")?;
        match self {
            RenderWarning::UnresolvedVariable {
                path,
                scope,
                suggestions,
                ..
            } => {
                write!(f, "unresolved variable '{path}'")?;
                write_scope(f, scope)?;
                if !suggestions.is_empty() {
                    write!(f, "; did you mean: {}?", suggestions.join(", "))?;
                }
                Ok(())
            }
            RenderWarning::MissingCollection {
                collection, scope, ..
            } => {
                write!(f, "loop collection '{collection}' not found")?;
                write_scope(f, scope)
            }
            RenderWarning::NotACollection {
                collection, found, ..
            } => write!(
                f,
                "loop collection '{collection}' is a {found}, not a list"
            ),
            RenderWarning::NonScalarValue { path, .. } => {
                write!(f, "variable '{path}' is a map and renders as empty")
            }
            RenderWarning::MalformedDirective { text, .. } => {
                write!(f, "malformed directive '{text}' kept as text")
            }
            RenderWarning::UnterminatedDirective { .. } => {
                write!(f, "'{{{{' without closing '}}}}' kept as text")
            }
        }
    }
}

fn write_scope(f: &mut Formatter<'_>, scope: &[String]) -> FmtResult {
    if scope.is_empty() {
        Ok(())
    } else {
        write!(f, " (inside {})", scope.join(" > "))
    }
}

/// Returns up to three names from `available` within a small edit distance
/// of `key`, closest first.
///
/// Keys of three characters or fewer allow a distance of 1, longer keys a
/// distance of 2.
pub fn compute_suggestions(key: &str, available: &[String]) -> Vec<String> {
    let max_distance = if key.chars().count() <= 3 { 1 } else { 2 };
    let mut candidates: Vec<(usize, &String)> = available
        .iter()
        .filter(|name| name.as_str() != key)
        .map(|name| (levenshtein(key, name), name))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();
    candidates.sort();
    candidates.dedup_by(|a, b| a.1 == b.1);
    candidates
        .into_iter()
        .take(3)
        .map(|(_, name)| name.clone())
        .collect()
}
