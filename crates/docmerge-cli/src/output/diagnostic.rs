//! Miette diagnostic wrapper for template syntax errors.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![expect(unused_assignments)]

use std::path::Path;

use docmerge::ParseError;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A miette-compatible diagnostic for template parse errors.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(docmerge::syntax))]
pub struct TemplateDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("{label}")]
    span: SourceSpan,

    message: String,

    label: String,

    #[help]
    help: Option<String>,
}

impl TemplateDiagnostic {
    /// Create a diagnostic pointing at the directive that broke the template.
    pub fn from_parse_error(path: &Path, content: &str, err: &ParseError) -> Self {
        let (label, help) = match err {
            ParseError::UnmatchedLoopEnd { .. } => (
                "no loop to close",
                "remove this {{/each}} or add a matching {{#each collection}} before it",
            ),
            ParseError::UnterminatedLoop { .. } => (
                "loop opened here",
                "add {{/each}} where the repeated block ends",
            ),
            ParseError::NestingTooDeep { .. } => (
                "nested too deeply",
                "flatten the template so fewer loops are open at once",
            ),
        };

        // Clamp to the content so miette never indexes out of bounds.
        let offset = err.offset().min(content.len());
        let len = content[offset..]
            .find("}}")
            .map_or(content.len() - offset, |end| end + 2);

        TemplateDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: (offset, len).into(),
            message: err.to_string(),
            label: label.to_string(),
            help: Some(help.to_string()),
        }
    }
}
