//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};
use docmerge::outline::{DirectiveInfo, DirectiveKind};

/// Format a template's directives as a table, indenting loop bodies.
pub fn format_directive_table(directives: &[DirectiveInfo]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Kind", "Path", "Alias", "Hint", "Location"]);

    for directive in directives {
        let kind = match directive.kind {
            DirectiveKind::Variable => "variable",
            DirectiveKind::Loop => "loop",
        };
        table.add_row(vec![
            kind.to_string(),
            format!("{}{}", "  ".repeat(directive.depth), directive.path),
            directive.alias.clone().unwrap_or_default(),
            directive
                .hint
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            format!("{}:{}", directive.line, directive.column),
        ]);
    }

    table
}
