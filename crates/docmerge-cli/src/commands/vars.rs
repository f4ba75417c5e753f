//! Implementation of the `docmerge vars` command.

use std::path::PathBuf;

use clap::Args;
use docmerge::RenderOptions;
use docmerge::outline::outline;
use docmerge::parser::parse_template;
use miette::{IntoDiagnostic, Report, Result};

use super::read_input;
use crate::output::TemplateDiagnostic;
use crate::output::table::format_directive_table;

/// Arguments for the vars command.
#[derive(Debug, Args)]
pub struct VarsArgs {
    /// Template file
    pub file: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the vars command.
pub fn run_vars(args: VarsArgs) -> Result<i32> {
    let content = match read_input(&args.file) {
        Ok(content) => content,
        Err(code) => return Ok(code),
    };
    let parsed = match parse_template(&content) {
        Ok(parsed) => parsed,
        Err(e) => {
            let diagnostic = TemplateDiagnostic::from_parse_error(&args.file, &content, &e);
            eprintln!("{:?}", Report::new(diagnostic));
            return Ok(exitcode::DATAERR);
        }
    };

    let directives = outline(&parsed, &RenderOptions::default());
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&directives).into_diagnostic()?
        );
    } else if directives.is_empty() {
        println!("No directives in {}", args.file.display());
    } else {
        println!("{}", format_directive_table(&directives));
    }
    Ok(exitcode::OK)
}
