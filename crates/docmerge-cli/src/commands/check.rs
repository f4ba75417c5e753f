//! Implementation of the `docmerge check` command.

use std::path::PathBuf;

use clap::Args;
use docmerge::RenderWarning;
use docmerge::parser::parse_template;
use miette::{IntoDiagnostic, Report, Result};
use owo_colors::OwoColorize;
use serde::Serialize;

use super::read_input;
use crate::output::TemplateDiagnostic;

/// Arguments for the check command.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Template files to check
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one checked file.
#[derive(Debug, Serialize)]
struct FileReport {
    file: String,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorReport>,
    warnings: Vec<RenderWarning>,
}

#[derive(Debug, Serialize)]
struct ErrorReport {
    message: String,
    line: usize,
    column: usize,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> Result<i32> {
    let mut reports = Vec::new();
    let mut failed = false;

    for path in &args.files {
        let content = match read_input(path) {
            Ok(content) => content,
            Err(code) => return Ok(code),
        };
        let file = path.display().to_string();
        match parse_template(&content) {
            Ok(parsed) => {
                if !args.json {
                    for warning in &parsed.warnings {
                        eprintln!("{}: {file}: {warning}", "warning".yellow().bold());
                    }
                    println!("{} {file}", "ok".green());
                }
                reports.push(FileReport {
                    file,
                    ok: true,
                    error: None,
                    warnings: parsed.warnings,
                });
            }
            Err(e) => {
                failed = true;
                if !args.json {
                    let diagnostic = TemplateDiagnostic::from_parse_error(path, &content, &e);
                    eprintln!("{:?}", Report::new(diagnostic));
                }
                let (line, column) = e.position();
                reports.push(FileReport {
                    file,
                    ok: false,
                    error: Some(ErrorReport {
                        message: e.to_string(),
                        line,
                        column,
                    }),
                    warnings: Vec::new(),
                });
            }
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports).into_diagnostic()?);
    }

    Ok(if failed { exitcode::DATAERR } else { exitcode::OK })
}
