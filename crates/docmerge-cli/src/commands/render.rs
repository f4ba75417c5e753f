//! Implementation of the `docmerge render` command.

use std::fs::write;
use std::path::{Path, PathBuf};

use clap::Args;
use docmerge::context::InvoiceDocument;
use docmerge::formatter::is_valid_date_format;
use docmerge::options::DEFAULT_DATE_FORMAT;
use docmerge::{Engine, RenderOptions, Template, TemplateId, TemplateKind, Value};
use log::{debug, warn};
use miette::{miette, IntoDiagnostic, Result};
use owo_colors::OwoColorize;

use super::read_input;
use crate::output::TemplateDiagnostic;

/// Arguments for the render command.
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Template file (HTML with {{...}} directives)
    #[arg(short, long)]
    pub template: PathBuf,

    /// Context file (JSON). An invoice document is expanded into the full
    /// invoice context; any other JSON is used as-is.
    #[arg(short, long)]
    pub context: PathBuf,

    /// Symbol placed before currency amounts
    #[arg(long, env = "DOCMERGE_CURRENCY_SYMBOL", default_value = "")]
    pub currency_symbol: String,

    /// strftime-style date format
    #[arg(long, env = "DOCMERGE_DATE_FORMAT", default_value = DEFAULT_DATE_FORMAT)]
    pub date_format: String,

    /// Loop alias override in collection=alias format (repeatable)
    #[arg(long = "alias", value_parser = parse_key_val)]
    pub aliases: Vec<(String, String)>,

    /// Write the rendered output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output the render result (output and warnings) as JSON, to --output
    /// when given
    #[arg(long)]
    pub json: bool,
}

/// Parse a key=value string.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid alias '{s}': expected collection=alias"))?;
    Ok((key.to_string(), value.to_string()))
}

/// Builds the render context from the contents of a context file.
pub fn load_context(json: &str) -> Result<Value> {
    if let Ok(document) = InvoiceDocument::from_json(json) {
        debug!(
            "context is invoice document {}",
            document.invoice.invoice_number
        );
        return Ok(document.to_context());
    }
    let raw: serde_json::Value = serde_json::from_str(json)
        .into_diagnostic()
        .map_err(|e| miette!("Invalid context JSON: {e}"))?;
    Ok(Value::from(raw))
}

fn build_options(args: &RenderArgs) -> RenderOptions {
    let date_format = if is_valid_date_format(&args.date_format) {
        args.date_format.clone()
    } else {
        warn!(
            "invalid date format '{}', using {DEFAULT_DATE_FORMAT}",
            args.date_format
        );
        DEFAULT_DATE_FORMAT.to_string()
    };
    args.aliases.iter().fold(
        RenderOptions::builder()
            .currency_symbol(args.currency_symbol.as_str())
            .date_format(date_format)
            .build(),
        |options, (collection, alias)| options.with_alias(collection, alias),
    )
}

fn template_from_file(path: &Path, body: String) -> Template {
    let name = path.display().to_string();
    Template::builder()
        .id(TemplateId::from_name(&name))
        .kind(TemplateKind::Other("file".into()))
        .title(name)
        .body(body)
        .build()
}

/// Writes `text` to `path`, or to stdout without one.
fn emit(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => write(path, text)
            .into_diagnostic()
            .map_err(|e| miette!("Cannot write {}: {e}", path.display())),
        None => {
            print!("{text}");
            Ok(())
        }
    }
}

/// Run the render command.
pub fn run_render(args: RenderArgs) -> Result<i32> {
    let body = match read_input(&args.template) {
        Ok(body) => body,
        Err(code) => return Ok(code),
    };
    let context_json = match read_input(&args.context) {
        Ok(json) => json,
        Err(code) => return Ok(code),
    };
    let context = match load_context(&context_json) {
        Ok(context) => context,
        Err(e) => {
            eprintln!("{e:?}");
            return Ok(exitcode::DATAERR);
        }
    };

    let engine = Engine::builder().options(build_options(&args)).build();
    let template = template_from_file(&args.template, body);
    let result = match engine.render(&template, &context) {
        Ok(result) => result,
        Err(e) => {
            let diagnostic = TemplateDiagnostic::from_parse_error(&args.template, &template.body, &e);
            eprintln!("{:?}", miette::Report::new(diagnostic));
            return Ok(exitcode::DATAERR);
        }
    };

    if args.json {
        let json = serde_json::to_string_pretty(&result).into_diagnostic()?;
        emit(args.output.as_deref(), &format!("{json}\n"))?;
        return Ok(exitcode::OK);
    }

    emit(args.output.as_deref(), &result.output)?;
    for warning in &result.warnings {
        eprintln!(
            "{}: {}: {warning}",
            "warning".yellow().bold(),
            args.template.display()
        );
    }
    Ok(exitcode::OK)
}
