//! docmerge CLI entry point.
//!
//! Command-line tools for document templates:
//! - `docmerge render` - Merge a template with a JSON context
//! - `docmerge check` - Validate template syntax
//! - `docmerge vars` - List the directives a template uses

mod commands;
mod logger;
mod output;

use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{run_check, run_render, run_vars, CheckArgs, RenderArgs, VarsArgs};

/// Document template tools.
#[derive(Debug, Parser)]
#[command(name = "docmerge")]
#[command(about = "Document template merge tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    pub color: ColorWhen,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render a template against a JSON context
    Render(RenderArgs),
    /// Check template syntax
    Check(CheckArgs),
    /// List the variables and loops a template uses
    Vars(VarsArgs),
}

fn setup_colors(color_when: ColorWhen) {
    match color_when {
        // owo-colors checks TTY, NO_COLOR and FORCE_COLOR itself
        ColorWhen::Auto => {}
        ColorWhen::Always => owo_colors::set_override(true),
        ColorWhen::Never => owo_colors::set_override(false),
    }
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_colors(cli.color);
    logger::init_logger(cli.verbose);

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let result = match cli.command {
        Commands::Render(args) => run_render(args),
        Commands::Check(args) => run_check(args),
        Commands::Vars(args) => run_vars(args),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{e:?}");
            exit(exitcode::SOFTWARE);
        }
    }
}
