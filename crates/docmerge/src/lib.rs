//! Document template merge engine.
//!
//! Renders business document templates (invoices, proposals, contracts,
//! estimates, receipts) written as HTML with `{{path}}` placeholders and
//! `{{#each collection}} ... {{/each}}` loops against an invoice context.
//!
//! ```
//! use docmerge::{Value, parser::parse_template, interpreter::render, RenderOptions};
//!
//! let parsed = parse_template(
//!     "{{customer.name}}{{#each projects}}<p>{{project.name}}</p>{{/each}}",
//! ).unwrap();
//! let context = Value::map()
//!     .with("customer", Value::map().with("name", "Ann"))
//!     .with("projects", vec![Value::map().with("name", "Kitchen")]);
//!
//! let result = render(&parsed, &context, &RenderOptions::default());
//! assert_eq!(result.output, "Ann<p>Kitchen</p>");
//! ```

pub mod context;
mod engine;
pub mod formatter;
pub mod interpreter;
pub mod options;
pub mod outline;
pub mod parser;
pub mod registry;
pub mod seed;
pub mod types;
pub mod warning;

pub use engine::{Engine, EngineError, render_template};
pub use formatter::FormatHint;
pub use interpreter::RenderResult;
pub use options::RenderOptions;
pub use parser::{ParseError, ParsedTemplate};
pub use types::{BodyHash, Template, TemplateId, TemplateKind, Value};
pub use warning::{RenderWarning, compute_suggestions};
