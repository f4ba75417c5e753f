//! Render entry points.

use bon::Builder;
use log::debug;
use thiserror::Error;

use crate::context::{ContextBuilder, ContextError};
use crate::interpreter::{RenderResult, render};
use crate::options::RenderOptions;
use crate::parser::{ParseError, parse_template};
use crate::registry::{TemplateCache, TemplateStore};
use crate::types::{Template, TemplateId, TemplateKind, Value};

/// Errors from the engine's store-backed entry points.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("no default {kind} template")]
    NoDefaultTemplate { kind: TemplateKind },

    #[error("template {id} not found")]
    TemplateNotFound { id: TemplateId },

    #[error(transparent)]
    Context(#[from] ContextError),
}

/// Renders templates with shared options and a parsed-template cache.
///
/// `Engine` is `Send + Sync`; one instance can serve concurrent renders.
///
/// # Example
///
/// ```
/// use docmerge::{Engine, RenderOptions, Template, TemplateKind, Value};
///
/// let engine = Engine::builder()
///     .options(RenderOptions::builder().currency_symbol("$").build())
///     .build();
/// let template = Template::builder()
///     .id(1_u64)
///     .kind(TemplateKind::Receipt)
///     .body("Received {{totalAmount}} from {{customer.name}}")
///     .build();
/// let context = Value::map()
///     .with("totalAmount", 120)
///     .with("customer", Value::map().with("name", "Ann & Bo"));
///
/// let result = engine.render(&template, &context).unwrap();
/// assert_eq!(result.output, "Received $120.00 from Ann &amp; Bo");
/// ```
#[derive(Debug, Default, Builder)]
pub struct Engine {
    #[builder(default)]
    options: RenderOptions,

    #[builder(skip)]
    cache: TemplateCache,
}

impl Engine {
    /// Create an engine with default options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn cache(&self) -> &TemplateCache {
        &self.cache
    }

    /// Renders a stored template, reusing its cached parse while the body is
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the body is structurally invalid. Missing
    /// data never fails a render; see [`RenderResult::warnings`].
    pub fn render(&self, template: &Template, context: &Value) -> Result<RenderResult, ParseError> {
        let parsed = self.cache.get_or_parse(template)?;
        debug!("rendering {} template {}", template.kind, template.id);
        Ok(render(&parsed, context, &self.options))
    }

    /// Renders an ad-hoc body without caching it.
    pub fn render_str(&self, body: &str, context: &Value) -> Result<RenderResult, ParseError> {
        let parsed = parse_template(body)?;
        Ok(render(&parsed, context, &self.options))
    }

    /// Renders the store's template with the given id.
    pub fn render_by_id(
        &self,
        store: &dyn TemplateStore,
        id: TemplateId,
        context: &Value,
    ) -> Result<RenderResult, EngineError> {
        let template = store
            .get_template(id)
            .ok_or(EngineError::TemplateNotFound { id })?;
        Ok(self.render(&template, context)?)
    }

    /// Renders the store's default template for `kind`.
    pub fn render_default(
        &self,
        store: &dyn TemplateStore,
        kind: &TemplateKind,
        context: &Value,
    ) -> Result<RenderResult, EngineError> {
        let template = store
            .default_template(kind)
            .ok_or_else(|| EngineError::NoDefaultTemplate { kind: kind.clone() })?;
        Ok(self.render(&template, context)?)
    }

    /// Builds the context for an invoice and renders the default template of
    /// `kind` against it. This is what a PDF export calls.
    pub fn render_invoice(
        &self,
        store: &dyn TemplateStore,
        contexts: &dyn ContextBuilder,
        kind: &TemplateKind,
        invoice_id: &str,
    ) -> Result<RenderResult, EngineError> {
        let context = contexts.build_invoice_context(invoice_id)?;
        self.render_default(store, kind, &context)
    }

    /// Drops the cached parse of a template, e.g. after it was deleted.
    pub fn invalidate(&self, id: TemplateId) -> bool {
        self.cache.invalidate(id)
    }
}

/// Renders a template with default options and no caching.
///
/// ```
/// use docmerge::{Template, Value, render_template};
///
/// let template = Template::builder().id(1_u64).kind("invoice").body("{{missing}}!").build();
/// let result = render_template(&template, &Value::map()).unwrap();
/// assert_eq!(result.output, "!");
/// assert_eq!(result.warnings.len(), 1);
/// ```
pub fn render_template(template: &Template, context: &Value) -> Result<RenderResult, ParseError> {
    let parsed = parse_template(&template.body)?;
    Ok(render(&parsed, context, &RenderOptions::default()))
}
