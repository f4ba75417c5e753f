//! Template storage.

use indexmap::IndexMap;
use log::debug;

use crate::parser::parse_template;
use crate::registry::RegistryError;
use crate::seed::seed_templates;
use crate::types::{Template, TemplateId, TemplateKind};

/// Read access to stored templates.
///
/// Persistence layers implement this; the engine only ever reads template
/// bodies through it.
pub trait TemplateStore {
    /// Get a template by id.
    fn get_template(&self, id: TemplateId) -> Option<Template>;

    /// Get the default template for a kind, if one is marked.
    fn default_template(&self, kind: &TemplateKind) -> Option<Template>;
}

/// An in-memory template store.
///
/// Keeps at most one default template per kind: storing or promoting a
/// default clears the flag on the previous default of the same kind.
/// Templates that fail to parse are rejected.
///
/// # Example
///
/// ```
/// use docmerge::registry::{MemoryTemplateStore, TemplateStore};
/// use docmerge::{Template, TemplateKind};
///
/// let mut store = MemoryTemplateStore::new();
/// store
///     .insert(
///         Template::builder()
///             .id(1_u64)
///             .kind(TemplateKind::Receipt)
///             .body("Paid: {{totalAmount}}")
///             .is_default(true)
///             .build(),
///     )
///     .unwrap();
///
/// let default = store.default_template(&TemplateKind::Receipt).unwrap();
/// assert_eq!(default.body, "Paid: {{totalAmount}}");
/// assert!(store.insert(Template::builder().id(2_u64).kind("receipt").body("{{/each}}").build()).is_err());
/// ```
#[derive(Debug, Default)]
pub struct MemoryTemplateStore {
    templates: IndexMap<TemplateId, Template>,
}

impl MemoryTemplateStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the built-in template for every kind, each marked
    /// as its kind's default.
    pub fn with_seed_templates() -> Self {
        let templates = seed_templates()
            .into_iter()
            .map(|template| (template.id, template))
            .collect();
        Self { templates }
    }

    /// Stores a template, replacing any template with the same id.
    ///
    /// Returns the replaced template, if any.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidTemplate`] if the body does not parse.
    pub fn insert(&mut self, template: Template) -> Result<Option<Template>, RegistryError> {
        parse_template(&template.body).map_err(|source| RegistryError::InvalidTemplate {
            id: template.id,
            source,
        })?;
        if template.is_default {
            self.clear_default(&template.kind);
        }
        debug!(
            "storing {} template {} (default: {})",
            template.kind, template.id, template.is_default
        );
        Ok(self.templates.insert(template.id, template))
    }

    /// Removes a template.
    pub fn remove(&mut self, id: TemplateId) -> Option<Template> {
        self.templates.shift_remove(&id)
    }

    /// Marks a stored template as the default for its kind.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if no template has this id.
    pub fn set_default(&mut self, id: TemplateId) -> Result<(), RegistryError> {
        let kind = self
            .templates
            .get(&id)
            .map(|template| template.kind.clone())
            .ok_or(RegistryError::NotFound { id })?;
        self.clear_default(&kind);
        if let Some(template) = self.templates.get_mut(&id) {
            template.is_default = true;
        }
        Ok(())
    }

    /// All stored templates of a kind, in insertion order.
    pub fn templates_of<'a>(&'a self, kind: &'a TemplateKind) -> impl Iterator<Item = &'a Template> {
        self.templates
            .values()
            .filter(move |template| &template.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    fn clear_default(&mut self, kind: &TemplateKind) {
        for template in self.templates.values_mut() {
            if &template.kind == kind {
                template.is_default = false;
            }
        }
    }
}

impl TemplateStore for MemoryTemplateStore {
    fn get_template(&self, id: TemplateId) -> Option<Template> {
        self.templates.get(&id).cloned()
    }

    fn default_template(&self, kind: &TemplateKind) -> Option<Template> {
        self.templates_of(kind)
            .find(|template| template.is_default)
            .cloned()
    }
}
