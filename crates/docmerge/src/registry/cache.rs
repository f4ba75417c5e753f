//! Shared cache of parsed templates.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use log::debug;

use crate::parser::{ParseError, ParsedTemplate, parse_template};
use crate::types::{BodyHash, Template, TemplateId};

/// Parsed templates keyed by template id and body hash.
///
/// Entries are immutable once stored. Editing a template changes its body
/// hash; the next lookup misses, reparses and replaces the whole entry. Reads
/// from concurrent renders only take the read lock.
///
/// ```
/// use docmerge::registry::TemplateCache;
/// use docmerge::Template;
///
/// let cache = TemplateCache::new();
/// let mut template = Template::builder().id(1_u64).kind("invoice").body("{{a}}").build();
/// let first = cache.get_or_parse(&template).unwrap();
/// assert!(std::sync::Arc::ptr_eq(&first, &cache.get_or_parse(&template).unwrap()));
///
/// template.body = "{{b}}".to_string();
/// let edited = cache.get_or_parse(&template).unwrap();
/// assert!(!std::sync::Arc::ptr_eq(&first, &edited));
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct TemplateCache {
    entries: RwLock<HashMap<TemplateId, CacheEntry>>,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    hash: BodyHash,
    parsed: Arc<ParsedTemplate>,
}

impl TemplateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the parsed form of `template`, parsing and caching it on a miss.
    ///
    /// # Errors
    ///
    /// Returns the [`ParseError`] of an invalid body. Invalid bodies are not
    /// cached.
    pub fn get_or_parse(&self, template: &Template) -> Result<Arc<ParsedTemplate>, ParseError> {
        let hash = BodyHash::of(&template.body);
        if let Some(parsed) = self.lookup(template.id, hash) {
            return Ok(parsed);
        }

        debug!("parsing template {} (cache miss)", template.id);
        let parsed = Arc::new(parse_template(&template.body)?);
        let entry = CacheEntry {
            hash,
            parsed: Arc::clone(&parsed),
        };
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(template.id, entry);
        Ok(parsed)
    }

    /// Returns the cached parse of a template if its body hash still matches.
    pub fn lookup(&self, id: TemplateId, hash: BodyHash) -> Option<Arc<ParsedTemplate>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .filter(|entry| entry.hash == hash)
            .map(|entry| Arc::clone(&entry.parsed))
    }

    /// Drops the entry for a template. Returns true if one was cached.
    pub fn invalidate(&self, id: TemplateId) -> bool {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .is_some()
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
