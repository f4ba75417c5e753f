//! Tests for template storage, default selection and the parse cache.

use std::sync::Arc;

use docmerge::context::{InvoiceDocument, StaticContextBuilder};
use docmerge::registry::{MemoryTemplateStore, RegistryError, TemplateCache, TemplateStore};
use docmerge::seed::seed_id;
use docmerge::{Engine, EngineError, Template, TemplateId, TemplateKind, Value};

fn template(id: u64, kind: TemplateKind, body: &str, is_default: bool) -> Template {
    Template::builder()
        .id(id)
        .kind(kind)
        .title(format!("Template {id}"))
        .body(body)
        .is_default(is_default)
        .build()
}

// =========================================================================
// Store
// =========================================================================

#[test]
fn at_most_one_default_per_kind() {
    let mut store = MemoryTemplateStore::new();
    store
        .insert(template(1, TemplateKind::Invoice, "one", true))
        .unwrap();
    store
        .insert(template(2, TemplateKind::Invoice, "two", true))
        .unwrap();
    store
        .insert(template(3, TemplateKind::Receipt, "three", true))
        .unwrap();

    let defaults: Vec<_> = store
        .templates_of(&TemplateKind::Invoice)
        .filter(|t| t.is_default)
        .map(|t| t.id)
        .collect();
    assert_eq!(defaults, vec![TemplateId::new(2)]);
    assert_eq!(
        store.default_template(&TemplateKind::Receipt).unwrap().body,
        "three"
    );
}

#[test]
fn set_default_moves_the_flag() {
    let mut store = MemoryTemplateStore::new();
    store
        .insert(template(1, TemplateKind::Proposal, "a", true))
        .unwrap();
    store
        .insert(template(2, TemplateKind::Proposal, "b", false))
        .unwrap();

    store.set_default(TemplateId::new(2)).unwrap();
    assert_eq!(
        store.default_template(&TemplateKind::Proposal).unwrap().id,
        TemplateId::new(2)
    );
    assert!(!store.get_template(TemplateId::new(1)).unwrap().is_default);
}

#[test]
fn set_default_on_unknown_id_fails() {
    let mut store = MemoryTemplateStore::new();
    assert!(matches!(
        store.set_default(TemplateId::new(9)),
        Err(RegistryError::NotFound { .. })
    ));
}

#[test]
fn invalid_templates_are_rejected() {
    let mut store = MemoryTemplateStore::new();
    let err = store
        .insert(template(1, TemplateKind::Invoice, "{{#each jobs}}", true))
        .unwrap_err();
    assert!(matches!(err, RegistryError::InvalidTemplate { .. }));
    assert!(store.is_empty());
}

#[test]
fn no_default_for_unseeded_kind() {
    let store = MemoryTemplateStore::with_seed_templates();
    assert!(
        store
            .default_template(&TemplateKind::from("work-order"))
            .is_none()
    );
}

#[test]
fn custom_kinds_round_trip_through_strings() {
    assert_eq!(TemplateKind::from("Invoice"), TemplateKind::Invoice);
    assert_eq!(
        TemplateKind::from("work-order"),
        TemplateKind::Other("work-order".into())
    );
    assert_eq!(TemplateKind::Other("work-order".into()).to_string(), "work-order");
}

#[test]
fn template_serializes_kind_as_type() {
    let json = serde_json::to_value(template(5, TemplateKind::Contract, "x", true)).unwrap();
    assert_eq!(json["type"], "contract");
    assert_eq!(json["isDefault"], true);
    assert_eq!(json["id"], 5);
}

// =========================================================================
// Cache
// =========================================================================

#[test]
fn cache_reuses_parse_until_body_changes() {
    let cache = TemplateCache::new();
    let mut t = template(1, TemplateKind::Invoice, "{{a}}", false);
    let first = cache.get_or_parse(&t).unwrap();
    assert!(Arc::ptr_eq(&first, &cache.get_or_parse(&t).unwrap()));

    t.body = "{{b}}".into();
    let second = cache.get_or_parse(&t).unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);
}

#[test]
fn invalid_bodies_are_not_cached() {
    let cache = TemplateCache::new();
    let t = template(1, TemplateKind::Invoice, "{{/each}}", false);
    assert!(cache.get_or_parse(&t).is_err());
    assert!(cache.is_empty());
}

#[test]
fn clear_empties_the_cache() {
    let cache = TemplateCache::new();
    cache
        .get_or_parse(&template(1, TemplateKind::Invoice, "a", false))
        .unwrap();
    cache
        .get_or_parse(&template(2, TemplateKind::Receipt, "b", false))
        .unwrap();
    assert_eq!(cache.len(), 2);

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn invalidate_drops_entry() {
    let engine = Engine::new();
    let t = template(3, TemplateKind::Receipt, "ok", false);
    engine.render(&t, &Value::map()).unwrap();
    assert!(engine.invalidate(t.id));
    assert!(!engine.invalidate(t.id));
    assert!(engine.cache().is_empty());
}

// =========================================================================
// Engine lookups
// =========================================================================

#[test]
fn render_default_uses_the_marked_template() {
    let mut store = MemoryTemplateStore::new();
    store
        .insert(template(1, TemplateKind::Receipt, "old {{x}}", true))
        .unwrap();
    store
        .insert(template(2, TemplateKind::Receipt, "new {{x}}", true))
        .unwrap();

    let result = Engine::new()
        .render_default(&store, &TemplateKind::Receipt, &Value::map().with("x", 1))
        .unwrap();
    assert_eq!(result.output, "new 1");
}

#[test]
fn render_default_without_default_fails() {
    let store = MemoryTemplateStore::new();
    let err = Engine::new()
        .render_default(&store, &TemplateKind::Estimate, &Value::map())
        .unwrap_err();
    assert!(matches!(err, EngineError::NoDefaultTemplate { .. }));
    assert_eq!(err.to_string(), "no default estimate template");
}

#[test]
fn render_by_id_reports_unknown_ids() {
    let store = MemoryTemplateStore::with_seed_templates();
    let engine = Engine::new();
    assert!(matches!(
        engine.render_by_id(&store, TemplateId::new(42), &Value::map()),
        Err(EngineError::TemplateNotFound { .. })
    ));
    assert!(
        engine
            .render_by_id(&store, seed_id(&TemplateKind::Receipt), &Value::map())
            .is_ok()
    );
}

#[test]
fn render_invoice_builds_context_first() {
    let document = InvoiceDocument::from_json(
        r#"{
            "invoice": { "invoiceNumber": "INV-1", "issueDate": "2024-03-05", "totalAmount": 80 },
            "customer": { "name": "Ann" }
        }"#,
    )
    .unwrap();
    let contexts: StaticContextBuilder = [document].into_iter().collect();
    let mut store = MemoryTemplateStore::new();
    store
        .insert(template(
            1,
            TemplateKind::Receipt,
            "{{customer.name}} paid {{totalAmount}}",
            true,
        ))
        .unwrap();

    let engine = Engine::new();
    let result = engine
        .render_invoice(&store, &contexts, &TemplateKind::Receipt, "INV-1")
        .unwrap();
    assert_eq!(result.output, "Ann paid 80.00");

    let err = engine
        .render_invoice(&store, &contexts, &TemplateKind::Receipt, "INV-2")
        .unwrap_err();
    assert_eq!(err.to_string(), "invoice 'INV-2' not found");
}
