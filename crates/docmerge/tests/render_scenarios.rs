//! End-to-end rendering tests: context resolution, loops, formatting and
//! warnings.

use std::thread;

use chrono::NaiveDate;
use docmerge::interpreter::render;
use docmerge::parser::parse_template;
use docmerge::{Engine, RenderOptions, RenderWarning, Template, TemplateKind, Value};

const INVOICE_BODY: &str = "{{customer.name}}{{#each projects}}<p>{{project.name}}</p>{{#each jobs}}<li>{{job.title}}: {{job.price}}</li>{{/each}}{{/each}}";

fn render_str(body: &str, context: &Value) -> docmerge::RenderResult {
    render_with(body, context, &RenderOptions::default())
}

fn render_with(body: &str, context: &Value, options: &RenderOptions) -> docmerge::RenderResult {
    let parsed = parse_template(body).unwrap();
    render(&parsed, context, options)
}

fn job(title: &str, price: f64) -> Value {
    Value::map().with("title", title).with("price", price)
}

fn kitchen_context() -> Value {
    Value::map()
        .with("customer", Value::map().with("name", "Ann"))
        .with(
            "projects",
            vec![Value::map()
                .with("name", "Kitchen")
                .with("jobs", vec![job("Tiling", 500.0)])],
        )
}

// =========================================================================
// Basic merging
// =========================================================================

#[test]
fn renders_nested_invoice() {
    let result = render_str(INVOICE_BODY, &kitchen_context());
    insta::assert_snapshot!(result.output, @"Ann<p>Kitchen</p><li>Tiling: 500.00</li>");
    assert!(result.warnings.is_empty());
}

#[test]
fn empty_collection_renders_nothing_without_warning() {
    let context = Value::map()
        .with("customer", Value::map().with("name", "Ann"))
        .with("projects", Value::List(Vec::new()));
    let result = render_str(INVOICE_BODY, &context);
    assert_eq!(result.output, "Ann");
    assert!(result.warnings.is_empty());
}

#[test]
fn missing_collection_warns_and_skips_loop() {
    let context = Value::map().with("customer", Value::map().with("name", "Ann"));
    let result = render_str(INVOICE_BODY, &context);
    assert_eq!(result.output, "Ann");
    assert_eq!(
        result.warnings,
        vec![RenderWarning::MissingCollection {
            collection: "projects".into(),
            line: 1,
            column: 18,
            scope: Vec::new(),
        }]
    );
}

#[test]
fn text_only_template_renders_verbatim() {
    let body = "<style>p { margin: 0 }</style><p>Thanks!</p>";
    let result = render_str(body, &Value::map());
    assert_eq!(result.output, body);
    assert!(result.warnings.is_empty());
}

#[test]
fn loops_repeat_once_per_item_in_order() {
    let context = Value::map().with(
        "jobs",
        vec![job("Demo", 100.0), job("Tiling", 500.0), job("Grout", 42.5)],
    );
    let result = render_str("{{#each jobs}}[{{job.title}}]{{/each}}", &context);
    assert_eq!(result.output, "[Demo][Tiling][Grout]");
}

#[test]
fn standalone_loop_lines_leave_no_blank_lines() {
    let context = Value::map().with("jobs", vec![job("A", 1.0), job("B", 2.0)]);
    let body = "<ul>\n  {{#each jobs}}\n  <li>{{job.title}}</li>\n  {{/each}}\n</ul>";
    let result = render_str(body, &context);
    assert_eq!(result.output, "<ul>\n  <li>A</li>\n  <li>B</li>\n</ul>");
}

// =========================================================================
// Scoping
// =========================================================================

#[test]
fn item_fields_resolve_without_alias() {
    let result = render_str("{{#each jobs}}{{title}};{{/each}}", &kitchen_jobs());
    assert_eq!(result.output, "Tiling;Grout;");
}

#[test]
fn inner_scope_shadows_root() {
    let context = Value::map()
        .with("name", "Root")
        .with("projects", vec![Value::map().with("name", "Kitchen")]);
    let result = render_str("{{#each projects}}{{name}}/{{/each}}{{name}}", &context);
    assert_eq!(result.output, "Kitchen/Root");
}

#[test]
fn outer_names_stay_visible_inside_loops() {
    let context = Value::map()
        .with("invoice", Value::map().with("invoiceNumber", "INV-9"))
        .with(
            "projects",
            vec![Value::map()
                .with("name", "Bath")
                .with("jobs", vec![job("Tiling", 1.0)])],
        );
    let body = "{{#each projects}}{{#each jobs}}{{invoice.invoiceNumber}}/{{project.name}}/{{job.title}}{{/each}}{{/each}}";
    let result = render_str(body, &context);
    assert_eq!(result.output, "INV-9/Bath/Tiling");
    assert!(result.warnings.is_empty());
}

#[test]
fn alias_scope_ends_with_its_loop() {
    let result = render_str("{{#each jobs}}{{/each}}{{job.title}}", &kitchen_jobs());
    assert_eq!(result.output, "");
    assert!(matches!(
        &result.warnings[..],
        [RenderWarning::UnresolvedVariable { path, scope, .. }] if path == "job.title" && scope.is_empty()
    ));
}

#[test]
fn dotted_collection_paths_use_last_segment_for_alias() {
    let context = Value::map().with(
        "invoice",
        Value::map().with("materials", vec![Value::map().with("name", "Grout")]),
    );
    let result = render_str(
        "{{#each invoice.materials}}{{material.name}}{{/each}}",
        &context,
    );
    assert_eq!(result.output, "Grout");
}

#[test]
fn alias_override_from_options() {
    let options = RenderOptions::default().with_alias("staff", "member");
    let context = Value::map().with("staff", vec![Value::map().with("name", "Bo")]);
    let result = render_with("{{#each staff}}{{member.name}}{{/each}}", &context, &options);
    assert_eq!(result.output, "Bo");
}

#[test]
fn list_items_are_addressable_by_index() {
    let result = render_str("{{jobs.1.title}}", &kitchen_jobs());
    assert_eq!(result.output, "Grout");
}

fn kitchen_jobs() -> Value {
    Value::map().with("jobs", vec![job("Tiling", 500.0), job("Grout", 42.5)])
}

// =========================================================================
// Formatting and escaping
// =========================================================================

#[test]
fn values_are_html_escaped() {
    let context = Value::map().with(
        "customer",
        Value::map().with("name", "<script>alert(1)</script>"),
    );
    let result = render_str("<b>{{customer.name}}</b>", &context);
    assert_eq!(result.output, "<b>&lt;script&gt;alert(1)&lt;/script&gt;</b>");
}

#[test]
fn currency_hint_applies_to_amount_names() {
    let options = RenderOptions::builder().currency_symbol("$").build();
    let context = Value::map()
        .with("totalAmount", 1234.5)
        .with("taxAmount", -5)
        .with("budget", "99.999")
        .with("quantity", 3);
    let result = render_with(
        "{{totalAmount}}|{{taxAmount}}|{{budget}}|{{quantity}}",
        &context,
        &options,
    );
    assert_eq!(result.output, "$1234.50|-$5.00|$100.00|3");
}

#[test]
fn dates_use_configured_format() {
    let options = RenderOptions::builder().date_format("%d/%m/%Y").build();
    let context = Value::map()
        .with("issueDate", NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())
        .with("dueDate", "2024-04-04T12:00:00Z")
        .with("note", "2024-01-01");
    let result = render_with("{{issueDate}} {{dueDate}} {{note}}", &context, &options);
    assert_eq!(result.output, "05/03/2024 04/04/2024 2024-01-01");
}

#[test]
fn null_renders_empty_without_warning() {
    let context = Value::map().with("customer", Value::map().with("email", Value::Null));
    let result = render_str("[{{customer.email}}]", &context);
    assert_eq!(result.output, "[]");
    assert!(result.warnings.is_empty());
}

#[test]
fn lists_render_joined() {
    let context = Value::map().with("tags", vec!["urgent", "kitchen"]);
    let result = render_str("{{tags}}", &context);
    assert_eq!(result.output, "urgent, kitchen");
}

// =========================================================================
// Warnings
// =========================================================================

#[test]
fn unresolved_variable_warns_once_with_suggestions() {
    let body = "{{#each jobs}}<li>{{job.titel}}</li>{{/each}}";
    let result = render_str(body, &kitchen_jobs());
    assert_eq!(result.output, "<li></li><li></li>");
    assert_eq!(
        result.warnings,
        vec![RenderWarning::UnresolvedVariable {
            path: "job.titel".into(),
            line: 1,
            column: 19,
            scope: vec!["jobs".into()],
            suggestions: vec!["job.title".into()],
        }]
    );
    insta::assert_snapshot!(
        result.warnings[0].to_string(),
        @"1:19: unresolved variable 'job.titel' (inside jobs); did you mean: job.title?"
    );
}

#[test]
fn map_values_render_empty_with_warning() {
    let result = render_str("{{customer}}", &kitchen_context());
    assert_eq!(result.output, "");
    assert_eq!(
        result.warnings,
        vec![RenderWarning::NonScalarValue {
            path: "customer".into(),
            line: 1,
            column: 1,
        }]
    );
}

#[test]
fn looping_over_a_scalar_warns() {
    let result = render_str("{{#each customer.name}}x{{/each}}", &kitchen_context());
    assert_eq!(result.output, "");
    assert!(matches!(
        &result.warnings[..],
        [RenderWarning::NotACollection { found, .. }] if found == "string"
    ));
}

#[test]
fn malformed_directives_render_literally() {
    let result = render_str("{{customer.name}} {{ oops! }}", &kitchen_context());
    assert_eq!(result.output, "Ann {{ oops! }}");
    assert_eq!(result.warnings.len(), 1);
}

#[test]
fn warnings_serialize_with_kind_tag() {
    let result = render_str("{{missing}}", &Value::map());
    let json = serde_json::to_value(&result.warnings).unwrap();
    assert_eq!(json[0]["kind"], "unresolved_variable");
    assert_eq!(json[0]["path"], "missing");
}

// =========================================================================
// Engine
// =========================================================================

#[test]
fn rendering_is_idempotent() {
    let engine = Engine::new();
    let template = Template::builder()
        .id(7_u64)
        .kind(TemplateKind::Invoice)
        .body(INVOICE_BODY)
        .build();
    let context = kitchen_context();
    let first = engine.render(&template, &context).unwrap();
    let second = engine.render(&template, &context).unwrap();
    assert_eq!(first, second);
    assert_eq!(engine.cache().len(), 1);
}

#[test]
fn engine_rejects_invalid_templates() {
    let engine = Engine::new();
    assert!(engine.render_str("{{#each jobs}}", &Value::map()).is_err());
}

#[test]
fn engine_is_shareable_across_threads() {
    let engine = Engine::new();
    let template = Template::builder()
        .id(1_u64)
        .kind("invoice")
        .body(INVOICE_BODY)
        .build();
    let context = kitchen_context();
    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let result = engine.render(&template, &context).unwrap();
                assert_eq!(result.output, "Ann<p>Kitchen</p><li>Tiling: 500.00</li>");
            });
        }
    });
}
