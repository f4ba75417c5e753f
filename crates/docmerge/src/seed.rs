//! Built-in default templates, one per document kind.
//!
//! Every body only references paths that [`InvoiceDocument::to_context`]
//! always produces, so rendering a seed never warns.
//!
//! [`InvoiceDocument::to_context`]: crate::context::InvoiceDocument::to_context

use crate::types::{Template, TemplateId, TemplateKind};

const INVOICE: &str = r#"<div class="document invoice">
  <header>
    <h1>{{business.name}}</h1>
    <p>{{business.address}}<br>{{business.phone}} &middot; {{business.email}}</p>
  </header>
  <section class="meta">
    <h2>Invoice {{invoice.invoiceNumber}}</h2>
    <p>Issued: {{invoice.issueDate}}<br>Due: {{invoice.dueDate}}</p>
  </section>
  <section class="bill-to">
    <h3>Bill to</h3>
    <p>{{customer.name}}<br>{{customer.address}}<br>{{customer.email}}</p>
  </section>
  <table class="items">
    <thead><tr><th>Description</th><th>Amount</th></tr></thead>
    <tbody>
    {{#each projects}}
      <tr class="project"><td colspan="2"><strong>{{project.name}}</strong></td></tr>
      {{#each jobs}}
      <tr><td>{{job.title}}</td><td>{{job.price}}</td></tr>
      {{/each}}
    {{/each}}
    </tbody>
  </table>
  <section class="totals">
    <p>Subtotal: {{invoice.subtotalAmount}}</p>
    <p>Tax: {{invoice.taxAmount}}</p>
    <p><strong>Total: {{invoice.totalAmount}}</strong></p>
  </section>
  <footer><p>{{invoice.notes}}</p></footer>
</div>
"#;

const PROPOSAL: &str = r#"<div class="document proposal">
  <h1>Proposal for {{customer.name}}</h1>
  <p>Prepared by {{business.name}} on {{issueDate}}.</p>
  {{#each projects}}
  <section class="project">
    <h2>{{project.name}}</h2>
    <p>{{project.description}}</p>
    <p>Proposed start: {{project.startDate}} &middot; Budget: {{project.budget}}</p>
    <ul>
      {{#each jobs}}
      <li>{{job.title}}: {{job.description}} ({{job.price}})</li>
      {{/each}}
    </ul>
  </section>
  {{/each}}
  <p>Proposal total: {{totalAmount}}</p>
</div>
"#;

const CONTRACT: &str = r#"<div class="document contract">
  <h1>Service Agreement</h1>
  <p>This agreement is made on {{issueDate}} between {{business.name}} ("the Contractor")
  and {{customer.name}} of {{customer.address}} ("the Client").</p>
  <h2>Scope of work</h2>
  <ol>
    {{#each projects}}
    <li>{{project.name}}, from {{project.startDate}} to {{project.endDate}}:
      <ul>
        {{#each jobs}}
        <li>{{job.title}} for {{job.price}}</li>
        {{/each}}
      </ul>
    </li>
    {{/each}}
  </ol>
  <p>The Client agrees to pay {{totalAmount}} by {{dueDate}}.</p>
  <p>Signed: ____________________ ({{business.name}})</p>
  <p>Signed: ____________________ ({{customer.name}})</p>
</div>
"#;

const ESTIMATE: &str = r#"<div class="document estimate">
  <h1>Estimate {{invoiceNumber}}</h1>
  <p>For {{customer.name}}, valid until {{dueDate}}.</p>
  {{#each projects}}
  <h2>{{project.name}}</h2>
  <table>
    {{#each jobs}}
    <tr><td>{{job.title}}</td><td>{{job.price}}</td></tr>
    {{/each}}
    <tr class="subtotal"><td>Project total</td><td>{{project.jobsTotal}}</td></tr>
  </table>
  {{/each}}
  <p>Estimated total: {{totalAmount}}</p>
</div>
"#;

const RECEIPT: &str = r#"<div class="document receipt">
  <h1>Receipt</h1>
  <p>{{business.name}} received {{totalAmount}} from {{customer.name}}
  for invoice {{invoiceNumber}} issued {{issueDate}}.</p>
  <p>Status: {{status}}</p>
</div>
"#;

/// The built-in body for a kind, or `None` for kinds without one.
pub fn seed_body(kind: &TemplateKind) -> Option<&'static str> {
    match kind {
        TemplateKind::Invoice => Some(INVOICE),
        TemplateKind::Proposal => Some(PROPOSAL),
        TemplateKind::Contract => Some(CONTRACT),
        TemplateKind::Estimate => Some(ESTIMATE),
        TemplateKind::Receipt => Some(RECEIPT),
        TemplateKind::Other(_) => None,
    }
}

/// The built-in template for a kind, marked as default.
pub fn seed_template(kind: &TemplateKind) -> Option<Template> {
    let body = seed_body(kind)?;
    Some(
        Template::builder()
            .id(seed_id(kind))
            .kind(kind.clone())
            .title(format!("Standard {kind}"))
            .body(body)
            .is_default(true)
            .build(),
    )
}

/// All built-in templates.
pub fn seed_templates() -> Vec<Template> {
    TemplateKind::BUILT_IN
        .iter()
        .filter_map(seed_template)
        .collect()
}

/// Stable id of the built-in template for a kind.
pub fn seed_id(kind: &TemplateKind) -> TemplateId {
    TemplateId::from_name(&format!("seed.{kind}"))
}
