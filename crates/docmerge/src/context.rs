//! Invoice context model and context builders.
//!
//! The persistence layer assembles an [`InvoiceDocument`] (invoice, customer,
//! the issuing business, projects and their jobs); [`InvoiceDocument::to_context`]
//! turns it into the [`Value`] tree templates are rendered against.
//!
//! Context shape (keys are camelCase, absent optional fields are `Null` so
//! they render empty without warnings):
//!
//! ```text
//! invoiceNumber, issueDate, dueDate, status,
//! subtotalAmount, taxAmount, totalAmount, notes      (invoice scalars, flat)
//! invoice    { the same invoice scalars }
//! customer   { name, email, phone, address }
//! business   { name, email, phone, address }
//! projects   [ { name, description, status, budget, startDate, endDate,
//!                jobsTotal, jobs [ { title, description, price, status,
//!                                    scheduledDate } ] } ]
//! ```

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Value;

/// Errors from building a render context.
#[derive(Debug, Error)]
pub enum ContextError {
    /// No invoice with this id is known to the builder.
    #[error("invoice '{invoice_id}' not found")]
    NotFound { invoice_id: String },

    /// An invoice document could not be deserialized.
    #[error("invalid invoice document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Assembles render contexts from the data layer.
pub trait ContextBuilder {
    /// Builds the context for one invoice.
    fn build_invoice_context(&self, invoice_id: &str) -> Result<Value, ContextError>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// The business issuing the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub scheduled_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub jobs: Vec<Job>,
}

impl Project {
    /// Sum of this project's job prices.
    pub fn jobs_total(&self) -> f64 {
        self.jobs.iter().map(|job| job.price).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub invoice_number: String,
    pub issue_date: NaiveDate,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub subtotal_amount: f64,
    #[serde(default)]
    pub tax_amount: f64,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Everything a document template can reference for one invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDocument {
    pub invoice: Invoice,
    pub customer: Customer,
    #[serde(default)]
    pub business: Business,
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl InvoiceDocument {
    /// Parses a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, ContextError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds the render context.
    ///
    /// ```
    /// use docmerge::context::InvoiceDocument;
    ///
    /// let document = InvoiceDocument::from_json(r#"{
    ///     "invoice": { "invoiceNumber": "INV-7", "issueDate": "2024-03-05", "totalAmount": 500 },
    ///     "customer": { "name": "Ann" }
    /// }"#).unwrap();
    /// let context = document.to_context();
    /// assert_eq!(context.lookup(&["invoiceNumber"]), context.lookup(&["invoice", "invoiceNumber"]));
    /// assert_eq!(context.lookup(&["customer", "email"]), Some(&docmerge::Value::Null));
    /// ```
    pub fn to_context(&self) -> Value {
        let invoice = Value::from(&self.invoice);
        invoice
            .clone()
            .with("invoice", invoice)
            .with("customer", Value::from(&self.customer))
            .with("business", Value::from(&self.business))
            .with(
                "projects",
                Value::List(self.projects.iter().map(Value::from).collect()),
            )
    }
}

impl From<&Invoice> for Value {
    fn from(invoice: &Invoice) -> Self {
        Value::map()
            .with("invoiceNumber", invoice.invoice_number.as_str())
            .with("issueDate", invoice.issue_date)
            .with("dueDate", invoice.due_date)
            .with("status", invoice.status.clone())
            .with("subtotalAmount", invoice.subtotal_amount)
            .with("taxAmount", invoice.tax_amount)
            .with("totalAmount", invoice.total_amount)
            .with("notes", invoice.notes.clone())
    }
}

impl From<&Customer> for Value {
    fn from(customer: &Customer) -> Self {
        Value::map()
            .with("name", customer.name.as_str())
            .with("email", customer.email.clone())
            .with("phone", customer.phone.clone())
            .with("address", customer.address.clone())
    }
}

impl From<&Business> for Value {
    fn from(business: &Business) -> Self {
        Value::map()
            .with("name", business.name.as_str())
            .with("email", business.email.clone())
            .with("phone", business.phone.clone())
            .with("address", business.address.clone())
    }
}

impl From<&Project> for Value {
    fn from(project: &Project) -> Self {
        Value::map()
            .with("name", project.name.as_str())
            .with("description", project.description.clone())
            .with("status", project.status.clone())
            .with("budget", project.budget)
            .with("startDate", project.start_date)
            .with("endDate", project.end_date)
            .with("jobsTotal", project.jobs_total())
            .with(
                "jobs",
                Value::List(project.jobs.iter().map(Value::from).collect()),
            )
    }
}

impl From<&Job> for Value {
    fn from(job: &Job) -> Self {
        Value::map()
            .with("title", job.title.as_str())
            .with("description", job.description.clone())
            .with("price", job.price)
            .with("status", job.status.clone())
            .with("scheduledDate", job.scheduled_date)
    }
}

/// A [`ContextBuilder`] over documents already in memory, keyed by invoice
/// number.
#[derive(Debug, Clone, Default)]
pub struct StaticContextBuilder {
    documents: HashMap<String, InvoiceDocument>,
}

impl StaticContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document under its invoice number, replacing any previous one.
    pub fn insert(&mut self, document: InvoiceDocument) {
        self.documents
            .insert(document.invoice.invoice_number.clone(), document);
    }
}

impl FromIterator<InvoiceDocument> for StaticContextBuilder {
    fn from_iter<I: IntoIterator<Item = InvoiceDocument>>(iter: I) -> Self {
        let mut builder = StaticContextBuilder::new();
        for document in iter {
            builder.insert(document);
        }
        builder
    }
}

impl ContextBuilder for StaticContextBuilder {
    fn build_invoice_context(&self, invoice_id: &str) -> Result<Value, ContextError> {
        self.documents
            .get(invoice_id)
            .map(InvoiceDocument::to_context)
            .ok_or_else(|| ContextError::NotFound {
                invoice_id: invoice_id.to_string(),
            })
    }
}
