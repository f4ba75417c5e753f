use std::fmt::{Display, Formatter, Result as FmtResult};

use bon::Builder;
use serde::{Deserialize, Serialize};

use super::TemplateId;

/// The kind of business document a template produces.
///
/// Kinds the application does not know about are kept verbatim in
/// [`TemplateKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TemplateKind {
    Invoice,
    Proposal,
    Contract,
    Estimate,
    Receipt,
    Other(String),
}

impl TemplateKind {
    /// The kinds that ship with a built-in default template.
    pub const BUILT_IN: [TemplateKind; 5] = [
        TemplateKind::Invoice,
        TemplateKind::Proposal,
        TemplateKind::Contract,
        TemplateKind::Estimate,
        TemplateKind::Receipt,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            TemplateKind::Invoice => "invoice",
            TemplateKind::Proposal => "proposal",
            TemplateKind::Contract => "contract",
            TemplateKind::Estimate => "estimate",
            TemplateKind::Receipt => "receipt",
            TemplateKind::Other(name) => name,
        }
    }
}

impl From<String> for TemplateKind {
    fn from(name: String) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "invoice" => TemplateKind::Invoice,
            "proposal" => TemplateKind::Proposal,
            "contract" => TemplateKind::Contract,
            "estimate" => TemplateKind::Estimate,
            "receipt" => TemplateKind::Receipt,
            _ => TemplateKind::Other(name),
        }
    }
}

impl From<&str> for TemplateKind {
    fn from(name: &str) -> Self {
        TemplateKind::from(name.to_string())
    }
}

impl From<TemplateKind> for String {
    fn from(kind: TemplateKind) -> Self {
        kind.as_str().to_string()
    }
}

impl Display for TemplateKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// A stored document template.
///
/// `body` is an HTML fragment with embedded `{{...}}` directives. The engine
/// only ever reads it.
///
/// ```
/// use docmerge::{Template, TemplateKind};
///
/// let template = Template::builder()
///     .id(1_u64)
///     .kind(TemplateKind::Invoice)
///     .title("Standard invoice")
///     .body("<h1>Invoice {{invoiceNumber}}</h1>")
///     .is_default(true)
///     .build();
/// assert!(template.is_default);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[builder(on(String, into))]
#[serde(rename_all = "camelCase")]
pub struct Template {
    #[builder(into)]
    pub id: TemplateId,

    #[builder(into)]
    #[serde(rename = "type")]
    pub kind: TemplateKind,

    #[builder(default)]
    #[serde(default)]
    pub title: String,

    pub body: String,

    #[builder(default)]
    #[serde(default)]
    pub is_default: bool,
}
