//! Render configuration.

use std::collections::HashMap;

use bon::Builder;

use crate::formatter::FormatHint;

/// Default calendar-date format (`2024-03-05`).
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Settings that affect how resolved values become text.
///
/// All settings have defaults; the default currency symbol is empty so amounts
/// render as bare two-decimal numbers.
///
/// # Example
///
/// ```
/// use docmerge::{FormatHint, RenderOptions};
///
/// let options = RenderOptions::builder()
///     .currency_symbol("$")
///     .date_format("%d/%m/%Y")
///     .build()
///     .with_hint("invoice.deposit", FormatHint::Currency)
///     .with_alias("staff", "member");
///
/// assert_eq!(options.currency_symbol(), "$");
/// assert_eq!(options.hint_override("invoice.deposit"), Some(FormatHint::Currency));
/// assert_eq!(options.alias_override("staff"), Some("member"));
/// ```
#[derive(Debug, Clone, Builder)]
#[builder(on(String, into))]
pub struct RenderOptions {
    /// Symbol placed before every currency amount.
    #[builder(default)]
    currency_symbol: String,

    /// `strftime`-style format used for every date.
    #[builder(default = DEFAULT_DATE_FORMAT.to_string())]
    date_format: String,

    /// Explicit format hints by full variable path. These win over the
    /// naming-convention inference.
    #[builder(default)]
    hints: HashMap<String, FormatHint>,

    /// Item alias overrides by collection name (last path segment).
    #[builder(default)]
    aliases: HashMap<String, String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions::builder().build()
    }
}

impl RenderOptions {
    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    pub fn hint_override(&self, path: &str) -> Option<FormatHint> {
        self.hints.get(path).copied()
    }

    pub fn alias_override(&self, collection: &str) -> Option<&str> {
        self.aliases.get(collection).map(String::as_str)
    }

    /// Adds an explicit format hint for `path`.
    pub fn with_hint(mut self, path: impl Into<String>, hint: FormatHint) -> Self {
        self.hints.insert(path.into(), hint);
        self
    }

    /// Binds items of `collection` to `alias` inside its loops.
    pub fn with_alias(mut self, collection: impl Into<String>, alias: impl Into<String>) -> Self {
        self.aliases.insert(collection.into(), alias.into());
        self
    }
}
