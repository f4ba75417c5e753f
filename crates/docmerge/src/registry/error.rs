use thiserror::Error;

use crate::parser::ParseError;
use crate::types::TemplateId;

/// Errors from template storage operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The template body does not parse; it must not be stored.
    #[error("template {id} is invalid: {source}")]
    InvalidTemplate {
        id: TemplateId,
        #[source]
        source: ParseError,
    },

    /// No template with this id exists.
    #[error("template {id} not found")]
    NotFound { id: TemplateId },
}
