//! Template storage and the shared parsed-template cache.

mod cache;
mod error;
mod store;

pub use cache::TemplateCache;
pub use error::RegistryError;
pub use store::{MemoryTemplateStore, TemplateStore};
