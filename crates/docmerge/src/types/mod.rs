mod template;
mod template_id;
mod value;

pub use template::{Template, TemplateKind};
pub use template_id::{BodyHash, TemplateId};
pub use value::Value;
