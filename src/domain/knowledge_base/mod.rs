//! Knowledge base names and selection

mod name;
mod selection;
mod validation;

pub use name::KnowledgeBaseName;
pub use selection::reconcile_selection;
pub use validation::{validate_knowledge_base_name, KnowledgeBaseValidationError};
