// Models module

pub mod collection;
pub mod document;

// Re-export commonly used types
pub use collection::{Collection, TERRITORIES, VOTES};
pub use document::{document_to_json, json_to_document, JsonDocument};
