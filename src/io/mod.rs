pub mod store;
pub mod walker;

pub use store::ResultStore;
pub use walker::{document_version, find_version_documents, DocumentWalker, DOCUMENT_PATTERN};
