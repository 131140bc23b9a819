//! Common types used across the application.

pub mod document_no;
pub mod pagination;

pub use document_no::{DocumentKind, DocumentNo};
pub use pagination::{PageRequest, PageResponse};
