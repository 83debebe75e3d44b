//! Request/response types for the HTTP surface

pub mod ask;
pub mod error;
pub mod ingest;
pub mod json;

pub use ask::{AskRequest, AskResponse, SourceEntry};
pub use error::{ApiError, ApiErrorResponse};
pub use ingest::{IngestRequest, IngestResponse};
pub use json::Json;
