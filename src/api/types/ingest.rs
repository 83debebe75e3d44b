//! Wire types for the /ingest endpoint

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ingestion::{IngestOptions, IngestReceipt};

/// POST /ingest request body.
///
/// `source_uri` is required even when `options.texts` supplies the
/// documents inline; it then serves as the batch label.
#[derive(Debug, Clone, Deserialize)]
pub struct IngestRequest {
    #[serde(default)]
    pub source_uri: String,
    #[serde(default)]
    pub options: IngestOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct IngestResponse {
    pub job_id: Uuid,
    pub status: String,
    pub inserted: usize,
}

impl From<IngestReceipt> for IngestResponse {
    fn from(receipt: IngestReceipt) -> Self {
        Self {
            job_id: receipt.job_id,
            status: receipt.status,
            inserted: receipt.inserted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request: IngestRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.source_uri, "");
        assert!(request.options.texts.is_none());

        let request: IngestRequest = serde_json::from_str(
            r#"{"source_uri": "corpus", "options": {"texts": ["a"], "chunk_size": 100}}"#,
        )
        .unwrap();
        assert_eq!(request.source_uri, "corpus");
        assert_eq!(request.options.chunk_size, Some(100));
    }

    #[test]
    fn test_response_from_receipt() {
        let receipt = IngestReceipt::completed(7);
        let response = IngestResponse::from(receipt.clone());

        assert_eq!(response.job_id, receipt.job_id);
        assert_eq!(response.status, "completed");
        assert_eq!(response.inserted, 7);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["inserted"], 7);
        // The audit timestamp stays internal.
        assert!(json.get("created_at").is_none());
    }
}
