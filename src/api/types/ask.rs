//! Wire types for the /ask endpoint

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::answer::{AskOutcome, Citation, Verdict, WebEvidence};
use crate::domain::chunk::RetrievedContext;

/// POST /ask request body.
///
/// A missing `query` field deserializes to empty and fails validation in
/// the handler, so the caller sees a 400 either way.
#[derive(Debug, Clone, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AskResponse {
    pub answer: String,
    pub citations: Vec<Citation>,
    pub sources: Vec<SourceEntry>,
    pub web_sources: Vec<WebEvidence>,
    pub routing: Verdict,
    pub timings: HashMap<String, f64>,
}

/// Compact view of one retrieved context, without the meta map.
#[derive(Debug, Clone, Serialize)]
pub struct SourceEntry {
    pub source: String,
    pub section: String,
    pub score: f32,
    pub text: String,
}

impl From<&RetrievedContext> for SourceEntry {
    fn from(ctx: &RetrievedContext) -> Self {
        Self {
            source: ctx.source.clone(),
            section: ctx.section.clone(),
            score: ctx.score,
            text: ctx.text.clone(),
        }
    }
}

impl From<AskOutcome> for AskResponse {
    fn from(outcome: AskOutcome) -> Self {
        let sources = outcome.contexts.iter().map(SourceEntry::from).collect();

        Self {
            answer: outcome.answer.text,
            citations: outcome.answer.citations,
            sources,
            web_sources: outcome.web_evidence,
            routing: outcome.verdict,
            timings: outcome.answer.timings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::answer::{FinalAnswer, VerdictScores};

    #[test]
    fn test_request_tolerates_missing_query() {
        let request: AskRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.query, "");

        let request: AskRequest =
            serde_json::from_str(r#"{"query": "limitation period"}"#).unwrap();
        assert_eq!(request.query, "limitation period");
    }

    #[test]
    fn test_response_from_outcome() {
        let mut answer = FinalAnswer::new(
            "The period is six years [R1].",
            vec![Citation::context("contracts.txt", "item-2")],
        );
        answer.timings.insert("total".to_string(), 12.5);

        let outcome = AskOutcome {
            answer,
            contexts: vec![
                RetrievedContext::new("clause text", "contracts.txt", "item-2", 0.91)
                    .with_meta("lang", serde_json::json!("en")),
            ],
            web_evidence: vec![WebEvidence::new("https://example.com", "Example", "snippet")],
            verdict: Verdict::from_claimed(true, VerdictScores::new(5, 5, 4, 4), "ok".into()),
        };

        let response = AskResponse::from(outcome);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["answer"], "The period is six years [R1].");
        assert_eq!(json["citations"][0]["source"], "contracts.txt");
        assert_eq!(json["sources"][0]["section"], "item-2");
        // Sources are the compact view: no meta on the wire.
        assert!(json["sources"][0].get("meta").is_none());
        assert_eq!(json["web_sources"][0]["url"], "https://example.com");
        assert_eq!(json["routing"]["pass"], true);
        assert_eq!(json["routing"]["scores"]["coverage"], 5);
        assert!((json["timings"]["total"].as_f64().unwrap() - 12.5).abs() < 1e-9);
    }
}
