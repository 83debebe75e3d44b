//! Answer pipeline entities: drafts, verdicts, web evidence, final answers

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::chunk::RetrievedContext;

/// A citation attached to an answer.
///
/// Corpus citations carry source/section; web citations carry the URL.
/// Untagged serde keeps the wire shape of each variant flat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Citation {
    Context { source: String, section: String },
    Web { url: String },
}

impl Citation {
    pub fn context(source: impl Into<String>, section: impl Into<String>) -> Self {
        Self::Context {
            source: source.into(),
            section: section.into(),
        }
    }

    pub fn web(url: impl Into<String>) -> Self {
        Self::Web { url: url.into() }
    }
}

/// First grounded answer produced from retrieved context only.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub text: String,
    pub citations: Vec<Citation>,
}

impl Draft {
    pub fn new(text: impl Into<String>, citations: Vec<Citation>) -> Self {
        Self {
            text: text.into(),
            citations,
        }
    }
}

/// Rubric scores from the quality gate, each on a 0-5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VerdictScores {
    pub coverage: u8,
    pub grounding: u8,
    pub citations: u8,
    pub freshness: u8,
}

impl VerdictScores {
    pub fn new(coverage: u8, grounding: u8, citations: u8, freshness: u8) -> Self {
        Self {
            coverage,
            grounding,
            citations,
            freshness,
        }
    }

    pub fn values(&self) -> [u8; 4] {
        [self.coverage, self.grounding, self.citations, self.freshness]
    }

    pub fn minimum(&self) -> u8 {
        self.values().into_iter().min().unwrap_or(0)
    }

    pub fn mean(&self) -> f64 {
        let sum: u32 = self.values().into_iter().map(u32::from).sum();
        f64::from(sum) / 4.0
    }
}

/// Notes value marking a verdict built from unparseable judge output.
pub const JUDGE_PARSE_ERROR: &str = "judge_parse_error";

/// Quality gate verdict on a draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub pass: bool,
    pub scores: VerdictScores,
    pub notes: String,
}

impl Verdict {
    /// Build a verdict from what the judge claimed.
    ///
    /// The claimed pass is never trusted on its own: the gate passes only
    /// when the judge said pass AND every score is at least 3 AND the
    /// mean score is at least 4.
    pub fn from_claimed(claimed_pass: bool, scores: VerdictScores, notes: String) -> Self {
        let pass =
            claimed_pass && scores.values().into_iter().all(|s| s >= 3) && scores.mean() >= 4.0;
        Self { pass, scores, notes }
    }

    /// Canonical failing verdict for unparseable judge output.
    pub fn parse_failure() -> Self {
        Self {
            pass: false,
            scores: VerdictScores::default(),
            notes: JUDGE_PARSE_ERROR.to_string(),
        }
    }
}

/// One normalized web search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebEvidence {
    pub url: String,
    pub title: String,
    pub snippet: String,
}

impl WebEvidence {
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            snippet: snippet.into(),
        }
    }
}

/// Synthesized answer with merged citations and stage timings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalAnswer {
    pub text: String,
    pub citations: Vec<Citation>,
    /// Per-stage wall-clock milliseconds, filled by the orchestrator.
    pub timings: HashMap<String, f64>,
}

impl FinalAnswer {
    pub fn new(text: impl Into<String>, citations: Vec<Citation>) -> Self {
        Self {
            text: text.into(),
            citations,
            timings: HashMap::new(),
        }
    }
}

/// Everything the pipeline produced for one query.
#[derive(Debug, Clone, PartialEq)]
pub struct AskOutcome {
    pub answer: FinalAnswer,
    pub contexts: Vec<RetrievedContext>,
    pub web_evidence: Vec<WebEvidence>,
    pub verdict: Verdict,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_citation_wire_shapes() {
        let ctx = serde_json::to_value(Citation::context("gdpr.txt", "item-2")).unwrap();
        assert_eq!(
            ctx,
            serde_json::json!({"source": "gdpr.txt", "section": "item-2"})
        );

        let web = serde_json::to_value(Citation::web("https://example.com")).unwrap();
        assert_eq!(web, serde_json::json!({"url": "https://example.com"}));
    }

    #[test]
    fn test_verdict_passes_only_when_all_conditions_hold() {
        let verdict = Verdict::from_claimed(
            true,
            VerdictScores::new(4, 4, 4, 4),
            "solid".to_string(),
        );
        assert!(verdict.pass);
    }

    #[test]
    fn test_verdict_fails_on_low_single_score() {
        // Mean is fine but one dimension is below 3.
        let verdict = Verdict::from_claimed(
            true,
            VerdictScores::new(5, 5, 5, 2),
            String::new(),
        );
        assert!(!verdict.pass);
    }

    #[test]
    fn test_verdict_fails_on_low_mean() {
        // All dimensions pass the minimum but the mean is 3.75.
        let verdict = Verdict::from_claimed(
            true,
            VerdictScores::new(3, 4, 4, 4),
            String::new(),
        );
        assert!(!verdict.pass);
    }

    #[test]
    fn test_verdict_ignores_claimed_pass_alone() {
        let verdict = Verdict::from_claimed(
            false,
            VerdictScores::new(5, 5, 5, 5),
            String::new(),
        );
        assert!(!verdict.pass);
    }

    #[test]
    fn test_verdict_mean_boundary() {
        // 3 + 5 + 5 + 3 = 16, mean exactly 4.0.
        let verdict = Verdict::from_claimed(
            true,
            VerdictScores::new(3, 5, 5, 3),
            String::new(),
        );
        assert!(verdict.pass);
    }

    #[test]
    fn test_parse_failure_verdict() {
        let verdict = Verdict::parse_failure();
        assert!(!verdict.pass);
        assert_eq!(verdict.scores.values(), [0, 0, 0, 0]);
        assert_eq!(verdict.notes, JUDGE_PARSE_ERROR);
    }

    #[test]
    fn test_scores_mean_and_minimum() {
        let scores = VerdictScores::new(1, 2, 3, 4);
        assert_eq!(scores.minimum(), 1);
        assert!((scores.mean() - 2.5).abs() < f64::EPSILON);
    }
}
