//! Quality gate: LLM judge over the draft

use std::fmt::Write;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::answer::{Draft, Verdict, VerdictScores};
use crate::domain::chunk::RetrievedContext;
use crate::domain::llm::{GenerationParams, LlmProvider};
use crate::domain::DomainError;

/// At most this many contexts are previewed in the rubric prompt.
const MAX_PREVIEW_CONTEXTS: usize = 5;
/// Each previewed context is truncated to this many characters.
const PREVIEW_CHARS: usize = 500;

const JUDGE_TEMPERATURE: f32 = 0.0;
const JUDGE_MAX_TOKENS: u32 = 256;

const RUBRIC: &str = "You are a strict legal QA judge. Score the DRAFT answer against the CONTEXT for:\n\
    - coverage: Does it answer the user question fully? (0-5)\n\
    - grounding: Is every claim supported by the provided context? (0-5)\n\
    - citations: Are sources cited sufficiently and appropriately? (0-5)\n\
    - freshness: Is the information likely up-to-date given the query? (0-5)\n\
    Output only JSON on a single line with fields:\n\
    {\"pass\": boolean, \"scores\": {\"coverage\": int, \"grounding\": int, \"citations\": int, \"freshness\": int}, \"notes\": string}\n\
    where pass is true only if the average is at least 4 and no dimension is below 3.";

/// Scores a draft on four dimensions and decides whether the pipeline
/// needs web evidence.
///
/// The model's own pass claim is never taken at face value: the stage
/// recomputes the verdict from the reported scores, and anything it
/// cannot parse counts as a failed draft rather than a pipeline error.
#[derive(Debug)]
pub struct Judge {
    llm: Arc<dyn LlmProvider>,
    model: String,
}

impl Judge {
    pub fn new(llm: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
        }
    }

    /// Evaluate a draft. Transport failures propagate; parse failures
    /// resolve to the canonical failing verdict.
    pub async fn evaluate(
        &self,
        query: &str,
        draft: &Draft,
        contexts: &[RetrievedContext],
    ) -> Result<Verdict, DomainError> {
        let prompt = build_prompt(query, draft, contexts);

        debug!(
            model = %self.model,
            contexts = contexts.len(),
            "Judging draft"
        );

        let raw = self
            .llm
            .complete(
                &self.model,
                &prompt,
                GenerationParams::new(JUDGE_TEMPERATURE, JUDGE_MAX_TOKENS),
            )
            .await?;

        Ok(parse_verdict(&raw))
    }
}

fn preview_contexts(contexts: &[RetrievedContext]) -> String {
    let mut block = String::new();
    for (i, c) in contexts.iter().take(MAX_PREVIEW_CONTEXTS).enumerate() {
        if i > 0 {
            block.push_str("\n\n");
        }
        block.extend(c.text.chars().take(PREVIEW_CHARS));
    }
    block
}

fn build_prompt(query: &str, draft: &Draft, contexts: &[RetrievedContext]) -> String {
    let mut prompt = String::from(RUBRIC);
    let _ = write!(
        prompt,
        "\n\nUSER QUERY:\n{}\n\nCONTEXT (snippets):\n{}\n\nDRAFT:\n{}\n\nJSON:",
        query,
        preview_contexts(contexts),
        draft.text
    );
    prompt
}

/// Judge reply as the rubric demands it. Missing fields read as their
/// zero values instead of failing the parse.
#[derive(Debug, Deserialize)]
struct JudgeReply {
    #[serde(default)]
    pass: bool,
    #[serde(default)]
    scores: JudgeScores,
    #[serde(default)]
    notes: String,
}

#[derive(Debug, Default, Deserialize)]
struct JudgeScores {
    #[serde(default)]
    coverage: i64,
    #[serde(default)]
    grounding: i64,
    #[serde(default)]
    citations: i64,
    #[serde(default)]
    freshness: i64,
}

impl JudgeScores {
    fn clamped(&self) -> VerdictScores {
        let clamp = |v: i64| v.clamp(0, 5) as u8;
        VerdictScores::new(
            clamp(self.coverage),
            clamp(self.grounding),
            clamp(self.citations),
            clamp(self.freshness),
        )
    }
}

/// Parse the judge output: the last non-empty line must be the JSON
/// object. Everything else resolves to the canonical failing verdict.
fn parse_verdict(raw: &str) -> Verdict {
    let Some(line) = raw.lines().rev().map(str::trim).find(|l| !l.is_empty()) else {
        warn!("Judge returned empty output");
        return Verdict::parse_failure();
    };

    match serde_json::from_str::<JudgeReply>(line) {
        Ok(reply) => Verdict::from_claimed(reply.pass, reply.scores.clamped(), reply.notes),
        Err(e) => {
            warn!(error = %e, line = line, "Failed to parse judge output");
            Verdict::parse_failure()
        }
    }
}
