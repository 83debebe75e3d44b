//! Staged question-answering pipeline
//!
//! Runs retrieve → draft → judge → (web fallback on a failed verdict) →
//! synthesize, collecting per-stage wall-clock timings along the way.

use std::time::Instant;

use tracing::{info, instrument};

use crate::domain::answer::AskOutcome;
use crate::domain::DomainError;

use super::{Drafter, Judge, Retriever, Synthesizer, WebFallback};

#[derive(Debug)]
pub struct AskPipeline {
    retriever: Retriever,
    drafter: Drafter,
    judge: Judge,
    web_fallback: WebFallback,
    synthesizer: Synthesizer,
}

impl AskPipeline {
    pub fn new(
        retriever: Retriever,
        drafter: Drafter,
        judge: Judge,
        web_fallback: WebFallback,
        synthesizer: Synthesizer,
    ) -> Self {
        Self {
            retriever,
            drafter,
            judge,
            web_fallback,
            synthesizer,
        }
    }

    /// Answer a query end to end.
    ///
    /// Errors from retrieval, drafting, judge transport, or synthesis
    /// abort the query. A judge that returns garbage and a web search
    /// that fails do not: the first becomes a failing verdict, the
    /// second an empty evidence list.
    #[instrument(skip(self), fields(query_len = query.len()))]
    pub async fn answer(&self, query: &str) -> Result<AskOutcome, DomainError> {
        let total_start = Instant::now();

        let stage_start = Instant::now();
        let contexts = self.retriever.retrieve(query).await?;
        let retrieve_ms = elapsed_ms(stage_start);

        let stage_start = Instant::now();
        let draft = self.drafter.draft(query, &contexts).await?;
        let draft_ms = elapsed_ms(stage_start);

        let stage_start = Instant::now();
        let verdict = self.judge.evaluate(query, &draft, &contexts).await?;
        let judge_ms = elapsed_ms(stage_start);

        let mut web_search_ms = None;
        let web_evidence = if verdict.pass {
            Vec::new()
        } else {
            let stage_start = Instant::now();
            let evidence = self.web_fallback.gather(query).await;
            web_search_ms = Some(elapsed_ms(stage_start));
            evidence
        };

        let stage_start = Instant::now();
        let mut answer = self
            .synthesizer
            .synthesize(query, &draft, &verdict, &contexts, &web_evidence)
            .await?;
        let synthesize_ms = elapsed_ms(stage_start);

        answer.timings.insert("retrieve".to_string(), retrieve_ms);
        answer.timings.insert("draft".to_string(), draft_ms);
        answer.timings.insert("judge".to_string(), judge_ms);
        if let Some(ms) = web_search_ms {
            answer.timings.insert("web_search".to_string(), ms);
        }
        answer
            .timings
            .insert("synthesize".to_string(), synthesize_ms);
        answer
            .timings
            .insert("total".to_string(), elapsed_ms(total_start));

        info!(
            contexts = contexts.len(),
            gate_passed = verdict.pass,
            web_results = web_evidence.len(),
            total_ms = answer.timings.get("total").copied().unwrap_or(0.0),
            "Query answered"
        );

        Ok(AskOutcome {
            answer,
            contexts,
            web_evidence,
            verdict,
        })
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
