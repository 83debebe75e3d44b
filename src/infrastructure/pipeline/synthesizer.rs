//! Final answer synthesis stage

use std::fmt::Write;
use std::sync::Arc;

use tracing::debug;

use crate::domain::answer::{Citation, Draft, FinalAnswer, Verdict, WebEvidence};
use crate::domain::chunk::RetrievedContext;
use crate::domain::llm::{GenerationParams, LlmProvider};
use crate::domain::DomainError;

/// At most this many retrieved contexts make it into the prompt.
const MAX_RAG_ITEMS: usize = 15;
/// At most this many web results make it into the prompt.
const MAX_WEB_ITEMS: usize = 10;

const SYNTHESIS_TEMPERATURE: f32 = 0.2;
const SYNTHESIS_MAX_TOKENS: u32 = 700;

/// Merges the draft, corpus evidence and optional web evidence into the
/// final cited answer.
///
/// The web block enters the prompt only when the verdict failed; a
/// passed gate means the corpus evidence was sufficient and web results
/// are left out even if present. Citations are merged exhaustively,
/// contexts first and web second, regardless of what the model chose to
/// cite inline.
#[derive(Debug)]
pub struct Synthesizer {
    llm: Arc<dyn LlmProvider>,
    model: String,
}

impl Synthesizer {
    pub fn new(llm: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
        }
    }

    pub async fn synthesize(
        &self,
        query: &str,
        draft: &Draft,
        verdict: &Verdict,
        contexts: &[RetrievedContext],
        web: &[WebEvidence],
    ) -> Result<FinalAnswer, DomainError> {
        let prompt = build_prompt(query, draft, verdict, contexts, web);

        debug!(
            model = %self.model,
            contexts = contexts.len(),
            web_results = web.len(),
            gate_passed = verdict.pass,
            "Synthesizing final answer"
        );

        let text = self
            .llm
            .complete(
                &self.model,
                &prompt,
                GenerationParams::new(SYNTHESIS_TEMPERATURE, SYNTHESIS_MAX_TOKENS),
            )
            .await?;

        let citations = merge_citations(contexts, web);

        Ok(FinalAnswer::new(text, citations))
    }
}

/// All context citations followed by all web citations.
pub fn merge_citations(contexts: &[RetrievedContext], web: &[WebEvidence]) -> Vec<Citation> {
    contexts
        .iter()
        .map(|c| Citation::context(c.source.clone(), c.section.clone()))
        .chain(web.iter().map(|w| Citation::web(w.url.clone())))
        .collect()
}

fn format_rag(contexts: &[RetrievedContext]) -> String {
    let mut block = String::new();
    for (i, c) in contexts.iter().take(MAX_RAG_ITEMS).enumerate() {
        if i > 0 {
            block.push_str("\n\n");
        }
        let _ = write!(block, "[R{}] {} {}:\n{}", i + 1, c.source, c.section, c.text);
    }
    block
}

fn format_web(web: &[WebEvidence]) -> String {
    let mut block = String::new();
    for (i, w) in web.iter().take(MAX_WEB_ITEMS).enumerate() {
        if i > 0 {
            block.push_str("\n\n");
        }
        let _ = write!(block, "[W{}] {} | {}\n{}", i + 1, w.title, w.url, w.snippet);
    }
    block
}

fn build_prompt(
    query: &str,
    draft: &Draft,
    verdict: &Verdict,
    contexts: &[RetrievedContext],
    web: &[WebEvidence],
) -> String {
    let web_section = if verdict.pass {
        String::new()
    } else {
        format!("WEB EVIDENCE:\n{}", format_web(web))
    };

    format!(
        "You are a senior legal writer. Produce a final, precise answer for the USER QUERY using the draft and evidence.\n\
         Rules:\n\
         - Be concise and accurate.\n\
         - Ground claims strictly in the RAG and, if needed, WEB evidence. Avoid hallucinations.\n\
         - Include inline bracket citations like [R1], [R2] and [W1] where appropriate.\n\
         - If information is missing or outdated, explicitly state limitations.\n\n\
         USER QUERY:\n{}\n\n\
         DRAFT (from paralegal):\n{}\n\n\
         RAG EVIDENCE:\n{}\n\n\
         {}\n\n\
         Final Answer:",
        query,
        draft.text,
        format_rag(contexts),
        web_section
    )
}
