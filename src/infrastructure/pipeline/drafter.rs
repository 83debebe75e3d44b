//! Grounded draft stage

use std::fmt::Write;
use std::sync::Arc;

use tracing::debug;

use crate::domain::answer::{Citation, Draft};
use crate::domain::chunk::RetrievedContext;
use crate::domain::llm::{GenerationParams, LlmProvider};
use crate::domain::DomainError;

/// At most this many contexts make it into the prompt.
const MAX_PROMPT_CONTEXTS: usize = 20;

const DRAFT_TEMPERATURE: f32 = 0.2;
const DRAFT_MAX_TOKENS: u32 = 512;

/// Produces the first answer, grounded strictly in retrieved context.
///
/// The citation list covers every context passed in, not just the ones
/// that fit the prompt; whether the model actually used them is for the
/// quality gate to decide.
#[derive(Debug)]
pub struct Drafter {
    llm: Arc<dyn LlmProvider>,
    model: String,
}

impl Drafter {
    pub fn new(llm: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
        }
    }

    pub async fn draft(
        &self,
        query: &str,
        contexts: &[RetrievedContext],
    ) -> Result<Draft, DomainError> {
        let prompt = build_prompt(query, contexts);

        debug!(
            model = %self.model,
            contexts = contexts.len(),
            prompt_chars = prompt.len(),
            "Drafting answer"
        );

        let text = self
            .llm
            .complete(
                &self.model,
                &prompt,
                GenerationParams::new(DRAFT_TEMPERATURE, DRAFT_MAX_TOKENS),
            )
            .await?;

        let citations = contexts
            .iter()
            .map(|c| Citation::context(c.source.clone(), c.section.clone()))
            .collect();

        Ok(Draft::new(text, citations))
    }
}

fn format_contexts(contexts: &[RetrievedContext]) -> String {
    let mut block = String::new();
    for (i, c) in contexts.iter().take(MAX_PROMPT_CONTEXTS).enumerate() {
        if i > 0 {
            block.push_str("\n\n");
        }
        let _ = write!(
            block,
            "[{}] source={} section={}\n{}",
            i + 1,
            c.source,
            c.section,
            c.text
        );
    }
    block
}

fn build_prompt(query: &str, contexts: &[RetrievedContext]) -> String {
    format!(
        "You are a meticulous paralegal. Using ONLY the provided context, draft a concise answer to the query.\n\
         - Cite passages using bracketed indices like [1], [2] referring to the context items.\n\
         - If the answer is uncertain or not covered, say so explicitly.\n\n\
         Query:\n{}\n\n\
         Context:\n{}\n\n\
         Draft:",
        query,
        format_contexts(contexts)
    )
}
