//! Staged question-answering pipeline
//!
//! Each stage wraps one concern: retrieval, drafting, the quality gate,
//! the web fallback and final synthesis. The orchestrator wires them
//! together and owns the control flow between them.

mod drafter;
mod judge;
mod orchestrator;
mod retriever;
mod synthesizer;
mod web_fallback;

pub use drafter::Drafter;
pub use judge::Judge;
pub use orchestrator::AskPipeline;
pub use retriever::Retriever;
pub use synthesizer::Synthesizer;
pub use web_fallback::WebFallback;
