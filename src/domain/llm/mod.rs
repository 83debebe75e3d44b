//! Generation model domain: provider trait and call parameters

pub mod provider;
pub mod request;

pub use provider::LlmProvider;
pub use request::GenerationParams;
