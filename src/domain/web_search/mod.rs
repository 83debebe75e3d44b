//! Web search domain: provider trait

pub mod provider;

pub use provider::WebSearchProvider;
