//! Web search adapters

pub mod firecrawl;

pub use firecrawl::FirecrawlProvider;
