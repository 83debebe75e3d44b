//! Corpus chunk entities

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A chunk of corpus text ready for storage, with its embedding vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub text: String,
    pub source: String,
    pub section: String,
    #[serde(default)]
    pub meta: HashMap<String, serde_json::Value>,
    pub vector: Vec<f32>,
}

impl ChunkRecord {
    pub fn new(
        text: impl Into<String>,
        source: impl Into<String>,
        section: impl Into<String>,
        vector: Vec<f32>,
    ) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
            section: section.into(),
            meta: HashMap::new(),
            vector,
        }
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.meta.insert(key.into(), value);
        self
    }
}

/// A stored chunk as returned by nearest-neighbor search.
///
/// Fields missing in the store come back as empty strings (or an empty
/// map for `meta`) rather than failing the lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedContext {
    pub text: String,
    pub source: String,
    pub section: String,
    #[serde(default)]
    pub meta: HashMap<String, serde_json::Value>,
    pub score: f32,
}

impl RetrievedContext {
    pub fn new(
        text: impl Into<String>,
        source: impl Into<String>,
        section: impl Into<String>,
        score: f32,
    ) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
            section: section.into(),
            meta: HashMap::new(),
            score,
        }
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.meta.insert(key.into(), value);
        self
    }
}
