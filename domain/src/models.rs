use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A stored paragraph and its unit-length embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphRecord {
    pub text: String,
    pub embedding: Vec<f32>,
}

impl ParagraphRecord {
    pub fn new(text: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self {
            text: text.into(),
            embedding,
        }
    }

    pub fn dimension(&self) -> usize {
        self.embedding.len()
    }
}

/// E5 models are trained with asymmetric prefixes for queries and passages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedPrefix {
    Query,
    Passage,
}

impl EmbedPrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmbedPrefix::Query => "query: ",
            EmbedPrefix::Passage => "passage: ",
        }
    }

    /// Model input for `text`: the prefix followed by the trimmed text.
    pub fn apply(&self, text: &str) -> String {
        format!("{}{}", self.as_str(), text.trim())
    }
}

impl fmt::Display for EmbedPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub source: PathBuf,
    pub inserted: usize,
}
