//! Rendering of retrieved fragments into a prompt context block

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const NO_CONTEXT: &str = "No relevant context found.";
pub const UNKNOWN_SOURCE: &str = "Unknown source";
pub const UNTITLED: &str = "Untitled";

/// A retrieved fragment as stored in the vector store payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextDocument {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl ContextDocument {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Build from a raw search payload.
    ///
    /// Objects map their `content`, `source` and `title` fields; any other value
    /// is taken as the content itself.
    pub fn from_payload(payload: &Value) -> Self {
        match payload {
            Value::Object(fields) => Self {
                content: fields.get("content").map(value_text).unwrap_or_default(),
                source: fields.get("source").and_then(optional_text),
                title: fields.get("title").and_then(optional_text),
            },
            other => Self::new(value_text(other)),
        }
    }

    pub fn source_or_default(&self) -> &str {
        self.source.as_deref().unwrap_or(UNKNOWN_SOURCE)
    }

    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or(UNTITLED)
    }

    fn render(&self, number: usize) -> String {
        format!(
            "Document {number} (Source: {}, Title: {}):\n{}\n---\n",
            self.source_or_default(),
            self.title_or_default(),
            self.content
        )
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn optional_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        other => Some(value_text(other)),
    }
}

/// Render documents as numbered blocks (from 1) in input order
pub fn format_context(docs: &[ContextDocument]) -> String {
    if docs.is_empty() {
        return NO_CONTEXT.to_string();
    }
    docs.iter()
        .enumerate()
        .map(|(index, doc)| doc.render(index + 1))
        .join("\n")
}

/// [`format_context`] over raw search payloads
pub fn format_payloads(payloads: &[Value]) -> String {
    let docs: Vec<ContextDocument> = payloads.iter().map(ContextDocument::from_payload).collect();
    format_context(&docs)
}
