//! # Completion Output Normalization
//!
//! Providers hand back text in different shapes. `CompletionOutput` captures
//! those shapes and `into_text` flattens them into the single string the
//! response parser works on.

/// The raw shape of a completion provider's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutput {
    /// A chat message, as returned by OpenAI-compatible APIs.
    Message { role: String, content: String },
    /// A sequence of text fragments, as returned by Gemini's `parts`.
    Sequence(Vec<String>),
    /// Plain text.
    Text(String),
}

impl CompletionOutput {
    /// Extracts the textual payload, trimmed.
    ///
    /// For a sequence only the first fragment is used; an empty sequence
    /// yields an empty string.
    pub fn into_text(self) -> String {
        match self {
            CompletionOutput::Message { content, .. } => content.trim().to_string(),
            CompletionOutput::Sequence(parts) => parts
                .into_iter()
                .next()
                .map(|part| part.trim().to_string())
                .unwrap_or_default(),
            CompletionOutput::Text(text) => text.trim().to_string(),
        }
    }

    /// A short description of the shape, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            CompletionOutput::Message { .. } => "message",
            CompletionOutput::Sequence(_) => "sequence",
            CompletionOutput::Text(_) => "text",
        }
    }
}

impl From<String> for CompletionOutput {
    fn from(text: String) -> Self {
        CompletionOutput::Text(text)
    }
}

impl From<&str> for CompletionOutput {
    fn from(text: &str) -> Self {
        CompletionOutput::Text(text.to_string())
    }
}
