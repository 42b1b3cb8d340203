//! `/chat` request and response bodies

use serde::{Deserialize, Serialize};

use crate::config::ChatResponseStyle;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Normalized chat reply body
///
/// Serialized untagged, so the wire shape is either `{"reply": ...}` or the
/// aliased object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChatResult {
    Compact { reply: String },
    Aliased(AliasedReply),
}

/// The reply text repeated under each key a client might read
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AliasedReply {
    pub response: String,
    pub answer: String,
    pub message: String,
    pub content: String,
    pub reply: String,
    pub text: String,
    pub sources: Vec<serde_json::Value>,
}

impl ChatResult {
    pub fn new(style: ChatResponseStyle, text: impl Into<String>) -> Self {
        let text = text.into();
        match style {
            ChatResponseStyle::Compact => ChatResult::Compact { reply: text },
            ChatResponseStyle::Aliased => ChatResult::Aliased(AliasedReply {
                response: text.clone(),
                answer: text.clone(),
                message: text.clone(),
                content: text.clone(),
                reply: text.clone(),
                text,
                sources: Vec::new(),
            }),
        }
    }

    pub fn reply(&self) -> &str {
        match self {
            ChatResult::Compact { reply } => reply,
            ChatResult::Aliased(aliased) => &aliased.reply,
        }
    }
}
