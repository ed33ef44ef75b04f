use serde::{Deserialize, Serialize};

/// Content of the `error` event sent when the upstream stream fails.
pub const GENERIC_STREAM_ERROR: &str = "Streaming failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamEventKind {
    Chunk,
    Done,
    Error,
}

/// Payload of one `data:` frame on the chat event stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamEvent {
    #[serde(rename = "type")]
    pub kind: StreamEventKind,
    pub content: String,
    pub done: bool,
}

impl StreamEvent {
    pub fn chunk(content: impl Into<String>) -> Self {
        Self {
            kind: StreamEventKind::Chunk,
            content: content.into(),
            done: false,
        }
    }

    pub fn done() -> Self {
        Self {
            kind: StreamEventKind::Done,
            content: String::new(),
            done: true,
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            kind: StreamEventKind::Error,
            content: content.into(),
            done: true,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.done
    }
}
