#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("message is empty")]
    EmptyMessage,
    #[error("a reply is still streaming")]
    ReplyInProgress,
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("stream ended before the reply completed")]
    StreamClosed,
    #[error("reply stream reported an error: {0}")]
    ReplyFailed(String),
}
