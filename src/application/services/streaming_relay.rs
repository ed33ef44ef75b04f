use std::sync::Arc;
use std::time::Duration;

use futures::stream::StreamExt;
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;
use tracing::Instrument;

use crate::application::ports::{
    FragmentStream, GenerationClient, GenerationError, HistoryStore, HistoryStoreError,
};
use crate::domain::{ChatId, GENERIC_STREAM_ERROR, Message, StreamEvent, timestamp_now};
use crate::infrastructure::observability::sanitize_prompt;

/// One fragment in flight between the producer task and the HTTP body.
const EVENT_CHANNEL_CAPACITY: usize = 1;

#[derive(Debug, Clone)]
pub struct RelayRequest {
    pub message: String,
    pub chat_id: Option<ChatId>,
}

/// Rejections raised before any event is produced. Upstream failures are
/// never reported here; they arrive as an `error` event on the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidRequest {
    #[error("Message is required")]
    EmptyMessage,
    #[error("Gemini API key not configured")]
    MissingCredential,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayState {
    Idle,
    Streaming,
    Completed,
    Failed,
    Cancelled,
}

impl RelayState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelayState::Idle => "idle",
            RelayState::Streaming => "streaming",
            RelayState::Completed => "completed",
            RelayState::Failed => "failed",
            RelayState::Cancelled => "cancelled",
        }
    }
}

/// How a relayed request ended.
#[derive(Debug)]
pub enum RelayOutcome {
    /// Reply streamed and, when a chat id was given, persisted.
    Completed { reply: String },
    /// Reply streamed and `done` was sent, but the history write failed.
    PersistFailed {
        reply: String,
        error: HistoryStoreError,
    },
    Failed(GenerationError),
    Cancelled,
}

impl RelayOutcome {
    pub fn state(&self) -> RelayState {
        match self {
            RelayOutcome::Completed { .. } | RelayOutcome::PersistFailed { .. } => {
                RelayState::Completed
            }
            RelayOutcome::Failed(_) => RelayState::Failed,
            RelayOutcome::Cancelled => RelayState::Cancelled,
        }
    }
}

/// Resolves once the producer task has finished.
pub struct RelayOutcomeHandle(oneshot::Receiver<RelayOutcome>);

impl RelayOutcomeHandle {
    pub async fn wait(self) -> RelayOutcome {
        self.0.await.unwrap_or(RelayOutcome::Cancelled)
    }
}

/// Consumer side of a relayed request. Dropping it cancels the request.
pub struct RelayStream {
    events: mpsc::Receiver<StreamEvent>,
    outcome: RelayOutcomeHandle,
}

impl RelayStream {
    pub async fn recv(&mut self) -> Option<StreamEvent> {
        self.events.recv().await
    }

    pub fn into_parts(self) -> (mpsc::Receiver<StreamEvent>, RelayOutcomeHandle) {
        (self.events, self.outcome)
    }
}

pub struct StreamingRelay {
    generation_client: Option<Arc<dyn GenerationClient>>,
    history_store: Arc<dyn HistoryStore>,
    stream_timeout: Option<Duration>,
}

impl StreamingRelay {
    pub fn new(
        generation_client: Option<Arc<dyn GenerationClient>>,
        history_store: Arc<dyn HistoryStore>,
        stream_timeout: Option<Duration>,
    ) -> Self {
        Self {
            generation_client,
            history_store,
            stream_timeout,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.generation_client.is_some()
    }

    /// Validates the request and spawns the producer task, which opens the
    /// upstream stream. Nothing is written to history before this returns.
    #[tracing::instrument(skip(self, request), fields(chat_id = ?request.chat_id))]
    pub fn start(&self, request: RelayRequest) -> Result<RelayStream, InvalidRequest> {
        if request.message.trim().is_empty() {
            return Err(InvalidRequest::EmptyMessage);
        }

        let client = self
            .generation_client
            .as_ref()
            .ok_or(InvalidRequest::MissingCredential)?;

        tracing::debug!(prompt = %sanitize_prompt(&request.message), "Starting relay");

        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let (outcome_tx, outcome_rx) = oneshot::channel();

        let task = RelayTask {
            client: Arc::clone(client),
            events: event_tx,
            history_store: Arc::clone(&self.history_store),
            chat_id: request.chat_id,
            user_message: request.message,
            deadline: self.stream_timeout.map(|t| Instant::now() + t),
        };

        let span = tracing::info_span!("relay", chat_id = ?task.chat_id);
        tokio::spawn(
            async move {
                let outcome = task.run().await;
                log_outcome(&outcome);
                let _ = outcome_tx.send(outcome);
            }
            .instrument(span),
        );

        Ok(RelayStream {
            events: event_rx,
            outcome: RelayOutcomeHandle(outcome_rx),
        })
    }
}

struct RelayTask {
    client: Arc<dyn GenerationClient>,
    events: mpsc::Sender<StreamEvent>,
    history_store: Arc<dyn HistoryStore>,
    chat_id: Option<ChatId>,
    user_message: String,
    deadline: Option<Instant>,
}

impl RelayTask {
    async fn run(self) -> RelayOutcome {
        let mut accumulated = String::new();
        let mut fragment_count: usize = 0;
        tracing::debug!(state = RelayState::Streaming.as_str(), "Relay started");

        let opened = tokio::select! {
            biased;
            _ = self.events.closed() => return RelayOutcome::Cancelled,
            opened = open_stream(self.client.as_ref(), &self.user_message, self.deadline) => opened,
        };
        let mut fragments = match opened {
            Ok(fragments) => fragments,
            Err(e) => {
                let _ = self
                    .events
                    .send(StreamEvent::error(GENERIC_STREAM_ERROR))
                    .await;
                return RelayOutcome::Failed(e);
            }
        };

        loop {
            let next = tokio::select! {
                biased;
                _ = self.events.closed() => return RelayOutcome::Cancelled,
                next = next_fragment(&mut fragments, self.deadline) => next,
            };

            match next {
                Some(Ok(fragment)) => {
                    if fragment.is_empty() {
                        continue;
                    }
                    accumulated.push_str(&fragment);
                    fragment_count += 1;
                    if self.events.send(StreamEvent::chunk(fragment)).await.is_err() {
                        return RelayOutcome::Cancelled;
                    }
                }
                Some(Err(e)) => {
                    let _ = self
                        .events
                        .send(StreamEvent::error(GENERIC_STREAM_ERROR))
                        .await;
                    return RelayOutcome::Failed(e);
                }
                None => break,
            }
        }

        if self.events.is_closed() {
            return RelayOutcome::Cancelled;
        }

        // Release the upstream connection before the history write.
        drop(fragments);
        tracing::debug!(fragments = fragment_count, "Upstream stream completed");

        let persisted = match &self.chat_id {
            Some(chat_id) => {
                persist_exchange(
                    self.history_store.as_ref(),
                    chat_id,
                    self.user_message,
                    accumulated.clone(),
                )
                .await
            }
            None => Ok(()),
        };

        let _ = self.events.send(StreamEvent::done()).await;

        match persisted {
            Ok(()) => RelayOutcome::Completed { reply: accumulated },
            Err(error) => RelayOutcome::PersistFailed {
                reply: accumulated,
                error,
            },
        }
    }
}

async fn open_stream(
    client: &dyn GenerationClient,
    prompt: &str,
    deadline: Option<Instant>,
) -> Result<FragmentStream, GenerationError> {
    match deadline {
        Some(deadline) => tokio::time::timeout_at(deadline, client.generate(prompt))
            .await
            .unwrap_or(Err(GenerationError::Timeout)),
        None => client.generate(prompt).await,
    }
}

async fn next_fragment(
    fragments: &mut FragmentStream,
    deadline: Option<Instant>,
) -> Option<Result<String, GenerationError>> {
    match deadline {
        Some(deadline) => tokio::time::timeout_at(deadline, fragments.next())
            .await
            .unwrap_or(Some(Err(GenerationError::Timeout))),
        None => fragments.next().await,
    }
}

async fn persist_exchange(
    store: &dyn HistoryStore,
    chat_id: &ChatId,
    user_message: String,
    reply: String,
) -> Result<(), HistoryStoreError> {
    let completed_at = timestamp_now();
    let messages = vec![
        Message::user(user_message, completed_at.clone()),
        Message::assistant(reply, completed_at),
    ];
    store.append_messages(chat_id, messages).await
}

fn log_outcome(outcome: &RelayOutcome) {
    let state = outcome.state().as_str();
    match outcome {
        RelayOutcome::Completed { reply } => {
            tracing::info!(state, reply_chars = reply.len(), "Relay completed");
        }
        RelayOutcome::PersistFailed { error, .. } => {
            tracing::error!(state, error = %error, "Reply streamed but history write failed");
        }
        RelayOutcome::Failed(e) => {
            tracing::error!(state, error = %e, "Upstream stream failed");
        }
        RelayOutcome::Cancelled => {
            tracing::info!(state, "Client disconnected, relay cancelled");
        }
    }
}
