use std::sync::Arc;

use crate::application::ports::{GenerationClient, HistoryStore};
use crate::application::services::StreamingRelay;
use crate::presentation::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<StreamingRelay>,
    pub history_store: Arc<dyn HistoryStore>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Wires the relay to the same store the history endpoints read from.
    pub fn new(
        history_store: Arc<dyn HistoryStore>,
        generation_client: Option<Arc<dyn GenerationClient>>,
        settings: Settings,
    ) -> Self {
        let relay = StreamingRelay::new(
            generation_client,
            Arc::clone(&history_store),
            settings.stream_timeout(),
        );

        Self {
            relay: Arc::new(relay),
            history_store,
            settings: Arc::new(settings),
        }
    }
}
