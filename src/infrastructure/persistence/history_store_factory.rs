use std::sync::Arc;

use crate::application::ports::HistoryStore;
use crate::presentation::config::{HistoryBackend, HistorySettings};

use super::{InMemoryHistoryStore, JsonFileHistoryStore, SerializedHistoryStore};

pub struct HistoryStoreFactory;

impl HistoryStoreFactory {
    pub fn create(settings: &HistorySettings) -> Arc<dyn HistoryStore> {
        match settings.backend {
            HistoryBackend::File => {
                tracing::info!(path = %settings.path, "Using JSON file history store");
                Arc::new(SerializedHistoryStore::new(JsonFileHistoryStore::new(
                    &settings.path,
                )))
            }
            HistoryBackend::Memory => {
                tracing::info!("Using in-memory history store");
                Arc::new(SerializedHistoryStore::new(InMemoryHistoryStore::new()))
            }
        }
    }
}
