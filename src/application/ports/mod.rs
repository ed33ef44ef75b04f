mod generation_client;
mod history_store;
mod history_store_error;

pub use generation_client::{FragmentStream, GenerationClient, GenerationError};
pub use history_store::HistoryStore;
pub use history_store_error::HistoryStoreError;
