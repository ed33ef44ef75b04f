mod chat_locks;
mod document_ops;
mod history_store_factory;
mod in_memory_history_store;
mod json_file_history_store;
mod serialized_history_store;

pub use chat_locks::{ChatLockGuard, ChatLocks};
pub use history_store_factory::HistoryStoreFactory;
pub use in_memory_history_store::InMemoryHistoryStore;
pub use json_file_history_store::JsonFileHistoryStore;
pub use serialized_history_store::SerializedHistoryStore;
