pub mod conversation_store;
pub mod database;
pub mod memory_store;
pub mod records;
pub mod storage_traits;
