pub mod config;
pub mod core;
pub mod session;
pub mod storage;
