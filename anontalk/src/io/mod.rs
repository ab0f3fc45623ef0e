//! I/O helpers for board state: persistence port, stored documents, config.

pub mod atomic;
pub mod config;
pub mod documents;
pub mod init;
pub mod storage;
