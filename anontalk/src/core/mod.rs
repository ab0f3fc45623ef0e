//! Deterministic, pure logic shared by the board stores.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests.

pub mod catalog;
pub mod ids;
pub mod invariants;
pub mod membership;
pub mod preview;
pub mod thread_list;
