//! State engine for an anonymous discussion board.
//!
//! Users browse a catalog of groups, join or leave them, post threads in a
//! group (optionally with an image) and reply to threads. The architecture
//! keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (membership set, thread list
//!   operations, catalog, invariants). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (key-value persistence port,
//!   stored documents, config). Isolated so tests can swap in memory storage.
//!
//! Store modules ([`membership`], [`threads`]) own in-memory state and mirror
//! every change into storage; [`board`] ties them together for front ends and
//! [`render`] turns snapshots into text.

pub mod board;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod membership;
pub mod model;
pub mod render;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod threads;
