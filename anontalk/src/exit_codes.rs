//! Stable exit codes for board CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Command failed due to invalid config, unreadable storage or other errors.
pub const INVALID: i32 = 1;
/// Intent was declined: empty title/content/reply, or reply to a missing thread.
pub const REJECTED: i32 = 2;
