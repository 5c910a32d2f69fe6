//! # Application Layer
//!
//! The companion's core logic: reply parsing, the handler registry and
//! dispatch loop, the concrete handlers, and the session that orchestrates one
//! interaction end to end.

pub mod dispatch;
pub mod handlers;
pub mod parsing;
pub mod prompt;
pub mod session;
pub mod state;
