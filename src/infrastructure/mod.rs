//! # Infrastructure Layer
//!
//! Concrete implementations of the domain traits: the in-memory text buffer,
//! the console voice/panel sinks, and the model providers.

pub mod buffer;
pub mod console;
pub mod llm;
