//! Handler implementations
//!
//! Formatting sinks (text, JSON, colored console) and composition helpers
//! (fan-out, level filter, in-memory capture, discard), all built on the
//! single-method [`Handler`] contract.

pub mod discard;
mod escape;
pub mod json;
pub mod level;
pub mod memory;
pub mod multi;
pub mod text;

#[cfg(feature = "console")]
pub mod console;

pub use discard::DiscardHandler;
pub use json::JsonHandler;
pub use level::LevelHandler;
pub use memory::MemoryHandler;
pub use multi::MultiHandler;
pub use text::{TextHandler, TextOptions};

#[cfg(feature = "console")]
pub use console::ConsoleHandler;

pub use crate::core::{handler_fn, Handler, HandlerFunc};
