//! Sink implementations

pub mod console;
#[cfg(feature = "file")]
pub mod file;
pub mod memory;

pub use console::ConsoleSink;
#[cfg(feature = "file")]
pub use file::FileSink;
pub use memory::{CapturedLine, MemorySink};

pub use crate::core::Sink;
