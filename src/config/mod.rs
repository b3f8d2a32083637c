//! Configuration reading
//!
//! This module provides the [`Reader`] boundary over layered configuration
//! sources (file, environment, explicit overrides) and the concrete readers
//! used by the CLI and by tests.

pub mod reader;

pub use reader::{FileReader, MemoryReader, Reader};
