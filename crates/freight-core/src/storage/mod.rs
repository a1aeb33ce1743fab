//! Storage layer
//!
//! Records live in process memory only and are lost on restart.

pub mod memory;

pub use memory::MemoryStore;
