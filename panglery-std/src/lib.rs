//! # panglery-std
//!
//! Standard implementations for the panglery event hook library.
//!
//! This crate provides:
//! - **Standard handlers**: [`hooks::LoggingHandler`]
//! - **Testing utilities**: [`testing::RecordingHandler`], [`testing::CountingHandler`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core
pub use panglery_core;

// Modules
pub mod hooks;
pub mod testing;
