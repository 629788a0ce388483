//! Shared test utilities for the marching-squares workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Synthetic source image generators
//! - Contour tile set fixtures (in memory and on disk)
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;
