//! Common types shared by the marching-squares crates.

pub mod config;
pub mod error;

pub use config::MarchingConfig;
pub use error::{ContourError, ContourResult};
