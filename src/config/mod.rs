//! Configuration for pfa
//!
//! - Data directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::PfaPaths;
pub use settings::{AiSettings, Settings};
