//! rescuerx-common — Shared types, errors, and text helpers used across all RescueRx crates.

pub mod error;
pub mod models;
pub mod probe;
pub mod text;

// Re-export commonly used types
pub use error::{ApiError, RescueError};
pub use text::{display_name, safe_string, title_label};
