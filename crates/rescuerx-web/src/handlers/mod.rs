//! HTTP handlers for all API routes.

pub mod manifest;
pub mod report;
pub mod selection;
pub mod system;
