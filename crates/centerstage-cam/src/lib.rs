//! Face-centering virtual camera.
//!
//! This crate provides:
//! - Environment configuration
//! - The stream driver (capture, framing, output, preview, quit)
//! - Structured stream logging

pub mod config;
pub mod driver;
pub mod error;
pub mod logging;

pub use config::AppConfig;
pub use driver::{StopReason, StreamDriver, StreamReport, StreamState, StreamStats};
pub use error::{AppError, AppResult};
pub use logging::StreamLogger;
