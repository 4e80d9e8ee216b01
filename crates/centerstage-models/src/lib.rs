//! Shared data models for the Center Stage virtual camera.
//!
//! This crate provides Serde-serializable types for:
//! - Detection and crop rectangles
//! - Frame dimensions
//! - Fill colors and sink channel order
//! - Framing, eye-fill and detector parameters

pub mod color;
pub mod config;
pub mod rect;

// Re-export common types
pub use color::{ChannelOrder, ColorParseError, Rgb};
pub use config::{DetectionParams, EyeFillConfig, FramingConfig};
pub use rect::{CropRect, FrameSize, Rect};
