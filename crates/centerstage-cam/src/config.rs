//! Application configuration.
//!
//! Read from `CENTERSTAGE_*` environment variables (a `.env` file is loaded
//! first by the binary). Unset variables fall back to the defaults below;
//! malformed or out-of-range values are rejected.

use crate::error::{AppError, AppResult};
use centerstage_models::{EyeFillConfig, FrameSize, FramingConfig, Rgb};
use std::fmt::Display;
use std::str::FromStr;

const DEFAULT_FACE_CASCADE: &str =
    "/usr/share/opencv4/haarcascades/haarcascade_frontalface_default.xml";
const DEFAULT_EYE_CASCADE: &str = "/usr/share/opencv4/haarcascades/haarcascade_eye.xml";

/// Virtual camera configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Capture device index
    pub camera_index: i32,
    /// Target frame rate of the virtual camera
    pub fps: u32,
    /// Crop controller and output resolution
    pub framing: FramingConfig,
    /// Eye occluder
    pub eye_fill: EyeFillConfig,
    /// Show the preview window
    pub preview: bool,
    /// Preview window title
    pub window_name: String,
    /// Key that closes the preview and stops the stream
    pub quit_key: char,
    /// v4l2loopback device node
    pub virtual_device: String,
    /// Haar cascade for faces
    pub face_cascade: String,
    /// Haar cascade for eyes
    pub eye_cascade: String,
    /// Stop after this many frames (unlimited when unset)
    pub max_frames: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            camera_index: 0,
            fps: 60,
            framing: FramingConfig::default(),
            eye_fill: EyeFillConfig::default(),
            preview: true,
            window_name: "Smooth Face Tracking with Eye Fill".to_string(),
            quit_key: 'q',
            virtual_device: "/dev/video10".to_string(),
            face_cascade: DEFAULT_FACE_CASCADE.to_string(),
            eye_cascade: DEFAULT_EYE_CASCADE.to_string(),
            max_frames: None,
        }
    }
}

impl AppConfig {
    /// Create config from environment variables.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let vars = Vars(lookup);

        let framing = FramingConfig {
            output: FrameSize::new(
                vars.parse("CENTERSTAGE_OUTPUT_WIDTH", defaults.framing.output.width)?,
                vars.parse("CENTERSTAGE_OUTPUT_HEIGHT", defaults.framing.output.height)?,
            ),
            default_zoom_factor: vars
                .parse("CENTERSTAGE_ZOOM_FACTOR", defaults.framing.default_zoom_factor)?,
            target_face_ratio: vars
                .parse("CENTERSTAGE_FACE_RATIO", defaults.framing.target_face_ratio)?,
            smoothing_alpha: vars
                .parse("CENTERSTAGE_SMOOTHING_ALPHA", defaults.framing.smoothing_alpha)?,
        };

        let eye_fill = EyeFillConfig {
            enabled: vars.flag("CENTERSTAGE_EYE_FILL", defaults.eye_fill.enabled)?,
            color: vars.parse::<Rgb>("CENTERSTAGE_EYE_FILL_COLOR", defaults.eye_fill.color)?,
            alpha: vars.parse("CENTERSTAGE_EYE_FILL_ALPHA", defaults.eye_fill.alpha)?,
            threshold: vars.parse("CENTERSTAGE_EYE_FILL_THRESHOLD", defaults.eye_fill.threshold)?,
        };

        let config = Self {
            camera_index: vars.parse("CENTERSTAGE_CAMERA_INDEX", defaults.camera_index)?,
            fps: vars.parse("CENTERSTAGE_FPS", defaults.fps)?,
            framing,
            eye_fill,
            preview: vars.flag("CENTERSTAGE_PREVIEW", defaults.preview)?,
            window_name: vars.string("CENTERSTAGE_WINDOW_NAME", defaults.window_name),
            quit_key: vars.parse("CENTERSTAGE_QUIT_KEY", defaults.quit_key)?,
            virtual_device: vars.string("CENTERSTAGE_VIRTUAL_DEVICE", defaults.virtual_device),
            face_cascade: vars.string("CENTERSTAGE_FACE_CASCADE", defaults.face_cascade),
            eye_cascade: vars.string("CENTERSTAGE_EYE_CASCADE", defaults.eye_cascade),
            max_frames: vars.optional("CENTERSTAGE_MAX_FRAMES")?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> AppResult<()> {
        if self.fps == 0 {
            return Err(AppError::config("CENTERSTAGE_FPS must be positive"));
        }
        if self.framing.output.is_empty() {
            return Err(AppError::config(format!(
                "output resolution {} has no pixels",
                self.framing.output
            )));
        }
        if !(self.framing.default_zoom_factor > 0.0) {
            return Err(AppError::config("CENTERSTAGE_ZOOM_FACTOR must be positive"));
        }
        if !in_unit_interval(self.framing.target_face_ratio) {
            return Err(AppError::config("CENTERSTAGE_FACE_RATIO must be in (0, 1]"));
        }
        if !in_unit_interval(self.framing.smoothing_alpha) {
            return Err(AppError::config("CENTERSTAGE_SMOOTHING_ALPHA must be in (0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.eye_fill.alpha) {
            return Err(AppError::config("CENTERSTAGE_EYE_FILL_ALPHA must be in [0, 1]"));
        }
        if !self.quit_key.is_ascii() {
            return Err(AppError::config("CENTERSTAGE_QUIT_KEY must be an ASCII key"));
        }
        Ok(())
    }
}

fn in_unit_interval(value: f64) -> bool {
    value > 0.0 && value <= 1.0
}

struct Vars<F>(F);

impl<F: Fn(&str) -> Option<String>> Vars<F> {
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn string(&self, key: &str, default: String) -> String {
        self.get(key).unwrap_or(default)
    }

    fn optional<T>(&self, key: &str) -> AppResult<Option<T>>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.get(key)
            .map(|raw| {
                raw.parse()
                    .map_err(|e| AppError::config(format!("{key}={raw:?}: {e}")))
            })
            .transpose()
    }

    fn parse<T>(&self, key: &str, default: T) -> AppResult<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        Ok(self.optional(key)?.unwrap_or(default))
    }

    fn flag(&self, key: &str, default: bool) -> AppResult<bool> {
        match self.get(key).map(|v| v.to_lowercase()) {
            None => Ok(default),
            Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => Ok(true),
            Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => Ok(false),
            Some(v) => Err(AppError::config(format!("{key}={v:?}: expected a boolean"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> AppResult<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_empty_environment_gives_defaults() {
        assert_eq!(config_from(&[]).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("CENTERSTAGE_CAMERA_INDEX", "2"),
            ("CENTERSTAGE_OUTPUT_WIDTH", "1280"),
            ("CENTERSTAGE_OUTPUT_HEIGHT", "720"),
            ("CENTERSTAGE_EYE_FILL", "off"),
            ("CENTERSTAGE_EYE_FILL_COLOR", "#ff0000"),
            ("CENTERSTAGE_QUIT_KEY", "x"),
            ("CENTERSTAGE_MAX_FRAMES", "300"),
        ])
        .unwrap();

        assert_eq!(config.camera_index, 2);
        assert_eq!(config.framing.output, FrameSize::new(1280, 720));
        assert!(!config.eye_fill.enabled);
        assert_eq!(config.eye_fill.color, Rgb::new(255, 0, 0));
        assert_eq!(config.quit_key, 'x');
        assert_eq!(config.max_frames, Some(300));
    }

    #[test]
    fn test_blank_value_uses_default() {
        let config = config_from(&[("CENTERSTAGE_FPS", "  ")]).unwrap();
        assert_eq!(config.fps, 60);
    }

    #[test]
    fn test_malformed_values_are_rejected() {
        for (key, value) in [
            ("CENTERSTAGE_FPS", "fast"),
            ("CENTERSTAGE_EYE_FILL_COLOR", "yellow"),
            ("CENTERSTAGE_PREVIEW", "maybe"),
            ("CENTERSTAGE_QUIT_KEY", "esc"),
        ] {
            let err = config_from(&[(key, value)]).unwrap_err();
            assert!(matches!(err, AppError::Config(_)), "{key}={value}");
        }
    }

    #[test]
    fn test_out_of_range_values_are_rejected() {
        for (key, value) in [
            ("CENTERSTAGE_FPS", "0"),
            ("CENTERSTAGE_OUTPUT_WIDTH", "0"),
            ("CENTERSTAGE_ZOOM_FACTOR", "-1"),
            ("CENTERSTAGE_FACE_RATIO", "1.5"),
            ("CENTERSTAGE_SMOOTHING_ALPHA", "0"),
            ("CENTERSTAGE_EYE_FILL_ALPHA", "2"),
        ] {
            let err = config_from(&[(key, value)]).unwrap_err();
            assert_eq!(err.exit_code(), 2, "{key}={value}");
        }
    }
}
