//! Site configuration.
//!
//! Every field has a default matching the published site. A JSON file
//! named by `IRIS_FOLIO_CONFIG` may override any subset of fields.

use std::f32::consts::PI;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "IRIS_FOLIO_CONFIG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrientationMode {
    /// Clamp each axis to `±max_angle`.
    Bounded,
    /// Discrete zones with a single wrap-through back zone.
    BackZone,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OrientationConfig {
    pub mode: OrientationMode,
    /// Radians per input step
    pub step: f32,
    /// Bounded mode clamp
    pub max_angle: f32,
    /// Back-zone mode: front zones span `-zone_steps..=zone_steps`
    pub zone_steps: i32,
    /// Fraction of the remaining gap closed per nominal frame
    pub smoothing_factor: f32,
    /// Gap below which an axis snaps onto its target
    pub epsilon: f32,
}

impl Default for OrientationConfig {
    fn default() -> Self {
        Self {
            mode: OrientationMode::BackZone,
            step: PI / 4.0,
            max_angle: PI / 3.0,
            zone_steps: 3,
            smoothing_factor: 0.12,
            epsilon: 1e-4,
        }
    }
}

impl OrientationConfig {
    /// The simpler clamped eye: small steps, ±60°.
    pub fn bounded() -> Self {
        Self {
            mode: OrientationMode::Bounded,
            step: PI / 12.0,
            ..Self::default()
        }
    }

    /// Repair values the controller cannot work with. Non-finite numbers
    /// take their defaults and signed magnitudes lose their sign.
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        let magnitude = |v: f32, fallback: f32| if v.is_finite() { v.abs() } else { fallback };
        Self {
            mode: self.mode,
            step: magnitude(self.step, d.step),
            max_angle: magnitude(self.max_angle, d.max_angle),
            zone_steps: self.zone_steps.max(0),
            smoothing_factor: if self.smoothing_factor.is_finite() {
                self.smoothing_factor.clamp(0.0, 1.0)
            } else {
                d.smoothing_factor
            },
            epsilon: magnitude(self.epsilon, d.epsilon),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AttractorConfig {
    pub num_tracers: usize,
    pub trail_length: usize,
    /// Time increment for a motionless cloud
    pub base_dt: f32,
    /// Sensitivity of the timestep to mean displacement
    pub alpha: f32,
    /// Blend weight of the new timestep candidate
    pub dt_smoothing: f32,
    /// Slerp fraction toward the target rotation per step
    pub slerp_rate: f32,
    /// Depth gradient stops: far, middle, near (`#RRGGBB`)
    pub gradient: [String; 3],
}

impl Default for AttractorConfig {
    fn default() -> Self {
        Self {
            num_tracers: 600,
            trail_length: 24,
            base_dt: 0.01,
            alpha: 4.0,
            dt_smoothing: 0.1,
            slerp_rate: 0.02,
            gradient: [
                "#2b1055".to_string(),
                "#d53369".to_string(),
                "#ffd86f".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// JSON array of entries. `None` uses the built-in catalogue.
    pub manifest_url: Option<String>,
    pub oembed_endpoint: String,
    pub timeout_secs: u64,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            manifest_url: None,
            oembed_endpoint: "https://vimeo.com/api/oembed.json".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub orientation: OrientationConfig,
    pub attractor: AttractorConfig,
    pub gallery: GalleryConfig,
    /// Fixed shuffle seed. `None` reshuffles on every launch.
    pub seed: Option<u64>,
}

impl SiteConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut cfg: Self = serde_json::from_str(json)?;
        let orientation = cfg.orientation.clone().sanitized();
        if orientation != cfg.orientation {
            log::warn!("orientation config repaired: {:?}", orientation);
            cfg.orientation = orientation;
        }
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Load from `IRIS_FOLIO_CONFIG`, falling back to defaults on any error.
    pub fn load() -> Self {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => match Self::from_file(Path::new(&path)) {
                Ok(cfg) => {
                    log::info!("loaded config from {}", Path::new(&path).display());
                    cfg
                }
                Err(e) => {
                    log::warn!("config ignored, using defaults: {}", e);
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }
}
