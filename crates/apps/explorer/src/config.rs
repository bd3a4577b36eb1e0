use std::fmt;
use std::fs;
use std::path::Path;

use catalog::Category;
use interaction::ControllerConfig;
use scene::{FilterPolicy, PickOptions, ProjectionConfig, Viewport};
use serde::{Deserialize, Serialize};
use weights::{GestureTiming, HoldConfig};

/// Upper bound for `hold.precision_decimals`.
const MAX_PRECISION_DECIMALS: u32 = 10;
const MIN_REPEAT_INTERVAL_MS: f64 = 1.0;

/// Explorer settings, read from an optional JSON file.
///
/// Every section and field falls back to its default, so `{}` is a valid
/// config and a file only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub default_category: Category,
    /// Seed for the sampling filter; `None` draws from entropy.
    pub seed: Option<u64>,
    pub surface: SurfaceSection,
    pub projection: ProjectionSection,
    pub controller: ControllerSection,
    pub hold: HoldSection,
    pub gestures: GestureSection,
    pub filter: FilterSection,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            default_category: Category::Wise,
            seed: None,
            surface: SurfaceSection::default(),
            projection: ProjectionSection::default(),
            controller: ControllerSection::default(),
            hold: HoldSection::default(),
            gestures: GestureSection::default(),
            filter: FilterSection::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceSection {
    pub width: f64,
    pub height: f64,
}

impl Default for SurfaceSection {
    fn default() -> Self {
        let v = Viewport::default();
        Self {
            width: v.width,
            height: v.height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionSection {
    pub focal_length: f64,
    pub radius_fraction: f64,
}

impl Default for ProjectionSection {
    fn default() -> Self {
        let p = ProjectionConfig::default();
        Self {
            focal_length: p.focal_length,
            radius_fraction: p.radius_fraction,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerSection {
    pub sensitivity: f64,
    pub zoom_step: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub click_slop_px: f64,
    pub base_hit_radius_px: f64,
}

impl Default for ControllerSection {
    fn default() -> Self {
        let c = ControllerConfig::default();
        Self {
            sensitivity: c.sensitivity,
            zoom_step: c.zoom_step,
            min_zoom: c.min_zoom,
            max_zoom: c.max_zoom,
            click_slop_px: c.click_slop_px,
            base_hit_radius_px: c.pick.base_radius,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoldSection {
    pub increment: f64,
    pub precision_decimals: u32,
    pub tolerance: f64,
}

impl Default for HoldSection {
    fn default() -> Self {
        let h = HoldConfig::default();
        Self {
            increment: h.increment,
            precision_decimals: h.precision_decimals,
            tolerance: h.tolerance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureSection {
    pub hold_delay_ms: f64,
    pub repeat_interval_ms: f64,
    pub double_click_window_ms: f64,
    pub max_catch_up: u32,
}

impl Default for GestureSection {
    fn default() -> Self {
        let g = GestureTiming::default();
        Self {
            hold_delay_ms: g.hold_delay_s * 1000.0,
            repeat_interval_ms: g.repeat_interval_s * 1000.0,
            double_click_window_ms: g.double_click_window_s * 1000.0,
            max_catch_up: g.max_catch_up,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    #[default]
    Threshold,
    Sampling,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSection {
    pub mode: FilterMode,
    /// Exclusive weight floor for `threshold` mode (0..=100).
    pub floor: f64,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(String),
    Parse(String),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "config io error: {msg}"),
            ConfigError::Parse(msg) => write!(f, "config parse error: {msg}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl ExplorerConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ExplorerConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.viewport().is_valid() {
            return Err(ConfigError::Invalid(format!(
                "surface must be positive: {}x{}",
                self.surface.width, self.surface.height
            )));
        }
        let p = &self.projection;
        if !(p.focal_length.is_finite() && p.focal_length > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "projection.focal_length must be positive: {}",
                p.focal_length
            )));
        }
        if !(p.radius_fraction.is_finite() && p.radius_fraction > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "projection.radius_fraction must be positive: {}",
                p.radius_fraction
            )));
        }
        let c = &self.controller;
        let finite = [
            c.sensitivity,
            c.zoom_step,
            c.min_zoom,
            c.max_zoom,
            c.click_slop_px,
            c.base_hit_radius_px,
        ];
        if finite.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(ConfigError::Invalid(
                "controller values must be finite and non-negative".to_string(),
            ));
        }
        if c.min_zoom <= 0.0 || c.min_zoom > c.max_zoom {
            return Err(ConfigError::Invalid(format!(
                "zoom range is empty: {}..{}",
                c.min_zoom, c.max_zoom
            )));
        }
        if !(self.hold.increment.is_finite() && self.hold.increment > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "hold.increment must be positive: {}",
                self.hold.increment
            )));
        }
        if self.hold.precision_decimals > MAX_PRECISION_DECIMALS {
            return Err(ConfigError::Invalid(format!(
                "hold.precision_decimals must be at most {MAX_PRECISION_DECIMALS}: {}",
                self.hold.precision_decimals
            )));
        }
        if !(self.hold.tolerance.is_finite() && self.hold.tolerance >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "hold.tolerance must be finite and non-negative: {}",
                self.hold.tolerance
            )));
        }
        let g = &self.gestures;
        if [g.hold_delay_ms, g.repeat_interval_ms, g.double_click_window_ms]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(ConfigError::Invalid(
                "gesture timings must be finite and non-negative".to_string(),
            ));
        }
        if g.repeat_interval_ms < MIN_REPEAT_INTERVAL_MS {
            return Err(ConfigError::Invalid(format!(
                "gestures.repeat_interval_ms must be at least {MIN_REPEAT_INTERVAL_MS}: {}",
                g.repeat_interval_ms
            )));
        }
        if !(0.0..=100.0).contains(&self.filter.floor) {
            return Err(ConfigError::Invalid(format!(
                "filter.floor must be within 0..=100: {}",
                self.filter.floor
            )));
        }
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.surface.width, self.surface.height)
    }

    pub fn projection_config(&self) -> ProjectionConfig {
        ProjectionConfig {
            focal_length: self.projection.focal_length,
            radius_fraction: self.projection.radius_fraction,
        }
    }

    pub fn controller_config(&self) -> ControllerConfig {
        let c = &self.controller;
        ControllerConfig {
            sensitivity: c.sensitivity,
            zoom_step: c.zoom_step,
            min_zoom: c.min_zoom,
            max_zoom: c.max_zoom,
            click_slop_px: c.click_slop_px,
            pick: PickOptions {
                base_radius: c.base_hit_radius_px,
            },
        }
    }

    pub fn hold_config(&self) -> HoldConfig {
        HoldConfig {
            increment: self.hold.increment,
            precision_decimals: self.hold.precision_decimals,
            tolerance: self.hold.tolerance,
        }
    }

    pub fn gesture_timing(&self) -> GestureTiming {
        let g = &self.gestures;
        GestureTiming {
            hold_delay_s: g.hold_delay_ms / 1000.0,
            repeat_interval_s: g.repeat_interval_ms / 1000.0,
            double_click_window_s: g.double_click_window_ms / 1000.0,
            max_catch_up: g.max_catch_up,
        }
    }

    pub fn filter_policy(&self) -> FilterPolicy {
        match self.filter.mode {
            FilterMode::Threshold => FilterPolicy::Threshold {
                floor: self.filter.floor,
            },
            FilterMode::Sampling => FilterPolicy::Sampling,
        }
    }
}
