//! Every tunable from spec.md §6's parameter table, loadable from YAML the
//! same way InputPlumber loads a [`crate::config`]'s-worth of device
//! profile (ground: `config::mod::DeviceProfile::from_yaml`/
//! `from_yaml_file`).

use std::io::Read;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sample::Rotation;

/// Errors loading a [`PipelineConfig`] from disk.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("unable to deserialize config: {0}")]
    Deserialize(#[from] serde_yaml::Error),
    #[error("config too large, reached maximum size of {0} bytes")]
    MaximumSizeReached(usize),
}

/// Compile-time-constant tunables (spec.md §6), represented as a runtime
/// config struct so the simulation binary and tests can vary them without
/// recompiling — spec.md §9 asks for "configuration fields at
/// construction", not preprocessor flags.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PipelineConfig {
    /// Square coordinate range samples are rescaled into; SCALE in spec.md.
    pub scale: u16,
    /// Outer annulus thickness as % of half-diagonal.
    pub scroll_ring_pct: u8,
    /// Minimum displacement from touchdown to commit Detecting -> {Valid, NotScroll}.
    pub scroll_move_pct: u8,
    /// Radial:tangential threshold; higher = stricter circular.
    pub scroll_move_ratio: f64,
    /// Ticks per pi radians (half revolution).
    pub scroll_wheel_clicks: u16,
    /// Max touch duration interpreted as a tap.
    pub tapping_term_ms: u16,
    /// Idle threshold before a new tap window opens.
    pub touch_debounce_ms: u16,
    /// Delay between synthetic press and release.
    pub tap_code_delay_ms: u16,
    /// Deceleration per tick^2 applied by the glide integrator.
    pub glide_coef: f64,
    /// Tick spacing while gliding.
    pub glide_interval_ms: u16,
    /// Physical mounting rotation, remaps the scroll axis-selection predicate.
    pub rotation: Rotation,
    /// Consecutive transient sensor errors tolerated before the sensor is
    /// considered disabled (spec.md §7).
    pub max_consecutive_errors: u8,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            scale: 1024,
            scroll_ring_pct: 33,
            scroll_move_pct: 6,
            scroll_move_ratio: 1.2,
            scroll_wheel_clicks: 9,
            tapping_term_ms: 200,
            touch_debounce_ms: 200 * 8,
            tap_code_delay_ms: 0,
            glide_coef: 0.4,
            glide_interval_ms: 10,
            rotation: Rotation::Deg0,
            max_consecutive_errors: 20,
        }
    }
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Load a [`PipelineConfig`] from the given YAML string.
    pub fn from_yaml_str(content: &str) -> Result<PipelineConfig, ConfigError> {
        let config: PipelineConfig = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Load a [`PipelineConfig`] from the given YAML file.
    pub fn from_yaml_file(path: &str) -> Result<PipelineConfig, ConfigError> {
        let file = std::fs::File::open(path)?;

        // Read up to a defined maximum size to prevent denial of service
        const MAX_SIZE: usize = 512 * 1024;
        let mut reader = file.take(MAX_SIZE as u64);
        let mut content = String::default();
        let bytes_read = reader.read_to_string(&mut content)?;
        if bytes_read == MAX_SIZE {
            return Err(ConfigError::MaximumSizeReached(MAX_SIZE));
        }
        Self::from_yaml_str(&content)
    }
}

/// Builder for [`PipelineConfig`], so callers only need to name the
/// tunables they want to deviate from the documented defaults.
#[derive(Debug, Default, Clone, Copy)]
pub struct PipelineConfigBuilder {
    config: PipelineConfigOverride,
}

#[derive(Debug, Default, Clone, Copy)]
struct PipelineConfigOverride {
    base: Option<PipelineConfig>,
}

impl PipelineConfigBuilder {
    fn base(&self) -> PipelineConfig {
        self.config.base.unwrap_or_default()
    }

    pub fn scale(mut self, scale: u16) -> Self {
        let mut c = self.base();
        c.scale = scale;
        self.config.base = Some(c);
        self
    }

    pub fn scroll_ring_pct(mut self, pct: u8) -> Self {
        let mut c = self.base();
        c.scroll_ring_pct = pct;
        self.config.base = Some(c);
        self
    }

    pub fn scroll_move_pct(mut self, pct: u8) -> Self {
        let mut c = self.base();
        c.scroll_move_pct = pct;
        self.config.base = Some(c);
        self
    }

    pub fn scroll_move_ratio(mut self, ratio: f64) -> Self {
        let mut c = self.base();
        c.scroll_move_ratio = ratio;
        self.config.base = Some(c);
        self
    }

    pub fn scroll_wheel_clicks(mut self, clicks: u16) -> Self {
        let mut c = self.base();
        c.scroll_wheel_clicks = clicks;
        self.config.base = Some(c);
        self
    }

    pub fn tapping_term_ms(mut self, ms: u16) -> Self {
        let mut c = self.base();
        c.tapping_term_ms = ms;
        self.config.base = Some(c);
        self
    }

    pub fn touch_debounce_ms(mut self, ms: u16) -> Self {
        let mut c = self.base();
        c.touch_debounce_ms = ms;
        self.config.base = Some(c);
        self
    }

    pub fn tap_code_delay_ms(mut self, ms: u16) -> Self {
        let mut c = self.base();
        c.tap_code_delay_ms = ms;
        self.config.base = Some(c);
        self
    }

    pub fn glide_coef(mut self, coef: f64) -> Self {
        let mut c = self.base();
        c.glide_coef = coef;
        self.config.base = Some(c);
        self
    }

    pub fn glide_interval_ms(mut self, ms: u16) -> Self {
        let mut c = self.base();
        c.glide_interval_ms = ms;
        self.config.base = Some(c);
        self
    }

    pub fn rotation(mut self, rotation: Rotation) -> Self {
        let mut c = self.base();
        c.rotation = rotation;
        self.config.base = Some(c);
        self
    }

    pub fn max_consecutive_errors(mut self, max: u8) -> Self {
        let mut c = self.base();
        c.max_consecutive_errors = max;
        self.config.base = Some(c);
        self
    }

    pub fn build(self) -> PipelineConfig {
        self.base()
    }
}
