//! Per-pipeline owned context (spec.md §3, §9: "a single `PipelineState`
//! struct owned by the pipeline instance... not process-wide statics").

use thiserror::Error;

use super::glide::GlideCtx;
use super::scroll::{ScrollCtx, ScrollState};
use super::tap::TapCtx;

/// Errors surfaced out of [`super::Pipeline::process_sample`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PipelineError {
    /// The sensor failed at init and is marked absent; the pipeline is a
    /// pass-through no-op (spec.md §7).
    #[error("sensor is not initialized")]
    SensorAbsent,
}

/// All state the pipeline threads across ticks: the three gesture
/// sub-contexts, the last relative-motion reference point, the
/// consecutive-error counter (spec.md §7), and whether the sensor has been
/// disabled by that counter.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineState {
    pub(super) scroll: ScrollCtx,
    pub(super) tap: TapCtx,
    pub(super) glide: GlideCtx,
    /// Last scaled (x, y) observed while touching; 0 sentinels "no prior
    /// touch", matching spec.md §4.5's "or 0 when either endpoint is 0, to
    /// skip the first-touch jump".
    pub(super) last_sx: u16,
    pub(super) last_sy: u16,
    /// Touch state as of the previous tick, used to find lift/touchdown
    /// edges for glide arming independent of the tap detector's own timer.
    pub(super) last_touching: bool,
    /// Saturating count of consecutive `SensorError::Transient` reads.
    pub(super) error_count: u8,
    pub(super) sensor_disabled: bool,
}

impl PipelineState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error_count(&self) -> u8 {
        self.error_count
    }

    pub fn is_sensor_disabled(&self) -> bool {
        self.sensor_disabled
    }

    /// The circular-scroll detector's current phase for the in-flight
    /// stroke (spec.md §3's `ScrollCtx.state`).
    pub fn scroll_state(&self) -> ScrollState {
        self.scroll.state
    }

    /// `true` while post-lift inertial glide is still decaying.
    pub fn glide_active(&self) -> bool {
        self.glide.is_active()
    }
}
