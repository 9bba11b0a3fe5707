//! The Pinnacle sensor's capability interface (spec.md §6), collapsed from
//! InputPlumber's per-driver `poll`/`new` shape the way
//! `input::source::SourceInputDevice` is used across `drivers/*/driver.rs`.

use thiserror::Error;

use crate::sample::Sample;

/// Errors the sensor driver can surface to the pipeline (spec.md §7).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// A single bad sample; the bus transaction failed but the sensor is
    /// otherwise healthy. The pipeline preserves all context and skips the
    /// tick.
    #[error("transient sensor read failure")]
    Transient,
    /// Failure at `init()`; the driver is marked absent and the pipeline
    /// becomes a pass-through no-op.
    #[error("sensor failed to initialize")]
    Permanent,
}

/// The external Cirque Pinnacle driver, consumed by [`crate::pipeline::Pipeline`].
pub trait PinnacleSensor {
    /// Returns `true` when a new sample is ready to be read.
    fn data_ready(&self) -> bool;

    /// Reads and returns the next sample. Only valid to call when
    /// [`PinnacleSensor::data_ready`] returned `true`.
    fn read_data(&mut self) -> Result<Sample, SensorError>;

    /// Rescales `sample`'s native coordinates into `[0, x_scale) x [0,
    /// y_scale)`.
    fn scale(&self, sample: Sample, x_scale: u16, y_scale: u16) -> Sample;

    /// The currently configured reporting resolution ("CPI", exposed by
    /// Pinnacle as "scale").
    fn get_scale(&self) -> u16;

    /// Updates the reporting resolution.
    fn set_scale(&mut self, scale: u16);

    /// Initializes (or re-initializes) the sensor. Returns
    /// [`SensorError::Permanent`] on failure.
    fn init(&mut self) -> Result<(), SensorError>;
}
