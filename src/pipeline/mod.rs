//! Orchestration: the fixed-order composition of Acquisition -> CSD ->
//! relative-motion diff -> TD -> CG (spec.md §4.5), grounded on
//! `original_source/quantum/pointing_device_drivers.c`'s
//! `cirque_pinnacle_get_report()` (lines 347-408); the outer
//! poll-and-translate shape follows
//! `drivers/fts3528/driver.rs::poll`/`handle_input_report`.

mod glide;
mod scroll;
mod state;
mod tap;

pub use glide::GlideCtx;
pub use scroll::{Axis, ScrollCtx, ScrollState};
pub use state::{PipelineError, PipelineState};
pub use tap::TapCtx;

use crate::clock::Clock;
use crate::config::PipelineConfig;
use crate::report::{MouseReport, MouseSink};
use crate::sample::Sample;
use crate::sensor::{PinnacleSensor, SensorError};

/// Owns the sensor, HID sink, timebase and all pipeline state; the single
/// caller that drives `process_sample` once per scan-loop tick (spec.md
/// §5: "no concurrency").
pub struct Pipeline<S, T, C> {
    sensor: S,
    sink: T,
    clock: C,
    config: PipelineConfig,
    state: PipelineState,
}

impl<S, T, C> Pipeline<S, T, C>
where
    S: PinnacleSensor,
    T: MouseSink,
    C: Clock,
{
    pub fn new(sensor: S, sink: T, clock: C, config: PipelineConfig) -> Self {
        Self {
            sensor,
            sink,
            clock,
            config,
            state: PipelineState::new(),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    /// Read-only access to the HID sink, so callers (and tests, via a
    /// recording sink) can inspect everything flushed so far without the
    /// pipeline itself needing to buffer history.
    pub fn sink(&self) -> &T {
        &self.sink
    }

    /// Mutable access to the timebase, so a harness driving a [`ManualClock`](crate::clock::ManualClock)
    /// can advance it between ticks.
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Read-through CPI accessor (spec.md §9's "capability interface with
    /// four methods": `init`/`get_report`/`get_cpi`/`set_cpi`).
    pub fn cpi(&self) -> u16 {
        self.sensor.get_scale()
    }

    pub fn set_cpi(&mut self, cpi: u16) {
        self.sensor.set_scale(cpi);
    }

    /// Initializes the underlying sensor. A permanent failure marks the
    /// sensor absent; subsequent `process_sample` calls become a
    /// pass-through no-op (spec.md §7).
    pub fn init(&mut self) -> Result<(), PipelineError> {
        match self.sensor.init() {
            Ok(()) => {
                self.state.sensor_disabled = false;
                self.state.error_count = 0;
                Ok(())
            }
            Err(SensorError::Permanent) => {
                self.state.sensor_disabled = true;
                Err(PipelineError::SensorAbsent)
            }
            Err(SensorError::Transient) => Ok(()),
        }
    }

    /// Converts one Pinnacle sample into a HID mouse report. Returns a
    /// zeroed report when no sample is available, when the sensor has been
    /// disabled by repeated transient errors, or when glide is the only
    /// active contributor and still mid-decay.
    pub fn process_sample(&mut self) -> MouseReport {
        if self.state.sensor_disabled {
            return MouseReport::default();
        }

        let now = self.clock.now();
        let sample = self.acquire();

        if sample.is_none() && !self.state.glide.is_active() {
            return MouseReport::default();
        }

        let touching = sample.map(|s| s.is_touching()).unwrap_or(false);
        let (sx, sy) = sample.map(|s| (s.x, s.y)).unwrap_or((0, 0));

        let center = self.config.scale as f64 / 2.0;
        let (cx, cy) = (sx as i32 - center as i32, sy as i32 - center as i32);

        let scroll_out = if sample.is_some() {
            self.state.scroll.update(cx, cy, touching, center, &self.config)
        } else {
            Default::default()
        };

        let mut dx = 0i32;
        let mut dy = 0i32;
        if !scroll_out.suppress_touch && touching {
            if self.state.last_sx != 0 && self.state.last_sy != 0 {
                dx = sx as i32 - self.state.last_sx as i32;
                dy = sy as i32 - self.state.last_sy as i32;
            }
            self.state.last_sx = sx;
            self.state.last_sy = sy;
        } else if !touching {
            self.state.last_sx = 0;
            self.state.last_sy = 0;
        }

        self.state.glide.update(dx, dy, touching);

        let lift_edge = self.state.last_touching && !touching;
        if lift_edge && !self.state.glide.is_active() {
            self.state.glide.start(now);
        }

        if !touching {
            if let Some((gx, gy)) = self.state.glide.tick(now, &self.config) {
                dx = gx;
                dy = gy;
            }
        }

        self.state.tap.update(touching, now, &self.config, &self.clock, &mut self.sink);

        self.state.last_touching = touching;

        let report = MouseReport::clamped(dx, dy, scroll_out.v, scroll_out.h, 0);
        log::trace!("pinnacle: sx={sx} sy={sy} touching={touching} report={report:?}");
        self.sink.set_report(report);
        self.sink.send();
        report
    }

    fn acquire(&mut self) -> Option<Sample> {
        if !self.sensor.data_ready() {
            return None;
        }
        match self.sensor.read_data() {
            Ok(raw) => {
                self.state.error_count = 0;
                let scale = self.config.scale;
                Some(self.sensor.scale(raw, scale, scale))
            }
            Err(SensorError::Transient) => {
                self.state.error_count = self.state.error_count.saturating_add(1);
                log::warn!("pinnacle: transient sensor error ({})", self.state.error_count);
                if self.state.error_count >= self.config.max_consecutive_errors {
                    log::error!("pinnacle: {} consecutive errors, disabling sensor", self.state.error_count);
                    self.state.sensor_disabled = true;
                }
                None
            }
            Err(SensorError::Permanent) => {
                log::error!("pinnacle: permanent sensor error, disabling");
                self.state.sensor_disabled = true;
                None
            }
        }
    }
}
