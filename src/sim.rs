//! Deterministic in-memory test doubles for [`crate::sensor::PinnacleSensor`]
//! and [`crate::report::MouseSink`], grounded on the `Test` mock driver in
//! `input/source/mod_test.rs`. Used by the pipeline's own unit tests, the
//! integration scenarios under `tests/`, and the `pinnacle-sim` binary's
//! `--script` mode.

use std::collections::VecDeque;

use crate::report::{MouseReport, MouseSink};
use crate::sample::Sample;
use crate::sensor::{PinnacleSensor, SensorError};

enum Entry {
    Sample(Sample),
    Error(SensorError),
}

/// Replays a fixed script of samples (and optionally errors) instead of
/// talking to real Pinnacle hardware.
pub struct ScriptedSensor {
    queue: VecDeque<Entry>,
    scale: u16,
}

impl ScriptedSensor {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self {
            queue: samples.into_iter().map(Entry::Sample).collect(),
            scale: 1024,
        }
    }

    /// A sensor that reports `count` consecutive transient errors, then
    /// goes quiet. Used to exercise spec.md §7's saturating error counter.
    pub fn erroring(count: usize) -> Self {
        Self {
            queue: std::iter::repeat(Entry::Error(SensorError::Transient)).take(count).collect(),
            scale: 1024,
        }
    }

    /// A sensor whose very next `init()` call fails permanently.
    pub fn dead() -> Self {
        Self { queue: VecDeque::new(), scale: 1024 }
    }
}

impl PinnacleSensor for ScriptedSensor {
    fn data_ready(&self) -> bool {
        !self.queue.is_empty()
    }

    fn read_data(&mut self) -> Result<Sample, SensorError> {
        match self.queue.pop_front() {
            Some(Entry::Sample(sample)) => Ok(sample),
            Some(Entry::Error(err)) => Err(err),
            None => Err(SensorError::Transient),
        }
    }

    fn scale(&self, sample: Sample, _x_scale: u16, _y_scale: u16) -> Sample {
        // The script already carries pre-scaled coordinates.
        sample
    }

    fn get_scale(&self) -> u16 {
        self.scale
    }

    fn set_scale(&mut self, scale: u16) {
        self.scale = scale;
    }

    fn init(&mut self) -> Result<(), SensorError> {
        Ok(())
    }
}

/// Records every report sent through it and tallies primary-button
/// press/release transitions so tests can assert tap emission without
/// inspecting raw bitmasks.
#[derive(Debug, Default)]
pub struct ScriptedSink {
    pub reports: Vec<MouseReport>,
    pub presses: u32,
    pub releases: u32,
    staged: Option<MouseReport>,
    last_buttons: u8,
}

impl MouseSink for ScriptedSink {
    fn set_report(&mut self, report: MouseReport) {
        self.staged = Some(report);
    }

    fn send(&mut self) {
        if let Some(report) = self.staged.take() {
            let primary_was_down = self.last_buttons & 0b0000_0001 != 0;
            let primary_is_down = report.buttons & 0b0000_0001 != 0;
            if primary_is_down && !primary_was_down {
                self.presses += 1;
            } else if !primary_is_down && primary_was_down {
                self.releases += 1;
            }
            self.last_buttons = report.buttons;
            self.reports.push(report);
        }
    }
}
