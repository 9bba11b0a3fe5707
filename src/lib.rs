//! Cirque Pinnacle touchpad pointing-device pipeline.
//!
//! This crate is the pointing-device processing core of a keyboard
//! firmware: it converts raw capacitive-touchpad samples into host mouse
//! reports (motion deltas, tap clicks, circular-scroll wheel ticks and
//! post-lift inertial glide). It does not talk to hardware itself — the
//! sensor and HID sink are both capability traits, supplied by the caller.

pub mod clock;
pub mod config;
pub mod pipeline;
pub mod report;
pub mod sample;
pub mod sensor;
pub mod sim;

pub use clock::{Clock, WrappingMillis};
pub use config::{ConfigError, PipelineConfig, PipelineConfigBuilder};
pub use pipeline::{Pipeline, PipelineError};
pub use report::{ButtonId, MouseReport, MouseSink};
pub use sample::{Rotation, Sample};
pub use sensor::{PinnacleSensor, SensorError};
