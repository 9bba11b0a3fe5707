//! Raw and scaled touchpad sample types.

/// One sample read from the Pinnacle sensor, already rescaled into
/// `[0, scale) x [0, scale)` by [`crate::sensor::PinnacleSensor::scale`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize)]
pub struct Sample {
    pub x: u16,
    pub y: u16,
    /// Raw pressure reading. `0` means no touch.
    pub z: u16,
    pub touch_down: bool,
}

impl Sample {
    pub fn is_touching(&self) -> bool {
        self.touch_down && self.z > 0
    }
}

/// Physical mounting rotation of the pad, applied to the circular-scroll
/// axis-selection predicate.
///
/// The source firmware picks the scroll axis from which half of the pad a
/// stroke starts in; which half counts as "vertical" rotates with the pad.
/// The predicate itself is preserved exactly per variant rather than
/// derived algebraically, matching the original `#if
/// POINTING_DEVICE_ROTATION_*` ladder it was grounded on: vertical fires on
/// `scroll.axis == 0`, i.e. the right half at rotation 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Returns `true` when a touchdown at centered coordinates `(x, y)`
    /// should scroll vertically rather than horizontally.
    pub fn is_vertical_axis(&self, x: i32, y: i32) -> bool {
        match self {
            Rotation::Deg0 => x >= 0,
            Rotation::Deg90 => y >= 0,
            Rotation::Deg180 => x <= 0,
            Rotation::Deg270 => y <= 0,
        }
    }
}
