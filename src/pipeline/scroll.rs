//! Circular-scroll detector (CSD), spec.md §4.2.
//!
//! Grounded on `original_source/quantum/pointing_device_drivers.c`'s
//! `circular_scroll()` (lines 262-344) — the only prior art for this exact
//! algorithm; the Rust shape (small state enum + `impl` with `update`)
//! follows InputPlumber driver `translate_*` methods, e.g.
//! `drivers/fts3528/driver.rs::translate`.

use crate::config::PipelineConfig;
use crate::sample::Rotation;

/// Which wheel axis a stroke reports ticks on, chosen at touchdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Vertical,
    Horizontal,
}

/// The three-state gesture recognizer's current phase. `Detecting` is the
/// only non-terminal state within a stroke; `Valid`/`NotScroll` hold until
/// lift (spec.md §3 invariant: "it never transitions backwards within a
/// stroke").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollState {
    #[default]
    Uninit,
    Detecting,
    Valid,
    NotScroll,
}

/// Per-stroke scroll-gesture context, armed at touchdown in the outer
/// annulus and reset on lift.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollCtx {
    /// Touchdown radius, used as the divisor in the tangentiality test.
    mag: f64,
    /// Touchdown position while `Detecting`; becomes the "last sampled
    /// vector" reference once `Valid` (spec.md §4.2's "advance (x0, y0) :=
    /// (x, y)").
    x0: i32,
    y0: i32,
    z_prev: bool,
    pub state: ScrollState,
    axis: Option<Axis>,
}

/// What the CSD contributed this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollOutput {
    pub suppress_touch: bool,
    pub v: i32,
    pub h: i32,
}

impl ScrollCtx {
    /// Processes one centered sample `(x, y)` — already translated so the
    /// pad center is the origin — and returns the tick/suppress output for
    /// this tick.
    pub fn update(&mut self, x: i32, y: i32, touching: bool, center: f64, cfg: &PipelineConfig) -> ScrollOutput {
        if !touching {
            if self.z_prev {
                *self = ScrollCtx::default();
            }
            self.z_prev = false;
            return ScrollOutput::default();
        }

        let rising_edge = !self.z_prev;
        self.z_prev = true;

        if rising_edge {
            return self.on_touchdown(x, y, center, cfg);
        }

        match self.state {
            ScrollState::Uninit => ScrollOutput::default(),
            ScrollState::Detecting => self.on_detecting(x, y, center, cfg),
            ScrollState::Valid => self.on_valid(x, y, cfg),
            ScrollState::NotScroll => ScrollOutput::default(),
        }
    }

    fn on_touchdown(&mut self, x: i32, y: i32, center: f64, cfg: &PipelineConfig) -> ScrollOutput {
        let mag = (x as f64).hypot(y as f64);
        // mag == 0 (touchdown exactly at center) can never satisfy the
        // annulus test below, so Detecting is never entered — spec.md §7's
        // documented division-by-zero guard.
        let ring_floor = (100 - cfg.scroll_ring_pct as i32) as f64 / 100.0;
        if mag / center < ring_floor {
            self.state = ScrollState::Uninit;
            return ScrollOutput::default();
        }

        self.state = ScrollState::Detecting;
        self.x0 = x;
        self.y0 = y;
        self.mag = mag;
        self.axis = Some(if cfg.rotation.is_vertical_axis(x, y) {
            Axis::Vertical
        } else {
            Axis::Horizontal
        });
        log::debug!("scroll: touchdown in annulus, entering Detecting");
        ScrollOutput::default()
    }

    fn on_detecting(&mut self, x: i32, y: i32, center: f64, cfg: &PipelineConfig) -> ScrollOutput {
        let disp = ((x - self.x0) as f64).hypot((y - self.y0) as f64);
        let move_threshold = cfg.scroll_move_pct as f64 / 100.0 * center;
        if disp < move_threshold {
            return ScrollOutput { suppress_touch: true, v: 0, h: 0 };
        }

        let dot = (self.x0 * x + self.y0 * y) as f64;
        let det = (self.x0 * y - self.y0 * x) as f64;
        let scalar_projection = dot / self.mag;
        let scalar_rejection = det / self.mag;
        let parallel = (self.mag - scalar_projection.abs()).abs();
        let perpendicular = scalar_rejection.abs();

        if parallel * cfg.scroll_move_ratio > perpendicular {
            log::debug!("scroll: Detecting -> NotScroll (radial swipe)");
            self.state = ScrollState::NotScroll;
            return ScrollOutput::default();
        }

        log::debug!("scroll: Detecting -> Valid");
        self.state = ScrollState::Valid;
        self.x0 = x;
        self.y0 = y;
        ScrollOutput { suppress_touch: true, v: 0, h: 0 }
    }

    fn on_valid(&mut self, x: i32, y: i32, cfg: &PipelineConfig) -> ScrollOutput {
        let dot = (self.x0 * x + self.y0 * y) as f64;
        let det = (self.x0 * y - self.y0 * x) as f64;
        let ang = det.atan2(dot);
        let ticks = (ang * cfg.scroll_wheel_clicks as f64 / std::f64::consts::PI).round() as i32;

        if ticks.abs() < 1 {
            return ScrollOutput { suppress_touch: true, v: 0, h: 0 };
        }

        self.x0 = x;
        self.y0 = y;
        match self.axis {
            Some(Axis::Vertical) => ScrollOutput { suppress_touch: true, v: -ticks, h: 0 },
            Some(Axis::Horizontal) => ScrollOutput { suppress_touch: true, v: 0, h: ticks },
            None => ScrollOutput { suppress_touch: true, v: 0, h: 0 },
        }
    }
}
