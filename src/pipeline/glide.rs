//! Cursor glide (CG), spec.md §4.4.
//!
//! Grounded on `original_source/quantum/pointing_device_drivers.c`'s
//! `cursor_glide*()` (lines 172-221): uniform-deceleration kinematics
//! projected back onto the lift-off direction, emitted as the integer
//! difference of successive truncated positions.

use crate::clock::elapsed;
use crate::config::PipelineConfig;

/// Post-lift inertial motion integrator. Armed at lift, disarmed once
/// residual speed drops to <=1 unit/axis or a new touch arrives.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlideCtx {
    active: bool,
    v0: f64,
    dx0: i32,
    dy0: i32,
    /// Last truncated projected position, so the emitted delta is an
    /// integer difference rather than a re-truncated float each tick.
    x: i32,
    y: i32,
    counter: u16,
    last_dx: i32,
    last_dy: i32,
    /// Timestamp of the last tick that actually advanced `counter`, so
    /// decay is paced by `GLIDE_INTERVAL_MS` of wall-clock time rather than
    /// by how often `process_sample` happens to be called (spec.md §4.4:
    /// "counter n increments each tick (spaced INTERVAL ms apart)").
    timer: u16,
}

impl GlideCtx {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Carries the latest observed per-tick velocity. Called every tick
    /// while `touching` is true; a new touchdown also cancels any glide
    /// still in flight (spec.md §3: "any new touch zeros dx0/dy0").
    pub fn update(&mut self, dx: i32, dy: i32, touching: bool) {
        if touching {
            self.last_dx = dx;
            self.last_dy = dy;
            if self.active {
                log::debug!("glide: cancelled by new touchdown");
                self.disarm();
            }
        }
    }

    /// Arms glide from the last observed velocity, if not already active.
    /// No-ops when that velocity is zero (spec.md §7's `v0 == 0` guard).
    /// `now` seeds the interval timer so the first tick is paced the same
    /// as every subsequent one.
    pub fn start(&mut self, now: u16) {
        if self.active {
            return;
        }
        let v0 = (self.last_dx as f64).hypot(self.last_dy as f64);
        if v0 == 0.0 {
            return;
        }
        self.active = true;
        self.v0 = v0;
        self.dx0 = self.last_dx;
        self.dy0 = self.last_dy;
        self.counter = 0;
        self.x = 0;
        self.y = 0;
        self.timer = now;
        log::debug!("glide: armed at v0={v0:.2}");
    }

    fn disarm(&mut self) {
        self.active = false;
        self.dx0 = 0;
        self.dy0 = 0;
        self.v0 = 0.0;
    }

    /// Advances the integrator by one tick spaced `GLIDE_INTERVAL_MS`
    /// apart and returns the delta to add to this tick's report, or
    /// `None` if glide is not active or if less than `GLIDE_INTERVAL_MS`
    /// has elapsed since the last tick that advanced `counter` (the host
    /// may call this far more often than the sensor's own sampling rate;
    /// mirrors `cursor_glide_check()`'s `timer_elapsed(...) < interval`
    /// gate so decay is paced by wall-clock time, not call count).
    pub fn tick(&mut self, now: u16, cfg: &PipelineConfig) -> Option<(i32, i32)> {
        if !self.active {
            return None;
        }
        if elapsed(now, self.timer) < cfg.glide_interval_ms {
            return None;
        }
        self.timer = now;
        self.counter += 1;
        let n = self.counter as f64;

        // p(n) peaks at n = v0/coef (the model's kinematic stop); clamp so
        // the projected position doesn't reverse past that point.
        let n_stop = self.v0 / cfg.glide_coef;
        let n_eff = n.min(n_stop);
        let p = self.v0 * n_eff - (cfg.glide_coef / 2.0) * n_eff * n_eff;

        let new_x = (p * self.dx0 as f64 / self.v0) as i32;
        let new_y = (p * self.dy0 as f64 / self.v0) as i32;
        let delta = (new_x - self.x, new_y - self.y);
        self.x = new_x;
        self.y = new_y;

        if delta.0.abs() <= 1 && delta.1.abs() <= 1 {
            log::debug!("glide: residual speed decayed, disarming");
            self.disarm();
        }
        Some(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> PipelineConfig {
        PipelineConfig::default()
    }

    #[test]
    fn zero_velocity_never_arms() {
        let mut g = GlideCtx::default();
        g.update(0, 0, true);
        g.update(0, 0, false);
        g.start(0);
        assert!(!g.is_active());
        assert_eq!(g.tick(0, &cfg()), None);
    }

    #[test]
    fn glide_decelerates_and_terminates() {
        let mut g = GlideCtx::default();
        g.update(20, 0, true);
        g.update(20, 0, false);
        g.start(0);
        assert!(g.is_active());

        let mut now = 0u16;
        let mut prev_speed = f64::MAX;
        let mut ticks = 0;
        loop {
            now = now.wrapping_add(cfg().glide_interval_ms);
            let Some((dx, dy)) = g.tick(now, &cfg()) else {
                break;
            };
            let speed = (dx as f64).hypot(dy as f64);
            assert!(speed <= prev_speed + f64::EPSILON);
            prev_speed = speed;
            ticks += 1;
            assert!(ticks < 1000, "glide failed to terminate");
            if !g.is_active() {
                break;
            }
        }
        assert!(!g.is_active());
        let bound = (20.0 / cfg().glide_coef) as i32 + 1;
        assert!(ticks <= bound);
    }

    #[test]
    fn tick_withholds_motion_until_interval_elapses() {
        let mut g = GlideCtx::default();
        g.update(20, 0, true);
        g.update(20, 0, false);
        g.start(0);
        assert!(g.is_active());

        // Calling far more often than GLIDE_INTERVAL_MS (a faster scan loop
        // than the sensor's own sampling rate) must not speed up the decay.
        assert_eq!(g.tick(1, &cfg()), None);
        assert_eq!(g.tick(2, &cfg()), None);
        assert!(g.tick(cfg().glide_interval_ms, &cfg()).is_some());
    }

    #[test]
    fn new_touchdown_cancels_inflight_glide() {
        let mut g = GlideCtx::default();
        g.update(20, 0, true);
        g.update(20, 0, false);
        g.start(0);
        assert!(g.is_active());
        g.tick(cfg().glide_interval_ms, &cfg());
        g.update(0, 0, true);
        assert!(!g.is_active());
    }
}
