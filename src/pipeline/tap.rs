//! Tap detector (TD), spec.md §4.3.
//!
//! Grounded on `original_source/quantum/pointing_device_drivers.c`'s
//! `trackpad_tap()` (lines 124-147); the two-flush press/release pattern
//! mirrors `drivers/lego/touchpad_driver.rs::start_tap`/`release_tap`.

use crate::clock::{elapsed, Clock};
use crate::config::PipelineConfig;
use crate::report::{ButtonId, MouseReport, MouseSink};

/// Lift-timer debounce state. `timer == 0` is the documented sentinel for
/// "idle/expired" (spec.md §3).
#[derive(Debug, Clone, Copy, Default)]
pub struct TapCtx {
    timer: u16,
    z_prev: bool,
}

impl TapCtx {
    /// `true` once the debounce window has expired and no tap is pending.
    pub fn is_idle(&self) -> bool {
        self.timer == 0
    }

    /// Observes one tick's touch state and, on a qualifying tap, flushes a
    /// synthetic press-and-release pair to `sink`. Returns `true` when a
    /// tap was emitted this tick.
    ///
    /// Runs independently of CSD/CG — it only ever looks at the raw
    /// `touching` transition, never at motion deltas (spec.md §4.3: "The
    /// detector shares the same MouseReport stream as motion; it mutates
    /// `buttons` only").
    pub fn update(
        &mut self,
        touching: bool,
        now: u16,
        cfg: &PipelineConfig,
        clock: &dyn Clock,
        sink: &mut dyn MouseSink,
    ) -> bool {
        let was_touching = self.z_prev;
        let mut tap_emitted = false;

        if touching && !was_touching {
            self.timer = now;
            self.z_prev = true;
        } else if !touching && was_touching {
            if self.timer != 0 && elapsed(now, self.timer) < cfg.tapping_term_ms {
                log::debug!("tap: emitting synthetic button-1 press+release");
                let mask = sink.handle_buttons(0, true, ButtonId::Primary);
                sink.set_report(MouseReport { buttons: mask, ..MouseReport::default() });
                sink.send();
                clock.sleep(cfg.tap_code_delay_ms);
                let mask = sink.handle_buttons(mask, false, ButtonId::Primary);
                sink.set_report(MouseReport { buttons: mask, ..MouseReport::default() });
                sink.send();
                tap_emitted = true;
            }
            self.timer = now;
            self.z_prev = false;
        } else if self.timer != 0 && elapsed(now, self.timer) > cfg.touch_debounce_ms {
            self.timer = 0;
        }

        tap_emitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    #[derive(Default)]
    struct RecordingSink {
        reports: Vec<MouseReport>,
    }

    impl MouseSink for RecordingSink {
        fn set_report(&mut self, report: MouseReport) {
            self.reports.push(report);
        }
        fn send(&mut self) {}
    }

    #[test]
    fn short_touch_emits_press_and_release() {
        let mut ctx = TapCtx::default();
        let cfg = PipelineConfig::default();
        let clock = ManualClock::new();
        let mut sink = RecordingSink::default();

        assert!(!ctx.update(true, 0, &cfg, &clock, &mut sink));
        assert!(ctx.update(false, 50, &cfg, &clock, &mut sink));

        assert_eq!(sink.reports.len(), 2);
        assert_eq!(sink.reports[0].buttons, 0b0000_0001);
        assert_eq!(sink.reports[1].buttons, 0);
    }

    #[test]
    fn long_press_emits_nothing() {
        let mut ctx = TapCtx::default();
        let cfg = PipelineConfig::default();
        let clock = ManualClock::new();
        let mut sink = RecordingSink::default();

        assert!(!ctx.update(true, 0, &cfg, &clock, &mut sink));
        assert!(!ctx.update(false, 500, &cfg, &clock, &mut sink));
        assert!(sink.reports.is_empty());
    }

    #[test]
    fn idle_rest_clears_timer_after_debounce() {
        let mut ctx = TapCtx::default();
        let cfg = PipelineConfig::default();
        let clock = ManualClock::new();
        let mut sink = RecordingSink::default();

        ctx.update(true, 0, &cfg, &clock, &mut sink);
        ctx.update(false, 50, &cfg, &clock, &mut sink);
        assert!(!ctx.is_idle());
        ctx.update(false, 50u16.wrapping_add(cfg.touch_debounce_ms + 1), &cfg, &clock, &mut sink);
        assert!(ctx.is_idle());
    }
}
