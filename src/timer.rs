//! Countdown state machine.
//!
//! The engine has no clock of its own. The caller drives it with one `tick()`
//! per elapsed second while it is running.
//!
//! ```text
//!            start/pause                 start/pause
//!   Working ─────────────► Working   OnBreak ─────────► OnBreak
//!   paused  ◄───────────── running   paused  ◄───────── running
//!                             │  tick hits 0              │  tick hits 0
//!                             └──────► OnBreak paused     └──► Working paused
//! ```

use tracing::debug;

use crate::config::{BREAK_MINUTES_RANGE, WORK_MINUTES_RANGE};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Working,
    OnBreak,
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Working => "🧠 FOCUS TIME",
            Self::OnBreak => "☕ BREAK",
        }
    }
}

/// What a tick that reached zero just finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    /// A work period of `minutes` length ran to the end.
    Work { minutes: u32 },
    Break,
}

#[derive(Clone, Debug)]
pub struct TimerEngine {
    mode: Mode,
    running: bool,
    remaining_secs: u32,
    /// Length of the period currently counting down.
    period_secs: u32,
    work_minutes: u32,
    break_minutes: u32,
    growth: f64,
}

impl TimerEngine {
    pub fn new(work_minutes: u32, break_minutes: u32) -> Self {
        let work_minutes = work_minutes.clamp(*WORK_MINUTES_RANGE.start(), *WORK_MINUTES_RANGE.end());
        let break_minutes = break_minutes.clamp(*BREAK_MINUTES_RANGE.start(), *BREAK_MINUTES_RANGE.end());
        Self {
            mode: Mode::Working,
            running: false,
            remaining_secs: work_minutes * 60,
            period_secs: work_minutes * 60,
            work_minutes,
            break_minutes,
            growth: 0.0,
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn work_minutes(&self) -> u32 {
        self.work_minutes
    }

    pub fn break_minutes(&self) -> u32 {
        self.break_minutes
    }

    /// Growth percentage, 0.0 ..= 100.0. Always 0 on break.
    pub fn growth(&self) -> f64 {
        self.growth
    }

    /// Elapsed fraction of the current period, for the break gauge.
    pub fn period_ratio(&self) -> f64 {
        if self.period_secs == 0 {
            return 0.0;
        }
        (1.0 - self.remaining_secs as f64 / self.period_secs as f64).clamp(0.0, 1.0)
    }

    fn configured_secs(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Working => self.work_minutes * 60,
            Mode::OnBreak => self.break_minutes * 60,
        }
    }

    fn work_progress(&self) -> f64 {
        let total = self.period_secs as f64;
        (total - self.remaining_secs as f64) / total * 100.0
    }

    // ========================================================================
    // Commands
    // ========================================================================

    pub fn start(&mut self) {
        if self.running || self.remaining_secs == 0 {
            return;
        }
        if self.mode == Mode::Working {
            self.growth = self.work_progress();
        }
        self.running = true;
        debug!(mode = ?self.mode, remaining = self.remaining_secs, "timer started");
    }

    pub fn pause(&mut self) {
        if self.running {
            self.running = false;
            debug!(mode = ?self.mode, remaining = self.remaining_secs, "timer paused");
        }
    }

    pub fn toggle(&mut self) {
        if self.running {
            self.pause();
        } else {
            self.start();
        }
    }

    pub fn reset(&mut self) {
        self.running = false;
        self.begin_period(self.mode);
    }

    /// Advances the countdown by one second.
    pub fn tick(&mut self) -> Option<Completion> {
        if !self.running || self.remaining_secs == 0 {
            return None;
        }

        self.remaining_secs -= 1;
        if self.mode == Mode::Working {
            self.growth = self.work_progress();
        }

        if self.remaining_secs == 0 {
            Some(self.complete())
        } else {
            None
        }
    }

    fn complete(&mut self) -> Completion {
        self.running = false;
        match self.mode {
            Mode::Working => {
                let minutes = self.period_secs / 60;
                self.begin_period(Mode::OnBreak);
                Completion::Work { minutes }
            }
            Mode::OnBreak => {
                self.begin_period(Mode::Working);
                Completion::Break
            }
        }
    }

    fn begin_period(&mut self, mode: Mode) {
        self.mode = mode;
        self.period_secs = self.configured_secs(mode);
        self.remaining_secs = self.period_secs;
        self.growth = 0.0;
    }

    /// Stops a running work period and kills its growth. The countdown keeps
    /// its place. Returns whether anything was stopped.
    pub fn abort_work(&mut self) -> bool {
        if !(self.running && self.mode == Mode::Working) {
            return false;
        }
        self.running = false;
        self.growth = 0.0;
        true
    }

    pub fn set_work_minutes(&mut self, minutes: u32) {
        self.work_minutes = minutes.clamp(*WORK_MINUTES_RANGE.start(), *WORK_MINUTES_RANGE.end());
        if self.mode == Mode::Working && !self.running {
            self.begin_period(Mode::Working);
        }
    }

    pub fn set_break_minutes(&mut self, minutes: u32) {
        self.break_minutes = minutes.clamp(*BREAK_MINUTES_RANGE.start(), *BREAK_MINUTES_RANGE.end());
        if self.mode == Mode::OnBreak && !self.running {
            self.begin_period(Mode::OnBreak);
        }
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_WORK_MINUTES, crate::config::DEFAULT_BREAK_MINUTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_ticks(engine: &mut TimerEngine, n: u32) -> Option<Completion> {
        let mut last = None;
        for _ in 0..n {
            if let Some(c) = engine.tick() {
                last = Some(c);
            }
        }
        last
    }

    #[test]
    fn starts_paused_in_work_mode() {
        let engine = TimerEngine::default();
        assert_eq!(engine.mode(), Mode::Working);
        assert!(!engine.is_running());
        assert_eq!(engine.remaining_secs(), 25 * 60);
        assert_eq!(engine.growth(), 0.0);
    }

    #[test]
    fn tick_while_paused_does_nothing() {
        let mut engine = TimerEngine::default();
        assert_eq!(engine.tick(), None);
        assert_eq!(engine.remaining_secs(), 25 * 60);
    }

    #[test]
    fn toggle_starts_and_pauses() {
        let mut engine = TimerEngine::default();
        engine.toggle();
        assert!(engine.is_running());
        engine.tick();
        engine.toggle();
        assert!(!engine.is_running());
        assert_eq!(engine.remaining_secs(), 25 * 60 - 1);
    }

    #[test]
    fn growth_follows_elapsed_time() {
        let mut engine = TimerEngine::new(1, 1);
        engine.start();
        run_ticks(&mut engine, 15);
        assert_eq!(engine.growth(), 25.0);
        run_ticks(&mut engine, 15);
        assert_eq!(engine.growth(), 50.0);
    }

    #[test]
    fn growth_reaches_100_on_the_last_tick_only() {
        let mut engine = TimerEngine::new(1, 1);
        engine.start();
        run_ticks(&mut engine, 59);
        assert!(engine.growth() < 100.0);
        assert_eq!(engine.remaining_secs(), 1);

        assert_eq!(engine.tick(), Some(Completion::Work { minutes: 1 }));
        assert_eq!(engine.mode(), Mode::OnBreak);
        assert_eq!(engine.growth(), 0.0);
    }

    #[test]
    fn work_completion_switches_to_paused_break() {
        let mut engine = TimerEngine::new(25, 5);
        engine.start();
        let done = run_ticks(&mut engine, 1500);
        assert_eq!(done, Some(Completion::Work { minutes: 25 }));
        assert!(!engine.is_running());
        assert_eq!(engine.mode(), Mode::OnBreak);
        assert_eq!(engine.remaining_secs(), 5 * 60);
    }

    #[test]
    fn break_completion_switches_back_to_work() {
        let mut engine = TimerEngine::new(1, 2);
        engine.start();
        run_ticks(&mut engine, 60);
        engine.start();
        assert_eq!(run_ticks(&mut engine, 120), Some(Completion::Break));
        assert_eq!(engine.mode(), Mode::Working);
        assert_eq!(engine.remaining_secs(), 60);
        assert!(!engine.is_running());
    }

    #[test]
    fn growth_stays_zero_on_break() {
        let mut engine = TimerEngine::new(1, 1);
        engine.start();
        run_ticks(&mut engine, 60);
        engine.start();
        run_ticks(&mut engine, 30);
        assert_eq!(engine.growth(), 0.0);
    }

    #[test]
    fn reset_restores_current_mode_duration() {
        let mut engine = TimerEngine::new(10, 3);
        engine.start();
        run_ticks(&mut engine, 42);
        engine.reset();
        assert!(!engine.is_running());
        assert_eq!(engine.remaining_secs(), 600);
        assert_eq!(engine.growth(), 0.0);
    }

    #[test]
    fn editing_active_paused_mode_rebases_remaining() {
        let mut engine = TimerEngine::new(1, 5);
        engine.start();
        run_ticks(&mut engine, 60);
        assert_eq!(engine.mode(), Mode::OnBreak);

        engine.set_break_minutes(10);
        assert_eq!(engine.remaining_secs(), 600);
    }

    #[test]
    fn editing_while_running_only_affects_future_periods() {
        let mut engine = TimerEngine::new(2, 5);
        engine.start();
        run_ticks(&mut engine, 30);
        engine.set_work_minutes(50);
        assert_eq!(engine.remaining_secs(), 90);
        assert_eq!(engine.growth(), 25.0);

        assert_eq!(run_ticks(&mut engine, 90), Some(Completion::Work { minutes: 2 }));
        engine.start();
        run_ticks(&mut engine, 300);
        assert_eq!(engine.remaining_secs(), 50 * 60);
    }

    #[test]
    fn editing_other_mode_does_not_touch_countdown() {
        let mut engine = TimerEngine::new(25, 5);
        engine.set_break_minutes(20);
        assert_eq!(engine.remaining_secs(), 25 * 60);
        assert_eq!(engine.break_minutes(), 20);
    }

    #[test]
    fn abort_only_applies_to_running_work() {
        let mut engine = TimerEngine::new(1, 1);
        assert!(!engine.abort_work());

        engine.start();
        run_ticks(&mut engine, 10);
        assert!(engine.abort_work());
        assert!(!engine.is_running());
        assert_eq!(engine.growth(), 0.0);
        assert_eq!(engine.remaining_secs(), 50);

        engine.start();
        run_ticks(&mut engine, 50);
        engine.start();
        assert!(!engine.abort_work());
        assert!(engine.is_running());
    }

    #[test]
    fn resume_keeps_growth_consistent() {
        let mut engine = TimerEngine::new(1, 1);
        engine.start();
        run_ticks(&mut engine, 30);
        engine.pause();
        engine.start();
        assert_eq!(engine.growth(), 50.0);
    }
}
