use std::time::{Duration, Instant};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// The one periodic timer driving the countdown.
///
/// There is a single deadline slot, so arming twice cannot produce two
/// tickers. Disarming clears the slot.
#[derive(Debug, Default)]
pub struct Ticker {
    next: Option<Instant>,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.next.is_some()
    }

    pub fn arm(&mut self, now: Instant) {
        if self.next.is_none() {
            self.next = Some(now + TICK_PERIOD);
        }
    }

    pub fn disarm(&mut self) {
        self.next = None;
    }

    /// Arms or disarms to match `running`.
    pub fn sync(&mut self, running: bool, now: Instant) {
        if running {
            self.arm(now);
        } else {
            self.disarm();
        }
    }

    /// Whole periods elapsed since the last firing. Moves the deadline past
    /// every period it reports.
    pub fn due(&mut self, now: Instant) -> u32 {
        let Some(mut next) = self.next else {
            return 0;
        };
        let mut fired = 0;
        while next <= now {
            fired += 1;
            next += TICK_PERIOD;
        }
        self.next = Some(next);
        fired
    }
}
