use chrono::Local;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{info, warn};

use crate::{
    ledger::{SessionLedger, FLOWER_SYMBOLS},
    timer::{Completion, TimerEngine},
};

/// Something the user should be told about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Bloomed { symbol: &'static str, name: String },
    BreakOver,
    Wilted,
}

impl Notice {
    pub fn title(&self) -> String {
        match self {
            Self::Bloomed { symbol, .. } => format!("{symbol} A flower bloomed!"),
            Self::BreakOver => "🌿 Break is over".into(),
            Self::Wilted => "💀 Your sprout died!".into(),
        }
    }

    pub fn body(&self) -> String {
        match self {
            Self::Bloomed { name, .. } => format!("Great work! Flower {name} joined your garden."),
            Self::BreakOver => "Ready for another session?".into(),
            Self::Wilted => "You left the garden and the plant withered.".into(),
        }
    }

    pub fn destructive(&self) -> bool {
        matches!(self, Self::Wilted)
    }
}

/// Everything that lives for one run of the app: the countdown, the garden
/// and the randomness that picks each flower.
pub struct FocusSession<R: Rng = StdRng> {
    engine: TimerEngine,
    ledger: SessionLedger,
    rng: R,
}

impl FocusSession<StdRng> {
    pub fn seeded(engine: TimerEngine, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(engine, rng)
    }
}

impl<R: Rng> FocusSession<R> {
    pub fn with_rng(engine: TimerEngine, rng: R) -> Self {
        Self {
            engine,
            ledger: SessionLedger::new(),
            rng,
        }
    }

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn ledger(&self) -> &SessionLedger {
        &self.ledger
    }

    pub fn toggle(&mut self) {
        self.engine.toggle();
    }

    pub fn start(&mut self) {
        self.engine.start();
    }

    pub fn pause(&mut self) {
        self.engine.pause();
    }

    pub fn reset(&mut self) {
        self.engine.reset();
    }

    pub fn set_work_minutes(&mut self, minutes: u32) {
        self.engine.set_work_minutes(minutes);
    }

    pub fn set_break_minutes(&mut self, minutes: u32) {
        self.engine.set_break_minutes(minutes);
    }

    pub fn tick(&mut self) -> Option<Notice> {
        match self.engine.tick()? {
            Completion::Work { minutes } => {
                let symbol = FLOWER_SYMBOLS[self.rng.gen_range(0..FLOWER_SYMBOLS.len())];
                let record = self.ledger.record(minutes, Local::now(), symbol);
                info!(name = %record.name, minutes, symbol, "work period completed");
                Some(Notice::Bloomed {
                    symbol,
                    name: record.name.clone(),
                })
            }
            Completion::Break => {
                info!("break completed");
                Some(Notice::BreakOver)
            }
        }
    }

    /// The user looked away. A running work period stops and its plant dies.
    pub fn page_hidden(&mut self) -> Option<Notice> {
        if self.engine.abort_work() {
            warn!("focus lost during work period, plant withered");
            Some(Notice::Wilted)
        } else {
            None
        }
    }
}
