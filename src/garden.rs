//! Pure derivations from engine and ledger state for display.

use crate::ledger::Statistics;

pub const DAILY_GOAL_MINUTES: u64 = 8 * 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlantStage {
    Seed,
    Sprout,
    Growing,
    AlmostThere,
    Flower,
}

impl PlantStage {
    pub fn from_growth(growth: f64) -> Self {
        match growth {
            g if g < 25.0 => Self::Seed,
            g if g < 50.0 => Self::Sprout,
            g if g < 75.0 => Self::Growing,
            g if g < 100.0 => Self::AlmostThere,
            _ => Self::Flower,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Seed => "🌱",
            Self::Sprout => "🌿",
            Self::Growing => "🌾",
            Self::AlmostThere => "🪴",
            Self::Flower => "🌺",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Seed => "Seed",
            Self::Sprout => "Sprout",
            Self::Growing => "Growing",
            Self::AlmostThere => "Almost there",
            Self::Flower => "Flower!",
        }
    }
}

/// `MM:SS`
pub fn format_time(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// `"{h}h {m}m"`
pub fn format_focus_time(minutes: u64) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Share of the daily goal reached, 0 ..= 100.
pub fn daily_goal_percent(stats: &Statistics) -> u16 {
    (stats.total_minutes.min(DAILY_GOAL_MINUTES) * 100 / DAILY_GOAL_MINUTES) as u16
}
