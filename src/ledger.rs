use chrono::{DateTime, Local};
use serde::Serialize;

/// Decorative symbols a finished work period can bloom into.
pub const FLOWER_SYMBOLS: [&str; 8] = ["🌸", "🌺", "🌻", "🌷", "🌹", "🏵️", "💐", "🌼"];

/// A completed work period. Never changed after it is recorded.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct SessionRecord {
    pub id: u64,
    pub name: String,
    pub completed_at: DateTime<Local>,
    pub duration_minutes: u32,
    pub symbol: &'static str,
}

#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Statistics {
    pub total_sessions: u32,
    pub total_minutes: u64,
    pub flowers_collected: u32,
    pub current_streak: u32,
}

/// Append-only log of completed work periods and the totals derived from it.
#[derive(Debug, Default)]
pub struct SessionLedger {
    records: Vec<SessionRecord>,
    stats: Statistics,
    next_id: u64,
}

impl SessionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        duration_minutes: u32,
        completed_at: DateTime<Local>,
        symbol: &'static str,
    ) -> &SessionRecord {
        self.next_id += 1;
        self.records.push(SessionRecord {
            id: self.next_id,
            name: format!("#{}", self.records.len() + 1),
            completed_at,
            duration_minutes,
            symbol,
        });

        self.stats.total_sessions += 1;
        self.stats.total_minutes += u64::from(duration_minutes);
        self.stats.flowers_collected += 1;
        self.stats.current_streak += 1;

        &self.records[self.records.len() - 1]
    }

    /// Most recent first.
    pub fn recent(&self) -> impl Iterator<Item = &SessionRecord> {
        self.records.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn stats(&self) -> &Statistics {
        &self.stats
    }
}
