use serde::{Deserialize, Serialize};
use std::{fs, io, ops::RangeInclusive, path::{Path, PathBuf}};

use crate::error::{Error, Result};

// ============================================================================
// Defaults & Bounds
// ============================================================================

pub const DEFAULT_WORK_MINUTES: u32 = 25;
pub const DEFAULT_BREAK_MINUTES: u32 = 5;
pub const WORK_MINUTES_RANGE: RangeInclusive<u32> = 1..=60;
pub const BREAK_MINUTES_RANGE: RangeInclusive<u32> = 1..=30;

const APP_DIR: &str = "focus-garden";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    pub work_minutes: u32,
    pub break_minutes: u32,
    pub sound_enabled: bool,
    pub notifications_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_minutes: DEFAULT_WORK_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
            sound_enabled: true,
            notifications_enabled: true,
        }
    }
}

impl Config {
    /// Reads a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        let config: Config = serde_json::from_str(&raw).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config.clamped())
    }

    pub fn clamped(mut self) -> Self {
        self.work_minutes = clamp_minutes(self.work_minutes, &WORK_MINUTES_RANGE);
        self.break_minutes = clamp_minutes(self.break_minutes, &BREAK_MINUTES_RANGE);
        self
    }
}

fn clamp_minutes(value: u32, range: &RangeInclusive<u32>) -> u32 {
    value.clamp(*range.start(), *range.end())
}

/// Turns raw settings input into a duration in minutes.
///
/// The leading integer is taken (`"12abc"` is 12). Empty, non-numeric and
/// zero input fall back to `default`; anything else is clamped into `range`.
pub fn coerce_minutes(input: &str, default: u32, range: &RangeInclusive<u32>) -> u32 {
    let input = input.trim();
    let (negative, digits) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };
    let digits: String = digits.chars().take_while(|c| c.is_ascii_digit()).collect();

    if digits.chars().all(|c| c == '0') {
        return default;
    }
    if negative {
        return *range.start();
    }
    // Only overflow can fail here, so saturate.
    digits.parse::<u32>().unwrap_or(u32::MAX).clamp(*range.start(), *range.end())
}

pub fn coerce_work_minutes(input: &str) -> u32 {
    coerce_minutes(input, DEFAULT_WORK_MINUTES, &WORK_MINUTES_RANGE)
}

pub fn coerce_break_minutes(input: &str) -> u32 {
    coerce_minutes(input, DEFAULT_BREAK_MINUTES, &BREAK_MINUTES_RANGE)
}

// ============================================================================
// Paths
// ============================================================================

pub fn get_path(filename: &str) -> PathBuf {
    PathBuf::from(".").join(APP_DIR).join(filename)
}

pub fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(data)?)?;
    Ok(())
}
