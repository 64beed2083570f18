use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use notify_rust::{Notification, Urgency};
use serde::Serialize;
use std::{
    path::PathBuf,
    time::{Duration, Instant},
};
use tracing::{info, warn};

use crate::{
    config::{self, Config},
    error::Result,
    ledger::{SessionRecord, Statistics},
    session::{FocusSession, Notice},
    ticker::Ticker,
    timer::TimerEngine,
};

const TOAST_TTL: Duration = Duration::from_secs(4);

// ============================================================================
// Views
// ============================================================================

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum View {
    Timer,
    Garden,
    Stats,
    Settings,
}

impl View {
    pub const ALL: [View; 4] = [View::Timer, View::Garden, View::Stats, View::Settings];

    pub fn title(self) -> &'static str {
        match self {
            Self::Timer => "⏱ Timer",
            Self::Garden => "🌸 Garden",
            Self::Stats => "📊 Stats",
            Self::Settings => "⚙ Settings",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&v| v == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum SettingsField {
    WorkMinutes,
    BreakMinutes,
}

impl SettingsField {
    fn toggle(self) -> Self {
        match self {
            Self::WorkMinutes => Self::BreakMinutes,
            Self::BreakMinutes => Self::WorkMinutes,
        }
    }
}

pub struct Toast {
    pub notice: Notice,
    shown_at: Instant,
}

impl Toast {
    pub fn expired(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= TOAST_TTL
    }
}

#[derive(Serialize)]
struct GardenExport<'a> {
    exported_at: DateTime<Local>,
    statistics: &'a Statistics,
    flowers: Vec<&'a SessionRecord>,
}

// ============================================================================
// Application State
// ============================================================================

pub struct App {
    pub session: FocusSession,
    pub ticker: Ticker,
    pub current_view: View,
    pub settings_field: SettingsField,
    pub settings_editing: bool,
    pub settings_input: String,
    pub toast: Option<Toast>,
    pub status_line: Option<String>,
    pub animation_frame: u8,
    sound_enabled: bool,
    notifications_enabled: bool,
    export_path: PathBuf,
}

impl App {
    pub fn new(config: &Config, seed: Option<u64>) -> Self {
        let engine = TimerEngine::new(config.work_minutes, config.break_minutes);
        Self {
            session: FocusSession::seeded(engine, seed),
            ticker: Ticker::new(),
            current_view: View::Timer,
            settings_field: SettingsField::WorkMinutes,
            settings_editing: false,
            settings_input: String::new(),
            toast: None,
            status_line: None,
            animation_frame: 0,
            sound_enabled: config.sound_enabled,
            notifications_enabled: config.notifications_enabled,
            export_path: config::get_path("garden_export.json"),
        }
    }

    pub fn with_export_path(mut self, path: PathBuf) -> Self {
        self.export_path = path;
        self
    }

    /// Drains the ticker and expires the toast. Called every frame.
    pub fn update(&mut self, now: Instant) {
        for _ in 0..self.ticker.due(now) {
            if let Some(notice) = self.session.tick() {
                self.deliver(notice, now);
            }
            if !self.session.engine().is_running() {
                break;
            }
        }
        self.sync_ticker(now);

        if self.toast.as_ref().is_some_and(|t| t.expired(now)) {
            self.toast = None;
        }
        self.animation_frame = self.animation_frame.wrapping_add(1) % 20;
    }

    /// Terminal lost focus.
    pub fn focus_lost(&mut self, now: Instant) {
        if let Some(notice) = self.session.page_hidden() {
            self.deliver(notice, now);
        }
        self.sync_ticker(now);
    }

    fn sync_ticker(&mut self, now: Instant) {
        self.ticker.sync(self.session.engine().is_running(), now);
    }

    fn deliver(&mut self, notice: Notice, now: Instant) {
        if self.notifications_enabled {
            notify(&notice, self.sound_enabled);
        }
        self.toast = Some(Toast { notice, shown_at: now });
    }

    pub fn export(&self) -> Result<()> {
        let ledger = self.session.ledger();
        let snapshot = GardenExport {
            exported_at: Local::now(),
            statistics: ledger.stats(),
            flowers: ledger.recent().collect(),
        };
        config::save_json(&self.export_path, &snapshot)?;
        info!(path = %self.export_path.display(), flowers = ledger.len(), "garden exported");
        Ok(())
    }

    // ========================================================================
    // Event Handlers
    // ========================================================================

    /// Returns true when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        let quit = if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            true
        } else if self.settings_editing {
            self.handle_settings_input(key);
            false
        } else {
            match self.current_view {
                View::Settings => self.handle_settings_view(key),
                _ => self.handle_main_view(key),
            }
        };
        self.sync_ticker(now);
        quit
    }

    fn handle_settings_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => self.settings_input.push(c),
            KeyCode::Backspace => {
                self.settings_input.pop();
            }
            KeyCode::Enter => self.apply_setting(),
            KeyCode::Esc => {
                self.settings_editing = false;
                self.settings_input.clear();
            }
            _ => {}
        }
    }

    fn handle_settings_view(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Up | KeyCode::Char('k') => {
                self.settings_field = self.settings_field.toggle();
            }
            KeyCode::Enter | KeyCode::Char('e') => {
                let engine = self.session.engine();
                self.settings_input = match self.settings_field {
                    SettingsField::WorkMinutes => engine.work_minutes(),
                    SettingsField::BreakMinutes => engine.break_minutes(),
                }
                .to_string();
                self.settings_editing = true;
            }
            _ => return self.handle_navigation(key),
        }
        false
    }

    fn handle_main_view(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char(' ') if self.current_view == View::Timer => self.session.toggle(),
            KeyCode::Char('r') if self.current_view == View::Timer => self.session.reset(),
            KeyCode::Char('e') if matches!(self.current_view, View::Garden | View::Stats) => {
                self.status_line = Some(match self.export() {
                    Ok(()) => format!("💾 Exported to {}", self.export_path.display()),
                    Err(e) => {
                        warn!(error = %e, "garden export failed");
                        format!("⚠️  Export failed: {e}")
                    }
                });
            }
            _ => return self.handle_navigation(key),
        }
        false
    }

    fn handle_navigation(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Tab => self.switch_view(self.current_view.next()),
            KeyCode::BackTab => self.switch_view(self.current_view.prev()),
            KeyCode::Char(c @ '1'..='4') => self.switch_view(View::ALL[(c as u8 - b'1') as usize]),
            _ => {}
        }
        false
    }

    fn switch_view(&mut self, view: View) {
        if view != self.current_view {
            self.status_line = None;
        }
        self.current_view = view;
    }

    fn apply_setting(&mut self) {
        match self.settings_field {
            SettingsField::WorkMinutes => {
                let minutes = config::coerce_work_minutes(&self.settings_input);
                if minutes != self.session.engine().work_minutes() {
                    self.session.set_work_minutes(minutes);
                    info!(minutes, "work duration changed");
                }
            }
            SettingsField::BreakMinutes => {
                let minutes = config::coerce_break_minutes(&self.settings_input);
                if minutes != self.session.engine().break_minutes() {
                    self.session.set_break_minutes(minutes);
                    info!(minutes, "break duration changed");
                }
            }
        }
        self.settings_editing = false;
        self.settings_input.clear();
    }
}

// ============================================================================
// Utilities
// ============================================================================

fn notify(notice: &Notice, sound: bool) {
    let urgency = if notice.destructive() { Urgency::Critical } else { Urgency::Normal };
    if let Err(e) = Notification::new()
        .summary(&notice.title())
        .body(&notice.body())
        .appname("focus-garden")
        .icon("alarm-clock")
        .urgency(urgency)
        .show()
    {
        warn!(error = %e, "desktop notification failed");
    }

    if sound {
        std::thread::spawn(|| {
            for (cmd, file) in [
                ("paplay", "/usr/share/sounds/freedesktop/stereo/complete.oga"),
                ("aplay", "/usr/share/sounds/sound-icons/guitar-11.wav"),
                ("aplay", "/usr/share/sounds/generic.wav"),
            ] {
                if std::path::Path::new(file).exists() {
                    let _ = std::process::Command::new(cmd)
                        .arg(file)
                        .stdout(std::process::Stdio::null())
                        .stderr(std::process::Stdio::null())
                        .spawn();
                    break;
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::Mode;

    fn quiet_app(work: u32, brk: u32) -> App {
        let config = Config {
            work_minutes: work,
            break_minutes: brk,
            sound_enabled: false,
            notifications_enabled: false,
        };
        App::new(&config, Some(1))
    }

    fn press(app: &mut App, code: KeyCode, now: Instant) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE), now)
    }

    fn type_str(app: &mut App, s: &str, now: Instant) {
        for c in s.chars() {
            press(app, KeyCode::Char(c), now);
        }
    }

    #[test]
    fn space_arms_and_disarms_ticker() {
        let mut app = quiet_app(25, 5);
        let t0 = Instant::now();
        press(&mut app, KeyCode::Char(' '), t0);
        assert!(app.session.engine().is_running());
        assert!(app.ticker.is_armed());

        press(&mut app, KeyCode::Char(' '), t0);
        assert!(!app.ticker.is_armed());
    }

    #[test]
    fn update_counts_down_by_elapsed_seconds() {
        let mut app = quiet_app(25, 5);
        let t0 = Instant::now();
        press(&mut app, KeyCode::Char(' '), t0);
        app.update(t0 + Duration::from_millis(3100));
        assert_eq!(app.session.engine().remaining_secs(), 25 * 60 - 3);
    }

    #[test]
    fn completion_disarms_ticker_and_shows_toast() {
        let mut app = quiet_app(1, 5);
        let t0 = Instant::now();
        press(&mut app, KeyCode::Char(' '), t0);
        app.update(t0 + Duration::from_secs(90));

        assert_eq!(app.session.engine().mode(), Mode::OnBreak);
        assert_eq!(app.session.engine().remaining_secs(), 300);
        assert!(!app.ticker.is_armed());
        assert!(matches!(
            app.toast.as_ref().map(|t| &t.notice),
            Some(Notice::Bloomed { .. })
        ));

        app.update(t0 + Duration::from_secs(200));
        assert!(app.toast.is_none());
    }

    #[test]
    fn focus_lost_kills_running_work() {
        let mut app = quiet_app(25, 5);
        let t0 = Instant::now();
        press(&mut app, KeyCode::Char(' '), t0);
        app.update(t0 + Duration::from_secs(10));
        app.focus_lost(t0 + Duration::from_secs(10));

        assert!(!app.session.engine().is_running());
        assert!(!app.ticker.is_armed());
        assert_eq!(app.session.engine().growth(), 0.0);
        assert_eq!(app.session.engine().remaining_secs(), 1490);
        assert_eq!(app.toast.as_ref().map(|t| &t.notice), Some(&Notice::Wilted));
        assert!(app.session.ledger().is_empty());
    }

    #[test]
    fn settings_edit_rebases_paused_break() {
        let mut app = quiet_app(1, 5);
        let t0 = Instant::now();
        press(&mut app, KeyCode::Char(' '), t0);
        app.update(t0 + Duration::from_secs(60));
        assert_eq!(app.session.engine().mode(), Mode::OnBreak);

        press(&mut app, KeyCode::Char('4'), t0);
        assert_eq!(app.current_view, View::Settings);
        press(&mut app, KeyCode::Down, t0);
        press(&mut app, KeyCode::Enter, t0);
        assert_eq!(app.settings_input, "5");
        press(&mut app, KeyCode::Backspace, t0);
        type_str(&mut app, "10", t0);
        press(&mut app, KeyCode::Enter, t0);

        assert!(!app.settings_editing);
        assert_eq!(app.session.engine().break_minutes(), 10);
        assert_eq!(app.session.engine().remaining_secs(), 600);
    }

    #[test]
    fn empty_setting_falls_back_to_default() {
        let mut app = quiet_app(40, 5);
        let t0 = Instant::now();
        app.current_view = View::Settings;
        press(&mut app, KeyCode::Enter, t0);
        press(&mut app, KeyCode::Backspace, t0);
        press(&mut app, KeyCode::Backspace, t0);
        press(&mut app, KeyCode::Enter, t0);

        assert_eq!(app.session.engine().work_minutes(), 25);
        assert_eq!(app.session.engine().remaining_secs(), 25 * 60);
    }

    #[test]
    fn unchanged_setting_keeps_paused_progress() {
        let mut app = quiet_app(25, 5);
        let t0 = Instant::now();
        press(&mut app, KeyCode::Char(' '), t0);
        app.update(t0 + Duration::from_secs(300));
        press(&mut app, KeyCode::Char(' '), t0 + Duration::from_secs(300));

        press(&mut app, KeyCode::Char('4'), t0);
        press(&mut app, KeyCode::Enter, t0);
        press(&mut app, KeyCode::Enter, t0);

        assert!(!app.settings_editing);
        assert_eq!(app.session.engine().work_minutes(), 25);
        assert_eq!(app.session.engine().remaining_secs(), 1200);
    }

    #[test]
    fn ctrl_c_quits_while_editing() {
        let mut app = quiet_app(25, 5);
        let t0 = Instant::now();
        app.current_view = View::Settings;
        press(&mut app, KeyCode::Enter, t0);
        assert!(app.settings_editing);

        assert!(app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), t0));
        assert_eq!(app.settings_input, "25");
    }

    #[test]
    fn status_line_clears_on_view_change() {
        let mut app = quiet_app(25, 5);
        let t0 = Instant::now();
        app.current_view = View::Garden;
        app.status_line = Some("💾 Exported".into());

        press(&mut app, KeyCode::Char('2'), t0);
        assert!(app.status_line.is_some());
        press(&mut app, KeyCode::Tab, t0);
        assert_eq!(app.current_view, View::Stats);
        assert!(app.status_line.is_none());
    }

    #[test]
    fn tab_cycles_views() {
        let mut app = quiet_app(25, 5);
        let t0 = Instant::now();
        for expected in [View::Garden, View::Stats, View::Settings, View::Timer] {
            press(&mut app, KeyCode::Tab, t0);
            assert_eq!(app.current_view, expected);
        }
        press(&mut app, KeyCode::BackTab, t0);
        assert_eq!(app.current_view, View::Settings);
    }

    #[test]
    fn space_outside_timer_view_does_nothing() {
        let mut app = quiet_app(25, 5);
        app.current_view = View::Garden;
        press(&mut app, KeyCode::Char(' '), Instant::now());
        assert!(!app.session.engine().is_running());
    }

    #[test]
    fn quit_keys() {
        let mut app = quiet_app(25, 5);
        let t0 = Instant::now();
        assert!(press(&mut app, KeyCode::Char('q'), t0));
        assert!(app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), t0));
    }

    #[test]
    fn export_writes_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garden.json");
        let mut app = quiet_app(1, 1).with_export_path(path.clone());
        let t0 = Instant::now();
        press(&mut app, KeyCode::Char(' '), t0);
        app.update(t0 + Duration::from_secs(60));

        app.current_view = View::Garden;
        press(&mut app, KeyCode::Char('e'), t0);

        let raw = std::fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["statistics"]["total_sessions"], 1);
        assert_eq!(json["flowers"][0]["name"], "#1");
        assert_eq!(json["flowers"][0]["duration_minutes"], 1);
    }
}
