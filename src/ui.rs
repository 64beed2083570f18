use ratatui::{prelude::*, widgets::*};

use crate::{
    app::{App, SettingsField, View},
    garden::{self, PlantStage},
    timer::Mode,
};

const WORK_COLOR: Color = Color::Rgb(167, 139, 250);
const BREAK_COLOR: Color = Color::Rgb(96, 165, 250);
const BORDER_COLOR: Color = Color::Rgb(196, 181, 253);
const ACCENT_COLOR: Color = Color::Rgb(244, 114, 182);
const GARDEN_COLUMNS: usize = 4;

fn mode_color(mode: Mode) -> Color {
    match mode {
        Mode::Working => WORK_COLOR,
        Mode::OnBreak => BREAK_COLOR,
    }
}

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(f.size());

    render_header(f, app, chunks[0]);
    render_tabs(f, app, chunks[1]);

    match app.current_view {
        View::Timer => render_timer(f, app, chunks[2]),
        View::Garden => render_garden(f, app, chunks[2]),
        View::Stats => render_stats(f, app, chunks[2]),
        View::Settings => render_settings(f, app, chunks[2]),
    }

    render_footer(f, app, chunks[3]);
}

fn bordered(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_COLOR))
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let line = match &app.toast {
        Some(toast) => {
            let color = if toast.notice.destructive() { Color::Red } else { Color::Green };
            Line::from(vec![
                Span::styled(toast.notice.title(), Style::default().fg(color).add_modifier(Modifier::BOLD)),
                Span::raw("  "),
                Span::styled(toast.notice.body(), Style::default().fg(Color::Gray)),
            ])
        }
        None => Line::from(Span::styled(
            "Grow your garden of productivity",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
    };

    f.render_widget(
        Paragraph::new(line).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR))
                .title(Span::styled(
                    " 🌱 FOCUS GARDEN ",
                    Style::default().fg(ACCENT_COLOR).add_modifier(Modifier::BOLD),
                )),
        ),
        area,
    );
}

fn render_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = View::ALL.iter().map(|v| Line::from(v.title())).collect();
    f.render_widget(
        Tabs::new(titles)
            .select(app.current_view.index())
            .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded))
            .style(Style::default().fg(Color::Gray))
            .highlight_style(Style::default().fg(ACCENT_COLOR).add_modifier(Modifier::BOLD))
            .divider("│"),
        area,
    );
}

fn render_timer(f: &mut Frame, app: &App, area: Rect) {
    let engine = app.session.engine();
    let color = mode_color(engine.mode());
    let working = engine.mode() == Mode::Working;

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(10),
            Constraint::Length(1), Constraint::Length(1),
            Constraint::Length(2), Constraint::Length(1),
            Constraint::Length(3), Constraint::Length(1),
            Constraint::Length(1), Constraint::Length(1),
            Constraint::Length(3), Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    f.render_widget(
        Paragraph::new(engine.mode().name())
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        sections[1],
    );

    // Plant; greyed out while paused
    let stage = if working { PlantStage::from_growth(engine.growth()) } else { PlantStage::Seed };
    let plant_style = if engine.is_running() {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    f.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(stage.symbol(), plant_style)),
            Line::from(Span::styled(stage.label(), Style::default().fg(Color::Gray))),
        ])
        .alignment(Alignment::Center),
        sections[3],
    );

    f.render_widget(
        Paragraph::new(garden::format_time(engine.remaining_secs()))
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        sections[5],
    );

    let status = if engine.is_running() {
        format!("{} RUNNING", if app.animation_frame < 10 { "●" } else { "○" })
    } else {
        format!("⏸  PAUSED{}", ".".repeat((app.animation_frame / 5) as usize % 4))
    };
    f.render_widget(
        Paragraph::new(status)
            .style(Style::default()
                .fg(if engine.is_running() { Color::Green } else { Color::Yellow })
                .add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        sections[7],
    );

    if working {
        let growth = engine.growth();
        f.render_widget(
            Gauge::default()
                .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded))
                .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
                .label(format!("Growth: {}%", growth.round() as u16))
                .percent(growth.clamp(0.0, 100.0) as u16),
            sections[9],
        );
        f.render_widget(
            Paragraph::new("⚠️  Don't leave the terminal or your sprout will die!")
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center),
            sections[11],
        );
    } else {
        f.render_widget(
            Gauge::default()
                .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded))
                .gauge_style(Style::default().fg(color).bg(Color::Black))
                .percent((engine.period_ratio() * 100.0) as u16),
            sections[9],
        );
    }
}

fn render_garden(f: &mut Frame, app: &App, area: Rect) {
    let ledger = app.session.ledger();
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "🌸 FLOWER COLLECTION",
            Style::default().fg(ACCENT_COLOR).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    if ledger.is_empty() {
        lines.push(Line::from(Span::styled("  No flowers grown yet", Style::default().fg(Color::Gray))));
        lines.push(Line::from(Span::styled(
            "  Finish your first session!",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    } else {
        let cells: Vec<_> = ledger.recent().collect();
        for row in cells.chunks(GARDEN_COLUMNS) {
            let mut names = vec![Span::raw("  ")];
            let mut details = vec![Span::raw("  ")];
            for flower in row {
                names.push(Span::styled(
                    format!("{:<18}", format!("{} {}", flower.symbol, flower.name)),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ));
                details.push(Span::styled(
                    format!(
                        "{:<18}",
                        format!("{} min · {}", flower.duration_minutes, flower.completed_at.format("%Y-%m-%d"))
                    ),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            lines.push(Line::from(names));
            lines.push(Line::from(details));
            lines.push(Line::from(""));
        }
    }

    f.render_widget(Paragraph::new(lines).block(bordered(" Garden ")), area);
}

fn stat_line(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("     {}: ", label)),
        Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ])
}

fn render_stats(f: &mut Frame, app: &App, area: Rect) {
    let stats = app.session.ledger().stats();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(5)])
        .split(area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "📊 STATISTICS",
            Style::default().fg(ACCENT_COLOR).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        stat_line("🎯 Total sessions", stats.total_sessions.to_string(), WORK_COLOR),
        stat_line("⏰ Focus minutes", stats.total_minutes.to_string(), BREAK_COLOR),
        stat_line("🌸 Flowers collected", stats.flowers_collected.to_string(), Color::Green),
        stat_line("🔥 Current streak", stats.current_streak.to_string(), Color::Rgb(251, 146, 60)),
    ];
    f.render_widget(Paragraph::new(lines).block(bordered(" Statistics ")), chunks[0]);

    f.render_widget(
        Gauge::default()
            .block(bordered(" Hours today "))
            .gauge_style(Style::default().fg(ACCENT_COLOR).bg(Color::Black))
            .label(garden::format_focus_time(stats.total_minutes))
            .percent(garden::daily_goal_percent(stats)),
        chunks[1],
    );
}

fn render_settings(f: &mut Frame, app: &App, area: Rect) {
    let engine = app.session.engine();
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "⚙️  POMODORO SETTINGS",
            Style::default().fg(ACCENT_COLOR).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  ↑↓/jk: Select  •  Enter: Edit  •  Esc: Cancel",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
    ];

    let settings = [
        (SettingsField::WorkMinutes, "🧠 Work duration (minutes)", engine.work_minutes(), "Default: 25 minutes, 1-60"),
        (SettingsField::BreakMinutes, "☕ Break duration (minutes)", engine.break_minutes(), "Default: 5 minutes, 1-30"),
    ];

    for (field, label, value, hint) in settings {
        let selected = app.settings_field == field;
        let editing = selected && app.settings_editing;

        lines.push(Line::from(""));

        if editing {
            lines.push(Line::from(vec![
                Span::styled("  > ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
                Span::styled(label, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            ]));
            lines.push(Line::from(vec![
                Span::raw("    "),
                Span::styled(app.settings_input.as_str(), Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                Span::styled("█", Style::default().fg(Color::Green)),
            ]));
        } else {
            let (prefix, label_style, value_style) = if selected {
                ("  > ", Style::default().fg(ACCENT_COLOR).add_modifier(Modifier::BOLD),
                 Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
            } else {
                ("    ", Style::default().fg(Color::Gray), Style::default().fg(Color::DarkGray))
            };
            lines.push(Line::from(vec![Span::styled(prefix, label_style), Span::styled(label, label_style)]));
            lines.push(Line::from(vec![Span::raw("    "), Span::styled(value.to_string(), value_style)]));
        }
        lines.push(Line::from(Span::styled(
            format!("    {hint}"),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from("  ─────────────────────────────────────────────────────────────────────"));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  🍅 About the Pomodoro technique",
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        "  Work and rest in cycles to keep your focus sharp.",
        Style::default().fg(Color::Gray),
    )));
    lines.push(Line::from(Span::styled(
        "  Classic cycle: 25 minutes of work, then 5 minutes of rest.",
        Style::default().fg(Color::Gray),
    )));

    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(bordered(" Settings ")),
        area,
    );
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let key = |text: &'static str| {
        Span::styled(text, Style::default().fg(ACCENT_COLOR).add_modifier(Modifier::BOLD))
    };

    let line = match (app.current_view, &app.status_line) {
        (View::Garden | View::Stats, Some(status)) => Line::from(Span::raw(status.clone())),
        (View::Timer, _) => Line::from(vec![
            key("Space"), Span::raw(" Start/Pause  •  "),
            key("R"), Span::raw(" Reset  •  "),
            key("Tab"), Span::raw(" Views  •  "),
            key("Q"), Span::raw(" Quit"),
        ]),
        (View::Garden | View::Stats, None) => Line::from(vec![
            key("E"), Span::raw(" Export  •  "),
            key("Tab"), Span::raw(" Views  •  "),
            key("Q"), Span::raw(" Quit"),
        ]),
        (View::Settings, _) => Line::from(vec![
            key("Enter"), Span::raw(" Edit  •  "),
            key("Tab"), Span::raw(" Views  •  "),
            key("Q"), Span::raw(" Quit"),
        ]),
    };

    f.render_widget(
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::TOP).border_style(Style::default().fg(BORDER_COLOR))),
        area,
    );
}
