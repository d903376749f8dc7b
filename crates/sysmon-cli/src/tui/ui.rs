//! TUI rendering.
//!
//! ┌──────────────────────────────────────────────┐
//! │  ▚ SYSMON ▞  Ubuntu 22.04      frame #42     │
//! ├──────────────────────┬───────────────────────┤
//! │  CPU   ████▌   37.5% │  Top processes        │
//! │  MEM   ██████  61.0% │    agetty             │
//! │  TEMP  52.0°C        │    bash               │
//! │  BATT  73% Charging  │    cron               │
//! ├──────────────────────┴───────────────────────┤
//! │  q: quit   p: pause   +/-: frame rate        │
//! └──────────────────────────────────────────────┘

use super::app::{App, Level};
use ratatui::{prelude::*, widgets::*};
use sysmon_core::DEFAULT_PROCESS_COUNT;

use crate::commands::format_kb;

pub fn draw(f: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Min(12),   // main
            Constraint::Length(1), // keys
        ])
        .split(f.area());

    draw_title(f, rows[0], app);
    draw_main(f, rows[1], app);
    draw_keys(f, rows[2]);
}

fn draw_title(f: &mut Frame, area: Rect, app: &App) {
    let distro = &app.engine().distro_info().name;
    let paused = if app.is_paused() { "  PAUSED" } else { "" };
    let fresh: Vec<String> = app.last_refreshed().iter().map(|f| f.to_string()).collect();
    let fresh = if fresh.is_empty() {
        String::new()
    } else {
        format!("  ↻ {}", fresh.join(","))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(Line::from(vec![
            Span::styled(
                " ▚ SYSMON ▞ ",
                Style::default().bold().fg(Color::Magenta),
            ),
            Span::styled(distro.as_str(), Style::default().bold().fg(Color::Cyan)),
            Span::styled(
                format!(
                    "  v{}  frame #{}  {}ms{fresh}{paused} ",
                    sysmon_core::VERSION,
                    app.frame_count(),
                    app.frame().as_millis()
                ),
                Style::default().fg(Color::DarkGray),
            ),
        ]));

    f.render_widget(block, area);
}

fn draw_main(f: &mut Frame, area: Rect, app: &App) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // cpu
            Constraint::Length(3), // memory
            Constraint::Length(3), // temperature
            Constraint::Min(3),    // battery
        ])
        .split(cols[0]);

    draw_cpu(f, left[0], app);
    draw_memory(f, left[1], app);
    draw_temperature(f, left[2], app);
    draw_battery(f, left[3], app);
    draw_processes(f, cols[1], app);
}

fn gauge(title: &str, pct: f32, level: Level, label: String) -> Gauge<'_> {
    Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .gauge_style(Style::default().fg(level.color()).bg(Color::Black))
        .ratio(f64::from(pct.clamp(0.0, 100.0)) / 100.0)
        .label(label)
}

fn draw_cpu(f: &mut Frame, area: Rect, app: &App) {
    let cpu = app.engine().cpu_stats();
    if !cpu.has_valid_measurement {
        let p = Paragraph::new("warming up…")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(" CPU "));
        f.render_widget(p, area);
        return;
    }
    let level = Level::for_percent(cpu.usage_percent);
    f.render_widget(
        gauge(
            " CPU ",
            cpu.usage_percent,
            level,
            format!("{:.1}%", cpu.usage_percent),
        ),
        area,
    );
}

fn draw_memory(f: &mut Frame, area: Rect, app: &App) {
    let mem = app.engine().memory_stats();
    let level = Level::for_percent(mem.usage_percent);
    f.render_widget(
        gauge(
            " Memory ",
            mem.usage_percent,
            level,
            format!(
                "{:.1}%  {} / {}",
                mem.usage_percent,
                format_kb(mem.used_kb),
                format_kb(mem.total_kb)
            ),
        ),
        area,
    );
}

fn draw_temperature(f: &mut Frame, area: Rect, app: &App) {
    let line = match app.engine().cpu_temperature() {
        Some(c) => Line::from(Span::styled(
            format!("{c:.1}°C"),
            Style::default().bold().fg(Level::for_celsius(c).color()),
        )),
        None => Line::from(Span::styled("n/a", Style::default().fg(Color::DarkGray))),
    };
    let p = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Temperature "),
    );
    f.render_widget(p, area);
}

fn draw_battery(f: &mut Frame, area: Rect, app: &App) {
    let battery = app.engine().battery_stats();
    let line = if battery.present {
        let marker = if battery.charging { " ⚡" } else { "" };
        Line::from(vec![
            Span::styled(
                format!("{:.0}%", battery.percentage),
                Style::default()
                    .bold()
                    .fg(Level::for_charge(battery.percentage).color()),
            ),
            Span::raw(format!("  {}{marker}", battery.status)),
        ])
    } else {
        Line::from(Span::styled(
            battery.status.as_str(),
            Style::default().fg(Color::DarkGray),
        ))
    };
    let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL).title(" Battery "));
    f.render_widget(p, area);
}

fn draw_processes(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .engine()
        .top_processes(DEFAULT_PROCESS_COUNT)
        .iter()
        .map(|name| ListItem::new(format!(" {name}")))
        .collect();

    let list = List::new(items)
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Processes "),
        );
    f.render_widget(list, area);
}

fn draw_keys(f: &mut Frame, area: Rect) {
    let bar = Paragraph::new(" q: quit   p: pause   +/-: frame rate   d: reload distro")
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(bar, area);
}
