//! TUI application state and event loop.
//!
//! The loop redraws every frame and ticks the engine each time; the engine
//! decides per metric family whether anything is actually resampled, so the
//! frame period only bounds how stale the screen can be.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use sysmon_core::{MetricFamily, MetricsEngine};

const MIN_FRAME: Duration = Duration::from_millis(10);
const MAX_FRAME: Duration = Duration::from_millis(2000);

// ---------------------------------------------------------------------------
// Level
// ---------------------------------------------------------------------------

/// Severity band used to colour a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Normal,
    Elevated,
    Critical,
}

impl Level {
    /// Bands for a 0..=100 utilization.
    pub fn for_percent(pct: f32) -> Self {
        if pct < 50.0 {
            Self::Normal
        } else if pct < 80.0 {
            Self::Elevated
        } else {
            Self::Critical
        }
    }

    /// Bands for a CPU temperature in °C.
    pub fn for_celsius(c: f32) -> Self {
        if c < 60.0 {
            Self::Normal
        } else if c < 80.0 {
            Self::Elevated
        } else {
            Self::Critical
        }
    }

    /// Bands for remaining battery charge; low charge is the hot end.
    pub fn for_charge(pct: f32) -> Self {
        if pct > 50.0 {
            Self::Normal
        } else if pct > 20.0 {
            Self::Elevated
        } else {
            Self::Critical
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::Normal => Color::Green,
            Self::Elevated => Color::Yellow,
            Self::Critical => Color::Red,
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    engine: MetricsEngine,
    frame: Duration,
    running: bool,
    paused: bool,
    frame_count: u64,
    last_refreshed: Vec<MetricFamily>,
}

impl App {
    pub fn new(engine: MetricsEngine, frame: Duration) -> Self {
        Self {
            engine,
            frame: frame.clamp(MIN_FRAME, MAX_FRAME),
            running: true,
            paused: false,
            frame_count: 0,
            last_refreshed: Vec::new(),
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Restore the terminal before the panic message is printed.
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
            original_hook(info);
        }));

        let result = self.run_loop(&mut terminal);

        let _ = std::panic::take_hook();
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            crossterm::cursor::Show
        )?;

        result
    }

    fn run_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        while self.running {
            self.step();
            terminal.draw(|f| super::ui::draw(f, self))?;

            if event::poll(self.frame)?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                self.handle_key(key.code);
            }
        }

        Ok(())
    }

    /// One frame's worth of sampling.
    fn step(&mut self) {
        self.frame_count += 1;
        if !self.paused {
            self.last_refreshed = self.engine.tick();
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char('p') => self.paused = !self.paused,
            KeyCode::Char('d') => self.engine.refresh_distro(),
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Char(']') => {
                self.frame = (self.frame / 2).max(MIN_FRAME);
            }
            KeyCode::Char('-') | KeyCode::Char('[') => {
                self.frame = (self.frame * 2).min(MAX_FRAME);
            }
            _ => {}
        }
    }

    // -----------------------------------------------------------------------
    // Accessors for the renderer
    // -----------------------------------------------------------------------

    pub fn engine(&self) -> &MetricsEngine {
        &self.engine
    }

    pub fn frame(&self) -> Duration {
        self.frame
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Families resampled on the latest frame.
    pub fn last_refreshed(&self) -> &[MetricFamily] {
        &self.last_refreshed
    }
}
