//! Chart viewer state and event loop.
//!
//! Design: a fixed grid of panels, one per detector (or a single overlay
//! panel for ROC). Tab cycles a focused panel that fills the screen; Esc on a
//! focused panel returns to the grid, q quits.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use detectlab_core::ClassHistogram;

// ---------------------------------------------------------------------------
// Chart model
// ---------------------------------------------------------------------------

/// One line on a line chart.
#[derive(Debug, Clone)]
pub struct Series {
    pub name: String,
    pub colour: Color,
    pub points: Vec<(f64, f64)>,
}

/// What a panel shows.
#[derive(Debug, Clone)]
pub enum PanelContent {
    Lines {
        series: Vec<Series>,
        x_title: &'static str,
        y_title: &'static str,
    },
    Histogram(ClassHistogram),
    /// Results could not be used; the message explains why.
    Empty(String),
}

#[derive(Debug, Clone)]
pub struct Panel {
    pub title: String,
    pub row: usize,
    pub col: usize,
    pub accent: Color,
    pub content: PanelContent,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    title: String,
    rows: usize,
    cols: usize,
    panels: Vec<Panel>,
    focus: Option<usize>,
    running: bool,
}

impl App {
    pub fn new(title: impl Into<String>, rows: usize, cols: usize, panels: Vec<Panel>) -> Self {
        Self {
            title: title.into(),
            rows: rows.max(1),
            cols: cols.max(1),
            panels,
            focus: None,
            running: true,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let hook = RestoreTerminalHook::install();
        let result = self.run_loop(&mut terminal);
        drop(hook);

        // Always restore terminal, even if the loop returned an error.
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
            terminal.draw(|f| super::ui::draw(f, self))?;

            if event::poll(Duration::from_millis(250))?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                self.handle_key(key.code);
            }
        }
        Ok(())
    }

    pub(crate) fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Esc => {
                if self.focus.is_some() {
                    self.focus = None;
                } else {
                    self.running = false;
                }
            }
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => self.cycle_focus(true),
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => self.cycle_focus(false),
            KeyCode::Enter | KeyCode::Char('g') => self.focus = None,
            _ => {}
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        let n = self.panels.len();
        if n == 0 {
            return;
        }
        self.focus = Some(match (self.focus, forward) {
            (None, true) => 0,
            (None, false) => n - 1,
            (Some(i), true) => (i + 1) % n,
            (Some(i), false) => (i + n - 1) % n,
        });
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn grid(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn focused(&self) -> Option<&Panel> {
        self.focus.and_then(|i| self.panels.get(i))
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

// ---------------------------------------------------------------------------
// Panic hook
// ---------------------------------------------------------------------------

type PanicHook = Box<dyn Fn(&std::panic::PanicHookInfo<'_>) + Sync + Send + 'static>;

/// Panic hook that leaves raw mode and the alternate screen before handing the
/// panic to the previous hook. Dropping it reinstates the previous hook.
struct RestoreTerminalHook {
    previous: Arc<PanicHook>,
}

impl RestoreTerminalHook {
    fn install() -> Self {
        let previous: Arc<PanicHook> = Arc::new(std::panic::take_hook());
        let chained = Arc::clone(&previous);
        std::panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
            chained(info);
        }));
        Self { previous }
    }
}

impl Drop for RestoreTerminalHook {
    fn drop(&mut self) {
        let previous = Arc::clone(&self.previous);
        // Drops our terminal-restoring hook.
        let _ = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| previous(info)));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
