//! Main TUI application: the interactive refresh loop.

use std::io;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::warn;

use crate::collector::{CollectError, FileSystem, SlabCollector};
use crate::sort::{SortField, sort_caches};

use super::event::{Event, EventHandler};
use super::geometry::Geometry;
use super::input::{KeyAction, handle_key};
use super::render::render;
use super::state::AppState;

/// Fatal error from the interactive loop.
#[derive(Debug)]
pub enum AppError {
    Io(io::Error),
    Collect(CollectError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "terminal error: {}", e),
            AppError::Collect(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AppError {}

impl From<io::Error> for AppError {
    fn from(e: io::Error) -> Self {
        AppError::Io(e)
    }
}

impl From<CollectError> for AppError {
    fn from(e: CollectError) -> Self {
        AppError::Collect(e)
    }
}

/// Main TUI application.
pub struct App<F: FileSystem> {
    collector: SlabCollector<F>,
    state: AppState,
}

impl<F: FileSystem> App<F> {
    pub fn new(collector: SlabCollector<F>, sort: SortField, max_caches: usize) -> Self {
        Self {
            collector,
            state: AppState::new(sort, max_caches),
        }
    }

    /// Runs the interactive loop until quit, interrupt, input-stream closure
    /// or a fatal collector error. The terminal is restored on every exit
    /// path before any error is surfaced.
    pub fn run(mut self, tick_rate: Duration) -> Result<(), AppError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let events = EventHandler::new(tick_rate);
        let interrupt_tx = events.sender();
        if let Err(e) = ctrlc::set_handler(move || {
            let _ = interrupt_tx.send(Event::Interrupt);
        }) {
            warn!("failed to install interrupt handler: {}", e);
        }

        self.state.geometry = Geometry::probe();

        let result = self.event_loop(&mut terminal, &events);
        let restore = restore_terminal(&mut terminal);

        result?;
        restore.map_err(AppError::from)
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        events: &EventHandler,
    ) -> Result<(), AppError> {
        self.refresh()?;

        loop {
            terminal.draw(|frame| render(frame, &self.state))?;

            match next_step(events.next()) {
                LoopStep::Refresh => self.refresh()?,
                LoopStep::Resort(field) => {
                    self.state.sort = field;
                    // new cycle right away, no waiting out the tick
                    self.refresh()?;
                }
                LoopStep::Resize(cols, rows) => self.state.geometry.update(cols, rows),
                LoopStep::Idle => {}
                LoopStep::Exit => break,
            }
        }

        Ok(())
    }

    /// One fetch-and-sort cycle. Fatal on any collector error: stale or
    /// partial slab data would be misleading, so there is no retry.
    fn refresh(&mut self) -> Result<(), CollectError> {
        self.state.summary = self.collector.summary()?;
        self.collector.fill(&mut self.state.nodes)?;
        sort_caches(self.state.sort, self.state.nodes.caches_mut());
        Ok(())
    }
}

/// What the loop does with one event from the bounded wait.
#[derive(Debug, PartialEq, Eq)]
enum LoopStep {
    /// Fetch, sort and redraw.
    Refresh,
    /// Switch the sort field, then fetch immediately.
    Resort(SortField),
    /// Apply new terminal geometry.
    Resize(u16, u16),
    /// Keep waiting.
    Idle,
    /// Leave the loop.
    Exit,
}

/// Maps the outcome of the bounded wait to a loop step. Interrupt delivery,
/// input-stream closure and channel loss all exit after the in-flight wait,
/// never mid-render and never via another fetch.
fn next_step(event: Result<Event, std::sync::mpsc::RecvError>) -> LoopStep {
    match event {
        Ok(Event::Tick) => LoopStep::Refresh,
        Ok(Event::Key(key)) => match handle_key(key) {
            KeyAction::Quit => LoopStep::Exit,
            KeyAction::Sort(field) => LoopStep::Resort(field),
            KeyAction::None => LoopStep::Idle,
        },
        Ok(Event::Resize(cols, rows)) => LoopStep::Resize(cols, rows),
        Ok(Event::Interrupt) | Ok(Event::Closed) | Err(_) => LoopStep::Exit,
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::MockFs;

    #[test]
    fn refresh_fetches_and_sorts() {
        let collector = SlabCollector::open(MockFs::typical_system(), "/proc").unwrap();
        let mut app = App::new(collector, SortField::Objects, 150);

        app.refresh().unwrap();
        assert_eq!(app.state.nodes.live(), 6);
        assert_eq!(app.state.nodes.caches()[0].name, "dentry");
        assert!(app.state.summary.total_objs > 0);
    }

    #[test]
    fn sort_key_change_reorders_next_cycle() {
        let collector = SlabCollector::open(MockFs::typical_system(), "/proc").unwrap();
        let mut app = App::new(collector, SortField::Objects, 150);
        app.refresh().unwrap();

        match handle_key(crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Char('u'),
            crossterm::event::KeyModifiers::NONE,
        )) {
            KeyAction::Sort(field) => app.state.sort = field,
            other => panic!("unexpected action {:?}", other),
        }
        app.refresh().unwrap();

        let pcts: Vec<u64> = app.state.nodes.caches().iter().map(|c| c.use_pct).collect();
        assert!(pcts.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn interrupt_and_closed_input_exit_without_another_fetch() {
        use std::sync::mpsc;

        assert_eq!(next_step(Ok(Event::Interrupt)), LoopStep::Exit);
        assert_eq!(next_step(Ok(Event::Closed)), LoopStep::Exit);
        assert_eq!(next_step(Err(mpsc::RecvError)), LoopStep::Exit);
    }

    #[test]
    fn ticks_refresh_and_sort_keys_resort() {
        use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

        assert_eq!(next_step(Ok(Event::Tick)), LoopStep::Refresh);
        assert_eq!(next_step(Ok(Event::Resize(100, 40))), LoopStep::Resize(100, 40));

        let key = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::NONE);
        assert_eq!(
            next_step(Ok(Event::Key(key))),
            LoopStep::Resort(SortField::Utilization)
        );
        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(next_step(Ok(Event::Key(key))), LoopStep::Exit);
    }

    #[test]
    fn unreadable_records_make_refresh_fail() {
        // header parses at open, but the records do not
        let mut fs = MockFs::new();
        fs.add_file("/proc/slabinfo", "slabinfo - version: 2.1\nbroken record\n");
        let collector = SlabCollector::open(fs, "/proc").unwrap();
        let mut app = App::new(collector, SortField::Objects, 150);
        assert!(app.refresh().is_err());
    }
}
