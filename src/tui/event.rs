//! Event handling for the TUI.
//!
//! A dedicated thread polls crossterm for terminal events, turning poll
//! timeouts into refresh ticks. The interrupt path shares the same channel:
//! the ctrl-c hook sends [`Event::Interrupt`], so a blocked `next()` returns
//! promptly instead of waiting out the remainder of the tick. A failing or
//! closed input stream is reported as [`Event::Closed`] and stops the poll
//! thread.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};

/// Application events.
#[derive(Debug)]
pub enum Event {
    /// Timer tick for data refresh.
    Tick,
    /// Keyboard input.
    Key(KeyEvent),
    /// Terminal resize (width, height).
    Resize(u16, u16),
    /// Interrupt signal requesting graceful shutdown.
    Interrupt,
    /// Input stream closed or failed; treated like a quit keystroke.
    Closed,
}

/// Event handler that polls for terminal events in a separate thread.
pub struct EventHandler {
    rx: Receiver<Event>,
    /// Kept for injecting events from outside the poll thread.
    tx: Sender<Event>,
}

impl EventHandler {
    /// Creates a new event handler with the specified tick rate.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let event_tx = tx.clone();

        thread::spawn(move || {
            loop {
                match event::poll(tick_rate) {
                    Ok(true) => match event::read() {
                        Ok(CrosstermEvent::Key(key)) => {
                            if event_tx.send(Event::Key(key)).is_err() {
                                break;
                            }
                        }
                        Ok(CrosstermEvent::Resize(w, h)) => {
                            if event_tx.send(Event::Resize(w, h)).is_err() {
                                break;
                            }
                        }
                        Ok(_) => continue,
                        Err(_) => {
                            let _ = event_tx.send(Event::Closed);
                            break;
                        }
                    },
                    // Timeout - send tick
                    Ok(false) => {
                        if event_tx.send(Event::Tick).is_err() {
                            break;
                        }
                    }
                    Err(_) => {
                        let _ = event_tx.send(Event::Closed);
                        break;
                    }
                }
            }
        });

        Self { rx, tx }
    }

    /// A sender for injecting events from outside the poll thread, e.g. the
    /// interrupt hook.
    pub fn sender(&self) -> Sender<Event> {
        self.tx.clone()
    }

    /// Receives the next event, blocking until one is available.
    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }
}
