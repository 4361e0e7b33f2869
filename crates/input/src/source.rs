//! Input source: a dedicated thread reading the terminal.
//!
//! `crossterm` reads block, so they cannot share the async scene loop. The
//! thread polls with a short timeout so it notices when the loop has gone
//! away (the receiver was dropped) and exits on its own.

use std::io;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::map::map_key_event;
use crate::types::InputEvent;

/// How long one terminal poll may block before checking for shutdown.
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Start the terminal reader thread.
pub fn spawn_terminal_input(tx: UnboundedSender<InputEvent>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("flappy-input".to_string())
        .spawn(move || {
            forward_events(
                || {
                    if event::poll(POLL_INTERVAL)? {
                        event::read().map(Some)
                    } else {
                        Ok(None)
                    }
                },
                &tx,
            )
        })
}

/// Pump terminal events into `tx` until Quit is sent or the receiver is gone.
///
/// `next` returns `Ok(None)` when nothing arrived within one poll. A read
/// error ends the session with a Quit.
pub fn forward_events<F>(mut next: F, tx: &UnboundedSender<InputEvent>)
where
    F: FnMut() -> io::Result<Option<Event>>,
{
    loop {
        if tx.is_closed() {
            debug!("input receiver closed");
            return;
        }

        let event = match next() {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(err) => {
                warn!(error = %err, "terminal input failed");
                let _ = tx.send(InputEvent::Quit);
                return;
            }
        };

        // Only presses; releases and repeats would double-jump.
        let Event::Key(key) = event else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let input = map_key_event(key);
        if tx.send(input).is_err() || input == InputEvent::Quit {
            return;
        }
    }
}
