use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;

/// Terminal input and a periodic tick, merged into one stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// The terminal was resized to (columns, rows).
    Resize(u16, u16),
    /// Periodic tick; keeps the loading indicator moving.
    Tick,
}

/// Translate a crossterm event into an application event.
///
/// Only key presses are forwarded (release and repeat events are dropped
/// on terminals that report them).  Mouse, focus and paste events are
/// ignored.
pub fn map_event(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
        _ => None,
    }
}

/// Reads crossterm's `EventStream` on a background task and hands events to
/// the main loop.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    // The task stops once the receiver is dropped.
    _task: tokio::task::JoinHandle<()>,
}

impl EventHandler {
    /// Create a new event handler with the given tick rate (in milliseconds).
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(async move {
            let mut reader = EventStream::new();
            let mut tick_interval = tokio::time::interval(Duration::from_millis(tick_rate_ms));

            loop {
                let forwarded = tokio::select! {
                    _ = tick_interval.tick() => tx.send(Event::Tick).is_ok(),
                    maybe_event = reader.next() => match maybe_event {
                        Some(Ok(event)) => match map_event(event) {
                            Some(app_event) => tx.send(app_event).is_ok(),
                            None => true,
                        },
                        Some(Err(e)) => {
                            tracing::error!(error = %e, "terminal event stream failed");
                            false
                        }
                        None => false,
                    },
                };

                if !forwarded {
                    break;
                }
            }
        });

        Self { rx, _task: task }
    }

    /// Wait for and return the next event.
    ///
    /// Returns an error if the background task has exited.
    pub async fn next(&mut self) -> anyhow::Result<Event> {
        self.rx
            .recv()
            .await
            .ok_or_else(|| anyhow::anyhow!("Event channel closed"))
    }
}
