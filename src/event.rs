use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, MouseEvent};
use futures::StreamExt;

/// Upper bound on how long one loop iteration waits for input.
pub const POLL_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Clone, Debug)]
pub enum Event {
    Key(KeyEvent),
    /// Clicks and scroll wheel. Recognized so they can be dropped.
    Mouse(MouseEvent),
    Resize,
    /// Nothing arrived within the poll timeout.
    Timeout,
    /// Focus, paste, or a failed read.
    Ignored,
}

impl From<CrosstermEvent> for Event {
    fn from(evt: CrosstermEvent) -> Self {
        match evt {
            CrosstermEvent::Key(key) => Event::Key(key),
            CrosstermEvent::Mouse(mouse) => Event::Mouse(mouse),
            CrosstermEvent::Resize(_, _) => Event::Resize,
            _ => Event::Ignored,
        }
    }
}

/// Waits for terminal input on the calling task. Nothing is spawned; each
/// `next` blocks for at most the poll timeout.
pub struct EventHandler {
    reader: EventStream,
    timeout: Duration,
}

impl EventHandler {
    pub fn new(timeout: Duration) -> Self {
        Self {
            reader: EventStream::new(),
            timeout,
        }
    }

    pub async fn next(&mut self) -> Event {
        match tokio::time::timeout(self.timeout, self.reader.next()).await {
            Err(_) => Event::Timeout,
            Ok(Some(Ok(evt))) => evt.into(),
            Ok(Some(Err(err))) => {
                tracing::debug!(error = %err, "terminal input read failed");
                Event::Ignored
            }
            Ok(None) => {
                // The stream is done; keep the loop at its normal cadence.
                tokio::time::sleep(self.timeout).await;
                Event::Timeout
            }
        }
    }
}
