use std::time::Duration;

use tokio::time::{self, Instant};
use tracing::{debug, trace};

use crate::error::DemoError;
use crate::types::EventKind;
use crate::window::DisplayServer;

// Drain events until one of `kind` shows up, discarding everything else.
//
// Polls the connection and sleeps `poll_interval` between empty polls.
// With `timeout = None` this waits forever, like a plain blocking read.
pub async fn wait_for<D: DisplayServer>(
    display: &mut D,
    kind: EventKind,
    timeout: Option<Duration>,
    poll_interval: Duration,
) -> Result<(), DemoError> {
    let deadline = timeout.map(|t| Instant::now() + t);
    debug!("Waiting for {} (timeout {:?})", kind, timeout);

    loop {
        while let Some(event) = display.poll_event()? {
            if kind.matches(event) {
                debug!("Got {}", kind);
                return Ok(());
            }
            trace!("Discarding {:?} while waiting for {}", event, kind);
        }

        if let (Some(deadline), Some(timeout)) = (deadline, timeout) {
            if Instant::now() >= deadline {
                return Err(DemoError::Timeout { kind, timeout });
            }
        }

        time::sleep(poll_interval).await;
    }
}
