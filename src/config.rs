use std::time::Duration;

use crate::constants::{EVENT_POLL_INTERVAL, MAP_TIMEOUT, SETTLE_DELAY};

// Knobs for one run. `Default` gives the stock behavior; tests shorten the
// delays.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    // X display to connect to, `None` means `$DISPLAY`
    pub display_name: Option<String>,
    // Pause after the fullscreen request before drawing
    pub settle_delay: Duration,
    pub map_timeout: Option<Duration>,
    // `None` waits for the click forever
    pub click_timeout: Option<Duration>,
    pub poll_interval: Duration,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            display_name: None,
            settle_delay: SETTLE_DELAY,
            map_timeout: Some(MAP_TIMEOUT),
            click_timeout: None,
            poll_interval: EVENT_POLL_INTERVAL,
        }
    }
}
