// Constants shared across multiple modules

use std::time::Duration;

use crate::types::Segment;

// Atoms
pub const MOTIF_WM_HINTS: &str = "_MOTIF_WM_HINTS";
pub const NET_WM_STATE: &str = "_NET_WM_STATE";
pub const NET_WM_STATE_FULLSCREEN: &str = "_NET_WM_STATE_FULLSCREEN";

// _MOTIF_WM_HINTS layout: flags, functions, decorations, input_mode, status
pub const MWM_HINTS_DECORATIONS: u32 = 1 << 1;
pub const MOTIF_NO_DECORATIONS: [u32; 5] = [MWM_HINTS_DECORATIONS, 0, 0, 0, 0];

// _NET_WM_STATE action: 0 remove, 1 add, 2 toggle
pub const NET_WM_STATE_ADD: u32 = 1;

// The "X" marker, fixed size regardless of resolution
pub const MARKER: [Segment; 2] = [
    Segment { x1: 10, y1: 10, x2: 190, y2: 190 },
    Segment { x1: 10, y1: 190, x2: 190, y2: 10 },
];

// Timing
pub const SETTLE_DELAY: Duration = Duration::from_secs(1);
pub const MAP_TIMEOUT: Duration = Duration::from_secs(10);
pub const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(10);

// Logging
pub const DEFAULT_LOG_FILTER: &str = "xfullscreen=info";
