use std::time::Duration;

use x11rb::errors::{ConnectionError, ReplyError};

use crate::types::{EventKind, Geometry};

// Everything that can stop or degrade a run.
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("cannot open display: {0}")]
    Connect(String),
    #[error("cannot create window (root=0x{root:X}): {reason}")]
    CreateWindow { root: u32, reason: String },
    #[error("cannot create graphics context (window=0x{window:X}): {reason}")]
    CreateGc { window: u32, reason: String },
    #[error("screen geometry is empty ({0})")]
    EmptyGeometry(Geometry),
    #[error("timed out after {timeout:?} waiting for {kind}")]
    Timeout { kind: EventKind, timeout: Duration },
    #[error("display connection already closed")]
    Disconnected,
    // A single request the server refused or that never got a usable reply
    #[error("{request} failed: {reason}")]
    Request { request: &'static str, reason: String },
    #[error(transparent)]
    Connection(#[from] ConnectionError),
    #[error(transparent)]
    Reply(#[from] ReplyError),
}

impl DemoError {
    pub fn request(request: &'static str, reason: impl ToString) -> Self {
        DemoError::Request { request, reason: reason.to_string() }
    }
}
