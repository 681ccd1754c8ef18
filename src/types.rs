use std::fmt;

// Types shared across multiple modules

// Screen resolution in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub width: u16,
    pub height: u16,
}

impl Geometry {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

// Position of the window origin in root coordinates, i.e. the inset the
// window manager's decorations pushed it by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Offset {
    pub dx: i16,
    pub dy: i16,
}

impl Offset {
    // Where the window has to go so its drawable area starts at (0,0),
    // or `None` if it is not inset.
    pub fn correction(&self) -> Option<(i32, i32)> {
        if self.dx > 0 || self.dy > 0 {
            Some((-i32::from(self.dx), -i32::from(self.dy)))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub x1: i16,
    pub y1: i16,
    pub x2: i16,
    pub y2: i16,
}

// What we need to know about the default screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenInfo {
    pub protocol_major: u16,
    pub protocol_minor: u16,
    pub root: u32,
    pub black_pixel: u32,
    pub white_pixel: u32,
    pub core_geometry: Geometry,
}

// Events as far as the demo cares about them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoEvent {
    MapNotify,
    ButtonPress,
    ButtonRelease,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Mapped,
    ButtonReleased,
}

impl EventKind {
    pub fn matches(self, event: DemoEvent) -> bool {
        matches!(
            (self, event),
            (EventKind::Mapped, DemoEvent::MapNotify)
                | (EventKind::ButtonReleased, DemoEvent::ButtonRelease)
        )
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Mapped => f.write_str("MapNotify"),
            EventKind::ButtonReleased => f.write_str("ButtonRelease"),
        }
    }
}
