// Recording stand-in for the X server

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use tokio::time::Instant;

use x11rb::protocol::xproto::{Gcontext, Window};

use crate::error::DemoError;
use crate::types::{DemoEvent, Geometry, Offset, ScreenInfo, Segment};
use crate::window::DisplayServer;

pub const ROOT: Window = 0x1e5;
pub const WINDOW: Window = 0x0040_0001;
pub const GC: Gcontext = 0x0040_0002;
pub const BLACK: u32 = 0x000000;
pub const WHITE: u32 = 0xffffff;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    ModeLine,
    ResetViewport,
    CreateWindow(Geometry),
    SetDecorationHint(Window),
    SelectStructureEvents(Window),
    MapRaised(Window),
    RequestFullscreen(Window),
    TranslateOrigin(Window),
    MoveWindow(Window, i32, i32),
    CreateGc(Window),
    SetForeground(Gcontext, u32),
    DrawLine(Window, Gcontext, Segment),
    SelectButtonEvents(Window),
    PollEvent,
    Flush,
    FreeGc(Gcontext),
    DestroyWindow(Window),
    Close,
}

pub type CallLog = Rc<RefCell<Vec<Call>>>;
pub type Timeline = Rc<RefCell<Vec<(Call, Instant)>>>;

pub struct FakeDisplay {
    log: CallLog,
    timeline: Timeline,
    pub info: ScreenInfo,
    // `None` behaves like a server without XFree86-VidModeExtension
    pub mode_line: Option<Geometry>,
    pub offset: Offset,
    pub fail_create_window: bool,
    pub fail_create_gc: bool,
    pub fail_fullscreen_request: bool,
    pub fail_translate: bool,
    // Swallow the MapNotify a real server sends after mapping
    pub never_map: bool,
    // Never deliver a click
    pub never_click: bool,
    events: VecDeque<DemoEvent>,
    delayed: Option<(usize, Vec<DemoEvent>)>,
}

impl FakeDisplay {
    pub fn new() -> Self {
        Self::with_geometry(Geometry { width: 1920, height: 1080 })
    }

    pub fn with_geometry(geometry: Geometry) -> Self {
        Self {
            log: Rc::new(RefCell::new(Vec::new())),
            timeline: Rc::new(RefCell::new(Vec::new())),
            info: ScreenInfo {
                protocol_major: 11,
                protocol_minor: 0,
                root: ROOT,
                black_pixel: BLACK,
                white_pixel: WHITE,
                core_geometry: geometry,
            },
            mode_line: Some(geometry),
            offset: Offset::default(),
            fail_create_window: false,
            fail_create_gc: false,
            fail_fullscreen_request: false,
            fail_translate: false,
            never_map: false,
            never_click: false,
            events: VecDeque::new(),
            delayed: None,
        }
    }

    pub fn log(&self) -> CallLog {
        Rc::clone(&self.log)
    }

    // Every call with the (tokio) time it was issued at
    pub fn timeline(&self) -> Timeline {
        Rc::clone(&self.timeline)
    }

    pub fn push_events(&mut self, events: impl IntoIterator<Item = DemoEvent>) {
        self.events.extend(events);
    }

    pub fn push_events_after_polls(
        &mut self,
        polls: usize,
        events: impl IntoIterator<Item = DemoEvent>,
    ) {
        self.delayed = Some((polls, events.into_iter().collect()));
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    fn record(&self, call: Call) {
        self.log.borrow_mut().push(call);
        self.timeline.borrow_mut().push((call, Instant::now()));
    }
}

impl DisplayServer for FakeDisplay {
    fn screen_info(&self) -> ScreenInfo {
        self.info
    }

    fn mode_line_geometry(&mut self) -> Result<Geometry, DemoError> {
        self.record(Call::ModeLine);
        self.mode_line
            .ok_or_else(|| DemoError::request("XF86VidModeGetModeLine", "extension not present"))
    }

    fn reset_viewport(&mut self) -> Result<(), DemoError> {
        self.record(Call::ResetViewport);
        match self.mode_line {
            Some(_) => Ok(()),
            None => Err(DemoError::request("XF86VidModeSetViewPort", "extension not present")),
        }
    }

    fn create_window(
        &mut self,
        geometry: Geometry,
        _background: u32,
        _border: u32,
    ) -> Result<Window, DemoError> {
        self.record(Call::CreateWindow(geometry));
        if self.fail_create_window {
            return Err(DemoError::CreateWindow { root: ROOT, reason: "BadAlloc".into() });
        }
        Ok(WINDOW)
    }

    fn set_decoration_hint(&mut self, win: Window) -> Result<(), DemoError> {
        self.record(Call::SetDecorationHint(win));
        Ok(())
    }

    fn select_structure_events(&mut self, win: Window) -> Result<(), DemoError> {
        self.record(Call::SelectStructureEvents(win));
        Ok(())
    }

    fn map_raised(&mut self, win: Window) -> Result<(), DemoError> {
        self.record(Call::MapRaised(win));
        if !self.never_map {
            self.events.extend([DemoEvent::Other, DemoEvent::MapNotify]);
        }
        Ok(())
    }

    fn request_fullscreen(&mut self, win: Window) -> Result<(), DemoError> {
        self.record(Call::RequestFullscreen(win));
        if self.fail_fullscreen_request {
            return Err(DemoError::request("SendEvent(_NET_WM_STATE)", "BadValue"));
        }
        Ok(())
    }

    fn translate_origin(&mut self, win: Window) -> Result<Offset, DemoError> {
        self.record(Call::TranslateOrigin(win));
        if self.fail_translate {
            return Err(DemoError::request("TranslateCoordinates", "BadWindow"));
        }
        Ok(self.offset)
    }

    fn move_window(&mut self, win: Window, x: i32, y: i32) -> Result<(), DemoError> {
        self.record(Call::MoveWindow(win, x, y));
        Ok(())
    }

    fn create_gc(&mut self, win: Window) -> Result<Gcontext, DemoError> {
        self.record(Call::CreateGc(win));
        if self.fail_create_gc {
            return Err(DemoError::CreateGc { window: win, reason: "BadMatch".into() });
        }
        Ok(GC)
    }

    fn set_foreground(&mut self, gc: Gcontext, pixel: u32) -> Result<(), DemoError> {
        self.record(Call::SetForeground(gc, pixel));
        Ok(())
    }

    fn draw_line(&mut self, win: Window, gc: Gcontext, segment: Segment) -> Result<(), DemoError> {
        self.record(Call::DrawLine(win, gc, segment));
        Ok(())
    }

    fn select_button_events(&mut self, win: Window) -> Result<(), DemoError> {
        self.record(Call::SelectButtonEvents(win));
        if !self.never_click {
            self.events.extend([DemoEvent::ButtonPress, DemoEvent::ButtonRelease]);
        }
        Ok(())
    }

    fn poll_event(&mut self) -> Result<Option<DemoEvent>, DemoError> {
        self.record(Call::PollEvent);
        if let Some((polls, _)) = self.delayed.as_mut() {
            if *polls > 0 {
                *polls -= 1;
                return Ok(None);
            }
            if let Some((_, events)) = self.delayed.take() {
                self.events.extend(events);
            }
        }
        Ok(self.events.pop_front())
    }

    fn flush(&mut self) -> Result<(), DemoError> {
        self.record(Call::Flush);
        Ok(())
    }

    fn free_gc(&mut self, gc: Gcontext) -> Result<(), DemoError> {
        self.record(Call::FreeGc(gc));
        Ok(())
    }

    fn destroy_window(&mut self, win: Window) -> Result<(), DemoError> {
        self.record(Call::DestroyWindow(win));
        Ok(())
    }

    fn close(&mut self) -> Result<(), DemoError> {
        self.record(Call::Close);
        Ok(())
    }
}
