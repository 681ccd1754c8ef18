// The display-server seam and its x11rb implementation

use tracing::{debug, trace};
use x11rb::connection::Connection;
use x11rb::protocol::xf86vidmode::ConnectionExt as _;
use x11rb::protocol::xproto::*;
use x11rb::protocol::Event;
use x11rb::rust_connection::RustConnection;
use x11rb::wrapper::ConnectionExt as _;

use crate::constants::{
    MOTIF_NO_DECORATIONS, MOTIF_WM_HINTS, NET_WM_STATE, NET_WM_STATE_ADD,
    NET_WM_STATE_FULLSCREEN,
};
use crate::error::DemoError;
use crate::types::{DemoEvent, Geometry, Offset, ScreenInfo, Segment};

// Every server interaction the demo performs. One call per protocol step so
// the run sequence can be replayed against a fake server.
pub trait DisplayServer {
    fn screen_info(&self) -> ScreenInfo;

    // Current resolution from the VidMode mode line.
    fn mode_line_geometry(&mut self) -> Result<Geometry, DemoError>;
    fn reset_viewport(&mut self) -> Result<(), DemoError>;

    // Top-level window at (0,0), no border width.
    fn create_window(
        &mut self,
        geometry: Geometry,
        background: u32,
        border: u32,
    ) -> Result<Window, DemoError>;
    fn set_decoration_hint(&mut self, win: Window) -> Result<(), DemoError>;
    fn select_structure_events(&mut self, win: Window) -> Result<(), DemoError>;
    fn map_raised(&mut self, win: Window) -> Result<(), DemoError>;
    fn request_fullscreen(&mut self, win: Window) -> Result<(), DemoError>;
    fn translate_origin(&mut self, win: Window) -> Result<Offset, DemoError>;
    fn move_window(&mut self, win: Window, x: i32, y: i32) -> Result<(), DemoError>;

    fn create_gc(&mut self, win: Window) -> Result<Gcontext, DemoError>;
    fn set_foreground(&mut self, gc: Gcontext, pixel: u32) -> Result<(), DemoError>;
    fn draw_line(&mut self, win: Window, gc: Gcontext, segment: Segment) -> Result<(), DemoError>;
    fn select_button_events(&mut self, win: Window) -> Result<(), DemoError>;

    // Next queued event, without blocking.
    fn poll_event(&mut self) -> Result<Option<DemoEvent>, DemoError>;
    fn flush(&mut self) -> Result<(), DemoError>;

    fn free_gc(&mut self, gc: Gcontext) -> Result<(), DemoError>;
    fn destroy_window(&mut self, win: Window) -> Result<(), DemoError>;
    // Flush what is left and hang up. Called once, last.
    fn close(&mut self) -> Result<(), DemoError>;
}

// _NET_WM_STATE client message asking the window manager to add the
// fullscreen state. Goes to the root window.
fn fullscreen_request(win: Window, wm_state: Atom, fullscreen: Atom) -> ClientMessageEvent {
    ClientMessageEvent::new(32, win, wm_state, [NET_WM_STATE_ADD, fullscreen, 0, 0, 0])
}

// What EWMH wants root-window client messages selected with
fn fullscreen_request_mask() -> EventMask {
    EventMask::SUBSTRUCTURE_NOTIFY | EventMask::SUBSTRUCTURE_REDIRECT
}

pub struct X11Display {
    conn: RustConnection,
    screen_num: usize,
}

impl X11Display {
    pub fn connect(display_name: Option<&str>) -> Result<Self, DemoError> {
        let (conn, screen_num) =
            x11rb::connect(display_name).map_err(|e| DemoError::Connect(e.to_string()))?;
        debug!("Connected to X server, default screen {}", screen_num);
        Ok(Self { conn, screen_num })
    }

    fn screen(&self) -> &Screen {
        &self.conn.setup().roots[self.screen_num]
    }

    fn intern(&self, name: &str) -> Result<Atom, DemoError> {
        let atom = self.conn.intern_atom(false, name.as_bytes())?.reply()?.atom;
        trace!("Interned {} as {}", name, atom);
        Ok(atom)
    }
}

impl DisplayServer for X11Display {
    fn screen_info(&self) -> ScreenInfo {
        let setup = self.conn.setup();
        let screen = self.screen();
        ScreenInfo {
            protocol_major: setup.protocol_major_version,
            protocol_minor: setup.protocol_minor_version,
            root: screen.root,
            black_pixel: screen.black_pixel,
            white_pixel: screen.white_pixel,
            core_geometry: Geometry {
                width: screen.width_in_pixels,
                height: screen.height_in_pixels,
            },
        }
    }

    fn mode_line_geometry(&mut self) -> Result<Geometry, DemoError> {
        let mode_line = self
            .conn
            .xf86vidmode_get_mode_line(self.screen_num as u16)?
            .reply()?;
        debug!("VidMode dot clock {} kHz", mode_line.dotclock);
        Ok(Geometry { width: mode_line.hdisplay, height: mode_line.vdisplay })
    }

    fn reset_viewport(&mut self) -> Result<(), DemoError> {
        self.conn
            .xf86vidmode_set_view_port(self.screen_num as u16, 0, 0)?
            .check()?;
        Ok(())
    }

    fn create_window(
        &mut self,
        geometry: Geometry,
        background: u32,
        border: u32,
    ) -> Result<Window, DemoError> {
        let screen = self.screen();
        let (root, depth, visual) = (screen.root, screen.root_depth, screen.root_visual);
        let values = CreateWindowAux::new()
            .background_pixel(background)
            .border_pixel(border);

        let create_failed = |reason: String| DemoError::CreateWindow { root, reason };
        let win = self.conn.generate_id().map_err(|e| create_failed(e.to_string()))?;
        self.conn
            .create_window(
                depth,
                win,
                root,
                0, 0,
                geometry.width, geometry.height,
                0,
                WindowClass::INPUT_OUTPUT,
                visual,
                &values,
            )
            .map_err(|e| create_failed(e.to_string()))?
            .check()
            .map_err(|e| create_failed(e.to_string()))?;

        Ok(win)
    }

    fn set_decoration_hint(&mut self, win: Window) -> Result<(), DemoError> {
        let hints = self.intern(MOTIF_WM_HINTS)?;
        self.conn
            .change_property32(PropMode::REPLACE, win, hints, hints, &MOTIF_NO_DECORATIONS)?;
        Ok(())
    }

    fn select_structure_events(&mut self, win: Window) -> Result<(), DemoError> {
        let values = ChangeWindowAttributesAux::new().event_mask(EventMask::STRUCTURE_NOTIFY);
        self.conn.change_window_attributes(win, &values)?;
        Ok(())
    }

    fn map_raised(&mut self, win: Window) -> Result<(), DemoError> {
        let values = ConfigureWindowAux::new().stack_mode(StackMode::ABOVE);
        self.conn.configure_window(win, &values)?;
        self.conn.map_window(win)?;
        self.conn.flush()?;
        Ok(())
    }

    fn request_fullscreen(&mut self, win: Window) -> Result<(), DemoError> {
        let wm_state = self.intern(NET_WM_STATE)?;
        let fullscreen = self.intern(NET_WM_STATE_FULLSCREEN)?;
        let root = self.screen().root;

        let event = fullscreen_request(win, wm_state, fullscreen);
        self.conn
            .send_event(false, root, fullscreen_request_mask(), event)?
            .check()
            .map_err(|e| DemoError::request("SendEvent(_NET_WM_STATE)", e))?;
        Ok(())
    }

    fn translate_origin(&mut self, win: Window) -> Result<Offset, DemoError> {
        let root = self.screen().root;
        let reply = self
            .conn
            .translate_coordinates(win, root, 0, 0)?
            .reply()
            .map_err(|e| DemoError::request("TranslateCoordinates", e))?;
        if !reply.same_screen {
            return Err(DemoError::request(
                "TranslateCoordinates",
                "window and root are on different screens",
            ));
        }
        Ok(Offset { dx: reply.dst_x, dy: reply.dst_y })
    }

    fn move_window(&mut self, win: Window, x: i32, y: i32) -> Result<(), DemoError> {
        let values = ConfigureWindowAux::new().x(x).y(y);
        self.conn.configure_window(win, &values)?;
        Ok(())
    }

    fn create_gc(&mut self, win: Window) -> Result<Gcontext, DemoError> {
        let create_failed = |reason: String| DemoError::CreateGc { window: win, reason };
        let gc = self.conn.generate_id().map_err(|e| create_failed(e.to_string()))?;
        self.conn
            .create_gc(gc, win, &CreateGCAux::new())
            .map_err(|e| create_failed(e.to_string()))?
            .check()
            .map_err(|e| create_failed(e.to_string()))?;
        Ok(gc)
    }

    fn set_foreground(&mut self, gc: Gcontext, pixel: u32) -> Result<(), DemoError> {
        let values = ChangeGCAux::new().foreground(pixel);
        self.conn.change_gc(gc, &values)?;
        Ok(())
    }

    fn draw_line(&mut self, win: Window, gc: Gcontext, segment: Segment) -> Result<(), DemoError> {
        let points = [
            Point { x: segment.x1, y: segment.y1 },
            Point { x: segment.x2, y: segment.y2 },
        ];
        self.conn.poly_line(CoordMode::ORIGIN, win, gc, &points)?;
        Ok(())
    }

    fn select_button_events(&mut self, win: Window) -> Result<(), DemoError> {
        let values = ChangeWindowAttributesAux::new()
            .event_mask(EventMask::BUTTON_PRESS | EventMask::BUTTON_RELEASE);
        self.conn.change_window_attributes(win, &values)?;
        self.conn.flush()?;
        Ok(())
    }

    fn poll_event(&mut self) -> Result<Option<DemoEvent>, DemoError> {
        let event = match self.conn.poll_for_event()? {
            Some(event) => event,
            None => return Ok(None),
        };
        trace!("X11 event: {:?}", event);

        Ok(Some(match event {
            Event::MapNotify(_) => DemoEvent::MapNotify,
            Event::ButtonPress(_) => DemoEvent::ButtonPress,
            Event::ButtonRelease(_) => DemoEvent::ButtonRelease,
            _ => DemoEvent::Other,
        }))
    }

    fn flush(&mut self) -> Result<(), DemoError> {
        self.conn.flush()?;
        Ok(())
    }

    fn free_gc(&mut self, gc: Gcontext) -> Result<(), DemoError> {
        self.conn.free_gc(gc)?;
        Ok(())
    }

    fn destroy_window(&mut self, win: Window) -> Result<(), DemoError> {
        self.conn.destroy_window(win)?;
        Ok(())
    }

    fn close(&mut self) -> Result<(), DemoError> {
        // The socket itself goes away when the connection is dropped
        self.conn.flush()?;
        Ok(())
    }
}
