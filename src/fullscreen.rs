// The fullscreen demo: one pass from connect to click.
//
// Each step returns a `Result` and the sequence stops at the first fatal
// one. Resources live in slots on the session, and teardown releases
// whatever is held in reverse order, whether the sequence finished or not.

use std::io::Write;

use tokio::time;
use tracing::{debug, info, warn};
use x11rb::protocol::xproto::{Gcontext, Window};

use crate::config::DemoConfig;
use crate::console::Console;
use crate::constants::MARKER;
use crate::error::DemoError;
use crate::events;
use crate::slot::Slot;
use crate::types::{EventKind, Geometry, ScreenInfo};
use crate::window::DisplayServer;

pub struct Session<D: DisplayServer> {
    display: Slot<D>,
    window: Slot<Window>,
    gc: Slot<Gcontext>,
}

impl<D: DisplayServer> Session<D> {
    pub fn open<F>(connect: F) -> Result<Self, DemoError>
    where
        F: FnOnce() -> Result<D, DemoError>,
    {
        let mut display = Slot::Vacant;
        display.acquire(connect()?);
        Ok(Self { display, window: Slot::Vacant, gc: Slot::Vacant })
    }

    fn display(&mut self) -> Result<&mut D, DemoError> {
        self.display.get_mut().ok_or(DemoError::Disconnected)
    }

    // Everything between connect and teardown.
    pub async fn present<W: Write>(
        &mut self,
        config: &DemoConfig,
        console: &mut Console<W>,
    ) -> Result<(), DemoError> {
        let info = self.display()?.screen_info();
        console.info(&format!(
            "X11 Protocol Version {}, Revision {}.",
            info.protocol_major, info.protocol_minor
        ));

        let geometry = self.screen_geometry(&info)?;
        console.info(&format!("X11 Screen Size: {}.", geometry));

        let win = self.create_window(geometry, &info)?;
        self.map_undecorated(win, config).await?;
        self.request_fullscreen(win, console)?;
        self.cancel_decoration_offset(win, console)?;

        // Give the window manager a moment to apply the state change
        time::sleep(config.settle_delay).await;

        let gc = self.create_gc(win)?;
        self.draw_marker(win, gc, info.black_pixel)?;
        self.wait_for_click(win, config).await
    }

    fn screen_geometry(&mut self, info: &ScreenInfo) -> Result<Geometry, DemoError> {
        let core = info.core_geometry;
        let display = self.display()?;

        let geometry = match display.mode_line_geometry() {
            Ok(geometry) if !geometry.is_empty() => geometry,
            Ok(geometry) => {
                warn!("VidMode reports a {} screen, using core size {}", geometry, core);
                core
            }
            Err(e) => {
                warn!("VidMode mode line unavailable ({}), using core size {}", e, core);
                core
            }
        };
        if geometry.is_empty() {
            return Err(DemoError::EmptyGeometry(geometry));
        }

        if let Err(e) = display.reset_viewport() {
            debug!("Viewport reset failed: {}", e);
        }
        Ok(geometry)
    }

    // Light background, dark border, so the marker stands out
    fn create_window(&mut self, geometry: Geometry, info: &ScreenInfo) -> Result<Window, DemoError> {
        let win = self
            .display()?
            .create_window(geometry, info.white_pixel, info.black_pixel)?;
        self.window.acquire(win);
        info!("Created window 0x{:X} {} on root 0x{:X}", win, geometry, info.root);
        Ok(win)
    }

    // The hint must be on the window before the window manager first sees it
    async fn map_undecorated(&mut self, win: Window, config: &DemoConfig) -> Result<(), DemoError> {
        let display = self.display()?;
        display.set_decoration_hint(win)?;
        display.select_structure_events(win)?;
        display.map_raised(win)?;
        events::wait_for(display, EventKind::Mapped, config.map_timeout, config.poll_interval).await
    }

    fn request_fullscreen<W: Write>(
        &mut self,
        win: Window,
        console: &mut Console<W>,
    ) -> Result<(), DemoError> {
        if let Err(e) = self.display()?.request_fullscreen(win) {
            console.warning(&format!("fullscreen request was not delivered ({})", e));
        }
        Ok(())
    }

    fn cancel_decoration_offset<W: Write>(
        &mut self,
        win: Window,
        console: &mut Console<W>,
    ) -> Result<(), DemoError> {
        let display = self.display()?;
        match display.translate_origin(win) {
            Ok(offset) => {
                if let Some((x, y)) = offset.correction() {
                    debug!("Window inset by {:?}, moving to ({}, {})", offset, x, y);
                    display.move_window(win, x, y)?;
                    // The settle delay should cover the move too
                    display.flush()?;
                }
            }
            Err(e) => {
                console.warning(&format!("X11 screen issue, can't go fullscreen ({})", e));
            }
        }
        Ok(())
    }

    fn create_gc(&mut self, win: Window) -> Result<Gcontext, DemoError> {
        let gc = self.display()?.create_gc(win)?;
        self.gc.acquire(gc);
        Ok(gc)
    }

    fn draw_marker(&mut self, win: Window, gc: Gcontext, pixel: u32) -> Result<(), DemoError> {
        let display = self.display()?;
        display.set_foreground(gc, pixel)?;
        for segment in MARKER {
            display.draw_line(win, gc, segment)?;
        }
        display.flush()
    }

    async fn wait_for_click(&mut self, win: Window, config: &DemoConfig) -> Result<(), DemoError> {
        let display = self.display()?;
        display.select_button_events(win)?;
        info!("Click inside the window to exit");
        events::wait_for(
            display,
            EventKind::ButtonReleased,
            config.click_timeout,
            config.poll_interval,
        )
        .await
    }

    // Release everything still held, most recent first. Safe to call more
    // than once.
    pub fn teardown(&mut self) {
        if let Some(display) = self.display.get_mut() {
            if let Some(gc) = self.gc.release() {
                if let Err(e) = display.free_gc(gc) {
                    warn!("Failed to free graphics context 0x{:X}: {}", gc, e);
                }
            }
            if let Some(win) = self.window.release() {
                if let Err(e) = display.destroy_window(win) {
                    warn!("Failed to destroy window 0x{:X}: {}", win, e);
                }
            }
        }

        if let Some(mut display) = self.display.release() {
            if let Err(e) = display.close() {
                warn!("Failed to close display connection: {}", e);
            }
            debug!("Display connection closed");
        }
    }
}

impl<D: DisplayServer> Drop for Session<D> {
    fn drop(&mut self) {
        if self.display.is_held() {
            self.teardown();
        }
    }
}

// Connect, present the window, and tear down again.
pub async fn run<D, F, W>(
    connect: F,
    config: &DemoConfig,
    console: &mut Console<W>,
) -> Result<(), DemoError>
where
    D: DisplayServer,
    F: FnOnce() -> Result<D, DemoError>,
    W: Write,
{
    let mut session = Session::open(connect)?;
    let result = session.present(config, console).await;
    session.teardown();
    result
}

// Print the outcome and pick the process exit status: 0 on success,
// 1 after a fatal error.
pub fn report<W: Write>(result: &Result<(), DemoError>, console: &mut Console<W>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            console.error(&e.to_string());
            1
        }
    }
}
