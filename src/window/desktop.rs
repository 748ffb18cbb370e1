//! Desktop implementation of [`WindowControl`] on top of `xcap` (window
//! enumeration and client-area capture) and `enigo` (synthetic input).

use std::time::Duration;

use enigo::{Button, Coordinate, Direction, Enigo, Mouse, Settings};
use image::RgbaImage;

use crate::errors::{PixelPlowError, PixelPlowResult};
use crate::geometry::PixelBox;
use crate::window::WindowControl;

pub struct DesktopWindow {
    window: xcap::Window,
    enigo: Enigo,
}

impl DesktopWindow {
    /// Select the first window whose title contains `title_substr` and bind
    /// an input handle to it. Done once at startup.
    pub fn find(title_substr: &str) -> PixelPlowResult<Self> {
        let windows = xcap::Window::all()
            .map_err(|e| PixelPlowError::Capture(format!("window enumeration: {e}")))?;

        let window = windows
            .into_iter()
            .find(|w| w.title().contains(title_substr))
            .ok_or_else(|| {
                PixelPlowError::Capture(format!("no window with title containing '{title_substr}'"))
            })?;
        tracing::info!(title = %window.title(), "target window selected");

        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| PixelPlowError::Input(format!("input handle: {e}")))?;

        Ok(Self { window, enigo })
    }
}

impl WindowControl for DesktopWindow {
    fn title(&self) -> String {
        self.window.title().to_string()
    }

    fn bring_to_foreground(&mut self) -> PixelPlowResult<()> {
        #[cfg(windows)]
        {
            use windows::Win32::Foundation::HWND;
            use windows::Win32::UI::WindowsAndMessaging::SetForegroundWindow;

            let hwnd = HWND(self.window.id() as usize as *mut core::ffi::c_void);
            // Failure here means another process holds foreground lock;
            // capture still reads the window's own buffer.
            unsafe {
                let _ = SetForegroundWindow(hwnd);
            }
        }
        #[cfg(not(windows))]
        {
            tracing::trace!(title = %self.window.title(), "foreground raise not supported on this platform");
        }
        Ok(())
    }

    fn capture_content(&mut self) -> PixelPlowResult<RgbaImage> {
        self.window
            .capture_image()
            .map_err(|e| PixelPlowError::Capture(format!("window capture: {e}")))
    }

    fn content_bounding_box(&mut self) -> PixelPlowResult<PixelBox> {
        let x = self.window.x();
        let y = self.window.y();
        Ok(PixelBox {
            x1: x,
            y1: y,
            x2: x + self.window.width() as i32,
            y2: y + self.window.height() as i32,
        })
    }

    fn dispatch_click(&mut self, x: i32, y: i32) -> PixelPlowResult<()> {
        self.enigo
            .move_mouse(x, y, Coordinate::Abs)
            .map_err(|e| PixelPlowError::Input(format!("mouse move: {e}")))?;
        self.enigo
            .button(Button::Left, Direction::Click)
            .map_err(|e| PixelPlowError::Input(format!("mouse click: {e}")))?;
        tracing::debug!(x, y, "click dispatched");
        Ok(())
    }

    fn dispatch_drag(
        &mut self,
        from: (i32, i32),
        to: (i32, i32),
        duration: Duration,
    ) -> PixelPlowResult<()> {
        const STEPS: i32 = 20;

        self.enigo
            .move_mouse(from.0, from.1, Coordinate::Abs)
            .map_err(|e| PixelPlowError::Input(format!("mouse move: {e}")))?;
        self.enigo
            .button(Button::Left, Direction::Press)
            .map_err(|e| PixelPlowError::Input(format!("button press: {e}")))?;

        let step_pause = duration / STEPS as u32;
        for i in 1..=STEPS {
            let x = from.0 + (to.0 - from.0) * i / STEPS;
            let y = from.1 + (to.1 - from.1) * i / STEPS;
            self.enigo
                .move_mouse(x, y, Coordinate::Abs)
                .map_err(|e| PixelPlowError::Input(format!("mouse move: {e}")))?;
            std::thread::sleep(step_pause);
        }

        self.enigo
            .button(Button::Left, Direction::Release)
            .map_err(|e| PixelPlowError::Input(format!("button release: {e}")))?;
        tracing::debug!(?from, ?to, "drag dispatched");
        Ok(())
    }
}
