//! Host window-system capability interface.
//!
//! Everything OS-specific — enumerating windows, raising one to the
//! foreground, grabbing its client area, firing synthetic input — lives
//! behind [`WindowControl`]. The engine only ever consumes capture results
//! and issues clicks through this seam, which also makes the whole
//! navigation stack testable against a scripted fake.

pub mod desktop;

use std::time::Duration;

use image::RgbaImage;

use crate::errors::PixelPlowResult;
use crate::geometry::PixelBox;

pub trait WindowControl {
    fn title(&self) -> String;

    /// Raise the window so captures reflect live content rather than an
    /// occluded or stale buffer. Called before every capture.
    fn bring_to_foreground(&mut self) -> PixelPlowResult<()>;

    /// Screenshot of the window's client area only (no chrome/borders).
    fn capture_content(&mut self) -> PixelPlowResult<RgbaImage>;

    /// Client-area bounds in absolute screen pixels. Re-queried per call,
    /// never cached: the window may move or resize between calls.
    fn content_bounding_box(&mut self) -> PixelPlowResult<PixelBox>;

    fn dispatch_click(&mut self, x: i32, y: i32) -> PixelPlowResult<()>;

    fn dispatch_drag(
        &mut self,
        from: (i32, i32),
        to: (i32, i32),
        duration: Duration,
    ) -> PixelPlowResult<()>;
}
