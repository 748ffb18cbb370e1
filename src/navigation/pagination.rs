//! Paginated newspaper navigation.
//!
//! A single drag gesture is not guaranteed to move exactly one spread, so
//! the loop treats the OCR-read page number as ground truth and the
//! internal expected-page counter as a hypothesis that gets re-synchronized
//! after every bounded batch of drags. Both the drag batches and the
//! re-measurement rounds are bounded; exhausting the rounds is a
//! navigation failure.

use std::time::Duration;

use crate::errors::{ExtractionError, NavigationError, PixelPlowResult};
use crate::geometry::{to_absolute, RatioBox};
use crate::vision::locator::Locator;
use crate::vision::ocr::{OcrProfile, ReadText};
use crate::window::WindowControl;

/// Bottom-center strip where the game renders the current page number.
const PAGE_NUMBER_REGION: RatioBox = RatioBox {
    x1: 0.455,
    y1: 0.895,
    x2: 0.545,
    y2: 0.955,
};

/// Digits rendered in the page footer: small outlined font on parchment.
const PAGE_PROFILE: OcrProfile = OcrProfile {
    scale: 4,
    margin: 10,
    threshold: Some(160),
    dilate_radius: 1,
    dilate_iterations: 1,
    flood_fill_corner: true,
    invert: true,
    whitelist: Some("0123456789"),
    psm: 7,
};

/// Horizontal swipe endpoints in ratio space; forward = next spread.
const SWIPE_FROM_X: f32 = 0.78;
const SWIPE_TO_X: f32 = 0.22;
const SWIPE_Y: f32 = 0.5;

pub struct Paginator {
    pub drags_per_round: u32,
    pub max_rounds: u32,
    pub page_stride: u32,
    pub drag_duration: Duration,
    pub settle: Duration,
}

impl Paginator {
    /// Scroll the newspaper until the displayed page number equals
    /// `target`, re-measuring and re-syncing between drag batches.
    pub fn change_page(
        &self,
        window: &mut dyn WindowControl,
        locator: &Locator,
        reader: &dyn ReadText,
        target: u32,
    ) -> PixelPlowResult<()> {
        let mut measured = self.read_page(window, locator, reader)?;
        if measured == target {
            return Ok(());
        }

        for round in 1..=self.max_rounds {
            // The counter is a hypothesis seeded from the last measurement;
            // each drag shifts it by one stride.
            let mut expected = measured;
            for _ in 0..self.drags_per_round {
                if expected == target {
                    break;
                }
                let forward = expected < target;
                self.drag_once(window, forward)?;
                expected = if forward {
                    expected + self.page_stride
                } else {
                    expected.saturating_sub(self.page_stride)
                };
            }

            measured = self.read_page(window, locator, reader)?;
            if measured == target {
                tracing::debug!(page = target, round, "page reached");
                return Ok(());
            }
            tracing::debug!(
                expected,
                measured,
                round,
                "page counter drifted, re-syncing to measurement"
            );
        }

        Err(NavigationError::PageNotReached {
            target,
            last_read: measured,
        }
        .into())
    }

    /// OCR the page footer of a fresh frame.
    pub fn read_page(
        &self,
        window: &mut dyn WindowControl,
        locator: &Locator,
        reader: &dyn ReadText,
    ) -> PixelPlowResult<u32> {
        let frame = locator.capture_frame(window)?;
        let text = reader.read(&frame.color, PAGE_NUMBER_REGION, &PAGE_PROFILE)?;

        crate::extraction::parse_integer(&text)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| {
                ExtractionError::Unparsable {
                    field: "page number",
                    observed: text,
                }
                .into()
            })
    }

    fn drag_once(&self, window: &mut dyn WindowControl, forward: bool) -> PixelPlowResult<()> {
        let (from_x, to_x) = if forward {
            (SWIPE_FROM_X, SWIPE_TO_X)
        } else {
            (SWIPE_TO_X, SWIPE_FROM_X)
        };

        let content = window.content_bounding_box()?;
        let from = to_absolute(from_x, SWIPE_Y, content);
        let to = to_absolute(to_x, SWIPE_Y, content);
        window.dispatch_drag(from, to, self.drag_duration)?;

        std::thread::sleep(self.settle);
        Ok(())
    }
}
