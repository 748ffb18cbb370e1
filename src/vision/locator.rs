//! Visual locator: finds landmark templates in freshly captured frames.
//!
//! Every capture is resized to one canonical working resolution before
//! matching, so template coordinates are resolution-independent; matches
//! are reported in ratio space (canonical pixels divided by canonical
//! dimensions) and only converted to screen pixels at click time.

use image::{imageops::FilterType, DynamicImage, GrayImage, RgbaImage};
use imageproc::template_matching::{match_template, MatchTemplateMethod};

use crate::errors::{NavigationError, PixelPlowResult};
use crate::geometry::RatioBox;
use crate::vision::templates::TemplateLibrary;
use crate::window::WindowControl;

/// One window capture, resized to the canonical working resolution.
/// Immutable: crops and transforms always produce new buffers.
pub struct Frame {
    pub color: RgbaImage,
    pub gray: GrayImage,
}

impl Frame {
    pub fn width(&self) -> u32 {
        self.color.width()
    }

    pub fn height(&self) -> u32 {
        self.color.height()
    }
}

pub struct Locator {
    templates: TemplateLibrary,
    canonical_width: u32,
    canonical_height: u32,
    confidence: f32,
    tries: u32,
}

impl Locator {
    pub fn new(
        templates: TemplateLibrary,
        canonical_width: u32,
        canonical_height: u32,
        confidence: f32,
        tries: u32,
    ) -> Self {
        Self {
            templates,
            canonical_width,
            canonical_height,
            confidence,
            tries,
        }
    }

    /// Raise the window, capture its content, and resize to the canonical
    /// resolution. One frame per call; retries re-capture from scratch.
    pub fn capture_frame(&self, window: &mut dyn WindowControl) -> PixelPlowResult<Frame> {
        window.bring_to_foreground()?;
        let raw = window.capture_content()?;

        let canonical = DynamicImage::ImageRgba8(raw).resize_exact(
            self.canonical_width,
            self.canonical_height,
            FilterType::Triangle,
        );
        let color = canonical.to_rgba8();
        let gray = canonical.to_luma8();
        Ok(Frame { color, gray })
    }

    /// Locate `template_id` in the live window, re-capturing up to the
    /// configured retry budget. A miss after the full budget means the
    /// on-screen UI does not match the tracked state and is reported as a
    /// navigation failure, never swallowed.
    pub fn locate(
        &self,
        window: &mut dyn WindowControl,
        template_id: &str,
    ) -> PixelPlowResult<RatioBox> {
        for attempt in 1..=self.tries {
            let frame = self.capture_frame(window)?;
            if let Some(found) = self.best_match_in(&frame, template_id)? {
                tracing::debug!(template = template_id, attempt, "landmark located");
                return Ok(found);
            }
            tracing::trace!(template = template_id, attempt, "no match, re-capturing");
        }

        Err(NavigationError::TemplateNotFound {
            template: template_id.to_string(),
            attempts: self.tries,
        }
        .into())
    }

    /// Best-scoring match in an already-captured frame, if any clears the
    /// confidence threshold.
    pub fn best_match_in(
        &self,
        frame: &Frame,
        template_id: &str,
    ) -> PixelPlowResult<Option<RatioBox>> {
        let template = self.templates.get(template_id)?;
        let scores = match_template(
            &frame.gray,
            template,
            MatchTemplateMethod::CrossCorrelationNormalized,
        );

        let mut best: Option<(u32, u32, f32)> = None;
        for (x, y, p) in scores.enumerate_pixels() {
            let score = p.0[0];
            if score >= self.confidence && best.map_or(true, |(_, _, s)| score > s) {
                best = Some((x, y, score));
            }
        }

        Ok(best.map(|(x, y, _)| self.to_ratio_box(x, y, template)))
    }

    /// Every match in one frame that clears the confidence threshold. Used
    /// to enumerate repeated listing widgets; near-duplicate peaks around
    /// each real widget are expected and collapsed by the grouper.
    pub fn find_all_in(
        &self,
        frame: &Frame,
        template_id: &str,
    ) -> PixelPlowResult<Vec<RatioBox>> {
        let template = self.templates.get(template_id)?;
        let scores = match_template(
            &frame.gray,
            template,
            MatchTemplateMethod::CrossCorrelationNormalized,
        );

        let mut boxes = Vec::new();
        for (x, y, p) in scores.enumerate_pixels() {
            if p.0[0] >= self.confidence {
                boxes.push(self.to_ratio_box(x, y, template));
            }
        }
        Ok(boxes)
    }

    fn to_ratio_box(&self, x: u32, y: u32, template: &GrayImage) -> RatioBox {
        let w = self.canonical_width as f32;
        let h = self.canonical_height as f32;
        RatioBox {
            x1: x as f32 / w,
            y1: y as f32 / h,
            x2: (x + template.width()) as f32 / w,
            y2: (y + template.height()) as f32 / h,
        }
    }
}
