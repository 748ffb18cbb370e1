//! Text reader: deterministic image preprocessing plus tesseract decode.
//!
//! The game renders each field (item name, quantity, price, page number)
//! with a different font, size, and background treatment, so every field
//! carries its own tuned [`OcrProfile`]. There is no retry at this layer: a
//! bad read surfaces as an unparsable string or a value that fails
//! validation downstream.

use std::collections::HashMap;

use image::{imageops::FilterType, DynamicImage, GrayImage, Luma, RgbaImage};
use imageproc::contrast::{threshold, ThresholdType};
use imageproc::distance_transform::Norm;
use imageproc::morphology::dilate;

use crate::errors::{PixelPlowError, PixelPlowResult};
use crate::geometry::RatioBox;

/// Per-field preprocessing and decode parameters.
#[derive(Debug, Clone)]
pub struct OcrProfile {
    /// Upscale factor applied after cropping; small game fonts need 3-4x
    /// before tesseract reads them reliably.
    pub scale: u32,
    /// Blank margin (pixels, post-scale) the crop is centered inside, to
    /// avoid OCR edge-clipping artifacts. 0 disables padding.
    pub margin: u32,
    /// Binary threshold value; `None` keeps the grayscale crop as-is.
    pub threshold: Option<u8>,
    /// L∞ dilation radius closing anti-aliasing gaps in bitmap fonts.
    /// 0 disables dilation.
    pub dilate_radius: u8,
    pub dilate_iterations: u32,
    /// Flood the background from the top-left corner to strip decorative
    /// outlines and borders touching the image edge.
    pub flood_fill_corner: bool,
    /// Invert at the end so tesseract sees dark text on light background.
    pub invert: bool,
    /// Character whitelist passed to tesseract, constraining the decode.
    pub whitelist: Option<&'static str>,
    /// Tesseract page segmentation mode (7 = single text line).
    pub psm: i32,
}

impl OcrProfile {
    fn tesseract_args(&self) -> rusty_tesseract::Args {
        let mut config_variables = HashMap::new();
        if let Some(whitelist) = self.whitelist {
            config_variables.insert(
                "tessedit_char_whitelist".to_string(),
                whitelist.to_string(),
            );
        }
        rusty_tesseract::Args {
            lang: "eng".to_string(),
            config_variables,
            dpi: Some(150),
            psm: Some(self.psm),
            oem: Some(3),
        }
    }
}

/// Run the fixed preprocessing pipeline for one region:
/// crop → upscale → center on blank canvas → grayscale → threshold →
/// dilate → corner flood fill → invert. Pure and deterministic; every step
/// produces a new buffer.
pub fn preprocess(source: &RgbaImage, region: RatioBox, profile: &OcrProfile) -> GrayImage {
    let (w, h) = (source.width(), source.height());
    let x1 = (region.x1 * w as f32) as u32;
    let y1 = (region.y1 * h as f32) as u32;
    let cw = ((region.x2 - region.x1) * w as f32).max(1.0) as u32;
    let ch = ((region.y2 - region.y1) * h as f32).max(1.0) as u32;

    let crop = DynamicImage::ImageRgba8(source.clone()).crop_imm(x1, y1, cw, ch);

    let scaled = if profile.scale > 1 {
        crop.resize_exact(
            cw * profile.scale,
            ch * profile.scale,
            FilterType::Lanczos3,
        )
    } else {
        crop
    };

    let mut gray = scaled.to_luma8();

    if profile.margin > 0 {
        gray = pad_centered(&gray, profile.margin);
    }

    if let Some(t) = profile.threshold {
        gray = threshold(&gray, t, ThresholdType::Binary);
    }

    if profile.dilate_radius > 0 {
        for _ in 0..profile.dilate_iterations {
            gray = dilate(&gray, Norm::LInf, profile.dilate_radius);
        }
    }

    if profile.flood_fill_corner {
        flood_fill_from_corner(&mut gray);
    }

    if profile.invert {
        image::imageops::invert(&mut gray);
    }

    gray
}

/// Center the image on a larger black canvas with `margin` pixels per edge.
fn pad_centered(img: &GrayImage, margin: u32) -> GrayImage {
    let mut canvas = GrayImage::from_pixel(
        img.width() + 2 * margin,
        img.height() + 2 * margin,
        Luma([0u8]),
    );
    image::imageops::overlay(&mut canvas, img, margin as i64, margin as i64);
    canvas
}

/// Blank out the bright connected component touching the top-left corner.
/// After thresholding, decorative card borders form one bright region
/// connected to the edge; flooding it leaves only the interior glyphs.
fn flood_fill_from_corner(img: &mut GrayImage) {
    let (w, h) = img.dimensions();
    if img.get_pixel(0, 0).0[0] == 0 {
        return;
    }

    let mut stack = vec![(0u32, 0u32)];
    while let Some((x, y)) = stack.pop() {
        if img.get_pixel(x, y).0[0] == 0 {
            continue;
        }
        img.put_pixel(x, y, Luma([0u8]));

        if x > 0 {
            stack.push((x - 1, y));
        }
        if x + 1 < w {
            stack.push((x + 1, y));
        }
        if y > 0 {
            stack.push((x, y - 1));
        }
        if y + 1 < h {
            stack.push((x, y + 1));
        }
    }
}

/// Seam between the pipelines and the OCR engine. The production
/// implementation shells out to tesseract; tests script the reads.
pub trait ReadText {
    /// Read the text of one region of a captured frame using the field's
    /// tuned profile. Returns the trimmed raw decode.
    fn read(
        &self,
        source: &RgbaImage,
        region: RatioBox,
        profile: &OcrProfile,
    ) -> PixelPlowResult<String>;
}

/// Thin wrapper around tesseract. Kept as a type so the engine owns one
/// reader and profiles stay data, not code.
pub struct TextReader;

impl TextReader {
    pub fn new() -> Self {
        Self
    }
}

impl ReadText for TextReader {
    fn read(
        &self,
        source: &RgbaImage,
        region: RatioBox,
        profile: &OcrProfile,
    ) -> PixelPlowResult<String> {
        let processed = preprocess(source, region, profile);

        let ocr_input =
            rusty_tesseract::Image::from_dynamic_image(&DynamicImage::ImageLuma8(processed))
                .map_err(|e| PixelPlowError::Ocr(format!("image handoff: {e}")))?;
        let text = rusty_tesseract::image_to_string(&ocr_input, &profile.tesseract_args())
            .map_err(|e| PixelPlowError::Ocr(format!("decode: {e}")))?;

        let text = text.trim().to_string();
        tracing::trace!(text = %text, "ocr read");
        Ok(text)
    }
}

impl Default for TextReader {
    fn default() -> Self {
        Self::new()
    }
}
