//! Ad extraction pipeline: enumerate the listing cards visible on the
//! newspaper spread and decode each into a validated [`AdRecord`].
//!
//! A failed decode on any single card aborts the whole call. A malformed
//! read means the capture or template assumptions are currently wrong, and
//! continuing would fabricate data that merely looks plausible.

use std::sync::OnceLock;

use image::RgbaImage;
use regex::Regex;

use crate::catalog::{self, CatalogItem};
use crate::errors::{ExtractionError, PixelPlowResult};
use crate::geometry::RatioBox;
use crate::vision::grouper::group_boxes;
use crate::vision::locator::Locator;
use crate::vision::ocr::{OcrProfile, ReadText};
use crate::window::WindowControl;

/// Landmark template stamped on every listing card (the paper-scrap icon).
pub const LISTING_TEMPLATE: &str = "ad_paper";

/// Fixed offsets growing a landmark match into the full card region: the
/// name, quantity, and price fields are drawn above and beside the
/// landmark's own bounds.
const CARD_EXPAND_LEFT: f32 = 0.010;
const CARD_EXPAND_TOP: f32 = 0.085;
const CARD_EXPAND_RIGHT: f32 = 0.055;
const CARD_EXPAND_BOTTOM: f32 = 0.010;

/// Item name banner across the top of the card: white lettering on a
/// colored ribbon, no outline.
const NAME_PROFILE: OcrProfile = OcrProfile {
    scale: 3,
    margin: 8,
    threshold: Some(190),
    dilate_radius: 1,
    dilate_iterations: 1,
    flood_fill_corner: false,
    invert: true,
    whitelist: Some("ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz "),
    psm: 7,
};

/// Stack count next to the item icon, rendered as "x3".
const QUANTITY_PROFILE: OcrProfile = OcrProfile {
    scale: 4,
    margin: 10,
    threshold: Some(170),
    dilate_radius: 1,
    dilate_iterations: 2,
    flood_fill_corner: false,
    invert: true,
    whitelist: Some("x0123456789"),
    psm: 7,
};

/// Price tag at the card's bottom: gold digits with a decorative outline
/// that touches the crop edge, hence the corner flood fill.
const PRICE_PROFILE: OcrProfile = OcrProfile {
    scale: 4,
    margin: 10,
    threshold: Some(150),
    dilate_radius: 1,
    dilate_iterations: 1,
    flood_fill_corner: true,
    invert: true,
    whitelist: Some("0123456789"),
    psm: 7,
};

/// One decoded, validated newspaper listing. Constructed only through
/// [`validate_record`]; implausible combinations are rejected, never built.
#[derive(Debug, PartialEq, Eq)]
pub struct AdRecord {
    pub item: &'static CatalogItem,
    pub quantity: u32,
    pub price: u32,
}

/// First run of digits in an OCR read, tolerating stray whitespace and the
/// "x" stack prefix. `None` when the text contains no digits at all.
pub fn parse_integer(text: &str) -> Option<i64> {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    let re = DIGITS.get_or_init(|| Regex::new(r"\d+").expect("static regex"));
    re.find(text)?.as_str().parse().ok()
}

/// Domain-plausibility gate for a decoded listing: stacks run 1..=10 and
/// an asking price never exceeds the catalog cap for the stack.
pub fn validate_record(
    item: &'static CatalogItem,
    quantity: i64,
    price: i64,
) -> Result<AdRecord, ExtractionError> {
    if !(1..=10).contains(&quantity) {
        return Err(ExtractionError::ImplausibleQuantity { quantity });
    }
    let quantity = quantity as u32;

    let max_allowed = item.max_allowed_price(quantity);
    if price < 1 || price > max_allowed as i64 {
        return Err(ExtractionError::ImplausiblePrice {
            item: item.name.to_string(),
            quantity,
            price,
            max_allowed,
        });
    }

    Ok(AdRecord {
        item,
        quantity,
        price: price as u32,
    })
}

/// Decode the three fields of one card region and validate them.
pub fn decode_card(
    reader: &dyn ReadText,
    source: &RgbaImage,
    landmark: RatioBox,
) -> PixelPlowResult<AdRecord> {
    let card = landmark.expand(
        CARD_EXPAND_LEFT,
        CARD_EXPAND_TOP,
        CARD_EXPAND_RIGHT,
        CARD_EXPAND_BOTTOM,
    );

    let name_text = reader.read(source, card.sub(0.05, 0.00, 0.95, 0.28), &NAME_PROFILE)?;
    let item = catalog::find(name_text.trim()).ok_or(ExtractionError::UnknownItem {
        observed: name_text.clone(),
    })?;

    let qty_text = reader.read(source, card.sub(0.05, 0.32, 0.45, 0.62), &QUANTITY_PROFILE)?;
    let quantity = parse_integer(&qty_text).ok_or(ExtractionError::Unparsable {
        field: "quantity",
        observed: qty_text.clone(),
    })?;

    let price_text = reader.read(source, card.sub(0.30, 0.66, 0.92, 0.96), &PRICE_PROFILE)?;
    let price = parse_integer(&price_text).ok_or(ExtractionError::Unparsable {
        field: "price",
        observed: price_text.clone(),
    })?;

    let record = validate_record(item, quantity, price)?;
    tracing::debug!(
        item = record.item.name,
        quantity = record.quantity,
        price = record.price,
        "listing decoded"
    );
    Ok(record)
}

/// Enumerate and decode every listing card visible on the current spread.
/// One capture serves both the landmark search and all field reads, so the
/// decoded values are mutually consistent.
pub fn extract_listings(
    window: &mut dyn WindowControl,
    locator: &Locator,
    reader: &dyn ReadText,
) -> PixelPlowResult<Vec<AdRecord>> {
    let frame = locator.capture_frame(window)?;
    let raw_matches = locator.find_all_in(&frame, LISTING_TEMPLATE)?;
    let cards = group_boxes(&raw_matches);
    tracing::debug!(
        raw = raw_matches.len(),
        cards = cards.len(),
        "listing landmarks grouped"
    );

    cards
        .iter()
        .map(|&card| decode_card(reader, &frame.color, card))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PixelPlowError;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Serves scripted reads in field order: name, quantity, price.
    struct ScriptedReader {
        reads: RefCell<VecDeque<&'static str>>,
    }

    impl ScriptedReader {
        fn new(reads: &[&'static str]) -> Self {
            Self {
                reads: RefCell::new(reads.iter().copied().collect()),
            }
        }
    }

    impl ReadText for ScriptedReader {
        fn read(
            &self,
            _source: &RgbaImage,
            _region: RatioBox,
            _profile: &OcrProfile,
        ) -> PixelPlowResult<String> {
            Ok(self
                .reads
                .borrow_mut()
                .pop_front()
                .expect("script exhausted")
                .to_string())
        }
    }

    fn any_card() -> RatioBox {
        RatioBox { x1: 0.1, y1: 0.3, x2: 0.3, y2: 0.6 }
    }

    fn blank_source() -> RgbaImage {
        RgbaImage::from_pixel(16, 9, image::Rgba([0, 0, 0, 255]))
    }

    #[test]
    fn decodes_a_well_formed_card() {
        let reader = ScriptedReader::new(&["Corn", "x3", "7"]);
        let record = decode_card(&reader, &blank_source(), any_card()).unwrap();
        assert_eq!(record.item.name, "Corn");
        assert_eq!(record.quantity, 3);
        assert_eq!(record.price, 7);
    }

    #[test]
    fn unknown_item_name_aborts() {
        let reader = ScriptedReader::new(&["Moonberry", "x3", "7"]);
        let err = decode_card(&reader, &blank_source(), any_card()).unwrap_err();
        assert!(matches!(
            err,
            PixelPlowError::Extraction(ExtractionError::UnknownItem { .. })
        ));
    }

    #[test]
    fn garbled_quantity_aborts() {
        let reader = ScriptedReader::new(&["Corn", "??", "7"]);
        let err = decode_card(&reader, &blank_source(), any_card()).unwrap_err();
        assert!(matches!(
            err,
            PixelPlowError::Extraction(ExtractionError::Unparsable { field: "quantity", .. })
        ));
    }

    #[test]
    fn wheat_validation_bounds() {
        let wheat = catalog::find("Wheat").unwrap();
        // 4 <= 1 * 5 * 3.6 = 18
        assert!(validate_record(wheat, 5, 4).is_ok());
        assert!(matches!(
            validate_record(wheat, 11, 4),
            Err(ExtractionError::ImplausibleQuantity { quantity: 11 })
        ));
        assert!(matches!(
            validate_record(wheat, 5, 19),
            Err(ExtractionError::ImplausiblePrice { price: 19, max_allowed: 18, .. })
        ));
    }

    #[test]
    fn zero_and_negative_prices_are_rejected() {
        let corn = catalog::find("Corn").unwrap();
        assert!(validate_record(corn, 1, 0).is_err());
        assert!(validate_record(corn, 1, -3).is_err());
        assert!(validate_record(corn, 1, 1).is_ok());
    }

    #[test]
    fn parse_integer_tolerates_ocr_noise() {
        assert_eq!(parse_integer("x3"), Some(3));
        assert_eq!(parse_integer(" 42 "), Some(42));
        assert_eq!(parse_integer("7."), Some(7));
        assert_eq!(parse_integer("x 10"), Some(10));
        assert_eq!(parse_integer("??"), None);
        assert_eq!(parse_integer(""), None);
    }

    #[test]
    fn name_match_is_case_insensitive() {
        let reader = ScriptedReader::new(&["cORn", "x2", "5"]);
        let record = decode_card(&reader, &blank_source(), any_card()).unwrap();
        assert_eq!(record.item.name, "Corn");
    }
}
