pub mod grouper;
pub mod locator;
pub mod ocr;
pub mod templates;
