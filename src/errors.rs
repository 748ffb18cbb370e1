use thiserror::Error;

/// A landmark or selector could not be resolved, so the on-screen UI no
/// longer matches the tracked internal state. This is the engine's primary
/// failure signal; callers decide whether to retry after a `reset()`.
#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("no route from '{from}' to '{to}'")]
    NoRoute { from: String, to: String },

    #[error("template '{template}' not found after {attempts} capture attempts")]
    TemplateNotFound { template: String, attempts: u32 },

    #[error("already at root state '{root}', cannot go back")]
    AtRoot { root: String },

    #[error("page indicator did not converge on page {target} (last read: {last_read})")]
    PageNotReached { target: u32, last_read: u32 },

    #[error("expected state '{expected}' but current state is '{actual}'")]
    WrongState { expected: String, actual: String },
}

/// An OCR read could not be parsed into the expected type, or parsed but
/// failed a domain-plausibility check. Carries the last observed text so
/// the caller can tell a render glitch from a stale template set.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("field '{field}' read '{observed}' which does not parse as an integer")]
    Unparsable { field: &'static str, observed: String },

    #[error("item name '{observed}' matches nothing in the catalog")]
    UnknownItem { observed: String },

    #[error("quantity {quantity} outside plausible range 1..=10")]
    ImplausibleQuantity { quantity: i64 },

    #[error("price {price} outside plausible range 1..={max_allowed} for {item} x{quantity}")]
    ImplausiblePrice {
        item: String,
        quantity: u32,
        price: i64,
        max_allowed: u32,
    },
}

#[derive(Debug, Error)]
pub enum PixelPlowError {
    #[error("navigation failed: {0}")]
    Navigation(#[from] NavigationError),

    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("window capture error: {0}")]
    Capture(String),

    #[error("input dispatch error: {0}")]
    Input(String),

    #[error("OCR error: {0}")]
    Ocr(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("template library error: {0}")]
    Templates(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("TOML deserialize error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

pub type PixelPlowResult<T> = Result<T, PixelPlowError>;
