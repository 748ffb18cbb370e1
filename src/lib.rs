pub mod catalog;
pub mod config;
pub mod engine;
pub mod errors;
pub mod extraction;
pub mod geometry;
pub mod navigation;
pub mod vision;
pub mod window;

pub use crate::config::{load_config, EngineConfig};
pub use crate::engine::Engine;
pub use crate::errors::{
    ExtractionError, NavigationError, PixelPlowError, PixelPlowResult,
};
pub use crate::extraction::AdRecord;
pub use crate::navigation::UiState;
pub use crate::window::{desktop::DesktopWindow, WindowControl};
