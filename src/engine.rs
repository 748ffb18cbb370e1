//! Top-level engine: a navigation state machine, a visual locator, and a
//! text reader composed over one injected window capability. Composition
//! keeps the generic navigation mechanics decoupled from the game-specific
//! extraction logic.

use std::time::Duration;

use crate::config::EngineConfig;
use crate::errors::{NavigationError, PixelPlowResult};
use crate::extraction::{self, AdRecord};
use crate::navigation::pagination::Paginator;
use crate::navigation::{NavigationGraph, Navigator, UiState};
use crate::vision::locator::Locator;
use crate::vision::ocr::TextReader;
use crate::vision::templates::TemplateLibrary;
use crate::window::WindowControl;

pub struct Engine<W: WindowControl> {
    window: W,
    navigator: Navigator,
    locator: Locator,
    reader: TextReader,
    paginator: Paginator,
}

impl<W: WindowControl> Engine<W> {
    pub fn new(window: W, config: &EngineConfig) -> PixelPlowResult<Self> {
        let templates = TemplateLibrary::load(&config.templates_dir)?;
        let locator = Locator::new(
            templates,
            config.canonical_width,
            config.canonical_height,
            config.match_confidence,
            config.locate_tries,
        );
        let settle = Duration::from_millis(config.settle_delay_ms);
        let navigator = Navigator::new(NavigationGraph::standard(), settle);
        let paginator = Paginator {
            drags_per_round: config.drags_per_round,
            max_rounds: config.max_page_rounds,
            page_stride: config.page_stride,
            drag_duration: Duration::from_millis(config.drag_duration_ms),
            settle,
        };

        Ok(Self {
            window,
            navigator,
            locator,
            reader: TextReader::new(),
            paginator,
        })
    }

    #[cfg(test)]
    pub(crate) fn from_parts(window: W, navigator: Navigator, locator: Locator) -> Self {
        Self {
            window,
            navigator,
            locator,
            reader: TextReader::new(),
            paginator: Paginator {
                drags_per_round: 3,
                max_rounds: 5,
                page_stride: 2,
                drag_duration: Duration::ZERO,
                settle: Duration::ZERO,
            },
        }
    }

    pub fn current_state(&self) -> UiState {
        self.navigator.current_state()
    }

    pub fn possible_navigations(&self) -> Vec<UiState> {
        self.navigator.possible_navigations()
    }

    pub fn navigate_to(&mut self, target: UiState) -> PixelPlowResult<()> {
        self.navigator
            .navigate_to(&mut self.window, &self.locator, target)
    }

    pub fn back(&mut self) -> PixelPlowResult<()> {
        self.navigator.back(&mut self.window, &self.locator)
    }

    pub fn reset(&mut self) -> PixelPlowResult<()> {
        self.navigator.reset(&mut self.window, &self.locator)
    }

    /// Decode every listing card on the current newspaper spread.
    pub fn extract_listings(&mut self) -> PixelPlowResult<Vec<AdRecord>> {
        self.require_state(UiState::Newspaper)?;
        extraction::extract_listings(&mut self.window, &self.locator, &self.reader)
    }

    /// Scroll the newspaper to the given page number.
    pub fn change_listing_page(&mut self, page: u32) -> PixelPlowResult<()> {
        self.require_state(UiState::Newspaper)?;
        self.paginator
            .change_page(&mut self.window, &self.locator, &self.reader, page)
    }

    fn require_state(&self, expected: UiState) -> PixelPlowResult<()> {
        let actual = self.navigator.current_state();
        if actual != expected {
            return Err(NavigationError::WrongState {
                expected: expected.to_string(),
                actual: actual.to_string(),
            }
            .into());
        }
        Ok(())
    }
}
