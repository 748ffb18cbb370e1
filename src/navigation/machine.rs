//! Stack-based navigation state machine.
//!
//! The stack records the path of states the caller successfully navigated
//! through; the top is always "current". A state is pushed only after its
//! transition click was dispatched, so a failed locate or click leaves the
//! tracked state untouched.

use std::time::Duration;

use crate::errors::{NavigationError, PixelPlowResult};
use crate::geometry::to_absolute;
use crate::navigation::graph::{NavigationGraph, Selector, UiState};
use crate::vision::locator::Locator;
use crate::window::WindowControl;

pub struct Navigator {
    graph: NavigationGraph,
    stack: Vec<UiState>,
    settle: Duration,
}

impl Navigator {
    pub fn new(graph: NavigationGraph, settle: Duration) -> Self {
        let root = graph.root();
        Self {
            graph,
            stack: vec![root],
            settle,
        }
    }

    pub fn current_state(&self) -> UiState {
        // Non-empty by construction: only pop() guarded by len > 1 shrinks it.
        *self.stack.last().expect("navigation stack is never empty")
    }

    pub fn possible_navigations(&self) -> Vec<UiState> {
        self.graph.reachable_from(self.current_state())
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Transition to `target` by clicking its selector. No-op when already
    /// there; undefined edges fail without touching the stack.
    pub fn navigate_to(
        &mut self,
        window: &mut dyn WindowControl,
        locator: &Locator,
        target: UiState,
    ) -> PixelPlowResult<()> {
        let current = self.current_state();
        if current == target {
            return Ok(());
        }

        self.click_transition(window, locator, current, target)?;
        self.stack.push(target);
        tracing::info!(state = %target, depth = self.stack.len(), "navigated");
        Ok(())
    }

    /// Return to the previous state on the stack.
    pub fn back(
        &mut self,
        window: &mut dyn WindowControl,
        locator: &Locator,
    ) -> PixelPlowResult<()> {
        if self.stack.len() < 2 {
            return Err(NavigationError::AtRoot {
                root: self.graph.root().to_string(),
            }
            .into());
        }

        let current = self.current_state();
        let previous = self.stack[self.stack.len() - 2];
        self.click_transition(window, locator, current, previous)?;
        self.stack.pop();
        tracing::info!(state = %previous, depth = self.stack.len(), "went back");
        Ok(())
    }

    /// Unwind to the root state. Idempotent: at depth 1 this does nothing.
    pub fn reset(
        &mut self,
        window: &mut dyn WindowControl,
        locator: &Locator,
    ) -> PixelPlowResult<()> {
        while self.stack.len() > 1 {
            self.back(window, locator)?;
        }
        Ok(())
    }

    fn click_transition(
        &self,
        window: &mut dyn WindowControl,
        locator: &Locator,
        from: UiState,
        to: UiState,
    ) -> PixelPlowResult<()> {
        let selector = self.graph.selector(from, to).ok_or_else(|| {
            NavigationError::NoRoute {
                from: from.to_string(),
                to: to.to_string(),
            }
        })?;

        let (rx, ry) = match selector {
            Selector::Template(id) => locator.locate(window, id)?.center(),
            Selector::FixedRatio(x, y) => (x, y),
        };

        // Content bounds are re-queried at click time; the window may have
        // moved since the capture the ratio point came from.
        let content = window.content_bounding_box()?;
        let (x, y) = to_absolute(rx, ry, content);
        window.dispatch_click(x, y)?;

        std::thread::sleep(self.settle);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PixelPlowError;
    use crate::geometry::PixelBox;
    use crate::vision::templates::TemplateLibrary;
    use image::RgbaImage;
    use std::collections::HashMap;

    struct ClickLog {
        clicks: Vec<(i32, i32)>,
        fail_clicks: bool,
    }

    impl WindowControl for ClickLog {
        fn title(&self) -> String {
            "fake".into()
        }
        fn bring_to_foreground(&mut self) -> PixelPlowResult<()> {
            Ok(())
        }
        fn capture_content(&mut self) -> PixelPlowResult<RgbaImage> {
            Ok(RgbaImage::from_pixel(160, 90, image::Rgba([0, 0, 0, 255])))
        }
        fn content_bounding_box(&mut self) -> PixelPlowResult<PixelBox> {
            Ok(PixelBox { x1: 0, y1: 0, x2: 1000, y2: 500 })
        }
        fn dispatch_click(&mut self, x: i32, y: i32) -> PixelPlowResult<()> {
            if self.fail_clicks {
                return Err(PixelPlowError::Input("injected click failure".into()));
            }
            self.clicks.push((x, y));
            Ok(())
        }
        fn dispatch_drag(
            &mut self,
            _from: (i32, i32),
            _to: (i32, i32),
            _duration: Duration,
        ) -> PixelPlowResult<()> {
            Ok(())
        }
    }

    fn test_graph() -> NavigationGraph {
        NavigationGraph::new(
            UiState::Farm,
            &[
                (UiState::Farm, UiState::Shop, Selector::FixedRatio(0.5, 0.5)),
                (UiState::Farm, UiState::Newspaper, Selector::FixedRatio(0.3, 0.9)),
                (UiState::Shop, UiState::Farm, Selector::FixedRatio(0.86, 0.13)),
                (UiState::Newspaper, UiState::Farm, Selector::FixedRatio(0.86, 0.13)),
            ],
        )
    }

    fn fixture() -> (Navigator, ClickLog, Locator) {
        let navigator = Navigator::new(test_graph(), Duration::ZERO);
        let window = ClickLog { clicks: Vec::new(), fail_clicks: false };
        let locator = Locator::new(
            TemplateLibrary::from_images(HashMap::new()),
            160,
            90,
            0.8,
            1,
        );
        (navigator, window, locator)
    }

    #[test]
    fn navigate_and_back_restore_root() {
        let (mut nav, mut win, loc) = fixture();
        assert_eq!(nav.current_state(), UiState::Farm);

        nav.navigate_to(&mut win, &loc, UiState::Shop).unwrap();
        assert_eq!(nav.current_state(), UiState::Shop);
        assert_eq!(nav.stack_depth(), 2);
        assert_eq!(win.clicks, vec![(500, 250)]);

        nav.back(&mut win, &loc).unwrap();
        assert_eq!(nav.current_state(), UiState::Farm);
        assert_eq!(nav.stack_depth(), 1);
    }

    #[test]
    fn navigate_to_current_state_is_noop() {
        let (mut nav, mut win, loc) = fixture();
        nav.navigate_to(&mut win, &loc, UiState::Farm).unwrap();
        assert!(win.clicks.is_empty());
        assert_eq!(nav.stack_depth(), 1);
    }

    #[test]
    fn reset_is_idempotent() {
        let (mut nav, mut win, loc) = fixture();
        nav.navigate_to(&mut win, &loc, UiState::Newspaper).unwrap();

        nav.reset(&mut win, &loc).unwrap();
        assert_eq!(nav.current_state(), UiState::Farm);
        assert_eq!(nav.stack_depth(), 1);

        nav.reset(&mut win, &loc).unwrap();
        assert_eq!(nav.current_state(), UiState::Farm);
        assert_eq!(nav.stack_depth(), 1);
    }

    #[test]
    fn undefined_edge_leaves_stack_unmodified() {
        let (mut nav, mut win, loc) = fixture();
        nav.navigate_to(&mut win, &loc, UiState::Shop).unwrap();

        let err = nav.navigate_to(&mut win, &loc, UiState::Newspaper).unwrap_err();
        assert!(matches!(
            err,
            PixelPlowError::Navigation(NavigationError::NoRoute { .. })
        ));
        assert_eq!(nav.current_state(), UiState::Shop);
        assert_eq!(nav.stack_depth(), 2);
    }

    #[test]
    fn failed_click_does_not_push_state() {
        let (mut nav, mut win, loc) = fixture();
        win.fail_clicks = true;

        assert!(nav.navigate_to(&mut win, &loc, UiState::Shop).is_err());
        assert_eq!(nav.current_state(), UiState::Farm);
        assert_eq!(nav.stack_depth(), 1);
    }

    #[test]
    fn back_at_root_is_an_error() {
        let (mut nav, mut win, loc) = fixture();
        assert!(matches!(
            nav.back(&mut win, &loc),
            Err(PixelPlowError::Navigation(NavigationError::AtRoot { .. }))
        ));
    }

    #[test]
    fn possible_navigations_follow_current_state() {
        let (mut nav, mut win, loc) = fixture();
        assert_eq!(nav.possible_navigations().len(), 2);

        nav.navigate_to(&mut win, &loc, UiState::Shop).unwrap();
        assert_eq!(nav.possible_navigations(), vec![UiState::Farm]);
    }
}
