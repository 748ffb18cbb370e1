//! The application's UI modeled as a small closed directed graph.
//!
//! Unmodeled reachable screens are out of scope by design: the graph is an
//! explicit enumeration, and the state machine only ever claims "states the
//! caller successfully navigated through", not "the application's true
//! screen".

use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiState {
    Farm,
    Shop,
    Newspaper,
}

impl fmt::Display for UiState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UiState::Farm => "farm",
            UiState::Shop => "shop",
            UiState::Newspaper => "newspaper",
        };
        f.write_str(label)
    }
}

/// How to reach a neighboring state: click a located landmark template, or
/// click a fixed point in ratio space (for chrome that never moves, like
/// the close button).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selector {
    Template(&'static str),
    FixedRatio(f32, f32),
}

/// Immutable edge table, built once at process start.
pub struct NavigationGraph {
    root: UiState,
    edges: HashMap<UiState, Vec<(UiState, Selector)>>,
}

impl NavigationGraph {
    pub fn new(root: UiState, edge_list: &[(UiState, UiState, Selector)]) -> Self {
        let mut edges: HashMap<UiState, Vec<(UiState, Selector)>> = HashMap::new();
        for &(from, to, selector) in edge_list {
            edges.entry(from).or_default().push((to, selector));
        }
        Self { root, edges }
    }

    /// The game's UI graph: newspaper and shop open from the farm via
    /// their buttons; both close back to the farm via the fixed X button
    /// in the top-right corner.
    pub fn standard() -> Self {
        const CLOSE_BUTTON: Selector = Selector::FixedRatio(0.86, 0.13);
        Self::new(
            UiState::Farm,
            &[
                (UiState::Farm, UiState::Newspaper, Selector::Template("newspaper")),
                (UiState::Farm, UiState::Shop, Selector::Template("shop")),
                (UiState::Newspaper, UiState::Farm, CLOSE_BUTTON),
                (UiState::Shop, UiState::Farm, CLOSE_BUTTON),
            ],
        )
    }

    pub fn root(&self) -> UiState {
        self.root
    }

    pub fn selector(&self, from: UiState, to: UiState) -> Option<Selector> {
        self.edges
            .get(&from)?
            .iter()
            .find(|(target, _)| *target == to)
            .map(|(_, selector)| *selector)
    }

    pub fn reachable_from(&self, state: UiState) -> Vec<UiState> {
        self.edges
            .get(&state)
            .map(|targets| targets.iter().map(|(to, _)| *to).collect())
            .unwrap_or_default()
    }
}

impl Default for NavigationGraph {
    fn default() -> Self {
        Self::standard()
    }
}
