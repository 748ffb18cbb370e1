pub mod graph;
pub mod machine;
pub mod pagination;

pub use graph::{NavigationGraph, Selector, UiState};
pub use machine::Navigator;
