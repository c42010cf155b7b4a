/// View subsystem - terminal rendering of the portfolio
///
/// The renderer only sees the page through the `PageViewModel` trait, so it
/// has no direct dependency on the controller or reveal internals.

pub mod renderer;
pub mod view_model;

// Re-export public interface
pub use renderer::{RenderParams, View};
pub use view_model::PortfolioViewModel;
