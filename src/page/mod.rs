/// Page subsystem - the portfolio laid out as terminal rows
///
/// Turns the static content into rows, section anchors, focusable targets and
/// the bounds of the elements the reveal controller observes.

pub mod layout;
pub mod wrap;

// Re-export public interface
pub use layout::{CellMetrics, Focusable, NavItem, PageLayout, Row, Span, Style, Target, nav_bar_items, nav_item_at};
