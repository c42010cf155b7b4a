/// Reveal subsystem - scroll-triggered typewriter animation
///
/// Visibility detection, a virtual-clock timer queue, and per-region
/// typewriter sequencers, wired together by `RevealTypewriterController`.

pub mod controller;
pub mod region;
pub mod timer;
pub mod typewriter;
pub mod visibility;

// Re-export public interface
pub use controller::{RegionSpec, RevealError, RevealTypewriterController, TypewriterStep};
pub use region::{Phase, RegionId};
pub use timer::TimerQueue;
pub use typewriter::StepOutcome;
pub use visibility::{ElementId, ElementSource, Rect, RootMargin, VisibilityOptions};
