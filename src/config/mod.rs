/// Configuration subsystem - runtime settings
///
/// This module handles loading and applying configuration from .foliorc files:
/// typewriter speeds, reveal geometry, navigation and asset lookup.

pub mod rc;

// Re-export public interface
pub use rc::{RcConfig, RcLoader};
