/// Controller subsystem - Handles all user input and drives the page
///
/// This module contains the mode-specific controllers, key parsing and the
/// event loop, keeping user interaction apart from the page and view layers.

pub mod app;
pub mod browse;
pub mod command_types;
pub mod edit;
pub mod key_handler;
pub mod shared_state;

// Re-export public interface
pub use app::AppController;
pub use command_types::Mode;
pub use shared_state::SharedAppState;
