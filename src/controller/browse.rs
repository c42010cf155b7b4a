use crate::controller::command_types::{Command, Mode};
use crate::controller::key_handler::KeyHandler;
use crate::controller::shared_state::{ModeController, ModeTransition, SharedAppState};
use crossterm::event::KeyEvent;

pub struct BrowseController;

impl BrowseController {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BrowseController {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeController for BrowseController {
    fn handle_key(&mut self, key_event: KeyEvent, shared: &mut SharedAppState) -> ModeTransition {
        let Some(command) = KeyHandler::parse_key(&Mode::Browse, &key_event) else {
            return ModeTransition::Stay;
        };

        let page = shared.view_rows as isize;
        match command {
            Command::ScrollDown(n) => shared.scroll_by(n as isize),
            Command::ScrollUp(n) => shared.scroll_by(-(n as isize)),
            Command::PageDown => shared.scroll_by(page),
            Command::PageUp => shared.scroll_by(-page),
            Command::HalfPageDown => shared.scroll_by(page / 2),
            Command::HalfPageUp => shared.scroll_by(-page / 2),
            Command::ScrollTop => shared.scroll_to(0),
            Command::ScrollBottom => shared.scroll_to(shared.max_scroll()),

            Command::FocusNext => shared.focus_next(),
            Command::FocusPrev => shared.focus_prev(),
            Command::ClearFocus => shared.focus = None,
            Command::Activate => {
                if let Some(mode) = shared.activate_focused() {
                    return ModeTransition::ToMode(mode);
                }
            }
            Command::NavShortcut(position) => shared.activate_nav(position),

            Command::Redraw => shared.force_redraw = true,
            Command::Quit => return ModeTransition::Quit,
            _ => {}
        }
        ModeTransition::Stay
    }
}
