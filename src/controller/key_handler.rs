use crate::controller::command_types::{Command, Mode};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub struct KeyHandler;

impl KeyHandler {
    pub fn parse_key(mode: &Mode, key_event: &KeyEvent) -> Option<Command> {
        let key = key_event.code;
        let modifiers = key_event.modifiers;

        // Ctrl-C always quits
        if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Command::Quit);
        }

        match mode {
            Mode::Browse => Self::parse_browse_key(key, modifiers),
            Mode::Edit(field) => Self::parse_edit_key(key, modifiers, field.is_multiline()),
        }
    }

    fn parse_browse_key(key: KeyCode, modifiers: KeyModifiers) -> Option<Command> {
        match key {
            // Control key movements first (more specific)
            KeyCode::Char('f') if modifiers.contains(KeyModifiers::CONTROL) => Some(Command::PageDown),
            KeyCode::Char('b') if modifiers.contains(KeyModifiers::CONTROL) => Some(Command::PageUp),
            KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Command::HalfPageDown)
            }
            KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => Some(Command::HalfPageUp),
            KeyCode::Char('l') if modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Redraw),

            KeyCode::Char('j') | KeyCode::Down => Some(Command::ScrollDown(1)),
            KeyCode::Char('k') | KeyCode::Up => Some(Command::ScrollUp(1)),
            KeyCode::Char(' ') | KeyCode::PageDown => Some(Command::PageDown),
            KeyCode::PageUp => Some(Command::PageUp),
            KeyCode::Char('g') | KeyCode::Home => Some(Command::ScrollTop),
            KeyCode::Char('G') | KeyCode::End => Some(Command::ScrollBottom),

            KeyCode::Tab => Some(Command::FocusNext),
            KeyCode::BackTab => Some(Command::FocusPrev),
            KeyCode::Enter => Some(Command::Activate),
            KeyCode::Esc => Some(Command::ClearFocus),
            KeyCode::Char(c @ '1'..='9') => Some(Command::NavShortcut(c as usize - '1' as usize)),

            KeyCode::Char('q') => Some(Command::Quit),
            _ => None,
        }
    }

    fn parse_edit_key(key: KeyCode, modifiers: KeyModifiers, multiline: bool) -> Option<Command> {
        match key {
            KeyCode::Char('s') if modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Submit),
            KeyCode::Esc => Some(Command::LeaveEdit),
            KeyCode::Tab => Some(Command::NextField),
            KeyCode::BackTab => Some(Command::PrevField),
            KeyCode::Enter if multiline => Some(Command::InsertNewline),
            KeyCode::Enter => Some(Command::NextField),
            KeyCode::Backspace => Some(Command::DeleteChar),
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => Some(Command::InsertChar(c)),
            _ => None,
        }
    }
}
