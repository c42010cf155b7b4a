use crate::contact::FormField;
use crate::controller::command_types::{Command, Mode};
use crate::controller::key_handler::KeyHandler;
use crate::controller::shared_state::{ModeController, ModeTransition, SharedAppState};
use crossterm::event::KeyEvent;

/// Typing into one contact form field.
pub struct EditController {
    field: FormField,
}

impl EditController {
    pub fn new(field: FormField) -> Self {
        Self { field }
    }

    fn move_to(&self, field: Option<FormField>, shared: &mut SharedAppState) -> ModeTransition {
        match field {
            Some(field) => {
                shared.focus_field(field);
                ModeTransition::ToMode(Mode::Edit(field))
            }
            // past the last field: land on the submit button
            None => {
                if let Some(index) = shared.layout.focus_index_of(crate::page::Target::Submit) {
                    shared.set_focus(index);
                }
                ModeTransition::ToMode(Mode::Browse)
            }
        }
    }
}

impl ModeController for EditController {
    fn handle_key(&mut self, key_event: KeyEvent, shared: &mut SharedAppState) -> ModeTransition {
        let field = self.field;
        let Some(command) = KeyHandler::parse_key(&Mode::Edit(field), &key_event) else {
            return ModeTransition::Stay;
        };

        match command {
            Command::InsertChar(ch) => shared.edit_form(|form| form.with_char(field, ch)),
            Command::InsertNewline => shared.edit_form(|form| form.with_char(field, '\n')),
            Command::DeleteChar => shared.edit_form(|form| form.without_last_char(field)),
            Command::NextField => return self.move_to(field.next(), shared),
            Command::PrevField => match field.prev() {
                Some(prev) => return self.move_to(Some(prev), shared),
                None => return ModeTransition::Stay,
            },
            Command::Submit => {
                return match shared.submit_form() {
                    Some(mode) => ModeTransition::ToMode(mode),
                    None => ModeTransition::ToMode(Mode::Browse),
                };
            }
            Command::LeaveEdit => return ModeTransition::ToMode(Mode::Browse),
            Command::Quit => return ModeTransition::Quit,
            _ => {}
        }
        ModeTransition::Stay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::shared_state::test_support::state;
    use crate::page::Target;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn press(controller: &mut EditController, shared: &mut SharedAppState, code: KeyCode) -> ModeTransition {
        controller.handle_key(KeyEvent::new(code, KeyModifiers::NONE), shared)
    }

    fn type_str(controller: &mut EditController, shared: &mut SharedAppState, text: &str) {
        for ch in text.chars() {
            press(controller, shared, KeyCode::Char(ch));
        }
    }

    #[test]
    fn test_typing_and_backspace() {
        let (mut shared, _) = state();
        let mut edit = EditController::new(FormField::Name);
        type_str(&mut edit, &mut shared, "Ann");
        press(&mut edit, &mut shared, KeyCode::Backspace);
        assert_eq!(shared.form.get(FormField::Name), "An");
    }

    #[test]
    fn test_enter_in_message_inserts_newline() {
        let (mut shared, _) = state();
        let mut edit = EditController::new(FormField::Message);
        type_str(&mut edit, &mut shared, "a");
        assert_eq!(press(&mut edit, &mut shared, KeyCode::Enter), ModeTransition::Stay);
        type_str(&mut edit, &mut shared, "b");
        assert_eq!(shared.form.get(FormField::Message), "a\nb");
    }

    #[test]
    fn test_tab_walks_fields_then_submit() {
        let (mut shared, _) = state();
        let mut edit = EditController::new(FormField::Subject);
        assert_eq!(
            press(&mut edit, &mut shared, KeyCode::Tab),
            ModeTransition::ToMode(Mode::Edit(FormField::Message))
        );

        let mut edit = EditController::new(FormField::Message);
        assert_eq!(press(&mut edit, &mut shared, KeyCode::Tab), ModeTransition::ToMode(Mode::Browse));
        let focused = shared.focus.map(|i| shared.layout.focusables()[i].target);
        assert_eq!(focused, Some(Target::Submit));
    }

    #[test]
    fn test_ctrl_s_submits() {
        let (mut shared, recorder) = state();
        shared.edit_form(|f| {
            f.with_field(FormField::Name, "A")
                .with_field(FormField::Email, "b@c.com")
                .with_field(FormField::Subject, "Hi there")
        });
        let mut edit = EditController::new(FormField::Message);
        type_str(&mut edit, &mut shared, "M");

        let transition = edit.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL), &mut shared);
        assert_eq!(transition, ModeTransition::ToMode(Mode::Browse));
        assert_eq!(recorder.0.borrow().launched.len(), 1);
        assert!(recorder.0.borrow().launched[0].contains("subject=Hi%20there"));
        assert!(shared.form.is_empty());
    }

    #[test]
    fn test_invalid_email_keeps_editing_email() {
        let (mut shared, recorder) = state();
        shared.edit_form(|f| {
            f.with_field(FormField::Name, "A")
                .with_field(FormField::Email, "not-an-email")
                .with_field(FormField::Subject, "S")
                .with_field(FormField::Message, "M")
        });
        let mut edit = EditController::new(FormField::Message);
        let transition = edit.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL), &mut shared);

        assert_eq!(transition, ModeTransition::ToMode(Mode::Edit(FormField::Email)));
        assert!(recorder.0.borrow().launched.is_empty());
        assert_eq!(shared.form.get(FormField::Subject), "S");
    }

    #[test]
    fn test_escape_returns_to_browse() {
        let (mut shared, _) = state();
        let mut edit = EditController::new(FormField::Email);
        assert_eq!(press(&mut edit, &mut shared, KeyCode::Esc), ModeTransition::ToMode(Mode::Browse));
    }
}
