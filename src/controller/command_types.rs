use crate::contact::FormField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Reading the page: scrolling, focusing and activating links.
    Browse,
    /// Typing into a contact form field.
    Edit(FormField),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    // Scrolling
    ScrollDown(usize),
    ScrollUp(usize),
    PageDown,
    PageUp,
    HalfPageDown,
    HalfPageUp,
    ScrollTop,
    ScrollBottom,

    // Focus and activation
    FocusNext,
    FocusPrev,
    ClearFocus,
    Activate,
    /// Nav bar entry by position, 0-based
    NavShortcut(usize),

    // Form editing
    InsertChar(char),
    InsertNewline,
    DeleteChar,
    NextField,
    PrevField,
    Submit,
    LeaveEdit,

    Redraw,
    Quit,
}
