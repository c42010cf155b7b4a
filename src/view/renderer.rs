use super::view_model::PageViewModel;
use crate::content::{self, SectionId};
use crate::controller::Mode;
use crate::page::wrap::{display_width, truncate};
use crate::page::{Row, Style, nav_bar_items};
use crossterm::{
    cursor, queue,
    style::{Attribute, Color, Print, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType, size},
};
use std::io::{self, Write, stdout};

const CARET: char = '\u{258c}';

#[derive(Clone)]
pub struct RenderParams<'a> {
    pub mode: &'a Mode,
    pub status_message: &'a str,
}

/// One terminal row, as text and as escape-coded output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenLine {
    pub plain: String,
    pub styled: String,
    used: usize,
}

impl ScreenLine {
    fn push(&mut self, text: &str, style: Style, focused: bool, width: usize) {
        let room = width.saturating_sub(self.used);
        if room == 0 || text.is_empty() {
            return;
        }
        let text = truncate(text, room);
        self.used += display_width(text);
        self.plain.push_str(text);

        let (color, attribute) = style_of(style);
        let mut prefix = String::new();
        if let Some(color) = color {
            prefix.push_str(&SetForegroundColor(color).to_string());
        }
        if let Some(attribute) = attribute {
            prefix.push_str(&SetAttribute(attribute).to_string());
        }
        if focused {
            prefix.push_str(&SetAttribute(Attribute::Reverse).to_string());
        }

        if prefix.is_empty() {
            self.styled.push_str(text);
        } else {
            self.styled.push_str(&prefix);
            self.styled.push_str(text);
            self.styled.push_str(&SetAttribute(Attribute::Reset).to_string());
        }
    }

    fn pad_to(&mut self, col: usize, width: usize) {
        if col > self.used {
            let gap = " ".repeat(col - self.used);
            self.push(&gap, Style::Normal, false, width);
        }
    }
}

fn style_of(style: Style) -> (Option<Color>, Option<Attribute>) {
    match style {
        Style::Normal => (None, None),
        Style::Heading => (Some(Color::Cyan), Some(Attribute::Bold)),
        Style::Subheading => (Some(Color::Magenta), None),
        Style::Accent => (Some(Color::Yellow), Some(Attribute::Bold)),
        Style::Muted | Style::Rule => (Some(Color::DarkGrey), None),
        Style::Badge => (Some(Color::Green), None),
        Style::Tag => (Some(Color::Blue), None),
        Style::Link => (Some(Color::Cyan), Some(Attribute::Underlined)),
    }
}

/// A composed screen: rows top to bottom plus where the text cursor goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub lines: Vec<ScreenLine>,
    /// `(column, row)` when a form field is being edited.
    pub cursor: Option<(u16, u16)>,
}

/// Lay the nav bar, visible page rows and status line out for a `width` x `height` terminal.
pub fn compose_frame(vm: &dyn PageViewModel, params: &RenderParams<'_>, width: u16, height: u16) -> Frame {
    let width = width as usize;
    let height = height as usize;
    let page_rows = height.saturating_sub(2);
    let layout = vm.layout();
    let margin = " ".repeat(layout.margin());

    let mut lines = Vec::with_capacity(height);
    let mut cursor = None;

    lines.push(nav_line(vm.active_section(), width));

    for screen_row in 0..page_rows {
        let index = vm.scroll_offset() + screen_row;
        let mut line = ScreenLine::default();

        match layout.rows().get(index) {
            None => {}
            Some(Row::Line(spans)) => {
                for span in spans {
                    let focused = span.focus.is_some() && span.focus == vm.focus();
                    line.push(&span.text, span.style, focused, width);
                }
            }
            Some(Row::Typewriter { region, line: nth }) => {
                let typed = layout.typewriter_lines(vm.displayed_text(*region));
                let text = typed.get(*nth).map_or("", String::as_str);
                line.push(&margin, Style::Normal, false, width);
                line.push(text, Style::Normal, false, width);
                if vm.is_typing(*region) && *nth + 1 == typed.len() {
                    line.push(&CARET.to_string(), Style::Accent, false, width);
                }
            }
            Some(Row::Field { field, line: nth, focus }) => {
                let value = vm.field_value(*field);
                let boxed = layout.field_lines(*field, value);
                let focused = vm.focus() == Some(*focus);
                let bar_style = if focused { Style::Accent } else { Style::Muted };

                line.push(&margin, Style::Normal, false, width);
                line.push("| ", bar_style, false, width);
                line.push(boxed.get(*nth).map_or("", String::as_str), Style::Normal, false, width);

                if *params.mode == Mode::Edit(*field) {
                    let (cursor_line, tail) = layout.field_cursor(*field, value);
                    if cursor_line == *nth {
                        let col = (layout.margin() + 2 + tail).min(width.saturating_sub(1));
                        cursor = Some((col as u16, (screen_row + 1) as u16));
                    }
                }
            }
        }
        lines.push(line);
    }

    if height >= 2 {
        lines.push(status_line(params, width));
    }

    Frame { lines, cursor }
}

fn nav_line(active: Option<SectionId>, width: usize) -> ScreenLine {
    let mut line = ScreenLine::default();
    line.pad_to(2, width);
    line.push(content::LOGO, Style::Accent, false, width);

    for item in nav_bar_items() {
        line.pad_to(item.col, width);
        let is_active = active.is_some_and(|s| item.link.href == format!("#{}", s.fragment()));
        let style = if is_active { Style::Heading } else { Style::Link };
        line.push(item.link.label, style, is_active, width);
    }
    line
}

fn status_line(params: &RenderParams<'_>, width: usize) -> ScreenLine {
    let text = if !params.status_message.is_empty() {
        params.status_message.to_string()
    } else {
        match params.mode {
            Mode::Browse => {
                "-- BROWSE --  j/k scroll  Tab focus  Enter open  1-5 sections  q quit".to_string()
            }
            Mode::Edit(field) => format!(
                "-- EDIT {} --  Tab next field  Ctrl-S send  Esc done",
                field.label().to_uppercase()
            ),
        }
    };

    let mut line = ScreenLine::default();
    line.push(&text, Style::Muted, false, width);
    line
}

pub struct View {
    last_lines: Vec<String>,
    last_mode: Mode,
    last_terminal_size: (u16, u16),
    needs_full_redraw: bool,
}

impl View {
    pub fn new() -> Self {
        Self {
            last_lines: Vec::new(),
            last_mode: Mode::Browse,
            last_terminal_size: (0, 0),
            needs_full_redraw: true,
        }
    }

    pub fn render(&mut self, vm: &dyn PageViewModel, params: &RenderParams<'_>) -> io::Result<()> {
        let (width, height) = size()?;
        let mut out = stdout().lock();

        // Check if terminal size changed
        if self.last_terminal_size != (width, height) {
            self.needs_full_redraw = true;
            self.last_terminal_size = (width, height);
        }
        if self.last_mode != *params.mode {
            self.needs_full_redraw = true;
            self.last_mode = *params.mode;
        }

        if self.needs_full_redraw {
            queue!(out, Clear(ClearType::All))?;
            self.needs_full_redraw = false;
            self.last_lines.clear();
        }

        let frame = compose_frame(vm, params, width, height);

        // Only redraw changed lines
        for (row, line) in frame.lines.iter().enumerate() {
            if self.last_lines.get(row) != Some(&line.styled) {
                queue!(
                    out,
                    cursor::MoveTo(0, row as u16),
                    Clear(ClearType::CurrentLine),
                    Print(&line.styled)
                )?;
            }
        }
        self.last_lines = frame.lines.into_iter().map(|line| line.styled).collect();

        match frame.cursor {
            Some((col, row)) => queue!(out, cursor::MoveTo(col, row), cursor::Show)?,
            None => queue!(out, cursor::Hide)?,
        }

        out.flush()
    }

    pub fn force_redraw(&mut self) {
        self.needs_full_redraw = true;
    }
}

impl Default for View {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::FormField;
    use crate::content::{ABOUT_FULL_TEXT, HERO_FULL_TEXT};
    use crate::controller::shared_state::test_support::{TERM_HEIGHT, TERM_WIDTH, state};
    use crate::view::PortfolioViewModel;
    use std::time::Duration;

    fn plain(frame: &Frame) -> Vec<String> {
        frame.lines.iter().map(|l| l.plain.trim_end().to_string()).collect()
    }

    fn browse() -> RenderParams<'static> {
        RenderParams {
            mode: &Mode::Browse,
            status_message: "",
        }
    }

    #[test]
    fn test_nav_bar_and_status_line() {
        let (shared, _) = state();
        let frame = compose_frame(&PortfolioViewModel::new(&shared), &browse(), 80, 24);
        let lines = plain(&frame);

        assert_eq!(lines.len(), 24);
        assert!(lines[0].starts_with("  SUVA"));
        for link in content::NAV_LINKS {
            assert!(lines[0].contains(link.label));
        }
        assert!(lines[23].starts_with("-- BROWSE --"));
        assert_eq!(frame.cursor, None);
    }

    #[test]
    fn test_status_message_replaces_hints() {
        let (shared, _) = state();
        let params = RenderParams {
            mode: &Mode::Browse,
            status_message: "Opened https://github.com/ursuva",
        };
        let frame = compose_frame(&PortfolioViewModel::new(&shared), &params, 80, 24);
        assert_eq!(frame.lines[23].plain, "Opened https://github.com/ursuva");
    }

    #[test]
    fn test_hero_text_types_with_caret() {
        let (mut shared, _) = state();
        shared.advance_clock(Duration::from_millis(30 * 8));
        let frame = compose_frame(&PortfolioViewModel::new(&shared), &browse(), 80, 24);
        let text = plain(&frame).join("\n");
        assert!(text.contains("Crafting\u{258c}"));

        shared.advance_clock(Duration::from_secs(10));
        let frame = compose_frame(&PortfolioViewModel::new(&shared), &browse(), 80, 24);
        let text = plain(&frame).join(" ");
        assert!(!text.contains(CARET));
        assert!(text.contains("possible."));
        assert_eq!(shared.reveal.displayed_text(crate::reveal::RegionId::Hero), HERO_FULL_TEXT);
    }

    #[test]
    fn test_unrevealed_about_stays_blank() {
        let (shared, _) = state();
        let frame = compose_frame(&PortfolioViewModel::new(&shared), &browse(), 80, 400);
        let text = plain(&frame).join(" ");
        assert!(text.contains("About Me"));
        assert!(!text.contains(&ABOUT_FULL_TEXT[..20]));
    }

    #[test]
    fn test_lines_clipped_to_width() {
        let (mut shared, _) = state();
        shared.advance_clock(Duration::from_secs(10));
        let frame = compose_frame(&PortfolioViewModel::new(&shared), &browse(), 30, 60);
        assert!(frame.lines.iter().all(|l| display_width(&l.plain) <= 30));
    }

    #[test]
    fn test_edit_mode_places_cursor_in_field() {
        let (mut shared, _) = state();
        shared.edit_form(|f| f.with_field(FormField::Name, "Ann"));
        shared.focus_field(FormField::Name);

        let params = RenderParams {
            mode: &Mode::Edit(FormField::Name),
            status_message: "",
        };
        let frame = compose_frame(&PortfolioViewModel::new(&shared), &params, 80, 24);
        let (col, row) = frame.cursor.expect("cursor shown while editing");
        let line = &frame.lines[row as usize].plain;
        assert_eq!(line.trim_end(), "  | Ann");
        assert_eq!(col as usize, display_width("  | Ann"));
        assert!(frame.lines[23].plain.starts_with("-- EDIT NAME --"));
    }

    fn edit_frame(shared: &crate::controller::SharedAppState, field: FormField) -> Frame {
        let mode = Mode::Edit(field);
        let params = RenderParams {
            mode: &mode,
            status_message: "",
        };
        compose_frame(&PortfolioViewModel::new(shared), &params, TERM_WIDTH, TERM_HEIGHT)
    }

    #[test]
    fn test_every_field_cursor_lands_on_a_page_row() {
        let (mut shared, _) = state();
        for field in FormField::ALL {
            shared.focus_field(field);
            let frame = edit_frame(&shared, field);
            let (_, row) = frame
                .cursor
                .unwrap_or_else(|| panic!("no cursor while editing {field:?}"));
            assert!(row >= 1 && (row as usize) < TERM_HEIGHT as usize - 1);
        }
    }

    #[test]
    fn test_field_shows_spaces_as_typed() {
        let (mut shared, _) = state();
        shared.edit_form(|f| f.with_field(FormField::Name, "Ann "));
        shared.focus_field(FormField::Name);
        let frame = edit_frame(&shared, FormField::Name);
        let (col, row) = frame.cursor.expect("cursor shown while editing");
        assert_eq!(frame.lines[row as usize].plain.trim_end(), "  | Ann");
        assert_eq!(col as usize, display_width("  | Ann "));

        shared.edit_form(|f| f.with_field(FormField::Name, "  A   B"));
        let frame = edit_frame(&shared, FormField::Name);
        let (col, row) = frame.cursor.expect("cursor shown while editing");
        assert_eq!(frame.lines[row as usize].plain.trim_end(), "  |   A   B");
        assert_eq!(col as usize, display_width("  |   A   B"));
    }
}
