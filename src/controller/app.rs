use crate::config::RcConfig;
use crate::controller::browse::BrowseController;
use crate::controller::command_types::Mode;
use crate::controller::edit::EditController;
use crate::controller::shared_state::{ModeController, ModeTransition, SharedAppState};
use crate::error::Result;
use crate::launcher::Launcher;
use crate::page::{Target, nav_item_at};
use crate::view::{PortfolioViewModel, RenderParams, View};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use std::io::stdout;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Longest the loop sleeps when nothing is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(500);
const WHEEL_STEP: isize = 3;

/// Rows left for the page once the nav bar and status line are drawn.
pub(crate) fn page_rows(height: u16) -> usize {
    (height as usize).saturating_sub(2).max(1)
}

/// Runs its closure once when dropped, on success, error and panic unwinds alike.
struct RestoreOnDrop<F: FnOnce()> {
    restore: Option<F>,
}

impl<F: FnOnce()> RestoreOnDrop<F> {
    fn new(restore: F) -> Self {
        Self { restore: Some(restore) }
    }
}

impl<F: FnOnce()> Drop for RestoreOnDrop<F> {
    fn drop(&mut self) {
        if let Some(restore) = self.restore.take() {
            restore();
        }
    }
}

/// Undo raw mode, the alternate screen and mouse capture. Every step runs
/// even when an earlier one fails.
fn restore_terminal(mouse: bool) {
    if mouse {
        if let Err(err) = execute!(stdout(), DisableMouseCapture) {
            warn!(%err, "could not disable mouse capture");
        }
    }
    if let Err(err) = execute!(stdout(), LeaveAlternateScreen, cursor::Show) {
        warn!(%err, "could not leave alternate screen");
    }
    if let Err(err) = disable_raw_mode() {
        warn!(%err, "could not disable raw mode");
    }
}

pub struct AppController {
    shared_state: SharedAppState,
    current_mode: Mode,
    view: View,
    mouse: bool,
    started: Instant,

    // Mode-specific controllers
    browse_controller: BrowseController,
    edit_controller: EditController,
}

impl AppController {
    pub fn new(config: &RcConfig, launcher: Box<dyn Launcher>) -> Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self {
            shared_state: SharedAppState::new(config, launcher, width, page_rows(height)),
            current_mode: Mode::Browse,
            view: View::new(),
            mouse: config.mouse,
            started: Instant::now(),
            browse_controller: BrowseController::new(),
            edit_controller: EditController::new(crate::contact::FormField::Name),
        })
    }

    pub fn run(mut self) -> Result<()> {
        let mouse = self.mouse;
        enable_raw_mode()?;
        let _terminal = RestoreOnDrop::new(move || restore_terminal(mouse));
        execute!(stdout(), EnterAlternateScreen, cursor::Hide)?;
        if mouse {
            execute!(stdout(), EnableMouseCapture)?;
        }

        self.started = Instant::now();
        self.shared_state.mount();
        info!(rows = self.shared_state.layout.row_count(), "page mounted");

        let result = self.run_loop();

        // timers and observations go away before the terminal is handed back
        self.shared_state.teardown();
        info!("page unmounted");

        result
    }

    fn run_loop(&mut self) -> Result<()> {
        loop {
            self.shared_state.advance_clock(self.started.elapsed());

            if self.shared_state.force_redraw {
                self.shared_state.force_redraw = false;
                self.view.force_redraw();
            }

            let view_model = PortfolioViewModel::new(&self.shared_state);
            let params = RenderParams {
                mode: &self.current_mode,
                status_message: &self.shared_state.status_message,
            };
            self.view.render(&view_model, &params)?;

            let timeout = self.shared_state.next_wakeup().unwrap_or(IDLE_POLL);
            if !event::poll(timeout)? {
                continue;
            }

            let transition = match event::read()? {
                Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
                    self.handle_key_in_current_mode(key_event)
                }
                Event::Mouse(mouse_event) => self.handle_mouse(mouse_event),
                Event::Resize(width, height) => {
                    debug!(width, height, "terminal resized");
                    self.shared_state.resize(width, page_rows(height));
                    ModeTransition::Stay
                }
                _ => ModeTransition::Stay,
            };

            match transition {
                ModeTransition::Stay => {}
                ModeTransition::ToMode(new_mode) => self.transition_to_mode(new_mode),
                ModeTransition::Quit => break,
            }
        }

        Ok(())
    }

    fn handle_key_in_current_mode(&mut self, key_event: KeyEvent) -> ModeTransition {
        match self.current_mode {
            Mode::Browse => self.browse_controller.handle_key(key_event, &mut self.shared_state),
            Mode::Edit(_) => self.edit_controller.handle_key(key_event, &mut self.shared_state),
        }
    }

    /// Clicks go through the same activation path as Enter.
    fn handle_mouse(&mut self, mouse_event: MouseEvent) -> ModeTransition {
        let shared = &mut self.shared_state;
        let row = mouse_event.row as usize;
        let col = mouse_event.column as usize;

        match mouse_event.kind {
            MouseEventKind::ScrollDown => shared.scroll_by(WHEEL_STEP),
            MouseEventKind::ScrollUp => shared.scroll_by(-WHEEL_STEP),
            MouseEventKind::Down(MouseButton::Left) if row == 0 => {
                if let Some(item) = nav_item_at(col) {
                    shared.activate_target(Target::Href(item.link.href));
                }
            }
            MouseEventKind::Down(MouseButton::Left) if row <= shared.view_rows => {
                let page_row = shared.scroll + row - 1;
                let Some(index) = shared.layout.focusable_at(page_row, col) else {
                    return ModeTransition::Stay;
                };
                let target = shared.layout.focusables()[index].target;
                shared.set_focus(index);
                return match shared.activate_target(target) {
                    Some(mode) => ModeTransition::ToMode(mode),
                    None => ModeTransition::ToMode(Mode::Browse),
                };
            }
            _ => {}
        }
        ModeTransition::Stay
    }

    fn transition_to_mode(&mut self, new_mode: Mode) {
        if new_mode == self.current_mode {
            return;
        }
        if let Mode::Edit(field) = new_mode {
            self.edit_controller = EditController::new(field);
        }
        debug!(from = ?self.current_mode, to = ?new_mode, "mode change");
        self.current_mode = new_mode;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FolioError;
    use std::cell::Cell;
    use std::io;

    fn enter_alternate_screen() -> Result<()> {
        Err(FolioError::Io(io::Error::other("write failed")))
    }

    fn fails_after_setup(restored: &Cell<u32>) -> Result<()> {
        let _guard = RestoreOnDrop::new(|| restored.set(restored.get() + 1));
        enter_alternate_screen()?;
        Ok(())
    }

    #[test]
    fn test_restore_runs_on_early_error() {
        let restored = Cell::new(0);
        assert!(fails_after_setup(&restored).is_err());
        assert_eq!(restored.get(), 1);
    }

    #[test]
    fn test_restore_runs_once_on_normal_exit() {
        let restored = Cell::new(0);
        {
            let _guard = RestoreOnDrop::new(|| restored.set(restored.get() + 1));
        }
        assert_eq!(restored.get(), 1);
    }

    #[test]
    fn test_page_rows_leaves_room_for_bars() {
        assert_eq!(page_rows(24), 22);
        assert_eq!(page_rows(1), 1);
    }
}
