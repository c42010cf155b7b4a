use crate::config::RcConfig;
use crate::contact::{ContactForm, FormField};
use crate::content::{AssetStatus, PROFILE_PICTURE, SectionId};
use crate::controller::command_types::Mode;
use crate::launcher::Launcher;
use crate::nav::{Activation, NavDispatcher, ScrollAnimation};
use crate::page::{CellMetrics, PageLayout, Target, nav_bar_items};
use crate::reveal::timer::TimerId;
use crate::reveal::{Rect, RegionId, RegionSpec, RevealTypewriterController, TimerQueue, TypewriterStep};
use crossterm::event::KeyEvent;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Redraw cadence while a smooth scroll is in flight.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const STATUS_TIMEOUT: Duration = Duration::from_secs(4);

/// Everything the event loop's timer queue can deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppTimer {
    Typewriter(TypewriterStep),
    ClearStatus,
}

impl From<TypewriterStep> for AppTimer {
    fn from(step: TypewriterStep) -> Self {
        AppTimer::Typewriter(step)
    }
}

/// Shared state that all mode controllers need access to
pub struct SharedAppState {
    pub layout: PageLayout,
    pub reveal: RevealTypewriterController,
    pub timers: TimerQueue<AppTimer>,
    pub nav: NavDispatcher,
    pub form: ContactForm,
    pub launcher: Box<dyn Launcher>,
    pub metrics: CellMetrics,
    pub profile: AssetStatus,
    pub scroll: usize,
    pub view_rows: usize,
    pub animation: Option<ScrollAnimation>,
    pub focus: Option<usize>,
    pub status_message: String,
    /// Set by Ctrl-L, consumed by the event loop.
    pub force_redraw: bool,
    status_timer: Option<TimerId>,
}

impl SharedAppState {
    pub fn new(config: &RcConfig, launcher: Box<dyn Launcher>, width: u16, view_rows: usize) -> Self {
        let profile = PROFILE_PICTURE.resolve(config.asset_dir.as_deref());
        if profile == AssetStatus::Missing {
            debug!(asset = PROFILE_PICTURE.path, "profile picture not found, showing alt text");
        }
        let layout = PageLayout::build(width, &profile);

        let specs = vec![
            RegionSpec {
                id: RegionId::Hero,
                element: layout.element_for(RegionId::Hero),
                full_text: crate::content::HERO_FULL_TEXT.to_string(),
                interval: config.hero_interval(),
            },
            RegionSpec {
                id: RegionId::About,
                element: layout.element_for(RegionId::About),
                full_text: crate::content::ABOUT_FULL_TEXT.to_string(),
                interval: config.about_interval(),
            },
        ];

        Self {
            reveal: RevealTypewriterController::new(config.visibility_options(), specs),
            layout,
            timers: TimerQueue::new(),
            nav: NavDispatcher::new(config.smooth_scroll, config.smooth_scroll_duration()),
            form: ContactForm::new(),
            launcher,
            metrics: config.cell_metrics(),
            profile,
            scroll: 0,
            view_rows: view_rows.max(1),
            animation: None,
            focus: None,
            status_message: String::new(),
            force_redraw: false,
            status_timer: None,
        }
    }

    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    pub fn viewport(&self) -> Rect {
        self.layout.geometry(self.metrics).viewport(self.scroll, self.view_rows)
    }

    /// Register the reveal observations and run the first visibility pass.
    pub fn mount(&mut self) {
        let viewport = self.viewport();
        let geometry = self.layout.geometry(self.metrics);
        self.reveal.mount(&viewport, &geometry, &mut self.timers);
    }

    /// Release every timer and observation. Safe to call more than once.
    pub fn teardown(&mut self) {
        self.reveal.unmount(&mut self.timers);
        self.timers.clear();
        self.animation = None;
        self.status_timer = None;
    }

    fn notify_viewport(&mut self) {
        let viewport = self.viewport();
        let geometry = self.layout.geometry(self.metrics);
        self.reveal.on_viewport_change(&viewport, &geometry, &mut self.timers);
    }

    pub fn max_scroll(&self) -> usize {
        self.layout.max_scroll(self.view_rows)
    }

    pub fn set_scroll(&mut self, offset: usize) {
        let offset = offset.min(self.max_scroll());
        if offset != self.scroll {
            self.scroll = offset;
            self.notify_viewport();
        }
    }

    /// Manual scroll: cancels any smooth scroll in flight.
    pub fn scroll_by(&mut self, delta: isize) {
        self.animation = None;
        let target = self.scroll.saturating_add_signed(delta);
        self.set_scroll(target);
    }

    pub fn scroll_to(&mut self, offset: usize) {
        self.animation = None;
        self.set_scroll(offset);
    }

    /// Terminal resized: relayout if the width changed and re-check visibility.
    pub fn resize(&mut self, width: u16, view_rows: usize) {
        if width as usize != self.layout.width() {
            self.layout = PageLayout::build(width, &self.profile);
            // focus indices are layout-relative
            self.focus = None;
        }
        self.view_rows = view_rows.max(1);
        self.scroll = self.scroll.min(self.max_scroll());
        self.animation = None;
        self.notify_viewport();
    }

    /// Drive the clock to `now`: fire due timers and step the scroll animation.
    pub fn advance_clock(&mut self, now: Duration) {
        let Self {
            timers,
            reveal,
            status_message,
            status_timer,
            ..
        } = self;

        timers.advance_to(now, |timers, timer| match timer {
            AppTimer::Typewriter(step) => {
                if let Err(err) = reveal.on_step(step, timers) {
                    warn!(%err, "dropped typewriter step");
                }
            }
            AppTimer::ClearStatus => {
                status_message.clear();
                *status_timer = None;
            }
        });

        if let Some(animation) = self.animation {
            self.set_scroll(animation.offset_at(now));
            if animation.is_finished(now) {
                self.animation = None;
            }
        }
    }

    /// How long the event loop may sleep before something needs doing.
    pub fn next_wakeup(&self) -> Option<Duration> {
        let timer = self.timers.time_until_next();
        let frame = self.animation.map(|_| FRAME_INTERVAL);
        match (timer, frame) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        if let Some(previous) = self.status_timer.take() {
            self.timers.cancel(previous);
        }
        self.status_timer = Some(self.timers.schedule(STATUS_TIMEOUT, AppTimer::ClearStatus));
    }

    /// Section the top of the viewport is in.
    pub fn active_section(&self) -> Option<SectionId> {
        self.layout.section_at(self.scroll)
    }

    pub fn focus_next(&mut self) {
        let count = self.layout.focusables().len();
        if count == 0 {
            return;
        }
        let next = match self.focus {
            Some(idx) => (idx + 1) % count,
            None => self.first_focusable_in_view().unwrap_or(0),
        };
        self.set_focus(next);
    }

    pub fn focus_prev(&mut self) {
        let count = self.layout.focusables().len();
        if count == 0 {
            return;
        }
        let prev = match self.focus {
            Some(idx) => (idx + count - 1) % count,
            None => count - 1,
        };
        self.set_focus(prev);
    }

    pub fn set_focus(&mut self, index: usize) {
        let Some(focusable) = self.layout.focusables().get(index).copied() else {
            return;
        };
        self.focus = Some(index);

        // keep the focused target on screen
        if focusable.row < self.scroll {
            self.scroll_to(focusable.row);
        } else if focusable.row + focusable.height > self.scroll + self.view_rows {
            self.scroll_to(focusable.row + focusable.height - self.view_rows);
        }
    }

    pub fn focus_field(&mut self, field: FormField) {
        if let Some(index) = self.layout.focus_index_of(Target::Field(field)) {
            self.set_focus(index);
        }
    }

    fn first_focusable_in_view(&self) -> Option<usize> {
        self.layout
            .focusables()
            .iter()
            .position(|f| f.row >= self.scroll && f.row < self.scroll + self.view_rows)
    }

    /// Activate the focused target, if any.
    pub fn activate_focused(&mut self) -> Option<Mode> {
        let index = self.focus?;
        let target = self.layout.focusables().get(index)?.target;
        self.activate_target(target)
    }

    /// The one handler every link activation goes through, keyboard or mouse.
    pub fn activate_target(&mut self, target: Target) -> Option<Mode> {
        match target {
            Target::Href(href) => {
                self.follow_href(href);
                None
            }
            Target::Field(field) => {
                self.focus_field(field);
                Some(Mode::Edit(field))
            }
            Target::Submit => self.submit_form(),
        }
    }

    pub fn activate_nav(&mut self, position: usize) {
        if let Some(item) = nav_bar_items().get(position) {
            self.follow_href(item.link.href);
        }
    }

    pub fn follow_href(&mut self, href: &str) {
        let now = self.now();
        match self.nav.activate(href, &self.layout, self.scroll, self.view_rows, now) {
            Activation::Scroll(animation) => {
                if animation.duration.is_zero() {
                    self.scroll_to(animation.to);
                } else {
                    self.animation = Some(animation);
                }
            }
            Activation::External(uri) => self.launch(&uri),
            Activation::Ignored => {}
        }
    }

    fn launch(&mut self, uri: &str) {
        match self.launcher.launch(uri) {
            Ok(report) if report.opened => self.set_status(format!("Opened {uri}")),
            Ok(_) => self.set_status(format!("Copied {uri}")),
            Err(err) => {
                warn!(%err, "launch failed");
                self.set_status(format!("Could not open, link: {uri}"));
            }
        }
    }

    pub fn edit_form(&mut self, edit: impl FnOnce(&ContactForm) -> ContactForm) {
        self.form = edit(&self.form);
    }

    /// Submit the contact form. On a failed check, returns the field to edit.
    pub fn submit_form(&mut self) -> Option<Mode> {
        match self.form.submit() {
            Ok(submission) => {
                let uri = submission.link.uri();
                info!(subject = %submission.link.subject, "contact form submitted");
                self.launch(&uri);
                self.form = submission.cleared;
                None
            }
            Err(err) => {
                let field = err.field();
                self.set_status(err.to_string());
                self.focus_field(field);
                Some(Mode::Edit(field))
            }
        }
    }
}

/// Result of handling a key event in a mode controller
#[derive(Debug, PartialEq)]
pub enum ModeTransition {
    Stay,
    ToMode(Mode),
    Quit,
}

/// Trait that all mode controllers must implement
pub trait ModeController {
    fn handle_key(&mut self, key_event: KeyEvent, shared: &mut SharedAppState) -> ModeTransition;
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::launcher::RecordingLauncher;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Launcher handle the test can still read after boxing it into the state.
    #[derive(Clone, Default)]
    pub struct SharedRecorder(pub Rc<RefCell<RecordingLauncher>>);

    impl Launcher for SharedRecorder {
        fn launch(&mut self, uri: &str) -> crate::error::Result<crate::launcher::LaunchReport> {
            self.0.borrow_mut().launch(uri)
        }
    }

    pub const TERM_WIDTH: u16 = 80;
    pub const TERM_HEIGHT: u16 = 24;

    /// Mounted state sized the way the event loop sizes it for an 80x24 terminal.
    pub fn state_with(config: RcConfig) -> (SharedAppState, SharedRecorder) {
        let recorder = SharedRecorder::default();
        let mut state = SharedAppState::new(
            &config,
            Box::new(recorder.clone()),
            TERM_WIDTH,
            crate::controller::app::page_rows(TERM_HEIGHT),
        );
        state.mount();
        (state, recorder)
    }

    pub fn state() -> (SharedAppState, SharedRecorder) {
        state_with(RcConfig::default())
    }
}
