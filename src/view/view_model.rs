use crate::contact::FormField;
use crate::content::SectionId;
use crate::controller::SharedAppState;
use crate::page::PageLayout;
use crate::reveal::{Phase, RegionId};

/// View Model - what the renderer needs from the running app
/// This keeps the view independent of the controller and reveal internals
pub trait PageViewModel {
    fn layout(&self) -> &PageLayout;

    /// First page row shown under the nav bar.
    fn scroll_offset(&self) -> usize;

    /// Typewriter text revealed so far.
    fn displayed_text(&self, region: RegionId) -> &str;

    fn is_typing(&self, region: RegionId) -> bool;

    fn field_value(&self, field: FormField) -> &str;

    /// Index into the layout's focusables.
    fn focus(&self) -> Option<usize>;

    fn active_section(&self) -> Option<SectionId>;
}

/// Adapts the live app state to [`PageViewModel`].
pub struct PortfolioViewModel<'a> {
    state: &'a SharedAppState,
}

impl<'a> PortfolioViewModel<'a> {
    pub fn new(state: &'a SharedAppState) -> Self {
        Self { state }
    }
}

impl PageViewModel for PortfolioViewModel<'_> {
    fn layout(&self) -> &PageLayout {
        &self.state.layout
    }

    fn scroll_offset(&self) -> usize {
        self.state.scroll
    }

    fn displayed_text(&self, region: RegionId) -> &str {
        self.state.reveal.displayed_text(region)
    }

    fn is_typing(&self, region: RegionId) -> bool {
        self.state.reveal.phase(region) == Phase::Revealing
    }

    fn field_value(&self, field: FormField) -> &str {
        self.state.form.get(field)
    }

    fn focus(&self) -> Option<usize> {
        self.state.focus
    }

    fn active_section(&self) -> Option<SectionId> {
        self.state.active_section()
    }
}
