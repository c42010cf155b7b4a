use super::visibility::ElementId;
use std::fmt;

/// The two page regions that animate in when scrolled into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionId {
    Hero,
    About,
}

impl RegionId {
    pub fn name(self) -> &'static str {
        match self {
            RegionId::Hero => "hero",
            RegionId::About => "about",
        }
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a region is in its reveal lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotVisible,
    Revealing,
    Done,
}

/// A region tracked for scroll-triggered reveal.
#[derive(Debug, Clone)]
pub struct TrackedRegion {
    pub id: RegionId,
    pub element: Option<ElementId>,
    full_text: String,
    revealed: bool,
}

impl TrackedRegion {
    pub fn new(id: RegionId, element: Option<ElementId>, full_text: impl Into<String>) -> Self {
        Self {
            id,
            element,
            full_text: full_text.into(),
            revealed: false,
        }
    }

    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Flip `revealed` on. Returns true only for the first call.
    pub fn mark_revealed(&mut self) -> bool {
        if self.revealed {
            return false;
        }
        self.revealed = true;
        true
    }
}
