use crate::content::SectionId;
use crate::page::PageLayout;
use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::debug;

fn fragment_regex() -> &'static Regex {
    static FRAGMENT: OnceLock<Regex> = OnceLock::new();
    FRAGMENT.get_or_init(|| Regex::new(r"^#([A-Za-z][A-Za-z0-9_-]*)$").expect("fragment pattern compiles"))
}

/// The identifier of an in-page `#fragment` link, if `href` is a well-formed one.
pub fn parse_fragment(href: &str) -> Option<&str> {
    fragment_regex()
        .captures(href)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Viewport motion from one scroll offset to another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollAnimation {
    pub from: usize,
    pub to: usize,
    pub start: Duration,
    pub duration: Duration,
}

impl ScrollAnimation {
    pub fn end(&self) -> Duration {
        self.start + self.duration
    }

    pub fn is_finished(&self, now: Duration) -> bool {
        now >= self.end()
    }

    /// Scroll offset at `now`, eased in and out.
    pub fn offset_at(&self, now: Duration) -> usize {
        if self.duration.is_zero() || self.is_finished(now) {
            return self.to;
        }
        let elapsed = now.saturating_sub(self.start).as_secs_f64();
        let t = (elapsed / self.duration.as_secs_f64()).clamp(0.0, 1.0);
        let eased = if t < 0.5 {
            4.0 * t * t * t
        } else {
            1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
        };

        let from = self.from as f64;
        let to = self.to as f64;
        (from + (to - from) * eased).round() as usize
    }
}

/// Outcome of activating a link.
#[derive(Debug, Clone, PartialEq)]
pub enum Activation {
    /// In-page link: move the viewport.
    Scroll(ScrollAnimation),
    /// Anything else goes to the desktop.
    External(String),
    /// In-page link whose target does not exist.
    Ignored,
}

/// Single delegated handler for every link activation on the page.
#[derive(Debug, Clone)]
pub struct NavDispatcher {
    smooth: bool,
    duration: Duration,
}

impl NavDispatcher {
    pub fn new(smooth: bool, duration: Duration) -> Self {
        Self { smooth, duration }
    }

    pub fn activate(
        &self,
        href: &str,
        layout: &PageLayout,
        current: usize,
        view_rows: usize,
        now: Duration,
    ) -> Activation {
        if !href.starts_with('#') {
            return Activation::External(href.to_string());
        }

        let Some(row) = parse_fragment(href)
            .and_then(SectionId::from_fragment)
            .and_then(|section| layout.anchor_row(section))
        else {
            debug!(href, "no in-page target, not scrolling");
            return Activation::Ignored;
        };

        let to = row.min(layout.max_scroll(view_rows));
        debug!(href, from = current, to, "scrolling to section");
        Activation::Scroll(ScrollAnimation {
            from: current,
            to,
            start: now,
            duration: if self.smooth { self.duration } else { Duration::ZERO },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::AssetStatus;

    fn layout() -> PageLayout {
        PageLayout::build(80, &AssetStatus::Missing)
    }

    fn dispatcher() -> NavDispatcher {
        NavDispatcher::new(true, Duration::from_millis(400))
    }

    #[test]
    fn test_parse_fragment() {
        assert_eq!(parse_fragment("#about"), Some("about"));
        assert_eq!(parse_fragment("#"), None);
        assert_eq!(parse_fragment("about"), None);
        assert_eq!(parse_fragment("#a b"), None);
        assert_eq!(parse_fragment("#1st"), None);
    }

    #[test]
    fn test_scroll_to_section_top() {
        let layout = layout();
        let skills = layout.anchor_row(SectionId::Skills).unwrap();

        match dispatcher().activate("#skills", &layout, 0, 20, Duration::ZERO) {
            Activation::Scroll(anim) => {
                assert_eq!(anim.from, 0);
                assert_eq!(anim.to, skills);
            }
            other => panic!("expected scroll, got {other:?}"),
        }
    }

    #[test]
    fn test_scroll_clamped_at_page_end() {
        let layout = layout();
        let view_rows = 30;
        match dispatcher().activate("#contact", &layout, 0, view_rows, Duration::ZERO) {
            Activation::Scroll(anim) => {
                let contact = layout.anchor_row(SectionId::Contact).unwrap();
                assert_eq!(anim.to, contact.min(layout.max_scroll(view_rows)));
            }
            other => panic!("expected scroll, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_target_is_ignored() {
        let layout = layout();
        assert_eq!(
            dispatcher().activate("#missing", &layout, 5, 20, Duration::ZERO),
            Activation::Ignored
        );
        assert_eq!(
            dispatcher().activate("#", &layout, 5, 20, Duration::ZERO),
            Activation::Ignored
        );
    }

    #[test]
    fn test_external_links_pass_through() {
        let layout = layout();
        assert_eq!(
            dispatcher().activate("https://github.com/ursuva", &layout, 0, 20, Duration::ZERO),
            Activation::External("https://github.com/ursuva".to_string())
        );
    }

    #[test]
    fn test_animation_endpoints_and_monotonic() {
        let anim = ScrollAnimation {
            from: 10,
            to: 110,
            start: Duration::from_millis(1000),
            duration: Duration::from_millis(400),
        };
        assert_eq!(anim.offset_at(Duration::from_millis(1000)), 10);
        assert_eq!(anim.offset_at(Duration::from_millis(1200)), 60);
        assert_eq!(anim.offset_at(Duration::from_millis(1400)), 110);
        assert!(anim.is_finished(Duration::from_millis(1400)));

        let mut last = 10;
        for ms in (1000..=1400).step_by(10) {
            let offset = anim.offset_at(Duration::from_millis(ms));
            assert!(offset >= last);
            last = offset;
        }
    }

    #[test]
    fn test_upward_animation() {
        let anim = ScrollAnimation {
            from: 50,
            to: 0,
            start: Duration::ZERO,
            duration: Duration::from_millis(100),
        };
        assert_eq!(anim.offset_at(Duration::ZERO), 50);
        assert_eq!(anim.offset_at(Duration::from_millis(100)), 0);
    }

    #[test]
    fn test_instant_when_smooth_disabled() {
        let layout = layout();
        let nav = NavDispatcher::new(false, Duration::from_millis(400));
        match nav.activate("#about", &layout, 0, 20, Duration::ZERO) {
            Activation::Scroll(anim) => {
                assert_eq!(anim.offset_at(Duration::ZERO), anim.to);
            }
            other => panic!("expected scroll, got {other:?}"),
        }
    }
}
