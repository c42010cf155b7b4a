use super::region::RegionId;
use tracing::debug;

/// Identity of a laid-out page element that can be observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub u32);

/// Axis-aligned rectangle in pixels. `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Overlap with `other`, edge-inclusive so zero-area rects can still intersect.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right < left || bottom < top {
            return None;
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }

    /// Grow (positive) or shrink (negative) each edge by the margin.
    pub fn with_margin(&self, margin: &RootMargin) -> Rect {
        Rect::new(
            self.x - margin.left,
            self.y - margin.top,
            self.width + margin.left + margin.right,
            self.height + margin.top + margin.bottom,
        )
    }
}

/// CSS-style root margin: positive values grow the root, negative shrink it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RootMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl RootMargin {
    /// Only the bottom edge pulled in by `px`: `0px 0px -{px}px 0px`.
    pub fn bottom_inset(px: f64) -> Self {
        Self {
            bottom: -px,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityOptions {
    pub threshold: f64,
    pub root_margin: RootMargin,
}

impl Default for VisibilityOptions {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            root_margin: RootMargin::bottom_inset(100.0),
        }
    }
}

/// Anything that can report where an element currently sits in the document.
///
/// `None` means the element is not (or no longer) part of the document.
pub trait ElementSource {
    fn element_bounds(&self, id: ElementId) -> Option<Rect>;
}

/// Fraction of `element` inside `root`, or `None` when they don't touch at all.
pub fn intersection_ratio(element: &Rect, root: &Rect) -> Option<f64> {
    let overlap = element.intersection(root)?;
    let area = element.area();
    if area == 0.0 {
        return Some(1.0);
    }
    Some(overlap.area() / area)
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Observation {
    region: RegionId,
    element: ElementId,
}

/// Watches tracked elements and reports which ones crossed the threshold.
///
/// Observations are registered once at setup and released on teardown or
/// when their element drops out of the document. The watcher itself does not
/// remember what already fired; callers treat a report as a one-shot edge.
pub struct VisibilityWatcher {
    options: VisibilityOptions,
    observations: Vec<Observation>,
}

impl VisibilityWatcher {
    pub fn new(options: VisibilityOptions) -> Self {
        Self {
            options,
            observations: Vec::new(),
        }
    }

    /// Start observing `element` for `region`. An absent element is a no-op.
    pub fn observe(&mut self, region: RegionId, element: Option<ElementId>) -> bool {
        let Some(element) = element else {
            debug!(%region, "no element to observe, region will not auto-reveal");
            return false;
        };

        if self.observations.iter().any(|o| o.region == region) {
            debug!(%region, "region already observed");
            return false;
        }

        self.observations.push(Observation { region, element });
        debug!(%region, element = element.0, "observing");
        true
    }

    /// Release every observation.
    pub fn disconnect(&mut self) {
        if !self.observations.is_empty() {
            debug!(count = self.observations.len(), "releasing observations");
        }
        self.observations.clear();
    }

    pub fn is_observing(&self, region: RegionId) -> bool {
        self.observations.iter().any(|o| o.region == region)
    }

    pub fn observed_count(&self) -> usize {
        self.observations.len()
    }

    /// Run one intersection pass against `viewport`.
    ///
    /// Returns the regions whose element is at least `threshold` inside the
    /// margin-adjusted viewport. Elements missing from `source` are released.
    pub fn check(&mut self, viewport: &Rect, source: &dyn ElementSource) -> Vec<RegionId> {
        let root = viewport.with_margin(&self.options.root_margin);
        let threshold = self.options.threshold;
        let mut visible = Vec::new();

        self.observations.retain(|observation| {
            let Some(bounds) = source.element_bounds(observation.element) else {
                debug!(region = %observation.region, "observed element left the document, releasing");
                return false;
            };

            if let Some(ratio) = intersection_ratio(&bounds, &root) {
                if ratio >= threshold {
                    visible.push(observation.region);
                }
            }
            true
        });

        visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FakeDocument {
        elements: HashMap<ElementId, Rect>,
    }

    impl FakeDocument {
        fn new() -> Self {
            Self {
                elements: HashMap::new(),
            }
        }

        fn with(mut self, id: u32, rect: Rect) -> Self {
            self.elements.insert(ElementId(id), rect);
            self
        }
    }

    impl ElementSource for FakeDocument {
        fn element_bounds(&self, id: ElementId) -> Option<Rect> {
            self.elements.get(&id).copied()
        }
    }

    fn viewport() -> Rect {
        Rect::new(0.0, 0.0, 800.0, 600.0)
    }

    #[test]
    fn test_ratio_fully_inside() {
        let element = Rect::new(0.0, 100.0, 800.0, 100.0);
        assert_eq!(intersection_ratio(&element, &viewport()), Some(1.0));
    }

    #[test]
    fn test_ratio_partial_and_disjoint() {
        let element = Rect::new(0.0, 550.0, 800.0, 100.0);
        assert_eq!(intersection_ratio(&element, &viewport()), Some(0.5));

        let below = Rect::new(0.0, 700.0, 800.0, 100.0);
        assert_eq!(intersection_ratio(&below, &viewport()), None);
    }

    #[test]
    fn test_zero_area_element_counts_as_fully_visible() {
        let element = Rect::new(0.0, 200.0, 800.0, 0.0);
        assert_eq!(intersection_ratio(&element, &viewport()), Some(1.0));
    }

    #[test]
    fn test_bottom_inset_shrinks_root() {
        let root = viewport().with_margin(&RootMargin::bottom_inset(100.0));
        assert_eq!(root.bottom(), 500.0);
        assert_eq!(root.y, 0.0);
        assert_eq!(root.width, 800.0);
    }

    #[test]
    fn test_threshold_boundary() {
        // root bottom is at 500px; element is 100px tall
        let mut watcher = VisibilityWatcher::new(VisibilityOptions::default());
        watcher.observe(RegionId::Hero, Some(ElementId(1)));

        let doc = FakeDocument::new().with(1, Rect::new(0.0, 471.0, 800.0, 100.0));
        assert!(watcher.check(&viewport(), &doc).is_empty(), "29% must not fire");

        let doc = FakeDocument::new().with(1, Rect::new(0.0, 470.0, 800.0, 100.0));
        assert_eq!(watcher.check(&viewport(), &doc), vec![RegionId::Hero]);
    }

    #[test]
    fn test_element_inside_true_viewport_but_below_inset_line() {
        let mut watcher = VisibilityWatcher::new(VisibilityOptions::default());
        watcher.observe(RegionId::About, Some(ElementId(2)));

        // fully on screen (520..580) but below the 500px line
        let doc = FakeDocument::new().with(2, Rect::new(0.0, 520.0, 800.0, 60.0));
        assert!(watcher.check(&viewport(), &doc).is_empty());
    }

    #[test]
    fn test_missing_element_is_not_observed() {
        let mut watcher = VisibilityWatcher::new(VisibilityOptions::default());
        assert!(!watcher.observe(RegionId::Hero, None));
        assert_eq!(watcher.observed_count(), 0);
    }

    #[test]
    fn test_one_observation_per_region() {
        let mut watcher = VisibilityWatcher::new(VisibilityOptions::default());
        assert!(watcher.observe(RegionId::Hero, Some(ElementId(1))));
        assert!(!watcher.observe(RegionId::Hero, Some(ElementId(9))));
        assert_eq!(watcher.observed_count(), 1);
    }

    #[test]
    fn test_removed_element_is_released() {
        let mut watcher = VisibilityWatcher::new(VisibilityOptions::default());
        watcher.observe(RegionId::Hero, Some(ElementId(1)));
        watcher.observe(RegionId::About, Some(ElementId(2)));

        // element 1 is gone, element 2 is still below the fold
        let doc = FakeDocument::new().with(2, Rect::new(0.0, 900.0, 800.0, 100.0));
        assert!(watcher.check(&viewport(), &doc).is_empty());
        assert!(!watcher.is_observing(RegionId::Hero));
        assert!(watcher.is_observing(RegionId::About));

        let doc = FakeDocument::new().with(2, Rect::new(0.0, 100.0, 800.0, 100.0));
        assert_eq!(watcher.check(&viewport(), &doc), vec![RegionId::About]);
    }

    #[test]
    fn test_disconnect_releases_everything() {
        let mut watcher = VisibilityWatcher::new(VisibilityOptions::default());
        watcher.observe(RegionId::Hero, Some(ElementId(1)));
        watcher.observe(RegionId::About, Some(ElementId(2)));
        watcher.disconnect();
        assert_eq!(watcher.observed_count(), 0);

        let doc = FakeDocument::new().with(1, Rect::new(0.0, 0.0, 800.0, 100.0));
        assert!(watcher.check(&viewport(), &doc).is_empty());
    }
}
