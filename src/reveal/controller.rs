use super::region::{Phase, RegionId, TrackedRegion};
use super::timer::TimerQueue;
use super::typewriter::{StepOutcome, Typewriter};
use super::visibility::{ElementId, ElementSource, Rect, VisibilityOptions, VisibilityWatcher};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Timer payload for one deferred typewriter step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypewriterStep(pub RegionId);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RevealError {
    #[error("{0} typewriter step delivered after teardown")]
    Disposed(RegionId),
    #[error("no tracked region {0}")]
    UnknownRegion(RegionId),
}

/// Setup for one tracked region.
#[derive(Debug, Clone)]
pub struct RegionSpec {
    pub id: RegionId,
    pub element: Option<ElementId>,
    pub full_text: String,
    pub interval: Duration,
}

struct RegionSlot {
    region: TrackedRegion,
    typewriter: Typewriter,
}

/// Couples scroll visibility with per-region typewriter animation.
///
/// Each region goes NotVisible -> Revealing -> Done exactly once. The
/// controller never owns the clock: timers live in the caller's
/// [`TimerQueue`], and every pending step is cancelled by [`unmount`].
///
/// [`unmount`]: RevealTypewriterController::unmount
pub struct RevealTypewriterController {
    slots: Vec<RegionSlot>,
    watcher: VisibilityWatcher,
    mounted: bool,
    disposed: bool,
}

impl RevealTypewriterController {
    pub fn new(options: VisibilityOptions, specs: Vec<RegionSpec>) -> Self {
        let slots = specs
            .into_iter()
            .map(|spec| RegionSlot {
                typewriter: Typewriter::new(spec.full_text.clone(), spec.interval),
                region: TrackedRegion::new(spec.id, spec.element, spec.full_text),
            })
            .collect();

        Self {
            slots,
            watcher: VisibilityWatcher::new(options),
            mounted: false,
            disposed: false,
        }
    }

    /// Register observations and run the initial visibility pass.
    pub fn mount<T: From<TypewriterStep>>(
        &mut self,
        viewport: &Rect,
        source: &dyn ElementSource,
        timers: &mut TimerQueue<T>,
    ) {
        if self.mounted || self.disposed {
            return;
        }
        self.mounted = true;

        for slot in &self.slots {
            self.watcher.observe(slot.region.id, slot.region.element);
        }
        self.on_viewport_change(viewport, source, timers);
    }

    /// Re-check visibility after a scroll, resize or relayout.
    pub fn on_viewport_change<T: From<TypewriterStep>>(
        &mut self,
        viewport: &Rect,
        source: &dyn ElementSource,
        timers: &mut TimerQueue<T>,
    ) {
        if !self.mounted || self.disposed {
            return;
        }

        for region in self.watcher.check(viewport, source) {
            self.reveal(region, timers);
        }
    }

    /// Flip a region to revealed. Later calls for the same region are ignored.
    pub fn reveal<T: From<TypewriterStep>>(&mut self, id: RegionId, timers: &mut TimerQueue<T>) {
        if self.disposed {
            return;
        }
        let Some(slot) = self.slot_mut(id) else {
            return;
        };

        if !slot.region.mark_revealed() {
            return;
        }
        info!(region = %id, chars = slot.typewriter.total_chars(), "region revealed");
        slot.typewriter.activate();
        Self::sync_schedule(slot, timers);
    }

    /// Handle a fired step timer.
    pub fn on_step<T: From<TypewriterStep>>(
        &mut self,
        step: TypewriterStep,
        timers: &mut TimerQueue<T>,
    ) -> Result<StepOutcome, RevealError> {
        let TypewriterStep(id) = step;
        if self.disposed {
            warn!(region = %id, "typewriter step after teardown ignored");
            return Err(RevealError::Disposed(id));
        }
        let slot = self.slot_mut(id).ok_or(RevealError::UnknownRegion(id))?;

        // the timer that delivered this step has already left the queue
        slot.typewriter.replace_pending(None);
        let outcome = slot.typewriter.step();
        if outcome == StepOutcome::Completed {
            info!(region = %id, "typewriter finished");
        }
        Self::sync_schedule(slot, timers);
        Ok(outcome)
    }

    /// Cancel pending steps and release observations. Terminal state.
    pub fn unmount<T>(&mut self, timers: &mut TimerQueue<T>) {
        if self.disposed {
            return;
        }

        for slot in &mut self.slots {
            if let Some(timer) = slot.typewriter.replace_pending(None) {
                timers.cancel(timer);
                debug!(region = %slot.region.id, cursor = slot.typewriter.cursor(), "cancelled pending step");
            }
        }
        self.watcher.disconnect();
        self.disposed = true;
        self.mounted = false;
    }

    pub fn displayed_text(&self, id: RegionId) -> &str {
        self.slot(id).map_or("", |slot| slot.typewriter.displayed_text())
    }

    pub fn full_text(&self, id: RegionId) -> &str {
        self.slot(id).map_or("", |slot| slot.region.full_text())
    }

    pub fn cursor(&self, id: RegionId) -> usize {
        self.slot(id).map_or(0, |slot| slot.typewriter.cursor())
    }

    pub fn is_revealed(&self, id: RegionId) -> bool {
        self.slot(id).is_some_and(|slot| slot.region.is_revealed())
    }

    pub fn is_observing(&self, id: RegionId) -> bool {
        self.watcher.is_observing(id)
    }

    pub fn phase(&self, id: RegionId) -> Phase {
        match self.slot(id) {
            Some(slot) if slot.typewriter.is_complete() && slot.region.is_revealed() => Phase::Done,
            Some(slot) if slot.region.is_revealed() => Phase::Revealing,
            _ => Phase::NotVisible,
        }
    }

    fn slot(&self, id: RegionId) -> Option<&RegionSlot> {
        self.slots.iter().find(|slot| slot.region.id == id)
    }

    fn slot_mut(&mut self, id: RegionId) -> Option<&mut RegionSlot> {
        self.slots.iter_mut().find(|slot| slot.region.id == id)
    }

    /// Keep exactly one pending step while the typewriter wants one, none otherwise.
    fn sync_schedule<T: From<TypewriterStep>>(slot: &mut RegionSlot, timers: &mut TimerQueue<T>) {
        let next = if slot.typewriter.wants_step() {
            let id = slot.region.id;
            Some(timers.schedule(slot.typewriter.interval(), TypewriterStep(id).into()))
        } else {
            None
        };

        if let Some(previous) = slot.typewriter.replace_pending(next) {
            timers.cancel(previous);
        }
    }
}
