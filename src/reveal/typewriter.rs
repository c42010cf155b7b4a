use super::timer::TimerId;
use std::time::Duration;

/// What a single typewriter step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// One more character is visible, more remain.
    Advanced,
    /// The last character just became visible.
    Completed,
    /// Nothing to do: not active yet, or already complete.
    Idle,
}

/// Character-by-character disclosure of a fixed string.
///
/// `displayed` always equals the first `cursor` characters of `full_text`.
/// The cursor only moves forward and the sequencer never restarts.
#[derive(Debug, Clone)]
pub struct Typewriter {
    full_text: String,
    displayed: String,
    cursor: usize,
    total: usize,
    interval: Duration,
    active: bool,
    pending: Option<TimerId>,
}

impl Typewriter {
    pub fn new(full_text: impl Into<String>, interval: Duration) -> Self {
        let full_text = full_text.into();
        let total = full_text.chars().count();
        Self {
            displayed: String::with_capacity(full_text.len()),
            full_text,
            cursor: 0,
            total,
            interval,
            active: false,
            pending: None,
        }
    }

    pub fn displayed_text(&self) -> &str {
        &self.displayed
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn total_chars(&self) -> usize {
        self.total
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.total
    }

    /// Whether another step should be scheduled right now.
    pub fn wants_step(&self) -> bool {
        self.active && !self.is_complete()
    }

    /// Start typing. Called once, after the owning region is revealed.
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Record the timer now holding this sequencer's next step, returning
    /// the one it replaces so the caller can cancel it.
    pub fn replace_pending(&mut self, timer: Option<TimerId>) -> Option<TimerId> {
        std::mem::replace(&mut self.pending, timer)
    }

    /// Reveal one more character.
    pub fn step(&mut self) -> StepOutcome {
        if !self.wants_step() {
            return StepOutcome::Idle;
        }

        // cursor < total, so there is a next char
        if let Some(ch) = self.full_text[self.displayed.len()..].chars().next() {
            self.displayed.push(ch);
            self.cursor += 1;
        }

        if self.is_complete() {
            StepOutcome::Completed
        } else {
            StepOutcome::Advanced
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn writer(text: &str) -> Typewriter {
        Typewriter::new(text, Duration::from_millis(30))
    }

    #[test]
    fn test_inactive_typewriter_does_nothing() {
        let mut tw = writer("abc");
        assert_eq!(tw.step(), StepOutcome::Idle);
        assert_eq!(tw.displayed_text(), "");
        assert_eq!(tw.cursor(), 0);
        assert!(!tw.wants_step());
    }

    #[test]
    fn test_steps_until_complete() {
        let mut tw = writer("abc");
        tw.activate();

        assert_eq!(tw.step(), StepOutcome::Advanced);
        assert_eq!(tw.displayed_text(), "a");
        assert_eq!(tw.step(), StepOutcome::Advanced);
        assert_eq!(tw.step(), StepOutcome::Completed);
        assert_eq!(tw.displayed_text(), "abc");

        // idempotent once done
        assert_eq!(tw.step(), StepOutcome::Idle);
        assert_eq!(tw.displayed_text(), "abc");
        assert_eq!(tw.cursor(), 3);
        assert!(!tw.wants_step());
    }

    #[test]
    fn test_multibyte_text_never_splits_chars() {
        let text = "héllo — wörld";
        let mut tw = writer(text);
        tw.activate();

        let mut steps = 0;
        while tw.step() != StepOutcome::Idle {
            steps += 1;
            let prefix: String = text.chars().take(tw.cursor()).collect();
            assert_eq!(tw.displayed_text(), prefix);
        }
        assert_eq!(steps, text.chars().count());
        assert_eq!(tw.total_chars(), text.chars().count());
    }

    #[test]
    fn test_empty_text_is_complete_immediately() {
        let mut tw = writer("");
        tw.activate();
        assert!(tw.is_complete());
        assert!(!tw.wants_step());
        assert_eq!(tw.step(), StepOutcome::Idle);
    }
}
