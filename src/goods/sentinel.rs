//! Edge-triggered detection of the grid bottom entering the viewport.

/// Decides when bottom visibility should trigger a fetch.
///
/// Implementations are edge-triggered: the bottom entering the viewport
/// fires once, staying there does not fire again. [`resubscribe`] re-arms
/// the observer after the watched content changed, so the current
/// visibility is reported as a fresh entry. That re-arming is what keeps
/// a tall viewport auto-filling page after page without any scrolling.
///
/// [`resubscribe`]: SentinelObserver::resubscribe
pub trait SentinelObserver: Send {
    /// Re-arm after the watched content changed.
    fn resubscribe(&mut self);

    /// Report current visibility. Returns true when a fetch should be
    /// triggered.
    fn observe(&mut self, visible: bool) -> bool;
}

/// Production observer for the goods grid.
#[derive(Debug)]
pub struct ViewportSentinel {
    fresh: bool,
    was_visible: bool,
}

impl ViewportSentinel {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fresh: true,
            was_visible: false,
        }
    }
}

impl Default for ViewportSentinel {
    fn default() -> Self {
        Self::new()
    }
}

impl SentinelObserver for ViewportSentinel {
    fn resubscribe(&mut self) {
        self.fresh = true;
    }

    fn observe(&mut self, visible: bool) -> bool {
        let fire = visible && (self.fresh || !self.was_visible);
        self.fresh = false;
        self.was_visible = visible;
        fire
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_on_first_visible_observation() {
        let mut sentinel = ViewportSentinel::new();
        assert!(sentinel.observe(true));
    }

    #[test]
    fn does_not_refire_while_still_visible() {
        let mut sentinel = ViewportSentinel::new();
        assert!(sentinel.observe(true));
        assert!(!sentinel.observe(true));
        assert!(!sentinel.observe(true));
    }

    #[test]
    fn refires_when_visibility_is_reentered() {
        let mut sentinel = ViewportSentinel::new();
        assert!(sentinel.observe(true));
        assert!(!sentinel.observe(false));
        assert!(sentinel.observe(true));
    }

    #[test]
    fn resubscribe_rearms_while_visible() {
        let mut sentinel = ViewportSentinel::new();
        assert!(sentinel.observe(true));
        assert!(!sentinel.observe(true));
        sentinel.resubscribe();
        assert!(sentinel.observe(true));
    }

    #[test]
    fn hidden_observations_never_fire() {
        let mut sentinel = ViewportSentinel::new();
        assert!(!sentinel.observe(false));
        sentinel.resubscribe();
        assert!(!sentinel.observe(false));
    }
}
