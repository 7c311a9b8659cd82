use crate::config::RATIO_TOLERANCE;

/// Without motion or without an observer there is nothing to animate:
/// the content renders visible from the first frame.
pub fn starts_visible(reduced_motion: bool, observer_supported: bool) -> bool {
    reduced_motion || !observer_supported
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RevealAction {
    /// Mark visible and stop observing the element.
    Reveal,
    Ignore,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RevealState {
    visible: bool,
    observing: bool,
}

impl Default for RevealState {
    fn default() -> Self {
        Self {
            visible: false,
            observing: true,
        }
    }
}

impl RevealState {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_observing(&self) -> bool {
        self.observing
    }

    /// One-shot: the first crossing of `threshold` reveals for good.
    pub fn observe(&mut self, intersecting: bool, ratio: f64, threshold: f64) -> RevealAction {
        if !self.observing || !intersecting || ratio + RATIO_TOLERANCE < threshold {
            return RevealAction::Ignore;
        }
        self.reveal_now();
        RevealAction::Reveal
    }

    /// Reduced motion or no observer support: show without animating.
    pub fn reveal_now(&mut self) {
        self.visible = true;
        self.observing = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_hidden_below_threshold() {
        let mut state = RevealState::default();
        assert_eq!(state.observe(true, 0.05, 0.15), RevealAction::Ignore);
        assert_eq!(state.observe(true, 0.13, 0.15), RevealAction::Ignore);
        assert_eq!(state.observe(false, 0.0, 0.15), RevealAction::Ignore);
        assert!(!state.is_visible());
        assert!(state.is_observing());
    }

    #[test]
    fn first_crossing_reveals_and_detaches() {
        let mut state = RevealState::default();
        assert_eq!(state.observe(true, 0.2, 0.15), RevealAction::Reveal);
        assert!(state.is_visible());
        assert!(!state.is_observing());

        // Scrolling away and back again changes nothing
        assert_eq!(state.observe(false, 0.0, 0.15), RevealAction::Ignore);
        assert_eq!(state.observe(true, 0.9, 0.15), RevealAction::Ignore);
        assert!(state.is_visible());
    }

    #[test]
    fn crossing_reported_just_under_threshold_reveals() {
        let mut state = RevealState::default();
        assert_eq!(state.observe(true, 0.1499, 0.15), RevealAction::Reveal);
        assert!(state.is_visible());
    }

    #[test]
    fn starts_visible_without_motion_or_observer() {
        assert!(starts_visible(true, true));
        assert!(starts_visible(false, false));
        assert!(!starts_visible(false, true));
    }

    #[test]
    fn immediate_reveal_is_final() {
        let mut state = RevealState::default();
        state.reveal_now();
        assert!(state.is_visible());
        assert_eq!(state.observe(true, 1.0, 0.15), RevealAction::Ignore);
    }
}
