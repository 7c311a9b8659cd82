//! Active-step bookkeeping for the "how we work" rail.
//!
//! Three writers compete for the visible step: a transient preview (hover
//! or keyboard focus), a lock set by clicking, and the step currently
//! crossing the middle of the viewport. The preview wins over the lock and
//! the lock wins over scrolling, so at most one step is ever active.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ActivationMode {
    /// Click locks or unlocks a step, hover/focus only preview it.
    Toggle,
    /// Click, hover and focus all move the lock; nothing deactivates.
    Follow,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InitialStep {
    None,
    First,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GeometryMode {
    /// Measure on load/resize only, so expanding content never shifts the rail.
    Frozen,
    /// Re-measure after every activation.
    PerActivation,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct StepRailConfig {
    pub activation: ActivationMode,
    pub initial: InitialStep,
    pub geometry: GeometryMode,
    pub scroll_select: bool,
    pub close_on_leave: bool,
}

impl Default for StepRailConfig {
    fn default() -> Self {
        Self {
            activation: ActivationMode::Toggle,
            initial: InitialStep::None,
            geometry: GeometryMode::Frozen,
            scroll_select: true,
            close_on_leave: true,
        }
    }
}

impl StepRailConfig {
    /// Every input selects, first step open from the start.
    pub fn follow() -> Self {
        Self {
            activation: ActivationMode::Follow,
            initial: InitialStep::First,
            geometry: GeometryMode::Frozen,
            scroll_select: false,
            close_on_leave: false,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StepEvent {
    Click(usize),
    HoverEnter(usize),
    HoverLeave,
    Focus(usize),
    Blur,
    ScrollInto(Option<usize>),
    LeaveSection,
    Reset,
}

#[derive(Clone, PartialEq, Debug)]
pub struct StepRailState {
    count: usize,
    locked: Option<usize>,
    hover: Option<usize>,
    scrolled: Option<usize>,
    /// Scroll selection closed by a click; stays hidden until scrolling
    /// picks a different step.
    dismissed: Option<usize>,
    config: StepRailConfig,
}

impl StepRailState {
    pub fn new(count: usize, config: StepRailConfig) -> Self {
        let mut state = Self {
            count,
            locked: None,
            hover: None,
            scrolled: None,
            dismissed: None,
            config,
        };
        state.reset();
        state
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn config(&self) -> &StepRailConfig {
        &self.config
    }

    pub fn locked(&self) -> Option<usize> {
        self.locked
    }

    pub fn active(&self) -> Option<usize> {
        self.hover.or(self.committed())
    }

    /// Active step ignoring a hover/focus preview.
    fn committed(&self) -> Option<usize> {
        self.locked
            .or(self.scrolled.filter(|&i| Some(i) != self.dismissed))
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active() == Some(index)
    }

    /// Steps before the active one render as completed.
    pub fn is_done(&self, index: usize) -> bool {
        matches!(self.active(), Some(active) if index < active)
    }

    fn reset(&mut self) {
        self.hover = None;
        self.scrolled = None;
        self.dismissed = None;
        self.locked = match self.config.initial {
            InitialStep::First if self.count > 0 => Some(0),
            _ => None,
        };
    }

    fn in_range(&self, index: usize) -> bool {
        index < self.count
    }

    /// Applies one input. Returns whether the visible active step changed.
    pub fn apply(&mut self, event: StepEvent) -> bool {
        let before = self.active();
        match (self.config.activation, event) {
            (_, StepEvent::Click(i)) | (_, StepEvent::HoverEnter(i)) | (_, StepEvent::Focus(i))
                if !self.in_range(i) => {}
            (ActivationMode::Toggle, StepEvent::Click(i)) => {
                // A preview doesn't count: the pointer is always over the step
                // it clicks.
                if self.committed() == Some(i) {
                    self.locked = None;
                    self.hover = None;
                    self.dismissed = self.scrolled;
                } else {
                    self.locked = Some(i);
                }
            }
            (ActivationMode::Toggle, StepEvent::HoverEnter(i))
            | (ActivationMode::Toggle, StepEvent::Focus(i)) => self.hover = Some(i),
            (ActivationMode::Toggle, StepEvent::HoverLeave)
            | (ActivationMode::Toggle, StepEvent::Blur) => self.hover = None,
            (ActivationMode::Follow, StepEvent::Click(i))
            | (ActivationMode::Follow, StepEvent::HoverEnter(i))
            | (ActivationMode::Follow, StepEvent::Focus(i)) => self.locked = Some(i),
            (ActivationMode::Follow, StepEvent::HoverLeave)
            | (ActivationMode::Follow, StepEvent::Blur) => {}
            (_, StepEvent::ScrollInto(index)) => {
                if self.config.scroll_select {
                    let index = index.filter(|&i| self.in_range(i));
                    if index != self.dismissed {
                        self.dismissed = None;
                    }
                    self.scrolled = index;
                }
            }
            (_, StepEvent::LeaveSection) => {
                if self.config.close_on_leave {
                    self.locked = None;
                    self.hover = None;
                    self.scrolled = None;
                    self.dismissed = None;
                }
            }
            (_, StepEvent::Reset) => self.reset(),
        }
        self.active() != before
    }
}

/// Latest intersection ratio per trigger. Observer callbacks only report
/// the triggers that changed, so the winner is picked from this table.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct ScrollRatios {
    ratios: Vec<Option<f64>>,
}

impl ScrollRatios {
    pub fn new(count: usize) -> Self {
        Self {
            ratios: vec![None; count],
        }
    }

    /// `None` ratio marks a trigger that stopped intersecting.
    pub fn record(&mut self, index: usize, ratio: Option<f64>) {
        if let Some(slot) = self.ratios.get_mut(index) {
            *slot = ratio;
        }
    }

    pub fn clear(&mut self) {
        self.ratios.iter_mut().for_each(|r| *r = None);
    }

    pub fn most_visible(&self) -> Option<usize> {
        select_most_visible(&self.ratios)
    }
}

/// Index of the intersecting trigger with the greatest ratio; ties go to the
/// first one in document order.
pub fn select_most_visible(ratios: &[Option<f64>]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, ratio) in ratios.iter().enumerate() {
        if let Some(r) = *ratio {
            match best {
                Some((_, top)) if r <= top => {}
                _ => best = Some((i, r)),
            }
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toggle_rail() -> StepRailState {
        StepRailState::new(4, StepRailConfig::default())
    }

    #[test]
    fn starts_inactive_by_default() {
        let rail = toggle_rail();
        assert_eq!(rail.active(), None);
        assert!((0..4).all(|i| !rail.is_active(i)));
    }

    #[test]
    fn follow_preset_opens_first_step() {
        let rail = StepRailState::new(4, StepRailConfig::follow());
        assert_eq!(rail.active(), Some(0));
        let empty = StepRailState::new(0, StepRailConfig::follow());
        assert_eq!(empty.active(), None);
    }

    #[test]
    fn clicking_active_step_deactivates() {
        let mut rail = toggle_rail();
        assert!(rail.apply(StepEvent::Click(2)));
        assert_eq!(rail.active(), Some(2));
        assert!(rail.apply(StepEvent::Click(2)));
        assert_eq!(rail.active(), None);
    }

    #[test]
    fn click_under_hovering_pointer_still_closes() {
        let mut rail = toggle_rail();
        rail.apply(StepEvent::HoverEnter(1));
        rail.apply(StepEvent::Click(1));
        assert_eq!(rail.active(), Some(1));
        rail.apply(StepEvent::Click(1));
        assert_eq!(rail.active(), None);
    }

    #[test]
    fn clicking_another_step_moves_lock() {
        let mut rail = toggle_rail();
        rail.apply(StepEvent::Click(0));
        rail.apply(StepEvent::Click(3));
        assert_eq!(rail.locked(), Some(3));
        assert_eq!(rail.active(), Some(3));
    }

    #[test]
    fn hover_previews_without_touching_lock() {
        let mut rail = toggle_rail();
        rail.apply(StepEvent::Click(1));
        rail.apply(StepEvent::HoverEnter(3));
        assert_eq!(rail.active(), Some(3));
        assert_eq!(rail.locked(), Some(1));
        rail.apply(StepEvent::HoverLeave);
        assert_eq!(rail.active(), Some(1));
    }

    #[test]
    fn hover_leave_without_lock_reverts_to_inactive() {
        let mut rail = toggle_rail();
        rail.apply(StepEvent::Focus(2));
        assert_eq!(rail.active(), Some(2));
        rail.apply(StepEvent::Blur);
        assert_eq!(rail.active(), None);
    }

    #[test]
    fn at_most_one_step_active_through_any_sequence() {
        let mut rail = toggle_rail();
        let events = [
            StepEvent::Click(0),
            StepEvent::HoverEnter(2),
            StepEvent::ScrollInto(Some(3)),
            StepEvent::Focus(1),
            StepEvent::HoverLeave,
            StepEvent::Click(0),
            StepEvent::ScrollInto(Some(1)),
            StepEvent::LeaveSection,
            StepEvent::Click(3),
        ];
        for event in events {
            rail.apply(event);
            let active = (0..rail.count()).filter(|&i| rail.is_active(i)).count();
            assert!(active <= 1, "{:?} left {} steps active", event, active);
        }
    }

    #[test]
    fn scroll_selection_yields_to_lock_and_hover() {
        let mut rail = toggle_rail();
        rail.apply(StepEvent::ScrollInto(Some(2)));
        assert_eq!(rail.active(), Some(2));
        rail.apply(StepEvent::Click(0));
        rail.apply(StepEvent::ScrollInto(Some(3)));
        assert_eq!(rail.active(), Some(0));
        rail.apply(StepEvent::HoverEnter(1));
        assert_eq!(rail.active(), Some(1));
        rail.apply(StepEvent::HoverLeave);
        rail.apply(StepEvent::Click(0));
        assert_eq!(rail.active(), None);
    }

    #[test]
    fn clicking_scroll_selected_step_closes_it() {
        let mut rail = toggle_rail();
        rail.apply(StepEvent::ScrollInto(Some(2)));
        assert!(rail.apply(StepEvent::Click(2)));
        assert_eq!(rail.active(), None);

        // Clicking it again opens it, a second click closes it
        rail.apply(StepEvent::Click(2));
        assert_eq!(rail.active(), Some(2));
        rail.apply(StepEvent::Click(2));
        assert_eq!(rail.active(), None);

        rail.apply(StepEvent::Click(1));
        assert_eq!(rail.active(), Some(1));
        rail.apply(StepEvent::Click(1));
        assert_eq!(rail.active(), None);
    }

    #[test]
    fn dismissed_step_stays_closed_until_scroll_moves_on() {
        let mut rail = toggle_rail();
        rail.apply(StepEvent::ScrollInto(Some(2)));
        rail.apply(StepEvent::Click(2));
        assert!(!rail.apply(StepEvent::ScrollInto(Some(2))));
        assert_eq!(rail.active(), None);

        rail.apply(StepEvent::ScrollInto(Some(3)));
        assert_eq!(rail.active(), Some(3));
        rail.apply(StepEvent::ScrollInto(Some(2)));
        assert_eq!(rail.active(), Some(2));
    }

    #[test]
    fn click_twice_under_preview_and_scroll_closes() {
        let mut rail = toggle_rail();
        rail.apply(StepEvent::ScrollInto(Some(1)));
        rail.apply(StepEvent::HoverEnter(1));
        rail.apply(StepEvent::Click(1));
        assert_eq!(rail.active(), None);
    }

    #[test]
    fn scroll_ignored_when_disabled() {
        let mut rail = StepRailState::new(4, StepRailConfig { scroll_select: false, ..Default::default() });
        assert!(!rail.apply(StepEvent::ScrollInto(Some(1))));
        assert_eq!(rail.active(), None);
    }

    #[test]
    fn leaving_section_closes_everything() {
        let mut rail = toggle_rail();
        rail.apply(StepEvent::Click(1));
        rail.apply(StepEvent::HoverEnter(2));
        rail.apply(StepEvent::LeaveSection);
        assert_eq!(rail.active(), None);
        assert_eq!(rail.locked(), None);
    }

    #[test]
    fn leaving_section_keeps_state_without_auto_close() {
        let mut rail = StepRailState::new(4, StepRailConfig { close_on_leave: false, ..Default::default() });
        rail.apply(StepEvent::Click(1));
        assert!(!rail.apply(StepEvent::LeaveSection));
        assert_eq!(rail.active(), Some(1));
    }

    #[test]
    fn follow_mode_never_deactivates() {
        let mut rail = StepRailState::new(4, StepRailConfig::follow());
        rail.apply(StepEvent::HoverEnter(2));
        rail.apply(StepEvent::HoverLeave);
        assert_eq!(rail.active(), Some(2));
        rail.apply(StepEvent::Click(2));
        assert_eq!(rail.active(), Some(2));
        rail.apply(StepEvent::Focus(3));
        assert_eq!(rail.locked(), Some(3));
    }

    #[test]
    fn out_of_range_indices_are_ignored() {
        let mut rail = toggle_rail();
        assert!(!rail.apply(StepEvent::Click(4)));
        assert!(!rail.apply(StepEvent::HoverEnter(9)));
        assert!(!rail.apply(StepEvent::ScrollInto(Some(7))));
        assert_eq!(rail.active(), None);
    }

    #[test]
    fn reset_returns_to_initial_step() {
        let mut rail = StepRailState::new(4, StepRailConfig::follow());
        rail.apply(StepEvent::Click(3));
        rail.apply(StepEvent::Reset);
        assert_eq!(rail.active(), Some(0));
    }

    #[test]
    fn done_marks_steps_before_active() {
        let mut rail = toggle_rail();
        rail.apply(StepEvent::Click(2));
        let done: Vec<bool> = (0..4).map(|i| rail.is_done(i)).collect();
        assert_eq!(done, [true, true, false, false]);
    }

    #[test]
    fn most_visible_prefers_highest_ratio_then_document_order() {
        assert_eq!(select_most_visible(&[None, Some(0.3), Some(0.8), Some(0.2)]), Some(2));
        assert_eq!(select_most_visible(&[Some(0.5), None, Some(0.5)]), Some(0));
        assert_eq!(select_most_visible(&[None, None]), None);
        assert_eq!(select_most_visible(&[]), None);
    }

    #[test]
    fn scroll_ratios_track_latest_reports() {
        let mut ratios = ScrollRatios::new(4);
        ratios.record(1, Some(0.4));
        ratios.record(2, Some(0.9));
        assert_eq!(ratios.most_visible(), Some(2));
        ratios.record(2, None);
        assert_eq!(ratios.most_visible(), Some(1));
        ratios.record(10, Some(1.0));
        ratios.clear();
        assert_eq!(ratios.most_visible(), None);
    }
}
