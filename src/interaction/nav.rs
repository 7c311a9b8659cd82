use crate::config::NAV_SCROLL_CLOSE_PX;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum NavEvent {
    Toggle,
    LinkClick,
    OutsideClick,
    Scroll(f64),
    Escape,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct NavState {
    open: bool,
    last_scroll_y: f64,
}

impl NavState {
    pub fn new(scroll_y: f64) -> Self {
        Self {
            open: false,
            last_scroll_y: scroll_y,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Returns the next state; `self` is left untouched so the caller can
    /// compare and skip redundant renders.
    pub fn apply(self, event: NavEvent) -> Self {
        match event {
            NavEvent::Toggle => Self { open: !self.open, ..self },
            NavEvent::LinkClick | NavEvent::OutsideClick | NavEvent::Escape => {
                Self { open: false, ..self }
            }
            NavEvent::Scroll(y) => {
                let moved = (y - self.last_scroll_y).abs() > NAV_SCROLL_CLOSE_PX;
                Self {
                    open: self.open && !moved,
                    last_scroll_y: y,
                }
            }
        }
    }

    pub fn aria_expanded(&self) -> &'static str {
        if self.open {
            "true"
        } else {
            "false"
        }
    }

    pub fn menu_class(&self) -> &'static str {
        if self.open {
            "nav-menu is-open"
        } else {
            "nav-menu"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opened() -> NavState {
        NavState::new(0.0).apply(NavEvent::Toggle)
    }

    #[test]
    fn toggle_flips_and_keeps_aria_in_sync() {
        let nav = NavState::new(0.0);
        assert!(!nav.is_open());
        assert_eq!(nav.aria_expanded(), "false");
        let nav = nav.apply(NavEvent::Toggle);
        assert!(nav.is_open());
        assert_eq!(nav.aria_expanded(), "true");
        assert!(nav.menu_class().contains("is-open"));
        let nav = nav.apply(NavEvent::Toggle);
        assert!(!nav.is_open());
        assert!(!nav.menu_class().contains("is-open"));
    }

    #[test]
    fn every_close_trigger_closes_an_open_menu() {
        for event in [
            NavEvent::LinkClick,
            NavEvent::OutsideClick,
            NavEvent::Scroll(NAV_SCROLL_CLOSE_PX + 1.0),
            NavEvent::Escape,
        ] {
            let nav = opened().apply(event);
            assert!(!nav.is_open(), "{:?} left the menu open", event);
            assert_eq!(nav.aria_expanded(), "false");
        }
    }

    #[test]
    fn upward_scroll_also_closes() {
        let nav = NavState::new(400.0).apply(NavEvent::Toggle).apply(NavEvent::Scroll(380.0));
        assert!(!nav.is_open());
    }

    #[test]
    fn small_scroll_jitter_keeps_menu_open() {
        let nav = opened().apply(NavEvent::Scroll(NAV_SCROLL_CLOSE_PX));
        assert!(nav.is_open());
    }

    #[test]
    fn scroll_delta_is_measured_from_last_event() {
        // Two small moves in a row never add up to a close
        let nav = opened()
            .apply(NavEvent::Scroll(6.0))
            .apply(NavEvent::Scroll(12.0))
            .apply(NavEvent::Scroll(18.0));
        assert!(nav.is_open());
    }

    #[test]
    fn close_triggers_on_closed_menu_are_no_ops() {
        let nav = NavState::new(0.0);
        assert_eq!(nav.apply(NavEvent::Escape), nav);
        assert_eq!(nav.apply(NavEvent::OutsideClick), nav);
    }
}
