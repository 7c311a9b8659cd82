/// Visibility of the two on-page calls to action, each fed by its own
/// intersection watch.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct HeaderCtaState {
    pub hero_visible: bool,
    pub bottom_visible: bool,
}

impl Default for HeaderCtaState {
    // The page loads scrolled to the hero
    fn default() -> Self {
        Self {
            hero_visible: true,
            bottom_visible: false,
        }
    }
}

impl HeaderCtaState {
    /// Approximation used when the browser can't observe intersections:
    /// past `offset` pixels the hero CTA is assumed off screen.
    pub fn from_scroll_fallback(scroll_y: f64, offset: f64) -> Self {
        Self {
            hero_visible: scroll_y <= offset,
            bottom_visible: false,
        }
    }

    pub fn with_hero(self, visible: bool) -> Self {
        Self { hero_visible: visible, ..self }
    }

    pub fn with_bottom(self, visible: bool) -> Self {
        Self { bottom_visible: visible, ..self }
    }

    pub fn show_cta(&self) -> bool {
        !self.hero_visible && !self.bottom_visible
    }

    /// The whole header steps aside while the final CTA is on screen.
    pub fn header_hidden(&self) -> bool {
        self.bottom_visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truth_table() {
        for hero in [false, true] {
            for bottom in [false, true] {
                let state = HeaderCtaState { hero_visible: hero, bottom_visible: bottom };
                assert_eq!(state.show_cta(), !hero && !bottom, "hero={} bottom={}", hero, bottom);
            }
        }
    }

    #[test]
    fn scrolling_past_hero_then_reaching_final_cta() {
        let state = HeaderCtaState::default();
        assert!(!state.show_cta());

        let state = state.with_hero(false);
        assert!(state.show_cta());
        assert!(!state.header_hidden());

        let state = state.with_bottom(true);
        assert!(!state.show_cta());
        assert!(state.header_hidden());
    }

    #[test]
    fn fallback_uses_scroll_offset() {
        assert!(!HeaderCtaState::from_scroll_fallback(100.0, 600.0).show_cta());
        assert!(HeaderCtaState::from_scroll_fallback(601.0, 600.0).show_cta());
    }
}
