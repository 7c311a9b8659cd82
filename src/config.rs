use log::Level;

#[cfg(debug_assertions)]
pub fn book_url() -> &'static str {
    "https://calendly.com/test-bookings/20min"  // Sandbox calendar while running locally
}

#[cfg(not(debug_assertions))]
pub fn book_url() -> &'static str {
    "https://calendly.com/mihirmakwana5720/20min"
}

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

// Mobile menu closes once the page moved more than this many pixels
pub const NAV_SCROLL_CLOSE_PX: f64 = 8.0;

// Intersection ratios below these count as "not visible"
pub const HERO_CTA_THRESHOLD: f64 = 0.2;
pub const FINAL_CTA_THRESHOLD: f64 = 0.25;
pub const REVEAL_THRESHOLD: f64 = 0.15;
// Browsers report a threshold crossing with a ratio a hair under the threshold
pub const RATIO_TOLERANCE: f64 = 0.01;

// Without IntersectionObserver the hero CTA is assumed gone past this offset
pub const SCROLL_FALLBACK_OFFSET_PX: f64 = 600.0;

/// Only triggers crossing the middle tenth of the viewport compete for the
/// scroll-selected step.
pub const STEP_SCROLL_ROOT_MARGIN: &str = "-45% 0px -45% 0px";
pub const STEP_SCROLL_THRESHOLDS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

pub const DETAIL_SWAP_DELAY_MS: u32 = 120;
// Re-measure after web fonts had a chance to load; there's no completion signal
pub const FONT_SETTLE_MS: u32 = 300;

pub const RAIL_PAD_PX: f64 = 10.0;
pub const RAIL_MIN_HEIGHT_PX: f64 = 360.0;
pub const RAIL_TAIL_PX: f64 = 40.0;
pub const RAIL_TRANSITION: &str = "height 260ms ease";

pub const SW_CLEANUP_FLAG: &str = "sw-cleanup-done";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_ratios() {
        for t in [HERO_CTA_THRESHOLD, FINAL_CTA_THRESHOLD, REVEAL_THRESHOLD] {
            assert!(t > 0.0 && t < 1.0);
        }
        assert!(STEP_SCROLL_THRESHOLDS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn book_url_is_https() {
        assert!(book_url().starts_with("https://"));
    }
}
