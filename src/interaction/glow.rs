#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Pointer position as a percentage of the element box. Not clamped: the
/// pointer can legitimately sit on the border.
pub fn pointer_percent(client_x: f64, client_y: f64, rect: Rect) -> Option<(f64, f64)> {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return None;
    }
    let x = (client_x - rect.left) / rect.width * 100.0;
    let y = (client_y - rect.top) / rect.height * 100.0;
    Some((x, y))
}

pub fn glow_allowed(reduced_motion: bool, fine_pointer: bool) -> bool {
    !reduced_motion && fine_pointer
}

/// Coalesces pointer moves so an element is measured at most once per
/// animation frame. The most recent position wins.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct FrameThrottle {
    pending: Option<(f64, f64)>,
    scheduled: bool,
}

impl FrameThrottle {
    /// Records a move. Returns true when the caller must request a frame.
    pub fn push(&mut self, client_x: f64, client_y: f64) -> bool {
        self.pending = Some((client_x, client_y));
        if self.scheduled {
            false
        } else {
            self.scheduled = true;
            true
        }
    }

    /// Called from the frame callback.
    pub fn take(&mut self) -> Option<(f64, f64)> {
        self.scheduled = false;
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD: Rect = Rect { left: 100.0, top: 50.0, width: 200.0, height: 100.0 };

    #[test]
    fn percent_of_box() {
        assert_eq!(pointer_percent(200.0, 75.0, CARD), Some((50.0, 25.0)));
        assert_eq!(pointer_percent(100.0, 150.0, CARD), Some((0.0, 100.0)));
    }

    #[test]
    fn zero_size_box_is_skipped() {
        let flat = Rect { height: 0.0, ..CARD };
        assert_eq!(pointer_percent(120.0, 50.0, flat), None);
    }

    #[test]
    fn gate_requires_motion_and_fine_pointer() {
        assert!(glow_allowed(false, true));
        assert!(!glow_allowed(true, true));
        assert!(!glow_allowed(false, false));
    }

    #[test]
    fn one_frame_per_burst_with_latest_position() {
        let mut throttle = FrameThrottle::default();
        assert!(throttle.push(1.0, 1.0));
        assert!(!throttle.push(2.0, 2.0));
        assert!(!throttle.push(3.0, 4.0));
        assert_eq!(throttle.take(), Some((3.0, 4.0)));
        assert_eq!(throttle.take(), None);
        assert!(throttle.push(5.0, 5.0));
    }
}
