use crate::config::{RAIL_MIN_HEIGHT_PX, RAIL_PAD_PX, RAIL_TAIL_PX};

/// Vertical extent of a step trigger in viewport pixels.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct TriggerBox {
    pub top: f64,
    pub height: f64,
}

/// Rail measurements in pixels relative to the rail's top edge. Always
/// rebuilt from a fresh layout read, never patched in place.
#[derive(Clone, PartialEq, Debug)]
pub struct RailGeometry {
    start: f64,
    end: f64,
    centers: Vec<f64>,
}

impl RailGeometry {
    /// Returns `None` while there is nothing to measure: no triggers, or a
    /// trigger that has not been laid out yet.
    pub fn measure(rail_top: f64, rail_height: f64, triggers: &[TriggerBox]) -> Option<Self> {
        if triggers.is_empty() || triggers.iter().any(|t| t.height <= 0.0) {
            return None;
        }
        let floor = RAIL_PAD_PX;
        let ceiling = (rail_height - RAIL_PAD_PX).max(floor);
        let centers: Vec<f64> = triggers
            .iter()
            .map(|t| (t.top + t.height / 2.0 - rail_top).clamp(floor, ceiling))
            .collect();
        Some(Self::from_centers(centers))
    }

    fn from_centers(centers: Vec<f64>) -> Self {
        let start = centers.first().copied().unwrap_or(0.0);
        let end = centers.last().copied().unwrap_or(start);
        Self { start, end, centers }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn len(&self) -> usize {
        self.centers.len()
    }

    pub fn center(&self, index: usize) -> Option<f64> {
        self.centers.get(index).copied()
    }

    /// Share of the track between the first and last trigger that is filled
    /// when `active` is selected, in [0, 1].
    pub fn fill(&self, active: Option<usize>) -> f64 {
        let Some(center) = active.and_then(|i| self.center(i)) else {
            return 0.0;
        };
        let span = self.end - self.start;
        if span <= 0.0 {
            // Single step or collapsed layout
            return if center > self.start { 1.0 } else { 0.0 };
        }
        ((center - self.start) / span).clamp(0.0, 1.0)
    }

    /// Fill rendered as a pixel height measured from the track start.
    pub fn fill_px(&self, active: Option<usize>) -> f64 {
        self.fill(active) * (self.end - self.start).max(0.0)
    }

    /// Top offset that centers a dot of `dot_height` on its trigger.
    pub fn dot_offset(&self, index: usize, dot_height: f64) -> Option<f64> {
        self.center(index).map(|c| c - dot_height / 2.0)
    }

    /// The rail has to reach a little past the last dot.
    pub fn min_rail_height(&self) -> f64 {
        RAIL_MIN_HEIGHT_PX.max(self.end + RAIL_TAIL_PX)
    }
}
