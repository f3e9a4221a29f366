use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Raw pointer input in window coordinates. Mouse and touch both map here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up(Point),
    Cancel,
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Next,
    Prev,
}

/// Distances that separate a tap from a drag and a drag from a swipe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureThresholds {
    /// Horizontal travel before the pointer is considered dragging.
    pub drag_start_px: f32,
    /// Upper bound of the swipe distance.
    pub swipe_max_px: f32,
    /// Swipe distance as a fraction of the container width.
    pub swipe_ratio: f32,
}

impl GestureThresholds {
    pub const DEFAULT_DRAG_START_PX: f32 = 20.0;
    pub const DEFAULT_SWIPE_MAX_PX: f32 = 160.0;
    pub const DEFAULT_SWIPE_RATIO: f32 = 0.25;

    /// Distance a release must cover to navigate: `min(max, ratio * width)`.
    ///
    /// An unknown (non-positive) width falls back to the fixed maximum.
    pub fn swipe_threshold(&self, container_width: f32) -> f32 {
        if container_width.is_finite() && container_width > 0.0 {
            self.swipe_max_px.min(container_width * self.swipe_ratio)
        } else {
            self.swipe_max_px
        }
    }
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            drag_start_px: Self::DEFAULT_DRAG_START_PX,
            swipe_max_px: Self::DEFAULT_SWIPE_MAX_PX,
            swipe_ratio: Self::DEFAULT_SWIPE_RATIO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swipe_threshold_takes_smaller_bound() {
        let thresholds = GestureThresholds::default();

        assert_eq!(thresholds.swipe_threshold(600.0), 150.0);
        assert_eq!(thresholds.swipe_threshold(1920.0), 160.0);
        assert_eq!(thresholds.swipe_threshold(0.0), 160.0);
        assert_eq!(thresholds.swipe_threshold(f32::NAN), 160.0);
    }
}
