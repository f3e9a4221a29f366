//! Pointer gesture interpretation for the carousel.
//!
//! One pointer stream drives two interactions: a drag that walks the
//! carousel and a tap that opens the session modal. A drag only engages
//! after the pointer travels past `drag_start_px`, and a release only
//! navigates past the swipe threshold, so finger jitter reads as a tap.

use booth_types::{Direction, GestureThresholds, Point, PointerEvent};

use crate::nav::NavState;

/// What a single pointer event amounted to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// No gesture in progress for this event.
    Ignored,
    Pressed,
    /// Pointer moved but has not left the tap zone yet.
    Tracking,
    Dragging { offset: f32 },
    Navigated { direction: Direction, index: usize },
    /// Swipe was long enough but the carousel could not move that way.
    Swiped { direction: Direction },
    Tap,
    /// Drag released between the tap zone and the swipe threshold.
    Released,
    Aborted,
}

impl GestureOutcome {
    pub fn is_tap(&self) -> bool {
        matches!(self, GestureOutcome::Tap)
    }

    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            GestureOutcome::Navigated { .. } | GestureOutcome::Swiped { .. }
        )
    }
}

#[derive(Debug, Clone, Copy)]
struct ActiveGesture {
    start: Point,
    dragging: bool,
}

#[derive(Debug, Clone, Default)]
pub struct GestureInterpreter {
    thresholds: GestureThresholds,
    active: Option<ActiveGesture>,
}

impl GestureInterpreter {
    pub fn new(thresholds: GestureThresholds) -> Self {
        Self {
            thresholds,
            active: None,
        }
    }

    pub fn set_thresholds(&mut self, thresholds: GestureThresholds) {
        self.thresholds = thresholds;
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some_and(|gesture| gesture.dragging)
    }

    /// Feeds one pointer event. `container_width` is the carousel's current width in pixels.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        container_width: f32,
        nav: &mut NavState,
    ) -> GestureOutcome {
        match event {
            PointerEvent::Down(point) => self.press(point, nav),
            PointerEvent::Move(point) => self.motion(point, nav),
            PointerEvent::Up(point) => self.release(point, container_width, nav),
            PointerEvent::Cancel | PointerEvent::Leave => self.abort(nav),
        }
    }

    /// Drops any gesture in progress without touching the carousel.
    pub fn reset(&mut self) {
        self.active = None;
    }

    fn press(&mut self, start: Point, nav: &mut NavState) -> GestureOutcome {
        self.active = Some(ActiveGesture {
            start,
            dragging: false,
        });
        nav.set_transitions_enabled(false);
        nav.clear_drag_offset();

        GestureOutcome::Pressed
    }

    fn motion(&mut self, point: Point, nav: &mut NavState) -> GestureOutcome {
        let drag_start = self.thresholds.drag_start_px;
        let Some(gesture) = self.active.as_mut() else {
            return GestureOutcome::Ignored;
        };

        let dx = point.x - gesture.start.x;
        if !gesture.dragging && dx.abs() > drag_start {
            gesture.dragging = true;
            if nav.cancel_animation() {
                tracing::debug!("drag took over a running slide animation");
            }
        }

        if gesture.dragging {
            nav.set_drag_offset(dx);
            GestureOutcome::Dragging { offset: dx }
        } else {
            GestureOutcome::Tracking
        }
    }

    fn release(&mut self, point: Point, container_width: f32, nav: &mut NavState) -> GestureOutcome {
        let Some(gesture) = self.active.take() else {
            return GestureOutcome::Ignored;
        };

        let dx = point.x - gesture.start.x;
        let threshold = self.thresholds.swipe_threshold(container_width);

        // Both tap conditions are kept: a drag that came back near its start
        // and a press that never engaged dragging both count as taps.
        let outcome = if dx.abs() >= threshold {
            let direction = if dx < 0.0 {
                Direction::Next
            } else {
                Direction::Prev
            };

            match nav.go(direction) {
                Some(index) => GestureOutcome::Navigated { direction, index },
                None => GestureOutcome::Swiped { direction },
            }
        } else if dx.abs() <= self.thresholds.drag_start_px || !gesture.dragging {
            GestureOutcome::Tap
        } else {
            GestureOutcome::Released
        };

        tracing::debug!("pointer released dx={dx:.1} threshold={threshold:.1}: {outcome:?}");

        nav.set_transitions_enabled(true);
        nav.clear_drag_offset();

        outcome
    }

    fn abort(&mut self, nav: &mut NavState) -> GestureOutcome {
        if self.active.take().is_none() {
            return GestureOutcome::Ignored;
        }

        nav.set_transitions_enabled(true);
        nav.clear_drag_offset();

        GestureOutcome::Aborted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f32) -> Point {
        Point::new(x, 300.0)
    }

    #[test]
    fn test_press_disables_transitions() {
        let mut gestures = GestureInterpreter::default();
        let mut nav = NavState::new(3);
        nav.set_drag_offset(10.0);

        let outcome = gestures.handle(PointerEvent::Down(at(100.0)), 600.0, &mut nav);

        assert_eq!(outcome, GestureOutcome::Pressed);
        assert!(!nav.transitions_enabled());
        assert_eq!(nav.drag_offset(), 0.0);
    }

    #[test]
    fn test_small_moves_stay_in_tap_zone() {
        let mut gestures = GestureInterpreter::default();
        let mut nav = NavState::new(3);

        gestures.handle(PointerEvent::Down(at(100.0)), 600.0, &mut nav);
        let outcome = gestures.handle(PointerEvent::Move(at(115.0)), 600.0, &mut nav);

        assert_eq!(outcome, GestureOutcome::Tracking);
        assert!(!gestures.is_dragging());
        assert_eq!(nav.drag_offset(), 0.0);
    }

    #[test]
    fn test_drag_follows_pointer_after_threshold() {
        let mut gestures = GestureInterpreter::default();
        let mut nav = NavState::new(3);

        gestures.handle(PointerEvent::Down(at(300.0)), 600.0, &mut nav);
        gestures.handle(PointerEvent::Move(at(270.0)), 600.0, &mut nav);
        let outcome = gestures.handle(PointerEvent::Move(at(290.0)), 600.0, &mut nav);

        // Once engaged the offset keeps tracking even inside the tap zone
        assert_eq!(outcome, GestureOutcome::Dragging { offset: -10.0 });
        assert_eq!(nav.drag_offset(), -10.0);
        assert_eq!(nav.index(), 0);
    }

    #[test]
    fn test_drag_cancels_running_animation() {
        let mut gestures = GestureInterpreter::default();
        let mut nav = NavState::new(3);
        nav.go_next();
        assert!(nav.is_animating());

        gestures.handle(PointerEvent::Down(at(300.0)), 600.0, &mut nav);
        gestures.handle(PointerEvent::Move(at(250.0)), 600.0, &mut nav);

        assert!(!nav.is_animating());
    }

    #[test]
    fn test_swipe_left_goes_next() {
        let mut gestures = GestureInterpreter::default();
        let mut nav = NavState::new(5);
        nav.go_next();
        nav.transition_end();
        nav.go_next();
        nav.transition_end();
        assert_eq!(nav.index(), 2);

        gestures.handle(PointerEvent::Down(at(400.0)), 600.0, &mut nav);
        gestures.handle(PointerEvent::Move(at(300.0)), 600.0, &mut nav);
        let outcome = gestures.handle(PointerEvent::Up(at(200.0)), 600.0, &mut nav);

        assert_eq!(
            outcome,
            GestureOutcome::Navigated {
                direction: Direction::Next,
                index: 3
            }
        );
        assert_eq!(nav.index(), 3);
        assert!(nav.transitions_enabled());
        assert_eq!(nav.drag_offset(), 0.0);
    }

    #[test]
    fn test_swipe_right_goes_prev() {
        let mut gestures = GestureInterpreter::default();
        let mut nav = NavState::new(3);
        nav.go_next();
        nav.transition_end();

        gestures.handle(PointerEvent::Down(at(100.0)), 1920.0, &mut nav);
        let outcome = gestures.handle(PointerEvent::Up(at(260.0)), 1920.0, &mut nav);

        assert_eq!(
            outcome,
            GestureOutcome::Navigated {
                direction: Direction::Prev,
                index: 0
            }
        );
    }

    #[test]
    fn test_swipe_past_first_slide_is_not_a_tap() {
        let mut gestures = GestureInterpreter::default();
        let mut nav = NavState::new(3);

        gestures.handle(PointerEvent::Down(at(100.0)), 600.0, &mut nav);
        let outcome = gestures.handle(PointerEvent::Up(at(400.0)), 600.0, &mut nav);

        assert_eq!(
            outcome,
            GestureOutcome::Swiped {
                direction: Direction::Prev
            }
        );
        assert!(outcome.is_navigation());
        assert!(!outcome.is_tap());
        assert_eq!(nav.index(), 0);
    }

    #[test]
    fn test_jitter_release_is_tap() {
        let mut gestures = GestureInterpreter::default();
        let mut nav = NavState::new(3);

        gestures.handle(PointerEvent::Down(at(100.0)), 600.0, &mut nav);
        gestures.handle(PointerEvent::Move(at(108.0)), 600.0, &mut nav);
        let outcome = gestures.handle(PointerEvent::Up(at(112.0)), 600.0, &mut nav);

        assert_eq!(outcome, GestureOutcome::Tap);
        assert_eq!(nav.index(), 0);
    }

    #[test]
    fn test_drag_returned_to_start_is_tap() {
        let mut gestures = GestureInterpreter::default();
        let mut nav = NavState::new(3);

        gestures.handle(PointerEvent::Down(at(300.0)), 600.0, &mut nav);
        gestures.handle(PointerEvent::Move(at(200.0)), 600.0, &mut nav);
        let outcome = gestures.handle(PointerEvent::Up(at(290.0)), 600.0, &mut nav);

        assert_eq!(outcome, GestureOutcome::Tap);
    }

    #[test]
    fn test_release_without_drag_is_tap() {
        let mut gestures = GestureInterpreter::default();
        let mut nav = NavState::new(3);

        // No move events reached us, so dragging never engaged
        gestures.handle(PointerEvent::Down(at(300.0)), 600.0, &mut nav);
        let outcome = gestures.handle(PointerEvent::Up(at(240.0)), 600.0, &mut nav);

        assert_eq!(outcome, GestureOutcome::Tap);
    }

    #[test]
    fn test_medium_drag_is_neither_tap_nor_navigation() {
        let mut gestures = GestureInterpreter::default();
        let mut nav = NavState::new(3);

        gestures.handle(PointerEvent::Down(at(300.0)), 600.0, &mut nav);
        gestures.handle(PointerEvent::Move(at(250.0)), 600.0, &mut nav);
        let outcome = gestures.handle(PointerEvent::Up(at(200.0)), 600.0, &mut nav);

        assert_eq!(outcome, GestureOutcome::Released);
        assert_eq!(nav.index(), 0);
        assert_eq!(nav.drag_offset(), 0.0);
        assert!(nav.transitions_enabled());
    }

    #[test]
    fn test_single_slide_never_navigates() {
        let mut gestures = GestureInterpreter::default();
        let mut nav = NavState::new(1);

        for end in [-500.0, 500.0] {
            gestures.handle(PointerEvent::Down(at(600.0)), 600.0, &mut nav);
            gestures.handle(PointerEvent::Move(at(600.0 + end / 2.0)), 600.0, &mut nav);
            let outcome = gestures.handle(PointerEvent::Up(at(600.0 + end)), 600.0, &mut nav);

            assert!(matches!(outcome, GestureOutcome::Swiped { .. }));
            assert_eq!(nav.index(), 0);
        }
    }

    #[test]
    fn test_cancel_and_leave_abort() {
        for abort in [PointerEvent::Cancel, PointerEvent::Leave] {
            let mut gestures = GestureInterpreter::default();
            let mut nav = NavState::new(3);

            gestures.handle(PointerEvent::Down(at(300.0)), 600.0, &mut nav);
            gestures.handle(PointerEvent::Move(at(100.0)), 600.0, &mut nav);
            let outcome = gestures.handle(abort, 600.0, &mut nav);

            assert_eq!(outcome, GestureOutcome::Aborted);
            assert_eq!(nav.index(), 0);
            assert_eq!(nav.drag_offset(), 0.0);
            assert!(nav.transitions_enabled());
            assert!(!gestures.is_active());

            // The release that follows belongs to no gesture
            let outcome = gestures.handle(PointerEvent::Up(at(100.0)), 600.0, &mut nav);
            assert_eq!(outcome, GestureOutcome::Ignored);
        }
    }

    #[test]
    fn test_events_without_press_are_ignored() {
        let mut gestures = GestureInterpreter::default();
        let mut nav = NavState::new(3);

        assert_eq!(
            gestures.handle(PointerEvent::Move(at(10.0)), 600.0, &mut nav),
            GestureOutcome::Ignored
        );
        assert_eq!(
            gestures.handle(PointerEvent::Leave, 600.0, &mut nav),
            GestureOutcome::Ignored
        );
    }
}
