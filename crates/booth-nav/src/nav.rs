use booth_types::Direction;

/// Bounded, non-wrapping walk over the slide list plus the animation flags
/// the view needs to render it.
#[derive(Debug, Clone, PartialEq)]
pub struct NavState {
    cur_idx: usize,
    total: usize,
    animating: bool,
    drag_offset: f32,
    transitions_enabled: bool,
}

impl Default for NavState {
    fn default() -> Self {
        Self::new(0)
    }
}

impl NavState {
    pub fn new(total: usize) -> Self {
        Self {
            cur_idx: 0,
            total,
            animating: false,
            drag_offset: 0.0,
            transitions_enabled: true,
        }
    }

    /// Back to the first slide of a list holding `total` slides.
    pub fn reset(&mut self, total: usize) {
        *self = Self::new(total);
    }

    pub fn index(&self) -> usize {
        self.cur_idx
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn drag_offset(&self) -> f32 {
        self.drag_offset
    }

    pub fn transitions_enabled(&self) -> bool {
        self.transitions_enabled
    }

    pub fn can_navigate(&self) -> bool {
        self.total >= 2
    }

    pub fn is_first(&self) -> bool {
        self.cur_idx == 0
    }

    pub fn is_last(&self) -> bool {
        self.cur_idx + 1 >= self.total
    }

    /// Advances one slide. Returns the new index, or `None` when the request was ignored.
    pub fn go_next(&mut self) -> Option<usize> {
        if !self.can_navigate() || self.animating || self.is_last() {
            return None;
        }

        self.cur_idx += 1;
        self.start_animation();
        Some(self.cur_idx)
    }

    /// Steps back one slide. Returns the new index, or `None` when the request was ignored.
    pub fn go_prev(&mut self) -> Option<usize> {
        if !self.can_navigate() || self.animating || self.is_first() {
            return None;
        }

        self.cur_idx -= 1;
        self.start_animation();
        Some(self.cur_idx)
    }

    pub fn go(&mut self, direction: Direction) -> Option<usize> {
        match direction {
            Direction::Next => self.go_next(),
            Direction::Prev => self.go_prev(),
        }
    }

    /// Marks the running slide animation as finished. Returns `false` if none was running.
    pub fn transition_end(&mut self) -> bool {
        std::mem::replace(&mut self.animating, false)
    }

    /// Drops an in-flight animation so a drag can take over.
    pub fn cancel_animation(&mut self) -> bool {
        std::mem::replace(&mut self.animating, false)
    }

    pub fn set_drag_offset(&mut self, offset: f32) {
        self.drag_offset = offset;
    }

    pub fn clear_drag_offset(&mut self) {
        self.drag_offset = 0.0;
    }

    pub fn set_transitions_enabled(&mut self, enabled: bool) {
        self.transitions_enabled = enabled;
    }

    fn start_animation(&mut self) {
        self.animating = true;
        self.drag_offset = 0.0;
    }
}
