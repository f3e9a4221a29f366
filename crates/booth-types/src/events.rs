use crate::Direction;

/// Screens the kiosk can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    #[default]
    Home,
    PhotoSession,
}

/// State changes published by the carousel controller.
#[derive(Debug, Clone, PartialEq)]
pub enum CarouselEvent {
    /// A new slide list replaced the old one; the index is back at 0.
    SlidesChanged { generation: u64, count: usize },
    IndexChanged { index: usize, direction: Direction },
    AnimationStarted,
    AnimationFinished,
    DragOffsetChanged(f32),
    TransitionsEnabled(bool),
    ModalOpened,
    ModalClosed,
    /// The confirm button was accepted; the caller must issue the request.
    SessionRequested,
    SessionFailed(String),
    /// The backend session must be put back to idle before the next start.
    SessionResetRequested,
    Navigate(Screen),
    CursorVisibility(bool),
    Preload(String),
}
