use booth_config::BoothConfig;
use booth_nav::AssetMap;
use booth_session::{SessionError, SessionSnapshot};
use booth_types::Point;
use std::sync::Arc;

pub use crate::key_binds::KeyAction;
use crate::preloader::PreloadedImage;

/// Raw pointer input as delivered by the windowing layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    CursorMoved(Point),
    Pressed,
    Released,
    CursorLeft,
    FingerPressed(Point),
    FingerMoved(Point),
    FingerLifted(Point),
    FingerLost,
}

#[derive(Debug, Clone)]
pub enum Message {
    AssetsDiscovered(AssetMap),
    WatcherEvent(crate::watcher::WatcherEvent),
    Pointer(PointerInput),
    Key(KeyAction),
    WindowResized { width: f32, height: f32 },
    TransitionEnd,
    IdleTick,
    OpenModal,
    CloseModal,
    ConfirmSession,
    SessionResult(Result<SessionSnapshot, SessionError>),
    PollStatus,
    StatusResult(Result<SessionSnapshot, SessionError>),
    SessionReset(Result<SessionSnapshot, SessionError>),
    Preloaded {
        src: String,
        result: Result<PreloadedImage, Arc<String>>,
    },
    ReturnHome,
    ToggleFullscreen,
    ConfigChanged(BoothConfig),
    Cancelled,
}
