//! Carousel interaction controller.
//!
//! Owns every piece of kiosk home-screen state: the slide list, the
//! navigation walk, the gesture interpreter, the preload cache, the session
//! modal and the idle cursor. All mutation goes through the methods below,
//! and every visible change is published as a [`CarouselEvent`] to the
//! registered observers and to an outbox the application drains.

use crate::{idle::IdleCursor, key_binds::KeyAction};
use booth_config::BoothConfig;
use booth_nav::{
    AssetMap, GestureInterpreter, GestureOutcome, NavState, PreloadManager, SlideList,
    SlideListBuilder,
};
use booth_session::{ConfirmOutcome, SessionModal, SessionPhase};
use booth_types::{
    CarouselEvent, Direction, GestureThresholds, PointerEvent, Screen, Slide,
};
use std::time::{Duration, Instant};

pub type Observer = Box<dyn FnMut(&CarouselEvent)>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerSettings {
    pub thresholds: GestureThresholds,
    pub preload_capacity: usize,
    pub cursor_idle: Duration,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self::from(&BoothConfig::default())
    }
}

impl From<&BoothConfig> for ControllerSettings {
    fn from(config: &BoothConfig) -> Self {
        Self {
            thresholds: config.gesture_thresholds(),
            preload_capacity: config.preload_capacity,
            cursor_idle: config.cursor_idle_timeout(),
        }
    }
}

pub struct CarouselController {
    builder: SlideListBuilder,
    slides: SlideList,
    nav: NavState,
    gestures: GestureInterpreter,
    preload: PreloadManager,
    modal: SessionModal,
    idle: IdleCursor,
    screen: Screen,
    container_width: f32,
    observers: Vec<Observer>,
    outbox: Vec<CarouselEvent>,
}

impl CarouselController {
    pub fn new(settings: ControllerSettings, now: Instant) -> Self {
        let slides = SlideList::default();
        let mut controller = Self {
            builder: SlideListBuilder::new(),
            nav: NavState::new(slides.len()),
            slides,
            gestures: GestureInterpreter::new(settings.thresholds),
            preload: PreloadManager::new(settings.preload_capacity),
            modal: SessionModal::new(),
            idle: IdleCursor::new(settings.cursor_idle),
            screen: Screen::Home,
            container_width: 0.0,
            observers: Vec::new(),
            outbox: Vec::new(),
        };
        controller.idle.start(now);
        controller
    }

    /// Registers a callback invoked synchronously for every published event.
    pub fn subscribe(&mut self, observer: impl FnMut(&CarouselEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Events published since the last call, oldest first.
    pub fn drain_events(&mut self) -> Vec<CarouselEvent> {
        std::mem::take(&mut self.outbox)
    }

    pub fn slides(&self) -> &SlideList {
        &self.slides
    }

    pub fn current_slide(&self) -> Option<&Slide> {
        self.slides.get(self.nav.index())
    }

    pub fn index(&self) -> usize {
        self.nav.index()
    }

    pub fn modal(&self) -> &SessionModal {
        &self.modal
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn is_animating(&self) -> bool {
        self.nav.is_animating()
    }

    pub fn drag_offset(&self) -> f32 {
        self.nav.drag_offset()
    }

    pub fn transitions_enabled(&self) -> bool {
        self.nav.transitions_enabled()
    }

    pub fn cursor_hidden(&self) -> bool {
        self.idle.is_hidden()
    }

    /// A cursor-idle countdown is running and wants ticks.
    pub fn idle_armed(&self) -> bool {
        self.idle.is_armed()
    }

    pub fn preloaded_sources(&self) -> Vec<&str> {
        self.preload.cache().sources()
    }

    pub fn set_container_width(&mut self, width: f32) {
        self.container_width = width;
    }

    pub fn apply_settings(&mut self, settings: ControllerSettings, now: Instant) {
        self.gestures.set_thresholds(settings.thresholds);
        self.idle.set_timeout(settings.cursor_idle, now);
    }

    /// Replaces the discovered assets. Returns `true` if the slide list changed.
    pub fn set_assets(&mut self, assets: AssetMap) -> bool {
        let Some(slides) = self.builder.rebuild(assets) else {
            return false;
        };

        self.slides = slides;
        self.nav.reset(self.slides.len());
        self.gestures.reset();
        self.emit(CarouselEvent::SlidesChanged {
            generation: self.slides.generation(),
            count: self.slides.len(),
        });
        self.schedule_preloads();

        true
    }

    pub fn go_next(&mut self) -> bool {
        self.navigate(Direction::Next)
    }

    pub fn go_prev(&mut self) -> bool {
        self.navigate(Direction::Prev)
    }

    /// End of the slide animation reported by the view.
    pub fn transition_end(&mut self) {
        if self.nav.transition_end() {
            self.emit(CarouselEvent::AnimationFinished);
        }
    }

    /// Feeds one pointer event through the gesture interpreter.
    pub fn pointer(&mut self, event: PointerEvent, now: Instant) -> GestureOutcome {
        if self.idle.activity(now) {
            self.emit(CarouselEvent::CursorVisibility(true));
        }

        if self.screen != Screen::Home || self.modal.is_open() {
            return GestureOutcome::Ignored;
        }

        let was_animating = self.nav.is_animating();
        let old_offset = self.nav.drag_offset();
        let old_transitions = self.nav.transitions_enabled();
        let old_index = self.nav.index();

        let outcome = self.gestures.handle(event, self.container_width, &mut self.nav);

        if old_transitions != self.nav.transitions_enabled() {
            self.emit(CarouselEvent::TransitionsEnabled(self.nav.transitions_enabled()));
        }

        match outcome {
            GestureOutcome::Navigated { direction, index } => {
                self.emit(CarouselEvent::AnimationStarted);
                self.emit(CarouselEvent::IndexChanged { index, direction });
                self.schedule_preloads();
            }
            GestureOutcome::Tap => {
                self.open_modal();
            }
            _ => {
                if was_animating && !self.nav.is_animating() && old_index == self.nav.index() {
                    self.emit(CarouselEvent::AnimationFinished);
                }
            }
        }

        if old_offset != self.nav.drag_offset() {
            self.emit(CarouselEvent::DragOffsetChanged(self.nav.drag_offset()));
        }

        outcome
    }

    /// Keyboard surface: arrows navigate while the modal is closed, Enter
    /// opens or confirms, Escape closes.
    pub fn key(&mut self, action: KeyAction, now: Instant) -> bool {
        if self.screen != Screen::Home {
            return false;
        }

        match action {
            KeyAction::Next if !self.modal.is_open() => self.go_next(),
            KeyAction::Prev if !self.modal.is_open() => self.go_prev(),
            KeyAction::Activate if self.modal.is_open() => self.confirm(),
            KeyAction::Activate => self.open_modal(),
            KeyAction::Dismiss => self.close_modal(now),
            _ => false,
        }
    }

    pub fn open_modal(&mut self) -> bool {
        if self.screen != Screen::Home || !self.modal.open() {
            return false;
        }

        // Pointer input is ignored from here on, so its release would be lost
        self.abort_gesture();
        self.emit(CarouselEvent::ModalOpened);
        if self.idle.suppress() {
            self.emit(CarouselEvent::CursorVisibility(true));
        }
        true
    }

    pub fn close_modal(&mut self, now: Instant) -> bool {
        if !self.modal.close() {
            return false;
        }

        self.emit(CarouselEvent::ModalClosed);
        self.idle.resume(now);
        true
    }

    /// Confirm press. Returns `true` when the caller must issue the
    /// session-start request and report back through [`Self::finish_confirm`].
    pub fn confirm(&mut self) -> bool {
        if !self.modal.confirm() {
            tracing::debug!("confirm ignored (modal closed or request in flight)");
            return false;
        }

        self.emit(CarouselEvent::SessionRequested);
        true
    }

    /// Result of the session-start request; `Err` carries the user-facing message.
    pub fn finish_confirm(&mut self, result: Result<(), String>, now: Instant) -> ConfirmOutcome {
        let outcome = self.modal.finish(result);

        match &outcome {
            ConfirmOutcome::Started => {
                self.emit(CarouselEvent::ModalClosed);
                self.idle.resume(now);
                self.navigate_to(Screen::PhotoSession);
            }
            ConfirmOutcome::Failed(message) => {
                tracing::warn!("session start failed: {message}");
                self.emit(CarouselEvent::SessionFailed(message.clone()));
            }
            ConfirmOutcome::Stale => {
                tracing::debug!("dropping session result with no request outstanding");
            }
        }

        outcome
    }

    /// Back from the photo session to the carousel.
    pub fn return_home(&mut self, now: Instant) {
        if self.screen == Screen::Home {
            return;
        }

        self.gestures.reset();
        self.emit(CarouselEvent::SessionResetRequested);
        self.navigate_to(Screen::Home);
        if self.idle.start(now) {
            self.emit(CarouselEvent::CursorVisibility(true));
        }
    }

    /// Backend status seen while the photo session screen is up. Returns
    /// `true` when the session is over and the carousel is shown again.
    pub fn session_status(&mut self, phase: SessionPhase, now: Instant) -> bool {
        if self.screen != Screen::PhotoSession || !phase.is_over() {
            return false;
        }

        tracing::info!("photo session over ({phase:?})");
        self.return_home(now);
        true
    }

    pub fn tick(&mut self, now: Instant) {
        if self.idle.tick(now) {
            self.emit(CarouselEvent::CursorVisibility(false));
        }
    }

    /// Stops timers and drops observers.
    pub fn shutdown(&mut self) {
        self.idle.cancel();
        self.gestures.reset();
        self.observers.clear();
        self.outbox.clear();
    }

    fn navigate(&mut self, direction: Direction) -> bool {
        let Some(index) = self.nav.go(direction) else {
            return false;
        };

        self.emit(CarouselEvent::AnimationStarted);
        self.emit(CarouselEvent::IndexChanged { index, direction });
        self.schedule_preloads();
        true
    }

    fn abort_gesture(&mut self) {
        let old_offset = self.nav.drag_offset();
        let old_transitions = self.nav.transitions_enabled();

        let outcome = self
            .gestures
            .handle(PointerEvent::Cancel, self.container_width, &mut self.nav);
        if outcome == GestureOutcome::Aborted {
            tracing::debug!("pointer gesture dropped");
        }

        if old_transitions != self.nav.transitions_enabled() {
            self.emit(CarouselEvent::TransitionsEnabled(self.nav.transitions_enabled()));
        }
        if old_offset != self.nav.drag_offset() {
            self.emit(CarouselEvent::DragOffsetChanged(self.nav.drag_offset()));
        }
    }

    fn navigate_to(&mut self, screen: Screen) {
        self.screen = screen;
        tracing::info!("navigating to {screen:?}");
        self.emit(CarouselEvent::Navigate(screen));
    }

    fn schedule_preloads(&mut self) {
        for src in self.preload.plan(&self.slides, self.nav.index()) {
            self.emit(CarouselEvent::Preload(src));
        }
    }

    fn emit(&mut self, event: CarouselEvent) {
        for observer in &mut self.observers {
            observer(&event);
        }
        self.outbox.push(event);
    }
}
