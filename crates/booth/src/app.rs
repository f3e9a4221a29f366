//! Kiosk application shell

use crate::{
    controller::{CarouselController, ControllerSettings},
    fl,
    key_binds::key_press_handler,
    message::{Message, PointerInput},
    preloader, watcher,
};
use booth_config::BoothConfig;
use booth_nav::{AssetMap, source_path};
use booth_session::{SessionClient, SessionError};
use booth_types::{CarouselEvent, Point, PointerEvent, Screen};
use cosmic::{
    Action, Application, ApplicationExt, Core, Element, Task,
    cosmic_config::{Config, CosmicConfigEntry},
    iced::{
        Alignment, ContentFit, Length, Padding, Subscription,
        alignment::{Horizontal, Vertical},
        event, mouse, touch, window,
    },
    widget::{Space, button, column, container, image, text},
};
use std::{
    collections::{HashMap, HashSet},
    path::PathBuf,
    sync::Arc,
    time::{Duration, Instant},
};

const IDLE_TICK: Duration = Duration::from_millis(250);

pub struct BoothApp {
    core: Core,
    config: BoothConfig,
    config_handler: Option<Config>,
    /// Command line override for the promo directory
    asset_override: Option<PathBuf>,
    controller: CarouselController,
    session: Option<SessionClient>,
    /// Decoded slides keyed by source
    images: HashMap<String, image::Handle>,
    cursor: Point,
    is_fullscreen: bool,
}

impl BoothApp {
    fn asset_dir(&self) -> Option<PathBuf> {
        self.asset_override.clone().or_else(|| self.config.asset_dir())
    }

    fn scan_assets(&self) -> Task<Action<Message>> {
        let dir = self.asset_dir();

        cosmic::task::future(async move {
            let assets = match dir {
                Some(dir) => booth_nav::discover_assets(&dir).await,
                None => AssetMap::new(),
            };
            Message::AssetsDiscovered(assets)
        })
    }

    fn session_client(config: &BoothConfig) -> Option<SessionClient> {
        match SessionClient::new(config.base_url.clone(), config.request_timeout()) {
            Ok(client) => Some(client),
            Err(err) => {
                tracing::error!("unusable session endpoint {}: {err}", config.base_url);
                None
            }
        }
    }

    fn set_fullscreen(&mut self, fullscreen: bool) -> Task<Action<Message>> {
        self.is_fullscreen = fullscreen;

        let mode = if fullscreen {
            window::Mode::Fullscreen
        } else {
            window::Mode::Windowed
        };

        match self.core.main_window_id() {
            Some(window_id) => window::change_mode::<Message>(window_id, mode).map(Action::from),
            None => Task::none(),
        }
    }

    fn pointer_event(&mut self, input: PointerInput) -> PointerEvent {
        match input {
            PointerInput::CursorMoved(point) | PointerInput::FingerMoved(point) => {
                self.cursor = point;
                PointerEvent::Move(point)
            }
            PointerInput::FingerPressed(point) => {
                self.cursor = point;
                PointerEvent::Down(point)
            }
            PointerInput::FingerLifted(point) => PointerEvent::Up(point),
            PointerInput::Pressed => PointerEvent::Down(self.cursor),
            PointerInput::Released => PointerEvent::Up(self.cursor),
            PointerInput::CursorLeft => PointerEvent::Leave,
            PointerInput::FingerLost => PointerEvent::Cancel,
        }
    }

    /// Turns controller events into the side effects they ask for.
    fn flush_events(&mut self) -> Vec<Task<Action<Message>>> {
        let mut tasks = Vec::new();

        for event in self.controller.drain_events() {
            match event {
                CarouselEvent::Preload(src) => {
                    let path = source_path(&src);
                    tasks.push(cosmic::task::future(async move {
                        let result = preloader::load_image(path)
                            .await
                            .map_err(|err| Arc::new(err.to_string()));
                        Message::Preloaded { src, result }
                    }));
                }
                CarouselEvent::SessionRequested => {
                    let client = self.session.clone();
                    let base_url = self.config.base_url.clone();
                    tasks.push(cosmic::task::future(async move {
                        let result = match client {
                            Some(client) => client.start().await,
                            None => Err(SessionError::InvalidUrl(base_url)),
                        };
                        Message::SessionResult(result)
                    }));
                }
                CarouselEvent::SessionResetRequested => {
                    if let Some(client) = self.session.clone() {
                        tasks.push(cosmic::task::future(async move {
                            Message::SessionReset(client.reset().await)
                        }));
                    }
                }
                CarouselEvent::SlidesChanged { count, .. } => {
                    let live: HashSet<&str> = self
                        .controller
                        .slides()
                        .slides()
                        .iter()
                        .filter_map(|slide| slide.src())
                        .collect();
                    self.images.retain(|src, _| live.contains(src.as_str()));
                    tracing::debug!("showing {count} slides");
                }
                CarouselEvent::Navigate(screen) => {
                    tracing::info!("screen changed to {screen:?}");
                }
                _ => {}
            }
        }

        tasks
    }

    fn carousel_view(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::active().cosmic().spacing;
        let slides = self.controller.slides();

        let slide: Element<'_, Message> = match self.controller.current_slide() {
            Some(current) if !current.is_placeholder() => {
                let src = current.src().unwrap_or_default();
                let handle = self
                    .images
                    .get(src)
                    .cloned()
                    .unwrap_or_else(|| image::Handle::from_path(source_path(src)));

                image(handle)
                    .content_fit(ContentFit::Contain)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .into()
            }
            _ => container(
                column()
                    .push(text::title1(fl!("placeholder-title")))
                    .push(text::body(fl!("placeholder-body")))
                    .spacing(spacing.space_s)
                    .align_x(Alignment::Center),
            )
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(Horizontal::Center)
            .align_y(Vertical::Center)
            .into(),
        };

        // The slide follows the finger while dragging
        let offset = self.controller.drag_offset();
        let padding = Padding {
            top: 0.0,
            bottom: 0.0,
            left: offset.max(0.0),
            right: (-offset).max(0.0),
        };

        let label = self
            .controller
            .current_slide()
            .map(|slide| slide.label().to_string())
            .unwrap_or_default();

        let mut footer = column()
            .push(text::heading(fl!("tap-to-start")))
            .push(text::caption(label))
            .spacing(spacing.space_xxs)
            .align_x(Alignment::Center);

        if !slides.is_placeholder() {
            footer = footer.push(text::caption(fl!(
                "slide-position",
                current = self.controller.index() + 1,
                total = slides.len()
            )));
        }

        let content = column()
            .push(
                container(slide)
                    .padding(padding)
                    .width(Length::Fill)
                    .height(Length::Fill),
            )
            .push(
                container(footer)
                    .padding(spacing.space_s)
                    .width(Length::Fill)
                    .align_x(Horizontal::Center),
            );

        let interaction = if self.controller.cursor_hidden() {
            mouse::Interaction::Hidden
        } else {
            mouse::Interaction::Idle
        };

        cosmic::iced_widget::mouse_area(content)
            .interaction(interaction)
            .into()
    }

    fn session_dialog_view(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::active().cosmic().spacing;
        let modal = self.controller.modal();
        let busy = modal.is_busy();

        let start_label = if busy {
            fl!("session-starting")
        } else {
            fl!("session-start")
        };
        let start_btn =
            button::suggested(start_label).on_press_maybe((!busy).then_some(Message::ConfirmSession));
        let cancel_btn =
            button::text(fl!("session-cancel")).on_press_maybe((!busy).then_some(Message::CloseModal));

        let mut content = column()
            .push(text::title4(fl!("session-dialog-title")))
            .push(Space::with_height(Length::Fixed(spacing.space_s as f32)))
            .push(text::body(fl!("session-dialog-body")));

        if let Some(error) = modal.error() {
            content = content
                .push(Space::with_height(Length::Fixed(spacing.space_xs as f32)))
                .push(text::body(error.to_string()));
        }

        let content = content
            .push(Space::with_height(Length::Fixed(spacing.space_m as f32)))
            .push(start_btn)
            .push(cancel_btn)
            .spacing(spacing.space_xxs)
            .align_x(Alignment::Center);

        let dialog_container = container(content)
            .padding(spacing.space_m)
            .class(cosmic::theme::Container::Dialog);

        container(
            container(dialog_container)
                .width(Length::Shrink)
                .height(Length::Shrink),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .into()
    }

    fn photo_session_view(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::active().cosmic().spacing;

        let content = column()
            .push(text::title1(fl!("photo-session-title")))
            .push(text::body(fl!("photo-session-body")))
            .push(Space::with_height(Length::Fixed(spacing.space_m as f32)))
            .push(button::standard(fl!("photo-session-home")).on_press(Message::ReturnHome))
            .spacing(spacing.space_s)
            .align_x(Alignment::Center);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(Horizontal::Center)
            .align_y(Vertical::Center)
            .into()
    }
}

impl Application for BoothApp {
    type Executor = cosmic::executor::Default;
    type Flags = Option<PathBuf>;
    type Message = Message;

    const APP_ID: &'static str = booth_config::APP_ID;

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn init(mut core: Core, flags: Self::Flags) -> (Self, Task<Action<Self::Message>>) {
        core.window.show_headerbar = false;

        let mut tasks = vec![];

        let (config, config_handler) = match booth_config::config() {
            Ok(handler) => {
                let config = match BoothConfig::get_entry(&handler) {
                    Ok(c) => c,
                    Err((errors, c)) => {
                        for err in errors {
                            tracing::debug!("config entry fell back to default: {err}");
                        }
                        c
                    }
                };
                (config, Some(handler))
            }
            Err(err) => {
                tracing::warn!("config unavailable, using defaults: {err}");
                (BoothConfig::default(), None)
            }
        };
        let config = config.sanitized();

        let mut app = Self {
            core,
            session: Self::session_client(&config),
            controller: CarouselController::new(ControllerSettings::from(&config), Instant::now()),
            config,
            config_handler,
            asset_override: flags,
            images: HashMap::new(),
            cursor: Point::default(),
            is_fullscreen: false,
        };

        if let Some(window_id) = app.core.main_window_id() {
            tasks.push(app.set_window_title(fl!("app-title"), window_id));
        }
        if app.config.fullscreen {
            tasks.push(app.set_fullscreen(true));
        }
        tasks.push(app.scan_assets());

        (app, Task::batch(tasks))
    }

    fn view(&self) -> Element<'_, Self::Message> {
        if self.controller.screen() == Screen::PhotoSession {
            return self.photo_session_view();
        }

        let carousel = self.carousel_view();

        if self.controller.modal().is_open() {
            let dialog = self.session_dialog_view();

            let backdrop = cosmic::widget::mouse_area(
                container(Space::new(Length::Fill, Length::Fill))
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .class(cosmic::theme::Container::Transparent),
            )
            .on_press(Message::CloseModal);

            cosmic::iced_widget::stack![carousel, backdrop, dialog].into()
        } else {
            carousel
        }
    }

    fn update(&mut self, message: Message) -> Task<Action<Self::Message>> {
        let now = Instant::now();
        let mut tasks = Vec::new();

        match message {
            Message::AssetsDiscovered(assets) => {
                self.controller.set_assets(assets);
            }
            Message::WatcherEvent(watcher::WatcherEvent::Changed(path)) => {
                tracing::debug!("promo directory changed: {}", path.display());
                tasks.push(self.scan_assets());
            }
            Message::WatcherEvent(watcher::WatcherEvent::Error(err)) => {
                tracing::warn!("promo directory watcher: {err}");
            }
            Message::Pointer(input) => {
                let event = self.pointer_event(input);
                self.controller.pointer(event, now);
            }
            Message::Key(action) => {
                self.controller.key(action, now);
            }
            Message::WindowResized { width, .. } => {
                self.controller.set_container_width(width);
            }
            Message::TransitionEnd => self.controller.transition_end(),
            Message::IdleTick => self.controller.tick(now),
            Message::OpenModal => {
                self.controller.open_modal();
            }
            Message::CloseModal => {
                self.controller.close_modal(now);
            }
            Message::ConfirmSession => {
                self.controller.confirm();
            }
            Message::SessionResult(result) => {
                let result = result
                    .map(|_| ())
                    .map_err(|err| err.user_message_or(&fl!("session-error-generic")));
                self.controller.finish_confirm(result, now);
            }
            Message::PollStatus => {
                if let Some(client) = self.session.clone() {
                    tasks.push(cosmic::task::future(async move {
                        Message::StatusResult(client.status().await)
                    }));
                }
            }
            Message::StatusResult(Ok(snapshot)) => {
                if let Some(error) = &snapshot.error {
                    tracing::warn!("photo session reported: {error}");
                }
                self.controller.session_status(snapshot.phase(), now);
            }
            Message::StatusResult(Err(err)) => {
                tracing::debug!("session status unavailable: {err}");
            }
            Message::SessionReset(Ok(_)) => tracing::info!("backend session reset"),
            Message::SessionReset(Err(_)) => {}
            Message::Preloaded { src, result } => match result {
                Ok(preloaded) => {
                    self.images.insert(src, preloaded.handle);
                }
                Err(err) => tracing::warn!("failed to preload {src}: {err}"),
            },
            Message::ReturnHome => self.controller.return_home(now),
            Message::ToggleFullscreen => {
                tasks.push(self.set_fullscreen(!self.is_fullscreen));
            }
            Message::ConfigChanged(config) => {
                let config = config.sanitized();
                if config != self.config {
                    let rescan = config.asset_dir != self.config.asset_dir;
                    if config.base_url != self.config.base_url
                        || config.request_timeout_secs != self.config.request_timeout_secs
                    {
                        self.session = Self::session_client(&config);
                    }
                    self.controller
                        .apply_settings(ControllerSettings::from(&config), now);
                    self.config = config;
                    if rescan {
                        tasks.push(self.scan_assets());
                    }
                }
            }
            Message::Cancelled => {}
        }

        tasks.extend(self.flush_events());
        Task::batch(tasks)
    }

    fn subscription(&self) -> Subscription<Self::Message> {
        let transition_sub = if self.controller.is_animating() {
            cosmic::iced::time::every(self.config.transition_duration())
                .map(|_| Message::TransitionEnd)
        } else {
            Subscription::none()
        };

        let status_sub = if self.controller.screen() == Screen::PhotoSession {
            cosmic::iced::time::every(self.config.status_poll_interval())
                .map(|_| Message::PollStatus)
        } else {
            Subscription::none()
        };

        let idle_sub = if self.controller.idle_armed() {
            cosmic::iced::time::every(IDLE_TICK).map(|_| Message::IdleTick)
        } else {
            Subscription::none()
        };

        Subscription::batch([
            cosmic::iced::keyboard::on_key_press(key_press_handler),
            event::listen_with(pointer_event_handler),
            window::events().map(|(_, event)| {
                if let window::Event::Resized(size) = event {
                    Message::WindowResized {
                        width: size.width,
                        height: size.height,
                    }
                } else {
                    Message::Cancelled
                }
            }),
            watcher::watch_directory(self.asset_dir()).map(Message::WatcherEvent),
            self.core()
                .watch_config::<BoothConfig>(booth_config::APP_ID)
                .map(|update| Message::ConfigChanged(update.config)),
            transition_sub,
            status_sub,
            idle_sub,
        ])
    }

    fn on_app_exit(&mut self) -> Option<Self::Message> {
        self.controller.shutdown();

        if let Some(ref handler) = self.config_handler {
            if let Err(err) = self.config.write_entry(handler) {
                tracing::warn!("failed to persist config: {err}");
            }
        }

        None
    }
}

fn pointer_event_handler(
    event: cosmic::iced::Event,
    status: event::Status,
    _window: window::Id,
) -> Option<Message> {
    if status == event::Status::Captured {
        return None;
    }

    let input = match event {
        cosmic::iced::Event::Mouse(mouse::Event::CursorMoved { position }) => {
            PointerInput::CursorMoved(Point::new(position.x, position.y))
        }
        cosmic::iced::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
            PointerInput::Pressed
        }
        cosmic::iced::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
            PointerInput::Released
        }
        cosmic::iced::Event::Mouse(mouse::Event::CursorLeft) => PointerInput::CursorLeft,
        cosmic::iced::Event::Touch(touch::Event::FingerPressed { position, .. }) => {
            PointerInput::FingerPressed(Point::new(position.x, position.y))
        }
        cosmic::iced::Event::Touch(touch::Event::FingerMoved { position, .. }) => {
            PointerInput::FingerMoved(Point::new(position.x, position.y))
        }
        cosmic::iced::Event::Touch(touch::Event::FingerLifted { position, .. }) => {
            PointerInput::FingerLifted(Point::new(position.x, position.y))
        }
        cosmic::iced::Event::Touch(touch::Event::FingerLost { .. }) => PointerInput::FingerLost,
        _ => return None,
    };

    Some(Message::Pointer(input))
}
