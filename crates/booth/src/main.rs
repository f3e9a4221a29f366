pub mod app;
pub mod controller;
pub mod idle;
pub mod key_binds;
pub mod localize;
pub mod message;
pub mod preloader;
pub mod watcher;

use app::BoothApp;
use std::path::PathBuf;

fn main() -> cosmic::iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let settings = cosmic::app::Settings::default().size_limits(
        cosmic::iced::Limits::NONE
            .min_width(640.0)
            .min_height(480.0),
    );

    // Optional promo directory, overriding the configured one
    let asset_dir = std::env::args().nth(1).map(PathBuf::from);

    cosmic::app::run::<BoothApp>(settings, asset_dir)
}
