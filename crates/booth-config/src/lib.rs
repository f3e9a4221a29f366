use booth_types::GestureThresholds;
use cosmic::cosmic_config::{self, Config, ConfigGet, ConfigSet, CosmicConfigEntry};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

pub const CONFIG_VERSION: u64 = 1;
pub const APP_ID: &str = "io.github.photobooth.Kiosk";

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
/// Folder under the user's picture directory scanned for promo slides.
pub const DEFAULT_ASSET_FOLDER: &str = "promo";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoothConfig {
    pub base_url: String,
    pub asset_dir: Option<String>,
    pub swipe_threshold_px: f32,
    pub swipe_threshold_ratio: f32,
    pub drag_start_px: f32,
    pub cursor_idle_secs: u64,
    pub preload_capacity: usize,
    pub transition_ms: u64,
    pub request_timeout_secs: u64,
    /// Interval between session status polls on the photo session screen.
    pub status_poll_ms: u64,
    pub fullscreen: bool,
}

impl Default for BoothConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            asset_dir: None,
            swipe_threshold_px: GestureThresholds::DEFAULT_SWIPE_MAX_PX,
            swipe_threshold_ratio: GestureThresholds::DEFAULT_SWIPE_RATIO,
            drag_start_px: GestureThresholds::DEFAULT_DRAG_START_PX,
            cursor_idle_secs: 3,
            preload_capacity: shared::DEFAULT_PRELOAD_CAPACITY,
            transition_ms: 350,
            request_timeout_secs: 10,
            status_poll_ms: 1000,
            fullscreen: true,
        }
    }
}

impl BoothConfig {
    /// Replaces out-of-range values with their defaults.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        self.base_url = self.base_url.trim().trim_end_matches('/').to_string();
        if self.base_url.is_empty() {
            self.base_url = defaults.base_url;
        }
        if !(self.swipe_threshold_px.is_finite() && self.swipe_threshold_px > 0.0) {
            self.swipe_threshold_px = defaults.swipe_threshold_px;
        }
        if !(self.swipe_threshold_ratio.is_finite()
            && self.swipe_threshold_ratio > 0.0
            && self.swipe_threshold_ratio <= 1.0)
        {
            self.swipe_threshold_ratio = defaults.swipe_threshold_ratio;
        }
        if !(self.drag_start_px.is_finite() && self.drag_start_px >= 0.0) {
            self.drag_start_px = defaults.drag_start_px;
        }
        if self.cursor_idle_secs == 0 {
            self.cursor_idle_secs = defaults.cursor_idle_secs;
        }
        if self.preload_capacity == 0 {
            self.preload_capacity = defaults.preload_capacity;
        }
        if self.request_timeout_secs == 0 {
            self.request_timeout_secs = defaults.request_timeout_secs;
        }
        // Zero-period timers are rejected by the runtime
        if self.transition_ms == 0 {
            self.transition_ms = defaults.transition_ms;
        }
        if self.status_poll_ms == 0 {
            self.status_poll_ms = defaults.status_poll_ms;
        }

        self
    }

    pub fn gesture_thresholds(&self) -> GestureThresholds {
        GestureThresholds {
            drag_start_px: self.drag_start_px,
            swipe_max_px: self.swipe_threshold_px,
            swipe_ratio: self.swipe_threshold_ratio,
        }
    }

    pub fn cursor_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.cursor_idle_secs)
    }

    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn status_poll_interval(&self) -> Duration {
        Duration::from_millis(self.status_poll_ms)
    }

    /// Directory holding the promo images, if one can be determined.
    pub fn asset_dir(&self) -> Option<PathBuf> {
        match &self.asset_dir {
            Some(dir) if !dir.trim().is_empty() => Some(PathBuf::from(dir)),
            _ => dirs::picture_dir().map(|dir| dir.join(DEFAULT_ASSET_FOLDER)),
        }
    }
}

impl CosmicConfigEntry for BoothConfig {
    const VERSION: u64 = CONFIG_VERSION;

    fn write_entry(&self, config: &cosmic_config::Config) -> Result<(), cosmic_config::Error> {
        config.set("base_url", self.base_url.clone())?;
        config.set("asset_dir", self.asset_dir.clone())?;
        config.set("swipe_threshold_px", self.swipe_threshold_px)?;
        config.set("swipe_threshold_ratio", self.swipe_threshold_ratio)?;
        config.set("drag_start_px", self.drag_start_px)?;
        config.set("cursor_idle_secs", self.cursor_idle_secs)?;
        config.set("preload_capacity", self.preload_capacity)?;
        config.set("transition_ms", self.transition_ms)?;
        config.set("request_timeout_secs", self.request_timeout_secs)?;
        config.set("status_poll_ms", self.status_poll_ms)?;
        config.set("fullscreen", self.fullscreen)?;
        Ok(())
    }

    fn get_entry(
        config: &cosmic_config::Config,
    ) -> Result<Self, (Vec<cosmic_config::Error>, Self)> {
        let mut errors = Vec::new();
        let mut cfg = BoothConfig::default();

        macro_rules! get_field {
            ($name:literal, $field:ident, $type:ty) => {
                match config.get::<$type>($name) {
                    Ok(val) => cfg.$field = val,
                    Err(e) => errors.push(e),
                }
            };
        }

        get_field!("base_url", base_url, String);
        get_field!("asset_dir", asset_dir, Option<String>);
        get_field!("swipe_threshold_px", swipe_threshold_px, f32);
        get_field!("swipe_threshold_ratio", swipe_threshold_ratio, f32);
        get_field!("drag_start_px", drag_start_px, f32);
        get_field!("cursor_idle_secs", cursor_idle_secs, u64);
        get_field!("preload_capacity", preload_capacity, usize);
        get_field!("transition_ms", transition_ms, u64);
        get_field!("request_timeout_secs", request_timeout_secs, u64);
        get_field!("status_poll_ms", status_poll_ms, u64);
        get_field!("fullscreen", fullscreen, bool);

        let cfg = cfg.sanitized();
        if errors.is_empty() {
            Ok(cfg)
        } else {
            Err((errors, cfg))
        }
    }

    fn update_keys<T: AsRef<str>>(
        &mut self,
        config: &cosmic_config::Config,
        changed_keys: &[T],
    ) -> (Vec<cosmic_config::Error>, Vec<&'static str>) {
        let mut errors = Vec::new();
        let mut updated = Vec::new();

        for key in changed_keys {
            match key.as_ref() {
                "base_url" => match config.get::<String>("base_url") {
                    Ok(val) => {
                        self.base_url = val;
                        updated.push("base_url");
                    }
                    Err(e) => errors.push(e),
                },
                "asset_dir" => match config.get::<Option<String>>("asset_dir") {
                    Ok(val) => {
                        self.asset_dir = val;
                        updated.push("asset_dir");
                    }
                    Err(e) => errors.push(e),
                },
                "cursor_idle_secs" => match config.get::<u64>("cursor_idle_secs") {
                    Ok(val) => {
                        self.cursor_idle_secs = val;
                        updated.push("cursor_idle_secs");
                    }
                    Err(e) => errors.push(e),
                },
                "fullscreen" => match config.get::<bool>("fullscreen") {
                    Ok(val) => {
                        self.fullscreen = val;
                        updated.push("fullscreen");
                    }
                    Err(e) => errors.push(e),
                },
                _ => {}
            }
        }

        if !updated.is_empty() {
            *self = self.clone().sanitized();
        }

        (errors, updated)
    }
}

pub fn config() -> Result<Config, cosmic_config::Error> {
    Config::new(APP_ID, CONFIG_VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_kiosk_behavior() {
        let cfg = BoothConfig::default();
        let thresholds = cfg.gesture_thresholds();

        assert_eq!(thresholds.swipe_threshold(600.0), 150.0);
        assert_eq!(thresholds.drag_start_px, 20.0);
        assert_eq!(cfg.cursor_idle_timeout(), Duration::from_secs(3));
        assert_eq!(cfg.preload_capacity, 50);
    }

    #[test]
    fn test_sanitized_repairs_invalid_values() {
        let cfg = BoothConfig {
            base_url: " http://booth.local:9000/ ".to_string(),
            swipe_threshold_px: -5.0,
            swipe_threshold_ratio: 3.0,
            drag_start_px: f32::NAN,
            cursor_idle_secs: 0,
            preload_capacity: 0,
            request_timeout_secs: 0,
            transition_ms: 0,
            status_poll_ms: 0,
            ..BoothConfig::default()
        }
        .sanitized();

        assert_eq!(cfg.base_url, "http://booth.local:9000");
        assert_eq!(cfg.swipe_threshold_px, 160.0);
        assert_eq!(cfg.swipe_threshold_ratio, 0.25);
        assert_eq!(cfg.drag_start_px, 20.0);
        assert_eq!(cfg.cursor_idle_secs, 3);
        assert_eq!(cfg.preload_capacity, 50);
        assert_eq!(cfg.request_timeout_secs, 10);
        assert_eq!(cfg.transition_duration(), Duration::from_millis(350));
        assert_eq!(cfg.status_poll_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_blank_base_url_falls_back() {
        let cfg = BoothConfig {
            base_url: "   ".to_string(),
            ..BoothConfig::default()
        }
        .sanitized();

        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_explicit_asset_dir_wins() {
        let cfg = BoothConfig {
            asset_dir: Some("/srv/kiosk/promo".to_string()),
            ..BoothConfig::default()
        };

        assert_eq!(cfg.asset_dir(), Some(PathBuf::from("/srv/kiosk/promo")));
    }
}
