pub mod events;
pub mod types;

pub use events::{CarouselEvent, Screen};
pub use types::{Direction, GestureThresholds, Point, PointerEvent};

/// Identifier of the synthetic slide used when no promo images were found.
pub const PLACEHOLDER_ID: &str = "placeholder";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SlideKind {
    Image,
    Placeholder,
}

/// One entry of the carousel. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Slide {
    id: String,
    kind: SlideKind,
    src: Option<String>,
    label: String,
}

impl Slide {
    pub fn image(id: impl Into<String>, src: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: SlideKind::Image,
            src: Some(src.into()),
            label: label.into(),
        }
    }

    pub fn placeholder() -> Self {
        Self {
            id: PLACEHOLDER_ID.to_string(),
            kind: SlideKind::Placeholder,
            src: None,
            label: shared::labels::PLACEHOLDER_LABEL.to_string(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> SlideKind {
        self.kind
    }

    pub fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_placeholder(&self) -> bool {
        self.kind == SlideKind::Placeholder
    }
}
