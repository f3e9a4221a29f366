use crate::message::Message;
use cosmic::{
    iced::keyboard::{Key, Modifiers, key::Named},
    widget::menu::key_bind::{KeyBind, Modifier},
};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Next,
    Prev,
    /// Enter: opens the session modal, or confirms it when open.
    Activate,
    /// Escape: closes the session modal.
    Dismiss,
    Fullscreen,
}

impl KeyAction {
    pub fn message(self) -> Message {
        match self {
            KeyAction::Fullscreen => Message::ToggleFullscreen,
            action => Message::Key(action),
        }
    }
}

pub fn init_key_binds() -> HashMap<KeyBind, KeyAction> {
    let mut binds = HashMap::new();

    binds.insert(
        KeyBind {
            modifiers: vec![],
            key: Key::Named(Named::ArrowRight),
        },
        KeyAction::Next,
    );
    binds.insert(
        KeyBind {
            modifiers: vec![],
            key: Key::Named(Named::ArrowLeft),
        },
        KeyAction::Prev,
    );
    binds.insert(
        KeyBind {
            modifiers: vec![],
            key: Key::Named(Named::Enter),
        },
        KeyAction::Activate,
    );
    binds.insert(
        KeyBind {
            modifiers: vec![],
            key: Key::Named(Named::Escape),
        },
        KeyAction::Dismiss,
    );
    binds.insert(
        KeyBind {
            modifiers: vec![],
            key: Key::Named(Named::F11),
        },
        KeyAction::Fullscreen,
    );

    binds
}

pub fn key_press_handler(key: Key, modifiers: Modifiers) -> Option<Message> {
    let mut mods = Vec::new();

    if modifiers.control() {
        mods.push(Modifier::Ctrl);
    }

    if modifiers.shift() {
        mods.push(Modifier::Shift);
    }

    if modifiers.alt() {
        mods.push(Modifier::Alt);
    }

    if modifiers.logo() {
        mods.push(Modifier::Super);
    }

    let key_bind = KeyBind {
        modifiers: mods,
        key,
    };

    init_key_binds()
        .get(&key_bind)
        .map(|action| action.message())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrows_and_enter_are_bound() {
        let binds = init_key_binds();
        let lookup = |named| {
            binds
                .get(&KeyBind {
                    modifiers: vec![],
                    key: Key::Named(named),
                })
                .copied()
        };

        assert_eq!(lookup(Named::ArrowRight), Some(KeyAction::Next));
        assert_eq!(lookup(Named::ArrowLeft), Some(KeyAction::Prev));
        assert_eq!(lookup(Named::Enter), Some(KeyAction::Activate));
        assert_eq!(lookup(Named::Escape), Some(KeyAction::Dismiss));
    }

    #[test]
    fn test_modified_keys_are_not_bound() {
        let message = key_press_handler(Key::Named(Named::ArrowRight), Modifiers::CTRL);
        assert!(message.is_none());
    }

    #[test]
    fn test_plain_arrow_maps_to_key_message() {
        let message = key_press_handler(Key::Named(Named::ArrowLeft), Modifiers::empty());
        assert!(matches!(message, Some(Message::Key(KeyAction::Prev))));
    }
}
