//! Keybindings for the review loop.
//!
//! Single keys drive the editing commands that have no pointer gesture.
//! Escape always quits.

use serde::{Deserialize, Serialize};

/// A key press as delivered by the event source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Escape,
}

/// What a bound key asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    AddRegion,
    DeleteLastRegion,
    /// Ask for a region id and its new name
    RenameRegion,
    FirstImage,
    PrevImage,
    NextImage,
    Quit,
}

/// Keybinding configuration for the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub add_region: char,
    pub delete_last_region: char,
    pub rename_region: char,
    pub first_image: char,
    pub prev_image: char,
    pub next_image: char,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            add_region: 'a',
            delete_last_region: 'd',
            rename_region: 'e',
            first_image: '0',
            next_image: '1',
            prev_image: '2',
        }
    }
}

impl KeyBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the action that corresponds to a key press, if any.
    pub fn action_for_key(&self, key: Key) -> Option<KeyAction> {
        let c = match key {
            Key::Escape => return Some(KeyAction::Quit),
            Key::Char(c) => c,
        };
        if c == self.add_region {
            Some(KeyAction::AddRegion)
        } else if c == self.delete_last_region {
            Some(KeyAction::DeleteLastRegion)
        } else if c == self.rename_region {
            Some(KeyAction::RenameRegion)
        } else if c == self.first_image {
            Some(KeyAction::FirstImage)
        } else if c == self.prev_image {
            Some(KeyAction::PrevImage)
        } else if c == self.next_image {
            Some(KeyAction::NextImage)
        } else {
            None
        }
    }

    /// One line per binding, for the help text.
    pub fn describe(&self) -> Vec<String> {
        vec![
            format!("{}    add a region", self.add_region),
            format!("{}    delete the last region", self.delete_last_region),
            format!("{}    rename a region", self.rename_region),
            format!("{}    go to the first image", self.first_image),
            format!("{}    proceed to the next image", self.next_image),
            format!("{}    go back to the previous image", self.prev_image),
            "Esc  quit".to_string(),
        ]
    }
}
