//! Messages driving a review session.

use crate::geometry::PixelPoint;
use crate::keybindings::KeyAction;

/// Everything the event source can ask a [`ReviewSession`](crate::review::ReviewSession) to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Pointer pressed at a pixel of the current image
    PointerDown(PixelPoint),
    /// Pointer moved while the button is held
    PointerMove(PixelPoint),
    /// Pointer released
    PointerUp,
    /// Add a region with a random id
    AddRegion,
    /// Delete the region whose id sorts last
    DeleteLastRegion,
    DeleteRegion(String),
    RenameRegion { id: String, name: String },
    /// Make a region active without grabbing a vertex
    SelectRegion(String),
    FirstImage,
    PrevImage,
    NextImage,
    Quit,
}

impl Message {
    /// The message for a key action. Renaming needs extra input and has no
    /// direct message.
    pub fn from_action(action: KeyAction) -> Option<Self> {
        match action {
            KeyAction::AddRegion => Some(Message::AddRegion),
            KeyAction::DeleteLastRegion => Some(Message::DeleteLastRegion),
            KeyAction::RenameRegion => None,
            KeyAction::FirstImage => Some(Message::FirstImage),
            KeyAction::PrevImage => Some(Message::PrevImage),
            KeyAction::NextImage => Some(Message::NextImage),
            KeyAction::Quit => Some(Message::Quit),
        }
    }
}
