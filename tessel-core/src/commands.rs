//! Edit command ids shared by key bindings and menus.

use std::fmt;

/// Standard edit commands a widget may handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditCommand {
    /// Move the selection to the clipboard.
    Cut,
    /// Copy the selection to the clipboard.
    Copy,
    /// Replace the selection with the clipboard text.
    Paste,
    /// Remove the selection, or the rune before the caret.
    Delete,
    /// Select everything.
    SelectAll,
}

impl EditCommand {
    /// Every edit command, in menu order.
    pub const ALL: [EditCommand; 5] = [
        EditCommand::Cut,
        EditCommand::Copy,
        EditCommand::Paste,
        EditCommand::Delete,
        EditCommand::SelectAll,
    ];

    /// Convert to u32 for command routing
    pub fn to_u32(&self) -> u32 {
        match self {
            EditCommand::Cut => 0x0102,
            EditCommand::Copy => 0x0103,
            EditCommand::Paste => 0x0104,
            EditCommand::Delete => 0x0108,
            EditCommand::SelectAll => 0x0106,
        }
    }

    /// Try to convert from u32 back to an EditCommand
    pub fn from_u32(id: u32) -> Option<Self> {
        match id {
            0x0102 => Some(EditCommand::Cut),
            0x0103 => Some(EditCommand::Copy),
            0x0104 => Some(EditCommand::Paste),
            0x0108 => Some(EditCommand::Delete),
            0x0106 => Some(EditCommand::SelectAll),
            _ => None,
        }
    }
}

impl fmt::Display for EditCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditCommand::Cut => write!(f, "Cut"),
            EditCommand::Copy => write!(f, "Copy"),
            EditCommand::Paste => write!(f, "Paste"),
            EditCommand::Delete => write!(f, "Delete"),
            EditCommand::SelectAll => write!(f, "Select All"),
        }
    }
}

/// Something that can be asked to perform edit commands, e.g. by a menu.
pub trait CommandTarget {
    /// Whether `command` is currently applicable.
    fn can_perform(&mut self, command: EditCommand) -> bool;

    /// Perform `command`. Does nothing when it is not applicable.
    fn perform(&mut self, command: EditCommand);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip() {
        for command in EditCommand::ALL {
            assert_eq!(EditCommand::from_u32(command.to_u32()), Some(command));
        }
        assert_eq!(EditCommand::from_u32(0x0001), None);
        assert_eq!(EditCommand::SelectAll.to_string(), "Select All");
    }
}
