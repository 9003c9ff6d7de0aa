use winit::keyboard::ModifiersState;

/// Named modifier queries used by the editing widgets.
pub trait ModifiersExt {
    /// Shift is held.
    fn shift_down(&self) -> bool;

    /// The option key (Alt outside macOS) is held. Used for word-wise movement.
    fn option_down(&self) -> bool;

    /// The platform menu command modifier is held: Command on macOS, Control elsewhere.
    fn menu_cmd_down(&self) -> bool;
}

impl ModifiersExt for ModifiersState {
    fn shift_down(&self) -> bool {
        self.shift_key()
    }

    fn option_down(&self) -> bool {
        self.alt_key()
    }

    fn menu_cmd_down(&self) -> bool {
        if cfg!(target_os = "macos") {
            self.super_key()
        } else {
            self.control_key()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_queries() {
        let mods = ModifiersState::SHIFT | ModifiersState::ALT;
        assert!(mods.shift_down());
        assert!(mods.option_down());
        assert!(!mods.menu_cmd_down());

        let cmd = if cfg!(target_os = "macos") {
            ModifiersState::SUPER
        } else {
            ModifiersState::CONTROL
        };
        assert!(cmd.menu_cmd_down());
    }
}
