#![warn(missing_docs)]

//! Core library for tessel => See `tessel` crate.
//!
//! Contains the widget seam, text layout, selection primitives and the graphics interface
//! the widgets draw through.

/// Contains useful types for interacting with winit.
pub mod window {
    pub use winit::keyboard::{KeyCode, ModifiersState};
    pub use winit::window::CursorIcon;
    pub use winit::event::MouseButton;
}

/// Edit command ids and command routing.
pub mod commands;

/// Modifier helpers for keyboard and mouse input.
pub mod input;

/// Deferred release of UI-thread-affine resources.
pub mod release;

/// Text shaping, line breaking and the line cache.
pub mod text;

/// Rune buffer helpers: selections, word scanning and sanitizing.
pub mod text_input;

/// Undo group ids.
pub mod undo;

/// Redraw/relayout/focus requests.
pub mod update;

/// Contains the vector graphics interface abstraction.
pub mod vgi;

/// Contains the core widget functionalities.
pub mod widget;

pub use vello;
pub use vello::kurbo;
pub use vello::peniko;
