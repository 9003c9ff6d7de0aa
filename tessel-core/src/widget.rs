use crate::update::Update;
use crate::vgi::Graphics;
use tessel_theme::id::WidgetId;
use vello::kurbo::{Point, Rect, Size};
use winit::event::MouseButton;
use winit::keyboard::{KeyCode, ModifiersState};
use winit::window::CursorIcon;

/// Size constraints reported by a widget.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sizes {
    /// Smallest usable size.
    pub min: Size,
    /// Preferred size.
    pub pref: Size,
    /// Largest useful size.
    pub max: Size,
}

/// Largest size a widget reports unless it asks for more.
pub const DEFAULT_MAX_SIZE: f64 = 10000.0;

/// Grow `size` to at least [DEFAULT_MAX_SIZE] in each dimension.
pub fn max_size(size: Size) -> Size {
    Size::new(
        size.width.max(DEFAULT_MAX_SIZE),
        size.height.max(DEFAULT_MAX_SIZE),
    )
}

/// Round each dimension up to a whole number.
pub fn grow_to_integer(size: Size) -> Size {
    Size::new(size.width.ceil(), size.height.ceil())
}

/// Clamp `size` to a layout hint. Hint dimensions below 1 mean "no constraint".
pub fn constrain_for_hint(size: Size, hint: Size) -> Size {
    let mut size = size;
    if hint.width >= 1.0 && size.width > hint.width {
        size.width = hint.width;
    }
    if hint.height >= 1.0 && size.height > hint.height {
        size.height = hint.height;
    }
    size
}

/// The base trait for widgets.
///
/// Every input hook has a default that ignores the event. Coordinates are local to the
/// widget: `(0, 0)` is the top-left of its frame.
pub trait Widget {
    /// Return the widget id.
    fn widget_id(&self) -> WidgetId;

    /// The widget frame, in its parent's coordinates.
    fn frame(&self) -> Rect;

    /// Move or resize the widget.
    fn set_frame(&mut self, frame: Rect);

    /// Size constraints for the given hint. A zero hint dimension means unconstrained.
    fn sizes(&mut self, hint: Size) -> Sizes;

    /// Draw the widget. `dirty` is the area that needs repainting, in local coordinates.
    fn draw(&mut self, graphics: &mut dyn Graphics, dirty: Rect);

    /// Called when the widget gains keyboard focus.
    fn focus_gained(&mut self) {}

    /// Called when the widget loses keyboard focus.
    fn focus_lost(&mut self) {}

    /// A mouse button went down. Returns true if consumed.
    fn mouse_down(
        &mut self,
        _where: Point,
        _button: MouseButton,
        _click_count: u32,
        _mods: ModifiersState,
    ) -> bool {
        false
    }

    /// The mouse moved with a button held. Returns true if consumed.
    fn mouse_drag(&mut self, _where: Point, _button: MouseButton, _mods: ModifiersState) -> bool {
        false
    }

    /// A key went down. Returns true if consumed; false lets the event propagate.
    fn key_down(&mut self, _key: KeyCode, _mods: ModifiersState, _repeat: bool) -> bool {
        false
    }

    /// A character was typed. Returns true if consumed.
    fn rune_typed(&mut self, _ch: char) -> bool {
        false
    }

    /// The cursor to show at `where`.
    fn update_cursor(&mut self, _where: Point) -> CursorIcon {
        CursorIcon::Default
    }

    /// Take and clear the requests raised since the last call.
    fn take_update(&mut self) -> Update {
        Update::empty()
    }
}

/// A boxed widget.
pub type BoxedWidget = Box<dyn Widget>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_helpers() {
        let size = Size::new(10.2, 20.7);
        assert_eq!(grow_to_integer(size), Size::new(11.0, 21.0));
        assert_eq!(
            constrain_for_hint(size, Size::new(8.0, 0.0)),
            Size::new(8.0, 20.7)
        );
        assert_eq!(max_size(size), Size::new(10000.0, 10000.0));
    }
}
