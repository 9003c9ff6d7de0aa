use bitflags::bitflags;

bitflags! {
    /// Requests a widget raises for its host, collected with
    /// [Widget::take_update](crate::widget::Widget::take_update).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Update: u8 {
        /// The widget needs to be redrawn.
        const DRAW = 0b0001;
        /// The widget's preferred size may have changed.
        const LAYOUT = 0b0010;
        /// The widget wants keyboard focus.
        const FOCUS = 0b0100;
    }
}
