use std::rc::Rc;

use tessel_core::kurbo::{Affine, BezPath, Point, Rect, Size, Stroke};
use tessel_core::peniko::Brush;
use tessel_core::text::{TextLine, TextShaper};
use tessel_core::vgi::{fill_rect, push_clip, Graphics};
use tessel_theme::dock::DockHeaderTheme;

/// Content that can live in a dock tab.
pub trait Dockable {
    /// Title shown in the tab.
    fn title(&self) -> String;

    /// Tooltip for the tab.
    fn tooltip(&self) -> String {
        String::new()
    }

    /// True if the content has unsaved changes. Shown as a prefix on the title.
    fn modified(&self) -> bool {
        false
    }

    /// True if the tab shows a close button.
    fn closable(&self) -> bool {
        false
    }
}

/// One tab of a dock header.
pub struct DockTab {
    dockable: Rc<dyn Dockable>,
    title: String,
    frame: Option<Rect>,
}

impl DockTab {
    /// Create a tab for `dockable`.
    pub fn new(dockable: Rc<dyn Dockable>) -> Self {
        let mut tab = Self {
            dockable,
            title: String::new(),
            frame: None,
        };
        tab.update_title();
        tab
    }

    /// The content of this tab.
    pub fn dockable(&self) -> &Rc<dyn Dockable> {
        &self.dockable
    }

    /// The displayed title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The tooltip of the content.
    pub fn tooltip(&self) -> String {
        self.dockable.tooltip()
    }

    /// Re-read the title and modified flag from the content.
    pub fn update_title(&mut self) {
        let title = self.dockable.title();
        self.title = if self.dockable.modified() {
            format!("* {title}")
        } else {
            title
        };
    }

    /// The frame from the last layout, `None` while hidden.
    pub fn frame(&self) -> Option<Rect> {
        self.frame
    }

    pub(crate) fn set_frame(&mut self, frame: Option<Rect>) {
        self.frame = frame;
    }

    /// True if the last layout hid this tab.
    pub fn is_hidden(&self) -> bool {
        self.frame.is_none()
    }

    /// Preferred size: the title plus room for the close button, inside the tab insets.
    pub fn preferred_size(&self, shaper: &dyn TextShaper, theme: &DockHeaderTheme) -> Size {
        let line_height = shaper.line_height(&theme.title_font);
        let mut width = shaper.measure(&theme.title_font, &self.title);
        if self.dockable.closable() {
            width += theme.tab_gap + line_height;
        }
        Size::new(
            width + theme.tab_insets.width(),
            line_height + theme.tab_insets.height(),
        )
    }

    /// Area of the close button within `frame`, if the tab has one.
    pub fn close_button_rect(&self, frame: Rect, theme: &DockHeaderTheme) -> Option<Rect> {
        if !self.dockable.closable() {
            return None;
        }
        let insets = theme.tab_insets;
        let side = frame.height() - insets.height();
        let x1 = frame.x1 - insets.right;
        Some(Rect::new(
            x1 - side,
            frame.y0 + insets.top,
            x1,
            frame.y0 + insets.top + side,
        ))
    }

    /// Draw into `frame`.
    pub fn draw(
        &self,
        graphics: &mut dyn Graphics,
        shaper: &dyn TextShaper,
        theme: &DockHeaderTheme,
        frame: Rect,
        current: bool,
    ) {
        if current {
            fill_rect(graphics, frame, theme.current_tab_ink);
        }
        let insets = theme.tab_insets;
        let line = TextLine::from_str(shaper, &theme.title_font, &self.title);
        let mut available = frame.width() - insets.width();
        let close = self.close_button_rect(frame, theme);
        if let Some(close) = close {
            available -= close.width() + theme.tab_gap;
        }
        let clipped = line.width() > available;
        if clipped {
            let x = frame.x0 + insets.left;
            push_clip(graphics, Rect::new(x, frame.y0, x + available.max(0.0), frame.y1));
        }
        line.draw(
            shaper,
            graphics,
            &theme.title_font,
            Point::new(frame.x0 + insets.left, frame.y0 + insets.top + line.baseline()),
            &Brush::Solid(theme.title_ink),
        );
        if clipped {
            graphics.pop_layer();
        }
        if let Some(close) = close {
            let close = close.inset(-close.width() / 4.0);
            let mut cross = BezPath::new();
            cross.move_to((close.x0, close.y0));
            cross.line_to((close.x1, close.y1));
            cross.move_to((close.x1, close.y0));
            cross.line_to((close.x0, close.y1));
            graphics.stroke(
                &Stroke::new(1.0),
                Affine::IDENTITY,
                &Brush::Solid(theme.title_ink),
                None,
                &cross,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessel_core::text::FixedPitchShaper;
    use tessel_core::vgi::recording::{DrawCall, RecordingGraphics};

    struct Page {
        modified: bool,
        closable: bool,
    }

    impl Dockable for Page {
        fn title(&self) -> String {
            "Page".to_string()
        }

        fn modified(&self) -> bool {
            self.modified
        }

        fn closable(&self) -> bool {
            self.closable
        }
    }

    fn tab(modified: bool, closable: bool) -> DockTab {
        DockTab::new(Rc::new(Page { modified, closable }))
    }

    #[test]
    fn test_title_marks_modified() {
        assert_eq!(tab(false, false).title(), "Page");
        assert_eq!(tab(true, false).title(), "* Page");
    }

    #[test]
    fn test_preferred_size() {
        let shaper = FixedPitchShaper::default();
        let theme = DockHeaderTheme::default();
        assert_eq!(tab(false, false).preferred_size(&shaper, &theme), Size::new(48.0, 20.0));
        // Close button: gap plus a square of the line height.
        assert_eq!(tab(false, true).preferred_size(&shaper, &theme), Size::new(68.0, 20.0));
    }

    #[test]
    fn test_close_button_rect() {
        let theme = DockHeaderTheme::default();
        let frame = Rect::new(0.0, 0.0, 68.0, 20.0);
        assert_eq!(tab(false, false).close_button_rect(frame, &theme), None);
        assert_eq!(
            tab(false, true).close_button_rect(frame, &theme),
            Some(Rect::new(48.0, 2.0, 64.0, 18.0))
        );
    }

    #[test]
    fn test_draw_current_tab() {
        let shaper = FixedPitchShaper::default();
        let theme = DockHeaderTheme::default();
        let mut graphics = RecordingGraphics::new();
        let frame = Rect::new(0.0, 0.0, 48.0, 20.0);
        tab(false, false).draw(&mut graphics, &shaper, &theme, frame, true);
        let fills: Vec<_> = graphics.fills().collect();
        assert_eq!(fills[0], (&Brush::Solid(theme.current_tab_ink), frame));
        // One glyph box per rune of "Page".
        assert_eq!(fills.len(), 5);
        assert!(!graphics
            .calls
            .iter()
            .any(|call| matches!(call, DrawCall::Stroke { .. })));
    }

    #[test]
    fn test_squeezed_title_is_clipped() {
        let shaper = FixedPitchShaper::default();
        let theme = DockHeaderTheme::default();
        let mut graphics = RecordingGraphics::new();
        tab(false, true).draw(&mut graphics, &shaper, &theme, Rect::new(0.0, 0.0, 50.0, 20.0), false);
        assert!(matches!(
            graphics.calls[0],
            DrawCall::PushLayer { bounds } if bounds == Rect::new(4.0, 0.0, 26.0, 20.0)
        ));
        assert!(matches!(graphics.calls[5], DrawCall::PopLayer));
        assert!(matches!(graphics.calls[6], DrawCall::Stroke { .. }));
    }
}
