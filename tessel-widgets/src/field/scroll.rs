use super::Field;
use tessel_core::kurbo::{Point, Rect, Vec2};
use tessel_core::text::LineMap;
use tessel_theme::roles::TextAlignment;

impl Field {
    /// The area inside the border, in local coordinates.
    pub fn content_rect(&self) -> Rect {
        let insets = self.border().insets();
        let size = self.frame.size();
        Rect::new(
            insets.left,
            insets.top,
            (size.width - insets.right).max(insets.left),
            (size.height - insets.bottom).max(insets.top),
        )
    }

    /// The current scroll offset of the content.
    pub fn scroll_offset(&self) -> Vec2 {
        self.scroll_offset
    }

    /// Scroll the content. Ignored unless auto-scrolling is on.
    pub fn set_scroll_offset(&mut self, offset: Vec2) {
        if self.auto_scroll && self.scroll_offset != offset {
            self.scroll_offset = offset;
            self.mark_for_redraw();
        }
    }

    /// Scroll so the moving end of the selection is visible, then ask the enclosing scroller
    /// to show it too.
    pub fn scroll_selection_into_view(&mut self) {
        self.auto_scroll_to_selection();
        let pt = self.from_selection_index(self.selection.active_end());
        let height = self.line_height_at(pt.y);
        if let Some(callback) = self.on_scroll_rect.as_mut() {
            callback(Rect::new(pt.x - 1.0, pt.y, pt.x + 2.0, pt.y + height));
        }
    }

    /// The rune index nearest to `pos`.
    pub fn to_selection_index(&mut self, pos: Point) -> usize {
        if self.runes.is_empty() {
            return 0;
        }
        self.prepare_lines_for_current_width();
        let (index, start) = self.line_index_for_y(pos.y);
        let rect = self.content_rect();
        let Some(line) = self.lines.lines().get(index) else {
            return 0;
        };
        let left = self.text_left_for_width(line.text.width(), rect) + self.scroll_offset.x;
        let mut offset = line.text.rune_index_for_position(pos.x - left);
        // A wrapped line shares its last position with the start of the next one.
        if self.multi_line && !line.ends_with_line_feed && offset == line.text.len() {
            offset = offset.saturating_sub(1);
        }
        start + offset
    }

    /// The top-left of the caret position for rune `index`. Indexes past the end map to the
    /// end of the text.
    pub fn from_selection_index(&mut self, index: usize) -> Point {
        self.prepare_lines_for_current_width();
        let index = index.min(self.runes.len());
        let rect = self.content_rect();
        let font_height = self.font_line_height();
        let mut y = rect.y0 + self.scroll_offset.y;
        let mut pos = 0;
        let mut last_height = 0.0;
        for line in self.lines.lines() {
            let span = line.span();
            // In multi-line text a line boundary belongs to the following line.
            let owns = if self.multi_line {
                index - pos < span
            } else {
                index - pos <= span
            };
            if owns {
                let x = self.text_left_for_width(line.text.width(), rect)
                    + line.text.position_for_rune_index(index - pos)
                    + self.scroll_offset.x;
                return Point::new(x, y);
            }
            last_height = line.text.height().max(font_height);
            y += last_height;
            pos += span;
        }
        Point::new(
            self.text_left_for_width(0.0, rect) + self.scroll_offset.x,
            y - last_height,
        )
    }

    /// Start of the display line holding the rune before `pos`.
    pub fn find_prev_line_break(&mut self, pos: isize) -> usize {
        self.prepare_lines_for_current_width();
        LineMap::new(self.lines.lines(), self.runes.len(), self.multi_line).prev_line_break(pos)
    }

    /// End of the display line holding the rune after `pos`.
    pub fn find_next_line_break(&mut self, pos: isize) -> usize {
        self.prepare_lines_for_current_width();
        LineMap::new(self.lines.lines(), self.runes.len(), self.multi_line).next_line_break(pos)
    }

    pub(crate) fn font_line_height(&self) -> f64 {
        self.shaper.line_height(&self.theme.font)
    }

    pub(crate) fn prepare_lines(&mut self, width: f64) {
        let options = self.layout_options();
        self.lines
            .prepare(&*self.shaper, &self.theme.font, &self.runes, width, &options);
    }

    pub(crate) fn prepare_lines_for_current_width(&mut self) {
        self.prepare_lines(self.content_rect().width() - 2.0);
    }

    pub(crate) fn text_left_for_width(&self, width: f64, bounds: Rect) -> f64 {
        // Start and end keep one unit free for the caret.
        match self.theme.h_align {
            TextAlignment::Middle => bounds.x0 + (bounds.width() - width) / 2.0,
            TextAlignment::End => bounds.x0 + bounds.width() - width - 1.0,
            TextAlignment::Start => bounds.x0 + 1.0,
        }
    }

    pub(crate) fn line_height_at(&mut self, y: f64) -> f64 {
        self.prepare_lines_for_current_width();
        let font_height = self.font_line_height();
        if self.lines.lines().is_empty() {
            return font_height;
        }
        let (index, _) = self.line_index_for_y(y);
        self.lines
            .lines()
            .get(index)
            .map_or(font_height, |line| line.text.height().max(font_height))
    }

    fn line_index_for_y(&mut self, y: f64) -> (usize, usize) {
        let y = y - self.content_rect().y0;
        if y < 0.0 {
            return (0, 0);
        }
        self.prepare_lines_for_current_width();
        let font_height = self.font_line_height();
        let lines = self.lines.lines();
        let mut offset_y = self.scroll_offset.y;
        let mut start = 0;
        let mut span = 0;
        for (i, line) in lines.iter().enumerate() {
            let height = line.text.height().max(font_height);
            if y >= offset_y && y <= offset_y + height {
                return (i, start);
            }
            offset_y += height;
            span = line.span();
            start += span;
        }
        (lines.len().saturating_sub(1), start - span)
    }

    fn auto_scroll_to_selection(&mut self) {
        if !self.auto_scroll {
            return;
        }
        let rect = self.content_rect();
        let original = self.scroll_offset;
        let active = self.selection.active_end();
        let len = self.runes.len();
        if rect.width() > 0.0 {
            let x = self.from_selection_index(active).x;
            if x < rect.x0 {
                self.scroll_offset.x = 0.0;
                self.scroll_offset.x = rect.x0 - self.from_selection_index(active).x;
            } else if x >= rect.x1 {
                self.scroll_offset.x = 0.0;
                self.scroll_offset.x = rect.x1 - 1.0 - self.from_selection_index(active).x;
            }
            let wanted = self.scroll_offset.x;
            self.scroll_offset.x = 0.0;
            let min = (rect.x1 - 1.0 - self.from_selection_index(len).x).min(0.0);
            let max = (rect.x0 - self.from_selection_index(0).x).max(0.0);
            self.scroll_offset.x = clamp_offset(wanted, min, max);
        }
        if self.multi_line && rect.height() > 0.0 {
            let top = self.from_selection_index(active).y;
            if top < rect.y0 {
                self.scroll_offset.y = 0.0;
                self.scroll_offset.y = rect.y0 - self.from_selection_index(active).y;
            } else if top + self.line_height_at(top) >= rect.y1 {
                self.scroll_offset.y = 0.0;
                let top = self.from_selection_index(active).y;
                self.scroll_offset.y = rect.y1 - (top + self.line_height_at(top));
            }
            let wanted = self.scroll_offset.y;
            self.scroll_offset.y = 0.0;
            let top = self.from_selection_index(len).y;
            let min = (rect.y1 - (top + self.line_height_at(top))).min(0.0);
            let top = self.from_selection_index(0).y;
            let max = (rect.y0 - (top + self.line_height_at(top))).max(0.0);
            self.scroll_offset.y = clamp_offset(wanted, min, max);
        }
        if original != self.scroll_offset {
            self.mark_for_redraw();
        }
    }
}

fn clamp_offset(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}
