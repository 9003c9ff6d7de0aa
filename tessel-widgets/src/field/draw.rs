use std::time::Instant;

use super::Field;
use tessel_core::kurbo::{Point, Rect, Size};
use tessel_core::peniko::{Brush, Color};
use tessel_core::text::TextLine;
use tessel_core::vgi::{draw_border, fill_rect, push_clip, Graphics};
use tessel_core::widget::{constrain_for_hint, grow_to_integer, max_size, Sizes};

impl Field {
    /// Default sizing: the laid-out text at the hint width, at least the minimum text width
    /// and one line tall, plus room for the caret and the border.
    pub fn default_sizes(&mut self, hint: Size) -> Sizes {
        let insets = self.border().insets();
        let minimum_text_width = self.theme.minimum_text_width;
        let font_height = self.font_line_height();
        let options = self.layout_options();
        let lines = self.lines.get_or_build(
            &*self.shaper,
            &self.theme.font,
            &self.runes,
            hint.width - (2.0 + insets.width()),
            &options,
        );
        let mut pref = Size::ZERO;
        for line in lines.iter() {
            pref.width = pref.width.max(line.text.width());
            pref.height += line.text.height();
        }
        pref.width = pref.width.max(minimum_text_width) + 2.0;
        pref.height = pref.height.max(font_height);
        let min_width = minimum_text_width + 2.0 + insets.width();
        pref = grow_to_integer(Size::new(
            pref.width + insets.width(),
            pref.height + insets.height(),
        ));
        let mut hint = hint;
        if hint.width >= 1.0 && hint.width < min_width {
            hint.width = min_width;
        }
        pref = constrain_for_hint(pref, hint);
        if hint.width > 0.0 && pref.width < hint.width {
            pref.width = hint.width;
        }
        Sizes {
            min: Size::new(min_width, pref.height),
            pref,
            max: max_size(pref),
        }
    }

    /// Default drawing, in local coordinates.
    pub fn default_draw(&mut self, graphics: &mut dyn Graphics, _dirty: Rect) {
        let (bg, fg) = if self.invalid {
            (self.theme.error_ink, self.theme.on_error_ink)
        } else if self.enabled {
            (self.theme.editable_ink, self.theme.on_editable_ink)
        } else {
            (self.theme.background_ink, self.theme.on_background_ink)
        };
        let bounds = self.frame.size().to_rect();
        fill_rect(graphics, bounds, bg);
        let rect = self.content_rect();
        push_clip(graphics, rect);
        self.prepare_lines(rect.width() - 2.0);
        let wants_blink = self.draw_text(graphics, rect, fg);
        graphics.pop_layer();
        draw_border(graphics, bounds, self.border());
        if wants_blink {
            self.schedule_blink(Instant::now());
        }
    }

    /// When the caret next blinks, if a blink is scheduled.
    pub fn blink_deadline(&self) -> Option<Instant> {
        self.next_blink
    }

    /// Run a scheduled blink that is due at `now`. The caret stays visible for one blink
    /// period after each selection change. Re-arms itself while focused and enabled.
    pub fn tick(&mut self, now: Instant) {
        let Some(deadline) = self.next_blink else {
            return;
        };
        if now < deadline {
            return;
        }
        self.next_blink = None;
        if now > self.force_show_until {
            self.show_cursor = !self.show_cursor;
            self.mark_for_redraw();
        }
        self.schedule_blink(now);
    }

    /// True if the caret is in its visible blink phase.
    pub fn caret_shown(&self) -> bool {
        self.show_cursor
    }

    fn schedule_blink(&mut self, now: Instant) {
        if self.next_blink.is_none() && self.enabled && self.focused {
            self.next_blink = Some(now + self.theme.blink_rate);
        }
    }

    /// Draw the lines, selection and caret. Returns true if a caret was due.
    fn draw_text(&self, graphics: &mut dyn Graphics, rect: Rect, fg: Color) -> bool {
        let shaper = &*self.shaper;
        let font = &self.theme.font;
        let font_height = self.font_line_height();
        let ink = Brush::Solid(if self.enabled { fg } else { disabled_ink(fg) });
        let caret_wanted = !self.has_selection_range() && self.enabled && self.focused;
        let mut wants_blink = false;
        let mut top = rect.y0 + self.scroll_offset.y;

        if self.runes.is_empty() {
            if !self.watermark.is_empty() {
                let text = TextLine::from_str(shaper, font, &self.watermark);
                let left = self.text_left_for_width(text.width(), rect);
                let brush = Brush::Solid(ink_color(&ink).multiply_alpha(0.3));
                text.draw(shaper, graphics, font, Point::new(left, top + text.baseline()), &brush);
            }
            if caret_wanted {
                if self.show_cursor {
                    let x = self.text_left_for_width(0.0, rect) + self.scroll_offset.x - 0.5;
                    fill_rect(graphics, Rect::new(x, rect.y0, x + 1.0, rect.y0 + font_height), fg);
                }
                wants_blink = true;
            }
            return wants_blink;
        }

        let selection = self.selection;
        let highlight = self.enabled && self.focused && selection.has_range();
        let mut start = 0;
        for line in self.lines.lines() {
            let left = self.text_left_for_width(line.text.width(), rect) + self.scroll_offset.x;
            let baseline = top + line.text.baseline();
            let height = line.text.height().max(font_height);
            let end = start + line.span();
            let shown_end = end - usize::from(line.ends_with_line_feed);
            if highlight && selection.start < end && selection.end > start {
                let sel_start = selection.start.max(start);
                let sel_end = selection.end.min(end);
                let mut x = left;
                if sel_start > start {
                    let before = line.text.slice(0..sel_start - start);
                    before.draw(shaper, graphics, font, Point::new(x, baseline), &ink);
                    x += before.width();
                }
                let selected = line.text.slice(sel_start - start..sel_end.min(shown_end) - start);
                let right = x + selected.width();
                fill_rect(
                    graphics,
                    Rect::new(x, top, right, top + height),
                    self.theme.selection_ink,
                );
                selected.draw(
                    shaper,
                    graphics,
                    font,
                    Point::new(x, baseline),
                    &Brush::Solid(self.theme.on_selection_ink),
                );
                if sel_end < end {
                    let after = line.text.slice(sel_end - start..shown_end - start);
                    after.draw(shaper, graphics, font, Point::new(right, baseline), &ink);
                }
            } else {
                line.text.draw(shaper, graphics, font, Point::new(left, baseline), &ink);
            }
            let caret = selection.end;
            if caret_wanted
                && caret >= start
                && (caret < end || (!self.multi_line && caret <= end))
            {
                if self.show_cursor {
                    let x = left + line.text.position_for_rune_index(caret - start) - 0.5;
                    fill_rect(graphics, Rect::new(x, top, x + 1.0, top + height), fg);
                }
                wants_blink = true;
            }
            top += height;
            start = end;
        }
        wants_blink
    }
}

fn ink_color(brush: &Brush) -> Color {
    match brush {
        Brush::Solid(color) => *color,
        _ => Color::BLACK,
    }
}

/// Gray out a color for disabled text.
fn disabled_ink(color: Color) -> Color {
    let rgba = color.to_rgba8();
    let luma = 0.299 * f32::from(rgba.r) + 0.587 * f32::from(rgba.g) + 0.114 * f32::from(rgba.b);
    let gray = luma.round().clamp(0.0, 255.0) as u8;
    Color::from_rgba8(gray, gray, gray, rgba.a).multiply_alpha(0.3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_ink_is_faded_gray() {
        let ink = disabled_ink(Color::from_rgb8(255, 0, 0)).to_rgba8();
        assert_eq!(ink.r, ink.g);
        assert_eq!(ink.g, ink.b);
        assert!(ink.a < 255);
    }
}
