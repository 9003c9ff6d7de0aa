use super::Field;
use tessel_core::input::ModifiersExt;
use tessel_core::kurbo::Point;
use tessel_core::text_input::find_word_at;
use tessel_core::undo::next_undo_id;
use tessel_core::update::Update;
use tessel_core::window::{CursorIcon, ModifiersState, MouseButton};

impl Field {
    /// Default focus-gained handling: swap to the focused border, select everything unless
    /// told not to, and show the caret.
    pub fn default_focus_gained(&mut self) {
        self.focused = true;
        if !self.no_select_all_on_focus && !self.has_selection_range() {
            self.select_all();
        }
        self.show_cursor = true;
        self.scroll_selection_into_view();
        self.mark_for_redraw();
    }

    /// Default focus-lost handling: close the current undo group and swap to the unfocused
    /// border.
    pub fn default_focus_lost(&mut self) {
        self.focused = false;
        self.undo_id = next_undo_id();
        self.next_blink = None;
        self.mark_for_redraw();
    }

    /// Default mouse-down handling.
    ///
    /// A single click places the caret, or extends from the anchor with shift. A double click
    /// selects the word under the pointer and makes the following drag extend by words. A
    /// triple click selects everything.
    pub fn default_mouse_down(
        &mut self,
        pos: Point,
        button: MouseButton,
        click_count: u32,
        mods: ModifiersState,
    ) -> bool {
        self.undo_id = next_undo_id();
        self.update.insert(Update::FOCUS);
        if button != MouseButton::Left {
            return false;
        }
        self.extend_by_word = false;
        match click_count {
            2 => {
                let index = self.to_selection_index(pos);
                let (start, end) = find_word_at(&self.runes, index as isize);
                self.set_selection(start, end);
                self.extend_by_word = true;
            }
            3 => self.select_all(),
            _ => {
                let old_anchor = self.selection.anchor as isize;
                let anchor = self.to_selection_index(pos) as isize;
                let (start, end) = if mods.shift_down() {
                    (old_anchor.min(anchor), old_anchor.max(anchor))
                } else {
                    (anchor, anchor)
                };
                self.select(start, end, anchor);
            }
        }
        true
    }

    /// Default drag handling: move the free end of the selection to the pointer, keeping the
    /// anchor fixed. After a double click both ends snap outward to word boundaries and the
    /// original word stays selected.
    pub fn default_mouse_drag(
        &mut self,
        pos: Point,
        _button: MouseButton,
        _mods: ModifiersState,
    ) -> bool {
        let anchor = self.selection.anchor as isize;
        let mut pos = self.to_selection_index(pos) as isize;
        let (start, end) = if self.extend_by_word {
            let (word_start, word_end) = find_word_at(&self.runes, anchor);
            let (word_start, word_end) = (word_start as isize, word_end as isize);
            let dir = if pos > word_start { -1 } else { 1 };
            loop {
                let (start, end) = find_word_at(&self.runes, pos);
                let (start, end) = (start as isize, end as isize);
                if start != end {
                    break (start.min(word_start), end.max(word_end));
                }
                pos += dir;
                if (dir > 0 && pos >= word_start) || (dir < 0 && pos <= word_end) {
                    break (word_start, word_end);
                }
            }
        } else if pos > anchor {
            (anchor, pos)
        } else {
            (pos, anchor)
        };
        self.select(start, end, anchor);
        true
    }

    /// Default cursor: a text beam while enabled.
    pub fn default_update_cursor(&mut self, _pos: Point) -> CursorIcon {
        if self.enabled {
            CursorIcon::Text
        } else {
            CursorIcon::Default
        }
    }
}
