use super::Field;
use tessel_core::input::ModifiersExt;
use tessel_core::text_input::{find_word_at, scan_left_to_word_part, scan_right_to_word_part};
use tessel_core::undo::next_undo_id;
use tessel_core::window::{KeyCode, ModifiersState};

impl Field {
    /// Default key handling. Returns false for keys the field leaves to its container, such
    /// as Tab, Escape, Return in a single-line field and any menu-command chord.
    pub fn default_key_down(&mut self, key: KeyCode, mods: ModifiersState, _repeat: bool) -> bool {
        let extend = mods.shift_down();
        if mods.menu_cmd_down() {
            match key {
                KeyCode::ArrowRight => self.handle_end(self.multi_line, extend),
                KeyCode::ArrowDown => self.handle_end(false, extend),
                KeyCode::ArrowLeft => self.handle_home(self.multi_line, extend),
                KeyCode::ArrowUp => self.handle_home(false, extend),
                _ => {}
            }
            return false;
        }
        let by_word = mods.option_down();
        match key {
            KeyCode::Backspace => self.delete(),
            KeyCode::Delete => self.delete_forward(),
            KeyCode::ArrowLeft => self.handle_arrow_left(extend, by_word),
            KeyCode::ArrowRight => self.handle_arrow_right(extend, by_word),
            KeyCode::End => self.handle_end(self.multi_line, extend),
            KeyCode::PageDown => self.handle_end(false, extend),
            KeyCode::Home => self.handle_home(self.multi_line, extend),
            KeyCode::PageUp => self.handle_home(false, extend),
            KeyCode::ArrowDown => {
                if self.multi_line {
                    self.handle_arrow_down(extend, by_word);
                } else {
                    self.handle_end(false, extend);
                }
            }
            KeyCode::ArrowUp => {
                if self.multi_line {
                    self.handle_arrow_up(extend, by_word);
                } else {
                    self.handle_home(false, extend);
                }
            }
            KeyCode::Tab | KeyCode::Escape => return false,
            KeyCode::Enter | KeyCode::NumpadEnter => {
                self.undo_id = next_undo_id();
                if !self.multi_line {
                    return false;
                }
                self.default_rune_typed('\n');
            }
            _ => {}
        }
        true
    }

    /// Default typed-rune handling: replace the selection with `ch`. Control characters are
    /// refused, except a line feed in a multi-line field.
    pub fn default_rune_typed(&mut self, ch: char) -> bool {
        if ch.is_control() && (!self.multi_line || ch != '\n') {
            return false;
        }
        let before = self.get_field_state();
        let start = self.selection.start;
        self.runes.splice(self.selection.range(), [ch]);
        self.lines.invalidate();
        self.set_selection_to(start + 1);
        self.notify_of_modification(before);
        true
    }

    fn delete_forward(&mut self) {
        if self.has_selection_range() {
            self.delete();
        } else if self.selection.start < self.runes.len() {
            let before = self.get_field_state();
            self.runes.remove(self.selection.start);
            self.lines.invalidate();
            self.notify_of_modification(before);
        }
        self.mark_for_redraw();
    }

    fn handle_home(&mut self, line_only: bool, extend: bool) {
        self.undo_id = next_undo_id();
        let (start, end) = (self.selection.start, self.selection.end as isize);
        if line_only {
            let from = if start == 0 || self.runes[start - 1] == '\n' {
                start as isize + 1
            } else {
                start as isize
            };
            let line_start = self.find_prev_line_break(from) as isize;
            if extend {
                self.select(line_start, end, end);
            } else {
                self.select_to(line_start);
            }
        } else if extend {
            self.select(0, end, end);
        } else {
            self.set_selection_to_start();
        }
    }

    fn handle_end(&mut self, line_only: bool, extend: bool) {
        self.undo_id = next_undo_id();
        let (start, end) = (self.selection.start, self.selection.end);
        if line_only {
            let from = if end == self.runes.len() || self.runes[end] == '\n' {
                end as isize - 1
            } else {
                end as isize
            };
            let line_end = self.find_next_line_break(from) as isize;
            if extend {
                self.select(start as isize, line_end, start as isize);
            } else {
                self.select_to(line_end);
            }
        } else if extend {
            self.set_selection(start, self.runes.len());
        } else {
            self.set_selection_to_end();
        }
    }

    fn word_start_left_of(&self, pos: isize) -> isize {
        let part = scan_left_to_word_part(&self.runes, pos);
        find_word_at(&self.runes, part as isize).0 as isize
    }

    fn word_end_right_of(&self, pos: isize) -> isize {
        let part = scan_right_to_word_part(&self.runes, pos);
        find_word_at(&self.runes, part as isize).1 as isize
    }

    fn handle_arrow_left(&mut self, extend: bool, by_word: bool) {
        self.undo_id = next_undo_id();
        let (start, end, anchor) = self.signed_selection();
        if self.has_selection_range() {
            if !extend {
                self.select_to(start);
            } else if start == anchor {
                let mut pos = end - 1;
                if by_word {
                    pos = self.word_start_left_of(pos).max(anchor).min(pos);
                }
                self.select(anchor, pos, anchor);
            } else {
                let mut pos = start - 1;
                if by_word {
                    pos = self.word_start_left_of(pos).min(pos);
                }
                self.select(pos, anchor, anchor);
            }
        } else {
            let mut pos = start - 1;
            if by_word {
                pos = self.word_start_left_of(pos).min(pos);
            }
            if extend {
                self.select(pos, start, end);
            } else {
                self.select_to(pos);
            }
        }
    }

    fn handle_arrow_right(&mut self, extend: bool, by_word: bool) {
        self.undo_id = next_undo_id();
        let (start, end, anchor) = self.signed_selection();
        if self.has_selection_range() {
            if !extend {
                self.select_to(end);
            } else if end == anchor {
                let mut pos = start + 1;
                if by_word {
                    pos = self.word_end_right_of(pos).min(anchor).max(pos);
                }
                self.select(pos, anchor, anchor);
            } else {
                let mut pos = end + 1;
                if by_word {
                    pos = self.word_end_right_of(pos).max(pos);
                }
                self.select(anchor, pos, anchor);
            }
        } else {
            let mut pos = end + 1;
            if by_word {
                pos = self.word_end_right_of(pos).max(pos);
            }
            if extend {
                self.select(start, pos, start);
            } else {
                self.select_to(pos);
            }
        }
    }

    fn handle_arrow_up(&mut self, extend: bool, by_word: bool) {
        self.undo_id = next_undo_id();
        let (start, end, anchor) = self.signed_selection();
        if self.has_selection_range() {
            if !extend {
                self.select_to(start);
            } else if start == anchor {
                let mut pos = self.index_one_line_up(end);
                if by_word {
                    pos = self.word_start_left_of(pos).max(anchor).min(pos);
                }
                self.select(anchor, pos, anchor);
            } else {
                let mut pos = self.index_one_line_up(start);
                if by_word {
                    pos = self.word_start_left_of(pos).min(pos);
                }
                self.select(pos, anchor, anchor);
            }
        } else {
            let mut pos = self.index_one_line_up(start);
            if by_word {
                pos = self.word_start_left_of(pos).min(pos);
            }
            if extend {
                self.select(pos, start, end);
            } else {
                self.select_to(pos);
            }
        }
    }

    fn handle_arrow_down(&mut self, extend: bool, by_word: bool) {
        self.undo_id = next_undo_id();
        let (start, end, anchor) = self.signed_selection();
        if self.has_selection_range() {
            if !extend {
                self.select_to(end);
            } else if end == anchor {
                let mut pos = self.index_one_line_down(start);
                if by_word {
                    pos = self.word_end_right_of(pos).min(anchor).max(pos);
                }
                self.select(pos, anchor, anchor);
            } else {
                let mut pos = self.index_one_line_down(end);
                if by_word {
                    pos = self.word_end_right_of(pos).max(pos);
                }
                self.select(anchor, pos, anchor);
            }
        } else {
            let mut pos = self.index_one_line_down(end);
            if by_word {
                pos = self.word_end_right_of(pos).max(pos);
            }
            if extend {
                self.select(start, pos, start);
            } else {
                self.select_to(pos);
            }
        }
    }

    /// The index under the point just above the caret position of `index`.
    fn index_one_line_up(&mut self, index: isize) -> isize {
        let mut pt = self.from_selection_index(index.max(0) as usize);
        pt.y -= 1.0;
        self.to_selection_index(pt) as isize
    }

    /// The index under the point just below the line holding the caret position of `index`.
    fn index_one_line_down(&mut self, index: isize) -> isize {
        let mut pt = self.from_selection_index(index.max(0) as usize);
        pt.y += 1.0 + self.line_height_at(pt.y);
        self.to_selection_index(pt) as isize
    }

    fn signed_selection(&self) -> (isize, isize, isize) {
        (
            self.selection.start as isize,
            self.selection.end as isize,
            self.selection.anchor as isize,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::Field;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tessel_core::kurbo::Rect;
    use tessel_core::text::FixedPitchShaper;
    use tessel_core::widget::Widget;
    use tessel_core::window::{KeyCode, ModifiersState};
    use tessel_services::MemoryClipboard;
    use tessel_theme::field::FieldTheme;

    fn multi(text: &str) -> Field {
        let mut field = Field::new_multi_line(
            FieldTheme::default(),
            Rc::new(FixedPitchShaper::default()),
            Rc::new(RefCell::new(MemoryClipboard::new())),
        );
        field.set_frame(Rect::new(0.0, 0.0, 208.0, 200.0));
        field.set_text(text);
        field
    }

    #[test]
    fn test_home_and_end_stay_on_line() {
        let mut field = multi("ab\ncd");
        field.set_selection_to(4);
        field.key_down_plain(KeyCode::Home);
        assert_eq!(field.selection(), (3, 3));
        field.key_down_plain(KeyCode::End);
        assert_eq!(field.selection(), (5, 5));
        field.set_selection_to(1);
        field.key_down_plain(KeyCode::End);
        assert_eq!(field.selection(), (2, 2));
        field.key_down_plain(KeyCode::Home);
        assert_eq!(field.selection(), (0, 0));
    }

    #[test]
    fn test_home_after_leading_line_feed() {
        let mut field = multi("\nab");
        field.set_selection_to(2);
        field.key_down_plain(KeyCode::Home);
        assert_eq!(field.selection(), (1, 1));
    }

    #[test]
    fn test_page_keys_go_to_buffer_ends() {
        let mut field = multi("ab\ncd");
        field.set_selection_to(4);
        field.key_down_plain(KeyCode::PageUp);
        assert_eq!(field.selection(), (0, 0));
        field.key_down_plain(KeyCode::PageDown);
        assert_eq!(field.selection(), (5, 5));
    }

    #[test]
    fn test_shift_left_extends_from_caret() {
        let mut field = multi("abcd");
        field.set_selection_to(3);
        assert!(field.default_key_down(KeyCode::ArrowLeft, ModifiersState::SHIFT, false));
        assert_eq!(field.selection_state().anchor, 3);
        assert_eq!(field.selection(), (2, 3));
        field.default_key_down(KeyCode::ArrowLeft, ModifiersState::SHIFT, false);
        assert_eq!(field.selection(), (1, 3));
        field.default_key_down(KeyCode::ArrowRight, ModifiersState::SHIFT, false);
        assert_eq!(field.selection(), (2, 3));
    }

    #[test]
    fn test_word_movement() {
        let mut field = multi("foo bar baz");
        field.set_selection_to(0);
        field.default_key_down(KeyCode::ArrowRight, ModifiersState::ALT, false);
        assert_eq!(field.selection(), (3, 3));
        field.default_key_down(KeyCode::ArrowRight, ModifiersState::ALT, false);
        assert_eq!(field.selection(), (7, 7));
        field.default_key_down(KeyCode::ArrowLeft, ModifiersState::ALT, false);
        assert_eq!(field.selection(), (4, 4));
    }

    #[test]
    fn test_vertical_arrows_keep_column() {
        let mut field = multi("abc\ndef\nghi");
        field.set_selection_to(1);
        field.key_down_plain(KeyCode::ArrowDown);
        assert_eq!(field.selection(), (5, 5));
        field.key_down_plain(KeyCode::ArrowDown);
        assert_eq!(field.selection(), (9, 9));
        field.key_down_plain(KeyCode::ArrowUp);
        assert_eq!(field.selection(), (5, 5));
    }

    #[test]
    fn test_unconsumed_keys() {
        let mut field = multi("ab");
        assert!(!field.key_down_plain(KeyCode::Tab));
        assert!(!field.key_down_plain(KeyCode::Escape));
        let before = field.current_undo_id();
        assert!(field.key_down_plain(KeyCode::Enter));
        assert!(field.current_undo_id() > before);
        assert_eq!(field.text(), "ab\n");
    }

    impl Field {
        fn key_down_plain(&mut self, key: KeyCode) -> bool {
            self.default_key_down(key, ModifiersState::empty(), false)
        }
    }
}
