use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use tessel_core::commands::{CommandTarget, EditCommand};
use tessel_core::kurbo::{Point, Rect, Size, Vec2};
use tessel_core::text::{LayoutOptions, LineCache, TextShaper};
use tessel_core::text_input::{find_word_at, sanitize, FieldState, Selection};
use tessel_core::undo::{next_undo_id, UndoId};
use tessel_core::update::Update;
use tessel_core::vgi::Graphics;
use tessel_core::widget::{Sizes, Widget};
use tessel_core::window::{CursorIcon, KeyCode, ModifiersState, MouseButton};
use tessel_services::Clipboard;
use tessel_theme::border::Border;
use tessel_theme::field::FieldTheme;
use tessel_theme::id::WidgetId;

mod draw;
mod keys;
mod mouse;
mod scroll;

/// Called after every modification with the state before and after it.
pub type ModifiedCallback = Box<dyn FnMut(&FieldState, &FieldState)>;

/// Returns false if the text is not acceptable.
pub type ValidateCallback = Box<dyn FnMut(&str) -> bool>;

/// Asked to make a rectangle, in the field's local coordinates, visible.
pub type ScrollRectCallback = Box<dyn FnMut(Rect)>;

/// An editable text field, single or multi-line.
///
/// The field owns its text as a buffer of runes (`char`s); every index it takes or returns
/// counts runes. All geometry is local to the field's frame.
///
/// Each [Widget] hook is also available as a `default_*` method, so a wrapper can replace one
/// behavior and fall back to the field for the rest.
///
/// ### Theming
/// Colors, borders, blink rate, minimum width and alignment come from the [FieldTheme]
/// passed at construction.
pub struct Field {
    theme: FieldTheme,
    shaper: Rc<dyn TextShaper>,
    clipboard: Rc<RefCell<dyn Clipboard>>,
    frame: Rect,
    runes: Vec<char>,
    lines: LineCache,
    selection: Selection,
    scroll_offset: Vec2,
    undo_id: UndoId,
    obscurement: Option<char>,
    watermark: String,
    auto_scroll: bool,
    no_select_all_on_focus: bool,
    multi_line: bool,
    wrap: bool,
    enabled: bool,
    focused: bool,
    show_cursor: bool,
    next_blink: Option<Instant>,
    force_show_until: Instant,
    extend_by_word: bool,
    invalid: bool,
    on_modified: Option<ModifiedCallback>,
    on_validate: Option<ValidateCallback>,
    on_scroll_rect: Option<ScrollRectCallback>,
    update: Update,
}

impl Field {
    /// Create a single-line field.
    pub fn new(
        theme: FieldTheme,
        shaper: Rc<dyn TextShaper>,
        clipboard: Rc<RefCell<dyn Clipboard>>,
    ) -> Self {
        Self {
            theme,
            shaper,
            clipboard,
            frame: Rect::ZERO,
            runes: Vec::new(),
            lines: LineCache::new(),
            selection: Selection::default(),
            scroll_offset: Vec2::ZERO,
            undo_id: next_undo_id(),
            obscurement: None,
            watermark: String::new(),
            auto_scroll: true,
            no_select_all_on_focus: false,
            multi_line: false,
            wrap: false,
            enabled: true,
            focused: false,
            show_cursor: true,
            next_blink: None,
            force_show_until: Instant::now(),
            extend_by_word: false,
            invalid: false,
            on_modified: None,
            on_validate: None,
            on_scroll_rect: None,
            update: Update::empty(),
        }
    }

    /// Create a multi-line field that wraps its text.
    pub fn new_multi_line(
        theme: FieldTheme,
        shaper: Rc<dyn TextShaper>,
        clipboard: Rc<RefCell<dyn Clipboard>>,
    ) -> Self {
        let mut field = Self::new(theme, shaper, clipboard);
        field.multi_line = true;
        field.wrap = true;
        field
    }

    /// Set the text shown while the field is empty.
    pub fn with_watermark(mut self, watermark: impl Into<String>) -> Self {
        self.set_watermark(watermark);
        self
    }

    /// Display every rune as `mask`.
    pub fn with_obscurement(mut self, mask: char) -> Self {
        self.set_obscurement(Some(mask));
        self
    }

    /// Set the initial text.
    pub fn with_text(mut self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    /// The field theme.
    pub fn theme(&self) -> &FieldTheme {
        &self.theme
    }

    /// Replace the field theme.
    pub fn set_theme(&mut self, theme: FieldTheme) {
        self.theme = theme;
        self.lines.invalidate();
        self.update.insert(Update::LAYOUT | Update::DRAW);
    }

    /// The id of the current undo group. Edits sharing an id undo together.
    pub fn current_undo_id(&self) -> UndoId {
        self.undo_id
    }

    /// True for multi-line fields.
    pub fn allows_multiple_lines(&self) -> bool {
        self.multi_line
    }

    /// True if long lines are wrapped.
    pub fn wrap(&self) -> bool {
        self.wrap
    }

    /// Turn wrapping of long lines on or off.
    pub fn set_wrap(&mut self, wrap: bool) {
        if self.wrap != wrap {
            self.wrap = wrap;
            self.lines.invalidate();
            self.update.insert(Update::LAYOUT | Update::DRAW);
        }
    }

    /// The rune every displayed rune is replaced with, if any.
    pub fn obscurement(&self) -> Option<char> {
        self.obscurement
    }

    /// Mask the displayed text with `mask`, or show it as is with `None`. The text itself,
    /// the clipboard and paste always see the real runes.
    pub fn set_obscurement(&mut self, mask: Option<char>) {
        if self.obscurement != mask {
            self.obscurement = mask;
            self.lines.invalidate();
            self.mark_for_redraw();
        }
    }

    /// The text shown while the field is empty.
    pub fn watermark(&self) -> &str {
        &self.watermark
    }

    /// Set the text shown while the field is empty.
    pub fn set_watermark(&mut self, watermark: impl Into<String>) {
        self.watermark = watermark.into();
        self.mark_for_redraw();
    }

    /// True if the field scrolls its own content to keep the selection visible.
    pub fn auto_scroll(&self) -> bool {
        self.auto_scroll
    }

    /// Turn automatic scrolling on or off.
    pub fn set_auto_scroll(&mut self, auto_scroll: bool) {
        self.auto_scroll = auto_scroll;
    }

    /// True if gaining focus leaves the selection alone.
    pub fn no_select_all_on_focus(&self) -> bool {
        self.no_select_all_on_focus
    }

    /// Stop gaining focus from selecting all of the text.
    pub fn set_no_select_all_on_focus(&mut self, value: bool) {
        self.no_select_all_on_focus = value;
    }

    /// True if the field accepts input.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the field.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            self.enabled = enabled;
            self.mark_for_redraw();
        }
    }

    /// True while the field has keyboard focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// The border currently in effect.
    pub fn border(&self) -> &Border {
        if self.focused {
            &self.theme.focused_border
        } else {
            &self.theme.unfocused_border
        }
    }

    /// Set the callback run after each modification.
    pub fn set_modified_callback(&mut self, callback: impl FnMut(&FieldState, &FieldState) + 'static) {
        self.on_modified = Some(Box::new(callback));
    }

    /// Set the validation callback and validate the current text with it.
    pub fn set_validate_callback(&mut self, callback: impl FnMut(&str) -> bool + 'static) {
        self.on_validate = Some(Box::new(callback));
        self.validate();
    }

    /// Set the callback asked to bring a part of the field into view.
    pub fn set_scroll_rect_callback(&mut self, callback: impl FnMut(Rect) + 'static) {
        self.on_scroll_rect = Some(Box::new(callback));
    }

    /// Set the minimum text width to the widest of `candidates`, and at least 10.
    pub fn set_minimum_text_width_using(&mut self, candidates: &[&str]) {
        self.theme.minimum_text_width = 10.0;
        for one in candidates {
            let width = self.shaper.measure(&self.theme.font, one);
            if width > self.theme.minimum_text_width {
                self.theme.minimum_text_width = width;
            }
        }
        self.update.insert(Update::LAYOUT);
    }

    /// True if the content failed its last validation.
    pub fn invalid(&self) -> bool {
        self.invalid
    }

    /// Run the validation callback now.
    pub fn validate(&mut self) {
        let text = self.text();
        let invalid = match self.on_validate.as_mut() {
            Some(callback) => !callback(&text),
            None => false,
        };
        if invalid != self.invalid {
            self.invalid = invalid;
            self.mark_for_redraw();
        }
    }

    /// The content of the field.
    pub fn text(&self) -> String {
        self.runes.iter().collect()
    }

    /// The content of the field as runes.
    pub fn runes(&self) -> &[char] {
        &self.runes
    }

    /// Replace the content. The caret moves to the end. Nothing happens if the sanitized
    /// text equals the current content.
    pub fn set_text(&mut self, text: &str) {
        let runes = self.sanitize(text.chars());
        if runes != self.runes {
            let before = self.get_field_state();
            self.runes = runes;
            self.lines.invalidate();
            self.set_selection_to_end();
            self.notify_of_modification(before);
        }
    }

    /// The selected text.
    pub fn selected_text(&self) -> String {
        self.runes[self.selection.range()].iter().collect()
    }

    /// True if at least one rune is selected.
    pub fn has_selection_range(&self) -> bool {
        self.selection.has_range()
    }

    /// Number of selected runes.
    pub fn selection_count(&self) -> usize {
        self.selection.len()
    }

    /// The selection start and end.
    pub fn selection(&self) -> (usize, usize) {
        (self.selection.start, self.selection.end)
    }

    /// The full selection, anchor included.
    pub fn selection_state(&self) -> Selection {
        self.selection
    }

    /// Put the caret at the start of the text.
    pub fn set_selection_to_start(&mut self) {
        self.select(0, 0, 0);
    }

    /// Put the caret at the end of the text.
    pub fn set_selection_to_end(&mut self) {
        self.select(isize::MAX, isize::MAX, isize::MAX);
    }

    /// Put the caret at `pos`.
    pub fn set_selection_to(&mut self, pos: usize) {
        let pos = to_signed(pos);
        self.select(pos, pos, pos);
    }

    /// Select `start..end`, anchored at `start`. Values past the text are pulled back to its
    /// end, and an `end` before `start` gives a caret at `start`.
    pub fn set_selection(&mut self, start: usize, end: usize) {
        let (start, end) = (to_signed(start), to_signed(end));
        self.select(start, end, start);
    }

    /// The word around `pos`, or an empty range at `pos` if it is not inside a word.
    pub fn find_word_at(&self, pos: isize) -> (usize, usize) {
        find_word_at(&self.runes, pos)
    }

    /// Snapshot the text and selection.
    pub fn get_field_state(&self) -> FieldState {
        FieldState {
            text: self.text(),
            selection_start: self.selection.start,
            selection_end: self.selection.end,
            selection_anchor: self.selection.anchor,
        }
    }

    /// Restore a snapshot without running the modification callback.
    pub fn apply_field_state(&mut self, state: &FieldState) {
        let runes = self.sanitize(state.text.chars());
        if runes != self.runes {
            self.runes = runes;
            self.lines.invalidate();
            self.mark_for_redraw();
        }
        self.select(
            to_signed(state.selection_start),
            to_signed(state.selection_end),
            to_signed(state.selection_anchor),
        );
    }

    /// True if there is a selection to cut.
    pub fn can_cut(&self) -> bool {
        self.has_selection_range()
    }

    /// Move the selected text to the clipboard.
    pub fn cut(&mut self) {
        if self.has_selection_range() {
            self.clipboard.borrow_mut().set_text(&self.selected_text());
            self.delete();
        }
    }

    /// True if there is a selection to copy.
    pub fn can_copy(&self) -> bool {
        self.has_selection_range()
    }

    /// Copy the selected text to the clipboard.
    pub fn copy(&mut self) {
        if self.has_selection_range() {
            self.clipboard.borrow_mut().set_text(&self.selected_text());
        }
    }

    /// True if the clipboard holds text.
    pub fn can_paste(&self) -> bool {
        !self.clipboard.borrow_mut().get_text().is_empty()
    }

    /// Replace the selection with the clipboard text. An empty clipboard just deletes the
    /// selection.
    pub fn paste(&mut self) {
        let text = self.clipboard.borrow_mut().get_text();
        if !text.is_empty() {
            self.undo_id = next_undo_id();
            let before = self.get_field_state();
            let runes = self.sanitize(text.chars());
            let caret = self.selection.start + runes.len();
            self.runes.splice(self.selection.range(), runes);
            self.lines.invalidate();
            self.set_selection_to(caret);
            self.notify_of_modification(before);
        } else if self.has_selection_range() {
            self.delete();
        }
    }

    /// The content that pasting `input` over the current selection would produce.
    pub fn runes_if_pasted(&self, input: &[char]) -> Vec<char> {
        let runes = sanitize(input, self.multi_line);
        let mut result = Vec::with_capacity(runes.len() + self.runes.len());
        result.extend_from_slice(&self.runes[..self.selection.start]);
        result.extend(runes);
        result.extend_from_slice(&self.runes[self.selection.end..]);
        result
    }

    /// True if there is a selection, or a rune before the caret, to delete.
    pub fn can_delete(&self) -> bool {
        self.has_selection_range() || self.selection.start > 0
    }

    /// Remove the selection, or the rune before the caret.
    pub fn delete(&mut self) {
        if !self.can_delete() {
            return;
        }
        self.undo_id = next_undo_id();
        let before = self.get_field_state();
        self.lines.invalidate();
        let start = self.selection.start;
        if self.has_selection_range() {
            self.runes.drain(self.selection.range());
            self.set_selection_to(start);
        } else {
            self.runes.remove(start - 1);
            self.set_selection_to(start - 1);
        }
        self.notify_of_modification(before);
    }

    /// True unless everything is already selected.
    pub fn can_select_all(&self) -> bool {
        self.selection.start != 0 || self.selection.end != self.runes.len()
    }

    /// Select all of the text.
    pub fn select_all(&mut self) {
        self.undo_id = next_undo_id();
        self.set_selection(0, self.runes.len());
    }

    fn sanitize(&self, text: impl Iterator<Item = char>) -> Vec<char> {
        sanitize(&text.collect::<Vec<_>>(), self.multi_line)
    }

    fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            multi_line: self.multi_line,
            wrap: self.wrap,
            obscurement: self.obscurement,
        }
    }

    /// The displayed form of `runes`.
    fn obscured(&self, runes: &[char]) -> Vec<char> {
        match self.obscurement {
            Some(mask) => vec![mask; runes.len()],
            None => runes.to_vec(),
        }
    }

    pub(crate) fn select(&mut self, start: isize, end: isize, anchor: isize) {
        let selection = Selection::clamped(start, end, anchor, self.runes.len());
        if selection != self.selection {
            self.selection = selection;
            self.force_show_until = Instant::now() + self.theme.blink_rate;
            self.show_cursor = true;
            self.mark_for_redraw();
            self.scroll_selection_into_view();
        }
    }

    pub(crate) fn select_to(&mut self, pos: isize) {
        self.select(pos, pos, pos);
    }

    fn notify_of_modification(&mut self, before: FieldState) {
        self.mark_for_redraw();
        let after = self.get_field_state();
        if let Some(callback) = self.on_modified.as_mut() {
            callback(&before, &after);
        }
        self.validate();
    }

    fn mark_for_redraw(&mut self) {
        self.update.insert(Update::DRAW);
    }
}

fn to_signed(pos: usize) -> isize {
    isize::try_from(pos).unwrap_or(isize::MAX)
}

impl CommandTarget for Field {
    fn can_perform(&mut self, command: EditCommand) -> bool {
        match command {
            EditCommand::Cut => self.can_cut(),
            EditCommand::Copy => self.can_copy(),
            EditCommand::Paste => self.can_paste(),
            EditCommand::Delete => self.can_delete(),
            EditCommand::SelectAll => self.can_select_all(),
        }
    }

    fn perform(&mut self, command: EditCommand) {
        match command {
            EditCommand::Cut => self.cut(),
            EditCommand::Copy => self.copy(),
            EditCommand::Paste => self.paste(),
            EditCommand::Delete => self.delete(),
            EditCommand::SelectAll => self.select_all(),
        }
    }
}

impl Widget for Field {
    fn widget_id(&self) -> WidgetId {
        WidgetId::new("tessel", "Field")
    }

    fn frame(&self) -> Rect {
        self.frame
    }

    fn set_frame(&mut self, frame: Rect) {
        if self.frame.size() != frame.size() {
            self.mark_for_redraw();
        }
        self.frame = frame;
    }

    fn sizes(&mut self, hint: Size) -> Sizes {
        self.default_sizes(hint)
    }

    fn draw(&mut self, graphics: &mut dyn Graphics, dirty: Rect) {
        self.default_draw(graphics, dirty);
    }

    fn focus_gained(&mut self) {
        self.default_focus_gained();
    }

    fn focus_lost(&mut self) {
        self.default_focus_lost();
    }

    fn mouse_down(
        &mut self,
        pos: Point,
        button: MouseButton,
        click_count: u32,
        mods: ModifiersState,
    ) -> bool {
        self.default_mouse_down(pos, button, click_count, mods)
    }

    fn mouse_drag(&mut self, pos: Point, button: MouseButton, mods: ModifiersState) -> bool {
        self.default_mouse_drag(pos, button, mods)
    }

    fn key_down(&mut self, key: KeyCode, mods: ModifiersState, repeat: bool) -> bool {
        self.default_key_down(key, mods, repeat)
    }

    fn rune_typed(&mut self, ch: char) -> bool {
        self.default_rune_typed(ch)
    }

    fn update_cursor(&mut self, pos: Point) -> CursorIcon {
        self.default_update_cursor(pos)
    }

    fn take_update(&mut self) -> Update {
        std::mem::take(&mut self.update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessel_core::text::FixedPitchShaper;
    use tessel_services::MemoryClipboard;

    fn field(text: &str) -> Field {
        let mut field = Field::new(
            FieldTheme::default(),
            Rc::new(FixedPitchShaper::default()),
            Rc::new(RefCell::new(MemoryClipboard::new())),
        );
        field.set_frame(Rect::new(0.0, 0.0, 208.0, 23.0));
        field.set_text(text);
        field
    }

    #[test]
    fn test_set_text_moves_caret_to_end() {
        let field = field("hello");
        assert_eq!(field.selection(), (5, 5));
        assert_eq!(field.text(), "hello");
    }

    #[test]
    fn test_single_line_strips_line_feeds() {
        let mut field = field("a\nb");
        assert_eq!(field.text(), "ab");
        field.set_text("x\r\ny");
        assert_eq!(field.text(), "xy");
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut field = field("abc");
        field.set_selection(2, 99);
        assert_eq!(field.selection_state(), Selection { start: 2, end: 3, anchor: 2 });
        field.set_selection(3, 1);
        assert_eq!(field.selection(), (3, 3));
    }

    #[test]
    fn test_delete_at_start_does_nothing() {
        let mut field = field("abc");
        field.set_selection_to_start();
        assert!(!field.can_delete());
        field.delete();
        assert_eq!(field.text(), "abc");
    }

    #[test]
    fn test_runes_if_pasted() {
        let mut field = field("abcd");
        field.set_selection(1, 3);
        let result: String = field.runes_if_pasted(&['x', '\n', 'y']).iter().collect();
        assert_eq!(result, "axyd");
        assert_eq!(field.text(), "abcd");
    }

    #[test]
    fn test_commands() {
        let mut field = field("abc");
        assert!(!field.can_perform(EditCommand::Cut));
        assert!(field.can_perform(EditCommand::SelectAll));
        field.perform(EditCommand::SelectAll);
        assert!(!field.can_perform(EditCommand::SelectAll));
        field.perform(EditCommand::Cut);
        assert_eq!(field.text(), "");
        assert!(field.can_perform(EditCommand::Paste));
        field.perform(EditCommand::Paste);
        assert_eq!(field.text(), "abc");
    }
}
