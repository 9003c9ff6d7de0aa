use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tessel_core::commands::{CommandTarget, EditCommand};
use tessel_core::kurbo::{Point, Rect, Size};
use tessel_core::peniko::Brush;
use tessel_core::text::FixedPitchShaper;
use tessel_core::text_input::{FieldState, Selection};
use tessel_core::update::Update;
use tessel_core::vgi::recording::RecordingGraphics;
use tessel_core::widget::Widget;
use tessel_core::window::{CursorIcon, KeyCode, ModifiersState, MouseButton};
use tessel_services::{Clipboard, MemoryClipboard};
use tessel_theme::field::FieldTheme;
use tessel_widgets::field::Field;

fn make(multi_line: bool, text: &str) -> (Field, Rc<RefCell<MemoryClipboard>>) {
    let clipboard = Rc::new(RefCell::new(MemoryClipboard::new()));
    let shaper = Rc::new(FixedPitchShaper::default());
    let mut field = if multi_line {
        Field::new_multi_line(FieldTheme::default(), shaper, clipboard.clone())
    } else {
        Field::new(FieldTheme::default(), shaper, clipboard.clone())
    };
    let height = if multi_line { 200.0 } else { 23.0 };
    field.set_frame(Rect::new(0.0, 0.0, 208.0, height));
    field.set_text(text);
    (field, clipboard)
}

fn assert_selection_valid(field: &Field) {
    let Selection { start, end, anchor } = field.selection_state();
    assert!(start <= end, "{start} > {end}");
    assert!(end <= field.runes().len());
    assert!(start <= anchor && anchor <= end);
}

/// x coordinate of the middle of rune `index` on the first line of an unscrolled field.
fn x_of(index: usize) -> f64 {
    5.0 + index as f64 * 10.0 + 2.0
}

#[test]
fn test_typing_inserts_at_caret() {
    let (mut field, _) = make(false, "ab");
    field.set_selection_to(1);
    assert!(field.rune_typed('x'));
    assert_eq!(field.text(), "axb");
    assert_eq!(field.selection(), (2, 2));

    field.set_selection(0, 2);
    field.rune_typed('y');
    assert_eq!(field.text(), "yb");
    assert_eq!(field.selection(), (1, 1));
}

#[test]
fn test_control_runes_are_refused() {
    let (mut single, _) = make(false, "ab");
    assert!(!single.rune_typed('\n'));
    assert!(!single.rune_typed('\t'));
    assert_eq!(single.text(), "ab");

    let (mut multi, _) = make(true, "ab");
    assert!(multi.rune_typed('\n'));
    assert_eq!(multi.text(), "ab\n");
}

#[test]
fn test_word_at() {
    let (field, _) = make(false, "foo bar");
    assert_eq!(field.find_word_at(1), (0, 3));
    assert_eq!(field.find_word_at(3), (3, 3));
}

#[test]
fn test_line_breaks_account_for_line_feeds() {
    let (mut field, _) = make(true, "ab\ncd");
    assert_eq!(field.find_next_line_break(0), 2);
    assert_eq!(field.find_prev_line_break(4), 3);
}

#[test]
fn test_paste_sanitizes_line_feeds() {
    let (mut single, clipboard) = make(false, "");
    clipboard.borrow_mut().set_text("a\nb");
    single.paste();
    assert_eq!(single.text(), "ab");
    assert_eq!(single.selection(), (2, 2));

    let (mut multi, clipboard) = make(true, "");
    clipboard.borrow_mut().set_text("a\nb");
    multi.paste();
    assert_eq!(multi.text(), "a\nb");
}

#[test]
fn test_paste_with_empty_clipboard_deletes_selection() {
    let (mut field, _) = make(false, "abc");
    field.set_selection(1, 2);
    assert!(!field.can_paste());
    field.paste();
    assert_eq!(field.text(), "ac");
}

#[test]
fn test_cut_copy_use_real_text_when_obscured() {
    let (field, clipboard) = make(false, "");
    let mut field = field.with_obscurement('*').with_text("secret");
    field.select_all();
    field.copy();
    assert_eq!(clipboard.borrow().text(), "secret");
    field.cut();
    assert_eq!(field.text(), "");
    assert_eq!(clipboard.borrow().text(), "secret");
}

#[test]
fn test_field_state_round_trip() {
    let (mut field, _) = make(true, "one\ntwo");
    field.set_selection(2, 5);
    let state = field.get_field_state();
    let calls = Rc::new(RefCell::new(0));
    let seen = calls.clone();
    field.set_modified_callback(move |_, _| *seen.borrow_mut() += 1);
    field.apply_field_state(&state);
    field.apply_field_state(&state);
    assert_eq!(*calls.borrow(), 0);
    assert_eq!(field.get_field_state(), state);
}

#[test]
fn test_apply_field_state_restores_text() {
    let (mut field, _) = make(false, "abc");
    let state = FieldState {
        text: "hello".to_string(),
        selection_start: 1,
        selection_end: 40,
        selection_anchor: 0,
    };
    field.apply_field_state(&state);
    assert_eq!(field.text(), "hello");
    assert_eq!(field.selection_state(), Selection { start: 1, end: 5, anchor: 1 });
}

#[test]
fn test_modification_callback_sees_before_and_after() {
    let (mut field, _) = make(false, "ab");
    let log: Rc<RefCell<Vec<(String, String)>>> = Rc::default();
    let sink = log.clone();
    field.set_modified_callback(move |before, after| {
        sink.borrow_mut().push((before.text.clone(), after.text.clone()));
    });
    field.set_selection_to(2);
    field.rune_typed('c');
    field.delete();
    field.set_text("ab");
    assert_eq!(
        *log.borrow(),
        vec![
            ("ab".to_string(), "abc".to_string()),
            ("abc".to_string(), "ab".to_string()),
        ]
    );
}

#[test]
fn test_validation_only_flips_on_change() {
    let (mut field, _) = make(false, "");
    field.set_validate_callback(|text| text.chars().all(|ch| ch.is_ascii_digit()));
    assert!(!field.invalid());
    field.take_update();

    field.rune_typed('x');
    assert!(field.invalid());
    field.rune_typed('y');
    assert!(field.invalid());
    field.select_all();
    field.rune_typed('7');
    assert!(!field.invalid());
    assert_eq!(field.text(), "7");
}

#[test]
fn test_selection_stays_valid_under_mixed_edits() {
    let (mut field, clipboard) = make(true, "alpha beta\ngamma");
    clipboard.borrow_mut().set_text("x\ny\tz");
    let none = ModifiersState::empty();
    let shift = ModifiersState::SHIFT;
    let word = ModifiersState::ALT | ModifiersState::SHIFT;
    let steps: Vec<Box<dyn Fn(&mut Field)>> = vec![
        Box::new(|f: &mut Field| f.set_selection(3, 99)),
        Box::new(move |f: &mut Field| {
            f.key_down(KeyCode::ArrowLeft, word, false);
        }),
        Box::new(|f: &mut Field| f.delete()),
        Box::new(move |f: &mut Field| {
            f.key_down(KeyCode::ArrowDown, shift, false);
        }),
        Box::new(|f: &mut Field| f.paste()),
        Box::new(move |f: &mut Field| {
            f.key_down(KeyCode::Home, shift, false);
        }),
        Box::new(|f: &mut Field| f.cut()),
        Box::new(move |f: &mut Field| {
            f.key_down(KeyCode::Delete, none, false);
        }),
        Box::new(|f: &mut Field| f.set_text("")),
        Box::new(move |f: &mut Field| {
            f.key_down(KeyCode::ArrowUp, shift, false);
        }),
        Box::new(move |f: &mut Field| {
            f.key_down(KeyCode::End, none, false);
        }),
        Box::new(|f: &mut Field| {
            f.rune_typed('q');
        }),
    ];
    for step in steps {
        step(&mut field);
        assert_selection_valid(&field);
    }
    assert_eq!(field.text(), "q");
}

#[test]
fn test_click_counts() {
    let (mut field, _) = make(false, "foo bar baz");
    let none = ModifiersState::empty();

    assert!(field.mouse_down(Point::new(x_of(2), 10.0), MouseButton::Left, 1, none));
    assert_eq!(field.selection(), (2, 2));
    assert!(field.take_update().contains(Update::FOCUS));

    field.mouse_down(Point::new(x_of(6), 10.0), MouseButton::Left, 1, ModifiersState::SHIFT);
    assert_eq!(field.selection_state(), Selection { start: 2, end: 6, anchor: 6 });

    field.mouse_down(Point::new(x_of(5), 10.0), MouseButton::Left, 2, none);
    assert_eq!(field.selection(), (4, 7));

    field.mouse_down(Point::new(x_of(5), 10.0), MouseButton::Left, 3, none);
    assert_eq!(field.selection(), (0, 11));

    assert!(!field.mouse_down(Point::new(x_of(1), 10.0), MouseButton::Right, 1, none));
}

#[test]
fn test_word_drag_never_shrinks_below_clicked_word() {
    let (mut field, _) = make(false, "foo bar baz");
    let none = ModifiersState::empty();
    field.mouse_down(Point::new(x_of(5), 10.0), MouseButton::Left, 2, none);
    assert_eq!(field.selection(), (4, 7));

    field.mouse_drag(Point::new(x_of(9), 10.0), MouseButton::Left, none);
    assert_eq!(field.selection(), (4, 11));

    field.mouse_drag(Point::new(x_of(1), 10.0), MouseButton::Left, none);
    assert_eq!(field.selection_state(), Selection { start: 0, end: 7, anchor: 4 });

    field.mouse_drag(Point::new(x_of(3), 10.0), MouseButton::Left, none);
    assert_eq!(field.selection(), (4, 7));
}

#[test]
fn test_plain_drag_extends_from_anchor() {
    let (mut field, _) = make(false, "foo bar baz");
    let none = ModifiersState::empty();
    field.mouse_down(Point::new(x_of(5), 10.0), MouseButton::Left, 1, none);
    field.mouse_drag(Point::new(x_of(2), 10.0), MouseButton::Left, none);
    assert_eq!(field.selection_state(), Selection { start: 2, end: 5, anchor: 5 });
    field.mouse_drag(Point::new(x_of(8), 10.0), MouseButton::Left, none);
    assert_eq!(field.selection_state(), Selection { start: 5, end: 8, anchor: 5 });
}

#[test]
fn test_index_point_mapping() {
    let (mut field, _) = make(true, "abc\ndefg\nhi");
    for index in 0..=field.runes().len() {
        let pt = field.from_selection_index(index);
        let back = field.to_selection_index(Point::new(pt.x + 1.0, pt.y + 1.0));
        assert_eq!(back, index, "index {index} mapped to {pt:?}");
    }
    // Below the last line resolves to the last line.
    assert_eq!(field.to_selection_index(Point::new(x_of(1), 150.0)), 10);
    // Left of the text resolves to the line start.
    assert_eq!(field.to_selection_index(Point::new(-20.0, 25.0)), 4);
}

#[test]
fn test_auto_scroll_keeps_caret_visible() {
    let (mut field, _) = make(false, "");
    field.set_frame(Rect::new(0.0, 0.0, 108.0, 23.0));
    field.set_text("abcdefghijklmnopqrst");
    assert_eq!(field.selection(), (20, 20));
    assert_eq!(field.scroll_offset().x, -102.0);
    let rect = field.content_rect();
    let caret = field.from_selection_index(20);
    assert!(caret.x >= rect.x0 && caret.x < rect.x1);

    field.set_selection_to_start();
    let caret = field.from_selection_index(0);
    assert_eq!(caret.x, rect.x0);
    assert!(field.scroll_offset().x <= 0.0);
}

#[test]
fn test_auto_scroll_never_overscrolls_short_text() {
    let (mut field, _) = make(false, "abc");
    field.set_selection_to_start();
    assert_eq!(field.scroll_offset().x, 0.0);
    field.set_auto_scroll(false);
    field.set_scroll_offset(tessel_core::kurbo::Vec2::new(-30.0, 0.0));
    assert_eq!(field.scroll_offset().x, 0.0);
}

#[test]
fn test_scroll_rect_callback_gets_caret_area() {
    let (mut field, _) = make(false, "abc");
    let rects: Rc<RefCell<Vec<Rect>>> = Rc::default();
    let sink = rects.clone();
    field.set_scroll_rect_callback(move |rect| sink.borrow_mut().push(rect));
    field.set_selection_to(1);
    assert_eq!(*rects.borrow(), vec![Rect::new(14.0, 4.0, 17.0, 20.0)]);
}

#[test]
fn test_focus_selects_all_and_swaps_border() {
    let (mut field, _) = make(false, "abc");
    let unfocused = *field.border();
    field.set_selection(1, 2);
    field.focus_gained();
    assert_eq!(field.selection(), (1, 2));
    field.focus_lost();

    field.set_selection_to(0);
    field.focus_gained();
    assert!(field.is_focused());
    assert_eq!(field.selection(), (0, 3));
    assert_ne!(*field.border(), unfocused);

    let undo = field.current_undo_id();
    field.focus_lost();
    assert!(field.current_undo_id() > undo);
    assert_eq!(*field.border(), unfocused);
}

#[test]
fn test_no_select_all_on_focus() {
    let (mut field, _) = make(false, "abc");
    field.set_no_select_all_on_focus(true);
    field.set_selection_to(1);
    field.focus_gained();
    assert_eq!(field.selection(), (1, 1));
}

#[test]
fn test_menu_command_chords_are_not_consumed() {
    let (mut field, _) = make(true, "ab\ncd");
    let cmd = if cfg!(target_os = "macos") {
        ModifiersState::SUPER
    } else {
        ModifiersState::CONTROL
    };
    field.set_selection_to(4);
    assert!(!field.key_down(KeyCode::ArrowUp, cmd, false));
    assert_eq!(field.selection(), (0, 0));
    assert!(!field.key_down(KeyCode::ArrowRight, cmd, false));
    assert_eq!(field.selection(), (2, 2));
    assert!(!field.key_down(KeyCode::KeyC, cmd, false));
}

#[test]
fn test_return_in_single_line_is_not_consumed() {
    let (mut field, _) = make(false, "ab");
    assert!(!field.key_down(KeyCode::Enter, ModifiersState::empty(), false));
    assert!(!field.key_down(KeyCode::NumpadEnter, ModifiersState::empty(), false));
    assert_eq!(field.text(), "ab");
}

#[test]
fn test_delete_key_removes_next_rune() {
    let (mut field, _) = make(false, "abc");
    field.set_selection_to(1);
    field.key_down(KeyCode::Delete, ModifiersState::empty(), false);
    assert_eq!(field.text(), "ac");
    assert_eq!(field.selection(), (1, 1));
    field.key_down(KeyCode::Backspace, ModifiersState::empty(), false);
    assert_eq!(field.text(), "c");
    assert_eq!(field.selection(), (0, 0));
}

#[test]
fn test_single_line_vertical_arrows_go_to_ends() {
    let (mut field, _) = make(false, "abc");
    field.set_selection_to(1);
    field.key_down(KeyCode::ArrowDown, ModifiersState::empty(), false);
    assert_eq!(field.selection(), (3, 3));
    field.key_down(KeyCode::ArrowUp, ModifiersState::SHIFT, false);
    assert_eq!(field.selection(), (0, 3));
}

#[test]
fn test_default_sizes() {
    let (mut field, _) = make(false, "hello");
    let sizes = field.sizes(Size::ZERO);
    assert_eq!(sizes.pref, Size::new(60.0, 23.0));
    assert_eq!(sizes.min, Size::new(20.0, 23.0));
    assert_eq!(sizes.max, Size::new(10000.0, 10000.0));

    let sizes = field.sizes(Size::new(40.0, 0.0));
    assert_eq!(sizes.pref.width, 40.0);
    let sizes = field.sizes(Size::new(100.0, 0.0));
    assert_eq!(sizes.pref.width, 100.0);
    let sizes = field.sizes(Size::new(5.0, 0.0));
    assert_eq!(sizes.pref.width, 20.0);
}

#[test]
fn test_multi_line_sizes_wrap_to_hint() {
    let (mut field, _) = make(true, "foo bar baz");
    // 40 units of text width: "foo " / "bar " / "baz".
    let sizes = field.sizes(Size::new(50.0, 0.0));
    assert_eq!(sizes.pref, Size::new(50.0, 55.0));
}

#[test]
fn test_set_minimum_text_width_using() {
    let (mut field, _) = make(false, "");
    field.set_minimum_text_width_using(&["1234", "12"]);
    assert_eq!(field.theme().minimum_text_width, 40.0);
    field.set_minimum_text_width_using(&[]);
    assert_eq!(field.theme().minimum_text_width, 10.0);
}

#[test]
fn test_set_wrap() {
    let (mut field, _) = make(true, "");
    assert!(field.wrap());
    field.set_wrap(false);
    assert!(!field.wrap());
    assert!(field.take_update().contains(Update::LAYOUT));
}

#[test]
fn test_draw_selection_and_caret() {
    let (mut field, _) = make(false, "ab");
    field.focus_gained();
    assert_eq!(field.selection(), (0, 2));
    let theme = FieldTheme::default();

    let mut graphics = RecordingGraphics::new();
    field.draw(&mut graphics, Rect::new(0.0, 0.0, 208.0, 23.0));
    let fills: Vec<(Brush, Rect)> = graphics.fills().map(|(b, r)| (b.clone(), r)).collect();
    assert_eq!(fills[0], (Brush::Solid(theme.editable_ink), Rect::new(0.0, 0.0, 208.0, 23.0)));
    assert!(fills.contains(&(Brush::Solid(theme.selection_ink), Rect::new(5.0, 4.0, 25.0, 20.0))));
    assert!(field.blink_deadline().is_none());

    field.set_selection_to(1);
    let mut graphics = RecordingGraphics::new();
    field.draw(&mut graphics, Rect::new(0.0, 0.0, 208.0, 23.0));
    let caret = Rect::new(14.5, 4.0, 15.5, 20.0);
    assert!(graphics
        .fills()
        .any(|(b, r)| r == caret && *b == Brush::Solid(theme.on_editable_ink)));
    assert!(field.blink_deadline().is_some());
}

#[test]
fn test_draw_watermark_when_empty() {
    let (field, _) = make(false, "");
    let mut field = field.with_watermark("name");
    let mut graphics = RecordingGraphics::new();
    field.draw(&mut graphics, Rect::new(0.0, 0.0, 208.0, 23.0));
    let watermark = graphics
        .fills()
        .filter(|(_, r)| r.y1 == 16.0 && r.x0 > 4.0)
        .count();
    assert_eq!(watermark, 4);
}

#[test]
fn test_invalid_field_draws_error_background() {
    let (mut field, _) = make(false, "x");
    field.set_validate_callback(|_| false);
    let mut graphics = RecordingGraphics::new();
    field.draw(&mut graphics, Rect::ZERO);
    let (brush, _) = graphics.fills().next().map(|(b, r)| (b.clone(), r)).unwrap();
    assert_eq!(brush, Brush::Solid(FieldTheme::default().error_ink));
}

#[test]
fn test_blink_toggles_after_forced_period() {
    let (mut field, _) = make(false, "ab");
    field.set_no_select_all_on_focus(true);
    field.focus_gained();
    field.set_selection_to(1);
    field.draw(&mut RecordingGraphics::new(), Rect::ZERO);
    let deadline = field.blink_deadline().unwrap();
    assert!(field.caret_shown());

    field.tick(deadline - Duration::from_millis(1));
    assert!(field.caret_shown());
    field.tick(deadline + Duration::from_millis(1));
    assert!(!field.caret_shown());
    let next = field.blink_deadline().unwrap();
    assert!(next > deadline);

    field.focus_lost();
    assert!(field.blink_deadline().is_none());
}

#[test]
fn test_cursor_shape() {
    let (mut field, _) = make(false, "ab");
    assert_eq!(field.update_cursor(Point::ZERO), CursorIcon::Text);
    field.set_enabled(false);
    assert_eq!(field.update_cursor(Point::ZERO), CursorIcon::Default);
}

#[test]
fn test_edit_commands_route_through_target() {
    let (mut field, clipboard) = make(false, "hello");
    field.perform(EditCommand::SelectAll);
    field.perform(EditCommand::Copy);
    assert_eq!(clipboard.borrow().text(), "hello");
    field.set_selection_to(5);
    assert!(field.can_perform(EditCommand::Delete));
    field.perform(EditCommand::Delete);
    assert_eq!(field.text(), "hell");
    assert!(field.can_perform(EditCommand::Paste));
    field.perform(EditCommand::Paste);
    assert_eq!(field.text(), "hellhello");
}
