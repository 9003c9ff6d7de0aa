//! Rune buffer primitives: selections, field snapshots, word scanning and input sanitizing.

use std::ops::Range;

/// A selection over a rune buffer.
///
/// Always satisfies `start <= anchor <= end`. The anchor is the end that stays put while the
/// selection is extended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    /// First selected rune.
    pub start: usize,
    /// One past the last selected rune.
    pub end: usize,
    /// The fixed end for extension.
    pub anchor: usize,
}

impl Selection {
    /// A caret at `pos`.
    pub fn caret(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
            anchor: pos,
        }
    }

    /// Build a selection from unconstrained values for a buffer of `len` runes.
    ///
    /// `start` is clamped to the buffer, `end` to `[start, len]` and `anchor` to
    /// `[start, end]`.
    pub fn clamped(start: isize, end: isize, anchor: isize, len: usize) -> Self {
        let len = len as isize;
        let start = start.clamp(0, len);
        let end = end.clamp(start, len);
        let anchor = anchor.clamp(start, end);
        Self {
            start: start as usize,
            end: end as usize,
            anchor: anchor as usize,
        }
    }

    /// True if at least one rune is selected.
    pub fn has_range(&self) -> bool {
        self.start < self.end
    }

    /// Number of selected runes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True for a caret.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The selected range.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The end that moves when extending: the one opposite the anchor.
    pub fn active_end(&self) -> usize {
        if self.anchor == self.start {
            self.end
        } else {
            self.start
        }
    }
}

/// Snapshot of a field's text and selection, used for undo and change notification.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldState {
    /// The full text.
    pub text: String,
    /// Selection start.
    pub selection_start: usize,
    /// Selection end.
    pub selection_end: usize,
    /// Selection anchor.
    pub selection_anchor: usize,
}

/// Letters, digits and underscore make up words.
pub fn is_word_part(ch: char) -> bool {
    ch.is_alphabetic() || ch.is_numeric() || ch == '_'
}

/// The word containing `pos`, as `(start, end)`.
///
/// `pos` is clamped into the buffer. If the rune there is not part of a word, the result is
/// the empty range at `pos`.
pub fn find_word_at(runes: &[char], pos: isize) -> (usize, usize) {
    if runes.is_empty() {
        return (0, 0);
    }
    let pos = pos.clamp(0, runes.len() as isize - 1) as usize;
    let mut start = pos;
    let mut end = pos;
    if is_word_part(runes[pos]) {
        while start > 0 && is_word_part(runes[start - 1]) {
            start -= 1;
        }
        while end < runes.len() && is_word_part(runes[end]) {
            end += 1;
        }
    }
    (start, end)
}

/// Scan left from `pos` to the nearest word rune, stopping at the buffer start.
pub fn scan_left_to_word_part(runes: &[char], pos: isize) -> usize {
    let pos = pos.min(runes.len() as isize - 1);
    if pos < 0 {
        return 0;
    }
    let mut pos = pos as usize;
    while pos > 0 && !is_word_part(runes[pos]) {
        pos -= 1;
    }
    pos
}

/// Scan right from `pos` to the nearest word rune, stopping at the last rune.
pub fn scan_right_to_word_part(runes: &[char], pos: isize) -> usize {
    if pos >= runes.len() as isize {
        return runes.len().saturating_sub(1);
    }
    let mut pos = pos.max(0) as usize;
    while pos + 1 < runes.len() && !is_word_part(runes[pos]) {
        pos += 1;
    }
    pos
}

/// Drop control characters. `'\n'` is kept only when `multi_line`.
pub fn sanitize(runes: &[char], multi_line: bool) -> Vec<char> {
    runes
        .iter()
        .copied()
        .filter(|&ch| !ch.is_control() || (multi_line && ch == '\n'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runes(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    #[test]
    fn test_clamped_selection() {
        let sel = Selection::clamped(-4, 99, 50, 10);
        assert_eq!(sel, Selection { start: 0, end: 10, anchor: 10 });
        let sel = Selection::clamped(6, 2, 0, 10);
        assert_eq!(sel, Selection::caret(6));
        assert_eq!(Selection::clamped(3, 3, 3, 0), Selection::caret(0));
    }

    #[test]
    fn test_active_end() {
        let forward = Selection { start: 2, end: 5, anchor: 2 };
        assert_eq!(forward.active_end(), 5);
        let backward = Selection { start: 2, end: 5, anchor: 5 };
        assert_eq!(backward.active_end(), 2);
        assert_eq!(forward.len(), 3);
        assert!(forward.has_range());
    }

    #[test]
    fn test_find_word_at() {
        let text = runes("foo bar");
        assert_eq!(find_word_at(&text, 1), (0, 3));
        assert_eq!(find_word_at(&text, 3), (3, 3));
        assert_eq!(find_word_at(&text, 5), (4, 7));
        assert_eq!(find_word_at(&text, 70), (4, 7));
        assert_eq!(find_word_at(&text, -2), (0, 3));
        assert_eq!(find_word_at(&[], 0), (0, 0));
        assert_eq!(find_word_at(&runes("a_1 x"), 2), (0, 3));
    }

    #[test]
    fn test_scans() {
        let text = runes("ab  cd");
        assert_eq!(scan_left_to_word_part(&text, 3), 1);
        assert_eq!(scan_left_to_word_part(&text, 99), 5);
        assert_eq!(scan_left_to_word_part(&text, -1), 0);
        assert_eq!(scan_right_to_word_part(&text, 2), 4);
        assert_eq!(scan_right_to_word_part(&text, 99), 5);
        assert_eq!(scan_right_to_word_part(&[], 0), 0);
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize(&runes("a\nb"), false), runes("ab"));
        assert_eq!(sanitize(&runes("a\nb"), true), runes("a\nb"));
        assert_eq!(sanitize(&runes("a\r\tb\u{7}"), true), runes("ab"));
    }
}
