use super::line::TextLine;
use super::TextShaper;
use std::borrow::Cow;
use tessel_theme::font::Font;

/// One laid-out line of a rune buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayLine {
    /// The shaped runes, already obscured if obscurement is on.
    pub text: TextLine,
    /// The line was ended by a `'\n'` that is not part of `text` but occupies one buffer
    /// position after it.
    pub ends_with_line_feed: bool,
}

impl DisplayLine {
    /// Number of buffer positions the line covers, including a consumed line feed.
    pub fn span(&self) -> usize {
        self.text.len() + usize::from(self.ends_with_line_feed)
    }
}

/// How a buffer is split into display lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutOptions {
    /// `'\n'` starts a new line.
    pub multi_line: bool,
    /// Lines wider than the wrap width are broken.
    pub wrap: bool,
    /// Every rune is displayed as this one.
    pub obscurement: Option<char>,
}

/// Lay out `runes` into display lines for `wrap_width`.
///
/// An empty buffer has no lines. Wrapping only happens with `wrap` set and a positive width.
pub fn build_lines(
    shaper: &dyn TextShaper,
    font: &Font,
    runes: &[char],
    wrap_width: f64,
    options: &LayoutOptions,
) -> Vec<DisplayLine> {
    let mut lines = Vec::new();
    if runes.is_empty() {
        return lines;
    }
    let should_wrap = options.wrap && wrap_width > 0.0;
    let shape = |segment: &[char]| {
        let display = match options.obscurement {
            Some(mask) => vec![mask; segment.len()],
            None => segment.to_vec(),
        };
        TextLine::new(shaper, font, display)
    };
    if options.multi_line {
        for segment in runes.split(|&ch| ch == '\n') {
            let one = shape(segment);
            if should_wrap {
                let parts = one.break_to_width(wrap_width);
                let last = parts.len().saturating_sub(1);
                lines.extend(parts.into_iter().enumerate().map(|(i, text)| DisplayLine {
                    text,
                    ends_with_line_feed: i == last,
                }));
            } else {
                lines.push(DisplayLine {
                    text: one,
                    ends_with_line_feed: true,
                });
            }
        }
    } else {
        let one = shape(runes);
        let parts = if should_wrap {
            one.break_to_width(wrap_width)
        } else {
            vec![one]
        };
        lines.extend(parts.into_iter().map(|text| DisplayLine {
            text,
            ends_with_line_feed: false,
        }));
    }
    lines
}

/// Display lines memoized for a single wrap width.
///
/// Any buffer change must call [LineCache::invalidate]; the next [LineCache::prepare]
/// then rebuilds regardless of width.
#[derive(Debug, Clone)]
pub struct LineCache {
    lines: Vec<DisplayLine>,
    built_for: f64,
}

impl Default for LineCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LineCache {
    /// An empty, invalid cache.
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            built_for: -1.0,
        }
    }

    /// Force a rebuild on next use.
    pub fn invalidate(&mut self) {
        self.built_for = -1.0;
    }

    /// Whether the cached lines are valid for `width`.
    pub fn is_valid_for(&self, width: f64) -> bool {
        self.built_for >= 0.0 && width == self.built_for
    }

    /// Make the cache hold lines for `width`, rebuilding if needed.
    pub fn prepare(
        &mut self,
        shaper: &dyn TextShaper,
        font: &Font,
        runes: &[char],
        width: f64,
        options: &LayoutOptions,
    ) -> &[DisplayLine] {
        if !self.is_valid_for(width) {
            self.lines = build_lines(shaper, font, runes, width, options);
        }
        self.built_for = width.max(0.0);
        &self.lines
    }

    /// Lines for `width` without disturbing the cache.
    pub fn get_or_build<'a>(
        &'a self,
        shaper: &dyn TextShaper,
        font: &Font,
        runes: &[char],
        width: f64,
        options: &LayoutOptions,
    ) -> Cow<'a, [DisplayLine]> {
        if self.is_valid_for(width) {
            Cow::Borrowed(&self.lines)
        } else {
            Cow::Owned(build_lines(shaper, font, runes, width, options))
        }
    }

    /// The lines from the last [LineCache::prepare].
    pub fn lines(&self) -> &[DisplayLine] {
        &self.lines
    }
}

/// Index math over a set of display lines for a buffer of `len` runes.
///
/// Positions are signed so callers can step one past either end and let the map clamp.
#[derive(Debug, Clone, Copy)]
pub struct LineMap<'a> {
    lines: &'a [DisplayLine],
    len: usize,
    multi_line: bool,
}

impl<'a> LineMap<'a> {
    /// Map `lines` laid out from a buffer of `len` runes.
    pub fn new(lines: &'a [DisplayLine], len: usize, multi_line: bool) -> Self {
        Self {
            lines,
            len,
            multi_line,
        }
    }

    /// The line containing `pos` and the buffer position where it starts. Positions past the
    /// end resolve to the last line.
    pub fn index_for_pos(&self, pos: isize) -> (usize, usize) {
        if pos < 0 {
            return (0, 0);
        }
        let pos = pos as usize;
        let mut start = 0;
        let mut span = 0;
        for (i, line) in self.lines.iter().enumerate() {
            span = line.span();
            if pos < start + span {
                return (i, start);
            }
            start += span;
        }
        (self.lines.len().saturating_sub(1), start - span)
    }

    /// Start of the line holding the rune just before `pos`.
    pub fn prev_line_break(&self, pos: isize) -> usize {
        let pos = if pos >= self.len as isize {
            self.len as isize - 1
        } else {
            pos - 1
        };
        self.index_for_pos(pos).1
    }

    /// End of the line holding the rune just after `pos`: the position of its line feed, or
    /// the last position still displayed on a wrapped line.
    pub fn next_line_break(&self, pos: isize) -> usize {
        let pos = if pos < 0 { 0 } else { pos + 1 };
        let (index, start) = self.index_for_pos(pos);
        let Some(line) = self.lines.get(index) else {
            return 0;
        };
        let mut end = start + line.text.len();
        if self.multi_line && !line.ends_with_line_feed {
            end = end.saturating_sub(1);
        }
        end.min(self.len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::FixedPitchShaper;

    fn layout(text: &str, width: f64, options: LayoutOptions) -> Vec<DisplayLine> {
        let runes: Vec<char> = text.chars().collect();
        build_lines(
            &FixedPitchShaper::default(),
            &Font::default(),
            &runes,
            width,
            &options,
        )
    }

    fn shape(lines: &[DisplayLine]) -> Vec<(String, bool)> {
        lines
            .iter()
            .map(|l| (l.text.runes().iter().collect(), l.ends_with_line_feed))
            .collect()
    }

    const MULTI: LayoutOptions = LayoutOptions {
        multi_line: true,
        wrap: true,
        obscurement: None,
    };

    #[test]
    fn test_empty_has_no_lines() {
        assert!(layout("", 100.0, MULTI).is_empty());
    }

    #[test]
    fn test_multi_line_feeds() {
        let lines = layout("foo bar\n\nx", 45.0, MULTI);
        assert_eq!(
            shape(&lines),
            vec![
                ("foo ".to_string(), false),
                ("bar".to_string(), true),
                ("".to_string(), true),
                ("x".to_string(), true),
            ]
        );
    }

    #[test]
    fn test_single_line_never_has_feeds() {
        let options = LayoutOptions {
            multi_line: false,
            wrap: true,
            obscurement: None,
        };
        let lines = layout("foo bar", 45.0, options);
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| !l.ends_with_line_feed));

        // No wrapping without a positive width.
        assert_eq!(layout("foo bar", 0.0, options).len(), 1);
    }

    #[test]
    fn test_obscurement() {
        let options = LayoutOptions {
            obscurement: Some('*'),
            ..Default::default()
        };
        let lines = layout("secret", 0.0, options);
        assert_eq!(shape(&lines), vec![("******".to_string(), false)]);
    }

    #[test]
    fn test_cache_sentinel() {
        let shaper = FixedPitchShaper::default();
        let font = Font::default();
        let mut runes: Vec<char> = "ab".chars().collect();
        let mut cache = LineCache::new();
        assert!(!cache.is_valid_for(100.0));
        cache.prepare(&shaper, &font, &runes, 100.0, &MULTI);
        assert!(cache.is_valid_for(100.0));
        assert!(!cache.is_valid_for(50.0));

        runes.push('c');
        cache.invalidate();
        let lines = cache.prepare(&shaper, &font, &runes, 100.0, &MULTI);
        assert_eq!(lines[0].text.len(), 3);

        cache.prepare(&shaper, &font, &runes, -5.0, &MULTI);
        assert!(cache.is_valid_for(0.0));
    }

    #[test]
    fn test_line_breaks_across_feed() {
        let lines = layout("ab\ncd", 100.0, MULTI);
        let map = LineMap::new(&lines, 5, true);
        assert_eq!(map.index_for_pos(2), (0, 0));
        assert_eq!(map.index_for_pos(3), (1, 3));
        assert_eq!(map.index_for_pos(99), (1, 3));
        assert_eq!(map.next_line_break(0), 2);
        assert_eq!(map.prev_line_break(4), 3);
        assert_eq!(map.prev_line_break(5), 3);
        assert_eq!(map.next_line_break(4), 5);
    }

    #[test]
    fn test_line_breaks_wrapped() {
        let lines = layout("foo bar", 45.0, MULTI);
        let map = LineMap::new(&lines, 7, true);
        assert_eq!(map.next_line_break(0), 3);
        assert_eq!(map.prev_line_break(6), 4);
    }

    #[test]
    fn test_line_breaks_empty() {
        let map = LineMap::new(&[], 0, true);
        assert_eq!(map.index_for_pos(0), (0, 0));
        assert_eq!(map.next_line_break(-1), 0);
        assert_eq!(map.prev_line_break(0), 0);
    }
}
