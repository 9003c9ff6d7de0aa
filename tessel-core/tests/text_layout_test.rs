use tessel_core::text::{build_lines, FixedPitchShaper, LayoutOptions, LineCache, LineMap, TextShaper};
use tessel_core::text_input::{find_word_at, sanitize, Selection};
use tessel_theme::font::Font;

fn runes(text: &str) -> Vec<char> {
    text.chars().collect()
}

#[test]
fn test_line_feed_accounting() {
    let shaper = FixedPitchShaper::default();
    let text = runes("ab\ncd");
    let options = LayoutOptions {
        multi_line: true,
        wrap: true,
        obscurement: None,
    };
    let lines = build_lines(&shaper, &Font::default(), &text, 200.0, &options);
    let map = LineMap::new(&lines, text.len(), true);
    assert_eq!(map.next_line_break(0), 2);
    assert_eq!(map.prev_line_break(4), 3);
}

#[test]
fn test_cache_spans_cover_buffer() {
    let shaper = FixedPitchShaper::default();
    let font = Font::default();
    let text = runes("the quick brown fox\njumps over\n\nthe lazy dog");
    let options = LayoutOptions {
        multi_line: true,
        wrap: true,
        obscurement: None,
    };
    let mut cache = LineCache::new();
    for width in [35.0, 60.0, 1000.0] {
        let lines = cache.prepare(&shaper, &font, &text, width, &options);
        let covered: usize = lines.iter().map(|l| l.span()).sum();
        // The final segment is counted with a virtual line feed.
        assert_eq!(covered, text.len() + 1);
    }
}

#[test]
fn test_word_and_selection_primitives() {
    let text = runes("foo bar");
    assert_eq!(find_word_at(&text, 1), (0, 3));
    assert_eq!(find_word_at(&text, 3), (3, 3));

    let pasted = sanitize(&runes("a\nb"), false);
    assert_eq!(pasted, runes("ab"));

    let sel = Selection::clamped(5, 1, 9, text.len());
    assert!(sel.start <= sel.anchor && sel.anchor <= sel.end && sel.end <= text.len());
}

#[test]
fn test_shaper_measure() {
    let shaper = FixedPitchShaper::new(7.0, 10.0, 3.0);
    let font = Font::default();
    assert_eq!(shaper.measure(&font, "abc"), 21.0);
    assert_eq!(shaper.line_height(&font), 13.0);
}
