//! Packing of dock header items into a single row.
//!
//! The packer works on measured sizes only, so it can be driven without any widgets. When the
//! row is too narrow it degrades in this order, stopping as soon as everything fits:
//!
//! 1. shrink every tab except the current one toward the minimum tab width,
//! 2. show the overflow button and hide tabs from the end backward, skipping the current one,
//! 3. shrink the current tab, never below the minimum.

use tessel_core::kurbo::{Rect, Size};
use tessel_core::widget::{max_size, Sizes};
use tessel_theme::border::Insets;

/// Everything the packer needs to know about one header.
#[derive(Debug, Clone)]
pub struct PackInput<'a> {
    /// Preferred size of each tab, in order.
    pub tabs: &'a [Size],
    /// Preferred size of each trailing button that is always shown, in order.
    pub buttons: &'a [Size],
    /// Index of the current tab, if any.
    pub current: Option<usize>,
    /// Area to pack into.
    pub content: Rect,
    /// Narrowest a tab may become.
    pub minimum_tab_width: f64,
    /// Space between adjacent items.
    pub gap: f64,
}

/// Result of [pack].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PackedRow {
    /// Frame of each tab, `None` when hidden.
    pub tabs: Vec<Option<Rect>>,
    /// Frame of the overflow button, `None` when no tab is hidden.
    pub overflow: Option<Rect>,
    /// Number of hidden tabs.
    pub hidden_count: usize,
    /// Frame of each always-shown button.
    pub buttons: Vec<Rect>,
}

impl PackedRow {
    /// True if the tab at `index` was given a frame.
    pub fn is_visible(&self, index: usize) -> bool {
        matches!(self.tabs.get(index), Some(Some(_)))
    }

    /// Indexes of the hidden tabs, in order.
    pub fn hidden(&self) -> impl Iterator<Item = usize> + '_ {
        self.tabs
            .iter()
            .enumerate()
            .filter_map(|(i, frame)| frame.is_none().then_some(i))
    }
}

/// Label of the overflow button for `hidden` hidden tabs.
pub fn overflow_label(hidden: usize) -> String {
    format!("»{hidden}")
}

fn gaps(input: &PackInput<'_>) -> f64 {
    (input.tabs.len() + input.buttons.len()).saturating_sub(1) as f64 * input.gap
}

/// Minimum, preferred and maximum header size before any tab is shrunk or hidden. `insets`
/// are the header border insets.
pub fn layout_sizes(input: &PackInput<'_>, insets: Insets) -> Sizes {
    let mut min = Size::ZERO;
    let mut pref = Size::ZERO;
    for (i, tab) in input.tabs.iter().enumerate() {
        pref.width += tab.width.max(input.minimum_tab_width);
        pref.height = pref.height.max(tab.height);
        if i == 0 {
            min.width += tab.width;
        }
    }
    for button in input.buttons {
        pref.width += button.width;
        pref.height = pref.height.max(button.height);
        min.width += button.width;
    }
    let gaps = gaps(input);
    min.width += gaps;
    pref.width += gaps;
    min.height = pref.height;
    let grow = |size: Size| Size::new(size.width + insets.width(), size.height + insets.height());
    let min = grow(min);
    let pref = grow(pref);
    Sizes {
        min,
        pref,
        max: max_size(pref),
    }
}

/// Pack the row. `measure_overflow` gives the overflow button size for a number of hidden
/// tabs, since its label shows the count.
pub fn pack(input: &PackInput<'_>, measure_overflow: impl Fn(usize) -> Size) -> PackedRow {
    let min_width = input.minimum_tab_width;
    let mut sizes: Vec<Size> = input
        .tabs
        .iter()
        .map(|size| Size::new(size.width.max(min_width), size.height))
        .collect();
    let current = input.current.filter(|&i| i < sizes.len());
    let mut hidden = vec![false; sizes.len()];
    let mut hidden_count = 0;
    let mut overflow = measure_overflow(1);

    let mut extra = input.content.width()
        - sizes.iter().map(|size| size.width).sum::<f64>()
        - input.buttons.iter().map(|size| size.width).sum::<f64>()
        - gaps(input);
    if extra < 0.0 {
        let mut remaining = -extra;
        shrink_tabs(&mut sizes, current, min_width, &mut remaining);
        if remaining > 0.0 {
            if sizes.len() > 1 {
                remaining += overflow.width + input.gap;
                for i in (0..sizes.len()).rev() {
                    if remaining <= 0.0 {
                        break;
                    }
                    if Some(i) == current {
                        continue;
                    }
                    remaining -= overflow.width;
                    hidden[i] = true;
                    hidden_count += 1;
                    overflow = measure_overflow(hidden_count);
                    remaining += overflow.width;
                    remaining -= sizes[i].width + input.gap;
                }
            }
            if remaining > 0.0 {
                if let Some(current) = current {
                    sizes[current].width = (sizes[current].width - remaining).max(min_width);
                }
                remaining = 0.0;
            }
            extra = -remaining;
        } else {
            extra = 0.0;
        }
        log::debug!(
            "dock header: {} of {} tabs hidden, {:.1} left over",
            hidden_count,
            sizes.len(),
            extra
        );
    }

    let content = input.content;
    let place = |x: f64, size: Size| {
        let y = content.y0 + (content.height() - size.height) / 2.0;
        Rect::new(x, y, x + size.width, y + size.height).expand()
    };
    let mut row = PackedRow {
        hidden_count,
        ..PackedRow::default()
    };
    let mut x = content.x0;
    for (size, hidden) in sizes.iter().zip(&hidden) {
        if *hidden {
            row.tabs.push(None);
        } else {
            row.tabs.push(Some(place(x, *size)));
            x += size.width + input.gap;
        }
    }
    x += extra;
    if hidden_count > 0 {
        row.overflow = Some(place(x, overflow));
        x += overflow.width + input.gap;
    }
    for size in input.buttons {
        row.buttons.push(place(x, *size));
        x += size.width + input.gap;
    }
    row
}

/// Shrink every non-current tab wider than the minimum by an even share of `remaining`, again
/// and again, until it fits or nothing is left to shrink.
fn shrink_tabs(sizes: &mut [Size], current: Option<usize>, min_width: f64, remaining: &mut f64) {
    let mut found = true;
    while found && *remaining > 0.0 {
        found = false;
        let shrinkable = |i: usize, size: &Size| Some(i) != current && size.width > min_width;
        let fat_tabs = sizes
            .iter()
            .enumerate()
            .filter(|(i, size)| shrinkable(*i, size))
            .count();
        if fat_tabs == 0 {
            break;
        }
        let per_tab = (*remaining / fat_tabs as f64).max(1.0);
        for (i, size) in sizes.iter_mut().enumerate() {
            if shrinkable(i, size) {
                found = true;
                *remaining -= per_tab;
                size.width -= per_tab;
                if size.width < min_width {
                    *remaining += min_width - size.width;
                    size.width = min_width;
                }
            }
            if *remaining <= 0.0 {
                break;
            }
        }
    }
}
