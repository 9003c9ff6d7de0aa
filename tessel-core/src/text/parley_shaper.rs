//! Text shaping using Parley, with glyphs drawn into a vello scene.

use super::{ShapedText, TextShaper};
use crate::vgi::Graphics;
use parley::fontique::{Collection, CollectionOptions};
use parley::{Alignment, FontContext, FontStack, Layout, LayoutContext, StyleProperty};
use std::cell::RefCell;
use std::collections::HashMap;
use tessel_theme::font::Font;
use vello::kurbo::{Affine, Point};
use vello::peniko::{Brush, Fill};

/// Shaper backed by the system font collection.
pub struct ParleyShaper {
    font_cx: RefCell<FontContext>,
    layout_cx: RefCell<LayoutContext<[u8; 4]>>,
    metrics: RefCell<HashMap<(String, u32), (f64, f64)>>,
    hint: bool,
}

impl ParleyShaper {
    /// Create a shaper with system fonts loaded.
    pub fn new() -> Self {
        let font_cx = FontContext {
            collection: Collection::new(CollectionOptions {
                system_fonts: true,
                ..Default::default()
            }),
            source_cache: Default::default(),
        };

        Self {
            font_cx: RefCell::new(font_cx),
            layout_cx: RefCell::new(LayoutContext::new()),
            metrics: RefCell::new(HashMap::new()),
            hint: false,
        }
    }

    /// Enable glyph hinting when drawing.
    pub fn with_hinting(mut self, hint: bool) -> Self {
        self.hint = hint;
        self
    }

    fn layout(&self, font: &Font, text: &str) -> Layout<[u8; 4]> {
        let mut font_cx = self.font_cx.borrow_mut();
        let mut layout_cx = self.layout_cx.borrow_mut();
        let mut builder = layout_cx.ranged_builder(&mut font_cx, text, 1.0, true);
        builder.push_default(StyleProperty::FontSize(font.size));
        builder.push_default(StyleProperty::FontStack(FontStack::from(font.family.as_str())));

        let mut layout = builder.build(text);
        layout.break_all_lines(None);
        layout.align(None, Alignment::Start, Default::default());
        layout
    }

    /// Ascent and descent for `font`, measured once per family and size.
    fn font_metrics(&self, font: &Font) -> (f64, f64) {
        let key = (font.family.clone(), font.size.to_bits());
        if let Some(metrics) = self.metrics.borrow().get(&key) {
            return *metrics;
        }
        let layout = self.layout(font, " ");
        let metrics = layout
            .lines()
            .next()
            .map(|line| {
                let m = line.metrics();
                (m.ascent as f64, m.descent as f64)
            })
            .unwrap_or((font.size as f64 * 0.8, font.size as f64 * 0.2));
        self.metrics.borrow_mut().insert(key, metrics);
        metrics
    }
}

impl Default for ParleyShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl TextShaper for ParleyShaper {
    fn shape(&self, font: &Font, runes: &[char]) -> ShapedText {
        let (ascent, descent) = self.font_metrics(font);
        let mut advances = vec![0.0; runes.len()];
        if runes.is_empty() {
            return ShapedText {
                advances,
                ascent,
                descent,
            };
        }

        let text: String = runes.iter().collect();
        let char_starts: Vec<usize> = text.char_indices().map(|(byte, _)| byte).collect();
        let layout = self.layout(font, &text);
        for line in layout.lines() {
            for run in line.runs() {
                for cluster in run.visual_clusters() {
                    let range = cluster.text_range();
                    let first = char_starts.partition_point(|&b| b < range.start);
                    let last = char_starts.partition_point(|&b| b < range.end).max(first + 1);
                    let last = last.min(advances.len());
                    if first >= last {
                        continue;
                    }
                    // Ligatures cover several runes; share the advance between them.
                    let share = cluster.advance() as f64 / (last - first) as f64;
                    for advance in &mut advances[first..last] {
                        *advance += share;
                    }
                }
            }
        }

        ShapedText {
            advances,
            ascent,
            descent,
        }
    }

    fn line_height(&self, font: &Font) -> f64 {
        let (ascent, descent) = self.font_metrics(font);
        ascent + descent
    }

    fn draw(
        &self,
        graphics: &mut dyn Graphics,
        font: &Font,
        runes: &[char],
        origin: Point,
        brush: &Brush,
    ) {
        if runes.is_empty() {
            return;
        }
        let text: String = runes.iter().collect();
        let Some(scene) = graphics.as_scene_mut() else {
            log::warn!("Could not render text '{}' - graphics backend has no scene", text);
            return;
        };

        let layout = self.layout(font, &text);
        let first_baseline = layout
            .lines()
            .next()
            .map(|line| line.metrics().baseline as f64)
            .unwrap_or(0.0);
        let transform = Affine::translate((origin.x, origin.y - first_baseline));

        for line in layout.lines() {
            for item in line.items() {
                let parley::PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                    continue;
                };

                let mut x = glyph_run.offset();
                let y = glyph_run.baseline();
                let run = glyph_run.run();
                let synthesis = run.synthesis();
                let glyph_xform = synthesis
                    .skew()
                    .map(|angle| Affine::skew(angle.to_radians().tan() as f64, 0.0));

                scene
                    .draw_glyphs(run.font())
                    .brush(brush)
                    .hint(self.hint)
                    .transform(transform)
                    .glyph_transform(glyph_xform)
                    .font_size(run.font_size())
                    .normalized_coords(run.normalized_coords())
                    .draw(
                        Fill::NonZero,
                        glyph_run.glyphs().map(|glyph| {
                            let gx = x + glyph.x;
                            let gy = y - glyph.y;
                            x += glyph.advance;
                            vello::Glyph {
                                id: glyph.id as _,
                                x: gx,
                                y: gy,
                            }
                        }),
                    );
            }
        }
    }
}
