use std::str::FromStr;
use std::sync::Arc;

use tessel_core::kurbo::{Affine, BezPath, Point, Rect, Size};
use tessel_core::vgi::{Drawable, Graphics};

/// The parsed document model.
pub mod document;
/// SVG error types.
pub mod error;
/// Built-in icons.
pub mod icons;
/// SVG subset parser.
pub mod parse;
/// Document paths to drawable shapes.
pub mod translate;

use document::{ops_from_bez_path, PathStyle, SvgPath};
pub use error::SvgError;
pub use translate::{GradientGeometry, Paint, PaintSource, PathShape, Shader};

/// What to do with problems that do not make the XML itself unreadable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseErrorMode {
    /// Fail.
    #[default]
    Strict,
    /// Log a warning and continue.
    Warn,
    /// Continue silently.
    Ignore,
}

/// Options for loading an [Svg].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SvgOptions {
    /// Handling of recoverable parse errors.
    pub parse_errors: ParseErrorMode,
    /// Substitute something drawable for unsupported styles instead of failing.
    pub ignore_unsupported: bool,
}

impl SvgOptions {
    /// Skip recoverable parse errors.
    pub fn ignore_parse_errors(mut self) -> Self {
        self.parse_errors = ParseErrorMode::Ignore;
        self
    }

    /// Log recoverable parse errors and continue.
    pub fn warn_parse_errors(mut self) -> Self {
        self.parse_errors = ParseErrorMode::Warn;
        self
    }

    /// Substitute for unsupported styles instead of failing.
    pub fn ignore_unsupported(mut self) -> Self {
        self.ignore_unsupported = true;
        self
    }
}

/// A vector image: translated paths plus the size of the area they were drawn for.
#[derive(Debug, Clone, PartialEq)]
pub struct Svg {
    size: Size,
    origin: Point,
    shapes: Vec<PathShape>,
}

impl Svg {
    /// Load SVG content with the given options.
    pub fn parse_with(content: &str, options: SvgOptions) -> Result<Self, SvgError> {
        let document = parse::parse_document(content, &options)?;
        let (size, origin) = match document.view_box {
            Some(view_box) => (view_box.size(), view_box.origin()),
            None => (
                Size::new(
                    document.width.unwrap_or_default(),
                    document.height.unwrap_or_default(),
                ),
                Point::ZERO,
            ),
        };
        let shapes = document
            .paths
            .iter()
            .map(|path| translate::translate(path, options.ignore_unsupported))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            size,
            origin,
            shapes,
        })
    }

    /// Create an image from the contents of a single `d` attribute, filled black. `size` is
    /// the area the path was drawn for, usually the original `viewBox` size.
    pub fn from_path_data(size: Size, data: &str) -> Result<Self, SvgError> {
        let path = BezPath::from_svg(data)?;
        let svg_path = SvgPath {
            ops: ops_from_bez_path(&path),
            style: PathStyle::default(),
        };
        Ok(Self {
            size,
            origin: Point::ZERO,
            shapes: vec![translate::translate(&svg_path, false)?],
        })
    }

    /// Like `from_str`, but panics on error. For embedded content known to be valid.
    pub fn must_from_str(content: &str) -> Self {
        match Self::from_str(content) {
            Ok(svg) => svg,
            Err(err) => panic!("invalid SVG: {err}"),
        }
    }

    /// Like [Svg::from_path_data], but panics on error.
    pub fn must_from_path_data(size: Size, data: &str) -> Self {
        match Self::from_path_data(size, data) {
            Ok(svg) => svg,
            Err(err) => panic!("invalid SVG path data: {err}"),
        }
    }

    /// The original size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// The translated paths, in drawing order.
    pub fn shapes(&self) -> &[PathShape] {
        &self.shapes
    }

    /// Width to height ratio.
    pub fn aspect_ratio(&self) -> f64 {
        self.size.width / self.size.height
    }

    /// Offset that centers the image within `size` when scaled uniformly to fit it.
    pub fn offset_to_center_within_scaled_size(&self, size: Size) -> Point {
        let scale = (size.width / self.size.width).min(size.height / self.size.height);
        Point::new(
            (size.width - self.size.width * scale) / 2.0,
            (size.height - self.size.height * scale) / 2.0,
        )
    }

    /// Draw stretched to fill `rect`. If `paint` is given, every path is drawn with it instead
    /// of its own fill and stroke.
    pub fn draw_in_rect(&self, graphics: &mut dyn Graphics, rect: Rect, paint: Option<&Paint>) {
        if self.size.width <= 0.0 || self.size.height <= 0.0 {
            return;
        }
        let transform = Affine::translate(rect.origin().to_vec2())
            * Affine::scale_non_uniform(
                rect.width() / self.size.width,
                rect.height() / self.size.height,
            )
            * Affine::translate(-self.origin.to_vec2());
        for shape in &self.shapes {
            shape.draw(graphics, transform, paint);
        }
    }

    /// Draw as large as fits in `rect` without distortion, centered.
    pub fn draw_in_rect_preserving_aspect_ratio(
        &self,
        graphics: &mut dyn Graphics,
        rect: Rect,
        paint: Option<&Paint>,
    ) {
        let ratio = self.aspect_ratio();
        let mut width = rect.width();
        let mut height = width / ratio;
        if height > rect.height() {
            height = rect.height();
            width = height * ratio;
        }
        let x = rect.x0 + (rect.width() - width) / 2.0;
        let y = rect.y0 + (rect.height() - height) / 2.0;
        self.draw_in_rect(graphics, Rect::new(x, y, x + width, y + height), paint);
    }
}

impl FromStr for Svg {
    type Err = SvgError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        Self::parse_with(content, SvgOptions::default())
    }
}

/// An [Svg] drawn at a given logical size, optionally in a single paint.
#[derive(Debug, Clone)]
pub struct DrawableSvg {
    /// The image.
    pub svg: Arc<Svg>,
    /// Size reported to layout.
    pub size: Size,
    /// Replaces the image's own paints when set.
    pub paint: Option<Paint>,
}

impl DrawableSvg {
    /// Create a drawable at `size`, using the image's own paints.
    pub fn new(svg: Arc<Svg>, size: Size) -> Self {
        Self {
            svg,
            size,
            paint: None,
        }
    }

    /// Draw every path with `paint` instead.
    pub fn with_paint(mut self, paint: Paint) -> Self {
        self.paint = Some(paint);
        self
    }
}

impl Drawable for DrawableSvg {
    fn logical_size(&self) -> Size {
        self.size
    }

    fn draw_in_rect(&self, graphics: &mut dyn Graphics, rect: Rect) {
        self.svg
            .draw_in_rect_preserving_aspect_ratio(graphics, rect, self.paint.as_ref());
    }
}
