use tessel_core::kurbo::{Affine, BezPath, PathEl, Point, Rect};
use tessel_core::peniko::{Color, Fill};

/// Sub-unit steps per coordinate unit in [FixedPoint].
pub const FIXED_ONE: f64 = 64.0;

/// A point in 26.6 fixed point: 64 steps per unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedPoint {
    /// Horizontal coordinate, in 1/64 units.
    pub x: i32,
    /// Vertical coordinate, in 1/64 units.
    pub y: i32,
}

impl FixedPoint {
    /// Round a floating point position to the nearest fixed point one.
    pub fn from_point(pt: Point) -> Self {
        Self {
            x: (pt.x * FIXED_ONE).round() as i32,
            y: (pt.y * FIXED_ONE).round() as i32,
        }
    }

    /// The position in whole units.
    pub fn to_point(self) -> Point {
        Point::new(f64::from(self.x) / FIXED_ONE, f64::from(self.y) / FIXED_ONE)
    }
}

/// One drawing operation of a document path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathOp {
    /// Start a new contour.
    MoveTo(FixedPoint),
    /// Straight segment.
    LineTo(FixedPoint),
    /// Quadratic curve: control point, end point.
    QuadTo(FixedPoint, FixedPoint),
    /// Cubic curve: two control points, end point.
    CubicTo(FixedPoint, FixedPoint, FixedPoint),
    /// Close the current contour.
    Close,
}

/// Convert parsed path geometry to document operations.
pub fn ops_from_bez_path(path: &BezPath) -> Vec<PathOp> {
    path.elements()
        .iter()
        .map(|el| match *el {
            PathEl::MoveTo(p) => PathOp::MoveTo(FixedPoint::from_point(p)),
            PathEl::LineTo(p) => PathOp::LineTo(FixedPoint::from_point(p)),
            PathEl::QuadTo(c, p) => {
                PathOp::QuadTo(FixedPoint::from_point(c), FixedPoint::from_point(p))
            }
            PathEl::CurveTo(c1, c2, p) => PathOp::CubicTo(
                FixedPoint::from_point(c1),
                FixedPoint::from_point(c2),
                FixedPoint::from_point(p),
            ),
            PathEl::ClosePath => PathOp::Close,
        })
        .collect()
}

/// Line end style as written in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CapMode {
    /// Not specified.
    #[default]
    Unset,
    /// `butt`
    Butt,
    /// `square`
    Square,
    /// `round`
    Round,
    /// `cubic`
    Cubic,
    /// `quadratic`
    Quadratic,
}

/// Corner style as written in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinMode {
    /// `arcs`
    Arc,
    /// `round`
    Round,
    /// `bevel`
    Bevel,
    /// `miter`
    #[default]
    Miter,
    /// `miter-clip`
    MiterClip,
    /// `arc-clip`
    ArcClip,
}

/// Coordinate space of gradient geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradientUnits {
    /// Fractions of the painted path's bounding box.
    #[default]
    ObjectBoundingBox,
    /// Absolute user coordinates.
    UserSpaceOnUse,
}

/// What a gradient does past its first and last stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpreadMethod {
    /// Extend the end colors.
    #[default]
    Pad,
    /// Mirror the ramp.
    Reflect,
    /// Tile the ramp.
    Repeat,
}

/// Gradient geometry, in gradient units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradientDirection {
    /// Ramp along the line from `(x1, y1)` to `(x2, y2)`.
    Linear {
        /// Start x.
        x1: f64,
        /// Start y.
        y1: f64,
        /// End x.
        x2: f64,
        /// End y.
        y2: f64,
    },
    /// Ramp from the focal circle out to the outer circle.
    Radial {
        /// Outer circle center x.
        cx: f64,
        /// Outer circle center y.
        cy: f64,
        /// Focal point x.
        fx: f64,
        /// Focal point y.
        fy: f64,
        /// Outer radius.
        r: f64,
        /// Focal radius.
        fr: f64,
    },
}

/// A gradient color stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Position along the ramp, 0 to 1.
    pub offset: f64,
    /// Stop color.
    pub color: Color,
    /// `stop-opacity`, multiplied into the color alpha.
    pub opacity: f64,
}

/// A `<linearGradient>` or `<radialGradient>`.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientDef {
    /// Geometry.
    pub direction: GradientDirection,
    /// Stops, expected in ascending offset order.
    pub stops: Vec<GradientStop>,
    /// Coordinate space of the geometry.
    pub units: GradientUnits,
    /// Edge behavior.
    pub spread: SpreadMethod,
    /// `gradientTransform`.
    pub transform: Affine,
}

/// A fill or stroke source.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    /// A single color.
    Plain(Color),
    /// A gradient.
    Gradient(GradientDef),
}

/// Resolved presentation attributes of one path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathStyle {
    /// Fill source. `None` means no fill.
    pub fill: Option<Pattern>,
    /// `fill-opacity`.
    pub fill_opacity: f64,
    /// `fill-rule`.
    pub fill_rule: Fill,
    /// Stroke source. `None` means no stroke.
    pub stroke: Option<Pattern>,
    /// `stroke-opacity`.
    pub stroke_opacity: f64,
    /// `stroke-width`.
    pub stroke_width: f64,
    /// `stroke-linecap`.
    pub cap: CapMode,
    /// `stroke-linejoin`.
    pub join: JoinMode,
    /// `stroke-miterlimit`.
    pub miter_limit: f64,
    /// `opacity`, accumulated through enclosing groups.
    pub opacity: f64,
    /// Transform to user space, accumulated through enclosing groups.
    pub transform: Affine,
}

impl PathStyle {
    /// Effective fill opacity.
    pub fn fill_alpha(&self) -> f64 {
        self.fill_opacity * self.opacity
    }

    /// Effective stroke opacity.
    pub fn stroke_alpha(&self) -> f64 {
        self.stroke_opacity * self.opacity
    }
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            fill: Some(Pattern::Plain(Color::BLACK)),
            fill_opacity: 1.0,
            fill_rule: Fill::NonZero,
            stroke: None,
            stroke_opacity: 1.0,
            stroke_width: 1.0,
            cap: CapMode::Unset,
            join: JoinMode::Miter,
            miter_limit: 4.0,
            opacity: 1.0,
            transform: Affine::IDENTITY,
        }
    }
}

/// A path element with its resolved style.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgPath {
    /// Geometry.
    pub ops: Vec<PathOp>,
    /// Presentation.
    pub style: PathStyle,
}

/// The supported subset of an SVG document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    /// `viewBox`, if present and non-empty.
    pub view_box: Option<Rect>,
    /// `width` attribute.
    pub width: Option<f64>,
    /// `height` attribute.
    pub height: Option<f64>,
    /// Paths in document order.
    pub paths: Vec<SvgPath>,
}
