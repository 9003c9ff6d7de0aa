//! Turns document paths into drawable geometry and paints.

use tessel_core::kurbo::{Affine, BezPath, Cap, Join, Point, Rect, Stroke};
use tessel_core::peniko::{Brush, Color, Extend, Fill, Gradient};
use tessel_core::vgi::Graphics;

use super::document::{
    CapMode, GradientDef, GradientDirection, GradientUnits, JoinMode, PathOp, PathStyle, Pattern,
    SpreadMethod, SvgPath,
};
use super::error::SvgError;

/// Where a gradient ramp lies, in path coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradientGeometry {
    /// Along a line.
    Linear {
        /// Start of the ramp.
        start: Point,
        /// End of the ramp.
        end: Point,
    },
    /// Outward from a center.
    Radial {
        /// Center.
        center: Point,
        /// Radius at the last stop.
        radius: f64,
    },
    /// From one circle to another.
    TwoPointConical {
        /// Center of the first circle.
        start: Point,
        /// Radius of the first circle.
        start_radius: f64,
        /// Center of the second circle.
        end: Point,
        /// Radius of the second circle.
        end_radius: f64,
    },
}

/// A gradient ready to become a brush.
#[derive(Debug, Clone, PartialEq)]
pub struct Shader {
    /// Ramp geometry.
    pub geometry: GradientGeometry,
    /// Offsets and colors, opacity already applied.
    pub stops: Vec<(f32, Color)>,
    /// Edge behavior.
    pub extend: Extend,
    /// Applied to the brush, not the shape.
    pub transform: Affine,
}

/// Color source of a [Paint].
#[derive(Debug, Clone, PartialEq)]
pub enum PaintSource {
    /// One color.
    Solid(Color),
    /// A gradient.
    Gradient(Shader),
}

/// How to fill or stroke a path.
#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
    /// Color source.
    pub source: PaintSource,
    /// Stroke parameters. `None` fills.
    pub stroke: Option<Stroke>,
}

impl Paint {
    /// A solid fill.
    pub fn fill(color: Color) -> Self {
        Self {
            source: PaintSource::Solid(color),
            stroke: None,
        }
    }

    /// A solid stroke of the given width.
    pub fn stroke(color: Color, width: f64) -> Self {
        Self {
            source: PaintSource::Solid(color),
            stroke: Some(Stroke::new(width)),
        }
    }

    /// The brush to draw with.
    pub fn brush(&self) -> Brush {
        match &self.source {
            PaintSource::Solid(color) => Brush::Solid(*color),
            PaintSource::Gradient(shader) => {
                let gradient = match shader.geometry {
                    GradientGeometry::Linear { start, end } => Gradient::new_linear(start, end),
                    GradientGeometry::Radial { center, radius } => {
                        Gradient::new_radial(center, radius as f32)
                    },
                    GradientGeometry::TwoPointConical {
                        start,
                        start_radius,
                        end,
                        end_radius,
                    } => Gradient::new_two_point_radial(
                        start,
                        start_radius as f32,
                        end,
                        end_radius as f32,
                    ),
                };
                Brush::Gradient(
                    gradient
                        .with_extend(shader.extend)
                        .with_stops(shader.stops.as_slice()),
                )
            },
        }
    }

    /// The brush transform, when it is not the identity.
    pub fn brush_transform(&self) -> Option<Affine> {
        match &self.source {
            PaintSource::Gradient(shader) if shader.transform != Affine::IDENTITY => {
                Some(shader.transform)
            },
            _ => None,
        }
    }
}

/// A translated path: geometry plus the paints to draw it with. A missing paint means that
/// part is not drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct PathShape {
    /// Geometry, with the element transform applied.
    pub path: BezPath,
    /// Winding rule for fills.
    pub fill_rule: Fill,
    /// Fill paint.
    pub fill: Option<Paint>,
    /// Stroke paint.
    pub stroke: Option<Paint>,
}

impl PathShape {
    /// Draw the fill, then the stroke. `paint`, when given, replaces both.
    pub fn draw(&self, graphics: &mut dyn Graphics, transform: Affine, paint: Option<&Paint>) {
        match paint {
            Some(paint) => self.draw_with(graphics, transform, paint),
            None => {
                for paint in [&self.fill, &self.stroke].into_iter().flatten() {
                    self.draw_with(graphics, transform, paint);
                }
            },
        }
    }

    fn draw_with(&self, graphics: &mut dyn Graphics, transform: Affine, paint: &Paint) {
        let brush = paint.brush();
        match &paint.stroke {
            Some(stroke) => graphics.stroke(
                stroke,
                transform,
                &brush,
                paint.brush_transform(),
                &self.path,
            ),
            None => graphics.fill(
                self.fill_rule,
                transform,
                &brush,
                paint.brush_transform(),
                &self.path,
            ),
        }
    }
}

/// Translate one document path.
///
/// Fails with [SvgError::UnsupportedStyle] for styles that cannot be drawn, unless
/// `ignore_unsupported` is set, in which case a safe substitute is used.
pub fn translate(svg_path: &SvgPath, ignore_unsupported: bool) -> Result<PathShape, SvgError> {
    let path = build_path(&svg_path.ops, svg_path.style.transform);
    let bounds = path.control_box();
    let style = &svg_path.style;
    Ok(PathShape {
        fill: fill_paint(style, bounds, ignore_unsupported)?,
        stroke: stroke_paint(style, bounds, ignore_unsupported)?,
        fill_rule: style.fill_rule,
        path,
    })
}

/// Replay fixed point operations, then apply `transform`.
pub fn build_path(ops: &[PathOp], transform: Affine) -> BezPath {
    let mut path = BezPath::new();
    for op in ops {
        match *op {
            PathOp::MoveTo(p) => path.move_to(p.to_point()),
            PathOp::LineTo(p) => path.line_to(p.to_point()),
            PathOp::QuadTo(c, p) => path.quad_to(c.to_point(), p.to_point()),
            PathOp::CubicTo(c1, c2, p) => path.curve_to(c1.to_point(), c2.to_point(), p.to_point()),
            PathOp::Close => path.close_path(),
        }
    }
    if transform != Affine::IDENTITY {
        path.apply_affine(transform);
    }
    path
}

fn fill_paint(
    style: &PathStyle,
    bounds: Rect,
    ignore_unsupported: bool,
) -> Result<Option<Paint>, SvgError> {
    let Some(pattern) = &style.fill else {
        return Ok(None);
    };
    let opacity = style.fill_alpha();
    if opacity == 0.0 {
        return Ok(None);
    }
    Ok(Some(Paint {
        source: paint_source(pattern, opacity, bounds, ignore_unsupported)?,
        stroke: None,
    }))
}

fn stroke_paint(
    style: &PathStyle,
    bounds: Rect,
    ignore_unsupported: bool,
) -> Result<Option<Paint>, SvgError> {
    let Some(pattern) = &style.stroke else {
        return Ok(None);
    };
    let opacity = style.stroke_alpha();
    if opacity == 0.0 || style.stroke_width == 0.0 {
        return Ok(None);
    }
    let cap = match style.cap {
        CapMode::Unset | CapMode::Butt => Cap::Butt,
        CapMode::Square => Cap::Square,
        CapMode::Round => Cap::Round,
        CapMode::Cubic | CapMode::Quadratic => {
            unsupported(ignore_unsupported, format!("stroke cap {:?}", style.cap), Cap::Butt)?
        },
    };
    let join = match style.join {
        JoinMode::Round => Join::Round,
        JoinMode::Bevel => Join::Bevel,
        JoinMode::Miter | JoinMode::MiterClip | JoinMode::Arc => Join::Miter,
        JoinMode::ArcClip => {
            unsupported(ignore_unsupported, format!("stroke join {:?}", style.join), Join::Round)?
        },
    };
    let stroke = Stroke::new(style.stroke_width)
        .with_caps(cap)
        .with_join(join)
        .with_miter_limit(style.miter_limit);
    Ok(Some(Paint {
        source: paint_source(pattern, opacity, bounds, ignore_unsupported)?,
        stroke: Some(stroke),
    }))
}

fn unsupported<T>(ignore: bool, what: String, substitute: T) -> Result<T, SvgError> {
    if ignore {
        log::debug!("SVG: substituting for unsupported {what}");
        Ok(substitute)
    } else {
        Err(SvgError::UnsupportedStyle(what))
    }
}

fn paint_source(
    pattern: &Pattern,
    opacity: f64,
    bounds: Rect,
    ignore_unsupported: bool,
) -> Result<PaintSource, SvgError> {
    match pattern {
        Pattern::Plain(color) => Ok(PaintSource::Solid(color.multiply_alpha(opacity as f32))),
        Pattern::Gradient(gradient) => {
            if gradient.units == GradientUnits::UserSpaceOnUse {
                return unsupported(
                    ignore_unsupported,
                    r#"gradientUnits="userSpaceOnUse""#.to_string(),
                    PaintSource::Solid(Color::BLACK),
                );
            }
            Ok(PaintSource::Gradient(shader(gradient, opacity, bounds)))
        },
    }
}

fn shader(gradient: &GradientDef, opacity: f64, bounds: Rect) -> Shader {
    let stops = gradient
        .stops
        .iter()
        .map(|stop| {
            let alpha = (stop.opacity * opacity) as f32;
            (stop.offset as f32, stop.color.multiply_alpha(alpha))
        })
        .collect();
    let geometry = match gradient.direction {
        GradientDirection::Linear { x1, y1, x2, y2 } => GradientGeometry::Linear {
            start: gradient_point(bounds, x1, y1),
            end: gradient_point(bounds, x2, y2),
        },
        GradientDirection::Radial {
            cx,
            cy,
            fx,
            fy,
            r,
            fr,
        } => {
            if cx == fx && cy == fy {
                GradientGeometry::Radial {
                    center: gradient_point(bounds, cx, cy),
                    radius: gradient_radius(bounds, r),
                }
            } else {
                GradientGeometry::TwoPointConical {
                    start: gradient_point(bounds, fx, fy),
                    start_radius: gradient_radius(bounds, fr),
                    end: gradient_point(bounds, cx, cy),
                    end_radius: gradient_radius(bounds, r),
                }
            }
        },
    };
    Shader {
        geometry,
        stops,
        extend: match gradient.spread {
            SpreadMethod::Pad => Extend::Pad,
            SpreadMethod::Reflect => Extend::Reflect,
            SpreadMethod::Repeat => Extend::Repeat,
        },
        transform: gradient.transform,
    }
}

/// Map a bounding box fraction to a point.
fn gradient_point(bounds: Rect, x: f64, y: f64) -> Point {
    Point::new(
        bounds.x0 + bounds.width() * x,
        bounds.y0 + bounds.height() * y,
    )
}

/// Map a bounding box fraction to a radius. Non-square boxes use the mean of width and height.
fn gradient_radius(bounds: Rect, r: f64) -> f64 {
    (bounds.width() + bounds.height()) / 2.0 * r
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svg::document::{FixedPoint, GradientStop};

    fn square(style: PathStyle) -> SvgPath {
        let corner = |x: i32, y: i32| FixedPoint { x: x * 64, y: y * 64 };
        SvgPath {
            ops: vec![
                PathOp::MoveTo(corner(0, 0)),
                PathOp::LineTo(corner(10, 0)),
                PathOp::LineTo(corner(10, 20)),
                PathOp::LineTo(corner(0, 20)),
                PathOp::Close,
            ],
            style,
        }
    }

    fn radial(fx: f64) -> Pattern {
        Pattern::Gradient(GradientDef {
            direction: GradientDirection::Radial {
                cx: 0.5,
                cy: 0.5,
                fx,
                fy: 0.5,
                r: 0.5,
                fr: 0.0,
            },
            stops: vec![GradientStop {
                offset: 0.0,
                color: Color::WHITE,
                opacity: 0.5,
            }],
            units: GradientUnits::ObjectBoundingBox,
            spread: SpreadMethod::Repeat,
            transform: Affine::IDENTITY,
        })
    }

    #[test]
    fn test_presence_rules() {
        let shape = translate(&square(PathStyle::default()), false).unwrap();
        assert_eq!(shape.fill, Some(Paint::fill(Color::BLACK)));
        assert_eq!(shape.stroke, None);

        let style = PathStyle {
            fill_opacity: 0.0,
            stroke: Some(Pattern::Plain(Color::BLACK)),
            stroke_width: 0.0,
            ..PathStyle::default()
        };
        let shape = translate(&square(style), false).unwrap();
        assert_eq!(shape.fill, None);
        assert_eq!(shape.stroke, None);
    }

    #[test]
    fn test_radial_radius_uses_mean_extent() {
        let style = PathStyle {
            fill: Some(radial(0.5)),
            ..PathStyle::default()
        };
        let shape = translate(&square(style), false).unwrap();
        let Some(Paint {
            source: PaintSource::Gradient(shader),
            ..
        }) = shape.fill
        else {
            panic!("expected a gradient");
        };
        assert_eq!(
            shader.geometry,
            GradientGeometry::Radial {
                center: Point::new(5.0, 10.0),
                radius: 7.5
            }
        );
        assert_eq!(shader.extend, Extend::Repeat);
        assert_eq!(shader.stops, vec![(0.0, Color::WHITE.multiply_alpha(0.5))]);
    }

    #[test]
    fn test_offset_focus_becomes_two_point_conical() {
        let style = PathStyle {
            fill: Some(radial(0.0)),
            ..PathStyle::default()
        };
        let shape = translate(&square(style), false).unwrap();
        let Some(Paint {
            source: PaintSource::Gradient(shader),
            ..
        }) = shape.fill
        else {
            panic!("expected a gradient");
        };
        assert_eq!(
            shader.geometry,
            GradientGeometry::TwoPointConical {
                start: Point::new(0.0, 10.0),
                start_radius: 0.0,
                end: Point::new(5.0, 10.0),
                end_radius: 7.5
            }
        );
    }

    #[test]
    fn test_unsupported_caps_and_joins() {
        let style = PathStyle {
            stroke: Some(Pattern::Plain(Color::BLACK)),
            cap: CapMode::Cubic,
            ..PathStyle::default()
        };
        assert!(matches!(
            translate(&square(style.clone()), false),
            Err(SvgError::UnsupportedStyle(_))
        ));
        let shape = translate(&square(style), true).unwrap();
        let stroke = shape.stroke.and_then(|paint| paint.stroke).unwrap();
        assert_eq!(stroke.start_cap, Cap::Butt);

        let style = PathStyle {
            stroke: Some(Pattern::Plain(Color::BLACK)),
            join: JoinMode::ArcClip,
            ..PathStyle::default()
        };
        let shape = translate(&square(style), true).unwrap();
        assert_eq!(shape.stroke.and_then(|paint| paint.stroke).unwrap().join, Join::Round);

        let style = PathStyle {
            stroke: Some(Pattern::Plain(Color::BLACK)),
            join: JoinMode::MiterClip,
            ..PathStyle::default()
        };
        let shape = translate(&square(style), false).unwrap();
        assert_eq!(shape.stroke.and_then(|paint| paint.stroke).unwrap().join, Join::Miter);
    }

    #[test]
    fn test_transform_applies_after_replay() {
        let style = PathStyle {
            transform: Affine::translate((5.0, 5.0)),
            ..PathStyle::default()
        };
        let shape = translate(&square(style), false).unwrap();
        assert_eq!(shape.path.control_box(), Rect::new(5.0, 5.0, 15.0, 25.0));
    }
}
