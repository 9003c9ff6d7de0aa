//! Vector Graphics Interface abstraction.
//!
//! Widgets draw through [Graphics] so they are not tied to a particular backend.
//! [VelloGraphics](vello_vg::VelloGraphics) records into a `vello::Scene`.

use tessel_theme::border::Border;
use vello::kurbo::{Affine, BezPath, Rect, Shape, Size, Stroke};
use vello::peniko::{Brush, Color, Fill, Mix};

/// A trait for rendering vector graphics.
///
/// Methods take `&BezPath` to stay object-safe; convert concrete shapes with [shape_to_path].
pub trait Graphics {
    /// Fill a shape with the given brush.
    fn fill(
        &mut self,
        fill_rule: Fill,
        transform: Affine,
        brush: &Brush,
        brush_transform: Option<Affine>,
        shape: &BezPath,
    );

    /// Stroke a shape with the given brush.
    fn stroke(
        &mut self,
        style: &Stroke,
        transform: Affine,
        brush: &Brush,
        brush_transform: Option<Affine>,
        shape: &BezPath,
    );

    /// Append another scene to this one.
    fn append(&mut self, other: &vello::Scene, transform: Option<Affine>);

    /// Push a layer clipped to `shape`.
    fn push_layer(&mut self, mix: Mix, alpha: f32, transform: Affine, shape: &BezPath);

    /// Pop the most recent layer.
    fn pop_layer(&mut self);

    /// Access the underlying Scene for operations that require it (e.g. glyph drawing).
    /// Returns None if the backend doesn't provide Scene access.
    fn as_scene_mut(&mut self) -> Option<&mut vello::Scene>;
}

/// Something with a natural size that can draw itself scaled into a rectangle.
pub trait Drawable {
    /// The size the drawable would like to be drawn at.
    fn logical_size(&self) -> Size;

    /// Draw scaled to fill `rect`.
    fn draw_in_rect(&self, graphics: &mut dyn Graphics, rect: Rect);
}

/// Helper function to convert a shape to BezPath for use with Graphics trait.
pub fn shape_to_path(shape: &impl Shape) -> BezPath {
    shape.to_path(0.1)
}

/// Fill `rect` with a solid color.
pub fn fill_rect(graphics: &mut dyn Graphics, rect: Rect, color: Color) {
    graphics.fill(
        Fill::NonZero,
        Affine::IDENTITY,
        &Brush::Solid(color),
        None,
        &shape_to_path(&rect),
    );
}

/// Clip subsequent drawing to `rect` until the matching [Graphics::pop_layer].
pub fn push_clip(graphics: &mut dyn Graphics, rect: Rect) {
    graphics.push_layer(Mix::Clip, 1.0, Affine::IDENTITY, &shape_to_path(&rect));
}

/// Draw the line part of `border` just inside `rect`. Padding draws nothing.
pub fn draw_border(graphics: &mut dyn Graphics, rect: Rect, border: &Border) {
    let Some(line) = border.line else {
        return;
    };
    let insets = line.insets;
    let edges = [
        Rect::new(rect.x0, rect.y0, rect.x1, rect.y0 + insets.top),
        Rect::new(rect.x0, rect.y1 - insets.bottom, rect.x1, rect.y1),
        Rect::new(
            rect.x0,
            rect.y0 + insets.top,
            rect.x0 + insets.left,
            rect.y1 - insets.bottom,
        ),
        Rect::new(
            rect.x1 - insets.right,
            rect.y0 + insets.top,
            rect.x1,
            rect.y1 - insets.bottom,
        ),
    ];
    for edge in edges {
        if edge.width() > 0.0 && edge.height() > 0.0 {
            fill_rect(graphics, edge, line.color);
        }
    }
}

/// A default graphics implementation using Vello.
pub mod vello_vg;

/// A [Graphics] that records calls, for headless inspection.
pub mod recording;
