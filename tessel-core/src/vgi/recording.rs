use crate::vgi::Graphics;
use vello::kurbo::{Affine, BezPath, Rect, Shape, Stroke};
use vello::peniko::{Brush, Fill, Mix};

/// One recorded drawing call.
#[derive(Debug, Clone)]
pub enum DrawCall {
    /// A fill.
    Fill {
        /// Brush used.
        brush: Brush,
        /// Brush transform, if any.
        brush_transform: Option<Affine>,
        /// Bounds of the filled shape after `transform`.
        bounds: Rect,
    },
    /// A stroke.
    Stroke {
        /// Stroke width.
        width: f64,
        /// Brush used.
        brush: Brush,
        /// Bounds of the stroked shape after `transform`.
        bounds: Rect,
    },
    /// A clip or blend layer.
    PushLayer {
        /// Bounds of the layer shape after `transform`.
        bounds: Rect,
    },
    /// End of a layer.
    PopLayer,
    /// An appended scene.
    Append,
}

/// A [Graphics] that keeps a list of calls instead of rendering.
#[derive(Debug, Default)]
pub struct RecordingGraphics {
    /// Calls in the order they were made.
    pub calls: Vec<DrawCall>,
}

impl RecordingGraphics {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded fill, as (brush, bounds).
    pub fn fills(&self) -> impl Iterator<Item = (&Brush, Rect)> {
        self.calls.iter().filter_map(|call| match call {
            DrawCall::Fill { brush, bounds, .. } => Some((brush, *bounds)),
            _ => None,
        })
    }
}

impl Graphics for RecordingGraphics {
    fn fill(
        &mut self,
        _fill_rule: Fill,
        transform: Affine,
        brush: &Brush,
        brush_transform: Option<Affine>,
        shape: &BezPath,
    ) {
        self.calls.push(DrawCall::Fill {
            brush: brush.clone(),
            brush_transform,
            bounds: (transform * shape.clone()).bounding_box(),
        });
    }

    fn stroke(
        &mut self,
        style: &Stroke,
        transform: Affine,
        brush: &Brush,
        _brush_transform: Option<Affine>,
        shape: &BezPath,
    ) {
        self.calls.push(DrawCall::Stroke {
            width: style.width,
            brush: brush.clone(),
            bounds: (transform * shape.clone()).bounding_box(),
        });
    }

    fn append(&mut self, _other: &vello::Scene, _transform: Option<Affine>) {
        self.calls.push(DrawCall::Append);
    }

    fn push_layer(&mut self, _mix: Mix, _alpha: f32, transform: Affine, shape: &BezPath) {
        self.calls.push(DrawCall::PushLayer {
            bounds: (transform * shape.clone()).bounding_box(),
        });
    }

    fn pop_layer(&mut self) {
        self.calls.push(DrawCall::PopLayer);
    }

    fn as_scene_mut(&mut self) -> Option<&mut vello::Scene> {
        None
    }
}
