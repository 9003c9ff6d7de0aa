//! Palette API for widgets.
//!
//! The Palette is the widget-facing store of theme colors, metrics and alignments. Widget
//! themes read from it once at construction time.

use std::collections::HashMap;
use std::time::Duration;
use vello::peniko::Color;

use crate::roles::{AlignmentRole, ColorRole, MetricRole, TextAlignment};

/// Role-keyed theme values. Unset roles fall back to their built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    colors: HashMap<ColorRole, Color>,
    metrics: HashMap<MetricRole, f64>,
    alignments: HashMap<AlignmentRole, TextAlignment>,
}

impl Palette {
    /// Create a palette holding only the built-in defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a color for the given role.
    pub fn color(&self, role: ColorRole) -> Color {
        self.colors
            .get(&role)
            .copied()
            .unwrap_or_else(|| role.default_color())
    }

    /// Set a color for the given role.
    pub fn set_color(&mut self, role: ColorRole, color: Color) {
        self.colors.insert(role, color);
    }

    /// Get a metric value for the given role.
    pub fn metric(&self, role: MetricRole) -> f64 {
        self.metrics
            .get(&role)
            .copied()
            .unwrap_or_else(|| role.default_value())
    }

    /// Set a metric value for the given role.
    pub fn set_metric(&mut self, role: MetricRole, value: f64) {
        self.metrics.insert(role, value);
    }

    /// Get a metric value interpreted as milliseconds.
    pub fn duration(&self, role: MetricRole) -> Duration {
        Duration::from_millis(self.metric(role).max(0.0) as u64)
    }

    /// Get an alignment for the given role.
    pub fn alignment(&self, role: AlignmentRole) -> TextAlignment {
        self.alignments.get(&role).copied().unwrap_or_default()
    }

    /// Set an alignment for the given role.
    pub fn set_alignment(&mut self, role: AlignmentRole, alignment: TextAlignment) {
        self.alignments.insert(role, alignment);
    }

    /// Overlay every explicitly set value of `other` onto this palette.
    pub fn merge(&mut self, other: Palette) {
        self.colors.extend(other.colors);
        self.metrics.extend(other.metrics);
        self.alignments.extend(other.alignments);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_overrides() {
        let mut palette = Palette::new();
        assert_eq!(palette.metric(MetricRole::TabGap), 4.0);
        assert_eq!(palette.duration(MetricRole::BlinkRate), Duration::from_millis(560));

        palette.set_metric(MetricRole::TabGap, 6.0);
        palette.set_alignment(AlignmentRole::FieldAlignment, TextAlignment::End);
        assert_eq!(palette.metric(MetricRole::TabGap), 6.0);
        assert_eq!(palette.alignment(AlignmentRole::FieldAlignment), TextAlignment::End);
    }

    #[test]
    fn test_merge_keeps_unset_values() {
        let mut base = Palette::new();
        base.set_metric(MetricRole::MinimumTabWidth, 70.0);
        let mut overlay = Palette::new();
        overlay.set_metric(MetricRole::TabGap, 2.0);
        base.merge(overlay);
        assert_eq!(base.metric(MetricRole::MinimumTabWidth), 70.0);
        assert_eq!(base.metric(MetricRole::TabGap), 2.0);
    }
}
