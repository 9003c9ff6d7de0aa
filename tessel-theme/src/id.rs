//! # Widget Identifiers
//!
//! A [WidgetId] names a widget type (not an instance) by namespace and type name.
//!
//! ```rust
//! use tessel_theme::id::WidgetId;
//!
//! let field = WidgetId::new("tessel-widgets", "Field");
//! assert_eq!(field.namespace(), "tessel-widgets");
//! assert_eq!(field.id(), "Field");
//! assert_eq!(field.to_string(), "tessel-widgets:Field");
//! ```

use std::fmt::{Display, Formatter};

/// An identifier for a widget type.
///
/// The namespace is usually the crate that defines the widget.
#[derive(Debug, Clone, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct WidgetId {
    namespace: String,
    id: String,
}

impl WidgetId {
    /// Create a new widget ID from a namespace and a type name.
    pub fn new(namespace: impl ToString, id: impl ToString) -> Self {
        Self {
            namespace: namespace.to_string(),
            id: id.to_string(),
        }
    }

    /// The namespace of the widget type.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The type name of the widget.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Display for WidgetId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.namespace, self.id)
    }
}
