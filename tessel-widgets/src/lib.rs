#![warn(missing_docs)]

//! Widget library for tessel => See `tessel` crate.
//!
//! Contains the editable [Field](field::Field), the [DockHeader](dock::DockHeader) with its
//! tab packer, and the [Svg](svg::Svg) path translator.

/// Contains the [field::Field] widget.
pub mod field;

/// Contains the [dock::DockHeader] widget and the tab packing algorithm.
pub mod dock;

/// Contains the [svg::Svg] document type and its translation into drawable paths and paints.
pub mod svg;
