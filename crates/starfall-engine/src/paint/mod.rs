//! Paint model shared between effects and renderers.
//!
//! Scope is a single premultiplied color type; every shape renderer fills
//! with a solid color. Geometry types remain in `coords`.

pub mod color;

pub use color::Color;
