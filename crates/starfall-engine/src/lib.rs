//! Starfall engine crate.
//!
//! Owns the platform + GPU runtime pieces used by the welcome screen:
//! window loop, input translation, frame timing, draw lists and the
//! instanced shape renderers.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
