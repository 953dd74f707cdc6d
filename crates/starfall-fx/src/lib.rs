//! Starfield render loop.
//!
//! One [`RenderLoop`] per mounted view owns every piece of animated state:
//! the recycling star set, the pointer, the cumulative logo rotation and the
//! cycling hue. Each call to [`RenderLoop::frame`] paints the stars onto a
//! [`DrawSurface`] and pushes transform/color descriptors to the optional
//! [`VisualElement`]s. Scheduling of the next frame is the caller's job and
//! is gated on the returned [`FrameStatus`].

pub mod config;
pub mod effects;
pub mod motion;
pub mod pointer;
pub mod render_loop;
pub mod star;
pub mod surface;

pub use config::{BackgroundMode, StarfieldConfig};
pub use effects::{ElementStyle, ElementTransform, GlowLayer, HslColor, Projected, TiltEffect};
pub use pointer::PointerState;
pub use render_loop::{FrameStatus, RenderLoop};
pub use star::Star;
pub use surface::{BoundElements, DrawSurface, VisualElement};
