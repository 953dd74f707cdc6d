//! Time-driven state that animates the bound elements: the cumulative
//! three-axis rotation and the cycling hue.

use rand::Rng;

use crate::effects::HslColor;

/// Frames between rotation-speed rerolls. The reroll happens on the frame
/// the counter first exceeds this value.
pub const SPEED_REROLL_FRAMES: u32 = 200;

/// Speed assigned to every axis at activation, in degrees per frame.
pub const INITIAL_SPEED: f32 = 0.2;

/// Reroll band for each axis speed: `[MIN_SPEED, MIN_SPEED + SPEED_SPAN)`.
pub const MIN_SPEED: f32 = 0.1;
pub const SPEED_SPAN: f32 = 0.5;

/// Per-frame hue increment band: `[MIN_HUE_STEP, MIN_HUE_STEP + HUE_STEP_SPAN)`.
pub const MIN_HUE_STEP: f32 = 0.5;
pub const HUE_STEP_SPAN: f32 = 2.0;

/// A value per rotation axis, in degrees.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Axes {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Axes {
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
    }
}

/// Cumulative rotation with a periodically rerolled speed.
#[derive(Debug, Clone, PartialEq)]
pub struct Rotation {
    pub angles: Axes,
    pub speed: Axes,
    timer: u32,
}

impl Default for Rotation {
    fn default() -> Self {
        Self {
            angles: Axes::default(),
            speed: Axes::splat(INITIAL_SPEED),
            timer: 0,
        }
    }
}

impl Rotation {
    /// Frames counted since the last reroll.
    #[inline]
    pub fn timer(&self) -> u32 {
        self.timer
    }

    /// Advances one frame. Returns `true` when the speeds were rerolled.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        self.timer += 1;

        let rerolled = self.timer > SPEED_REROLL_FRAMES;
        if rerolled {
            self.speed = Axes {
                x: rng.random::<f32>() * SPEED_SPAN + MIN_SPEED,
                y: rng.random::<f32>() * SPEED_SPAN + MIN_SPEED,
                z: rng.random::<f32>() * SPEED_SPAN + MIN_SPEED,
            };
            self.timer = 0;
            log::debug!(
                "rotation speed rerolled to ({:.3}, {:.3}, {:.3})",
                self.speed.x,
                self.speed.y,
                self.speed.z
            );
        }

        self.angles.x += self.speed.x;
        self.angles.y += self.speed.y;
        self.angles.z += self.speed.z;

        rerolled
    }
}

/// Hue in `[0, 360)` advanced by a random step each frame.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct HueCycle {
    hue: f32,
}

impl HueCycle {
    #[inline]
    pub fn hue(&self) -> f32 {
        self.hue
    }

    /// Advances one frame. Reaching 360 resets to exactly 0 rather than
    /// carrying the remainder.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.hue += rng.random::<f32>() * HUE_STEP_SPAN + MIN_HUE_STEP;
        if self.hue >= 360.0 {
            self.hue = 0.0;
        }
    }

    /// The glow color: full saturation, 60% lightness.
    #[inline]
    pub fn color(&self) -> HslColor {
        HslColor::glow(self.hue)
    }
}
