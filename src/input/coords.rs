//! Coordinate conversion between world space and screen space.
//!
//! Node positions live in world space. Pointer and wheel events arrive in
//! screen space. The [`Transform`] maps one onto the other:
//!
//! ```text
//! screen = world * scale + (x, y)
//! world  = (screen - (x, y)) / scale
//! ```

use crate::constants::{DEFAULT_TRANSFORM, MAX_SCALE, MIN_SCALE};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A point in either world or screen space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

/// A width/height pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Center of a box of this size whose origin is at (0, 0)
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Inclusive scale bounds applied to every zoom request.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScaleBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for ScaleBounds {
    fn default() -> Self {
        Self {
            min: MIN_SCALE,
            max: MAX_SCALE,
        }
    }
}

impl ScaleBounds {
    #[inline]
    pub fn clamp(&self, scale: f64) -> f64 {
        scale.clamp(self.min, self.max)
    }

    pub fn contains(&self, scale: f64) -> bool {
        scale >= self.min && scale <= self.max
    }
}

/// Affine world-to-screen map: translation plus uniform scale.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        let (x, y, scale) = DEFAULT_TRANSFORM;
        Self { x, y, scale }
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        x: 0.0,
        y: 0.0,
        scale: 1.0,
    };

    #[inline]
    pub const fn new(x: f64, y: f64, scale: f64) -> Self {
        Self { x, y, scale }
    }

    /// Convert a screen position to world position
    #[inline]
    pub fn to_world(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.x) / self.scale,
            (screen.y - self.y) / self.scale,
        )
    }

    /// Convert a world position to screen position
    #[inline]
    pub fn to_screen(&self, world: Point) -> Point {
        Point::new(world.x * self.scale + self.x, world.y * self.scale + self.y)
    }

    /// Convert a screen-space delta to world units (for drag operations)
    #[inline]
    pub fn delta_to_world(&self, delta: Point) -> Point {
        Point::new(delta.x / self.scale, delta.y / self.scale)
    }

    /// Zoom by `factor` keeping the world point under `anchor` fixed on screen.
    ///
    /// The scale is clamped before the translation is solved, so the anchor
    /// stays put for whatever part of the zoom is actually applied.
    pub fn zoom_at(&self, anchor: Point, factor: f64, bounds: ScaleBounds) -> Transform {
        self.zoom_to(anchor, self.scale * factor, bounds)
    }

    /// Set an absolute scale keeping the world point under `anchor` fixed.
    pub fn zoom_to(&self, anchor: Point, scale: f64, bounds: ScaleBounds) -> Transform {
        let new_scale = bounds.clamp(scale);
        let ratio = new_scale / self.scale;
        Transform {
            x: anchor.x - (anchor.x - self.x) * ratio,
            y: anchor.y - (anchor.y - self.y) * ratio,
            scale: new_scale,
        }
    }

    /// Translate by a wheel delta (content moves opposite to the wheel)
    #[inline]
    pub fn pan_by_wheel(&self, delta: Point) -> Transform {
        Transform {
            x: self.x - delta.x,
            y: self.y - delta.y,
            scale: self.scale,
        }
    }

    /// Translate by a pointer delta (content follows the pointer)
    #[inline]
    pub fn pan_by(&self, delta: Point) -> Transform {
        Transform {
            x: self.x + delta.x,
            y: self.y + delta.y,
            scale: self.scale,
        }
    }

    /// Zoom level as a rounded percentage for display
    pub fn zoom_percent(&self) -> u32 {
        (self.scale * 100.0).round() as u32
    }
}

/// Zoom factor for a wheel event: `exp(-delta_y * sensitivity)`.
#[inline]
pub fn wheel_zoom_factor(delta_y: f64, sensitivity: f64) -> f64 {
    (-delta_y * sensitivity).exp()
}
