//! Planar geometry for the refraction diagram.
//!
//! All coordinates are canvas coordinates: the origin sits at the top-left
//! corner, x grows to the right and y grows downwards. Angles measured on the
//! canvas follow the same convention, so an angle of `PI / 2` points straight
//! down and `-PI / 2` points straight up.
//!
//! The module provides:
//! - Display geometry derived from the canvas size
//! - Ray endpoints measured from the normal to the interface
//! - Per-axis clamping of points to the visible canvas
//! - Arc bounds for angle indicators and their bisectors

use std::f64::consts::FRAC_PI_2;

use nalgebra::{Point2, Vector2};
use serde::Serialize;


/// Layout metrics for one frame, derived from the current canvas size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DisplayGeometry {
    pub center: Point2<f64>,
    pub ray_length: f64,
    pub width: f64,
    pub height: f64,
}

/// Shortest ray that is still drawn on tiny canvases.
pub const MIN_RAY_LENGTH: f64 = 120.0;
/// Ray length as a fraction of the shorter canvas side.
pub const RAY_LENGTH_FRACTION: f64 = 0.45;

impl DisplayGeometry {
    pub fn from_canvas(width: f64, height: f64) -> Self {
        Self {
            center: Point2::new(width / 2.0, height / 2.0),
            ray_length: (width.min(height) * RAY_LENGTH_FRACTION).max(MIN_RAY_LENGTH),
            width,
            height,
        }
    }
}

/// Point at `radius` from `origin` in canvas angle `angle` (radians).
pub fn point_on_circle(origin: Point2<f64>, radius: f64, angle: f64) -> Point2<f64> {
    origin + Vector2::new(angle.cos(), angle.sin()) * radius
}

/// Start of the incident ray: upper half-plane, left of the normal.
pub fn ray_start_above(origin: Point2<f64>, length: f64, theta: f64) -> Point2<f64> {
    origin + Vector2::new(-theta.sin(), -theta.cos()) * length
}

/// End of a transmitted ray: lower half-plane, right of the normal.
pub fn ray_end_below(origin: Point2<f64>, length: f64, theta: f64) -> Point2<f64> {
    origin + Vector2::new(theta.sin(), theta.cos()) * length
}

/// End of a reflected ray: upper half-plane, right of the normal.
pub fn ray_end_mirrored(origin: Point2<f64>, length: f64, theta: f64) -> Point2<f64> {
    origin + Vector2::new(theta.sin(), -theta.cos()) * length
}

/// Clamps each coordinate independently to `[0, width] x [0, height]`.
///
/// This does not preserve the direction of the ray, so a clamped ray may look
/// shorter or slightly bent near the canvas edges.
pub fn clamp_point(point: Point2<f64>, width: f64, height: f64) -> Point2<f64> {
    Point2::new(point.x.clamp(0.0, width), point.y.clamp(0.0, height))
}

/// Angular extent of an angle indicator, in canvas radians, swept clockwise
/// on screen from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArcBounds {
    pub start: f64,
    pub end: f64,
}

impl ArcBounds {
    /// From the incident ray up to the upward normal.
    pub fn incident(theta: f64) -> Self {
        Self {
            start: -FRAC_PI_2 - theta,
            end: -FRAC_PI_2,
        }
    }

    /// From the transmitted ray to the downward normal.
    pub fn transmitted(theta: f64) -> Self {
        Self {
            start: FRAC_PI_2 - theta,
            end: FRAC_PI_2,
        }
    }

    /// From the upward normal to the reflected ray.
    pub fn reflected(theta: f64) -> Self {
        Self {
            start: -FRAC_PI_2,
            end: -FRAC_PI_2 + theta,
        }
    }

    pub fn bisector(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn sweep(&self) -> f64 {
        self.end - self.start
    }
}

/// Anchor of a floating angle label: on the arc bisector at `radius`, shifted
/// horizontally by `x_offset`.
pub fn label_anchor(
    origin: Point2<f64>,
    bounds: &ArcBounds,
    radius: f64,
    x_offset: f64,
) -> Point2<f64> {
    point_on_circle(origin, radius, bounds.bisector()) + Vector2::new(x_offset, 0.0)
}
