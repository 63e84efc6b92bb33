//! Axis-aligned crop bounds and segment clipping.
//!
//! Bounds are inclusive on every axis. An axis that is not being cropped
//! is represented by `-inf..=+inf`, so containment and clipping need no
//! per-axis special cases.

use std::fmt;

use num_traits::Float;
use serde::{Deserialize, Serialize};

/// Cartesian axis.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        })
    }
}

/// Inclusive axis-aligned box `(x_min, y_min, z_min) .. (x_max, y_max, z_max)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl BoundingBox {
    pub fn new(min: [f32; 3], max: [f32; 3]) -> Self {
        Self { min, max }
    }

    /// Box that contains every finite and infinite point.
    pub fn unbounded() -> Self {
        Self {
            min: [f32::NEG_INFINITY; 3],
            max: [f32::INFINITY; 3],
        }
    }

    /// Box cropping only the axes whose flag is set; the rest are unbounded.
    pub fn from_axes(crop: [bool; 3], min: [f32; 3], max: [f32; 3]) -> Self {
        let mut bounds = Self::unbounded();
        for axis in 0..3 {
            if crop[axis] {
                bounds.min[axis] = min[axis];
                bounds.max[axis] = max[axis];
            }
        }
        bounds
    }

    /// Inclusive containment test on all three axes.
    #[inline]
    pub fn contains(&self, p: [f32; 3]) -> bool {
        (0..3).all(|axis| p[axis] >= self.min[axis] && p[axis] <= self.max[axis])
    }

    /// Slide `outside` along the segment from `inside` onto the box boundary.
    ///
    /// Returns `outside` unchanged when the clipped parameter range is empty.
    pub fn interpolate_outside_vertex(&self, inside: [f32; 3], outside: [f32; 3]) -> [f32; 3] {
        let mut t_min = 0.0f32;
        let mut t_max = 1.0f32;
        for axis in 0..3 {
            (t_min, t_max) = clip_axis(
                t_min,
                t_max,
                inside[axis],
                outside[axis],
                self.min[axis],
                self.max[axis],
            );
        }

        if t_min > t_max {
            return outside;
        }

        let t = t_max;
        [
            inside[0] + t * (outside[0] - inside[0]),
            inside[1] + t * (outside[1] - inside[1]),
            inside[2] + t * (outside[2] - inside[2]),
        ]
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}) and ({}, {}, {})",
            self.min[0], self.min[1], self.min[2], self.max[0], self.max[1], self.max[2]
        )
    }
}

/// Narrow `(t_min, t_max)` so that `v1 + t * (v2 - v1)` stays inside
/// `[vmin, vmax]` along one axis.
///
/// `v1` is the inside coordinate, `v2` the outside one.
pub fn clip_axis<F: Float>(mut t_min: F, mut t_max: F, v1: F, v2: F, vmin: F, vmax: F) -> (F, F) {
    if v1 < v2 {
        if v2 > vmax {
            t_max = t_max.min((vmax - v1) / (v2 - v1));
        }
        if v2 < vmin {
            t_min = t_min.max((vmin - v1) / (v2 - v1));
        }
    } else {
        if v2 < vmin {
            t_max = t_max.min((vmin - v1) / (v2 - v1));
        }
        if v2 > vmax {
            t_min = t_min.max((vmax - v1) / (v2 - v1));
        }
    }
    (t_min, t_max)
}
