//! Axis-aligned bounding boxes.

use std::fmt;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::{NeurocanvasError, Result};

/// One of the three coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in x, y, z order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Returns the component of `v` along this axis.
    #[must_use]
    pub fn component(self, v: DVec3) -> f64 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

/// An axis-aligned box given by its minimum and maximum corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: DVec3,
    pub max: DVec3,
}

impl BoundingBox {
    /// Creates a bounding box from its corners.
    #[must_use]
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Computes the tightest box around `points`.
    ///
    /// Returns `None` when `points` is empty.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a DVec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), p| (min.min(*p), max.max(*p)));
        Some(Self { min, max })
    }

    /// Returns `max - min` per axis.
    #[must_use]
    pub fn extent(&self) -> DVec3 {
        self.max - self.min
    }

    /// Returns the center of the box.
    #[must_use]
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Returns the enclosed volume (zero if any extent is non-positive).
    #[must_use]
    pub fn volume(&self) -> f64 {
        let e = self.extent().max(DVec3::ZERO);
        e.x * e.y * e.z
    }

    /// Returns true if `p` lies inside the box or on its boundary.
    #[must_use]
    pub fn contains(&self, p: DVec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Returns the smallest box containing both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox::new(self.min.min(other.min), self.max.max(other.max))
    }

    /// Checks that every axis has a positive, finite extent.
    pub fn ensure_non_degenerate(&self) -> Result<()> {
        let extent = self.extent();
        for axis in Axis::ALL {
            let e = axis.component(extent);
            if !e.is_finite() || e <= 0.0 {
                return Err(NeurocanvasError::DegenerateInput { axis, extent: e });
            }
        }
        Ok(())
    }
}
