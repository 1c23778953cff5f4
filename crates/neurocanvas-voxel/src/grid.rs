//! Regular sample lattices over a bounding box.

#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

use glam::DVec3;
use neurocanvas_core::{validate_density, Axis, BoundingBox, NeurocanvasError, Result};

/// A lattice of candidate voxel centers spaced `density` apart.
///
/// The lattice starts at the box minimum and extends along each axis until
/// it reaches or passes the box maximum, so the last sample can exceed the
/// maximum by less than `density`. Points are never accumulated: the sample
/// at index `i` is `origin + i * density`.
///
/// Points are ordered with x outermost and z innermost; the flat index of
/// `(ix, iy, iz)` is `(ix * ny + iy) * nz + iz`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleGrid {
    origin: DVec3,
    density: f64,
    counts: [usize; 3],
    total: usize,
}

impl SampleGrid {
    /// Builds the lattice covering `bounds` at the given spacing.
    ///
    /// Fails with [`NeurocanvasError::InvalidParameter`] for non-positive
    /// spacing or a lattice too large to index, and
    /// [`NeurocanvasError::DegenerateInput`] when any axis of `bounds` has no
    /// extent.
    pub fn new(bounds: &BoundingBox, density: f64) -> Result<Self> {
        validate_density(density)?;
        bounds.ensure_non_degenerate()?;

        let mut counts = [0usize; 3];
        for (axis, count) in Axis::ALL.into_iter().zip(&mut counts) {
            let (min, max) = (axis.component(bounds.min), axis.component(bounds.max));
            *count = axis_count(min, max, density).ok_or_else(|| {
                NeurocanvasError::InvalidParameter(format!(
                    "density {density} is too fine for the {axis} extent {}",
                    max - min
                ))
            })?;
        }

        let total = counts
            .iter()
            .try_fold(1usize, |acc, &n| acc.checked_mul(n))
            .ok_or_else(|| {
                NeurocanvasError::InvalidParameter(format!(
                    "density {density} gives a {counts:?} lattice, too large to index"
                ))
            })?;

        Ok(Self {
            origin: bounds.min,
            density,
            counts,
            total,
        })
    }

    /// Returns the first sample (the box minimum).
    #[must_use]
    pub fn origin(&self) -> DVec3 {
        self.origin
    }

    /// Returns the sample spacing.
    #[must_use]
    pub fn density(&self) -> f64 {
        self.density
    }

    /// Returns the number of samples along x, y and z.
    #[must_use]
    pub fn counts(&self) -> [usize; 3] {
        self.counts
    }

    /// Returns the total number of samples as `u64`, for budget checks
    /// before any allocation.
    #[must_use]
    pub fn len(&self) -> u64 {
        u64::try_from(self.total).unwrap_or(u64::MAX)
    }

    /// Returns the total number of samples as an index bound.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.total
    }

    /// Returns true if the grid has no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Returns the last sample (the far corner of the lattice).
    #[must_use]
    pub fn last(&self) -> DVec3 {
        let [nx, ny, nz] = self.counts;
        self.point(nx - 1, ny - 1, nz - 1)
    }

    /// Returns the sample at grid coordinates `(ix, iy, iz)`.
    #[must_use]
    pub fn point(&self, ix: usize, iy: usize, iz: usize) -> DVec3 {
        self.origin + DVec3::new(ix as f64, iy as f64, iz as f64) * self.density
    }

    /// Returns the sample at flat index `index`.
    #[must_use]
    pub fn point_at(&self, index: usize) -> DVec3 {
        let [_, ny, nz] = self.counts;
        let iz = index % nz;
        let iy = (index / nz) % ny;
        // No overflow: `ny * nz` divides the total checked in `new`.
        let ix = index / (ny * nz);
        self.point(ix, iy, iz)
    }

    /// Returns the flat index of `(ix, iy, iz)`.
    #[must_use]
    pub fn flat_index(&self, ix: usize, iy: usize, iz: usize) -> usize {
        let [_, ny, nz] = self.counts;
        (ix * ny + iy) * nz + iz
    }

    /// Iterates over all samples in grid order.
    pub fn iter(&self) -> impl Iterator<Item = DVec3> + '_ {
        let [nx, ny, nz] = self.counts;
        (0..nx).flat_map(move |ix| {
            (0..ny).flat_map(move |iy| (0..nz).map(move |iz| self.point(ix, iy, iz)))
        })
    }

    /// Materializes all samples in grid order.
    #[must_use]
    pub fn points(&self) -> Vec<DVec3> {
        let mut points = Vec::with_capacity(self.total);
        points.extend(self.iter());
        points
    }
}

/// Number of samples needed so that `min + (n - 1) * density >= max`.
///
/// Checked with the same arithmetic as [`SampleGrid::point`], so the last
/// sample never lands below `max` through rounding.
fn axis_count(min: f64, max: f64, density: f64) -> Option<usize> {
    let steps = ((max - min) / density).ceil();
    if !steps.is_finite() || steps >= (usize::MAX / 2) as f64 {
        return None;
    }
    let mut steps = steps as usize;
    while min + (steps as f64) * density < max {
        steps += 1;
    }
    Some(steps + 1)
}
