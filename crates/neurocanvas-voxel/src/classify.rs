//! Inside/outside classification of points against a closed surface.
//!
//! The voxelizer only depends on the [`InsideClassifier`] trait. Two
//! implementations are provided:
//! - [`PseudoNormalClassifier`]: projects each point onto the surface with
//!   parry's BVH-accelerated triangle mesh and compares the offset against
//!   the angle-weighted pseudo-normal of the closest feature. Fast, requires
//!   a closed outward-oriented surface.
//! - [`WindingNumberClassifier`]: sums the solid angles subtended by every
//!   triangle. Slower (every point visits every triangle) but tolerant of
//!   small holes and of inverted orientation.
//!
//! Both are undefined for points lying exactly on the surface.

use std::f64::consts::PI;

use glam::DVec3;
use neurocanvas_core::{ClassifierKind, NeurocanvasError, Result, SurfaceMesh};
use parry3d_f64::math::Point;
use parry3d_f64::query::PointQuery;
use parry3d_f64::shape::{TriMesh, TriMeshFlags};

use crate::parallel::map_points;

/// A batched point-in-surface test.
///
/// Implementations must be deterministic for a fixed surface and point set
/// and must return one flag per point, in input order. Results are only
/// guaranteed for closed, non-self-intersecting surfaces.
pub trait InsideClassifier: Send + Sync {
    /// Short name used in log output and errors.
    fn name(&self) -> &'static str;

    /// Returns, for each point, whether it is enclosed by `surface`.
    fn classify(&self, surface: &SurfaceMesh, points: &[DVec3]) -> Result<Vec<bool>>;

    /// Classifies a single point.
    fn contains(&self, surface: &SurfaceMesh, point: DVec3) -> Result<bool> {
        Ok(self
            .classify(surface, &[point])?
            .first()
            .copied()
            .unwrap_or(false))
    }
}

/// Creates the classifier selected by `kind`.
#[must_use]
pub fn classifier_for(kind: ClassifierKind, parallel: bool) -> Box<dyn InsideClassifier> {
    match kind {
        ClassifierKind::PseudoNormal => Box::new(PseudoNormalClassifier::new().parallel(parallel)),
        ClassifierKind::WindingNumber => {
            Box::new(WindingNumberClassifier::new().parallel(parallel))
        }
    }
}

// ============================================================================
// Pseudo-normal
// ============================================================================

/// Point-in-surface test backed by a parry [`TriMesh`] built with
/// [`TriMeshFlags::ORIENTED`].
#[derive(Debug, Clone, Copy)]
pub struct PseudoNormalClassifier {
    parallel: bool,
}

impl Default for PseudoNormalClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl PseudoNormalClassifier {
    /// Creates a serial classifier.
    #[must_use]
    pub fn new() -> Self {
        Self { parallel: false }
    }

    /// Enables rayon for batched queries.
    #[must_use]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

impl InsideClassifier for PseudoNormalClassifier {
    fn name(&self) -> &'static str {
        "pseudo-normal"
    }

    fn classify(&self, surface: &SurfaceMesh, points: &[DVec3]) -> Result<Vec<bool>> {
        let Some(bounds) = surface.bounding_box() else {
            return Ok(vec![false; points.len()]);
        };
        if surface.num_triangles() == 0 {
            return Ok(vec![false; points.len()]);
        }

        let mesh = query_mesh(surface)?;
        Ok(map_points(points, self.parallel, |p| {
            bounds.contains(p) && mesh.contains_local_point(&to_point(p))
        }))
    }
}

fn to_point(v: DVec3) -> Point<f64> {
    Point::new(v.x, v.y, v.z)
}

/// Builds the oriented parry mesh used for containment queries.
fn query_mesh(surface: &SurfaceMesh) -> Result<TriMesh> {
    let vertices = surface.vertices().iter().copied().map(to_point).collect();
    let mesh = TriMesh::with_flags(
        vertices,
        surface.triangles().to_vec(),
        TriMeshFlags::ORIENTED,
    )
    .map_err(|err| NeurocanvasError::SurfaceQuery(err.to_string()))?;
    log::trace!("built query mesh over {} triangles", surface.num_triangles());
    Ok(mesh)
}

// ============================================================================
// Winding number
// ============================================================================

/// Point-in-surface test by generalized winding number.
///
/// A point is inside when the total solid angle subtended by the surface,
/// divided by `4 * PI`, has magnitude above one half.
#[derive(Debug, Clone, Copy)]
pub struct WindingNumberClassifier {
    parallel: bool,
}

impl Default for WindingNumberClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl WindingNumberClassifier {
    /// Creates a serial classifier.
    #[must_use]
    pub fn new() -> Self {
        Self { parallel: false }
    }

    /// Enables rayon for batched queries.
    #[must_use]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Returns the winding number of `surface` around `point`.
    ///
    /// About 1 inside an outward-oriented closed surface, 0 outside.
    #[must_use]
    pub fn winding_number(surface: &SurfaceMesh, point: DVec3) -> f64 {
        surface
            .triangle_positions()
            .map(|tri| solid_angle(point, tri))
            .sum::<f64>()
            / (4.0 * PI)
    }
}

impl InsideClassifier for WindingNumberClassifier {
    fn name(&self) -> &'static str {
        "winding-number"
    }

    fn classify(&self, surface: &SurfaceMesh, points: &[DVec3]) -> Result<Vec<bool>> {
        let Some(bounds) = surface.bounding_box() else {
            return Ok(vec![false; points.len()]);
        };
        Ok(map_points(points, self.parallel, |p| {
            bounds.contains(p) && Self::winding_number(surface, p).abs() > 0.5
        }))
    }
}

/// Signed solid angle of triangle `[a, b, c]` seen from `p`
/// (Van Oosterom and Strackee).
fn solid_angle(p: DVec3, [a, b, c]: [DVec3; 3]) -> f64 {
    let (a, b, c) = (a - p, b - p, c - p);
    let (la, lb, lc) = (a.length(), b.length(), c.length());
    let det = a.dot(b.cross(c));
    let denom = la * lb * lc + a.dot(b) * lc + a.dot(c) * lb + b.dot(c) * la;
    2.0 * det.atan2(denom)
}
