//! Closed surface to voxel mesh conversion.

use std::time::Instant;

use glam::DVec3;
use neurocanvas_core::{
    validate_density, NeurocanvasError, Result, SurfaceMesh, VoxelMesh, VoxelizeOptions,
};

use crate::classify::{classifier_for, InsideClassifier};
use crate::grid::SampleGrid;
use crate::instance::build_voxel_mesh;

/// Sample points classified per batch; bounds the transient point buffer.
const CLASSIFY_BATCH: usize = 1 << 20;

/// Converts closed surfaces into meshes of cubes.
///
/// A voxelizer owns its inside/outside classifier and run settings; the
/// spacing is supplied per call. All intermediate data (bounding box, sample
/// grid, interior set) lives only for the duration of one call.
pub struct Voxelizer {
    classifier: Box<dyn InsideClassifier>,
    max_grid_points: Option<u64>,
    parallel: bool,
}

impl Default for Voxelizer {
    fn default() -> Self {
        Self::from_options(&VoxelizeOptions::default())
    }
}

impl Voxelizer {
    /// Creates a voxelizer with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a voxelizer from options. The options' density is not used;
    /// pass it to [`Voxelizer::voxelize`].
    #[must_use]
    pub fn from_options(options: &VoxelizeOptions) -> Self {
        Self {
            classifier: classifier_for(options.classifier, options.parallel),
            max_grid_points: options.max_grid_points,
            parallel: options.parallel,
        }
    }

    /// Replaces the inside/outside classifier.
    #[must_use]
    pub fn with_classifier(mut self, classifier: Box<dyn InsideClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Sets the sample grid budget (`None` = unlimited).
    #[must_use]
    pub fn max_grid_points(mut self, limit: Option<u64>) -> Self {
        self.max_grid_points = limit;
        self
    }

    /// Enables or disables parallel cube instancing.
    ///
    /// Classifier parallelism is configured on the classifier itself.
    #[must_use]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Returns the classifier in use.
    #[must_use]
    pub fn classifier(&self) -> &dyn InsideClassifier {
        self.classifier.as_ref()
    }

    /// Builds the sample grid for `surface`, enforcing the point budget.
    pub fn sample_grid(&self, surface: &SurfaceMesh, density: f64) -> Result<SampleGrid> {
        validate_density(density)?;
        let bounds = surface
            .bounding_box()
            .ok_or(NeurocanvasError::EmptySurface)?;
        let grid = SampleGrid::new(&bounds, density)?;

        if let Some(limit) = self.max_grid_points {
            if grid.len() > limit {
                return Err(NeurocanvasError::GridTooLarge {
                    points: grid.len(),
                    limit,
                });
            }
        }
        Ok(grid)
    }

    /// Returns the grid points enclosed by `surface`, in grid order.
    ///
    /// Fails with [`NeurocanvasError::ClassifierContract`] if the classifier
    /// does not return exactly one flag per point.
    pub fn interior_points(&self, surface: &SurfaceMesh, density: f64) -> Result<Vec<DVec3>> {
        let grid = self.sample_grid(surface, density)?;
        if log::log_enabled!(log::Level::Warn) && !surface.is_closed() {
            log::warn!(
                "surface has {} boundary edges; inside/outside results may be unreliable",
                surface.boundary_edge_count()
            );
        }
        log::debug!(
            "sampling {:?} grid ({} points) at density {density} with {}",
            grid.counts(),
            grid.len(),
            self.classifier.name()
        );

        let total = grid.point_count();
        let mut interior = Vec::new();
        let mut batch = Vec::with_capacity(total.min(CLASSIFY_BATCH));
        for start in (0..total).step_by(CLASSIFY_BATCH) {
            let end = (start + CLASSIFY_BATCH).min(total);
            batch.clear();
            batch.extend((start..end).map(|i| grid.point_at(i)));

            let flags = self.classifier.classify(surface, &batch)?;
            if flags.len() != batch.len() {
                return Err(NeurocanvasError::ClassifierContract {
                    classifier: self.classifier.name().to_string(),
                    expected: batch.len(),
                    actual: flags.len(),
                });
            }
            interior.extend(
                batch
                    .iter()
                    .zip(flags)
                    .filter_map(|(p, inside)| inside.then_some(*p)),
            );
        }
        Ok(interior)
    }

    /// Converts `surface` into one cube of edge `density` per interior grid
    /// point.
    ///
    /// An empty result (no grid point inside the surface) is not an error.
    pub fn voxelize(&self, surface: &SurfaceMesh, density: f64) -> Result<VoxelMesh> {
        let start = Instant::now();
        let interior = self.interior_points(surface, density)?;
        if interior.is_empty() {
            log::info!("no grid points inside surface at density {density}");
            return Ok(VoxelMesh::empty(density));
        }

        let mesh = build_voxel_mesh(&interior, density, self.parallel)?;
        log::info!(
            "voxelized {} triangles into {} voxels in {:.1?}",
            surface.num_triangles(),
            mesh.voxel_count(),
            start.elapsed()
        );
        Ok(mesh)
    }
}

/// Voxelizes `surface` with default settings.
pub fn voxelize(surface: &SurfaceMesh, density: f64) -> Result<VoxelMesh> {
    Voxelizer::new().voxelize(surface, density)
}

/// Voxelizes `surface` with the given options.
pub fn voxelize_with_options(surface: &SurfaceMesh, options: &VoxelizeOptions) -> Result<VoxelMesh> {
    options.validate()?;
    Voxelizer::from_options(options).voxelize(surface, options.density)
}

#[cfg(test)]
mod tests {
    use super::*;
    use neurocanvas_core::primitives::{cuboid, uv_sphere};
    use neurocanvas_core::ClassifierKind;

    /// Reports only the first sample as inside.
    struct FirstPointOnly;

    impl InsideClassifier for FirstPointOnly {
        fn name(&self) -> &'static str {
            "first-point-only"
        }

        fn classify(&self, _surface: &SurfaceMesh, points: &[DVec3]) -> Result<Vec<bool>> {
            Ok((0..points.len()).map(|i| i == 0).collect())
        }
    }

    /// Drops the last flag of every batch.
    struct OneFlagShort;

    impl InsideClassifier for OneFlagShort {
        fn name(&self) -> &'static str {
            "one-flag-short"
        }

        fn classify(&self, _surface: &SurfaceMesh, points: &[DVec3]) -> Result<Vec<bool>> {
            Ok(vec![true; points.len().saturating_sub(1)])
        }
    }

    #[test]
    fn test_single_point_at_origin() {
        let surface = cuboid(DVec3::new(2.0, 3.0, 4.0), DVec3::new(3.5, 4.5, 5.5)).unwrap();
        let mesh = Voxelizer::new()
            .with_classifier(Box::new(FirstPointOnly))
            .voxelize(&surface, 1.0)
            .unwrap();
        assert_eq!(mesh.voxel_count(), 1);
        assert_eq!(mesh.vertices().len(), 8);
        assert_eq!(mesh.triangles().len(), 12);

        let origin = DVec3::new(2.0, 3.0, 4.0);
        for v in mesh.vertices() {
            let offset = *v - origin;
            assert!(offset.abs().cmpeq(DVec3::splat(0.5)).all(), "vertex {v}");
        }
    }

    #[test]
    fn test_wrong_flag_count_is_an_error() {
        let surface = cuboid(DVec3::ZERO, DVec3::ONE).unwrap();
        let result = Voxelizer::new()
            .with_classifier(Box::new(OneFlagShort))
            .voxelize(&surface, 0.5);
        match result {
            Err(NeurocanvasError::ClassifierContract {
                classifier,
                expected,
                actual,
            }) => {
                assert_eq!(classifier, "one-flag-short");
                assert_eq!(expected, 27);
                assert_eq!(actual, 26);
            }
            other => panic!("expected ClassifierContract, got {other:?}"),
        }
    }

    #[test]
    fn test_sphere_voxel_counts() {
        let surface = uv_sphere(DVec3::ZERO, 1.0, 32, 16).unwrap();
        let mesh = voxelize(&surface, 0.2).unwrap();
        let n = mesh.voxel_count();
        assert!(n > 0);
        assert_eq!(mesh.vertices().len(), 8 * n);
        assert_eq!(mesh.triangles().len(), 12 * n);
        let vertex_count = u32::try_from(mesh.vertices().len()).unwrap();
        assert!(mesh.triangles().iter().flatten().all(|&k| k < vertex_count));

        // Voxel volume approximates the sphere volume.
        let exact = 4.0 / 3.0 * std::f64::consts::PI;
        assert!((mesh.total_volume() - exact).abs() < 0.25 * exact, "{}", mesh.total_volume());
    }

    #[test]
    fn test_interior_points_in_grid_order() {
        let surface = uv_sphere(DVec3::new(0.1, 0.2, 0.3), 1.0, 24, 12).unwrap();
        let voxelizer = Voxelizer::new();
        let points = voxelizer.interior_points(&surface, 0.3).unwrap();
        let grid = voxelizer.sample_grid(&surface, 0.3).unwrap();
        let all = grid.points();
        let mut cursor = 0;
        for p in &points {
            let found = all[cursor..].iter().position(|q| q == p).unwrap();
            cursor += found + 1;
        }

        let mesh = voxelizer.voxelize(&surface, 0.3).unwrap();
        for (center, p) in mesh.centers().zip(&points) {
            assert!((center - *p).length() < 1e-12);
        }
    }

    #[test]
    fn test_invalid_density() {
        let surface = cuboid(DVec3::ZERO, DVec3::ONE).unwrap();
        for density in [0.0, -1.0] {
            assert!(matches!(
                voxelize(&surface, density),
                Err(NeurocanvasError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn test_flat_surface_is_degenerate() {
        let flat = SurfaceMesh::new(
            vec![
                DVec3::new(0.0, 0.0, 0.0),
                DVec3::new(1.0, 0.0, 0.0),
                DVec3::new(1.0, 1.0, 0.0),
                DVec3::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2], [0, 2, 3], [0, 2, 1], [0, 3, 2]],
        )
        .unwrap();
        assert!(matches!(
            voxelize(&flat, 0.1),
            Err(NeurocanvasError::DegenerateInput { .. })
        ));
    }

    #[test]
    fn test_empty_surface() {
        let empty = SurfaceMesh::new(Vec::new(), Vec::new()).unwrap();
        assert!(matches!(
            voxelize(&empty, 0.1),
            Err(NeurocanvasError::EmptySurface)
        ));
    }

    #[test]
    fn test_small_surface_yields_empty_mesh() {
        let tiny = uv_sphere(DVec3::splat(0.37), 0.05, 12, 6).unwrap();
        let mesh = voxelize(&tiny, 1.0).unwrap();
        assert!(mesh.is_empty());
        assert_eq!(mesh.triangles().len(), 0);
        assert!((mesh.density() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_grid_budget() {
        let surface = cuboid(DVec3::ZERO, DVec3::ONE).unwrap();
        let err = Voxelizer::new()
            .max_grid_points(Some(100))
            .voxelize(&surface, 0.25)
            .unwrap_err();
        match err {
            NeurocanvasError::GridTooLarge { points, limit } => {
                assert_eq!(points, 5 * 5 * 5);
                assert_eq!(limit, 100);
            }
            other => panic!("expected GridTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn test_classifiers_agree_on_sphere() {
        let surface = uv_sphere(DVec3::new(-0.4, 0.25, 0.05), 1.3, 24, 12).unwrap();
        let ray = voxelize_with_options(&surface, &VoxelizeOptions::with_density(0.23)).unwrap();
        let winding = voxelize_with_options(
            &surface,
            &VoxelizeOptions::with_density(0.23).classifier(ClassifierKind::WindingNumber),
        )
        .unwrap();
        assert_eq!(ray, winding);
    }

    #[test]
    fn test_deterministic_across_runs_and_modes() {
        let surface = uv_sphere(DVec3::ZERO, 1.0, 20, 10).unwrap();
        let options = VoxelizeOptions::with_density(0.17);
        let first = voxelize_with_options(&surface, &options).unwrap();
        let second = voxelize_with_options(&surface, &options).unwrap();
        let serial = voxelize_with_options(&surface, &options.clone().parallel(false)).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, serial);
    }
}
