//! neurocanvas: voxelization of brain-region surface meshes.
//!
//! Converts a closed triangulated surface (for example an atlas region mesh)
//! into a solid cube-grid representation for display and volumetric metrics.
//!
//! # Quick Start
//!
//! ```no_run
//! use neurocanvas::*;
//!
//! fn main() -> Result<()> {
//!     init_logging();
//!
//!     // Any closed surface; region meshes come from the atlas loader.
//!     let surface = primitives::uv_sphere(DVec3::ZERO, 1.0, 32, 16)?;
//!
//!     let voxels = voxelize(&surface, 0.1)?;
//!     let metrics = VoxelMetrics::compute(&surface, &voxels);
//!     println!("{}", metrics.to_json()?);
//!
//!     // Hand the merged cube mesh to the renderer.
//!     let buffers = voxels.to_render_buffers();
//!     assert_eq!(buffers.num_triangles(), 12 * voxels.voxel_count());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`neurocanvas_core`]: surface and voxel meshes, options, errors
//! - [`neurocanvas_voxel`]: sample grid, inside/outside classifiers, cube
//!   instancing
//! - this crate: re-exports, logging setup and [`VoxelMetrics`]

#![allow(clippy::missing_errors_doc)]

mod metrics;

pub use metrics::VoxelMetrics;

// Re-export core types
pub use neurocanvas_core::{
    cube, primitives, validate_density, Axis, BoundingBox, ClassifierKind, NeurocanvasError,
    RenderBuffers, RenderVertex, Result, SurfaceMesh, VoxelMesh, VoxelizeOptions, DVec3,
};

// Re-export the voxelization kernel
pub use neurocanvas_voxel::{
    build_voxel_mesh, classifier_for, voxelize, voxelize_with_options, InsideClassifier,
    PseudoNormalClassifier, SampleGrid, Voxelizer, WindingNumberClassifier,
};

/// Installs `env_logger` as the `log` backend, honoring `RUST_LOG`.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    if env_logger::try_init().is_ok() {
        log::debug!("neurocanvas logging initialized");
    }
}

/// Voxelizes a surface given as polygon faces (fan-triangulated first).
pub fn voxelize_polygons(
    vertices: Vec<DVec3>,
    faces: &[Vec<u32>],
    options: &VoxelizeOptions,
) -> Result<(SurfaceMesh, VoxelMesh)> {
    let surface = SurfaceMesh::from_polygons(vertices, faces)?;
    let voxels = voxelize_with_options(&surface, options)?;
    Ok((surface, voxels))
}
