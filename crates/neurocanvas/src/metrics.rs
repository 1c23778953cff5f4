//! Volumetric summaries of a voxelization, for display by the caller.

use serde::{Deserialize, Serialize};

use crate::{Result, SurfaceMesh, VoxelMesh};

/// Volume figures for one surface and its voxel mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoxelMetrics {
    /// Number of voxels (cubes).
    pub voxel_count: usize,
    /// Voxel edge length.
    pub density: f64,
    /// Volume of a single voxel.
    pub voxel_volume: f64,
    /// Combined volume of all voxels.
    pub voxelized_volume: f64,
    /// Volume enclosed by the source surface.
    pub surface_volume: f64,
    /// Area of the source surface.
    pub surface_area: f64,
    /// `voxelized_volume / surface_volume`, or `None` for a surface with no
    /// enclosed volume.
    pub fill_ratio: Option<f64>,
}

impl VoxelMetrics {
    /// Computes metrics for `voxels` produced from `surface`.
    #[must_use]
    pub fn compute(surface: &SurfaceMesh, voxels: &VoxelMesh) -> Self {
        // Orientation only flips the sign.
        let surface_volume = surface.signed_volume().abs();
        let voxelized_volume = voxels.total_volume();
        let fill_ratio = (surface_volume > 0.0).then(|| voxelized_volume / surface_volume);
        Self {
            voxel_count: voxels.voxel_count(),
            density: voxels.density(),
            voxel_volume: voxels.voxel_volume(),
            voxelized_volume,
            surface_volume,
            surface_area: surface.surface_area(),
            fill_ratio,
        }
    }

    /// Serializes the metrics to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
