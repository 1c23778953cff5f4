//! Merged cube meshes produced by voxelization.

use bytemuck::{Pod, Zeroable};
use glam::DVec3;

use crate::bounds::BoundingBox;
use crate::cube::{CUBE_TRIANGLE_COUNT, CUBE_VERTEX_COUNT};
use crate::error::{NeurocanvasError, Result};

/// A triangle mesh made of disjoint axis-aligned cubes, one per voxel.
///
/// Voxel `i` owns vertices `8 * i .. 8 * i + 8` and triangles
/// `12 * i .. 12 * i + 12`. Adjacent cubes do not share vertices.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VoxelMesh {
    vertices: Vec<DVec3>,
    triangles: Vec<[u32; 3]>,
    density: f64,
}

impl VoxelMesh {
    /// Wraps prebuilt buffers.
    ///
    /// Returns [`NeurocanvasError::SizeMismatch`] unless the buffers hold
    /// `8 * n` vertices and `12 * n` triangles for the same `n`.
    pub fn from_parts(
        vertices: Vec<DVec3>,
        triangles: Vec<[u32; 3]>,
        density: f64,
    ) -> Result<Self> {
        if vertices.len() % CUBE_VERTEX_COUNT != 0 {
            return Err(NeurocanvasError::SizeMismatch {
                expected: vertices.len().next_multiple_of(CUBE_VERTEX_COUNT),
                actual: vertices.len(),
            });
        }
        let expected = vertices.len() / CUBE_VERTEX_COUNT * CUBE_TRIANGLE_COUNT;
        if triangles.len() != expected {
            return Err(NeurocanvasError::SizeMismatch {
                expected,
                actual: triangles.len(),
            });
        }
        Ok(Self {
            vertices,
            triangles,
            density,
        })
    }

    /// An empty mesh (no interior voxels) at the given spacing.
    #[must_use]
    pub fn empty(density: f64) -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
            density,
        }
    }

    /// Returns the vertex positions.
    #[must_use]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns the triangles as vertex index triples.
    #[must_use]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Consumes the mesh, returning its vertex and triangle buffers.
    #[must_use]
    pub fn into_parts(self) -> (Vec<DVec3>, Vec<[u32; 3]>) {
        (self.vertices, self.triangles)
    }

    /// Returns the voxel edge length.
    #[must_use]
    pub fn density(&self) -> f64 {
        self.density
    }

    /// Returns the number of voxels (cubes).
    #[must_use]
    pub fn voxel_count(&self) -> usize {
        self.vertices.len() / CUBE_VERTEX_COUNT
    }

    /// Returns true if the mesh has no voxels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the volume of a single voxel.
    #[must_use]
    pub fn voxel_volume(&self) -> f64 {
        self.density.powi(3)
    }

    /// Returns the combined volume of all voxels.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn total_volume(&self) -> f64 {
        self.voxel_count() as f64 * self.voxel_volume()
    }

    /// Returns the bounding box of all cubes, or `None` when empty.
    #[must_use]
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.vertices)
    }

    /// Returns the corner positions of voxel `index`.
    #[must_use]
    pub fn voxel_vertices(&self, index: usize) -> &[DVec3] {
        let start = index * CUBE_VERTEX_COUNT;
        &self.vertices[start..start + CUBE_VERTEX_COUNT]
    }

    /// Iterates over the voxel centers in output order.
    pub fn centers(&self) -> impl Iterator<Item = DVec3> + '_ {
        self.vertices
            .chunks_exact(CUBE_VERTEX_COUNT)
            .map(|corners| corners.iter().copied().sum::<DVec3>() / 8.0)
    }

    /// Converts to single-precision buffers for GPU upload.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_render_buffers(&self) -> RenderBuffers {
        RenderBuffers {
            positions: self
                .vertices
                .iter()
                .map(|v| RenderVertex {
                    position: v.as_vec3().to_array(),
                })
                .collect(),
            indices: self.triangles.iter().flatten().copied().collect(),
        }
    }
}

/// A vertex as uploaded to the renderer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct RenderVertex {
    pub position: [f32; 3],
}

/// Flat single-precision buffers for an external renderer.
#[derive(Debug, Clone, Default)]
pub struct RenderBuffers {
    pub positions: Vec<RenderVertex>,
    /// Triangle list; every three consecutive indices form a triangle.
    pub indices: Vec<u32>,
}

impl RenderBuffers {
    /// Returns the vertex buffer as raw bytes.
    #[must_use]
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Returns the index buffer as raw bytes.
    #[must_use]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Returns the number of triangles.
    #[must_use]
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }
}
