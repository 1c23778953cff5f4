//! Cube instancing: one template cube per voxel center, merged into shared
//! vertex and triangle buffers.

use glam::DVec3;
use neurocanvas_core::cube::{
    centered_cube_corners, CUBE_TRIANGLES, CUBE_TRIANGLE_COUNT, CUBE_VERTEX_COUNT,
};
use neurocanvas_core::{validate_density, NeurocanvasError, Result, VoxelMesh};

use crate::parallel::for_each_voxel;

/// Builds the merged cube mesh for `centers`.
///
/// Both buffers are allocated at their final size and every voxel writes only
/// its own slice: vertices `8 * i ..` and triangles `12 * i ..`, with triangle
/// indices shifted by `8 * i`.
pub fn build_voxel_mesh(centers: &[DVec3], density: f64, parallel: bool) -> Result<VoxelMesh> {
    validate_density(density)?;
    if centers.is_empty() {
        return Ok(VoxelMesh::empty(density));
    }

    let vertex_count = output_vertex_count(centers.len())?;

    let template = centered_cube_corners(density);
    let mut vertices = vec![DVec3::ZERO; vertex_count];
    let mut triangles = vec![[0u32; 3]; centers.len() * CUBE_TRIANGLE_COUNT];

    for_each_voxel(
        centers,
        &mut vertices,
        &mut triangles,
        (CUBE_VERTEX_COUNT, CUBE_TRIANGLE_COUNT),
        parallel,
        |index, center, verts, tris| write_cube(index, center, &template, verts, tris),
    );

    VoxelMesh::from_parts(vertices, triangles, density)
}

/// Vertex count of `voxels` cubes, if every vertex stays addressable by a
/// `u32` index.
fn output_vertex_count(voxels: usize) -> Result<usize> {
    voxels
        .checked_mul(CUBE_VERTEX_COUNT)
        .filter(|&n| u32::try_from(n).is_ok())
        .ok_or(NeurocanvasError::TooManyVertices { voxels })
}

/// Writes voxel `index` into its vertex and triangle slices.
#[allow(clippy::cast_possible_truncation)]
fn write_cube(
    index: usize,
    center: DVec3,
    template: &[DVec3; CUBE_VERTEX_COUNT],
    vertices: &mut [DVec3],
    triangles: &mut [[u32; 3]],
) {
    for (dst, corner) in vertices.iter_mut().zip(template) {
        *dst = center + *corner;
    }
    // Range checked against u32 by the caller.
    let offset = (index * CUBE_VERTEX_COUNT) as u32;
    for (dst, tri) in triangles.iter_mut().zip(CUBE_TRIANGLES) {
        *dst = tri.map(|k| k + offset);
    }
}
