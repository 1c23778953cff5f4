//! Serial / rayon dispatch for per-point and per-voxel work.

use glam::DVec3;

#[cfg(feature = "parallel")]
pub(crate) fn map_points<F>(points: &[DVec3], parallel: bool, f: F) -> Vec<bool>
where
    F: Fn(DVec3) -> bool + Sync + Send,
{
    use rayon::prelude::*;

    if parallel {
        points.par_iter().map(|&p| f(p)).collect()
    } else {
        points.iter().map(|&p| f(p)).collect()
    }
}

#[cfg(not(feature = "parallel"))]
pub(crate) fn map_points<F>(points: &[DVec3], _parallel: bool, f: F) -> Vec<bool>
where
    F: Fn(DVec3) -> bool + Sync + Send,
{
    points.iter().map(|&p| f(p)).collect()
}

/// Runs `f(index, center, vertex_slice, triangle_slice)` for every voxel.
///
/// `vertices` and `triangles` are split into disjoint per-voxel chunks of
/// `vertex_stride` and `triangle_stride` elements, so parallel writes need
/// no synchronization.
#[cfg(feature = "parallel")]
pub(crate) fn for_each_voxel<F>(
    centers: &[DVec3],
    vertices: &mut [DVec3],
    triangles: &mut [[u32; 3]],
    (vertex_stride, triangle_stride): (usize, usize),
    parallel: bool,
    f: F,
) where
    F: Fn(usize, DVec3, &mut [DVec3], &mut [[u32; 3]]) + Sync + Send,
{
    use rayon::prelude::*;

    if parallel {
        vertices
            .par_chunks_mut(vertex_stride)
            .zip(triangles.par_chunks_mut(triangle_stride))
            .zip(centers.par_iter())
            .enumerate()
            .for_each(|(i, ((v, t), &c))| f(i, c, v, t));
    } else {
        vertices
            .chunks_mut(vertex_stride)
            .zip(triangles.chunks_mut(triangle_stride))
            .zip(centers)
            .enumerate()
            .for_each(|(i, ((v, t), &c))| f(i, c, v, t));
    }
}

#[cfg(not(feature = "parallel"))]
pub(crate) fn for_each_voxel<F>(
    centers: &[DVec3],
    vertices: &mut [DVec3],
    triangles: &mut [[u32; 3]],
    (vertex_stride, triangle_stride): (usize, usize),
    _parallel: bool,
    f: F,
) where
    F: Fn(usize, DVec3, &mut [DVec3], &mut [[u32; 3]]) + Sync + Send,
{
    vertices
        .chunks_mut(vertex_stride)
        .zip(triangles.chunks_mut(triangle_stride))
        .zip(centers)
        .enumerate()
        .for_each(|(i, ((v, t), &c))| f(i, c, v, t));
}
