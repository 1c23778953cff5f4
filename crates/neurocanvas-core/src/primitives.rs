//! Closed, outward-oriented primitive surfaces.

#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]

use std::f64::consts::PI;

use glam::DVec3;

use crate::cube::{CUBE_TRIANGLES, UNIT_CUBE_CORNERS};
use crate::error::{NeurocanvasError, Result};
use crate::mesh::SurfaceMesh;

/// Builds an axis-aligned box surface spanning `min..max`.
pub fn cuboid(min: DVec3, max: DVec3) -> Result<SurfaceMesh> {
    let size = max - min;
    let vertices = UNIT_CUBE_CORNERS.iter().map(|c| min + *c * size).collect();
    SurfaceMesh::new(vertices, CUBE_TRIANGLES.to_vec())
}

/// Builds a latitude/longitude sphere.
///
/// `segments` is the number of vertices around each ring (at least 3) and
/// `rings` the number of latitude bands (at least 2).
pub fn uv_sphere(center: DVec3, radius: f64, segments: u32, rings: u32) -> Result<SurfaceMesh> {
    if segments < 3 || rings < 2 {
        return Err(NeurocanvasError::InvalidParameter(format!(
            "uv sphere needs at least 3 segments and 2 rings, got {segments} and {rings}"
        )));
    }
    if !(radius.is_finite() && radius > 0.0) {
        return Err(NeurocanvasError::InvalidParameter(format!(
            "sphere radius must be positive, got {radius}"
        )));
    }

    let ring_vertex = |ring: u32, seg: u32| 1 + (ring - 1) * segments + seg % segments;

    let mut vertices = Vec::with_capacity((2 + (rings - 1) * segments) as usize);
    vertices.push(center + DVec3::Z * radius);
    for ring in 1..rings {
        let theta = PI * f64::from(ring) / f64::from(rings);
        for seg in 0..segments {
            let phi = 2.0 * PI * f64::from(seg) / f64::from(segments);
            let dir = DVec3::new(theta.sin() * phi.cos(), theta.sin() * phi.sin(), theta.cos());
            vertices.push(center + dir * radius);
        }
    }
    let south = vertices.len() as u32;
    vertices.push(center - DVec3::Z * radius);

    let mut triangles = Vec::with_capacity((2 * segments * (rings - 1)) as usize);
    for seg in 0..segments {
        triangles.push([0, ring_vertex(1, seg), ring_vertex(1, seg + 1)]);
    }
    for ring in 1..rings - 1 {
        for seg in 0..segments {
            let a = ring_vertex(ring, seg);
            let b = ring_vertex(ring, seg + 1);
            let c = ring_vertex(ring + 1, seg + 1);
            let d = ring_vertex(ring + 1, seg);
            triangles.push([a, d, c]);
            triangles.push([a, c, b]);
        }
    }
    for seg in 0..segments {
        triangles.push([south, ring_vertex(rings - 1, seg + 1), ring_vertex(rings - 1, seg)]);
    }

    SurfaceMesh::new(vertices, triangles)
}
