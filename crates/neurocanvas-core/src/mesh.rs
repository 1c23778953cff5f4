//! Triangulated surface meshes supplied by the mesh-loading collaborator.

use std::collections::HashMap;

use glam::DVec3;

use crate::bounds::BoundingBox;
use crate::error::{NeurocanvasError, Result};

/// An immutable triangulated surface.
///
/// Indices are validated on construction. Closedness is not enforced; use
/// [`SurfaceMesh::is_closed`] to check it when the source is untrusted.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceMesh {
    vertices: Vec<DVec3>,
    triangles: Vec<[u32; 3]>,
}

impl SurfaceMesh {
    /// Creates a surface mesh from vertices and triangles.
    ///
    /// Returns [`NeurocanvasError::IndexOutOfBounds`] if any triangle
    /// references a missing vertex.
    pub fn new(vertices: Vec<DVec3>, triangles: Vec<[u32; 3]>) -> Result<Self> {
        let vertex_count = vertices.len();
        for (triangle, tri) in triangles.iter().enumerate() {
            if let Some(&index) = tri.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(NeurocanvasError::IndexOutOfBounds {
                    triangle,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(Self {
            vertices,
            triangles,
        })
    }

    /// Creates a surface mesh from polygon faces using fan triangulation.
    ///
    /// For a polygon `[v0, v1, v2, v3, ...]` this emits
    /// `[v0, v1, v2], [v0, v2, v3], ...`. Faces with fewer than three indices
    /// are dropped.
    pub fn from_polygons(vertices: Vec<DVec3>, faces: &[Vec<u32>]) -> Result<Self> {
        let mut triangles = Vec::with_capacity(faces.iter().map(|f| f.len().saturating_sub(2)).sum());
        let mut dropped = 0usize;
        for face in faces {
            if face.len() < 3 {
                dropped += 1;
                continue;
            }
            let v0 = face[0];
            for i in 1..(face.len() - 1) {
                triangles.push([v0, face[i], face[i + 1]]);
            }
        }
        if dropped > 0 {
            log::debug!("dropped {dropped} polygon faces with fewer than three vertices");
        }
        Self::new(vertices, triangles)
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

    /// Returns the number of vertices.
    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[must_use]
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Returns the corner positions of triangle `index`.
    #[must_use]
    pub fn triangle(&self, index: usize) -> [DVec3; 3] {
        self.triangles[index].map(|i| self.vertices[i as usize])
    }

    /// Iterates over the corner positions of every triangle.
    pub fn triangle_positions(&self) -> impl Iterator<Item = [DVec3; 3]> + '_ {
        self.triangles
            .iter()
            .map(|tri| tri.map(|i| self.vertices[i as usize]))
    }

    /// Returns the bounding box of the vertices, or `None` if there are none.
    #[must_use]
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.vertices)
    }

    /// Returns the volume enclosed by the surface (divergence theorem).
    ///
    /// Positive for outward-facing triangles, negative for inward-facing ones.
    /// Only meaningful for closed surfaces.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        self.triangle_positions()
            .map(|[a, b, c]| a.dot(b.cross(c)))
            .sum::<f64>()
            / 6.0
    }

    /// Returns the total triangle area.
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        self.triangle_positions()
            .map(|[a, b, c]| (b - a).cross(c - a).length() * 0.5)
            .sum()
    }

    /// Counts edges that are not used exactly twice.
    ///
    /// Zero for a closed two-manifold surface.
    #[must_use]
    pub fn boundary_edge_count(&self) -> usize {
        let mut edge_uses: HashMap<(u32, u32), u32> = HashMap::new();
        for &[a, b, c] in &self.triangles {
            for (u, v) in [(a, b), (b, c), (c, a)] {
                let key = if u < v { (u, v) } else { (v, u) };
                *edge_uses.entry(key).or_default() += 1;
            }
        }
        edge_uses.values().filter(|&&n| n != 2).count()
    }

    /// Returns true if every edge is shared by exactly two triangles.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        !self.triangles.is_empty() && self.boundary_edge_count() == 0
    }
}
