//! Canonical cube template shared by voxel instancing and box primitives.
//!
//! Corner order: bottom face (z = 0) counter-clockwise from the origin, then
//! the top face (z = 1) in the same order:
//!
//! ```text
//!   0 = (0,0,0)  1 = (1,0,0)  2 = (1,1,0)  3 = (0,1,0)
//!   4 = (0,0,1)  5 = (1,0,1)  6 = (1,1,1)  7 = (0,1,1)
//! ```
//!
//! Triangles are counter-clockwise seen from outside the cube, so right-hand
//! normals point outward on all six faces.

use glam::DVec3;

/// Number of vertices in one cube.
pub const CUBE_VERTEX_COUNT: usize = 8;

/// Number of triangles in one cube.
pub const CUBE_TRIANGLE_COUNT: usize = 12;

/// Corners of the unit cube `[0, 1]^3`.
pub const UNIT_CUBE_CORNERS: [DVec3; CUBE_VERTEX_COUNT] = [
    DVec3::new(0.0, 0.0, 0.0),
    DVec3::new(1.0, 0.0, 0.0),
    DVec3::new(1.0, 1.0, 0.0),
    DVec3::new(0.0, 1.0, 0.0),
    DVec3::new(0.0, 0.0, 1.0),
    DVec3::new(1.0, 0.0, 1.0),
    DVec3::new(1.0, 1.0, 1.0),
    DVec3::new(0.0, 1.0, 1.0),
];

/// Outward-wound triangles of the cube, two per face.
pub const CUBE_TRIANGLES: [[u32; 3]; CUBE_TRIANGLE_COUNT] = [
    // -z
    [0, 2, 1],
    [0, 3, 2],
    // +z
    [4, 5, 6],
    [4, 6, 7],
    // -y
    [0, 1, 5],
    [0, 5, 4],
    // +y
    [3, 7, 6],
    [3, 6, 2],
    // -x
    [0, 4, 7],
    [0, 7, 3],
    // +x
    [1, 2, 6],
    [1, 6, 5],
];

/// Returns the corners of the unit cube recentered on the origin and scaled to
/// `edge`, i.e. `({0,1}^3 - 0.5) * edge`.
#[must_use]
pub fn centered_cube_corners(edge: f64) -> [DVec3; CUBE_VERTEX_COUNT] {
    UNIT_CUBE_CORNERS.map(|c| (c - DVec3::splat(0.5)) * edge)
}

/// Returns the template triangles with every index shifted by `offset`.
#[must_use]
pub fn offset_triangles(offset: u32) -> [[u32; 3]; CUBE_TRIANGLE_COUNT] {
    CUBE_TRIANGLES.map(|[a, b, c]| [a + offset, b + offset, c + offset])
}
