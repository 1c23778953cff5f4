//! Core types for neurocanvas.
//!
//! This crate provides the data model shared by the voxelization kernel and
//! its callers:
//! - [`SurfaceMesh`], the closed triangulated input surface
//! - [`VoxelMesh`], the merged cube mesh produced by voxelization
//! - [`BoundingBox`] and the canonical [`cube`] template
//! - [`VoxelizeOptions`] and the [`NeurocanvasError`] type

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod bounds;
pub mod cube;
pub mod error;
pub mod mesh;
pub mod options;
pub mod primitives;
pub mod voxel_mesh;

pub use bounds::{Axis, BoundingBox};
pub use error::{NeurocanvasError, Result};
pub use mesh::SurfaceMesh;
pub use options::{validate_density, ClassifierKind, VoxelizeOptions};
pub use voxel_mesh::{RenderBuffers, RenderVertex, VoxelMesh};

// Re-export glam types for convenience
pub use glam::DVec3;
