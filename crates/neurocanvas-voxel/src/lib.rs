//! Mesh voxelization kernel for neurocanvas.
//!
//! Converts a closed triangulated surface into a mesh of axis-aligned cubes:
//!
//! 1. [`SampleGrid`] lays a regular lattice over the surface's bounding box.
//! 2. An [`InsideClassifier`] decides which lattice points the surface encloses.
//! 3. [`build_voxel_mesh`] instantiates one cube per interior point and merges
//!    all cubes into shared vertex and triangle buffers.
//!
//! [`Voxelizer`] ties the steps together.
//!
//! # Features
//!
//! - `parallel` (default): run classification and cube instancing on the
//!   rayon thread pool when requested.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod classify;
pub mod grid;
pub mod instance;
mod parallel;
pub mod voxelize;

pub use classify::{
    classifier_for, InsideClassifier, PseudoNormalClassifier, WindingNumberClassifier,
};
pub use grid::SampleGrid;
pub use instance::build_voxel_mesh;
pub use voxelize::{voxelize, voxelize_with_options, Voxelizer};
