//! Demo: voxelize a sphere at several spacings and report the results.
//!
//! Run with `RUST_LOG=debug` to see grid sizes and timings.

use neurocanvas::{primitives, ClassifierKind, DVec3, VoxelMetrics, VoxelizeOptions};

fn main() {
    neurocanvas::init_logging();

    // Stand-in for an atlas region mesh: a 1.2 mm sphere in micrometers.
    let surface = primitives::uv_sphere(DVec3::new(5400.0, 3900.0, 5700.0), 1200.0, 64, 32)
        .expect("Failed to build sphere");

    for density in [400.0, 200.0, 100.0] {
        for classifier in [ClassifierKind::PseudoNormal, ClassifierKind::WindingNumber] {
            let options = VoxelizeOptions::with_density(density).classifier(classifier);
            let voxels = neurocanvas::voxelize_with_options(&surface, &options)
                .expect("Failed to voxelize sphere");
            let metrics = VoxelMetrics::compute(&surface, &voxels);
            println!(
                "density {density:>6} {classifier:?}: {} voxels, fill ratio {:.3}",
                metrics.voxel_count,
                metrics.fill_ratio.unwrap_or(0.0)
            );
        }
    }
}
