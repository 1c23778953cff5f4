//! Demo: voxelize a polygonal region mesh from JSON options and print the
//! metrics and render buffer sizes an external viewer would consume.

use neurocanvas::{DVec3, VoxelMetrics, VoxelizeOptions};

const OPTIONS: &str = r#"{
    "density": 0.35,
    "classifier": "pseudo_normal",
    "max_grid_points": 1000000
}"#;

fn main() {
    neurocanvas::init_logging();

    // An irregular hexahedral "region" given as quads.
    let vertices = vec![
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(4.0, 0.2, 0.0),
        DVec3::new(4.5, 3.0, 0.3),
        DVec3::new(-0.3, 2.7, 0.1),
        DVec3::new(0.2, 0.1, 2.5),
        DVec3::new(3.8, 0.0, 2.9),
        DVec3::new(4.2, 3.2, 3.1),
        DVec3::new(0.1, 2.9, 2.6),
    ];
    let faces = vec![
        vec![0, 3, 2, 1],
        vec![4, 5, 6, 7],
        vec![0, 1, 5, 4],
        vec![3, 7, 6, 2],
        vec![0, 4, 7, 3],
        vec![1, 2, 6, 5],
    ];

    let options = VoxelizeOptions::from_json(OPTIONS).expect("Invalid options");
    let (surface, voxels) = neurocanvas::voxelize_polygons(vertices, &faces, &options)
        .expect("Failed to voxelize region");

    let metrics = VoxelMetrics::compute(&surface, &voxels);
    println!("{}", metrics.to_json().expect("Failed to serialize metrics"));

    let buffers = voxels.to_render_buffers();
    println!(
        "render buffers: {} vertices ({} bytes), {} triangles ({} bytes)",
        buffers.positions.len(),
        buffers.position_bytes().len(),
        buffers.num_triangles(),
        buffers.index_bytes().len()
    );
}
