//! End-to-end voxelization tests through the public neurocanvas API.

use neurocanvas::*;

/// Spacings used below never divide the radius, so no lattice point lands
/// on a sphere vertex.
fn sphere() -> SurfaceMesh {
    primitives::uv_sphere(DVec3::new(12.5, -3.0, 40.25), 2.0, 32, 16).expect("sphere")
}

fn check_buffers(mesh: &VoxelMesh) {
    let n = mesh.voxel_count();
    assert_eq!(mesh.vertices().len(), 8 * n);
    assert_eq!(mesh.triangles().len(), 12 * n);

    let vertex_count = u32::try_from(mesh.vertices().len()).unwrap();
    for (i, tri) in mesh.triangles().iter().enumerate() {
        assert!(
            tri.iter().all(|&k| k < vertex_count),
            "triangle {i} = {tri:?} out of range"
        );
        // Each triangle stays inside its own voxel's vertex block.
        let block = u32::try_from(i / 12).unwrap() * 8;
        assert!(tri.iter().all(|&k| (block..block + 8).contains(&k)));
    }
}

#[test]
fn voxelize_region_sized_sphere() {
    init_logging();

    let surface = sphere();
    let density = 0.23;
    let mesh = voxelize(&surface, density).expect("voxelize");
    assert!(mesh.voxel_count() > 100);
    check_buffers(&mesh);

    // Every voxel center lies inside the sphere.
    let center = DVec3::new(12.5, -3.0, 40.25);
    for c in mesh.centers() {
        assert!((c - center).length() < 2.0, "center {c} outside sphere");
    }

    // Every voxel sits inside the surface bounding box, padded by half a voxel.
    let bb = surface.bounding_box().unwrap();
    let vb = mesh.bounds().unwrap();
    let pad = DVec3::splat(density / 2.0 + 1e-9);
    assert!(vb.min.cmpge(bb.min - pad).all());
    assert!(vb.max.cmple(bb.max + pad).all());
}

#[test]
fn voxel_mesh_is_outward_oriented() {
    let surface = sphere();
    let mesh = voxelize(&surface, 0.45).unwrap();
    let as_surface = SurfaceMesh::new(mesh.vertices().to_vec(), mesh.triangles().to_vec()).unwrap();

    // Disjoint closed cubes: every cube is closed on its own, and the signed
    // volume equals the voxel count times the voxel volume.
    assert!(as_surface.is_closed());
    let volume = mesh.total_volume();
    assert!((as_surface.signed_volume() - volume).abs() < 1e-6 * volume);
}

#[test]
fn repeated_runs_are_identical() {
    let surface = sphere();
    let options = VoxelizeOptions::with_density(0.3);
    let a = voxelize_with_options(&surface, &options).unwrap();
    let b = voxelize_with_options(&surface, &options).unwrap();
    assert_eq!(a.vertices(), b.vertices());
    assert_eq!(a.triangles(), b.triangles());

    let serial = voxelize_with_options(&surface, &options.clone().parallel(false)).unwrap();
    assert_eq!(a, serial);
}

#[test]
fn error_policies() {
    let surface = sphere();

    // Non-positive spacing.
    for density in [0.0, -0.25] {
        assert!(matches!(
            voxelize(&surface, density),
            Err(NeurocanvasError::InvalidParameter(_))
        ));
    }

    // Zero-volume bounding box.
    let flat = SurfaceMesh::from_polygons(
        vec![
            DVec3::new(0.0, 0.0, 1.0),
            DVec3::new(1.0, 0.0, 1.0),
            DVec3::new(1.0, 1.0, 1.0),
            DVec3::new(0.0, 1.0, 1.0),
        ],
        &[vec![0, 1, 2, 3], vec![3, 2, 1, 0]],
    )
    .unwrap();
    match voxelize(&flat, 0.1) {
        Err(NeurocanvasError::DegenerateInput { axis, extent }) => {
            assert_eq!(axis, Axis::Z);
            assert!(extent.abs() < f64::EPSILON);
        }
        other => panic!("expected DegenerateInput, got {other:?}"),
    }

    // Spacing much larger than the surface: no error, empty mesh.
    let empty = voxelize(&surface, 50.0).unwrap();
    assert!(empty.is_empty());
    assert_eq!(empty.vertices().len(), 0);
    assert_eq!(empty.triangles().len(), 0);
}

#[test]
fn options_from_json_drive_the_run() {
    let options = VoxelizeOptions::from_json(
        r#"{ "density": 0.45, "classifier": "winding_number", "parallel": false }"#,
    )
    .unwrap();
    let surface = sphere();
    let winding = voxelize_with_options(&surface, &options).unwrap();
    let ray = voxelize(&surface, 0.45).unwrap();
    assert_eq!(winding.voxel_count(), ray.voxel_count());

    let tight = VoxelizeOptions::with_density(0.01).max_grid_points(Some(10_000));
    assert!(matches!(
        voxelize_with_options(&surface, &tight),
        Err(NeurocanvasError::GridTooLarge { limit: 10_000, .. })
    ));
}

#[test]
fn polygon_input_and_metrics() {
    // A 2 x 1 x 1 box given as quads.
    let vertices = vec![
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(2.0, 0.0, 0.0),
        DVec3::new(2.0, 1.0, 0.0),
        DVec3::new(0.0, 1.0, 0.0),
        DVec3::new(0.0, 0.0, 1.0),
        DVec3::new(2.0, 0.0, 1.0),
        DVec3::new(2.0, 1.0, 1.0),
        DVec3::new(0.0, 1.0, 1.0),
    ];
    let faces = vec![
        vec![0, 3, 2, 1],
        vec![4, 5, 6, 7],
        vec![0, 1, 5, 4],
        vec![3, 7, 6, 2],
        vec![0, 4, 7, 3],
        vec![1, 2, 6, 5],
    ];
    let options = VoxelizeOptions::with_density(0.3);
    let (surface, voxels) = voxelize_polygons(vertices, &faces, &options).unwrap();
    assert_eq!(surface.num_triangles(), 12);
    assert!(surface.is_closed());
    check_buffers(&voxels);

    let metrics = VoxelMetrics::compute(&surface, &voxels);
    assert!((metrics.surface_volume - 2.0).abs() < 1e-12);
    assert_eq!(metrics.voxel_count, voxels.voxel_count());
    let ratio = metrics.fill_ratio.unwrap();
    assert!(ratio > 0.0 && ratio < 2.0, "fill ratio {ratio}");
}

#[test]
fn custom_classifier_plugs_in() {
    /// Treats the surface as its bounding box.
    struct BoxClassifier;

    impl InsideClassifier for BoxClassifier {
        fn name(&self) -> &'static str {
            "bounding-box"
        }

        fn classify(&self, surface: &SurfaceMesh, points: &[DVec3]) -> Result<Vec<bool>> {
            let bb = surface.bounding_box().ok_or(NeurocanvasError::EmptySurface)?;
            Ok(points.iter().map(|p| bb.contains(*p)).collect())
        }
    }

    let surface = primitives::cuboid(DVec3::ZERO, DVec3::new(1.0, 2.0, 3.0)).unwrap();
    let mesh = Voxelizer::new()
        .with_classifier(Box::new(BoxClassifier))
        .voxelize(&surface, 1.0)
        .unwrap();
    // Lattice of 2 x 3 x 4 points, all on or inside the box.
    assert_eq!(mesh.voxel_count(), 24);
    let first: Vec<DVec3> = mesh.voxel_vertices(0).to_vec();
    assert_eq!(first[0], DVec3::splat(-0.5));
    assert_eq!(first[6], DVec3::splat(0.5));
    let last = mesh.centers().last().unwrap();
    assert_eq!(last, DVec3::new(1.0, 2.0, 3.0));
}
