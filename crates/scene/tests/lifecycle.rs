use scene::{SceneConfig, TreeScene};
use std::f32::consts::{PI, TAU};

fn config(seed: u64) -> SceneConfig {
    SceneConfig {
        seed: Some(seed),
        foliage_count: 2_000,
        base_snow_count: 500,
        falling_snow_count: 300,
        ornament_count: 20,
        ..SceneConfig::default()
    }
}

fn snow_positions(scene: &TreeScene) -> Vec<f32> {
    scene
        .with_snow(|s| s.field().positions().to_vec())
        .expect("snow attached")
}

fn angle_diff(a: f32, b: f32) -> f32 {
    let d = (a - b).rem_euclid(TAU);
    d.min(TAU - d)
}

#[test]
fn static_geometry_is_generated_once() {
    let mut scene = TreeScene::mount(config(11)).unwrap();
    let foliage = scene.assets().foliage.positions().as_ptr();
    let snapshot = scene.assets().foliage.positions().to_vec();
    let base = scene.assets().base_snow.positions().to_vec();

    for frame in 1..=120 {
        scene.on_frame(frame as f64 / 60.0);
    }

    assert_eq!(scene.assets().foliage.positions().as_ptr(), foliage);
    assert_eq!(scene.assets().foliage.positions(), snapshot.as_slice());
    assert_eq!(scene.assets().base_snow.positions(), base.as_slice());
}

#[test]
fn same_seed_builds_the_same_tree() {
    let a = TreeScene::mount(config(5)).unwrap();
    let b = TreeScene::mount(config(5)).unwrap();
    let c = TreeScene::mount(config(6)).unwrap();
    assert_eq!(a.assets().foliage.positions(), b.assets().foliage.positions());
    assert_eq!(a.assets().ornaments, b.assets().ornaments);
    assert_eq!(snow_positions(&a), snow_positions(&b));
    assert_ne!(a.assets().foliage.positions(), c.assets().foliage.positions());
}

#[test]
fn star_angle_follows_elapsed_time() {
    let mut scene = TreeScene::mount(config(1)).unwrap();
    scene.on_frame(0.0);
    assert!(scene.star_yaw().unwrap().abs() < 1e-5);

    scene.on_frame(2.0);
    assert!(angle_diff(scene.star_yaw().unwrap(), 1.6) < 1e-4);

    // Skipping ahead lands on the same angle as stepping there.
    scene.on_frame(10.0);
    let yaw = scene.star_yaw().unwrap();
    assert!(angle_diff(yaw, 8.0) < 1e-3);
    assert!(yaw > -PI && yaw <= PI);
}

#[test]
fn snow_stays_inside_its_column() {
    let mut scene = TreeScene::mount(config(3)).unwrap();
    for frame in 1..=2_000 {
        scene.on_frame(frame as f64 / 60.0);
    }
    let positions = snow_positions(&scene);
    assert_eq!(positions.len(), 300 * 3);
    for y in positions.iter().skip(1).step_by(3) {
        assert!((-6.0..=20.0).contains(y));
    }
}

#[test]
fn unmount_stops_all_animation() {
    let mut scene = TreeScene::mount(config(9)).unwrap();
    scene.on_frame(0.5);
    scene.take_snow_dirty();
    let yaw = scene.star_yaw();

    scene.unmount();
    assert!(!scene.is_mounted());
    let frozen = snow_positions(&scene);
    for frame in 1..=30 {
        scene.on_frame(0.5 + frame as f64 / 60.0);
    }
    assert_eq!(snow_positions(&scene), frozen);
    assert_eq!(scene.star_yaw(), yaw);
    assert!(!scene.take_snow_dirty());

    // idempotent
    scene.unmount();
}
