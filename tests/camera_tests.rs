// Host-side tests for the orbit camera and pointer picking.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod camera {
        include!("../src/core/camera.rs");
    }
}

use crate::core::camera::*;
use glam::Vec3;

#[test]
fn default_eye_matches_start_position() {
    let cam = OrbitCamera::default();
    let eye = cam.eye();
    assert!((eye - Vec3::new(0.0, 20.0, 40.0)).length() < 1e-3, "{:?}", eye);
}

#[test]
fn zoom_is_clamped() {
    let mut cam = OrbitCamera::default();
    for _ in 0..200 {
        cam.zoom(-500.0);
    }
    assert_eq!(cam.distance, 5.0);
    for _ in 0..200 {
        cam.zoom(500.0);
    }
    assert_eq!(cam.distance, 100.0);
}

#[test]
fn pitch_is_clamped() {
    let mut cam = OrbitCamera::default();
    cam.rotate(0.0, 1.0e6);
    assert!(cam.pitch <= 1.5);
    cam.rotate(0.0, -1.0e6);
    assert!(cam.pitch >= -1.5);
    assert!(cam.eye().is_finite());
}

#[test]
fn rotate_keeps_distance() {
    let mut cam = OrbitCamera::default();
    let d = cam.eye().length();
    cam.rotate(123.0, -45.0);
    assert!((cam.eye().length() - d).abs() < 1e-3);
}

#[test]
fn center_ray_points_at_origin() {
    let cam = OrbitCamera::default();
    let (ro, rd) = cam.screen_to_world_ray(800.0, 600.0, 400.0, 300.0);
    let to_origin = (-ro).normalize();
    assert!(rd.dot(to_origin) > 0.999);
}

#[test]
fn origin_projects_to_screen_center() {
    let cam = OrbitCamera::default();
    let p = cam
        .world_to_screen(Vec3::ZERO, 800.0, 600.0)
        .expect("origin is in front of the camera");
    assert!((p.x - 400.0).abs() < 0.5 && (p.y - 300.0).abs() < 0.5);
    let behind = cam.eye() * 2.0;
    assert!(cam.world_to_screen(behind, 800.0, 600.0).is_none());
}

#[test]
fn ray_sphere_hits_and_misses() {
    let t = ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 5.0), 2.0);
    assert!((t.expect("hit") - 3.0).abs() < 1e-5);
    assert!(ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(5.0, 0.0, 5.0), 2.0).is_none());
    assert!(ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, -5.0), 2.0).is_none());
}

#[test]
fn pick_prefers_nearest_hit() {
    let spheres = [
        (Vec3::new(0.0, 0.0, 20.0), 1.0),
        (Vec3::new(0.0, 0.0, 10.0), 1.0),
        (Vec3::new(5.0, 0.0, 5.0), 1.0),
    ];
    assert_eq!(pick_nearest(Vec3::ZERO, Vec3::Z, spheres), Some(1));
    assert_eq!(pick_nearest(Vec3::ZERO, -Vec3::Z, spheres), None);
}

#[test]
fn hovering_projected_body_picks_it() {
    let cam = OrbitCamera::default();
    let center = Vec3::new(16.0, 0.0, 0.0);
    let px = cam.world_to_screen(center, 1024.0, 768.0).expect("visible");
    let (ro, rd) = cam.screen_to_world_ray(1024.0, 768.0, px.x, px.y);
    assert_eq!(pick_nearest(ro, rd, [(Vec3::ZERO, 2.5), (center, 1.0)]), Some(1));
}
