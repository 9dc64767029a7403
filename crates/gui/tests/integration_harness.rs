//! Integration tests for TestHarness.
//!
//! Drives the editor through synthetic pointer input and checks the mesh,
//! camera and render cache afterwards.

use glam::{Vec2, Vec3};
use quadedit_gui_lib::fixtures::nudge;
use quadedit_gui_lib::harness::TestHarness;
use quadedit_gui_lib::state::EditMode;

/// Harness whose camera looks at the cuboid from the +X side, slightly above
fn side_view_harness() -> TestHarness {
    let mut h = TestHarness::new();
    h.camera.look_at(Vec3::new(6.0, 0.0, 2.0), Vec3::ZERO, Vec3::Z);
    h
}

#[test]
fn test_rotation_drag_commits_rigid_motion() {
    let mut h = TestHarness::new();
    let before = h.mesh.vertices().to_vec();
    let center = h.viewport.center();

    let report = h.drag(center, nudge(center, 80.0, 30.0), 10);
    assert!(report.committed);
    assert!(!h.mesh.has_pending());

    let after = h.mesh.vertices();
    assert_eq!(after.len(), 8);
    assert!(before.iter().zip(after).any(|(a, b)| (*a - *b).length() > 1e-3));
    // Rotation about the origin keeps every corner at the same distance
    for v in after {
        assert!((v.length() - 3.0_f32.sqrt()).abs() < 1e-4);
    }
    assert!(h.validate().is_empty(), "{:?}", h.validate());
}

#[test]
fn test_drag_inside_dead_zone_does_nothing() {
    let mut h = TestHarness::new();
    let center = h.viewport.center();
    let version = h.mesh.version();

    h.press(center);
    let moved = h.move_to(nudge(center, 1.5, -2.0));
    assert!(!moved.dragged);
    assert!(!h.mesh.has_pending());

    let report = h.release();
    assert!(!report.committed);
    assert_eq!(h.mesh.version(), version);
}

#[test]
fn test_rotation_replaces_instead_of_accumulating() {
    let mut h = TestHarness::new();
    let center = h.viewport.center();

    h.press(center);
    h.move_to(nudge(center, 60.0, 0.0));
    h.move_to(nudge(center, 120.0, 0.0));
    h.move_to(nudge(center, 60.0, 0.0));
    let back_and_forth = h.mesh.active_transform();
    h.release();

    let mut direct = TestHarness::new();
    direct.press(center);
    direct.move_to(nudge(center, 60.0, 0.0));
    let single = direct.mesh.active_transform();

    assert!(back_and_forth.abs_diff_eq(single, 1e-5));
}

#[test]
fn test_rotation_dragged_back_to_start_commits_nothing() {
    let mut h = TestHarness::new();
    let before = h.mesh.vertices().to_vec();
    let version = h.mesh.version();
    let center = h.viewport.center();

    h.press(center);
    h.move_to(nudge(center, 60.0, 0.0));
    assert!(h.mesh.has_pending());
    h.move_to(center);
    assert!(!h.mesh.has_pending());

    let report = h.release();
    assert!(!report.committed);
    assert_eq!(h.mesh.vertices(), before.as_slice());
    assert!(h.mesh.version() > version);
}

#[test]
fn test_rotation_retraced_path_commits_nothing() {
    let mut h = TestHarness::new();
    let before = h.mesh.vertices().to_vec();
    let center = h.viewport.center();
    let far = nudge(center, 90.0, -45.0);

    h.press(center);
    for step in 1..=6 {
        h.move_to(center.lerp(far, step as f32 / 6.0));
    }
    for step in (0..6).rev() {
        h.move_to(center.lerp(far, step as f32 / 6.0));
    }
    assert!(!h.mesh.has_pending());

    assert!(!h.release().committed);
    assert_eq!(h.mesh.vertices(), before.as_slice());
}

#[test]
fn test_translation_keeps_picked_point_under_cursor() {
    let mut h = side_view_harness();
    h.set_mode(EditMode::Translation);

    let start = h.face_screen_position(1).unwrap();
    let end = nudge(start, 40.0, -25.0);
    let report = h.drag(start, end, 6);
    assert!(report.committed);

    let moved = h.face_screen_position(1).unwrap();
    assert!((moved - end).length() < 0.5, "face centroid at {moved:?}, cursor at {end:?}");
    assert!(h.validator().assert_dimensions_approx([2.0, 2.0, 2.0], 1e-4));
}

#[test]
fn test_translation_from_empty_space_is_ignored() {
    let mut h = TestHarness::new();
    h.set_mode(EditMode::Translation);
    let corner = Vec2::new(5.0, 5.0);
    assert!(h.face_under(corner).is_none());

    let report = h.drag(corner, Vec2::new(300.0, 300.0), 5);
    assert!(!report.committed);
    assert!(h.mesh.vertices().iter().all(|v| (v.abs() - Vec3::ONE).length() < 1e-6));
}

#[test]
fn test_extrude_drag_pulls_lid_along_normal() {
    let mut h = side_view_harness();
    h.set_mode(EditMode::Extrude);

    let top = h.face_screen_position(5).unwrap();
    assert_eq!(h.face_under(top).map(|hit| hit.face), Some(5));

    h.press(top);
    assert_eq!(h.face_count(), 10);
    assert_eq!(h.vertex_count(), 12);
    assert_eq!(h.mesh.active_face(), Some(5));

    h.move_to(nudge(top, 0.0, 60.0));
    assert!(h.mesh.has_pending());
    let report = h.release();
    assert!(report.committed);

    let lid = h.mesh.world_face_centroid(5);
    assert!(lid.z > 1.1, "lid centroid {lid:?}");
    assert!(lid.x.abs() < 1e-3 && lid.y.abs() < 1e-3);
    assert_eq!(h.mesh.face(5).indices(), [8, 9, 10, 11]);

    let v = h.validator();
    assert!(v.is_closed());
    assert!(v.vector_area_sum().length() < 1e-4);
    assert!(v.collapsed_faces(1e-6).is_empty());
}

#[test]
fn test_extrude_click_without_drag_leaves_flat_sides() {
    let mut h = side_view_harness();
    h.set_mode(EditMode::Extrude);
    let top = h.face_screen_position(5).unwrap();

    let report = h.click(top);
    assert_eq!(report.edited_face, Some(5));
    assert_eq!(h.face_count(), 10);
    // Four zero-area sides, still a valid closed surface
    assert_eq!(h.validator().collapsed_faces(1e-6).len(), 4);
    assert!(h.validate().is_empty());
}

#[test]
fn test_subdivide_click_splits_face_and_shares_midpoints() {
    let mut h = side_view_harness();
    h.set_mode(EditMode::Subdivide);

    let top = h.face_screen_position(5).unwrap();
    let report = h.click(top);
    assert_eq!(report.edited_face, Some(5));
    assert_eq!(h.face_count(), 9);
    assert_eq!(h.vertex_count(), 13);

    // Neighbour across the shared edge reuses its midpoint
    let side = h.face_screen_position(1).unwrap();
    assert_eq!(h.face_under(side).map(|hit| hit.face), Some(1));
    h.click(side);
    assert_eq!(h.face_count(), 12);
    assert_eq!(h.vertex_count(), 17);
    assert!(h.validate().is_empty(), "{:?}", h.validate());
}

#[test]
fn test_subdivide_miss_changes_nothing() {
    let mut h = TestHarness::new();
    h.set_mode(EditMode::Subdivide);
    let report = h.click(Vec2::new(3.0, 3.0));
    assert_eq!(report.edited_face, None);
    assert_eq!(h.face_count(), 6);
}

#[test]
fn test_mode_change_refused_mid_drag() {
    let mut h = TestHarness::new();
    let center = h.viewport.center();
    h.press(center);
    assert!(!h.set_mode(EditMode::Extrude));
    assert_eq!(h.mode(), EditMode::Rotation);
    h.release();
    assert!(h.set_mode(EditMode::Extrude));
    assert_eq!(h.mode(), EditMode::Extrude);
}

#[test]
fn test_orbit_moves_camera_not_mesh() {
    let mut h = TestHarness::new();
    let version = h.mesh.version();
    let eye = h.camera.eye_position();
    let center = h.viewport.center();

    h.orbit(center, nudge(center, 100.0, 40.0), 10);

    assert!((h.camera.eye_position() - eye).length() > 0.1);
    assert!((h.camera.distance() - 5.0).abs() < 1e-3);
    assert_eq!(h.mesh.version(), version);
}

#[test]
fn test_zoom_steps() {
    let mut h = TestHarness::new();
    let report = h.zoom(1.0);
    assert!(report.zoomed);
    assert!((h.camera.distance() - 5.0 / 1.1).abs() < 1e-3);

    h.zoom(-2.0);
    assert!((h.camera.distance() - 5.0 * 1.1).abs() < 1e-3);
}

#[test]
fn test_resize_scales_screen_positions() {
    let mut h = TestHarness::new();
    let before = h.face_screen_position(5).unwrap();
    h.resize(2000.0, 2000.0);
    let after = h.face_screen_position(5).unwrap();
    assert!((after - before * 2.0).length() < 1e-2);
}

#[test]
fn test_render_cache_follows_mesh_version() {
    let mut h = TestHarness::new();
    assert_eq!(h.render().triangle_count(), 12);
    h.render();
    assert_eq!(h.rebuild_count(), 1);

    let center = h.viewport.center();
    h.press(center);
    h.move_to(nudge(center, 30.0, 0.0));
    h.render();
    assert_eq!(h.rebuild_count(), 2);

    h.release();
    h.render();
    assert_eq!(h.rebuild_count(), 3);
    h.render();
    assert_eq!(h.rebuild_count(), 3);
}

#[test]
fn test_render_cache_rebuilds_on_color_change() {
    let mut h = TestHarness::new();
    h.render();
    let version = h.mesh.version();

    h.settings.viewport.mesh_color = [255, 0, 0];
    let data = h.render();
    assert_eq!(data.vertices[6..9], [1.0_f32, 0.0, 0.0]);
    assert_eq!(h.rebuild_count(), 2);
    assert_eq!(h.mesh.version(), version);
}

#[test]
fn test_reset_after_edits() {
    let mut h = side_view_harness();
    h.set_mode(EditMode::Extrude);
    let top = h.face_screen_position(5).unwrap();
    h.drag(top, nudge(top, 0.0, 50.0), 4);
    assert_eq!(h.face_count(), 10);

    let version = h.mesh.version();
    h.reset_mesh();
    assert_eq!(h.face_count(), 6);
    assert!(h.mesh.version() > version);
    assert_eq!(h.mode(), EditMode::Extrude);
}
