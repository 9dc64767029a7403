//! Integration tests for the AgentCommand JSON protocol.
//!
//! Tests the full command pipeline: JSON string -> parse -> execute -> response.

use quadedit_gui_lib::command::{execute_json, execute_json_batch};
use quadedit_gui_lib::harness::TestHarness;
use quadedit_gui_lib::state::EditMode;

fn screen_of_face(h: &TestHarness, face: usize) -> [f32; 2] {
    h.face_screen_position(face).unwrap().to_array()
}

#[test]
fn test_command_set_mode() {
    let mut h = TestHarness::new();
    let resp = execute_json(&mut h, r#"{"command": "set_mode", "mode": "translation"}"#).unwrap();
    assert!(resp.success);
    assert_eq!(h.mode(), EditMode::Translation);
}

#[test]
fn test_command_subdivide_at_face() {
    let mut h = TestHarness::new();
    let [x, y] = screen_of_face(&h, 5);
    let json = format!(r#"{{"command": "subdivide_at", "at": [{x}, {y}]}}"#);

    let resp = execute_json(&mut h, &json).unwrap();
    assert!(resp.success, "{:?}", resp.error);
    let data = resp.data.unwrap();
    assert_eq!(data["face"], 5);
    assert_eq!(data["face_count"], 9);
}

#[test]
fn test_command_extrude_at_with_distance() {
    let mut h = TestHarness::new();
    let [x, y] = screen_of_face(&h, 5);
    let json = format!(r#"{{"command": "extrude_at", "at": [{x}, {y}], "distance": 0.5}}"#);

    let resp = execute_json(&mut h, &json).unwrap();
    assert!(resp.success, "{:?}", resp.error);
    let data = resp.data.unwrap();
    assert_eq!(data["face"], 5);
    assert_eq!(data["face_count"], 10);
    assert_eq!(data["vertex_count"], 12);

    assert!(!h.mesh.has_pending());
    assert!((h.mesh.face_centroid(5).z - 1.5).abs() < 1e-5);
    assert!(h.validator().assert_dimensions_approx([2.0, 2.0, 2.5], 1e-4));
}

#[test]
fn test_command_click_in_subdivide_mode() {
    let mut h = TestHarness::new();
    let [x, y] = screen_of_face(&h, 5);
    let json = format!(
        r#"[
            {{"command": "set_mode", "mode": "subdivide"}},
            {{"command": "click", "at": [{x}, {y}]}},
            {{"command": "inspect"}}
        ]"#
    );

    let responses = execute_json_batch(&mut h, &json).unwrap();
    assert_eq!(responses.len(), 3);
    assert!(responses.iter().all(|r| r.success));
    assert_eq!(responses[1].data.as_ref().unwrap()["edited_face"], 5);

    let inspect = responses[2].data.as_ref().unwrap();
    assert_eq!(inspect["mode"], "subdivide");
    assert_eq!(inspect["face_count"], 9);
    assert_eq!(inspect["vertex_count"], 13);
    assert_eq!(inspect["faces"].as_array().unwrap().len(), 9);
    assert_eq!(inspect["errors"].as_array().unwrap().len(), 0);
}

#[test]
fn test_command_drag_rotates_and_commits() {
    let mut h = TestHarness::new();
    let resp = execute_json(
        &mut h,
        r#"{"command": "drag", "from": [500, 500], "to": [600, 520], "steps": 5}"#,
    )
    .unwrap();
    assert!(resp.success);
    assert_eq!(resp.data.unwrap()["committed"], true);
    assert!(!h.mesh.has_pending());
}

#[test]
fn test_command_orbit_and_zoom() {
    let mut h = TestHarness::new();
    let batch = r#"[
        {"command": "orbit", "from": [500, 500], "to": [400, 450]},
        {"command": "zoom", "steps": 3}
    ]"#;
    let responses = execute_json_batch(&mut h, batch).unwrap();
    assert!(responses.iter().all(|r| r.success));

    let distance = responses[1].data.as_ref().unwrap()["distance"].as_f64().unwrap();
    assert!((distance - 5.0 / 1.1_f64.powi(3)).abs() < 1e-3);
}

#[test]
fn test_command_reset_restores_cuboid() {
    let mut h = TestHarness::new();
    let [x, y] = screen_of_face(&h, 5);
    let json = format!(
        r#"[
            {{"command": "subdivide_at", "at": [{x}, {y}]}},
            {{"command": "reset"}},
            {{"command": "inspect"}}
        ]"#
    );
    let responses = execute_json_batch(&mut h, &json).unwrap();
    assert_eq!(responses[2].data.as_ref().unwrap()["face_count"], 6);
}

#[test]
fn test_command_errors() {
    let mut h = TestHarness::new();

    let miss = execute_json(&mut h, r#"{"command": "extrude_at", "at": [2, 2]}"#).unwrap();
    assert!(!miss.success);
    assert!(miss.error.is_some());
    assert_eq!(h.face_count(), 6);

    assert!(execute_json(&mut h, r#"{"command": "explode"}"#).is_err());
    assert!(execute_json_batch(&mut h, r#"{"command": "inspect"}"#).is_err());
}
