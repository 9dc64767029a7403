//! JSON command protocol for driving the editor headlessly.
//!
//! Screen positions are `[x, y]` viewport pixels with the origin at the
//! bottom-left corner.

use glam::{Mat4, Vec2};
use serde::{Deserialize, Serialize};

use crate::harness::TestHarness;
use crate::state::interaction::EditMode;

fn default_steps() -> usize {
    8
}

/// A command executed against the harness.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum AgentCommand {
    /// Switch the edit mode.
    SetMode { mode: EditMode },
    /// Resize the viewport.
    Resize { width: f32, height: f32 },
    /// Primary-button drag (press, moves, release).
    Drag {
        from: [f32; 2],
        to: [f32; 2],
        #[serde(default = "default_steps")]
        steps: usize,
    },
    /// Primary-button click.
    Click { at: [f32; 2] },
    /// Secondary-button drag orbiting the camera.
    Orbit {
        from: [f32; 2],
        to: [f32; 2],
        #[serde(default = "default_steps")]
        steps: usize,
    },
    /// Scroll the wheel.
    Zoom { steps: f32 },
    /// Subdivide the face under a screen position.
    SubdivideAt { at: [f32; 2] },
    /// Extrude the face under a screen position, pull the lid out by
    /// `distance` along its normal and commit.
    ExtrudeAt {
        at: [f32; 2],
        #[serde(default)]
        distance: f32,
    },
    /// Inspect the mesh, camera and interaction state.
    Inspect,
    /// Replace the mesh with a fresh cuboid.
    Reset,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut TestHarness, cmd: AgentCommand) -> CommandResponse {
    match cmd {
        AgentCommand::SetMode { mode } => {
            if harness.set_mode(mode) {
                CommandResponse::ok()
            } else {
                CommandResponse::err("Cannot change mode while dragging")
            }
        }

        AgentCommand::Resize { width, height } => {
            if width < 1.0 || height < 1.0 {
                return CommandResponse::err(format!("Invalid viewport size {width}x{height}"));
            }
            harness.resize(width, height);
            CommandResponse::ok()
        }

        AgentCommand::Drag { from, to, steps } => {
            let report = harness.drag(Vec2::from(from), Vec2::from(to), steps);
            CommandResponse::ok_with_data(serde_json::json!({ "committed": report.committed }))
        }

        AgentCommand::Click { at } => {
            let report = harness.click(Vec2::from(at));
            CommandResponse::ok_with_data(serde_json::json!({
                "edited_face": report.edited_face,
                "committed": report.committed,
            }))
        }

        AgentCommand::Orbit { from, to, steps } => {
            harness.orbit(Vec2::from(from), Vec2::from(to), steps);
            CommandResponse::ok_with_data(serde_json::json!({
                "eye": harness.camera.eye_position().to_array(),
            }))
        }

        AgentCommand::Zoom { steps } => {
            harness.zoom(steps);
            CommandResponse::ok_with_data(serde_json::json!({
                "distance": harness.camera.distance(),
            }))
        }

        AgentCommand::SubdivideAt { at } => match harness.subdivide_at(Vec2::from(at)) {
            Some(face) => CommandResponse::ok_with_data(serde_json::json!({
                "face": face,
                "face_count": harness.face_count(),
            })),
            None => CommandResponse::err("No face under cursor"),
        },

        AgentCommand::ExtrudeAt { at, distance } => {
            let Some(target) = harness.extrude_at(Vec2::from(at)) else {
                return CommandResponse::err("No face under cursor");
            };
            harness.mesh.apply_face_transform(
                Some(target.face),
                Mat4::from_translation(target.normal * distance),
            );
            harness.mesh.commit_transform();
            CommandResponse::ok_with_data(serde_json::json!({
                "face": target.face,
                "normal": target.normal.to_array(),
                "face_count": harness.face_count(),
                "vertex_count": harness.vertex_count(),
            }))
        }

        AgentCommand::Inspect => {
            let errors = harness.validate();
            let mesh = &harness.mesh;
            let faces: Vec<serde_json::Value> = (0..mesh.face_count())
                .map(|f| {
                    serde_json::json!({
                        "index": f,
                        "vertices": mesh.face(f).indices(),
                        "centroid": mesh.world_face_centroid(f).to_array(),
                        "normal": mesh.world_face_normal(f).to_array(),
                        "area": mesh.face_area(f),
                        "screen": harness.face_screen_position(f).map(|p| p.to_array()),
                    })
                })
                .collect();
            let bounds = mesh.world_bounds();
            CommandResponse::ok_with_data(serde_json::json!({
                "mode": harness.mode(),
                "vertex_count": mesh.vertex_count(),
                "face_count": mesh.face_count(),
                "pending": mesh.has_pending(),
                "bounds": { "min": bounds.min.to_array(), "max": bounds.max.to_array() },
                "camera_distance": harness.camera.distance(),
                "viewport": [harness.viewport.width, harness.viewport.height],
                "faces": faces,
                "errors": errors,
            }))
        }

        AgentCommand::Reset => {
            harness.reset_mesh();
            CommandResponse::ok()
        }
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(harness: &mut TestHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: AgentCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    harness: &mut TestHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<AgentCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(harness, cmd))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_serde_set_mode() {
        let json = r#"{"command": "set_mode", "mode": "extrude"}"#;
        let cmd: AgentCommand = serde_json::from_str(json).unwrap();
        assert!(matches!(cmd, AgentCommand::SetMode { mode: EditMode::Extrude }));
    }

    #[test]
    fn test_command_serde_unknown_mode_rejected() {
        let json = r#"{"command": "set_mode", "mode": "bevel"}"#;
        assert!(serde_json::from_str::<AgentCommand>(json).is_err());
    }

    #[test]
    fn test_command_serde_drag_default_steps() {
        let json = r#"{"command": "drag", "from": [1.0, 2.0], "to": [3.0, 4.0]}"#;
        let cmd: AgentCommand = serde_json::from_str(json).unwrap();
        match cmd {
            AgentCommand::Drag { from, to, steps } => {
                assert_eq!(from, [1.0, 2.0]);
                assert_eq!(to, [3.0, 4.0]);
                assert_eq!(steps, 8);
            }
            _ => panic!("Expected Drag"),
        }
    }

    #[test]
    fn test_execute_inspect() {
        let mut h = TestHarness::new();
        let resp = execute_json(&mut h, r#"{"command": "inspect"}"#).unwrap();
        assert!(resp.success);
        let data = resp.data.unwrap();
        assert_eq!(data["face_count"], 6);
        assert_eq!(data["vertex_count"], 8);
        assert_eq!(data["mode"], "rotation");
        assert_eq!(data["pending"], false);
        assert_eq!(data["errors"].as_array().map(|a| a.len()), Some(0));
    }

    #[test]
    fn test_execute_subdivide_miss_is_error() {
        let mut h = TestHarness::new();
        let resp = execute_json(&mut h, r#"{"command": "subdivide_at", "at": [1.0, 1.0]}"#).unwrap();
        assert!(!resp.success);
        assert_eq!(h.face_count(), 6);
    }

    #[test]
    fn test_execute_resize_rejects_zero() {
        let mut h = TestHarness::new();
        let resp = execute_json(&mut h, r#"{"command": "resize", "width": 0, "height": 600}"#).unwrap();
        assert!(!resp.success);
    }

    #[test]
    fn test_execute_invalid_json() {
        let mut h = TestHarness::new();
        let result = execute_json(&mut h, "not valid json");
        assert!(result.is_err());
    }
}
