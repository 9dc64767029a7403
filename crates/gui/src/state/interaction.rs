//! Edit-mode state machine
//!
//! Turns per-frame pointer samples into pending mesh transforms, topology
//! edits and camera motion. Primary-button drags preview an edit and the
//! release commits it; the secondary button orbits the camera.

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::state::mesh::{ExtrudeTarget, QuadMesh};
use crate::state::settings::{InteractionSettings, RotationPivot};
use crate::viewport::camera::{OrbitCamera, Viewport};
use crate::viewport::picking::closest_point_on_line;

/// What a primary-button drag does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditMode {
    #[default]
    Rotation,
    Translation,
    Subdivide,
    Extrude,
}

impl EditMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            EditMode::Rotation => "Rotate",
            EditMode::Translation => "Translate",
            EditMode::Subdivide => "Subdivide",
            EditMode::Extrude => "Extrude",
        }
    }

    /// Number key selecting the mode
    pub fn shortcut(&self) -> &'static str {
        match self {
            EditMode::Rotation => "1",
            EditMode::Translation => "2",
            EditMode::Subdivide => "3",
            EditMode::Extrude => "4",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            EditMode::Rotation => "Drag to rotate the object",
            EditMode::Translation => "Drag a face to move the object",
            EditMode::Subdivide => "Click a face to split it in four",
            EditMode::Extrude => "Drag a face to extrude it",
        }
    }

    pub fn all() -> &'static [EditMode] {
        &[
            EditMode::Rotation,
            EditMode::Translation,
            EditMode::Subdivide,
            EditMode::Extrude,
        ]
    }
}

/// Pointer state sampled once per frame.
///
/// Positions are viewport pixels with the origin at the bottom-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    /// Cursor position, None when the cursor is outside the viewport
    pub position: Option<Vec2>,
    pub primary_down: bool,
    pub secondary_down: bool,
    /// Scroll wheel steps since the previous sample (positive zooms in)
    pub scroll_steps: f32,
}

impl PointerSample {
    /// Hovering at `position` with no buttons held
    pub fn at(position: Vec2) -> Self {
        Self {
            position: Some(position),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct ButtonTrack {
    down: bool,
    /// Position at press
    start: Vec2,
    /// Last position a move was processed at
    last: Vec2,
}

impl ButtonTrack {
    fn press(position: Vec2) -> Self {
        Self {
            down: true,
            start: position,
            last: position,
        }
    }
}

/// What the current primary drag acts on, captured at press
#[derive(Debug, Clone, Copy)]
enum DragAnchor {
    Rotation { pivot: Vec3 },
    /// Camera-space z of the picked point
    Translation { camera_z: f32 },
    Extrude(ExtrudeTarget),
}

/// What a single `process` call did
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    pub clicked: bool,
    pub dragged: bool,
    pub committed: bool,
    pub orbited: bool,
    pub zoomed: bool,
    /// Face subdivided or extruded by this tick's click
    pub edited_face: Option<usize>,
}

/// Interaction state carried between frames
#[derive(Debug, Default)]
pub struct InteractionState {
    mode: EditMode,
    primary: ButtonTrack,
    secondary: ButtonTrack,
    anchor: Option<DragAnchor>,
}

impl InteractionState {
    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// Switch edit mode. Ignored while a primary drag is in progress.
    /// Returns whether the mode is now `mode`.
    pub fn set_mode(&mut self, mode: EditMode) -> bool {
        if self.primary.down {
            return self.mode == mode;
        }
        if self.mode != mode {
            tracing::info!("Edit mode: {}", mode.display_name());
            self.mode = mode;
        }
        true
    }

    /// Whether the primary button is held
    pub fn is_dragging(&self) -> bool {
        self.primary.down
    }

    /// Forget button state and drag anchors, keeping the mode
    pub fn reset(&mut self) {
        self.primary = ButtonTrack::default();
        self.secondary = ButtonTrack::default();
        self.anchor = None;
    }

    /// Handle one control-loop tick
    pub fn process(
        &mut self,
        sample: &PointerSample,
        mesh: &mut QuadMesh,
        camera: &mut OrbitCamera,
        viewport: &Viewport,
        settings: &InteractionSettings,
    ) -> TickReport {
        let mut report = TickReport::default();

        match (self.primary.down, sample.primary_down, sample.position) {
            (false, true, Some(pos)) => {
                self.primary_press(pos, mesh, camera, viewport, settings, &mut report);
            }
            (true, true, Some(pos)) => {
                if self.exceeds_dead_zone(self.primary.last, pos, settings) {
                    self.primary.last = pos;
                    self.primary_move(pos, mesh, camera, viewport, settings);
                    report.dragged = true;
                }
            }
            (true, false, _) => {
                self.primary = ButtonTrack::default();
                self.anchor = None;
                report.committed = mesh.commit_transform();
                if report.committed {
                    tracing::info!("Committed {} edit", self.mode.display_name().to_lowercase());
                }
            }
            _ => {}
        }

        match (self.secondary.down, sample.secondary_down, sample.position) {
            (false, true, Some(pos)) => self.secondary = ButtonTrack::press(pos),
            (true, true, Some(pos)) => {
                if self.exceeds_dead_zone(self.secondary.last, pos, settings) {
                    let last = self.secondary.last;
                    self.secondary.last = pos;
                    if let Some(orbit) = screen_rotation(
                        camera,
                        viewport,
                        last,
                        pos,
                        settings.orbit_speed,
                        Vec3::ZERO,
                    ) {
                        camera.apply_transform(orbit);
                        report.orbited = true;
                    }
                }
            }
            (true, false, _) => self.secondary = ButtonTrack::default(),
            _ => {}
        }

        if sample.scroll_steps != 0.0 {
            camera.zoom(settings.zoom_step.powf(sample.scroll_steps));
            report.zoomed = true;
        }

        report
    }

    fn exceeds_dead_zone(&self, last: Vec2, pos: Vec2, settings: &InteractionSettings) -> bool {
        let d = (pos - last).abs();
        d.x > settings.dead_zone || d.y > settings.dead_zone
    }

    fn primary_press(
        &mut self,
        pos: Vec2,
        mesh: &mut QuadMesh,
        camera: &OrbitCamera,
        viewport: &Viewport,
        settings: &InteractionSettings,
        report: &mut TickReport,
    ) {
        self.primary = ButtonTrack::press(pos);
        report.clicked = true;
        let ray = camera.screen_ray(pos, viewport);

        self.anchor = match self.mode {
            EditMode::Rotation => {
                let pivot = match settings.rotation_pivot {
                    RotationPivot::Origin => Vec3::ZERO,
                    RotationPivot::BoundsCenter => mesh.world_bounds().center(),
                };
                Some(DragAnchor::Rotation { pivot })
            }
            EditMode::Translation => mesh.intersect(&ray).map(|hit| DragAnchor::Translation {
                camera_z: camera.world_to_camera(hit.point).z,
            }),
            EditMode::Subdivide => {
                report.edited_face = mesh.subdivide_face(&ray);
                None
            }
            EditMode::Extrude => mesh.gen_extrude_face(&ray).map(|target| {
                report.edited_face = Some(target.face);
                DragAnchor::Extrude(target)
            }),
        };

        if let Some(face) = report.edited_face {
            tracing::debug!("{} hit face {face}", self.mode.display_name());
        }
    }

    fn primary_move(
        &self,
        pos: Vec2,
        mesh: &mut QuadMesh,
        camera: &OrbitCamera,
        viewport: &Viewport,
        settings: &InteractionSettings,
    ) {
        let start = self.primary.start;
        match self.anchor {
            Some(DragAnchor::Rotation { pivot }) => {
                // Back at the start pixel the preview returns to identity
                let rotation =
                    screen_rotation(camera, viewport, start, pos, settings.rotation_speed, pivot)
                        .unwrap_or(Mat4::IDENTITY);
                mesh.apply_transform(rotation);
            }
            Some(DragAnchor::Translation { camera_z }) => {
                let from = camera.screen_to_world(start, viewport, camera_z);
                let to = camera.screen_to_world(pos, viewport, camera_z);
                mesh.apply_transform(Mat4::from_translation(to - from));
            }
            Some(DragAnchor::Extrude(target)) => {
                let ray = camera.screen_ray(pos, viewport);
                if let Some(p) = closest_point_on_line(target.point, target.normal, &ray) {
                    mesh.apply_face_transform(
                        Some(target.face),
                        Mat4::from_translation(p - target.point),
                    );
                }
            }
            None => {}
        }
    }
}

/// Rotation following a screen drag from `from` to `to`.
///
/// The axis lies in the view plane perpendicular to the drag direction and the
/// angle is `speed` radians per pixel. None for a zero-length drag.
fn screen_rotation(
    camera: &OrbitCamera,
    viewport: &Viewport,
    from: Vec2,
    to: Vec2,
    speed: f32,
    pivot: Vec3,
) -> Option<Mat4> {
    let v = to - from;
    let a = Vec2::new(-v.y, v.x);
    let w0 = camera.screen_to_world_at_depth(from, viewport, 1.0);
    let w1 = camera.screen_to_world_at_depth(from + a, viewport, 1.0);
    let axis = (w1 - w0).try_normalize()?;
    let rotation = Mat4::from_axis_angle(axis, speed * a.length());
    Some(Mat4::from_translation(pivot) * rotation * Mat4::from_translation(-pivot))
}
