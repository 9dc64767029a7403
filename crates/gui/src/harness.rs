//! Headless test harness for driving the editor programmatically.
//!
//! Owns everything the viewer owns (mesh, camera, viewport, interaction state
//! and settings) and feeds synthetic pointer samples through the same
//! `InteractionState::process` path the GUI uses.

use glam::{Vec2, Vec3};

use crate::build::{MeshCache, MeshStyle};
use crate::state::interaction::{EditMode, InteractionState, PointerSample, TickReport};
use crate::state::mesh::{ExtrudeTarget, QuadMesh};
use crate::state::{initial_mesh, AppSettings};
use crate::validation::{MeshValidator, RenderValidator};
use crate::viewport::camera::{OrbitCamera, Viewport};
use crate::viewport::mesh::MeshData;
use crate::viewport::picking::{FaceHit, Ray};

/// Headless test harness: manages mesh, camera, input and render cache
pub struct TestHarness {
    pub mesh: QuadMesh,
    pub camera: OrbitCamera,
    pub viewport: Viewport,
    pub interaction: InteractionState,
    pub settings: AppSettings,
    cursor: Vec2,
    primary_down: bool,
    secondary_down: bool,
    cache: MeshCache,
}

impl TestHarness {
    /// Create a harness with default settings (never reads the user's config).
    pub fn new() -> Self {
        Self::with_settings(AppSettings::default())
    }

    pub fn with_settings(settings: AppSettings) -> Self {
        let viewport = Viewport::default();
        Self {
            mesh: initial_mesh(&settings),
            camera: OrbitCamera::from_settings(&settings.camera),
            cursor: viewport.center(),
            viewport,
            interaction: InteractionState::default(),
            settings,
            primary_down: false,
            secondary_down: false,
            cache: MeshCache::new(),
        }
    }

    // ── Input ─────────────────────────────────────────────────

    fn tick(&mut self, scroll_steps: f32) -> TickReport {
        let sample = PointerSample {
            position: Some(self.cursor),
            primary_down: self.primary_down,
            secondary_down: self.secondary_down,
            scroll_steps,
        };
        self.interaction.process(
            &sample,
            &mut self.mesh,
            &mut self.camera,
            &self.viewport,
            &self.settings.interaction,
        )
    }

    /// Switch edit mode; false if refused (primary button held)
    pub fn set_mode(&mut self, mode: EditMode) -> bool {
        self.interaction.set_mode(mode)
    }

    pub fn mode(&self) -> EditMode {
        self.interaction.mode()
    }

    /// Press the primary button at `pos`
    pub fn press(&mut self, pos: Vec2) -> TickReport {
        self.cursor = pos;
        self.primary_down = true;
        self.tick(0.0)
    }

    /// Move the cursor, keeping button state
    pub fn move_to(&mut self, pos: Vec2) -> TickReport {
        self.cursor = pos;
        self.tick(0.0)
    }

    /// Release the primary button where the cursor is
    pub fn release(&mut self) -> TickReport {
        self.primary_down = false;
        self.tick(0.0)
    }

    /// Press at `from`, move to `to` in `steps` equal moves, release.
    /// Returns the release report.
    pub fn drag(&mut self, from: Vec2, to: Vec2, steps: usize) -> TickReport {
        self.press(from);
        for i in 1..=steps.max(1) {
            let t = i as f32 / steps.max(1) as f32;
            self.move_to(from.lerp(to, t));
        }
        self.release()
    }

    /// Press and release at `pos` without moving
    pub fn click(&mut self, pos: Vec2) -> TickReport {
        let press = self.press(pos);
        let release = self.release();
        TickReport {
            committed: release.committed,
            ..press
        }
    }

    /// Secondary-button drag from `from` to `to`
    pub fn orbit(&mut self, from: Vec2, to: Vec2, steps: usize) {
        self.cursor = from;
        self.secondary_down = true;
        self.tick(0.0);
        for i in 1..=steps.max(1) {
            let t = i as f32 / steps.max(1) as f32;
            self.cursor = from.lerp(to, t);
            self.tick(0.0);
        }
        self.secondary_down = false;
        self.tick(0.0);
    }

    /// Scroll the wheel by `steps` (positive zooms in)
    pub fn zoom(&mut self, steps: f32) -> TickReport {
        self.tick(steps)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport.resize(width, height);
    }

    // ── Screen helpers ────────────────────────────────────────

    /// Screen position of a world point (bottom-left origin)
    pub fn screen_of(&self, world: Vec3) -> Option<Vec2> {
        self.camera.project(world, &self.viewport)
    }

    /// Screen position of a face's centroid as currently displayed
    pub fn face_screen_position(&self, face: usize) -> Option<Vec2> {
        self.screen_of(self.mesh.world_face_centroid(face))
    }

    /// Ray through a screen position
    pub fn ray_at(&self, screen: Vec2) -> Ray {
        self.camera.screen_ray(screen, &self.viewport)
    }

    /// Ray from the eye through a world point
    pub fn ray_at_world(&self, world: Vec3) -> Ray {
        Ray::through(self.camera.eye_position(), world)
    }

    /// Face under a screen position
    pub fn face_under(&self, screen: Vec2) -> Option<FaceHit> {
        self.mesh.intersect(&self.ray_at(screen))
    }

    // ── Direct edits ──────────────────────────────────────────

    pub fn subdivide_at(&mut self, screen: Vec2) -> Option<usize> {
        let ray = self.ray_at(screen);
        self.mesh.subdivide_face(&ray)
    }

    /// Extrude the face under `screen`; the lid stays pending until committed
    pub fn extrude_at(&mut self, screen: Vec2) -> Option<ExtrudeTarget> {
        let ray = self.ray_at(screen);
        self.mesh.gen_extrude_face(&ray)
    }

    /// Fresh cuboid, camera and interaction state untouched apart from drags
    pub fn reset_mesh(&mut self) {
        self.mesh.replace_with(initial_mesh(&self.settings));
        self.interaction.reset();
        self.primary_down = false;
        self.secondary_down = false;
    }

    // ── Build + inspection ────────────────────────────────────

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    pub fn face_count(&self) -> usize {
        self.mesh.face_count()
    }

    /// Render data for the current mesh (cached by mesh version)
    pub fn render(&mut self) -> &MeshData {
        let style = MeshStyle::from_settings(&self.settings.viewport);
        self.cache.refresh(&self.mesh, &style);
        self.cache.mesh()
    }

    pub fn rebuild_count(&self) -> u64 {
        self.cache.rebuild_count()
    }

    pub fn validator(&self) -> MeshValidator<'_> {
        MeshValidator::new(&self.mesh)
    }

    /// Mesh and render-buffer problems; empty when everything checks out
    pub fn validate(&mut self) -> Vec<String> {
        let mut errors = MeshValidator::new(&self.mesh).validate_all();
        errors.extend(RenderValidator::new(self.render()).validate_all());
        errors
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
