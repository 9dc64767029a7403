//! Application settings

use serde::{Deserialize, Serialize};

/// Point a whole-object rotation turns about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RotationPivot {
    /// World origin (the object's local origin once transforms are baked)
    #[default]
    Origin,
    /// Center of the object's world bounding box at drag start
    BoundsCenter,
}

impl RotationPivot {
    pub fn display_name(&self) -> &'static str {
        match self {
            RotationPivot::Origin => "Origin",
            RotationPivot::BoundsCenter => "Bounds center",
        }
    }

    pub fn all() -> &'static [RotationPivot] {
        &[RotationPivot::Origin, RotationPivot::BoundsCenter]
    }
}

/// Mouse interaction tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionSettings {
    /// Object rotation angle per pixel of drag (radians)
    pub rotation_speed: f32,
    /// Camera orbit angle per pixel of drag (radians)
    pub orbit_speed: f32,
    /// Pointer movement (pixels, either axis) below which a drag is ignored
    pub dead_zone: f32,
    /// Zoom factor per scroll step
    pub zoom_step: f32,
    /// Rotation pivot
    pub rotation_pivot: RotationPivot,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            rotation_speed: 0.01,
            orbit_speed: 0.007,
            dead_zone: 2.0,
            zoom_step: 1.1,
            rotation_pivot: RotationPivot::Origin,
        }
    }
}

/// Initial camera pose and projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraSettings {
    /// Distance from the world origin
    pub distance: f32,
    /// Angle above the XY plane (radians)
    pub elevation: f32,
    /// Angle around Z from the X axis (radians)
    pub azimuth: f32,
    /// Vertical field of view (degrees)
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Zoom limits
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            distance: 5.0,
            elevation: 0.3,
            azimuth: 0.1,
            fov: 90.0,
            near: 0.5,
            far: 100.0,
            min_distance: 1.5,
            max_distance: 50.0,
        }
    }
}

/// Initial mesh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshSettings {
    /// Half extents of the starting cuboid
    pub half_extents: [f32; 3],
}

impl Default for MeshSettings {
    fn default() -> Self {
        Self {
            half_extents: [1.0, 1.0, 1.0],
        }
    }
}

/// Grid display settings (grid lies in the XY plane)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSettings {
    /// Show grid
    pub visible: bool,
    /// Grid cell size
    pub size: f32,
    /// Number of grid lines in each direction from origin
    pub range: i32,
    /// Grid line opacity (0.0 - 1.0)
    pub opacity: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            visible: true,
            size: 0.5,
            range: 20,
            opacity: 0.6,
        }
    }
}

/// Axis display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxisSettings {
    /// Show axes
    pub visible: bool,
    /// Axis line length
    pub length: f32,
    /// Axis line thickness
    pub thickness: f32,
    /// Show axis labels (X, Y, Z)
    pub show_labels: bool,
}

impl Default for AxisSettings {
    fn default() -> Self {
        Self {
            visible: true,
            length: 10.0,
            thickness: 3.0,
            show_labels: true,
        }
    }
}

/// Viewport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportSettings {
    /// Background color RGB
    pub background_color: [u8; 3],
    /// Mesh base color RGB
    pub mesh_color: [u8; 3],
    /// Color of the face being extruded
    pub active_face_color: [u8; 3],
    /// Draw quad outlines on top of the shaded mesh
    pub show_edges: bool,
    /// Draw the local bounding box while a transform is pending
    pub show_bounds: bool,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            background_color: [0, 0, 0],
            mesh_color: [200, 200, 210],
            active_face_color: [0, 220, 255],
            show_edges: true,
            show_bounds: true,
        }
    }
}

/// All application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub interaction: InteractionSettings,
    #[serde(default)]
    pub camera: CameraSettings,
    #[serde(default)]
    pub mesh: MeshSettings,
    #[serde(default)]
    pub grid: GridSettings,
    #[serde(default)]
    pub axes: AxisSettings,
    #[serde(default)]
    pub viewport: ViewportSettings,
}

impl AppSettings {
    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        if let Some(dirs) = directories::ProjectDirs::from("com", "quadedit", "quadedit") {
            let config_path = dirs.config_dir().join("settings.json");
            if let Ok(json) = std::fs::read_to_string(&config_path) {
                match serde_json::from_str(&json) {
                    Ok(settings) => return settings,
                    Err(e) => tracing::warn!(
                        "Ignoring malformed settings at {}: {e}",
                        config_path.display()
                    ),
                }
            }
        }
        Self::default()
    }

    /// Save settings to file
    pub fn save(&self) {
        let Some(dirs) = directories::ProjectDirs::from("com", "quadedit", "quadedit") else {
            return;
        };
        let config_dir = dirs.config_dir();
        if let Err(e) = std::fs::create_dir_all(config_dir) {
            tracing::warn!("Failed to create config dir {}: {e}", config_dir.display());
            return;
        }
        let config_path = config_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&config_path, json) {
                    tracing::warn!("Failed to write {}: {e}", config_path.display());
                }
            }
            Err(e) => tracing::warn!("Failed to serialize settings: {e}"),
        }
    }
}
