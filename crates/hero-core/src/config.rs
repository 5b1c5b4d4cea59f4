use crate::constants::{FOG_DENSITY, MSAA_SAMPLES, POINTER_SCALE, POINT_OPACITY, POINT_SIZE};
use crate::field::FieldConfig;
use crate::frame::MotionConfig;
use crate::state::CameraConfig;

/// Point sprite appearance, consumed by the drawable surface.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialConfig {
    /// World-space size, attenuated by view depth.
    pub point_size: f32,
    pub opacity: f32,
    /// Exponential-squared fog toward black.
    pub fog_density: f32,
    /// Sample count used when anti-aliasing is requested.
    pub msaa_samples: u32,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            point_size: POINT_SIZE,
            opacity: POINT_OPACITY,
            fog_density: FOG_DENSITY,
            msaa_samples: MSAA_SAMPLES,
        }
    }
}

/// Complete renderer configuration. Captured when a render surface is
/// created; nothing in it can change after mount.
#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub field: FieldConfig,
    pub camera: CameraConfig,
    pub motion: MotionConfig,
    pub material: MaterialConfig,
    pub pointer_scale: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            camera: CameraConfig::default(),
            motion: MotionConfig::default(),
            material: MaterialConfig::default(),
            pointer_scale: POINTER_SCALE,
        }
    }
}
