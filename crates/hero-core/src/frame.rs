//! Per-tick advance of the particle scene: idle spin, pointer parallax and
//! the traveling wave.

use crate::constants::{
    CAMERA_FOLLOW, ROTATION_STEP, WAVE_AMPLITUDE, WAVE_SPATIAL_FREQ, WAVE_TIME_SCALE,
};
use crate::field::ParticleField;
use crate::pointer::PointerOffset;
use crate::state::Camera;
use glam::{EulerRot, Mat4, Vec2, Vec3};
use std::f32::consts::TAU;

#[derive(Clone, Debug)]
pub struct MotionConfig {
    pub rotation_step: f32,
    pub camera_follow: f32,
    pub wave_time_scale: f64,
    pub wave_spatial_freq: f64,
    pub wave_amplitude: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            rotation_step: ROTATION_STEP,
            camera_follow: CAMERA_FOLLOW,
            wave_time_scale: WAVE_TIME_SCALE,
            wave_spatial_freq: WAVE_SPATIAL_FREQ,
            wave_amplitude: WAVE_AMPLITUDE,
        }
    }
}

impl MotionConfig {
    /// Vertical displacement applied to a particle at `x` for one tick at `wall_clock_ms`.
    ///
    /// Evaluated in f64: epoch-scale timestamps lose all phase precision in f32.
    #[inline]
    pub fn wave_offset(&self, wall_clock_ms: f64, x: f32) -> f32 {
        let phase = wall_clock_ms * self.wave_time_scale + x as f64 * self.wave_spatial_freq;
        (phase.sin() * self.wave_amplitude) as f32
    }
}

/// Everything a draw needs besides the GPU resources.
#[derive(Clone, Debug)]
pub struct Scene {
    pub field: ParticleField,
    pub camera: Camera,
    /// Field rotation about x and y, kept in \[0, 2π).
    pub rotation: Vec2,
}

impl Scene {
    pub fn new(field: ParticleField, camera: Camera) -> Self {
        Self {
            field,
            camera,
            rotation: Vec2::ZERO,
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, 0.0)
    }
}

/// Read-only view of one frame handed to the drawable surface.
pub struct FrameView<'a> {
    pub field: &'a ParticleField,
    /// Positions changed since the previous draw and must be re-uploaded.
    pub positions_dirty: bool,
    pub model: Mat4,
    pub view: Mat4,
    pub view_projection: Mat4,
}

impl<'a> FrameView<'a> {
    pub fn new(scene: &'a Scene, positions_dirty: bool) -> Self {
        Self {
            field: &scene.field,
            positions_dirty,
            model: scene.model_matrix(),
            view: scene.camera.view_matrix(),
            view_projection: scene.camera.view_projection(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct FrameUpdater {
    motion: MotionConfig,
}

impl FrameUpdater {
    pub fn new(motion: MotionConfig) -> Self {
        Self { motion }
    }

    pub fn motion(&self) -> &MotionConfig {
        &self.motion
    }

    pub fn advance(&self, scene: &mut Scene, pointer: PointerOffset, wall_clock_ms: f64) {
        self.spin(&mut scene.rotation);
        self.follow_pointer(&mut scene.camera, pointer);
        self.wave(&mut scene.field, wall_clock_ms);
    }

    fn spin(&self, rotation: &mut Vec2) {
        rotation.x = (rotation.x + self.motion.rotation_step).rem_euclid(TAU);
        rotation.y = (rotation.y + self.motion.rotation_step).rem_euclid(TAU);
    }

    // Screen y grows downward, world y grows upward.
    fn follow_pointer(&self, camera: &mut Camera, pointer: PointerOffset) {
        let k = self.motion.camera_follow;
        camera.eye.x += (pointer.x - camera.eye.x) * k;
        camera.eye.y += (-pointer.y - camera.eye.y) * k;
        camera.look_at(Vec3::ZERO);
    }

    // Cumulative: y is never reset to its generated value.
    fn wave(&self, field: &mut ParticleField, wall_clock_ms: f64) {
        for p in field.positions_mut() {
            p.y += self.motion.wave_offset(wall_clock_ms, p.x);
        }
        field.mark_dirty();
    }
}
