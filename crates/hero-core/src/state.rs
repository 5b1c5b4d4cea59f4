//! Camera and viewport state owned by a render surface.
//!
//! These types avoid referencing platform-specific APIs; the web frontend
//! fills a [`Viewport`] from the window and reads camera matrices when it
//! draws.

use crate::constants::{CAMERA_FOV_Y_DEG, CAMERA_Z, CAMERA_ZFAR, CAMERA_ZNEAR, MAX_PIXEL_RATIO};
use glam::{Mat4, Vec3};

#[derive(Clone, Debug)]
pub struct CameraConfig {
    pub eye: Vec3,
    pub fovy_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            fovy_degrees: CAMERA_FOV_Y_DEG,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

/// Simple right-handed camera description with perspective projection.
///
/// The projection matrix is cached and only recomputed by
/// [`Camera::update_projection`], so aspect changes take effect when the
/// viewport binding refreshes it.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
    projection: Mat4,
}

impl Camera {
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        let mut camera = Self {
            eye: config.eye,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: config.fovy_degrees.to_radians(),
            znear: config.znear,
            zfar: config.zfar,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection();
        camera
    }

    pub fn update_projection(&mut self) {
        self.projection =
            Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar);
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Clip-space projection matrix as of the last [`Camera::update_projection`].
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// View matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }
}

/// Drawable buffer size in device pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BufferSize {
    pub width: u32,
    pub height: u32,
}

/// Host viewport in CSS pixels plus the display's device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub device_pixel_ratio: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            device_pixel_ratio: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }

    pub fn aspect(&self) -> f32 {
        (self.width / self.height.max(1.0)) as f32
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio.min(MAX_PIXEL_RATIO)
    }

    pub fn buffer_size(&self) -> BufferSize {
        let ratio = self.pixel_ratio();
        BufferSize {
            width: ((self.width * ratio) as u32).max(1),
            height: ((self.height * ratio) as u32).max(1),
        }
    }

    pub fn half_extent(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}
