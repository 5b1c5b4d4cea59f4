use glam::Vec3;

// Tuning constants for the hero particle field, shared by the core and the web frontend.

// Field layout
pub const PARTICLE_COUNT: usize = 2000;
pub const FIELD_HALF_EXTENT: Vec3 = Vec3::new(50.0, 50.0, 25.0); // box is [-h, h] per axis

// Palette (sRGB hex)
pub const COOL_BLUE_HEX: u32 = 0xa2a4ff;
pub const DEEP_PURPLE_HEX: u32 = 0x4a00e0;

// Idle spin, radians per tick on both axes
pub const ROTATION_STEP: f32 = 0.0005;

// Pointer parallax
pub const POINTER_SCALE: f32 = 0.05; // pixels from viewport center -> world units
pub const CAMERA_FOLLOW: f32 = 0.05; // exponential smoothing factor per tick

// Traveling wave: y += sin(ms * WAVE_TIME_SCALE + x * WAVE_SPATIAL_FREQ) * WAVE_AMPLITUDE
pub const WAVE_TIME_SCALE: f64 = 0.0001;
pub const WAVE_SPATIAL_FREQ: f64 = 0.1;
pub const WAVE_AMPLITUDE: f64 = 0.02;

// Camera
pub const CAMERA_Z: f32 = 30.0;
pub const CAMERA_FOV_Y_DEG: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Surface
pub const MAX_PIXEL_RATIO: f64 = 2.0; // bounds fill-rate on high-density displays
pub const MSAA_SAMPLES: u32 = 4;

// Point material
pub const POINT_SIZE: f32 = 0.2;
pub const POINT_OPACITY: f32 = 0.8;
pub const FOG_DENSITY: f32 = 0.002;

// CSS class applied to the host container when no surface could be acquired
pub const FALLBACK_CLASS: &str = "bg-black";
