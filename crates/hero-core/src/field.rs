//! Procedural particle field: positions uniform in a box, two-color palette.

use crate::constants::{COOL_BLUE_HEX, DEEP_PURPLE_HEX, FIELD_HALF_EXTENT, PARTICLE_COUNT};
use glam::Vec3;
use rand::Rng;

/// Color with channels in \[0, 1\], stored in sRGB space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self {
            r: channel(16),
            g: channel(8),
            b: channel(0),
        }
    }

    /// Linear-light channels for an sRGB render target.
    pub fn to_linear(self) -> [f32; 3] {
        [
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
        ]
    }
}

#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn centered(half_extent: Vec3) -> Self {
        Self {
            min: -half_extent,
            max: half_extent,
        }
    }

    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    fn sample(&self, rng: &mut impl Rng) -> Vec3 {
        let t = Vec3::new(rng.gen(), rng.gen(), rng.gen());
        self.min + (self.max - self.min) * t
    }
}

/// Two colors picked with equal probability.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub colors: [Rgb; 2],
}

impl Palette {
    pub fn pick(&self, rng: &mut impl Rng) -> Rgb {
        if rng.gen_bool(0.5) {
            self.colors[0]
        } else {
            self.colors[1]
        }
    }

    pub fn contains(&self, color: Rgb) -> bool {
        self.colors.contains(&color)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: [Rgb::from_hex(COOL_BLUE_HEX), Rgb::from_hex(DEEP_PURPLE_HEX)],
        }
    }
}

#[derive(Clone, Debug)]
pub struct FieldConfig {
    pub count: usize,
    pub bounds: Aabb,
    pub palette: Palette,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: PARTICLE_COUNT,
            bounds: Aabb::centered(FIELD_HALF_EXTENT),
            palette: Palette::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub color: Rgb,
}

/// Fixed-size particle dataset. Count and colors never change after
/// generation; positions are mutated in place by the frame updater.
#[derive(Clone, Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    dirty: bool,
}

impl ParticleField {
    pub fn generate(config: &FieldConfig, rng: &mut impl Rng) -> Self {
        let particles = (0..config.count)
            .map(|_| Particle {
                position: config.bounds.sample(rng),
                color: config.palette.pick(rng),
            })
            .collect();
        Self {
            particles,
            dirty: true,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Positions are the only mutable attribute; colors stay fixed.
    pub fn positions_mut(&mut self) -> impl Iterator<Item = &mut Vec3> {
        self.particles.iter_mut().map(|p| &mut p.position)
    }

    /// Pack positions into `out` for upload, reusing its allocation.
    pub fn positions_into(&self, out: &mut Vec<[f32; 3]>) {
        out.clear();
        out.extend(self.particles.iter().map(|p| p.position.to_array()));
    }

    pub fn linear_colors(&self) -> Vec<[f32; 3]> {
        self.particles.iter().map(|p| p.color.to_linear()).collect()
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns whether positions changed since the last call and clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }
}
