use crate::state::Viewport;

/// Pointer displacement from the viewport center, scaled to world units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerOffset {
    pub x: f32,
    pub y: f32,
}

/// Keeps the latest pointer offset. Smoothing is left to the frame updater,
/// so every move simply overwrites the previous value.
///
/// The center is the viewport half extent captured at mount; later resizes
/// do not move it.
#[derive(Clone, Debug)]
pub struct PointerTracker {
    half_width: f64,
    half_height: f64,
    scale: f32,
    offset: PointerOffset,
}

impl PointerTracker {
    pub fn new(viewport: &Viewport, scale: f32) -> Self {
        let (half_width, half_height) = viewport.half_extent();
        Self {
            half_width,
            half_height,
            scale,
            offset: PointerOffset::default(),
        }
    }

    /// No clamping: a pointer far outside the viewport yields a proportionally large offset.
    pub fn on_pointer_move(&mut self, client_x: f64, client_y: f64) {
        self.offset = PointerOffset {
            x: (client_x - self.half_width) as f32 * self.scale,
            y: (client_y - self.half_height) as f32 * self.scale,
        };
    }

    pub fn offset(&self) -> PointerOffset {
        self.offset
    }
}
