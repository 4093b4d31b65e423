//! Decorative hero-banner drift that follows the pointer. Pure per-event math;
//! nothing here touches the quest session.

pub const MAX_SHIFT_X: f32 = 12.0;
pub const MAX_SHIFT_Y: f32 = 8.0;
const MAX_COLUMNS: i16 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

impl Offset {
    /// Horizontal drift in whole terminal cells.
    pub fn columns(self) -> i16 {
        (self.x.round() as i16).clamp(-MAX_COLUMNS, MAX_COLUMNS)
    }
}

pub fn parallax_offset(pointer_x: f32, pointer_y: f32, surface_w: f32, surface_h: f32) -> Offset {
    if surface_w <= 0.0 || surface_h <= 0.0 {
        return Offset::default();
    }
    Offset {
        x: (pointer_x / surface_w - 0.5) * MAX_SHIFT_X,
        y: (pointer_y / surface_h - 0.5) * MAX_SHIFT_Y,
    }
}
