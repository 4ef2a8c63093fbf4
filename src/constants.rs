//! Playfield geometry and tuning values.
//!
//! All positions are in canvas units on a fixed 1200 x 800 field; the
//! renderer scales them onto the terminal.

pub const CANVAS_WIDTH: f32 = 1200.0;
pub const CANVAS_HEIGHT: f32 = 800.0;
pub const CANVAS_PADDING: f32 = 50.0;

pub const LEFT_BOUNDARY: f32 = CANVAS_PADDING;
pub const RIGHT_BOUNDARY: f32 = CANVAS_WIDTH - CANVAS_PADDING;
pub const TOP_BOUNDARY: f32 = CANVAS_PADDING;
pub const BOTTOM_BOUNDARY: f32 = CANVAS_HEIGHT - CANVAS_PADDING;

pub const SPRITE_SIZE: f32 = 64.0;
pub const SPRITE_RADIUS: f32 = SPRITE_SIZE / 2.0;
pub const SPRITE_COLLISION_RADIUS: f32 = 24.0;

pub const ENEMY_PADDING: f32 = 2.0;
pub const ENEMY_GAP: f32 = 2.0 * ENEMY_PADDING;
/// Distance between neighbouring enemy centers, both across and down
pub const ENEMY_PITCH: f32 = SPRITE_SIZE + ENEMY_GAP;

/// Enemies per row
pub const ENEMY_ROW_SIZE: usize = 8;
/// Rows in the opening wave
pub const ENEMY_COLUMN_SIZE: usize = 5;

pub const ROW_SPAN: f32 = ENEMY_ROW_SIZE as f32 * ENEMY_PITCH - ENEMY_GAP;

/// How far the formation travels on one horizontal sweep
pub const SWEEP_SPAN: f32 = CANVAS_WIDTH - 2.0 * CANVAS_PADDING - ROW_SPAN;
/// How far the formation drops between sweeps (two drops make one row)
pub const DESCENT_STEP: f32 = ENEMY_PITCH / 2.0;

/// Frames between enemy volleys
pub const ENEMY_SHOT_COOLDOWN: u32 = 30;

pub const MAX_PLAYER_LIVES: u8 = 4;

// Speeds in canvas units per millisecond
pub const SHIP_SPEED: f32 = 0.2;
pub const ENEMY_SPEED: f32 = 0.1;
pub const SHOT_SPEED: f32 = 0.8;

/// Longest simulated step; anything slower is treated as a stall
pub const MAX_FRAME_MS: f32 = 50.0;

/// Bounds a sprite center so the sprite stays on the field.
/// Note the top bound sits a radius above the boundary, not below it.
pub fn clamp_to_field(x: f32, y: f32) -> (f32, f32) {
    (
        x.clamp(LEFT_BOUNDARY + SPRITE_RADIUS, RIGHT_BOUNDARY - SPRITE_RADIUS),
        y.clamp(TOP_BOUNDARY - SPRITE_RADIUS, BOTTOM_BOUNDARY - SPRITE_RADIUS),
    )
}
