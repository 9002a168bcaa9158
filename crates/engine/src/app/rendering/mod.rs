mod canvas;
mod font;
mod renderer;

pub use canvas::{Canvas, Rgba, Sprite};
pub use renderer::Renderer;

use super::geometry::Rect;

pub const CLEAR_COLOR: Rgba = [0, 0, 0, 255];
pub const STATE_LABEL_COLOR: Rgba = [255, 0, 255, 255];
pub const PLACEHOLDER_COLOR: Rgba = [48, 52, 64, 255];
pub const PLACEHOLDER_BORDER_COLOR: Rgba = [120, 130, 150, 255];

/// Draws `sprite` at `slot`'s origin, or a bordered placeholder filling `slot`
/// when the art failed to load.
pub fn draw_art(canvas: &mut Canvas<'_>, sprite: Option<&Sprite>, slot: Rect) {
    match sprite {
        Some(sprite) => canvas.draw_sprite(sprite, slot.origin()),
        None => {
            canvas.fill_rect(slot, PLACEHOLDER_COLOR);
            canvas.stroke_rect(slot, PLACEHOLDER_BORDER_COLOR);
        }
    }
}
