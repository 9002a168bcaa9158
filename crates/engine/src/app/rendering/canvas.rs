use crate::app::geometry::{Point, Rect};

use super::font::{glyph_for, GLYPH_HEIGHT, GLYPH_WIDTH};

pub type Rgba = [u8; 4];

/// Decoded RGBA8 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl Sprite {
    pub fn size(&self) -> (i32, i32) {
        (self.width as i32, self.height as i32)
    }

    fn is_well_formed(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self.rgba.len() >= self.width as usize * self.height as usize * 4
    }
}

/// Clipped drawing onto an RGBA8 frame.
///
/// Every primitive is translated by `offset` before clipping, which lets
/// player-relative content be drawn in world coordinates.
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
    offset: Point,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: u32, height: u32) -> Self {
        Self {
            frame,
            width,
            height,
            offset: Point::ORIGIN,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Runs `draw` with `offset` applied, restoring the previous offset afterwards.
    pub fn with_offset<R>(&mut self, offset: Point, draw: impl FnOnce(&mut Canvas<'a>) -> R) -> R {
        let previous = self.offset;
        self.offset = offset;
        let result = draw(self);
        self.offset = previous;
        result
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba> {
        let start = self.byte_offset(x, y)?;
        let mut color = [0; 4];
        color.copy_from_slice(&self.frame[start..start + 4]);
        Some(color)
    }

    pub fn clear(&mut self, color: Rgba) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&color);
        }
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let left = (rect.x + self.offset.x).max(0);
        let top = (rect.y + self.offset.y).max(0);
        let right = (rect.x + self.offset.x + rect.width).min(self.width as i32);
        let bottom = (rect.y + self.offset.y + rect.height).min(self.height as i32);
        if left >= right || top >= bottom {
            return;
        }
        for y in top..bottom {
            for x in left..right {
                self.write_screen_pixel(x, y, color);
            }
        }
    }

    pub fn stroke_rect(&mut self, rect: Rect, color: Rgba) {
        if rect.width <= 1 || rect.height <= 1 {
            return;
        }
        let Rect {
            x,
            y,
            width,
            height,
        } = rect;
        self.fill_rect(Rect::new(x, y, width, 1), color);
        self.fill_rect(Rect::new(x, y + height - 1, width, 1), color);
        self.fill_rect(Rect::new(x, y, 1, height), color);
        self.fill_rect(Rect::new(x + width - 1, y, 1, height), color);
    }

    /// Blits `sprite` with its top-left corner at `origin`; fully transparent texels are skipped.
    pub fn draw_sprite(&mut self, sprite: &Sprite, origin: Point) {
        let (width, height) = sprite.size();
        self.draw_sprite_scaled(sprite, Rect::new(origin.x, origin.y, width, height));
    }

    /// Nearest-neighbour blit of `sprite` stretched over `dest`.
    pub fn draw_sprite_scaled(&mut self, sprite: &Sprite, dest: Rect) {
        if !sprite.is_well_formed() || dest.width <= 0 || dest.height <= 0 {
            return;
        }
        let left = dest.x + self.offset.x;
        let top = dest.y + self.offset.y;
        let draw_left = left.max(0);
        let draw_top = top.max(0);
        let draw_right = (left + dest.width).min(self.width as i32);
        let draw_bottom = (top + dest.height).min(self.height as i32);
        if draw_left >= draw_right || draw_top >= draw_bottom {
            return;
        }

        let sprite_width = sprite.width as usize;
        for out_y in draw_top..draw_bottom {
            let src_y = ((out_y - top) as i64 * sprite.height as i64 / dest.height as i64) as usize;
            let src_y = src_y.min(sprite.height as usize - 1);
            for out_x in draw_left..draw_right {
                let src_x =
                    ((out_x - left) as i64 * sprite.width as i64 / dest.width as i64) as usize;
                let src_x = src_x.min(sprite_width - 1);
                let src = (src_y * sprite_width + src_x) * 4;
                let alpha = sprite.rgba[src + 3];
                if alpha == 0 {
                    continue;
                }
                let color = [sprite.rgba[src], sprite.rgba[src + 1], sprite.rgba[src + 2], alpha];
                self.write_screen_pixel(out_x, out_y, color);
            }
        }
    }

    /// Draws `text` with the built-in bitmap font; returns the pixel width drawn.
    pub fn draw_text(&mut self, origin: Point, text: &str, scale: i32, color: Rgba) -> i32 {
        let scale = scale.max(1);
        let advance = (GLYPH_WIDTH + 1) * scale;
        let mut x = origin.x;
        for ch in text.chars() {
            if let Some(rows) = glyph_for(ch) {
                for (row, bits) in rows.iter().enumerate() {
                    for col in 0..GLYPH_WIDTH {
                        if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                            continue;
                        }
                        self.fill_rect(
                            Rect::new(
                                x + col * scale,
                                origin.y + row as i32 * scale,
                                scale,
                                scale,
                            ),
                            color,
                        );
                    }
                }
            }
            x += advance;
        }
        x - origin.x
    }

    pub fn text_height(scale: i32) -> i32 {
        GLYPH_HEIGHT * scale.max(1)
    }

    fn write_screen_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(start) = self.byte_offset(x, y) {
            self.frame[start..start + 4].copy_from_slice(&color);
        }
    }

    fn byte_offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        let start = (y as usize)
            .checked_mul(self.width as usize)?
            .checked_add(x as usize)?
            .checked_mul(4)?;
        (start + 4 <= self.frame.len()).then_some(start)
    }
}
