use glam::{Vec2, Vec4};

use crate::engine::Renderer;

/// Bitmap font drawn from a fixed-grid glyph atlas
#[derive(Clone)]
pub struct TextRenderer {
    texture_name: String,
    glyph_size: Vec2, // glyph size in pixels in the source atlas (e.g. 8x8 or 16x16)
    atlas_cols: u32,  // e.g. 16
    atlas_rows: u32,  // e.g. 6
    scale: f32,
    spacing: f32, // extra advance between glyphs (in source glyph pixels)
    first_codepoint: u32,
}

impl TextRenderer {
    pub fn new(texture_name: &str, glyph_w: f32, glyph_h: f32, atlas_cols: u32, atlas_rows: u32) -> Self {
        Self {
            texture_name: texture_name.to_string(),
            glyph_size: Vec2::new(glyph_w, glyph_h),
            atlas_cols,
            atlas_rows,
            scale: 1.0,
            spacing: 0.0,
            first_codepoint: 32,
        }
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn line_height(&self) -> f32 {
        self.glyph_size.y * self.scale
    }

    /// Draw with the top-left corner of the first glyph at `pos`, in screen pixels
    pub fn draw_text(&self, renderer: &mut Renderer, mut pos: Vec2, text: &str, color: Vec4) {
        let uv_w = 1.0 / self.atlas_cols as f32;
        let uv_h = 1.0 / self.atlas_rows as f32;

        let adv_x = (self.glyph_size.x + self.spacing) * self.scale;
        let adv_y = (self.glyph_size.y + self.spacing) * self.scale;
        let glyph_px = self.glyph_size * self.scale;

        let line_start_x = pos.x;

        for ch in text.chars() {
            if ch == '\n' {
                pos.x = line_start_x;
                pos.y += adv_y;
                continue;
            }

            // Map from Unicode codepoint to atlas index starting at first_codepoint (' ' = 32)
            let idx = (ch as u32).saturating_sub(self.first_codepoint);
            if idx >= self.atlas_cols * self.atlas_rows {
                pos.x += adv_x;
                continue;
            }

            let col = (idx % self.atlas_cols) as f32;
            let row = (idx / self.atlas_cols) as f32;
            let uv = Vec4::new(col * uv_w, row * uv_h, uv_w, uv_h);

            renderer.draw_texture_region(&self.texture_name, pos, glyph_px, uv, color);
            pos.x += adv_x;
        }
    }
}
