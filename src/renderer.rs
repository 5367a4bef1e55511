use crate::error::BadgeError;
use crate::face::{FontCache, GlyphFace};
use crate::fitter::Layout;
use crate::sheet::Rect;
use image::{Rgba, RgbaImage};
use std::path::Path;
use std::rc::Rc;

pub struct Renderer {
    fonts: FontCache,
    color: Rgba<u8>,
}

impl Renderer {
    pub fn new(fonts: FontCache, color: Rgba<u8>) -> Renderer {
        Renderer { fonts, color }
    }

    pub fn face(&mut self, font: &Path) -> Result<Rc<dyn GlyphFace>, BadgeError> {
        self.fonts.load(font)
    }

    /// Draws `text` so its ink box is centered in `rect`.
    pub fn render_text(
        &mut self,
        canvas: &mut RgbaImage,
        rect: Rect,
        font: &Path,
        font_size: u32,
        text: &str,
    ) -> Result<(), BadgeError> {
        let face = self.fonts.load(font)?;
        let ink = face.measure(text, font_size);
        let x = rect.x0 + (rect.width() - ink.width) / 2.0;
        let y = rect.y0 + (rect.height() - ink.height) / 2.0;
        face.draw(
            canvas,
            self.color,
            (x - ink.left).floor() as i32,
            (y - ink.top).floor() as i32,
            font_size,
            text,
        );
        Ok(())
    }

    /// Draws each line of `layout` centered on its own, stepping down by
    /// `font_size + spacing` from the top of the vertically centered block.
    pub fn render_lines(
        &mut self,
        canvas: &mut RgbaImage,
        rect: Rect,
        font: &Path,
        layout: &Layout,
        spacing: u32,
    ) -> Result<(), BadgeError> {
        let face = self.fonts.load(font)?;
        let origins = layout.line_origins(face.as_ref(), rect, spacing);
        for (line, (x, y)) in layout.lines.iter().zip(origins) {
            let ink = face.measure(line, layout.font_size);
            // y is the line box top, so a lone line's ink sits a few px below the rect center
            face.draw(
                canvas,
                self.color,
                (x - ink.left).floor() as i32,
                y.floor() as i32,
                layout.font_size,
                line,
            );
        }
        Ok(())
    }
}

/// Affiliation box under the rendered name block. Never starts above the
/// name rectangle's bottom edge plus `spacing`.
pub fn place_affiliation(
    name_rect: Rect,
    affiliation_rect: Rect,
    name_block_height: f32,
    spacing: u32,
    affiliation_height: u32,
) -> Rect {
    let spacing = spacing as f32;
    let mut y0 = name_rect.y0 + name_block_height + spacing;
    if y0 < name_rect.y1 {
        y0 = name_rect.y1 + spacing;
    }
    Rect {
        x0: affiliation_rect.x0,
        y0,
        x1: affiliation_rect.x1,
        y1: y0 + affiliation_height.max(1) as f32,
    }
}
