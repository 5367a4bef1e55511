use crate::error::BadgeError;
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use log::debug;
use rusttype::{Font, Scale, point};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Ink bounding box of a string, relative to the point it is drawn at.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextBox {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// Text measurement and drawing at integer pixel sizes.
pub trait GlyphFace {
    fn measure(&self, text: &str, size: u32) -> TextBox;

    /// Draws `text` with its ascender line at `y` and its pen origin at `x`.
    fn draw(&self, canvas: &mut RgbaImage, color: Rgba<u8>, x: i32, y: i32, size: u32, text: &str);
}

pub struct TtfFace {
    font: Font<'static>,
}

impl TtfFace {
    pub fn from_bytes(data: Vec<u8>) -> Option<TtfFace> {
        Font::try_from_vec(data).map(|font| TtfFace { font })
    }
}

impl GlyphFace for TtfFace {
    fn measure(&self, text: &str, size: u32) -> TextBox {
        let scale = Scale::uniform(size as f32);
        let v_metrics = self.font.v_metrics(scale);

        // Same origin draw_text_mut uses, so the box lines up with what gets drawn.
        let mut bounds: Option<(i32, i32, i32, i32)> = None;
        for glyph in self.font.layout(text, scale, point(0.0, v_metrics.ascent)) {
            if let Some(bb) = glyph.pixel_bounding_box() {
                bounds = Some(match bounds {
                    None => (bb.min.x, bb.min.y, bb.max.x, bb.max.y),
                    Some((min_x, min_y, max_x, max_y)) => (
                        min_x.min(bb.min.x),
                        min_y.min(bb.min.y),
                        max_x.max(bb.max.x),
                        max_y.max(bb.max.y),
                    ),
                });
            }
        }

        match bounds {
            Some((min_x, min_y, max_x, max_y)) => TextBox {
                left: min_x as f32,
                top: min_y as f32,
                width: (max_x - min_x) as f32,
                height: (max_y - min_y) as f32,
            },
            None => TextBox::default(),
        }
    }

    fn draw(&self, canvas: &mut RgbaImage, color: Rgba<u8>, x: i32, y: i32, size: u32, text: &str) {
        draw_text_mut(canvas, color, x, y, Scale::uniform(size as f32), &self.font, text);
    }
}

/// Faces keyed by font file path, each loaded at most once per run.
#[derive(Default)]
pub struct FontCache {
    faces: HashMap<PathBuf, Rc<dyn GlyphFace>>,
}

impl FontCache {
    pub fn new() -> FontCache {
        FontCache::default()
    }

    pub fn load(&mut self, path: &Path) -> Result<Rc<dyn GlyphFace>, BadgeError> {
        if let Some(face) = self.faces.get(path) {
            return Ok(Rc::clone(face));
        }

        let data = fs::read(path).map_err(|e| BadgeError::FontLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let face = TtfFace::from_bytes(data).ok_or_else(|| BadgeError::FontLoad {
            path: path.to_path_buf(),
            reason: "not a TrueType/OpenType font".to_string(),
        })?;
        debug!("Loaded font {:?}", path);

        let face: Rc<dyn GlyphFace> = Rc::new(face);
        self.faces.insert(path.to_path_buf(), Rc::clone(&face));
        Ok(face)
    }

    #[cfg(test)]
    pub fn insert(&mut self, path: impl Into<PathBuf>, face: Rc<dyn GlyphFace>) {
        self.faces.insert(path.into(), face);
    }
}

#[cfg(test)]
pub mod testing {
    use super::{GlyphFace, TextBox};
    use image::{Rgba, RgbaImage};
    use imageproc::drawing::draw_filled_rect_mut;
    use imageproc::rect::Rect;

    /// Monospace stand-in for a real font: every char advances half the size,
    /// ink is `size` tall and starts a quarter size below the ascender line.
    pub struct BlockFace;

    impl BlockFace {
        fn advance(size: u32) -> f32 {
            size as f32 / 2.0
        }

        fn top(size: u32) -> f32 {
            (size / 4) as f32
        }
    }

    impl GlyphFace for BlockFace {
        fn measure(&self, text: &str, size: u32) -> TextBox {
            if text.is_empty() {
                return TextBox::default();
            }
            TextBox {
                left: 0.0,
                top: BlockFace::top(size),
                width: text.chars().count() as f32 * BlockFace::advance(size),
                height: size as f32,
            }
        }

        fn draw(&self, canvas: &mut RgbaImage, color: Rgba<u8>, x: i32, y: i32, size: u32, text: &str) {
            let advance = BlockFace::advance(size);
            let cell = (advance.floor() as u32).max(1);
            for (i, c) in text.chars().enumerate() {
                if c == ' ' {
                    continue;
                }
                let left = x + (i as f32 * advance).floor() as i32;
                let top = y + BlockFace::top(size) as i32;
                draw_filled_rect_mut(canvas, Rect::at(left, top).of_size(cell, size.max(1)), color);
            }
        }
    }
}
