use crate::error::BadgeError;
use crate::face::GlyphFace;
use crate::sheet::Rect;

/// Text broken into lines at a single font size.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub lines: Vec<String>,
    pub font_size: u32,
    /// Nothing fit; the layout is forced at the minimum size and will spill.
    pub overflow: bool,
}

impl Layout {
    pub fn single(text: &str, font_size: u32) -> Layout {
        Layout {
            lines: vec![text.to_string()],
            font_size,
            overflow: false,
        }
    }

    pub fn block_height(&self, spacing: u32) -> f32 {
        let n = self.lines.len() as f32;
        n * self.font_size as f32 + (n - 1.0).max(0.0) * spacing as f32
    }

    /// Ink left edge and line top for every line, centering the block in `rect`.
    pub fn line_origins(&self, face: &dyn GlyphFace, rect: Rect, spacing: u32) -> Vec<(f32, f32)> {
        let top = rect.y0 + (rect.height() - self.block_height(spacing)) / 2.0;
        let step = (self.font_size + spacing) as f32;
        self.lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let width = face.measure(line, self.font_size).width;
                (rect.x0 + (rect.width() - width) / 2.0, top + i as f32 * step)
            })
            .collect()
    }

    fn fits(&self, face: &dyn GlyphFace, rect: Rect, spacing: u32) -> bool {
        self.block_height(spacing) <= rect.height()
            && self
                .lines
                .iter()
                .all(|line| face.measure(line, self.font_size).width <= rect.width())
    }
}

/// Largest size in `1..=max_size` at which `text` fits `rect` on one line.
pub fn fit_line(face: &dyn GlyphFace, text: &str, rect: Rect, max_size: u32) -> Result<u32, BadgeError> {
    (1..=max_size)
        .rev()
        .find(|&size| {
            let b = face.measure(text, size);
            b.width <= rect.width() && b.height <= rect.height()
        })
        .ok_or_else(|| BadgeError::NoFit(text.to_string()))
}

/// Greedy packing: a word joins the current line while the line stays within
/// `max_width`, otherwise it starts the next one. Words are never split.
pub fn wrap_words(face: &dyn GlyphFace, words: &[&str], size: u32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut words = words.iter();
    let Some(first) = words.next() else {
        return lines;
    };

    let mut current = first.to_string();
    for word in words {
        let candidate = format!("{} {}", current, word);
        if face.measure(&candidate, size).width <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    lines.push(current);
    lines
}

/// Picks the size and line breaks for `text` inside `rect`.
///
/// A single line at `min_size` or above always wins. Otherwise the words are
/// wrapped at the largest size that fits; below `min_size` the larger of the
/// wrapped and single-line fits is used, a single line winning ties. When
/// nothing fits at all the wrapped packing at `min_size` is returned with
/// `overflow` set.
pub fn fit(
    face: &dyn GlyphFace,
    text: &str,
    rect: Rect,
    max_size: u32,
    min_size: u32,
    spacing: u32,
) -> Layout {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Layout::single("", max_size.max(1));
    }
    let line = words.join(" ");
    let max_size = max_size.max(1);
    let min_size = min_size.clamp(1, max_size);

    let single = fit_line(face, &line, rect, max_size).ok();
    if let Some(size) = single {
        if size >= min_size {
            return Layout::single(&line, size);
        }
    }

    let wrapped = (1..=max_size)
        .rev()
        .map(|size| Layout {
            lines: wrap_words(face, &words, size, rect.width()),
            font_size: size,
            overflow: false,
        })
        .find(|layout| layout.fits(face, rect, spacing));

    match (wrapped, single) {
        (Some(layout), _) if layout.font_size >= min_size => layout,
        (Some(layout), Some(size)) if layout.font_size > size => layout,
        (_, Some(size)) => Layout::single(&line, size),
        (Some(layout), None) => layout,
        (None, None) => Layout {
            lines: wrap_words(face, &words, min_size, rect.width()),
            font_size: min_size,
            overflow: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::testing::BlockFace;

    const SPACING: u32 = 15;

    fn name_rect() -> Rect {
        Rect::new(67.0, 269.0, 580.0, 471.0).unwrap()
    }

    fn fits_rect(layout: &Layout, rect: Rect) -> bool {
        layout.block_height(SPACING) <= rect.height()
            && layout
                .lines
                .iter()
                .all(|l| BlockFace.measure(l, layout.font_size).width <= rect.width())
    }

    #[test]
    fn short_name_stays_on_one_line() {
        let layout = fit(&BlockFace, "Alice Johnson", name_rect(), 68, 50, SPACING);
        assert_eq!(layout.lines, vec!["Alice Johnson".to_string()]);
        assert!(layout.font_size <= 68);
        assert!(layout.font_size >= 50);
        assert!(!layout.overflow);
    }

    #[test]
    fn single_line_is_centered() {
        let rect = name_rect();
        let layout = fit(&BlockFace, "Alice Johnson", rect, 68, 50, SPACING);
        let origins = layout.line_origins(&BlockFace, rect, SPACING);
        let (x, y) = origins[0];
        let width = BlockFace.measure("Alice Johnson", layout.font_size).width;

        assert!(((x - rect.x0) - (rect.x1 - (x + width))).abs() < 0.01);
        let height = layout.font_size as f32;
        assert!(((y - rect.y0) - (rect.y1 - (y + height))).abs() < 0.01);
    }

    #[test]
    fn long_name_wraps_onto_several_lines() {
        let rect = name_rect();
        let name = "Aleksandra Konstantinopoulos-Fitzgerald";
        assert!(BlockFace.measure(name, 50).width > rect.width());

        let layout = fit(&BlockFace, name, rect, 68, 50, SPACING);
        assert!(layout.lines.len() >= 2);
        assert!(!layout.overflow);
        for line in &layout.lines {
            assert!(BlockFace.measure(line, layout.font_size).width <= rect.width());
        }
    }

    #[test]
    fn wrapping_prefers_min_size_range_over_single_line() {
        // one line needs size < 50, two lines fit at 68
        let rect = Rect::new(0.0, 0.0, 400.0, 300.0).unwrap();
        let layout = fit(&BlockFace, "Maximiliana Wolfeschlegel", rect, 68, 50, SPACING);
        assert_eq!(layout.lines, vec!["Maximiliana", "Wolfeschlegel"]);
        assert!(layout.font_size >= 50);
    }

    #[test]
    fn single_line_wins_tie_below_min_size() {
        // a single word cannot wrap, so the single-line size is used
        let rect = Rect::new(0.0, 0.0, 300.0, 200.0).unwrap();
        let layout = fit(&BlockFace, "Konstantinopoulos", rect, 68, 50, SPACING);
        assert_eq!(layout.lines.len(), 1);
        assert_eq!(layout.font_size, 35);
        assert!(!layout.overflow);
    }

    #[test]
    fn nothing_fits_overflows_at_min_size() {
        let rect = Rect::new(0.0, 0.0, 4.0, 0.5).unwrap();
        let layout = fit(&BlockFace, "Alice Johnson", rect, 68, 50, SPACING);
        assert!(layout.overflow);
        assert_eq!(layout.font_size, 50);
        assert_eq!(layout.lines, vec!["Alice", "Johnson"]);
    }

    #[test]
    fn fit_line_reports_no_fit() {
        let rect = Rect::new(0.0, 0.0, 1.0, 1.0).unwrap();
        let err = fit_line(&BlockFace, "Alice", rect, 68).unwrap_err();
        assert!(matches!(err, BadgeError::NoFit(ref t) if t == "Alice"));
    }

    #[test]
    fn fitted_layouts_stay_inside_their_rect() {
        let names = [
            "Alice Johnson",
            "Bo",
            "Aleksandra Konstantinopoulos-Fitzgerald",
            "Jean Pierre de la Fontaine du Bois",
            "X",
        ];
        for w in [120.0, 250.0, 513.0, 900.0] {
            for h in [60.0, 120.0, 202.0] {
                let rect = Rect::new(10.0, 10.0, 10.0 + w, 10.0 + h).unwrap();
                for name in names {
                    let layout = fit(&BlockFace, name, rect, 68, 50, SPACING);
                    assert!(layout.overflow || fits_rect(&layout, rect), "{name} in {w}x{h}");
                }
            }
        }
    }

    #[test]
    fn shrinking_the_rect_never_grows_the_font_within_a_path() {
        for name in ["Konstantinopoulos", "Aleksandra Konstantinopoulos-Fitzgerald"] {
            let mut last = u32::MAX;
            for w in (100..=520).rev().step_by(20) {
                let rect = Rect::new(0.0, 0.0, w as f32, 202.0).unwrap();
                let size = fit(&BlockFace, name, rect, 68, 50, SPACING).font_size;
                assert!(size <= last, "{name} grew at width {w}");
                last = size;
            }
        }
    }

    #[test]
    fn wrapping_keeps_words_whole_and_in_order() {
        let text = "Jean Pierre de la Fontaine du Bois";
        let words: Vec<&str> = text.split_whitespace().collect();
        for size in [10, 30, 50, 68] {
            let lines = wrap_words(&BlockFace, &words, size, 200.0);
            let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.split(' ')).collect();
            assert_eq!(rejoined, words);
        }
    }

    #[test]
    fn blank_text_is_one_empty_line() {
        let layout = fit(&BlockFace, "   ", name_rect(), 68, 50, SPACING);
        assert_eq!(layout.lines, vec![String::new()]);
        assert!(!layout.overflow);
    }

    #[test]
    fn block_height_includes_spacing() {
        let layout = Layout {
            lines: vec!["a".into(), "b".into(), "c".into()],
            font_size: 50,
            overflow: false,
        };
        assert_eq!(layout.block_height(15), 180.0);
        assert_eq!(Layout::single("a", 50).block_height(15), 50.0);
    }
}
