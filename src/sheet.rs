// A4 sheet with six cards, coordinates in grid cells (x0, y0, x1, y1).
const NAME_CELLS: [[f32; 4]; 6] = [
    [1.0, 4.0, 8.6, 7.0],
    [1.0, 14.5, 8.6, 17.5],
    [11.0, 4.0, 18.6, 7.0],
    [11.0, 14.5, 18.6, 17.5],
    [21.1, 4.0, 28.6, 7.0],
    [21.1, 14.5, 28.6, 17.5],
];
const AFFILIATION_CELLS: [[f32; 4]; 6] = [
    [1.0, 6.0, 8.6, 8.2],
    [1.0, 16.5, 8.6, 18.7],
    [11.0, 6.0, 18.6, 8.2],
    [11.0, 16.5, 18.6, 18.7],
    [21.1, 6.0, 28.6, 8.2],
    [21.1, 16.5, 28.6, 18.7],
];

pub const CARDS_PER_SHEET: usize = 6;

/// Axis-aligned box in pixels. `x1 > x0` and `y1 > y0` always hold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Option<Rect> {
        if x1 > x0 && y1 > y0 {
            Some(Rect { x0, y0, x1, y1 })
        } else {
            None
        }
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    fn from_cells(cells: [f32; 4], h_scale: f32, v_scale: f32) -> Option<Rect> {
        Rect::new(
            cells[0] * h_scale,
            cells[1] * v_scale,
            cells[2] * h_scale,
            cells[3] * v_scale,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetSlot {
    pub name: Rect,
    pub affiliation: Rect,
}

/// Pixel rectangles of the six card slots for the given cell scale.
/// Returns `None` when a scale is not strictly positive.
pub fn sheet_slots(h_scale: f32, v_scale: f32) -> Option<[SheetSlot; CARDS_PER_SHEET]> {
    let mut slots = [SheetSlot {
        name: Rect { x0: 0.0, y0: 0.0, x1: 1.0, y1: 1.0 },
        affiliation: Rect { x0: 0.0, y0: 0.0, x1: 1.0, y1: 1.0 },
    }; CARDS_PER_SHEET];
    for (i, slot) in slots.iter_mut().enumerate() {
        slot.name = Rect::from_cells(NAME_CELLS[i], h_scale, v_scale)?;
        slot.affiliation = Rect::from_cells(AFFILIATION_CELLS[i], h_scale, v_scale)?;
    }
    Some(slots)
}
