//! Off-screen rendering target: [`Frame`] of styled [`ScreenCell`]s.

use gridstar_core::Point;

/// An RGB colour packed into a `u32` (0x00RRGGBB).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Self = Self::from_rgb(0, 0, 0);
    pub const WHITE: Self = Self::from_rgb(255, 255, 255);

    /// Construct from individual RGB components.
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    #[inline]
    pub const fn r(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 & 0xFF) as u8
    }
}

/// A single terminal character with colours.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScreenCell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Default for ScreenCell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::WHITE,
            bg: Color::BLACK,
        }
    }
}

/// A screen cell that changed between frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameCell {
    pub pos: Point,
    pub cell: ScreenCell,
}

/// A full screen worth of cells, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    cells: Vec<ScreenCell>,
}

impl Frame {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![ScreenCell::default(); width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if p.row >= 0 && p.col >= 0 && (p.row as usize) < self.height && (p.col as usize) < self.width
        {
            Some(p.row as usize * self.width + p.col as usize)
        } else {
            None
        }
    }

    /// Cell at `p`, or the default cell outside bounds.
    pub fn at(&self, p: Point) -> ScreenCell {
        self.index(p).map(|i| self.cells[i]).unwrap_or_default()
    }

    /// Set the cell at `p`. No-op outside bounds.
    pub fn set(&mut self, p: Point, cell: ScreenCell) {
        if let Some(i) = self.index(p) {
            self.cells[i] = cell;
        }
    }

    /// Write `text` starting at `p`, clipped to the frame.
    pub fn print(&mut self, p: Point, text: &str, fg: Color, bg: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.set(p.shift(0, i as i32), ScreenCell { ch, fg, bg });
        }
    }

    /// Cells of `self` that differ from `prev`. Every cell is returned when
    /// the sizes differ.
    pub fn diff(&self, prev: &Frame) -> Vec<FrameCell> {
        let same_size = self.width == prev.width && self.height == prev.height;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(i, c)| !same_size || prev.cells[i] != *c)
            .map(|(i, &cell)| FrameCell {
                pos: Point::new((i / self.width) as i32, (i % self.width) as i32),
                cell,
            })
            .collect()
    }
}
