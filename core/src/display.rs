use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// The FrameBuffer is indexed as [row][col]
pub type FrameBuffer = [[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// # Display
/// The Chip-8 display is composed of 64x32 black/white pixels.
///
/// Sprites are XORed onto the display and wrap around both edges. Drawing
/// reports a collision whenever a lit pixel is switched off.
#[derive(Copy, Clone)]
pub struct Display {
    cells: FrameBuffer,
}

impl Display {
    pub fn new() -> Self {
        Display {
            cells: [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.cells = [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    }

    /// Whether the pixel at `col`, `row` is lit; out of range pixels are never lit
    pub fn get_cell(&self, col: usize, row: usize) -> bool {
        self.cells
            .get(row)
            .and_then(|cells| cells.get(col))
            .copied()
            .unwrap_or(false)
    }

    pub fn frame(&self) -> FrameBuffer {
        self.cells
    }

    /// XORs `rows` onto the display with its top left corner at `x`, `y`.
    ///
    /// Each byte is one row of 8 pixels, most significant bit leftmost.
    /// Returns whether any lit pixel was switched off.
    pub fn draw_sprite(&mut self, x: usize, y: usize, rows: &[u8]) -> bool {
        let mut collision = false;
        for (row_index, byte) in rows.iter().enumerate() {
            let row = (y + row_index) % DISPLAY_HEIGHT;
            for bit in 0..8 {
                if (byte >> (7 - bit)) & 0x1 == 0 {
                    continue;
                }
                let col = (x + bit) % DISPLAY_WIDTH;
                let cell = &mut self.cells[row][col];
                collision |= *cell;
                *cell = !*cell;
            }
        }
        collision
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}
