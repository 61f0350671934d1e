use crate::Axis;
use crate::coord::Coord;

/// Blank braille character. Each raised dot adds its value from this table:
///
/// ```notrust
///    1   8
///    2  10
///    4  20
///   40  80
/// ```
const BRAILLE_EMPTY: u32 = 0x2800;

/// Shows a whole grid at once as braille text. Each character covers a 2x4 block of cells.
pub struct Camera {
    /// One flag per grid cell, row-major
    cb: Vec<bool>,

    /// Last rendered frame, one line per row of characters
    fb: String,

    /// Codepoint of each character, rebuilt on every render
    cp: Vec<u32>,

    /// Grid width in cells
    w: usize,

    /// Grid height in cells
    h: usize,
}

impl Camera {
    pub fn new(w: usize, h: usize) -> Self {
        let cb = vec![false; w * h];

        // Let `w` and `h` refer to width and height of the cell buffer. Then `bw = ceil(w / 2)`
        // and `bh = ceil(h / 4)` are the width and height of braille characters of our framebuffer
        // (that is, not accounting for the trailing newlines expected at the end of each line).
        let (bw, bh) = (w.div_ceil(2), h.div_ceil(4));
        let cp = vec![BRAILLE_EMPTY; bw * bh];

        // Each braille character is 3 bytes, and newlines one byte. Since we need `bh` newlines,
        // this gives us a framebuffer of length `3 * (bw * bh) + bh`.
        let fb = String::with_capacity(3 * (bw * bh) + bh);

        Self { cb, fb, cp, w, h }
    }

    /// A camera showing a whole `size x size` grid, one dot per cell
    pub fn for_grid(size: Axis) -> Self {
        Self::new(usize::from(size), usize::from(size))
    }

    /// Turns on a single pixel of the framebuffer
    pub fn draw_pixel(&mut self, x: usize, y: usize) {
        assert!(x < self.w, "x is out of bounds");
        assert!(y < self.h, "y is out of bounds");

        let i = self.xy_from(x, y);

        self.cb[i] = true;
    }

    /// Turns on one pixel per cell
    pub fn draw_cells(&mut self, cells: &[Coord]) {
        for p in cells {
            self.draw_pixel(usize::from(p.x), usize::from(p.y));
        }
    }

    /// Reset the cell buffer
    pub fn reset(&mut self) {
        self.cb.fill(false);
    }

    /// Turn the cell buffer into lines of braille characters
    pub fn render(&mut self) -> &str {
        let bw = self.w.div_ceil(2);

        // compute new codepoints
        self.cp.fill(BRAILLE_EMPTY);

        for (n, &px) in self.cb.iter().enumerate() {
            if px {
                let (x, y) = (n % self.w, n / self.w);

                self.cp[(y / 4) * bw + (x / 2)] += Self::get_hex_value(x, y);
            }
        }

        // update framebuffer
        self.fb.clear();

        for (i, &c) in self.cp.iter().enumerate() {
            if i > 0 && i % bw == 0 {
                self.fb.push('\n');
            }

            // every sum of dots stays inside the braille block
            self.fb.push(char::from_u32(c).unwrap_or(' '));
        }
        self.fb.push('\n');

        &self.fb
    }

    fn xy_from(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    fn get_hex_value(x: usize, y: usize) -> u32 {
        match (x % 2, y % 4) {
            (0, 0) => 0x1,
            (1, 0) => 0x8,
            (0, 1) => 0x2,
            (1, 1) => 0x10,
            (0, 2) => 0x4,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            (1, 3) => 0x80,
            _ => unreachable!(),
        }
    }
}
