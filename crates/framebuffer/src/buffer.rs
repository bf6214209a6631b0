use crate::{BlitMode, Color, FrameBufferWrite};

pub const WIDTH: i16 = 128;
pub const HEIGHT: i16 = 64;
pub const BUFFER_SIZE: usize = WIDTH as usize * HEIGHT as usize / 8;

pub(crate) const ROW_GROUPS: i16 = HEIGHT / 8;

const _: () = assert!(HEIGHT % 8 == 0, "display height must be a multiple of 8");

/// Packed 1bpp framebuffer.
///
/// Bytes are laid out row-group major: byte `r * WIDTH + x` holds the eight
/// pixels `(x, r*8)..=(x, r*8+7)`, least significant bit on top.
#[derive(Clone, Eq, PartialEq)]
pub struct Framebuffer {
    buffer: [u8; BUFFER_SIZE],
}

impl Framebuffer {
    pub const fn new() -> Self {
        Framebuffer {
            buffer: [0; BUFFER_SIZE],
        }
    }

    #[inline]
    pub fn buffer(&self) -> &[u8; BUFFER_SIZE] {
        &self.buffer
    }

    #[inline]
    pub fn buffer_mut(&mut self) -> &mut [u8; BUFFER_SIZE] {
        &mut self.buffer
    }

    pub fn clear(&mut self) {
        self.fill_screen(Color::Black);
    }

    #[inline]
    fn in_bounds(x: i16, y: i16) -> bool {
        x >= 0 && x < WIDTH && y >= 0 && y < HEIGHT
    }

    #[inline]
    fn index(x: i16, y: i16) -> usize {
        (y as usize / 8) * WIDTH as usize + x as usize
    }

    /// Combines `bits` into the byte of row-group `row`, column `col`.
    /// Callers guarantee both are on screen.
    #[inline]
    pub(crate) fn composite(&mut self, row: i32, col: i32, bits: u8, mode: BlitMode) {
        let byte = &mut self.buffer[row as usize * WIDTH as usize + col as usize];
        *byte = mode.apply(*byte, bits);
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Framebuffer::new()
    }
}

impl FrameBufferWrite for Framebuffer {
    #[inline]
    fn width(&self) -> i16 {
        WIDTH
    }

    #[inline]
    fn height(&self) -> i16 {
        HEIGHT
    }

    fn draw_pixel(&mut self, x: i16, y: i16, color: Color) {
        if !Self::in_bounds(x, y) {
            return;
        }
        let mask = 1u8 << (y % 8);
        let byte = &mut self.buffer[Self::index(x, y)];
        match color {
            Color::White => *byte |= mask,
            Color::Black => *byte &= !mask,
        }
    }

    fn pixel(&self, x: i16, y: i16) -> Color {
        if !Self::in_bounds(x, y) {
            return Color::Black;
        }
        Color::from((self.buffer[Self::index(x, y)] >> (y % 8)) & 1)
    }

    fn draw_fast_hline(&mut self, x: i16, y: i16, w: i16, color: Color) {
        if y < 0 || y >= HEIGHT {
            return;
        }
        let mut x = x as i32;
        let mut w = w as i32;
        if x < 0 {
            w += x;
            x = 0;
        }
        if x + w > WIDTH as i32 {
            w = WIDTH as i32 - x;
        }
        if w <= 0 {
            return;
        }

        let start = Self::index(x as i16, y);
        let mask = 1u8 << (y & 7);
        let run = &mut self.buffer[start..start + w as usize];
        match color {
            Color::White => run.iter_mut().for_each(|b| *b |= mask),
            Color::Black => run.iter_mut().for_each(|b| *b &= !mask),
        }
    }

    fn fill_screen(&mut self, color: Color) {
        self.buffer.fill(color.fill_byte());
    }
}

impl core::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Framebuffer")
            .field("width", &WIDTH)
            .field("height", &HEIGHT)
            .field("lit", &self.buffer.iter().map(|b| b.count_ones()).sum::<u32>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(fb: &Framebuffer) -> u32 {
        fb.buffer().iter().map(|b| b.count_ones()).sum()
    }

    #[test]
    fn set_and_get_every_pixel() {
        let mut fb = Framebuffer::new();
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                fb.draw_pixel(x, y, Color::White);
                assert_eq!(fb.pixel(x, y), Color::White);
                assert_eq!(lit(&fb), 1, "only ({x}, {y}) should be lit");
                fb.draw_pixel(x, y, Color::Black);
                assert_eq!(fb.pixel(x, y), Color::Black);
                assert_eq!(lit(&fb), 0);
            }
        }
    }

    #[test]
    fn pixel_bit_layout() {
        let mut fb = Framebuffer::new();
        fb.draw_pixel(5, 0, Color::White);
        fb.draw_pixel(5, 7, Color::White);
        fb.draw_pixel(5, 9, Color::White);
        assert_eq!(fb.buffer()[5], 0b1000_0001);
        assert_eq!(fb.buffer()[WIDTH as usize + 5], 0b0000_0010);
    }

    #[test]
    fn clearing_one_pixel_keeps_neighbours() {
        let mut fb = Framebuffer::new();
        fb.fill_screen(Color::White);
        fb.draw_pixel(10, 10, Color::Black);
        assert_eq!(fb.pixel(10, 10), Color::Black);
        assert_eq!(fb.pixel(10, 9), Color::White);
        assert_eq!(fb.pixel(10, 11), Color::White);
        assert_eq!(fb.pixel(9, 10), Color::White);
        assert_eq!(lit(&fb), WIDTH as u32 * HEIGHT as u32 - 1);
    }

    #[test]
    fn out_of_range_pixels_are_ignored() {
        let mut fb = Framebuffer::new();
        fb.draw_pixel(-1, 0, Color::White);
        fb.draw_pixel(0, -1, Color::White);
        fb.draw_pixel(WIDTH, 0, Color::White);
        fb.draw_pixel(0, HEIGHT, Color::White);
        fb.draw_pixel(i16::MIN, i16::MAX, Color::White);
        assert_eq!(lit(&fb), 0);
        assert_eq!(fb.pixel(-3, 200), Color::Black);
    }

    #[test]
    fn fill_screen_sets_every_byte() {
        let mut fb = Framebuffer::new();
        fb.fill_screen(Color::White);
        assert!(fb.buffer().iter().all(|&b| b == 0xFF));
        assert!((0..HEIGHT).all(|y| (0..WIDTH).all(|x| fb.pixel(x, y) == Color::White)));
        fb.clear();
        assert!(fb.buffer().iter().all(|&b| b == 0x00));
        assert!((0..HEIGHT).all(|y| (0..WIDTH).all(|x| fb.pixel(x, y) == Color::Black)));
    }

    #[test]
    fn hline_clamps_to_display() {
        let mut fb = Framebuffer::new();
        fb.draw_fast_hline(-5, 3, 10, Color::White);
        assert_eq!(lit(&fb), 5);
        assert!((0..5).all(|x| fb.pixel(x, 3) == Color::White));

        fb.clear();
        fb.draw_fast_hline(120, 63, 100, Color::White);
        assert_eq!(lit(&fb), 8);
        assert_eq!(fb.pixel(127, 63), Color::White);
    }

    #[test]
    fn hline_rejects_empty_and_off_screen_runs() {
        let mut fb = Framebuffer::new();
        fb.draw_fast_hline(0, -1, 10, Color::White);
        fb.draw_fast_hline(0, HEIGHT, 10, Color::White);
        fb.draw_fast_hline(10, 10, 0, Color::White);
        fb.draw_fast_hline(10, 10, -4, Color::White);
        fb.draw_fast_hline(-20, 10, 10, Color::White);
        fb.draw_fast_hline(WIDTH, 10, 10, Color::White);
        fb.draw_fast_hline(i16::MAX, 10, i16::MAX, Color::White);
        assert_eq!(lit(&fb), 0);
    }

    #[test]
    fn hline_black_clears_only_its_row() {
        let mut fb = Framebuffer::new();
        fb.fill_screen(Color::White);
        fb.draw_fast_hline(0, 12, WIDTH, Color::Black);
        assert!((0..WIDTH).all(|x| fb.pixel(x, 12) == Color::Black));
        assert!((0..WIDTH).all(|x| fb.pixel(x, 11) == Color::White));
        assert!((0..WIDTH).all(|x| fb.pixel(x, 13) == Color::White));
    }

    #[test]
    fn vline_crosses_row_groups() {
        let mut fb = Framebuffer::new();
        fb.draw_fast_vline(4, 6, 5, Color::White);
        assert_eq!(lit(&fb), 5);
        assert_eq!(fb.buffer()[4], 0b1100_0000);
        assert_eq!(fb.buffer()[WIDTH as usize + 4], 0b0000_0111);

        fb.clear();
        fb.draw_fast_vline(0, -10, 15, Color::White);
        assert_eq!(lit(&fb), 5);
        fb.draw_fast_vline(0, 60, 100, Color::White);
        assert_eq!(lit(&fb), 9);
    }
}
