use crate::buffer::ROW_GROUPS;
use crate::{BitmapError, BlitMode, Framebuffer, Result, HEIGHT, WIDTH};
use log::trace;

/// Bitmap packed the same way as the framebuffer: each byte is a column of
/// eight vertically stacked pixels, `width` bytes per row-group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bitmap<'a> {
    data: &'a [u8],
    width: u8,
    height: u8,
}

impl<'a> Bitmap<'a> {
    pub fn new(data: &'a [u8], width: u8, height: u8) -> Result<Self> {
        let expected = width as usize * row_groups(height);
        if data.len() < expected {
            return Err(BitmapError::TooShort {
                expected,
                actual: data.len(),
            });
        }
        Ok(Bitmap {
            data,
            width,
            height,
        })
    }

    /// Parses sprite assets that start with a width byte and a height byte.
    pub fn from_sprite(sprite: &'a [u8]) -> Result<Self> {
        match sprite {
            [width, height, data @ ..] => Bitmap::new(data, *width, *height),
            _ => Err(BitmapError::MissingHeader),
        }
    }

    #[inline]
    pub fn width(&self) -> u8 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u8 {
        self.height
    }

    #[inline]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    #[inline]
    pub fn row_groups(&self) -> usize {
        row_groups(self.height)
    }

    #[inline]
    fn column(&self, group: usize, col: usize) -> u8 {
        self.data[group * self.width as usize + col]
    }
}

/// Bitmap packed by rows: each byte holds eight horizontally adjacent pixels,
/// most significant bit first, `ceil(width / 8)` bytes per row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct XyBitmap<'a> {
    data: &'a [u8],
    width: u8,
    height: u8,
}

impl<'a> XyBitmap<'a> {
    pub fn new(data: &'a [u8], width: u8, height: u8) -> Result<Self> {
        let expected = stride(width) * height as usize;
        if data.len() < expected {
            return Err(BitmapError::TooShort {
                expected,
                actual: data.len(),
            });
        }
        Ok(XyBitmap {
            data,
            width,
            height,
        })
    }

    pub fn from_sprite(sprite: &'a [u8]) -> Result<Self> {
        match sprite {
            [width, height, data @ ..] => XyBitmap::new(data, *width, *height),
            _ => Err(BitmapError::MissingHeader),
        }
    }

    #[inline]
    pub fn width(&self) -> u8 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u8 {
        self.height
    }

    #[inline]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    #[inline]
    pub fn stride(&self) -> usize {
        stride(self.width)
    }

    #[inline]
    pub fn is_set(&self, col: u8, row: u8) -> bool {
        let byte = self.data[row as usize * self.stride() + col as usize / 8];
        byte & (0x80 >> (col & 7)) != 0
    }
}

#[inline]
fn row_groups(height: u8) -> usize {
    (height as usize).div_ceil(8)
}

#[inline]
fn stride(width: u8) -> usize {
    (width as usize).div_ceil(8)
}

impl Framebuffer {
    /// Blits a row-group packed bitmap with its top left corner at `(x, y)`.
    ///
    /// When `y` is not a multiple of 8 every source byte straddles two
    /// row-groups: the low part is shifted into the row-group it starts in and
    /// the remainder into the one below.
    pub fn draw_bitmap(&mut self, x: i16, y: i16, bitmap: &Bitmap<'_>, mode: BlitMode) {
        let (x, y) = (x as i32, y as i32);
        let (w, h) = (bitmap.width() as i32, bitmap.height() as i32);
        if x + w < 0 || x > WIDTH as i32 - 1 || y + h < 0 || y > HEIGHT as i32 - 1 {
            trace!("bitmap {}x{} at ({}, {}) is off screen", w, h, x, y);
            return;
        }

        let mut y_offset = (y.abs() % 8) as u32;
        let mut s_row = y / 8;
        if y < 0 {
            s_row -= 1;
            y_offset = 8 - y_offset;
        }

        let last_group = ROW_GROUPS as i32 - 1;
        for a in 0..bitmap.row_groups() {
            let b_row = s_row + a as i32;
            if b_row > last_group {
                break;
            }
            if b_row <= -2 {
                continue;
            }
            for col in 0..w {
                let dx = x + col;
                if dx > WIDTH as i32 - 1 {
                    break;
                }
                if dx < 0 {
                    continue;
                }
                // widened so a shift of 8 drops the byte instead of overflowing
                let bits = bitmap.column(a, col as usize) as u16;
                if b_row >= 0 {
                    self.composite(b_row, dx, (bits << y_offset) as u8, mode);
                }
                if y_offset != 0 && b_row < last_group {
                    self.composite(b_row + 1, dx, (bits >> (8 - y_offset)) as u8, mode);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, FrameBufferWrite};

    const SQUARE: [u8; 8] = [0xFF; 8];
    const STRIPES: [u8; 8] = [0b1010_0101, 0x0F, 0xF0, 0x81, 0x42, 0x24, 0x18, 0xFF];

    fn lit(fb: &Framebuffer) -> u32 {
        fb.buffer().iter().map(|b| b.count_ones()).sum()
    }

    #[test]
    fn rejects_short_data() {
        assert_eq!(
            Bitmap::new(&[0; 7], 8, 8),
            Err(BitmapError::TooShort {
                expected: 8,
                actual: 7
            })
        );
        assert!(Bitmap::new(&[0; 15], 8, 9).is_err());
        assert!(Bitmap::new(&[0; 16], 8, 9).is_ok());
        assert!(XyBitmap::new(&[0; 5], 9, 3).is_err());
        assert!(XyBitmap::new(&[0; 6], 9, 3).is_ok());
    }

    #[test]
    fn parses_sprite_header() {
        let sprite = [3, 8, 1, 2, 3];
        let bitmap = Bitmap::from_sprite(&sprite).unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (3, 8));
        assert_eq!(bitmap.data(), &[1, 2, 3]);
        assert_eq!(Bitmap::from_sprite(&[3]), Err(BitmapError::MissingHeader));
        assert!(Bitmap::from_sprite(&[4, 8, 1, 2, 3]).is_err());
    }

    #[test]
    fn aligned_blit_copies_bytes() {
        let mut fb = Framebuffer::new();
        let bitmap = Bitmap::new(&STRIPES, 8, 8).unwrap();
        fb.draw_bitmap(16, 8, &bitmap, BlitMode::Set);
        let row = WIDTH as usize;
        assert_eq!(&fb.buffer()[row + 16..row + 24], &STRIPES);
        assert_eq!(lit(&fb), STRIPES.iter().map(|b| b.count_ones()).sum::<u32>());
    }

    #[test]
    fn unaligned_blit_straddles_two_row_groups() {
        let mut fb = Framebuffer::new();
        let bitmap = Bitmap::new(&STRIPES, 8, 8).unwrap();
        fb.draw_bitmap(0, 3, &bitmap, BlitMode::Set);
        let row = WIDTH as usize;
        for (col, byte) in STRIPES.iter().enumerate() {
            assert_eq!(fb.buffer()[col], *byte << 3);
            assert_eq!(fb.buffer()[row + col], *byte >> 5);
        }
    }

    #[test]
    fn unaligned_blit_matches_pixels() {
        let mut fb = Framebuffer::new();
        let bitmap = Bitmap::new(&STRIPES, 8, 8).unwrap();
        fb.draw_bitmap(40, 21, &bitmap, BlitMode::Set);
        for (col, byte) in STRIPES.iter().enumerate() {
            for bit in 0..8 {
                let expected = Color::from((*byte >> bit) & 1);
                assert_eq!(fb.pixel(40 + col as i16, 21 + bit), expected);
            }
        }
    }

    #[test]
    fn negative_y_keeps_bottom_part() {
        let mut fb = Framebuffer::new();
        let bitmap = Bitmap::new(&SQUARE, 8, 8).unwrap();
        fb.draw_bitmap(0, -3, &bitmap, BlitMode::Set);
        assert_eq!(fb.buffer()[0], 0b0001_1111);
        assert_eq!(lit(&fb), 8 * 5);
    }

    #[test]
    fn negative_multiple_of_eight_moves_whole_row_group() {
        let mut fb = Framebuffer::new();
        let data = [0x11; 16];
        let bitmap = Bitmap::new(&data, 8, 16).unwrap();
        fb.draw_bitmap(0, -8, &bitmap, BlitMode::Set);
        assert!(fb.buffer()[..8].iter().all(|&b| b == 0x11));
        assert_eq!(lit(&fb), 8 * 2);
    }

    #[test]
    fn clips_columns_at_both_edges() {
        let mut fb = Framebuffer::new();
        let bitmap = Bitmap::new(&SQUARE, 8, 8).unwrap();
        fb.draw_bitmap(-4, 0, &bitmap, BlitMode::Set);
        assert_eq!(lit(&fb), 4 * 8);
        fb.clear();
        fb.draw_bitmap(WIDTH - 2, HEIGHT - 8, &bitmap, BlitMode::Set);
        assert_eq!(lit(&fb), 2 * 8);
        fb.clear();
        fb.draw_bitmap(0, HEIGHT - 4, &bitmap, BlitMode::Set);
        assert_eq!(lit(&fb), 8 * 4);
    }

    #[test]
    fn off_screen_blit_is_noop() {
        let mut fb = Framebuffer::new();
        let bitmap = Bitmap::new(&SQUARE, 8, 8).unwrap();
        fb.draw_bitmap(-9, 0, &bitmap, BlitMode::Set);
        fb.draw_bitmap(WIDTH, 0, &bitmap, BlitMode::Set);
        fb.draw_bitmap(0, -9, &bitmap, BlitMode::Set);
        fb.draw_bitmap(0, HEIGHT, &bitmap, BlitMode::Set);
        fb.draw_bitmap(i16::MIN, i16::MAX, &bitmap, BlitMode::Set);
        assert_eq!(lit(&fb), 0);
    }

    #[test]
    fn clear_mode_turns_pixels_off() {
        let mut fb = Framebuffer::new();
        fb.fill_screen(Color::White);
        let bitmap = Bitmap::new(&SQUARE, 8, 8).unwrap();
        fb.draw_bitmap(8, 4, &bitmap, BlitMode::Clear);
        assert_eq!(lit(&fb), WIDTH as u32 * HEIGHT as u32 - 64);
        assert_eq!(fb.pixel(8, 4), Color::Black);
        assert_eq!(fb.pixel(8, 3), Color::White);
        assert_eq!(fb.pixel(8, 12), Color::White);
    }

    #[test]
    fn set_and_clear_are_idempotent_invert_is_not() {
        let bitmap = Bitmap::new(&STRIPES, 8, 8).unwrap();
        let mut base = Framebuffer::new();
        base.draw_fast_hline(0, 5, 40, Color::White);

        for mode in [BlitMode::Set, BlitMode::Clear] {
            let mut once = base.clone();
            once.draw_bitmap(10, 5, &bitmap, mode);
            let mut twice = once.clone();
            twice.draw_bitmap(10, 5, &bitmap, mode);
            assert_eq!(once, twice, "{mode:?} blit should be idempotent");
        }

        let mut inverted = base.clone();
        inverted.draw_bitmap(10, 5, &bitmap, BlitMode::Invert);
        assert_ne!(inverted, base);
        inverted.draw_bitmap(10, 5, &bitmap, BlitMode::Invert);
        assert_eq!(inverted, base);
    }
}
