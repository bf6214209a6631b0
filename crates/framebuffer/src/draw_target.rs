// Bridge to embedded-graphics so text, fonts and styled primitives from that
// ecosystem can render straight into the packed buffer.
use crate::{Color, FrameBufferWrite, Framebuffer, HEIGHT, WIDTH};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

impl From<BinaryColor> for Color {
    fn from(color: BinaryColor) -> Self {
        match color {
            BinaryColor::On => Color::White,
            BinaryColor::Off => Color::Black,
        }
    }
}

impl From<Color> for BinaryColor {
    fn from(color: Color) -> Self {
        match color {
            Color::White => BinaryColor::On,
            Color::Black => BinaryColor::Off,
        }
    }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            if x < 0 || y < 0 || x >= WIDTH as i32 || y >= HEIGHT as i32 {
                continue;
            }
            self.draw_pixel(x as i16, y as i16, color.into());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_screen(color.into());
        Ok(())
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

    #[test]
    fn styled_rectangle_lands_in_buffer() {
        let mut fb = Framebuffer::new();
        Rectangle::new(Point::new(2, 3), Size::new(4, 5))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut fb)
            .unwrap();
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                let inside = (2..6).contains(&x) && (3..8).contains(&y);
                assert_eq!(fb.pixel(x, y), Color::from(inside), "({x}, {y})");
            }
        }
    }

    #[test]
    fn off_screen_points_are_skipped() {
        let mut fb = Framebuffer::new();
        let pixels = [
            Pixel(Point::new(-1, 0), BinaryColor::On),
            Pixel(Point::new(0, 64), BinaryColor::On),
            Pixel(Point::new(i32::MAX, i32::MIN), BinaryColor::On),
            Pixel(Point::new(127, 63), BinaryColor::On),
        ];
        fb.draw_iter(pixels).unwrap();
        assert_eq!(fb.buffer().iter().map(|b| b.count_ones()).sum::<u32>(), 1);
        assert_eq!(fb.pixel(127, 63), Color::White);
    }

    #[test]
    fn clear_fills_whole_screen() {
        let mut fb = Framebuffer::new();
        DrawTarget::clear(&mut fb, BinaryColor::On).unwrap();
        assert!(fb.buffer().iter().all(|&b| b == 0xFF));
        assert_eq!(fb.size(), Size::new(128, 64));
    }
}
