#![cfg_attr(not(test), no_std)]

mod bitmap;
mod buffer;
mod color;
#[cfg(feature = "embedded-graphics")]
mod draw_target;
mod error;
mod raster;

pub use bitmap::{Bitmap, XyBitmap};
pub use buffer::{Framebuffer, BUFFER_SIZE, HEIGHT, WIDTH};
pub use color::{BlitMode, Color};
pub use error::{BitmapError, Result};
pub use raster::{Halves, Quadrants, Rasterize};

/// Pixel sink every drawing primitive goes through.
///
/// Implementors only have to provide single pixel access; the line helpers
/// fall back to per-pixel writes and may be overridden with faster versions.
pub trait FrameBufferWrite {
    fn width(&self) -> i16;

    fn height(&self) -> i16;

    /// Writes one pixel. Coordinates outside the display are ignored.
    fn draw_pixel(&mut self, x: i16, y: i16, color: Color);

    /// Reads one pixel. Coordinates outside the display read as black.
    fn pixel(&self, x: i16, y: i16) -> Color;

    fn draw_fast_hline(&mut self, x: i16, y: i16, w: i16, color: Color) {
        if y < 0 || y >= self.height() {
            return;
        }
        let end = (x as i32 + w as i32).min(self.width() as i32);
        for col in (x as i32).max(0)..end {
            self.draw_pixel(col as i16, y, color);
        }
    }

    fn draw_fast_vline(&mut self, x: i16, y: i16, h: i16, color: Color) {
        let end = (y as i32 + h as i32).min(self.height() as i32);
        for row in (y as i32).max(0)..end {
            self.draw_pixel(x, row as i16, color);
        }
    }

    fn fill_screen(&mut self, color: Color) {
        for y in 0..self.height() {
            self.draw_fast_hline(0, y, self.width(), color);
        }
    }
}

/// Physical display the packed buffer is transferred to.
pub trait Screen {
    type Error;

    fn boot(&mut self) -> core::result::Result<(), Self::Error> {
        Ok(())
    }

    fn paint(&mut self, buffer: &[u8]) -> core::result::Result<(), Self::Error>;

    fn blank(&mut self) -> core::result::Result<(), Self::Error> {
        self.paint(&[0; BUFFER_SIZE])
    }
}
