#![cfg_attr(not(test), no_std)]

use arcbox_framebuffer::{Screen, BUFFER_SIZE, HEIGHT, WIDTH};
use core::fmt::{self, Write};
use log::warn;
use spin::Mutex;

pub const ON: char = '#';
pub const OFF: char = '.';

struct Inner<W> {
    writer: W,
    paints: usize,
}

impl<W: Write> Inner<W> {
    fn render(&mut self, buffer: &[u8]) -> fmt::Result {
        for y in 0..HEIGHT as usize {
            let row = &buffer[(y / 8) * WIDTH as usize..][..WIDTH as usize];
            let mask = 1u8 << (y % 8);
            for byte in row {
                self.writer
                    .write_char(if byte & mask != 0 { ON } else { OFF })?;
            }
            self.writer.write_char('\n')?;
        }
        self.paints += 1;
        Ok(())
    }
}

/// Screen that prints every transfer as `HEIGHT` lines of `WIDTH` characters,
/// `#` for a lit pixel and `.` for a dark one.
pub struct TextDisplay<W> {
    inner: Mutex<Inner<W>>,
}

impl<W: Write> TextDisplay<W> {
    pub const fn new(writer: W) -> Self {
        TextDisplay {
            inner: Mutex::new(Inner { writer, paints: 0 }),
        }
    }

    /// Number of completed transfers, blanking included.
    pub fn paints(&self) -> usize {
        self.inner.lock().paints
    }

    pub fn with_writer<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        f(&mut self.inner.lock().writer)
    }

    pub fn into_inner(self) -> W {
        self.inner.into_inner().writer
    }
}

impl<W: Write> Screen for TextDisplay<W> {
    type Error = fmt::Error;

    fn paint(&mut self, buffer: &[u8]) -> Result<(), Self::Error> {
        if buffer.len() < BUFFER_SIZE {
            warn!(
                "refusing to paint {} bytes, a frame is {}",
                buffer.len(),
                BUFFER_SIZE
            );
            return Err(fmt::Error);
        }
        self.inner.get_mut().render(buffer)
    }
}
