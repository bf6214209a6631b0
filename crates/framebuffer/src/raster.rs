use crate::{BlitMode, Color, FrameBufferWrite, XyBitmap};
use bitflags::bitflags;
use core::mem::swap;

bitflags! {
    /// Circle quadrants, used for rounded rectangle corners.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Quadrants: u8 {
        const TOP_LEFT = 0b0001;
        const TOP_RIGHT = 0b0010;
        const BOTTOM_RIGHT = 0b0100;
        const BOTTOM_LEFT = 0b1000;
    }
}

bitflags! {
    /// Circle halves filled by [`Rasterize::fill_circle_helper`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Halves: u8 {
        const RIGHT = 0b01;
        const LEFT = 0b10;
    }
}

/// Shape primitives built only on top of [`FrameBufferWrite`] pixel and fast
/// line operations.
///
/// Coordinates are `i16`; all intermediate math happens in `i32`, so shapes
/// partially or entirely off screen are clipped by the pixel sink.
pub trait Rasterize: FrameBufferWrite {
    /// Bresenham line, both endpoints included.
    fn draw_line(&mut self, x0: i16, y0: i16, x1: i16, y1: i16, color: Color) {
        line(self, x0 as i32, y0 as i32, x1 as i32, y1 as i32, color);
    }

    fn draw_rect(&mut self, x: i16, y: i16, w: i16, h: i16, color: Color) {
        if w <= 0 || h <= 0 {
            return;
        }
        let (x, y, w, h) = (x as i32, y as i32, w as i32, h as i32);
        hspan(self, x, y, w, color);
        hspan(self, x, y + h - 1, w, color);
        vspan(self, x, y, h, color);
        vspan(self, x + w - 1, y, h, color);
    }

    fn fill_rect(&mut self, x: i16, y: i16, w: i16, h: i16, color: Color) {
        fill_columns(self, x as i32, y as i32, w as i32, h as i32, color);
    }

    fn draw_circle(&mut self, x0: i16, y0: i16, r: i16, color: Color) {
        if r < 0 {
            return;
        }
        let (x0, y0, r) = (x0 as i32, y0 as i32, r as i32);
        put(self, x0, y0 + r, color);
        put(self, x0, y0 - r, color);
        put(self, x0 + r, y0, color);
        put(self, x0 - r, y0, color);

        for (x, y) in Octant::new(r) {
            put(self, x0 + x, y0 + y, color);
            put(self, x0 - x, y0 + y, color);
            put(self, x0 + x, y0 - y, color);
            put(self, x0 - x, y0 - y, color);
            put(self, x0 + y, y0 + x, color);
            put(self, x0 - y, y0 + x, color);
            put(self, x0 + y, y0 - x, color);
            put(self, x0 - y, y0 - x, color);
        }
    }

    /// Outline of the selected circle quadrants, without the cardinal points.
    fn draw_circle_helper(&mut self, x0: i16, y0: i16, r: i16, quadrants: Quadrants, color: Color) {
        arc(self, x0 as i32, y0 as i32, r as i32, quadrants, color);
    }

    fn fill_circle(&mut self, x0: i16, y0: i16, r: i16, color: Color) {
        if r < 0 {
            return;
        }
        let (x0, y0, r) = (x0 as i32, y0 as i32, r as i32);
        vspan(self, x0, y0 - r, 2 * r + 1, color);
        half_discs(self, x0, y0, r, Halves::all(), 0, color);
    }

    /// Fills the selected halves of a circle with vertical spans, excluding the
    /// center column. `delta` stretches every span downwards, which is how the
    /// flat sides of a filled rounded rectangle are formed.
    fn fill_circle_helper(
        &mut self,
        x0: i16,
        y0: i16,
        r: i16,
        halves: Halves,
        delta: i16,
        color: Color,
    ) {
        half_discs(self, x0 as i32, y0 as i32, r as i32, halves, delta as i32, color);
    }

    fn draw_round_rect(&mut self, x: i16, y: i16, w: i16, h: i16, r: i16, color: Color) {
        if w <= 0 || h <= 0 {
            return;
        }
        let (x, y, w, h) = (x as i32, y as i32, w as i32, h as i32);
        let r = corner_radius(w, h, r as i32);
        hspan(self, x + r, y, w - 2 * r, color);
        hspan(self, x + r, y + h - 1, w - 2 * r, color);
        vspan(self, x, y + r, h - 2 * r, color);
        vspan(self, x + w - 1, y + r, h - 2 * r, color);

        arc(self, x + r, y + r, r, Quadrants::TOP_LEFT, color);
        arc(self, x + w - r - 1, y + r, r, Quadrants::TOP_RIGHT, color);
        arc(self, x + w - r - 1, y + h - r - 1, r, Quadrants::BOTTOM_RIGHT, color);
        arc(self, x + r, y + h - r - 1, r, Quadrants::BOTTOM_LEFT, color);
    }

    fn fill_round_rect(&mut self, x: i16, y: i16, w: i16, h: i16, r: i16, color: Color) {
        if w <= 0 || h <= 0 {
            return;
        }
        let (x, y, w, h) = (x as i32, y as i32, w as i32, h as i32);
        let r = corner_radius(w, h, r as i32);
        fill_columns(self, x + r, y, w - 2 * r, h, color);

        half_discs(self, x + w - r - 1, y + r, r, Halves::RIGHT, h - 2 * r - 1, color);
        half_discs(self, x + r, y + r, r, Halves::LEFT, h - 2 * r - 1, color);
    }

    fn draw_triangle(
        &mut self,
        x0: i16,
        y0: i16,
        x1: i16,
        y1: i16,
        x2: i16,
        y2: i16,
        color: Color,
    ) {
        let (x0, y0, x1, y1, x2, y2) = (
            x0 as i32, y0 as i32, x1 as i32, y1 as i32, x2 as i32, y2 as i32,
        );
        line(self, x0, y0, x1, y1, color);
        line(self, x1, y1, x2, y2, color);
        line(self, x2, y2, x0, y0, color);
    }

    /// Scanline fill.
    ///
    /// Edge crossings are recomputed every scanline as `x + acc / dy` with
    /// truncating division, so long thin edges can land one pixel off a
    /// remainder-carrying rasterizer. Existing artwork depends on this pattern.
    fn fill_triangle(
        &mut self,
        x0: i16,
        y0: i16,
        x1: i16,
        y1: i16,
        x2: i16,
        y2: i16,
        color: Color,
    ) {
        let (mut x0, mut y0, mut x1, mut y1, mut x2, mut y2) = (
            x0 as i32, y0 as i32, x1 as i32, y1 as i32, x2 as i32, y2 as i32,
        );

        // sort by y: y0 <= y1 <= y2
        if y0 > y1 {
            swap(&mut y0, &mut y1);
            swap(&mut x0, &mut x1);
        }
        if y1 > y2 {
            swap(&mut y2, &mut y1);
            swap(&mut x2, &mut x1);
        }
        if y0 > y1 {
            swap(&mut y0, &mut y1);
            swap(&mut x0, &mut x1);
        }

        if y0 == y2 {
            let (mut a, mut b) = (x0, x0);
            if x1 < a {
                a = x1;
            } else if x1 > b {
                b = x1;
            }
            if x2 < a {
                a = x2;
            } else if x2 > b {
                b = x2;
            }
            hspan(self, a, y0, b - a + 1, color);
            return;
        }

        // |dx * dy| can exceed i32 for coordinates far off screen
        let (dx01, dy01) = ((x1 - x0) as i64, (y1 - y0) as i64);
        let (dx02, dy02) = ((x2 - x0) as i64, (y2 - y0) as i64);
        let (dx12, dy12) = ((x2 - x1) as i64, (y2 - y1) as i64);
        let mut sa: i64 = 0;
        let mut sb: i64 = 0;

        // A flat bottom (y1 == y2) is finished in the upper half and the lower
        // loop never runs; otherwise scanline y1 belongs to the lower half,
        // which also keeps a flat top (y0 == y1) out of the upper loop.
        let last = if y1 == y2 { y1 } else { y1 - 1 };

        let mut y = y0;
        while y <= last {
            let mut a = x0 + (sa / dy01) as i32;
            let mut b = x0 + (sb / dy02) as i32;
            sa += dx01;
            sb += dx02;
            if a > b {
                swap(&mut a, &mut b);
            }
            hspan(self, a, y, b - a + 1, color);
            y += 1;
        }

        sa = dx12 * (y - y1) as i64;
        sb = dx02 * (y - y0) as i64;
        while y <= y2 {
            let mut a = x1 + (sa / dy12) as i32;
            let mut b = x0 + (sb / dy02) as i32;
            sa += dx12;
            sb += dx02;
            if a > b {
                swap(&mut a, &mut b);
            }
            hspan(self, a, y, b - a + 1, color);
            y += 1;
        }
    }

    /// Per-pixel blit of a row packed bitmap. Only set bits are drawn.
    fn draw_slow_bitmap(&mut self, x: i16, y: i16, bitmap: &XyBitmap<'_>, mode: BlitMode) {
        let (x, y) = (x as i32, y as i32);
        let (w, h) = (bitmap.width() as i32, bitmap.height() as i32);
        if x + w < 0
            || x > self.width() as i32 - 1
            || y + h < 0
            || y > self.height() as i32 - 1
        {
            return;
        }

        for row in 0..bitmap.height() {
            for col in 0..bitmap.width() {
                if !bitmap.is_set(col, row) {
                    continue;
                }
                let (px, py) = (narrow(x + col as i32), narrow(y + row as i32));
                let color = match mode {
                    BlitMode::Set => Color::White,
                    BlitMode::Clear => Color::Black,
                    BlitMode::Invert => self.pixel(px, py).inverted(),
                };
                self.draw_pixel(px, py, color);
            }
        }
    }
}

impl<T: FrameBufferWrite + ?Sized> Rasterize for T {}

/// Midpoint circle walk over the octant `x < y`, yielding `(x, y)` offsets.
struct Octant {
    f: i32,
    ddf_x: i32,
    ddf_y: i32,
    x: i32,
    y: i32,
}

impl Octant {
    fn new(r: i32) -> Octant {
        Octant {
            f: 1 - r,
            ddf_x: 1,
            ddf_y: -2 * r,
            x: 0,
            y: r,
        }
    }
}

impl Iterator for Octant {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<(i32, i32)> {
        if self.x >= self.y {
            return None;
        }
        if self.f >= 0 {
            self.y -= 1;
            self.ddf_y += 2;
            self.f += self.ddf_y;
        }
        self.x += 1;
        self.ddf_x += 2;
        self.f += self.ddf_x;
        Some((self.x, self.y))
    }
}

// Coordinates beyond i16 are off any display, so saturating keeps them off.
#[inline]
fn narrow(v: i32) -> i16 {
    v.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

#[inline]
fn put<F: FrameBufferWrite + ?Sized>(fb: &mut F, x: i32, y: i32, color: Color) {
    fb.draw_pixel(narrow(x), narrow(y), color);
}

fn hspan<F: FrameBufferWrite + ?Sized>(fb: &mut F, x: i32, y: i32, w: i32, color: Color) {
    let end = x.saturating_add(w);
    let start = x.max(0);
    if end <= start {
        return;
    }
    fb.draw_fast_hline(narrow(start), narrow(y), narrow(end - start), color);
}

fn vspan<F: FrameBufferWrite + ?Sized>(fb: &mut F, x: i32, y: i32, h: i32, color: Color) {
    let end = y.saturating_add(h);
    let start = y.max(0);
    if end <= start {
        return;
    }
    fb.draw_fast_vline(narrow(x), narrow(start), narrow(end - start), color);
}

fn fill_columns<F: FrameBufferWrite + ?Sized>(
    fb: &mut F,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    color: Color,
) {
    if w <= 0 || h <= 0 {
        return;
    }
    let end = x.saturating_add(w).min(fb.width() as i32);
    for col in x.max(0)..end {
        vspan(fb, col, y, h, color);
    }
}

fn corner_radius(w: i32, h: i32, r: i32) -> i32 {
    r.clamp(0, w.min(h) / 2)
}

fn line<F: FrameBufferWrite + ?Sized>(
    fb: &mut F,
    mut x0: i32,
    mut y0: i32,
    mut x1: i32,
    mut y1: i32,
    color: Color,
) {
    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    if steep {
        swap(&mut x0, &mut y0);
        swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        swap(&mut x0, &mut x1);
        swap(&mut y0, &mut y1);
    }

    let dx = x1 - x0;
    let dy = (y1 - y0).abs();
    let mut err = dx / 2;
    let ystep = if y0 < y1 { 1 } else { -1 };

    let mut y = y0;
    for x in x0..=x1 {
        if steep {
            put(fb, y, x, color);
        } else {
            put(fb, x, y, color);
        }
        err -= dy;
        if err < 0 {
            y += ystep;
            err += dx;
        }
    }
}

fn arc<F: FrameBufferWrite + ?Sized>(
    fb: &mut F,
    x0: i32,
    y0: i32,
    r: i32,
    quadrants: Quadrants,
    color: Color,
) {
    if r < 0 {
        return;
    }
    for (x, y) in Octant::new(r) {
        if quadrants.contains(Quadrants::BOTTOM_RIGHT) {
            put(fb, x0 + x, y0 + y, color);
            put(fb, x0 + y, y0 + x, color);
        }
        if quadrants.contains(Quadrants::TOP_RIGHT) {
            put(fb, x0 + x, y0 - y, color);
            put(fb, x0 + y, y0 - x, color);
        }
        if quadrants.contains(Quadrants::BOTTOM_LEFT) {
            put(fb, x0 - y, y0 + x, color);
            put(fb, x0 - x, y0 + y, color);
        }
        if quadrants.contains(Quadrants::TOP_LEFT) {
            put(fb, x0 - y, y0 - x, color);
            put(fb, x0 - x, y0 - y, color);
        }
    }
}

fn half_discs<F: FrameBufferWrite + ?Sized>(
    fb: &mut F,
    x0: i32,
    y0: i32,
    r: i32,
    halves: Halves,
    delta: i32,
    color: Color,
) {
    if r < 0 {
        return;
    }
    for (x, y) in Octant::new(r) {
        if halves.contains(Halves::RIGHT) {
            vspan(fb, x0 + x, y0 - y, 2 * y + 1 + delta, color);
            vspan(fb, x0 + y, y0 - x, 2 * x + 1 + delta, color);
        }
        if halves.contains(Halves::LEFT) {
            vspan(fb, x0 - x, y0 - y, 2 * y + 1 + delta, color);
            vspan(fb, x0 - y, y0 - x, 2 * x + 1 + delta, color);
        }
    }
}
