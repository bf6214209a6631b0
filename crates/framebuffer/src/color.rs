#[derive(Eq, PartialEq, Clone, Copy, Debug, Default, Hash)]
#[repr(u8)]
pub enum Color {
    #[default]
    Black = 0,
    White = 1,
}

impl Color {
    #[inline]
    pub fn is_on(self) -> bool {
        self == Color::White
    }

    #[inline]
    pub fn inverted(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Byte with all eight stacked pixels set to this color.
    #[inline]
    pub fn fill_byte(self) -> u8 {
        match self {
            Color::Black => 0x00,
            Color::White => 0xFF,
        }
    }
}

impl From<u8> for Color {
    #[inline]
    fn from(value: u8) -> Self {
        if value == 0 {
            Color::Black
        } else {
            Color::White
        }
    }
}

impl From<bool> for Color {
    #[inline]
    fn from(on: bool) -> Self {
        if on {
            Color::White
        } else {
            Color::Black
        }
    }
}

impl From<Color> for u8 {
    #[inline]
    fn from(color: Color) -> Self {
        color as u8
    }
}

/// How set bits of a bitmap are combined with the framebuffer.
#[derive(Eq, PartialEq, Clone, Copy, Debug)]
pub enum BlitMode {
    /// OR: turn pixels on
    Set,
    /// AND NOT: turn pixels off
    Clear,
    /// XOR
    Invert,
}

impl BlitMode {
    #[inline]
    pub fn apply(self, target: u8, bits: u8) -> u8 {
        match self {
            BlitMode::Set => target | bits,
            BlitMode::Clear => target & !bits,
            BlitMode::Invert => target ^ bits,
        }
    }
}

impl From<Color> for BlitMode {
    fn from(color: Color) -> Self {
        match color {
            Color::White => BlitMode::Set,
            Color::Black => BlitMode::Clear,
        }
    }
}
