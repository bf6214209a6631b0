use core::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BitmapError {
    /// Sprite data is missing its width/height header
    MissingHeader,
    TooShort { expected: usize, actual: usize },
}

impl fmt::Display for BitmapError {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BitmapError::MissingHeader => formatter.write_str("sprite header missing"),
            BitmapError::TooShort { expected, actual } => write!(
                formatter,
                "bitmap data too short: expected {} bytes, got {}",
                expected, actual
            ),
        }
    }
}

impl core::error::Error for BitmapError {}

pub type Result<T> = core::result::Result<T, BitmapError>;
