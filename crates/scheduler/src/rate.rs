/// Target frames per second. Zero is not a rate.
#[derive(Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash, Debug)]
#[repr(transparent)]
pub struct FrameRate(u8);

impl Default for FrameRate {
    fn default() -> Self {
        FrameRate::DEFAULT
    }
}

impl FrameRate {
    pub const MIN: FrameRate = FrameRate(1);
    pub const MAX: FrameRate = FrameRate(u8::MAX);
    pub const DEFAULT: FrameRate = FrameRate(60);

    pub const fn new(rate: u8) -> FrameRate {
        if rate < Self::MIN.0 {
            panic!("Frame rate must be >= 1");
        }
        FrameRate(rate)
    }

    #[inline]
    pub fn hz(&self) -> u8 {
        self.0
    }

    /// Milliseconds per frame, truncated: 60 Hz gives 16 ms.
    #[inline]
    pub fn interval_ms(&self) -> u64 {
        1000 / self.0 as u64
    }
}

impl From<FrameRate> for u8 {
    fn from(rate: FrameRate) -> Self {
        rate.0
    }
}
