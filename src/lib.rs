#![cfg_attr(not(test), no_std)]

mod engine;

pub use arcbox_framebuffer::{
    Bitmap, BitmapError, BlitMode, Color, FrameBufferWrite, Framebuffer, Halves, Quadrants,
    Rasterize, Screen, XyBitmap, BUFFER_SIZE, HEIGHT, WIDTH,
};
pub use arcbox_input::{ButtonSource, ButtonState, Buttons};
pub use arcbox_random::{mix_seed, new_random, EntropySource, Pcg32};
pub use arcbox_scheduler::{FramePhase, FrameRate, FrameScheduler};
#[cfg(feature = "std")]
pub use arcbox_timer::StdTimer;
pub use arcbox_timer::{ManualTimer, Timer};
pub use engine::Arcbox;
