#![cfg_attr(not(any(test, feature = "std")), no_std)]

use core::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Monotonic millisecond clock plus the cooperative idle hook the frame
/// scheduler calls while it waits for the next frame.
pub trait Timer {
    fn millis(&self) -> u64;

    /// Gives the rest of the system a chance to run. Must return promptly.
    fn idle(&self) {}
}

impl<T: Timer + ?Sized> Timer for &T {
    #[inline]
    fn millis(&self) -> u64 {
        (**self).millis()
    }

    #[inline]
    fn idle(&self) {
        (**self).idle()
    }
}

/// Clock driven by hand. Used for simulation and by hosts that count ticks
/// themselves.
#[derive(Debug, Default)]
pub struct ManualTimer {
    now: AtomicU64,
    idle_step: u64,
    idle_calls: AtomicUsize,
}

impl ManualTimer {
    pub const fn new(start: u64) -> Self {
        ManualTimer {
            now: AtomicU64::new(start),
            idle_step: 0,
            idle_calls: AtomicUsize::new(0),
        }
    }

    /// Every `idle` call advances the clock by `step` milliseconds.
    pub fn with_idle_step(mut self, step: u64) -> Self {
        self.idle_step = step;
        self
    }

    #[inline]
    pub fn set(&self, millis: u64) {
        self.now.store(millis, Ordering::Release);
    }

    #[inline]
    pub fn advance(&self, millis: u64) -> u64 {
        self.now.fetch_add(millis, Ordering::AcqRel) + millis
    }

    #[inline]
    pub fn idle_calls(&self) -> usize {
        self.idle_calls.load(Ordering::Acquire)
    }
}

impl Timer for ManualTimer {
    #[inline]
    fn millis(&self) -> u64 {
        self.now.load(Ordering::Acquire)
    }

    fn idle(&self) {
        self.idle_calls.fetch_add(1, Ordering::AcqRel);
        if self.idle_step != 0 {
            self.advance(self.idle_step);
        }
    }
}

#[cfg(feature = "std")]
mod host {
    use super::Timer;
    use std::time::{Duration, Instant};

    /// Wall clock of the host, counting from construction.
    #[derive(Clone, Copy, Debug)]
    pub struct StdTimer {
        start: Instant,
    }

    impl StdTimer {
        pub fn new() -> Self {
            log::debug!("host clock started");
            StdTimer {
                start: Instant::now(),
            }
        }
    }

    impl Default for StdTimer {
        fn default() -> Self {
            StdTimer::new()
        }
    }

    impl Timer for StdTimer {
        fn millis(&self) -> u64 {
            self.start.elapsed().as_millis() as u64
        }

        fn idle(&self) {
            std::thread::sleep(Duration::from_millis(1));
        }
    }
}

#[cfg(feature = "std")]
pub use host::StdTimer;
