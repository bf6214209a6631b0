use crate::{FramePhase, FrameRate};
use arcbox_timer::Timer;
use log::debug;

/// Decides when the host loop may start a new frame.
///
/// Time lost to a slow frame is absorbed: the next due time is never left in
/// the past, so later frames are not run faster to make up for it.
#[derive(Clone, Debug)]
pub struct FrameScheduler {
    rate: FrameRate,
    interval_ms: u64,
    frame_count: u32,
    last_frame_start_ms: u64,
    next_frame_due_ms: u64,
    last_frame_duration_ms: u64,
    phase: FramePhase,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        FrameScheduler::new(FrameRate::DEFAULT)
    }
}

impl FrameScheduler {
    pub fn new(rate: FrameRate) -> Self {
        FrameScheduler {
            rate,
            interval_ms: rate.interval_ms(),
            frame_count: 0,
            last_frame_start_ms: 0,
            next_frame_due_ms: 0,
            last_frame_duration_ms: 0,
            phase: FramePhase::Pending,
        }
    }

    pub fn set_frame_rate(&mut self, rate: FrameRate) {
        self.rate = rate;
        self.interval_ms = rate.interval_ms();
        debug!(
            "frame rate set to {} Hz ({} ms per frame)",
            rate.hz(),
            self.interval_ms
        );
    }

    /// Returns `true` when a new frame may start. Call once per loop iteration.
    pub fn poll_frame<T: Timer + ?Sized>(&mut self, timer: &T) -> bool {
        let now = timer.millis();

        if self.phase == FramePhase::Open {
            self.last_frame_duration_ms = now.saturating_sub(self.last_frame_start_ms);
            self.frame_count = self.frame_count.wrapping_add(1);
            self.phase = FramePhase::Pending;
            if self.last_frame_duration_ms > self.interval_ms {
                debug!(
                    "frame {} took {} ms, budget is {} ms",
                    self.frame_count, self.last_frame_duration_ms, self.interval_ms
                );
            }
        }

        if now < self.next_frame_due_ms {
            if self.next_frame_due_ms - now > 1 {
                timer.idle();
            }
            return false;
        }

        self.next_frame_due_ms = (self.last_frame_start_ms + self.interval_ms).max(now);
        self.last_frame_start_ms = now;
        self.phase = FramePhase::Open;
        true
    }

    /// `true` on every `n`th completed frame. Never true for `n == 0`.
    #[inline]
    pub fn every_n_frames(&self, n: u8) -> bool {
        n != 0 && self.frame_count % n as u32 == 0
    }

    /// Duration of the last completed frame as a percentage of the frame
    /// budget. Above 100 when the frame overran.
    #[inline]
    pub fn load_percent(&self) -> u64 {
        self.last_frame_duration_ms * 100 / self.interval_ms
    }

    #[inline]
    pub fn frame_rate(&self) -> FrameRate {
        self.rate
    }

    #[inline]
    pub fn frame_interval_ms(&self) -> u64 {
        self.interval_ms
    }

    #[inline]
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    #[inline]
    pub fn last_frame_start_ms(&self) -> u64 {
        self.last_frame_start_ms
    }

    #[inline]
    pub fn next_frame_due_ms(&self) -> u64 {
        self.next_frame_due_ms
    }

    #[inline]
    pub fn last_frame_duration_ms(&self) -> u64 {
        self.last_frame_duration_ms
    }

    #[inline]
    pub fn phase(&self) -> FramePhase {
        self.phase
    }
}
