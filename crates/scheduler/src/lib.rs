#![cfg_attr(not(test), no_std)]

mod frame;
mod rate;

pub use frame::FrameScheduler;
pub use rate::FrameRate;

/// Where the scheduler is within one frame cycle.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Default)]
pub enum FramePhase {
    /// No frame is running.
    #[default]
    Pending,
    /// A frame was permitted; its duration is recorded by the next poll.
    Open,
}
