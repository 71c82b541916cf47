//! Engine time model.
//!
//! Time is a monotonically increasing `Frame` counter advanced once per
//! engine pass.  Every duration in the engine — settle countdowns, cooldowns,
//! spawn frequencies — is measured in frames, so all timing arithmetic is
//! exact integer math and a test can step the engine frame by frame.

use std::fmt;

// ── Frame ─────────────────────────────────────────────────────────────────────

/// An absolute frame counter.
///
/// Stored as `u64`: at 60 frames per second a u64 lasts ~9.7 billion years,
/// so overflow is not a practical concern.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame(pub u64);

impl Frame {
    pub const ZERO: Frame = Frame(0);

    /// Cast to `usize` for direct use as a `Vec` index (scripted sources).
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Frames elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Frame) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Frame {
    type Output = Frame;
    #[inline]
    fn add(self, rhs: u64) -> Frame {
        Frame(self.0 + rhs)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}

// ── FrameClock ────────────────────────────────────────────────────────────────

/// Tracks the current frame.  Advanced by the engine at the end of each pass;
/// all processing within a pass observes one consistent frame value.
#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    pub current_frame: Frame,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by one frame.
    #[inline]
    pub fn advance(&mut self) {
        self.current_frame = Frame(self.current_frame.0 + 1);
    }
}

impl fmt::Display for FrameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.current_frame)
    }
}
