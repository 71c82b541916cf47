//! Settle (debounce) settings.

/// Controls the settle delay between a piece's first contact and behavior
/// activation, filtering the jitter of a token being placed imprecisely.
///
/// One global instance lives on the engine; a behavior may carry its own
/// override.  Whichever applies is resolved freshly every frame, never
/// cached, so a runtime settings change takes effect immediately.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SettleSettings {
    /// Whether activation is withheld while a new contact settles.
    pub use_settling: bool,

    /// How many frames a new contact must persist (with conditions passing)
    /// before its behaviors activate.
    pub settling_frames: u32,
}

impl Default for SettleSettings {
    fn default() -> Self {
        Self {
            use_settling:    true,
            settling_frames: 3,
        }
    }
}

impl SettleSettings {
    /// Settings with settling disabled entirely — behaviors activate on the
    /// Began frame.
    pub fn disabled() -> Self {
        Self {
            use_settling:    false,
            settling_frames: 0,
        }
    }
}
