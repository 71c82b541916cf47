//! Engine observer trait for progress reporting and host notifications.

use gb_config::PieceSet;
use gb_core::Frame;
use gb_piece::VirtualPiece;

/// Callbacks invoked by [`Engine::run_frames`][crate::Engine::run_frames] at
/// key points in the frame loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — piece logger
///
/// ```rust,ignore
/// struct PieceLogger;
///
/// impl EngineObserver for PieceLogger {
///     fn on_piece_created(&mut self, piece: &VirtualPiece) {
///         println!("piece up: contact {} glyph {}", piece.contact_id, piece.glyph);
///     }
/// }
/// ```
pub trait EngineObserver {
    /// Called at the very start of each frame, before any processing.
    fn on_frame_start(&mut self, _frame: Frame) {}

    /// Called at the end of each frame.
    ///
    /// `contacts` is the number of contacts reported by the source this
    /// frame (including terminal ones).
    fn on_frame_end(&mut self, _frame: Frame, _contacts: usize) {}

    /// Called when a virtual piece is created for a newly begun contact,
    /// before the contact's first dispatch.
    fn on_piece_created(&mut self, _piece: &VirtualPiece) {}

    /// Called after a terminal contact's final dispatch, once its piece and
    /// attached proxies have been released.
    fn on_piece_removed(&mut self, _piece: &VirtualPiece) {}

    /// Called at the first frame boundary after the active piece set
    /// changed — including once for the initial set on the first frame.
    fn on_piece_set_changed(&mut self, _set: &PieceSet) {}
}

/// An [`EngineObserver`] that does nothing.  Use when you need to call
/// `run_frames` but don't want callbacks.
pub struct NoopObserver;

impl EngineObserver for NoopObserver {}
