//! The instantiation seam — how behaviors create and destroy visuals.

use thiserror::Error;

use gb_core::{Pose, ProxyId};

/// Errors from the instantiation backend.
#[derive(Debug, Error)]
pub enum InstantiateError {
    #[error("unknown template {0:?}")]
    UnknownTemplate(String),

    #[error("instantiation backend failure: {0}")]
    Backend(String),
}

/// Creates and destroys visual representations on behalf of behaviors.
///
/// `template` names an asset in the host's own registry; the engine never
/// interprets it.  Implementations hand back a [`ProxyId`] they can later
/// resolve in [`despawn`][Self::despawn].
///
/// [`despawn`][Self::despawn] is infallible and idempotent: destroying an
/// already-destroyed proxy must be a no-op, because teardown paths (piece
/// removal, piece-set switch) may race a behavior's own cleanup.
pub trait Instantiator {
    /// Create a visual from `template` at `pose`.
    fn spawn(&mut self, template: &str, pose: Pose) -> Result<ProxyId, InstantiateError>;

    /// Destroy a previously spawned visual.
    fn despawn(&mut self, proxy: ProxyId);
}

// ── NullInstantiator ──────────────────────────────────────────────────────────

/// An [`Instantiator`] that discards everything.  Use when the host has no
/// rendering (headless tools, most tests that don't assert on visuals).
#[derive(Default)]
pub struct NullInstantiator {
    next: u32,
}

impl Instantiator for NullInstantiator {
    fn spawn(&mut self, _template: &str, _pose: Pose) -> Result<ProxyId, InstantiateError> {
        let id = ProxyId(self.next);
        self.next += 1;
        Ok(id)
    }

    fn despawn(&mut self, _proxy: ProxyId) {}
}

// ── RecordingInstantiator ─────────────────────────────────────────────────────

/// An [`Instantiator`] that records every call for test assertions.
#[derive(Default)]
pub struct RecordingInstantiator {
    next: u32,

    /// Every spawn, in call order: (assigned id, template, pose).
    pub spawned: Vec<(ProxyId, String, Pose)>,

    /// Every despawn, in call order.
    pub despawned: Vec<ProxyId>,
}

impl RecordingInstantiator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Proxies spawned and not yet despawned.
    pub fn live(&self) -> Vec<ProxyId> {
        self.spawned
            .iter()
            .map(|(id, _, _)| *id)
            .filter(|id| !self.despawned.contains(id))
            .collect()
    }
}

impl Instantiator for RecordingInstantiator {
    fn spawn(&mut self, template: &str, pose: Pose) -> Result<ProxyId, InstantiateError> {
        let id = ProxyId(self.next);
        self.next += 1;
        self.spawned.push((id, template.to_owned(), pose));
        Ok(id)
    }

    fn despawn(&mut self, proxy: ProxyId) {
        self.despawned.push(proxy);
    }
}
