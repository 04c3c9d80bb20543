//! Change notification for registry consumers.

use std::sync::Arc;

use tokio::sync::watch;

pub use tokio::sync::watch::error::RecvError;

use crate::population::FieldPopulation;

/// A consumer's view of the registry's published snapshots.
///
/// Every accessor hands out an owned `Arc<FieldPopulation>`; no lock on the
/// channel outlives the call. Code reacting to a change may therefore write
/// straight back into the registry, e.g. unmount a field when a duplicate key
/// shows up.
#[derive(Debug, Clone)]
pub struct PopulationWatch {
    receiver: watch::Receiver<Arc<FieldPopulation>>,
}

impl PopulationWatch {
    pub(crate) fn new(receiver: watch::Receiver<Arc<FieldPopulation>>) -> Self {
        Self { receiver }
    }

    /// The latest snapshot, without marking it seen.
    pub fn current(&self) -> Arc<FieldPopulation> {
        Arc::clone(&self.receiver.borrow())
    }

    /// The latest snapshot, marking it seen.
    pub fn mark_seen(&mut self) -> Arc<FieldPopulation> {
        Arc::clone(&self.receiver.borrow_and_update())
    }

    /// Whether a snapshot newer than the last one seen was published.
    ///
    /// Fails once the registry has been dropped.
    pub fn has_changed(&self) -> Result<bool, RecvError> {
        self.receiver.has_changed()
    }

    /// Wait for the next real change and return the snapshot it produced.
    ///
    /// No-op writes to the registry never wake this. Fails once the registry
    /// has been dropped.
    pub async fn changed(&mut self) -> Result<Arc<FieldPopulation>, RecvError> {
        self.receiver.changed().await?;
        Ok(self.mark_seen())
    }
}
