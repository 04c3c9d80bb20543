//! The aggregation registry fields report into.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, trace};

use markform_fields::{FieldId, FieldSink, FieldState};

use crate::diagnostics::{DuplicateKey, FieldConfigError, FieldValue, InvalidField};
use crate::population::FieldPopulation;
use crate::subscription::PopulationWatch;

/// Collects the states of all mounted fields and derives form-level
/// diagnostics from them.
///
/// The current population is published through a [`watch`] channel. Each
/// change replaces the snapshot with a new `Arc`, and changes that leave the
/// population as it was publish nothing: readers see the same `Arc` and the
/// same version, and subscribers are not woken.
///
/// # Examples
///
/// ```
/// use markform_fields::{FieldId, FieldSink, FieldState};
/// use markform_registry::FormRegistry;
///
/// let registry = FormRegistry::new();
/// let id = FieldId::new();
/// registry.upsert(FieldState::new(id, "email").with_required(true));
///
/// assert!(registry.is_form_valid());
/// assert_eq!(registry.summary(), "1/1 required fields filled");
///
/// registry.remove(&id);
/// assert!(registry.is_empty());
/// ```
#[derive(Debug)]
pub struct FormRegistry {
    population: watch::Sender<Arc<FieldPopulation>>,
}

impl Default for FormRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FormRegistry {
    pub fn new() -> Self {
        let (population, _) = watch::channel(Arc::new(FieldPopulation::default()));
        Self { population }
    }

    /// Insert or replace a field's state. Returns whether anything changed.
    pub fn upsert(&self, state: FieldState) -> bool {
        let id = state.id();
        let changed = self.population.send_if_modified(|current| {
            if current.get(&id) == Some(&state) {
                return false;
            }
            *current = Arc::new(current.with_upsert(state));
            true
        });
        if changed {
            debug!(%id, version = self.version(), "field state updated");
        } else {
            trace!(%id, "field state unchanged");
        }
        changed
    }

    /// Remove a field's state. Unknown ids are ignored.
    pub fn remove(&self, id: &FieldId) -> bool {
        let changed = self.population.send_if_modified(|current| {
            if !current.contains(id) {
                return false;
            }
            *current = Arc::new(current.with_removed(id));
            true
        });
        if changed {
            debug!(%id, version = self.version(), "field state removed");
        }
        changed
    }

    /// Drop every entry, e.g. before a document is re-rendered.
    pub fn reset(&self) -> bool {
        let changed = self.population.send_if_modified(|current| {
            if current.is_empty() {
                return false;
            }
            *current = Arc::new(current.cleared());
            true
        });
        if changed {
            debug!(version = self.version(), "registry reset");
        }
        changed
    }

    /// The current population. Cheap; the returned snapshot never changes.
    pub fn snapshot(&self) -> Arc<FieldPopulation> {
        Arc::clone(&self.population.borrow())
    }

    /// Watch for new snapshots. The current one counts as already seen.
    pub fn subscribe(&self) -> PopulationWatch {
        PopulationWatch::new(self.population.subscribe())
    }

    pub fn version(&self) -> u64 {
        self.population.borrow().version()
    }

    pub fn len(&self) -> usize {
        self.population.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.population.borrow().is_empty()
    }

    pub fn get(&self, id: &FieldId) -> Option<FieldState> {
        self.population.borrow().get(id).cloned()
    }

    pub fn is_form_valid(&self) -> bool {
        self.snapshot().is_form_valid()
    }

    pub fn required_fields_count(&self) -> usize {
        self.snapshot().required_fields_count()
    }

    pub fn valid_required_fields_count(&self) -> usize {
        self.snapshot().valid_required_fields_count()
    }

    pub fn invalid_fields(&self) -> Vec<InvalidField> {
        self.snapshot().invalid_fields().to_vec()
    }

    pub fn field_values(&self) -> Vec<FieldValue> {
        self.snapshot().field_values().to_vec()
    }

    pub fn duplicate_field_keys(&self) -> Vec<DuplicateKey> {
        self.snapshot().duplicate_field_keys().to_vec()
    }

    pub fn all_config_errors(&self) -> Vec<FieldConfigError> {
        self.snapshot().all_config_errors().to_vec()
    }

    pub fn critical_config_errors(&self) -> Vec<FieldConfigError> {
        self.snapshot()
            .critical_config_errors()
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn config_warnings(&self) -> Vec<FieldConfigError> {
        self.snapshot()
            .config_warnings()
            .into_iter()
            .cloned()
            .collect()
    }

    /// "N/M required fields filled".
    pub fn summary(&self) -> String {
        self.snapshot().diagnostics().summary()
    }
}

impl FieldSink for FormRegistry {
    fn upsert(&self, state: FieldState) {
        FormRegistry::upsert(self, state);
    }

    fn remove(&self, id: &FieldId) {
        FormRegistry::remove(self, id);
    }
}
