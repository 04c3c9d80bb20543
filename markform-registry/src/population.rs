//! Immutable snapshots of the registered field states.

use std::sync::OnceLock;

use indexmap::IndexMap;
use serde::Serialize;

use markform_fields::{FieldId, FieldState};

use crate::diagnostics::{
    DuplicateKey, FieldConfigError, FieldValue, FormDiagnostics, InvalidField,
};

/// One version of the population, keyed by field id in mount order.
///
/// A snapshot never changes after it is published. Every mutation of the
/// registry builds a new one with a higher version, so holding an
/// `Arc<FieldPopulation>` gives a consistent view for as long as it is kept.
#[derive(Debug, Default, Serialize)]
pub struct FieldPopulation {
    version: u64,
    entries: IndexMap<FieldId, FieldState>,
    #[serde(skip)]
    diagnostics: OnceLock<FormDiagnostics>,
}

impl FieldPopulation {
    /// Incremented on every change that altered the population.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &FieldId) -> Option<&FieldState> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &FieldId) -> bool {
        self.entries.contains_key(id)
    }

    /// States in the order their fields were first mounted.
    pub fn iter(&self) -> impl Iterator<Item = &FieldState> {
        self.entries.values()
    }

    /// All diagnostics for this snapshot, computed on first use.
    pub fn diagnostics(&self) -> &FormDiagnostics {
        self.diagnostics
            .get_or_init(|| FormDiagnostics::compute(self.entries.values()))
    }

    pub fn is_form_valid(&self) -> bool {
        self.diagnostics().is_form_valid()
    }

    pub fn required_fields_count(&self) -> usize {
        self.diagnostics().required_fields_count()
    }

    pub fn valid_required_fields_count(&self) -> usize {
        self.diagnostics().valid_required_fields_count()
    }

    pub fn invalid_fields(&self) -> &[InvalidField] {
        self.diagnostics().invalid_fields()
    }

    pub fn field_values(&self) -> &[FieldValue] {
        self.diagnostics().field_values()
    }

    pub fn duplicate_field_keys(&self) -> &[DuplicateKey] {
        self.diagnostics().duplicate_field_keys()
    }

    pub fn all_config_errors(&self) -> &[FieldConfigError] {
        self.diagnostics().all_config_errors()
    }

    pub fn critical_config_errors(&self) -> Vec<&FieldConfigError> {
        self.diagnostics().critical_config_errors()
    }

    pub fn config_warnings(&self) -> Vec<&FieldConfigError> {
        self.diagnostics().config_warnings()
    }

    /// Same population with `state` inserted or replaced in place.
    pub(crate) fn with_upsert(&self, state: FieldState) -> Self {
        let mut entries = self.entries.clone();
        entries.insert(state.id(), state);
        self.next(entries)
    }

    pub(crate) fn with_removed(&self, id: &FieldId) -> Self {
        let mut entries = self.entries.clone();
        entries.shift_remove(id);
        self.next(entries)
    }

    pub(crate) fn cleared(&self) -> Self {
        self.next(IndexMap::new())
    }

    fn next(&self, entries: IndexMap<FieldId, FieldState>) -> Self {
        Self {
            version: self.version + 1,
            entries,
            diagnostics: OnceLock::new(),
        }
    }
}

impl<'a> IntoIterator for &'a FieldPopulation {
    type Item = &'a FieldState;
    type IntoIter = indexmap::map::Values<'a, FieldId, FieldState>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}
