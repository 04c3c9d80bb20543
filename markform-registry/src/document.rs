//! Owner of the mounted fields of one rendered document.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use markform_fields::{
    FieldDirective, FieldId, FormSettings, MountedField, Pretty, Widget, WidgetFactory,
};

use crate::registry::FormRegistry;

type Mounted = MountedField<Widget, Arc<FormRegistry>>;

/// The fields of one document and the registry they report to.
///
/// Dropping the document unmounts every field, which withdraws its state.
#[derive(Default)]
pub struct FormDocument {
    registry: Arc<FormRegistry>,
    factory: WidgetFactory,
    fields: IndexMap<FieldId, Mounted>,
}

impl FormDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: FormSettings) -> Self {
        Self {
            factory: WidgetFactory::new(settings),
            ..Self::default()
        }
    }

    /// Shared handle for consumers such as a submit button or status bar.
    pub fn registry(&self) -> &Arc<FormRegistry> {
        &self.registry
    }

    pub fn settings(&self) -> &FormSettings {
        self.factory.settings()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, id: &FieldId) -> Option<&Widget> {
        self.fields.get(id).map(MountedField::field)
    }

    /// Ids of the mounted fields, in mount order.
    pub fn field_ids(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.fields.keys().copied()
    }

    pub fn mount(&mut self, widget: impl Into<Widget>) -> FieldId {
        let mounted = MountedField::mount(widget.into(), Arc::clone(&self.registry));
        let id = mounted.id();
        self.fields.insert(id, mounted);
        id
    }

    /// Mount the widget a directive describes. Tags that aren't fields are
    /// skipped.
    pub fn mount_directive(&mut self, directive: &FieldDirective) -> Option<FieldId> {
        let widget = self.factory.instantiate(directive)?;
        Some(self.mount(widget))
    }

    /// Apply a user interaction to one field. Returns false for unknown ids.
    pub fn update(&mut self, id: &FieldId, change: impl FnOnce(&mut Widget)) -> bool {
        match self.fields.get_mut(id) {
            Some(mounted) => {
                mounted.update(change);
                true
            }
            None => false,
        }
    }

    /// The field lost focus.
    pub fn touch(&mut self, id: &FieldId) -> bool {
        match self.fields.get_mut(id) {
            Some(mounted) => {
                mounted.touch();
                true
            }
            None => false,
        }
    }

    pub fn unmount(&mut self, id: &FieldId) -> bool {
        self.fields.shift_remove(id).is_some()
    }

    /// Touch every field so all errors become visible, then report whether
    /// the form may be submitted.
    pub fn submit_attempt(&mut self) -> bool {
        for mounted in self.fields.values_mut() {
            mounted.touch();
        }
        let valid = self.registry.is_form_valid();
        debug!(valid, summary = %self.registry.summary(), "submit attempted");
        valid
    }

    /// Replace the whole document, e.g. after the markup was edited.
    ///
    /// The registry is reset once up front, so the old fields' removals that
    /// follow are no-ops and consumers never see a mix of old and new fields
    /// with stale duplicates.
    pub fn load<'a>(
        &mut self,
        directives: impl IntoIterator<Item = &'a FieldDirective>,
    ) -> Vec<FieldId> {
        self.registry.reset();
        self.fields.clear();

        let ids: Vec<FieldId> = directives
            .into_iter()
            .filter_map(|directive| self.mount_directive(directive))
            .collect();

        let snapshot = self.registry.snapshot();
        debug!(
            fields = ids.len(),
            version = snapshot.version(),
            "document loaded"
        );
        let critical = snapshot.critical_config_errors();
        if !critical.is_empty() {
            debug!("document has configuration errors: {}", Pretty(&critical));
        }
        ids
    }
}

impl std::fmt::Debug for FormDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormDocument")
            .field("registry", &self.registry)
            .field("fields", &self.fields.len())
            .finish()
    }
}
