//! The lifecycle every field follows to stay registered with its aggregator.
//!
//! A [`MountedField`] owns one widget and the sink it reports to. It pushes a
//! fresh [`FieldState`] after every change, withdraws it while the widget is
//! disabled, and always withdraws it when dropped.

use std::rc::Rc;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::logging::Pretty;
use crate::state::{ConfigError, FieldId, FieldState, ValidationErrorKind};
use crate::widgets::{FieldCommon, FieldKind};

/// Receiver of field states, implemented by the aggregation registry.
///
/// Neither operation can fail. Removing an id that isn't present is a no-op.
pub trait FieldSink {
    /// Insert or replace the state for `state.id()`.
    fn upsert(&self, state: FieldState);

    /// Remove the state for `id`, if any.
    fn remove(&self, id: &FieldId);
}

impl<T: FieldSink + ?Sized> FieldSink for &T {
    fn upsert(&self, state: FieldState) {
        (**self).upsert(state)
    }

    fn remove(&self, id: &FieldId) {
        (**self).remove(id)
    }
}

impl<T: FieldSink + ?Sized> FieldSink for Arc<T> {
    fn upsert(&self, state: FieldState) {
        (**self).upsert(state)
    }

    fn remove(&self, id: &FieldId) {
        (**self).remove(id)
    }
}

impl<T: FieldSink + ?Sized> FieldSink for Rc<T> {
    fn upsert(&self, state: FieldState) {
        (**self).upsert(state)
    }

    fn remove(&self, id: &FieldId) {
        (**self).remove(id)
    }
}

/// A field widget: something that can describe its own state.
///
/// Implementations only look at themselves. Anything that depends on other
/// fields, such as duplicate keys, is derived by the aggregator.
pub trait FormField {
    fn kind(&self) -> FieldKind;

    fn common(&self) -> &FieldCommon;

    fn common_mut(&mut self) -> &mut FieldCommon;

    /// Current value in canonical string form.
    fn value(&self) -> String;

    /// Failing rules, in rule declaration order.
    fn validation_errors(&self) -> Vec<ValidationErrorKind>;

    /// Widget-specific configuration diagnostics.
    fn widget_config_errors(&self) -> Vec<ConfigError>;

    fn is_disabled(&self) -> bool {
        self.common().is_disabled()
    }

    /// All configuration diagnostics, starting with the shared key check.
    fn config_errors(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.common().field_key().trim().is_empty() {
            errors.push(ConfigError::empty_field_key());
        }
        errors.extend(self.widget_config_errors());
        errors
    }

    /// Snapshot this field under the given identity.
    fn state(&self, id: FieldId) -> FieldState {
        let common = self.common();
        FieldState::new(id, common.field_key())
            .with_value(self.value())
            .with_required(common.is_required())
            .with_touched(common.is_touched())
            .with_validation_errors(self.validation_errors())
            .with_config_errors(self.config_errors())
    }
}

/// A widget mounted into a document, reporting to `sink`.
///
/// The identity is allocated before the first push, and `Drop` removes the
/// entry unconditionally, so a field can never leave a stale state behind.
pub struct MountedField<F: FormField, S: FieldSink> {
    id: FieldId,
    field: F,
    sink: S,
}

impl<F: FormField, S: FieldSink> MountedField<F, S> {
    /// Mount `field` and push its first state.
    pub fn mount(field: F, sink: S) -> Self {
        let mounted = Self {
            id: FieldId::new(),
            field,
            sink,
        };
        let config_errors = mounted.field.config_errors();
        if !config_errors.is_empty() {
            debug!(
                id = %mounted.id,
                kind = %mounted.field.kind(),
                "field mounted with configuration diagnostics: {}",
                Pretty(&config_errors)
            );
        }
        mounted.sync();
        mounted
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Push the current state, or withdraw it while disabled.
    pub fn sync(&self) {
        if self.field.is_disabled() {
            trace!(id = %self.id, "field disabled, withdrawing state");
            self.sink.remove(&self.id);
        } else {
            self.sink.upsert(self.field.state(self.id));
        }
    }

    /// Change the widget and push the result in the same step.
    pub fn update<R>(&mut self, change: impl FnOnce(&mut F) -> R) -> R {
        let result = change(&mut self.field);
        self.sync();
        result
    }

    /// Mark the field as interacted with (blur or submit attempt).
    pub fn touch(&mut self) {
        self.update(|field| field.common_mut().touch());
    }
}

impl<F: FormField, S: FieldSink> Drop for MountedField<F, S> {
    fn drop(&mut self) {
        trace!(id = %self.id, "field unmounted");
        self.sink.remove(&self.id);
    }
}
