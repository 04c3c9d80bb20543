//! Multi-line text area.

use crate::contract::FormField;
use crate::rules::{LengthBounds, Normalized};
use crate::state::{ConfigError, ValidationErrorKind};
use crate::widgets::{FieldCommon, FieldKind};

/// Free-text area with required and length rules. Multi-line input has no
/// pattern rule.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Textarea {
    common: FieldCommon,
    value: String,
    bounds: Normalized<LengthBounds>,
}

impl Textarea {
    pub fn new(field_key: impl Into<String>) -> Self {
        Self {
            common: FieldCommon::new(field_key),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.common.set_required(required);
        self
    }

    pub fn with_lengths(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.bounds = LengthBounds::new(min, max);
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn bounds(&self) -> LengthBounds {
        self.bounds.value
    }

    pub fn set_bounds(&mut self, bounds: Normalized<LengthBounds>) {
        self.bounds = bounds;
    }
}

impl FormField for Textarea {
    fn kind(&self) -> FieldKind {
        FieldKind::Textarea
    }

    fn common(&self) -> &FieldCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut FieldCommon {
        &mut self.common
    }

    fn value(&self) -> String {
        self.value.clone()
    }

    fn validation_errors(&self) -> Vec<ValidationErrorKind> {
        let mut errors = Vec::new();
        if self.common.misses_required(&self.value) {
            errors.push(ValidationErrorKind::Required);
        }
        if self.bounds.value.too_short(&self.value) {
            errors.push(ValidationErrorKind::MinLength);
        }
        if self.bounds.value.too_long(&self.value) {
            errors.push(ValidationErrorKind::MaxLength);
        }
        errors
    }

    fn widget_config_errors(&self) -> Vec<ConfigError> {
        self.bounds.warnings.clone()
    }
}
