//! Single-line text input.

use crate::contract::FormField;
use crate::rules::{LengthBounds, Normalized, PatternRule};
use crate::state::{ConfigError, ValidationErrorKind};
use crate::widgets::{FieldCommon, FieldKind};

/// Text input with required, length and pattern rules.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextInput {
    common: FieldCommon,
    value: String,
    bounds: Normalized<LengthBounds>,
    pattern: PatternRule,
}

impl TextInput {
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

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.set_pattern(pattern);
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

    pub fn pattern(&self) -> &str {
        self.pattern.source()
    }

    /// Replace the pattern; it is compiled immediately.
    pub fn set_pattern(&mut self, pattern: impl Into<String>) {
        self.pattern = PatternRule::new(pattern);
    }
}

impl FormField for TextInput {
    fn kind(&self) -> FieldKind {
        FieldKind::Input
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
        if self.pattern.rejects(&self.value) {
            errors.push(ValidationErrorKind::Pattern);
        }
        errors
    }

    fn widget_config_errors(&self) -> Vec<ConfigError> {
        let mut errors = self.bounds.warnings.clone();
        errors.extend(self.pattern.config_error().cloned());
        errors
    }
}
