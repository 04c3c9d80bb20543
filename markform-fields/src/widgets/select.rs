//! Drop-down select.

use crate::contract::FormField;
use crate::options::ChoiceOption;
use crate::state::{ConfigError, ValidationErrorKind};
use crate::widgets::{ChoiceList, FieldCommon, FieldKind};

/// Single-choice drop-down. No choice made counts as empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Select {
    common: FieldCommon,
    choices: ChoiceList,
    value: String,
    value_warning: Option<ConfigError>,
}

impl Select {
    pub fn new(field_key: impl Into<String>, choices: ChoiceList) -> Self {
        Self {
            common: FieldCommon::new(field_key),
            choices,
            ..Self::default()
        }
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.common.set_required(required);
        self
    }

    /// Author-provided starting value, normalized against the options.
    pub fn with_initial_value(mut self, value: &str) -> Self {
        let (value, warning) = self.choices.normalize_value(value);
        self.value = value;
        self.value_warning = warning;
        self
    }

    pub fn options(&self) -> &[ChoiceOption] {
        self.choices.options()
    }

    pub fn selected(&self) -> &str {
        &self.value
    }

    /// User picks an option. Values outside the list are refused.
    pub fn select(&mut self, value: &str) -> bool {
        if !self.choices.contains(value) {
            return false;
        }
        self.value = value.to_string();
        true
    }

    /// User clears the selection.
    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Replace the options, e.g. after the document was re-edited. A selection
    /// that no longer exists is cleared with a warning.
    pub fn set_choices(&mut self, choices: ChoiceList) {
        self.choices = choices;
        let (value, warning) = self.choices.normalize_value(&self.value);
        self.value = value;
        if warning.is_some() {
            self.value_warning = warning;
        }
    }
}

impl FormField for Select {
    fn kind(&self) -> FieldKind {
        FieldKind::Select
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
        if self.common.is_required() && self.value.is_empty() {
            vec![ValidationErrorKind::Required]
        } else {
            Vec::new()
        }
    }

    fn widget_config_errors(&self) -> Vec<ConfigError> {
        let mut errors = self.choices.warnings().to_vec();
        errors.extend(self.value_warning.clone());
        errors
    }
}
