//! Single checkbox.

use crate::contract::FormField;
use crate::state::{ConfigError, ConfigProperty, ValidationErrorKind};
use crate::widgets::{FieldCommon, FieldKind};

/// Boolean checkbox. Required means it must be checked.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Checkbox {
    common: FieldCommon,
    checked: bool,
    value_warning: Option<ConfigError>,
}

impl Checkbox {
    pub fn new(field_key: impl Into<String>) -> Self {
        Self {
            common: FieldCommon::new(field_key),
            ..Self::default()
        }
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.common.set_required(required);
        self
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    /// Starting state from raw attribute text.
    ///
    /// Only `true` and `false` are canonical. Presence-style spellings
    /// (`""`, `checked`, `on`, `yes`, `1`) mean checked; anything else means
    /// unchecked. Non-canonical input is reported as a warning.
    pub fn with_raw_value(mut self, raw: &str) -> Self {
        let text = raw.trim();
        let checked = matches!(
            text.to_ascii_lowercase().as_str(),
            "true" | "" | "checked" | "on" | "yes" | "1"
        );
        self.checked = checked;
        self.value_warning = (text != "true" && text != "false").then(|| {
            ConfigError::normalized(
                ConfigProperty::Value,
                format!("checkbox value \"{text}\" is not true or false; read as {checked}"),
                checked.to_string(),
            )
        });
        self
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    pub fn toggle(&mut self) {
        self.checked = !self.checked;
    }
}

impl FormField for Checkbox {
    fn kind(&self) -> FieldKind {
        FieldKind::Checkbox
    }

    fn common(&self) -> &FieldCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut FieldCommon {
        &mut self.common
    }

    fn value(&self) -> String {
        self.checked.to_string()
    }

    fn validation_errors(&self) -> Vec<ValidationErrorKind> {
        if self.common.is_required() && !self.checked {
            vec![ValidationErrorKind::Required]
        } else {
            Vec::new()
        }
    }

    fn widget_config_errors(&self) -> Vec<ConfigError> {
        self.value_warning.iter().cloned().collect()
    }
}
