//! Radio button group.

use crate::contract::FormField;
use crate::options::ChoiceOption;
use crate::state::{ConfigError, ValidationErrorKind};
use crate::widgets::{ChoiceList, FieldCommon, FieldKind};

/// Group of mutually exclusive options. Once a choice is made the user can
/// only move it, not clear it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RadioGroup {
    common: FieldCommon,
    choices: ChoiceList,
    value: String,
    value_warning: Option<ConfigError>,
}

impl RadioGroup {
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

    pub fn chosen(&self) -> Option<&str> {
        (!self.value.is_empty()).then_some(self.value.as_str())
    }

    /// User clicks an option. Values outside the group are refused.
    pub fn choose(&mut self, value: &str) -> bool {
        if !self.choices.contains(value) {
            return false;
        }
        self.value = value.to_string();
        true
    }

    /// Replace the options after the document was re-edited.
    pub fn set_choices(&mut self, choices: ChoiceList) {
        self.choices = choices;
        let (value, warning) = self.choices.normalize_value(&self.value);
        self.value = value;
        if warning.is_some() {
            self.value_warning = warning;
        }
    }
}

impl FormField for RadioGroup {
    fn kind(&self) -> FieldKind {
        FieldKind::Radio
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
        if self.common.is_required() && self.chosen().is_none() {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::OptionsSettings;
    use crate::state::ConfigProperty;

    #[test]
    fn required_until_chosen() {
        let mut radio = RadioGroup::new("plan", ChoiceList::from_values(["free", "pro"]))
            .with_required(true);
        assert_eq!(radio.validation_errors(), vec![ValidationErrorKind::Required]);
        assert!(radio.choose("pro"));
        assert_eq!(radio.chosen(), Some("pro"));
        assert!(radio.validation_errors().is_empty());
    }

    #[test]
    fn optional_without_choice_is_valid() {
        let radio = RadioGroup::new("plan", ChoiceList::from_values(["free", "pro"]));
        assert!(radio.validation_errors().is_empty());
        assert_eq!(FormField::value(&radio), "");
    }

    #[test]
    fn entity_encoded_options() {
        let choices = ChoiceList::from_raw(
            "[&quot;free&quot;,&quot;pro&quot;,&quot;free&quot;]",
            &OptionsSettings::default(),
        );
        let radio = RadioGroup::new("plan", choices).with_initial_value("pro");
        assert_eq!(radio.options().len(), 2);
        assert_eq!(radio.chosen(), Some("pro"));

        let errors = radio.config_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].property(), ConfigProperty::Options);
    }

    #[test]
    fn empty_key_and_bad_value_both_reported() {
        let radio = RadioGroup::new("", ChoiceList::from_values(["a"])).with_initial_value("b");
        let errors = radio.config_errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].property(), ConfigProperty::FieldKey);
        assert_eq!(errors[1].property(), ConfigProperty::Value);
    }
}
