//! Turning parsed field directives into widgets.
//!
//! The markup parser (not part of this crate) yields one [`FieldDirective`] per
//! field tag it finds. [`WidgetFactory`] reads the attributes and builds the
//! matching widget, collecting configuration warnings for anything it had to
//! correct.

use std::collections::BTreeMap;

use tracing::debug;

use crate::contract::FormField;
use crate::rules::{LengthBounds, Normalized};
use crate::settings::FormSettings;
use crate::widgets::{
    Checkbox, ChoiceList, FieldKind, RadioGroup, Select, Textarea, TextInput, Widget,
};

/// A field tag and its attributes, as found in the document.
///
/// Attribute names are stored lowercase; DOM parsers lowercase them anyway
/// (`fieldKey` arrives as `fieldkey`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldDirective {
    tag: String,
    attributes: BTreeMap<String, String>,
}

impl FieldDirective {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        self.attributes
            .insert(name.trim().to_ascii_lowercase(), value.into());
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn kind(&self) -> Option<FieldKind> {
        FieldKind::from_tag(&self.tag)
    }

    /// Attribute value, looked up case-insensitively.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Boolean attribute. Present means true unless spelled `false`.
    pub fn flag(&self, name: &str) -> bool {
        self.attribute(name)
            .is_some_and(|v| !v.trim().eq_ignore_ascii_case("false"))
    }
}

/// Builds widgets from directives using one set of settings.
#[derive(Debug, Clone, Default)]
pub struct WidgetFactory {
    settings: FormSettings,
}

impl WidgetFactory {
    pub fn new(settings: FormSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &FormSettings {
        &self.settings
    }

    /// Build the widget for `directive`, or `None` for tags that aren't fields.
    pub fn instantiate(&self, directive: &FieldDirective) -> Option<Widget> {
        let Some(kind) = directive.kind() else {
            debug!(tag = directive.tag(), "ignoring directive that is not a field");
            return None;
        };

        let key = directive.attribute("fieldKey").unwrap_or_default();
        let value = directive.attribute("value").unwrap_or_default();

        let mut widget: Widget = match kind {
            FieldKind::Input => {
                let mut input = TextInput::new(key)
                    .with_value(value)
                    .with_pattern(directive.attribute("pattern").unwrap_or_default());
                input.set_bounds(self.bounds(directive));
                input.into()
            }
            FieldKind::Textarea => {
                let mut area = Textarea::new(key).with_value(value);
                area.set_bounds(self.bounds(directive));
                area.into()
            }
            FieldKind::Select => Select::new(key, self.choices(directive))
                .with_initial_value(value)
                .into(),
            FieldKind::Radio => RadioGroup::new(key, self.choices(directive))
                .with_initial_value(value)
                .into(),
            FieldKind::Checkbox => {
                // A bare `checked` attribute is plain HTML; only `value` is coerced
                let checkbox = match directive.attribute("value") {
                    Some(raw) => Checkbox::new(key).with_raw_value(raw),
                    None => Checkbox::new(key),
                };
                if directive.attribute("checked").is_some() {
                    checkbox.with_checked(directive.flag("checked")).into()
                } else {
                    checkbox.into()
                }
            }
        };

        let common = widget.common_mut();
        common.set_required(directive.flag("required"));
        common.set_disabled(directive.flag("disabled"));
        common.set_trim_required(self.settings.validation.trim_required);

        Some(widget)
    }

    fn bounds(&self, directive: &FieldDirective) -> Normalized<LengthBounds> {
        LengthBounds::from_raw(
            directive.attribute("minLength"),
            directive.attribute("maxLength"),
        )
    }

    fn choices(&self, directive: &FieldDirective) -> ChoiceList {
        ChoiceList::from_raw(
            directive.attribute("options").unwrap_or_default(),
            &self.settings.options,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ConfigErrorCode, ConfigProperty, FieldId, ValidationErrorKind};

    #[test]
    fn attribute_lookup_ignores_case() {
        let directive = FieldDirective::new("gmd-input").with_attribute("fieldkey", "consumer_email");
        assert_eq!(directive.attribute("fieldKey"), Some("consumer_email"));
        assert_eq!(directive.attribute("FIELDKEY"), Some("consumer_email"));
    }

    #[test]
    fn flags() {
        let directive = FieldDirective::new("gmd-input")
            .with_attribute("required", "")
            .with_attribute("disabled", "false");
        assert!(directive.flag("required"));
        assert!(!directive.flag("disabled"));
        assert!(!directive.flag("readonly"));
    }

    #[test]
    fn unknown_tag_is_not_a_field() {
        let factory = WidgetFactory::default();
        assert!(factory.instantiate(&FieldDirective::new("gmd-card")).is_none());
    }

    #[test]
    fn input_from_attributes() {
        let directive = FieldDirective::new("gmd-input")
            .with_attribute("name", "email")
            .with_attribute("required", "true")
            .with_attribute("fieldkey", "consumer_email")
            .with_attribute("minlength", "5")
            .with_attribute("pattern", ".+@.+");
        let widget = WidgetFactory::default().instantiate(&directive).unwrap();
        assert_eq!(widget.kind(), FieldKind::Input);

        let state = widget.state(FieldId::new());
        assert_eq!(state.field_key(), "consumer_email");
        assert!(state.is_required());
        assert_eq!(state.validation_errors(), &[ValidationErrorKind::Required]);
        assert!(state.config_errors().is_empty());
    }

    #[test]
    fn select_from_json_options() {
        let directive = FieldDirective::new("gmd-select")
            .with_attribute("fieldKey", "environment")
            .with_attribute("options", r#"["dev", "prod"]"#)
            .with_attribute("value", "prod");
        let Some(Widget::Select(select)) = WidgetFactory::default().instantiate(&directive) else {
            panic!("expected a select");
        };
        assert_eq!(select.options().len(), 2);
        assert_eq!(select.selected(), "prod");
    }

    #[test]
    fn checkbox_reads_checked_attribute() {
        let directive = FieldDirective::new("gmd-checkbox")
            .with_attribute("fieldKey", "agree")
            .with_attribute("checked", "");
        let widget = WidgetFactory::default().instantiate(&directive).unwrap();
        assert_eq!(widget.value(), "true");
        assert!(widget.config_errors().is_empty());
    }

    #[test]
    fn checkbox_coerces_value_attribute() {
        let directive = FieldDirective::new("gmd-checkbox")
            .with_attribute("fieldKey", "agree")
            .with_attribute("value", "yes");
        let widget = WidgetFactory::default().instantiate(&directive).unwrap();
        assert_eq!(widget.value(), "true");
        let errors = widget.config_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code(), ConfigErrorCode::NormalizedValue);
    }

    #[test]
    fn plain_checkbox_has_no_warnings() {
        let directive = FieldDirective::new("gmd-checkbox").with_attribute("fieldKey", "agree");
        let widget = WidgetFactory::default().instantiate(&directive).unwrap();
        assert_eq!(widget.value(), "false");
        assert!(widget.config_errors().is_empty());
    }

    #[test]
    fn textarea_bad_bounds_warn() {
        let directive = FieldDirective::new("gmd-textarea")
            .with_attribute("fieldKey", "bio")
            .with_attribute("maxLength", "lots");
        let widget = WidgetFactory::default().instantiate(&directive).unwrap();
        let errors = widget.config_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].property(), ConfigProperty::MaxLength);
    }

    #[test]
    fn missing_key_and_disabled() {
        let directive = FieldDirective::new("gmd-radio")
            .with_attribute("options", "a,b")
            .with_attribute("disabled", "disabled");
        let widget = WidgetFactory::default().instantiate(&directive).unwrap();
        assert!(widget.is_disabled());
        assert_eq!(
            widget.config_errors()[0].code(),
            ConfigErrorCode::EmptyFieldKey
        );
    }

    #[test]
    fn settings_flow_into_widgets() {
        let mut settings = FormSettings::default();
        settings.validation.trim_required = true;
        settings.options.separator = ";".into();
        let factory = WidgetFactory::new(settings);

        let input = factory
            .instantiate(
                &FieldDirective::new("gmd-input")
                    .with_attribute("fieldKey", "name")
                    .with_attribute("required", "")
                    .with_attribute("value", "   "),
            )
            .unwrap();
        assert_eq!(input.validation_errors(), vec![ValidationErrorKind::Required]);

        let Some(Widget::Radio(radio)) = factory.instantiate(
            &FieldDirective::new("gmd-radio")
                .with_attribute("fieldKey", "size")
                .with_attribute("options", "S;M;L"),
        ) else {
            panic!("expected a radio group");
        };
        assert_eq!(radio.options().len(), 3);
    }
}
