//! From raw directives to the states a document would report.

use markform_fields::{
    ConfigErrorCode, ConfigProperty, FieldDirective, FieldId, FieldKind, FormField, FormSettings,
    ValidationErrorKind, Widget, WidgetFactory,
};
use rstest::rstest;

fn instantiate(directive: FieldDirective) -> Widget {
    WidgetFactory::default()
        .instantiate(&directive)
        .expect("directive should describe a field")
}

#[rstest]
#[case("gmd-input", FieldKind::Input)]
#[case("GMD-TEXTAREA", FieldKind::Textarea)]
#[case("gmd-select", FieldKind::Select)]
#[case("gmd-checkbox", FieldKind::Checkbox)]
#[case("gmd-radio", FieldKind::Radio)]
fn every_field_tag_builds_a_widget(#[case] tag: &str, #[case] kind: FieldKind) {
    let widget = instantiate(FieldDirective::new(tag).with_attribute("fieldkey", "k"));
    assert_eq!(widget.kind(), kind);
    assert_eq!(widget.state(FieldId::new()).field_key(), "k");
}

#[rstest]
#[case::json(r#"["a","b","c"]"#)]
#[case::entities("[&quot;a&quot;,&quot;b&quot;,&quot;c&quot;]")]
#[case::percent("%5B%22a%22%2C%22b%22%2C%22c%22%5D")]
#[case::separated("a, b ,c")]
fn option_encodings(#[case] raw: &str) {
    let Widget::Select(select) = instantiate(
        FieldDirective::new("gmd-select")
            .with_attribute("fieldKey", "letters")
            .with_attribute("options", raw),
    ) else {
        panic!("expected a select");
    };
    let values: Vec<&str> = select.options().iter().map(|o| o.value.as_str()).collect();
    assert_eq!(values, vec!["a", "b", "c"]);
    assert!(select.config_errors().is_empty());
}

#[test_log::test]
fn garbage_options_degrade_to_an_empty_list() {
    let Widget::Radio(radio) = instantiate(
        FieldDirective::new("gmd-radio")
            .with_attribute("fieldKey", "size")
            .with_attribute("options", "[\"S\", "),
    ) else {
        panic!("expected a radio group");
    };
    assert!(radio.options().is_empty());
}

#[test_log::test]
fn text_input_reports_failures_in_rule_order() {
    let widget = instantiate(
        FieldDirective::new("gmd-input")
            .with_attribute("fieldKey", "code")
            .with_attribute("minLength", "4")
            .with_attribute("pattern", "[0-9]+")
            .with_attribute("value", "ab"),
    );
    assert_eq!(
        widget.validation_errors(),
        vec![ValidationErrorKind::MinLength, ValidationErrorKind::Pattern]
    );
    let state = widget.state(FieldId::new());
    assert!(!state.is_valid());
    assert!(state.visible_validation_errors().is_empty());
}

#[test_log::test]
fn author_mistakes_become_config_errors() {
    let widget = instantiate(
        FieldDirective::new("gmd-input")
            .with_attribute("fieldKey", "  ")
            .with_attribute("minLength", "-3")
            .with_attribute("pattern", "[a-"),
    );
    let codes: Vec<(ConfigErrorCode, ConfigProperty)> = widget
        .config_errors()
        .iter()
        .map(|e| (e.code(), e.property()))
        .collect();
    assert_eq!(
        codes,
        vec![
            (ConfigErrorCode::EmptyFieldKey, ConfigProperty::FieldKey),
            (ConfigErrorCode::NormalizedValue, ConfigProperty::MinLength),
            (ConfigErrorCode::InvalidRegex, ConfigProperty::Pattern),
        ]
    );
    // configuration problems never make the value invalid
    assert!(widget.validation_errors().is_empty());
}

#[test_log::test]
fn whitespace_counts_as_empty_only_when_configured() {
    let directive = FieldDirective::new("gmd-textarea")
        .with_attribute("fieldKey", "bio")
        .with_attribute("required", "required")
        .with_attribute("value", "  \n ");

    let lenient = WidgetFactory::default().instantiate(&directive).unwrap();
    assert!(lenient.validation_errors().is_empty());

    let mut settings = FormSettings::default();
    settings.validation.trim_required = true;
    let strict = WidgetFactory::new(settings).instantiate(&directive).unwrap();
    assert_eq!(strict.validation_errors(), vec![ValidationErrorKind::Required]);
}
