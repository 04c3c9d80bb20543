//! Field widgets.
//!
//! Each widget owns its validation rules and configuration checks. [`Widget`]
//! wraps all of them so a document can hold a mixed population.

mod checkbox;
mod choice;
mod radio;
mod select;
mod text;
mod textarea;

use std::fmt;

pub use checkbox::Checkbox;
pub use choice::ChoiceList;
pub use radio::RadioGroup;
pub use select::Select;
pub use text::TextInput;
pub use textarea::Textarea;

use crate::contract::FormField;
use crate::rules;
use crate::state::{ConfigError, ValidationErrorKind};

/// Widget type, named after the markup tag that declares it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Input,
    Textarea,
    Select,
    Checkbox,
    Radio,
}

impl FieldKind {
    pub const ALL: [FieldKind; 5] = [
        FieldKind::Input,
        FieldKind::Textarea,
        FieldKind::Select,
        FieldKind::Checkbox,
        FieldKind::Radio,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            FieldKind::Input => "gmd-input",
            FieldKind::Textarea => "gmd-textarea",
            FieldKind::Select => "gmd-select",
            FieldKind::Checkbox => "gmd-checkbox",
            FieldKind::Radio => "gmd-radio",
        }
    }

    /// Look up a kind by tag name, ignoring ASCII case.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag().eq_ignore_ascii_case(tag.trim()))
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Properties every widget has.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldCommon {
    field_key: String,
    required: bool,
    disabled: bool,
    touched: bool,
    trim_required: bool,
}

impl FieldCommon {
    pub fn new(field_key: impl Into<String>) -> Self {
        Self {
            field_key: field_key.into(),
            ..Self::default()
        }
    }

    pub fn field_key(&self) -> &str {
        &self.field_key
    }

    pub fn set_field_key(&mut self, field_key: impl Into<String>) {
        self.field_key = field_key.into();
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    /// Mark as interacted with. There is no way back short of remounting.
    pub fn touch(&mut self) {
        self.touched = true;
    }

    pub fn set_trim_required(&mut self, trim: bool) {
        self.trim_required = trim;
    }

    /// Whether `value` fails the required rule.
    pub fn misses_required(&self, value: &str) -> bool {
        self.required && rules::is_blank(value, self.trim_required)
    }
}

/// Any of the supported widgets.
#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    Input(TextInput),
    Textarea(Textarea),
    Select(Select),
    Checkbox(Checkbox),
    Radio(RadioGroup),
}

impl Widget {
    fn as_field(&self) -> &dyn FormField {
        match self {
            Widget::Input(w) => w,
            Widget::Textarea(w) => w,
            Widget::Select(w) => w,
            Widget::Checkbox(w) => w,
            Widget::Radio(w) => w,
        }
    }

    fn as_field_mut(&mut self) -> &mut dyn FormField {
        match self {
            Widget::Input(w) => w,
            Widget::Textarea(w) => w,
            Widget::Select(w) => w,
            Widget::Checkbox(w) => w,
            Widget::Radio(w) => w,
        }
    }
}

impl FormField for Widget {
    fn kind(&self) -> FieldKind {
        self.as_field().kind()
    }

    fn common(&self) -> &FieldCommon {
        self.as_field().common()
    }

    fn common_mut(&mut self) -> &mut FieldCommon {
        self.as_field_mut().common_mut()
    }

    fn value(&self) -> String {
        self.as_field().value()
    }

    fn validation_errors(&self) -> Vec<ValidationErrorKind> {
        self.as_field().validation_errors()
    }

    fn widget_config_errors(&self) -> Vec<ConfigError> {
        self.as_field().widget_config_errors()
    }
}

impl From<TextInput> for Widget {
    fn from(w: TextInput) -> Self {
        Widget::Input(w)
    }
}

impl From<Textarea> for Widget {
    fn from(w: Textarea) -> Self {
        Widget::Textarea(w)
    }
}

impl From<Select> for Widget {
    fn from(w: Select) -> Self {
        Widget::Select(w)
    }
}

impl From<Checkbox> for Widget {
    fn from(w: Checkbox) -> Self {
        Widget::Checkbox(w)
    }
}

impl From<RadioGroup> for Widget {
    fn from(w: RadioGroup) -> Self {
        Widget::Radio(w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip() {
        for kind in FieldKind::ALL {
            assert_eq!(FieldKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(FieldKind::from_tag("GMD-INPUT"), Some(FieldKind::Input));
        assert_eq!(FieldKind::from_tag("gmd-card"), None);
    }

    #[test]
    fn required_respects_trim_policy() {
        let mut common = FieldCommon::new("k");
        assert!(!common.misses_required(""));

        common.set_required(true);
        assert!(common.misses_required(""));
        assert!(!common.misses_required("  "));

        common.set_trim_required(true);
        assert!(common.misses_required("  "));
    }

    #[test]
    fn widget_delegates() {
        let mut widget = Widget::from(Checkbox::new("agree"));
        widget.common_mut().set_required(true);
        assert_eq!(widget.kind(), FieldKind::Checkbox);
        assert_eq!(widget.value(), "false");
        assert_eq!(
            widget.validation_errors(),
            vec![ValidationErrorKind::Required]
        );
    }
}
