//! Field state snapshots and the two error taxonomies they carry.
//!
//! A [`FieldState`] is what one mounted field pushes to its sink. It carries
//! end-user validation errors ([`ValidationErrorKind`]) and author-facing
//! configuration diagnostics ([`ConfigError`]) in two separate lists so that
//! consumers can render either one without filtering the other out.

use std::fmt;

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Identity of one mounted field instance.
///
/// Allocated when the field mounts and stable until it is dropped. This is
/// never the author-chosen `fieldKey`; two instances may share a key but never
/// an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(Ulid);

impl FieldId {
    /// Allocate a fresh identity.
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// The underlying ULID.
    pub fn as_ulid(&self) -> Ulid {
        self.0
    }
}

impl Default for FieldId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// End-user validation failures, declared in rule-check order.
///
/// The derived `Ord` follows declaration order, which is also the order in
/// which widgets evaluate their rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationErrorKind {
    Required,
    MinLength,
    MaxLength,
    Pattern,
}

impl ValidationErrorKind {
    /// Short message suitable for showing next to the field.
    pub fn message(&self) -> &'static str {
        match self {
            ValidationErrorKind::Required => "This field is required",
            ValidationErrorKind::MinLength => "Value is too short",
            ValidationErrorKind::MaxLength => "Value is too long",
            ValidationErrorKind::Pattern => "Value does not match the expected format",
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Severity of a configuration diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSeverity {
    /// The field can't be reliably correlated or a rule can't be applied
    Error,
    /// An automatic correction was applied
    Warning,
}

/// Trait for diagnostics that have a severity level
///
/// Configuration codes have a fixed severity; implementing this trait keeps the
/// mapping in one place.
///
/// ```
/// use markform_fields::{ConfigErrorCode, ConfigSeverity, Severity};
///
/// assert_eq!(ConfigErrorCode::DuplicateKey.severity(), ConfigSeverity::Error);
/// assert_eq!(ConfigErrorCode::NormalizedValue.severity(), ConfigSeverity::Warning);
/// ```
pub trait Severity {
    /// Get the severity level of this diagnostic
    fn severity(&self) -> ConfigSeverity;

    /// Whether this diagnostic is error severity
    fn is_critical(&self) -> bool {
        self.severity() == ConfigSeverity::Error
    }
}

/// Kind of configuration mistake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConfigErrorCode {
    /// Pattern failed to compile; the rule is not enforced
    InvalidRegex,
    /// Field key is empty or whitespace; the value can't be correlated
    EmptyFieldKey,
    /// Several fields share one key
    DuplicateKey,
    /// An author-supplied value was corrected automatically
    NormalizedValue,
}

impl Severity for ConfigErrorCode {
    fn severity(&self) -> ConfigSeverity {
        match self {
            ConfigErrorCode::InvalidRegex
            | ConfigErrorCode::EmptyFieldKey
            | ConfigErrorCode::DuplicateKey => ConfigSeverity::Error,
            ConfigErrorCode::NormalizedValue => ConfigSeverity::Warning,
        }
    }
}

/// The field declaration property a configuration diagnostic points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConfigProperty {
    FieldKey,
    Pattern,
    MinLength,
    MaxLength,
    Options,
    Value,
}

impl ConfigProperty {
    /// Attribute name as written in markup.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigProperty::FieldKey => "fieldKey",
            ConfigProperty::Pattern => "pattern",
            ConfigProperty::MinLength => "minLength",
            ConfigProperty::MaxLength => "maxLength",
            ConfigProperty::Options => "options",
            ConfigProperty::Value => "value",
        }
    }
}

impl fmt::Display for ConfigProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An author-facing diagnostic about how a field was declared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigError {
    code: ConfigErrorCode,
    message: String,
    severity: ConfigSeverity,
    property: ConfigProperty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    normalized_to: Option<String>,
}

impl ConfigError {
    /// Build a diagnostic whose severity follows from its code.
    pub fn new(code: ConfigErrorCode, property: ConfigProperty, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            severity: code.severity(),
            property,
            normalized_to: None,
        }
    }

    /// Warning that `property` was auto-corrected to `normalized_to`.
    pub fn normalized(
        property: ConfigProperty,
        message: impl Into<String>,
        normalized_to: impl Into<String>,
    ) -> Self {
        Self {
            normalized_to: Some(normalized_to.into()),
            ..Self::new(ConfigErrorCode::NormalizedValue, property, message)
        }
    }

    pub fn empty_field_key() -> Self {
        Self::new(
            ConfigErrorCode::EmptyFieldKey,
            ConfigProperty::FieldKey,
            "fieldKey is empty; the value cannot be matched to a schema",
        )
    }

    pub fn invalid_regex(pattern: &str, reason: impl fmt::Display) -> Self {
        Self::new(
            ConfigErrorCode::InvalidRegex,
            ConfigProperty::Pattern,
            format!("pattern \"{pattern}\" is not a valid regular expression and is not enforced: {reason}"),
        )
    }

    pub fn duplicate_key(key: &str, count: usize) -> Self {
        Self::new(
            ConfigErrorCode::DuplicateKey,
            ConfigProperty::FieldKey,
            format!("fieldKey \"{key}\" is used by {count} fields"),
        )
    }

    pub fn code(&self) -> ConfigErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn property(&self) -> ConfigProperty {
        self.property
    }

    pub fn normalized_to(&self) -> Option<&str> {
        self.normalized_to.as_deref()
    }
}

impl Severity for ConfigError {
    fn severity(&self) -> ConfigSeverity {
        self.severity
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property, self.message)
    }
}

/// Snapshot of one mounted field.
///
/// `valid` is derived from `validation_errors` and can't be set directly, so a
/// state is valid exactly when it has no validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldState {
    id: FieldId,
    field_key: String,
    value: String,
    valid: bool,
    required: bool,
    touched: bool,
    validation_errors: Vec<ValidationErrorKind>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    config_errors: Vec<ConfigError>,
}

impl FieldState {
    /// A valid, untouched, optional state with an empty value.
    pub fn new(id: FieldId, field_key: impl Into<String>) -> Self {
        Self {
            id,
            field_key: field_key.into(),
            value: String::new(),
            valid: true,
            required: false,
            touched: false,
            validation_errors: Vec::new(),
            config_errors: Vec::new(),
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_touched(mut self, touched: bool) -> Self {
        self.touched = touched;
        self
    }

    /// Add a validation error. Repeats are ignored; order of first insertion
    /// is kept.
    pub fn with_validation_error(mut self, kind: ValidationErrorKind) -> Self {
        if !self.validation_errors.contains(&kind) {
            self.validation_errors.push(kind);
        }
        self.valid = false;
        self
    }

    pub fn with_validation_errors(
        self,
        kinds: impl IntoIterator<Item = ValidationErrorKind>,
    ) -> Self {
        kinds
            .into_iter()
            .fold(self, |state, kind| state.with_validation_error(kind))
    }

    pub fn with_config_error(mut self, error: ConfigError) -> Self {
        self.config_errors.push(error);
        self
    }

    pub fn with_config_errors(mut self, errors: impl IntoIterator<Item = ConfigError>) -> Self {
        self.config_errors.extend(errors);
        self
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn field_key(&self) -> &str {
        &self.field_key
    }

    /// The key used for correlation: trimmed, or `None` when blank.
    pub fn correlation_key(&self) -> Option<&str> {
        let key = self.field_key.trim();
        (!key.is_empty()).then_some(key)
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn validation_errors(&self) -> &[ValidationErrorKind] {
        &self.validation_errors
    }

    /// Validation errors to show the end user: none until the field is touched.
    pub fn visible_validation_errors(&self) -> &[ValidationErrorKind] {
        if self.touched {
            &self.validation_errors
        } else {
            &[]
        }
    }

    pub fn config_errors(&self) -> &[ConfigError] {
        &self.config_errors
    }

    pub fn has_critical_config_errors(&self) -> bool {
        self.config_errors.iter().any(|e| e.is_critical())
    }
}
