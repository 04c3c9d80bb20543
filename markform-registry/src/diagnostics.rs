//! Diagnostics derived from a population of field states.
//!
//! Everything here is a pure function of one snapshot. Nothing is tracked
//! incrementally: populations are small and a full pass keeps cross-field
//! results such as duplicate keys correct under any push order.

use indexmap::IndexMap;
use serde::Serialize;

use markform_fields::{
    ConfigError, ConfigSeverity, FieldId, FieldState, Severity, ValidationErrorKind,
};

/// A field that currently fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidField {
    pub id: FieldId,
    pub field_key: String,
    pub validation_errors: Vec<ValidationErrorKind>,
}

/// A field's current value, for debug and preview surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValue {
    pub id: FieldId,
    pub field_key: String,
    pub value: String,
}

/// A key shared by more than one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateKey {
    pub key: String,
    pub count: usize,
}

/// A configuration diagnostic annotated with the field it belongs to.
///
/// Synthesized duplicate-key errors belong to no single field, so `field_id`
/// is `None` for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfigError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_id: Option<FieldId>,
    pub field_key: String,
    #[serde(flatten)]
    pub error: ConfigError,
}

impl Severity for FieldConfigError {
    fn severity(&self) -> ConfigSeverity {
        self.error.severity()
    }
}

/// All diagnostics for one population snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDiagnostics {
    form_valid: bool,
    required_fields: usize,
    valid_required_fields: usize,
    invalid_fields: Vec<InvalidField>,
    field_values: Vec<FieldValue>,
    duplicate_keys: Vec<DuplicateKey>,
    config_errors: Vec<FieldConfigError>,
}

impl FormDiagnostics {
    /// Compute every diagnostic in one pass over `states`.
    pub fn compute<'a>(states: impl IntoIterator<Item = &'a FieldState> + Clone) -> Self {
        let mut required_fields = 0;
        let mut valid_required_fields = 0;
        let mut invalid_fields = Vec::new();
        let mut field_values = Vec::new();
        let mut own_errors = Vec::new();

        for state in states.clone() {
            if state.is_required() {
                required_fields += 1;
                if state.is_valid() {
                    valid_required_fields += 1;
                }
            }
            if !state.is_valid() {
                invalid_fields.push(InvalidField {
                    id: state.id(),
                    field_key: state.field_key().to_string(),
                    validation_errors: state.validation_errors().to_vec(),
                });
            }
            field_values.push(FieldValue {
                id: state.id(),
                field_key: state.field_key().to_string(),
                value: state.value().to_string(),
            });
            own_errors.extend(state.config_errors().iter().map(|error| FieldConfigError {
                field_id: Some(state.id()),
                field_key: state.field_key().to_string(),
                error: error.clone(),
            }));
        }

        let duplicate_keys = duplicate_field_keys(states);
        let mut config_errors: Vec<FieldConfigError> = duplicate_keys
            .iter()
            .map(|dup| FieldConfigError {
                field_id: None,
                field_key: dup.key.clone(),
                error: ConfigError::duplicate_key(&dup.key, dup.count),
            })
            .collect();
        config_errors.append(&mut own_errors);

        Self {
            form_valid: valid_required_fields == required_fields,
            required_fields,
            valid_required_fields,
            invalid_fields,
            field_values,
            duplicate_keys,
            config_errors,
        }
    }

    /// True iff every required field is valid. Optional fields never count.
    pub fn is_form_valid(&self) -> bool {
        self.form_valid
    }

    pub fn required_fields_count(&self) -> usize {
        self.required_fields
    }

    pub fn valid_required_fields_count(&self) -> usize {
        self.valid_required_fields
    }

    pub fn invalid_fields(&self) -> &[InvalidField] {
        &self.invalid_fields
    }

    pub fn field_values(&self) -> &[FieldValue] {
        &self.field_values
    }

    pub fn duplicate_field_keys(&self) -> &[DuplicateKey] {
        &self.duplicate_keys
    }

    /// Synthesized duplicate-key errors first, then each field's own.
    pub fn all_config_errors(&self) -> &[FieldConfigError] {
        &self.config_errors
    }

    pub fn critical_config_errors(&self) -> Vec<&FieldConfigError> {
        self.config_errors.iter().filter(|e| e.is_critical()).collect()
    }

    pub fn config_warnings(&self) -> Vec<&FieldConfigError> {
        self.config_errors.iter().filter(|e| !e.is_critical()).collect()
    }

    /// "N/M required fields filled", for status bars.
    pub fn summary(&self) -> String {
        format!(
            "{}/{} required fields filled",
            self.valid_required_fields, self.required_fields
        )
    }
}

/// Group states by trimmed, non-empty key and report groups larger than one,
/// in order of first appearance.
pub fn duplicate_field_keys<'a>(
    states: impl IntoIterator<Item = &'a FieldState>,
) -> Vec<DuplicateKey> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for key in states.into_iter().filter_map(FieldState::correlation_key) {
        *counts.entry(key).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(key, count)| DuplicateKey {
            key: key.to_string(),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use markform_fields::{ConfigErrorCode, ConfigProperty};

    fn state(key: &str) -> FieldState {
        FieldState::new(FieldId::new(), key)
    }

    #[test]
    fn empty_population_is_valid() {
        let diagnostics = FormDiagnostics::compute(&Vec::<FieldState>::new());
        assert!(diagnostics.is_form_valid());
        assert_eq!(diagnostics.required_fields_count(), 0);
        assert!(diagnostics.all_config_errors().is_empty());
        assert_eq!(diagnostics.summary(), "0/0 required fields filled");
    }

    #[test]
    fn optional_invalid_fields_do_not_block() {
        let states = vec![
            state("a").with_required(true),
            state("b").with_validation_error(ValidationErrorKind::Pattern),
        ];
        let diagnostics = FormDiagnostics::compute(&states);
        assert!(diagnostics.is_form_valid());
        assert_eq!(diagnostics.invalid_fields().len(), 1);
        assert_eq!(diagnostics.invalid_fields()[0].field_key, "b");
    }

    #[test]
    fn required_invalid_field_blocks() {
        let states = vec![
            state("a").with_required(true),
            state("b")
                .with_required(true)
                .with_validation_error(ValidationErrorKind::Required),
        ];
        let diagnostics = FormDiagnostics::compute(&states);
        assert!(!diagnostics.is_form_valid());
        assert_eq!(diagnostics.required_fields_count(), 2);
        assert_eq!(diagnostics.valid_required_fields_count(), 1);
        assert_eq!(diagnostics.summary(), "1/2 required fields filled");
    }

    #[test]
    fn duplicates_ignore_blank_keys_and_trim() {
        let states = vec![
            state("email"),
            state(" email "),
            state(""),
            state("   "),
            state(""),
            state("name"),
        ];
        assert_eq!(
            duplicate_field_keys(&states),
            vec![DuplicateKey {
                key: "email".into(),
                count: 2
            }]
        );
    }

    #[test]
    fn duplicate_errors_come_first_and_are_critical() {
        let states = vec![
            state("email").with_config_error(ConfigError::normalized(
                ConfigProperty::MinLength,
                "clamped",
                "0",
            )),
            state("email"),
        ];
        let diagnostics = FormDiagnostics::compute(&states);
        let all = diagnostics.all_config_errors();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].error.code(), ConfigErrorCode::DuplicateKey);
        assert_eq!(all[0].error.property(), ConfigProperty::FieldKey);
        assert_eq!(all[0].field_id, None);
        assert_eq!(all[1].field_id, Some(states[0].id()));
        assert_eq!(all[1].field_key, "email");

        assert_eq!(diagnostics.critical_config_errors().len(), 1);
        assert_eq!(diagnostics.config_warnings().len(), 1);
        assert_eq!(
            diagnostics.config_warnings()[0].severity(),
            ConfigSeverity::Warning
        );
    }

    #[test]
    fn field_values_cover_every_entry() {
        let states = vec![state("a").with_value("1"), state("").with_value("2")];
        let diagnostics = FormDiagnostics::compute(&states);
        let values: Vec<&str> = diagnostics
            .field_values()
            .iter()
            .map(|v| v.value.as_str())
            .collect();
        assert_eq!(values, vec!["1", "2"]);
    }

    #[test]
    fn serializes_for_consumers() {
        let states = vec![state("a"), state("a")];
        let json = serde_json::to_value(FormDiagnostics::compute(&states)).unwrap();
        assert_eq!(json["formValid"], true);
        assert_eq!(json["duplicateKeys"][0]["count"], 2);
        assert_eq!(json["configErrors"][0]["code"], "duplicateKey");
        assert_eq!(json["configErrors"][0]["fieldKey"], "a");
    }
}
