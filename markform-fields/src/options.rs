//! Decoding of author-supplied option lists for selects and radio groups.
//!
//! Option lists arrive as a single attribute string. Markup sanitizers may have
//! entity-encoded the quotes (`[&quot;a&quot;]`) or percent-encoded the whole
//! value, so the raw string is decoded before it is read as either a JSON array
//! or a separator-delimited list.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::{FormsError, Result};
use crate::settings::OptionsSettings;
use crate::state::{ConfigError, ConfigProperty};

/// One selectable choice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

impl ChoiceOption {
    /// Option whose label is its value.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }

    pub fn with_label(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Options after lenient parsing, plus warnings about corrections applied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedOptions {
    pub options: Vec<ChoiceOption>,
    pub warnings: Vec<ConfigError>,
}

/// Strictly decode a raw option list.
///
/// Returns an error when the decoded text looks like JSON but isn't a usable
/// array. Duplicates and list length are left alone; see [`parse_options`].
pub fn decode_options(raw: &str, settings: &OptionsSettings) -> Result<Vec<ChoiceOption>> {
    let decoded = decode_text(raw)?;
    let text = decoded.trim();

    if text.is_empty() {
        return Ok(Vec::new());
    }

    if text.starts_with('[') {
        let items: Vec<Value> = serde_json::from_str(text)?;
        return items.iter().map(option_from_json).collect();
    }

    Ok(text
        .split(settings.separator.as_str())
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ChoiceOption::new)
        .collect())
}

/// Leniently parse a raw option list.
///
/// Decoding failures degrade to an empty list. Duplicate values are dropped and
/// over-long lists truncated, each with a `normalizedValue` warning.
pub fn parse_options(raw: &str, settings: &OptionsSettings) -> ParsedOptions {
    match decode_options(raw, settings) {
        Ok(options) => normalize_options(options, settings),
        Err(e) => {
            warn!("Ignoring unreadable option list {:?}: {}", raw, e);
            ParsedOptions::default()
        }
    }
}

/// Deduplicate by value (first occurrence wins) and enforce `max_options`.
///
/// Every warning reports the final list as its normalized value.
pub fn normalize_options(options: Vec<ChoiceOption>, settings: &OptionsSettings) -> ParsedOptions {
    let total = options.len();
    let mut unique: Vec<ChoiceOption> = Vec::with_capacity(total);
    for option in options {
        if !unique.iter().any(|o| o.value == option.value) {
            unique.push(option);
        }
    }

    let mut messages = Vec::new();
    if unique.len() < total {
        messages.push(format!(
            "{} duplicate option(s) removed",
            total - unique.len()
        ));
    }
    if unique.len() > settings.max_options {
        messages.push(format!(
            "{} options exceed the limit; only the first {} are kept",
            unique.len(),
            settings.max_options
        ));
        unique.truncate(settings.max_options);
    }

    let kept = unique
        .iter()
        .map(|o| o.value.as_str())
        .collect::<Vec<_>>()
        .join(&settings.separator);
    let warnings = messages
        .into_iter()
        .map(|message| ConfigError::normalized(ConfigProperty::Options, message, kept.as_str()))
        .collect();

    ParsedOptions {
        options: unique,
        warnings,
    }
}

fn decode_text(raw: &str) -> Result<Cow<'_, str>> {
    let unescaped = html_escape::decode_html_entities(raw);
    if !has_percent_escape(&unescaped) {
        return Ok(unescaped);
    }
    let decoded = urlencoding::decode(&unescaped)?.into_owned();
    Ok(Cow::Owned(decoded))
}

fn has_percent_escape(text: &str) -> bool {
    text.as_bytes()
        .windows(3)
        .any(|w| w[0] == b'%' && w[1].is_ascii_hexdigit() && w[2].is_ascii_hexdigit())
}

fn option_from_json(item: &Value) -> Result<ChoiceOption> {
    match item {
        Value::Object(map) => {
            let value = map
                .get("value")
                .and_then(scalar_text)
                .ok_or_else(|| FormsError::UnsupportedOption {
                    entry: item.to_string(),
                })?;
            let label = map
                .get("label")
                .and_then(scalar_text)
                .unwrap_or_else(|| value.clone());
            Ok(ChoiceOption { value, label })
        }
        other => scalar_text(other)
            .map(ChoiceOption::new)
            .ok_or_else(|| FormsError::UnsupportedOption {
                entry: item.to_string(),
            }),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ConfigErrorCode;
    use rstest::rstest;

    fn values(parsed: &ParsedOptions) -> Vec<&str> {
        parsed.options.iter().map(|o| o.value.as_str()).collect()
    }

    #[rstest]
    #[case(r#"["dev", "prod"]"#, &["dev", "prod"])]
    #[case("[&quot;dev&quot;, &quot;prod&quot;]", &["dev", "prod"])]
    #[case("%5B%22dev%22%2C%22prod%22%5D", &["dev", "prod"])]
    #[case("dev, prod ,", &["dev", "prod"])]
    #[case("[1, true, \"x\"]", &["1", "true", "x"])]
    #[case("", &[])]
    #[case("   ", &[])]
    fn decodes_supported_representations(#[case] raw: &str, #[case] expected: &[&str]) {
        let parsed = parse_options(raw, &OptionsSettings::default());
        assert_eq!(values(&parsed), expected);
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn object_entries_keep_labels() {
        let raw = r#"[{"value": "eu", "label": "Europe"}, {"value": 2}]"#;
        let parsed = parse_options(raw, &OptionsSettings::default());
        assert_eq!(
            parsed.options,
            vec![
                ChoiceOption::with_label("eu", "Europe"),
                ChoiceOption::new("2"),
            ]
        );
    }

    #[rstest]
    #[case("[\"unterminated\"")]
    #[case("[[1, 2]]")]
    #[case("[{\"label\": \"no value\"}]")]
    #[case("%5B%FF%FE%5D")]
    fn garbage_degrades_to_empty(#[case] raw: &str) {
        let parsed = parse_options(raw, &OptionsSettings::default());
        assert!(parsed.options.is_empty());
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn strict_decode_reports_errors() {
        let err = decode_options("[\"a\",", &OptionsSettings::default()).unwrap_err();
        assert!(matches!(err, FormsError::OptionsJson(_)));

        let err = decode_options("[null]", &OptionsSettings::default()).unwrap_err();
        assert!(matches!(err, FormsError::UnsupportedOption { .. }));
    }

    #[test]
    fn literal_percent_is_not_decoded() {
        let parsed = parse_options("10%, 20%", &OptionsSettings::default());
        assert_eq!(values(&parsed), vec!["10%", "20%"]);
    }

    #[test]
    fn custom_separator() {
        let settings = OptionsSettings {
            separator: "|".into(),
            ..OptionsSettings::default()
        };
        let parsed = parse_options("a, b|c", &settings);
        assert_eq!(values(&parsed), vec!["a, b", "c"]);
    }

    #[test]
    fn duplicates_are_removed_with_warning() {
        let parsed = parse_options("a,b,a,c,b", &OptionsSettings::default());
        assert_eq!(values(&parsed), vec!["a", "b", "c"]);
        assert_eq!(parsed.warnings.len(), 1);
        let warning = &parsed.warnings[0];
        assert_eq!(warning.code(), ConfigErrorCode::NormalizedValue);
        assert_eq!(warning.property(), ConfigProperty::Options);
        assert_eq!(warning.normalized_to(), Some("a,b,c"));
    }

    #[test]
    fn long_lists_are_truncated_with_warning() {
        let settings = OptionsSettings {
            max_options: 2,
            ..OptionsSettings::default()
        };
        let parsed = parse_options("a,b,c", &settings);
        assert_eq!(values(&parsed), vec!["a", "b"]);
        assert_eq!(parsed.warnings.len(), 1);
        assert_eq!(parsed.warnings[0].normalized_to(), Some("a,b"));
    }

    #[test]
    fn both_warnings_report_the_list_that_was_kept() {
        let settings = OptionsSettings {
            max_options: 2,
            ..OptionsSettings::default()
        };
        let parsed = parse_options("a,a,b,c", &settings);
        assert_eq!(values(&parsed), vec!["a", "b"]);
        assert_eq!(parsed.warnings.len(), 2);
        assert!(parsed
            .warnings
            .iter()
            .all(|w| w.normalized_to() == Some("a,b")));
    }
}
