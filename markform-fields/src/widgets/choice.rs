//! Option lists shared by selects and radio groups.

use crate::options::{normalize_options, parse_options, ChoiceOption};
use crate::settings::OptionsSettings;
use crate::state::{ConfigError, ConfigProperty};

/// Deduplicated options plus the warnings produced while building them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChoiceList {
    options: Vec<ChoiceOption>,
    warnings: Vec<ConfigError>,
}

impl ChoiceList {
    /// Parse an author-supplied raw list. Unreadable input yields no options.
    pub fn from_raw(raw: &str, settings: &OptionsSettings) -> Self {
        let parsed = parse_options(raw, settings);
        Self {
            options: parsed.options,
            warnings: parsed.warnings,
        }
    }

    /// Build from already-typed options, applying the same normalization.
    pub fn from_options(options: impl IntoIterator<Item = ChoiceOption>) -> Self {
        let parsed = normalize_options(options.into_iter().collect(), &OptionsSettings::default());
        Self {
            options: parsed.options,
            warnings: parsed.warnings,
        }
    }

    /// Options whose label equals their value.
    pub fn from_values<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::from_options(values.into_iter().map(ChoiceOption::new))
    }

    pub fn options(&self) -> &[ChoiceOption] {
        &self.options
    }

    pub fn warnings(&self) -> &[ConfigError] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }

    /// Check an author-provided value against the list.
    ///
    /// Unknown values are reset to empty ("nothing chosen") with a warning.
    pub fn normalize_value(&self, value: &str) -> (String, Option<ConfigError>) {
        if value.is_empty() || self.contains(value) {
            return (value.to_string(), None);
        }
        let warning = ConfigError::normalized(
            ConfigProperty::Value,
            format!("value \"{value}\" is not one of the options; nothing is selected"),
            "",
        );
        (String::new(), Some(warning))
    }
}
