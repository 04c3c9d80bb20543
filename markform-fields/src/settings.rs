//! Settings for widget construction, loaded with Figment.
//!
//! Sources are merged in precedence order (later sources override earlier
//! ones):
//! 1. Built-in defaults
//! 2. An optional settings file (TOML, YAML or JSON, chosen by extension)
//! 3. Environment variables prefixed with `MARKFORM_`, nested keys split on `__`
//!    (e.g. `MARKFORM_OPTIONS__MAX_OPTIONS=50`)

use std::path::Path;

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{FormsError, Result};

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "MARKFORM_";

/// Settings shared by every widget created for a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FormSettings {
    pub options: OptionsSettings,
    pub validation: ValidationSettings,
}

/// How raw option lists for selects and radio groups are read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionsSettings {
    /// Separator for plain (non-JSON) option lists
    pub separator: String,
    /// Longer lists are truncated with a warning
    pub max_options: usize,
}

impl Default for OptionsSettings {
    fn default() -> Self {
        Self {
            separator: ",".to_string(),
            max_options: 500,
        }
    }
}

/// Validation policy knobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ValidationSettings {
    /// Treat whitespace-only values as empty for the required check
    pub trim_required: bool,
}

impl FormSettings {
    /// Load settings from defaults, an optional file, and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let settings: FormSettings = Self::figment(path)?.extract()?;
        settings.check()?;
        debug!(
            separator = %settings.options.separator,
            max_options = settings.options.max_options,
            trim_required = settings.validation.trim_required,
            "form settings loaded"
        );
        Ok(settings)
    }

    /// Build the figment with all sources in precedence order.
    pub fn figment(path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::new().merge(Serialized::defaults(FormSettings::default()));

        if let Some(path) = path {
            trace!("Loading settings file: {}", path.display());
            let extension = path
                .extension()
                .and_then(|e| e.to_str())
                .map(str::to_ascii_lowercase);
            figment = match extension.as_deref() {
                Some("toml") => figment.merge(Toml::file(path)),
                Some("yaml") | Some("yml") => figment.merge(Yaml::file(path)),
                Some("json") => figment.merge(Json::file(path)),
                _ => {
                    return Err(FormsError::UnsupportedSettingsFormat {
                        path: path.to_path_buf(),
                    })
                }
            };
        }

        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    fn check(&self) -> Result<()> {
        if self.options.separator.is_empty() {
            return Err(FormsError::InvalidSetting {
                key: "options.separator".into(),
                message: "must not be empty".into(),
            });
        }
        if self.options.max_options == 0 {
            return Err(FormsError::InvalidSetting {
                key: "options.max_options".into(),
                message: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}
