//! Validation rule building blocks shared by the text-like widgets.
//!
//! Length and pattern rules only apply to non-empty values; an empty value is
//! the required rule's concern.

use regex::Regex;

use crate::state::{ConfigError, ConfigProperty};

/// Whether `value` counts as empty for the required check.
pub fn is_blank(value: &str, trim: bool) -> bool {
    if trim {
        value.trim().is_empty()
    } else {
        value.is_empty()
    }
}

/// Length in characters, not bytes.
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// A value together with the corrections made while normalizing it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Normalized<T> {
    pub value: T,
    pub warnings: Vec<ConfigError>,
}

impl<T> Normalized<T> {
    pub fn clean(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }
}

/// Optional minimum and maximum character counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LengthBounds {
    min: Option<usize>,
    max: Option<usize>,
}

impl LengthBounds {
    /// Bounds from typed values. A minimum above the maximum raises the
    /// maximum to the minimum.
    pub fn new(min: Option<usize>, max: Option<usize>) -> Normalized<Self> {
        let mut warnings = Vec::new();
        let max = match (min, max) {
            (Some(lo), Some(hi)) if lo > hi => {
                warnings.push(ConfigError::normalized(
                    ConfigProperty::MaxLength,
                    format!("maxLength {hi} is below minLength {lo}; raised to {lo}"),
                    lo.to_string(),
                ));
                Some(lo)
            }
            _ => max,
        };
        Normalized {
            value: Self { min, max },
            warnings,
        }
    }

    /// Bounds from raw attribute text.
    ///
    /// Non-integers are ignored and negative numbers clamped to zero, each
    /// with a warning.
    pub fn from_raw(min: Option<&str>, max: Option<&str>) -> Normalized<Self> {
        let mut warnings = Vec::new();
        let min = parse_bound(min, ConfigProperty::MinLength, &mut warnings);
        let max = parse_bound(max, ConfigProperty::MaxLength, &mut warnings);
        let mut bounds = Self::new(min, max);
        warnings.append(&mut bounds.warnings);
        bounds.warnings = warnings;
        bounds
    }

    pub fn min(&self) -> Option<usize> {
        self.min
    }

    pub fn max(&self) -> Option<usize> {
        self.max
    }

    pub fn too_short(&self, value: &str) -> bool {
        !value.is_empty() && self.min.is_some_and(|min| char_len(value) < min)
    }

    pub fn too_long(&self, value: &str) -> bool {
        !value.is_empty() && self.max.is_some_and(|max| char_len(value) > max)
    }
}

fn parse_bound(
    raw: Option<&str>,
    property: ConfigProperty,
    warnings: &mut Vec<ConfigError>,
) -> Option<usize> {
    let text = raw?.trim();
    if text.is_empty() {
        return None;
    }
    match text.parse::<i64>() {
        Ok(n) if n < 0 => {
            warnings.push(ConfigError::normalized(
                property,
                format!("{property} {n} is negative; clamped to 0"),
                "0",
            ));
            Some(0)
        }
        Ok(n) => Some(usize::try_from(n).unwrap_or(usize::MAX)),
        Err(_) => {
            warnings.push(ConfigError::normalized(
                property,
                format!("{property} \"{text}\" is not a whole number; the constraint is ignored"),
                "",
            ));
            None
        }
    }
}

/// A regular-expression rule anchored to the whole value.
///
/// A pattern that fails to compile is kept as a configuration error and the
/// rule is skipped.
#[derive(Debug, Clone, Default)]
pub struct PatternRule {
    source: String,
    compiled: Option<Regex>,
    error: Option<ConfigError>,
}

impl PatternRule {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        if source.is_empty() {
            return Self::default();
        }
        // author anchors stay in place, doubled anchors match like single ones
        match Regex::new(&format!("^(?:{source})$")) {
            Ok(compiled) => Self {
                source,
                compiled: Some(compiled),
                error: None,
            },
            Err(e) => {
                let error = ConfigError::invalid_regex(&source, e);
                Self {
                    source,
                    compiled: None,
                    error: Some(error),
                }
            }
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether an empty-or-valid pattern is being enforced.
    pub fn is_enforced(&self) -> bool {
        self.compiled.is_some()
    }

    /// Whether `value` violates the rule. Empty values and unenforced rules
    /// never do.
    pub fn rejects(&self, value: &str) -> bool {
        match &self.compiled {
            Some(re) => !value.is_empty() && !re.is_match(value),
            None => false,
        }
    }

    pub fn config_error(&self) -> Option<&ConfigError> {
        self.error.as_ref()
    }
}

impl PartialEq for PatternRule {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}
