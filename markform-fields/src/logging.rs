//! Rendering of field diagnostics inside log lines.

use std::fmt;

use serde::Serialize;

/// Renders a serializable value as an indented YAML block for `tracing` output.
///
/// Configuration diagnostics and field states are nested records; as YAML they
/// stay readable when a whole list lands in one `debug!` line. Each line is
/// indented by two spaces under the message that carries it.
///
/// ```
/// use markform_fields::{ConfigError, Pretty};
///
/// let errors = vec![ConfigError::empty_field_key()];
/// let rendered = Pretty(&errors).to_string();
/// assert!(rendered.starts_with("\n  - code: emptyFieldKey"));
/// assert!(rendered.contains("\n    property: fieldKey"));
/// ```
///
/// Values YAML can't represent fall back to their pretty `Debug` form.
pub struct Pretty<T>(pub T);

impl<T: Serialize + fmt::Debug> fmt::Display for Pretty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Ok(yaml) = serde_yaml_ng::to_string(&self.0) else {
            return write!(f, "\n{:#?}", self.0);
        };
        for line in yaml.lines() {
            write!(f, "\n  {line}")?;
        }
        Ok(())
    }
}

impl<T: Serialize + fmt::Debug> fmt::Debug for Pretty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{FieldId, FieldState, ValidationErrorKind};

    #[test]
    fn field_state_renders_as_nested_block() {
        let state = FieldState::new(FieldId::new(), "email")
            .with_required(true)
            .with_validation_error(ValidationErrorKind::Required);
        let rendered = Pretty(&state).to_string();
        assert!(rendered.starts_with('\n'));
        assert!(rendered.lines().skip(1).all(|line| line.starts_with("  ")));
        assert!(rendered.contains("fieldKey: email"));
        assert!(rendered.contains("- required"));
        // empty config error lists are omitted
        assert!(!rendered.contains("configErrors"));
    }

    #[test]
    fn empty_list_is_one_line() {
        let errors: Vec<FieldState> = Vec::new();
        assert_eq!(Pretty(&errors).to_string(), "\n  []");
    }
}
