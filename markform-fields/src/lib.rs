//! Form field widgets and field state snapshots
//!
//! `markform-fields` owns everything a single field knows about itself. It
//! knows nothing about other fields or about how their states are aggregated;
//! consumers plug in an aggregator through the [`FieldSink`] trait.
//!
//! # Architecture
//!
//! - **Field state**: [`FieldState`] is the canonical snapshot one mounted field
//!   pushes to its sink. Validation errors and configuration errors live in two
//!   separate lists.
//! - **Field contract**: [`MountedField`] allocates the instance identity, pushes
//!   a fresh state after every change, and removes it again when the field is
//!   disabled or dropped.
//! - **Widgets**: text input, textarea, select, checkbox and radio group, each
//!   with its own validation rules and configuration checks.
//! - **Directives**: [`WidgetFactory`] turns a parsed markup directive into a
//!   widget, decoding author-supplied attributes along the way.

pub mod contract;
pub mod directive;
pub mod error;
pub mod logging;
pub mod options;
pub mod rules;
pub mod settings;
pub mod state;
pub mod widgets;

pub use contract::{FieldSink, FormField, MountedField};
pub use directive::{FieldDirective, WidgetFactory};
pub use error::{FormsError, Result};
pub use logging::Pretty;
pub use options::{parse_options, ChoiceOption, ParsedOptions};
pub use rules::{LengthBounds, Normalized, PatternRule};
pub use settings::{FormSettings, OptionsSettings, ValidationSettings};
pub use state::{
    ConfigError, ConfigErrorCode, ConfigProperty, ConfigSeverity, FieldId, FieldState, Severity,
    ValidationErrorKind,
};
pub use widgets::{
    Checkbox, ChoiceList, FieldCommon, FieldKind, RadioGroup, Select, Textarea, TextInput, Widget,
};
