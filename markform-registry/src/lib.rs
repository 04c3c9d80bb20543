//! Aggregation of field states into form-level diagnostics
//!
//! Fields from `markform-fields` report through [`FieldSink`]; the
//! [`FormRegistry`] implements it. Consumers such as a submit button or a
//! status bar read [`FieldPopulation`] snapshots and never talk to fields
//! directly.
//!
//! - [`FormRegistry`]: single-writer store of the live field states, published
//!   as immutable snapshots over a `tokio::sync::watch` channel.
//! - [`PopulationWatch`]: change notification that only ever hands out owned
//!   snapshots, so reactions may write back into the registry.
//! - [`FormDiagnostics`]: validity, required ratio, duplicate keys and
//!   configuration errors, derived from one snapshot.
//! - [`FormDocument`]: owns the mounted widgets of one document and keeps the
//!   registry in step with mounts, edits and reloads.
//!
//! [`FieldSink`]: markform_fields::FieldSink

pub mod diagnostics;
pub mod document;
pub mod population;
pub mod registry;
pub mod subscription;

pub use diagnostics::{
    duplicate_field_keys, DuplicateKey, FieldConfigError, FieldValue, FormDiagnostics,
    InvalidField,
};
pub use document::FormDocument;
pub use population::FieldPopulation;
pub use registry::FormRegistry;
pub use subscription::{PopulationWatch, RecvError};
