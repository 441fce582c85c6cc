//! Form state and validation engine.
//!
//! A form is built from a [`FormSchema`]. The [`FormStore`] keeps an
//! immutable [`FormState`] snapshot, revalidates a field on every change
//! event, keeps the form-wide validity flag in step, and projects the values
//! into [`FormData`] on submit.

pub mod error;
pub mod rule;
pub mod schema;
pub mod sink;
pub mod state;
pub mod store;

pub use error::{SchemaError, SinkError, StoreError};
pub use rule::{Constraint, ConstraintSet, evaluate};
pub use schema::{FieldKind, FieldOption, FieldSpec, FormSchema, demo_schema};
pub use sink::{JsonSink, LogSink, SubmitSink};
pub use state::{FieldState, FieldStatus, FormData, FormState};
pub use store::FormStore;
