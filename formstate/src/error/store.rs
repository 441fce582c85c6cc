//! Form store error types

/// Errors reported by [`FormStore`](crate::FormStore).
///
/// These are caller contract violations rather than validation outcomes:
/// a value that fails its rules is an ordinary `valid == false` field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A change event named a field the form was not built with.
    #[error("Field '{field}' is not part of this form")]
    UnknownField { field: String },
}

impl StoreError {
    /// Creates a new unknown field error.
    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::UnknownField {
            field: field.into(),
        }
    }
}
