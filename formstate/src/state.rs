//! Immutable form snapshots.
//!
//! A [`FormState`] is never edited after it is built. A change produces a
//! new snapshot that shares every untouched [`FieldState`] with the previous
//! one, so readers holding an older snapshot keep a consistent view.

use std::collections::BTreeMap;
use std::ops::Deref;
use std::sync::Arc;

use serde::Serialize;

use crate::error::StoreError;
use crate::rule;
use crate::schema::{FieldOption, FieldSpec, FormSchema};

/// Where a field sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStatus {
    /// No change event has reached the field yet.
    Untouched,
    /// Changed at least once; the current value breaks a rule.
    Invalid,
    /// Changed at least once; the current value passes every rule.
    Valid,
}

/// The dynamic record of one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldState {
    spec: Arc<FieldSpec>,
    value: String,
    touched: bool,
    valid: bool,
}

impl FieldState {
    /// Fresh record: empty, untouched and not valid, whatever the rules say.
    fn initial(spec: Arc<FieldSpec>) -> Self {
        Self {
            spec,
            value: String::new(),
            touched: false,
            valid: false,
        }
    }

    /// Record for `spec` after a change to `value`.
    fn changed(spec: Arc<FieldSpec>, value: String) -> Self {
        let valid = rule::evaluate(&value, spec.rules());
        Self {
            spec,
            value,
            touched: true,
            valid,
        }
    }

    pub fn name(&self) -> &str {
        self.spec.name()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn placeholder(&self) -> &str {
        self.spec.placeholder()
    }

    pub fn options(&self) -> Option<&[FieldOption]> {
        self.spec.options()
    }

    pub fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn status(&self) -> FieldStatus {
        match (self.touched, self.valid) {
            (false, _) => FieldStatus::Untouched,
            (true, false) => FieldStatus::Invalid,
            (true, true) => FieldStatus::Valid,
        }
    }

    /// Whether presentation should flag this field as needing attention.
    pub fn shows_error(&self) -> bool {
        self.status() == FieldStatus::Invalid
    }
}

/// A complete view of the form at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    fields: BTreeMap<String, Arc<FieldState>>,
    form_is_valid: bool,
}

impl FormState {
    /// Initial snapshot: one untouched record per schema field.
    pub fn initial(schema: &FormSchema) -> Self {
        let fields: BTreeMap<_, _> = schema
            .fields()
            .iter()
            .map(|spec| {
                let state = FieldState::initial(Arc::new(spec.clone()));
                (spec.name().to_string(), Arc::new(state))
            })
            .collect();
        Self::from_fields(fields)
    }

    /// Snapshot that follows this one after `field` changes to `value`.
    ///
    /// Only the named record is rebuilt; form validity is recomputed across
    /// every field.
    pub fn with_change(&self, field: &str, value: String) -> Result<Self, StoreError> {
        let current = self
            .fields
            .get(field)
            .ok_or_else(|| StoreError::unknown_field(field))?;
        let updated = FieldState::changed(Arc::clone(&current.spec), value);

        let mut fields = self.fields.clone();
        fields.insert(field.to_string(), Arc::new(updated));
        Ok(Self::from_fields(fields))
    }

    fn from_fields(fields: BTreeMap<String, Arc<FieldState>>) -> Self {
        let form_is_valid = fields.values().all(|state| state.valid);
        Self {
            fields,
            form_is_valid,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.form_is_valid
    }

    pub fn field(&self, name: &str) -> Option<&FieldState> {
        self.fields.get(name).map(Arc::as_ref)
    }

    /// Fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldState> {
        self.fields.values().map(Arc::as_ref)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether `other` reuses this snapshot's record for `field`.
    pub fn shares_field(&self, other: &FormState, field: &str) -> bool {
        match (self.fields.get(field), other.fields.get(field)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Project into plain name → value data.
    pub fn to_form_data(&self) -> FormData {
        FormData(
            self.fields
                .iter()
                .map(|(name, state)| (name.clone(), state.value.clone()))
                .collect(),
        )
    }
}

/// Submitted form values keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormData(BTreeMap<String, String>);

impl FormData {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl Deref for FormData {
    type Target = BTreeMap<String, String>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::ConstraintSet;

    fn schema() -> FormSchema {
        FormSchema::new([
            FieldSpec::new("nick"),
            FieldSpec::new("code").with_rules(ConstraintSet::new().required().max_length(3)),
        ])
        .unwrap()
    }

    #[test]
    fn test_initial_fields_are_untouched_even_if_rules_pass() {
        // "nick" has no rules, so "" would pass, yet it starts out not valid.
        let state = FormState::initial(&schema());
        let nick = state.field("nick").unwrap();
        assert_eq!(nick.value(), "");
        assert!(!nick.is_touched());
        assert!(!nick.is_valid());
        assert_eq!(nick.status(), FieldStatus::Untouched);
        assert!(!nick.shows_error());
        assert!(!state.is_valid());
    }

    #[test]
    fn test_with_change_rebuilds_one_field() {
        let before = FormState::initial(&schema());
        let after = before.with_change("code", "abcd".to_string()).unwrap();

        let code = after.field("code").unwrap();
        assert_eq!(code.value(), "abcd");
        assert_eq!(code.status(), FieldStatus::Invalid);
        assert!(code.shows_error());

        assert!(before.shares_field(&after, "nick"));
        assert!(!before.shares_field(&after, "code"));
        assert_eq!(before.field("code").unwrap().value(), "");
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let before = FormState::initial(&schema());
        let err = before.with_change("missing", "x".to_string()).unwrap_err();
        assert_eq!(err, StoreError::unknown_field("missing"));
    }

    #[test]
    fn test_form_data_serializes_flat() {
        let state = FormState::initial(&schema())
            .with_change("nick", "zed".to_string())
            .unwrap();
        let json = serde_json::to_value(state.to_form_data()).unwrap();
        assert_eq!(json, serde_json::json!({"code": "", "nick": "zed"}));
    }
}
