//! The form state store.

use std::sync::Arc;

use crate::error::StoreError;
use crate::rule;
use crate::schema::FormSchema;
use crate::sink::{LogSink, SubmitSink};
use crate::state::{FieldState, FormData, FormState};

/// Callback invoked with every newly published snapshot.
type Listener = Box<dyn Fn(&Arc<FormState>) + Send>;

/// Owns the current [`FormState`] and applies change events to it.
///
/// # Example
///
/// ```
/// use formstate::{ConstraintSet, FieldSpec, FormSchema, FormStore};
///
/// let schema = FormSchema::new([
///     FieldSpec::new("name").with_rules(ConstraintSet::new().required().min_length(4)),
/// ])
/// .unwrap();
/// let mut store = FormStore::new(schema);
///
/// store.apply_change("name", "Robert").unwrap();
/// assert!(store.snapshot().is_valid());
///
/// let data = store.submit();
/// assert_eq!(data.get("name"), Some("Robert"));
/// ```
pub struct FormStore {
    schema: FormSchema,
    snapshot: Arc<FormState>,
    sink: Box<dyn SubmitSink>,
    listeners: Vec<Listener>,
}

impl FormStore {
    /// Create a store for `schema` that logs submissions.
    pub fn new(schema: FormSchema) -> Self {
        let snapshot = Arc::new(FormState::initial(&schema));
        log::debug!("Form created with {} field(s)", snapshot.len());
        Self {
            schema,
            snapshot,
            sink: Box::new(LogSink),
            listeners: Vec::new(),
        }
    }

    /// Replace the submit sink.
    pub fn with_sink(mut self, sink: impl SubmitSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// The current snapshot. Later changes never alter a returned snapshot.
    pub fn snapshot(&self) -> Arc<FormState> {
        Arc::clone(&self.snapshot)
    }

    pub fn field(&self, name: &str) -> Option<&FieldState> {
        self.snapshot.field(name)
    }

    /// Register a callback for every snapshot published after this call.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(&Arc<FormState>) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Set `field` to `value`, revalidate it and publish the new snapshot.
    ///
    /// Naming a field outside the schema is a caller bug; it returns
    /// [`StoreError::UnknownField`] and leaves the current snapshot in place.
    pub fn apply_change(
        &mut self,
        field: &str,
        value: impl Into<String>,
    ) -> Result<Arc<FormState>, StoreError> {
        let next = match self.snapshot.with_change(field, value.into()) {
            Ok(next) => Arc::new(next),
            Err(e) => {
                log::error!("Rejected change: {}", e);
                return Err(e);
            }
        };

        if let Some(state) = next.field(field) {
            if state.is_valid() {
                log::debug!("Field '{}' changed (valid)", field);
            } else {
                let failed: Vec<String> = rule::failing(state.value(), state.spec().rules())
                    .iter()
                    .map(|c| c.to_string())
                    .collect();
                log::debug!("Field '{}' changed (failing: {})", field, failed.join(", "));
            }
        }
        if next.is_valid() != self.snapshot.is_valid() {
            log::debug!("Form validity is now {}", next.is_valid());
        }

        self.snapshot = Arc::clone(&next);
        for listener in &self.listeners {
            listener(&next);
        }
        Ok(next)
    }

    /// Hand the current values to the sink and return them.
    ///
    /// Submission is not gated on validity. A failing sink is logged.
    pub fn submit(&mut self) -> FormData {
        let data = self.snapshot.to_form_data();
        if !self.snapshot.is_valid() {
            log::warn!("Submitting a form that is not valid");
        }
        if let Err(e) = self.sink.deliver(&data) {
            log::warn!("Submit sink failed: {}", e);
        }
        data
    }
}

impl std::fmt::Debug for FormStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormStore")
            .field("snapshot", &self.snapshot)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
