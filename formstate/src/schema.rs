//! Static form schema: the fields a form is built with.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::rule::ConstraintSet;

/// How a field is presented. The engine itself never looks at this.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Textarea,
    Email,
    Password,
    Select,
    Radio,
}

impl FieldKind {
    /// Returns `true` for kinds whose value is picked from an option list.
    pub fn is_choice(self) -> bool {
        matches!(self, Self::Select | Self::Radio)
    }
}

/// One entry of a choice field's option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldOption {
    /// Value the field takes when this option is picked.
    #[serde(deserialize_with = "option_value")]
    pub value: String,
    /// Label shown for the option.
    pub display_value: String,
}

impl FieldOption {
    pub fn new(value: impl Into<String>, display_value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            display_value: display_value.into(),
        }
    }
}

/// Static description of one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    name: String,
    #[serde(default)]
    placeholder: String,
    #[serde(default)]
    kind: FieldKind,
    #[serde(default, rename = "rules")]
    constraints: ConstraintSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<Vec<FieldOption>>,
}

impl FieldSpec {
    /// Create a text field with no rules.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            placeholder: String::new(),
            kind: FieldKind::default(),
            constraints: ConstraintSet::new(),
            options: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_rules(mut self, constraints: ConstraintSet) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn with_options(mut self, options: impl IntoIterator<Item = FieldOption>) -> Self {
        self.options = Some(options.into_iter().collect());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn rules(&self) -> &ConstraintSet {
        &self.constraints
    }

    pub fn options(&self) -> Option<&[FieldOption]> {
        self.options.as_deref()
    }
}

/// The ordered field list a form is constructed from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    fields: Vec<FieldSpec>,
}

impl FormSchema {
    /// Build a schema from field specs, rejecting blank or repeated names.
    pub fn new(fields: impl IntoIterator<Item = FieldSpec>) -> Result<Self, SchemaError> {
        let schema = Self {
            fields: fields.into_iter().collect(),
        };
        schema.check()?;
        Ok(schema)
    }

    /// Parse a schema from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let schema: Self = serde_json::from_str(json)?;
        schema.check()?;
        Ok(schema)
    }

    /// Read and parse a JSON schema file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| SchemaError::io(path, e))?;
        Self::from_json(&json)
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn check(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        for (index, spec) in self.fields.iter().enumerate() {
            if spec.name.trim().is_empty() {
                return Err(SchemaError::EmptyName { index });
            }
            if !seen.insert(spec.name.as_str()) {
                return Err(SchemaError::duplicate(&spec.name));
            }
            for constraint in spec.constraints.unrecognized() {
                log::warn!(
                    "Field '{}' declares unknown rule '{}'; it will always pass",
                    spec.name,
                    constraint
                );
            }
            if spec.kind.is_choice() && spec.options.is_none() {
                log::warn!("Choice field '{}' has no options", spec.name);
            }
        }
        Ok(())
    }
}

/// Accept option values written as JSON strings or numbers.
fn option_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    struct OptionValueVisitor;

    impl Visitor<'_> for OptionValueVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string or number")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(OptionValueVisitor)
}

/// The demo form the engine ships with: a short contact survey.
pub fn demo_schema() -> FormSchema {
    let text_rules = ConstraintSet::new().min_length(4).required();
    FormSchema {
        fields: vec![
            FieldSpec::new("name")
                .with_placeholder("What is your name")
                .with_rules(text_rules.clone()),
            FieldSpec::new("address")
                .with_placeholder("What is your address")
                .with_kind(FieldKind::Textarea)
                .with_rules(text_rules),
            FieldSpec::new("my_email")
                .with_placeholder("What is your email")
                .with_kind(FieldKind::Email)
                .with_rules(ConstraintSet::new().required().email()),
            FieldSpec::new("gender")
                .with_placeholder("What is your gender")
                .with_kind(FieldKind::Select)
                .with_rules(ConstraintSet::new().required())
                .with_options([
                    FieldOption::new("male", "Male"),
                    FieldOption::new("female", "Female"),
                ]),
            FieldSpec::new("my_radio")
                .with_placeholder("Are you a frontend developer")
                .with_kind(FieldKind::Radio)
                .with_rules(ConstraintSet::new().required())
                .with_options([FieldOption::new("0", "No"), FieldOption::new("1", "Yes")]),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_schema_is_well_formed() {
        let schema = demo_schema();
        assert!(schema.check().is_ok());
        assert_eq!(schema.len(), 5);
        assert_eq!(
            schema.field("my_radio").unwrap().options().unwrap()[1].value,
            "1"
        );
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let result = FormSchema::new([FieldSpec::new("name"), FieldSpec::new("name")]);
        assert!(matches!(result, Err(SchemaError::DuplicateField { name }) if name == "name"));
    }

    #[test]
    fn test_rejects_blank_names() {
        let result = FormSchema::new([FieldSpec::new("ok"), FieldSpec::new("  ")]);
        assert!(matches!(result, Err(SchemaError::EmptyName { index: 1 })));
    }

    #[test]
    fn test_numeric_option_values_become_strings() {
        let option: FieldOption =
            serde_json::from_str(r#"{"value": 1, "displayValue": "Yes"}"#).unwrap();
        assert_eq!(option, FieldOption::new("1", "Yes"));
    }

    #[test]
    fn test_kind_defaults_to_text() {
        let spec: FieldSpec = serde_json::from_str(r#"{"name": "nick"}"#).unwrap();
        assert_eq!(spec.kind(), FieldKind::Text);
        assert!(spec.rules().is_empty());
        assert!(spec.options().is_none());
    }
}
