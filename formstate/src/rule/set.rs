//! Constraint sets and their rule-map wire form.

use std::fmt;
use std::ops::Deref;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::Constraint;

/// The rules declared for one field.
///
/// Each rule name appears at most once; adding a constraint with a name
/// already present replaces the earlier one. On the wire this is a map from
/// rule name to parameter:
///
/// ```json
/// { "isRequired": true, "minLength": 4 }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstraintSet {
    constraints: Vec<Constraint>,
}

impl ConstraintSet {
    /// Create an empty set. Every value satisfies it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a constraint, replacing any constraint with the same name.
    pub fn insert(&mut self, constraint: Constraint) {
        match self
            .constraints
            .iter_mut()
            .find(|existing| existing.name() == constraint.name())
        {
            Some(existing) => *existing = constraint,
            None => self.constraints.push(constraint),
        }
    }

    /// Add a constraint (builder style).
    pub fn with(mut self, constraint: Constraint) -> Self {
        self.insert(constraint);
        self
    }

    /// Require the value to be non-blank.
    pub fn required(self) -> Self {
        self.with(Constraint::Required)
    }

    /// Require at least `min` characters.
    pub fn min_length(self, min: usize) -> Self {
        self.with(Constraint::MinLength(min))
    }

    /// Require at most `max` characters.
    pub fn max_length(self, max: usize) -> Self {
        self.with(Constraint::MaxLength(max))
    }

    /// Require an email address.
    pub fn email(self) -> Self {
        self.with(Constraint::Email)
    }

    /// Look up a constraint by its rule name.
    pub fn get(&self, name: &str) -> Option<&Constraint> {
        self.constraints.iter().find(|c| c.name() == name)
    }

    /// Constraints the engine does not know how to check.
    pub fn unrecognized(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints.iter().filter(|c| !c.is_recognized())
    }
}

impl Deref for ConstraintSet {
    type Target = [Constraint];

    fn deref(&self) -> &Self::Target {
        &self.constraints
    }
}

impl FromIterator<Constraint> for ConstraintSet {
    fn from_iter<I: IntoIterator<Item = Constraint>>(iter: I) -> Self {
        let mut set = Self::new();
        for constraint in iter {
            set.insert(constraint);
        }
        set
    }
}

impl<'a> IntoIterator for &'a ConstraintSet {
    type Item = &'a Constraint;
    type IntoIter = std::slice::Iter<'a, Constraint>;

    fn into_iter(self) -> Self::IntoIter {
        self.constraints.iter()
    }
}

impl Serialize for ConstraintSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.constraints.len()))?;
        for constraint in &self.constraints {
            match constraint {
                Constraint::Required | Constraint::Email => {
                    map.serialize_entry(constraint.name(), &true)?
                }
                Constraint::MinLength(n) | Constraint::MaxLength(n) => {
                    map.serialize_entry(constraint.name(), n)?
                }
                Constraint::Unrecognized { name, param } => map.serialize_entry(name, param)?,
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ConstraintSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ConstraintSetVisitor)
    }
}

struct ConstraintSetVisitor;

impl<'de> Visitor<'de> for ConstraintSetVisitor {
    type Value = ConstraintSet;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of rule names to parameters")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut set = ConstraintSet::new();
        while let Some((name, param)) = access.next_entry::<String, Value>()? {
            let constraint = match name.as_str() {
                Constraint::REQUIRED => flag(&param).then_some(Constraint::Required),
                Constraint::EMAIL => flag(&param).then_some(Constraint::Email),
                Constraint::MIN_LENGTH => Some(Constraint::MinLength(length(&name, &param)?)),
                Constraint::MAX_LENGTH => Some(Constraint::MaxLength(length(&name, &param)?)),
                _ => Some(Constraint::unrecognized(name, param)),
            };
            if let Some(constraint) = constraint {
                set.insert(constraint);
            }
        }
        Ok(set)
    }
}

/// A flag rule is declared by any value except `false` or `null`.
fn flag(param: &Value) -> bool {
    !matches!(param, Value::Bool(false) | Value::Null)
}

fn length<E: de::Error>(name: &str, param: &Value) -> Result<usize, E> {
    param
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| {
            E::custom(format!(
                "rule '{}' expects a non-negative integer, got {}",
                name, param
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_replaces_same_rule() {
        let set = ConstraintSet::new().min_length(2).required().min_length(4);
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("minLength"), Some(&Constraint::MinLength(4)));
    }

    #[test]
    fn test_deserialize_rule_map() {
        let set: ConstraintSet =
            serde_json::from_str(r#"{"minLength": 4, "isRequired": true}"#).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("minLength"), Some(&Constraint::MinLength(4)));
        assert_eq!(set.get("isRequired"), Some(&Constraint::Required));
    }

    #[test]
    fn test_deserialize_false_flag_declares_nothing() {
        let set: ConstraintSet =
            serde_json::from_str(r#"{"isRequired": false, "isEmail": false}"#).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_deserialize_keeps_unknown_rules() {
        let set: ConstraintSet =
            serde_json::from_str(r#"{"isRequired": true, "matches": "^[0-9]+$"}"#).unwrap();
        let unknown: Vec<&str> = set.unrecognized().map(|c| c.name()).collect();
        assert_eq!(unknown, vec!["matches"]);
    }

    #[test]
    fn test_deserialize_rejects_bad_length() {
        assert!(serde_json::from_str::<ConstraintSet>(r#"{"minLength": -1}"#).is_err());
        assert!(serde_json::from_str::<ConstraintSet>(r#"{"maxLength": "ten"}"#).is_err());
    }

    #[test]
    fn test_serialize_uses_wire_names() {
        let set = ConstraintSet::new()
            .required()
            .max_length(10)
            .with(Constraint::unrecognized("isPhone", Value::Bool(true)));
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"isRequired": true, "maxLength": 10, "isPhone": true})
        );
    }
}
