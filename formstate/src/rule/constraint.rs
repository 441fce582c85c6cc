use std::fmt;

use super::email::is_email;

/// A single validation rule attached to a field.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// Value must contain something other than whitespace.
    Required,
    /// Value must be at least this many characters long.
    MinLength(usize),
    /// Value must be at most this many characters long.
    MaxLength(usize),
    /// Value must look like an email address.
    Email,
    /// A rule name this engine does not know.
    ///
    /// Kept so that a loaded schema survives a round trip, and always
    /// treated as satisfied.
    Unrecognized {
        name: String,
        param: serde_json::Value,
    },
}

impl Constraint {
    /// Wire name of the required rule.
    pub const REQUIRED: &'static str = "isRequired";
    /// Wire name of the minimum length rule.
    pub const MIN_LENGTH: &'static str = "minLength";
    /// Wire name of the maximum length rule.
    pub const MAX_LENGTH: &'static str = "maxLength";
    /// Wire name of the email rule.
    pub const EMAIL: &'static str = "isEmail";

    /// Create an unrecognized constraint.
    pub fn unrecognized(name: impl Into<String>, param: serde_json::Value) -> Self {
        Self::Unrecognized {
            name: name.into(),
            param,
        }
    }

    /// The name this constraint uses in a schema's rule map.
    pub fn name(&self) -> &str {
        match self {
            Self::Required => Self::REQUIRED,
            Self::MinLength(_) => Self::MIN_LENGTH,
            Self::MaxLength(_) => Self::MAX_LENGTH,
            Self::Email => Self::EMAIL,
            Self::Unrecognized { name, .. } => name.as_str(),
        }
    }

    /// Whether `value` satisfies this constraint.
    pub fn check(&self, value: &str) -> bool {
        match self {
            Self::Required => !value.trim().is_empty(),
            Self::MinLength(min) => value.chars().count() >= *min,
            Self::MaxLength(max) => value.chars().count() <= *max,
            Self::Email => is_email(value),
            Self::Unrecognized { .. } => true,
        }
    }

    /// Returns `true` if the engine knows how to check this constraint.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized { .. })
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinLength(n) | Self::MaxLength(n) => write!(f, "{}: {}", self.name(), n),
            Self::Unrecognized { name, param } => write!(f, "{}: {}", name, param),
            _ => write!(f, "{}: true", self.name()),
        }
    }
}
