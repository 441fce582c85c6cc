//! Declarative field rules and the pure evaluator that applies them.
//!
//! A field declares a [`ConstraintSet`]; [`evaluate`] folds every constraint
//! in the set into a single verdict. Evaluation never fails: a value that
//! breaks a rule simply yields `false`.
//!
//! # Example
//!
//! ```
//! use formstate::rule::{ConstraintSet, evaluate};
//!
//! let rules = ConstraintSet::new().required().min_length(4);
//!
//! assert!(!evaluate("Bob", &rules));
//! assert!(evaluate("Robert", &rules));
//! ```

mod constraint;
mod email;
mod set;

pub use constraint::Constraint;
pub use email::is_email;
pub use set::ConstraintSet;

/// Apply every constraint to `value` and conjoin the results.
///
/// An empty constraint list is vacuously satisfied. Unrecognized
/// constraints count as satisfied.
pub fn evaluate(value: &str, constraints: &[Constraint]) -> bool {
    constraints.iter().all(|constraint| constraint.check(value))
}

/// Constraints that reject `value`, in declaration order.
pub fn failing<'a>(value: &str, constraints: &'a [Constraint]) -> Vec<&'a Constraint> {
    constraints
        .iter()
        .filter(|constraint| !constraint.check(value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set_is_vacuously_valid() {
        assert!(evaluate("", &[]));
        assert!(evaluate("anything at all", &[]));
    }

    #[test]
    fn test_required() {
        let rules = [Constraint::Required];
        assert!(!evaluate("", &rules));
        assert!(!evaluate("   \t\n", &rules));
        assert!(evaluate(" x ", &rules));
    }

    #[test]
    fn test_min_length_boundary() {
        let rules = [Constraint::MinLength(4)];
        assert!(!evaluate("Bob", &rules));
        assert!(evaluate("Bobo", &rules));
        assert!(evaluate("Robert", &rules));
    }

    #[test]
    fn test_min_length_zero_accepts_empty() {
        assert!(evaluate("", &[Constraint::MinLength(0)]));
    }

    #[test]
    fn test_max_length_boundary() {
        let rules = [Constraint::MaxLength(3)];
        assert!(evaluate("", &rules));
        assert!(evaluate("abc", &rules));
        assert!(!evaluate("abcd", &rules));
    }

    #[test]
    fn test_length_counts_characters() {
        // four characters, eight bytes
        let value = "ÅÄÖÜ";
        assert!(evaluate(value, &[Constraint::MaxLength(4)]));
        assert!(evaluate(value, &[Constraint::MinLength(4)]));
    }

    #[test]
    fn test_constraints_are_conjoined() {
        let rules = [Constraint::Required, Constraint::MinLength(4)];
        assert!(!evaluate("", &rules));
        assert!(!evaluate("abc", &rules));
        assert!(evaluate("abcd", &rules));

        // min and max that cannot both hold
        let impossible = [Constraint::MinLength(5), Constraint::MaxLength(2)];
        assert!(!evaluate("abc", &impossible));
    }

    #[test]
    fn test_order_does_not_matter() {
        let forward = [Constraint::Email, Constraint::Required, Constraint::MaxLength(10)];
        let backward = [Constraint::MaxLength(10), Constraint::Required, Constraint::Email];
        for value in ["", "a@b.co", "someone@example.com", "nope"] {
            assert_eq!(evaluate(value, &forward), evaluate(value, &backward));
        }
    }

    #[test]
    fn test_unrecognized_constraint_passes() {
        // Unknown rule names are accepted and never veto a value.
        let rules = [Constraint::unrecognized("isPhoneNumber", serde_json::Value::Bool(true))];
        assert!(evaluate("", &rules));
        assert!(evaluate("not a phone number", &rules));

        // ...but they do not mask the verdict of a known rule either.
        let mixed = [
            Constraint::Required,
            Constraint::unrecognized("isPhoneNumber", serde_json::Value::Bool(true)),
        ];
        assert!(!evaluate("", &mixed));
    }

    #[test]
    fn test_failing_lists_rejecting_constraints() {
        let rules = [Constraint::Required, Constraint::MinLength(4), Constraint::Email];
        let failed: Vec<&str> = failing("ab", &rules).iter().map(|c| c.name()).collect();
        assert_eq!(failed, vec!["minLength", "isEmail"]);
        assert!(failing("user@example.com", &rules).is_empty());
    }
}
