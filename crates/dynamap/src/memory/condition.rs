//! Value comparison, key conditions and `Expected` checks.

use std::cmp::Ordering;
use std::collections::HashMap;

use dynamap_core::error::CONDITIONAL_CHECK_FAILED;
use dynamap_core::{
    AttributeValue, ComparisonOperator, Condition, DynamapError, ExpectedAttributeValue, Item,
    Result,
};

/// Orders two values of the same kind. Numbers compare numerically,
/// strings by bytes. Values of different kinds are unordered.
pub fn compare(left: &AttributeValue, right: &AttributeValue) -> Option<Ordering> {
    match (left, right) {
        (AttributeValue::S(left), AttributeValue::S(right)) => Some(left.cmp(right)),
        (AttributeValue::N(left), AttributeValue::N(right)) => compare_numbers(left, right),
        _ => None,
    }
}

/// Numbers compare by value, so `1.0` equals `1`.
fn equals(left: &AttributeValue, right: &AttributeValue) -> bool {
    match compare(left, right) {
        Some(ordering) => ordering == Ordering::Equal,
        None => left == right,
    }
}

fn compare_numbers(left: &str, right: &str) -> Option<Ordering> {
    if let (Ok(left), Ok(right)) = (left.parse::<i128>(), right.parse::<i128>()) {
        return Some(left.cmp(&right));
    }
    let left = left.parse::<f64>().ok()?;
    let right = right.parse::<f64>().ok()?;
    left.partial_cmp(&right)
}

/// Checks that a condition carries the number of operands its operator needs.
pub fn validate(attribute: &str, condition: &Condition) -> Result<()> {
    let expected = condition.comparison_operator.arity();
    if condition.attribute_value_list.len() != expected {
        return Err(DynamapError::validation(format!(
            "Invalid number of argument(s) for the {:?} ComparisonOperator on {attribute}: expected {expected}",
            condition.comparison_operator
        )));
    }
    Ok(())
}

/// Whether `value` satisfies a validated condition.
pub fn matches(value: &AttributeValue, condition: &Condition) -> bool {
    let operands = &condition.attribute_value_list;
    let ordering = |index: usize| operands.get(index).and_then(|operand| compare(value, operand));

    match condition.comparison_operator {
        ComparisonOperator::Eq => ordering(0) == Some(Ordering::Equal),
        ComparisonOperator::Ne => ordering(0).is_some_and(|o| o != Ordering::Equal),
        ComparisonOperator::Lt => ordering(0) == Some(Ordering::Less),
        ComparisonOperator::Le => ordering(0).is_some_and(|o| o != Ordering::Greater),
        ComparisonOperator::Gt => ordering(0) == Some(Ordering::Greater),
        ComparisonOperator::Ge => ordering(0).is_some_and(|o| o != Ordering::Less),
        ComparisonOperator::BeginsWith => match (value, operands.first()) {
            (AttributeValue::S(value), Some(AttributeValue::S(prefix))) => value.starts_with(prefix),
            _ => false,
        },
        ComparisonOperator::Between => {
            ordering(0).is_some_and(|o| o != Ordering::Less)
                && ordering(1).is_some_and(|o| o != Ordering::Greater)
        }
    }
}

fn conditional_check_failed() -> DynamapError {
    DynamapError::service(CONDITIONAL_CHECK_FAILED, "The conditional request failed")
}

/// Evaluates `Expected` preconditions against the stored item.
pub fn check_expected(
    existing: Option<&Item>,
    expected: &HashMap<String, ExpectedAttributeValue>,
) -> Result<()> {
    for (attribute, expectation) in expected {
        let current = existing.and_then(|item| item.get(attribute));
        let satisfied = match (expectation.exists, &expectation.value) {
            (Some(false), None) => current.is_none(),
            (Some(false), Some(_)) => {
                return Err(DynamapError::validation(format!(
                    "Cannot expect an attribute to have a specified value while expecting it to not exist: {attribute}"
                )));
            }
            (_, Some(value)) => current.is_some_and(|current| equals(current, value)),
            (Some(true), None) => current.is_some(),
            (None, None) => {
                return Err(DynamapError::validation(format!(
                    "Expected for {attribute} needs either Exists or Value"
                )));
            }
        };
        if !satisfied {
            return Err(conditional_check_failed());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(text: &str) -> AttributeValue {
        AttributeValue::N(text.to_string())
    }

    fn s(text: &str) -> AttributeValue {
        AttributeValue::S(text.to_string())
    }

    #[test]
    fn test_numbers_compare_numerically() {
        assert_eq!(compare(&n("9"), &n("10")), Some(Ordering::Less));
        assert_eq!(compare(&n("-3"), &n("-20")), Some(Ordering::Greater));
        assert_eq!(compare(&n("1.5"), &n("1.25")), Some(Ordering::Greater));
    }

    #[test]
    fn test_strings_compare_lexically() {
        assert_eq!(compare(&s("9"), &s("10")), Some(Ordering::Greater));
        assert_eq!(compare(&s("a"), &n("1")), None);
    }

    #[test]
    fn test_range_operators() {
        assert!(matches(&n("5"), &Condition::new(ComparisonOperator::Lt, vec![n("10")])));
        assert!(matches(&n("10"), &Condition::new(ComparisonOperator::Le, vec![n("10")])));
        assert!(!matches(&n("10"), &Condition::new(ComparisonOperator::Gt, vec![n("10")])));
        assert!(matches(&n("10"), &Condition::new(ComparisonOperator::Ge, vec![n("10")])));
        assert!(matches(&n("7"), &Condition::between(n("5"), n("7"))));
        assert!(!matches(&n("8"), &Condition::between(n("5"), n("7"))));
    }

    #[test]
    fn test_begins_with() {
        assert!(matches(&s("2013-03-20"), &Condition::begins_with("2013-03")));
        assert!(!matches(&s("2012-03-20"), &Condition::begins_with("2013")));
        assert!(!matches(&n("2013"), &Condition::begins_with("20")));
    }

    #[test]
    fn test_mismatched_kinds_never_match() {
        assert!(!matches(&s("1"), &Condition::equals(n("1"))));
        assert!(!matches(&s("1"), &Condition::new(ComparisonOperator::Ne, vec![n("1")])));
    }

    #[test]
    fn test_validate_arity() {
        assert!(validate("RequestedOn", &Condition::between(n("1"), n("2"))).is_ok());
        let err = validate("RequestedOn", &Condition::new(ComparisonOperator::Between, vec![n("1")]))
            .unwrap_err();
        assert!(err.is_service_error("ValidationException"));
    }

    #[test]
    fn test_expected_absent() {
        let expected = HashMap::from([("URL".to_string(), ExpectedAttributeValue::absent())]);
        assert!(check_expected(None, &expected).is_ok());

        let item = Item::from([("URL".to_string(), s("a"))]);
        let err = check_expected(Some(&item), &expected).unwrap_err();
        assert!(err.is_service_error(CONDITIONAL_CHECK_FAILED));
    }

    #[test]
    fn test_expected_value() {
        let item = Item::from([("Version".to_string(), n("2"))]);
        let ok = HashMap::from([("Version".to_string(), ExpectedAttributeValue::equals(n("2")))]);
        let stale = HashMap::from([("Version".to_string(), ExpectedAttributeValue::equals(n("1")))]);

        assert!(check_expected(Some(&item), &ok).is_ok());
        assert!(check_expected(Some(&item), &stale).is_err());
        assert!(check_expected(None, &ok).is_err());
    }

    #[test]
    fn test_expected_number_compares_by_value() {
        let item = Item::from([("Version".to_string(), n("1.0"))]);
        let expected = HashMap::from([("Version".to_string(), ExpectedAttributeValue::equals(n("1")))]);
        let as_string = HashMap::from([("Version".to_string(), ExpectedAttributeValue::equals(s("1.0")))]);

        assert!(check_expected(Some(&item), &expected).is_ok());
        assert!(check_expected(Some(&item), &as_string).is_err());
    }

    #[test]
    fn test_expected_contradiction_is_validation_error() {
        let expected = HashMap::from([(
            "URL".to_string(),
            ExpectedAttributeValue {
                exists: Some(false),
                value: Some(s("a")),
            },
        )]);
        let err = check_expected(None, &expected).unwrap_err();
        assert!(err.is_service_error("ValidationException"));
    }
}
