//! Declarative validation rules for form submission

use once_cell::sync::Lazy;
use regex::Regex;

/// China mobile numbering: leading 1, second digit 3/5/8, nine more digits
static MOBILE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^1[358][0-9]{9}$").expect("mobile pattern is valid"));

/// A validation rule together with its arguments
///
/// A closed enum instead of a name-keyed strategy table: an unknown rule is
/// unrepresentable, and every new variant forces the match below to handle it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Fails on the empty string
    NonEmpty,
    /// Fails when the value is shorter than the given length
    MinLength(usize),
    /// Fails when the value is not an 11-digit mobile number
    Mobile,
}

impl Rule {
    /// Whether `value` satisfies this rule
    pub fn check(&self, value: &str) -> bool {
        match self {
            Rule::NonEmpty => !value.is_empty(),
            Rule::MinLength(min) => value.chars().count() >= *min,
            Rule::Mobile => MOBILE_PATTERN.is_match(value),
        }
    }
}

/// One accumulated check: a candidate value, the rule to apply, and the
/// message reported when the rule fails
#[derive(Debug, Clone)]
struct Check {
    value: String,
    rule: Rule,
    message: String,
}

/// Accumulates checks and reports the first failure
///
/// Checks run strictly in insertion order and short-circuit on the first
/// failing rule. A validator is built fresh for each validation pass.
#[derive(Debug, Default)]
pub struct Validator {
    checks: Vec<Check>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a check; order of calls is the order of evaluation
    pub fn add(&mut self, value: impl Into<String>, rule: Rule, message: impl Into<String>) {
        self.checks.push(Check {
            value: value.into(),
            rule,
            message: message.into(),
        });
    }

    /// Run all checks; returns the message of the first failure, if any
    pub fn run(&self) -> Option<&str> {
        self.checks
            .iter()
            .find(|check| !check.rule.check(&check.value))
            .map(|check| check.message.as_str())
    }
}
