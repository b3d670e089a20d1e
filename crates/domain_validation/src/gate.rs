//! Rule set evaluation
//!
//! A [`RuleSet`] is the configuration for one request shape. Evaluation is
//! pure and never short-circuits: every rule runs and every violation is
//! collected, including several violations on the same field.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::rule::Rule;

/// Field reported when the payload itself is not a JSON object
pub const PAYLOAD_FIELD: &str = "_payload";

/// One failed rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validation failure carrying every violation found
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation failed: {} violation(s)", .violations.len())]
pub struct ValidationErrors {
    violations: Vec<Violation>,
}

impl ValidationErrors {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns true if any violation names `field`
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    /// Messages reported for `field`, in rule order
    pub fn messages_for(&self, field: &str) -> Vec<&str> {
        self.violations
            .iter()
            .filter(|v| v.field == field)
            .map(|v| v.message.as_str())
            .collect()
    }
}

/// Ordered rules for one request shape
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleSet {
    name: String,
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    /// Appends a rule
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Loads a rule set from its JSON description
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Runs every rule and returns all violations
    pub fn evaluate(&self, payload: &Value) -> Vec<Violation> {
        let Value::Object(fields) = payload else {
            return vec![Violation::new(PAYLOAD_FIELD, "Request body must be a JSON object")];
        };

        self.rules.iter().filter_map(|rule| rule.check(fields)).collect()
    }

    /// Returns the payload unchanged when every rule passes
    pub fn check(&self, payload: Value) -> Result<Value, ValidationErrors> {
        let violations = self.evaluate(&payload);
        if violations.is_empty() {
            return Ok(payload);
        }

        debug!(
            rule_set = %self.name,
            violations = violations.len(),
            "Payload rejected by validation gate"
        );
        Err(ValidationErrors::new(violations))
    }

    /// Invokes `next` with the original payload only when every rule passes
    pub fn guard<T, F>(&self, payload: Value, next: F) -> Result<T, ValidationErrors>
    where
        F: FnOnce(Value) -> T,
    {
        self.check(payload).map(next)
    }
}
