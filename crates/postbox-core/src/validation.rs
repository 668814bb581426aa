//! Validation of raw post submissions against a fixed rule table.
//!
//! Every field in [`POST_RULES`] is required. Violations are accumulated
//! across all fields so a single response can report every problem.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde_json::{Map, Value};

use crate::domain::NewPost;

const TITLE: &str = "title";
const CONTENT: &str = "content";
const PRICE: &str = "price";

/// Expected kind of a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
}

/// One entry of a rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: &'static str,
    pub kind: FieldKind,
}

/// Rules applied to a post submission, checked in order.
pub const POST_RULES: &[FieldRule] = &[
    FieldRule {
        field: TITLE,
        kind: FieldKind::Text,
    },
    FieldRule {
        field: CONTENT,
        kind: FieldKind::Text,
    },
    FieldRule {
        field: PRICE,
        kind: FieldKind::Integer,
    },
];

/// The rule a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    String,
    Integer,
}

impl Rule {
    pub fn as_str(self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::String => "string",
            Rule::Integer => "integer",
        }
    }
}

/// A single failed rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub rule: Rule,
}

impl Violation {
    /// Human-readable message for this violation.
    pub fn message(&self) -> String {
        match self.rule {
            Rule::Required => format!("The {} field is required.", self.field),
            Rule::String => format!("The {} field must be a string.", self.field),
            Rule::Integer => format!("The {} field must be an integer.", self.field),
        }
    }
}

/// Validation failure carrying every violated rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Messages grouped by field name.
    pub fn field_messages(&self) -> BTreeMap<String, Vec<String>> {
        let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for violation in &self.violations {
            grouped
                .entry(violation.field.to_string())
                .or_default()
                .push(violation.message());
        }
        grouped
    }

    /// First violation message, suffixed with the number of remaining ones.
    pub fn summary(&self) -> String {
        let Some(first) = self.violations.first() else {
            return "The given data was invalid.".to_string();
        };

        match self.violations.len() - 1 {
            0 => first.message(),
            1 => format!("{} (and 1 more error)", first.message()),
            more => format!("{} (and {} more errors)", first.message(), more),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

impl std::error::Error for ValidationError {}

enum Checked {
    Text(String),
    Integer(i64),
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

fn check(value: Option<&Value>, kind: FieldKind) -> Result<Checked, Rule> {
    if is_missing(value) {
        return Err(Rule::Required);
    }

    match (kind, value) {
        (FieldKind::Text, Some(Value::String(s))) => Ok(Checked::Text(s.clone())),
        (FieldKind::Text, _) => Err(Rule::String),
        (FieldKind::Integer, Some(Value::Number(n))) => {
            n.as_i64().map(Checked::Integer).ok_or(Rule::Integer)
        }
        // Form submissions send numbers as strings.
        (FieldKind::Integer, Some(Value::String(s))) => {
            parse_integer(s).map(Checked::Integer).ok_or(Rule::Integer)
        }
        (FieldKind::Integer, _) => Err(Rule::Integer),
    }
}

/// Parses a decimal integer string: optional sign, no leading zeros.
fn parse_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }

    trimmed.parse().ok()
}

fn take_text(values: &mut HashMap<&'static str, Checked>, field: &str) -> Option<String> {
    match values.remove(field) {
        Some(Checked::Text(s)) => Some(s),
        _ => None,
    }
}

fn take_integer(values: &mut HashMap<&'static str, Checked>, field: &str) -> Option<i64> {
    match values.remove(field) {
        Some(Checked::Integer(n)) => Some(n),
        _ => None,
    }
}

/// Validate a raw field mapping into a [`NewPost`].
///
/// Unknown fields are ignored. No defaults are substituted for missing fields.
pub fn validate_new_post(fields: &Map<String, Value>) -> Result<NewPost, ValidationError> {
    let mut violations = Vec::new();
    let mut values = HashMap::with_capacity(POST_RULES.len());

    for rule in POST_RULES {
        match check(fields.get(rule.field), rule.kind) {
            Ok(value) => {
                values.insert(rule.field, value);
            }
            Err(failed) => violations.push(Violation {
                field: rule.field,
                rule: failed,
            }),
        }
    }

    match (
        take_text(&mut values, TITLE),
        take_text(&mut values, CONTENT),
        take_integer(&mut values, PRICE),
    ) {
        (Some(title), Some(content), Some(price)) if violations.is_empty() => {
            Ok(NewPost::new(title, content, price))
        }
        _ => Err(ValidationError::new(violations)),
    }
}
