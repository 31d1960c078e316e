//! Declarative value schemas.
//!
//! A [`Schema`] describes the expected shape of an untyped JSON value the
//! way a gateway request contract would: typed fields, required markers,
//! simple constraints, and defaults.
//!
//! Checking a value against a schema collects **every** violation rather
//! than stopping at the first, and produces a sanitized copy of the input:
//! fields not declared in the schema are dropped, declared defaults are
//! filled in, and string inputs are coerced into declared scalar types
//! where they parse cleanly (so query and path parameters, which always
//! arrive as strings, can share the same schemas as bodies).
//!
//! # Example
//!
//! ```
//! use talaria_validate::Schema;
//!
//! let schema = Schema::object(vec![
//!     ("name", Schema::string().required()),
//!     ("email", Schema::string().email().required()),
//!     ("age", Schema::integer().minimum(0)),
//! ]);
//!
//! let outcome = schema.check(&serde_json::json!({"name": "John"}));
//! assert_eq!(outcome.violations.len(), 1);
//! assert_eq!(outcome.violations[0].path, "email");
//! ```

use serde_json::{Map, Value};
use std::sync::OnceLock;

/// A single schema violation: the dotted path of the offending field and a
/// human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Dotted field path (e.g. `address.zip`).
    pub path: String,
    /// Human-readable message for that field.
    pub message: String,
}

/// The outcome of checking a value against a schema.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    /// The sanitized value: undeclared fields stripped, defaults applied,
    /// clean string-to-scalar coercions performed. Only meaningful when
    /// `violations` is empty.
    pub value: Value,
    /// Every violation found, in declaration order.
    pub violations: Vec<Violation>,
}

/// A declarative schema for an untyped value.
#[derive(Debug, Clone)]
pub struct Schema {
    kind: SchemaKind,
    required: bool,
    default: Option<Value>,
}

#[derive(Debug, Clone)]
enum SchemaKind {
    String {
        min_length: Option<usize>,
        max_length: Option<usize>,
        email: bool,
    },
    Integer {
        minimum: Option<i64>,
        maximum: Option<i64>,
    },
    Number {
        minimum: Option<f64>,
        maximum: Option<f64>,
    },
    Boolean,
    Array {
        items: Box<Schema>,
    },
    Object {
        // Declaration order is preserved so violation order is stable.
        properties: Vec<(String, Schema)>,
    },
}

impl Schema {
    /// Creates a string schema.
    #[must_use]
    pub fn string() -> Self {
        Self::new(SchemaKind::String {
            min_length: None,
            max_length: None,
            email: false,
        })
    }

    /// Creates an integer schema.
    #[must_use]
    pub fn integer() -> Self {
        Self::new(SchemaKind::Integer {
            minimum: None,
            maximum: None,
        })
    }

    /// Creates a number schema.
    #[must_use]
    pub fn number() -> Self {
        Self::new(SchemaKind::Number {
            minimum: None,
            maximum: None,
        })
    }

    /// Creates a boolean schema.
    #[must_use]
    pub fn boolean() -> Self {
        Self::new(SchemaKind::Boolean)
    }

    /// Creates an array schema with the given item schema.
    #[must_use]
    pub fn array(items: Schema) -> Self {
        Self::new(SchemaKind::Array {
            items: Box::new(items),
        })
    }

    /// Creates an object schema from a list of (name, schema) pairs.
    #[must_use]
    pub fn object(properties: Vec<(&str, Schema)>) -> Self {
        Self::new(SchemaKind::Object {
            properties: properties
                .into_iter()
                .map(|(name, schema)| (name.to_string(), schema))
                .collect(),
        })
    }

    fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            required: false,
            default: None,
        }
    }

    /// Marks this schema as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets a default used when the field is absent or null.
    #[must_use]
    pub fn default_value(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Requires the string to look like an email address.
    ///
    /// No effect on non-string schemas.
    #[must_use]
    pub fn email(mut self) -> Self {
        if let SchemaKind::String { email, .. } = &mut self.kind {
            *email = true;
        }
        self
    }

    /// Sets the minimum string length. No effect on non-string schemas.
    #[must_use]
    pub fn min_length(mut self, min: usize) -> Self {
        if let SchemaKind::String { min_length, .. } = &mut self.kind {
            *min_length = Some(min);
        }
        self
    }

    /// Sets the maximum string length. No effect on non-string schemas.
    #[must_use]
    pub fn max_length(mut self, max: usize) -> Self {
        if let SchemaKind::String { max_length, .. } = &mut self.kind {
            *max_length = Some(max);
        }
        self
    }

    /// Sets the minimum numeric value. No effect on non-numeric schemas.
    #[must_use]
    pub fn minimum(mut self, min: i64) -> Self {
        match &mut self.kind {
            SchemaKind::Integer { minimum, .. } => *minimum = Some(min),
            #[allow(clippy::cast_precision_loss)]
            SchemaKind::Number { minimum, .. } => *minimum = Some(min as f64),
            _ => {}
        }
        self
    }

    /// Sets the maximum numeric value. No effect on non-numeric schemas.
    #[must_use]
    pub fn maximum(mut self, max: i64) -> Self {
        match &mut self.kind {
            SchemaKind::Integer { maximum, .. } => *maximum = Some(max),
            #[allow(clippy::cast_precision_loss)]
            SchemaKind::Number { maximum, .. } => *maximum = Some(max as f64),
            _ => {}
        }
        self
    }

    /// Checks `value` against this schema.
    ///
    /// Collects every violation (non-early-exit) and returns the sanitized
    /// value alongside them.
    #[must_use]
    pub fn check(&self, value: &Value) -> CheckOutcome {
        let mut violations = Vec::new();
        let sanitized = self.check_at(Some(value), "", &mut violations);
        CheckOutcome {
            value: sanitized.unwrap_or(Value::Null),
            violations,
        }
    }

    /// Checks one node. Returns the sanitized value for that node, or
    /// `None` when the field should be omitted from the output.
    fn check_at(
        &self,
        value: Option<&Value>,
        path: &str,
        violations: &mut Vec<Violation>,
    ) -> Option<Value> {
        let value = match value {
            Some(v) if !v.is_null() => v,
            _ => {
                if let Some(default) = &self.default {
                    return Some(default.clone());
                }
                if self.required {
                    violations.push(Violation {
                        path: label_path(path),
                        message: format!("\"{}\" is required", label(path)),
                    });
                }
                return None;
            }
        };

        match &self.kind {
            SchemaKind::String {
                min_length,
                max_length,
                email,
            } => self.check_string(value, path, *min_length, *max_length, *email, violations),
            SchemaKind::Integer { minimum, maximum } => {
                check_integer(value, path, *minimum, *maximum, violations)
            }
            SchemaKind::Number { minimum, maximum } => {
                check_number(value, path, *minimum, *maximum, violations)
            }
            SchemaKind::Boolean => check_boolean(value, path, violations),
            SchemaKind::Array { items } => self.check_array(value, path, items, violations),
            SchemaKind::Object { properties } => {
                self.check_object(value, path, properties, violations)
            }
        }
    }

    fn check_string(
        &self,
        value: &Value,
        path: &str,
        min_length: Option<usize>,
        max_length: Option<usize>,
        email: bool,
        violations: &mut Vec<Violation>,
    ) -> Option<Value> {
        let Some(s) = value.as_str() else {
            push(violations, path, format!("\"{}\" must be a string", label(path)));
            return None;
        };

        let mut ok = true;
        if let Some(min) = min_length {
            if s.chars().count() < min {
                push(
                    violations,
                    path,
                    format!(
                        "\"{}\" length must be at least {min} characters long",
                        label(path)
                    ),
                );
                ok = false;
            }
        }
        if let Some(max) = max_length {
            if s.chars().count() > max {
                push(
                    violations,
                    path,
                    format!(
                        "\"{}\" length must be less than or equal to {max} characters long",
                        label(path)
                    ),
                );
                ok = false;
            }
        }
        if email && !is_email(s) {
            push(
                violations,
                path,
                format!("\"{}\" must be a valid email", label(path)),
            );
            ok = false;
        }

        ok.then(|| Value::String(s.to_string()))
    }

    fn check_array(
        &self,
        value: &Value,
        path: &str,
        items: &Schema,
        violations: &mut Vec<Violation>,
    ) -> Option<Value> {
        let Some(array) = value.as_array() else {
            push(violations, path, format!("\"{}\" must be an array", label(path)));
            return None;
        };

        let before = violations.len();
        let mut sanitized = Vec::with_capacity(array.len());
        for (idx, item) in array.iter().enumerate() {
            let item_path = join(path, &idx.to_string());
            if let Some(item) = items.check_at(Some(item), &item_path, violations) {
                sanitized.push(item);
            }
        }

        (violations.len() == before).then_some(Value::Array(sanitized))
    }

    fn check_object(
        &self,
        value: &Value,
        path: &str,
        properties: &[(String, Schema)],
        violations: &mut Vec<Violation>,
    ) -> Option<Value> {
        let Some(object) = value.as_object() else {
            push(
                violations,
                path,
                format!("\"{}\" must be of type object", label(path)),
            );
            return None;
        };

        let before = violations.len();
        // Undeclared fields are dropped here, never rejected.
        let mut sanitized = Map::new();
        for (name, schema) in properties {
            let child_path = join(path, name);
            if let Some(child) = schema.check_at(object.get(name), &child_path, violations) {
                sanitized.insert(name.clone(), child);
            }
        }

        (violations.len() == before).then_some(Value::Object(sanitized))
    }
}

fn check_integer(
    value: &Value,
    path: &str,
    minimum: Option<i64>,
    maximum: Option<i64>,
    violations: &mut Vec<Violation>,
) -> Option<Value> {
    // Query and path parameters arrive as strings; coerce clean parses.
    let parsed = match value {
        Value::String(s) => s.parse::<i64>().ok(),
        _ => value.as_i64(),
    };
    let Some(n) = parsed else {
        push(violations, path, format!("\"{}\" must be an integer", label(path)));
        return None;
    };

    let mut ok = true;
    if let Some(min) = minimum {
        if n < min {
            push(
                violations,
                path,
                format!("\"{}\" must be greater than or equal to {min}", label(path)),
            );
            ok = false;
        }
    }
    if let Some(max) = maximum {
        if n > max {
            push(
                violations,
                path,
                format!("\"{}\" must be less than or equal to {max}", label(path)),
            );
            ok = false;
        }
    }

    ok.then(|| Value::from(n))
}

fn check_number(
    value: &Value,
    path: &str,
    minimum: Option<f64>,
    maximum: Option<f64>,
    violations: &mut Vec<Violation>,
) -> Option<Value> {
    let parsed = match value {
        Value::String(s) => s.parse::<f64>().ok(),
        _ => value.as_f64(),
    };
    let Some(n) = parsed else {
        push(violations, path, format!("\"{}\" must be a number", label(path)));
        return None;
    };

    let mut ok = true;
    if let Some(min) = minimum {
        if n < min {
            push(
                violations,
                path,
                format!("\"{}\" must be greater than or equal to {min}", label(path)),
            );
            ok = false;
        }
    }
    if let Some(max) = maximum {
        if n > max {
            push(
                violations,
                path,
                format!("\"{}\" must be less than or equal to {max}", label(path)),
            );
            ok = false;
        }
    }

    ok.then(|| Value::from(n))
}

fn check_boolean(value: &Value, path: &str, violations: &mut Vec<Violation>) -> Option<Value> {
    let parsed = match value {
        Value::String(s) => match s.as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => value.as_bool(),
    };
    match parsed {
        Some(b) => Some(Value::Bool(b)),
        None => {
            push(violations, path, format!("\"{}\" must be a boolean", label(path)));
            None
        }
    }
}

fn push(violations: &mut Vec<Violation>, path: &str, message: String) {
    violations.push(Violation {
        path: label_path(path),
        message,
    });
}

fn join(path: &str, segment: &str) -> String {
    if path.is_empty() {
        segment.to_string()
    } else {
        format!("{path}.{segment}")
    }
}

/// The field name used inside messages: the last path segment, or `value`
/// for the root.
fn label(path: &str) -> &str {
    if path.is_empty() {
        "value"
    } else {
        path.rsplit('.').next().unwrap_or(path)
    }
}

/// The detail key for a violation; the root maps to `value`.
fn label_path(path: &str) -> String {
    if path.is_empty() {
        "value".to_string()
    } else {
        path.to_string()
    }
}

fn is_email(s: &str) -> bool {
    static EMAIL: OnceLock<regex::Regex> = OnceLock::new();
    let re = EMAIL.get_or_init(|| {
        regex::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    });
    re.is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_object_passes() {
        let schema = Schema::object(vec![
            ("name", Schema::string().required()),
            ("age", Schema::integer()),
        ]);

        let outcome = schema.check(&json!({"name": "John", "age": 30}));
        assert!(outcome.violations.is_empty());
        assert_eq!(outcome.value, json!({"name": "John", "age": 30}));
    }

    #[test]
    fn test_missing_required_field_reports_one_violation() {
        let schema = Schema::object(vec![
            ("name", Schema::string().required()),
            ("email", Schema::string().email().required()),
        ]);

        let outcome = schema.check(&json!({"name": "John"}));
        assert_eq!(outcome.violations.len(), 1);
        assert_eq!(outcome.violations[0].path, "email");
        assert_eq!(outcome.violations[0].message, "\"email\" is required");
    }

    #[test]
    fn test_all_violations_collected() {
        let schema = Schema::object(vec![
            ("name", Schema::string().required()),
            ("email", Schema::string().email().required()),
            ("age", Schema::integer().minimum(0)),
        ]);

        let outcome = schema.check(&json!({"email": "not-an-email", "age": -1}));
        let paths: Vec<&str> = outcome.violations.iter().map(|v| v.path.as_str()).collect();
        assert_eq!(paths, vec!["name", "email", "age"]);
    }

    #[test]
    fn test_undeclared_fields_are_stripped() {
        let schema = Schema::object(vec![("name", Schema::string().required())]);

        let outcome = schema.check(&json!({"name": "John", "extra": 1}));
        assert!(outcome.violations.is_empty());
        assert_eq!(outcome.value, json!({"name": "John"}));
        assert!(outcome.value.get("extra").is_none());
    }

    #[test]
    fn test_defaults_applied_when_absent() {
        let schema = Schema::object(vec![
            ("name", Schema::string().required()),
            ("limit", Schema::integer().default_value(10)),
        ]);

        let outcome = schema.check(&json!({"name": "John"}));
        assert!(outcome.violations.is_empty());
        assert_eq!(outcome.value["limit"], 10);
    }

    #[test]
    fn test_nested_paths_are_dotted() {
        let schema = Schema::object(vec![(
            "address",
            Schema::object(vec![("zip", Schema::string().required())]),
        )]);

        let outcome = schema.check(&json!({"address": {}}));
        assert_eq!(outcome.violations.len(), 1);
        assert_eq!(outcome.violations[0].path, "address.zip");
    }

    #[test]
    fn test_array_item_paths_are_indexed() {
        let schema = Schema::object(vec![(
            "tags",
            Schema::array(Schema::string().min_length(1)),
        )]);

        let outcome = schema.check(&json!({"tags": ["ok", ""]}));
        assert_eq!(outcome.violations.len(), 1);
        assert_eq!(outcome.violations[0].path, "tags.1");
    }

    #[test]
    fn test_email_accepts_and_rejects() {
        let schema = Schema::string().email();
        assert!(schema.check(&json!("john@example.com")).violations.is_empty());
        assert_eq!(schema.check(&json!("john@example")).violations.len(), 1);
        assert_eq!(schema.check(&json!("not an email")).violations.len(), 1);
    }

    #[test]
    fn test_string_inputs_coerced_to_scalars() {
        let schema = Schema::object(vec![
            ("limit", Schema::integer()),
            ("active", Schema::boolean()),
        ]);

        let outcome = schema.check(&json!({"limit": "10", "active": "true"}));
        assert!(outcome.violations.is_empty());
        assert_eq!(outcome.value, json!({"limit": 10, "active": true}));
    }

    #[test]
    fn test_non_object_root_reports_type_violation() {
        let schema = Schema::object(vec![("name", Schema::string())]);
        let outcome = schema.check(&json!([1, 2, 3]));
        assert_eq!(outcome.violations.len(), 1);
        assert_eq!(outcome.violations[0].path, "value");
        assert_eq!(
            outcome.violations[0].message,
            "\"value\" must be of type object"
        );
    }

    #[test]
    fn test_wrong_type_and_constraint_both_reported_per_field() {
        let schema = Schema::object(vec![
            ("name", Schema::string()),
            ("count", Schema::integer().minimum(1).maximum(5)),
        ]);

        let outcome = schema.check(&json!({"name": 42, "count": 9}));
        let paths: Vec<&str> = outcome.violations.iter().map(|v| v.path.as_str()).collect();
        assert_eq!(paths, vec!["name", "count"]);
        assert_eq!(
            outcome.violations[1].message,
            "\"count\" must be less than or equal to 5"
        );
    }
}
