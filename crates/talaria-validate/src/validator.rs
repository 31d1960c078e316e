//! The validation adapter.
//!
//! [`Validator`] turns schema violations into the typed error taxonomy:
//! every failure is a `Validation`-kind [`TalariaError`] with the fixed
//! top-level message `"Request validation failed"` and a details map of
//! dotted field path to per-field message. Bodies, query parameters, and
//! path parameters all go through the identical collect-all / strip-unknown
//! policy.

use crate::schema::Schema;
use serde_json::Value;
use std::collections::HashMap;
use talaria_core::{Details, TalariaError, TalariaResult};

/// Top-level message carried by every validation failure.
pub const VALIDATION_FAILED_MESSAGE: &str = "Request validation failed";

/// Validates untyped input against caller-supplied schemas.
#[derive(Debug)]
pub struct Validator;

impl Validator {
    /// Validates a deserialized request body.
    ///
    /// On success returns the sanitized value: undeclared fields stripped
    /// and declared defaults applied.
    ///
    /// # Errors
    ///
    /// Returns a `Validation`-kind [`TalariaError`] whose details map every
    /// offending field's dotted path to its message.
    pub fn validate_body(schema: &Schema, value: &Value) -> TalariaResult<Value> {
        let outcome = schema.check(value);
        if outcome.violations.is_empty() {
            return Ok(outcome.value);
        }

        let mut details = Details::new();
        for violation in outcome.violations {
            // Later violations for the same field win, matching the
            // reduce-into-a-map shape of the wire contract.
            details.insert(violation.path, Value::String(violation.message));
        }

        Err(TalariaError::validation_with_details(
            VALIDATION_FAILED_MESSAGE,
            details,
        ))
    }

    /// Validates query string parameters.
    ///
    /// Same operation as [`Self::validate_body`] applied to a string-map
    /// source.
    ///
    /// # Errors
    ///
    /// See [`Self::validate_body`].
    pub fn validate_query(
        schema: &Schema,
        params: &HashMap<String, String>,
    ) -> TalariaResult<Value> {
        Self::validate_body(schema, &string_map_to_value(params))
    }

    /// Validates path parameters.
    ///
    /// Same operation as [`Self::validate_body`] applied to a string-map
    /// source.
    ///
    /// # Errors
    ///
    /// See [`Self::validate_body`].
    pub fn validate_params(
        schema: &Schema,
        params: &HashMap<String, String>,
    ) -> TalariaResult<Value> {
        Self::validate_body(schema, &string_map_to_value(params))
    }
}

fn string_map_to_value(params: &HashMap<String, String>) -> Value {
    Value::Object(
        params
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use talaria_core::ErrorKind;

    fn user_schema() -> Schema {
        Schema::object(vec![
            ("name", Schema::string().required()),
            ("email", Schema::string().email().required()),
        ])
    }

    #[test]
    fn test_valid_body_returns_sanitized_value() {
        let value = Validator::validate_body(
            &user_schema(),
            &json!({"name": "John", "email": "john@example.com", "extra": 1}),
        )
        .expect("validation should pass");

        assert_eq!(value["name"], "John");
        assert!(value.get("extra").is_none());
    }

    #[test]
    fn test_missing_email_yields_single_detail() {
        let err = Validator::validate_body(&user_schema(), &json!({"name": "John"}))
            .expect_err("validation should fail");

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.message(), VALIDATION_FAILED_MESSAGE);

        let details = err.details().expect("details should be present");
        assert_eq!(details.len(), 1);
        assert_eq!(details["email"], "\"email\" is required");
    }

    #[test]
    fn test_all_field_errors_surfaced() {
        let err = Validator::validate_body(&user_schema(), &json!({}))
            .expect_err("validation should fail");

        let details = err.details().expect("details should be present");
        assert_eq!(details.len(), 2);
        assert!(details.contains_key("name"));
        assert!(details.contains_key("email"));
    }

    #[test]
    fn test_nested_detail_keys_are_dotted() {
        let schema = Schema::object(vec![(
            "address",
            Schema::object(vec![("zip", Schema::string().required())]).required(),
        )]);

        let err = Validator::validate_body(&schema, &json!({"address": {}}))
            .expect_err("validation should fail");
        let details = err.details().expect("details should be present");
        assert!(details.contains_key("address.zip"));
    }

    #[test]
    fn test_query_shares_body_policy() {
        let schema = Schema::object(vec![
            ("limit", Schema::integer().default_value(10)),
            ("cursor", Schema::string()),
        ]);

        let mut params = HashMap::new();
        params.insert("limit".to_string(), "25".to_string());
        params.insert("unknown".to_string(), "x".to_string());

        let value = Validator::validate_query(&schema, &params).expect("query should validate");
        assert_eq!(value["limit"], 25);
        assert!(value.get("unknown").is_none());
    }

    #[test]
    fn test_query_defaults_applied() {
        let schema = Schema::object(vec![("limit", Schema::integer().default_value(10))]);
        let value = Validator::validate_query(&schema, &HashMap::new())
            .expect("query should validate");
        assert_eq!(value["limit"], 10);
    }

    #[test]
    fn test_params_invalid_value_fails() {
        let schema = Schema::object(vec![("userId", Schema::integer().required())]);

        let mut params = HashMap::new();
        params.insert("userId".to_string(), "abc".to_string());

        let err = Validator::validate_params(&schema, &params)
            .expect_err("params should fail validation");
        let details = err.details().expect("details should be present");
        assert_eq!(details["userId"], "\"userId\" must be an integer");
    }
}
