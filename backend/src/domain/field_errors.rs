//! Accumulator for per-field validation failures.

use std::collections::BTreeMap;

use serde_json::{Value, json};

use super::Error;

/// Field-keyed validation failures, rendered into error details as
/// `{"fields": {"<field>": [{"code": .., "message": ..}]}}`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldErrors {
    fields: BTreeMap<&'static str, Vec<(&'static str, String)>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, code: &'static str, message: impl Into<String>) {
        self.fields
            .entry(field)
            .or_default()
            .push((code, message.into()));
    }

    /// Keep the `Ok` value, or record the failure and return `None`.
    pub fn collect<T, E>(&mut self, field: &'static str, result: Result<T, E>) -> Option<T>
    where
        E: FieldError,
    {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.push(field, err.code(), err.to_string());
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Convert into an `invalid_request` error, or `Ok(())` when empty.
    pub fn into_result(self) -> Result<(), Error> {
        if self.is_empty() {
            return Ok(());
        }
        let fields: serde_json::Map<String, Value> = self
            .fields
            .into_iter()
            .map(|(field, entries)| {
                let entries = entries
                    .into_iter()
                    .map(|(code, message)| json!({ "code": code, "message": message }))
                    .collect();
                (field.to_owned(), Value::Array(entries))
            })
            .collect();
        Err(Error::invalid_request("request payload failed validation")
            .with_details(json!({ "fields": fields })))
    }
}

/// Validation error with a stable machine-readable code.
pub trait FieldError: std::fmt::Display {
    fn code(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;

    #[derive(Debug)]
    struct Blank;

    impl std::fmt::Display for Blank {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("may not be blank")
        }
    }

    impl FieldError for Blank {
        fn code(&self) -> &'static str {
            "blank"
        }
    }

    #[test]
    fn empty_collection_is_ok() {
        assert!(FieldErrors::new().into_result().is_ok());
    }

    #[test]
    fn renders_every_failed_field() {
        let mut errors = FieldErrors::new();
        assert_eq!(errors.collect("title", Ok::<_, Blank>("t")), Some("t"));
        assert_eq!(errors.collect::<(), _>("code", Err(Blank)), None);
        errors.push("language", "invalid_choice", "\"cobol\" is not a valid choice");
        assert!(errors.contains("code") && !errors.contains("title"));

        let err = errors.into_result().expect_err("failures present");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let details = err.details().expect("details");
        assert_eq!(details["fields"]["code"][0]["code"], "blank");
        assert_eq!(details["fields"]["code"][0]["message"], "may not be blank");
        assert_eq!(details["fields"]["language"][0]["code"], "invalid_choice");
        assert!(details["fields"].get("title").is_none());
    }
}
