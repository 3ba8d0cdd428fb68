//! GraphQL response envelope
//!
//! A 2xx body carries `data`, `errors`, or both. Any entry in `errors` fails
//! the whole call; an `UNAUTHENTICATED` code is reported separately so the
//! caller can drop the session.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{DashError, DashResult};

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Vec<GraphQlErrorEntry>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlErrorEntry {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub extensions: Option<ErrorExtensions>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorExtensions {
    #[serde(default)]
    pub code: Option<String>,
}

impl GraphQlErrorEntry {
    fn code(&self) -> Option<&str> {
        self.extensions.as_ref()?.code.as_deref()
    }
}

impl GraphQlResponse {
    /// Turn the envelope into the `data` object or a classified error
    pub fn into_data(self) -> DashResult<Value> {
        if !self.errors.is_empty() {
            if let Some(entry) = self
                .errors
                .iter()
                .find(|e| e.code() == Some("UNAUTHENTICATED"))
            {
                return Err(DashError::Unauthenticated(entry.message.clone()));
            }
            let messages = self
                .errors
                .into_iter()
                .map(|e| {
                    if e.message.is_empty() {
                        "unknown error".to_string()
                    } else {
                        e.message
                    }
                })
                .collect();
            return Err(DashError::GraphQl(messages));
        }

        self.data
            .ok_or_else(|| DashError::GraphQl(vec!["response contained no data".into()]))
    }
}

/// Pull one top-level field out of `data` and decode it
///
/// A `null` or missing field decodes as `T::default()`.
pub fn take_field<T>(data: &mut Value, name: &str) -> DashResult<T>
where
    T: DeserializeOwned + Default,
{
    match data.get_mut(name).map(Value::take) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => serde_json::from_value(value).map_err(|e| {
            DashError::Json(format!("Unexpected shape for '{}': {}", name, e))
        }),
    }
}

/// Like [`take_field`] but a missing value is an error
pub fn require_field<T>(data: &mut Value, name: &str) -> DashResult<T>
where
    T: DeserializeOwned,
{
    match data.get_mut(name).map(Value::take) {
        None | Some(Value::Null) => Err(DashError::GraphQl(vec![format!(
            "'{}' was null in the response",
            name
        )])),
        Some(value) => serde_json::from_value(value).map_err(|e| {
            DashError::Json(format!("Unexpected shape for '{}': {}", name, e))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: Value) -> GraphQlResponse {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_data_passes_through() {
        let data = parse(json!({"data": {"healthCheck": "ok"}}))
            .into_data()
            .unwrap();
        assert_eq!(data["healthCheck"], "ok");
    }

    #[test]
    fn test_errors_fail_even_with_data() {
        let err = parse(json!({
            "data": {"transactions": null},
            "errors": [{"message": "month out of range"}, {"message": ""}]
        }))
        .into_data()
        .unwrap_err();

        match err {
            DashError::GraphQl(messages) => {
                assert_eq!(messages, vec!["month out of range", "unknown error"])
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unauthenticated_code() {
        let err = parse(json!({
            "errors": [{"message": "jwt expired", "extensions": {"code": "UNAUTHENTICATED"}}]
        }))
        .into_data()
        .unwrap_err();
        assert!(err.is_auth_failure());
    }

    #[test]
    fn test_take_field_null_is_default() {
        let mut data = json!({"savingsGoals": null});
        let goals: Vec<String> = take_field(&mut data, "savingsGoals").unwrap();
        assert!(goals.is_empty());

        let missing: Vec<String> = take_field(&mut data, "tenants").unwrap();
        assert!(missing.is_empty());
    }

    #[test]
    fn test_require_field_null_is_error() {
        let mut data = json!({"login": null});
        let err = require_field::<Value>(&mut data, "login").unwrap_err();
        assert!(err.is_fetch_failure());
    }
}
