//! Email entity and request bodies

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A registered email address.
///
/// `id` is assigned by storage on insert and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct Email {
    #[schema(example = 1)]
    pub id: i32,

    #[serde(rename = "emailName")]
    #[schema(example = "student@theforumuniversity.com")]
    pub name: String,
}

/// Request body for create and update.
///
/// Any `id` sent by the client is ignored.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct EmailInput {
    #[serde(rename = "emailName", alias = "name")]
    #[schema(example = "student@theforumuniversity.com")]
    pub name: String,
}

impl EmailInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_serializes_with_email_name_field() {
        let email = Email {
            id: 7,
            name: "a@x.com".into(),
        };
        let json = serde_json::to_value(&email).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 7, "emailName": "a@x.com" }));
    }

    #[test]
    fn input_ignores_client_id() {
        let input: EmailInput =
            serde_json::from_str(r#"{"id": 99, "emailName": "a@x.com"}"#).unwrap();
        assert_eq!(input.name, "a@x.com");
    }

    #[test]
    fn input_accepts_name_alias() {
        let input: EmailInput = serde_json::from_str(r#"{"name": "b@x.com"}"#).unwrap();
        assert_eq!(input.name, "b@x.com");
    }

    #[test]
    fn input_requires_a_name() {
        assert!(serde_json::from_str::<EmailInput>(r#"{"id": 1}"#).is_err());
    }
}
