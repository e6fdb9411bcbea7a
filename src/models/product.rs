//! Product entity and field validation
//!
//! A `Product` is one stored row. A `ProductDraft` is the validated payload of
//! a create or update request: every field checked, but no id yet. Parsing a
//! draft from an untyped JSON value is an explicit parse-and-range-check; no
//! failure ever escapes as anything but a `DataValidationError`.

use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;
use thiserror::Error;

/// Maximum length of a product name.
pub const NAME_MAX_LEN: usize = 20;

/// Maximum length of a product description.
pub const DESCRIPTION_MAX_LEN: usize = 256;

/// Validation failures for client-supplied product data.
///
/// Each variant is attributed to the offending field; the display strings are
/// the messages surfaced to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataValidationError {
    /// A required key was absent from the request body
    #[error("Invalid product: missing {0}")]
    MissingField(&'static str),

    /// The body was not a JSON object at all
    #[error("Invalid product: body of request contained bad or no data")]
    BadBody,

    /// A string field held a non-string value
    #[error("Invalid type for string [{0}]")]
    InvalidString(&'static str),

    /// An integer field held something that is neither an integer nor a
    /// digit-only string
    #[error("Invalid type for integer [{field}]: {found}")]
    InvalidInteger {
        field: &'static str,
        found: &'static str,
    },

    /// Price parsed but was negative
    #[error("Price should be a non-negative value")]
    NegativePrice,

    /// Like counter parsed but was negative
    #[error("Like should be a non-negative value")]
    NegativeLike,

    /// Name length outside [1, 20]
    #[error("Invalid product: name must be between 1 and {NAME_MAX_LEN} characters")]
    NameLength,

    /// Description longer than 256 characters
    #[error("Invalid product: description must be at most {DESCRIPTION_MAX_LEN} characters")]
    DescriptionTooLong,
}

/// One Product row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Product {
    /// Surrogate primary key, assigned by the store on insert
    pub id: i64,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: i64,
    /// Like counter; mutated only by the like operation
    pub like: i64,
}

impl Product {
    /// Attach a store-assigned id to a validated draft.
    pub fn from_draft(id: i64, draft: ProductDraft) -> Self {
        Self {
            id,
            name: draft.name,
            category: draft.category,
            description: draft.description,
            price: draft.price,
            like: draft.like,
        }
    }
}

/// A fully validated product payload, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: i64,
    pub like: i64,
}

impl ProductDraft {
    /// Validate an untyped JSON body into a draft.
    ///
    /// Any `id` in the body is ignored: ids are store-assigned on create and
    /// path-supplied on update, never taken from the payload.
    pub fn parse(body: &Value) -> Result<Self, DataValidationError> {
        let obj = body.as_object().ok_or(DataValidationError::BadBody)?;

        let category = require_string(obj, "category")?;

        let description = require_string(obj, "description")?;
        if description.chars().count() > DESCRIPTION_MAX_LEN {
            return Err(DataValidationError::DescriptionTooLong);
        }

        // `like` defaults to 0 when absent; `price` has no default and an
        // absent key surfaces through the integer type check.
        let like = match obj.get("like") {
            None => 0,
            Some(value) => parse_integer("like", value)?,
        };
        if like < 0 {
            return Err(DataValidationError::NegativeLike);
        }

        let price = parse_integer("price", obj.get("price").unwrap_or(&Value::Null))?;
        if price < 0 {
            return Err(DataValidationError::NegativePrice);
        }

        let name = require_string(obj, "name")?;
        let name_len = name.chars().count();
        if name_len == 0 || name_len > NAME_MAX_LEN {
            return Err(DataValidationError::NameLength);
        }

        Ok(Self {
            name,
            category,
            description,
            price,
            like,
        })
    }
}

fn require_string(
    obj: &serde_json::Map<String, Value>,
    key: &'static str,
) -> Result<String, DataValidationError> {
    match obj.get(key) {
        None => Err(DataValidationError::MissingField(key)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(DataValidationError::InvalidString(key)),
    }
}

/// Accepts an integer, or a non-empty string of only ASCII digits coerced to
/// one. Everything else is an invalid-type failure naming the JSON type found.
fn parse_integer(field: &'static str, value: &Value) -> Result<i64, DataValidationError> {
    let invalid = |found| DataValidationError::InvalidInteger { field, found };

    match value {
        Value::Number(n) => n.as_i64().ok_or_else(|| invalid("number")),
        Value::String(s) => {
            if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
                s.parse::<i64>().map_err(|_| invalid("string"))
            } else {
                Err(invalid("string"))
            }
        }
        Value::Null => Err(invalid("null")),
        Value::Bool(_) => Err(invalid("boolean")),
        Value::Array(_) => Err(invalid("array")),
        Value::Object(_) => Err(invalid("object")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_body() -> Value {
        json!({
            "name": "iPhone",
            "category": "electronics",
            "description": "a phone",
            "price": 120,
        })
    }

    #[test]
    fn test_parse_valid_body() {
        let draft = ProductDraft::parse(&valid_body()).unwrap();
        assert_eq!(draft.name, "iPhone");
        assert_eq!(draft.category, "electronics");
        assert_eq!(draft.price, 120);
        assert_eq!(draft.like, 0, "like defaults to 0 when absent");
    }

    #[test]
    fn test_parse_digit_string_price() {
        let mut body = valid_body();
        body["price"] = json!("250");
        let draft = ProductDraft::parse(&body).unwrap();
        assert_eq!(draft.price, 250);
    }

    #[test]
    fn test_parse_explicit_like() {
        let mut body = valid_body();
        body["like"] = json!("17");
        let draft = ProductDraft::parse(&body).unwrap();
        assert_eq!(draft.like, 17);
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut body = valid_body();
        body["price"] = json!(-5);
        let err = ProductDraft::parse(&body).unwrap_err();
        assert_eq!(err, DataValidationError::NegativePrice);
        assert_eq!(err.to_string(), "Price should be a non-negative value");
    }

    #[test]
    fn test_negative_like_rejected() {
        let mut body = valid_body();
        body["like"] = json!(-1);
        let err = ProductDraft::parse(&body).unwrap_err();
        assert_eq!(err, DataValidationError::NegativeLike);
        assert_eq!(err.to_string(), "Like should be a non-negative value");
    }

    #[test]
    fn test_non_numeric_price_rejected() {
        let mut body = valid_body();
        body["price"] = json!("s");
        let err = ProductDraft::parse(&body).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid type for integer [price]: string"
        );
    }

    #[test]
    fn test_missing_price_reported_as_invalid_type() {
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("price");
        let err = ProductDraft::parse(&body).unwrap_err();
        assert_eq!(err.to_string(), "Invalid type for integer [price]: null");
    }

    #[test]
    fn test_missing_category() {
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("category");
        let err = ProductDraft::parse(&body).unwrap_err();
        assert_eq!(err, DataValidationError::MissingField("category"));
        assert_eq!(err.to_string(), "Invalid product: missing category");
    }

    #[test]
    fn test_name_too_long() {
        let mut body = valid_body();
        body["name"] = json!("Abcdefghijklmnopqrstuv");
        let err = ProductDraft::parse(&body).unwrap_err();
        assert_eq!(err, DataValidationError::NameLength);
    }

    #[test]
    fn test_empty_name() {
        let mut body = valid_body();
        body["name"] = json!("");
        let err = ProductDraft::parse(&body).unwrap_err();
        assert_eq!(err, DataValidationError::NameLength);
    }

    #[test]
    fn test_name_at_max_length_accepted() {
        let mut body = valid_body();
        body["name"] = json!("a".repeat(20));
        assert!(ProductDraft::parse(&body).is_ok());
    }

    #[test]
    fn test_description_too_long() {
        let mut body = valid_body();
        body["description"] = json!("d".repeat(257));
        let err = ProductDraft::parse(&body).unwrap_err();
        assert_eq!(err, DataValidationError::DescriptionTooLong);
    }

    #[test]
    fn test_non_object_body() {
        let err = ProductDraft::parse(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(err, DataValidationError::BadBody);
        assert_eq!(
            err.to_string(),
            "Invalid product: body of request contained bad or no data"
        );
    }

    #[test]
    fn test_client_id_ignored() {
        let mut body = valid_body();
        body["id"] = json!(999);
        // Drafts carry no id at all; nothing from the payload can leak in.
        assert!(ProductDraft::parse(&body).is_ok());
    }

    #[test]
    fn test_serialize_includes_all_fields() {
        let product = Product {
            id: 3,
            name: "iPad".into(),
            category: "electronics".into(),
            description: "a tablet".into(),
            price: 200,
            like: 4,
        };
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["like"], 4);
        assert_eq!(json["category"], "electronics");
    }
}
