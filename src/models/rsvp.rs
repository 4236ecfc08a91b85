//! RSVP records and their validation.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A stored response to an invitation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Rsvp {
    /// Identifier assigned by the store
    #[serde(rename = "_id")]
    pub id: Uuid,

    pub name: String,

    pub phone: String,

    /// Whether the guest brings a companion
    pub plus_one: bool,

    pub created_at: DateTime<Utc>,
}

impl Rsvp {
    /// Assign an identifier to a validated record.
    pub fn from_new(new: NewRsvp) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: new.name,
            phone: new.phone,
            plus_one: new.plus_one,
            created_at: new.created_at,
        }
    }
}

/// A validated record that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRsvp {
    pub name: String,
    pub phone: String,
    pub plus_one: bool,
    pub created_at: DateTime<Utc>,
}

/// Why a single field was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldProblem {
    Missing,
    WrongType { expected: &'static str },
}

/// A validation failure for one field of an incoming record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub problem: FieldProblem,
}

impl FieldError {
    fn missing(field: &'static str) -> Self {
        Self {
            field,
            problem: FieldProblem::Missing,
        }
    }

    fn wrong_type(field: &'static str, expected: &'static str) -> Self {
        Self {
            field,
            problem: FieldProblem::WrongType { expected },
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.problem {
            FieldProblem::Missing => write!(f, "Path `{}` is required.", self.field),
            FieldProblem::WrongType { expected } => {
                write!(f, "Cast to {expected} failed for path `{}`", self.field)
            }
        }
    }
}

/// Validate an incoming JSON body into a [`NewRsvp`].
///
/// Strings and numbers are accepted for `name` and `phone`; an empty string
/// counts as missing. `plusOne` takes a boolean, `1`/`0`, or one of the strings
/// `"true"`, `"1"`, `"yes"` / `"false"`, `"0"`, `"no"`.
/// `createdAt` is optional and defaults to `now`. Every failing field is
/// reported, not just the first one.
pub fn validate_rsvp(body: &Value, now: DateTime<Utc>) -> Result<NewRsvp, Vec<FieldError>> {
    let mut errors = Vec::new();

    let Some(object) = body.as_object() else {
        return Err(vec![
            FieldError::missing("name"),
            FieldError::missing("phone"),
            FieldError::missing("plusOne"),
        ]);
    };

    let name = required_string(object.get("name"), "name", &mut errors);
    let phone = required_string(object.get("phone"), "phone", &mut errors);
    let plus_one = required_bool(object.get("plusOne"), "plusOne", &mut errors);

    let created_at = match object.get("createdAt") {
        None | Some(Value::Null) => Some(now),
        Some(Value::String(s)) => match DateTime::parse_from_rfc3339(s) {
            Ok(dt) => Some(dt.with_timezone(&Utc)),
            Err(_) => {
                errors.push(FieldError::wrong_type("createdAt", "Date"));
                None
            }
        },
        Some(_) => {
            errors.push(FieldError::wrong_type("createdAt", "Date"));
            None
        }
    };

    match (name, phone, plus_one, created_at) {
        (Some(name), Some(phone), Some(plus_one), Some(created_at)) if errors.is_empty() => {
            Ok(NewRsvp {
                name,
                phone,
                plus_one,
                created_at,
            })
        }
        _ => Err(errors),
    }
}

fn required_string(
    value: Option<&Value>,
    field: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match value {
        None | Some(Value::Null) => {
            errors.push(FieldError::missing(field));
            None
        }
        Some(Value::String(s)) if s.is_empty() => {
            errors.push(FieldError::missing(field));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(_) => {
            errors.push(FieldError::wrong_type(field, "string"));
            None
        }
    }
}

fn required_bool(
    value: Option<&Value>,
    field: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<bool> {
    let parsed = match value {
        None | Some(Value::Null) => {
            errors.push(FieldError::missing(field));
            return None;
        }
        Some(Value::Bool(b)) => Some(*b),
        Some(Value::String(s)) => match s.as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        Some(Value::Number(n)) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        Some(_) => None,
    };

    if parsed.is_none() {
        errors.push(FieldError::wrong_type(field, "Boolean"));
    }
    parsed
}
