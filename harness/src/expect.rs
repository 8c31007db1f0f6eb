//! Response expectations.
//!
//! An [`Expectation`] is the predicate half of a check: it inspects an
//! [`ApiResponse`] and produces a [`Verdict`]. Expectations only look at
//! status codes, key presence and a handful of simple values; the shape of
//! the catalog and form payloads is owned by the API itself.

use chrono::{DateTime, FixedOffset};
use client::ApiResponse;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Pass(String),
    Fail {
        message: String,
        detail: Option<Value>,
    },
}

impl Verdict {
    pub fn fail(message: impl Into<String>, detail: Option<Value>) -> Self {
        Verdict::Fail {
            message: message.into(),
            detail,
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expectation {
    /// Only the status code matters.
    Status(u16),
    /// A JSON object carrying every `required` key.
    Object { status: u16, required: Vec<String> },
    /// A JSON object whose `field` equals `value`.
    FieldEquals {
        status: u16,
        field: String,
        value: Value,
    },
    /// A JSON array, optionally of an exact length, whose items all carry
    /// `item_fields`. With `descending_by` the items must be ordered
    /// newest-first by that RFC 3339 timestamp field.
    Collection {
        status: u16,
        len: Option<usize>,
        item_fields: Vec<String>,
        descending_by: Option<String>,
    },
    /// `success: true` plus a non-empty generated identifier in `id_field`.
    Created { status: u16, id_field: String },
    /// A client-error status with an explicit `error` key.
    Rejected { status: u16 },
    /// Every named header is present. Status is ignored.
    Headers(Vec<String>),
}

impl Expectation {
    pub fn object(status: u16, required: &[&str]) -> Self {
        Expectation::Object {
            status,
            required: to_strings(required),
        }
    }

    pub fn field_equals(status: u16, field: &str, value: Value) -> Self {
        Expectation::FieldEquals {
            status,
            field: field.to_string(),
            value,
        }
    }

    pub fn collection(status: u16, len: Option<usize>, item_fields: &[&str]) -> Self {
        Expectation::Collection {
            status,
            len,
            item_fields: to_strings(item_fields),
            descending_by: None,
        }
    }

    pub fn newest_first_by(self, field: &str) -> Self {
        match self {
            Expectation::Collection {
                status,
                len,
                item_fields,
                ..
            } => Expectation::Collection {
                status,
                len,
                item_fields,
                descending_by: Some(field.to_string()),
            },
            other => other,
        }
    }

    pub fn created(status: u16, id_field: &str) -> Self {
        Expectation::Created {
            status,
            id_field: id_field.to_string(),
        }
    }

    pub fn headers(names: &[&str]) -> Self {
        Expectation::Headers(to_strings(names))
    }

    pub fn evaluate(&self, response: &ApiResponse) -> Verdict {
        let expected_status = match self {
            Expectation::Headers(names) => return evaluate_headers(names, response),
            Expectation::Status(status)
            | Expectation::Object { status, .. }
            | Expectation::FieldEquals { status, .. }
            | Expectation::Collection { status, .. }
            | Expectation::Created { status, .. }
            | Expectation::Rejected { status } => *status,
        };

        if response.status != expected_status {
            return Verdict::fail(
                format!("Expected {}, got HTTP {}", expected_status, response.status),
                Some(response.payload()),
            );
        }

        if matches!(self, Expectation::Status(_)) {
            return Verdict::Pass(format!("Correctly returned {}", expected_status));
        }

        let body = match response.json() {
            Ok(body) => body,
            Err(e) => {
                return Verdict::fail(e.to_string(), Some(Value::String(response.text.clone())))
            }
        };

        match self {
            Expectation::Object { required, .. } => evaluate_object(required, &body),
            Expectation::FieldEquals { field, value, .. } => {
                evaluate_field_equals(field, value, &body)
            }
            Expectation::Collection {
                len,
                item_fields,
                descending_by,
                ..
            } => evaluate_collection(*len, item_fields, descending_by.as_deref(), &body),
            Expectation::Created { id_field, .. } => evaluate_created(id_field, &body),
            Expectation::Rejected { status } => evaluate_rejected(*status, &body),
            Expectation::Status(_) | Expectation::Headers(_) => {
                Verdict::Pass(format!("Correctly returned {}", expected_status))
            }
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn missing_fields(object: &Map<String, Value>, required: &[String]) -> Vec<String> {
    required
        .iter()
        .filter(|field| !object.contains_key(field.as_str()))
        .cloned()
        .collect()
}

fn evaluate_headers(names: &[String], response: &ApiResponse) -> Verdict {
    let missing: Vec<&str> = names
        .iter()
        .map(String::as_str)
        .filter(|name| !response.has_header(name))
        .collect();

    if missing.is_empty() {
        Verdict::Pass(format!("All {} required headers are present", names.len()))
    } else {
        Verdict::fail(format!("Missing headers: {}", missing.join(", ")), None)
    }
}

fn evaluate_object(required: &[String], body: &Value) -> Verdict {
    let Some(object) = body.as_object() else {
        return Verdict::fail("Response is not a JSON object", Some(body.clone()));
    };

    let missing = missing_fields(object, required);
    if !missing.is_empty() {
        return Verdict::fail(
            format!("Response missing required fields: {}", missing.join(", ")),
            Some(body.clone()),
        );
    }

    let mut message = format!("Response carries {}", required.join(", "));
    if let Some(endpoints) = object.get("endpoints").and_then(Value::as_array) {
        message = format!("API info returned with {} endpoints", endpoints.len());
    }
    Verdict::Pass(message)
}

fn evaluate_field_equals(field: &str, expected: &Value, body: &Value) -> Verdict {
    match body.get(field) {
        Some(actual) if actual == expected => {
            let label = body
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or("Unknown");
            Verdict::Pass(format!("Retrieved {} = {} ({})", field, actual, label))
        }
        Some(actual) => Verdict::fail(
            format!("Expected {} = {}, got {}", field, expected, actual),
            Some(body.clone()),
        ),
        None => Verdict::fail(
            format!("Response missing required fields: {}", field),
            Some(body.clone()),
        ),
    }
}

fn evaluate_collection(
    len: Option<usize>,
    item_fields: &[String],
    descending_by: Option<&str>,
    body: &Value,
) -> Verdict {
    let Some(items) = body.as_array() else {
        return Verdict::fail("Response is not a list", Some(body.clone()));
    };

    if let Some(expected) = len {
        if items.len() != expected {
            return Verdict::fail(
                format!("Expected {} items, got {}", expected, items.len()),
                Some(body.clone()),
            );
        }
    }

    for (index, item) in items.iter().enumerate() {
        let Some(object) = item.as_object() else {
            return Verdict::fail(format!("Item {} is not an object", index), Some(item.clone()));
        };
        let missing = missing_fields(object, item_fields);
        if !missing.is_empty() {
            return Verdict::fail(
                format!("Item {} missing fields: {}", index, missing.join(", ")),
                Some(item.clone()),
            );
        }
    }

    if let Some(field) = descending_by {
        if let Err(verdict) = check_newest_first(items, field) {
            return verdict;
        }
    }

    Verdict::Pass(format!(
        "Retrieved {} items with all required fields",
        items.len()
    ))
}

fn check_newest_first(items: &[Value], field: &str) -> Result<(), Verdict> {
    let mut previous: Option<DateTime<FixedOffset>> = None;
    for (index, item) in items.iter().enumerate() {
        let raw = item.get(field).and_then(Value::as_str).unwrap_or_default();
        let current = DateTime::parse_from_rfc3339(raw).map_err(|e| {
            Verdict::fail(
                format!("Item {} has unparseable {}: {}", index, field, e),
                Some(item.clone()),
            )
        })?;
        if let Some(prev) = previous {
            if current > prev {
                return Err(Verdict::fail(
                    format!("Items not ordered newest first at index {}", index),
                    Some(item.clone()),
                ));
            }
        }
        previous = Some(current);
    }
    Ok(())
}

fn evaluate_created(id_field: &str, body: &Value) -> Verdict {
    if body.get("success").and_then(Value::as_bool) != Some(true) {
        return Verdict::fail("Response missing success confirmation", Some(body.clone()));
    }

    let id = match body.get(id_field) {
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => {
            return Verdict::fail(
                format!("Response missing generated {}", id_field),
                Some(body.clone()),
            )
        }
    };

    Verdict::Pass(format!("Submitted successfully with {}: {}", id_field, id))
}

fn evaluate_rejected(status: u16, body: &Value) -> Verdict {
    if body.get("error").is_some() {
        Verdict::Pass(format!("Correctly rejected with {}", status))
    } else {
        Verdict::fail(
            format!("{} response missing error message", status),
            Some(body.clone()),
        )
    }
}
