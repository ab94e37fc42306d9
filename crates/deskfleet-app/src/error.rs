// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Field name (as the server spells it) to a human message.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// No response reached the client.
    Network,
    Validation,
    EmailTaken,
    SerialTaken,
    AlreadyAssigned,
    DataIntegrity,
    Internal,
    NotFound,
    Other,
    /// A 2xx response whose body could not be decoded.
    Decode,
}

impl ApiErrorKind {
    pub fn classify(status: u16, code: Option<&str>) -> Self {
        match code {
            Some("VALIDATION_ERROR") => Self::Validation,
            Some("EMAIL_ALREADY_EXISTS") => Self::EmailTaken,
            Some("SERIAL_ALREADY_EXISTS") => Self::SerialTaken,
            Some("ALREADY_ASSIGNED") => Self::AlreadyAssigned,
            Some("DATA_INTEGRITY_ERROR") => Self::DataIntegrity,
            Some("INTERNAL_ERROR") => Self::Internal,
            _ if status >= 500 => Self::Internal,
            _ if status == 404 => Self::NotFound,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    /// HTTP status, or 0 when the request never got a response.
    pub status: u16,
    pub code: Option<String>,
    pub message: String,
    pub fields: FieldErrors,
}

impl ApiError {
    pub fn network(url: &str, cause: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            status: 0,
            code: None,
            message: format!("cannot reach {url} -- check api.base_url and that the server is up ({cause})"),
            fields: FieldErrors::new(),
        }
    }

    pub fn decode(context: &str, cause: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Decode,
            status: 0,
            code: None,
            message: format!("{context}: {cause}"),
            fields: FieldErrors::new(),
        }
    }

    /// Builds an error from a non-2xx response. `payload` is the parsed JSON
    /// body, a JSON string holding a text body, or `None` when the body was
    /// empty or unreadable.
    pub fn from_response(status: u16, status_line: &str, payload: Option<&Value>) -> Self {
        let object = payload.and_then(Value::as_object);
        let code = object
            .and_then(|body| body.get("code"))
            .and_then(Value::as_str)
            .map(str::to_owned);
        let fields = object
            .and_then(|body| body.get("details"))
            .map(field_errors_from_details)
            .unwrap_or_default();

        let body_message = object
            .and_then(|body| body.get("message"))
            .and_then(Value::as_str)
            .or_else(|| payload.and_then(Value::as_str).filter(|text| text.len() < 200))
            .map(str::trim)
            .filter(|text| !text.is_empty());
        let message = match body_message {
            Some(text) => text.to_owned(),
            None if status_line.trim().is_empty() => format!("server returned {status}"),
            None => status_line.trim().to_owned(),
        };

        Self {
            kind: ApiErrorKind::classify(status, code.as_deref()),
            status,
            code,
            message,
            fields,
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self {
            kind: ApiErrorKind::NotFound,
            status: 404,
            code: None,
            message: message.to_owned(),
            fields: FieldErrors::new(),
        }
    }

    pub fn is_server_failure(&self) -> bool {
        matches!(self.kind, ApiErrorKind::Internal) || self.status >= 500
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ApiErrorKind::NotFound)
    }

    /// Validation details joined into one line, in field order.
    pub fn joined_field_messages(&self) -> Option<String> {
        let joined = self
            .fields
            .values()
            .map(String::as_str)
            .filter(|message| !message.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        (!joined.is_empty()).then_some(joined)
    }

    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.message.trim().is_empty() {
            fallback
        } else {
            &self.message
        }
    }
}

fn field_errors_from_details(details: &Value) -> FieldErrors {
    let Some(map) = details.as_object() else {
        return FieldErrors::new();
    };
    map.iter()
        .filter_map(|(field, value)| {
            let message = match value {
                Value::String(text) => text.trim().to_owned(),
                Value::Array(items) => items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::trim)
                    .filter(|text| !text.is_empty())
                    .collect::<Vec<_>>()
                    .join(" "),
                Value::Null => return None,
                other => other.to_string(),
            };
            (!message.is_empty()).then(|| (field.clone(), message))
        })
        .collect()
}
