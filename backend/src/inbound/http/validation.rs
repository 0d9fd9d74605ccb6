//! Translation of domain validation failures into `400 invalid_request`.
//!
//! Every rejected field carries `details.field` and `details.code` so clients
//! can highlight the offending input without parsing messages.

use serde_json::json;

use crate::domain::{
    DrawCountValidationError, Error, ScoreValidationError, StartRankValidationError,
    UserValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    InvalidNumber,
    OutOfRange,
    InvalidEmail,
    PasswordTooShort,
    InvalidDisplayName,
    InvalidId,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidNumber => "invalid_number",
            Self::OutOfRange => "out_of_range",
            Self::InvalidEmail => "invalid_email",
            Self::PasswordTooShort => "password_too_short",
            Self::InvalidDisplayName => "invalid_display_name",
            Self::InvalidId => "invalid_id",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn field_error(field: FieldName, code: ValidationCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    field_error(
        field,
        ValidationCode::MissingField,
        format!("missing required field: {}", field.as_str()),
    )
}

pub(crate) fn score_error(err: &ScoreValidationError) -> Error {
    field_error(FieldName::new("score"), ValidationCode::OutOfRange, err.to_string())
}

pub(crate) fn draw_count_error(err: &DrawCountValidationError) -> Error {
    field_error(FieldName::new("times"), ValidationCode::OutOfRange, err.to_string())
}

pub(crate) fn start_rank_error(err: &StartRankValidationError) -> Error {
    field_error(FieldName::new("start"), ValidationCode::OutOfRange, err.to_string())
}

/// Map account input errors onto the request field that caused them.
pub(crate) fn user_input_error(err: &UserValidationError) -> Error {
    let (field, code) = match err {
        UserValidationError::InvalidEmail => ("email", ValidationCode::InvalidEmail),
        UserValidationError::PasswordTooShort { .. } => {
            ("password", ValidationCode::PasswordTooShort)
        }
        UserValidationError::EmptyDisplayName
        | UserValidationError::DisplayNameTooLong { .. }
        | UserValidationError::DisplayNameInvalidCharacters => {
            ("displayName", ValidationCode::InvalidDisplayName)
        }
        UserValidationError::EmptyId | UserValidationError::InvalidId => {
            ("id", ValidationCode::InvalidId)
        }
    };
    field_error(FieldName::new(field), code, err.to_string())
}

/// Parse a required integer query parameter.
pub(crate) fn parse_required_i64(raw: Option<&str>, field: FieldName) -> Result<i64, Error> {
    let raw = raw.ok_or_else(|| missing_field_error(field))?;
    raw.trim().parse::<i64>().map_err(|_| {
        field_error(
            field,
            ValidationCode::InvalidNumber,
            format!("{} must be an integer", field.as_str()),
        )
    })
}
