use crate::types::format::FormatError;
use serde_json::Value;
use std::fmt::{Display, Formatter};

/// Structural problems found while reading or writing security schemes.
///
/// Semantic oddities (unknown type tags, an OAuth2 scheme without flows, a
/// non-basic HTTP scheme written to Swagger 2.0) are never errors.
#[derive(Debug, PartialEq)]
pub enum WireError {
    /// A required field was not found.
    MissingField(String),

    /// A field holds a JSON value of the wrong kind.
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A field holds a value outside its vocabulary.
    InvalidValue { field: String, value: String },

    /// The document format could not be determined.
    Format(FormatError),
}

impl WireError {
    pub(crate) fn missing_field<T>(field: &T) -> Self
    where
        T: ToString + ?Sized,
    {
        WireError::MissingField(field.to_string())
    }

    pub(crate) fn type_mismatch<T>(field: &T, expected: &'static str, found: &Value) -> Self
    where
        T: ToString + ?Sized,
    {
        WireError::TypeMismatch {
            field: field.to_string(),
            expected,
            found: json_type_name(found),
        }
    }

    pub(crate) fn invalid_value<T, V>(field: &T, value: &V) -> Self
    where
        T: ToString + ?Sized,
        V: ToString + ?Sized,
    {
        WireError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Object(_) => "object",
        Value::Array(_) => "array",
        Value::String(_) => "string",
        Value::Number(_) => "number",
        Value::Bool(_) => "boolean",
        Value::Null => "null",
    }
}

impl From<FormatError> for WireError {
    fn from(error: FormatError) -> Self {
        WireError::Format(error)
    }
}

impl Display for WireError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            WireError::MissingField(field) => write!(f, "Missing field: {}", field),
            WireError::TypeMismatch {
                field,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Type mismatch in '{}': expected {}, found {}",
                    field, expected, found
                )
            }
            WireError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{}' in '{}'", value, field)
            }
            WireError::Format(error) => write!(f, "Format error: {}", error),
        }
    }
}

impl std::error::Error for WireError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WireError::Format(error) => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use crate::error::WireError;
    use crate::types::format::FormatError;
    use serde_json::json;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            WireError::missing_field("type").to_string(),
            "Missing field: type"
        );
        assert_eq!(
            WireError::type_mismatch("scopes", "object", &json!([])).to_string(),
            "Type mismatch in 'scopes': expected object, found array"
        );
        assert_eq!(
            WireError::invalid_value("in", "body").to_string(),
            "Invalid value 'body' in 'in'"
        );
    }

    #[test]
    fn test_format_error_converts() {
        let error: WireError = FormatError::MissingVersion.into();
        assert_eq!(error, WireError::Format(FormatError::MissingVersion));
        assert!(std::error::Error::source(&error).is_some());
    }
}
