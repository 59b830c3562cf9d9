use crate::{OPENAPI_FIELD, SWAGGER_FIELD};
use serde_json::Value;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The wire-format flavor a security scheme is read from or written to.
///
/// The format is never stored on a scheme. Every call that needs it takes it
/// as a parameter, so independent conversions can run on separate threads
/// without observing each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecFormat {
    /// Swagger 2.0: one flattened OAuth2 flow per scheme.
    Swagger2,
    /// OpenAPI 3.x: OAuth2 flows nested per grant type.
    OpenApi3,
}

impl FromStr for SpecFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("3.") {
            Ok(SpecFormat::OpenApi3)
        } else if s == "2.0" || s.starts_with("2.0.") {
            Ok(SpecFormat::Swagger2)
        } else {
            Err(FormatError::unsupported_version(s))
        }
    }
}

impl SpecFormat {
    pub fn is_legacy(&self) -> bool {
        matches!(self, SpecFormat::Swagger2)
    }

    /// Detects the format of a whole document from its version field.
    ///
    /// # Arguments
    ///
    /// * `document` - The root of a Swagger or OpenAPI document.
    ///
    /// # Returns
    ///
    /// * `Ok(SpecFormat)` - When a `swagger` field (checked first) or an `openapi`
    ///   field carries a supported version string.
    /// * `Err(FormatError::MissingVersion)` - When neither field is present as a string.
    /// * `Err(FormatError::UnsupportedVersion)` - When the version is not 2.0 or 3.x.
    pub fn from_document(document: &Value) -> Result<Self, FormatError> {
        let version = document
            .get(SWAGGER_FIELD)
            .and_then(|node| node.as_str())
            .or_else(|| document.get(OPENAPI_FIELD).and_then(|node| node.as_str()));

        match version {
            Some(version) => {
                let format = SpecFormat::from_str(version)?;
                log::debug!("Detected {} document (version {})", format, version);
                Ok(format)
            }
            None => Err(FormatError::MissingVersion),
        }
    }
}

impl Display for SpecFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SpecFormat::Swagger2 => write!(f, "Swagger 2.0"),
            SpecFormat::OpenApi3 => write!(f, "OpenAPI 3.x"),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum FormatError {
    UnsupportedVersion(String),
    MissingVersion,
}

impl FormatError {
    pub(crate) fn unsupported_version<T>(version: &T) -> Self
    where
        T: ToString + ?Sized,
    {
        FormatError::UnsupportedVersion(version.to_string())
    }
}

impl Display for FormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatError::UnsupportedVersion(version) => {
                write!(f, "Unsupported version: {}", version)
            }
            FormatError::MissingVersion => {
                write!(f, "Document has neither a 'swagger' nor an 'openapi' field")
            }
        }
    }
}

impl std::error::Error for FormatError {}
