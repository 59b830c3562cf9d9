use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The type tag of a security scheme.
///
/// `Basic` is the Swagger 2.0 spelling of HTTP basic authentication. It is
/// accepted as input but a [`crate::SecurityScheme`] never stores it; see
/// [`crate::SecurityScheme::set_type`]. Tags this crate does not know are kept
/// verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SecuritySchemeType {
    #[default]
    ApiKey,
    Basic,
    Http,
    OAuth2,
    OpenIdConnect,
    Other(String),
}

impl SecuritySchemeType {
    pub fn wire_name(&self) -> &str {
        match self {
            SecuritySchemeType::ApiKey => "apiKey",
            SecuritySchemeType::Basic => "basic",
            SecuritySchemeType::Http => "http",
            SecuritySchemeType::OAuth2 => "oauth2",
            SecuritySchemeType::OpenIdConnect => "openIdConnect",
            SecuritySchemeType::Other(raw) => raw,
        }
    }
}

impl From<&str> for SecuritySchemeType {
    fn from(value: &str) -> Self {
        match value {
            "apiKey" => SecuritySchemeType::ApiKey,
            "basic" => SecuritySchemeType::Basic,
            "http" => SecuritySchemeType::Http,
            "oauth2" => SecuritySchemeType::OAuth2,
            "openIdConnect" => SecuritySchemeType::OpenIdConnect,
            other => SecuritySchemeType::Other(other.to_string()),
        }
    }
}

impl FromStr for SecuritySchemeType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SecuritySchemeType::from(s))
    }
}

impl Display for SecuritySchemeType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}
