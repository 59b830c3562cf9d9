mod flow;
mod normalize;

use crate::types::ApiKeyLocation;
use crate::types::flow::OAuthFlows;
use crate::types::scheme_type::SecuritySchemeType;
use serde_json::Value;
use std::collections::HashMap;

pub(crate) const BASIC_SCHEME: &str = "basic";

/// Security Scheme Object
///
/// One in-memory scheme that can be read from and written to both Swagger 2.0
/// and OpenAPI 3.x. The type tag and the OAuth2 flows are only reachable
/// through accessors because writing either one has to keep other fields in
/// step (see [`SecurityScheme::set_type`] and [`SecurityScheme::set_flow`]).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SecurityScheme {
    scheme_type: SecuritySchemeType,
    flows: OAuthFlows,
    /// A description for security scheme
    pub description: Option<String>,
    /// The name of the header, query or cookie parameter to be used
    pub name: Option<String>,
    /// The location of the API key
    pub location: Option<ApiKeyLocation>,
    /// The name of the HTTP Authorization scheme
    pub scheme: Option<String>,
    /// A hint to the client to identify how the bearer token is formatted
    pub bearer_format: Option<String>,
    /// OpenID Connect URL to discover OAuth2 configuration values
    pub open_id_connect_url: Option<String>,
    /// `x-` prefixed vendor extensions, carried through untouched
    pub extensions: HashMap<String, Value>,
}

impl SecurityScheme {
    pub fn new(scheme_type: SecuritySchemeType) -> Self {
        let mut scheme = SecurityScheme::default();
        scheme.set_type(scheme_type);
        scheme
    }

    pub fn api_key(name: impl Into<String>, location: ApiKeyLocation) -> Self {
        let mut scheme = Self::new(SecuritySchemeType::ApiKey);
        scheme.name = Some(name.into());
        scheme.location = Some(location);
        scheme
    }

    pub fn http(auth_scheme: impl Into<String>) -> Self {
        let mut scheme = Self::new(SecuritySchemeType::Http);
        scheme.scheme = Some(auth_scheme.into());
        scheme
    }

    pub fn basic() -> Self {
        Self::new(SecuritySchemeType::Basic)
    }

    pub fn oauth2(flows: OAuthFlows) -> Self {
        let mut scheme = Self::new(SecuritySchemeType::OAuth2);
        scheme.flows = flows;
        scheme
    }

    pub fn open_id_connect(url: impl Into<String>) -> Self {
        let mut scheme = Self::new(SecuritySchemeType::OpenIdConnect);
        scheme.open_id_connect_url = Some(url.into());
        scheme
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The structured OAuth2 flow set, all slots included.
    pub fn flows(&self) -> &OAuthFlows {
        &self.flows
    }

    /// Replaces the structured flow set as is. Unlike the flattened setters this
    /// keeps every populated slot.
    pub fn set_flows(&mut self, flows: OAuthFlows) {
        self.flows = flows;
    }
}
