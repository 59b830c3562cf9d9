use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

/// OAuth2 grant types, in the order used to pick the active flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FlowKind {
    #[default]
    Implicit,
    Password,
    ClientCredentials,
    AuthorizationCode,
}

impl FlowKind {
    /// Read priority for the flattened view.
    pub const PRIORITY: [FlowKind; 4] = [
        FlowKind::Implicit,
        FlowKind::Password,
        FlowKind::ClientCredentials,
        FlowKind::AuthorizationCode,
    ];

    /// The value of the Swagger 2.0 `flow` field.
    pub fn legacy_name(&self) -> &'static str {
        match self {
            FlowKind::Implicit => "implicit",
            FlowKind::Password => "password",
            FlowKind::ClientCredentials => "application",
            FlowKind::AuthorizationCode => "accessCode",
        }
    }

    /// The key of this flow under the OpenAPI 3.x `flows` object.
    pub fn slot_name(&self) -> &'static str {
        match self {
            FlowKind::Implicit => "implicit",
            FlowKind::Password => "password",
            FlowKind::ClientCredentials => "clientCredentials",
            FlowKind::AuthorizationCode => "authorizationCode",
        }
    }

    pub fn from_legacy_name(name: &str) -> Option<FlowKind> {
        Self::PRIORITY
            .into_iter()
            .find(|kind| kind.legacy_name() == name)
    }
}

impl Display for FlowKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slot_name())
    }
}

/// OAuth Flow Object
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthFlow {
    /// The authorization URL to be used for this flow
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_url: Option<String>,
    /// The token URL to be used for this flow
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_url: Option<String>,
    /// The URL to be used for obtaining refresh tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_url: Option<String>,
    /// The available scopes for the OAuth2 security scheme
    #[serde(default)]
    pub scopes: HashMap<String, String>,
    /// Additional custom properties
    #[serde(flatten)]
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub extensions: HashMap<String, serde_json::Value>,
}

/// OAuth Flows Object
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthFlows {
    /// Configuration for the OAuth Implicit flow
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implicit: Option<OAuthFlow>,
    /// Configuration for the OAuth Password flow
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<OAuthFlow>,
    /// Configuration for the OAuth Client Credentials flow
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_credentials: Option<OAuthFlow>,
    /// Configuration for the OAuth Authorization Code flow
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_code: Option<OAuthFlow>,
    /// Additional custom properties
    #[serde(flatten)]
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub extensions: HashMap<String, serde_json::Value>,
}

impl OAuthFlows {
    /// A flow set holding only `flow` under `kind`.
    pub fn single(kind: FlowKind, flow: OAuthFlow) -> Self {
        let mut flows = OAuthFlows::default();
        *flows.slot_mut(kind) = Some(flow);
        flows
    }

    pub fn get(&self, kind: FlowKind) -> Option<&OAuthFlow> {
        match kind {
            FlowKind::Implicit => self.implicit.as_ref(),
            FlowKind::Password => self.password.as_ref(),
            FlowKind::ClientCredentials => self.client_credentials.as_ref(),
            FlowKind::AuthorizationCode => self.authorization_code.as_ref(),
        }
    }

    pub fn insert(&mut self, kind: FlowKind, flow: OAuthFlow) -> Option<OAuthFlow> {
        self.slot_mut(kind).replace(flow)
    }

    fn slot_mut(&mut self, kind: FlowKind) -> &mut Option<OAuthFlow> {
        match kind {
            FlowKind::Implicit => &mut self.implicit,
            FlowKind::Password => &mut self.password,
            FlowKind::ClientCredentials => &mut self.client_credentials,
            FlowKind::AuthorizationCode => &mut self.authorization_code,
        }
    }

    /// The first populated slot in [`FlowKind::PRIORITY`] order.
    pub fn first_populated(&self) -> Option<FlowKind> {
        FlowKind::PRIORITY
            .into_iter()
            .find(|kind| self.get(*kind).is_some())
    }

    pub fn populated(&self) -> impl Iterator<Item = (FlowKind, &OAuthFlow)> {
        FlowKind::PRIORITY
            .into_iter()
            .filter_map(|kind| self.get(kind).map(|flow| (kind, flow)))
    }

    pub fn is_empty(&self) -> bool {
        self.first_populated().is_none()
    }

    pub(crate) fn populated_mut(&mut self) -> impl Iterator<Item = &mut OAuthFlow> {
        [
            &mut self.implicit,
            &mut self.password,
            &mut self.client_credentials,
            &mut self.authorization_code,
        ]
        .into_iter()
        .flatten()
    }
}
