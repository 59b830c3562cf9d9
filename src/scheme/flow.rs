use crate::scheme::SecurityScheme;
use crate::types::flow::{FlowKind, OAuthFlow, OAuthFlows};
use crate::types::scheme_type::SecuritySchemeType;
use std::collections::HashMap;

/// Which slot a flattened write lands in.
enum FlowTarget {
    /// The caller named the flow kind.
    Assigned(FlowKind),
    /// Keep the active flow kind, or fall back to [`FlowKind::default`].
    Active,
}

impl FlowTarget {
    fn resolve(self, scheme: &SecurityScheme) -> FlowKind {
        match self {
            FlowTarget::Assigned(kind) => kind,
            FlowTarget::Active => match scheme.flow() {
                Some(kind) => kind,
                None => FlowKind::default(),
            },
        }
    }
}

/// Single-flow view over the structured flow set, as Swagger 2.0 sees it.
impl SecurityScheme {
    /// The active flow kind.
    ///
    /// `None` unless the scheme is `OAuth2` and at least one slot is populated.
    /// With several populated slots the first one in [`FlowKind::PRIORITY`] wins.
    pub fn flow(&self) -> Option<FlowKind> {
        if self.scheme_type != SecuritySchemeType::OAuth2 {
            return None;
        }
        self.flows.first_populated()
    }

    fn active_flow(&self) -> Option<&OAuthFlow> {
        self.flow().and_then(|kind| self.flows.get(kind))
    }

    pub fn authorization_url(&self) -> Option<&str> {
        self.active_flow()
            .and_then(|flow| flow.authorization_url.as_deref())
    }

    pub fn token_url(&self) -> Option<&str> {
        self.active_flow().and_then(|flow| flow.token_url.as_deref())
    }

    pub fn scopes(&self) -> Option<&HashMap<String, String>> {
        self.active_flow().map(|flow| &flow.scopes)
    }

    /// Moves the flattened fields to the `kind` slot. All other slots are cleared.
    pub fn set_flow(&mut self, kind: FlowKind) {
        let flow = self.flattened();
        self.rebuild_flows(FlowTarget::Assigned(kind), flow);
    }

    /// Writes the authorization URL of the active flow.
    ///
    /// Like every flattened setter this replaces the flow set with a single
    /// slot: the active kind, or `implicit` when none is established yet.
    pub fn set_authorization_url(&mut self, url: Option<String>) {
        let flow = OAuthFlow {
            authorization_url: url,
            ..self.flattened()
        };
        self.rebuild_flows(FlowTarget::Active, flow);
    }

    /// Writes the token URL of the active flow.
    ///
    /// Without an established kind this creates an `implicit` slot holding a
    /// token URL, which Swagger 2.0 tolerates.
    pub fn set_token_url(&mut self, url: Option<String>) {
        let flow = OAuthFlow {
            token_url: url,
            ..self.flattened()
        };
        self.rebuild_flows(FlowTarget::Active, flow);
    }

    pub fn set_scopes(&mut self, scopes: HashMap<String, String>) {
        let flow = OAuthFlow {
            scopes,
            ..self.flattened()
        };
        self.rebuild_flows(FlowTarget::Active, flow);
    }

    /// Snapshot of the three flattened fields. `refresh_url` and slot extensions
    /// have no flattened form.
    fn flattened(&self) -> OAuthFlow {
        OAuthFlow {
            authorization_url: self.authorization_url().map(str::to_string),
            token_url: self.token_url().map(str::to_string),
            refresh_url: None,
            scopes: self.scopes().cloned().unwrap_or_default(),
            extensions: HashMap::new(),
        }
    }

    fn rebuild_flows(&mut self, target: FlowTarget, flow: OAuthFlow) {
        let kind = target.resolve(self);
        if self.flows.populated().any(|(populated, _)| populated != kind) {
            log::debug!("Discarding OAuth2 flows other than '{}'", kind);
        }
        self.flows = OAuthFlows::single(kind, flow);
    }
}
