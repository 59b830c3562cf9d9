pub mod definitions;
pub mod error;
mod extensions;
pub mod scheme;
pub mod types;
pub mod wire;

pub use crate::definitions::{
    SecurityDefinitions, convert_security_schemes, read_security_schemes, write_security_schemes,
};
pub use crate::error::WireError;
pub use crate::scheme::SecurityScheme;
pub use crate::types::ApiKeyLocation;
pub use crate::types::flow::{FlowKind, OAuthFlow, OAuthFlows};
pub use crate::types::format::{FormatError, SpecFormat};
pub use crate::types::scheme_type::SecuritySchemeType;
pub use crate::wire::{read_scheme, write_scheme};

const SWAGGER_FIELD: &'static str = "swagger";
const OPENAPI_FIELD: &'static str = "openapi";
const SECURITY_DEFINITIONS_FIELD: &'static str = "securityDefinitions";
const COMPONENTS_FIELD: &'static str = "components";
const SECURITY_SCHEMES_FIELD: &'static str = "securitySchemes";
const REF_FIELD: &'static str = "$ref";
const EXTENSION_PREFIX: &'static str = "x-";

const TYPE_FIELD: &'static str = "type";
const DESCRIPTION_FIELD: &'static str = "description";
const NAME_FIELD: &'static str = "name";
const IN_FIELD: &'static str = "in";
const SCHEME_FIELD: &'static str = "scheme";
const BEARER_FORMAT_FIELD: &'static str = "bearerFormat";
const OPEN_ID_CONNECT_URL_FIELD: &'static str = "openIdConnectUrl";
const FLOW_FIELD: &'static str = "flow";
const FLOWS_FIELD: &'static str = "flows";
const AUTHORIZATION_URL_FIELD: &'static str = "authorizationUrl";
const TOKEN_URL_FIELD: &'static str = "tokenUrl";
const SCOPES_FIELD: &'static str = "scopes";
