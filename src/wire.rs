use crate::error::{WireError, json_type_name};
use crate::extensions;
use crate::scheme::{BASIC_SCHEME, SecurityScheme};
use crate::types::ApiKeyLocation;
use crate::types::flow::{FlowKind, OAuthFlows};
use crate::types::format::SpecFormat;
use crate::types::scheme_type::SecuritySchemeType;
use crate::{
    AUTHORIZATION_URL_FIELD, BEARER_FORMAT_FIELD, DESCRIPTION_FIELD, FLOW_FIELD, FLOWS_FIELD,
    IN_FIELD, NAME_FIELD, OPEN_ID_CONNECT_URL_FIELD, SCHEME_FIELD, SCOPES_FIELD, TOKEN_URL_FIELD,
    TYPE_FIELD,
};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::str::FromStr;

const SECURITY_SCHEME: &str = "securityScheme";

/// Reads one security scheme object encoded in `format`.
///
/// # Arguments
///
/// * `value` - The wire object, e.g. one entry of `securityDefinitions`.
/// * `format` - The format `value` is encoded in.
///
/// # Returns
///
/// * `Ok(SecurityScheme)` - The canonical scheme. Unknown type tags are kept,
///   an unknown Swagger 2.0 `flow` is ignored.
/// * `Err(WireError)` - When `value` is not an object, has no string `type`, holds
///   a field of the wrong JSON type, or an `in` outside query/header/cookie.
pub fn read_scheme(value: &Value, format: SpecFormat) -> Result<SecurityScheme, WireError> {
    let object = require_object(value, SECURITY_SCHEME)?;
    let raw_type = match optional_str(object, TYPE_FIELD)? {
        Some(raw_type) => raw_type,
        None => return Err(WireError::missing_field(TYPE_FIELD)),
    };

    let mut scheme = SecurityScheme::default();
    scheme.set_wire_type(format, SecuritySchemeType::from(raw_type));
    scheme.description = optional_string(object, DESCRIPTION_FIELD)?;
    scheme.name = optional_string(object, NAME_FIELD)?;
    scheme.location = match optional_str(object, IN_FIELD)? {
        Some(location) => Some(
            ApiKeyLocation::from_str(location)
                .map_err(|value| WireError::invalid_value(IN_FIELD, &value))?,
        ),
        None => None,
    };

    match format {
        SpecFormat::Swagger2 => read_flattened_flow(object, &mut scheme)?,
        SpecFormat::OpenApi3 => read_nested_fields(object, &mut scheme)?,
    }

    scheme.extensions = extensions::collect(object);
    Ok(scheme)
}

/// Writes one security scheme in `format`.
///
/// Data `format` cannot express is left out: Swagger 2.0 loses the HTTP scheme
/// name, `bearerFormat`, `openIdConnectUrl`, every OAuth2 flow but the active
/// one, and refresh URLs.
pub fn write_scheme(scheme: &SecurityScheme, format: SpecFormat) -> Value {
    let mut object = Map::new();
    object.insert(
        TYPE_FIELD.to_string(),
        Value::String(scheme.wire_type(format).wire_name().to_string()),
    );
    insert_optional(&mut object, DESCRIPTION_FIELD, scheme.description.as_deref());
    insert_optional(&mut object, NAME_FIELD, scheme.name.as_deref());
    insert_optional(
        &mut object,
        IN_FIELD,
        scheme.location.map(|location| location.as_str()),
    );

    match format {
        SpecFormat::Swagger2 => write_flattened_flow(scheme, &mut object),
        SpecFormat::OpenApi3 => write_nested_fields(scheme, &mut object),
    }

    extensions::write(&mut object, &scheme.extensions);
    Value::Object(object)
}

fn read_flattened_flow(
    object: &Map<String, Value>,
    scheme: &mut SecurityScheme,
) -> Result<(), WireError> {
    if scheme.scheme_type() != &SecuritySchemeType::OAuth2 {
        if object.contains_key(FLOW_FIELD) {
            log::debug!(
                "Ignoring OAuth2 flow fields on a '{}' security scheme",
                scheme.scheme_type()
            );
        }
        return Ok(());
    }

    // Order matters: the flow kind has to be in place before the fields land.
    if let Some(flow) = optional_str(object, FLOW_FIELD)? {
        match FlowKind::from_legacy_name(flow) {
            Some(kind) => scheme.set_flow(kind),
            None => log::warn!("Ignoring unknown OAuth2 flow '{}'", flow),
        }
    }
    if let Some(url) = optional_string(object, AUTHORIZATION_URL_FIELD)? {
        scheme.set_authorization_url(Some(url));
    }
    if let Some(url) = optional_string(object, TOKEN_URL_FIELD)? {
        scheme.set_token_url(Some(url));
    }
    match object.get(SCOPES_FIELD) {
        None | Some(Value::Null) => {}
        Some(scopes) => scheme.set_scopes(read_scopes(scopes)?),
    }
    Ok(())
}

fn read_nested_fields(
    object: &Map<String, Value>,
    scheme: &mut SecurityScheme,
) -> Result<(), WireError> {
    if let Some(auth_scheme) = optional_string(object, SCHEME_FIELD)? {
        scheme.scheme = Some(auth_scheme);
    }
    scheme.bearer_format = optional_string(object, BEARER_FORMAT_FIELD)?;
    scheme.open_id_connect_url = optional_string(object, OPEN_ID_CONNECT_URL_FIELD)?;

    if let Some(flows) = object.get(FLOWS_FIELD) {
        require_object(flows, FLOWS_FIELD)?;
        let mut flows: OAuthFlows = serde_json::from_value(flows.clone())
            .map_err(|e| WireError::invalid_value(FLOWS_FIELD, &e))?;
        extensions::retain(&mut flows.extensions);
        for flow in flows.populated_mut() {
            extensions::retain(&mut flow.extensions);
        }
        scheme.set_flows(flows);
    }
    Ok(())
}

fn write_flattened_flow(scheme: &SecurityScheme, object: &mut Map<String, Value>) {
    if scheme.scheme_type() == &SecuritySchemeType::Http {
        if let Some(auth_scheme) = scheme.scheme.as_deref() {
            if auth_scheme != BASIC_SCHEME {
                log::warn!(
                    "HTTP '{}' scheme has no Swagger 2.0 form, writing it as basic",
                    auth_scheme
                );
            }
        }
    }
    if scheme.bearer_format.is_some() || scheme.open_id_connect_url.is_some() {
        log::debug!("Dropping bearerFormat/openIdConnectUrl, Swagger 2.0 has no such fields");
    }

    let Some(kind) = scheme.flow() else {
        return;
    };
    if scheme.flows().populated().count() > 1 {
        log::debug!("Writing only the '{}' OAuth2 flow to Swagger 2.0", kind);
    }

    object.insert(
        FLOW_FIELD.to_string(),
        Value::String(kind.legacy_name().to_string()),
    );
    insert_optional(object, AUTHORIZATION_URL_FIELD, scheme.authorization_url());
    insert_optional(object, TOKEN_URL_FIELD, scheme.token_url());
    let scopes = scheme
        .scopes()
        .map(|scopes| {
            scopes
                .iter()
                .map(|(name, description)| (name.clone(), Value::String(description.clone())))
                .collect::<Map<String, Value>>()
        })
        .unwrap_or_default();
    object.insert(SCOPES_FIELD.to_string(), Value::Object(scopes));
}

fn write_nested_fields(scheme: &SecurityScheme, object: &mut Map<String, Value>) {
    insert_optional(object, SCHEME_FIELD, scheme.scheme.as_deref());
    insert_optional(object, BEARER_FORMAT_FIELD, scheme.bearer_format.as_deref());
    insert_optional(
        object,
        OPEN_ID_CONNECT_URL_FIELD,
        scheme.open_id_connect_url.as_deref(),
    );

    if scheme.flows().is_empty() && scheme.scheme_type() != &SecuritySchemeType::OAuth2 {
        return;
    }
    match serde_json::to_value(scheme.flows()) {
        Ok(flows) => {
            object.insert(FLOWS_FIELD.to_string(), flows);
        }
        Err(e) => log::error!("Failed to encode OAuth2 flows: {}", e),
    }
}

fn read_scopes(value: &Value) -> Result<HashMap<String, String>, WireError> {
    let scopes = require_object(value, SCOPES_FIELD)?;
    let mut result = HashMap::with_capacity(scopes.len());
    for (name, description) in scopes {
        match description.as_str() {
            Some(description) => {
                result.insert(name.clone(), description.to_string());
            }
            None => {
                return Err(WireError::type_mismatch(
                    &format!("{}.{}", SCOPES_FIELD, name),
                    "string",
                    description,
                ));
            }
        }
    }
    Ok(result)
}

fn require_object<'a>(value: &'a Value, field: &str) -> Result<&'a Map<String, Value>, WireError> {
    match value.as_object() {
        Some(object) => Ok(object),
        None => Err(WireError::type_mismatch(field, "object", value)),
    }
}

fn optional_str<'a>(
    object: &'a Map<String, Value>,
    field: &str,
) -> Result<Option<&'a str>, WireError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.as_str())),
        Some(other) => {
            log::debug!("'{}' is a {}, expected a string", field, json_type_name(other));
            Err(WireError::type_mismatch(field, "string", other))
        }
    }
}

fn optional_string(object: &Map<String, Value>, field: &str) -> Result<Option<String>, WireError> {
    Ok(optional_str(object, field)?.map(str::to_string))
}

fn insert_optional(object: &mut Map<String, Value>, field: &str, value: Option<&str>) {
    if let Some(value) = value {
        object.insert(field.to_string(), Value::String(value.to_string()));
    }
}

#[cfg(test)]
mod test {
    use crate::error::WireError;
    use crate::scheme::SecurityScheme;
    use crate::types::ApiKeyLocation;
    use crate::types::flow::{FlowKind, OAuthFlow, OAuthFlows};
    use crate::types::format::SpecFormat;
    use crate::types::scheme_type::SecuritySchemeType;
    use crate::wire::{read_scheme, write_scheme};
    use serde_json::json;
    use std::collections::HashMap;

    fn petstore_flows() -> OAuthFlows {
        let mut flows = OAuthFlows::default();
        flows.insert(
            FlowKind::AuthorizationCode,
            OAuthFlow {
                authorization_url: Some("https://petstore.example.com/authorize".to_string()),
                token_url: Some("https://petstore.example.com/token".to_string()),
                refresh_url: Some("https://petstore.example.com/refresh".to_string()),
                scopes: HashMap::from([
                    ("write:pets".to_string(), "modify pets".to_string()),
                    ("read:pets".to_string(), "read pets".to_string()),
                ]),
                extensions: HashMap::new(),
            },
        );
        flows.insert(
            FlowKind::ClientCredentials,
            OAuthFlow {
                token_url: Some("https://petstore.example.com/token".to_string()),
                ..OAuthFlow::default()
            },
        );
        flows
    }

    #[test]
    fn test_read_swagger2_oauth2() {
        let value = json!({
            "type": "oauth2",
            "flow": "accessCode",
            "authorizationUrl": "https://petstore.example.com/authorize",
            "tokenUrl": "https://petstore.example.com/token",
            "scopes": { "read:pets": "read pets" },
            "x-client-id": "petstore-ui"
        });

        let scheme = read_scheme(&value, SpecFormat::Swagger2).unwrap();
        assert_eq!(scheme.scheme_type(), &SecuritySchemeType::OAuth2);
        assert_eq!(scheme.flow(), Some(FlowKind::AuthorizationCode));
        assert_eq!(
            scheme.authorization_url(),
            Some("https://petstore.example.com/authorize")
        );
        assert_eq!(scheme.token_url(), Some("https://petstore.example.com/token"));
        assert_eq!(scheme.scopes().unwrap()["read:pets"], "read pets");
        assert_eq!(scheme.flows().populated().count(), 1);
        assert_eq!(scheme.extensions["x-client-id"], json!("petstore-ui"));
    }

    #[test]
    fn test_read_swagger2_without_flow_defaults_to_implicit() {
        let value = json!({
            "type": "oauth2",
            "tokenUrl": "https://petstore.example.com/token"
        });
        let scheme = read_scheme(&value, SpecFormat::Swagger2).unwrap();
        assert_eq!(scheme.flow(), Some(FlowKind::Implicit));
        assert_eq!(scheme.token_url(), Some("https://petstore.example.com/token"));
    }

    #[test]
    fn test_read_swagger2_unknown_flow_is_ignored() {
        let value = json!({
            "type": "oauth2",
            "flow": "deviceCode",
            "authorizationUrl": "https://petstore.example.com/authorize"
        });
        let scheme = read_scheme(&value, SpecFormat::Swagger2).unwrap();
        assert_eq!(scheme.flow(), Some(FlowKind::Implicit));
    }

    #[test]
    fn test_read_swagger2_basic() {
        let value = json!({ "type": "basic", "description": "HTTP basic" });
        let scheme = read_scheme(&value, SpecFormat::Swagger2).unwrap();
        assert_eq!(scheme, SecurityScheme::basic().with_description("HTTP basic"));
    }

    #[test]
    fn test_read_swagger2_ignores_flow_fields_on_api_key() {
        let value = json!({
            "type": "apiKey",
            "name": "api_key",
            "in": "header",
            "flow": "implicit",
            "authorizationUrl": "https://petstore.example.com/authorize"
        });
        let scheme = read_scheme(&value, SpecFormat::Swagger2).unwrap();
        assert_eq!(scheme, SecurityScheme::api_key("api_key", ApiKeyLocation::Header));
    }

    #[test]
    fn test_read_openapi3_keeps_every_flow() {
        let value = json!({
            "type": "oauth2",
            "flows": {
                "authorizationCode": {
                    "authorizationUrl": "https://petstore.example.com/authorize",
                    "tokenUrl": "https://petstore.example.com/token",
                    "refreshUrl": "https://petstore.example.com/refresh",
                    "scopes": { "write:pets": "modify pets", "read:pets": "read pets" }
                },
                "clientCredentials": {
                    "tokenUrl": "https://petstore.example.com/token",
                    "scopes": {}
                }
            }
        });
        let scheme = read_scheme(&value, SpecFormat::OpenApi3).unwrap();
        assert_eq!(scheme.flows(), &petstore_flows());
        assert_eq!(scheme.flow(), Some(FlowKind::ClientCredentials));
    }

    #[test]
    fn test_read_openapi3_http_bearer() {
        let value = json!({
            "type": "http",
            "scheme": "bearer",
            "bearerFormat": "JWT"
        });
        let scheme = read_scheme(&value, SpecFormat::OpenApi3).unwrap();
        assert_eq!(scheme.scheme_type(), &SecuritySchemeType::Http);
        assert_eq!(scheme.scheme.as_deref(), Some("bearer"));
        assert_eq!(scheme.bearer_format.as_deref(), Some("JWT"));
    }

    #[test]
    fn test_read_rejects_structural_errors() {
        assert_eq!(
            read_scheme(&json!("oauth2"), SpecFormat::OpenApi3).unwrap_err(),
            WireError::TypeMismatch {
                field: "securityScheme".to_string(),
                expected: "object",
                found: "string",
            }
        );
        assert_eq!(
            read_scheme(&json!({ "name": "api_key" }), SpecFormat::Swagger2).unwrap_err(),
            WireError::MissingField("type".to_string())
        );
        assert_eq!(
            read_scheme(&json!({ "type": "apiKey", "in": "body" }), SpecFormat::Swagger2)
                .unwrap_err(),
            WireError::InvalidValue {
                field: "in".to_string(),
                value: "body".to_string(),
            }
        );
        assert!(matches!(
            read_scheme(
                &json!({ "type": "oauth2", "scopes": { "read": 1 } }),
                SpecFormat::Swagger2
            ),
            Err(WireError::TypeMismatch { .. })
        ));
        assert!(matches!(
            read_scheme(
                &json!({ "type": "oauth2", "flows": { "implicit": { "scopes": [] } } }),
                SpecFormat::OpenApi3
            ),
            Err(WireError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_read_unknown_type_is_not_an_error() {
        let value = json!({ "type": "mutualTLS" });
        let scheme = read_scheme(&value, SpecFormat::OpenApi3).unwrap();
        assert_eq!(
            scheme.scheme_type(),
            &SecuritySchemeType::Other("mutualTLS".to_string())
        );
        assert_eq!(write_scheme(&scheme, SpecFormat::OpenApi3), value);
    }

    #[test]
    fn test_write_swagger2_keeps_active_flow_only() {
        let scheme = SecurityScheme::oauth2(petstore_flows()).with_description("Petstore");
        let value = write_scheme(&scheme, SpecFormat::Swagger2);
        assert_eq!(
            value,
            json!({
                "type": "oauth2",
                "description": "Petstore",
                "flow": "application",
                "tokenUrl": "https://petstore.example.com/token",
                "scopes": {}
            })
        );
    }

    #[test]
    fn test_write_swagger2_collapses_http_and_open_id_connect() {
        let bearer = SecurityScheme::http("bearer");
        assert_eq!(
            write_scheme(&bearer, SpecFormat::Swagger2),
            json!({ "type": "basic" })
        );

        let oidc = SecurityScheme::open_id_connect("https://id.example.com/.well-known");
        assert_eq!(
            write_scheme(&oidc, SpecFormat::Swagger2),
            json!({ "type": "oauth2" })
        );
    }

    #[test]
    fn test_write_openapi3() {
        let mut scheme = SecurityScheme::api_key("session", ApiKeyLocation::Cookie);
        scheme
            .extensions
            .insert("x-rotation".to_string(), json!("daily"));
        assert_eq!(
            write_scheme(&scheme, SpecFormat::OpenApi3),
            json!({
                "type": "apiKey",
                "name": "session",
                "in": "cookie",
                "x-rotation": "daily"
            })
        );

        let oauth2 = SecurityScheme::new(SecuritySchemeType::OAuth2);
        assert_eq!(
            write_scheme(&oauth2, SpecFormat::OpenApi3),
            json!({ "type": "oauth2", "flows": {} })
        );
    }

    #[test]
    fn test_openapi3_round_trip() {
        let mut scheme = SecurityScheme::oauth2(petstore_flows());
        scheme
            .extensions
            .insert("x-audience".to_string(), json!(["pets"]));
        let value = write_scheme(&scheme, SpecFormat::OpenApi3);
        assert_eq!(read_scheme(&value, SpecFormat::OpenApi3).unwrap(), scheme);
    }

    #[test]
    fn test_openapi3_round_trip_keeps_flow_extensions() {
        let value = json!({
            "type": "oauth2",
            "flows": {
                "x-flows-note": "issued by the identity team",
                "implicit": {
                    "authorizationUrl": "https://petstore.example.com/authorize",
                    "scopes": {},
                    "x-slot-note": 1
                }
            }
        });
        let scheme = read_scheme(&value, SpecFormat::OpenApi3).unwrap();
        assert_eq!(
            scheme.flows().extensions["x-flows-note"],
            json!("issued by the identity team")
        );
        assert_eq!(
            scheme.flows().get(FlowKind::Implicit).unwrap().extensions["x-slot-note"],
            json!(1)
        );
        assert_eq!(write_scheme(&scheme, SpecFormat::OpenApi3), value);
    }

    #[test]
    fn test_openapi3_unknown_flow_keys_are_dropped() {
        let value = json!({
            "type": "oauth2",
            "flows": {
                "deviceCode": { "tokenUrl": "https://petstore.example.com/device" },
                "password": {
                    "tokenUrl": "https://petstore.example.com/token",
                    "scopes": {},
                    "audience": "pets"
                }
            }
        });
        let scheme = read_scheme(&value, SpecFormat::OpenApi3).unwrap();
        assert!(scheme.flows().extensions.is_empty());
        assert!(
            scheme
                .flows()
                .get(FlowKind::Password)
                .unwrap()
                .extensions
                .is_empty()
        );
    }

    #[test]
    fn test_swagger2_flattened_write_drops_slot_extensions() {
        let value = json!({
            "type": "oauth2",
            "flows": {
                "password": {
                    "tokenUrl": "https://petstore.example.com/token",
                    "scopes": {},
                    "x-slot-note": 1
                }
            }
        });
        let scheme = read_scheme(&value, SpecFormat::OpenApi3).unwrap();
        assert_eq!(
            write_scheme(&scheme, SpecFormat::Swagger2),
            json!({
                "type": "oauth2",
                "flow": "password",
                "tokenUrl": "https://petstore.example.com/token",
                "scopes": {}
            })
        );
    }

    #[test]
    fn test_read_swagger2_null_scopes_are_absent() {
        let value = json!({
            "type": "oauth2",
            "flow": "password",
            "tokenUrl": "https://petstore.example.com/token",
            "scopes": null
        });
        let scheme = read_scheme(&value, SpecFormat::Swagger2).unwrap();
        assert_eq!(scheme.flow(), Some(FlowKind::Password));
        assert_eq!(scheme.scopes(), Some(&HashMap::new()));
    }

    #[test]
    fn test_swagger2_to_openapi3_conversion() {
        let legacy = json!({
            "type": "oauth2",
            "flow": "password",
            "tokenUrl": "https://petstore.example.com/token",
            "scopes": { "read:pets": "read pets" }
        });
        let scheme = read_scheme(&legacy, SpecFormat::Swagger2).unwrap();
        assert_eq!(
            write_scheme(&scheme, SpecFormat::OpenApi3),
            json!({
                "type": "oauth2",
                "flows": {
                    "password": {
                        "tokenUrl": "https://petstore.example.com/token",
                        "scopes": { "read:pets": "read pets" }
                    }
                }
            })
        );
        assert_eq!(write_scheme(&scheme, SpecFormat::Swagger2), legacy);
    }
}
