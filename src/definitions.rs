use crate::error::WireError;
use crate::scheme::SecurityScheme;
use crate::types::format::SpecFormat;
use crate::wire::{read_scheme, write_scheme};
use crate::{COMPONENTS_FIELD, REF_FIELD, SECURITY_DEFINITIONS_FIELD, SECURITY_SCHEMES_FIELD};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// The named security schemes of one document, with the format they were read in.
#[derive(Debug, Clone, PartialEq)]
pub struct SecurityDefinitions {
    pub format: SpecFormat,
    pub schemes: BTreeMap<String, SecurityScheme>,
}

/// Reads every security scheme declared by a Swagger 2.0 or OpenAPI 3.x document.
///
/// The format is detected from the document's `swagger` or `openapi` field.
/// Schemes live under `securityDefinitions` in Swagger 2.0 and under
/// `components.securitySchemes` in OpenAPI 3.x; a document without them yields
/// an empty map. `$ref` entries are skipped.
pub fn read_security_schemes(document: &Value) -> Result<SecurityDefinitions, WireError> {
    let format = SpecFormat::from_document(document)?;
    let mut schemes = BTreeMap::new();

    let Some(entries) = locate(document, format) else {
        log::debug!("No security schemes declared in {} document", format);
        return Ok(SecurityDefinitions { format, schemes });
    };
    let entries = match entries.as_object() {
        Some(entries) => entries,
        None => {
            return Err(WireError::type_mismatch(
                location_name(format),
                "object",
                entries,
            ));
        }
    };

    for (name, entry) in entries {
        if entry.get(REF_FIELD).is_some() {
            log::warn!("Skipping security scheme reference '{}'", name);
            continue;
        }
        schemes.insert(name.clone(), read_scheme(entry, format)?);
    }
    log::debug!("Read {} security schemes from {} document", schemes.len(), format);
    Ok(SecurityDefinitions { format, schemes })
}

/// Encodes `schemes` in `format` and stores them at that format's location in
/// `document`, replacing what was there.
pub fn write_security_schemes(
    document: &mut Value,
    schemes: &BTreeMap<String, SecurityScheme>,
    format: SpecFormat,
) -> Result<(), WireError> {
    let encoded = encode(schemes, format);
    let Some(root) = document.as_object_mut() else {
        return Err(WireError::type_mismatch("document", "object", document));
    };

    match format {
        SpecFormat::Swagger2 => {
            root.insert(SECURITY_DEFINITIONS_FIELD.to_string(), encoded);
        }
        SpecFormat::OpenApi3 => {
            let components = root
                .entry(COMPONENTS_FIELD)
                .or_insert_with(|| Value::Object(Map::new()));
            let Some(components) = components.as_object_mut() else {
                return Err(WireError::type_mismatch(
                    COMPONENTS_FIELD,
                    "object",
                    components,
                ));
            };
            components.insert(SECURITY_SCHEMES_FIELD.to_string(), encoded);
        }
    }
    Ok(())
}

/// Reads the schemes of `document` in its own format and returns them encoded in `target`.
pub fn convert_security_schemes(document: &Value, target: SpecFormat) -> Result<Value, WireError> {
    let definitions = read_security_schemes(document)?;
    log::debug!(
        "Converting {} security schemes from {} to {}",
        definitions.schemes.len(),
        definitions.format,
        target
    );
    Ok(encode(&definitions.schemes, target))
}

fn encode(schemes: &BTreeMap<String, SecurityScheme>, format: SpecFormat) -> Value {
    Value::Object(
        schemes
            .iter()
            .map(|(name, scheme)| (name.clone(), write_scheme(scheme, format)))
            .collect(),
    )
}

fn locate(document: &Value, format: SpecFormat) -> Option<&Value> {
    match format {
        SpecFormat::Swagger2 => document.get(SECURITY_DEFINITIONS_FIELD),
        SpecFormat::OpenApi3 => document
            .get(COMPONENTS_FIELD)
            .and_then(|components| components.get(SECURITY_SCHEMES_FIELD)),
    }
}

fn location_name(format: SpecFormat) -> &'static str {
    match format {
        SpecFormat::Swagger2 => SECURITY_DEFINITIONS_FIELD,
        SpecFormat::OpenApi3 => "components.securitySchemes",
    }
}
