use crate::scheme::{BASIC_SCHEME, SecurityScheme};
use crate::types::format::SpecFormat;
use crate::types::scheme_type::SecuritySchemeType;

impl SecurityScheme {
    /// The canonical type tag. Never [`SecuritySchemeType::Basic`].
    pub fn scheme_type(&self) -> &SecuritySchemeType {
        &self.scheme_type
    }

    /// Stores a canonical type tag.
    ///
    /// `Basic` is stored as `Http` with the HTTP scheme set to `"basic"`. Nothing
    /// records that the alias was used, so a later write cannot tell the two
    /// spellings apart. Every other tag, unknown ones included, is stored as is.
    pub fn set_type(&mut self, scheme_type: SecuritySchemeType) {
        match scheme_type {
            SecuritySchemeType::Basic => {
                self.scheme_type = SecuritySchemeType::Http;
                self.scheme = Some(BASIC_SCHEME.to_string());
            }
            other => self.scheme_type = other,
        }
    }

    /// The type tag as it is spelled in `format`.
    ///
    /// Swagger 2.0 has no `http` or `openIdConnect` types, so `Http` becomes
    /// `Basic` and `OpenIdConnect` becomes `OAuth2`. The second mapping cannot be
    /// undone when the value is read back.
    pub fn wire_type(&self, format: SpecFormat) -> SecuritySchemeType {
        match (format, &self.scheme_type) {
            (SpecFormat::Swagger2, SecuritySchemeType::Http) => SecuritySchemeType::Basic,
            (SpecFormat::Swagger2, SecuritySchemeType::OpenIdConnect) => {
                SecuritySchemeType::OAuth2
            }
            (_, scheme_type) => scheme_type.clone(),
        }
    }

    /// Stores a type tag read from `format`.
    pub fn set_wire_type(&mut self, format: SpecFormat, raw: SecuritySchemeType) {
        if format.is_legacy() && raw == SecuritySchemeType::Basic {
            log::trace!("Normalizing Swagger 2.0 'basic' type to http/basic");
        }
        self.set_type(raw);
    }
}
