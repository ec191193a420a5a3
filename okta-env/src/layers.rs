//! The derived layers okta-env appends to the environment.
//!
//! Each function builds one layer. None of them reads the environment at
//! construction time; visibility and values are decided on every lookup.

use okta_env_core::{
    AliasLayer, ComputedLayer, ConditionalLayer, ConfigLayer, ConfigValue, PropertyResolver,
};
use okta_env_oidc::{IssuerStyle, OidcMetadata};

use crate::keys::{oauth2, okta, placeholder};

pub const REMAP: &str = "okta-to-oauth2";
pub const SCOPES_REMAPPER: &str = "okta-scope-remapper";
pub const DEFAULT_SCOPES: &str = "default-scopes";
pub const ISSUER_PATH: &str = "okta-issuer-url-resolving-source";
pub const STATIC_DISCOVERY: &str = "okta-static-discovery";
pub const OPAQUE_TOKEN: &str = "okta-opaque-token";
pub const REDIRECT_URI: &str = "okta-redirect-uri-helper";
pub const PKCE: &str = "okta-pkce-for-public-clients";

/// Path segment Okta org authorization servers live under.
pub const OAUTH2_PATH: &str = "/oauth2";

/// Standard client id/secret follow the vendor keys.
pub fn remap() -> ConfigLayer {
    AliasLayer::new(REMAP)
        .alias(oauth2::CLIENT_ID, okta::CLIENT_ID)
        .alias(oauth2::CLIENT_SECRET, okta::CLIENT_SECRET)
        .into()
}

/// Standard `scope` bound from vendor `scopes` as an ordered, deduplicated
/// list, placeholders expanded first. Absent while the vendor key is unset or
/// lists no scope.
pub fn scopes_binding() -> ConfigLayer {
    ComputedLayer::new(SCOPES_REMAPPER, oauth2::SCOPE, |env: &dyn PropertyResolver| {
        let scopes = env.resolved_property(okta::SCOPES)?.to_string_set();
        if scopes.is_empty() {
            None
        } else {
            Some(ConfigValue::from(scopes))
        }
    })
    .into()
}

/// Fallback `scope` from metadata. Sits after [`scopes_binding`], so any
/// explicit scope wins by order.
pub fn default_scopes(metadata: &OidcMetadata) -> ConfigLayer {
    ConditionalLayer::new(DEFAULT_SCOPES)
        .with(oauth2::SCOPE, ConfigValue::string_list(metadata.default_scope()))
        .requires(okta::ISSUER)
        .requires(okta::CLIENT_ID)
        .into()
}

/// Endpoint base for `issuer`: unchanged for alternate issuers and issuers
/// that already contain `/oauth2`, else with `/oauth2` appended. A trailing
/// `/` is dropped before appending, so `https://x/` never yields `//oauth2`.
pub fn issuer_with_path(issuer: &str, style: IssuerStyle) -> String {
    if style.is_alternate() || issuer.contains(OAUTH2_PATH) {
        issuer.to_string()
    } else {
        format!("{}{OAUTH2_PATH}", issuer.trim_end_matches('/'))
    }
}

/// `okta.oauth2.issuer-with-path`, derived from the live, resolved issuer.
pub fn issuer_path(style: IssuerStyle) -> ConfigLayer {
    ComputedLayer::new(ISSUER_PATH, okta::ISSUER_WITH_PATH, move |env: &dyn PropertyResolver| {
        let issuer = env.resolved_property(okta::ISSUER)?;
        let issuer = issuer.as_str()?;
        Some(ConfigValue::String(issuer_with_path(issuer, style)))
    })
    .into()
}

/// Client provider and JWT resource-server endpoints.
pub fn static_discovery(metadata: &OidcMetadata) -> ConfigLayer {
    ConditionalLayer::new(STATIC_DISCOVERY)
        .with(oauth2::RESOURCE_SERVER_ISSUER_URI, placeholder(okta::ISSUER))
        .with(oauth2::RESOURCE_SERVER_JWK_SET_URI, metadata.jwk_set_uri())
        .with(oauth2::AUTHORIZATION_URI, metadata.authorization_uri())
        .with(oauth2::TOKEN_URI, metadata.token_uri())
        .with(oauth2::USER_INFO_URI, metadata.user_info_uri())
        .with(oauth2::JWK_SET_URI, metadata.jwk_set_uri())
        // needed for RP-initiated logout
        .with(oauth2::ISSUER_URI, placeholder(okta::ISSUER))
        .requires(okta::ISSUER)
        .into()
}

/// Opaque-token introspection settings, or `None` when the issuer has no
/// introspection endpoint (e.g. Auth0).
pub fn opaque_token(metadata: &OidcMetadata) -> Option<ConfigLayer> {
    let introspection_uri = metadata.introspection_uri()?;
    Some(
        ConditionalLayer::new(OPAQUE_TOKEN)
            .with(oauth2::OPAQUE_TOKEN_CLIENT_ID, placeholder(okta::CLIENT_ID))
            .with(oauth2::OPAQUE_TOKEN_CLIENT_SECRET, placeholder(okta::CLIENT_SECRET))
            .with(oauth2::OPAQUE_TOKEN_INTROSPECTION_URI, introspection_uri)
            .requires(okta::ISSUER)
            .requires(okta::CLIENT_SECRET)
            .into(),
    )
}

/// Redirect URI relative to the application base URL. `{baseUrl}` is
/// expanded by the OAuth2 client, not by the environment.
pub fn redirect_uri() -> ConfigLayer {
    ConditionalLayer::new(REDIRECT_URI)
        .with(
            oauth2::REDIRECT_URI,
            format!("{{baseUrl}}{}", placeholder(okta::REDIRECT_URI)),
        )
        .requires(okta::REDIRECT_URI)
        .into()
}

/// Public clients (no secret) authenticate with PKCE.
pub fn pkce(metadata: &OidcMetadata) -> ConfigLayer {
    ConditionalLayer::new(PKCE)
        .with(
            oauth2::CLIENT_AUTHENTICATION_METHOD,
            metadata.client_authentication_method(),
        )
        .requires(okta::ISSUER)
        .requires(okta::CLIENT_ID)
        .forbids(oauth2::CLIENT_SECRET)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn org_issuer_gets_oauth2_suffix() {
        assert_eq!(
            issuer_with_path("https://x.okta.com", IssuerStyle::Standard),
            "https://x.okta.com/oauth2"
        );
    }

    #[test]
    fn trailing_slash_is_normalized_before_oauth2_suffix() {
        // Appending literally would give `https://x.okta.com//oauth2`.
        assert_eq!(
            issuer_with_path("https://x.okta.com/", IssuerStyle::Standard),
            "https://x.okta.com/oauth2"
        );
    }

    #[test]
    fn custom_authorization_server_is_unchanged() {
        assert_eq!(
            issuer_with_path("https://x.okta.com/oauth2/custom", IssuerStyle::Standard),
            "https://x.okta.com/oauth2/custom"
        );
    }

    #[test]
    fn alternate_issuer_is_unchanged() {
        assert_eq!(
            issuer_with_path("https://tenant.auth0.com/", IssuerStyle::Alternate),
            "https://tenant.auth0.com/"
        );
    }

    #[test]
    fn redirect_layer_defines_only_redirect_uri() {
        let layer = redirect_uri();
        assert_eq!(layer.defined_keys(), vec![oauth2::REDIRECT_URI]);
    }
}
