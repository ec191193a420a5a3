use serde::Deserialize;

use crate::error::DiscoveryError;

/// Client authentication method that marks a public client using PKCE.
pub const PKCE_CLIENT_AUTHENTICATION_METHOD: &str = "none";

/// Client authentication method used when the provider does not accept `none`.
pub const DEFAULT_CLIENT_AUTHENTICATION_METHOD: &str = "client_secret_basic";

/// Scopes requested when the caller configures none.
pub const DEFAULT_SCOPES: [&str; 3] = ["openid", "profile", "email"];

/// The subset of `.well-known/openid-configuration` this crate reads.
///
/// Every field is optional; unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscoveryDocument {
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub authorization_endpoint: Option<String>,
    #[serde(default)]
    pub token_endpoint: Option<String>,
    #[serde(default)]
    pub userinfo_endpoint: Option<String>,
    #[serde(default)]
    pub jwks_uri: Option<String>,
    #[serde(default)]
    pub introspection_endpoint: Option<String>,
    #[serde(default)]
    pub token_endpoint_auth_methods_supported: Option<Vec<String>>,
}

impl DiscoveryDocument {
    /// Decode a parsed JSON body. Anything but an object is malformed.
    pub fn from_json(value: serde_json::Value) -> Result<Self, DiscoveryError> {
        if !value.is_object() {
            return Err(DiscoveryError::Malformed(
                "expected a JSON object".to_string(),
            ));
        }
        serde_json::from_value(value).map_err(|e| DiscoveryError::Malformed(e.to_string()))
    }
}

/// How an issuer URL maps to its OAuth2 endpoint base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum IssuerStyle {
    /// Okta org issuer: endpoints live under `<issuer>/oauth2` unless the
    /// issuer already names an authorization server.
    #[default]
    Standard,
    /// Issuer already is the endpoint base (e.g. Auth0 tenants).
    Alternate,
}

impl IssuerStyle {
    pub fn is_alternate(self) -> bool {
        matches!(self, IssuerStyle::Alternate)
    }
}

/// Where an [`OidcMetadata`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataOrigin {
    Discovered,
    Fallback,
}

/// Issuer metadata used to derive the standard OAuth2 properties.
///
/// Endpoint values are either literal URLs from discovery or `${key}/...`
/// templates over an issuer key, left for the environment to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OidcMetadata {
    authorization_uri: String,
    token_uri: String,
    user_info_uri: String,
    jwk_set_uri: String,
    introspection_uri: Option<String>,
    default_scope: Vec<String>,
    client_authentication_method: String,
    issuer_style: IssuerStyle,
    origin: MetadataOrigin,
}

fn template(issuer_key: &str, path: &str) -> String {
    format!("${{{issuer_key}}}{path}")
}

fn default_scope() -> Vec<String> {
    DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect()
}

impl OidcMetadata {
    /// Vendor defaults with every endpoint templated over `issuer_key`.
    pub fn fallback(issuer_key: &str) -> Self {
        Self {
            authorization_uri: template(issuer_key, "/v1/authorize"),
            token_uri: template(issuer_key, "/v1/token"),
            user_info_uri: template(issuer_key, "/v1/userinfo"),
            jwk_set_uri: template(issuer_key, "/v1/keys"),
            introspection_uri: Some(template(issuer_key, "/v1/introspect")),
            default_scope: default_scope(),
            client_authentication_method: PKCE_CLIENT_AUTHENTICATION_METHOD.to_string(),
            issuer_style: IssuerStyle::Standard,
            origin: MetadataOrigin::Fallback,
        }
    }

    /// Metadata from a discovery document. Missing endpoints fall back to
    /// their `issuer_key` template; a missing introspection endpoint stays
    /// absent.
    pub fn discovered(document: DiscoveryDocument, style: IssuerStyle, issuer_key: &str) -> Self {
        let client_authentication_method = match &document.token_endpoint_auth_methods_supported {
            Some(methods) if !methods.iter().any(|m| m == PKCE_CLIENT_AUTHENTICATION_METHOD) => {
                DEFAULT_CLIENT_AUTHENTICATION_METHOD
            }
            _ => PKCE_CLIENT_AUTHENTICATION_METHOD,
        };

        Self {
            authorization_uri: document
                .authorization_endpoint
                .unwrap_or_else(|| template(issuer_key, "/v1/authorize")),
            token_uri: document
                .token_endpoint
                .unwrap_or_else(|| template(issuer_key, "/v1/token")),
            user_info_uri: document
                .userinfo_endpoint
                .unwrap_or_else(|| template(issuer_key, "/v1/userinfo")),
            jwk_set_uri: document
                .jwks_uri
                .unwrap_or_else(|| template(issuer_key, "/v1/keys")),
            introspection_uri: document.introspection_endpoint,
            default_scope: default_scope(),
            client_authentication_method: client_authentication_method.to_string(),
            issuer_style: style,
            origin: MetadataOrigin::Discovered,
        }
    }

    pub fn authorization_uri(&self) -> &str {
        &self.authorization_uri
    }

    pub fn token_uri(&self) -> &str {
        &self.token_uri
    }

    pub fn user_info_uri(&self) -> &str {
        &self.user_info_uri
    }

    pub fn jwk_set_uri(&self) -> &str {
        &self.jwk_set_uri
    }

    pub fn introspection_uri(&self) -> Option<&str> {
        self.introspection_uri.as_deref()
    }

    pub fn default_scope(&self) -> &[String] {
        &self.default_scope
    }

    pub fn client_authentication_method(&self) -> &str {
        &self.client_authentication_method
    }

    pub fn issuer_style(&self) -> IssuerStyle {
        self.issuer_style
    }

    pub fn is_alternate_issuer_style(&self) -> bool {
        self.issuer_style.is_alternate()
    }

    pub fn origin(&self) -> MetadataOrigin {
        self.origin
    }

    pub fn is_discovered(&self) -> bool {
        self.origin == MetadataOrigin::Discovered
    }
}
