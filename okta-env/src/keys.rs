//! Property names read and produced by okta-env.

/// Vendor keys supplied by the operator.
pub mod okta {
    pub const PREFIX: &str = "okta.oauth2.";
    pub const ISSUER: &str = "okta.oauth2.issuer";
    /// Derived by the issuer-path layer; never set by hand.
    pub const ISSUER_WITH_PATH: &str = "okta.oauth2.issuer-with-path";
    pub const CLIENT_ID: &str = "okta.oauth2.client-id";
    pub const CLIENT_SECRET: &str = "okta.oauth2.client-secret";
    /// Comma-separated string or list.
    pub const SCOPES: &str = "okta.oauth2.scopes";
    /// Path relative to the application base URL.
    pub const REDIRECT_URI: &str = "okta.oauth2.redirect-uri";
    /// Discovery request timeout in seconds.
    pub const DISCOVERY_TIMEOUT_SECS: &str = "okta.oauth2.discovery.timeout-secs";
    /// Hosts whose issuers already are the endpoint base.
    pub const ALTERNATE_ISSUER_DOMAINS: &str = "okta.oauth2.discovery.alternate-issuer-domains";

    pub const ALL: &[&str] = &[
        ISSUER,
        ISSUER_WITH_PATH,
        CLIENT_ID,
        CLIENT_SECRET,
        SCOPES,
        REDIRECT_URI,
        DISCOVERY_TIMEOUT_SECS,
        ALTERNATE_ISSUER_DOMAINS,
    ];
}

/// Standard OAuth2 client and resource-server keys.
pub mod oauth2 {
    pub const PREFIX: &str = "security.oauth2.";

    pub const CLIENT_ID: &str = "security.oauth2.client.registration.okta.client-id";
    pub const CLIENT_SECRET: &str = "security.oauth2.client.registration.okta.client-secret";
    pub const SCOPE: &str = "security.oauth2.client.registration.okta.scope";
    pub const REDIRECT_URI: &str = "security.oauth2.client.registration.okta.redirect-uri";
    pub const CLIENT_AUTHENTICATION_METHOD: &str =
        "security.oauth2.client.registration.okta.client-authentication-method";

    pub const AUTHORIZATION_URI: &str = "security.oauth2.client.provider.okta.authorization-uri";
    pub const TOKEN_URI: &str = "security.oauth2.client.provider.okta.token-uri";
    pub const USER_INFO_URI: &str = "security.oauth2.client.provider.okta.user-info-uri";
    pub const JWK_SET_URI: &str = "security.oauth2.client.provider.okta.jwk-set-uri";
    pub const ISSUER_URI: &str = "security.oauth2.client.provider.okta.issuer-uri";

    pub const RESOURCE_SERVER_ISSUER_URI: &str = "security.oauth2.resourceserver.jwt.issuer-uri";
    pub const RESOURCE_SERVER_JWK_SET_URI: &str = "security.oauth2.resourceserver.jwt.jwk-set-uri";

    pub const OPAQUE_TOKEN_CLIENT_ID: &str = "security.oauth2.resourceserver.opaque-token.client-id";
    pub const OPAQUE_TOKEN_CLIENT_SECRET: &str =
        "security.oauth2.resourceserver.opaque-token.client-secret";
    pub const OPAQUE_TOKEN_INTROSPECTION_URI: &str =
        "security.oauth2.resourceserver.opaque-token.introspection-uri";

    pub const ALL: &[&str] = &[
        CLIENT_ID,
        CLIENT_SECRET,
        SCOPE,
        REDIRECT_URI,
        CLIENT_AUTHENTICATION_METHOD,
        AUTHORIZATION_URI,
        TOKEN_URI,
        USER_INFO_URI,
        JWK_SET_URI,
        ISSUER_URI,
        RESOURCE_SERVER_ISSUER_URI,
        RESOURCE_SERVER_JWK_SET_URI,
        OPAQUE_TOKEN_CLIENT_ID,
        OPAQUE_TOKEN_CLIENT_SECRET,
        OPAQUE_TOKEN_INTROSPECTION_URI,
    ];
}

/// `${key}`
pub fn placeholder(key: &str) -> String {
    format!("${{{key}}}")
}
