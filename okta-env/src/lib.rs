//! Okta configuration for OAuth2 clients and resource servers.
//!
//! Applications configure a handful of `okta.oauth2.*` properties:
//!
//! ```yaml
//! okta:
//!   oauth2:
//!     issuer: https://dev-123.okta.com/oauth2/default
//!     client-id: 0oa123
//!     client-secret: ${OKTA_CLIENT_SECRET}
//!     scopes: openid, profile, email
//!     redirect-uri: /login/oauth2/code/okta
//! ```
//!
//! [`bootstrap`] fetches the issuer's discovery document once and installs
//! layers that derive the `security.oauth2.*` client registration, provider
//! and resource-server properties from them. Every derived value is resolved
//! when it is read, so later overrides of the vendor keys are always seen.
//!
//! ```ignore
//! let env = okta_env::bootstrap(Environment::load("default")?)?;
//! let token_uri: String = env.get_resolved(okta_env::keys::oauth2::TOKEN_URI)?;
//! ```

pub mod chain;
pub mod keys;
pub mod layers;
pub mod processor;

pub use chain::LayerChain;
pub use processor::OktaOAuth2PostProcessor;

pub use okta_env_core::{
    Bootstrap, ConfigError, ConfigValue, DeferredLog, Environment, EnvironmentPostProcessor,
    FromConfigValue, LogSink, PropertyResolver, PropertySource,
};
pub use okta_env_oidc::{
    DiscoveryClient, DiscoveryError, IssuerStyle, MetadataOrigin, OidcMetadata,
};

/// Run the Okta post-processor over `env` and replay its log into `tracing`.
///
/// # Errors
///
/// [`ConfigError::Bootstrap`] when the issuer is not a URL or the discovery
/// endpoint answers with an error status. Unreachable or malformed discovery
/// is not an error; defaults are used and a warning is logged.
pub fn bootstrap(env: Environment) -> Result<Environment, ConfigError> {
    Bootstrap::new(env)
        .processor(OktaOAuth2PostProcessor::new())
        .run_with_tracing()
}
