use std::sync::Arc;
use std::time::Duration;

use okta_env_core::{
    ConfigError, DeferredLog, Environment, EnvironmentPostProcessor, LOWEST_PRECEDENCE,
};
use okta_env_oidc::{
    DiscoveryClient, DomainClassifier, MetadataFetcher, OidcMetadata, ReqwestDiscoveryClient,
};

use crate::chain::LayerChain;
use crate::keys::okta;

/// Maps `okta.oauth2.*` properties and discovery metadata onto the standard
/// `security.oauth2.*` properties.
///
/// Resolves [`OidcMetadata`] once (at most one discovery request), then
/// appends a [`LayerChain`] after every existing source so that anything the
/// application configures explicitly wins.
///
/// | Okta property | Standard property |
/// |---|---|
/// | `okta.oauth2.client-id` | `security.oauth2.client.registration.okta.client-id` |
/// | `okta.oauth2.client-secret` | `security.oauth2.client.registration.okta.client-secret` |
/// | `okta.oauth2.scopes` | `security.oauth2.client.registration.okta.scope` |
/// | `{baseUrl}${okta.oauth2.redirect-uri}` | `security.oauth2.client.registration.okta.redirect-uri` |
/// | `${okta.oauth2.issuer-with-path}/v1/authorize` | `security.oauth2.client.provider.okta.authorization-uri` |
/// | `${okta.oauth2.issuer-with-path}/v1/token` | `security.oauth2.client.provider.okta.token-uri` |
/// | `${okta.oauth2.issuer-with-path}/v1/userinfo` | `security.oauth2.client.provider.okta.user-info-uri` |
/// | `${okta.oauth2.issuer-with-path}/v1/keys` | `security.oauth2.client.provider.okta.jwk-set-uri` |
/// | `${okta.oauth2.issuer}` | `security.oauth2.resourceserver.jwt.issuer-uri` |
/// | `${okta.oauth2.issuer-with-path}/v1/keys` | `security.oauth2.resourceserver.jwt.jwk-set-uri` |
/// | `${okta.oauth2.client-id}` | `security.oauth2.resourceserver.opaque-token.client-id` |
/// | `${okta.oauth2.client-secret}` | `security.oauth2.resourceserver.opaque-token.client-secret` |
/// | `${okta.oauth2.issuer-with-path}/v1/introspect` | `security.oauth2.resourceserver.opaque-token.introspection-uri` |
///
/// Endpoint values are the discovered URLs when discovery succeeds.
#[derive(Default, Clone)]
pub struct OktaOAuth2PostProcessor {
    client: Option<Arc<dyn DiscoveryClient>>,
}

impl OktaOAuth2PostProcessor {
    pub const NAME: &'static str = "okta-oauth2-properties-mapping";

    /// Discovery through `reqwest`, timeout from
    /// `okta.oauth2.discovery.timeout-secs` when set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `client` for discovery instead of the default HTTP client.
    pub fn with_client(client: impl DiscoveryClient + 'static) -> Self {
        Self {
            client: Some(Arc::new(client)),
        }
    }

    fn resolve_metadata(
        &self,
        env: &Environment,
        log: &DeferredLog,
    ) -> Result<OidcMetadata, ConfigError> {
        let issuer: Option<String> = env.get_optional(okta::ISSUER)?;
        let classifier = match env.value(okta::ALTERNATE_ISSUER_DOMAINS) {
            Some(domains) => DomainClassifier::new(domains.to_string_set()),
            None => DomainClassifier::default(),
        };

        let metadata = match &self.client {
            Some(client) => MetadataFetcher::new(client.clone(), okta::ISSUER_WITH_PATH)
                .with_classifier(classifier)
                .fetch(issuer.as_deref(), log)?,
            None => {
                let client = match env.get_optional::<u64>(okta::DISCOVERY_TIMEOUT_SECS)? {
                    Some(secs) => ReqwestDiscoveryClient::with_timeout(Duration::from_secs(secs))?,
                    None => ReqwestDiscoveryClient::new()?,
                };
                MetadataFetcher::new(client, okta::ISSUER_WITH_PATH)
                    .with_classifier(classifier)
                    .fetch(issuer.as_deref(), log)?
            }
        };
        Ok(metadata)
    }
}

impl EnvironmentPostProcessor for OktaOAuth2PostProcessor {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn order(&self) -> i32 {
        LOWEST_PRECEDENCE - 1
    }

    fn post_process(&self, env: &mut Environment, log: &DeferredLog) -> Result<(), ConfigError> {
        let metadata = self.resolve_metadata(env, log)?;
        let chain = LayerChain::build(&metadata);
        log.debug(
            Self::NAME,
            format!(
                "Installing {:?} metadata layers: {}",
                metadata.origin(),
                chain.names().join(", ")
            ),
        );
        chain.install(env);
        Ok(())
    }
}

impl std::fmt::Debug for OktaOAuth2PostProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OktaOAuth2PostProcessor")
            .field("custom_client", &self.client.is_some())
            .finish()
    }
}
