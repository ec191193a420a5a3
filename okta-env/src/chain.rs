use okta_env_core::{ConfigLayer, Environment};
use okta_env_oidc::OidcMetadata;

use crate::layers;

/// The ordered set of okta-env layers for one bootstrap.
///
/// Order, highest priority first:
///
/// 1. `okta-to-oauth2`: client id/secret aliases
/// 2. `okta-scope-remapper`: scopes from `okta.oauth2.scopes`
/// 3. `default-scopes`: metadata default scopes
/// 4. `okta-issuer-url-resolving-source`: `okta.oauth2.issuer-with-path`
/// 5. `okta-static-discovery`: provider and resource-server endpoints
/// 6. `okta-opaque-token`: only if metadata has an introspection endpoint
/// 7. `okta-redirect-uri-helper`
/// 8. `okta-pkce-for-public-clients`
#[derive(Debug, Clone)]
pub struct LayerChain {
    layers: Vec<ConfigLayer>,
}

impl LayerChain {
    pub fn build(metadata: &OidcMetadata) -> Self {
        let mut chain = vec![
            layers::remap(),
            layers::scopes_binding(),
            layers::default_scopes(metadata),
            layers::issuer_path(metadata.issuer_style()),
            layers::static_discovery(metadata),
        ];
        chain.extend(layers::opaque_token(metadata));
        chain.push(layers::redirect_uri());
        chain.push(layers::pkce(metadata));
        Self { layers: chain }
    }

    pub fn layers(&self) -> &[ConfigLayer] {
        &self.layers
    }

    pub fn names(&self) -> Vec<&str> {
        self.layers.iter().map(ConfigLayer::name).collect()
    }

    /// Append every layer to `env`, after all existing sources.
    pub fn install(self, env: &mut Environment) {
        for layer in self.layers {
            env.add_last(layer);
        }
    }
}
