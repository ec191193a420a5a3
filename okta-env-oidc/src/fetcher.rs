use okta_env_core::DeferredLog;
use url::Url;

use crate::classifier::{DomainClassifier, IssuerClassifier};
use crate::client::DiscoveryClient;
use crate::error::DiscoveryError;
use crate::metadata::{DiscoveryDocument, OidcMetadata};

/// Path of the discovery document relative to the issuer.
pub const DISCOVERY_PATH: &str = ".well-known/openid-configuration";

const ORIGIN: &str = "okta_env_oidc::fetcher";

/// Discovery URL for `issuer`: the issuer with exactly one trailing `/`,
/// followed by [`DISCOVERY_PATH`].
///
/// # Errors
///
/// [`DiscoveryError::InvalidIssuer`] if the result is not an absolute URL.
pub fn discovery_url(issuer: &str) -> Result<Url, DiscoveryError> {
    let base = issuer.trim().trim_end_matches('/');
    Url::parse(&format!("{base}/{DISCOVERY_PATH}"))
        .map_err(|e| DiscoveryError::InvalidIssuer(format!("'{issuer}': {e}")))
}

/// Resolves [`OidcMetadata`] for an issuer, falling back to vendor defaults
/// when discovery cannot be completed.
pub struct MetadataFetcher<C> {
    client: C,
    classifier: Box<dyn IssuerClassifier>,
    issuer_key: String,
}

impl<C: DiscoveryClient> MetadataFetcher<C> {
    /// `issuer_key` is the property fallback endpoint templates refer to.
    pub fn new(client: C, issuer_key: impl Into<String>) -> Self {
        Self {
            client,
            classifier: Box::new(DomainClassifier::default()),
            issuer_key: issuer_key.into(),
        }
    }

    pub fn with_classifier(mut self, classifier: impl IssuerClassifier + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    /// Resolve metadata for `issuer`.
    ///
    /// With no issuer, returns [`OidcMetadata::fallback`] without touching the
    /// network. Otherwise performs exactly one request; transport and parse
    /// failures are logged to `log` as warnings and yield the fallback.
    ///
    /// # Errors
    ///
    /// Failures that are not [recoverable](DiscoveryError::is_recoverable):
    /// an issuer that is not a URL, or a non-success HTTP status.
    pub fn fetch(&self, issuer: Option<&str>, log: &DeferredLog) -> Result<OidcMetadata, DiscoveryError> {
        let Some(issuer) = issuer else {
            log.debug(ORIGIN, "No issuer configured, using default metadata");
            return Ok(OidcMetadata::fallback(&self.issuer_key));
        };

        let url = discovery_url(issuer)?;
        let span = tracing::debug_span!("oidc_discovery", %url);
        let fetched = span.in_scope(|| {
            tracing::debug!("Requesting discovery document");
            self.client
                .get_json(&url)
                .and_then(DiscoveryDocument::from_json)
        });

        match fetched {
            Ok(document) => {
                let style = self.classifier.classify(issuer, &document);
                log.debug(ORIGIN, format!("Loaded OIDC metadata from {url} ({style:?} issuer)"));
                Ok(OidcMetadata::discovered(document, style, &self.issuer_key))
            }
            Err(err) if err.is_recoverable() => {
                log.warn(
                    ORIGIN,
                    format!(
                        "Failed to process '{DISCOVERY_PATH}' metadata from {url}: {err}. Using defaults for Okta"
                    ),
                );
                Ok(OidcMetadata::fallback(&self.issuer_key))
            }
            Err(err) => Err(err),
        }
    }
}
