use url::Url;

use crate::metadata::{DiscoveryDocument, IssuerStyle};

/// Decides which [`IssuerStyle`] an issuer follows.
pub trait IssuerClassifier: Send + Sync {
    /// `issuer` is the configured issuer; `document` the discovery response.
    fn classify(&self, issuer: &str, document: &DiscoveryDocument) -> IssuerStyle;
}

/// Marks issuers hosted under any of a list of domains as
/// [`IssuerStyle::Alternate`].
///
/// The host is taken from the document's `issuer` field when present, else
/// from the configured issuer. A domain matches itself and its subdomains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainClassifier {
    domains: Vec<String>,
}

impl DomainClassifier {
    /// Domain whose tenants use the alternate style by default.
    pub const AUTH0_DOMAIN: &'static str = "auth0.com";

    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            domains: domains
                .into_iter()
                .map(|d| d.as_ref().trim().trim_start_matches('.').to_ascii_lowercase())
                .filter(|d| !d.is_empty())
                .collect(),
        }
    }

    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    fn matches(&self, host: &str) -> bool {
        self.domains.iter().any(|domain| {
            host == domain
                || host
                    .strip_suffix(domain.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }
}

impl Default for DomainClassifier {
    fn default() -> Self {
        Self::new([Self::AUTH0_DOMAIN])
    }
}

impl IssuerClassifier for DomainClassifier {
    fn classify(&self, issuer: &str, document: &DiscoveryDocument) -> IssuerStyle {
        let candidate = document.issuer.as_deref().unwrap_or(issuer);
        let host = Url::parse(candidate)
            .ok()
            .and_then(|url| url.host_str().map(str::to_ascii_lowercase));

        match host {
            Some(host) if self.matches(&host) => IssuerStyle::Alternate,
            _ => IssuerStyle::Standard,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(issuer: Option<&str>) -> DiscoveryDocument {
        DiscoveryDocument {
            issuer: issuer.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn auth0_tenants_are_alternate() {
        let classifier = DomainClassifier::default();
        assert_eq!(
            classifier.classify("https://tenant.us.auth0.com/", &doc(None)),
            IssuerStyle::Alternate
        );
    }

    #[test]
    fn okta_orgs_are_standard() {
        let classifier = DomainClassifier::default();
        assert_eq!(
            classifier.classify("https://example.okta.com", &doc(None)),
            IssuerStyle::Standard
        );
    }

    #[test]
    fn document_issuer_takes_precedence() {
        let classifier = DomainClassifier::default();
        assert_eq!(
            classifier.classify("https://login.example.com", &doc(Some("https://tenant.auth0.com/"))),
            IssuerStyle::Alternate
        );
    }

    #[test]
    fn lookalike_domains_do_not_match() {
        let classifier = DomainClassifier::default();
        assert_eq!(
            classifier.classify("https://notauth0.com", &doc(None)),
            IssuerStyle::Standard
        );
    }

    #[test]
    fn custom_domains() {
        let classifier = DomainClassifier::new([" .Login.Example.com ", ""]);
        assert_eq!(classifier.domains(), ["login.example.com"]);
        assert_eq!(
            classifier.classify("https://eu.login.example.com", &doc(None)),
            IssuerStyle::Alternate
        );
    }
}
