//! OIDC discovery for okta-env.
//!
//! [`MetadataFetcher`] turns an optional issuer into [`OidcMetadata`]: one
//! blocking request to `<issuer>/.well-known/openid-configuration`, or vendor
//! defaults when there is no issuer or the request fails in a recoverable
//! way.
//!
//! ```ignore
//! use okta_env_core::DeferredLog;
//! use okta_env_oidc::{MetadataFetcher, ReqwestDiscoveryClient};
//!
//! let log = DeferredLog::new();
//! let fetcher = MetadataFetcher::new(ReqwestDiscoveryClient::new()?, "okta.oauth2.issuer-with-path");
//! let metadata = fetcher.fetch(Some("https://example.okta.com/oauth2/default"), &log)?;
//! ```

pub mod classifier;
pub mod client;
pub mod error;
pub mod fetcher;
pub mod metadata;

pub use classifier::{DomainClassifier, IssuerClassifier};
pub use client::{DiscoveryClient, ReqwestDiscoveryClient};
pub use error::DiscoveryError;
pub use fetcher::{discovery_url, MetadataFetcher, DISCOVERY_PATH};
pub use metadata::{
    DiscoveryDocument, IssuerStyle, MetadataOrigin, OidcMetadata,
    DEFAULT_CLIENT_AUTHENTICATION_METHOD, DEFAULT_SCOPES, PKCE_CLIENT_AUTHENTICATION_METHOD,
};
