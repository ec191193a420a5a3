use okta_env_core::ConfigError;

/// Errors raised while fetching the discovery document.
#[derive(Debug)]
pub enum DiscoveryError {
    /// The configured issuer is not a valid URL.
    InvalidIssuer(String),

    /// The HTTP client could not be constructed.
    Client(String),

    /// Transport failure: connection refused, DNS, timeout, truncated body.
    Unreachable(String),

    /// The response body is not a JSON object with the expected field types.
    Malformed(String),

    /// The discovery endpoint answered with a non-success status.
    Status(u16),
}

impl DiscoveryError {
    /// Whether bootstrap should fall back to default metadata instead of
    /// failing.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DiscoveryError::Unreachable(_) | DiscoveryError::Malformed(_))
    }
}

impl std::fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscoveryError::InvalidIssuer(msg) => write!(f, "Invalid issuer: {msg}"),
            DiscoveryError::Client(msg) => write!(f, "HTTP client error: {msg}"),
            DiscoveryError::Unreachable(msg) => write!(f, "Discovery endpoint unreachable: {msg}"),
            DiscoveryError::Malformed(msg) => write!(f, "Malformed discovery document: {msg}"),
            DiscoveryError::Status(code) => {
                write!(f, "Discovery endpoint returned HTTP {code}")
            }
        }
    }
}

impl std::error::Error for DiscoveryError {}

/// Name used for discovery failures that abort bootstrap.
pub const DISCOVERY_PROCESSOR: &str = "oidc-discovery";

impl From<DiscoveryError> for ConfigError {
    fn from(err: DiscoveryError) -> Self {
        ConfigError::Bootstrap {
            processor: DISCOVERY_PROCESSOR,
            message: err.to_string(),
        }
    }
}
