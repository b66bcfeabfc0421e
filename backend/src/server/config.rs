//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use reqwest::Url;

use crate::outbound::persistence::DbPool;

/// Default identity provider request timeout.
pub const DEFAULT_IDENTITY_TIMEOUT: Duration = Duration::from_secs(5);

/// Identity provider connection settings.
#[derive(Debug, Clone)]
pub struct IdentityProviderConfig {
    /// Base URL of the provider's API.
    pub base_url: Url,
    /// Per-request timeout for introspection calls.
    pub timeout: Duration,
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) identity_provider: Option<IdentityProviderConfig>,
}

impl ServerConfig {
    /// Construct a server configuration binding to the given address.
    ///
    /// Without a database pool or identity provider attached, the server
    /// runs on fixture adapters; useful for tests and local development
    /// only.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            identity_provider: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Attach the identity provider used to introspect bearer tokens.
    #[must_use]
    pub fn with_identity_provider(mut self, identity_provider: IdentityProviderConfig) -> Self {
        self.identity_provider = Some(identity_provider);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
