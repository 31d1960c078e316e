//! Injected store configuration.
//!
//! Both configs are plain values built by the process entry point and
//! passed into store constructors. The region, host, and credential values
//! come from wherever the deployment keeps them; this crate never reads
//! the environment itself.

/// Configuration for a key-value store client.
#[derive(Debug, Clone)]
pub struct KeyValueConfig {
    region: String,
}

impl KeyValueConfig {
    /// Creates a config for the given region.
    #[must_use]
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
        }
    }

    /// Returns the region.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }
}

/// Configuration for a relational store client, including pool sizing.
#[derive(Debug, Clone)]
pub struct RelationalConfig {
    host: String,
    port: u16,
    database: String,
    user: String,
    password: String,
    max_connections: u32,
    idle_timeout_ms: u64,
    connection_timeout_ms: u64,
}

impl RelationalConfig {
    /// Creates a config builder.
    #[must_use]
    pub fn builder() -> RelationalConfigBuilder {
        RelationalConfigBuilder::default()
    }

    /// Returns the database host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the database port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns the database name.
    #[must_use]
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Returns the database user.
    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Returns the database password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Returns the maximum pool size.
    #[must_use]
    pub const fn max_connections(&self) -> u32 {
        self.max_connections
    }

    /// Returns the idle timeout in milliseconds.
    #[must_use]
    pub const fn idle_timeout_ms(&self) -> u64 {
        self.idle_timeout_ms
    }

    /// Returns the connection acquisition timeout in milliseconds.
    #[must_use]
    pub const fn connection_timeout_ms(&self) -> u64 {
        self.connection_timeout_ms
    }
}

/// Builder for [`RelationalConfig`].
#[derive(Debug)]
pub struct RelationalConfigBuilder {
    host: String,
    port: u16,
    database: String,
    user: String,
    password: String,
    max_connections: u32,
    idle_timeout_ms: u64,
    connection_timeout_ms: u64,
}

impl Default for RelationalConfigBuilder {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            database: String::new(),
            user: String::new(),
            password: String::new(),
            max_connections: 10,
            idle_timeout_ms: 30_000,
            connection_timeout_ms: 2_000,
        }
    }
}

impl RelationalConfigBuilder {
    /// Sets the database host.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the database port.
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the database name.
    #[must_use]
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Sets the database user.
    #[must_use]
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    /// Sets the database password.
    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    /// Sets the maximum pool size.
    #[must_use]
    pub const fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the idle timeout in milliseconds.
    #[must_use]
    pub const fn idle_timeout_ms(mut self, timeout: u64) -> Self {
        self.idle_timeout_ms = timeout;
        self
    }

    /// Sets the connection acquisition timeout in milliseconds.
    #[must_use]
    pub const fn connection_timeout_ms(mut self, timeout: u64) -> Self {
        self.connection_timeout_ms = timeout;
        self
    }

    /// Builds the config.
    #[must_use]
    pub fn build(self) -> RelationalConfig {
        RelationalConfig {
            host: self.host,
            port: self.port,
            database: self.database,
            user: self.user,
            password: self.password,
            max_connections: self.max_connections,
            idle_timeout_ms: self.idle_timeout_ms,
            connection_timeout_ms: self.connection_timeout_ms,
        }
    }
}
