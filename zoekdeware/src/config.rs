//! Client configuration.
//!
//! The API environment is a pure function of build configuration: debug builds
//! talk to a local gateway, release builds talk to production. Staging is only
//! reachable by asking for it explicitly.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Versioned prefix shared by every API operation
pub const API_PREFIX: &str = "/api/v1";

/// Number of candidates requested per discovery page
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Remaining-deck size at which the next discovery page is requested
pub const DEFAULT_PREFETCH_THRESHOLD: usize = 2;

/// Deployment environment the client talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Environment selected by the build profile.
    pub const fn current() -> Self {
        if cfg!(debug_assertions) {
            Self::Development
        } else {
            Self::Production
        }
    }

    /// Base URL for API calls, including the versioned prefix.
    pub fn api_base_url(self) -> String {
        let host = match self {
            Self::Development => "http://localhost",
            Self::Staging => "https://staging-api.zoekdeware.app",
            Self::Production => "https://api.zoekdeware.app",
        };
        format!("{host}{API_PREFIX}")
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        };
        f.write_str(name)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => Ok(Self::Development),
            "staging" => Ok(Self::Staging),
            "production" | "prod" => Ok(Self::Production),
            other => Err(format!("Unknown environment '{other}'")),
        }
    }
}

/// Request pipeline configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL every endpoint path is resolved against
    pub base_url: String,

    /// Deadline for establishing a connection
    pub request_timeout: Duration,

    /// Deadline for a whole request/response exchange
    pub resource_timeout: Duration,
}

impl ApiConfig {
    /// Configuration for a given environment with default timeouts
    pub fn for_environment(environment: Environment) -> Self {
        Self::with_base_url(environment.api_base_url())
    }

    /// Configuration pointing at an explicit base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: Duration::from_secs(30),
            resource_timeout: Duration::from_secs(60),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::for_environment(Environment::current())
    }
}

/// Paging policy for the discovery deck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoverySettings {
    /// Candidates requested per page
    pub page_size: u32,

    /// Refill when `deck length - cursor` drops to this value or below
    pub prefetch_threshold: usize,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            prefetch_threshold: DEFAULT_PREFETCH_THRESHOLD,
        }
    }
}
