//! Client configuration.

use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// Endpoint serving the people payload unless configured otherwise.
pub const DEFAULT_ENDPOINT: &str =
    "https://mate-academy.github.io/react_people-table/api/people.json";

/// Request timeout unless configured otherwise.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings for [`HttpPeopleSource`](crate::HttpPeopleSource).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// URL of the people JSON payload.
    pub endpoint: String,
    /// Whole-request timeout in seconds. Accepts an integer or a numeric
    /// string, since environment overrides arrive as strings.
    #[serde(deserialize_with = "de_secs")]
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Creates a config for the given endpoint with the default timeout.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Parses and checks the endpoint. Only `http` and `https` are accepted.
    pub fn endpoint_url(&self) -> Result<Url> {
        let url = Url::parse(&self.endpoint)
            .map_err(|e| Error::config(format!("invalid endpoint '{}': {e}", self.endpoint)))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(Error::config(format!(
                "unsupported endpoint scheme '{other}' (expected http or https)"
            ))),
        }
    }

    /// Checks every field.
    pub fn validate(&self) -> Result<()> {
        self.endpoint_url()?;
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be greater than zero"));
        }
        Ok(())
    }
}

fn de_secs<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Secs {
        Int(u64),
        Text(String),
    }

    match Secs::deserialize(deserializer)? {
        Secs::Int(secs) => Ok(secs),
        Secs::Text(raw) => raw.trim().parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "timeout_secs must be a whole number of seconds, got '{raw}'"
            ))
        }),
    }
}
