//! HTTP people source.

use async_trait::async_trait;
use lineage_core::{PersonRecord, decode_people};
use reqwest::Url;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::source::PeopleSource;

/// Fetches the people payload with a GET request.
#[derive(Clone, Debug)]
pub struct HttpPeopleSource {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpPeopleSource {
    /// Builds a source from a validated config.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let endpoint = config.endpoint_url()?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("lineage/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, endpoint })
    }

    /// The endpoint this source requests.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl PeopleSource for HttpPeopleSource {
    async fn fetch_people(&self) -> Result<Vec<PersonRecord>> {
        tracing::debug!(endpoint = %self.endpoint, "Fetching people");

        let response = self.client.get(self.endpoint.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                url: self.endpoint.to_string(),
            });
        }

        let body = response.bytes().await?;
        let records = decode_people(&body)?;
        tracing::info!(endpoint = %self.endpoint, count = records.len(), "Fetched people");
        Ok(records)
    }

    fn describe(&self) -> String {
        self.endpoint.to_string()
    }
}
