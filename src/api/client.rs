use async_trait::async_trait;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;

use super::fetcher::{ContentFetcher, FetchError};
use super::types::{Law, NormContent, NormSummary};

/// HTTP implementation of [`ContentFetcher`] against the law library backend:
///
/// - `GET {base}/laws`
/// - `GET {base}/laws/{law_id}/norms`
/// - `GET {base}/norms/{norm_id}`
///
/// No request bodies, no write operations, no auth headers.
pub struct HttpFetcher {
    base_url: String,
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Creates a fetcher for the given base URL (e.g. `http://localhost:5000/api`).
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// GETs `{base_url}{path}` and decodes the JSON body.
    ///
    /// Status and decode failures map onto the [`FetchError`] taxonomy; the
    /// body is read as text first so a bad payload surfaces as `Parse`, not
    /// as a transport error.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Backend error: GET {} -> {} - {}", url, status, message);
            return Err(FetchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))
    }
}

#[async_trait]
impl ContentFetcher for HttpFetcher {
    fn name(&self) -> &str {
        "http"
    }

    async fn list_laws(&self) -> Result<Vec<Law>, FetchError> {
        let laws: Vec<Law> = self.get_json("/laws").await?;
        info!("Fetched {} laws", laws.len());
        Ok(laws)
    }

    async fn list_norms(&self, law_id: u32) -> Result<Vec<NormSummary>, FetchError> {
        let norms: Vec<NormSummary> = self.get_json(&format!("/laws/{law_id}/norms")).await?;
        info!("Fetched {} norms for law {}", norms.len(), law_id);
        Ok(norms)
    }

    async fn norm_content(&self, norm_id: u32) -> Result<NormContent, FetchError> {
        let content: NormContent = self.get_json(&format!("/norms/{norm_id}")).await?;
        info!(
            "Fetched content for norm {} ({} bytes)",
            norm_id,
            content.content.len()
        );
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let fetcher = HttpFetcher::new("http://localhost:5000/api/".to_string());
        assert_eq!(fetcher.base_url, "http://localhost:5000/api");
    }

    #[test]
    fn test_new_keeps_clean_base_url() {
        let fetcher = HttpFetcher::new("http://localhost:5000/api".to_string());
        assert_eq!(fetcher.base_url, "http://localhost:5000/api");
    }
}
