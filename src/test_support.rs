//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::{ContentFetcher, FetchError, Law, NormContent, NormSummary};
use crate::core::state::App;

/// A fetcher serving canned data for tests that don't need real HTTP.
#[derive(Default)]
pub struct StubFetcher {
    pub laws: Vec<Law>,
    pub norms: Vec<NormSummary>,
    pub content: Option<NormContent>,
}

#[async_trait]
impl ContentFetcher for StubFetcher {
    fn name(&self) -> &str {
        "stub"
    }

    async fn list_laws(&self) -> Result<Vec<Law>, FetchError> {
        Ok(self.laws.clone())
    }

    async fn list_norms(&self, _law_id: u32) -> Result<Vec<NormSummary>, FetchError> {
        Ok(self.norms.clone())
    }

    async fn norm_content(&self, _norm_id: u32) -> Result<NormContent, FetchError> {
        self.content.clone().ok_or(FetchError::Api {
            status: 404,
            message: "Norm not found".to_string(),
        })
    }
}

/// Creates a test App backed by an empty StubFetcher.
pub fn test_app() -> App {
    App::new(Arc::new(StubFetcher::default()))
}

pub fn law(id: u32, name: &str) -> Law {
    Law {
        id,
        name: name.to_string(),
        description: None,
    }
}

pub fn norm_summary(id: u32, number: &str, title: &str) -> NormSummary {
    NormSummary {
        id,
        number: number.to_string(),
        title: title.to_string(),
    }
}

pub fn norm_content(number: &str, title: &str, content: &str) -> NormContent {
    NormContent {
        number: number.to_string(),
        title: title.to_string(),
        content: content.to_string(),
    }
}
