//! Catalog resolution: where the plan list comes from.

use std::path::{Path, PathBuf};

use planscout_core::config::CatalogConfig;
use planscout_core::Plan;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog fetch failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("catalog body is not a plan list: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where the catalog comes from: an upstream HTTP endpoint when `PLANS_URL`
/// is set, a local JSON file otherwise. Either way the body is a JSON array
/// of plans.
pub enum PlanSource {
    Http { url: String, client: reqwest::Client },
    File { path: PathBuf },
}

impl PlanSource {
    pub fn from_config(config: &CatalogConfig) -> Self {
        match &config.plans_url {
            Some(url) => PlanSource::Http {
                url: url.clone(),
                client: reqwest::Client::new(),
            },
            None => PlanSource::File {
                path: config.plans_file.clone(),
            },
        }
    }

    pub fn file(path: impl AsRef<Path>) -> Self {
        PlanSource::File {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub async fn load(&self) -> Result<Vec<Plan>, SourceError> {
        match self {
            PlanSource::Http { url, client } => {
                info!("Fetching catalog from {}", url);
                let response = client.get(url).send().await?.error_for_status()?;
                Ok(response.json::<Vec<Plan>>().await?)
            }
            PlanSource::File { path } => {
                let body = tokio::fs::read_to_string(path).await.map_err(|e| {
                    SourceError::Io {
                        path: path.display().to_string(),
                        source: e,
                    }
                })?;
                Ok(serde_json::from_str(&body)?)
            }
        }
    }

    /// Load, degrading to an empty catalog on failure. The server stays up
    /// with nothing to show rather than refusing to start.
    pub async fn load_or_empty(&self) -> Vec<Plan> {
        match self.load().await {
            Ok(plans) => {
                info!("Catalog loaded: {} plans", plans.len());
                plans
            }
            Err(e) => {
                warn!("Catalog unavailable ({}), continuing with an empty catalog", e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_catalog(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn loads_a_plan_list_from_disk() {
        let file = write_catalog(
            r#"[
                {"id": 1, "provider": "Aegis", "type": "Health", "price": 120,
                 "coverage": "Hospital", "region": "Europe", "rating": 4.5,
                 "term": "1 year", "benefits": ["Dental"]},
                {"id": 2, "provider": "Budget", "type": "Auto", "price": 45,
                 "coverage": "Liability", "region": "Asia", "rating": 3.2,
                 "term": "6 months"}
            ]"#,
        );

        let plans = PlanSource::file(file.path()).load().await.unwrap();
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].plan_type, "Health");
        assert!(plans[1].benefits.is_empty());
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let err = PlanSource::file("definitely/not/here.json").load().await.unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }

    #[tokio::test]
    async fn malformed_body_is_a_parse_error() {
        let file = write_catalog(r#"{"not": "a list"}"#);
        let err = PlanSource::file(file.path()).load().await.unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
    }

    #[tokio::test]
    async fn load_or_empty_degrades_to_empty() {
        let plans = PlanSource::file("definitely/not/here.json").load_or_empty().await;
        assert!(plans.is_empty());
    }
}
