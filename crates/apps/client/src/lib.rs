//! Async edge of the nearby-facility map: dataset fetching, the analysis
//! request and the wiring of both into the deterministic pipeline.
//!
//! Everything observable lives in the pipeline crates; this one only moves
//! bytes and maps transport failures onto the protocol error taxonomy.

use std::future::Future;
use std::time::Instant;

use futures_util::future::try_join_all;
use tracing::{info, warn};

use facilities::category::FacilityCategory;
use facilities::dataset::{DatasetError, FacilityDataset};
use foundation::geo::GeoPoint;
use foundation::time::Time;
use overlay::state::MapState;
use pipeline::cycle::{CompletionOutcome, Orchestrator};
use pipeline::panel::StatusPanel;
use protocol::analyze::{AnalyzeRequest, AnalyzeResponse};
use protocol::error::AnalyzeError;

pub const DEFAULT_BACKEND_URL: &str = "https://yorkstudy-whatsnearby.onrender.com";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the analysis backend; `/analyze` is appended.
    pub backend_url: String,
    /// Base URL the static facility datasets are served from.
    pub data_url: String,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let backend_url = std::env::var("NEARBY_BACKEND_URL")
            .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());
        let data_url = std::env::var("NEARBY_DATA_URL")
            .unwrap_or_else(|_| format!("{}/data", backend_url.trim_end_matches('/')));
        Self {
            backend_url,
            data_url,
        }
    }
}

/// Monotonic seconds since client start, feeding the pipeline's logical time.
pub struct Clock {
    started: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn now(&self) -> Time {
        Time(self.started.elapsed().as_secs_f64())
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

/// Why the facility layer could not be (re)loaded.
#[derive(Debug)]
pub enum FacilityLoadError {
    Fetch {
        category: FacilityCategory,
        reason: String,
    },
    Status {
        category: FacilityCategory,
        status: u16,
    },
    Parse {
        category: FacilityCategory,
        source: DatasetError,
    },
}

impl std::fmt::Display for FacilityLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FacilityLoadError::Fetch { category, reason } => {
                write!(f, "failed to fetch {category} dataset: {reason}")
            }
            FacilityLoadError::Status { category, status } => {
                write!(f, "{category} dataset request returned status {status}")
            }
            FacilityLoadError::Parse { category, source } => {
                write!(f, "failed to parse {category} dataset: {source}")
            }
        }
    }
}

impl std::error::Error for FacilityLoadError {}

/// Fetches one dataset per category concurrently and joins the results.
///
/// The whole load fails if any single fetch fails; no partial facility layer
/// is ever produced. Successful results come back in category render order
/// regardless of completion order.
pub async fn fetch_all_datasets<F, Fut>(
    mut fetch_one: F,
) -> Result<Vec<FacilityDataset>, FacilityLoadError>
where
    F: FnMut(FacilityCategory) -> Fut,
    Fut: Future<Output = Result<FacilityDataset, FacilityLoadError>>,
{
    try_join_all(FacilityCategory::ALL.map(&mut fetch_one)).await
}

pub struct NearbyClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl NearbyClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// POSTs the clicked coordinate to the analysis backend.
    ///
    /// Non-success statuses map to `Backend` without reading the body;
    /// transport errors to `Network`; contract mismatches to `Parse`.
    pub async fn analyze(&self, origin: GeoPoint) -> Result<AnalyzeResponse, AnalyzeError> {
        let url = format!("{}/analyze", self.config.backend_url.trim_end_matches('/'));
        let response = self
            .http
            .post(&url)
            .json(&AnalyzeRequest::new(origin))
            .send()
            .await
            .map_err(|e| AnalyzeError::Network {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalyzeError::Backend {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| AnalyzeError::Network {
            reason: e.to_string(),
        })?;
        AnalyzeResponse::from_json_str(&body).map_err(|e| AnalyzeError::Parse {
            reason: e.to_string(),
        })
    }

    /// Loads every facility dataset from static storage, all-or-nothing.
    pub async fn fetch_facility_datasets(
        &self,
    ) -> Result<Vec<FacilityDataset>, FacilityLoadError> {
        fetch_all_datasets(|category| self.fetch_dataset(category)).await
    }

    async fn fetch_dataset(
        &self,
        category: FacilityCategory,
    ) -> Result<FacilityDataset, FacilityLoadError> {
        let url = format!(
            "{}/{}",
            self.config.data_url.trim_end_matches('/'),
            category.dataset_file()
        );
        let response =
            self.http
                .get(&url)
                .send()
                .await
                .map_err(|e| FacilityLoadError::Fetch {
                    category,
                    reason: e.to_string(),
                })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FacilityLoadError::Status {
                category,
                status: status.as_u16(),
            });
        }

        let payload = response.text().await.map_err(|e| FacilityLoadError::Fetch {
            category,
            reason: e.to_string(),
        })?;
        FacilityDataset::from_geojson_str(category, payload.as_str())
            .map_err(|source| FacilityLoadError::Parse { category, source })
    }
}

/// Runs one full click cycle against the live backend.
///
/// Within the cycle: clear → request → render → facility-reload, in that
/// order. A facility reload failure degrades to an empty layer (logged);
/// the analysis result still renders, and the next successful cycle restores
/// the background markers.
pub async fn run_click_cycle(
    client: &NearbyClient,
    orchestrator: &mut Orchestrator,
    state: &mut MapState,
    panel: &mut StatusPanel,
    clock: &Clock,
    origin: GeoPoint,
) -> CompletionOutcome {
    let token = orchestrator.begin(origin, state, panel);
    info!("analysis requested for {origin}");
    orchestrator.note_request_sent(token, panel);

    let result = client.analyze(origin).await;
    if result.is_ok() {
        orchestrator.note_response_received(token, panel);
    }

    let facilities = match &result {
        Ok(_) => match client.fetch_facility_datasets().await {
            Ok(datasets) => datasets,
            Err(err) => {
                warn!("facility layer reload failed: {err}");
                Vec::new()
            }
        },
        Err(err) => {
            warn!("analysis failed: {err}");
            Vec::new()
        }
    };

    orchestrator.complete(token, result, &facilities, state, panel, clock.now())
}

/// Parses a simulated map click, `"lat lng"` or `"lat,lng"`.
pub fn parse_click(input: &str) -> Option<GeoPoint> {
    let mut parts = input.split(|c: char| c == ',' || c.is_whitespace());
    let lat = parts.find(|s| !s.is_empty())?.parse::<f64>().ok()?;
    let lng = parts.find(|s| !s.is_empty())?.parse::<f64>().ok()?;
    if parts.any(|s| !s.is_empty()) {
        return None;
    }
    let point = GeoPoint::new(lat, lng);
    point.is_valid().then_some(point)
}

#[cfg(test)]
mod tests {
    use super::{fetch_all_datasets, parse_click, FacilityLoadError};
    use facilities::category::FacilityCategory;
    use facilities::dataset::FacilityDataset;
    use foundation::geo::GeoPoint;

    fn empty_dataset(category: FacilityCategory) -> FacilityDataset {
        FacilityDataset::from_geojson_str(
            category,
            r#"{"type": "FeatureCollection", "features": []}"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn fetch_all_returns_datasets_in_category_order() {
        let datasets = fetch_all_datasets(|category| async move { Ok(empty_dataset(category)) })
            .await
            .expect("all fetches succeed");

        let categories: Vec<_> = datasets.iter().map(|d| d.category).collect();
        assert_eq!(categories, FacilityCategory::ALL.to_vec());
    }

    #[tokio::test]
    async fn one_failed_fetch_fails_the_whole_load() {
        let result = fetch_all_datasets(|category| async move {
            if category == FacilityCategory::Hospital {
                Err(FacilityLoadError::Status {
                    category,
                    status: 404,
                })
            } else {
                Ok(empty_dataset(category))
            }
        })
        .await;

        match result {
            Err(FacilityLoadError::Status { category, status }) => {
                assert_eq!(category, FacilityCategory::Hospital);
                assert_eq!(status, 404);
            }
            other => panic!("expected whole load to fail, got {other:?}"),
        }
    }

    #[test]
    fn parse_click_accepts_space_and_comma() {
        assert_eq!(parse_click("53.96 -1.08"), Some(GeoPoint::new(53.96, -1.08)));
        assert_eq!(
            parse_click("53.96, -1.08"),
            Some(GeoPoint::new(53.96, -1.08))
        );
        assert_eq!(parse_click("not a click"), None);
        assert_eq!(parse_click("53.96"), None);
        assert_eq!(parse_click("53.96 -1.08 7"), None);
        // Out-of-range latitudes are not valid clicks.
        assert_eq!(parse_click("95.0 0.0"), None);
    }
}
