//! Collaborator access: the simulation engine and the prediction service.

use gv_core::{PredictRequest, PredictionResponse, ScenarioConfig, ScenarioOptions, SimulationResult};
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::config::DashboardConfig;
use crate::error::{AppError, AppResult};

/// The three request/response operations the dashboard depends on.
///
/// Calls block; the workflow controllers run them off the UI thread.
pub trait Collaborator: Send + Sync {
    fn scenario_options(&self) -> AppResult<ScenarioOptions>;
    fn run_simulation(&self, scenario: &ScenarioConfig) -> AppResult<SimulationResult>;
    fn run_prediction(&self, request: &PredictRequest) -> AppResult<PredictionResponse>;
}

/// JSON-over-HTTP collaborator.
#[derive(Debug, Clone)]
pub struct HttpCollaborator {
    http: Client,
    config: DashboardConfig,
}

impl HttpCollaborator {
    pub fn new(config: DashboardConfig) -> AppResult<Self> {
        config.validate()?;
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| AppError::Config(format!("HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    fn execute<T: DeserializeOwned>(&self, url: &str, request: RequestBuilder) -> AppResult<T> {
        tracing::debug!(%url, "collaborator request");
        let connectivity = |e: reqwest::Error| AppError::Connectivity {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = request.send().map_err(connectivity)?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::RequestFailure {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().map_err(connectivity)?;
        serde_json::from_slice(&body).map_err(|e| AppError::MalformedPayload {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

impl Collaborator for HttpCollaborator {
    fn scenario_options(&self) -> AppResult<ScenarioOptions> {
        let url = self.config.options_url();
        self.execute(&url, self.http.get(&url))
    }

    fn run_simulation(&self, scenario: &ScenarioConfig) -> AppResult<SimulationResult> {
        let url = self.config.simulate_url();
        self.execute(&url, self.http.post(&url).json(scenario))
    }

    fn run_prediction(&self, request: &PredictRequest) -> AppResult<PredictionResponse> {
        let url = self.config.predict_url();
        self.execute(&url, self.http.post(&url).json(request))
    }
}
