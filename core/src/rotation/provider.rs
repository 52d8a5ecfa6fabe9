//! Remote rotation provider.
//!
//! The statistics provider is a collaborator at the system boundary: this
//! module keeps the wire details behind a narrow trait so the fetcher (and
//! its tests) never depend on the network.

use serde::Deserialize;

use super::error::FetchError;
use super::interval::RotationRow;
use crate::context::FetchSettings;
use crate::lineup::Side;

const STATS_BASE_URL: &str = "https://stats.nba.com/stats";
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36";

/// Source of rotation rows for a single game.
pub trait RotationProvider: Send + Sync + 'static {
    fn fetch_game(
        &self,
        game_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<RotationRow>, FetchError>> + Send;
}

/// Tabular response envelope used by the provider.
#[derive(Debug, Deserialize)]
struct RotationResponse {
    #[serde(rename = "resultSets")]
    result_sets: Vec<ResultSet>,
}

#[derive(Debug, Deserialize)]
struct ResultSet {
    name: String,
    headers: Vec<String>,
    #[serde(rename = "rowSet")]
    row_set: Vec<Vec<serde_json::Value>>,
}

/// HTTP implementation against the public stats endpoint.
pub struct HttpRotationProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRotationProvider {
    pub fn new(settings: &FetchSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(FetchError::ClientBuild)?;
        Ok(Self {
            client,
            base_url: STATS_BASE_URL.to_string(),
        })
    }

    fn convert(game_id: &str, response: RotationResponse) -> Result<Vec<RotationRow>, FetchError> {
        let mut rows = Vec::new();
        for set in response.result_sets {
            let side = if set.name.contains("Home") {
                Side::Home
            } else if set.name.contains("Away") {
                Side::Away
            } else {
                continue;
            };
            let col = |name: &str| -> Result<usize, FetchError> {
                set.headers
                    .iter()
                    .position(|h| h == name)
                    .ok_or_else(|| FetchError::MalformedResponse {
                        game_id: game_id.to_string(),
                        column: name.to_string(),
                    })
            };
            let person = col("PERSON_ID")?;
            let time_in = col("IN_TIME_REAL")?;
            let time_out = col("OUT_TIME_REAL")?;
            for record in &set.row_set {
                let (Some(player_id), Some(in_time_real), Some(out_time_real)) = (
                    record.get(person).and_then(|v| v.as_i64()),
                    record.get(time_in).and_then(|v| v.as_f64()),
                    record.get(time_out).and_then(|v| v.as_f64()),
                ) else {
                    tracing::debug!(game = game_id, "dropping rotation record with missing fields");
                    continue;
                };
                rows.push(RotationRow {
                    game_id: game_id.to_string(),
                    side,
                    player_id,
                    in_time_real,
                    out_time_real,
                });
            }
        }
        Ok(rows)
    }
}

impl RotationProvider for HttpRotationProvider {
    async fn fetch_game(&self, game_id: &str) -> Result<Vec<RotationRow>, FetchError> {
        let url = format!(
            "{}/gamerotation?GameID={}&LeagueID=00",
            self.base_url, game_id
        );
        let response = self
            .client
            .get(&url)
            .header("Referer", "https://stats.nba.com/")
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| FetchError::Request {
                game_id: game_id.to_string(),
                source: e,
            })?;
        let body: RotationResponse =
            response.json().await.map_err(|e| FetchError::Request {
                game_id: game_id.to_string(),
                source: e,
            })?;
        Self::convert(game_id, body)
    }
}
