use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::models::Reservation;

use super::ClientError;

/// Payload for the create-reservation endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ReservationRequest {
    pub name: String,
    pub hp: String,
    pub date: String,
    pub time: String,
    pub outlet: String,
    pub seats: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ReservedResponse {
    #[serde(default)]
    reserved: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ReserveResponse {
    #[allow(dead_code)]
    ok: bool,
    reservation: Reservation,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// HTTP client for the reservation API.
#[derive(Debug, Clone)]
pub struct ReservationApi {
    base_url: String,
    http_client: reqwest::Client,
}

impl ReservationApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// GET /api/reserved — seats already booked for the (date, outlet) pair.
    /// Any transport, status, or decode failure collapses into the generic
    /// load error; the caller keeps its previous state.
    pub async fn reserved_seats(&self, date: &str, outlet: &str) -> Result<Vec<String>, ClientError> {
        let response = self
            .http_client
            .get(format!("{}/api/reserved", self.base_url))
            .query(&[("date", date), ("outlet", outlet)])
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(ClientError::LoadFailed)?;

        let body: ReservedResponse = response.json().await.map_err(ClientError::LoadFailed)?;
        Ok(body.reserved)
    }

    /// POST /api/reserve. A non-success status with a decodable error body is
    /// a rejection carrying the server's text verbatim; anything else is a
    /// transport failure.
    pub async fn reserve(&self, request: &ReservationRequest) -> Result<Reservation, ClientError> {
        let response = self
            .http_client
            .post(format!("{}/api/reserve", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(ClientError::SubmitFailed)?;

        if !response.status().is_success() {
            let body: ErrorBody = response.json().await.map_err(ClientError::SubmitFailed)?;
            return Err(ClientError::Rejected(
                body.error.unwrap_or_else(|| "Unknown".to_string()),
            ));
        }

        let body: ReserveResponse = response.json().await.map_err(ClientError::SubmitFailed)?;
        Ok(body.reservation)
    }
}
