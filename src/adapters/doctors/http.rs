//! HTTP client for the doctors API
//!
//! Two endpoints are used, both authenticated with HTTP Basic:
//! - `GET {base_url}/api/doctors`
//! - `GET {base_url}/api/doctors/{id}/slots`

use super::records::{decode_doctor, decode_payload, decode_slot, DoctorRecord, SlotRecord};
use super::source::DoctorsSource;
use super::stream::RecordStream;
use crate::config::DoctorsApiConfig;
use crate::domain::{FetchError, Result, SyncError};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::{Client, ClientBuilder};
use secrecy::ExposeSecret;
use serde_json::Value;
use std::time::Duration;

/// Doctors API client over reqwest
pub struct HttpDoctorsSource {
    base_url: String,
    client: Client,
    auth_header: String,
}

impl HttpDoctorsSource {
    /// Create a new client from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: &DoctorsApiConfig) -> Result<Self> {
        let mut client_builder = ClientBuilder::new();

        if let Some(timeout) = config.timeout_seconds {
            client_builder = client_builder.timeout(Duration::from_secs(timeout));
        }

        if !config.tls_verify {
            tracing::warn!("TLS certificate verification is disabled for the doctors API");
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        let client = client_builder
            .build()
            .map_err(|e| SyncError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        let credentials = format!(
            "{}:{}",
            config.username,
            config.password.expose_secret().as_str()
        );
        let encoded = general_purpose::STANDARD.encode(credentials.as_bytes());

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            auth_header: format!("Basic {encoded}"),
        })
    }

    /// GET a URL and return the raw body
    async fn fetch_body(&self, url: &str) -> std::result::Result<String, FetchError> {
        tracing::debug!(url = %url, "Fetching from doctors API");

        let response = self
            .client
            .get(url)
            .header("Authorization", &self.auth_header)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(url = %url, error = %e, "Error fetching data from API");
                FetchError::ConnectionFailed(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                url = %url,
                status = status.as_u16(),
                body = %body,
                "Doctors API returned an error status"
            );
            return Err(FetchError::RequestFailed {
                status: status.as_u16(),
                message: body,
            });
        }

        response.text().await.map_err(|e| {
            tracing::error!(url = %url, error = %e, "Error reading response body");
            FetchError::Interrupted(e.to_string())
        })
    }

    /// Decode a body into its top-level record array, logging the raw body on failure
    fn decode_body(
        &self,
        url: &str,
        body: &str,
        doctor_id: Option<i64>,
    ) -> std::result::Result<Vec<Value>, FetchError> {
        decode_payload(body).map_err(|e| {
            match doctor_id {
                Some(doctor_id) => tracing::error!(
                    url = %url,
                    json = %body,
                    error = %e,
                    doctor_id,
                    "Error decoding API response"
                ),
                None => {
                    tracing::error!(url = %url, json = %body, error = %e, "Error decoding API response")
                }
            }
            e
        })
    }
}

#[async_trait]
impl DoctorsSource for HttpDoctorsSource {
    async fn fetch_doctors(&self) -> std::result::Result<RecordStream<DoctorRecord>, FetchError> {
        let url = format!("{}/api/doctors", self.base_url);
        let body = self.fetch_body(&url).await?;
        let records = self.decode_body(&url, &body, None)?;

        tracing::info!(count = records.len(), "Fetched doctor list");
        Ok(RecordStream::from_payload(records, decode_doctor))
    }

    async fn fetch_doctor_slots(
        &self,
        doctor_id: i64,
    ) -> std::result::Result<RecordStream<SlotRecord>, FetchError> {
        let url = format!("{}/api/doctors/{}/slots", self.base_url, doctor_id);
        let body = self.fetch_body(&url).await?;
        let records = self.decode_body(&url, &body, Some(doctor_id))?;

        tracing::debug!(doctor_id, count = records.len(), "Fetched doctor slots");
        Ok(RecordStream::from_payload(records, decode_slot).for_doctor(doctor_id))
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn config_for(url: &str) -> DoctorsApiConfig {
        DoctorsApiConfig {
            base_url: url.to_string(),
            username: "user".to_string(),
            password: secret_string("pass".to_string()),
            timeout_seconds: Some(5),
            tls_verify: true,
        }
    }

    #[tokio::test]
    async fn test_fetch_doctors_sends_basic_auth() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/doctors")
            .match_header("authorization", "Basic dXNlcjpwYXNz")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id":1,"name":"John Doe"},{"id":2,"name":"Jane Smith"}]"#)
            .create_async()
            .await;

        let source = HttpDoctorsSource::new(&config_for(&server.url())).unwrap();
        let doctors: Vec<DoctorRecord> = source
            .fetch_doctors()
            .await
            .unwrap()
            .map(|r| r.unwrap())
            .collect();

        mock.assert_async().await;
        assert_eq!(doctors.len(), 2);
        assert_eq!(doctors[0].id, 1);
        assert_eq!(doctors[1].name, "Jane Smith");
    }

    #[tokio::test]
    async fn test_fetch_doctors_skips_malformed() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/doctors")
            .with_status(200)
            .with_body(r#"[{"id":1},{"id":2,"name":"Jane Smith"}]"#)
            .create_async()
            .await;

        let source = HttpDoctorsSource::new(&config_for(&server.url())).unwrap();
        let doctors: Vec<DoctorRecord> = source
            .fetch_doctors()
            .await
            .unwrap()
            .map(|r| r.unwrap())
            .collect();

        assert_eq!(doctors.len(), 1);
        assert_eq!(doctors[0].id, 2);
    }

    #[tokio::test]
    async fn test_fetch_doctors_invalid_json() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/doctors")
            .with_status(200)
            .with_body("{invalid json}")
            .create_async()
            .await;

        let source = HttpDoctorsSource::new(&config_for(&server.url())).unwrap();
        let err = source.fetch_doctors().await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidPayload(_)));
    }

    #[tokio::test]
    async fn test_fetch_doctors_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/doctors")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let source = HttpDoctorsSource::new(&config_for(&server.url())).unwrap();
        let err = source.fetch_doctors().await.unwrap_err();
        assert!(matches!(err, FetchError::RequestFailed { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_fetch_doctor_slots() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/doctors/1/slots")
            .with_status(200)
            .with_body(
                r#"[
                    {"start":"2023-07-01T10:00:00+00:00","end":"2023-07-01T11:00:00+00:00"},
                    {"start":"invalid-date","end":"2023-07-03T11:00:00+00:00"},
                    {"start":"2023-07-02T10:00:00+00:00"}
                ]"#,
            )
            .create_async()
            .await;

        let source = HttpDoctorsSource::new(&config_for(&server.url())).unwrap();
        let slots: Vec<SlotRecord> = source
            .fetch_doctor_slots(1)
            .await
            .unwrap()
            .map(|r| r.unwrap())
            .collect();

        mock.assert_async().await;
        assert_eq!(slots.len(), 1);
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/doctors")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let source = HttpDoctorsSource::new(&config_for(&format!("{}/", server.url()))).unwrap();
        assert_eq!(source.fetch_doctors().await.unwrap().count(), 0);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let source = HttpDoctorsSource::new(&config_for("http://127.0.0.1:1")).unwrap();
        let err = source.fetch_doctors().await.unwrap_err();
        assert!(matches!(err, FetchError::ConnectionFailed(_)));
    }
}
