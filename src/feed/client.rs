use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::error::feed::FeedError;
use crate::feed::model::{FeedSnapshot, NearbyFeedRequest, TokenResponse};

/// Refresh the cached bearer token this long before it expires.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct FeedClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub api_secret: String,
    /// Pre-issued bearer token; when set, the OAuth token endpoint is never
    /// called. Useful for tests and constrained environments.
    pub bearer_token: Option<String>,
    pub timeout: Duration,
}

#[derive(Debug)]
struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

/// HTTP client for the upstream fuel price feed.
///
/// Authenticates with an API key header plus an OAuth client-credentials
/// bearer token. The token is cached for its lifetime minus a safety margin
/// and refreshed lazily; the cache mutex also serializes refreshes so a burst
/// of requests fetches at most one new token.
#[derive(Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    api_secret: String,
    static_token: Option<String>,
    token: Arc<Mutex<Option<CachedToken>>>,
}

impl FeedClient {
    pub fn new(config: FeedClientConfig) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            api_secret: config.api_secret,
            static_token: config.bearer_token,
            token: Arc::new(Mutex::new(None)),
        })
    }

    /// Fetches the complete station roster and current prices.
    pub async fn fetch_all_prices(&self) -> Result<FeedSnapshot, FeedError> {
        let url = format!("{}/prices", self.base_url);
        let token = self.bearer_token().await?;

        let response = self
            .http
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(token)
            .send()
            .await?;
        Self::decode_snapshot(response).await
    }

    /// Fetches current prices around a point via the upstream radius endpoint.
    pub async fn fetch_nearby_prices(
        &self,
        request: &NearbyFeedRequest,
    ) -> Result<FeedSnapshot, FeedError> {
        let url = format!("{}/prices/nearby", self.base_url);
        let token = self.bearer_token().await?;

        let response = self
            .http
            .post(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(token)
            .json(request)
            .send()
            .await?;
        Self::decode_snapshot(response).await
    }

    async fn decode_snapshot(response: reqwest::Response) -> Result<FeedSnapshot, FeedError> {
        let status = response.status();
        let url = response.url().to_string();
        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|err| FeedError::MalformedPayload(format!("{url}: {err}")))
    }

    async fn bearer_token(&self) -> Result<String, FeedError> {
        if let Some(token) = &self.static_token {
            return Ok(token.clone());
        }

        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.expires_at {
                return Ok(token.access_token.clone());
            }
        }

        let response = self
            .http
            .post(format!(
                "{}/oauth/token?grant_type=client_credentials",
                self.base_url
            ))
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Token(format!(
                "token endpoint returned HTTP {status}"
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|err| FeedError::Token(format!("malformed token response: {err}")))?;
        let lifetime = Duration::from_secs(token.expires_in)
            .saturating_sub(TOKEN_EXPIRY_MARGIN);
        let access_token = token.access_token.clone();
        *cached = Some(CachedToken {
            access_token: token.access_token,
            expires_at: Instant::now() + lifetime,
        });

        Ok(access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fuelwatch_test_utils::fixture;

    fn client(server: &mockito::ServerGuard, bearer: Option<&str>) -> FeedClient {
        FeedClient::new(FeedClientConfig {
            base_url: server.url(),
            api_key: "test-key".into(),
            api_secret: "test-secret".into(),
            bearer_token: bearer.map(String::from),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    mod fetch_all_prices {
        use super::*;

        #[tokio::test]
        async fn decodes_a_snapshot() {
            let mut server = mockito::Server::new_async().await;
            let body = fixture::feed_snapshot_json(
                &[fixture::feed_station_json("1234", "Shell", -33.92, 151.23)],
                &[fixture::feed_price_json("1234", "E10", 179.9)],
            );
            let prices_mock = fixture::mock_all_prices_endpoint(&mut server, &body, 1).await;

            let snapshot = client(&server, Some("static-token"))
                .fetch_all_prices()
                .await
                .unwrap();

            prices_mock.assert_async().await;
            assert_eq!(snapshot.stations.len(), 1);
            assert_eq!(snapshot.prices.len(), 1);
        }

        #[tokio::test]
        async fn nearby_request_posts_parameters() {
            let mut server = mockito::Server::new_async().await;
            let body = fixture::feed_snapshot_json(
                &[fixture::feed_station_json("1234", "Shell", -33.92, 151.23)],
                &[fixture::feed_price_json("1234", "E10", 179.9)],
            );
            let _mock = server
                .mock("POST", "/prices/nearby")
                .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                    "latitude": -33.92,
                    "radiusKm": 10.0,
                })))
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(body.to_string())
                .create_async()
                .await;

            let snapshot = client(&server, Some("static-token"))
                .fetch_nearby_prices(&crate::feed::NearbyFeedRequest {
                    latitude: -33.92,
                    longitude: 151.23,
                    radius_km: 10.0,
                    fuel_type: None,
                })
                .await
                .unwrap();

            assert_eq!(snapshot.prices.len(), 1);
        }

        #[tokio::test]
        async fn upstream_error_status_is_reported() {
            let mut server = mockito::Server::new_async().await;
            let _mock = server
                .mock("GET", "/prices")
                .with_status(503)
                .create_async()
                .await;

            let err = client(&server, Some("static-token"))
                .fetch_all_prices()
                .await
                .unwrap_err();
            assert!(matches!(err, FeedError::Status { status: 503, .. }));
        }

        #[tokio::test]
        async fn malformed_payload_is_reported() {
            let mut server = mockito::Server::new_async().await;
            let _mock = server
                .mock("GET", "/prices")
                .with_status(200)
                .with_body("not json")
                .create_async()
                .await;

            let err = client(&server, Some("static-token"))
                .fetch_all_prices()
                .await
                .unwrap_err();
            assert!(matches!(err, FeedError::MalformedPayload(_)));
        }
    }

    mod bearer_token {
        use super::*;

        #[tokio::test]
        async fn token_is_fetched_once_and_reused() {
            let mut server = mockito::Server::new_async().await;
            let token_mock = fixture::mock_token_endpoint(&mut server, 1).await;
            let body = fixture::feed_snapshot_json(&[], &[]);
            let _prices_mock = fixture::mock_all_prices_endpoint(&mut server, &body, 2).await;

            let client = client(&server, None);
            client.fetch_all_prices().await.unwrap();
            client.fetch_all_prices().await.unwrap();

            token_mock.assert_async().await;
        }

        #[tokio::test]
        async fn token_endpoint_failure_is_reported() {
            let mut server = mockito::Server::new_async().await;
            let _mock = server
                .mock("POST", "/oauth/token")
                .match_query(mockito::Matcher::Any)
                .with_status(401)
                .create_async()
                .await;

            let err = client(&server, None).fetch_all_prices().await.unwrap_err();
            assert!(matches!(err, FeedError::Token(_)));
        }
    }
}
