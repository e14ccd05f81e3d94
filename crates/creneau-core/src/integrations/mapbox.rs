//! Mapbox Search Box and Directions clients.
//!
//! Implements the provider seams over the Mapbox HTTP APIs: Search
//! Box `suggest`/`retrieve` for addresses and Directions v5 for
//! driving times. Methods block; they drive the async HTTP client on
//! the current tokio runtime.

use crate::error::{GeocodeError, TravelError};
use crate::location::{Location, DEFAULT_OFFICE_LAT, DEFAULT_OFFICE_LON};
use crate::travel::{TimeConstraint, TravelEstimate};

use super::traits::{AddressSuggestion, GeocodingProvider, RoutingProvider};

/// Environment variable holding the Mapbox access token.
pub const TOKEN_ENV: &str = "MAPBOX_TOKEN";

const DEFAULT_BASE_URL: &str = "https://api.mapbox.com";

/// Blocking Mapbox API client.
pub struct MapboxClient {
    token: String,
    base_url: String,
    /// Search Box billing session token, one per client.
    session_token: String,
}

impl MapboxClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    /// Client pointed at a custom endpoint (tests).
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: base_url.into(),
            session_token: uuid::Uuid::new_v4().to_string(),
        }
    }

    /// Build a client from the `MAPBOX_TOKEN` environment variable.
    pub fn from_env() -> Result<Self, GeocodeError> {
        let token =
            std::env::var(TOKEN_ENV).map_err(|_| GeocodeError::MissingToken(TOKEN_ENV.into()))?;
        Ok(Self::new(token))
    }

    fn get_json(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<serde_json::Value, reqwest::Error> {
        let url = url.to_string();
        let params: Vec<(String, String)> = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        tokio::runtime::Handle::current().block_on(async move {
            reqwest::Client::new()
                .get(&url)
                .query(&params)
                .send()
                .await?
                .error_for_status()?
                .json()
                .await
        })
    }
}

impl GeocodingProvider for MapboxClient {
    fn suggest(&self, query: &str, limit: usize) -> Result<Vec<AddressSuggestion>, GeocodeError> {
        let url = format!("{}/search/searchbox/v1/suggest", self.base_url);
        let data = self.get_json(
            &url,
            &[
                ("q", query.to_string()),
                ("language", "fr".to_string()),
                ("limit", limit.to_string()),
                (
                    "proximity",
                    format!("{DEFAULT_OFFICE_LON}, {DEFAULT_OFFICE_LAT}"),
                ),
                ("country", "FR".to_string()),
                ("access_token", self.token.clone()),
                ("session_token", self.session_token.clone()),
            ],
        )?;

        let suggestions = data["suggestions"]
            .as_array()
            .ok_or_else(|| GeocodeError::MalformedResponse("missing 'suggestions'".into()))?;

        Ok(suggestions
            .iter()
            .filter_map(|s| {
                Some(AddressSuggestion {
                    name: s["name"].as_str()?.to_string(),
                    full_address: s["full_address"]
                        .as_str()
                        .or_else(|| s["place_formatted"].as_str())
                        .map(str::to_string),
                    place_id: s["mapbox_id"].as_str()?.to_string(),
                })
            })
            .collect())
    }

    fn resolve(&self, place_id: &str) -> Result<(f64, f64), GeocodeError> {
        let url = format!("{}/search/searchbox/v1/retrieve/{place_id}", self.base_url);
        let data = self.get_json(
            &url,
            &[
                ("session_token", self.session_token.clone()),
                ("access_token", self.token.clone()),
            ],
        )?;

        let coords = data["features"][0]["geometry"]["coordinates"]
            .as_array()
            .ok_or_else(|| GeocodeError::MalformedResponse("missing coordinates".into()))?;
        match (coords.first().and_then(|v| v.as_f64()), coords.get(1).and_then(|v| v.as_f64())) {
            (Some(lon), Some(lat)) => Ok((lon, lat)),
            _ => Err(GeocodeError::MalformedResponse(
                "coordinates are not a [lon, lat] pair".into(),
            )),
        }
    }
}

impl RoutingProvider for MapboxClient {
    fn estimate_travel(
        &self,
        from: &Location,
        to: &Location,
        when: TimeConstraint,
    ) -> Result<TravelEstimate, TravelError> {
        let url = format!(
            "{}/directions/v5/mapbox/driving/{},{};{},{}",
            self.base_url, from.lon, from.lat, to.lon, to.lat
        );

        let mut params = vec![
            ("overview", "false".to_string()),
            ("access_token", self.token.clone()),
        ];
        match when {
            TimeConstraint::DepartAt(_) => params.push(("depart_at", when.depart_str())),
            TimeConstraint::ArriveBy(_) => params.push(("arrive_by", when.arrive_str())),
        }

        let data = self.get_json(&url, &params)?;

        let route = &data["routes"][0];
        match (route["duration"].as_f64(), route["distance"].as_f64()) {
            (Some(duration_secs), Some(distance_meters)) => Ok(TravelEstimate {
                duration_secs,
                distance_meters,
            }),
            _ => Err(TravelError::MalformedResponse(format!(
                "no usable route between {} and {}",
                from.name, to.name
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn run_blocking<T: Send + 'static>(
        job: impl FnOnce() -> T + Send + 'static,
    ) -> impl std::future::Future<Output = T> {
        async move {
            tokio::task::spawn_blocking(job)
                .await
                .expect("blocking task panicked")
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn suggest_maps_wire_fields() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/search/searchbox/v1/suggest")
            .match_query(mockito::Matcher::UrlEncoded("q".into(), "bayeux".into()))
            .with_body(
                r#"{"suggestions": [
                    {"name": "Bayeux", "full_address": "Bayeux, Calvados", "mapbox_id": "id-1"},
                    {"name": "Bayeux Museum", "place_formatted": "Bayeux", "mapbox_id": "id-2"}
                ]}"#,
            )
            .create_async()
            .await;

        let client = MapboxClient::with_base_url("test-token", server.url());
        let results = run_blocking(move || client.suggest("bayeux", 2)).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].place_id, "id-1");
        assert_eq!(results[0].full_address.as_deref(), Some("Bayeux, Calvados"));
        // place_formatted backfills a missing full_address
        assert_eq!(results[1].full_address.as_deref(), Some("Bayeux"));
        mock.assert_async().await;
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn resolve_extracts_coordinates() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search/searchbox/v1/retrieve/id-1")
            .match_query(mockito::Matcher::Any)
            .with_body(r#"{"features": [{"geometry": {"coordinates": [-0.7024, 49.2764]}}]}"#)
            .create_async()
            .await;

        let client = MapboxClient::with_base_url("test-token", server.url());
        let (lon, lat) = run_blocking(move || client.resolve("id-1")).await.unwrap();
        assert_eq!((lon, lat), (-0.7024, 49.2764));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn directions_sends_depart_at_and_parses_route() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock(
                "GET",
                mockito::Matcher::Regex(r"^/directions/v5/mapbox/driving/.*".to_string()),
            )
            .match_query(mockito::Matcher::UrlEncoded(
                "depart_at".into(),
                "2025-12-08T10:05".into(),
            ))
            .with_body(r#"{"routes": [{"duration": 1234.5, "distance": 18000.0}]}"#)
            .create_async()
            .await;

        let client = MapboxClient::with_base_url("test-token", server.url());
        let depart = NaiveDate::from_ymd_opt(2025, 12, 8)
            .unwrap()
            .and_hms_opt(10, 5, 0)
            .unwrap();
        let estimate = run_blocking(move || {
            client.estimate_travel(
                &Location::new("A", -1.08, 49.11),
                &Location::new("B", -0.7, 49.27),
                TimeConstraint::DepartAt(depart),
            )
        })
        .await
        .unwrap();

        assert_eq!(estimate.duration_secs, 1234.5);
        assert_eq!(estimate.distance_meters, 18000.0);
        mock.assert_async().await;
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn missing_route_is_a_malformed_response() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "GET",
                mockito::Matcher::Regex(r"^/directions/v5/mapbox/driving/.*".to_string()),
            )
            .match_query(mockito::Matcher::Any)
            .with_body(r#"{"routes": []}"#)
            .create_async()
            .await;

        let client = MapboxClient::with_base_url("test-token", server.url());
        let result = run_blocking(move || {
            client.estimate_travel(
                &Location::new("A", 0.0, 0.0),
                &Location::new("B", 1.0, 1.0),
                TimeConstraint::ArriveBy(
                    NaiveDate::from_ymd_opt(2025, 12, 8)
                        .unwrap()
                        .and_hms_opt(14, 35, 0)
                        .unwrap(),
                ),
            )
        })
        .await;
        assert!(matches!(result, Err(TravelError::MalformedResponse(_))));
    }

    #[test]
    fn from_env_requires_token() {
        std::env::remove_var(TOKEN_ENV);
        assert!(matches!(
            MapboxClient::from_env(),
            Err(GeocodeError::MissingToken(_))
        ));
    }
}
