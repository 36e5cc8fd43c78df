//! Fetch the locations from the remote service.
//!

use std::time::Duration;

use clap::{crate_name, crate_version};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace};

use locmap_common::GeoCoordinate;

use crate::{http_get, FetchError};

/// What the service sends back.
///
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Payload {
    /// List of `[lat, lng]` pairs
    pub locations: Vec<[f64; 2]>,
}

impl Payload {
    /// Reorder every pair into a geodetic coordinate, keeping the order of the list.
    ///
    pub fn into_coordinates(self) -> Vec<GeoCoordinate> {
        self.locations
            .into_iter()
            .map(GeoCoordinate::from_lat_lng)
            .collect()
    }
}

#[derive(Clone, Debug)]
pub struct LocationFetcher {
    /// Where to get the locations
    pub endpoint: Url,
    /// HTTP client, one per fetcher
    pub client: Client,
}

impl LocationFetcher {
    /// Create a fetcher for the given endpoint, no timeout.
    ///
    #[tracing::instrument]
    pub fn new(endpoint: &str) -> Result<Self, FetchError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| FetchError::BadUrl(endpoint.to_string(), e.to_string()))?;
        Ok(LocationFetcher {
            endpoint,
            client: Client::new(),
        })
    }

    /// Replace the client by one with a global request timeout.
    ///
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, FetchError> {
        self.client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Http(e.to_string()))?;
        Ok(self)
    }

    /// Issue one GET and return the coordinates, in the order sent by the service.
    ///
    #[tracing::instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn fetch_locations(&self) -> Result<Vec<GeoCoordinate>, FetchError> {
        trace!("fetch_locations");

        let url = self.endpoint.clone();
        let resp = http_get!(self, url).await.map_err(|e| {
            error!("request failed: {}", e);
            FetchError::Http(e.to_string())
        })?;

        trace!("resp={:?}", resp);
        let status = resp.status();
        if !status.is_success() {
            error!("bad status: {}", status);
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| FetchError::Http(e.to_string()))?;

        let payload: Payload =
            serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))?;
        debug!("{} locations", payload.locations.len());

        Ok(payload.into_coordinates())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use httpmock::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    const PATH: &str = "/api/locations";

    fn setup_fetcher(server: &MockServer) -> LocationFetcher {
        LocationFetcher::new(&server.url(PATH)).unwrap()
    }

    #[test]
    fn test_new_bad_url() {
        let f = LocationFetcher::new("not a url");
        assert!(matches!(f, Err(FetchError::BadUrl(_, _))));
    }

    #[test]
    fn test_new_fixed_url() {
        let f = LocationFetcher::new(crate::LOCATIONS_URL).unwrap();
        assert_eq!("/api/locations", f.endpoint.path());
    }

    #[tokio::test]
    async fn test_fetch_locations_order() {
        let server = MockServer::start_async().await;
        let m = server
            .mock_async(|when, then| {
                when.method(GET)
                    .header(
                        "user-agent",
                        format!("{}/{}", crate_name!(), crate_version!()),
                    )
                    .path(PATH);
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({
                        "locations": [[37.5663, 126.9779], [37.5651, 126.9895], [37.5700, 126.9769]]
                    }));
            })
            .await;

        let site = setup_fetcher(&server);
        let res = site.fetch_locations().await;
        m.assert_async().await;

        let res = res.unwrap();
        assert_eq!(3, res.len());
        assert_eq!(GeoCoordinate::new(126.9779, 37.5663), res[0]);
        assert_eq!(GeoCoordinate::new(126.9895, 37.5651), res[1]);
        assert_eq!(GeoCoordinate::new(126.9769, 37.57), res[2]);
    }

    #[tokio::test]
    async fn test_fetch_locations_empty() {
        let server = MockServer::start_async().await;
        let m = server
            .mock_async(|when, then| {
                when.method(GET).path(PATH);
                then.status(200).json_body(json!({ "locations": [] }));
            })
            .await;

        let res = setup_fetcher(&server).fetch_locations().await;
        m.assert_async().await;
        assert!(res.unwrap().is_empty());
    }

    #[rstest]
    #[case(404)]
    #[case(500)]
    #[tokio::test]
    async fn test_fetch_locations_bad_status(#[case] code: u16) {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(PATH);
                then.status(code);
            })
            .await;

        let res = setup_fetcher(&server).fetch_locations().await;
        match res {
            Err(FetchError::Status(c)) => assert_eq!(code, c),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[rstest]
    #[case("")]
    #[case("{}")]
    #[case(r#"{"locations": [[37.5663]]}"#)]
    #[case(r#"{"locations": [["37.5663", "126.9779"]]}"#)]
    #[tokio::test]
    async fn test_fetch_locations_malformed(#[case] body: &'static str) {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(PATH);
                then.status(200).body(body);
            })
            .await;

        let res = setup_fetcher(&server).fetch_locations().await;
        assert!(matches!(res, Err(FetchError::Decode(_))));
    }

    #[tokio::test]
    async fn test_fetch_locations_no_server() {
        // Nothing listens on port 9 (discard) usually
        let site = LocationFetcher::new("http://127.0.0.1:9/api/locations")
            .unwrap()
            .with_timeout(Duration::from_secs(2))
            .unwrap();
        let res = site.fetch_locations().await;
        assert!(matches!(res, Err(FetchError::Http(_))));
    }

    #[test]
    fn test_payload_into_coordinates() {
        let p = Payload {
            locations: vec![[37.5663, 126.9779], [1., 2.]],
        };
        let c = p.into_coordinates();
        assert_eq!(vec![GeoCoordinate::new(126.9779, 37.5663), GeoCoordinate::new(2., 1.)], c);
    }
}
