use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::PlaceSourceError;

pub mod google_places_repo;
pub mod mapbox_repo;
pub mod mock_repo;
pub mod settings_repo;

pub const RESULT_LIMIT: usize = 10;

pub(crate) fn parse_base_url(base_url: &str) -> Result<Url, PlaceSourceError> {
    Url::parse(base_url).map_err(|e| PlaceSourceError::InvalidUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })
}

/// Appends path segments to `base`, percent-encoding each one.
pub(crate) fn join_segments(base: &Url, segments: &[&str]) -> Result<Url, PlaceSourceError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| PlaceSourceError::InvalidUrl {
            url: base.to_string(),
            reason: "URL cannot be a base".to_string(),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// One GET, no retries. Credentials live in the query string, so neither the
/// error nor the log line carries it.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: Url,
) -> Result<T, PlaceSourceError> {
    let path = url.path().to_string();
    debug!("Requesting upstream path: {}", path);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| PlaceSourceError::Http(e.without_url()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(PlaceSourceError::UnexpectedStatus {
            status: status.as_u16(),
            url: path,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| PlaceSourceError::Http(e.without_url()))
}
