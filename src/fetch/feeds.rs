use crate::{
    core::config::FeedConfig,
    data::geojson::GeoJson,
    fetch::client::FeedClient,
    MapError, Result,
};

/// Result of one feed request, kept instead of propagated
#[derive(Debug)]
pub enum FeedOutcome<T> {
    Loaded(T),
    Failed(MapError),
    /// Not requested by this map variant
    Skipped,
}

impl<T> FeedOutcome<T> {
    pub fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(value) => FeedOutcome::Loaded(value),
            Err(err) => FeedOutcome::Failed(err),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, FeedOutcome::Loaded(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FeedOutcome::Failed(_))
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            FeedOutcome::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&MapError> {
        match self {
            FeedOutcome::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Both feeds after they have been joined
#[derive(Debug)]
pub struct FeedSet {
    pub earthquakes: FeedOutcome<GeoJson>,
    pub tectonic: FeedOutcome<GeoJson>,
}

/// GET a URL and decode the body as GeoJSON
pub async fn fetch_geojson<C: FeedClient + ?Sized>(client: &C, url: &str) -> Result<GeoJson> {
    let value = client.get_json(url).await?;
    GeoJson::from_value(value)
}

async fn fetch_outcome<C: FeedClient + ?Sized>(client: &C, url: &str) -> FeedOutcome<GeoJson> {
    FeedOutcome::from_result(fetch_geojson(client, url).await)
}

#[cfg(feature = "debug")]
fn log_outcome(name: &str, url: &str, outcome: &FeedOutcome<GeoJson>) {
    match outcome {
        FeedOutcome::Loaded(geojson) => {
            log::debug!("{} feed loaded: {} features", name, geojson.features().len())
        }
        FeedOutcome::Failed(err) => log::warn!("{} feed failed ({}): {}", name, url, err),
        FeedOutcome::Skipped => log::debug!("{} feed skipped", name),
    }
}

/// Requests both feeds concurrently; the tectonic one only when asked for.
///
/// Never fails: each request's error is kept in its [`FeedOutcome`].
pub async fn fetch_feeds<C: FeedClient + ?Sized>(
    client: &C,
    feeds: &FeedConfig,
    include_tectonic: bool,
) -> FeedSet {
    let earthquakes = fetch_outcome(client, &feeds.earthquake_url);
    let tectonic = async {
        if include_tectonic {
            fetch_outcome(client, &feeds.tectonic_url).await
        } else {
            FeedOutcome::Skipped
        }
    };

    let (earthquakes, tectonic) = futures::join!(earthquakes, tectonic);

    #[cfg(feature = "debug")]
    {
        log_outcome("earthquake", &feeds.earthquake_url, &earthquakes);
        log_outcome("tectonic", &feeds.tectonic_url, &tectonic);
    }

    FeedSet {
        earthquakes,
        tectonic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};

    struct OneFeed;

    #[async_trait]
    impl FeedClient for OneFeed {
        async fn get_json(&self, url: &str) -> Result<Value> {
            if url.contains("quakes") {
                Ok(json!({"type": "FeatureCollection", "features": []}))
            } else if url.contains("garbage") {
                Ok(json!({"type": "Unknown"}))
            } else {
                Err(MapError::Http {
                    url: url.to_string(),
                    status: 404,
                })
            }
        }
    }

    fn feeds(tectonic_url: &str) -> FeedConfig {
        FeedConfig {
            earthquake_url: "mem://quakes".into(),
            tectonic_url: tectonic_url.into(),
            timeout_secs: None,
        }
    }

    #[tokio::test]
    async fn test_outcomes_are_kept_per_feed() {
        let set = fetch_feeds(&OneFeed, &feeds("mem://plates"), true).await;
        assert!(set.earthquakes.is_loaded());
        assert!(matches!(set.tectonic.error(), Some(MapError::Http { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_tectonic_skipped_when_not_requested() {
        let set = fetch_feeds(&OneFeed, &feeds("mem://plates"), false).await;
        assert!(matches!(set.tectonic, FeedOutcome::Skipped));
    }

    #[tokio::test]
    async fn test_undecodable_document_fails() {
        assert!(fetch_geojson(&OneFeed, "mem://garbage").await.is_err());
        let set = fetch_feeds(&OneFeed, &feeds("mem://garbage"), true).await;
        assert!(set.tectonic.is_failed());
    }

    #[tokio::test]
    async fn test_single_outcome_wraps_the_request() {
        assert!(fetch_outcome(&OneFeed, "mem://quakes").await.is_loaded());
        assert!(fetch_outcome(&OneFeed, "mem://missing").await.is_failed());
    }
}
