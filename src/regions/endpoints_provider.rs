//! Loads and caches the endpoints document

use super::endpoints::Endpoints;
use super::error::EndpointsError;
use crate::resourcefetcher::ResourceFetcher;
use log::{info, warn};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Anything able to hand out the current endpoints snapshot
pub trait EndpointsSource: Send + Sync {
    /// `None` until endpoints have been loaded
    fn get_endpoints(&self) -> Option<Arc<Endpoints>>;
}

/// Fetches the endpoints document from a primary source, falling back to a
/// secondary one, and keeps the last successfully parsed snapshot
pub struct EndpointsProvider {
    primary: Arc<dyn ResourceFetcher>,
    fallback: Option<Arc<dyn ResourceFetcher>>,
    endpoints: RwLock<Option<Arc<Endpoints>>>,
    /// Serializes `load()` calls
    loading: Mutex<()>,
}

impl EndpointsProvider {
    pub fn new(primary: Arc<dyn ResourceFetcher>, fallback: Arc<dyn ResourceFetcher>) -> Self {
        Self::with_sources(primary, Some(fallback))
    }

    /// Provider with a single source and no fallback
    pub fn from_fetcher(primary: Arc<dyn ResourceFetcher>) -> Self {
        Self::with_sources(primary, None)
    }

    fn with_sources(
        primary: Arc<dyn ResourceFetcher>,
        fallback: Option<Arc<dyn ResourceFetcher>>,
    ) -> Self {
        Self {
            primary,
            fallback,
            endpoints: RwLock::new(None),
            loading: Mutex::new(()),
        }
    }

    /// Fetch and parse the document, replacing the cached snapshot.
    ///
    /// The primary source is tried first; on any failure the fallback is
    /// tried and its error (the last one) is returned if it fails too. A
    /// failed load keeps the previous snapshot. Concurrent calls run one
    /// after another.
    pub async fn load(&self) -> Result<(), EndpointsError> {
        let _guard = self.loading.lock().await;

        let endpoints = match load_from(self.primary.as_ref()).await {
            Ok(endpoints) => endpoints,
            Err(primary_error) => match &self.fallback {
                Some(fallback) => {
                    warn!(
                        "Loading endpoints from {} failed ({}), falling back to {}",
                        self.primary.describe(),
                        primary_error,
                        fallback.describe()
                    );
                    load_from(fallback.as_ref()).await?
                }
                None => return Err(primary_error),
            },
        };

        info!(
            "Loaded endpoints with {} partition(s)",
            endpoints.partitions.len()
        );
        *self.endpoints.write() = Some(Arc::new(endpoints));
        Ok(())
    }

    /// Current snapshot, `None` until a load has succeeded
    pub fn get_endpoints(&self) -> Option<Arc<Endpoints>> {
        self.endpoints.read().clone()
    }
}

impl EndpointsSource for EndpointsProvider {
    fn get_endpoints(&self) -> Option<Arc<Endpoints>> {
        EndpointsProvider::get_endpoints(self)
    }
}

/// A fixed snapshot, for hosts that already hold parsed endpoints
#[derive(Debug, Clone)]
pub struct StaticEndpoints(Arc<Endpoints>);

impl StaticEndpoints {
    pub fn new(endpoints: Endpoints) -> Self {
        Self(Arc::new(endpoints))
    }
}

impl EndpointsSource for StaticEndpoints {
    fn get_endpoints(&self) -> Option<Arc<Endpoints>> {
        Some(self.0.clone())
    }
}

async fn load_from(fetcher: &dyn ResourceFetcher) -> Result<Endpoints, EndpointsError> {
    let text = fetcher.get().await?;
    Ok(Endpoints::parse(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resourcefetcher::FetchError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    const SAMPLE: &str = r#"{"partitions": [{"partition": "aws", "partitionName": "Standard",
        "dnsSuffix": "totallyLegit.tld", "regions": {"region1": {"description": "one"}}}]}"#;
    const OTHER: &str = r#"{"partitions": [{"partition": "aws-cn", "partitionName": "China",
        "dnsSuffix": "totallyLegit.cn", "regions": {}}]}"#;

    /// Answers from a script of results, counting calls and overlap
    struct ScriptedFetcher {
        results: parking_lot::Mutex<Vec<Result<&'static str, &'static str>>>,
        calls: AtomicUsize,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        delay: Duration,
    }

    impl ScriptedFetcher {
        fn with_results(results: Vec<Result<&'static str, &'static str>>) -> Self {
            Self {
                results: parking_lot::Mutex::new(results),
                calls: AtomicUsize::new(0),
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
                delay: Duration::ZERO,
            }
        }

        fn ok(text: &'static str) -> Arc<Self> {
            Arc::new(Self::with_results(vec![Ok(text)]))
        }

        fn failing(message: &'static str) -> Arc<Self> {
            Arc::new(Self::with_results(vec![Err(message)]))
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ResourceFetcher for ScriptedFetcher {
        async fn get(&self) -> Result<String, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(in_flight, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            // the last scripted result repeats
            let result = {
                let mut results = self.results.lock();
                if results.len() > 1 {
                    results.remove(0)
                } else {
                    results[0]
                }
            };
            result
                .map(str::to_string)
                .map_err(|message| FetchError::Unavailable(message.to_string()))
        }
    }

    #[tokio::test]
    async fn test_not_loaded_returns_none() {
        let provider = EndpointsProvider::from_fetcher(ScriptedFetcher::ok(SAMPLE));
        assert!(provider.get_endpoints().is_none());
    }

    #[tokio::test]
    async fn test_load_from_primary() {
        let primary = ScriptedFetcher::ok(SAMPLE);
        let fallback = ScriptedFetcher::ok(OTHER);
        let provider = EndpointsProvider::new(primary.clone(), fallback.clone());

        provider.load().await.unwrap();

        let endpoints = provider.get_endpoints().unwrap();
        assert_eq!(endpoints.partitions[0].id, "aws");
        assert_eq!(primary.calls(), 1);
        assert_eq!(fallback.calls(), 0);
    }

    #[tokio::test]
    async fn test_falls_back_on_fetch_failure() {
        let provider =
            EndpointsProvider::new(ScriptedFetcher::failing("offline"), ScriptedFetcher::ok(OTHER));

        provider.load().await.unwrap();
        assert_eq!(provider.get_endpoints().unwrap().partitions[0].id, "aws-cn");
    }

    #[tokio::test]
    async fn test_falls_back_on_parse_failure() {
        let provider =
            EndpointsProvider::new(ScriptedFetcher::ok("<html>"), ScriptedFetcher::ok(OTHER));

        provider.load().await.unwrap();
        assert_eq!(provider.get_endpoints().unwrap().partitions[0].id, "aws-cn");
    }

    #[tokio::test]
    async fn test_surfaces_last_failure() {
        let provider = EndpointsProvider::new(
            ScriptedFetcher::failing("primary offline"),
            ScriptedFetcher::ok("not json"),
        );
        assert!(matches!(
            provider.load().await,
            Err(EndpointsError::Parse(_))
        ));

        let provider = EndpointsProvider::new(
            ScriptedFetcher::ok("not json"),
            ScriptedFetcher::failing("fallback offline"),
        );
        match provider.load().await {
            Err(EndpointsError::Fetch(FetchError::Unavailable(message))) => {
                assert_eq!(message, "fallback offline")
            }
            other => panic!("expected the fallback failure, got {:?}", other),
        }
        assert!(provider.get_endpoints().is_none());
    }

    #[tokio::test]
    async fn test_reload_replaces_snapshot() {
        let provider = EndpointsProvider::from_fetcher(ScriptedFetcher::ok(SAMPLE));
        provider.load().await.unwrap();
        let first = provider.get_endpoints().unwrap();

        provider.load().await.unwrap();
        let second = provider.get_endpoints().unwrap();
        assert_eq!(first, second);
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_snapshot() {
        let fetcher = Arc::new(ScriptedFetcher::with_results(vec![
            Ok(SAMPLE),
            Err("offline"),
        ]));
        let provider = EndpointsProvider::from_fetcher(fetcher);

        provider.load().await.unwrap();
        assert!(provider.load().await.is_err());
        assert_eq!(provider.get_endpoints().unwrap().partitions[0].id, "aws");
    }

    #[tokio::test]
    async fn test_concurrent_loads_are_serialized() {
        let mut fetcher = ScriptedFetcher::with_results(vec![Ok(SAMPLE)]);
        fetcher.delay = Duration::from_millis(20);
        let fetcher = Arc::new(fetcher);
        let provider = EndpointsProvider::from_fetcher(fetcher.clone());

        let (first, second) = tokio::join!(provider.load(), provider.load());
        assert!(first.is_ok());
        assert!(second.is_ok());
        assert_eq!(fetcher.calls(), 2);
        assert_eq!(fetcher.max_in_flight.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_static_endpoints_source() {
        let source = StaticEndpoints::new(Endpoints::parse(SAMPLE).unwrap());
        let first = source.get_endpoints().unwrap();
        let second = source.get_endpoints().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
