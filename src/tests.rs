use {
    crate::{
        aggregator::AverageService,
        error::UpstreamError,
        upstream::{FetchResult, NumberFetcher, SourceRegistry, UpstreamSource},
        window::WindowValue,
    },
    async_trait::async_trait,
    serde_json::{json, Value},
    std::{
        collections::{HashSet, VecDeque},
        num::NonZeroUsize,
        sync::{Arc, Mutex},
        time::Duration,
    },
};

/// Fetcher that replays a fixed script of results, one per call
struct ScriptedFetcher {
    script: Mutex<VecDeque<FetchResult>>,
}

impl ScriptedFetcher {
    fn new(script: Vec<FetchResult>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
        })
    }
}

#[async_trait]
impl NumberFetcher for ScriptedFetcher {
    async fn fetch(&self, _source: &UpstreamSource) -> FetchResult {
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    fn backend_type(&self) -> &'static str {
        "scripted"
    }
}

fn numbers(values: &[i64]) -> Vec<Value> {
    values.iter().map(|v| json!(v)).collect()
}

fn values(values: &[i64]) -> Vec<WindowValue> {
    values.iter().map(|&v| WindowValue::from(v)).collect()
}

fn service(capacity: usize, fetcher: Arc<dyn NumberFetcher>) -> AverageService {
    AverageService::new(
        NonZeroUsize::new(capacity).unwrap(),
        SourceRegistry::with_base_url("http://numbers.test").unwrap(),
        fetcher,
        Duration::from_millis(500),
    )
}

/// Two requests against a window of 3, starting empty
#[tokio::test]
async fn test_end_to_end_two_requests() {
    let fetcher = ScriptedFetcher::new(vec![Ok(numbers(&[1, 2, 3, 4])), Ok(numbers(&[3, 5]))]);
    let service = service(3, fetcher);

    let first = service.handle("e").await.unwrap();
    assert!(first.window_prev_state.is_empty());
    assert_eq!(first.window_curr_state, values(&[2, 3, 4]));
    assert_eq!(first.numbers, numbers(&[1, 2, 3, 4]));
    assert_eq!(first.avg, 3.0);

    let second = service.handle("e").await.unwrap();
    assert_eq!(second.window_prev_state, values(&[2, 3, 4]));
    assert_eq!(second.window_curr_state, values(&[3, 4, 5]));
    assert_eq!(second.numbers, numbers(&[3, 5]));
    assert_eq!(second.avg, 4.0);
}

/// A timeout on an empty window yields an all-empty, successful snapshot
#[tokio::test]
async fn test_fetch_timeout_on_empty_window() {
    let service = service(3, ScriptedFetcher::new(vec![Err(UpstreamError::Timeout)]));

    let snapshot = service.handle("p").await.unwrap();

    assert!(snapshot.numbers.is_empty());
    assert!(snapshot.window_prev_state.is_empty());
    assert!(snapshot.window_curr_state.is_empty());
    assert_eq!(snapshot.avg, 0.0);
}

/// A failed fetch in the middle of a session keeps the existing window
#[tokio::test]
async fn test_failed_fetch_preserves_window() {
    let fetcher = ScriptedFetcher::new(vec![
        Ok(numbers(&[10, 20])),
        Err(UpstreamError::Status(502)),
    ]);
    let service = service(3, fetcher);
    service.handle("r").await.unwrap();

    let snapshot = service.handle("r").await.unwrap();

    assert_eq!(snapshot.window_prev_state, values(&[10, 20]));
    assert_eq!(snapshot.window_curr_state, values(&[10, 20]));
    assert!(snapshot.numbers.is_empty());
    assert_eq!(snapshot.avg, 15.0);
}

/// Concurrent requests each see a previous state equal to some real
/// pre-merge window, and every request's value lands exactly once.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_are_serialized() {
    const REQUESTS: i64 = 64;
    let script = (0..REQUESTS).map(|i| Ok(numbers(&[i]))).collect();
    let service = Arc::new(service(5, ScriptedFetcher::new(script)));

    let handles: Vec<_> = (0..REQUESTS)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move { service.handle("f").await.unwrap() })
        })
        .collect();

    let mut prev_states = HashSet::new();
    for handle in handles {
        let snapshot = handle.await.unwrap();

        let added = snapshot.numbers[0].as_i64().unwrap();
        let mut expected = snapshot.window_prev_state.clone();
        expected.push(WindowValue::from(added));
        if expected.len() > 5 {
            expected.remove(0);
        }
        assert_eq!(snapshot.window_curr_state, expected);

        // No two requests merged against the same pre-state
        assert!(prev_states.insert(snapshot.window_prev_state));
    }

    assert_eq!(service.window_len(), 5);
}
