//! Metrics recorded per call, checked against an in-process recorder.

use metrics_util::debugging::{DebugValue, DebuggingRecorder, Snapshotter};

mod common;

/// A metric as captured by the recorder: name, labels, value.
struct Recorded {
    name: String,
    labels: Vec<(String, String)>,
    value: DebugValue,
}

fn capture(snapshotter: &Snapshotter) -> Vec<Recorded> {
    snapshotter
        .snapshot()
        .into_vec()
        .into_iter()
        .map(|(key, _, _, value)| Recorded {
            name: key.key().name().to_string(),
            labels: key
                .key()
                .labels()
                .map(|l| (l.key().to_string(), l.value().to_string()))
                .collect(),
            value,
        })
        .collect()
}

fn matching<'a>(
    metrics: &'a [Recorded],
    name: &'a str,
    labels: &'a [(&'a str, &'a str)],
) -> impl Iterator<Item = &'a Recorded> {
    metrics.iter().filter(move |m| {
        m.name == name
            && labels
                .iter()
                .all(|(k, v)| m.labels.iter().any(|(lk, lv)| lk == k && lv == v))
    })
}

fn counter(metrics: &[Recorded], name: &str, labels: &[(&str, &str)]) -> u64 {
    matching(metrics, name, labels)
        .map(|m| match &m.value {
            DebugValue::Counter(n) => *n,
            _ => 0,
        })
        .sum()
}

fn histogram_samples(metrics: &[Recorded], name: &str) -> usize {
    matching(metrics, name, &[])
        .map(|m| match &m.value {
            DebugValue::Histogram(samples) => samples.len(),
            _ => 0,
        })
        .sum()
}

#[tokio::test]
async fn test_retried_call_settles_once() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    let _guard = metrics::set_default_local_recorder(&recorder);

    let (addr, log) = common::start_programmable_backend(|_, index| async move {
        if index < 2 {
            (503, String::new())
        } else {
            (200, "[]".to_string())
        }
    })
    .await;
    let client = common::test_client(&common::test_config(addr));

    let res = client.list_events(&[], None).await.unwrap();
    assert_eq!(res.retry_count, 2);
    assert_eq!(log.len(), 3);

    let metrics = capture(&snapshotter);
    assert_eq!(counter(&metrics, "api_client_retries_total", &[("method", "GET")]), 2);
    assert_eq!(counter(&metrics, "api_client_requests_total", &[]), 1);
    assert_eq!(
        counter(
            &metrics,
            "api_client_requests_total",
            &[("method", "GET"), ("status", "200")]
        ),
        1
    );
    assert_eq!(histogram_samples(&metrics, "api_client_request_duration_seconds"), 1);
}

#[tokio::test]
async fn test_exhausted_retries_settle_with_status() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    let _guard = metrics::set_default_local_recorder(&recorder);

    let (addr, _log) =
        common::start_programmable_backend(|_, _| async { (500, String::new()) }).await;
    let client = common::test_client(&common::test_config(addr));

    client.list_events(&[], None).await.unwrap_err();

    let metrics = capture(&snapshotter);
    assert_eq!(counter(&metrics, "api_client_retries_total", &[]), 2);
    assert_eq!(counter(&metrics, "api_client_requests_total", &[]), 1);
    assert_eq!(
        counter(&metrics, "api_client_requests_total", &[("status", "500")]),
        1
    );
}

#[tokio::test]
async fn test_decode_failure_is_not_counted_as_success() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    let _guard = metrics::set_default_local_recorder(&recorder);

    let (addr, _log) = common::start_programmable_backend(|req, _| async move {
        if req.path.ends_with("/health") {
            (200, r#"{"state":"UP"}"#.to_string())
        } else {
            (200, r#"{"not":"a list"}"#.to_string())
        }
    })
    .await;
    let client = common::test_client(&common::test_config(addr));

    client.list_events(&[], None).await.unwrap_err();
    client.health_check(None).await.unwrap_err();

    let metrics = capture(&snapshotter);
    assert_eq!(counter(&metrics, "api_client_requests_total", &[]), 2);
    assert_eq!(
        counter(&metrics, "api_client_requests_total", &[("status", "decode")]),
        2
    );
    assert_eq!(
        counter(&metrics, "api_client_requests_total", &[("status", "200")]),
        0
    );
}

#[tokio::test]
async fn test_disabled_metrics_record_nothing() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    let _guard = metrics::set_default_local_recorder(&recorder);

    let (addr, _log) =
        common::start_programmable_backend(|_, _| async { (200, "[]".to_string()) }).await;
    let mut config = common::test_config(addr);
    config.observability.metrics_enabled = false;
    let client = common::test_client(&config);

    client.list_events(&[], None).await.unwrap();

    let metrics = capture(&snapshotter);
    assert_eq!(counter(&metrics, "api_client_requests_total", &[]), 0);
}
