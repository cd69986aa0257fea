use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use prometheus::{core::Collector, Encoder, IntCounterVec, Opts, Registry, TextEncoder};

use crate::AppState;

pub const REQUEST_COUNTER_NAME: &str = "http_request_total";

/// Status label recorded for every request.
///
/// Requests are counted before their handler runs, so the label carries the
/// initial status rather than the one finally sent. Dashboards key on it.
pub const INITIAL_STATUS: &str = "200";

/// Process-wide request counter plus the registry `/metrics` exposes.
///
/// Cheap to clone: the registry and the counter vector are both `Arc`-backed.
#[derive(Clone)]
pub struct RequestCounter {
    registry: Registry,
    requests: IntCounterVec,
}

impl RequestCounter {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();
        let requests = IntCounterVec::new(
            Opts::new(REQUEST_COUNTER_NAME, "Total number of HTTP requests"),
            &["method", "route", "status"],
        )?;
        registry.register(Box::new(requests.clone()))?;

        Ok(Self { registry, requests })
    }

    /// Counter registry that also reports CPU, memory and fd usage of this process.
    pub fn with_process_metrics() -> prometheus::Result<Self> {
        let counter = Self::new()?;

        #[cfg(target_os = "linux")]
        counter.registry.register(Box::new(
            prometheus::process_collector::ProcessCollector::for_self(),
        ))?;

        Ok(counter)
    }

    pub fn observe(&self, method: &str, route: &str, status: &str) {
        self.requests
            .with_label_values(&[method, route, status])
            .inc();
    }

    /// Current value for one label set, 0 if never observed.
    pub fn count(&self, method: &str, route: &str, status: &str) -> u64 {
        self.samples()
            .into_iter()
            .find(|(labels, _)| labels == &[method, route, status])
            .map(|(_, value)| value)
            .unwrap_or(0)
    }

    /// Sum over every label set.
    pub fn total(&self) -> u64 {
        self.samples().into_iter().map(|(_, value)| value).sum()
    }

    pub fn content_type(&self) -> &'static str {
        prometheus::TEXT_FORMAT
    }

    /// Encode everything in the registry as Prometheus text.
    pub fn render(&self) -> prometheus::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }

    /// `([method, route, status], value)` for each series, read without
    /// creating new ones.
    fn samples(&self) -> Vec<([String; 3], u64)> {
        let mut out = Vec::new();
        for family in self.requests.collect() {
            for metric in family.get_metric() {
                let label = |name: &str| {
                    metric
                        .get_label()
                        .iter()
                        .find(|pair| pair.get_name() == name)
                        .map(|pair| pair.get_value().to_string())
                        .unwrap_or_default()
                };
                out.push((
                    [label("method"), label("route"), label("status")],
                    metric.get_counter().get_value() as u64,
                ));
            }
        }
        out
    }
}

/// Counts the request, then hands it on untouched.
pub async fn count_requests(State(state): State<AppState>, request: Request, next: Next) -> Response {
    state
        .counter
        .observe(request.method().as_str(), request.uri().path(), INITIAL_STATUS);
    next.run(request).await
}
