use metrics::{describe_counter, describe_gauge, describe_histogram, Unit};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber. `LOG_FORMAT=json` switches to one JSON
/// object per line; anything else gets the compact human format.
pub fn init_tracing(service_name: &'static str) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_current_span(false))
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_level(true)
                .compact())
            .try_init()?;
    }

    tracing::info!(service = service_name, json, "✅ Logging initialized");

    Ok(())
}

pub fn init_metrics(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::net::SocketAddr;

    let addr: SocketAddr = ([0, 0, 0, 0], port).into();

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;

    describe_counter!("bot_updates_total", "Updates routed through the dispatcher");
    describe_counter!("bot_comments_forwarded_total", "Comments forwarded to admins");
    describe_counter!("bot_invalid_messages_total", "Unsolicited texts reported to admins");
    describe_counter!("bot_users_blocked_total", "Users blocked by an admin");
    describe_counter!("bot_fanout_failures_total", "Notifications that failed to deliver");
    describe_gauge!("bot_blocked_users", "Users currently on the block list");
    describe_histogram!(
        "bot_update_duration_seconds",
        Unit::Seconds,
        "Time spent handling one update"
    );

    tracing::info!("✅ Prometheus metrics exporter started at http://{}/metrics", addr);

    Ok(())
}

pub fn record_timing(metric_name: &'static str, duration_secs: f64) {
    metrics::histogram!(metric_name).record(duration_secs);
}

pub fn record_counter(metric_name: &'static str, value: u64) {
    metrics::counter!(metric_name).increment(value);
}

pub fn record_gauge(metric_name: &'static str, value: f64) {
    metrics::gauge!(metric_name).set(value);
}
