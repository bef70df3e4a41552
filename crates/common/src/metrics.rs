//! Prometheus metrics for item operations (default registry).

use once_cell::sync::Lazy;
use prometheus::{register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec, TextEncoder};

pub static ITEM_OPERATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "item_api_operations_total",
        "Total item operations handled, by operation",
        &["op"]
    )
    .expect("register item_operations_total")
});

pub static ITEM_NOT_FOUND_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "item_api_not_found_total",
        "Total id-addressed item operations that found no record"
    )
    .expect("register item_not_found_total")
});

/// Count one item operation (`create`, `list`, `get`, `update`, `delete`).
pub fn record_operation(op: &str) {
    ITEM_OPERATIONS_TOTAL.with_label_values(&[op]).inc();
}

pub fn record_not_found() {
    ITEM_NOT_FOUND_TOTAL.inc();
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    // Touch the statics so the families show up before the first request.
    Lazy::force(&ITEM_OPERATIONS_TOTAL);
    Lazy::force(&ITEM_NOT_FOUND_TOTAL);

    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
