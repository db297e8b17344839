//! Metrics collection for serviflex-service.
//!
//! HTTP request metrics go through the `metrics` recorder installed here;
//! marketplace counters live in a separate Prometheus registry and are
//! appended to the same `/metrics` output.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use prometheus::{Encoder, IntCounterVec, Opts, Registry};
use service_core::error::AppError;
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
pub static PROMETHEUS_REGISTRY: OnceLock<Registry> = OnceLock::new();
pub static APPOINTMENTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static REGISTRATIONS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

fn metrics_error(context: &str, e: impl std::fmt::Display) -> AppError {
    AppError::InternalError(anyhow::anyhow!("{}: {}", context, e))
}

/// Installs the recorder and registers the domain counters. Call once at
/// startup, before the server accepts requests.
pub fn init_metrics() -> Result<(), AppError> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| metrics_error("Failed to install Prometheus recorder", e))?;
    METRICS_HANDLE
        .set(handle)
        .map_err(|_| metrics_error("Failed to set metrics handle", "already initialized"))?;

    let registry = Registry::new();

    let appointments = IntCounterVec::new(
        Opts::new(
            "serviflex_appointments_total",
            "Appointment requests by outcome",
        ),
        &["outcome"],
    )
    .map_err(|e| metrics_error("Failed to create serviflex_appointments_total", e))?;

    let registrations = IntCounterVec::new(
        Opts::new(
            "serviflex_registrations_total",
            "Accounts created by user kind",
        ),
        &["kind"],
    )
    .map_err(|e| metrics_error("Failed to create serviflex_registrations_total", e))?;

    registry
        .register(Box::new(appointments.clone()))
        .map_err(|e| metrics_error("Failed to register serviflex_appointments_total", e))?;
    registry
        .register(Box::new(registrations.clone()))
        .map_err(|e| metrics_error("Failed to register serviflex_registrations_total", e))?;

    let _ = APPOINTMENTS_TOTAL.set(appointments);
    let _ = REGISTRATIONS_TOTAL.set(registrations);
    let _ = PROMETHEUS_REGISTRY.set(registry);
    Ok(())
}

/// Get metrics output in Prometheus text format.
pub fn get_metrics() -> String {
    let mut output = METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string());

    if let Some(registry) = PROMETHEUS_REGISTRY.get() {
        let mut buffer = Vec::new();
        if let Err(e) = prometheus::TextEncoder::new().encode(&registry.gather(), &mut buffer) {
            tracing::warn!(error = %e, "Failed to encode custom metrics");
        }
        if let Ok(custom_metrics) = String::from_utf8(buffer) {
            output.push_str(&custom_metrics);
        }
    }

    output
}

/// `outcome` is `booked` or `rejected`.
pub fn record_appointment(outcome: &str) {
    if let Some(counter) = APPOINTMENTS_TOTAL.get() {
        counter.with_label_values(&[outcome]).inc();
    }
}

pub fn record_registration(kind: &str) {
    if let Some(counter) = REGISTRATIONS_TOTAL.get() {
        counter.with_label_values(&[kind]).inc();
    }
}
