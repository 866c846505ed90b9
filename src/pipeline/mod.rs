pub mod endpoints;
pub mod log_levels;
pub mod reconcile;

use crate::constants::TOP_ENDPOINT_LIMIT;
use crate::datasets::{log_level_chart, DashboardData};
use crate::error::Result;
use crate::types::{LatencySample, SourceId, TelemetrySource};
use tracing::{info, instrument, warn};

/// Runs one full dashboard load: two sequential fan-out fetch stages,
/// then the pure transforms. Source B serves logs and endpoint counters
/// for both services; latency comes from each source separately, with
/// source A best-effort. A failed critical fetch aborts the load, so no
/// partial charts are produced.
#[instrument(skip(source_a, source_b))]
pub async fn load_dashboard(
    source_a: &dyn TelemetrySource,
    source_b: &dyn TelemetrySource,
) -> Result<DashboardData> {
    // Stage 1: logs and endpoint counts, both critical.
    let (logs, endpoint_counts) =
        tokio::join!(source_b.fetch_logs(), source_b.fetch_endpoint_counts());
    let logs = logs?;
    let endpoint_counts = endpoint_counts?;
    info!(
        "Stage 1 complete: {} log records, {} endpoint counters",
        logs.len(),
        endpoint_counts.len()
    );

    // Stage 2: latency from both sources. Source A is best-effort; an
    // unreachable source A degrades the line chart instead of the load.
    let (latency_a, latency_b) =
        tokio::join!(source_a.fetch_latency(), source_b.fetch_latency());
    let latency_a = match latency_a {
        Ok(samples) => samples,
        Err(err) => {
            warn!("Source A latency fetch failed, continuing without it: {}", err);
            Vec::new()
        }
    };
    let latency_b = latency_b?;
    info!(
        "Stage 2 complete: {} + {} latency samples",
        latency_a.len(),
        latency_b.len()
    );

    // Each response can carry samples tagged with either source, so the
    // split for reconciliation goes by the sample's own tag, not by
    // which host answered.
    let mut samples = latency_a;
    samples.extend(latency_b);
    let (samples_a, samples_b): (Vec<LatencySample>, Vec<LatencySample>) = samples
        .into_iter()
        .partition(|sample| sample.source == SourceId::A);

    Ok(DashboardData {
        log_levels: log_level_chart(&log_levels::aggregate(&logs)),
        latency: reconcile::reconcile(&samples_a, &samples_b),
        top_endpoints: endpoints::rank(&endpoint_counts, TOP_ENDPOINT_LIMIT),
    })
}
