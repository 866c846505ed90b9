use crate::constants::ENDPOINT_LABEL_MAX;
use crate::types::EndpointCount;
use serde::Serialize;

/// One row of the top-endpoint bar chart, ordered descending by combined
/// request count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEndpoint {
    pub display_label: String,
    pub count_a: u64,
    pub count_b: u64,
}

/// Ranks endpoints by combined traffic across both sources and keeps the
/// top `limit`. The sort is stable: endpoints with equal combined counts
/// keep their input order, which keeps rankings reproducible.
pub fn rank(counts: &[EndpointCount], limit: usize) -> Vec<RankedEndpoint> {
    let mut ordered: Vec<&EndpointCount> = counts.iter().collect();
    ordered.sort_by(|a, b| {
        (b.count_a + b.count_b).cmp(&(a.count_a + a.count_b))
    });
    ordered.truncate(limit);
    ordered
        .into_iter()
        .map(|count| RankedEndpoint {
            display_label: display_label(&count.endpoint),
            count_a: count.count_a,
            count_b: count.count_b,
        })
        .collect()
}

/// Shortens long endpoint paths to their last segment for axis labels.
/// Endpoints at or under the length cap, endpoints with no separator,
/// and endpoints whose last segment would be empty stay as-is; a label
/// is never empty.
fn display_label(endpoint: &str) -> String {
    if endpoint.len() <= ENDPOINT_LABEL_MAX {
        return endpoint.to_string();
    }
    match endpoint.rfind('/') {
        Some(idx) if idx + 1 < endpoint.len() => endpoint[idx + 1..].to_string(),
        _ => endpoint.to_string(),
    }
}
