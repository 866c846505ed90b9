use crate::constants::NO_DATA_LABEL;
use crate::types::LatencySample;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Two latency series aligned onto one shared label axis. All three
/// vectors are always the same length; `None` marks "no sample at this
/// point" and is distinct from a zero-valued sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciledSeries {
    pub labels: Vec<String>,
    pub series_a: Vec<Option<f64>>,
    pub series_b: Vec<Option<f64>>,
}

/// Merges two independently-sampled latency series into one ordered
/// timeline. The sources share no sequence numbers and no synchronized
/// clock, so alignment joins on the display key: wall-clock time
/// truncated to seconds. Pure; identical inputs give identical output.
pub fn reconcile(samples_a: &[LatencySample], samples_b: &[LatencySample]) -> ReconciledSeries {
    if samples_a.is_empty() && samples_b.is_empty() {
        // Sentinel so chart rendering never receives empty arrays.
        return ReconciledSeries {
            labels: vec![NO_DATA_LABEL.to_string()],
            series_a: vec![Some(0.0)],
            series_b: vec![Some(0.0)],
        };
    }

    let keyed_a = keyed_in_time_order(samples_a);
    let keyed_b = keyed_in_time_order(samples_b);

    let mut labels: Vec<String> = keyed_a
        .iter()
        .chain(keyed_b.iter())
        .map(|(key, _)| key.clone())
        .collect();
    labels.sort();
    labels.dedup();

    let series_a = resolve(&labels, &keyed_a);
    let series_b = resolve(&labels, &keyed_b);

    ReconciledSeries {
        labels,
        series_a,
        series_b,
    }
}

/// Reduced-precision timestamp used as the join key for alignment.
/// Samples from different sources landing within the same second are
/// treated as the same axis point.
pub fn display_key(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%H:%M:%S").to_string()
}

/// Sorts ascending by timestamp (stable, so equal instants keep input
/// order) and maps every sample to its display key.
fn keyed_in_time_order(samples: &[LatencySample]) -> Vec<(String, f64)> {
    let mut ordered: Vec<&LatencySample> = samples.iter().collect();
    ordered.sort_by_key(|sample| sample.timestamp);
    ordered
        .into_iter()
        .map(|sample| (display_key(sample.timestamp), sample.latency_ms))
        .collect()
}

/// Resolves one series against the shared axis. First sample wins when
/// several instants in a series collapse to the same key; later same-key
/// samples are not represented. Downstream consumers rely on first-wins,
/// so this must not be changed to averaging or bucketing.
fn resolve(labels: &[String], keyed: &[(String, f64)]) -> Vec<Option<f64>> {
    labels
        .iter()
        .map(|label| {
            keyed
                .iter()
                .find(|(key, _)| key == label)
                .map(|(_, value)| *value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SourceId;
    use chrono::TimeZone;

    fn sample(source: SourceId, hms: (u32, u32, u32), latency_ms: f64) -> LatencySample {
        LatencySample {
            source,
            timestamp: Utc
                .with_ymd_and_hms(2024, 3, 1, hms.0, hms.1, hms.2)
                .unwrap(),
            latency_ms,
        }
    }

    #[test]
    fn both_empty_yields_no_data_sentinel() {
        let series = reconcile(&[], &[]);
        assert_eq!(series.labels, vec![NO_DATA_LABEL.to_string()]);
        assert_eq!(series.series_a, vec![Some(0.0)]);
        assert_eq!(series.series_b, vec![Some(0.0)]);
    }

    #[test]
    fn series_align_on_shared_seconds_with_explicit_gaps() {
        let samples_a = vec![sample(SourceId::A, (10, 0, 0), 50.0)];
        let samples_b = vec![
            sample(SourceId::B, (10, 0, 0), 70.0),
            sample(SourceId::B, (10, 0, 5), 80.0),
        ];

        let series = reconcile(&samples_a, &samples_b);
        assert_eq!(series.labels, vec!["10:00:00", "10:00:05"]);
        assert_eq!(series.series_a, vec![Some(50.0), None]);
        assert_eq!(series.series_b, vec![Some(70.0), Some(80.0)]);
    }

    #[test]
    fn unsorted_input_is_ordered_by_timestamp() {
        let samples_b = vec![
            sample(SourceId::B, (10, 0, 9), 90.0),
            sample(SourceId::B, (10, 0, 1), 10.0),
            sample(SourceId::B, (10, 0, 4), 40.0),
        ];

        let series = reconcile(&[], &samples_b);
        assert_eq!(series.labels, vec!["10:00:01", "10:00:04", "10:00:09"]);
        assert_eq!(series.series_b, vec![Some(10.0), Some(40.0), Some(90.0)]);
        assert_eq!(series.series_a, vec![None, None, None]);
    }

    #[test]
    fn same_second_collision_resolves_to_the_earliest_sample() {
        // Two distinct instants that truncate to the same display key.
        let mut first = sample(SourceId::A, (10, 0, 0), 33.0);
        first.timestamp = first.timestamp + chrono::Duration::milliseconds(100);
        let mut second = sample(SourceId::A, (10, 0, 0), 99.0);
        second.timestamp = second.timestamp + chrono::Duration::milliseconds(900);

        // Input order deliberately reversed; the time sort decides.
        let series = reconcile(&[second, first], &[]);
        assert_eq!(series.labels, vec!["10:00:00"]);
        assert_eq!(series.series_a, vec![Some(33.0)]);
    }

    #[test]
    fn output_vectors_always_match_axis_length() {
        let samples_a = vec![
            sample(SourceId::A, (9, 59, 58), 5.0),
            sample(SourceId::A, (10, 0, 2), 6.0),
        ];
        let samples_b = vec![sample(SourceId::B, (10, 0, 0), 7.0)];

        let series = reconcile(&samples_a, &samples_b);
        assert_eq!(series.labels.len(), 3);
        assert_eq!(series.series_a.len(), series.labels.len());
        assert_eq!(series.series_b.len(), series.labels.len());
    }

    #[test]
    fn reconcile_is_idempotent() {
        let samples_a = vec![
            sample(SourceId::A, (10, 0, 3), 12.0),
            sample(SourceId::A, (10, 0, 1), 11.0),
        ];
        let samples_b = vec![sample(SourceId::B, (10, 0, 2), 21.0)];

        let first = reconcile(&samples_a, &samples_b);
        let second = reconcile(&samples_a, &samples_b);
        assert_eq!(first, second);
    }
}
