use crate::pipeline::endpoints::RankedEndpoint;
use crate::pipeline::log_levels::LogLevelBreakdown;
use crate::pipeline::reconcile::ReconciledSeries;
use crate::types::{Severity, SourceId};
use serde::Serialize;

/// A labeled count series for a grouped bar chart. Plain data only;
/// colors and styling belong to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarSeries {
    pub label: String,
    pub data: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarChartData {
    pub labels: Vec<String>,
    pub series: Vec<BarSeries>,
}

/// Everything one dashboard load hands to the rendering layer.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    pub log_levels: BarChartData,
    pub latency: ReconciledSeries,
    pub top_endpoints: Vec<RankedEndpoint>,
}

/// Shapes the severity breakdown for the log-level bar chart: category
/// axis in taxonomy order, one series per source.
pub fn log_level_chart(breakdown: &LogLevelBreakdown) -> BarChartData {
    BarChartData {
        labels: Severity::ALL.iter().map(|s| s.label().to_string()).collect(),
        series: vec![
            BarSeries {
                label: SourceId::A.display_name().to_string(),
                data: breakdown.source_a.to_vec(),
            },
            BarSeries {
                label: SourceId::B.display_name().to_string(),
                data: breakdown.source_b.to_vec(),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_chart_axis_is_the_full_taxonomy() {
        let chart = log_level_chart(&LogLevelBreakdown::default());
        assert_eq!(
            chart.labels,
            ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"]
        );
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].data, vec![0; 5]);
    }

    #[test]
    fn series_carry_the_per_source_counts() {
        let breakdown = LogLevelBreakdown {
            source_a: [1, 2, 3, 4, 5],
            source_b: [0, 0, 1, 0, 0],
        };
        let chart = log_level_chart(&breakdown);
        assert_eq!(chart.series[0].label, "Source A");
        assert_eq!(chart.series[0].data, vec![1, 2, 3, 4, 5]);
        assert_eq!(chart.series[1].label, "Source B");
        assert_eq!(chart.series[1].data, vec![0, 0, 1, 0, 0]);
    }
}
