use crate::types::{LogRecord, Severity, SourceId};
use serde::Serialize;
use tracing::debug;

/// Per-source severity counts, indexed in fixed taxonomy order
/// (`Severity::ALL`). Chart category axes depend on that order being
/// stable regardless of input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LogLevelBreakdown {
    pub source_a: [u64; 5],
    pub source_b: [u64; 5],
}

impl LogLevelBreakdown {
    pub fn counts(&self, source: SourceId) -> &[u64; 5] {
        match source {
            SourceId::A => &self.source_a,
            SourceId::B => &self.source_b,
        }
    }
}

/// Buckets log records by source and severity. Records with a level
/// outside the taxonomy are excluded from the counts; that is a
/// data-quality issue in the feed, not a fault.
pub fn aggregate(records: &[LogRecord]) -> LogLevelBreakdown {
    let mut breakdown = LogLevelBreakdown::default();
    for record in records {
        let Some(level) = Severity::from_wire(&record.level) else {
            debug!("Excluding record with unrecognized level '{}'", record.level);
            continue;
        };
        let counts = match record.source {
            SourceId::A => &mut breakdown.source_a,
            SourceId::B => &mut breakdown.source_b,
        };
        counts[level as usize] += 1;
    }
    breakdown
}
