/// Wire and default-value constants shared across the codebase.

// Source names as they appear in remote payloads ("server" field)
pub const SOURCE_A_WIRE: &str = "server1";
pub const SOURCE_B_WIRE: &str = "server2";

// Default base URLs when no config file or env override is present
pub const DEFAULT_SOURCE_A_URL: &str = "http://localhost:3001";
pub const DEFAULT_SOURCE_B_URL: &str = "http://localhost:3002";

// Resource paths on the collaborator HTTP surface
pub const LOGS_PATH: &str = "/api/logs";
pub const REQUEST_COUNT_PATH: &str = "/api/logs/request-count";
pub const RESPONSE_TIME_PATH: &str = "/api/logs/response-time";

/// How many endpoints the ranking keeps for the bar chart.
pub const TOP_ENDPOINT_LIMIT: usize = 5;

/// Endpoints longer than this get shortened to their last path segment.
pub const ENDPOINT_LABEL_MAX: usize = 15;

/// Axis label emitted when neither source produced latency samples.
pub const NO_DATA_LABEL: &str = "No Data";
