use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status values emitted by the telemetry generator.
///
/// The column itself is free text; readers do not reject other values.
pub const KNOWN_STATUSES: [&str; 3] = ["OK", "Maintenance", "Fault"];

/// One row of the telemetry relation (`solar_panel_information`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelInformation {
    /// Panel key, unique within the relation
    pub id: i64,
    pub voltage: f64,
    pub temperature: f64,
    pub status: String,
    pub installed_at: DateTime<Utc>,
}
