use serde::{Deserialize, Serialize};

/// One row of the geolocation relation (`solar_panel_location`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelLocation {
    /// Panel key, unique within the relation
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
}
