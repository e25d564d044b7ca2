use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the derived relation (`solar_panel`)
///
/// The inner equi-join of [`PanelInformation`](super::PanelInformation) and
/// [`PanelLocation`](super::PanelLocation) on `id`.
/// Once materialized, this relation is the only thing reads and mutations
/// look at; the two sources are not consulted again until the next rebuild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelRecord {
    pub id: i64,
    pub voltage: f64,
    pub temperature: f64,
    pub status: String,
    pub installed_at: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Field changes applied to one [`PanelRecord`] by the mutation path
///
/// Every field is optional; absent fields keep their stored value. `id` is
/// accepted so a full form can be deserialized as-is, but it is never applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelUpdate {
    pub id: Option<i64>,
    pub voltage: Option<f64>,
    pub temperature: Option<f64>,
    pub status: Option<String>,
    pub installed_at: Option<DateTime<Utc>>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl PanelUpdate {
    /// True when no applicable field is set (`id` does not count)
    pub fn is_empty(&self) -> bool {
        self.voltage.is_none()
            && self.temperature.is_none()
            && self.status.is_none()
            && self.installed_at.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
    }

    /// Overwrite the fields present in this payload; the key is left untouched
    pub fn apply(&self, record: &mut PanelRecord) {
        if let Some(voltage) = self.voltage {
            record.voltage = voltage;
        }
        if let Some(temperature) = self.temperature {
            record.temperature = temperature;
        }
        if let Some(status) = &self.status {
            record.status = status.clone();
        }
        if let Some(installed_at) = self.installed_at {
            record.installed_at = installed_at;
        }
        if let Some(latitude) = self.latitude {
            record.latitude = latitude;
        }
        if let Some(longitude) = self.longitude {
            record.longitude = longitude;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> PanelRecord {
        PanelRecord {
            id: 1,
            voltage: 220.0,
            temperature: 30.0,
            status: "OK".to_string(),
            installed_at: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            latitude: 10.0,
            longitude: 20.0,
        }
    }

    #[test]
    fn test_apply_ignores_id() {
        let mut record = sample();
        let update = PanelUpdate {
            id: Some(99),
            status: Some("Fault".to_string()),
            ..Default::default()
        };

        update.apply(&mut record);

        assert_eq!(record.id, 1);
        assert_eq!(record.status, "Fault");
        assert_eq!(record.voltage, 220.0);
    }

    #[test]
    fn test_is_empty_disregards_id() {
        let update = PanelUpdate {
            id: Some(5),
            ..Default::default()
        };
        assert!(update.is_empty());
        let update = PanelUpdate {
            latitude: Some(0.0),
            ..update
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_partial_payload_deserializes() {
        let update: PanelUpdate = serde_json::from_str(r#"{"voltage": 240.5}"#).unwrap();
        assert_eq!(update.voltage, Some(240.5));
        assert!(update.status.is_none());
    }
}
