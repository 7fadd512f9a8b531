use std::path::Path;

use crate::device::{DeviceRecord, Priority, ESSENTIAL_CATEGORY};
use crate::error::AdvisorError;

/// A small household catalog, used when no catalog file is given
pub fn sample_catalog() -> Vec<DeviceRecord> {
    vec![
        DeviceRecord::new("Refrigerator", ESSENTIAL_CATEGORY, 200., 0.8).with_priority(Priority::High),
        DeviceRecord::new("Air Conditioner", "Comfort", 2000., 2.5).with_priority(Priority::Medium),
        DeviceRecord::new("TV", "Entertainment", 150., 1.2).with_priority(Priority::Low),
        DeviceRecord::new("Washing Machine", "Appliance", 800., 2.).with_priority(Priority::Medium),
        DeviceRecord::new("Computer", "Work", 300., 1.5).with_priority(Priority::High),
    ]
}

/// Parses a JSON array of device records
pub fn parse_catalog(json: &str) -> Result<Vec<DeviceRecord>, AdvisorError> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<DeviceRecord>, AdvisorError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| AdvisorError::Io {
        path: path.to_owned(),
        source,
    })?;

    parse_catalog(&raw)
}

#[test]
fn test_parse_catalog() {
    let devices = parse_catalog(
        r#"[
            {"id": "Heater", "category": "Comfort", "consumption": 1800, "cost": 2.2, "priority": "medium"},
            {"id": "Router", "category": "Essential", "consumption": 10, "cost": 0.1}
        ]"#,
    )
    .unwrap();

    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0].priority, Some(Priority::Medium));
    assert_eq!(devices[1], DeviceRecord::new("Router", "Essential", 10., 0.1));

    assert!(matches!(parse_catalog(r#"[{"id": "x"}]"#), Err(AdvisorError::Json(_))));
}
