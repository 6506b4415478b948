//! Scalar settings groups shared by the create, alter and describe shapes.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How the topic is billed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeteringMode {
    #[default]
    Unspecified,
    ReservedCapacity,
    RequestUnits,
}

/// How the service splits and merges partitions under load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoPartitioningStrategy {
    #[default]
    Unspecified,
    Disabled,
    ScaleUp,
    ScaleUpAndDown,
    Paused,
}

/// Auto-partitioning settings of a topic.
///
/// Every `None` leaves the choice to the server. Describe results report the
/// settings in effect as [`AutoPartitioningState`](crate::AutoPartitioningState).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AutoPartitioningSettings {
    pub strategy: Option<AutoPartitioningStrategy>,
    /// How long load has to stay past a threshold before the service reacts.
    pub stabilization_window: Option<Duration>,
    pub down_utilization_percent: Option<i32>,
    pub up_utilization_percent: Option<i32>,
}

impl AutoPartitioningSettings {
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        check_percent("down_utilization_percent", self.down_utilization_percent)?;
        check_percent("up_utilization_percent", self.up_utilization_percent)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.strategy.is_none()
            && self.stabilization_window.is_none()
            && self.down_utilization_percent.is_none()
            && self.up_utilization_percent.is_none()
    }
}

/// Change to the auto-partitioning settings. `None` leaves a field as it is.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AlterAutoPartitioningSettings {
    pub set_strategy: Option<AutoPartitioningStrategy>,
    pub set_stabilization_window: Option<Duration>,
    pub set_down_utilization_percent: Option<i32>,
    pub set_up_utilization_percent: Option<i32>,
}

impl AlterAutoPartitioningSettings {
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        check_percent(
            "set_down_utilization_percent",
            self.set_down_utilization_percent,
        )?;
        check_percent("set_up_utilization_percent", self.set_up_utilization_percent)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.set_strategy.is_none()
            && self.set_stabilization_window.is_none()
            && self.set_down_utilization_percent.is_none()
            && self.set_up_utilization_percent.is_none()
    }
}

/// Rolling counter over three windows, as reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MultipleWindowsStat {
    pub per_minute: i64,
    pub per_hour: i64,
    pub per_day: i64,
}

fn check_percent(field: &'static str, value: Option<i32>) -> Result<(), ValidationError> {
    match value {
        Some(v) if !(0..=100).contains(&v) => {
            Err(ValidationError::PercentOutOfRange { field, value: v })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_bounds() {
        let mut settings = AutoPartitioningSettings {
            up_utilization_percent: Some(100),
            down_utilization_percent: Some(0),
            ..Default::default()
        };
        assert!(settings.validate().is_ok());

        settings.up_utilization_percent = Some(101);
        assert_eq!(
            settings.validate(),
            Err(ValidationError::PercentOutOfRange {
                field: "up_utilization_percent",
                value: 101,
            })
        );
    }

    #[test]
    fn test_alter_percent_bounds() {
        let delta = AlterAutoPartitioningSettings {
            set_down_utilization_percent: Some(-5),
            ..Default::default()
        };
        assert!(matches!(
            delta.validate(),
            Err(ValidationError::PercentOutOfRange { value: -5, .. })
        ));
    }

    #[test]
    fn test_empty_settings() {
        assert!(AutoPartitioningSettings::default().is_empty());
        let settings = AutoPartitioningSettings {
            strategy: Some(AutoPartitioningStrategy::Paused),
            ..Default::default()
        };
        assert!(!settings.is_empty());
    }

    #[test]
    fn test_enum_serde_names() {
        let json = serde_json::to_string(&AutoPartitioningStrategy::ScaleUpAndDown).unwrap();
        assert_eq!(json, "\"scale_up_and_down\"");
        let mode: MeteringMode = serde_json::from_str("\"request_units\"").unwrap();
        assert_eq!(mode, MeteringMode::RequestUnits);
    }
}
