//! Domain DTOs for the vehicle API.
//!
//! # Design
//! These types mirror the backend's JSON schema but are defined independently
//! of the mock-server crate. Integration tests catch any schema drift between
//! the two. `status` stays an open string on the wire so an unknown label from
//! a newer backend still deserializes; `VehicleStatus` names the labels the
//! backend currently knows about.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Status assigned to every fresh draft.
pub const DEFAULT_STATUS: &str = "IN_PRODUCTION";

/// A vehicle record as exchanged with the API.
///
/// `id` is `Some` only for records the server has persisted. Drafts built on
/// the client never carry one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub vin: String,
    pub model: String,
    pub make: String,
    pub year: i32,
    pub color: String,
    #[serde(rename = "type")]
    pub vehicle_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transmission: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturing_date: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Vehicle {
    /// An empty draft: blank strings, the current year and `IN_PRODUCTION`.
    pub fn draft() -> Self {
        Self {
            id: None,
            vin: String::new(),
            model: String::new(),
            make: String::new(),
            year: Local::now().year(),
            color: String::new(),
            vehicle_type: String::new(),
            engine_type: None,
            transmission: None,
            price: None,
            status: DEFAULT_STATUS.to_string(),
            manufacturing_date: None,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Lifecycle labels known to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleStatus {
    InProduction,
    QualityCheck,
    ReadyForDelivery,
    Shipped,
    Delivered,
    InService,
    MaintenanceRequired,
    Retired,
}

impl VehicleStatus {
    pub const ALL: [VehicleStatus; 8] = [
        VehicleStatus::InProduction,
        VehicleStatus::QualityCheck,
        VehicleStatus::ReadyForDelivery,
        VehicleStatus::Shipped,
        VehicleStatus::Delivered,
        VehicleStatus::InService,
        VehicleStatus::MaintenanceRequired,
        VehicleStatus::Retired,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VehicleStatus::InProduction => "IN_PRODUCTION",
            VehicleStatus::QualityCheck => "QUALITY_CHECK",
            VehicleStatus::ReadyForDelivery => "READY_FOR_DELIVERY",
            VehicleStatus::Shipped => "SHIPPED",
            VehicleStatus::Delivered => "DELIVERED",
            VehicleStatus::InService => "IN_SERVICE",
            VehicleStatus::MaintenanceRequired => "MAINTENANCE_REQUIRED",
            VehicleStatus::Retired => "RETIRED",
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a label is not one of [`VehicleStatus::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown vehicle status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for VehicleStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VehicleStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}
