use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::{
    DeliveryWindow, Dimensions, ParcelState, ParcelTimeline, ParcelTracking, ParcelTrackingConfig,
};

/// Parcel to create or update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Default)]
#[serde(rename_all = "camelCase")]
pub struct ParcelRequest {
    #[builder(default)]
    #[serde(default)]
    pub products: Vec<String>,
    pub dimensions: Option<Dimensions>,
    #[builder(default)]
    #[serde(default)]
    pub tracking: Vec<ParcelTrackingConfig>,
}

/// Parcel as returned by the tracking API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Parcel {
    pub parcel_id: Uuid,
    pub order_id: Option<Uuid>,
    pub dimensions: Option<Dimensions>,
    pub state: Option<ParcelState>,
    pub tracking_state: Option<String>,
    pub max_store_date: Option<DateTime<Utc>>,
    pub delivery_window: Option<DeliveryWindow>,
    pub active_tracking: Option<ParcelTracking>,
    pub timeline: Vec<ParcelTimeline>,
    pub products: Vec<String>,
    pub carrier_tracking_url: Option<String>,
}
