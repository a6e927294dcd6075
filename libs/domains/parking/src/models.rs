use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::{Display, EnumString};
use ts_rs::TS;
use utoipa::ToSchema;
use validator::Validate;

/// Kind of discount a lot offers
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    ToSchema,
    TS,
    Hash,
)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DiscountType {
    /// Unlocked by spending at least `threshold`
    Purchase,
    /// Unlocked by presenting proof of a qualifying purchase
    Validation,
    /// Member perk, optionally gated by `threshold`
    Membership,
}

/// Proof-of-purchase category that unlocks validation discounts
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    ToSchema,
    TS,
    Hash,
)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DiscountQualifier {
    Movie,
    Dining,
    Grocery,
    Membership,
    Other,
}

/// Geographic position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[ts(export)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Pricing band applied to the paid minutes that fall inside it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RateTier {
    pub id: String,
    /// First minute of the band (inclusive)
    pub from_minute: u32,
    /// Last minute of the band (inclusive); `None` means unbounded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_minute: Option<u32>,
    pub rate_per_hour: f64,
}

impl RateTier {
    /// Number of minutes the band can absorb, `None` when unbounded
    pub fn capacity(&self) -> Option<u32> {
        self.to_minute
            .map(|to| to.saturating_sub(self.from_minute).saturating_add(1))
    }
}

/// Conditional grant of extra free minutes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ParkingDiscount {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: DiscountType,
    pub description: String,
    /// Minimum spend required, in the lot's currency
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<DiscountQualifier>,
    pub additional_free_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

/// Parking lot as published by the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ParkingLot {
    pub id: String,
    pub name: String,
    pub address: String,
    pub coordinates: Coordinates,
    /// Base free allowance before any discount
    pub free_minutes: u32,
    /// Ordered ascending by `from_minute`, contiguous, only the last may be unbounded
    pub tiers: Vec<RateTier>,
    #[serde(default)]
    pub discounts: Vec<ParkingDiscount>,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub operator: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub image_url: Option<String>,
}

/// Stay to be priced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingQuery {
    #[validate(range(min = 1, message = "durationMinutes must be a positive integer"))]
    pub duration_minutes: u32,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "spendAmount must not be negative"))]
    pub spend_amount: f64,
    #[serde(default)]
    pub qualifiers: Vec<DiscountQualifier>,
}

impl PricingQuery {
    pub fn new(duration_minutes: u32) -> Self {
        Self {
            duration_minutes,
            spend_amount: 0.0,
            qualifiers: Vec::new(),
        }
    }

    pub fn with_spend(mut self, spend_amount: f64) -> Self {
        self.spend_amount = spend_amount;
        self
    }

    pub fn with_qualifiers(mut self, qualifiers: impl IntoIterator<Item = DiscountQualifier>) -> Self {
        self.qualifiers = qualifiers.into_iter().collect();
        self
    }
}

/// Cost breakdown for one lot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingBreakdown {
    pub lot_id: String,
    pub lot_name: String,
    /// Requested duration, before any free allowance
    pub base_minutes_charged: u32,
    pub effective_free_minutes: u32,
    pub effective_paid_minutes: u32,
    /// Rounded to 2 decimal places
    pub total_cost: f64,
    /// Eligible discounts, in the lot's order
    pub discounts_applied: Vec<ParkingDiscount>,
    /// Rate of the last tier that absorbed paid minutes, 0 when nothing was paid
    pub hourly_rate_after_free: f64,
}

/// Breakdown paired with its lot and distance from the search origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RankedResult {
    pub result: PricingBreakdown,
    pub lot: ParkingLot,
    /// Great-circle distance in km; `None` when no origin was given
    pub distance_km: Option<f64>,
}

/// Body of the recommendation endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
    #[validate(range(min = 1, message = "durationMinutes must be a positive integer"))]
    pub duration_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "spendAmount must not be negative"))]
    pub spend_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifiers: Option<Vec<DiscountQualifier>>,
}

impl RecommendationRequest {
    /// Pricing inputs with the optional fields defaulted
    pub fn pricing_query(&self) -> PricingQuery {
        PricingQuery {
            duration_minutes: self.duration_minutes,
            spend_amount: self.spend_amount.unwrap_or(0.0),
            qualifiers: self.qualifiers.clone().unwrap_or_default(),
        }
    }

    /// Search origin, present only when both latitude and longitude are set
    pub fn origin(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)),
            _ => None,
        }
    }
}

/// Response of `POST /recommend`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub requested_duration_minutes: u32,
    /// Cheapest first
    pub recommendations: Vec<PricingBreakdown>,
    #[ts(as = "String")]
    pub generated_at: DateTime<Utc>,
}

/// Response of `POST /nearby`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NearbyResponse {
    pub origin: Option<Coordinates>,
    pub requested_duration_minutes: u32,
    /// Closest first, lots beyond the search radius removed
    pub results: Vec<RankedResult>,
    #[ts(as = "String")]
    pub generated_at: DateTime<Utc>,
}

/// Envelope of `GET /lots`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, TS)]
#[ts(export)]
pub struct LotListResponse {
    pub data: Vec<ParkingLot>,
}
