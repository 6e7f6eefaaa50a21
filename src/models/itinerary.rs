use serde::{Deserialize, Serialize};

/// One scheduled item within a day. Every field is always populated; the
/// recovery pipeline fills absent values with deterministic defaults before
/// anything leaves the service boundary.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Activity {
    pub time: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub cost: f64,
    #[serde(rename = "pricePerPerson")]
    pub price_per_person: f64,
    pub currency: String,
    pub category: String,
    pub link: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ItineraryDay {
    pub day: u32,
    pub date: String,
    pub activities: Vec<Activity>,
    #[serde(rename = "estimatedCost")]
    pub estimated_cost: f64,
}

/// Result of running model output through the recovery pipeline.
///
/// `days.len()` always equals the requested trip length. `is_ai_generated`
/// is true when at least one day came from parsed model output;
/// `is_complete` is false only when the model under-delivered and the
/// shortfall was filled procedurally.
#[derive(Debug, Serialize, Clone)]
pub struct RecoveredItinerary {
    pub days: Vec<ItineraryDay>,
    pub is_ai_generated: bool,
    pub is_complete: bool,
}
