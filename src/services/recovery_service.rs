use std::fmt;

use serde_json::Value;

use crate::models::itinerary::{Activity, ItineraryDay, RecoveredItinerary};
use crate::models::trip::TripRequest;
use crate::services::extraction_service;
use crate::services::fallback_service;
use crate::services::repair_service;
use crate::services::trace::{LogTrace, RecoveryTrace};

/// Default booking link for AI-authored activities that arrived without one.
pub const DEFAULT_ACTIVITY_LINK: &str = "https://www.getyourguide.com";

/// Internal control-flow signals of the recovery pipeline. Each one routes
/// the request into the fallback generator; none ever reaches an HTTP caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryFailure {
    /// The raw text holds no `{...}` or `[...]` region at all.
    NoBracketedRegion,
    /// Every repair strategy's parse attempt failed.
    NoParseableStructure,
    /// A value parsed but no day-like array could be located inside it.
    NoDaysArray,
}

impl fmt::Display for RecoveryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryFailure::NoBracketedRegion => write!(f, "no bracketed region"),
            RecoveryFailure::NoParseableStructure => write!(f, "no parseable structure"),
            RecoveryFailure::NoDaysArray => write!(f, "no days array"),
        }
    }
}

/// Recover a schema-complete itinerary from raw model text.
///
/// Never fails: the worst outcome is a fully procedural itinerary. The
/// returned day list always has exactly `trip.total_days()` entries, except
/// that a surplus from an over-producing model is passed through untouched.
pub fn recover_itinerary(raw: &str, trip: &TripRequest) -> RecoveredItinerary {
    recover_itinerary_traced(raw, trip, &LogTrace)
}

pub fn recover_itinerary_traced(
    raw: &str,
    trip: &TripRequest,
    trace: &dyn RecoveryTrace,
) -> RecoveredItinerary {
    let days = match repair_service::parse_model_text(raw, trace)
        .and_then(|value| locate_days(&value))
    {
        Ok(raw_days) => {
            trace.event(&format!("found {} day entries in model output", raw_days.len()));
            normalize_days(&raw_days, trip)
        }
        Err(failure) => {
            trace.event(&format!("structured recovery failed: {}", failure));
            Vec::new()
        }
    };

    complete_itinerary(days, trip, trace)
}

fn locate_days(value: &Value) -> Result<Vec<Value>, RecoveryFailure> {
    extraction_service::find_days_array(value).ok_or(RecoveryFailure::NoDaysArray)
}

/// Map raw day entries onto the canonical schema, defaulting every absent
/// field. Missing, null, empty, zero and wrong-typed values are all treated
/// uniformly as absent; this function cannot fail.
pub fn normalize_days(raw_days: &[Value], trip: &TripRequest) -> Vec<ItineraryDay> {
    raw_days
        .iter()
        .enumerate()
        .map(|(index, raw)| normalize_day(raw, index, trip))
        .collect()
}

fn normalize_day(raw: &Value, index: usize, trip: &TripRequest) -> ItineraryDay {
    let activities = match raw.get("activities").and_then(Value::as_array) {
        Some(list) => list
            .iter()
            .enumerate()
            .map(|(slot, activity)| normalize_activity(activity, slot, trip))
            .collect(),
        None => Vec::new(),
    };

    ItineraryDay {
        day: positive_int(raw.get("day")).unwrap_or(index as u32 + 1),
        date: non_empty_string(raw.get("date")).unwrap_or_else(|| {
            trip.date_for_day(index as u32).format("%Y-%m-%d").to_string()
        }),
        activities,
        estimated_cost: number_or_zero(raw.get("estimatedCost")),
    }
}

fn normalize_activity(raw: &Value, slot: usize, trip: &TripRequest) -> Activity {
    let cost = positive_number(raw.get("cost"));
    let price_per_person = positive_number(raw.get("pricePerPerson"));

    Activity {
        time: non_empty_string(raw.get("time")).unwrap_or_else(|| "12:00".to_string()),
        title: non_empty_string(raw.get("title"))
            .unwrap_or_else(|| format!("Activity {}", slot + 1)),
        description: non_empty_string(raw.get("description"))
            .unwrap_or_else(|| "Local experience".to_string()),
        location: non_empty_string(raw.get("location"))
            .unwrap_or_else(|| trip.destination.clone()),
        cost: cost.or(price_per_person).unwrap_or(50.0),
        price_per_person: price_per_person.or(cost).unwrap_or(50.0),
        currency: non_empty_string(raw.get("currency")).unwrap_or_else(|| "USD".to_string()),
        category: non_empty_string(raw.get("category"))
            .unwrap_or_else(|| "sightseeing".to_string()),
        link: non_empty_string(raw.get("link"))
            .unwrap_or_else(|| DEFAULT_ACTIVITY_LINK.to_string()),
    }
}

/// Guarantee the day count. Shortfalls are filled with procedural days that
/// continue the numbering and date sequence; a surplus is passed through
/// unchanged.
fn complete_itinerary(
    mut days: Vec<ItineraryDay>,
    trip: &TripRequest,
    trace: &dyn RecoveryTrace,
) -> RecoveredItinerary {
    let total_days = trip.total_days() as usize;

    if days.is_empty() {
        trace.event(&format!("generating full fallback itinerary ({} days)", total_days));
        let days = (0..total_days)
            .map(|index| fallback_service::procedural_day(index, trip))
            .collect();
        return RecoveredItinerary {
            days,
            is_ai_generated: false,
            is_complete: true,
        };
    }

    if days.len() >= total_days {
        return RecoveredItinerary {
            days,
            is_ai_generated: true,
            is_complete: true,
        };
    }

    let missing = total_days - days.len();
    trace.event(&format!("model under-delivered; filling {} missing days", missing));
    for index in days.len()..total_days {
        days.push(fallback_service::procedural_day(index, trip));
    }

    RecoveredItinerary {
        days,
        is_ai_generated: true,
        is_complete: false,
    }
}

fn non_empty_string(value: Option<&Value>) -> Option<String> {
    match value.and_then(Value::as_str) {
        Some(s) if !s.is_empty() => Some(s.to_string()),
        _ => None,
    }
}

fn positive_number(value: Option<&Value>) -> Option<f64> {
    value
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite() && *n > 0.0)
}

fn number_or_zero(value: Option<&Value>) -> f64 {
    value
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

fn positive_int(value: Option<&Value>) -> Option<u32> {
    value
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite() && *n >= 1.0)
        .map(|n| n as u32)
}
