use crate::models::trip::TripRequest;

const LONG_TRIP_DAYS: u32 = 7;
const EXTENDED_TRIP_DAYS: u32 = 14;

/// Build the itinerary-generation instruction for the model.
///
/// Pure string construction: the same trip always produces the same prompt.
/// The embedded JSON example carries the real first date and the real daily
/// budget so the model anchors on them.
pub fn build_itinerary_prompt(trip: &TripRequest) -> String {
    let total_days = trip.total_days();
    let daily_budget = trip.daily_budget();
    let interests = trip.interests.joined();
    let first_date = trip.date_for_day(0).format("%Y-%m-%d");

    let mut prompt = format!(
        "Create a detailed {total_days}-day travel itinerary for {destination} for a {persona} \
         traveler with ${daily_budget} daily budget.\n\n\
         Traveler interests: {interests}\n\n\
         IMPORTANT: Respond with ONLY valid JSON in this exact format:\n\
         {{\n\
           \"days\": [\n\
             {{\n\
               \"day\": 1,\n\
               \"date\": \"{first_date}\",\n\
               \"city\": \"{destination}\",\n\
               \"activities\": [\n\
                 {{\n\
                   \"time\": \"09:00\",\n\
                   \"title\": \"Activity name\",\n\
                   \"description\": \"Detailed description\",\n\
                   \"location\": \"Specific location\",\n\
                   \"cost\": 50,\n\
                   \"pricePerPerson\": 50,\n\
                   \"currency\": \"USD\",\n\
                   \"category\": \"culture|food|nature|shopping|adventure|nightlife|sightseeing\",\n\
                   \"link\": \"https://example.com\"\n\
                 }}\n\
               ],\n\
               \"estimatedCost\": {daily_budget}\n\
             }}\n\
           ]\n\
         }}\n\n\
         Requirements:\n\
         - Include exactly {total_days} days\n\
         - Each day should have 3-4 activities\n\
         - Use realistic costs within the budget\n\
         - Include specific locations and times\n\
         - Focus on the traveler's interests: {interests}\n\
         - Make activities suitable for {persona} travelers",
        destination = trip.destination,
        persona = trip.persona,
    );

    prompt.push_str(&trip_length_guidance(trip, total_days));
    prompt.push_str("\n\nRespond with ONLY the JSON, no additional text.");
    prompt
}

/// Extra planning guidance that scales with trip length.
fn trip_length_guidance(trip: &TripRequest, total_days: u32) -> String {
    if total_days > EXTENDED_TRIP_DAYS {
        format!(
            "\n\nMULTI-CITY PLANNING REQUIRED:\n\
             This is a {total_days}-day trip, so break it into multiple cities or regions:\n\
             - Suggest 3-4 different cities/regions within {destination}\n\
             - Allocate days strategically, around 6-8 days per major city\n\
             - Include travel days between cities\n\
             - Consider geographic proximity and transportation",
            destination = trip.destination,
        )
    } else if total_days > LONG_TRIP_DAYS {
        format!(
            "\n\nEXTENDED PLANNING:\n\
             For this {total_days}-day trip, consider:\n\
             - Multiple neighborhoods/districts within {destination}\n\
             - Day trips to nearby attractions\n\
             - A mix of intensive and relaxed days",
            destination = trip.destination,
        )
    } else {
        String::new()
    }
}

/// Prompt for a single-number total-cost estimate.
pub fn build_cost_estimate_prompt(trip: &TripRequest) -> String {
    let total_days = trip.total_days();
    format!(
        "Estimate the total cost for a trip to {destination} for {total_days} days.\n\n\
         Trip details:\n\
         - Destination: {destination}\n\
         - Duration: {total_days} days\n\
         - Traveler type: {persona}\n\
         - Budget range: ${budget}\n\n\
         Provide a realistic cost estimate in USD covering accommodation, local \
         transportation, food and dining, activities and attractions, and \
         miscellaneous expenses.\n\n\
         Return only the number (no currency symbol or additional text).",
        destination = trip.destination,
        persona = trip.persona,
        budget = trip.budget,
    )
}

/// Prompt for five alternative-destination suggestions.
pub fn build_suggestions_prompt(destination: &str) -> String {
    format!(
        "Suggest 5 alternative destinations similar to {destination} for travelers. \
         Consider climate, culture, activities, and cost.\n\n\
         Return only a JSON array of destination names:\n\
         [\"Destination 1\", \"Destination 2\", \"Destination 3\", \"Destination 4\", \"Destination 5\"]"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::trip::{Interests, TripRequest};

    fn trip(start: &str, end: &str) -> TripRequest {
        TripRequest {
            destination: "Portugal".to_string(),
            start_date: start.parse().unwrap(),
            end_date: end.parse().unwrap(),
            budget: 3000.0,
            persona: "budget-backpacker".to_string(),
            interests: Interests {
                food: true,
                nature: true,
                ..Interests::default()
            },
        }
    }

    #[test]
    fn prompt_is_deterministic_and_anchored() {
        let t = trip("2025-06-01", "2025-06-03");
        let prompt = build_itinerary_prompt(&t);
        assert_eq!(prompt, build_itinerary_prompt(&t));
        assert!(prompt.contains("3-day travel itinerary for Portugal"));
        assert!(prompt.contains("\"date\": \"2025-06-01\""));
        assert!(prompt.contains("$1000 daily budget"));
        assert!(prompt.contains("food, nature"));
    }

    #[test]
    fn short_trips_get_no_extra_guidance() {
        let prompt = build_itinerary_prompt(&trip("2025-06-01", "2025-06-05"));
        assert!(!prompt.contains("EXTENDED PLANNING"));
        assert!(!prompt.contains("MULTI-CITY"));
    }

    #[test]
    fn long_trips_get_extended_guidance() {
        let prompt = build_itinerary_prompt(&trip("2025-06-01", "2025-06-10"));
        assert!(prompt.contains("EXTENDED PLANNING"));
        assert!(!prompt.contains("MULTI-CITY"));
    }

    #[test]
    fn extended_trips_get_multi_city_guidance() {
        let prompt = build_itinerary_prompt(&trip("2025-06-01", "2025-06-20"));
        assert!(prompt.contains("MULTI-CITY PLANNING REQUIRED"));
        assert!(!prompt.contains("EXTENDED PLANNING"));
    }

    #[test]
    fn cost_prompt_names_the_trip() {
        let prompt = build_cost_estimate_prompt(&trip("2025-06-01", "2025-06-03"));
        assert!(prompt.contains("trip to Portugal for 3 days"));
        assert!(prompt.contains("Return only the number"));
    }

    #[test]
    fn suggestions_prompt_asks_for_json_array() {
        let prompt = build_suggestions_prompt("Lisbon");
        assert!(prompt.contains("similar to Lisbon"));
        assert!(prompt.contains("JSON array"));
    }
}
