use crate::models::itinerary::{Activity, ItineraryDay};
use crate::models::trip::TripRequest;

const GETYOURGUIDE: &str = "https://www.getyourguide.com";
const TRIPADVISOR: &str = "https://www.tripadvisor.com";
const VIATOR: &str = "https://www.viator.com";
const OPENTABLE: &str = "https://www.opentable.com";

// Budget split across the four daily slots, floored to whole dollars.
const MORNING_SHARE: f64 = 0.25;
const LUNCH_SHARE: f64 = 0.20;
const AFTERNOON_SHARE: f64 = 0.35;
const EVENING_SHARE: f64 = 0.20;

/// One themed slot variant. An empty `keyword` marks the unconditional
/// fallback entry and must come last in its table.
struct SlotTheme {
    keyword: &'static str,
    title: &'static str,
    description: &'static str,
    area: &'static str,
    category: &'static str,
}

const MORNING_THEMES: [SlotTheme; 2] = [
    SlotTheme {
        keyword: "culture",
        title: "Cultural Discovery",
        description: "Explore cultural heritage and local traditions in",
        area: "Cultural area",
        category: "culture",
    },
    SlotTheme {
        keyword: "nature",
        title: "Natural Wonders",
        description: "Experience the natural beauty and outdoor activities in",
        area: "Nature area",
        category: "nature",
    },
];

/// Generic morning rotation used when no interest keyword matches,
/// indexed by `day_index % 4`.
const SIGHTSEEING_ROTATION: [(&str, &str); 4] = [
    ("Historical Sites", "Historical district"),
    ("Local Markets", "Local market area"),
    ("Scenic Views", "Scenic viewpoint"),
    ("City Walking Tour", "City center"),
];

const LUNCH_THEMES: [SlotTheme; 2] = [
    SlotTheme {
        keyword: "food",
        title: "Food Tour",
        description: "Guided food tour sampling local specialties in",
        area: "Food district",
        category: "food",
    },
    SlotTheme {
        keyword: "",
        title: "Local Restaurant",
        description: "Authentic midday dining experience in",
        area: "Local restaurant area",
        category: "food",
    },
];

const AFTERNOON_THEMES: [SlotTheme; 3] = [
    SlotTheme {
        keyword: "shopping",
        title: "Shopping District",
        description: "Browse local shops and boutiques in",
        area: "Shopping area",
        category: "shopping",
    },
    SlotTheme {
        keyword: "adventure",
        title: "Adventure Activity",
        description: "Outdoor thrills and adrenaline in",
        area: "Adventure center",
        category: "adventure",
    },
    SlotTheme {
        keyword: "",
        title: "Cultural Experience",
        description: "Immersive local culture in",
        area: "Cultural venue",
        category: "culture",
    },
];

const EVENING_THEMES: [SlotTheme; 2] = [
    SlotTheme {
        keyword: "nightlife",
        title: "Nightlife Experience",
        description: "Local nightlife and entertainment in",
        area: "Entertainment district",
        category: "nightlife",
    },
    SlotTheme {
        keyword: "",
        title: "Evening Dinner",
        description: "Relaxed dinner to close out the day in",
        area: "Dining area",
        category: "food",
    },
];

/// Fixed placeholder booking site per activity category.
pub fn booking_link(category: &str) -> &'static str {
    match category {
        "food" => TRIPADVISOR,
        "shopping" | "adventure" => VIATOR,
        "nightlife" => OPENTABLE,
        _ => GETYOURGUIDE,
    }
}

/// Build one fully populated day from trip parameters alone.
///
/// Deterministic: the same `(day_index, trip)` always yields the same day.
/// Used both to fill a shortfall behind AI-authored days and to synthesize
/// the complete fallback itinerary.
pub fn procedural_day(day_index: usize, trip: &TripRequest) -> ItineraryDay {
    let interests = trip.interests.joined().to_lowercase();
    let daily_budget = trip.daily_budget();
    let day_label = day_index + 1;

    let activities = vec![
        morning_activity(day_index, trip, &interests, (daily_budget * MORNING_SHARE).floor()),
        slot_activity(
            "12:30",
            pick(&LUNCH_THEMES, &interests),
            day_label,
            trip,
            (daily_budget * LUNCH_SHARE).floor(),
        ),
        slot_activity(
            "15:00",
            pick(&AFTERNOON_THEMES, &interests),
            day_label,
            trip,
            (daily_budget * AFTERNOON_SHARE).floor(),
        ),
        slot_activity(
            "19:30",
            pick(&EVENING_THEMES, &interests),
            day_label,
            trip,
            (daily_budget * EVENING_SHARE).floor(),
        ),
    ];

    ItineraryDay {
        day: day_label as u32,
        date: trip.date_for_day(day_index as u32).format("%Y-%m-%d").to_string(),
        activities,
        estimated_cost: daily_budget,
    }
}

fn pick<'a>(themes: &'a [SlotTheme], interests: &str) -> &'a SlotTheme {
    themes
        .iter()
        .find(|theme| theme.keyword.is_empty() || interests.contains(theme.keyword))
        .unwrap_or(&themes[themes.len() - 1])
}

fn morning_activity(
    day_index: usize,
    trip: &TripRequest,
    interests: &str,
    cost: f64,
) -> Activity {
    let day_label = day_index + 1;
    if let Some(theme) = MORNING_THEMES
        .iter()
        .find(|theme| interests.contains(theme.keyword))
    {
        return slot_activity("09:00", theme, day_label, trip, cost);
    }

    let (title, area) = SIGHTSEEING_ROTATION[day_index % SIGHTSEEING_ROTATION.len()];
    Activity {
        time: "09:00".to_string(),
        title: format!("{} - Day {}", title, day_label),
        description: format!(
            "Explore {} highlights tailored for {} travelers",
            trip.destination, trip.persona
        ),
        location: format!("{}, {}", area, trip.destination),
        cost,
        price_per_person: cost,
        currency: "USD".to_string(),
        category: "sightseeing".to_string(),
        link: booking_link("sightseeing").to_string(),
    }
}

fn slot_activity(
    time: &str,
    theme: &SlotTheme,
    day_label: usize,
    trip: &TripRequest,
    cost: f64,
) -> Activity {
    Activity {
        time: time.to_string(),
        title: format!("{} - Day {}", theme.title, day_label),
        description: format!("{} {}", theme.description, trip.destination),
        location: format!("{}, {}", theme.area, trip.destination),
        cost,
        price_per_person: cost,
        currency: "USD".to_string(),
        category: theme.category.to_string(),
        link: booking_link(theme.category).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::trip::Interests;

    fn trip(interests: Interests) -> TripRequest {
        TripRequest {
            destination: "Kyoto".to_string(),
            start_date: "2025-06-01".parse().unwrap(),
            end_date: "2025-06-03".parse().unwrap(),
            budget: 900.0,
            persona: "culture-enthusiast".to_string(),
            interests,
        }
    }

    #[test]
    fn day_is_fully_populated() {
        let day = procedural_day(0, &trip(Interests::default()));
        assert_eq!(day.day, 1);
        assert_eq!(day.date, "2025-06-01");
        assert_eq!(day.activities.len(), 4);
        for activity in &day.activities {
            assert!(!activity.time.is_empty());
            assert!(!activity.title.is_empty());
            assert!(!activity.description.is_empty());
            assert!(!activity.location.is_empty());
            assert!(!activity.currency.is_empty());
            assert!(!activity.category.is_empty());
            assert!(!activity.link.is_empty());
        }
    }

    #[test]
    fn costs_are_floored_budget_shares() {
        // 900 over 3 days -> 300/day: 75 / 60 / 105 / 60.
        let day = procedural_day(1, &trip(Interests::default()));
        assert_eq!(day.estimated_cost, 300.0);
        let costs: Vec<f64> = day.activities.iter().map(|a| a.cost).collect();
        assert_eq!(costs, vec![75.0, 60.0, 105.0, 60.0]);
        for activity in &day.activities {
            assert_eq!(activity.cost, activity.price_per_person);
        }
    }

    #[test]
    fn culture_interest_themes_the_morning() {
        let day = procedural_day(0, &trip(Interests { culture: true, ..Interests::default() }));
        assert_eq!(day.activities[0].category, "culture");
        assert!(day.activities[0].title.starts_with("Cultural Discovery"));
    }

    #[test]
    fn nature_interest_themes_the_morning() {
        let day = procedural_day(0, &trip(Interests { nature: true, ..Interests::default() }));
        assert_eq!(day.activities[0].category, "nature");
    }

    #[test]
    fn culture_wins_over_nature_when_both_set() {
        let interests = Interests { culture: true, nature: true, ..Interests::default() };
        let day = procedural_day(0, &trip(interests));
        assert_eq!(day.activities[0].category, "culture");
    }

    #[test]
    fn mornings_rotate_without_matching_interests() {
        let t = trip(Interests::default());
        let titles: Vec<String> = (0..5)
            .map(|i| procedural_day(i, &t).activities[0].title.clone())
            .collect();
        assert!(titles[0].starts_with("Historical Sites"));
        assert!(titles[1].starts_with("Local Markets"));
        assert!(titles[2].starts_with("Scenic Views"));
        assert!(titles[3].starts_with("City Walking Tour"));
        assert!(titles[4].starts_with("Historical Sites"));
    }

    #[test]
    fn nightlife_and_shopping_theme_the_later_slots() {
        let interests = Interests { shopping: true, nightlife: true, ..Interests::default() };
        let day = procedural_day(0, &trip(interests));
        assert_eq!(day.activities[2].category, "shopping");
        assert_eq!(day.activities[2].link, VIATOR);
        assert_eq!(day.activities[3].category, "nightlife");
        assert_eq!(day.activities[3].link, OPENTABLE);
    }

    #[test]
    fn booking_links_are_stable_per_category() {
        assert_eq!(booking_link("food"), TRIPADVISOR);
        assert_eq!(booking_link("shopping"), VIATOR);
        assert_eq!(booking_link("adventure"), VIATOR);
        assert_eq!(booking_link("nightlife"), OPENTABLE);
        assert_eq!(booking_link("sightseeing"), GETYOURGUIDE);
        assert_eq!(booking_link("culture"), GETYOURGUIDE);
    }

    #[test]
    fn same_inputs_give_same_day() {
        let t = trip(Interests { food: true, ..Interests::default() });
        assert_eq!(procedural_day(2, &t), procedural_day(2, &t));
    }
}
