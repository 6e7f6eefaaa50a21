use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Interests {
    #[serde(default)]
    pub culture: bool,
    #[serde(default)]
    pub food: bool,
    #[serde(default)]
    pub nature: bool,
    #[serde(default)]
    pub shopping: bool,
    #[serde(default)]
    pub nightlife: bool,
}

impl Interests {
    /// Enabled interest tags in declaration order.
    pub fn tags(&self) -> Vec<&'static str> {
        let mut tags = Vec::new();
        if self.culture {
            tags.push("culture");
        }
        if self.food {
            tags.push("food");
        }
        if self.nature {
            tags.push("nature");
        }
        if self.shopping {
            tags.push("shopping");
        }
        if self.nightlife {
            tags.push("nightlife");
        }
        tags
    }

    pub fn joined(&self) -> String {
        self.tags().join(", ")
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TripRequest {
    pub destination: String,
    #[serde(rename = "startDate")]
    pub start_date: NaiveDate,
    #[serde(rename = "endDate")]
    pub end_date: NaiveDate,
    pub budget: f64,
    pub persona: String,
    #[serde(default)]
    pub interests: Interests,
}

impl TripRequest {
    /// Inclusive day count of the trip. A same-day trip still counts as one day.
    pub fn total_days(&self) -> u32 {
        let days = (self.end_date - self.start_date).num_days() + 1;
        days.max(1) as u32
    }

    /// Whole-dollar budget share for a single day.
    pub fn daily_budget(&self) -> f64 {
        (self.budget / self.total_days() as f64).floor()
    }

    /// Calendar date of the day at `index` (0-based).
    pub fn date_for_day(&self, index: u32) -> NaiveDate {
        self.start_date + Duration::days(index as i64)
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct PersonaOption {
    pub value: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

pub const PERSONA_OPTIONS: [PersonaOption; 8] = [
    PersonaOption {
        value: "budget-backpacker",
        label: "Budget Backpacker",
        description: "Minimal spending, hostels, local transport",
    },
    PersonaOption {
        value: "luxury-traveler",
        label: "Luxury Traveler",
        description: "High-end hotels, fine dining, premium experiences",
    },
    PersonaOption {
        value: "family-friendly",
        label: "Family Traveler",
        description: "Kid-friendly activities, family restaurants, safe areas",
    },
    PersonaOption {
        value: "adventure-seeker",
        label: "Adventure Seeker",
        description: "Outdoor activities, sports, unique experiences",
    },
    PersonaOption {
        value: "culture-enthusiast",
        label: "Culture Enthusiast",
        description: "Museums, historical sites, local traditions",
    },
    PersonaOption {
        value: "foodie",
        label: "Foodie",
        description: "Local cuisine, cooking classes, food tours",
    },
    PersonaOption {
        value: "business-traveler",
        label: "Business Traveler",
        description: "Convenient locations, quick access, professional venues",
    },
    PersonaOption {
        value: "romantic-couple",
        label: "Romantic Couple",
        description: "Romantic dining, scenic views, couple activities",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn trip(start: &str, end: &str, budget: f64) -> TripRequest {
        TripRequest {
            destination: "Lisbon".to_string(),
            start_date: start.parse().unwrap(),
            end_date: end.parse().unwrap(),
            budget,
            persona: "foodie".to_string(),
            interests: Interests::default(),
        }
    }

    #[test]
    fn total_days_is_inclusive() {
        assert_eq!(trip("2025-06-01", "2025-06-03", 900.0).total_days(), 3);
        assert_eq!(trip("2025-06-01", "2025-06-01", 900.0).total_days(), 1);
    }

    #[test]
    fn daily_budget_is_floored() {
        assert_eq!(trip("2025-06-01", "2025-06-03", 900.0).daily_budget(), 300.0);
        assert_eq!(trip("2025-06-01", "2025-06-03", 1000.0).daily_budget(), 333.0);
    }

    #[test]
    fn dates_advance_from_start() {
        let t = trip("2025-06-01", "2025-06-03", 900.0);
        assert_eq!(t.date_for_day(0).to_string(), "2025-06-01");
        assert_eq!(t.date_for_day(2).to_string(), "2025-06-03");
    }

    #[test]
    fn interest_tags_keep_declaration_order() {
        let interests = Interests {
            culture: true,
            nightlife: true,
            ..Interests::default()
        };
        assert_eq!(interests.joined(), "culture, nightlife");
    }
}
