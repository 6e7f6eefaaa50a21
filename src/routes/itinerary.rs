use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use crate::models::trip::TripRequest;
use crate::services::groq_service::GroqService;
use crate::services::prompt_service;
use crate::services::recovery_service;

const ITINERARY_MAX_TOKENS: u32 = 4000;
const ESTIMATE_MAX_TOKENS: u32 = 100;
const SUGGESTIONS_MAX_TOKENS: u32 = 200;

/*
    /api/itineraries/generate
*/
pub async fn generate(input: web::Json<TripRequest>) -> impl Responder {
    let trip = input.into_inner();
    if trip.destination.trim().is_empty() {
        return HttpResponse::BadRequest().body("Destination is required");
    }

    let groq = match GroqService::new() {
        Ok(service) => service,
        Err(err) => {
            eprintln!("Groq configuration error: {}", err);
            return HttpResponse::InternalServerError()
                .json(json!({ "error": "Groq API key not configured" }));
        }
    };

    log::info!(
        "Generating AI itinerary for {} ({} days)",
        trip.destination,
        trip.total_days()
    );
    let prompt = prompt_service::build_itinerary_prompt(&trip);

    let raw = match groq.chat_completion(&prompt, ITINERARY_MAX_TOKENS).await {
        Ok(text) => text,
        Err(err) => {
            eprintln!("Groq request failed: {}", err);
            return HttpResponse::InternalServerError()
                .json(json!({ "error": "Failed to generate itinerary" }));
        }
    };

    let recovered = recovery_service::recover_itinerary(&raw, &trip);
    let generated_days = recovered.days.len();
    log::info!(
        "Recovered {} days (aiGenerated: {}, complete: {})",
        generated_days,
        recovered.is_ai_generated,
        recovered.is_complete
    );

    HttpResponse::Ok().json(json!({
        "success": true,
        "itinerary": recovered.days,
        "totalDays": trip.total_days(),
        "generatedDays": generated_days,
        "isComplete": recovered.is_complete,
        "isAIGenerated": recovered.is_ai_generated,
    }))
}

/*
    /api/itineraries/estimate-cost
*/
pub async fn estimate_cost(input: web::Json<TripRequest>) -> impl Responder {
    let trip = input.into_inner();

    let groq = match GroqService::new() {
        Ok(service) => service,
        Err(err) => {
            eprintln!("Groq configuration error: {}", err);
            return HttpResponse::InternalServerError()
                .json(json!({ "error": "Groq API key not configured" }));
        }
    };

    let prompt = prompt_service::build_cost_estimate_prompt(&trip);
    match groq.chat_completion(&prompt, ESTIMATE_MAX_TOKENS).await {
        Ok(text) => {
            // A reply that is not a number falls back to the requested budget.
            let cost = leading_number(&text).unwrap_or(trip.budget);
            HttpResponse::Ok().json(json!({ "success": true, "cost": cost }))
        }
        Err(err) => {
            eprintln!("Groq request failed: {}", err);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to estimate cost" }))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SuggestionRequest {
    pub destination: String,
}

/*
    /api/itineraries/suggestions
*/
pub async fn suggestions(input: web::Json<SuggestionRequest>) -> impl Responder {
    let request = input.into_inner();

    let groq = match GroqService::new() {
        Ok(service) => service,
        Err(err) => {
            eprintln!("Groq configuration error: {}", err);
            return HttpResponse::InternalServerError()
                .json(json!({ "error": "Groq API key not configured" }));
        }
    };

    let prompt = prompt_service::build_suggestions_prompt(&request.destination);
    match groq.chat_completion(&prompt, SUGGESTIONS_MAX_TOKENS).await {
        Ok(text) => {
            let suggestions = parse_suggestions(&text);
            HttpResponse::Ok().json(json!({ "success": true, "suggestions": suggestions }))
        }
        Err(err) => {
            eprintln!("Groq request failed: {}", err);
            HttpResponse::InternalServerError()
                .json(json!({ "error": "Failed to generate suggestions" }))
        }
    }
}

/// Leading integer of a model reply, tolerating trailing prose.
fn leading_number(text: &str) -> Option<f64> {
    let digits: String = text
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Parse a suggestions reply into a list of names. Markdown fences are
/// stripped first; anything unparseable becomes an empty list, not an error.
fn parse_suggestions(text: &str) -> Vec<String> {
    let cleaned = text.replace("```json", "").replace("```", "");
    match serde_json::from_str::<Vec<String>>(cleaned.trim()) {
        Ok(list) => list,
        Err(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_number_tolerates_prose_suffix() {
        assert_eq!(leading_number("1500"), Some(1500.0));
        assert_eq!(leading_number("  2400 USD total"), Some(2400.0));
        assert_eq!(leading_number("around $900"), None);
        assert_eq!(leading_number(""), None);
    }

    #[test]
    fn suggestions_strip_markdown_fences() {
        let reply = "```json\n[\"Porto\", \"Seville\"]\n```";
        assert_eq!(parse_suggestions(reply), vec!["Porto", "Seville"]);
    }

    #[test]
    fn bad_suggestions_become_empty_list() {
        assert!(parse_suggestions("I cannot help with that").is_empty());
        assert!(parse_suggestions("[1, 2, 3]").is_empty());
    }
}
