use actix_web::{HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;
use std::env;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

pub async fn health_check() -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let groq_result = check_groq_config();
    health
        .services
        .insert("groq".to_string(), groq_result.clone());

    if groq_result.status != "ok" {
        health.status = "degraded".to_string();
    }

    HttpResponse::Ok().json(health)
}

/// The generation endpoints need a Groq credential; report its presence
/// without calling out to the API.
fn check_groq_config() -> ServiceStatus {
    match env::var("GROQ_API_KEY") {
        Ok(key) if !key.is_empty() => ServiceStatus {
            status: "ok".to_string(),
            details: None,
        },
        _ => ServiceStatus {
            status: "misconfigured".to_string(),
            details: Some("GROQ_API_KEY not set".to_string()),
        },
    }
}
