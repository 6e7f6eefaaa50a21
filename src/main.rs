use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use wanderplan_api::routes;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    println!("Application starting...");

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    println!("Logger initialized");

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    } else {
        println!("Release mode");
    }

    let host = std::env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);
    println!("Attempting to bind to {}:{}", host, port);

    if std::env::var("GROQ_API_KEY").is_err() {
        eprintln!("WARNING: GROQ_API_KEY is not set; generation endpoints will report errors");
    }

    println!("Starting HTTP server...");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .route("/health", web::get().to(routes::health::health_check))
            .service(
                web::scope("/api")
                    .route("/personas", web::get().to(routes::persona::get_personas))
                    .service(
                        web::scope("/itineraries")
                            .route("/generate", web::post().to(routes::itinerary::generate))
                            .route(
                                "/estimate-cost",
                                web::post().to(routes::itinerary::estimate_cost),
                            )
                            .route(
                                "/suggestions",
                                web::post().to(routes::itinerary::suggestions),
                            ),
                    ),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
